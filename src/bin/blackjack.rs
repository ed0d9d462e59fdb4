use anyhow::Context;
use blackjack_sim::config::TableConfig;
use blackjack_sim::statistics::ConsoleSink;
use blackjack_sim::strategy::StrategyKind;
use blackjack_sim::table::{Table, TableError};
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Blackjack table simulator", long_about = None)]
struct Args {
    /// Strategy for the seated player (basic, cardcount, interactive, dealer, dealerhitssoft17)
    #[arg(default_value = "interactive")]
    strategy: String,

    /// Seed the shoe for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Decks in the shoe
    #[arg(short, long, default_value_t = 6)]
    decks: usize,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let Ok(kind) = args.strategy.parse::<StrategyKind>() else {
        eprintln!("Could not create {} player.  Valid player types are:\n", args.strategy);
        eprintln!("{}", StrategyKind::listing());
        return ExitCode::from(1);
    };

    match run(kind, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("blackjack-sim v{}: {e:#}", blackjack_sim::VERSION);
            match e.downcast_ref::<TableError>() {
                Some(TableError::Fatal(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(kind: StrategyKind, args: &Args) -> anyhow::Result<()> {
    let mut config = TableConfig::default().with_decks(args.decks);
    config.seed = args.seed;
    let mut table = Table::new(config)
        .with_context(|| format!("failed to set up a {}-deck table", args.decks))?;
    table.set_stats_sink(Box::new(ConsoleSink::new()));
    table.add_player(kind.build());
    info!(strategy = %kind, decks = args.decks, seed = ?args.seed, "table open");
    table.run()?;
    Ok(())
}
