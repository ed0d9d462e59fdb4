//! blackjack-sim: a blackjack table simulator
//!
//! Goals:
//! - Exact casino arithmetic, including half-unit blackjack payouts
//! - Pluggable decision agents behind one trait
//! - Reproducible runs from a seeded shoe
//! - Broken agent contracts surface as errors, never as panics
//!
//! ## Quick start: simulate basic strategy
//! ```
//! use blackjack_sim::config::TableConfig;
//! use blackjack_sim::strategy::StrategyKind;
//! use blackjack_sim::table::Table;
//!
//! let mut table = Table::new(TableConfig::default().with_seed(2024)).unwrap();
//! let seat = table.add_player(StrategyKind::Basic.build());
//! table.play_rounds(1_000).unwrap();
//!
//! let player = table.player(seat).unwrap();
//! assert_eq!(player.hands_played(), 1_000);
//! assert_eq!(player.statistics().recorded(), 1_000);
//! ```
//!
//! ## CLI
//! Play interactively, or let a strategy run unattended:
//! ```sh
//! cargo run --bin blackjack-sim
//! cargo run --bin blackjack-sim -- cardcount --seed 7
//! ```

pub mod cards;
pub mod config;
pub mod hand;
pub mod player;
pub mod shoe;
pub mod statistics;
pub mod strategy;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
