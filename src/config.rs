/// Buy-in every built-in strategy offers.
pub const DEFAULT_BUYIN: u32 = 100;

/// Table-wide rules and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Decks in the shoe.
    pub decks: usize,
    /// Largest single-hand wager accepted.
    pub max_bet: u32,
    /// Rejected bets tolerated per seat per round before the run is aborted.
    pub bet_retry_limit: u32,
    /// Recorded hands between statistics flushes; zero disables flushing.
    pub stats_flush_interval: u64,
    /// Dealer draws to a soft 17 instead of standing on it.
    pub dealer_hits_soft_17: bool,
    /// Seed for the shoe; `None` seeds from the clock and process id.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            decks: 6,
            max_bet: 100,
            bet_retry_limit: 3,
            stats_flush_interval: 250_000,
            dealer_hits_soft_17: false,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_decks(mut self, decks: usize) -> Self {
        self.decks = decks;
        self
    }
}
