//! Win/push/loss counters keyed by dealer upcard and the player's initial deal.
//!
//! Initial deals are bucketed the way strategy charts read them: a pair by its
//! card value, a single ace by its kicker, anything else by its total. Aces
//! count as 1 and ten-valued cards as 10.

use crate::cards::Card;
use crate::hand::Outcome;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::rc::Rc;
use tracing::warn;

const DEALER_SLOTS: usize = 12;
const FIRST_SLOTS: usize = 22;
const SECOND_SLOTS: usize = 12;
const OUTCOMES: usize = 3;

/// Outcome counters for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    counts: Vec<u64>,
    recorded: u64,
}

fn slot(dealer: usize, first: usize, second: usize, outcome: Outcome) -> usize {
    ((dealer * FIRST_SLOTS + first) * SECOND_SLOTS + second) * OUTCOMES + outcome.index()
}

/// Bucket the player's first two cards: `(v, v)` for a pair, `(1, kicker)`
/// for one ace, `(total, 0)` otherwise.
pub fn category(first: Card, second: Card) -> (u8, u8) {
    if first.same_score(second) {
        (first.value(), first.value())
    } else if first.is_ace() {
        (1, second.value())
    } else if second.is_ace() {
        (1, first.value())
    } else {
        (first.value() + second.value(), 0)
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self { counts: vec![0; DEALER_SLOTS * FIRST_SLOTS * SECOND_SLOTS * OUTCOMES], recorded: 0 }
    }

    /// Count one settled result. Uses the first visible dealer card and the
    /// first two player cards.
    ///
    /// A result with no dealer upcard or fewer than two player cards has no
    /// category: it is logged at `warn` and not counted.
    pub fn write(&mut self, dealer_upcards: &[Card], player_cards: &[Card], outcome: Outcome) {
        let (Some(up), [p1, p2, ..]) = (dealer_upcards.first(), player_cards) else {
            warn!(
                upcards = dealer_upcards.len(),
                cards = player_cards.len(),
                %outcome,
                "result without a category, not recorded"
            );
            return;
        };
        let (a, b) = category(*p1, *p2);
        self.counts[slot(usize::from(up.value()), usize::from(a), usize::from(b), outcome)] += 1;
        self.recorded += 1;
    }

    /// Counter for dealer upcard value `dealer` (ace = 1) and category `(first, second)`.
    pub fn count(&self, dealer: u8, first: u8, second: u8, outcome: Outcome) -> u64 {
        let (d, f, s) = (usize::from(dealer), usize::from(first), usize::from(second));
        if d >= DEALER_SLOTS || f >= FIRST_SLOTS || s >= SECOND_SLOTS {
            return 0;
        }
        self.counts[slot(d, f, s, outcome)]
    }

    /// Number of results written so far.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Aggregate into display rows: hard totals 5..=19, ace hands A/2..A/10,
    /// then pairs A/A..10/10.
    pub fn report(&self) -> Report {
        let keys = (5..=19u8)
            .map(|t| (t, 0))
            .chain((2..=10u8).map(|k| (1, k)))
            .chain((1..=10u8).map(|v| (v, v)));
        let rows = keys
            .map(|(first, second)| {
                let mut cells = [Cell::default(); 10];
                for (i, cell) in cells.iter_mut().enumerate() {
                    let dealer = i as u8 + 1;
                    let win = self.count(dealer, first, second, Outcome::Win);
                    let push = self.count(dealer, first, second, Outcome::Push);
                    let loss = self.count(dealer, first, second, Outcome::Loss);
                    *cell = Cell { favourable: win + push, total: win + push + loss };
                }
                ReportRow { first, second, cells }
            })
            .collect();
        Report { rows }
    }

    /// Write the report followed by the player's money summary.
    pub fn dump<W: Write + ?Sized>(&self, ledger: &Ledger, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.report())?;
        write!(out, "{ledger}")?;
        out.flush()
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Results for one category against one dealer upcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Wins plus pushes.
    pub favourable: u64,
    pub total: u64,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            f.write_str("NONE   ")
        } else if self.favourable == self.total {
            // keeps every column four characters wide
            f.write_str("99.9%  ")
        } else {
            let pct = self.favourable as f64 / self.total as f64 * 100.0;
            write!(f, "{pct:4.1}%  ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub first: u8,
    pub second: u8,
    /// Dealer upcard A, 2, ..., 10.
    pub cells: [Cell; 10],
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first, self.second) {
            (1, 1) => f.write_str(" A/A  ")?,
            (1, k) => write!(f, " A/{k:<2} ")?,
            (t, 0) => write!(f, "  {t:>2}  ")?,
            (a, b) => write!(f, "{a:>2}/{b:<2} ")?,
        }
        for c in &self.cells {
            write!(f, "{c}")?;
        }
        writeln!(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn row(&self, first: u8, second: u8) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.first == first && r.second == second)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "       A      2      3      4      5      6      7      8      9     10"
        )?;
        for r in &self.rows {
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

/// Money summary printed under the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    pub hands_played: u64,
    pub total_buyin: u64,
    pub bankroll: u64,
    pub bankroll_cents: u8,
}

impl Ledger {
    /// Bankroll minus everything bought in, whole units.
    pub fn net(&self) -> i64 {
        self.bankroll as i64 - self.total_buyin as i64
    }

    pub fn income_per_hand(&self) -> f64 {
        if self.hands_played == 0 {
            return 0.0;
        }
        self.net() as f64 / self.hands_played as f64
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "             HANDS PLAYED: {},  INCOME/HAND: ${:.6}",
            self.hands_played,
            self.income_per_hand()
        )?;
        writeln!(
            f,
            "      AMOUNT BOUGHT IN: ${},  CURRENT BANKROLL: ${}.{:02},  WINS: ${}",
            self.total_buyin,
            self.bankroll,
            self.bankroll_cents,
            self.net()
        )
    }
}

/// Receives a seat's statistics every time the table's flush interval elapses.
pub trait StatsSink {
    fn flush(&mut self, seat: usize, stats: &Statistics, ledger: &Ledger) -> io::Result<()>;
}

/// Writes reports to stdout, clearing the terminal first when stdout is a TTY.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    clear: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { clear: io::stdout().is_terminal() }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSink for ConsoleSink {
    fn flush(&mut self, _seat: usize, stats: &Statistics, ledger: &Ledger) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.clear {
            crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        stats.dump(ledger, &mut out)
    }
}

/// Collects every flushed report in memory, tagged with its seat.
///
/// Clones share one log, so a clone kept by the caller sees what the table's
/// copy received.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    reports: Rc<RefCell<Vec<(usize, String)>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(usize, String)> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StatsSink for BufferSink {
    fn flush(&mut self, seat: usize, stats: &Statistics, ledger: &Ledger) -> io::Result<()> {
        let mut buf = Vec::new();
        stats.dump(ledger, &mut buf)?;
        self.reports.borrow_mut().push((seat, String::from_utf8_lossy(&buf).into_owned()));
        Ok(())
    }
}
