use super::{Action, Strategy};
use crate::cards::Card;
use crate::config::DEFAULT_BUYIN;
use crate::hand::{score, split_allowed, Hand, Outcome};
use crossterm::style::{style, Stylize};
use std::fmt;
use std::io::{BufRead, Write};
use tracing::warn;

/// An operator at a console. Every decision blocks on a line of input.
///
/// Empty input takes the bracketed default and only the first character of
/// an answer counts. When input runs out the agent answers conservatively
/// (no buy-in, no bet, stand, no insurance) so the table ends the run.
pub struct Interactive<R, W> {
    input: R,
    output: W,
    last_bet: u32,
    styled: bool,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, last_bet: 1, styled: false }
    }

    /// Highlight notices with terminal colors.
    pub fn styled(mut self, on: bool) -> Self {
        self.styled = on;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        let res = self.output.write_fmt(args).and_then(|()| self.output.flush());
        if let Err(e) = res {
            warn!(error = %e, "failed to write to operator");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read operator input");
                None
            }
        }
    }

    /// First character of the answer, lowercased. `None` once input is gone.
    fn ask_char(&mut self, prompt: &str, default: Option<char>) -> Option<char> {
        loop {
            match default {
                Some(d) => self.emit(format_args!("{prompt} [{d}]: ")),
                None => self.emit(format_args!("{prompt}: ")),
            }
            let line = self.read_line()?;
            match (line.chars().next(), default) {
                (Some(c), _) => return Some(c.to_ascii_lowercase()),
                (None, Some(d)) => return Some(d),
                (None, None) => continue,
            }
        }
    }

    fn ask_number(&mut self, prompt: &str, default: u32) -> Option<u32> {
        loop {
            self.emit(format_args!("{prompt} [{default}]: "));
            let line = self.read_line()?;
            if line.is_empty() {
                return Some(default);
            }
            match line.parse::<u32>() {
                Ok(n) => return Some(n),
                Err(_) => self.emit(format_args!("Please enter a whole number.\n")),
            }
        }
    }

    fn notice(&mut self, msg: &str) {
        if self.styled {
            let tag = style("NOTICE:").bold().yellow();
            self.emit(format_args!("\n{tag} {msg}\n"));
        } else {
            self.emit(format_args!("\nNOTICE: {msg}\n"));
        }
    }
}

fn card_row(cards: &[Card], width: usize) -> String {
    let mut row = String::new();
    for c in cards {
        row.push_str(&format!("{c}  "));
    }
    for _ in cards.len()..width {
        row.push_str("    ");
    }
    row
}

fn total_label(cards: &[Card]) -> String {
    let s = score(cards);
    if s.is_bust() {
        "[BUST]".to_string()
    } else {
        format!("[{:02}]", s.value)
    }
}

impl<R: BufRead, W: Write> Strategy for Interactive<R, W> {
    fn name(&self) -> &'static str {
        "interactive"
    }

    fn get_buyin(&mut self) -> u32 {
        loop {
            match self.ask_number("Enter buyin amount", DEFAULT_BUYIN) {
                Some(0) => continue,
                Some(n) => {
                    self.emit(format_args!("\n"));
                    return n;
                }
                None => {
                    warn!("operator input closed during buy-in");
                    return 0;
                }
            }
        }
    }

    fn get_bet(&mut self, bankroll: u32, _cards_left: usize) -> u32 {
        self.emit(format_args!("You have ${bankroll}.  "));
        loop {
            match self.ask_number("Enter bet amount", self.last_bet) {
                Some(0) => continue,
                Some(n) => {
                    self.last_bet = n;
                    return n;
                }
                None => {
                    warn!("operator input closed during betting");
                    return 0;
                }
            }
        }
    }

    fn play(&mut self, hand: &[Card], dealer_upcards: &[Card]) -> Option<Action> {
        let width = hand.len().max(2);
        let total = score(hand);
        self.emit(format_args!(
            "\nYour turn to play:\nDEALER:  **  {}\nPLAYER:  {}[{}]\n\n",
            card_row(dealer_upcards, width),
            card_row(hand, 0),
            total
        ));

        let can_double = hand.len() == 2;
        let can_split = split_allowed(hand);
        let mut prompt = String::from("Your action:  S)tand, H)it");
        if can_double {
            prompt.push_str(", D)ouble");
        }
        if can_split {
            prompt.push_str(", s(P)lit");
        }
        loop {
            let Some(c) = self.ask_char(&prompt, None) else {
                warn!("operator input closed during play, standing");
                return Some(Action::Stand);
            };
            match c {
                's' => return Some(Action::Stand),
                'h' => return Some(Action::Hit),
                'd' if can_double => return Some(Action::Double),
                'p' if can_split => return Some(Action::Split),
                'd' => self.emit(format_args!("You cannot double this hand.\n")),
                'p' => self.emit(format_args!("You cannot split this hand.\n")),
                _ => {}
            }
        }
    }

    fn insure(&mut self, dealer_upcards: &[Card], hand: &[Card]) -> bool {
        let total = score(hand).value;
        self.emit(format_args!(
            "\nINSURANCE OFFER:\nDEALER:  * *  {}\nPLAYER:  {}[{:02}]\n\n",
            card_row(dealer_upcards, 0),
            card_row(hand, 0),
            total
        ));
        let prompt =
            if total == 21 { "Insure this hand -- take even money?" } else { "Insure this hand?" };
        loop {
            match self.ask_char(prompt, Some('n')) {
                Some('y') => return true,
                Some('n') | None => return false,
                Some(_) => {}
            }
        }
    }

    fn on_shuffle(&mut self) {
        self.notice("Dealer is Shuffling...");
    }

    fn on_dealer_blackjack(&mut self) {
        self.notice("Dealer has BlackJack.");
    }

    fn on_player_blackjack(&mut self) {
        self.notice("You have BlackJack.");
    }

    fn on_round_summary(&mut self, dealer_cards: &[Card], hands: &[Hand]) {
        let width =
            hands.iter().map(|h| h.cards().len()).chain([dealer_cards.len()]).max().unwrap_or(0);
        let mut out = String::from("\nHand Summary:\n");
        out.push_str(&format!(
            "DEALER:  {}{}\n",
            card_row(dealer_cards, width),
            total_label(dealer_cards)
        ));
        for (i, h) in hands.iter().enumerate() {
            let lead = if i == 0 { "PLAYER:  " } else { "         " };
            let outcome = match h.outcome() {
                Outcome::Win => "WIN",
                Outcome::Push => "PUSH",
                Outcome::Loss => "LOSS",
            };
            out.push_str(&format!(
                "{lead}{}{:<8}--  {outcome}\n",
                card_row(h.cards(), width),
                total_label(h.cards())
            ));
        }
        self.emit(format_args!("{out}\n"));
    }
}
