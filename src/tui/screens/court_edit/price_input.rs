use crossterm::event::KeyCode;
use rust_decimal::Decimal;

use crate::model::{format_price, parse_price};

/// Text buffer behind a price cell, re-parsed on every edit.
///
/// Malformed text is kept as typed and flagged; the last valid price stays
/// in the draft until the text parses again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PriceInput {
    text: String,
    error: Option<String>,
}

impl PriceInput {
    pub(super) fn new(price: Decimal) -> Self {
        Self {
            text: plain_price(price),
            error: None,
        }
    }

    pub(super) fn text(&self) -> &str {
        &self.text
    }

    pub(super) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(super) fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Applies an editing key. Returns `true` if the text changed.
    pub(super) fn edit(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == ',' || ch == '.' => {
                self.text.push(ch);
                true
            }
            KeyCode::Backspace => self.text.pop().is_some(),
            _ => false,
        }
    }

    /// Parses the current text, recording the error when it is malformed.
    pub(super) fn parse(&mut self) -> Option<Decimal> {
        match parse_price(&self.text) {
            Ok(price) => {
                self.error = None;
                Some(price)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// `R$ 80,50` without the currency prefix, as typed into a cell.
fn plain_price(price: Decimal) -> String {
    let formatted = format_price(price);
    formatted
        .strip_prefix("R$ ")
        .unwrap_or(&formatted)
        .to_string()
}
