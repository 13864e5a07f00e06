use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::{TimeSlot, Weekday};

/// Name of the racket-rental add-on offered for racket sports.
pub const RACKET_ADD_ON: &str = "Raquetes";
/// Price of the racket-rental add-on when it is first enabled.
pub const RACKET_DEFAULT_PRICE: i64 = 20;

/// A recurring monthly tenant ("mensalista") holding one weekly slot.
///
/// The slot is blocked from public booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringBooking {
    pub id: u32,
    /// Internal name, never shown to customers.
    pub name: String,
    pub weekday: Weekday,
    /// `None` until the administrator picks a slot.
    pub slot: Option<TimeSlot>,
}

impl RecurringBooking {
    /// Creates a placeholder row: no name, Monday, no slot.
    pub fn placeholder(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            weekday: Weekday::Segunda,
            slot: None,
        }
    }
}

/// Price override for one weekday+slot pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPrice {
    pub id: u32,
    pub weekday: Weekday,
    pub slot: Option<TimeSlot>,
    pub price: Decimal,
}

impl SpecialPrice {
    /// Creates a placeholder row: Monday, no slot, zero price.
    pub fn placeholder(id: u32) -> Self {
        Self {
            id,
            weekday: Weekday::Segunda,
            slot: None,
            price: Decimal::ZERO,
        }
    }
}

/// A rentable extra (ball, bibs, rackets, ...). Identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub name: String,
    pub price: Decimal,
    pub enabled: bool,
}

impl AddOn {
    pub fn new(name: impl Into<String>, price: Decimal, enabled: bool) -> Self {
        Self {
            name: name.into(),
            price,
            enabled,
        }
    }

    /// The racket-rental add-on at its default price, enabled.
    pub fn racket() -> Self {
        Self::new(RACKET_ADD_ON, Decimal::from(RACKET_DEFAULT_PRICE), true)
    }
}

/// The add-ons every editor starts with, all disabled.
pub fn starter_add_ons() -> Vec<AddOn> {
    vec![
        AddOn::new("Bola", Decimal::from(10), false),
        AddOn::new("Coletes", Decimal::from(15), false),
    ]
}

/// Returns the next free id for a list: one more than the largest, or 1 when empty.
pub fn next_id(ids: impl IntoIterator<Item = u32>) -> u32 {
    ids.into_iter().max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn next_id_empty_is_one() {
        assert_eq!(next_id(Vec::<u32>::new()), 1);
    }

    #[test]
    fn next_id_uses_max_not_len() {
        assert_eq!(next_id([1, 7, 3]), 8);
    }

    #[quickcheck]
    fn next_id_is_never_taken(ids: Vec<u16>) -> bool {
        let ids: Vec<u32> = ids.into_iter().map(u32::from).collect();
        let id = next_id(ids.iter().copied());
        !ids.contains(&id)
    }

    #[test]
    fn starter_add_ons_are_disabled() {
        let add_ons = starter_add_ons();
        let names: Vec<&str> = add_ons.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Bola", "Coletes"]);
        assert!(add_ons.iter().all(|a| !a.enabled));
    }

    #[test]
    fn racket_add_on_defaults() {
        let racket = AddOn::racket();
        assert_eq!(racket.name, RACKET_ADD_ON);
        assert_eq!(racket.price, Decimal::from(20));
        assert!(racket.enabled);
    }

    #[test]
    fn placeholders_start_on_monday_without_slot() {
        let booking = RecurringBooking::placeholder(4);
        assert_eq!(booking.id, 4);
        assert_eq!(booking.weekday, Weekday::Segunda);
        assert_eq!(booking.slot, None);
        assert!(booking.name.is_empty());

        let special = SpecialPrice::placeholder(2);
        assert_eq!(special.id, 2);
        assert_eq!(special.slot, None);
        assert_eq!(special.price, Decimal::ZERO);
    }
}
