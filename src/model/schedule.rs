use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Day of the week, in the arena's display order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Segunda,
    #[serde(rename = "Terça")]
    Terca,
    Quarta,
    Quinta,
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
    Domingo,
}

static ALL_WEEKDAYS: &[Weekday] = &[
    Weekday::Segunda,
    Weekday::Terca,
    Weekday::Quarta,
    Weekday::Quinta,
    Weekday::Sexta,
    Weekday::Sabado,
    Weekday::Domingo,
];

impl Weekday {
    /// Returns the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Segunda => "Segunda",
            Weekday::Terca => "Terça",
            Weekday::Quarta => "Quarta",
            Weekday::Quinta => "Quinta",
            Weekday::Sexta => "Sexta",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    /// Returns all seven days, Monday first.
    pub fn all() -> &'static [Weekday] {
        ALL_WEEKDAYS
    }
}

#[mutants::skip]
impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Segunda,
            chrono::Weekday::Tue => Weekday::Terca,
            chrono::Weekday::Wed => Weekday::Quarta,
            chrono::Weekday::Thu => Weekday::Quinta,
            chrono::Weekday::Fri => Weekday::Sexta,
            chrono::Weekday::Sat => Weekday::Sabado,
            chrono::Weekday::Sun => Weekday::Domingo,
        }
    }
}

/// Hour at which the first bookable slot starts.
pub const FIRST_SLOT_HOUR: u8 = 6;
/// Number of one-hour slots in the catalog (06:00 through 21:00).
pub const SLOT_COUNT: usize = 15;

/// A one-hour bookable slot from the fixed catalog.
///
/// Serialized as its label, e.g. `"6:00 - 7:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start_hour: u8,
}

impl TimeSlot {
    /// Returns the slot starting at `start_hour`, or `None` outside the catalog.
    pub fn new(start_hour: u8) -> Option<TimeSlot> {
        let last = FIRST_SLOT_HOUR + SLOT_COUNT as u8 - 1;
        (FIRST_SLOT_HOUR..=last)
            .contains(&start_hour)
            .then_some(TimeSlot { start_hour })
    }

    /// Returns the catalog slot with the given zero-based position.
    pub fn at(index: usize) -> Option<TimeSlot> {
        (index < SLOT_COUNT).then(|| TimeSlot {
            start_hour: FIRST_SLOT_HOUR + index as u8,
        })
    }

    /// Returns the full catalog in chronological order.
    pub fn all() -> [TimeSlot; SLOT_COUNT] {
        std::array::from_fn(|i| TimeSlot {
            start_hour: FIRST_SLOT_HOUR + i as u8,
        })
    }

    /// Returns the slot that contains `time`, if any.
    pub fn containing(time: NaiveTime) -> Option<TimeSlot> {
        u8::try_from(time.hour()).ok().and_then(TimeSlot::new)
    }

    /// Zero-based position within the catalog.
    pub fn index(&self) -> usize {
        usize::from(self.start_hour - FIRST_SLOT_HOUR)
    }

    /// Hour at which the slot starts.
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Display label, e.g. `"6:00 - 7:00"`.
    pub fn label(&self) -> String {
        format!("{}:00 - {}:00", self.start_hour, self.start_hour + 1)
    }

    /// Parses a label produced by [`label`](Self::label).
    pub fn parse(label: &str) -> Option<TimeSlot> {
        let (start, end) = label.split_once(" - ")?;
        let start_hour: u8 = start.strip_suffix(":00")?.parse().ok()?;
        let end_hour: u8 = end.strip_suffix(":00")?.parse().ok()?;
        let slot = TimeSlot::new(start_hour)?;
        (start_hour.checked_add(1) == Some(end_hour)).then_some(slot)
    }
}

#[mutants::skip]
impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        TimeSlot::parse(&label).ok_or_else(|| format!("unknown time slot: {label}"))
    }
}

/// Bookable slots per weekday.
///
/// Days with no slots are not stored, so two availabilities with the same
/// selected slots always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    days: BTreeMap<Weekday, BTreeSet<TimeSlot>>,
}

impl WeeklyAvailability {
    /// Creates an availability with no bookable slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `slot` on `day`. Returns `true` if the slot is now bookable.
    pub fn toggle(&mut self, day: Weekday, slot: TimeSlot) -> bool {
        let slots = self.days.entry(day).or_default();
        let now_set = if slots.remove(&slot) {
            false
        } else {
            slots.insert(slot);
            true
        };
        if slots.is_empty() {
            self.days.remove(&day);
        }
        now_set
    }

    /// Returns `true` if `slot` is bookable on `day`.
    pub fn contains(&self, day: Weekday, slot: TimeSlot) -> bool {
        self.days.get(&day).is_some_and(|s| s.contains(&slot))
    }

    /// Returns the bookable slots on `day` in chronological order.
    pub fn slots_on(&self, day: Weekday) -> Vec<TimeSlot> {
        self.days
            .get(&day)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of bookable weekday+slot cells.
    pub fn total_slots(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if no slot is bookable on any day.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
