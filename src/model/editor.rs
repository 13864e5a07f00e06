//! Court editor draft: the transient state behind the edit dialog.
//!
//! A [`CourtEditor`] is built fresh each time the dialog opens, mutated by
//! user actions, and either dropped (cancel) or turned into a
//! [`CourtPayload`] (submit). It never touches the court list directly.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::court::{Court, CourtId, CourtPayload, CourtStatus, Photo};
use super::extras::{
    AddOn, RACKET_ADD_ON, RecurringBooking, SpecialPrice, next_id, starter_add_ons,
};
use super::schedule::{TimeSlot, Weekday, WeeklyAvailability};
use super::sport::SportType;
use super::validation::{
    MAX_PHOTOS, ValidationError, parse_price, validate_base_price, validate_name,
    validate_photo_count,
};

/// Base hourly price offered when creating a court.
pub const DEFAULT_BASE_PRICE: i64 = 100;

/// Top-level form fields that carry validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Sport,
    BasePrice,
    Photos,
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Name => "name",
            Field::Sport => "sport",
            Field::BasePrice => "base price",
            Field::Photos => "photos",
        };
        f.write_str(s)
    }
}

/// A validation failure tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub error: ValidationError,
}

/// Errors returned by editor operations. None of them close the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(
        "at most {} photos are allowed ({current} present, {requested} requested)",
        MAX_PHOTOS
    )]
    PhotoLimit { current: usize, requested: usize },

    #[error("no photo at position {0}")]
    PhotoIndexOutOfRange(usize),

    #[error("no recurring booking with id {0}")]
    UnknownRecurringBooking(u32),

    #[error("no special price with id {0}")]
    UnknownSpecialPrice(u32),

    #[error("no add-on named {0}")]
    UnknownAddOn(String),

    #[error("add-on {0} must be enabled before its price can change")]
    AddOnDisabled(String),

    #[error("rackets are only offered for racket sports")]
    RacketAddOnUnavailable,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<FieldError>),
}

/// Editable draft of a court and its scheduling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtEditor {
    court_id: Option<CourtId>,
    name: String,
    sport: Option<SportType>,
    base_price: Decimal,
    status: CourtStatus,
    photos: Vec<Photo>,
    availability: WeeklyAvailability,
    recurring_bookings: Vec<RecurringBooking>,
    special_prices: Vec<SpecialPrice>,
    add_ons: Vec<AddOn>,
}

impl Default for CourtEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CourtEditor {
    /// Creates a draft for a brand-new court.
    pub fn new() -> Self {
        Self {
            court_id: None,
            name: String::new(),
            sport: None,
            base_price: Decimal::from(DEFAULT_BASE_PRICE),
            status: CourtStatus::Disponivel,
            photos: Vec::new(),
            availability: WeeklyAvailability::new(),
            recurring_bookings: Vec::new(),
            special_prices: Vec::new(),
            add_ons: starter_add_ons(),
        }
    }

    /// Creates a draft seeded from an existing court.
    ///
    /// Saved add-ons are merged onto the starter set, so starter items the
    /// court never enabled still appear (disabled).
    pub fn from_court(court: &Court) -> Self {
        let details = &court.details;
        let mut add_ons = starter_add_ons();
        for saved in &details.add_ons {
            match add_ons.iter_mut().find(|a| a.name == saved.name) {
                Some(existing) => *existing = saved.clone(),
                None => add_ons.push(saved.clone()),
            }
        }
        Self {
            court_id: Some(court.id),
            name: details.name.clone(),
            sport: Some(details.sport_type),
            base_price: details.base_price_per_hour,
            status: details.status,
            photos: details.photos.clone(),
            availability: details.weekly_availability.clone(),
            recurring_bookings: details.recurring_bookings.clone(),
            special_prices: details.special_prices.clone(),
            add_ons,
        }
    }

    /// Returns the id of the court being edited, or `None` when creating.
    pub fn court_id(&self) -> Option<CourtId> {
        self.court_id
    }

    /// Returns `true` when editing an existing court.
    pub fn is_editing(&self) -> bool {
        self.court_id.is_some()
    }

    // --- base fields ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn sport(&self) -> Option<SportType> {
        self.sport
    }

    /// Changes the sport. Racket rental is switched off when the new sport
    /// does not offer it, so the draft never holds a hidden enabled add-on.
    pub fn set_sport(&mut self, sport: Option<SportType>) {
        self.sport = sport;
        if self.show_racket_add_on() {
            return;
        }
        if let Some(racket) = self.add_ons.iter_mut().find(|a| a.name == RACKET_ADD_ON) {
            racket.enabled = false;
        }
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn set_base_price(&mut self, price: Decimal) {
        self.base_price = price;
    }

    pub fn status(&self) -> CourtStatus {
        self.status
    }

    pub fn set_status(&mut self, status: CourtStatus) {
        self.status = status;
    }

    /// Flips the status switch and returns the new status.
    pub fn toggle_status(&mut self) -> CourtStatus {
        self.status = self.status.toggled();
        self.status
    }

    // --- photos ---

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// The primary photo is whichever photo comes first.
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }

    /// How many more photos fit under the cap.
    pub fn remaining_photo_slots(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.photos.len())
    }

    /// Checks whether `requested` more photos would fit, without adding anything.
    ///
    /// Callers run this before reading files so an oversized selection is
    /// rejected up front.
    pub fn check_photo_capacity(&self, requested: usize) -> Result<(), EditorError> {
        if requested > self.remaining_photo_slots() {
            Err(EditorError::PhotoLimit {
                current: self.photos.len(),
                requested,
            })
        } else {
            Ok(())
        }
    }

    /// Appends photos in order. Either all of them are added or none are.
    pub fn add_photos(&mut self, photos: Vec<Photo>) -> Result<(), EditorError> {
        self.check_photo_capacity(photos.len())?;
        self.photos.extend(photos);
        Ok(())
    }

    /// Removes the photo at `index`. Removing the primary promotes the next one.
    pub fn remove_photo(&mut self, index: usize) -> Result<Photo, EditorError> {
        if index >= self.photos.len() {
            return Err(EditorError::PhotoIndexOutOfRange(index));
        }
        Ok(self.photos.remove(index))
    }

    // --- weekly availability ---

    pub fn availability(&self) -> &WeeklyAvailability {
        &self.availability
    }

    /// Flips one weekday+slot cell. Returns `true` if the slot is now bookable.
    pub fn toggle_slot(&mut self, day: Weekday, slot: TimeSlot) -> bool {
        self.availability.toggle(day, slot)
    }

    /// Returns `true` if the public can book `slot` on `day`: the slot is
    /// open and no recurring booking holds it.
    pub fn is_publicly_bookable(&self, day: Weekday, slot: TimeSlot) -> bool {
        self.availability.contains(day, slot) && !self.is_held_by_recurring(day, slot)
    }

    /// Returns `true` if a recurring booking occupies `slot` on `day`.
    pub fn is_held_by_recurring(&self, day: Weekday, slot: TimeSlot) -> bool {
        self.recurring_bookings
            .iter()
            .any(|b| b.weekday == day && b.slot == Some(slot))
    }

    // --- recurring bookings ---

    pub fn recurring_bookings(&self) -> &[RecurringBooking] {
        &self.recurring_bookings
    }

    /// Appends a placeholder booking with a fresh id and returns the id.
    pub fn add_recurring_booking(&mut self) -> u32 {
        let id = next_id(self.recurring_bookings.iter().map(|b| b.id));
        self.recurring_bookings
            .push(RecurringBooking::placeholder(id));
        id
    }

    /// Removes the booking with `id`, leaving every other row untouched.
    pub fn remove_recurring_booking(&mut self, id: u32) -> Result<RecurringBooking, EditorError> {
        let pos = self
            .recurring_bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(EditorError::UnknownRecurringBooking(id))?;
        Ok(self.recurring_bookings.remove(pos))
    }

    pub fn set_recurring_name(&mut self, id: u32, name: impl Into<String>) -> Result<(), EditorError> {
        self.recurring_booking_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_recurring_weekday(&mut self, id: u32, day: Weekday) -> Result<(), EditorError> {
        self.recurring_booking_mut(id)?.weekday = day;
        Ok(())
    }

    pub fn set_recurring_slot(&mut self, id: u32, slot: Option<TimeSlot>) -> Result<(), EditorError> {
        self.recurring_booking_mut(id)?.slot = slot;
        Ok(())
    }

    fn recurring_booking_mut(&mut self, id: u32) -> Result<&mut RecurringBooking, EditorError> {
        self.recurring_bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(EditorError::UnknownRecurringBooking(id))
    }

    // --- special prices ---

    pub fn special_prices(&self) -> &[SpecialPrice] {
        &self.special_prices
    }

    /// Appends a placeholder price row with a fresh id and returns the id.
    pub fn add_special_price(&mut self) -> u32 {
        let id = next_id(self.special_prices.iter().map(|p| p.id));
        self.special_prices.push(SpecialPrice::placeholder(id));
        id
    }

    /// Removes the price row with `id`, leaving every other row untouched.
    pub fn remove_special_price(&mut self, id: u32) -> Result<SpecialPrice, EditorError> {
        let pos = self
            .special_prices
            .iter()
            .position(|p| p.id == id)
            .ok_or(EditorError::UnknownSpecialPrice(id))?;
        Ok(self.special_prices.remove(pos))
    }

    pub fn set_special_weekday(&mut self, id: u32, day: Weekday) -> Result<(), EditorError> {
        self.special_price_mut(id)?.weekday = day;
        Ok(())
    }

    pub fn set_special_slot(&mut self, id: u32, slot: Option<TimeSlot>) -> Result<(), EditorError> {
        self.special_price_mut(id)?.slot = slot;
        Ok(())
    }

    pub fn set_special_price(&mut self, id: u32, price: Decimal) -> Result<(), EditorError> {
        self.special_price_mut(id)?.price = price;
        Ok(())
    }

    /// Weekday+slot pairs that more than one special price targets.
    ///
    /// Duplicates are reported, not resolved: no entry wins over another.
    pub fn duplicate_special_prices(&self) -> Vec<(Weekday, TimeSlot)> {
        let mut counts: BTreeMap<(Weekday, TimeSlot), usize> = BTreeMap::new();
        for price in &self.special_prices {
            if let Some(slot) = price.slot {
                *counts.entry((price.weekday, slot)).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(key, _)| key)
            .collect()
    }

    fn special_price_mut(&mut self, id: u32) -> Result<&mut SpecialPrice, EditorError> {
        self.special_prices
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EditorError::UnknownSpecialPrice(id))
    }

    // --- add-ons ---

    /// All add-ons, including a racket entry that may currently be hidden.
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// Looks up an add-on by name.
    pub fn add_on(&self, name: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.name == name)
    }

    /// Add-ons shown in the list, excluding the racket entry (which gets its own row).
    pub fn general_add_ons(&self) -> impl Iterator<Item = &AddOn> {
        self.add_ons.iter().filter(|a| a.name != RACKET_ADD_ON)
    }

    /// Returns `true` if the racket-rental row should be offered.
    pub fn show_racket_add_on(&self) -> bool {
        self.sport.is_some_and(|s| s.is_racket_sport())
    }

    /// Returns `true` if the racket add-on exists and is enabled.
    pub fn racket_add_on_enabled(&self) -> bool {
        self.add_on(RACKET_ADD_ON).is_some_and(|a| a.enabled)
    }

    /// Enables or disables racket rental.
    ///
    /// Updates the existing entry, or inserts one at the default price the
    /// first time it is enabled.
    pub fn set_racket_add_on(&mut self, enabled: bool) -> Result<(), EditorError> {
        if !self.show_racket_add_on() {
            return Err(EditorError::RacketAddOnUnavailable);
        }
        match self.add_ons.iter_mut().find(|a| a.name == RACKET_ADD_ON) {
            Some(existing) => existing.enabled = enabled,
            None if enabled => self.add_ons.push(AddOn::racket()),
            None => {}
        }
        Ok(())
    }

    pub fn set_add_on_enabled(&mut self, name: &str, enabled: bool) -> Result<(), EditorError> {
        self.add_on_mut(name)?.enabled = enabled;
        Ok(())
    }

    /// Changes an add-on's price. Only enabled add-ons are editable.
    pub fn set_add_on_price(&mut self, name: &str, price: Decimal) -> Result<(), EditorError> {
        let add_on = self.add_on_mut(name)?;
        if !add_on.enabled {
            return Err(EditorError::AddOnDisabled(name.to_string()));
        }
        add_on.price = price;
        Ok(())
    }

    /// Adds a user-defined add-on, enabled.
    ///
    /// The name is trimmed and must be non-empty; the price must parse.
    /// On error nothing is added.
    pub fn add_custom_add_on(&mut self, name: &str, price_text: &str) -> Result<(), EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyAddOnName.into());
        }
        if name == RACKET_ADD_ON {
            return Err(ValidationError::ReservedAddOnName(name.to_string()).into());
        }
        let price = parse_price(price_text)?;
        self.add_ons.push(AddOn::new(name, price, true));
        Ok(())
    }

    fn add_on_mut(&mut self, name: &str) -> Result<&mut AddOn, EditorError> {
        self.add_ons
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| EditorError::UnknownAddOn(name.to_string()))
    }

    // --- submission ---

    /// Checks every top-level field and returns all failures at once.
    pub fn validate(&self) -> Vec<FieldError> {
        let checks = [
            (Field::Name, validate_name(&self.name)),
            (
                Field::Sport,
                self.sport.map(|_| ()).ok_or(ValidationError::MissingSport),
            ),
            (Field::BasePrice, validate_base_price(self.base_price)),
            (Field::Photos, validate_photo_count(self.photos.len())),
        ];
        checks
            .into_iter()
            .filter_map(|(field, result)| result.err().map(|error| FieldError { field, error }))
            .collect()
    }

    /// Validates and composes the save payload. The draft is left untouched,
    /// so a failed submit can be corrected and retried.
    ///
    /// Only enabled add-ons are included.
    pub fn submit(&self) -> Result<CourtPayload, EditorError> {
        let errors = self.validate();
        let sport = match (errors.is_empty(), self.sport) {
            (true, Some(sport)) => sport,
            _ => return Err(EditorError::Invalid(errors)),
        };

        let add_ons = self
            .add_ons
            .iter()
            .filter(|a| a.enabled)
            .cloned()
            .collect();

        Ok(CourtPayload {
            name: self.name.clone(),
            sport_type: sport,
            base_price_per_hour: self.base_price,
            status: self.status,
            photos: self.photos.clone(),
            weekly_availability: self.availability.clone(),
            recurring_bookings: self.recurring_bookings.clone(),
            special_prices: self.special_prices.clone(),
            add_ons,
        })
    }
}
