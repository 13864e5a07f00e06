use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extras::{AddOn, RecurringBooking, SpecialPrice};
use super::schedule::WeeklyAvailability;
use super::sport::SportType;

/// Identifier assigned to a court by the [`CourtList`](super::CourtList).
pub type CourtId = u32;

/// Whether a court can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CourtStatus {
    #[default]
    Disponivel,
    Bloqueada,
}

impl CourtStatus {
    /// Returns the other status.
    pub fn toggled(self) -> Self {
        match self {
            CourtStatus::Disponivel => CourtStatus::Bloqueada,
            CourtStatus::Bloqueada => CourtStatus::Disponivel,
        }
    }

    /// Label used in the court list.
    pub fn label(&self) -> &'static str {
        match self {
            CourtStatus::Disponivel => "Disponível",
            CourtStatus::Bloqueada => "Bloqueada",
        }
    }

    /// Label used by the editor's on/off switch.
    pub fn switch_label(&self) -> &'static str {
        match self {
            CourtStatus::Disponivel => "Ativa",
            CourtStatus::Bloqueada => "Inativa",
        }
    }
}

#[mutants::skip]
impl fmt::Display for CourtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to a court image: a remote URL or an embedded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Returns the image source.
    pub fn src(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the image bytes are embedded in the reference.
    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Short form suitable for a one-line list entry.
    pub fn summary(&self) -> String {
        if self.is_embedded() {
            let mime = self
                .0
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("image");
            format!("embedded {mime} ({} bytes)", self.0.len())
        } else {
            self.0.clone()
        }
    }
}

/// Everything the editor emits on a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtPayload {
    pub name: String,
    pub sport_type: SportType,
    pub base_price_per_hour: Decimal,
    pub status: CourtStatus,
    pub photos: Vec<Photo>,
    pub weekly_availability: WeeklyAvailability,
    pub recurring_bookings: Vec<RecurringBooking>,
    pub special_prices: Vec<SpecialPrice>,
    /// Enabled add-ons only.
    pub add_ons: Vec<AddOn>,
}

/// A court record as owned by the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: CourtId,
    #[serde(flatten)]
    pub details: CourtPayload,
}

impl Court {
    pub fn new(id: CourtId, details: CourtPayload) -> Self {
        Self { id, details }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn status(&self) -> CourtStatus {
        self.details.status
    }

    /// The first photo, shown as the court's cover.
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.details.photos.first()
    }
}
