use std::fmt;

use serde::{Deserialize, Serialize};

/// Sport a court is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportType {
    #[serde(rename = "Futebol Society")]
    FutebolSociety,
    #[serde(rename = "Beach Tennis")]
    BeachTennis,
    #[serde(rename = "Tênis")]
    Tenis,
    #[serde(rename = "Padel")]
    Padel,
    #[serde(rename = "Vôlei")]
    Volei,
    #[serde(rename = "Futevôlei")]
    Futevolei,
}

static ALL_SPORTS: &[SportType] = &[
    SportType::FutebolSociety,
    SportType::BeachTennis,
    SportType::Tenis,
    SportType::Padel,
    SportType::Volei,
    SportType::Futevolei,
];

impl SportType {
    /// Returns the display name, which is also the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            SportType::FutebolSociety => "Futebol Society",
            SportType::BeachTennis => "Beach Tennis",
            SportType::Tenis => "Tênis",
            SportType::Padel => "Padel",
            SportType::Volei => "Vôlei",
            SportType::Futevolei => "Futevôlei",
        }
    }

    /// Looks up a sport by its display name.
    pub fn from_name(name: &str) -> Option<SportType> {
        ALL_SPORTS.iter().copied().find(|s| s.name() == name)
    }

    /// Returns `true` for sports played with rackets (Beach Tennis, Tênis, Padel).
    ///
    /// Racket sports offer the racket-rental add-on.
    pub fn is_racket_sport(&self) -> bool {
        matches!(
            self,
            SportType::BeachTennis | SportType::Tenis | SportType::Padel
        )
    }

    /// Returns the full catalog in display order.
    pub fn all() -> &'static [SportType] {
        ALL_SPORTS
    }
}

#[mutants::skip]
impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
