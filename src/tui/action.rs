//! Actions returned by screen event handlers.

use std::path::PathBuf;

use crate::model::{CourtId, CourtPayload};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update the court list and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Open the editor on a blank draft.
    NewCourt,
    /// Open the editor seeded from an existing court.
    EditCourt(CourtId),
    /// Flip a court between available and blocked from the list.
    ToggleCourtStatus(CourtId),
    /// Read these image files and append them to the open draft.
    LoadPhotos(Vec<PathBuf>),
    /// Create (`None`) or update (`Some`) a court with a validated payload.
    SaveCourt(Option<CourtId>, CourtPayload),
    /// Close the editor, discarding the draft.
    CancelEdit,
    /// Quit the application.
    Quit,
}
