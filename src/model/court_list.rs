use thiserror::Error;

use super::court::{Court, CourtId, CourtPayload, CourtStatus};
use super::extras::next_id;

/// Errors from court list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourtListError {
    #[error("no court with id {0}")]
    NotFound(CourtId),
}

/// The authoritative collection of courts for the session.
///
/// Only the list assigns ids and mutates records; the editor hands it
/// finished payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourtList {
    courts: Vec<Court>,
}

impl CourtList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new court and returns its id (one more than the largest in use).
    pub fn create(&mut self, payload: CourtPayload) -> CourtId {
        let id = next_id(self.courts.iter().map(|c| c.id));
        self.courts.push(Court::new(id, payload));
        id
    }

    /// Replaces the contents of an existing court, keeping its id and position.
    pub fn apply(&mut self, id: CourtId, payload: CourtPayload) -> Result<(), CourtListError> {
        let court = self.get_mut(id)?;
        court.details = payload;
        Ok(())
    }

    /// Creates a court when `id` is `None`, otherwise applies the edit.
    pub fn save(
        &mut self,
        id: Option<CourtId>,
        payload: CourtPayload,
    ) -> Result<CourtId, CourtListError> {
        match id {
            Some(id) => self.apply(id, payload).map(|()| id),
            None => Ok(self.create(payload)),
        }
    }

    /// Flips one court's status directly, outside the editor. Returns the new status.
    pub fn toggle_status(&mut self, id: CourtId) -> Result<CourtStatus, CourtListError> {
        let court = self.get_mut(id)?;
        court.details.status = court.details.status.toggled();
        Ok(court.details.status)
    }

    pub fn get(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    /// Courts in creation order.
    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn len(&self) -> usize {
        self.courts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courts.is_empty()
    }

    fn get_mut(&mut self, id: CourtId) -> Result<&mut Court, CourtListError> {
        self.courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CourtListError::NotFound(id))
    }
}
