use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReservationNotes(String);

impl ReservationNotes {
    pub fn new(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }
}
