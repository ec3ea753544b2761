//! Tri-state field update used by edit payloads.
//!
//! `Unchanged` leaves the stored value alone, `Set` replaces it and `Clear`
//! removes it. Only nullable catalog columns accept `Clear`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Patch<T> {
    Unchanged,
    Set(T),
    Clear,
}

// Manual impl: no `T: Default` bound.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Fallible map over the `Set` value.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Patch<U>, E> {
        Ok(match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(value) => Patch::Set(f(value)?),
            Patch::Clear => Patch::Clear,
        })
    }

    /// Resolve against the current value of a nullable field.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Unchanged => current,
            Patch::Set(value) => Some(value),
            Patch::Clear => None,
        }
    }

    /// Resolve against a required field. `Clear` yields `None`, which the
    /// caller must reject.
    pub fn apply_required(self, current: T) -> Option<T> {
        match self {
            Patch::Unchanged => Some(current),
            Patch::Set(value) => Some(value),
            Patch::Clear => None,
        }
    }
}
