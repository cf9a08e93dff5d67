//! Utility modules shared across the crate.

pub mod date;
pub mod hash;
pub mod mime;
pub mod path;
pub mod plural;
pub mod slug;
