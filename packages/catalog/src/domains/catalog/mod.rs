//! Catalog domain - published channels and their blocklists

pub mod activities;
pub mod data;
pub mod models;
pub mod validation;

pub use data::ChannelData;
pub use models::{BlocklistPattern, Channel, ChannelRecord, Region, SearchFilter};
