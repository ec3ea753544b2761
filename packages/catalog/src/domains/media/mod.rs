//! Media domain - avatar files kept in the external blob store

pub mod actions;
pub mod activities;
pub mod data;
pub mod models;

pub use data::AvatarUpload;
pub use models::AvatarFile;
