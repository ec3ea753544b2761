mod avatar_file;

pub use avatar_file::{AvatarFile, CreateAvatarFile};
