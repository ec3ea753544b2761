pub mod avatars;

pub use avatars::{ensure_avatar_usable, release_avatar, resolve_avatar_url, upload_avatar};
