pub mod search;

pub use search::{get_blocklist, get_by_id, get_by_ids, search};
