mod blocklist;
mod channel;
mod region;

pub use blocklist::BlocklistPattern;
pub use channel::{escape_like, Channel, ChannelRecord, ChannelWithAvatar, SearchFilter};
pub use region::Region;
