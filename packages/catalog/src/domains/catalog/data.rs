use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::catalog::models::Channel;
use crate::domains::catalog::validation::{handle_link, invite_link};

/// Published channel as returned to readers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelData {
    pub channel_id: i64,
    pub channel_name: String,
    pub bias: String,
    pub username: Option<String>,
    pub invite: Option<String>,
    pub handle_link: Option<String>,
    pub invite_link: Option<String>,
    /// Signed, time-limited avatar URL; `None` when absent or unresolvable
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelData {
    pub fn from_channel(channel: Channel, avatar_url: Option<String>) -> Self {
        Self {
            channel_id: channel.channel_id.get(),
            handle_link: channel.username.as_deref().map(handle_link),
            invite_link: channel.invite.as_deref().map(invite_link),
            channel_name: channel.channel_name,
            bias: channel.bias,
            username: channel.username,
            invite: channel.invite,
            avatar_url,
            updated_at: channel.updated_at,
        }
    }
}
