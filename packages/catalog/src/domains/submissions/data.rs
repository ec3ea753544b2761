use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{CatalogError, CatalogResult, ChannelId, CreationId, EditId, FileId, Patch, UserId};
use crate::domains::catalog::models::{Channel, ChannelRecord, Region};
use crate::domains::catalog::validation::{
    check_handle_or_invite, normalize_handle, normalize_invite, normalize_name, normalize_patterns,
};
use crate::domains::submissions::models::{PendingCreation, PendingEditWithChannel, SubmissionStatus};

/// Proposed new catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChannel {
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub bias: Region,
    pub username: Option<String>,
    pub invite: Option<String>,
    pub avatar_id: Option<FileId>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl NewChannel {
    /// Canonicalize every field and enforce the handle-or-invite rule
    pub fn normalize(self) -> CatalogResult<Self> {
        let username = match self.username {
            Some(raw) => normalize_handle(&raw)?,
            None => None,
        };
        let invite = match self.invite {
            Some(raw) => normalize_invite(&raw)?,
            None => None,
        };
        check_handle_or_invite(username.as_deref(), invite.as_deref())?;

        Ok(Self {
            channel_id: self.channel_id,
            channel_name: normalize_name(&self.channel_name)?,
            bias: self.bias,
            username,
            invite,
            avatar_id: self.avatar_id,
            patterns: normalize_patterns(self.patterns)?,
        })
    }

    pub fn record(&self) -> ChannelRecord {
        ChannelRecord {
            channel_id: self.channel_id,
            channel_name: self.channel_name.clone(),
            bias: self.bias,
            username: self.username.clone(),
            invite: self.invite.clone(),
            avatar_id: self.avatar_id,
        }
    }
}

/// Proposed change set for an existing catalog entry.
///
/// `channel_name` and `bias` are required columns and reject `Clear`;
/// `username`, `invite` and `avatar` may be cleared. `patterns: None` leaves
/// the blocklist alone, `Some(vec![])` empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelChanges {
    #[serde(default)]
    pub channel_name: Patch<String>,
    #[serde(default)]
    pub username: Patch<String>,
    #[serde(default)]
    pub bias: Patch<Region>,
    #[serde(default)]
    pub invite: Patch<String>,
    #[serde(default)]
    pub avatar: Patch<FileId>,
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
}

impl ChannelChanges {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            channel_name: Patch::Set(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channel_name.is_unchanged()
            && self.username.is_unchanged()
            && self.bias.is_unchanged()
            && self.invite.is_unchanged()
            && self.avatar.is_unchanged()
            && self.patterns.is_none()
    }

    /// Canonicalize every touched field. A blank `Set` on a clearable field
    /// becomes `Clear`.
    pub fn normalize(self) -> CatalogResult<Self> {
        if matches!(self.channel_name, Patch::Clear) {
            return Err(CatalogError::validation("Channel name cannot be cleared"));
        }
        if matches!(self.bias, Patch::Clear) {
            return Err(CatalogError::validation("Region cannot be cleared"));
        }

        let channel_name = self.channel_name.try_map(|n| normalize_name(&n))?;
        let username = match self.username.try_map(|h| normalize_handle(&h))? {
            Patch::Set(None) => Patch::Clear,
            Patch::Set(Some(handle)) => Patch::Set(handle),
            Patch::Unchanged => Patch::Unchanged,
            Patch::Clear => Patch::Clear,
        };
        let invite = match self.invite.try_map(|i| normalize_invite(&i))? {
            Patch::Set(None) => Patch::Clear,
            Patch::Set(Some(hash)) => Patch::Set(hash),
            Patch::Unchanged => Patch::Unchanged,
            Patch::Clear => Patch::Clear,
        };
        let patterns = self.patterns.map(normalize_patterns).transpose()?;

        let changes = Self {
            channel_name,
            username,
            bias: self.bias,
            invite,
            avatar: self.avatar,
            patterns,
        };
        if changes.is_empty() {
            return Err(CatalogError::validation("No changes submitted"));
        }
        Ok(changes)
    }

    /// Apply onto the current entry, producing the full record to write.
    /// Fields left `Unchanged` keep their current values.
    pub fn merge_into(&self, current: &Channel) -> CatalogResult<ChannelRecord> {
        let channel_name = self
            .channel_name
            .clone()
            .apply_required(current.channel_name.clone())
            .ok_or_else(|| CatalogError::validation("Channel name cannot be cleared"))?;

        let bias = match &self.bias {
            Patch::Set(region) => *region,
            Patch::Unchanged => current.bias.parse()?,
            Patch::Clear => return Err(CatalogError::validation("Region cannot be cleared")),
        };

        let username = self.username.clone().apply(current.username.clone());
        let invite = self.invite.clone().apply(current.invite.clone());
        check_handle_or_invite(username.as_deref(), invite.as_deref())?;

        Ok(ChannelRecord {
            channel_id: current.channel_id,
            channel_name,
            bias,
            username,
            invite,
            avatar_id: self.avatar.clone().apply(current.avatar_id),
        })
    }

    /// Avatar newly proposed by this change set, if any
    pub fn proposed_avatar(&self) -> Option<FileId> {
        self.avatar.as_set().copied()
    }
}

/// Reference to either kind of pending submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SubmissionRef {
    Creation(CreationId),
    Edit(EditId),
}

impl std::fmt::Display for SubmissionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionRef::Creation(id) => write!(f, "creation {}", id),
            SubmissionRef::Edit(id) => write!(f, "edit {}", id),
        }
    }
}

/// What a submit call did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Privileged caller; written straight to the catalog
    Published { channel_id: ChannelId },
    /// Queued for review. `replaced_previous` is set when an outstanding
    /// edit by the same submitter was overwritten.
    Pending {
        submission: SubmissionRef,
        replaced_previous: bool,
    },
}

/// Result of a reviewer decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub submission: SubmissionRef,
    pub channel_id: ChannelId,
    pub status: SubmissionStatus,
    pub reviewed_by: UserId,
    pub reviewed_at: DateTime<Utc>,
}

/// Pending work visible to a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionQueue {
    pub creations: Vec<PendingCreation>,
    pub edits: Vec<PendingEditWithChannel>,
}

impl SubmissionQueue {
    pub fn len(&self) -> usize {
        self.creations.len() + self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(username: Option<&str>, invite: Option<&str>) -> Channel {
        Channel {
            channel_id: ChannelId::new(42),
            channel_name: "Old Name".to_string(),
            bias: Region::Japan.tag().to_string(),
            username: username.map(String::from),
            invite: invite.map(String::from),
            avatar_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rename_only_touches_the_name() {
        let current = channel(Some("oldhandle"), None);
        let record = ChannelChanges::rename("New Name")
            .normalize()
            .unwrap()
            .merge_into(&current)
            .unwrap();

        assert_eq!(record.channel_name, "New Name");
        assert_eq!(record.username.as_deref(), Some("oldhandle"));
        assert_eq!(record.invite, None);
        assert_eq!(record.bias, Region::Japan);
        assert_eq!(record.avatar_id, None);
    }

    #[test]
    fn switching_to_private_requires_clearing_the_handle() {
        let current = channel(Some("public"), None);

        let only_invite = ChannelChanges {
            invite: Patch::Set("https://t.me/+secret".to_string()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert!(only_invite.merge_into(&current).is_err());

        let swap = ChannelChanges {
            username: Patch::Set("   ".to_string()),
            invite: Patch::Set("+secret".to_string()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(swap.username, Patch::Clear);

        let record = swap.merge_into(&current).unwrap();
        assert_eq!(record.username, None);
        assert_eq!(record.invite.as_deref(), Some("secret"));
    }

    #[test]
    fn required_fields_cannot_be_cleared() {
        let clear_name = ChannelChanges {
            channel_name: Patch::Clear,
            ..Default::default()
        };
        assert!(clear_name.normalize().is_err());

        let clear_bias = ChannelChanges {
            bias: Patch::Clear,
            ..Default::default()
        };
        assert!(clear_bias.normalize().is_err());
    }

    #[test]
    fn empty_change_set_is_rejected() {
        assert!(ChannelChanges::default().normalize().is_err());

        let clear_patterns = ChannelChanges {
            patterns: Some(vec![]),
            ..Default::default()
        };
        assert!(clear_patterns.normalize().is_ok());
    }

    #[test]
    fn new_channel_is_canonicalized() {
        let payload = NewChannel {
            channel_id: ChannelId::new(-1001234567890),
            channel_name: "  Tech Daily ".to_string(),
            bias: Region::UnitedStates,
            username: Some("@techdaily".to_string()),
            invite: Some("".to_string()),
            avatar_id: None,
            patterns: vec!["ads".to_string(), " ads ".to_string()],
        }
        .normalize()
        .unwrap();

        assert_eq!(payload.channel_name, "Tech Daily");
        assert_eq!(payload.username.as_deref(), Some("techdaily"));
        assert_eq!(payload.invite, None);
        assert_eq!(payload.patterns, vec!["ads".to_string()]);
    }

    #[test]
    fn new_channel_needs_exactly_one_of_handle_or_invite() {
        let base = NewChannel {
            channel_id: ChannelId::new(1),
            channel_name: "Name".to_string(),
            bias: Region::Global,
            username: None,
            invite: None,
            avatar_id: None,
            patterns: vec![],
        };
        assert!(base.clone().normalize().is_err());

        let both = NewChannel {
            username: Some("a".to_string()),
            invite: Some("b".to_string()),
            ..base
        };
        assert!(both.normalize().is_err());
    }

    #[test]
    fn changes_round_trip_through_json_storage() {
        let changes = ChannelChanges {
            channel_name: Patch::Set("N".to_string()),
            username: Patch::Clear,
            bias: Patch::Set(Region::Canada),
            patterns: Some(vec!["x".to_string()]),
            ..Default::default()
        };
        let json = serde_json::to_value(&changes).unwrap();
        let back: ChannelChanges = serde_json::from_value(json).unwrap();
        assert_eq!(back, changes);
    }
}
