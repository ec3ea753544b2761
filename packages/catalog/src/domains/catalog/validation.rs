//! Field normalization for catalog entries.
//!
//! Every value written to `sources`, `bloats` or a pending submission passes
//! through here first, so stored data is always in canonical form.

use lazy_static::lazy_static;
use regex::Regex;

use crate::common::{CatalogError, CatalogResult};

lazy_static! {
    static ref HANDLE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    static ref INVITE_HASH: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
    static ref INVITE_LINK: Regex =
        Regex::new(r"t\.me/(?:\+|joinchat/)([A-Za-z0-9_-]+)").unwrap();
}

/// Longest accepted blocklist pattern
const MAX_PATTERN_LEN: usize = 512;

pub fn normalize_name(raw: &str) -> CatalogResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CatalogError::validation("Channel name is required"));
    }
    Ok(name.to_string())
}

/// Trim, strip a leading `@`. Blank input means "no handle".
pub fn normalize_handle(raw: &str) -> CatalogResult<Option<String>> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if handle.is_empty() {
        return Ok(None);
    }
    if !HANDLE.is_match(handle) {
        return Err(CatalogError::validation(
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(Some(handle.to_string()))
}

/// Reduce a full invite link or `+HASH` to the bare invite hash.
/// Blank input means "no invite".
pub fn normalize_invite(raw: &str) -> CatalogResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let hash = match INVITE_LINK.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.strip_prefix('+').unwrap_or(trimmed).to_string(),
    };

    if !INVITE_HASH.is_match(&hash) {
        return Err(CatalogError::validation("Invalid invite link"));
    }
    Ok(Some(hash))
}

/// Trim and drop duplicates (first occurrence wins). Pattern text is opaque
/// here; the filters consuming it own the syntax.
pub fn normalize_patterns(raw: Vec<String>) -> CatalogResult<Vec<String>> {
    let mut patterns: Vec<String> = Vec::with_capacity(raw.len());

    for entry in raw {
        let pattern = entry.trim();
        if pattern.is_empty() {
            return Err(CatalogError::validation("Blocklist patterns cannot be empty"));
        }
        if pattern.len() > MAX_PATTERN_LEN {
            return Err(CatalogError::validation(format!(
                "Blocklist pattern exceeds {} characters",
                MAX_PATTERN_LEN
            )));
        }
        if !patterns.iter().any(|p| p == pattern) {
            patterns.push(pattern.to_string());
        }
    }

    Ok(patterns)
}

/// A public channel has a handle, a private one an invite. Never both, never neither.
pub fn check_handle_or_invite(username: Option<&str>, invite: Option<&str>) -> CatalogResult<()> {
    match (username, invite) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (None, None) => Err(CatalogError::validation(
            "Invite link is required for private channels",
        )),
        (Some(_), Some(_)) => Err(CatalogError::validation(
            "Provide either a username or an invite link, not both",
        )),
    }
}

pub fn invite_link(hash: &str) -> String {
    format!("https://t.me/+{}", hash)
}

pub fn handle_link(handle: &str) -> String {
    format!("https://t.me/{}", handle)
}
