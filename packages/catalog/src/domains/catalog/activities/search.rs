//! Public read path over the published catalog.
//!
//! Pending submissions never show up here. Avatar URLs are resolved per
//! entry; a failed resolution blanks that entry's avatar instead of failing
//! the query.

use futures::future::join_all;
use tracing::debug;

use crate::common::{CatalogError, CatalogResult, ChannelId};
use crate::domains::catalog::data::ChannelData;
use crate::domains::catalog::models::{BlocklistPattern, Channel, ChannelWithAvatar, SearchFilter};
use crate::domains::media::activities::resolve_avatar_url;
use crate::kernel::ServerDeps;

async fn enrich(rows: Vec<ChannelWithAvatar>, deps: &ServerDeps) -> Vec<ChannelData> {
    join_all(rows.into_iter().map(|row| async move {
        let avatar_url = match row.avatar_key.as_deref() {
            Some(key) => resolve_avatar_url(key, row.channel.channel_id, deps).await,
            None => None,
        };
        ChannelData::from_channel(row.channel, avatar_url)
    }))
    .await
}

/// Case-insensitive name substring and exact region match, ordered by name
pub async fn search(filter: &SearchFilter, deps: &ServerDeps) -> CatalogResult<Vec<ChannelData>> {
    let rows = Channel::search(filter, &deps.db_pool).await?;
    debug!(
        name = ?filter.name,
        region = ?filter.region.map(|r| r.tag()),
        results = rows.len(),
        "Catalog search"
    );
    Ok(enrich(rows, deps).await)
}

pub async fn get_by_id(channel_id: ChannelId, deps: &ServerDeps) -> CatalogResult<ChannelData> {
    let row = Channel::find_with_avatar(channel_id, &deps.db_pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Channel {}", channel_id)))?;

    Ok(enrich(vec![row], deps).await.remove(0))
}

/// Resolve a client-held favorites set. Ids that no longer exist are dropped.
pub async fn get_by_ids(ids: &[ChannelId], deps: &ServerDeps) -> CatalogResult<Vec<ChannelData>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = Channel::find_many_with_avatar(ids, &deps.db_pool).await?;
    Ok(enrich(rows, deps).await)
}

/// Published blocklist of an entry, ordered by pattern
pub async fn get_blocklist(channel_id: ChannelId, deps: &ServerDeps) -> CatalogResult<Vec<String>> {
    if !Channel::exists(channel_id, &deps.db_pool).await? {
        return Err(CatalogError::not_found(format!("Channel {}", channel_id)));
    }

    let patterns = BlocklistPattern::find_for_channel(channel_id, &deps.db_pool).await?;
    Ok(patterns.into_iter().map(|p| p.pattern).collect())
}
