//! Commodity resolution against the reference table.
//!
//! The validation pipeline resolves common commodities itself; everything
//! else lands here. The resolver owns its own feedback on unknown or
//! ambiguous search terms; callers stop quietly on `None`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::commodity::{CommodityData, COMMODITY_REFERENCE};
use crate::service::surface::{ChannelSurface, CommodityResolver, Notice};

/// How many candidate names an ambiguity notice lists before truncating.
const MAX_LISTED_MATCHES: usize = 10;

/// Matches a search term against the commodity reference table.
///
/// An exact case-insensitive match wins outright; otherwise all names
/// containing the term (case-insensitive) are returned.
pub fn match_commodities(term: &str) -> Vec<&'static str> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = COMMODITY_REFERENCE
        .iter()
        .find(|name| name.eq_ignore_ascii_case(term.trim()))
    {
        return vec![exact];
    }

    COMMODITY_REFERENCE
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

/// Resolver over the static reference table, reporting through the channel
/// surface.
pub struct TableCommodityResolver {
    channels: Arc<dyn ChannelSurface>,
}

impl TableCommodityResolver {
    pub fn new(channels: Arc<dyn ChannelSurface>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl CommodityResolver for TableCommodityResolver {
    async fn resolve(
        &self,
        term: &str,
        origin_channel: u64,
    ) -> Result<Option<CommodityData>, AppError> {
        let matches = match_commodities(term);
        match matches.len() {
            0 => {
                self.channels
                    .send_notice(
                        origin_channel,
                        Notice::error(format!(
                            "❌ No commodity found matching '**{}**'. Check the spelling or use autocomplete.",
                            term
                        )),
                    )
                    .await?;
                Ok(None)
            }
            1 => Ok(Some(CommodityData::new(matches[0]))),
            count => {
                let mut listed: Vec<&str> = matches.iter().take(MAX_LISTED_MATCHES).copied().collect();
                if count > MAX_LISTED_MATCHES {
                    listed.push("…");
                }
                self.channels
                    .send_notice(
                        origin_channel,
                        Notice::error(format!(
                            "❌ {} commodities match '**{}**': {}. Please be more specific.",
                            count,
                            term,
                            listed.join(", ")
                        )),
                    )
                    .await?;
                Ok(None)
            }
        }
    }
}
