//! xAI model catalog.
//!
//! Pricing: <https://docs.x.ai/docs/models>

use super::{ModelEntry, ProviderCatalog};
use crate::error::ApiResult;

pub const PROVIDER: &str = "xai";

pub fn catalog() -> ApiResult<ProviderCatalog> {
    let entries = vec![
        ModelEntry::new(
            PROVIDER,
            "grok-2-vision-1212",
            "0.000002",
            None,
            "0.000010",
            true,
            true,
        )?,
        ModelEntry::new(PROVIDER, "grok-2-1212", "0.000002", None, "0.000010", true, true)?,
        ModelEntry::new(
            PROVIDER,
            "grok-vision-beta",
            "0.000005",
            None,
            "0.000015",
            true,
            true,
        )?,
        ModelEntry::new(PROVIDER, "grok-beta", "0.000005", None, "0.000015", true, true)?,
    ];

    ProviderCatalog::new(PROVIDER, "grok-2-1212", entries)
}
