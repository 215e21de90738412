//! Anthropic model catalog.
//!
//! Pricing: <https://docs.anthropic.com/en/docs/about-claude/models>

use super::{ModelEntry, ProviderCatalog};
use crate::error::ApiResult;

pub const PROVIDER: &str = "anthropic";

pub fn catalog() -> ApiResult<ProviderCatalog> {
    // Anthropic has no schema-constrained completion mode; the adapter
    // forces a tool call instead, so both capability flags stay off.
    let entries = vec![
        ModelEntry::new(
            PROVIDER,
            "claude-3-5-sonnet-20241022",
            "0.000003",
            None,
            "0.000015",
            false,
            false,
        )?,
        ModelEntry::new(
            PROVIDER,
            "claude-3-5-sonnet-20240620",
            "0.000003",
            None,
            "0.000015",
            false,
            false,
        )?,
        ModelEntry::new(
            PROVIDER,
            "claude-3-sonnet-20240229",
            "0.000003",
            None,
            "0.000015",
            false,
            false,
        )?,
        ModelEntry::new(
            PROVIDER,
            "claude-3-haiku-20240307",
            "0.00000025",
            None,
            "0.00000125",
            false,
            false,
        )?,
        ModelEntry::new(
            PROVIDER,
            "claude-3-opus-20240229",
            "0.000015",
            None,
            "0.000075",
            false,
            false,
        )?,
    ];

    ProviderCatalog::new(PROVIDER, "claude-3-5-sonnet-20241022", entries)
}
