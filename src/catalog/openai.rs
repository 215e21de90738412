//! OpenAI model catalog.
//!
//! Pricing: <https://openai.com/api/pricing/>

use super::{ModelEntry, ProviderCatalog};
use crate::error::ApiResult;

pub const PROVIDER: &str = "openai";

pub fn catalog() -> ApiResult<ProviderCatalog> {
    let entries = vec![
        ModelEntry::new(
            PROVIDER,
            "gpt-4o-2024-11-20",
            "0.0000025",
            Some("0.00000125"),
            "0.00001",
            true,
            true,
        )?,
        ModelEntry::new(
            PROVIDER,
            "gpt-4o-2024-08-06",
            "0.0000025",
            Some("0.00000125"),
            "0.00001",
            true,
            true,
        )?,
        ModelEntry::new(
            PROVIDER,
            "gpt-4o",
            "0.0000025",
            Some("0.00000125"),
            "0.00001",
            true,
            true,
        )?,
        ModelEntry::new(
            PROVIDER,
            "gpt-4o-mini",
            "0.00000015",
            Some("0.000000075"),
            "0.0000006",
            true,
            true,
        )?,
        // Pre-4o models never gained structured outputs, only JSON mode;
        // the adapter falls back to a forced function call for them.
        ModelEntry::new(PROVIDER, "gpt-4-turbo", "0.00001", None, "0.00003", false, true)?,
        ModelEntry::new(PROVIDER, "gpt-4", "0.00003", None, "0.00006", false, true)?,
        ModelEntry::new(PROVIDER, "gpt-4-32k", "0.00006", None, "0.00012", false, true)?,
    ];

    ProviderCatalog::new(PROVIDER, "gpt-4o-2024-11-20", entries)
}
