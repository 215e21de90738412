pub mod anthropic;
pub mod openai;
pub mod xai;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};

/// Pricing and capability data for one model. Prices are per token, parsed
/// from decimal-string literals so cost math stays exact.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub model_id: String,
    pub input_price: Decimal,
    pub output_price: Decimal,
    pub input_price_cached: Option<Decimal>,
    pub structured_outputs: bool,
    pub json_mode: bool,
}

/// The static table of valid models for one provider. Built once at startup
/// and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    pub provider: String,
    pub default_model: String,
    models: HashMap<String, ModelEntry>,
}

fn price(provider: &str, model_id: &str, field: &str, literal: &str) -> ApiResult<Decimal> {
    literal.parse::<Decimal>().map_err(|e| {
        ApiError::Configuration(format!(
            "invalid {field} price '{literal}' for model '{model_id}' ({provider}): {e}"
        ))
    })
}

impl ModelEntry {
    fn new(
        provider: &str,
        model_id: &str,
        input: &str,
        input_cached: Option<&str>,
        output: &str,
        structured_outputs: bool,
        json_mode: bool,
    ) -> ApiResult<Self> {
        let input_price_cached = match input_cached {
            Some(literal) => Some(price(provider, model_id, "cached input", literal)?),
            None => None,
        };
        Ok(Self {
            model_id: model_id.to_string(),
            input_price: price(provider, model_id, "input", input)?,
            output_price: price(provider, model_id, "output", output)?,
            input_price_cached,
            structured_outputs,
            json_mode,
        })
    }
}

impl ProviderCatalog {
    pub fn new(
        provider: &str,
        default_model: &str,
        entries: Vec<ModelEntry>,
    ) -> ApiResult<Self> {
        if entries.is_empty() {
            return Err(ApiError::Configuration(format!(
                "No models found for provider {provider}"
            )));
        }

        let mut models = HashMap::new();
        for entry in entries {
            if entry.input_price <= Decimal::ZERO || entry.output_price <= Decimal::ZERO {
                return Err(ApiError::Configuration(format!(
                    "Cost information incomplete for model '{}'",
                    entry.model_id
                )));
            }
            models.insert(entry.model_id.clone(), entry);
        }

        if !models.contains_key(default_model) {
            return Err(ApiError::Configuration(format!(
                "No default model found for provider {provider}"
            )));
        }

        Ok(Self {
            provider: provider.to_string(),
            default_model: default_model.to_string(),
            models,
        })
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    pub fn model_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.models.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Task-level resolution: a missing or unknown id falls back to the
    /// provider default with a warning, never an error.
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(id) if self.contains(id) => id,
            Some(id) => {
                tracing::warn!(
                    provider = %self.provider,
                    requested = %id,
                    default = %self.default_model,
                    "invalid model specified, using default model"
                );
                &self.default_model
            }
            None => &self.default_model,
        }
    }

    /// Adapter-level lookup: an id that is not in the catalog is a hard
    /// client error. The task layer already resolved the model, so this is
    /// the second of two deliberate validation passes.
    pub fn entry(&self, model_id: &str) -> ApiResult<&ModelEntry> {
        self.models.get(model_id).ok_or_else(|| {
            ApiError::InvalidModel(format!(
                "'{model_id}' for provider '{}'",
                self.provider
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, input: &str, output: &str) -> ModelEntry {
        ModelEntry::new("test", id, input, None, output, true, true).unwrap()
    }

    fn catalog() -> ProviderCatalog {
        ProviderCatalog::new(
            "test",
            "model-a",
            vec![entry("model-a", "0.000003", "0.000015"), entry("model-b", "0.000001", "0.000002")],
        )
        .unwrap()
    }

    #[test]
    fn test_all_builtin_catalogs_have_positive_prices() {
        for catalog in [
            anthropic::catalog().unwrap(),
            openai::catalog().unwrap(),
            xai::catalog().unwrap(),
        ] {
            assert!(!catalog.model_ids().is_empty());
            for id in catalog.model_ids() {
                let entry = catalog.entry(&id).unwrap();
                assert!(entry.input_price > Decimal::ZERO, "{id} input price");
                assert!(entry.output_price > Decimal::ZERO, "{id} output price");
            }
        }
    }

    #[test]
    fn test_builtin_defaults_are_members() {
        let anthropic = anthropic::catalog().unwrap();
        assert!(anthropic.contains(&anthropic.default_model));
        assert_eq!(anthropic.default_model, "claude-3-5-sonnet-20241022");

        let openai = openai::catalog().unwrap();
        assert!(openai.contains(&openai.default_model));
        assert_eq!(openai.default_model, "gpt-4o-2024-11-20");

        let xai = xai::catalog().unwrap();
        assert!(xai.contains(&xai.default_model));
        assert_eq!(xai.default_model, "grok-2-1212");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = ProviderCatalog::new("test", "model-a", vec![]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_default_must_be_member() {
        let err = ProviderCatalog::new("test", "missing", vec![entry("model-a", "0.1", "0.2")])
            .unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let bad = ModelEntry::new("test", "zero", "0", None, "0.000015", false, false).unwrap();
        let err = ProviderCatalog::new("test", "zero", vec![bad]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_malformed_price_literal_rejected() {
        let err = ModelEntry::new("test", "bad", "three", None, "0.1", false, false).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let catalog = catalog();
        assert_eq!(catalog.resolve(None), "model-a");
        assert_eq!(catalog.resolve(Some("nonexistent-model")), "model-a");
        assert_eq!(catalog.resolve(Some("model-b")), "model-b");
    }

    #[test]
    fn test_entry_is_strict() {
        let catalog = catalog();
        assert!(catalog.entry("model-b").is_ok());

        let err = catalog.entry("nonexistent-model").unwrap_err();
        assert!(matches!(err, ApiError::InvalidModel(_)));
        assert!(err.to_string().contains("nonexistent-model"));
    }

    #[test]
    fn test_model_ids_sorted() {
        assert_eq!(catalog().model_ids(), vec!["model-a", "model-b"]);
    }

    #[test]
    fn test_cached_input_price_parsed() {
        let openai = openai::catalog().unwrap();
        let gpt4o = openai.entry("gpt-4o").unwrap();
        assert_eq!(
            gpt4o.input_price_cached,
            Some("0.00000125".parse().unwrap())
        );
        let gpt4 = openai.entry("gpt-4").unwrap();
        assert!(gpt4.input_price_cached.is_none());
    }
}
