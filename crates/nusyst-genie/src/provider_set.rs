//! Multi-provider configuration and aggregation.

use nusyst_core::{
    Error, EventRecord, EventResponse, ParameterHeader, Result, SystMetaData, SystProvider,
};

use crate::config::ToolConfig;
use crate::herg::{HergEngineFactory, NullEngineFactory};
use crate::registry;

/// Every provider of one loaded configuration plus the merged, globally
/// id-checked parameter headers.
///
/// Configuration is strictly two-phase: headers are built for all providers
/// (threading the first free id through each) and merged before any weight
/// engine is attached, so cross-provider id uniqueness is checked against
/// the complete numbering.
pub struct ProviderSet {
    providers: Vec<Box<dyn SystProvider>>,
    meta: SystMetaData,
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("meta", &self.meta)
            .finish()
    }
}

impl ProviderSet {
    /// Configure all providers with the dry-run engine.
    pub fn configure(configs: Vec<ToolConfig>) -> Result<Self> {
        Self::configure_with_engines(configs, &mut || Box::new(NullEngineFactory))
    }

    /// Configure all providers, making one engine factory per provider.
    pub fn configure_with_engines(
        configs: Vec<ToolConfig>,
        make_factory: &mut dyn FnMut() -> Box<dyn HergEngineFactory>,
    ) -> Result<Self> {
        if configs.is_empty() {
            return Err(Error::EmptyConfiguration("no tool configurations supplied".to_string()));
        }

        let mut providers: Vec<Box<dyn SystProvider>> = Vec::with_capacity(configs.len());
        let mut meta = SystMetaData::new();
        let mut next_id = 0;

        for cfg in configs {
            let mut provider = registry::make_provider_with_engines(cfg, make_factory())?;
            next_id = provider.build_syst_meta_data(next_id)?;
            meta.extend(provider.syst_meta_data().clone())?;
            providers.push(provider);
        }

        if meta.is_empty() {
            return Err(Error::EmptyConfiguration(
                "configuration produced no parameter headers".to_string(),
            ));
        }

        for provider in &mut providers {
            provider.setup_response_calculator()?;
        }

        tracing::info!(
            providers = providers.len(),
            parameters = meta.len(),
            "configured provider set"
        );
        Ok(Self { providers, meta })
    }

    /// All configured parameter ids, in registration order.
    pub fn parameters(&self) -> Vec<usize> {
        self.meta.iter().map(|h| h.syst_param_id).collect()
    }

    /// Header of parameter `id`.
    pub fn header(&self, id: usize) -> Option<&ParameterHeader> {
        self.meta.by_id(id)
    }

    /// Merged headers of every provider.
    pub fn syst_meta_data(&self) -> &SystMetaData {
        &self.meta
    }

    /// Number of configured providers.
    pub fn n_providers(&self) -> usize {
        self.providers.len()
    }

    /// One `EventResponse` per provider for this event.
    pub fn event_responses(&mut self, event: &EventRecord) -> Result<Vec<EventResponse>> {
        self.providers.iter_mut().map(|p| p.get_event_response(event)).collect()
    }

    /// Ad hoc combined weight across all providers, with each addressed
    /// parameter held at the supplied value. Only standalone parameters can
    /// be addressed; multi-dial joint responses are rejected. Poisons
    /// reduced-mode dispatch even on failure; see
    /// [`SystProvider::get_event_weight_response`].
    pub fn event_weight_response(
        &mut self,
        event: &EventRecord,
        param_values: &[(usize, f64)],
    ) -> Result<f64> {
        for (id, _) in param_values {
            if !self.meta.contains_id(*id) {
                return Err(Error::Validation(format!(
                    "parameter id {} is not configured",
                    id
                )));
            }
        }

        let mut weight = 1.0;
        for provider in &mut self.providers {
            let own: Vec<(usize, f64)> = param_values
                .iter()
                .copied()
                .filter(|(id, _)| provider.syst_meta_data().contains_id(*id))
                .collect();
            if !own.is_empty() {
                weight *= provider.get_event_weight_response(event, &own)?;
            }
        }
        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_config_list_rejected() {
        let err = ProviderSet::configure(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyConfiguration(_)));
    }

    #[test]
    fn test_config_with_no_dials_rejected() {
        let cfg = ToolConfig::from_value(json!({"tool_type": "GENIEReWeight"})).unwrap();
        let err = ProviderSet::configure(vec![cfg]).unwrap_err();
        assert!(matches!(err, Error::EmptyConfiguration(_)));
    }

    #[test]
    fn test_ids_strictly_increasing_across_providers() {
        let a = ToolConfig::from_value(json!({
            "tool_type": "GENIEReWeight",
            "MaCCQETweakDefinition": "[-1,0,1]"
        }))
        .unwrap();
        let b = ToolConfig::from_value(json!({
            "tool_type": "GENIEReWeight",
            "MaNCELTweakDefinition": "[-1,0,1]",
            "MaCOHpiTweakDefinition": "[0.9,1.1]",
            "R0COHpiTweakDefinition": "[0.9,1.1]"
        }))
        .unwrap();

        let set = ProviderSet::configure(vec![a, b]).unwrap();
        let ids = set.parameters();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {:?}", ids);
        assert_eq!(set.n_providers(), 2);
    }
}
