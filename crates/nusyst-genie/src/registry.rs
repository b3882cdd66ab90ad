//! Provider registry.
//!
//! Maps the declarative `tool_type` name to a concrete provider
//! constructor. The table is static and consulted once per configured
//! provider instance, never per event.

use nusyst_core::{Error, Result, SystProvider};

use crate::config::ToolConfig;
use crate::herg::{HergEngineFactory, NullEngineFactory};
use crate::provider::GenieReWeightProvider;

type ProviderCtor = fn(ToolConfig, Box<dyn HergEngineFactory>) -> Result<Box<dyn SystProvider>>;

fn make_genie_reweight(
    cfg: ToolConfig,
    factory: Box<dyn HergEngineFactory>,
) -> Result<Box<dyn SystProvider>> {
    Ok(Box::new(GenieReWeightProvider::with_engine_factory(cfg, factory)?))
}

static PROVIDERS: &[(&str, ProviderCtor)] = &[("GENIEReWeight", make_genie_reweight)];

/// Registered tool-type names.
pub fn registered_tools() -> Vec<&'static str> {
    PROVIDERS.iter().map(|(name, _)| *name).collect()
}

/// Create the provider selected by the configuration's `tool_type`, backed
/// by the dry-run engine.
pub fn make_provider(cfg: ToolConfig) -> Result<Box<dyn SystProvider>> {
    make_provider_with_engines(cfg, Box::new(NullEngineFactory))
}

/// Create the provider selected by the configuration's `tool_type`, backed
/// by the given engine factory.
pub fn make_provider_with_engines(
    cfg: ToolConfig,
    factory: Box<dyn HergEngineFactory>,
) -> Result<Box<dyn SystProvider>> {
    let tool = cfg.tool_type()?.to_string();
    for (name, ctor) in PROVIDERS {
        if *name == tool {
            tracing::debug!(tool = %tool, "creating systematic provider");
            return ctor(cfg, factory);
        }
    }
    Err(Error::UnknownProviderType(tool))
}
