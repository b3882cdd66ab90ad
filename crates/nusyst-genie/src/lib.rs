//! # nusyst-genie
//!
//! GENIE-facing layer of nusyst: declarative tool configuration, the
//! provider registry, per-channel parameter-header builders, the weight-
//! engine (HERG) seam, dial attachment and per-event response dispatch.

#![warn(clippy::all)]

mod attach;
mod channels;
mod dispatch;

pub mod config;
pub mod herg;
pub mod provider;
pub mod provider_set;
pub mod registry;
pub mod response;

pub use config::{tool_configs_from_json, GlobalOptions, ToolConfig};
pub use herg::{
    calculator_for_dial, HergEngine, HergEngineFactory, LinearEngine, LinearEngineFactory,
    NullEngine, NullEngineFactory,
};
pub use provider::GenieReWeightProvider;
pub use provider_set::ProviderSet;
pub use registry::{make_provider, make_provider_with_engines, registered_tools};
pub use response::{merge_response_parameters, GenieResponseParameter};
