//! # nusyst-core
//!
//! Core data model for the nusyst systematic-tweak layer: parameter
//! headers, the tweak-definition grammar, Gaussian throw generation,
//! response/dependent consistency, and the provider trait.

#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod response;
pub mod throws;
pub mod traits;
pub mod tweak;
pub mod types;

pub use error::{Error, Result};
pub use event::{EventRecord, InteractionChannel};
pub use response::finalize_response;
pub use traits::SystProvider;
pub use types::{EventResponse, ParameterHeader, ParameterResponse, SystMetaData};
