//! Core traits for nusyst
//!
//! `SystProvider` is the seam between the configuration layer and concrete
//! physics-channel providers. Its lifecycle is two-phase by contract:
//! headers are built for every provider first (so the global parameter-id
//! numbering is complete), and only then are weight engines attached.

use crate::{EventRecord, EventResponse, Result, SystMetaData};

/// One configured systematic provider.
///
/// A provider is configured exactly once (`build_syst_meta_data`), has its
/// weight engines attached exactly once (`setup_response_calculator`), and
/// is then used for any number of events. Event dispatch may mutate shared
/// engine state, so a single provider instance must not be shared across
/// concurrent event loops; parallel callers clone or re-create providers
/// per worker.
pub trait SystProvider: Send {
    /// Tool-type name this provider was registered under.
    fn name(&self) -> &str;

    /// Build parameter headers, allocating ids starting at `first_free_id`.
    /// Returns the next free id so providers compose without collisions.
    fn build_syst_meta_data(&mut self, first_free_id: usize) -> Result<usize>;

    /// Headers built by `build_syst_meta_data`.
    fn syst_meta_data(&self) -> &SystMetaData;

    /// Instantiate weight engines and attach every configured dial.
    fn setup_response_calculator(&mut self) -> Result<()>;

    /// One weight per variation per configured response-or-standalone
    /// parameter, for one event.
    fn get_event_response(&mut self, event: &EventRecord) -> Result<EventResponse>;

    /// Ad hoc combined weight with the addressed parameters held at the
    /// supplied values. Perturbs shared engine state; see the provider
    /// documentation for the stale-state contract.
    fn get_event_weight_response(
        &mut self,
        event: &EventRecord,
        param_values: &[(usize, f64)],
    ) -> Result<f64>;

    /// Human-readable dump of the configured parameter set.
    fn as_string(&self) -> String;
}

impl std::fmt::Debug for dyn SystProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystProvider").field("name", &self.name()).finish()
    }
}
