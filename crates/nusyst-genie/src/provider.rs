//! The GENIE reweighting provider.

use rand::rngs::StdRng;
use rand::SeedableRng;

use nusyst_core::{
    EventRecord, EventResponse, Result, SystMetaData, SystProvider,
};

use crate::channels;
use crate::config::{GlobalOptions, ToolConfig};
use crate::herg::{HergEngineFactory, NullEngineFactory};
use crate::response::GenieResponseParameter;
use crate::{attach, dispatch};

/// Systematic provider spanning all GENIE channel families.
///
/// Lifecycle: `build_syst_meta_data` once, `setup_response_calculator` once,
/// then any number of events. Reduced-mode dispatch mutates the shared
/// engine instances in place, so a single provider instance is not safe for
/// concurrent event dispatch; parallel callers create one provider per
/// worker.
pub struct GenieReWeightProvider {
    cfg: ToolConfig,
    opts: GlobalOptions,
    factory: Box<dyn HergEngineFactory>,
    meta: SystMetaData,
    responses: Vec<GenieResponseParameter>,
    herg_perturbed: bool,
}

impl GenieReWeightProvider {
    /// Provider backed by the dry-run [`crate::herg::NullEngine`].
    pub fn new(cfg: ToolConfig) -> Result<Self> {
        Self::with_engine_factory(cfg, Box::new(NullEngineFactory))
    }

    /// Provider backed by an injected engine factory.
    pub fn with_engine_factory(
        cfg: ToolConfig,
        factory: Box<dyn HergEngineFactory>,
    ) -> Result<Self> {
        let opts = GlobalOptions::from_config(&cfg)?;
        Ok(Self {
            cfg,
            opts,
            factory,
            meta: SystMetaData::new(),
            responses: Vec::new(),
            herg_perturbed: false,
        })
    }

    /// Provider-global options as configured.
    pub fn options(&self) -> &GlobalOptions {
        &self.opts
    }
}

impl SystProvider for GenieReWeightProvider {
    fn name(&self) -> &str {
        "GENIEReWeight"
    }

    fn build_syst_meta_data(&mut self, first_free_id: usize) -> Result<usize> {
        // One explicitly seeded random engine per configuration load.
        let mut rng = StdRng::seed_from_u64(self.opts.seed);
        let mut next_id = first_free_id;
        let mut meta = SystMetaData::new();

        type ChannelBuilder =
            fn(&ToolConfig, &GlobalOptions, &mut usize, &mut StdRng) -> Result<SystMetaData>;
        const BUILDERS: &[ChannelBuilder] = &[
            channels::qe::build,
            channels::ncel::build,
            channels::res::build,
            channels::coh::build,
            channels::dis::build,
            channels::fsi::build,
            channels::other::build,
        ];
        for build in BUILDERS {
            meta.extend(build(&self.cfg, &self.opts, &mut next_id, &mut rng)?)?;
        }
        meta.validate()?;

        tracing::info!(
            headers = meta.len(),
            first_id = first_free_id,
            "built systematic parameter headers"
        );
        self.meta = meta;
        Ok(next_id)
    }

    fn syst_meta_data(&self) -> &SystMetaData {
        &self.meta
    }

    fn setup_response_calculator(&mut self) -> Result<()> {
        self.responses = attach::attach_dials(&self.meta, &self.opts, self.factory.as_ref())?;
        tracing::info!(responses = self.responses.len(), "attached weight engines");
        Ok(())
    }

    fn get_event_response(&mut self, event: &EventRecord) -> Result<EventResponse> {
        dispatch::event_response(&self.meta, &mut self.responses, self.herg_perturbed, event)
    }

    fn get_event_weight_response(
        &mut self,
        event: &EventRecord,
        param_values: &[(usize, f64)],
    ) -> Result<f64> {
        // Latch before any engine is touched: a query that fails partway has
        // already perturbed the engines of the entries it processed.
        self.herg_perturbed = true;
        dispatch::event_weight_response(&self.meta, &mut self.responses, event, param_values)
    }

    fn as_string(&self) -> String {
        serde_json::to_string_pretty(&self.meta)
            .unwrap_or_else(|e| format!("<unserializable parameter set: {}>", e))
    }
}
