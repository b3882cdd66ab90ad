//! Coherent pion-production channel: `MaCOHpi` and `R0COHpi` jointly
//! determine one response.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, DialDef};

const TABLE: &[DialDef] =
    &[joint("MaCOHpi", "COHVariationResponse"), joint("R0COHpi", "COHVariationResponse")];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    build_channel("coh", TABLE, cfg, opts, first_id, rng)
}
