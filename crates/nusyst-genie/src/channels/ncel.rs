//! Neutral-current elastic channel: `MaNCEL` and `EtaNCEL` jointly
//! determine one response.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, DialDef};

const TABLE: &[DialDef] =
    &[joint("MaNCEL", "NCELVariationResponse"), joint("EtaNCEL", "NCELVariationResponse")];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    build_channel("ncel", TABLE, cfg, opts, first_id, rng)
}
