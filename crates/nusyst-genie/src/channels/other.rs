//! Remaining standalone dials outside the named channel families.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, standalone, DialDef};

const TABLE: &[DialDef] =
    &[standalone("CCQEPauliSupViaKF"), standalone("CCQEMomDistroFGtoSF")];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    build_channel("other", TABLE, cfg, opts, first_id, rng)
}
