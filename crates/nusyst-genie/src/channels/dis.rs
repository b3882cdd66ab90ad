//! Deep-inelastic scattering channel.
//!
//! The Bodek–Yang structure-function parameters are jointly coupled into
//! one response; the AGKY hadronization dials and the formation zone are
//! independently coupled, one standalone parameter each.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, standalone, DialDef};

const TABLE: &[DialDef] = &[
    joint("AhtBY", "DISBYVariationResponse"),
    joint("BhtBY", "DISBYVariationResponse"),
    joint("CV1uBY", "DISBYVariationResponse"),
    joint("CV2uBY", "DISBYVariationResponse"),
    standalone("AGKYxF1pi"),
    standalone("AGKYpT1pi"),
    standalone("FormZone"),
];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    build_channel("dis", TABLE, cfg, opts, first_id, rng)
}
