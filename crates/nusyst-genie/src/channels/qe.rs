//! Quasi-elastic channel.
//!
//! The axial form factor is reweighted either in dipole mode (`MaCCQE`) or
//! z-expansion mode (`ZNormCCQE` + `ZExpA1CCQE`..`ZExpA4CCQE`); requesting
//! dials from both families is a configuration error, raised before any
//! parameter id is allocated. When z-expansion is active the dipole→
//! z-expansion transitional correction `AxFFCCQEshape` is auto-enabled
//! unless explicitly switched off; it rides the z-expansion response at a
//! fixed value of 1.

use rand::rngs::StdRng;

use nusyst_core::{Error, ParameterHeader, Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, standalone, DialDef};

const ZEXP_RESPONSE: &str = "ZExpAVariationResponse";

const DIPOLE_DIALS: &[&str] = &["MaCCQE"];
const ZEXP_DIALS: &[&str] =
    &["ZNormCCQE", "ZExpA1CCQE", "ZExpA2CCQE", "ZExpA3CCQE", "ZExpA4CCQE"];

const TABLE: &[DialDef] = &[
    standalone("NormCCQE"),
    standalone("MaCCQE"),
    standalone("ZNormCCQE"),
    joint("ZExpA1CCQE", ZEXP_RESPONSE),
    joint("ZExpA2CCQE", ZEXP_RESPONSE),
    joint("ZExpA3CCQE", ZEXP_RESPONSE),
    joint("ZExpA4CCQE", ZEXP_RESPONSE),
];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    let dipole_used = DIPOLE_DIALS.iter().any(|&d| cfg.dial_used(d));
    let zexp_used = ZEXP_DIALS.iter().any(|&d| cfg.dial_used(d));
    if dipole_used && zexp_used {
        return Err(Error::IncompatibleMode(
            "both dipole (MaCCQE) and z-expansion (ZNormCCQE/ZExpA*CCQE) axial form-factor \
             dials requested"
                .to_string(),
        ));
    }

    let mut meta = build_channel("qe", TABLE, cfg, opts, first_id, rng)?;

    // Dipole→z-expansion transitional correction: follows the z-expansion
    // mode unless the configuration overrides it either way.
    let axff_enabled = cfg.bool_opt("AxFFCCQEshape")?.unwrap_or(zexp_used);
    if axff_enabled {
        let mut header = ParameterHeader::new("AxFFCCQEshape");
        header.syst_param_id = *first_id;
        *first_id += 1;
        header.is_correction = true;
        header.central_value = Some(1.0);
        if !opts.ignore_parameter_dependence {
            if let Some(response) = meta.by_name(ZEXP_RESPONSE) {
                header.is_responseless = true;
                header.response_param_id = Some(response.syst_param_id);
            }
        }
        meta.push(header);
    }

    // Vector form-factor shape correction: an engine-level switch with no
    // tweak of its own.
    if cfg.bool_or("VecFFCCQEshape", false)? {
        let mut header = ParameterHeader::new("VecFFCCQEshape");
        header.syst_param_id = *first_id;
        *first_id += 1;
        header.is_correction = true;
        header.central_value = Some(1.0);
        meta.push(header);
    }

    Ok(meta)
}
