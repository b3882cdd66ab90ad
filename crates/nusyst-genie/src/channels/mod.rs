//! Per-channel parameter-header builders.
//!
//! Each channel family declares a static dial table; one generic walker
//! reads the configuration, allocates ids strictly increasing in table
//! order, and finalizes joint responses two-phase: every dependent dial is
//! registered (and gets its id) before the response header is allocated,
//! so response ids never forward-reference.

pub(crate) mod coh;
pub(crate) mod dis;
pub(crate) mod fsi;
pub(crate) mod ncel;
pub(crate) mod other;
pub(crate) mod qe;
pub(crate) mod res;

use rand::rngs::StdRng;

use nusyst_core::{finalize_response, ParameterHeader, Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};
use nusyst_core::throws;

/// How a dial's weight is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Coupling {
    /// The dial gets its own weight per variation.
    Standalone,
    /// The dial only feeds the named response parameter; one weight per
    /// joint universe.
    Joint(&'static str),
}

/// One row of a channel's dial table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DialDef {
    pub name: &'static str,
    pub coupling: Coupling,
}

pub(crate) const fn standalone(name: &'static str) -> DialDef {
    DialDef { name, coupling: Coupling::Standalone }
}

pub(crate) const fn joint(name: &'static str, response: &'static str) -> DialDef {
    DialDef { name, coupling: Coupling::Joint(response) }
}

/// Walk one channel's dial table: register requested dials in table order,
/// then allocate and finalize the responses their joint groups feed.
pub(crate) fn build_channel(
    channel: &str,
    dials: &[DialDef],
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    let mut meta = SystMetaData::new();

    for dial in dials {
        if !cfg.dial_used(dial.name) {
            continue;
        }

        let mut header = ParameterHeader::from_tweak_definition(
            dial.name,
            &cfg.tweak_definition(dial.name)?,
            cfg.nominal(dial.name)?,
        )?;
        header.syst_param_id = *first_id;
        *first_id += 1;

        if header.is_randomly_thrown {
            throws::generate(&mut header, opts.number_of_throws, rng);
        }
        if cfg.bool_or(&format!("{}IsShapeOnly", dial.name), false)? {
            header.opts.push("shape".to_string());
        }

        meta.push(header);
    }

    if !opts.ignore_parameter_dependence {
        // Response names in table order, deduplicated.
        let mut responses: Vec<&'static str> = Vec::new();
        for dial in dials {
            if let Coupling::Joint(response) = dial.coupling {
                if !responses.contains(&response) {
                    responses.push(response);
                }
            }
        }

        for response in responses {
            let dependents: Vec<&str> = dials
                .iter()
                .filter(|d| d.coupling == Coupling::Joint(response))
                .map(|d| d.name)
                .collect();
            if !dependents.iter().any(|&d| meta.by_name(d).is_some()) {
                continue;
            }

            let mut header = ParameterHeader::new(response);
            header.syst_param_id = *first_id;
            *first_id += 1;
            meta.push(header);

            finalize_response(&mut meta, response, &dependents)?;
        }
    }

    if !meta.is_empty() {
        tracing::debug!(channel, headers = meta.len(), "built channel parameter headers");
    }
    Ok(meta)
}
