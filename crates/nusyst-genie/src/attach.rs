//! Weight-engine configuration and dial attachment.
//!
//! For each response-or-standalone parameter this instantiates engine
//! handles, attaches the calculator each dial needs, and commits the dial
//! values: one pre-configured handle per universe in full-HERG mode, or a
//! single shared handle in reduced mode that dispatch reconfigures per
//! event per universe.

use nusyst_core::{Error, ParameterHeader, Result, SystMetaData};

use crate::config::GlobalOptions;
use crate::herg::{calculator_for_dial, HergEngineFactory};
use crate::response::{merge_response_parameters, GenieResponseParameter};

/// Dial value of `dep` at universe `u`: corrections sit at their central
/// value in every universe.
pub(crate) fn universe_value(dep: &ParameterHeader, u: usize) -> f64 {
    if dep.is_correction {
        dep.central_or_zero()
    } else {
        dep.variations.get(u).copied().unwrap_or_else(|| dep.central_or_zero())
    }
}

/// Build the dial-to-engine associations for every weight-producing
/// parameter in `meta`.
pub(crate) fn attach_dials(
    meta: &SystMetaData,
    opts: &GlobalOptions,
    factory: &dyn HergEngineFactory,
) -> Result<Vec<GenieResponseParameter>> {
    let mut out: Vec<GenieResponseParameter> = Vec::new();

    for (idx, header) in meta.iter().enumerate() {
        if header.is_responseless || !header.is_weight_systematic {
            continue;
        }

        // Joint dependents, or the dial itself when standalone.
        let mut dependents: Vec<(String, usize)> = meta
            .iter()
            .enumerate()
            .filter(|(_, dep)| {
                dep.is_responseless && dep.response_param_id == Some(header.syst_param_id)
            })
            .map(|(j, dep)| (dep.pretty_name.clone(), j))
            .collect();
        if dependents.is_empty() {
            dependents.push((header.pretty_name.clone(), idx));
        }

        let n_vars = header.n_variations();
        let n_build = if opts.use_full_herg { n_vars.max(1) } else { 1 };

        let mut engines = Vec::with_capacity(n_build);
        for u in 0..n_build {
            let mut engine = factory.make();
            for (tag, j) in &dependents {
                let dep = meta.get(*j).ok_or_else(|| {
                    Error::Validation(format!("dependent index {} out of range", j))
                })?;
                let calc = calculator_for_dial(tag).ok_or_else(|| {
                    Error::Validation(format!("no weight calculator handles dial '{}'", tag))
                })?;
                engine.attach_calculator(calc);
                engine.set_dial(tag, universe_value(dep, u));
            }
            engine.reconfigure();
            engines.push(engine);
        }

        merge_response_parameters(
            &mut out,
            vec![GenieResponseParameter { pidx: idx, dependents, engines }],
            meta,
        )?;
    }

    augment_transitional_correction(meta, &mut out)?;

    tracing::debug!(
        responses = out.len(),
        full_herg = opts.use_full_herg,
        "attached weight engines"
    );
    Ok(out)
}

/// When the dipole→z-expansion transitional correction is configured, every
/// engine instance of the owning response group additionally receives the
/// `AxFFCCQEshape` dial at a fixed value of 1. There must be exactly one
/// such group.
fn augment_transitional_correction(
    meta: &SystMetaData,
    responses: &mut [GenieResponseParameter],
) -> Result<()> {
    let Some(ax_idx) = meta.index_of_name("AxFFCCQEshape") else {
        return Ok(());
    };
    let ax = meta.get(ax_idx).ok_or_else(|| {
        Error::Validation("AxFFCCQEshape header disappeared during attachment".to_string())
    })?;
    if !ax.is_responseless {
        // Standalone correction (e.g. parameter dependence ignored): already
        // attached by the normal pass.
        return Ok(());
    }

    let mut owners = responses
        .iter_mut()
        .filter(|r| r.dependents.iter().any(|(_, j)| *j == ax_idx));
    let Some(owner) = owners.next() else {
        return Err(Error::Validation(
            "AxFFCCQEshape transitional correction has no owning response group".to_string(),
        ));
    };
    if owners.next().is_some() {
        return Err(Error::Validation(
            "AxFFCCQEshape transitional correction owned by more than one response group"
                .to_string(),
        ));
    }

    for engine in &mut owner.engines {
        engine.set_dial("AxFFCCQEshape", 1.0);
        engine.reconfigure();
    }
    Ok(())
}
