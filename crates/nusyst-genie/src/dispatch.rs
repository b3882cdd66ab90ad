//! Per-event response dispatch.
//!
//! Full mode indexes the pre-built engine instances directly; reduced mode
//! re-commits every dependent dial per universe on the single shared
//! instance. Reduced-mode state is owned by the provider under a
//! single-writer contract: dispatch mutates it in place, so one provider
//! instance must never serve concurrent event loops.

use nusyst_core::{
    Error, EventRecord, EventResponse, ParameterResponse, Result, SystMetaData,
};

use crate::attach::universe_value;
use crate::response::GenieResponseParameter;

/// Collect one weight per variation for every configured parameter.
///
/// `herg_perturbed` is the latch set by the ad hoc weight path; once set,
/// reduced-mode dispatch would silently use perturbed engine state, so it
/// fails fast instead.
pub(crate) fn event_response(
    meta: &SystMetaData,
    responses: &mut [GenieResponseParameter],
    herg_perturbed: bool,
    event: &EventRecord,
) -> Result<EventResponse> {
    let mut out = EventResponse::default();

    for entry in responses.iter_mut() {
        let header = meta.get(entry.pidx).ok_or_else(|| {
            Error::Validation(format!("response index {} out of range", entry.pidx))
        })?;
        let n_vars = header.n_variations();
        let mut weights = Vec::with_capacity(n_vars);

        if entry.engines.len() >= n_vars {
            // Full mode: engines were committed at attachment time.
            for engine in entry.engines.iter().take(n_vars) {
                weights.push(engine.calc_weight(event));
            }
        } else {
            if herg_perturbed {
                return Err(Error::StaleEngineState(format!(
                    "reduced-mode dispatch for '{}' after an ad hoc weight query",
                    header.pretty_name
                )));
            }
            let engine = entry.engines.first_mut().ok_or_else(|| {
                Error::Validation(format!(
                    "parameter '{}' has no engine instance",
                    header.pretty_name
                ))
            })?;
            for u in 0..n_vars {
                for (tag, j) in &entry.dependents {
                    let dep = meta.get(*j).ok_or_else(|| {
                        Error::Validation(format!("dependent index {} out of range", j))
                    })?;
                    engine.set_dial(tag, universe_value(dep, u));
                }
                engine.reconfigure();
                weights.push(engine.calc_weight(event));
            }
        }

        out.responses.push(ParameterResponse { param_id: header.syst_param_id, weights });
    }

    Ok(out)
}

/// Multiplicatively combined weight with each addressed parameter's dial
/// held at the supplied value.
///
/// Only standalone parameters (including corrections and single-dial
/// responses) can be addressed: a supplied value has no reading across a
/// multi-dial joint group, so those ids are rejected. Reconfigures the
/// front engine of each addressed group ad hoc. Full-mode front engines are
/// restored to their universe-0 state afterwards; the caller is responsible
/// for latching `herg_perturbed`, which permanently invalidates
/// reduced-mode dispatch.
pub(crate) fn event_weight_response(
    meta: &SystMetaData,
    responses: &mut [GenieResponseParameter],
    event: &EventRecord,
    param_values: &[(usize, f64)],
) -> Result<f64> {
    let mut weight = 1.0;

    for &(param_id, value) in param_values {
        let entry = responses
            .iter_mut()
            .find(|r| meta.get(r.pidx).map(|h| h.syst_param_id) == Some(param_id))
            .ok_or_else(|| {
                Error::Validation(format!("parameter id {} is not configured", param_id))
            })?;
        let header = meta.get(entry.pidx).ok_or_else(|| {
            Error::Validation(format!("response index {} out of range", entry.pidx))
        })?;
        let n_vars = header.n_variations();
        let full_mode = entry.engines.len() >= n_vars;

        let n_free_dials = entry
            .dependents
            .iter()
            .filter(|(_, j)| meta.get(*j).is_some_and(|d| !d.is_correction))
            .count();
        if n_free_dials > 1 {
            return Err(Error::Validation(format!(
                "parameter '{}' is a joint response of {} dials and cannot be held at a \
                 single value",
                header.pretty_name, n_free_dials
            )));
        }

        let engine = entry.engines.first_mut().ok_or_else(|| {
            Error::Validation(format!(
                "parameter '{}' has no engine instance",
                header.pretty_name
            ))
        })?;

        for (tag, j) in &entry.dependents {
            let dep = meta.get(*j).ok_or_else(|| {
                Error::Validation(format!("dependent index {} out of range", j))
            })?;
            let v = if dep.is_correction { dep.central_or_zero() } else { value };
            engine.set_dial(tag, v);
        }
        engine.reconfigure();
        weight *= engine.calc_weight(event);

        if full_mode {
            // Put the universe-0 instance back the way attachment left it.
            for (tag, j) in &entry.dependents {
                let dep = meta.get(*j).ok_or_else(|| {
                    Error::Validation(format!("dependent index {} out of range", j))
                })?;
                engine.set_dial(tag, universe_value(dep, 0));
            }
            engine.reconfigure();
        }
    }

    Ok(weight)
}
