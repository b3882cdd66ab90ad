//! Response/dependent consistency.
//!
//! A response parameter stands in for several jointly-varying dependent
//! dials: one weight per joint universe, not per dial value. The response
//! header carries no physical value, only the universe index sequence used
//! at dispatch time to pick the matching slice of each dependent's
//! variation list.

use crate::{Error, Result, SystMetaData};

/// Attach the named dependents to `response_name` and finalize the response
/// header's synthetic variation list.
///
/// Dependents absent from the collection are skipped (not every configured
/// channel requests every dial). Present dependents are marked responseless
/// and pointed at the response id; a spline-able dependent is rejected since
/// splines are undefined across multi-parameter responses. All present
/// non-correction dependents must agree on their variation count `N`; the
/// response's variations become the universe indices `0..N`.
///
/// The caller must have registered the response header and every dependent
/// before calling this; the two-phase ordering (allocate dependents, then
/// finalize the response) keeps ids from forward-referencing.
pub fn finalize_response(
    meta: &mut SystMetaData,
    response_name: &str,
    dependent_names: &[&str],
) -> Result<()> {
    let response_idx = meta.index_of_name(response_name).ok_or_else(|| {
        Error::Validation(format!("response parameter '{}' is not registered", response_name))
    })?;
    let response_id = meta.get(response_idx).map(|h| h.syst_param_id).ok_or_else(|| {
        Error::Validation(format!("response parameter '{}' is not registered", response_name))
    })?;

    let mut common: Option<(usize, String)> = None;
    for &name in dependent_names {
        let Some(idx) = meta.index_of_name(name) else { continue };

        if let Some(dep) = meta.get(idx) {
            if dep.is_splineable {
                return Err(Error::SplineOnMultiParamResponse(format!(
                    "'{}' cannot feed response '{}'",
                    name, response_name
                )));
            }
            if !dep.is_correction {
                let n = dep.variations.len();
                match &common {
                    None => common = Some((n, name.to_string())),
                    Some((m, first)) if *m != n => {
                        return Err(Error::InconsistentVariationCount(format!(
                            "response '{}': '{}' has {} variations, '{}' has {}",
                            response_name, first, m, name, n
                        )));
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(dep) = meta.get_mut(idx) {
            dep.is_responseless = true;
            dep.response_param_id = Some(response_id);
        }
    }

    let n_universes = common.map(|(n, _)| n).unwrap_or(0);
    if let Some(response) = meta.get_mut(response_idx) {
        response.variations = (0..n_universes).map(|u| u as f64).collect();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterHeader;

    fn discrete(name: &str, id: usize, values: &[f64]) -> ParameterHeader {
        let mut h = ParameterHeader::new(name);
        h.syst_param_id = id;
        h.variations = values.to_vec();
        h
    }

    #[test]
    fn test_finalize_builds_universe_indices() {
        let mut md = SystMetaData::new();
        md.push(discrete("MaCOHpi", 0, &[0.8, 0.9, 1.0, 1.1, 1.2]));
        md.push(discrete("R0COHpi", 1, &[0.8, 0.9, 1.0, 1.1, 1.2]));
        let mut response = ParameterHeader::new("COHVariationResponse");
        response.syst_param_id = 2;
        md.push(response);

        finalize_response(&mut md, "COHVariationResponse", &["MaCOHpi", "R0COHpi"]).unwrap();

        let response = md.by_name("COHVariationResponse").unwrap();
        assert_eq!(response.variations, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        for name in ["MaCOHpi", "R0COHpi"] {
            let dep = md.by_name(name).unwrap();
            assert!(dep.is_responseless);
            assert_eq!(dep.response_param_id, Some(2));
        }
        md.validate().unwrap();
    }

    #[test]
    fn test_mismatched_variation_counts_rejected() {
        let mut md = SystMetaData::new();
        md.push(discrete("MaCOHpi", 0, &[1.0; 7]));
        md.push(discrete("R0COHpi", 1, &[1.0; 5]));
        let mut response = ParameterHeader::new("COHVariationResponse");
        response.syst_param_id = 2;
        md.push(response);

        let err =
            finalize_response(&mut md, "COHVariationResponse", &["MaCOHpi", "R0COHpi"])
                .unwrap_err();
        assert!(matches!(err, Error::InconsistentVariationCount(_)));
    }

    #[test]
    fn test_splineable_dependent_rejected() {
        let mut md = SystMetaData::new();
        let mut dep = discrete("MaCCRES", 0, &[-1.0, 0.0, 1.0]);
        dep.is_splineable = true;
        md.push(dep);
        let mut response = ParameterHeader::new("CCRESVariationResponse");
        response.syst_param_id = 1;
        md.push(response);

        let err =
            finalize_response(&mut md, "CCRESVariationResponse", &["MaCCRES"]).unwrap_err();
        assert!(matches!(err, Error::SplineOnMultiParamResponse(_)));
    }

    #[test]
    fn test_absent_dependents_skipped_and_corrections_uncounted() {
        let mut md = SystMetaData::new();
        md.push(discrete("ZExpA1CCQE", 0, &[0.1, 0.2, 0.3]));
        let mut corr = ParameterHeader::new("AxFFCCQEshape");
        corr.syst_param_id = 1;
        corr.is_correction = true;
        corr.central_value = Some(1.0);
        md.push(corr);
        let mut response = ParameterHeader::new("ZExpAVariationResponse");
        response.syst_param_id = 2;
        md.push(response);

        finalize_response(
            &mut md,
            "ZExpAVariationResponse",
            &["ZExpA1CCQE", "ZExpA2CCQE", "AxFFCCQEshape"],
        )
        .unwrap();

        let response = md.by_name("ZExpAVariationResponse").unwrap();
        assert_eq!(response.variations, vec![0.0, 1.0, 2.0]);
        assert!(md.by_name("AxFFCCQEshape").unwrap().is_responseless);
    }
}
