//! Per-event dispatch tests with the deterministic diagnostic engine.

use approx::assert_relative_eq;
use nusyst_core::{Error, EventRecord, InteractionChannel};
use nusyst_genie::{
    tool_configs_from_json, HergEngineFactory, LinearEngineFactory, ProviderSet,
};
use serde_json::json;

fn event() -> EventRecord {
    EventRecord {
        channel: InteractionChannel::QuasiElastic,
        is_cc: true,
        probe_p4: [1.5, 0.0, 0.0, 1.5],
        fs_lepton_p4: [1.1, 0.2, 0.0, 1.0],
        target_nucleon_p4: [0.94, 0.0, 0.0, 0.0],
    }
}

fn linear_set(config: serde_json::Value) -> ProviderSet {
    let configs = tool_configs_from_json(&config.to_string()).unwrap();
    let mut make = || -> Box<dyn HergEngineFactory> { Box::new(LinearEngineFactory) };
    ProviderSet::configure_with_engines(configs, &mut make).unwrap()
}

#[test]
fn test_weight_counts_per_parameter() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "UseFullHERG": true,
        "MaCCQETweakDefinition": "[-1, 0, 1, 2]",
        "VecFFCCQEshape": true
    }));

    let responses = set.event_responses(&event()).unwrap();
    assert_eq!(responses.len(), 1);

    let ma_id = set.syst_meta_data().by_name("MaCCQE").unwrap().syst_param_id;
    let vec_id = set.syst_meta_data().by_name("VecFFCCQEshape").unwrap().syst_param_id;

    // Non-correction: one weight per variation, in universe order.
    let ma_weights = responses[0].weights_for(ma_id).unwrap();
    assert_eq!(ma_weights.len(), 4);
    for (w, v) in ma_weights.iter().zip([-1.0, 0.0, 1.0, 2.0]) {
        assert_relative_eq!(*w, 1.0 + v / 10.0, epsilon = 1e-12);
    }

    // Correction: exactly one weight, at the central value.
    let vec_weights = responses[0].weights_for(vec_id).unwrap();
    assert_eq!(vec_weights.len(), 1);
    assert_relative_eq!(vec_weights[0], 1.1, epsilon = 1e-12);
}

#[test]
fn test_joint_response_weights_per_universe() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "UseFullHERG": true,
        "MaCOHpiTweakDefinition": "[1.0, 2.0, 3.0]",
        "R0COHpiTweakDefinition": "[3.0, 2.0, 1.0]"
    }));

    let coh_id = set.syst_meta_data().by_name("COHVariationResponse").unwrap().syst_param_id;
    let responses = set.event_responses(&event()).unwrap();
    let weights = responses[0].weights_for(coh_id).unwrap();

    // One weight per joint universe, both dials set together.
    assert_eq!(weights.len(), 3);
    for (w, (ma, r0)) in weights.iter().zip([(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)]) {
        assert_relative_eq!(*w, (1.0 + ma / 10.0) * (1.0 + r0 / 10.0), epsilon = 1e-12);
    }
}

#[test]
fn test_full_and_reduced_modes_agree() {
    let dials = json!({
        "tool_type": "GENIEReWeight",
        "MaCOHpiTweakDefinition": "[1.0, 2.0, 3.0]",
        "R0COHpiTweakDefinition": "[3.0, 2.0, 1.0]",
        "ZExpA1CCQETweakDefinition": "[1.9, 2.0, 2.1]",
        "ZExpA2CCQETweakDefinition": "[-0.6, -0.5, -0.4]"
    });
    let mut full_cfg = dials.clone();
    full_cfg["UseFullHERG"] = json!(true);

    let mut full = linear_set(full_cfg);
    let mut reduced = linear_set(dials);

    let full_responses = full.event_responses(&event()).unwrap();
    let reduced_responses = reduced.event_responses(&event()).unwrap();

    assert_eq!(full_responses.len(), reduced_responses.len());
    for (f, r) in full_responses[0].responses.iter().zip(&reduced_responses[0].responses) {
        assert_eq!(f.param_id, r.param_id);
        assert_eq!(f.weights.len(), r.weights.len());
        for (fw, rw) in f.weights.iter().zip(&r.weights) {
            assert_relative_eq!(*fw, *rw, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_full_mode_dispatch_is_idempotent() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "UseFullHERG": true,
        "MaNCELTweakDefinition": "[0.9, 1.0, 1.1]",
        "EtaNCELTweakDefinition": "[0.10, 0.12, 0.14]"
    }));

    let first = set.event_responses(&event()).unwrap();
    let second = set.event_responses(&event()).unwrap();
    for (a, b) in first[0].responses.iter().zip(&second[0].responses) {
        assert_eq!(a.param_id, b.param_id);
        assert_eq!(a.weights, b.weights);
    }
}

#[test]
fn test_ad_hoc_weight_query() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "UseFullHERG": true,
        "MaCCQETweakDefinition": "[-1, 0, 1]",
        "FormZoneTweakDefinition": "[-1, 0, 1]"
    }));

    let ma_id = set.syst_meta_data().by_name("MaCCQE").unwrap().syst_param_id;
    let fz_id = set.syst_meta_data().by_name("FormZone").unwrap().syst_param_id;

    let w = set.event_weight_response(&event(), &[(ma_id, 2.0), (fz_id, 3.0)]).unwrap();
    assert_relative_eq!(w, 1.2 * 1.3, epsilon = 1e-12);

    // Unknown ids are rejected.
    assert!(set.event_weight_response(&event(), &[(9999, 1.0)]).is_err());

    // Full-mode dispatch is unaffected: the front engines were restored.
    let responses = set.event_responses(&event()).unwrap();
    let ma_weights = responses[0].weights_for(ma_id).unwrap();
    assert_relative_eq!(ma_weights[0], 0.9, epsilon = 1e-12);
}

#[test]
fn test_ad_hoc_query_rejects_joint_responses() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "UseFullHERG": true,
        "MaCOHpiTweakDefinition": "[1.0, 2.0]",
        "R0COHpiTweakDefinition": "[3.0, 2.0]"
    }));

    // A single value has no reading across a multi-dial joint group.
    let coh_id = set.syst_meta_data().by_name("COHVariationResponse").unwrap().syst_param_id;
    let err = set.event_weight_response(&event(), &[(coh_id, 1.0)]).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "unexpected error: {}", err);
}

#[test]
fn test_failed_ad_hoc_query_still_poisons_reduced_mode_dispatch() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "MaCCQETweakDefinition": "[-1, 0, 1]",
        "MaNCELTweakDefinition": "[0.9, 1.0, 1.1]"
    }));

    // MaNCEL is a responseless dependent: it is present in the merged
    // metadata but carries no weight of its own, so the query fails after
    // the MaCCQE engine was already reconfigured.
    let ma_id = set.syst_meta_data().by_name("MaCCQE").unwrap().syst_param_id;
    let dep_id = set.syst_meta_data().by_name("MaNCEL").unwrap().syst_param_id;
    assert!(set.event_weight_response(&event(), &[(ma_id, 5.0), (dep_id, 1.0)]).is_err());

    let err = set.event_responses(&event()).unwrap_err();
    assert!(matches!(err, Error::StaleEngineState(_)), "unexpected error: {}", err);
}

#[test]
fn test_ad_hoc_query_poisons_reduced_mode_dispatch() {
    let mut set = linear_set(json!({
        "tool_type": "GENIEReWeight",
        "MaCCQETweakDefinition": "[-1, 0, 1]"
    }));

    // Reduced mode works before the ad hoc query...
    set.event_responses(&event()).unwrap();

    let ma_id = set.syst_meta_data().by_name("MaCCQE").unwrap().syst_param_id;
    set.event_weight_response(&event(), &[(ma_id, 0.5)]).unwrap();

    // ...and fails fast afterwards.
    let err = set.event_responses(&event()).unwrap_err();
    assert!(matches!(err, Error::StaleEngineState(_)), "unexpected error: {}", err);
}
