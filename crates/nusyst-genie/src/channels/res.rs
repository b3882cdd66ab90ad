//! Resonance-production channel.
//!
//! The CC and NC resonance axial/vector masses are jointly coupled, one
//! response each. The 16 non-resonant background dials are independent:
//! each gets its own standalone parameter.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, standalone, DialDef};

const TABLE: &[DialDef] = &[
    joint("MaCCRES", "CCRESVariationResponse"),
    joint("MvCCRES", "CCRESVariationResponse"),
    joint("MaNCRES", "NCRESVariationResponse"),
    joint("MvNCRES", "NCRESVariationResponse"),
    // {nu, nubar} x {p, n} x {CC, NC} x {1pi, 2pi}
    standalone("NonRESBGvpCC1pi"),
    standalone("NonRESBGvpCC2pi"),
    standalone("NonRESBGvpNC1pi"),
    standalone("NonRESBGvpNC2pi"),
    standalone("NonRESBGvnCC1pi"),
    standalone("NonRESBGvnCC2pi"),
    standalone("NonRESBGvnNC1pi"),
    standalone("NonRESBGvnNC2pi"),
    standalone("NonRESBGvbarpCC1pi"),
    standalone("NonRESBGvbarpCC2pi"),
    standalone("NonRESBGvbarpNC1pi"),
    standalone("NonRESBGvbarpNC2pi"),
    standalone("NonRESBGvbarnCC1pi"),
    standalone("NonRESBGvbarnCC2pi"),
    standalone("NonRESBGvbarnNC1pi"),
    standalone("NonRESBGvbarnNC2pi"),
    standalone("RDecBR1gamma"),
    standalone("RDecBR1eta"),
    standalone("Theta_Delta2Npi"),
];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    let mut meta = build_channel("res", TABLE, cfg, opts, first_id, rng)?;

    // Channel-level shape flags apply to the joint mass dials.
    for (flag, dials) in [
        ("CCRESIsShapeOnly", ["MaCCRES", "MvCCRES"]),
        ("NCRESIsShapeOnly", ["MaNCRES", "MvNCRES"]),
    ] {
        if cfg.bool_or(flag, false)? {
            for dial in dials {
                if let Some(idx) = meta.index_of_name(dial) {
                    if let Some(h) = meta.get_mut(idx) {
                        h.opts.push("shape".to_string());
                    }
                }
            }
        }
    }

    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_joint_masses_and_standalone_backgrounds() {
        let cfg = ToolConfig::from_value(json!({
            "MaCCRESTweakDefinition": "[-1,0,1]",
            "MvCCRESTweakDefinition": "[-1,0,1]",
            "CCRESIsShapeOnly": true,
            "NonRESBGvpCC1piTweakDefinition": "[0.5,1.0,1.5]",
            "NonRESBGvbarnNC2piTweakDefinition": "[0.5,1.5]"
        }))
        .unwrap();
        let opts = GlobalOptions::from_config(&cfg).unwrap();
        let mut id = 0;
        let mut rng = StdRng::seed_from_u64(0);
        let meta = build(&cfg, &opts, &mut id, &mut rng).unwrap();

        let response = meta.by_name("CCRESVariationResponse").unwrap();
        assert_eq!(response.variations.len(), 3);
        assert!(meta.by_name("MaCCRES").unwrap().is_responseless);
        assert!(meta.by_name("MaCCRES").unwrap().opts.contains(&"shape".to_string()));

        // Non-resonant backgrounds are not response-coupled, and the two
        // dials may legally have different variation counts.
        assert!(!meta.by_name("NonRESBGvpCC1pi").unwrap().is_responseless);
        assert!(!meta.by_name("NonRESBGvbarnNC2pi").unwrap().is_responseless);
        assert!(meta.by_name("NCRESVariationResponse").is_none());

        meta.validate().unwrap();
    }
}
