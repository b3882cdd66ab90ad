//! Final-state-interaction channel: the pion and nucleon intranuclear
//! fate fractions each form one jointly-coupled response.

use rand::rngs::StdRng;

use nusyst_core::{Result, SystMetaData};

use crate::config::{GlobalOptions, ToolConfig};

use super::{build_channel, joint, DialDef};

const TABLE: &[DialDef] = &[
    joint("MFP_pi", "FSI_pi_VariationResponse"),
    joint("FrCEx_pi", "FSI_pi_VariationResponse"),
    joint("FrElas_pi", "FSI_pi_VariationResponse"),
    joint("FrInel_pi", "FSI_pi_VariationResponse"),
    joint("FrAbs_pi", "FSI_pi_VariationResponse"),
    joint("FrPiProd_pi", "FSI_pi_VariationResponse"),
    joint("MFP_N", "FSI_N_VariationResponse"),
    joint("FrCEx_N", "FSI_N_VariationResponse"),
    joint("FrElas_N", "FSI_N_VariationResponse"),
    joint("FrInel_N", "FSI_N_VariationResponse"),
    joint("FrAbs_N", "FSI_N_VariationResponse"),
    joint("FrPiProd_N", "FSI_N_VariationResponse"),
];

pub(crate) fn build(
    cfg: &ToolConfig,
    opts: &GlobalOptions,
    first_id: &mut usize,
    rng: &mut StdRng,
) -> Result<SystMetaData> {
    build_channel("fsi", TABLE, cfg, opts, first_id, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_pion_and_nucleon_groups_are_separate() {
        let cfg = ToolConfig::from_value(json!({
            "MFP_piTweakDefinition": "[-1,0,1]",
            "FrAbs_piTweakDefinition": "[-1,0,1]",
            "MFP_NTweakDefinition": "[-1,1]",
            "FrCEx_NTweakDefinition": "[-1,1]"
        }))
        .unwrap();
        let opts = GlobalOptions::from_config(&cfg).unwrap();
        let mut id = 0;
        let mut rng = StdRng::seed_from_u64(0);
        let meta = build(&cfg, &opts, &mut id, &mut rng).unwrap();

        let pi = meta.by_name("FSI_pi_VariationResponse").unwrap();
        let n = meta.by_name("FSI_N_VariationResponse").unwrap();
        assert_eq!(pi.variations.len(), 3);
        assert_eq!(n.variations.len(), 2);
        assert_eq!(
            meta.by_name("MFP_pi").unwrap().response_param_id,
            Some(pi.syst_param_id)
        );
        assert_eq!(meta.by_name("MFP_N").unwrap().response_param_id, Some(n.syst_param_id));
    }
}
