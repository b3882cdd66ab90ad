//! Weight-engine (HERG) seam.
//!
//! The external reweighting engine is a stateful, mutable resource: a
//! `calc_weight` result reflects the dial values in force at the most
//! recent `reconfigure()`. Engine instances are made through an injected
//! factory so configuration code never names a concrete engine and tests
//! can substitute a recording implementation.

use std::collections::BTreeMap;

use nusyst_core::EventRecord;

/// One external reweighting-engine handle.
pub trait HergEngine: Send {
    /// Attach the named physics calculator. Attaching the same calculator
    /// twice is a no-op.
    fn attach_calculator(&mut self, name: &str);

    /// Stage a dial value; takes effect at the next `reconfigure()`.
    fn set_dial(&mut self, dial: &str, value: f64);

    /// Commit staged dial values.
    fn reconfigure(&mut self);

    /// Weight of one event under the committed dial values.
    fn calc_weight(&self, event: &EventRecord) -> f64;
}

/// Factory for engine handles, injected at provider construction.
pub trait HergEngineFactory: Send {
    /// Make a fresh engine instance with no calculators attached.
    fn make(&self) -> Box<dyn HergEngine>;
}

/// Engine that weights every event at 1.0; backs dry-run configuration
/// validation where no generator libraries are loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl HergEngine for NullEngine {
    fn attach_calculator(&mut self, _name: &str) {}

    fn set_dial(&mut self, _dial: &str, _value: f64) {}

    fn reconfigure(&mut self) {}

    fn calc_weight(&self, _event: &EventRecord) -> f64 {
        1.0
    }
}

/// Factory for [`NullEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngineFactory;

impl HergEngineFactory for NullEngineFactory {
    fn make(&self) -> Box<dyn HergEngine> {
        Box::new(NullEngine)
    }
}

/// Deterministic diagnostic engine: the weight is `∏ (1 + v/10)` over the
/// committed dial values. Honors the stage/commit protocol, so it also
/// checks that callers reconfigure before weighting.
#[derive(Debug, Clone, Default)]
pub struct LinearEngine {
    attached: Vec<String>,
    staged: BTreeMap<String, f64>,
    committed: BTreeMap<String, f64>,
}

impl LinearEngine {
    /// Calculators attached so far, in attachment order.
    pub fn attached(&self) -> &[String] {
        &self.attached
    }

    /// Committed value of `dial`, if any.
    pub fn committed(&self, dial: &str) -> Option<f64> {
        self.committed.get(dial).copied()
    }
}

impl HergEngine for LinearEngine {
    fn attach_calculator(&mut self, name: &str) {
        if !self.attached.iter().any(|n| n == name) {
            self.attached.push(name.to_string());
        }
    }

    fn set_dial(&mut self, dial: &str, value: f64) {
        self.staged.insert(dial.to_string(), value);
    }

    fn reconfigure(&mut self) {
        self.committed = self.staged.clone();
    }

    fn calc_weight(&self, _event: &EventRecord) -> f64 {
        self.committed.values().fold(1.0, |w, v| w * (1.0 + v / 10.0))
    }
}

/// Factory for [`LinearEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEngineFactory;

impl HergEngineFactory for LinearEngineFactory {
    fn make(&self) -> Box<dyn HergEngine> {
        Box::new(LinearEngine::default())
    }
}

/// The physics calculator each dial needs attached to its engine.
pub fn calculator_for_dial(dial: &str) -> Option<&'static str> {
    let calc = match dial {
        "NormCCQE" | "MaCCQE" | "ZNormCCQE" | "ZExpA1CCQE" | "ZExpA2CCQE" | "ZExpA3CCQE"
        | "ZExpA4CCQE" => "xsec_ccqe",
        "AxFFCCQEshape" => "xsec_ccqe_axial",
        "VecFFCCQEshape" => "xsec_ccqe_vec",
        "MaNCEL" | "EtaNCEL" => "xsec_ncel",
        "MaCCRES" | "MvCCRES" => "xsec_ccres",
        "MaNCRES" | "MvNCRES" => "xsec_ncres",
        "RDecBR1gamma" | "RDecBR1eta" | "Theta_Delta2Npi" => "hadro_res_decay",
        "MaCOHpi" | "R0COHpi" => "xsec_coh",
        "AhtBY" | "BhtBY" | "CV1uBY" | "CV2uBY" => "xsec_dis",
        "AGKYxF1pi" | "AGKYpT1pi" => "hadro_agky",
        "FormZone" => "hadro_fzone",
        "CCQEPauliSupViaKF" | "CCQEMomDistroFGtoSF" => "nuclear_qe",
        d if d.starts_with("NonRESBG") => "xsec_nonresbkg",
        d if d.starts_with("MFP_") || d.starts_with("Fr") => "hadro_intranuke",
        _ => return None,
    };
    Some(calc)
}
