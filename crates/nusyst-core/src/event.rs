//! Simulated-event record consumed by the dispatch layer.
//!
//! The core only ever reads this record; it is produced by the external
//! event source and passed through to the weight calculators.

use serde::{Deserialize, Serialize};

/// Process classification of one simulated interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionChannel {
    /// (Quasi-)elastic scattering off a single nucleon.
    QuasiElastic,
    /// Resonance production.
    Resonant,
    /// Deep-inelastic scattering.
    DeepInelastic,
    /// Coherent pion production.
    Coherent,
    /// Meson-exchange current (2p2h).
    Mec,
}

/// One simulated interaction, read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Process classification.
    pub channel: InteractionChannel,
    /// Charged-current (true) vs neutral-current (false).
    pub is_cc: bool,
    /// Incoming-lepton four-momentum (E, px, py, pz) in GeV.
    pub probe_p4: [f64; 4],
    /// Outgoing-lepton four-momentum (E, px, py, pz) in GeV.
    pub fs_lepton_p4: [f64; 4],
    /// Struck-nucleon four-momentum (E, px, py, pz) in GeV.
    pub target_nucleon_p4: [f64; 4],
}

impl EventRecord {
    /// Energy transfer q0 = E_nu - E_lep.
    pub fn energy_transfer(&self) -> f64 {
        self.probe_p4[0] - self.fs_lepton_p4[0]
    }

    /// Four-momentum transfer Q^2 = -q.q.
    pub fn q2(&self) -> f64 {
        let q: Vec<f64> =
            (0..4).map(|i| self.probe_p4[i] - self.fs_lepton_p4[i]).collect();
        -(q[0] * q[0] - q[1] * q[1] - q[2] * q[2] - q[3] * q[3])
    }

    /// Free-form one-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "{:?} {} E_nu={:.3} GeV q0={:.3} GeV Q2={:.3} GeV^2",
            self.channel,
            if self.is_cc { "CC" } else { "NC" },
            self.probe_p4[0],
            self.energy_transfer(),
            self.q2()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ccqe_event() -> EventRecord {
        EventRecord {
            channel: InteractionChannel::QuasiElastic,
            is_cc: true,
            probe_p4: [1.0, 0.0, 0.0, 1.0],
            fs_lepton_p4: [0.7, 0.1, 0.0, 0.65],
            target_nucleon_p4: [0.94, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_kinematic_queries() {
        let ev = ccqe_event();
        assert_relative_eq!(ev.energy_transfer(), 0.3, epsilon = 1e-12);
        assert!(ev.q2() > 0.0);
        assert!(ev.summary().contains("CC"));
    }
}
