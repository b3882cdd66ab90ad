//! Dial-to-engine association.

use std::fmt;

use nusyst_core::{Error, Result, SystMetaData};

use crate::herg::HergEngine;

/// One response-or-standalone parameter wired to its engine instances.
///
/// `engines` holds one pre-configured handle per variation in full mode, or
/// a single shared handle that is reconfigured per event per universe in
/// reduced mode. The handles are owned exclusively by this structure.
pub struct GenieResponseParameter {
    /// Metadata index of the response or standalone parameter.
    pub pidx: usize,
    /// (external dial tag, dependent metadata index) pairs; for a standalone
    /// dial this is the dial itself.
    pub dependents: Vec<(String, usize)>,
    /// Engine handles, one per universe or a single shared one.
    pub engines: Vec<Box<dyn HergEngine>>,
}

impl fmt::Debug for GenieResponseParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenieResponseParameter")
            .field("pidx", &self.pidx)
            .field("dependents", &self.dependents)
            .field("engines", &self.engines.len())
            .finish()
    }
}

/// Merge `source` into `target`, rejecting entries that address a parameter
/// already present.
pub fn merge_response_parameters(
    target: &mut Vec<GenieResponseParameter>,
    source: Vec<GenieResponseParameter>,
    meta: &SystMetaData,
) -> Result<()> {
    for entry in source {
        if target.iter().any(|t| t.pidx == entry.pidx) {
            let name = meta
                .get(entry.pidx)
                .map(|h| h.pretty_name.as_str())
                .unwrap_or("<unknown>");
            return Err(Error::DuplicateParameter(format!(
                "response parameter '{}' (index {}) attached twice",
                name, entry.pidx
            )));
        }
        target.push(entry);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusyst_core::ParameterHeader;

    fn entry(pidx: usize) -> GenieResponseParameter {
        GenieResponseParameter { pidx, dependents: Vec::new(), engines: Vec::new() }
    }

    #[test]
    fn test_merge_rejects_pidx_collision() {
        let mut meta = SystMetaData::new();
        let mut h = ParameterHeader::new("MaCCQE");
        h.syst_param_id = 0;
        meta.push(h);

        let mut target = vec![entry(0)];
        let err = merge_response_parameters(&mut target, vec![entry(0)], &meta).unwrap_err();
        assert!(err.to_string().contains("MaCCQE"), "unexpected error: {}", err);

        merge_response_parameters(&mut target, vec![entry(1)], &meta).unwrap();
        assert_eq!(target.len(), 2);
    }
}
