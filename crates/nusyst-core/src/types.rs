//! Parameter-header data model
//!
//! A `ParameterHeader` describes one tunable systematic dial: its identity,
//! central value, the variations it is evaluated at, and the flags governing
//! how those variations were produced. `SystMetaData` is the ordered,
//! registration-order collection of headers built once per provider during
//! configuration and read-only during event processing.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_true() -> bool {
    true
}

/// One tunable systematic dial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterHeader {
    /// Human-readable name, unique within a provider.
    pub pretty_name: String,

    /// Globally unique id, assigned monotonically at configuration time and
    /// immutable afterwards.
    pub syst_param_id: usize,

    /// Nominal value. `None` means the configuration did not specify one,
    /// which is distinct from an explicit zero.
    pub central_value: Option<f64>,

    /// Values at which this dial is evaluated for one event. Order is
    /// significant: index = universe number.
    #[serde(default)]
    pub variations: Vec<f64>,

    /// Asymmetric (lower, upper) one-sigma widths; only meaningful when
    /// `is_randomly_thrown`.
    #[serde(default)]
    pub one_sigma_shifts: (f64, f64),

    /// Pure multiplicative correction: evaluated at the central value only.
    #[serde(default)]
    pub is_correction: bool,

    /// Variations are spline knots rather than discrete points.
    #[serde(default)]
    pub is_splineable: bool,

    /// Variations were Monte-Carlo sampled from `one_sigma_shifts`.
    #[serde(default)]
    pub is_randomly_thrown: bool,

    /// This dial carries no weight of its own; it only feeds the response
    /// parameter named by `response_param_id`.
    #[serde(default)]
    pub is_responseless: bool,

    /// False marks non-multiplicative (shift-type) systematics.
    #[serde(default = "default_true")]
    pub is_weight_systematic: bool,

    /// Owning response parameter's id; set iff `is_responseless`.
    #[serde(default)]
    pub response_param_id: Option<usize>,

    /// Provider-specific options, flag-style or `key=value` encoded.
    #[serde(default)]
    pub opts: Vec<String>,
}

impl ParameterHeader {
    /// New header with default flags and no variations.
    pub fn new(pretty_name: impl Into<String>) -> Self {
        Self {
            pretty_name: pretty_name.into(),
            syst_param_id: 0,
            central_value: None,
            variations: Vec::new(),
            one_sigma_shifts: (0.0, 0.0),
            is_correction: false,
            is_splineable: false,
            is_randomly_thrown: false,
            is_responseless: false,
            is_weight_systematic: true,
            response_param_id: None,
            opts: Vec::new(),
        }
    }

    /// Central value, treating an unspecified nominal as zero.
    pub fn central_or_zero(&self) -> f64 {
        self.central_value.unwrap_or(0.0)
    }

    /// Number of weights this parameter produces per event.
    pub fn n_variations(&self) -> usize {
        if self.is_correction { 1 } else { self.variations.len() }
    }
}

/// Ordered collection of parameter headers (insertion order = registration
/// order), indexable by position and searchable by name or id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystMetaData {
    headers: Vec<ParameterHeader>,
}

impl SystMetaData {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// True if no headers are registered.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Registered headers in registration order.
    pub fn headers(&self) -> &[ParameterHeader] {
        &self.headers
    }

    /// Iterate headers in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterHeader> {
        self.headers.iter()
    }

    /// Header at position `idx`.
    pub fn get(&self, idx: usize) -> Option<&ParameterHeader> {
        self.headers.get(idx)
    }

    /// Mutable header at position `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut ParameterHeader> {
        self.headers.get_mut(idx)
    }

    /// Append a header.
    pub fn push(&mut self, header: ParameterHeader) {
        self.headers.push(header);
    }

    /// Position of the header named `name`.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.pretty_name == name)
    }

    /// Position of the header with id `id`.
    pub fn index_of_id(&self, id: usize) -> Option<usize> {
        self.headers.iter().position(|h| h.syst_param_id == id)
    }

    /// Header named `name`.
    pub fn by_name(&self, name: &str) -> Option<&ParameterHeader> {
        self.index_of_name(name).and_then(|i| self.get(i))
    }

    /// Header with id `id`.
    pub fn by_id(&self, id: usize) -> Option<&ParameterHeader> {
        self.index_of_id(id).and_then(|i| self.get(i))
    }

    /// True if a header with this id is registered.
    pub fn contains_id(&self, id: usize) -> bool {
        self.headers.iter().any(|h| h.syst_param_id == id)
    }

    /// Append all of `other`'s headers.
    ///
    /// Ids were allocated globally and must already be disjoint; a collision
    /// is a configuration error, not something to remap.
    pub fn extend(&mut self, other: SystMetaData) -> Result<()> {
        for header in other.headers {
            if self.contains_id(header.syst_param_id) {
                return Err(Error::DuplicateParameter(format!(
                    "parameter '{}' collides on id {}",
                    header.pretty_name, header.syst_param_id
                )));
            }
            self.headers.push(header);
        }
        Ok(())
    }

    /// Check the collection-level invariants: unique ids, responseless
    /// headers point at an existing non-responseless header, and spline-able
    /// headers are never responseless.
    pub fn validate(&self) -> Result<()> {
        for (i, h) in self.headers.iter().enumerate() {
            for other in &self.headers[i + 1..] {
                if other.syst_param_id == h.syst_param_id {
                    return Err(Error::DuplicateParameter(format!(
                        "parameters '{}' and '{}' share id {}",
                        h.pretty_name, other.pretty_name, h.syst_param_id
                    )));
                }
            }

            if h.is_splineable && h.is_responseless {
                return Err(Error::SplineOnMultiParamResponse(h.pretty_name.clone()));
            }

            if h.is_responseless {
                let rid = h.response_param_id.ok_or_else(|| {
                    Error::Validation(format!(
                        "responseless parameter '{}' has no response id",
                        h.pretty_name
                    ))
                })?;
                let response = self.by_id(rid).ok_or_else(|| {
                    Error::Validation(format!(
                        "responseless parameter '{}' points at unknown id {}",
                        h.pretty_name, rid
                    ))
                })?;
                if response.is_responseless {
                    return Err(Error::Validation(format!(
                        "response parameter '{}' of '{}' is itself responseless",
                        response.pretty_name, h.pretty_name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Per-event weights for one response-or-standalone parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterResponse {
    /// The parameter's `syst_param_id`.
    pub param_id: usize,
    /// One weight per variation, in universe order (exactly one for
    /// corrections).
    pub weights: Vec<f64>,
}

/// Per-event output of one provider: one entry per evaluated response or
/// standalone parameter, in registration order. Created fresh per event and
/// consumed immediately by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventResponse {
    /// Parameter responses in registration order.
    pub responses: Vec<ParameterResponse>,
}

impl EventResponse {
    /// Number of parameter entries.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// True if no parameter produced weights.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Weights for parameter `param_id`, if evaluated for this event.
    pub fn weights_for(&self, param_id: usize) -> Option<&[f64]> {
        self.responses.iter().find(|r| r.param_id == param_id).map(|r| r.weights.as_slice())
    }
}
