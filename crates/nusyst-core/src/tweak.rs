//! Tweak-definition grammar.
//!
//! The sole text surface for specifying how a dial is varied:
//!
//! - `""`: use the central value only (pure correction)
//! - `(k1,k2,...)`: spline knots
//! - `[v1,v2,...]`: explicit discrete tweak values
//! - `{s}` or `{lo,hi}`: Gaussian one-sigma shift(s), variations are thrown
//!
//! Anything else is a configuration error; malformed numbers never default.

use crate::{Error, ParameterHeader, Result};

fn parse_double_list(name: &str, inner: &str) -> Result<Vec<f64>> {
    inner
        .split(',')
        .map(|tok| {
            let tok = tok.trim();
            tok.parse::<f64>().map_err(|_| {
                Error::InvalidTweakDefinition(format!(
                    "{}: cannot parse '{}' as a number",
                    name, tok
                ))
            })
        })
        .collect()
}

impl ParameterHeader {
    /// Build a header from a tweak-definition string and an optional nominal
    /// value.
    ///
    /// The string is trimmed, then exactly one leading and one trailing
    /// delimiter character are stripped and the leading one selects the
    /// variation form.
    pub fn from_tweak_definition(
        name: &str,
        definition: &str,
        nominal: Option<f64>,
    ) -> Result<Self> {
        let mut header = ParameterHeader::new(name);
        header.central_value = nominal;

        let def = definition.trim();
        if def.is_empty() {
            header.is_correction = true;
            return Ok(header);
        }

        if def.len() < 2 || !def.is_char_boundary(1) || !def.is_char_boundary(def.len() - 1) {
            return Err(Error::InvalidTweakDefinition(format!(
                "{}: malformed tweak definition '{}'",
                name, def
            )));
        }
        let inner = &def[1..def.len() - 1];

        match def.as_bytes()[0] {
            b'(' => {
                header.variations = parse_double_list(name, inner)?;
                header.is_splineable = true;
            }
            b'[' => {
                header.variations = parse_double_list(name, inner)?;
            }
            b'{' => {
                let shifts = parse_double_list(name, inner)?;
                header.one_sigma_shifts = match shifts.as_slice() {
                    [s] => (-s, *s),
                    [lo, hi] => (*lo, *hi),
                    _ => {
                        return Err(Error::InvalidTweakDefinition(format!(
                            "{}: expected 1 or 2 one-sigma shifts, got {}",
                            name,
                            shifts.len()
                        )));
                    }
                };
                header.is_randomly_thrown = true;
            }
            _ => {
                return Err(Error::InvalidTweakDefinition(format!(
                    "{}: unrecognized tweak definition '{}'",
                    name, def
                )));
            }
        }

        Ok(header)
    }
}
