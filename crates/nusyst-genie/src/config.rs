//! Declarative tool configuration.
//!
//! A tool configuration is one JSON object per provider instance. Dials are
//! requested through `<Name>NominalValue` / `<Name>TweakDefinition` key
//! pairs; a handful of provider-global options control throw counts and
//! engine instantiation.

use serde_json::{Map, Value};

use nusyst_core::{Error, Result};

/// Typed accessor over one provider's JSON configuration object.
#[derive(Debug, Clone, Default)]
pub struct ToolConfig {
    values: Map<String, Value>,
}

impl ToolConfig {
    /// Wrap a JSON value; must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(Error::Validation(format!(
                "tool configuration must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a JSON object from a string.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// True if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number read for `key`, if present; wrong types are configuration
    /// errors, never defaults.
    pub fn f64_opt(&self, key: &str) -> Result<Option<f64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| type_error(key, "a number", v)),
        }
    }

    /// Boolean read for `key`, if present.
    pub fn bool_opt(&self, key: &str) -> Result<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| type_error(key, "a boolean", v)),
        }
    }

    /// Boolean read for `key` with a default.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.bool_opt(key)?.unwrap_or(default))
    }

    /// Unsigned-integer read for `key` with a default.
    pub fn u64_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.values.get(key) {
            None => Ok(default),
            Some(v) => v.as_u64().ok_or_else(|| type_error(key, "an unsigned integer", v)),
        }
    }

    /// String read for `key`, if present.
    pub fn str_opt(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => v.as_str().map(Some).ok_or_else(|| type_error(key, "a string", v)),
        }
    }

    /// The required `tool_type` provider selector.
    pub fn tool_type(&self) -> Result<&str> {
        self.str_opt("tool_type")?
            .ok_or_else(|| Error::Validation("tool configuration has no 'tool_type' key".into()))
    }

    /// `<dial>NominalValue`, if specified.
    pub fn nominal(&self, dial: &str) -> Result<Option<f64>> {
        self.f64_opt(&format!("{dial}NominalValue"))
    }

    /// `<dial>TweakDefinition`, empty by default.
    pub fn tweak_definition(&self, dial: &str) -> Result<String> {
        Ok(self.str_opt(&format!("{dial}TweakDefinition"))?.unwrap_or("").to_string())
    }

    /// A dial is requested when either its nominal value or its tweak
    /// definition was supplied.
    pub fn dial_used(&self, dial: &str) -> bool {
        self.contains(&format!("{dial}NominalValue"))
            || self.contains(&format!("{dial}TweakDefinition"))
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn type_error(key: &str, expected: &str, got: &Value) -> Error {
    Error::Validation(format!("key '{}' must be {}, got {}", key, expected, json_kind(got)))
}

/// Provider-global options, read once per provider at configuration time.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// Kinematic quantities are in natural units.
    pub units_are_natural: bool,
    /// Number of Gaussian throws generated per randomly-thrown dial.
    pub number_of_throws: usize,
    /// Build one engine instance per variation up front (memory for speed)
    /// instead of one shared, per-event-reconfigured instance.
    pub use_full_herg: bool,
    /// Switch response/dependent coupling off: every dependent dial becomes
    /// standalone.
    pub ignore_parameter_dependence: bool,
    /// Seed of the per-configuration random engine.
    pub seed: u64,
}

impl GlobalOptions {
    /// Read the global option keys with their documented defaults.
    pub fn from_config(cfg: &ToolConfig) -> Result<Self> {
        Ok(Self {
            units_are_natural: cfg.bool_or("unitsAreNatural", false)?,
            number_of_throws: cfg.u64_or("numberOfThrows", 0)? as usize,
            use_full_herg: cfg.bool_or("UseFullHERG", false)?,
            ignore_parameter_dependence: cfg.bool_or("ignore_parameter_dependence", false)?,
            seed: cfg.u64_or("seed", 0)?,
        })
    }
}

/// Split a top-level configuration document into per-provider tool configs.
///
/// Accepts either a JSON array of tool objects, an object carrying a
/// `syst_providers` array, or a single tool object.
pub fn tool_configs_from_json(text: &str) -> Result<Vec<ToolConfig>> {
    let value: Value = serde_json::from_str(text)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("syst_providers") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(Error::Validation(format!(
                    "'syst_providers' must be an array, got {}",
                    json_kind(&other)
                )));
            }
            None => vec![Value::Object(map)],
        },
        other => {
            return Err(Error::Validation(format!(
                "configuration document must be an object or array, got {}",
                json_kind(&other)
            )));
        }
    };
    entries.into_iter().map(ToolConfig::from_value).collect()
}
