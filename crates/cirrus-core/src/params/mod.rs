//! Parameter filtering against declared signatures
//!
//! Provider constructors and operations declare which option keys they accept
//! through a [`Signature`]. [`filter_params`] reduces an open option map to
//! those keys so callers can hand one map to several targets that each accept
//! a different subset.

use crate::error::{CirrusError, CirrusResult};
use serde_json::{Map, Value};

/// Open, provider-defined option map
pub type Options = Map<String, Value>;

/// What a target accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    /// Only the listed parameter names
    Named(&'static [&'static str]),
    /// The listed names plus any other key
    AnyKey(&'static [&'static str]),
    /// The target does not expose its parameters
    Opaque,
}

/// Declared parameter list of a constructor or operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Name used in diagnostics
    pub target: &'static str,
    /// Accepted parameters
    pub accepts: Accepts,
}

impl Signature {
    /// Signature accepting exactly `params`
    pub const fn new(target: &'static str, params: &'static [&'static str]) -> Self {
        Self {
            target,
            accepts: Accepts::Named(params),
        }
    }

    /// Signature accepting `params` and any additional keyword
    pub const fn with_extra(target: &'static str, params: &'static [&'static str]) -> Self {
        Self {
            target,
            accepts: Accepts::AnyKey(params),
        }
    }

    /// Signature that cannot be introspected
    pub const fn opaque(target: &'static str) -> Self {
        Self {
            target,
            accepts: Accepts::Opaque,
        }
    }

    /// Explicitly declared parameter names
    pub fn params(&self) -> &'static [&'static str] {
        match self.accepts {
            Accepts::Named(params) | Accepts::AnyKey(params) => params,
            Accepts::Opaque => &[],
        }
    }

    /// Check whether `key` would survive filtering
    pub fn accepts(&self, key: &str) -> bool {
        match self.accepts {
            Accepts::Named(params) => params.contains(&key),
            Accepts::AnyKey(_) => true,
            Accepts::Opaque => false,
        }
    }
}

/// Something built from a filtered option map
pub trait FromOptions: Sized {
    /// Parameters accepted by [`FromOptions::from_options`]
    fn signature() -> Signature;

    /// Construct from options already reduced to [`FromOptions::signature`]
    fn from_options(options: Options) -> CirrusResult<Self>;
}

/// Return the entries of `options` that `signature` accepts.
///
/// When the target accepts arbitrary keys, every entry is returned unchanged.
/// Opaque targets fail with [`CirrusError::Introspection`].
pub fn filter_params(signature: &Signature, options: &Options) -> CirrusResult<Options> {
    match signature.accepts {
        Accepts::Opaque => Err(CirrusError::introspection(signature.target)),
        Accepts::AnyKey(_) => Ok(options.clone()),
        Accepts::Named(params) => Ok(options
            .iter()
            .filter(|(key, _)| params.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()),
    }
}

/// Convert a JSON object into an option map
pub fn to_options(value: Value) -> CirrusResult<Options> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CirrusError::config(format!(
            "Options must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AB: Signature = Signature::new("target", &["a", "b"]);

    fn opts(value: Value) -> Options {
        to_options(value).unwrap()
    }

    #[test]
    fn test_filter_keeps_only_declared_keys() {
        let filtered = filter_params(&AB, &opts(json!({"a": 1, "b": 2, "c": 3}))).unwrap();
        assert_eq!(Value::Object(filtered), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_filter_missing_keys_are_not_invented() {
        let filtered = filter_params(&AB, &opts(json!({"b": "x", "z": null}))).unwrap();
        assert_eq!(Value::Object(filtered), json!({"b": "x"}));
    }

    #[test]
    fn test_filter_with_extra_returns_everything() {
        let sig = Signature::with_extra("kw", &["a"]);
        let input = opts(json!({"a": 1, "c": [1, 2]}));
        let filtered = filter_params(&sig, &input).unwrap();
        assert_eq!(filtered, input);
        assert!(sig.accepts("anything"));
    }

    #[test]
    fn test_filter_opaque_fails() {
        let sig = Signature::opaque("native_fn");
        let err = filter_params(&sig, &opts(json!({"a": 1}))).unwrap_err();
        assert_eq!(
            err,
            CirrusError::Introspection {
                target: "native_fn".to_string()
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let input = opts(json!({"a": 1, "c": 3}));
        let _ = filter_params(&AB, &input).unwrap();
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_to_options_rejects_non_objects() {
        let err = to_options(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
