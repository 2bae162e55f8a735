//! Narrowing of loosely-typed tool arguments
//!
//! Every lookup has three outcomes: the value is present with the expected
//! type, it is absent (`null` counts as absent), or it is present with the
//! wrong type. Required lookups turn absence into [`ArgError::Missing`].

use serde_json::{Map, Value};
use thiserror::Error;

pub type Args = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("missing required argument '{field}'")]
    Missing { field: String },

    #[error("argument '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

impl ArgError {
    pub fn field(&self) -> &str {
        match self {
            ArgError::Missing { field } | ArgError::WrongType { field, .. } => field,
        }
    }
}

fn present<'a>(args: &'a Args, field: &str) -> Option<&'a Value> {
    args.get(field).filter(|v| !v.is_null())
}

fn wrong_type(field: &str, expected: &'static str) -> ArgError {
    ArgError::WrongType {
        field: field.to_string(),
        expected,
    }
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, ArgError> {
    value.ok_or_else(|| ArgError::Missing {
        field: field.to_string(),
    })
}

pub fn optional_str(args: &Args, field: &str) -> Result<Option<String>, ArgError> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(field, "a string")),
    }
}

pub fn required_str(args: &Args, field: &str) -> Result<String, ArgError> {
    require(field, optional_str(args, field)?)
}

pub fn optional_bool(args: &Args, field: &str) -> Result<Option<bool>, ArgError> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(wrong_type(field, "a boolean")),
    }
}

/// Non-negative integer; JSON floats with no fractional part are accepted
pub fn optional_u32(args: &Args, field: &str) -> Result<Option<u32>, ArgError> {
    let Some(value) = present(args, field) else {
        return Ok(None);
    };
    let number = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .ok_or_else(|| wrong_type(field, "a non-negative integer"))?;
    u32::try_from(number)
        .map(Some)
        .map_err(|_| wrong_type(field, "a non-negative integer"))
}

pub fn optional_object<'a>(args: &'a Args, field: &str) -> Result<Option<&'a Args>, ArgError> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(wrong_type(field, "an object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Args {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_three_outcomes() {
        let a = args(json!({"title": "Plan", "count": "3"}));
        assert_eq!(required_str(&a, "title").unwrap(), "Plan");
        assert_eq!(
            required_str(&a, "parentId"),
            Err(ArgError::Missing {
                field: "parentId".to_string()
            })
        );
        assert!(matches!(
            optional_u32(&a, "count"),
            Err(ArgError::WrongType { .. })
        ));
        assert_eq!(optional_str(&a, "query").unwrap(), None);
    }

    #[test]
    fn test_null_is_absent() {
        let a = args(json!({"title": null}));
        assert!(matches!(
            required_str(&a, "title"),
            Err(ArgError::Missing { .. })
        ));
        assert_eq!(optional_bool(&a, "title").unwrap(), None);
    }

    #[test]
    fn test_integer_forms() {
        let a = args(json!({"a": 25, "b": 25.0, "c": 2.5, "d": -1}));
        assert_eq!(optional_u32(&a, "a").unwrap(), Some(25));
        assert_eq!(optional_u32(&a, "b").unwrap(), Some(25));
        assert!(optional_u32(&a, "c").is_err());
        assert!(optional_u32(&a, "d").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let a = args(json!({"archived": "yes"}));
        let err = optional_bool(&a, "archived").unwrap_err();
        assert_eq!(err.field(), "archived");
        assert_eq!(err.to_string(), "argument 'archived' must be a boolean");
    }
}
