//! Kubernetes-flavoured template filters

use base64::Engine as _;
use minijinja::{Error, ErrorKind, Value};
use sha2::{Digest, Sha256};

/// Convert a value to YAML format
///
/// Usage: {{ values.config | toyaml }}
pub fn toyaml(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    let yaml = serde_yaml::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    Ok(yaml.trim_start_matches("---\n").trim_end().to_string())
}

/// Convert a value to JSON format
///
/// Usage: {{ values.config | tojson }}
pub fn tojson(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    serde_json::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Base64 encode a string
///
/// Usage: {{ secret | b64encode }}
#[must_use]
pub fn b64encode(value: String) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Base64 decode a string
///
/// Usage: {{ encoded | b64decode }}
pub fn b64decode(value: String) -> Result<String, Error> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(value.as_bytes())
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("base64 decode error: {}", e),
            )
        })?;

    String::from_utf8(decoded)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("UTF-8 decode error: {}", e)))
}

/// Quote a string with double quotes
///
/// Usage: {{ name | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let s = match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    };
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote a string with single quotes
///
/// Usage: {{ name | squote }}
#[must_use]
pub fn squote(value: Value) -> String {
    let s = match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    };
    format!("'{}'", s.replace('\'', "''"))
}

/// Indent every non-empty line by `spaces`
///
/// Usage: {{ content | indent(4) }}
#[must_use]
pub fn indent(value: String, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let lines: Vec<String> = value
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect();
    lines.join("\n")
}

/// Indent with a leading newline (like Helm's nindent)
///
/// Usage: {{ content | nindent(4) }}
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    format!("\n{}", indent(value, spaces))
}

/// Require a value, fail if undefined or empty
///
/// Usage: {{ values.required_field | required("field is required") }}
pub fn required(value: Value, message: Option<String>) -> Result<Value, Error> {
    let missing = value.is_undefined()
        || value.is_none()
        || value.as_str().is_some_and(str::is_empty);

    if missing {
        let msg = message.unwrap_or_else(|| "required value is missing".to_string());
        return Err(Error::new(ErrorKind::InvalidOperation, msg));
    }

    Ok(value)
}

/// SHA256 hex digest of a string
///
/// Usage: {{ values.config | tojson | sha256 }}
#[must_use]
pub fn sha256(value: String) -> String {
    let digest = Sha256::digest(value.as_bytes());
    digest.iter().fold(
        String::with_capacity(digest.len() * 2),
        |mut out, byte| {
            use std::fmt::Write as _;
            let _ = write!(out, "{:02x}", byte);
            out
        },
    )
}

/// Truncate a string to at most `length` characters
///
/// Usage: {{ name | trunc(63) }}
#[must_use]
pub fn trunc(value: String, length: usize) -> String {
    value.chars().take(length).collect()
}

/// Remove a prefix if present
///
/// Usage: {{ name | trimprefix("release-") }}
#[must_use]
pub fn trimprefix(value: String, prefix: String) -> String {
    value
        .strip_prefix(&prefix)
        .map(str::to_string)
        .unwrap_or(value)
}

/// Remove a suffix if present
///
/// Usage: {{ name | trimsuffix("-") }}
#[must_use]
pub fn trimsuffix(value: String, suffix: String) -> String {
    value
        .strip_suffix(&suffix)
        .map(str::to_string)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toyaml() {
        let value = Value::from_serialize(&serde_json::json!({"repository": "nginx", "tag": "1.25"}));
        let yaml = toyaml(value).unwrap();

        assert!(yaml.contains("repository: nginx"));
        assert!(!yaml.ends_with('\n'));
    }

    #[test]
    fn test_tojson() {
        let value = Value::from_serialize(&serde_json::json!({"a": 1}));
        assert_eq!(tojson(value).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_b64_roundtrip() {
        let encoded = b64encode("secret".to_string());
        assert_eq!(encoded, "c2VjcmV0");
        assert_eq!(b64decode(encoded).unwrap(), "secret");
        assert!(b64decode("not base64!!".to_string()).is_err());
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(Value::from("hello")), "\"hello\"");
        assert_eq!(quote(Value::from("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(squote(Value::from("it's")), "'it''s'");
    }

    #[test]
    fn test_indent_and_nindent() {
        assert_eq!(indent("a\nb".to_string(), 2), "  a\n  b");
        assert_eq!(indent("a\n\nb".to_string(), 2), "  a\n\n  b");
        assert_eq!(nindent("a".to_string(), 4), "\n    a");
    }

    #[test]
    fn test_required() {
        assert!(required(Value::from("x"), None).is_ok());

        let err = required(Value::from(""), Some("name is required".to_string())).unwrap_err();
        assert!(err.to_string().contains("name is required"));
        assert!(required(Value::UNDEFINED, None).is_err());
    }

    #[test]
    fn test_sha256() {
        assert_eq!(
            sha256("hello world".to_string()),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_trunc() {
        assert_eq!(trunc("release-name-long".to_string(), 7), "release");
        assert_eq!(trunc("short".to_string(), 63), "short");
    }

    #[test]
    fn test_trim_prefix_suffix() {
        assert_eq!(trimprefix("release-app".to_string(), "release-".to_string()), "app");
        assert_eq!(trimprefix("app".to_string(), "release-".to_string()), "app");
        assert_eq!(trimsuffix("name-".to_string(), "-".to_string()), "name");
    }
}
