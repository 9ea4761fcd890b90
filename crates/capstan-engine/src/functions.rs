//! Template functions (global functions available in templates)

use minijinja::value::Rest;
use minijinja::{Error, ErrorKind, Value};

/// Fail with a custom error message
///
/// Usage: {{ fail("unsupported configuration") }}
pub fn fail(message: String) -> Result<Value, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}

/// First argument that is neither undefined, none nor empty string
///
/// Usage: {{ coalesce(values.nameOverride, release.name) }}
pub fn coalesce(args: Rest<Value>) -> Value {
    for value in args.0.iter() {
        if value.is_undefined() || value.is_none() {
            continue;
        }
        if value.as_str().is_some_and(str::is_empty) {
            continue;
        }
        return value.clone();
    }
    Value::UNDEFINED
}

/// Pick between two values based on a condition
///
/// Usage: {{ ternary("on", "off", values.enabled) }}
pub fn ternary(true_val: Value, false_val: Value, condition: Value) -> Value {
    if condition.is_true() { true_val } else { false_val }
}

/// Current UTC time as RFC 3339
///
/// Usage: {{ now() }}
pub fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Minimal printf supporting %s, %d, %f, %v and %%
///
/// Usage: {{ printf("%s-%s", chart.name, release.name) }}
pub fn printf(format: String, args: Rest<Value>) -> Result<String, Error> {
    let mut out = String::with_capacity(format.len());
    let mut remaining = args.0.iter();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = chars.next().ok_or_else(|| {
            Error::new(ErrorKind::InvalidOperation, "printf: dangling % at end of format")
        })?;

        if spec == '%' {
            out.push('%');
            continue;
        }

        let arg = remaining.next().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("printf: missing argument for %{}", spec),
            )
        })?;

        match spec {
            's' | 'v' => match arg.as_str() {
                Some(s) => out.push_str(s),
                None => out.push_str(&arg.to_string()),
            },
            'd' => {
                let n = i64::try_from(arg.clone()).map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("printf: %d expects an integer, got {}", arg),
                    )
                })?;
                out.push_str(&n.to_string());
            }
            'f' => {
                let n = f64::try_from(arg.clone()).map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("printf: %f expects a number, got {}", arg),
                    )
                })?;
                out.push_str(&n.to_string());
            }
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("printf: unsupported verb %{}", other),
                ));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail() {
        let err = fail("boom".to_string()).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_coalesce() {
        let result = coalesce(Rest(vec![
            Value::UNDEFINED,
            Value::from(""),
            Value::from("fallback"),
        ]));
        assert_eq!(result.as_str(), Some("fallback"));

        assert!(coalesce(Rest(vec![Value::UNDEFINED])).is_undefined());
    }

    #[test]
    fn test_ternary() {
        assert_eq!(
            ternary(Value::from("on"), Value::from("off"), Value::from(true)).as_str(),
            Some("on")
        );
        assert_eq!(
            ternary(Value::from("on"), Value::from("off"), Value::from(false)).as_str(),
            Some("off")
        );
    }

    #[test]
    fn test_printf() {
        let out = printf(
            "%s-%s".to_string(),
            Rest(vec![Value::from("chart"), Value::from("release")]),
        )
        .unwrap();
        assert_eq!(out, "chart-release");

        let out = printf(
            "replicas: %d (%v)".to_string(),
            Rest(vec![Value::from(3), Value::from(true)]),
        )
        .unwrap();
        assert_eq!(out, "replicas: 3 (true)");

        let out = printf("100%%".to_string(), Rest(vec![])).unwrap();
        assert_eq!(out, "100%");
    }

    #[test]
    fn test_printf_missing_argument() {
        assert!(printf("%s".to_string(), Rest(vec![])).is_err());
        assert!(printf("%q".to_string(), Rest(vec![Value::from("x")])).is_err());
    }
}
