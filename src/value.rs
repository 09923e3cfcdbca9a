use std::fmt;

/// The value stored in a register.
///
/// The producing command picks the variant; consumers coerce with
/// [`Value::as_number`] and report a typed error when that fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Pick the narrowest variant that prints back as exactly `text`.
    ///
    /// `"5"` becomes `Int(5)` and `"2.5"` becomes `Float(2.5)`. Anything whose
    /// numeric form would print differently (`"007"`, `"+5"`, `"1e3"`,
    /// `"2.50"`, `"inf"`) stays a string.
    pub fn infer(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            let value = Value::Int(i);
            if value.to_string() == text {
                return value;
            }
        }
        let has_digit = text.bytes().any(|b| b.is_ascii_digit());
        if let (true, Ok(f)) = (has_digit, text.parse::<f64>()) {
            let value = Value::Float(f);
            if value.to_string() == text {
                return value;
            }
        }
        Value::Str(text.to_string())
    }

    /// Numeric view of the value. Strings are parsed; `None` if that fails.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Floats always carry a fractional part so `5.0` never prints as `5`.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        let s = if x > 0.0 { "inf" } else { "-inf" };
        s.to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_picks_narrowest_kind() {
        assert_eq!(Value::infer("5"), Value::Int(5));
        assert_eq!(Value::infer("-12"), Value::Int(-12));
        assert_eq!(Value::infer("2.5"), Value::Float(2.5));
        assert_eq!(Value::infer("hello"), Value::Str("hello".into()));
        assert_eq!(Value::infer(""), Value::Str(String::new()));
        assert_eq!(Value::infer("infinity"), Value::Str("infinity".into()));
        assert_eq!(Value::infer("5.0"), Value::Float(5.0));
    }

    #[test]
    fn test_infer_keeps_text_that_would_print_differently() {
        for text in [
            "007",
            "+5",
            "1e3",
            "2.50",
            "-0",
            "12345678901234567890123",
            "nan",
            "inf",
        ] {
            assert_eq!(Value::infer(text), Value::Str(text.into()), "{text}");
            assert_eq!(Value::infer(text).to_string(), text);
        }
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_as_number_coerces_strings() {
        assert_eq!(Value::Str(" 3.5 ".into()).as_number(), Some(3.5));
        assert_eq!(Value::Str("three".into()).as_number(), None);
        assert_eq!(Value::Int(7).as_number(), Some(7.0));
    }
}
