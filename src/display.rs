use std::fmt;

pub const ERROR_TEXT: &str = "Error";

/// Longest decimal a unary key may leave on the screen before it gets cut.
const UNARY_MAX_LENGTH: usize = 11;
const UNARY_TRUNCATED_LENGTH: usize = 10;

/// What the calculator screen shows: a numeric literal, or the error
/// sentinel that replaces any infinite or NaN result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayValue {
    number(String),
    error,
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::number("0".into())
    }
}

impl DisplayValue {
    /// Formats a computed result for the screen.
    pub fn from_value(value: f64) -> Self {
        if !value.is_finite() {
            return Self::error;
        }
        Self::number(trim_integral(render(value)))
    }

    /// Formats a unary key result, which is additionally cut to fit the
    /// screen. The cut drops digits rather than rounding.
    pub fn from_unary_value(value: f64) -> Self {
        match Self::from_value(value) {
            // scientific renderings are left whole so the exponent survives
            Self::number(text)
                if text.contains('.') && !text.contains('E') && text.len() > UNARY_MAX_LENGTH =>
            {
                Self::number(text[..UNARY_TRUNCATED_LENGTH].to_string())
            },
            other => other,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::number(text) => text.parse().ok(),
            Self::error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::number(text) => text,
            Self::error => ERROR_TEXT,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renders a finite value the way a pocket display prints it: plain decimal
/// between 1e-3 and 1e7, scientific outside, always with a fractional part.
fn render(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        with_fraction(value.to_string())
    } else {
        let text = format!("{:e}", value);
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                format!("{}E{}", with_fraction(mantissa.to_string()), exponent)
            },
            None => text,
        }
    }
}

fn with_fraction(text: String) -> String {
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

/// Drops a trailing ".0" so integral results read as integers.
pub fn trim_integral(text: String) -> String {
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}
