//! Per-field checks with human-readable failure messages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FieldError;
use crate::validation::patterns;

/// One constraint on a single form value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    /// Whitelist regex; the message completes "`<Label>` ...".
    Pattern(&'static Lazy<Regex>, &'static str),
    /// Numeric string with at most `max_places` fractional digits.
    Decimal { max_places: usize },
    /// Inclusive numeric bounds; only meaningful after `Decimal` or `WholeNumber`.
    Range { min: f64, max: f64 },
    WholeNumber,
    Url,
    Email,
    MonthYear,
    MonthYearOrPresent,
}

/// Checks `value` against `rules`, returning the first failure message.
///
/// `None` means the field was never provided; `Some("")` means it was
/// provided blank. Required fields report the two differently; optional
/// fields accept both. The remaining rules see the trimmed value, which is
/// what the payload mapping sends.
pub fn check(label: &str, value: Option<&str>, rules: &[Rule]) -> Result<(), String> {
    let required = rules.iter().any(|r| matches!(r, Rule::Required));

    let value = match value {
        None if required => return Err(format!("{label} is required")),
        None => return Ok(()),
        Some(v) => v,
    };

    let value = value.trim();
    if value.is_empty() {
        return if required {
            Err(format!("{label} cannot be empty"))
        } else {
            Ok(())
        };
    }

    for rule in rules {
        apply(label, value, rule)?;
    }
    Ok(())
}

fn apply(label: &str, value: &str, rule: &Rule) -> Result<(), String> {
    let len = value.chars().count();
    match *rule {
        Rule::Required => Ok(()),
        Rule::MinLen(min) if len < min => {
            Err(format!("{label} must be at least {min} characters"))
        }
        Rule::MaxLen(max) if len > max => {
            Err(format!("{label} must be at most {max} characters"))
        }
        Rule::MinLen(_) | Rule::MaxLen(_) => Ok(()),
        Rule::Pattern(regex, message) => {
            if regex.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} {message}"))
            }
        }
        Rule::Decimal { max_places } => {
            if !patterns::DECIMAL.is_match(value) {
                return Err(format!("{label} must be a number"));
            }
            let places = decimal_places(value);
            if places > max_places {
                Err(format!(
                    "{label} can have at most {max_places} decimal places"
                ))
            } else {
                Ok(())
            }
        }
        Rule::WholeNumber => {
            if patterns::WHOLE_NUMBER.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} must be a whole number"))
            }
        }
        Rule::Range { min, max } => match value.parse::<f64>() {
            Ok(n) if n >= min && n <= max => Ok(()),
            Ok(_) => Err(format!(
                "{label} must be between {} and {}",
                trim_number(min),
                trim_number(max)
            )),
            Err(_) => Err(format!("{label} must be a number")),
        },
        Rule::Url => {
            if patterns::URL.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} must be a valid URL starting with http:// or https://"))
            }
        }
        Rule::Email => {
            if patterns::EMAIL.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} must be a valid email address"))
            }
        }
        Rule::MonthYear => {
            if patterns::MONTH_YEAR.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} must look like \"Jan 2024\""))
            }
        }
        Rule::MonthYearOrPresent => {
            if value == "Present" || patterns::MONTH_YEAR.is_match(value) {
                Ok(())
            } else {
                Err(format!("{label} must look like \"Jan 2024\" or be \"Present\""))
            }
        }
    }
}

/// Counts fractional digits from the string form, never through `f64`.
pub fn decimal_places(value: &str) -> usize {
    value
        .split_once('.')
        .map(|(_, frac)| frac.chars().count())
        .unwrap_or(0)
}

fn trim_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Accumulates per-field checks for one form, keeping only the first failure.
#[derive(Debug, Default)]
pub struct FieldChecks {
    first: Option<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(
        mut self,
        key: impl Into<String>,
        label: &str,
        value: Option<&str>,
        rules: &[Rule],
    ) -> Self {
        if self.first.is_none() {
            if let Err(message) = check(label, value, rules) {
                self.first = Some(FieldError::new(key, message));
            }
        }
        self
    }

    /// Records a failure computed outside the rule table (e.g. list limits).
    pub fn ensure(mut self, ok: bool, key: impl Into<String>, message: impl Into<String>) -> Self {
        if self.first.is_none() && !ok {
            self.first = Some(FieldError::new(key, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), FieldError> {
        match self.first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
