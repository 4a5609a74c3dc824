use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative number with exactly two decimal places of precision,
/// held as hundredths so equality never depends on float rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Centi(u32);

impl Centi {
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    /// Parses `"8"`, `"8.5"` or `"8.50"`. More than two fractional digits,
    /// signs, exponents or stray characters yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (whole, frac) = match value.split_once('.') {
            Some((w, f)) => (w, f),
            None => (value, ""),
        };
        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
            || (value.contains('.') && frac.is_empty())
        {
            return None;
        }
        let whole: u32 = whole.parse().ok()?;
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().ok()? * 10,
            _ => frac.parse().ok()?,
        };
        whole.checked_mul(100)?.checked_add(frac).map(Self)
    }

    /// Converts a backend float, rounding to the nearest hundredth.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let hundredths = (value * 100.0).round();
        if hundredths > u32::MAX as f64 {
            return None;
        }
        Some(Self(hundredths as u32))
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Shortest form for an edit input: `8.5`, `10`, `7.84`.
    pub fn to_plain_string(self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => whole.to_string(),
            f if f % 10 == 0 => format!("{whole}.{}", f / 10),
            f => format!("{whole}.{f:02}"),
        }
    }
}

impl fmt::Display for Centi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Centi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Centi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Centi::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hundredths value: {value}")))
    }
}

/// GPA pair as displayed: `"7.84 / 10.00"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gpa {
    pub value: Option<Centi>,
    pub max: Option<Centi>,
}

impl Gpa {
    pub fn new(value: Centi, max: Centi) -> Self {
        Self {
            value: Some(value),
            max: Some(max),
        }
    }
}

pub fn format_gpa(gpa: &Gpa) -> String {
    match (gpa.value, gpa.max) {
        (Some(v), Some(m)) => format!("{v} / {m}"),
        (Some(v), None) => v.to_string(),
        (None, Some(m)) => format!(" / {m}"),
        (None, None) => String::new(),
    }
}

/// Never fails; unreadable halves come back as `None`.
pub fn parse_gpa(flat: &str) -> Gpa {
    match flat.split_once('/') {
        Some((value, max)) => Gpa {
            value: Centi::parse(value),
            max: Centi::parse(max),
        },
        None => Gpa {
            value: Centi::parse(flat),
            max: None,
        },
    }
}
