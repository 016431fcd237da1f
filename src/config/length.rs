use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MarqueeError;

/// A CSS-like length. Only `Px` is absolute; everything else needs the host
/// to resolve it against computed style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    Px(f32),
    Em(f32),
    Rem(f32),
    Percent(f32),
}

impl Length {
    pub fn value(&self) -> f32 {
        match *self {
            Length::Px(v) | Length::Em(v) | Length::Rem(v) | Length::Percent(v) => v,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Length::Px(_))
    }

    pub(crate) fn with_value(self, value: f32) -> Self {
        match self {
            Length::Px(_) => Length::Px(value),
            Length::Em(_) => Length::Em(value),
            Length::Rem(_) => Length::Rem(value),
            Length::Percent(_) => Length::Percent(value),
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl FromStr for Length {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || MarqueeError::InvalidLength(s.to_string());
        // "rem" has to be tried before "em"
        let (number, ctor): (&str, fn(f32) -> Length) = if let Some(n) = raw.strip_suffix("rem") {
            (n, Length::Rem)
        } else if let Some(n) = raw.strip_suffix("em") {
            (n, Length::Em)
        } else if let Some(n) = raw.strip_suffix("px") {
            (n, Length::Px)
        } else if let Some(n) = raw.strip_suffix('%') {
            (n, Length::Percent)
        } else {
            (raw, Length::Px)
        };
        let value: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(ctor(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Em(v) => write!(f, "{v}em"),
            Length::Rem(v) => write!(f, "{v}rem"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f32),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = MarqueeError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) if v.is_finite() => Ok(Length::Px(v)),
            LengthRepr::Number(v) => Err(MarqueeError::InvalidLength(v.to_string())),
            LengthRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        LengthRepr::Text(length.to_string())
    }
}
