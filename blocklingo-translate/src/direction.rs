//! Translation direction tokens such as `en-to-ja`

use std::fmt;
use std::str::FromStr;

use icu_locale::Locale;

use crate::error::{TranslateError, TranslateResult};

const SEPARATOR: &str = "-to-";

/// An ordered pair of locales: translate from `source` into `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Direction {
    source: String,
    target: String,
}

impl Direction {
    pub fn new(source: &str, target: &str) -> TranslateResult<Self> {
        let invalid = || TranslateError::InvalidDirection(format!("{}{}{}", source, SEPARATOR, target));
        Ok(Direction {
            source: normalize_locale(source).ok_or_else(invalid)?,
            target: normalize_locale(target).ok_or_else(invalid)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn reversed(&self) -> Self {
        Direction {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl FromStr for Direction {
    type Err = TranslateError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (source, target) = token
            .trim()
            .split_once(SEPARATOR)
            .ok_or_else(|| TranslateError::InvalidDirection(token.to_string()))?;
        Direction::new(source, target)
            .map_err(|_| TranslateError::InvalidDirection(token.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, SEPARATOR, self.target)
    }
}

/// Validate a BCP 47 locale code and lower-case its canonical form
///
/// `zh-Hans` → `zh-hans`, `EN` → `en`. Returns `None` for codes that do not parse.
pub fn normalize_locale(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let locale: Locale = code.parse().ok()?;
    Some(locale.to_string().to_lowercase())
}
