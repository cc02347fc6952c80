//! Named interaction states.
//!
//! State names are plain identifiers so that UI code can register states
//! beyond the three the pointer pipeline drives (`idle`, `hovered`,
//! `selected`).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid [`StateName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNameError {
    message: String,
}

impl StateNameError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StateNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StateNameError {}

/// Identifier of a state registered on an interactive object.
///
/// Deserialization goes through [`StateName::parse`], so traces and configs
/// cannot smuggle in names the parser would reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateName(Cow<'static, str>);

impl StateName {
    /// Initial state; nothing targets the object.
    pub const IDLE: Self = Self(Cow::Borrowed("idle"));
    /// The object is the frame's winner and the pointer is not engaged.
    pub const HOVERED: Self = Self(Cow::Borrowed("hovered"));
    /// The object is the frame's winner and the pointer is engaged.
    pub const SELECTED: Self = Self(Cow::Borrowed("selected"));

    /// Parse a custom state name.
    ///
    /// Names are lowercase ASCII words (`a-z0-9_-`), at most 64 bytes.
    pub fn parse(input: &str) -> Result<Self, StateNameError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(StateNameError::new("state name cannot be empty"));
        }
        if input.len() > 64 {
            return Err(StateNameError::new("state name too long (max 64)"));
        }
        if !input
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
        {
            return Err(StateNameError::new(
                "state name has invalid characters (allowed: a-z0-9_-)",
            ));
        }
        Ok(Self(Cow::Owned(input.to_string())))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StateName {
    type Err = StateNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StateName {
    type Error = StateNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StateName> for String {
    fn from(name: StateName) -> Self {
        name.0.into_owned()
    }
}
