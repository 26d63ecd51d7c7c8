//! Color swatches for categories and goals
//!
//! The data service stores colors as Tailwind background classes
//! (`bg-orange-500`). They are parsed into a closed set when rows are read so
//! an unknown swatch is rejected instead of flowing into reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A color swatch from the fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorTag {
    #[default]
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Indigo,
    Purple,
    Pink,
}

impl ColorTag {
    /// Every swatch, in palette order
    pub const ALL: [ColorTag; 10] = [
        Self::Gray,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Teal,
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
    ];

    /// Short swatch name (e.g. "orange")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }

    /// Stored class form (e.g. "bg-orange-500")
    pub fn class(&self) -> String {
        format!("bg-{}-500", self.name())
    }

    /// ANSI foreground escape closest to the swatch
    pub fn ansi(&self) -> &'static str {
        match self {
            Self::Gray => "\x1b[90m",
            Self::Red => "\x1b[31m",
            Self::Orange => "\x1b[38;5;208m",
            Self::Yellow => "\x1b[33m",
            Self::Green => "\x1b[32m",
            Self::Teal => "\x1b[36m",
            Self::Blue => "\x1b[34m",
            Self::Indigo => "\x1b[38;5;63m",
            Self::Purple => "\x1b[35m",
            Self::Pink => "\x1b[38;5;205m",
        }
    }

    /// Parse either the class form or the bare swatch name
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let lower = s.trim().to_lowercase();
        let name = lower
            .strip_prefix("bg-")
            .and_then(|rest| rest.strip_suffix("-500"))
            .unwrap_or(&lower);

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name || (name == "grey" && *c == Self::Gray))
            .ok_or_else(|| ColorParseError::Unknown(s.to_string()))
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ColorTag {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorTag {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorTag> for String {
    fn from(color: ColorTag) -> Self {
        color.class()
    }
}

/// Error for swatches outside the palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Unknown(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) => write!(f, "Unknown color tag: '{}'", s),
        }
    }
}

impl std::error::Error for ColorParseError {}
