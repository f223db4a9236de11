//! Semantic versions and the requirements recipes place on them.
//!
//! Requirement text grammar (whitespace is ignored everywhere):
//! - `*` matches any version
//! - `1.2.3` or `=1.2.3` matches exactly that version
//! - `[1.0.0, 1.2.0]` matches any listed version
//! - `>=1.0.0` and `<=2.0.0` are inclusive bounds
//! - `1.0.0-2.0.0` is an inclusive range

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A `major.minor.patch` version. Ordering is lexicographic on the triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemanticVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `N`, `N.N` or `N.N.N`; missing components are 0.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidVersion {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }
        let mut components = [0u32; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }
        let [major, minor, patch] = components;
        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Which side of a [`VersionRequirement::Bounded`] version is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The bound and everything newer.
    Above,
    /// The bound and everything older.
    Below,
}

/// A constraint on acceptable versions of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRequirement {
    Any,
    Exact(Vec<SemanticVersion>),
    Bounded(SemanticVersion, Direction),
    Range(SemanticVersion, SemanticVersion),
}

impl VersionRequirement {
    pub fn exact(version: SemanticVersion) -> Self {
        Self::Exact(vec![version])
    }

    pub fn is_satisfied_by(&self, version: &SemanticVersion) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(versions) => versions.contains(version),
            Self::Bounded(bound, Direction::Above) => version >= bound,
            Self::Bounded(bound, Direction::Below) => version <= bound,
            Self::Range(low, high) => low <= version && version <= high,
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let text: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = |reason: &str| ParseError::InvalidRequirement {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let version = |part: &str| {
            SemanticVersion::parse(part).map_err(|_| invalid(&format!("'{part}' is not a version")))
        };

        if text.is_empty() {
            return Err(invalid("empty requirement"));
        }
        if text == "*" {
            return Ok(Self::Any);
        }
        if let Some(rest) = text.strip_prefix('[') {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| invalid("unterminated version list"))?;
            if inner.is_empty() {
                return Ok(Self::Exact(Vec::new()));
            }
            let versions = inner.split(',').map(version).collect::<Result<_, _>>()?;
            return Ok(Self::Exact(versions));
        }
        if let Some(rest) = text.strip_prefix(">=") {
            return Ok(Self::Bounded(version(rest)?, Direction::Above));
        }
        if let Some(rest) = text.strip_prefix("<=") {
            return Ok(Self::Bounded(version(rest)?, Direction::Below));
        }
        if let Some(rest) = text.strip_prefix('=') {
            return Ok(Self::exact(version(rest)?));
        }
        if let Some((low, high)) = text.split_once('-') {
            return Ok(Self::Range(version(low)?, version(high)?));
        }
        Ok(Self::exact(version(&text)?))
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(versions) if versions.len() == 1 => write!(f, "{}", versions[0]),
            Self::Exact(versions) => {
                f.write_str("[")?;
                for (i, v) in versions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::Bounded(v, Direction::Above) => write!(f, ">={v}"),
            Self::Bounded(v, Direction::Below) => write!(f, "<={v}"),
            Self::Range(low, high) => write!(f, "{low}-{high}"),
        }
    }
}

impl FromStr for VersionRequirement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionRequirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
