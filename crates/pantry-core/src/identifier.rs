//! Validated names for organizations, recipes and recipe sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Longest accepted identifier, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 30;

/// A short name made of ASCII letters, digits, `-`, `_` and `+`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidIdentifier {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        if input.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if input.chars().count() > MAX_IDENTIFIER_LEN {
            return Err(invalid("must be at most 30 characters"));
        }
        if let Some(c) = input.chars().find(|c| !is_identifier_char(*c)) {
            return Err(invalid(&format!("unexpected character '{c}'")));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

/// Source name that stands for "no explicit source". It cannot be written as
/// a source, so `org/recipe` has exactly one spelling.
pub const DEFAULT_SOURCE: &str = "default";

/// The stable name used to request a recipe: `org/recipe` or `source+org/recipe`.
///
/// The optional source names the host the recipe comes from (for example
/// `github`). Identifiers order by source first, with unsourced ones first.
///
/// Every identifier displays as text that parses back to itself: a source
/// never contains `+` and is never [`DEFAULT_SOURCE`], and an unsourced
/// organization never contains `+`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeIdentifier {
    source: Option<Identifier>,
    organization: Identifier,
    recipe: Identifier,
}

impl RecipeIdentifier {
    /// An unsourced identifier. The organization must not contain `+`.
    pub fn new(organization: Identifier, recipe: Identifier) -> Result<Self, ParseError> {
        if organization.as_str().contains('+') {
            return Err(ParseError::InvalidRecipeIdentifier {
                input: format!("{organization}/{recipe}"),
            });
        }
        Ok(Self {
            source: None,
            organization,
            recipe,
        })
    }

    pub fn with_source(
        source: Identifier,
        organization: Identifier,
        recipe: Identifier,
    ) -> Result<Self, ParseError> {
        if source.as_str().contains('+') || source.as_str() == DEFAULT_SOURCE {
            return Err(ParseError::InvalidRecipeIdentifier {
                input: format!("{source}+{organization}/{recipe}"),
            });
        }
        Ok(Self {
            source: Some(source),
            organization,
            recipe,
        })
    }

    /// Parse `org/recipe` or `source+org/recipe`.
    ///
    /// The first `+` before the slash separates the source from the
    /// organization, so an organization containing `+` must be written with
    /// an explicit source.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidRecipeIdentifier {
            input: input.to_string(),
        };
        let (prefix, recipe) = input.trim().split_once('/').ok_or_else(invalid)?;
        let recipe = Identifier::parse(recipe)?;
        match prefix.split_once('+') {
            Some((source, organization)) => Self::with_source(
                Identifier::parse(source)?,
                Identifier::parse(organization)?,
                recipe,
            )
            .map_err(|_| invalid()),
            None => Self::new(Identifier::parse(prefix)?, recipe),
        }
    }

    pub fn source(&self) -> Option<&Identifier> {
        self.source.as_ref()
    }

    pub fn organization(&self) -> &Identifier {
        &self.organization
    }

    pub fn recipe(&self) -> &Identifier {
        &self.recipe
    }
}

impl fmt::Display for RecipeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref source) = self.source {
            write!(f, "{source}+")?;
        }
        write!(f, "{}/{}", self.organization, self.recipe)
    }
}

impl FromStr for RecipeIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecipeIdentifier {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecipeIdentifier> for String {
    fn from(value: RecipeIdentifier) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_symbols() {
        let id = Identifier::parse("boost_config-1+x").unwrap();
        assert_eq!(id.as_str(), "boost_config-1+x");
    }

    #[test]
    fn identifier_length_limit() {
        assert!(Identifier::parse(&"a".repeat(30)).is_ok());
        assert!(Identifier::parse(&"a".repeat(31)).is_err());
        assert!(Identifier::parse("").is_err());
    }

    #[test]
    fn identifier_rejects_dots_and_spaces() {
        assert!(Identifier::parse("boost.config").is_err());
        assert!(Identifier::parse("boost config").is_err());
    }

    #[test]
    fn recipe_identifier_without_source() {
        let id = RecipeIdentifier::parse("boost/config").unwrap();
        assert!(id.source().is_none());
        assert_eq!(id.organization().as_str(), "boost");
        assert_eq!(id.recipe().as_str(), "config");
        assert_eq!(id.to_string(), "boost/config");
    }

    #[test]
    fn recipe_identifier_with_source() {
        let id = RecipeIdentifier::parse("github+boost/config").unwrap();
        assert_eq!(id.source().map(Identifier::as_str), Some("github"));
        assert_eq!(id.to_string(), "github+boost/config");
    }

    #[test]
    fn recipe_identifier_requires_slash() {
        assert!(matches!(
            RecipeIdentifier::parse("boost"),
            Err(ParseError::InvalidRecipeIdentifier { .. })
        ));
        assert!(RecipeIdentifier::parse("boost/config/extra").is_err());
    }

    #[test]
    fn unsourced_identifiers_sort_first() {
        let plain = RecipeIdentifier::parse("zlib/zlib").unwrap();
        let sourced = RecipeIdentifier::parse("github+abseil/abseil").unwrap();
        assert!(plain < sourced);
    }

    #[test]
    fn organization_with_plus_needs_a_source() {
        let name = |s: &str| Identifier::parse(s).unwrap();
        assert!(RecipeIdentifier::new(name("c+x"), name("lib")).is_err());

        let sourced = RecipeIdentifier::with_source(name("c"), name("c+x"), name("lib")).unwrap();
        assert_eq!(sourced.to_string(), "c+c+x/lib");
        assert_eq!(RecipeIdentifier::parse(&sourced.to_string()).unwrap(), sourced);
    }

    #[test]
    fn source_cannot_contain_plus() {
        let name = |s: &str| Identifier::parse(s).unwrap();
        assert!(RecipeIdentifier::with_source(name("a+b"), name("c"), name("lib")).is_err());
    }

    #[test]
    fn default_source_is_reserved() {
        assert!(matches!(
            RecipeIdentifier::parse("default+boost/config"),
            Err(ParseError::InvalidRecipeIdentifier { .. })
        ));
        let name = |s: &str| Identifier::parse(s).unwrap();
        assert!(
            RecipeIdentifier::with_source(name(DEFAULT_SOURCE), name("boost"), name("config"))
                .is_err()
        );
    }
}
