//! # Note Categories
//!
//! The closed category set for retrospective notes. Using an enum instead of
//! a plain string means an out-of-set category is unrepresentable once a
//! request has been parsed — the defective-string problem stays at the
//! boundary.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sentiment classification of a retrospective note.
///
/// Serializes as the lowercase strings used on the wire and in storage
/// (`"good"`, `"bad"`, `"improve"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// What went well.
    Good,
    /// What went poorly.
    Bad,
    /// What the team should change.
    Improve,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 3] = [Self::Good, Self::Bad, Self::Improve];

    /// Return the wire/storage representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Improve => "improve",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "bad" => Ok(Self::Bad),
            "improve" => Ok(Self::Improve),
            other => Err(ValidationError::InvalidCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_all_valid_categories() {
        assert_eq!(Category::from_str("good").unwrap(), Category::Good);
        assert_eq!(Category::from_str("bad").unwrap(), Category::Bad);
        assert_eq!(Category::from_str("improve").unwrap(), Category::Improve);
    }

    #[test]
    fn rejects_out_of_set_category() {
        let err = Category::from_str("urgent").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCategory(ref s) if s == "urgent"));
    }

    #[test]
    fn rejects_case_variants() {
        // The wire format is exact lowercase; "Good" is not in the set.
        assert!(Category::from_str("Good").is_err());
        assert!(Category::from_str("GOOD").is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
    }

    #[test]
    fn serde_uses_lowercase_strings() {
        assert_eq!(serde_json::to_string(&Category::Improve).unwrap(), "\"improve\"");
        let parsed: Category = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(parsed, Category::Bad);
    }
}
