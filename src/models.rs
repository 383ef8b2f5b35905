//! Frontend Models
//!
//! Chip flavor records and the draft submitted by the create form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique, never-reused flavor identifier.
///
/// Serialized as a decimal string to keep exported files stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlavorId(pub u64);

impl fmt::Display for FlavorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlavorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(FlavorId)
    }
}

impl Serialize for FlavorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FlavorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Flavor category; one closed set for both the form and stored flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Classic,
    Spicy,
    Cheesy,
    Bbq,
    Salt,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Classic,
        Category::Spicy,
        Category::Cheesy,
        Category::Bbq,
        Category::Salt,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Spicy => "spicy",
            Category::Cheesy => "cheesy",
            Category::Bbq => "bbq",
            Category::Salt => "salt",
            Category::Other => "other",
        }
    }

    /// Human label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            Category::Classic => "Original",
            Category::Spicy => "Spicy",
            Category::Cheesy => "Cheesy",
            Category::Bbq => "BBQ",
            Category::Salt => "Salt & Vinegar",
            Category::Other => "Other",
        }
    }

    /// Parse a stored/selected value; unknown values are rejected
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// A ranked chip flavor. Rank is its list position, never a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipFlavor {
    pub id: FlavorId,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ChipFlavor {
    /// Build from a validated draft
    pub(crate) fn from_draft(id: FlavorId, draft: ValidDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            brand: draft.brand,
        }
    }
}

/// Raw create-form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlavorDraft {
    pub name: String,
    pub category: Option<Category>,
    pub brand: Option<String>,
}

impl FlavorDraft {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category: Some(category),
            brand: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Trim and normalize; `None` when the name is blank
    pub fn validate(&self) -> Option<ValidDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(ValidDraft {
            name: name.to_string(),
            category: self.category.unwrap_or_default(),
            brand: normalize_brand(self.brand.as_deref()),
        })
    }
}

/// Draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub category: Category,
    pub brand: Option<String>,
}

/// Whitespace-only brands count as absent
pub fn normalize_brand(brand: Option<&str>) -> Option<String> {
    brand
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_trims_name_and_brand() {
        let draft = FlavorDraft::new("  Sour Cream  ", Category::Classic).with_brand("  Lays ");
        let valid = draft.validate().unwrap();
        assert_eq!(valid.name, "Sour Cream");
        assert_eq!(valid.brand.as_deref(), Some("Lays"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(FlavorDraft::new("   ", Category::Spicy).validate().is_none());
        assert!(FlavorDraft::default().validate().is_none());
    }

    #[test]
    fn test_blank_brand_is_absent() {
        let valid = FlavorDraft::new("Ruffles", Category::Cheesy).with_brand("   ").validate().unwrap();
        assert_eq!(valid.brand, None);
    }

    #[test]
    fn test_missing_category_defaults_to_classic() {
        let draft = FlavorDraft { name: "Plain".into(), category: None, brand: None };
        assert_eq!(draft.validate().unwrap().category, Category::Classic);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&Category::Bbq).unwrap(), "\"bbq\"");
        assert_eq!(Category::parse("salt"), Some(Category::Salt));
        assert_eq!(Category::parse("other"), Some(Category::Other));
        assert_eq!(Category::parse("sweet"), None);
        assert_eq!(Category::Salt.label(), "Salt & Vinegar");
    }

    #[test]
    fn test_flavor_id_round_trips_as_string() {
        let json = serde_json::to_string(&FlavorId(1700000000000)).unwrap();
        assert_eq!(json, "\"1700000000000\"");
        let back: FlavorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FlavorId(1700000000000));
        assert!(serde_json::from_str::<FlavorId>("\"abc\"").is_err());
    }

    #[test]
    fn test_flavor_without_brand_omits_field() {
        let flavor = ChipFlavor {
            id: FlavorId(1),
            name: "Plain".into(),
            category: Category::Classic,
            brand: None,
        };
        let json = serde_json::to_value(&flavor).unwrap();
        assert!(json.get("brand").is_none());
    }
}
