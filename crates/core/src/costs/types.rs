use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reports::ReportKey;

use super::error::ValidationError;

/// The closed set of expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
    Transportation,
    Other,
}

impl Category {
    /// Every category, in canonical order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Health,
        Category::Housing,
        Category::Sport,
        Category::Education,
        Category::Transportation,
        Category::Other,
    ];

    /// The label used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Health => "health",
            Category::Housing => "housing",
            Category::Sport => "sport",
            Category::Education => "education",
            Category::Transportation => "transportation",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidCategory(s.to_string()))
    }
}

/// A single dated expense entry.
///
/// Records are immutable once stored. `category` holds the stored label; new
/// records are only created from a validated [`Category`], but the type does
/// not assume every stored label is canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub description: String,
    pub category: String,
    pub sum: f64,
}

impl Cost {
    /// The report bucket this cost belongs to.
    pub fn report_key(&self) -> ReportKey {
        ReportKey::new(self.user_id, self.year, self.month)
    }
}

/// A validated cost that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCost {
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub description: String,
    pub category: Category,
    pub sum: f64,
}

impl NewCost {
    /// Attaches the store-assigned id.
    pub fn into_cost(self, id: i64) -> Cost {
        Cost {
            id,
            user_id: self.user_id,
            year: self.year,
            month: self.month,
            day: self.day,
            description: self.description,
            category: self.category.as_str().to_string(),
            sum: self.sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert_eq!(
            "Food".parse::<Category>(),
            Err(ValidationError::InvalidCategory("Food".to_string()))
        );
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Transportation).unwrap();
        assert_eq!(json, "\"transportation\"");
    }

    #[test]
    fn test_new_cost_into_cost() {
        let new_cost = NewCost {
            user_id: 1,
            year: 2024,
            month: 3,
            day: 14,
            description: "groceries".to_string(),
            category: Category::Food,
            sum: 42.5,
        };

        let cost = new_cost.into_cost(7);

        assert_eq!(cost.id, 7);
        assert_eq!(cost.category, "food");
        assert_eq!(cost.report_key(), ReportKey::new(1, 2024, 3));
    }
}
