//! Pure report aggregation.
//!
//! Groups the costs of one user's month by category. Grouping is stable:
//! items keep the order in which the costs were handed in, they are not
//! re-sorted by day.

use crate::costs::{Category, Cost};

use super::types::{ReportDetails, ReportItem};

/// Details with an empty sequence for every canonical category.
pub fn empty_details() -> ReportDetails {
    Category::ALL
        .into_iter()
        .map(|category| (category.as_str().to_string(), Vec::new()))
        .collect()
}

/// Groups costs by category.
///
/// The result always contains the seven canonical categories, empty when no
/// cost matched. A label found in storage that is not canonical gets its own
/// key next to them instead of being dropped.
pub fn build_report_details(costs: &[Cost]) -> ReportDetails {
    let mut details = empty_details();
    for cost in costs {
        details
            .entry(cost.category.clone())
            .or_default()
            .push(ReportItem::from(cost));
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(id: i64, category: &str, sum: f64, day: u32) -> Cost {
        Cost {
            id,
            user_id: 1,
            year: 2024,
            month: 6,
            day,
            description: format!("cost {id}"),
            category: category.to_string(),
            sum,
        }
    }

    #[test]
    fn test_empty_input_has_every_category() {
        let details = build_report_details(&[]);

        assert_eq!(details.len(), 7);
        for category in Category::ALL {
            assert_eq!(details.get(category.as_str()), Some(&Vec::new()));
        }
    }

    #[test]
    fn test_groups_by_category() {
        let costs = vec![
            cost(1, "food", 10.0, 1),
            cost(2, "food", 20.0, 2),
            cost(3, "health", 5.0, 3),
        ];

        let details = build_report_details(&costs);

        assert_eq!(details.len(), 7);
        let food = &details["food"];
        assert_eq!(food.len(), 2);
        assert_eq!((food[0].sum, food[0].day), (10.0, 1));
        assert_eq!((food[1].sum, food[1].day), (20.0, 2));
        assert_eq!(details["health"].len(), 1);
        assert_eq!(details["health"][0].sum, 5.0);
        for empty in ["housing", "sport", "education", "transportation", "other"] {
            assert!(details[empty].is_empty(), "{empty} should be empty");
        }
    }

    #[test]
    fn test_grouping_keeps_input_order() {
        let costs = vec![
            cost(1, "sport", 1.0, 28),
            cost(2, "sport", 2.0, 3),
            cost(3, "sport", 3.0, 15),
        ];

        let details = build_report_details(&costs);

        let days: Vec<u32> = details["sport"].iter().map(|item| item.day).collect();
        assert_eq!(days, vec![28, 3, 15]);
    }

    #[test]
    fn test_unknown_label_is_folded_in() {
        let costs = vec![cost(1, "legacy", 9.0, 1), cost(2, "other", 1.0, 2)];

        let details = build_report_details(&costs);

        assert_eq!(details.len(), 8);
        assert_eq!(details["legacy"].len(), 1);
        assert_eq!(details["other"].len(), 1);
        for category in Category::ALL {
            assert!(details.contains_key(category.as_str()));
        }
    }

    #[test]
    fn test_item_fields() {
        let details = build_report_details(&[cost(5, "education", 99.5, 17)]);

        let item = &details["education"][0];
        assert_eq!(item.day, 17);
        assert_eq!(item.description, "cost 5");
        assert_eq!(item.sum, 99.5);
    }
}
