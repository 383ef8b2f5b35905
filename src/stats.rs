//! Flavor Statistics
//!
//! Aggregates derived from a ranking snapshot. Never stored.

use crate::models::{Category, ChipFlavor};

/// Derived statistics for the stats panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlavorStats {
    pub total: usize,
    /// Count per category, in order of first appearance
    pub by_category: Vec<(Category, usize)>,
    /// Most common category; ties go to the one seen first
    pub top_category: Option<(Category, usize)>,
    pub brand_count: usize,
    /// Share of flavors with a brand, 0-100 rounded half up
    pub brand_percentage: u8,
}

impl FlavorStats {
    pub fn derive(flavors: &[ChipFlavor]) -> Self {
        let mut by_category: Vec<(Category, usize)> = Vec::new();
        for flavor in flavors {
            match by_category.iter_mut().find(|(c, _)| *c == flavor.category) {
                Some((_, count)) => *count += 1,
                None => by_category.push((flavor.category, 1)),
            }
        }

        // Strict comparison keeps the earliest category on ties
        let top_category = by_category.iter().fold(None, |best: Option<(Category, usize)>, &(c, n)| {
            match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((c, n)),
            }
        });

        let brand_count = flavors.iter().filter(|f| f.brand.is_some()).count();

        Self {
            total: flavors.len(),
            by_category,
            top_category,
            brand_count,
            brand_percentage: percentage(brand_count, flavors.len()),
        }
    }

    pub fn count_for(&self, category: Category) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |&(_, n)| n)
    }
}

/// `part / whole` as a rounded percentage; 0 for an empty whole
fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    rounded.min(100) as u8
}

/// "1 flavor" / "3 flavors"
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlavorDraft, FlavorId};
    use crate::ranking::Ranking;

    fn flavor(id: u64, category: Category, brand: Option<&str>) -> ChipFlavor {
        ChipFlavor {
            id: FlavorId(id),
            name: format!("Flavor {}", id),
            category,
            brand: brand.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_list() {
        let stats = FlavorStats::derive(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.top_category, None);
        assert_eq!(stats.brand_count, 0);
        assert_eq!(stats.brand_percentage, 0);
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_brand_percentage_half() {
        let flavors = vec![
            flavor(1, Category::Classic, Some("X")),
            flavor(2, Category::Classic, None),
        ];
        let stats = FlavorStats::derive(&flavors);
        assert_eq!(stats.brand_count, 1);
        assert_eq!(stats.brand_percentage, 50);
    }

    #[test]
    fn test_brand_percentage_rounds() {
        let flavors = vec![
            flavor(1, Category::Classic, Some("X")),
            flavor(2, Category::Classic, Some("Y")),
            flavor(3, Category::Classic, None),
        ];
        assert_eq!(FlavorStats::derive(&flavors).brand_percentage, 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn test_category_counts_sum_to_total() {
        let ranking = Ranking::seeded();
        let stats = FlavorStats::derive(ranking.flavors());
        let sum: usize = stats.by_category.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, stats.total);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn test_top_category_tie_goes_to_first_seen() {
        let flavors = vec![
            flavor(1, Category::Spicy, None),
            flavor(2, Category::Bbq, None),
            flavor(3, Category::Bbq, None),
            flavor(4, Category::Spicy, None),
        ];
        let stats = FlavorStats::derive(&flavors);
        assert_eq!(stats.top_category, Some((Category::Spicy, 2)));
        assert_eq!(stats.by_category, vec![(Category::Spicy, 2), (Category::Bbq, 2)]);
    }

    #[test]
    fn test_top_category_majority() {
        let flavors = vec![
            flavor(1, Category::Salt, None),
            flavor(2, Category::Cheesy, None),
            flavor(3, Category::Cheesy, None),
        ];
        let stats = FlavorStats::derive(&flavors);
        assert_eq!(stats.top_category, Some((Category::Cheesy, 2)));
        assert_eq!(stats.count_for(Category::Salt), 1);
        assert_eq!(stats.count_for(Category::Other), 0);
    }

    #[test]
    fn test_clear_then_derive() {
        let mut ranking = Ranking::seeded();
        ranking.add(&FlavorDraft::new("Salt & Vinegar", Category::Salt));
        ranking.clear();
        let stats = FlavorStats::derive(ranking.flavors());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.top_category, None);
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "flavor"), "1 flavor");
        assert_eq!(pluralize(0, "flavor"), "0 flavors");
        assert_eq!(pluralize(2, "flavor"), "2 flavors");
    }
}
