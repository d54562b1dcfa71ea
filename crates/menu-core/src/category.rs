//! # category
//!
//! why: fix the set and order of food groups a menu is built from
//! relations: keys name catalog files (catalog.rs), order drives preview rows (builder.rs)
//! what: Category enum, display order, hebrew labels

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The food groups of a menu, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    GrainsAndPasta,
    BakedVegetables,
    PotatoDishes,
    FishDishes,
    ChickenDishes,
    MeatDishes,
    FriedSnacks,
    StuffedVegetables,
    Soups,
}

impl Category {
    /// every category in display order
    pub const ALL: [Category; 9] = [
        Category::GrainsAndPasta,
        Category::BakedVegetables,
        Category::PotatoDishes,
        Category::FishDishes,
        Category::ChickenDishes,
        Category::MeatDishes,
        Category::FriedSnacks,
        Category::StuffedVegetables,
        Category::Soups,
    ];

    /// stable key, also the catalog file stem
    pub fn key(self) -> &'static str {
        match self {
            Category::GrainsAndPasta => "grains_and_pasta",
            Category::BakedVegetables => "baked_vegetables",
            Category::PotatoDishes => "potato_dishes",
            Category::FishDishes => "fish_dishes",
            Category::ChickenDishes => "chicken_dishes",
            Category::MeatDishes => "meat_dishes",
            Category::FriedSnacks => "fried_snacks",
            Category::StuffedVegetables => "stuffed_vegetables",
            Category::Soups => "soups",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::GrainsAndPasta => "🍝 דגנים ופסטה",
            Category::BakedVegetables => "🍠 ירקות אפויים",
            Category::PotatoDishes => "🥔 מנות מתפוחי אדמה",
            Category::FishDishes => "🐟 מנות דגים",
            Category::ChickenDishes => "🍗 מנות עוף",
            Category::MeatDishes => "🥩 מנות בשר",
            Category::FriedSnacks => "🍟 נשנושים מטוגנים",
            Category::StuffedVegetables => "🍆 ירקות ממולאים",
            Category::Soups => "🍲 מרקים",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| ValidationError::UnknownCategory(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "desserts".parse::<Category>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory("desserts".into()));
    }

    #[test]
    fn display_order_is_declaration_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL[0], Category::GrainsAndPasta);
        assert_eq!(Category::ALL[8], Category::Soups);
    }
}
