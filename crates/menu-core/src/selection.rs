//! # selection
//!
//! why: represent what the user picked for one category, including "nothing"
//! relations: held per category by builder.rs, sentinel offered by catalog.rs options
//! what: SENTINEL token, Selection enum, CATEGORY=DISH parsing

use crate::category::Category;
use crate::error::ValidationError;

/// reserved token meaning "no dish chosen for this category"
pub const SENTINEL: &str = "-";

/// The choice held for one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// sentinel - category is left out of the menu
    #[default]
    None,
    /// display name of the chosen dish
    Dish(String),
}

impl Selection {
    /// interpret raw form input; the sentinel and blank text mean no dish
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        if name.is_empty() || name == SENTINEL {
            Selection::None
        } else {
            Selection::Dish(name.to_string())
        }
    }

    pub fn dish(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Dish(name) => Some(name),
        }
    }
}

/// parse a `category_key=dish name` pair as given on the command line
pub fn parse_assignment(raw: &str) -> Result<(Category, Selection), ValidationError> {
    let (key, dish) = raw
        .split_once('=')
        .ok_or_else(|| ValidationError::MalformedSelection(raw.to_string()))?;
    let category = key.parse::<Category>()?;
    Ok((category, Selection::parse(dish)))
}
