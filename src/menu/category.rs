use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Menu sections offered by the admin form. The wire value is the lowercase
/// variant name; `label` is what the form shows next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salad,
    Pizza,
    Soup,
    Dessert,
    Drinks,
    Popular,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Salad,
        Category::Pizza,
        Category::Soup,
        Category::Dessert,
        Category::Drinks,
        Category::Popular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salad => "salad",
            Category::Pizza => "pizza",
            Category::Soup => "soup",
            Category::Dessert => "dessert",
            Category::Drinks => "drinks",
            Category::Popular => "popular",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Salad => "Chinese",
            Category::Pizza => "Paratha",
            Category::Soup => "Bread Omelette",
            Category::Dessert => "Dessert",
            Category::Drinks => "Drinks",
            Category::Popular => "Rice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
