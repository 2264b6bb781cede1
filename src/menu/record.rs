use serde::{Deserialize, Serialize};

use super::{Category, ValidatedDraft};
use crate::imaging::HostedImage;

/// Body of `POST /menu`. Only built from a validated draft and a hosted image,
/// so a record without an image URL cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemRecord {
    name: String,
    category: Category,
    price: f64,
    recipe: String,
    image: String,
}

impl MenuItemRecord {
    pub fn new(draft: &ValidatedDraft, hosted: &HostedImage) -> Self {
        MenuItemRecord {
            name: draft.name().to_string(),
            category: draft.category(),
            price: draft.price(),
            recipe: draft.recipe().to_string(),
            image: hosted.display_url.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

/// A menu item as listed by `GET /menu`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuEntry {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub recipe: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
