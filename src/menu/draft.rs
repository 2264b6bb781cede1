//! The menu item form contents and their validation.
//!
//! A [`MenuItemDraft`] is what the admin has typed so far; it is only handed to
//! the network layer as a [`ValidatedDraft`], which can only be obtained from
//! [`MenuItemDraft::validate`].
use thiserror::Error;

use super::Category;
use crate::imaging::ImageFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Recipe name is required")]
    MissingName,
    #[error("Category is required")]
    MissingCategory,
    #[error("Price is required")]
    MissingPrice,
    #[error("Price '{0}' is not a number")]
    InvalidPrice(String),
    #[error("Price must be greater than zero")]
    NonPositivePrice,
    #[error("An image file is required")]
    MissingImage,
    #[error("Image file '{0}' is empty")]
    EmptyImage(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: Option<Category>,
    /// Raw price input, parsed during validation.
    pub price: String,
    pub recipe: Option<String>,
    pub image: Option<ImageFile>,
}

/// A draft that passed validation, with its price parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    name: String,
    category: Category,
    price: f64,
    recipe: String,
    image: ImageFile,
}

impl MenuItemDraft {
    pub fn validate(&self) -> Result<ValidatedDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        let price = parse_price(&self.price)?;
        let image = self.image.as_ref().ok_or(ValidationError::MissingImage)?;
        if image.is_empty() {
            return Err(ValidationError::EmptyImage(image.file_name.clone()));
        }

        Ok(ValidatedDraft {
            name: name.to_string(),
            category,
            price,
            recipe: self.recipe.clone().unwrap_or_default(),
            image: image.clone(),
        })
    }

    /// Clear every field, including the selected file.
    pub fn reset(&mut self) {
        *self = MenuItemDraft::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == MenuItemDraft::default()
    }
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingPrice);
    }
    let price: f64 = raw.parse().map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;
    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice(raw.to_string()));
    }
    if price <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }
    Ok(price)
}

impl ValidatedDraft {
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

    pub fn image(&self) -> &ImageFile {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> MenuItemDraft {
        MenuItemDraft {
            name: "Veg Roll".to_string(),
            category: Some(Category::Salad),
            price: "120".to_string(),
            recipe: None,
            image: Some(ImageFile::new("roll.png", vec![1u8, 2, 3])),
        }
    }

    #[test]
    fn complete_draft_validates() {
        let valid = complete().validate().unwrap();
        assert_eq!(valid.name(), "Veg Roll");
        assert_eq!(valid.price(), 120.0);
        assert_eq!(valid.recipe(), "");
        assert_eq!(valid.category(), Category::Salad);
    }

    #[test]
    fn price_must_be_a_positive_number() {
        let mut draft = complete();
        draft.price = "abc".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPrice("abc".to_string())));

        draft.price = "NaN".to_string();
        assert!(matches!(draft.validate(), Err(ValidationError::InvalidPrice(_))));

        draft.price = "0".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::NonPositivePrice));

        draft.price = " ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::MissingPrice));

        draft.price = " 9.5 ".to_string();
        assert_eq!(draft.validate().unwrap().price(), 9.5);
    }

    #[test]
    fn required_fields() {
        let mut draft = complete();
        draft.name = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));

        let mut draft = complete();
        draft.category = None;
        assert_eq!(draft.validate(), Err(ValidationError::MissingCategory));

        let mut draft = complete();
        draft.image = None;
        assert_eq!(draft.validate(), Err(ValidationError::MissingImage));

        let mut draft = complete();
        draft.image = Some(ImageFile::new("empty.png", Vec::<u8>::new()));
        assert_eq!(draft.validate(), Err(ValidationError::EmptyImage("empty.png".to_string())));
    }

    #[test]
    fn reset_clears_everything() {
        let mut draft = complete();
        draft.recipe = Some("roll it".to_string());
        draft.reset();
        assert!(draft.is_empty());
        assert!(draft.image.is_none());
    }
}
