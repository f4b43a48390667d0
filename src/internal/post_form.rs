use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use strum_macros::Display;

use crate::api::NewDeal;

/// A deal category the form can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: [Category; 6] = [
    Category { id: "tech", icon: "📱", label: "High-Tech" },
    Category { id: "mode", icon: "👕", label: "Fashion" },
    Category { id: "maison", icon: "🏠", label: "Home" },
    Category { id: "gaming", icon: "🎮", label: "Gaming" },
    Category { id: "food", icon: "🍔", label: "Food" },
    Category { id: "travel", icon: "✈️", label: "Travel" },
];

pub const MAX_IMAGES: usize = 3;

/// An amount with up to two decimals, no sign, no grouping.
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("price pattern is valid"));

/// The fields of the deal submission form, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FormField {
    #[default]
    Title,
    CurrentPrice,
    OriginalPrice,
    Link,
    Category,
    PromoCode,
    ExpiresAt,
    Description,
    ImagePath,
}

impl FormField {
    pub fn next(self) -> Self {
        use FormField::*;
        match self {
            Title => CurrentPrice,
            CurrentPrice => OriginalPrice,
            OriginalPrice => Link,
            Link => Category,
            Category => PromoCode,
            PromoCode => ExpiresAt,
            ExpiresAt => Description,
            Description => ImagePath,
            ImagePath => Title,
        }
    }

    pub fn prev(self) -> Self {
        use FormField::*;
        match self {
            Title => ImagePath,
            CurrentPrice => Title,
            OriginalPrice => CurrentPrice,
            Link => OriginalPrice,
            Category => Link,
            PromoCode => Category,
            ExpiresAt => PromoCode,
            Description => ExpiresAt,
            ImagePath => Description,
        }
    }
}

/// State of the deal submission form. Text fields hold raw input; validation
/// happens at submit time and returns either a request payload or the alert
/// message to show, without any network call for invalid input.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub current_price: String,
    pub original_price: String,
    pub link: String,
    pub category: Option<usize>,
    pub promo_code: String,
    /// Expiry date as YYYY-MM-DD; optional.
    pub expires_at: String,
    pub description: String,
    pub image_path: String,
    pub images: Vec<PathBuf>,
    pub field: FormField,
    pub submitting: bool,
}

impl PostForm {
    pub fn focus_next(&mut self) {
        self.field = self.field.next();
    }

    pub fn focus_prev(&mut self) {
        self.field = self.field.prev();
    }

    /// Mutable access to whichever text field has focus. `Category` is
    /// cycled, not typed, so it yields nothing.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        use FormField::*;
        match self.field {
            Title => Some(&mut self.title),
            CurrentPrice => Some(&mut self.current_price),
            OriginalPrice => Some(&mut self.original_price),
            Link => Some(&mut self.link),
            Category => None,
            PromoCode => Some(&mut self.promo_code),
            ExpiresAt => Some(&mut self.expires_at),
            Description => Some(&mut self.description),
            ImagePath => Some(&mut self.image_path),
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let len = CATEGORIES.len();
        self.category = Some(match self.category {
            None => {
                if forward {
                    0
                } else {
                    len - 1
                }
            }
            Some(index) => {
                if forward {
                    (index + 1) % len
                } else {
                    (index + len - 1) % len
                }
            }
        });
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.category.map(|index| CATEGORIES[index])
    }

    /// Add the typed image path to the attachment list, up to the limit.
    pub fn add_image(&mut self) {
        let path = self.image_path.trim();
        if path.is_empty() || self.images.len() >= MAX_IMAGES {
            return;
        }
        self.images.push(PathBuf::from(path));
        self.image_path.clear();
    }

    pub fn remove_last_image(&mut self) {
        self.images.pop();
    }

    /// Validate the form. `Err` carries the alert message and means no
    /// request may be issued.
    pub fn validate(&self) -> Result<NewDeal, String> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.current_price.trim().is_empty()
            || self.original_price.trim().is_empty()
            || self.link.trim().is_empty()
            || self.category.is_none()
        {
            return Err("Please fill in all required fields".to_string());
        }

        let current_price = parse_price(&self.current_price)
            .ok_or_else(|| "Current price must be a valid amount".to_string())?;
        let original_price = parse_price(&self.original_price)
            .ok_or_else(|| "Original price must be a valid amount".to_string())?;

        let expires_at = match self.expires_at.trim() {
            "" => None,
            raw => Some(parse_expiry(raw).ok_or_else(|| {
                "Expiry date must be a valid date (YYYY-MM-DD)".to_string()
            })?),
        };

        let promo_code = match self.promo_code.trim() {
            "" => None,
            code => Some(code.to_string()),
        };

        Ok(NewDeal {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            current_price,
            original_price,
            link: self.link.trim().to_string(),
            category: CATEGORIES[self.category.unwrap_or(0)].id.to_string(),
            promo_code,
            expires_at,
            images: self.images.clone(),
        })
    }

    /// Clear every field after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !PRICE_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Accept a bare date and forward it as an ISO-8601 instant at midnight UTC.
fn parse_expiry(raw: &str) -> Option<String> {
    let date: jiff::civil::Date = raw.parse().ok()?;
    Some(format!("{date}T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> PostForm {
        PostForm {
            title: "iPhone 15 Pro -20%".to_string(),
            current_price: "899.00".to_string(),
            original_price: "1129".to_string(),
            link: "https://example.com/deal".to_string(),
            category: Some(0),
            description: "Great phone deal".to_string(),
            ..PostForm::default()
        }
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut form = filled_form();
        form.link.clear();
        let error = form.validate().unwrap_err();
        assert_eq!(error, "Please fill in all required fields");
    }

    #[test]
    fn missing_category_is_rejected() {
        let mut form = filled_form();
        form.category = None;
        assert!(form.validate().is_err());
    }

    #[test]
    fn malformed_price_is_rejected() {
        let mut form = filled_form();
        form.current_price = "12,50".to_string();
        let error = form.validate().unwrap_err();
        assert!(error.contains("Current price"));
    }

    #[test]
    fn valid_form_builds_payload() {
        let deal = filled_form().validate().unwrap();
        assert_eq!(deal.current_price, 899.0);
        assert_eq!(deal.original_price, 1129.0);
        assert_eq!(deal.category, "tech");
        assert_eq!(deal.promo_code, None);
        assert_eq!(deal.expires_at, None);
    }

    #[test]
    fn expiry_date_is_forwarded_as_iso() {
        let mut form = filled_form();
        form.expires_at = "2026-09-01".to_string();
        let deal = form.validate().unwrap();
        assert_eq!(deal.expires_at.as_deref(), Some("2026-09-01T00:00:00Z"));
    }

    #[test]
    fn bad_expiry_date_is_rejected() {
        let mut form = filled_form();
        form.expires_at = "tomorrow".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn image_limit_is_enforced() {
        let mut form = PostForm::default();
        for i in 0..5 {
            form.image_path = format!("/tmp/img{i}.jpg");
            form.add_image();
        }
        assert_eq!(form.images.len(), MAX_IMAGES);
    }

    #[test]
    fn category_cycles_in_both_directions() {
        let mut form = PostForm::default();
        form.cycle_category(true);
        assert_eq!(form.selected_category().unwrap().id, "tech");
        form.cycle_category(false);
        assert_eq!(form.selected_category().unwrap().id, "travel");
    }

    #[test]
    fn field_traversal_wraps_around() {
        let mut field = FormField::Title;
        for _ in 0..9 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::ImagePath);
    }
}
