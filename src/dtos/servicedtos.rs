use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn validate_price(price: &BigDecimal) -> Result<(), validator::ValidationError> {
    if *price <= BigDecimal::from(0) {
        return Err(validator::ValidationError::new("price_not_positive"));
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(custom = "validate_price")]
    pub price: BigDecimal,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    pub location: Option<String>,

    /// Insertion order is display order; the first URL becomes the cover.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServiceDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(custom = "validate_price")]
    pub price: BigDecimal,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceQueryDto {
    pub search: Option<String>,
    pub category: Option<String>,
}
