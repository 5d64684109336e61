//! Product draft

use super::{Draft, FormContext};
use crate::core::validation::{not_blank, positive_amount};
use crate::core::{
    FieldValidationError, Product, ProductPayload, RecordId, ValidationError,
};
use validator::Validate;

/// Working copy of a product
///
/// Optional text fields are edited as plain strings; an empty string is sent
/// as such, which is what the backend stores for "no description".
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductDraft {
    pub id: Option<RecordId>,

    #[validate(custom(function = "not_blank"))]
    pub name: String,

    pub description: String,

    pub price: f64,

    #[validate(required(message = "a category must be selected"))]
    pub category_id: Option<RecordId>,

    pub image_url: String,
}

impl Draft for ProductDraft {
    type Record = Product;

    fn blank(ctx: &FormContext<'_>) -> Self {
        Self {
            category_id: ctx.selected_category,
            ..Self::default()
        }
    }

    fn from_record(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            category_id: Some(product.category_id),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn payload(&self, ctx: &FormContext<'_>) -> Result<ProductPayload, ValidationError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ValidationError::from(errors).fields().to_vec(),
        };

        if let Err(err) = positive_amount(self.price) {
            let message = err
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            errors.push(FieldValidationError::new("price", message));
        }

        if let Some(category_id) = self.category_id {
            let known = ctx.categories.is_empty()
                || ctx.categories.iter().any(|c| c.id == category_id);
            if !known {
                errors.push(FieldValidationError::new(
                    "category_id",
                    format!("category {} does not exist", category_id),
                ));
            }
        }

        match (errors.is_empty(), self.category_id) {
            (true, Some(category_id)) => Ok(ProductPayload {
                name: self.name.trim().to_string(),
                description: self.description.clone(),
                price: self.price,
                category_id,
                image_url: self.image_url.trim().to_string(),
            }),
            _ => {
                errors.sort_by(|a, b| a.field.cmp(&b.field));
                Err(ValidationError::FieldErrors(errors))
            }
        }
    }
}
