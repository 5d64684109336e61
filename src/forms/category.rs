//! Category draft

use super::{Draft, FormContext};
use crate::core::validation::not_blank;
use crate::core::{Category, CategoryPayload, RecordId, ValidationError};
use validator::Validate;

/// Working copy of a category
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CategoryDraft {
    pub id: Option<RecordId>,

    #[validate(custom(function = "not_blank"))]
    pub name: String,

    pub description: String,
}

impl Draft for CategoryDraft {
    type Record = Category;

    fn blank(_ctx: &FormContext<'_>) -> Self {
        Self::default()
    }

    fn from_record(category: &Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn payload(&self, _ctx: &FormContext<'_>) -> Result<CategoryPayload, ValidationError> {
        self.validate()?;
        Ok(CategoryPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
        })
    }
}
