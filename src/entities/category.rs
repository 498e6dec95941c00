//! Category entity

use crate::core::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A product category, addressed in URLs by its English title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub english_title: String,
    pub logo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: impl Into<String>, english_title: impl Into<String>, logo: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            english_title: english_title.into(),
            logo: logo.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Category {
    fn resource_name() -> &'static str {
        "categories"
    }

    fn resource_name_singular() -> &'static str {
        "category"
    }

    fn slug_field() -> &'static str {
        "englishTitle"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn slug_source(&self) -> &str {
        &self.english_title
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Form fields accepted when creating or editing a category
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 64, message = "title is required and at most 64 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 64, message = "englishTitle is required and at most 64 characters"),
        custom(function = "crate::core::validation::english_phrase")
    )]
    pub english_title: String,
}
