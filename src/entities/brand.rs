//! Brand entity

use crate::core::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A product brand, addressed in URLs by its English name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub english_name: String,
    /// File name of the logo under the brand upload directory
    pub logo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    pub fn new(name: impl Into<String>, english_name: impl Into<String>, logo: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            english_name: english_name.into(),
            logo: logo.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Brand {
    fn resource_name() -> &'static str {
        "brands"
    }

    fn resource_name_singular() -> &'static str {
        "brand"
    }

    fn slug_field() -> &'static str {
        "englishName"
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
        &self.english_name
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Form fields accepted when creating or editing a brand
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BrandInput {
    #[validate(length(min = 1, max = 64, message = "name is required and at most 64 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 64, message = "englishName is required and at most 64 characters"),
        custom(function = "crate::core::validation::english_phrase")
    )]
    pub english_name: String,
}
