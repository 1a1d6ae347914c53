//! Saved study resource links.
//!
//! A resource belongs to one subject or, with `subject: None`, to the
//! general pool shared by all of them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Book,
    Video,
    Tool,
    Pdf,
    #[default]
    Website,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 5] = [
        ResourceCategory::Book,
        ResourceCategory::Video,
        ResourceCategory::Tool,
        ResourceCategory::Pdf,
        ResourceCategory::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Book => "book",
            ResourceCategory::Video => "video",
            ResourceCategory::Tool => "tool",
            ResourceCategory::Pdf => "pdf",
            ResourceCategory::Website => "website",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("'{s}' is not one of book, video, tool, pdf, website"),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` for general resources.
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub category: ResourceCategory,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when saving a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub subject: Option<Subject>,
    pub category: ResourceCategory,
}

impl NewResource {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: None,
            subject: None,
            category: ResourceCategory::default(),
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_category(mut self, category: ResourceCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Title must be non-blank and the link an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "must not be empty".into(),
            });
        }
        let parsed = url::Url::parse(self.url.trim()).map_err(|e| ValidationError::InvalidValue {
            field: "url".into(),
            message: format!("'{}': {e}", self.url),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidValue {
                field: "url".into(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(())
    }

    pub(crate) fn into_resource(self, id: String, created_at: DateTime<Utc>) -> Resource {
        Resource {
            id,
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            description: self.description,
            subject: self.subject,
            category: self.category,
            created_at,
        }
    }
}

/// Starter links saved the first time the planner opens.
pub fn default_resources() -> Vec<NewResource> {
    vec![
        NewResource::new(
            "NCERT Physics Solutions",
            "https://ncert.nic.in/textbook.php?leph1=0-10",
        )
        .with_subject(Subject::Physics)
        .with_category(ResourceCategory::Book)
        .with_description("Complete solutions for NCERT Physics textbook"),
        NewResource::new(
            "Khan Academy Chemistry",
            "https://www.khanacademy.org/science/chemistry",
        )
        .with_subject(Subject::Chemistry)
        .with_category(ResourceCategory::Video)
        .with_description("Free online chemistry courses and tutorials"),
        NewResource::new(
            "Math Formula Reference",
            "https://en.wikipedia.org/wiki/List_of_mathematical_formulas",
        )
        .with_subject(Subject::Mathematics)
        .with_category(ResourceCategory::Website)
        .with_description("Comprehensive list of mathematical formulas"),
    ]
}
