//! Admin post form validation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Slug;

use super::post::PostInput;

/// Raw create/update submission. Every field is optional so that missing
/// fields surface as form errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default, rename = "_action")]
    pub action: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Per-field error messages, serialized with `null` for valid fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostFormErrors {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

impl PostFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.markdown.is_none()
    }
}

/// Delete submission, only the slug is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteForm {
    pub slug: Slug,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_slug(raw: Option<&str>) -> Result<Slug, String> {
    let raw = raw.ok_or_else(|| "Slug is required".to_string())?;
    Slug::parse(raw)
        .map_err(|_| "Slug may only contain lowercase letters, numbers and hyphens".to_string())
}

impl PostForm {
    pub fn is_delete(&self) -> bool {
        self.action.as_deref() == Some("delete")
    }

    /// Validates a create/update submission.
    pub fn validate(&self) -> Result<PostInput, PostFormErrors> {
        let mut errors = PostFormErrors::default();

        let title = present(&self.title);
        if title.is_none() {
            errors.title = Some("Title is required".to_string());
        }
        let slug = match check_slug(present(&self.slug)) {
            Ok(slug) => Some(slug),
            Err(message) => {
                errors.slug = Some(message);
                None
            }
        };
        // Markdown bodies keep their whitespace; only emptiness is an error.
        let markdown = self.markdown.as_deref().filter(|m| !m.trim().is_empty());
        if markdown.is_none() {
            errors.markdown = Some("Markdown is required".to_string());
        }

        match (title, slug, markdown) {
            (Some(title), Some(slug), Some(markdown)) => Ok(PostInput {
                slug,
                title: title.to_string(),
                markdown: markdown.to_string(),
                description: present(&self.description).map(str::to_string),
                draft: self.draft,
            }),
            _ => Err(errors),
        }
    }

    /// Validates a delete submission.
    pub fn validate_delete(&self) -> Result<DeleteForm, PostFormErrors> {
        check_slug(present(&self.slug))
            .map(|slug| DeleteForm { slug })
            .map_err(|message| PostFormErrors {
                slug: Some(message),
                ..PostFormErrors::default()
            })
    }
}
