//! Magazine articles.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MagazineId, Timestamp, ValidationError};

/// Number of articles returned when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Upper bound on a single listing.
pub const MAX_LIST_LIMIT: u32 = 50;

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub id: MagazineId,
    pub image_url: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub created_at: Timestamp,
}

/// A validated article submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMagazine {
    pub image_url: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
}

impl NewMagazine {
    /// Validates an article submission.
    ///
    /// Text fields must be non-blank. Tags are trimmed and blank tags are
    /// dropped; an empty tag list is stored as no tags.
    pub fn new(
        image_url: Option<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let category = required("category", category.into())?;
        let title = required("title", title.into())?;
        let description = required("description", description.into())?;
        let content = required("content", content.into())?;

        let image_url = image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let tags = tags
            .map(|tags| {
                tags.into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|tags| !tags.is_empty());

        Ok(Self {
            image_url,
            category,
            title,
            description,
            content,
            tags,
        })
    }

    /// Materializes the submission with a fresh id.
    pub fn into_magazine(self, id: MagazineId, created_at: Timestamp) -> Magazine {
        Magazine {
            id,
            image_url: self.image_url,
            category: self.category,
            title: self.title,
            description: self.description,
            content: self.content,
            tags: self.tags,
            created_at,
        }
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(tags: Option<Vec<String>>) -> Result<NewMagazine, ValidationError> {
        NewMagazine::new(
            None,
            "culture",
            "Autumn reading list",
            "Ten books for long evenings",
            "Body text",
            tags,
        )
    }

    #[test]
    fn accepts_complete_submission() {
        let m = submission(None).unwrap();
        assert_eq!(m.title, "Autumn reading list");
        assert!(m.tags.is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewMagazine::new(None, "culture", "   ", "d", "c", None).unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn category_is_checked_first() {
        let err = NewMagazine::new(None, "", "", "", "", None).unwrap_err();
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        let m = submission(Some(vec![
            " books ".to_string(),
            "".to_string(),
            "  ".to_string(),
            "autumn".to_string(),
        ]))
        .unwrap();
        assert_eq!(m.tags, Some(vec!["books".to_string(), "autumn".to_string()]));
    }

    #[test]
    fn all_blank_tags_become_none() {
        let m = submission(Some(vec![" ".to_string()])).unwrap();
        assert!(m.tags.is_none());
    }

    #[test]
    fn blank_image_url_becomes_none() {
        let m = NewMagazine::new(Some(" ".to_string()), "c", "t", "d", "x", None).unwrap();
        assert!(m.image_url.is_none());
    }

    #[test]
    fn into_magazine_keeps_fields() {
        let id = MagazineId::new();
        let now = Timestamp::now();
        let m = submission(Some(vec!["a".to_string()])).unwrap().into_magazine(id, now);
        assert_eq!(m.id, id);
        assert_eq!(m.created_at, now);
        assert_eq!(m.category, "culture");
    }
}
