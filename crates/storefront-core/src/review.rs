//! Product reviews: the draft a shopper edits, the validated payload sent to
//! the API, and the records/pages the API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the trimmed comment length, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;
/// Upper bound on the trimmed title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Identifier of a catalog item (product) that reviews are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Client-side validation failures. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a rating is required")]
    MissingRating,

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("comment must not be empty")]
    EmptyComment,

    #[error("comment is {len} characters; the limit is {max}", max = MAX_COMMENT_CHARS)]
    CommentTooLong { len: usize },

    #[error("title is {len} characters; the limit is {max}", max = MAX_TITLE_CHARS)]
    TitleTooLong { len: usize },
}

/// Editable review form state. Owned by the submission form until submit
/// or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: Option<u8>,
    pub comment: String,
    pub title: Option<String>,
}

impl ReviewDraft {
    /// Checks the draft and produces the payload to send.
    ///
    /// The comment and title are trimmed; a blank title is dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found, checking rating, then
    /// comment, then title.
    pub fn validate(&self) -> Result<NewReview, DraftError> {
        let rating = self.rating.ok_or(DraftError::MissingRating)?;
        if !(1..=5).contains(&rating) {
            return Err(DraftError::RatingOutOfRange(rating));
        }

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(DraftError::EmptyComment);
        }
        let len = comment.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(DraftError::CommentTooLong { len });
        }

        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => {
                let len = t.chars().count();
                if len > MAX_TITLE_CHARS {
                    return Err(DraftError::TitleTooLong { len });
                }
                Some(t.to_owned())
            }
            _ => None,
        };

        Ok(NewReview {
            rating,
            comment: comment.to_owned(),
            title,
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Validated review payload for the create-review call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Some backends omit the timestamp when echoing a freshly created
    /// review.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of reviews plus the server's pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub pagination: Pagination,
}

impl ReviewPage {
    /// Arithmetic mean of the ratings on this page, `None` when empty.
    ///
    /// This is not the item's true average once the server holds more
    /// reviews than fit on one page; see [`ReviewPage::is_complete`].
    #[must_use]
    pub fn page_average(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.reviews.len() as f64;
        Some(f64::from(sum) / count)
    }

    /// `true` when this page holds every review the server reports.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reviews.len() as u64 >= self.pagination.total
    }
}
