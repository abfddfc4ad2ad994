//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its closed category set.
//! - Normalize and validate caller-supplied field values.
//!
//! # Invariants
//! - `id` is stable and never reused for another note in the same collection.
//! - `title` and `content` are trimmed and non-empty after any mutation.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a note.
///
/// New notes receive a random UUID v4 string. Documents produced elsewhere
/// may carry any non-empty string, so the wire form stays an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Closed set of note categories used for filtering and stats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Work,
    Personal,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::General, Category::Work, Category::Personal];

    /// Wire/storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Work => "work",
            Self::Personal => "personal",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            _ => Err(CategoryParseError(value.to_string())),
        }
    }
}

/// Raised when a label is outside the closed category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl Display for CategoryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category `{}`; expected general|work|personal",
            self.0
        )
    }
}

impl Error for CategoryParseError {}

/// Validation failures for note field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
    /// Identifier is an empty string.
    EmptyId,
    /// `updated_at` precedes `created_at`.
    TimestampOrder {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::EmptyId => write!(f, "note id must not be empty"),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({}) must be >= createdAt ({})",
                updated_at.to_rfc3339(),
                created_at.to_rfc3339()
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Field values supplied by a caller for add/edit use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub is_pinned: bool,
}

impl NoteDraft {
    /// Creates an unpinned draft.
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            is_pinned: false,
        }
    }

    /// Sets the pin flag.
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    /// Returns a trimmed copy, rejecting empty title or content.
    ///
    /// Title is checked before content.
    pub fn normalize(&self) -> Result<NoteDraft, NoteValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }

        Ok(NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            category: self.category,
            is_pinned: self.is_pinned,
        })
    }
}

/// Canonical note record. Also the element shape of the serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note from a draft that has already passed
    /// [`NoteDraft::normalize`]; both timestamps are set to `now`.
    pub fn from_draft(id: NoteId, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            is_pinned: draft.is_pinned,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks record-level invariants.
    ///
    /// Used on read paths so persisted documents cannot smuggle in notes the
    /// write paths would have refused.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.as_str().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Whether the note was changed after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
