//! Client-supplied note fields and their validation.

use notely_core::error::{NotelyError, NotelyResult};
use serde::Deserialize;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Body of a create or update request.
///
/// Both fields are optional at the serde level so that a missing field
/// is reported by [`NoteInput::validate`] with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Check presence and length limits, returning the trimmed title and
    /// the content as given.
    pub fn validate(self) -> NotelyResult<(String, String)> {
        let title = self
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NotelyError::validation("title is required"))?;
        let content = self
            .content
            .ok_or_else(|| NotelyError::validation("content is required"))?;

        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(NotelyError::validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(NotelyError::validation(format!(
                "content must be at most {MAX_CONTENT_CHARS} characters"
            )));
        }
        Ok((title, content))
    }
}
