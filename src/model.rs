use serde::Deserialize;
use std::fmt;

/// Placeholder stored when a post has no readable first comment.
pub const NO_COMMENT: &str = "no comment available";

/// Inclusive, 1-based window of listing positions to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TargetRange {
    pub start: usize,
    pub end: usize,
}

impl TargetRange {
    /// Build a range, rejecting `start == 0` and `start > end`.
    pub fn new(start: usize, end: usize) -> crate::Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.start == 0 {
            return Err(crate::Error::Config("range.start must be at least 1".into()));
        }
        if self.start > self.end {
            return Err(crate::Error::Config(format!(
                "range.start ({}) must not exceed range.end ({})",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Number of posts the range selects.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Zero-based listing indices covered by the range.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start - 1..self.end
    }
}

impl fmt::Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One rendered entry of the listing, as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingItem {
    pub id: String,
    pub title: String,
}

/// What was read for a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// 1-based position in the listing.
    pub position: usize,
    pub id: String,
    pub title: String,
    /// Trimmed first comment, or [`NO_COMMENT`].
    pub first_comment: String,
}

impl ExtractionResult {
    pub fn has_comment(&self) -> bool {
        self.first_comment != NO_COMMENT
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.position)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Comment: {}", self.first_comment)?;
        write!(f, "{}", "-".repeat(40))
    }
}
