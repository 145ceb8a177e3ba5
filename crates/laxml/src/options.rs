//! Parser configuration.

use laxml_source_map::FileId;

/// What the tree builder does with a close tag that does not match the
/// innermost open element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CloseTagPolicy {
    /// Close intervening elements with warnings, ignore close tags that
    /// match nothing.
    #[default]
    Recover,
    /// Fail on the first mismatched or unmatched close tag.
    Strict,
}

/// Options for [`crate::parse_with_options`].
///
/// ```
/// use laxml::{CloseTagPolicy, ParseOptions};
/// use laxml_source_map::FileId;
///
/// let options = ParseOptions::strict().with_file_id(FileId(3));
/// assert_eq!(options.close_tags, CloseTagPolicy::Strict);
/// assert_eq!(options.file_id, FileId(3));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub close_tags: CloseTagPolicy,
    /// File attached to diagnostics built from this parse.
    pub file_id: FileId,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self::default().with_close_tags(CloseTagPolicy::Strict)
    }

    pub fn with_close_tags(mut self, policy: CloseTagPolicy) -> Self {
        self.close_tags = policy;
        self
    }

    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }
}
