//! Element tree types

use serde::{Deserialize, Serialize};

/// A node in the generic document tree.
///
/// The builder's generic renderer supports text, headers, paragraphs,
/// inline code, emphasis and links. Bullet lists are only rendered through
/// the category-section path, and `Other` captures markdown constructs
/// outside the vocabulary so the parser can carry them through
/// prelude/epilogue buckets without understanding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// Plain text leaf
    Text(String),
    /// Heading with its level and inline content
    Header { level: u8, content: Vec<Element> },
    /// Paragraph
    Para(Vec<Element>),
    /// Inline code span
    InlineCode(String),
    /// Emphasis
    Em(Vec<Element>),
    /// Link with target and inline content
    Link { href: String, content: Vec<Element> },
    /// Unordered list; each item is its own element list
    BulletList(Vec<Vec<Element>>),
    /// Anything the vocabulary does not cover (code blocks, blockquotes, ...)
    Other { tag: String, content: Vec<Element> },
}

impl Element {
    /// Create a plain text element
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Tag name of this element
    pub fn tag(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Header { .. } => "header",
            Self::Para(_) => "para",
            Self::InlineCode(_) => "inlinecode",
            Self::Em(_) => "em",
            Self::Link { .. } => "link",
            Self::BulletList(_) => "bulletlist",
            Self::Other { tag, .. } => tag,
        }
    }

    /// Heading level, if this is a header
    pub fn header_level(&self) -> Option<u8> {
        match self {
            Self::Header { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check whether this is a header of any level
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// Flatten this element into its visible text
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) | Self::InlineCode(text) => text.clone(),
            Self::Header { content, .. }
            | Self::Para(content)
            | Self::Em(content)
            | Self::Link { content, .. }
            | Self::Other { content, .. } => Self::plain_text_of(content),
            Self::BulletList(items) => items
                .iter()
                .map(|item| Self::plain_text_of(item))
                .collect(),
        }
    }

    /// Flatten an element list into its visible text
    pub fn plain_text_of(elements: &[Element]) -> String {
        elements.iter().map(Element::plain_text).collect()
    }
}
