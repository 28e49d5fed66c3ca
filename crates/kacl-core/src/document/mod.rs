//! Generic markdown document tree
//!
//! The parser and builder both work over this small tagged-element
//! vocabulary rather than raw markdown text.

mod cursor;
mod markdown;
mod tree;

pub use cursor::Cursor;
pub use markdown::parse_document;
pub use tree::Element;
