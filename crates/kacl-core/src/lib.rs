//! kacl-core - Keep a Changelog parsing and rendering
//!
//! Converts Keep-a-Changelog-style markdown into a structured, queryable
//! model and renders the model back to normalized markdown. The two
//! directions are inverses over documents built from the recognized
//! vocabulary.

pub mod builder;
pub mod document;
pub mod error;
pub mod parser;
pub mod types;

pub use builder::build;
pub use document::Element;
pub use error::{KaclError, Result};
pub use parser::parse;
pub use types::{
    Category, Changelog, Entry, ExtraSection, Release, ReleaseVersion, Sections, CHANGELOG_FILE,
};
