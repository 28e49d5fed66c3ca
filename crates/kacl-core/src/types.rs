//! Changelog domain model

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::builder;
use crate::document::Element;
use crate::error::Result;
use crate::parser;

/// Default changelog file name
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// A single change-log line item: one bullet-list item's element list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Inline content of the item
    pub content: Vec<Element>,
}

impl Entry {
    /// Create an entry from an element list
    pub fn new(content: Vec<Element>) -> Self {
        Self { content }
    }

    /// Create a one-line plain-text entry
    pub fn text(description: impl Into<String>) -> Self {
        Self {
            content: vec![Element::Text(description.into())],
        }
    }
}

/// Change categories recognized by Keep a Changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// New features
    Added,
    /// Changes to existing functionality
    Changed,
    /// Removed features
    Removed,
    /// Soon-to-be-removed features
    Deprecated,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
}

impl Category {
    /// Fixed emission order used by the builder
    pub const CANONICAL: [Category; 6] = [
        Category::Added,
        Category::Changed,
        Category::Removed,
        Category::Deprecated,
        Category::Fixed,
        Category::Security,
    ];

    /// Section title for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Removed => "Removed",
            Self::Deprecated => "Deprecated",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Section titles must match verbatim; only exact canonical titles
    /// round-trip through the builder.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Added" => Ok(Self::Added),
            "Changed" => Ok(Self::Changed),
            "Removed" => Ok(Self::Removed),
            "Deprecated" => Ok(Self::Deprecated),
            "Fixed" => Ok(Self::Fixed),
            "Security" => Ok(Self::Security),
            _ => Err(()),
        }
    }
}

/// Version of a release: the upcoming sentinel or a validated semver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseVersion {
    /// Not yet released ("Unreleased" in the document)
    Upcoming,
    /// A released semantic version
    Semver(semver::Version),
}

impl ReleaseVersion {
    /// Check whether this is the upcoming sentinel
    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Upcoming)
    }

    /// Match a version query: either sentinel spelling (case-insensitive)
    /// for upcoming, or the exact version text.
    pub fn matches(&self, query: &str) -> bool {
        match self {
            Self::Upcoming => {
                query.eq_ignore_ascii_case("unreleased") || query.eq_ignore_ascii_case("upcoming")
            }
            Self::Semver(version) => version.to_string() == query,
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upcoming => f.write_str("upcoming"),
            Self::Semver(version) => write!(f, "{}", version),
        }
    }
}

/// Per-category change entries for one release.
///
/// `None` covers both "the category did not appear" and "its heading had no
/// bullet list"; the builder emits nothing either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub added: Option<Vec<Entry>>,
    pub changed: Option<Vec<Entry>>,
    pub removed: Option<Vec<Entry>>,
    pub deprecated: Option<Vec<Entry>>,
    pub fixed: Option<Vec<Entry>>,
    pub security: Option<Vec<Entry>>,
}

impl Sections {
    /// Entries for a category, if the section is present
    pub fn get(&self, category: Category) -> Option<&[Entry]> {
        self.slot(category).as_deref()
    }

    /// Replace the entries for a category
    pub fn set(&mut self, category: Category, entries: Option<Vec<Entry>>) {
        *self.slot_mut(category) = entries;
    }

    /// Entry list for a category, creating an empty one if absent
    pub fn get_or_insert(&mut self, category: Category) -> &mut Vec<Entry> {
        self.slot_mut(category).get_or_insert_with(Vec::new)
    }

    /// Check whether no category has any entries
    pub fn is_empty(&self) -> bool {
        Category::CANONICAL
            .iter()
            .all(|category| self.get(*category).map_or(true, |entries| entries.is_empty()))
    }

    fn slot(&self, category: Category) -> &Option<Vec<Entry>> {
        match category {
            Category::Added => &self.added,
            Category::Changed => &self.changed,
            Category::Removed => &self.removed,
            Category::Deprecated => &self.deprecated,
            Category::Fixed => &self.fixed,
            Category::Security => &self.security,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<Vec<Entry>> {
        match category {
            Category::Added => &mut self.added,
            Category::Changed => &mut self.changed,
            Category::Removed => &mut self.removed,
            Category::Deprecated => &mut self.deprecated,
            Category::Fixed => &mut self.fixed,
            Category::Security => &mut self.security,
        }
    }
}

/// A section whose title is outside the canonical vocabulary.
///
/// Parsed and retained on the model, never re-emitted by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraSection {
    /// Section title as it appeared in the document
    pub title: String,
    /// Bullet-list entries, if the section had a bullet list
    pub entries: Option<Vec<Entry>>,
}

/// One changelog release entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Release version or the upcoming sentinel
    pub version: ReleaseVersion,
    /// Release date; only meaningful for released versions
    pub date: Option<NaiveDate>,
    /// Original heading content, retained for non-standard titles
    pub title: Vec<Element>,
    /// Elements between the release heading and the first section
    pub prelude: Vec<Element>,
    /// Canonical category sections
    pub sections: Sections,
    /// Non-canonical sections
    pub extra_sections: Vec<ExtraSection>,
    /// Elements after the last section, before the next release heading
    pub epilogue: Vec<Element>,
}

impl Release {
    /// Create an empty release for a version
    pub fn new(version: ReleaseVersion) -> Self {
        Self {
            version,
            date: None,
            title: Vec::new(),
            prelude: Vec::new(),
            sections: Sections::default(),
            extra_sections: Vec::new(),
            epilogue: Vec::new(),
        }
    }

    /// Create an empty upcoming release
    pub fn upcoming() -> Self {
        let mut release = Self::new(ReleaseVersion::Upcoming);
        release.title = vec![Element::text("Upcoming")];
        release
    }

    /// Set the release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// The parsed changelog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changelog {
    /// Elements before the first release heading
    pub prelude: Vec<Element>,
    /// Releases in document order, newest/Unreleased first by convention
    pub releases: Vec<Release>,
    /// Elements after the last release
    pub epilogue: Vec<Element>,
}

impl Changelog {
    /// Parse changelog markdown into a model
    pub fn parse(text: &str) -> Self {
        parser::parse(text)
    }

    /// Render the model back to markdown
    pub fn build(&self) -> Result<String> {
        builder::build(self)
    }

    /// Read and parse a changelog file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Render and write the changelog to a file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.build()?)?;
        Ok(())
    }

    /// Find a release by version text ("unreleased"/"upcoming" match the
    /// sentinel case-insensitively)
    pub fn release(&self, version: &str) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release.version.matches(version))
    }

    /// Append a one-line entry to a category of the upcoming release,
    /// creating that release at the front of the list if absent.
    pub fn add_unreleased(&mut self, category: Category, description: impl Into<String>) {
        let index = match self
            .releases
            .iter()
            .position(|release| release.version.is_upcoming())
        {
            Some(index) => index,
            None => {
                self.releases.insert(0, Release::upcoming());
                0
            }
        };
        self.releases[index]
            .sections
            .get_or_insert(category)
            .push(Entry::text(description));
    }

    /// Append a one-line entry to the Changed category of the upcoming release
    pub fn add_unreleased_change(&mut self, description: impl Into<String>) {
        self.add_unreleased(Category::Changed, description);
    }
}
