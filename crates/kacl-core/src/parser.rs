//! Parse a markdown document tree into the changelog model
//!
//! Release boundaries are level-2 headings whose text is a semantic version
//! (optionally `v`-prefixed) or an unreleased sentinel; category sections
//! are level-3 headings over bullet lists. Everything the grammar does not
//! classify flows into prelude/epilogue buckets, so parsing is total.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::document::{parse_document, Cursor, Element};
use crate::types::{Category, Changelog, Entry, ExtraSection, Release, ReleaseVersion};

/// Leading `major.minor.patch`, optionally `v`-prefixed
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+\.\d+\.\d+)").expect("Invalid regex"));

/// Unreleased sentinel spellings
static UNRELEASED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(unreleased|upcoming)$").expect("Invalid regex"));

/// Trailing ISO date
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));

/// Parse changelog markdown into a model. Total: malformed structure ends
/// up in prelude/epilogue buckets rather than failing.
pub fn parse(text: &str) -> Changelog {
    parse_tree(parse_document(text))
}

/// Parse an already-built element tree into a model
pub fn parse_tree(elements: Vec<Element>) -> Changelog {
    let mut cursor = Cursor::new(elements);

    let prelude = cursor.take_until(is_release_header);
    let releases = cursor.parse_repeated(parse_release);
    let epilogue = cursor.rest();

    debug!(
        release_count = releases.len(),
        prelude_len = prelude.len(),
        epilogue_len = epilogue.len(),
        "changelog parsed"
    );

    Changelog {
        prelude,
        releases,
        epilogue,
    }
}

/// A level-2 heading that looks like a release boundary
fn is_release_header(element: &Element) -> bool {
    if element.header_level() != Some(2) {
        return false;
    }
    let text = element.plain_text();
    VERSION_RE.is_match(&text) || UNRELEASED_RE.is_match(&text)
}

fn parse_release(cursor: &mut Cursor) -> Option<Release> {
    // Classify before consuming: a heading that looks version-like but
    // fails semver validation is not a release boundary, and release
    // scanning stops there.
    let (version, date, title) = match cursor.peek() {
        Some(Element::Header { level: 2, content }) => {
            let (version, date) = classify_title(&Element::plain_text_of(content))?;
            (version, date, content.clone())
        }
        _ => return None,
    };
    cursor.pop();

    let mut release = Release::new(version);
    release.date = date;
    release.title = title;
    release.prelude = cursor.take_until(Element::is_header);

    for section in cursor.parse_repeated(|c| parse_section(c, 3)) {
        match Category::from_str(&section.title) {
            Ok(category) => release.sections.set(category, section.entries),
            Err(()) => release.extra_sections.push(ExtraSection {
                title: section.title,
                entries: section.entries,
            }),
        }
    }

    release.epilogue = cursor.take_until(is_release_header);
    Some(release)
}

/// Classify a release heading's text into version and date
fn classify_title(text: &str) -> Option<(ReleaseVersion, Option<NaiveDate>)> {
    if UNRELEASED_RE.is_match(text) {
        return Some((ReleaseVersion::Upcoming, None));
    }

    let captures = VERSION_RE.captures(text)?;
    let version = semver::Version::parse(&captures[1]).ok()?;

    let date = DATE_RE
        .find(text)
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok());

    Some((ReleaseVersion::Semver(version), date))
}

struct Section {
    title: String,
    entries: Option<Vec<Entry>>,
}

fn parse_section(cursor: &mut Cursor, level: u8) -> Option<Section> {
    let title = match cursor.peek() {
        Some(Element::Header {
            level: header_level,
            content,
        }) if *header_level == level => Element::plain_text_of(content),
        _ => return None,
    };
    cursor.pop();

    // Section content runs to the next heading at this level or above;
    // only a leading bullet list contributes entries.
    let content = cursor.take_until(|el| matches!(el.header_level(), Some(l) if l <= level));
    let entries = match content.into_iter().next() {
        Some(Element::BulletList(items)) => Some(items.into_iter().map(Entry::new).collect()),
        _ => None,
    };

    Some(Section { title, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_and_date_classification() {
        let changelog = parse("## 1.2.3 - 2020-01-01\n");

        assert_eq!(changelog.releases.len(), 1);
        let release = &changelog.releases[0];
        assert_eq!(
            release.version,
            ReleaseVersion::Semver(semver::Version::new(1, 2, 3))
        );
        assert_eq!(release.date, NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn test_v_prefixed_version() {
        let changelog = parse("## v2.0.0\n");

        assert_eq!(
            changelog.releases[0].version,
            ReleaseVersion::Semver(semver::Version::new(2, 0, 0))
        );
        assert_eq!(changelog.releases[0].date, None);
    }

    #[test]
    fn test_unreleased_precedes_versions() {
        let changelog = parse("## Unreleased\n\n## 1.0.0\n");

        assert_eq!(changelog.releases.len(), 2);
        assert!(changelog.releases[0].version.is_upcoming());
        assert_eq!(
            changelog.releases[1].version,
            ReleaseVersion::Semver(semver::Version::new(1, 0, 0))
        );
    }

    #[test]
    fn test_upcoming_spelling_and_case() {
        assert!(parse("## upcoming\n").releases[0].version.is_upcoming());
        assert!(parse("## UNRELEASED\n").releases[0].version.is_upcoming());
    }

    #[test]
    fn test_incomplete_version_is_not_a_release() {
        let changelog = parse("intro\n\n## 99.99\n\ncontent\n");

        assert!(changelog.releases.is_empty());
        // Everything stays in the prelude bucket
        assert_eq!(changelog.prelude.len(), 3);
        assert!(changelog.epilogue.is_empty());
    }

    #[test]
    fn test_invalid_semver_stops_release_scanning() {
        // Leading zeros match the version shape but fail semver validation
        let changelog = parse("## 1.0.0\n\n## 01.2.3\n\n### Added\n\n- dropped\n");

        assert_eq!(changelog.releases.len(), 1);
        // The bad heading and everything after it land in the epilogue
        assert_eq!(changelog.epilogue.len(), 3);
        assert_eq!(changelog.epilogue[0].plain_text(), "01.2.3");
    }

    #[test]
    fn test_release_sections() {
        let text = "\
## 1.1.0 - 2021-06-15

Short note.

### Added

- new flag
- new `parse` API

### Fixed

- crash on empty input

Trailing remark.
";
        let changelog = parse(text);
        let release = &changelog.releases[0];

        assert_eq!(release.prelude.len(), 1);
        let added = release.sections.get(Category::Added).expect("Added");
        assert_eq!(added.len(), 2);
        assert_eq!(added[0], Entry::text("new flag"));
        let fixed = release.sections.get(Category::Fixed).expect("Fixed");
        assert_eq!(fixed.len(), 1);
        assert!(release.sections.get(Category::Removed).is_none());
    }

    #[test]
    fn test_section_without_bullet_list_recovers_as_absent() {
        let changelog = parse("## 1.0.0\n\n### Added\n\nJust prose, no list.\n");

        let release = &changelog.releases[0];
        assert_eq!(release.sections.get(Category::Added), None);
        assert!(release.extra_sections.is_empty());
    }

    #[test]
    fn test_non_canonical_section_goes_to_extras() {
        let changelog = parse("## 1.0.0\n\n### Notes\n\n- a note\n");

        let release = &changelog.releases[0];
        assert!(release.sections.is_empty());
        assert_eq!(release.extra_sections.len(), 1);
        assert_eq!(release.extra_sections[0].title, "Notes");
        assert_eq!(
            release.extra_sections[0].entries,
            Some(vec![Entry::text("a note")])
        );
    }

    #[test]
    fn test_lowercase_section_title_is_not_canonical() {
        let changelog = parse("## 1.0.0\n\n### added\n\n- x\n");

        assert!(changelog.releases[0].sections.is_empty());
        assert_eq!(changelog.releases[0].extra_sections[0].title, "added");
    }

    #[test]
    fn test_document_prelude() {
        let text = "\
# Changelog

All notable changes.

## 0.1.0

### Added

- everything
";
        let changelog = parse(text);

        assert_eq!(changelog.prelude.len(), 2);
        assert_eq!(changelog.releases.len(), 1);
        assert!(changelog.epilogue.is_empty());
    }

    #[test]
    fn test_release_epilogue_after_unclassified_heading() {
        let text = "\
## 0.1.0

#### Notes

Closing words.

## 0.0.1
";
        let changelog = parse(text);

        assert_eq!(changelog.releases.len(), 2);
        // The level-4 heading is not a section, so it and its prose stay
        // with the release as epilogue
        assert_eq!(changelog.releases[0].epilogue.len(), 2);
    }

    #[test]
    fn test_reference_linked_release_heading() {
        let text = "\
## [1.0.0] - 2020-01-01

### Added

- initial release

[1.0.0]: https://example.com/releases/1.0.0
";
        let changelog = parse(text);

        assert_eq!(changelog.releases.len(), 1);
        assert_eq!(
            changelog.releases[0].version,
            ReleaseVersion::Semver(semver::Version::new(1, 0, 0))
        );
        assert_eq!(
            changelog.releases[0].date,
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
    }

    #[test]
    fn test_impossible_date_is_dropped() {
        let changelog = parse("## 1.0.0 - 2020-13-99\n");

        assert_eq!(changelog.releases.len(), 1);
        assert_eq!(changelog.releases[0].date, None);
    }

    #[test]
    fn test_date_must_be_trailing() {
        let changelog = parse("## 1.0.0 - 2020-01-01 (beta)\n");

        assert_eq!(changelog.releases[0].date, None);
    }
}
