//! Render the changelog model back to markdown
//!
//! Output is normalized: category sections appear in canonical order, the
//! upcoming release renders as "Upcoming", and the document ends with
//! exactly one trailing newline.

use tracing::debug;

use crate::document::Element;
use crate::error::{KaclError, Result};
use crate::types::{Category, Changelog, Entry, Release, ReleaseVersion};

/// Render a changelog model to markdown text. Fails on elements outside
/// the supported vocabulary, returning no partial output.
pub fn build(changelog: &Changelog) -> Result<String> {
    let mut output = String::new();
    output.push_str(&render_elements(&changelog.prelude, "")?);
    output.push('\n');
    for release in &changelog.releases {
        output.push_str(&render_release(release)?);
    }
    output.push('\n');
    output.push_str(&render_elements(&changelog.epilogue, "")?);

    debug!(
        release_count = changelog.releases.len(),
        output_len = output.len(),
        "changelog rendered"
    );

    Ok(format!("{}\n", output.trim()))
}

/// Render an element list joined with a separator
pub fn render_elements(elements: &[Element], separator: &str) -> Result<String> {
    let rendered: Vec<String> = elements
        .iter()
        .map(render_element)
        .collect::<Result<_>>()?;
    Ok(rendered.join(separator))
}

fn render_element(element: &Element) -> Result<String> {
    match element {
        Element::Text(text) => Ok(text.clone()),
        Element::Header { level, content } => Ok(format!(
            "{} {}\n",
            "#".repeat(usize::from(*level)),
            render_elements(content, "")?
        )),
        Element::Para(content) => Ok(format!("{}\n", render_elements(content, "")?)),
        Element::InlineCode(code) => Ok(format!("`{}`", code)),
        Element::Em(content) => Ok(format!("*{}*", render_elements(content, "")?)),
        Element::Link { href, content } => {
            Ok(format!("[{}]({})", render_elements(content, "")?, href))
        }
        // Bullet lists only render through the category-section path
        other => Err(KaclError::UnknownTag(other.tag().to_string())),
    }
}

fn render_release(release: &Release) -> Result<String> {
    let mut output = format!("## {}\n", release_title(release));
    for category in Category::CANONICAL {
        if let Some(entries) = release.sections.get(category) {
            if entries.is_empty() {
                continue;
            }
            output.push_str(&render_section(category, entries)?);
        }
    }
    Ok(output)
}

fn release_title(release: &Release) -> String {
    match (&release.version, release.date) {
        (ReleaseVersion::Upcoming, _) => "Upcoming".to_string(),
        (ReleaseVersion::Semver(version), None) => version.to_string(),
        (ReleaseVersion::Semver(version), Some(date)) => {
            format!("{} - {}", version, date.format("%Y-%m-%d"))
        }
    }
}

fn render_section(category: Category, entries: &[Entry]) -> Result<String> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let rendered = render_elements(&entry.content, "")?;
        items.push(format!("- {}", indent(&rendered, 2).trim()));
    }
    Ok(format!("### {}\n{}\n\n", category, items.join("\n")))
}

/// Prefix every line so multi-line entries stay inside their list item
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::Sections;
    use chrono::NaiveDate;

    fn release(version: semver::Version) -> Release {
        Release::new(ReleaseVersion::Semver(version))
    }

    #[test]
    fn test_release_title_forms() {
        let upcoming = Release::upcoming();
        assert_eq!(release_title(&upcoming), "Upcoming");

        let plain = release(semver::Version::new(1, 0, 0));
        assert_eq!(release_title(&plain), "1.0.0");

        let dated = release(semver::Version::new(1, 0, 0))
            .with_date(NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"));
        assert_eq!(release_title(&dated), "1.0.0 - 2020-01-01");
    }

    #[test]
    fn test_build_canonical_section_order() {
        let mut release = release(semver::Version::new(2, 0, 0));
        // Populate out of canonical order
        release
            .sections
            .get_or_insert(Category::Security)
            .push(Entry::text("patch CVE"));
        release
            .sections
            .get_or_insert(Category::Added)
            .push(Entry::text("new thing"));

        let changelog = Changelog {
            prelude: vec![],
            releases: vec![release],
            epilogue: vec![],
        };
        let text = changelog.build().expect("build");

        assert_eq!(
            text,
            "## 2.0.0\n### Added\n- new thing\n\n### Security\n- patch CVE\n"
        );
    }

    #[test]
    fn test_empty_and_absent_sections_are_skipped() {
        let mut release = release(semver::Version::new(1, 0, 0));
        release.sections.set(Category::Added, Some(vec![]));
        release.sections.set(Category::Fixed, None);

        let changelog = Changelog {
            prelude: vec![],
            releases: vec![release],
            epilogue: vec![],
        };

        assert_eq!(changelog.build().expect("build"), "## 1.0.0\n");
    }

    #[test]
    fn test_inline_vocabulary_rendering() {
        let changelog = Changelog {
            prelude: vec![
                Element::Header {
                    level: 1,
                    content: vec![Element::text("Changelog")],
                },
                Element::Para(vec![
                    Element::text("See "),
                    Element::Link {
                        href: "https://keepachangelog.com".to_string(),
                        content: vec![Element::Em(vec![Element::text("the format site")])],
                    },
                    Element::text(" and "),
                    Element::InlineCode("kacl".to_string()),
                    Element::text("."),
                ]),
            ],
            releases: vec![],
            epilogue: vec![],
        };

        let text = changelog.build().expect("build");
        assert_eq!(
            text,
            "# Changelog\nSee [*the format site*](https://keepachangelog.com) and `kacl`.\n"
        );
    }

    #[test]
    fn test_multi_line_entry_is_indented() {
        let mut release = release(semver::Version::new(1, 0, 0));
        release
            .sections
            .get_or_insert(Category::Changed)
            .push(Entry::new(vec![
                Element::text("first line"),
                Element::text("\n"),
                Element::text("second line"),
            ]));

        let changelog = Changelog {
            prelude: vec![],
            releases: vec![release],
            epilogue: vec![],
        };
        let text = changelog.build().expect("build");

        assert!(text.contains("- first line\n  second line"));
    }

    #[test]
    fn test_unknown_tag_aborts_build() {
        let changelog = Changelog {
            prelude: vec![Element::Other {
                tag: "strikethrough".to_string(),
                content: vec![Element::text("gone")],
            }],
            releases: vec![],
            epilogue: vec![],
        };

        match changelog.build() {
            Err(KaclError::UnknownTag(tag)) => assert_eq!(tag, "strikethrough"),
            other => panic!("expected UnknownTag, got {:?}", other),
        }
    }

    #[test]
    fn test_bullet_list_rejected_by_generic_renderer() {
        let changelog = Changelog {
            prelude: vec![Element::BulletList(vec![vec![Element::text("item")]])],
            releases: vec![],
            epilogue: vec![],
        };

        assert!(matches!(
            changelog.build(),
            Err(KaclError::UnknownTag(tag)) if tag == "bulletlist"
        ));
    }

    #[test]
    fn test_extra_sections_are_not_emitted() {
        let text = "## 1.0.0\n\n### Notes\n\n- a note\n\n### Fixed\n\n- a fix\n";
        let built = parse(text).build().expect("build");

        assert!(!built.contains("Notes"));
        assert!(built.contains("### Fixed\n- a fix\n"));
    }

    #[test]
    fn test_round_trip_on_canonical_document() {
        let text = "\
# Changelog

All notable changes to this project.

## Upcoming
### Added
- upcoming work

## 1.1.0 - 2021-06-15
### Added
- new flag
- new `parse` API

### Fixed
- crash on *empty* input

## 1.0.0 - 2020-01-01
### Added
- initial release
";
        let first = parse(text);
        let rebuilt = first.build().expect("build");
        let second = parse(&rebuilt);

        assert_eq!(first, second);
    }

    #[test]
    fn test_idempotent_build() {
        let text = "\
# Changelog

## Unreleased
### Changed
- in flight

## 2.3.1 - 2022-11-02
### Deprecated
- old API

### Security
- dependency bump
";
        let once = parse(text).build().expect("build");
        let twice = parse(&once).build().expect("build");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalizes_section_order_and_sentinel() {
        let text = "## upcoming\n\n### Fixed\n\n- a fix\n\n### Added\n\n- a feature\n";
        let built = parse(text).build().expect("build");

        assert_eq!(
            built,
            "## Upcoming\n### Added\n- a feature\n\n### Fixed\n- a fix\n"
        );
    }

    #[test]
    fn test_sections_default_is_empty() {
        assert!(Sections::default().is_empty());
    }
}
