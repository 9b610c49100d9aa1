//! Update/merge protocol — resolve, parse, write back.
//!
//! Each mutation is a complete load → mutate-in-memory → save cycle over one
//! document. Sections are replaced by id with the freshly parsed value; the
//! header pseudo-section goes through the metadata-merge path instead of the
//! section list.

use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::Section;
use crate::store::DocumentStore;
use crate::transcode::parse::{parse_header_markdown, parse_section, ParseContext};
use crate::transcode::render::{render_header, render_section, HEADER_SECTION_ID};
use crate::transcode::resolve::{resolve_section, resolve_section_index};

/// `"version/section"` locator used by the tool-facing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLocator {
    pub version: String,
    pub section_id: String,
}

impl FromStr for SectionLocator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((version, section_id)) = trimmed.split_once('/') else {
            return Err(AppError::Validation(
                "Module path must follow 'version/section' format.".to_string(),
            ));
        };
        Ok(SectionLocator {
            version: version.to_string(),
            section_id: section_id.to_string(),
        })
    }
}

/// What an update produced: the merged metadata keys, or the final section.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Metadata { updated_keys: Vec<String> },
    Section { section: Section },
}

const EDIT_INSTRUCTIONS: &str = "<!-- Edit the markdown below. Preserve headings and bullet structure so we can parse updates reliably. -->";

/// Renders one section (or the header pseudo-section) as editable Markdown.
pub fn load_section_markdown(
    store: &dyn DocumentStore,
    locator: &SectionLocator,
) -> Result<String, AppError> {
    let resume = store.load(&locator.version)?;
    let markdown = if locator.section_id == HEADER_SECTION_ID {
        render_header(&resume.metadata)
    } else {
        render_section(resolve_section(&resume, &locator.section_id)?)
    };
    Ok(format!("{EDIT_INSTRUCTIONS}\n\n{markdown}"))
}

/// Applies edited Markdown to one section and persists the whole document.
///
/// Parsers rebuild the section's content lists from scratch, so applying the
/// same Markdown twice stores the same structure.
pub fn update_section_from_markdown(
    store: &dyn DocumentStore,
    locator: &SectionLocator,
    markdown: &str,
) -> Result<UpdateOutcome, AppError> {
    let markdown = markdown.trim();
    let mut resume = store.load(&locator.version)?;

    if locator.section_id == HEADER_SECTION_ID {
        let updates = parse_header_markdown(markdown);
        if updates.is_empty() {
            return Err(AppError::EmptyMetadataUpdate);
        }
        let updated_keys = resume.metadata.merge(updates);
        store.save(&locator.version, &resume)?;
        info!(
            version = %locator.version,
            keys = %updated_keys.join(", "),
            "merged header metadata"
        );
        return Ok(UpdateOutcome::Metadata { updated_keys });
    }

    let index = resolve_section_index(&resume, &locator.section_id)?;
    let ctx = ParseContext {
        version: &locator.version,
        section_id: &locator.section_id,
    };
    let updated = parse_section(markdown, &resume.sections[index], ctx);
    resume.sections[index] = updated.clone();
    store.save(&locator.version, &resume)?;
    info!(
        version = %locator.version,
        section_id = %locator.section_id,
        "updated section from markdown"
    );
    Ok(UpdateOutcome::Section { section: updated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionBody;
    use crate::store::{FsDocumentStore, BASE_VERSION};
    use tempfile::tempdir;

    fn open_store() -> (tempfile::TempDir, FsDocumentStore) {
        let dir = tempdir().unwrap();
        let store = FsDocumentStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn locator(section_id: &str) -> SectionLocator {
        SectionLocator {
            version: BASE_VERSION.to_string(),
            section_id: section_id.to_string(),
        }
    }

    #[test]
    fn test_locator_requires_slash() {
        assert!(SectionLocator::from_str("resume").is_err());
        let locator = SectionLocator::from_str("resume/summary").unwrap();
        assert_eq!(locator.version, "resume");
        assert_eq!(locator.section_id, "summary");
    }

    #[test]
    fn test_locator_splits_on_first_slash_only() {
        let locator = SectionLocator::from_str("resume/extra/id").unwrap();
        assert_eq!(locator.section_id, "extra/id");
    }

    #[test]
    fn test_load_section_markdown_prepends_instructions() {
        let (_dir, store) = open_store();
        let markdown = load_section_markdown(&store, &locator("summary")).unwrap();
        assert!(markdown.starts_with("<!--"));
        assert!(markdown.contains("## Summary"));
    }

    #[test]
    fn test_header_merge_preserves_unspecified_fields() {
        let (_dir, store) = open_store();
        let before = store.load(BASE_VERSION).unwrap();
        let email_before = before.metadata.email.clone();

        let outcome = update_section_from_markdown(
            &store,
            &locator("header"),
            "position: Staff Engineer\n",
        )
        .unwrap();
        match outcome {
            UpdateOutcome::Metadata { updated_keys } => {
                assert_eq!(updated_keys, vec!["position".to_string()])
            }
            other => panic!("expected metadata outcome, got {other:?}"),
        }

        let after = store.load(BASE_VERSION).unwrap();
        assert_eq!(after.metadata.position.as_deref(), Some("Staff Engineer"));
        assert_eq!(after.metadata.email, email_before);
    }

    #[test]
    fn test_header_update_with_no_pairs_is_rejected_without_mutation() {
        let (_dir, store) = open_store();
        let before = store.load(BASE_VERSION).unwrap();
        let err =
            update_section_from_markdown(&store, &locator("header"), "## Header\nno pairs here")
                .unwrap_err();
        assert!(matches!(err, AppError::EmptyMetadataUpdate));
        assert_eq!(store.load(BASE_VERSION).unwrap(), before);
    }

    #[test]
    fn test_section_update_replaces_by_id() {
        let (_dir, store) = open_store();
        let markdown = "## Summary\n- Rebuilt bullet one\n- Rebuilt bullet two\n";
        update_section_from_markdown(&store, &locator("summary"), markdown).unwrap();

        let resume = store.load(BASE_VERSION).unwrap();
        let section = resume.section_by_id("summary").unwrap();
        assert_eq!(
            section.body,
            SectionBody::Summary {
                bullets: vec![
                    "Rebuilt bullet one".to_string(),
                    "Rebuilt bullet two".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let (_dir, store) = open_store();
        let markdown = "## Experience\n### Engineer — NovaTech (Remote) | 2020 - Present\n- Did things\n";
        update_section_from_markdown(&store, &locator("experience"), markdown).unwrap();
        let first = store.load(BASE_VERSION).unwrap();
        update_section_from_markdown(&store, &locator("experience"), markdown).unwrap();
        let second = store.load(BASE_VERSION).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_section_reports_fuzzy_suggestion() {
        let (_dir, store) = open_store();
        let err = update_section_from_markdown(&store, &locator("work experience"), "- x")
            .unwrap_err();
        assert!(err.to_string().contains("did you mean 'experience'?"));
    }
}
