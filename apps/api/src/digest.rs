//! Resume digest — a lightweight per-version summary for quick scanning.

use serde::Serialize;

use crate::models::resume::{Resume, SectionBody};

const MAX_SUMMARY_BULLETS: usize = 3;
const MAX_SKILLS: usize = 12;
const MAX_ENTRIES: usize = 6;

/// Metadata keys surfaced in a digest.
const DIGEST_METADATA_KEYS: [&str; 5] = ["position", "email", "mobile", "github", "linkedin"];

#[derive(Debug, Serialize)]
pub struct ResumeDigest {
    pub metadata: Vec<(String, String)>,
    pub highlights: Highlights,
}

#[derive(Debug, Serialize)]
pub struct Highlights {
    pub summary: Vec<String>,
    pub skills: Vec<String>,
    pub entries: Vec<String>,
}

/// Builds the digest: filtered metadata plus order-preserving deduplicated
/// highlights drawn from the summary, skills, and experience/projects
/// sections.
pub fn summarize_resume(resume: &Resume) -> ResumeDigest {
    let mut summary_bullets = Vec::new();
    let mut skills = Vec::new();
    let mut entry_lines = Vec::new();

    for section in &resume.sections {
        match &section.body {
            SectionBody::Summary { bullets } => summary_bullets.extend(bullets.iter().cloned()),
            SectionBody::Skills { groups } => {
                for group in groups {
                    skills.extend(group.items.iter().cloned());
                }
            }
            SectionBody::Entries { entries }
                if section.id == "experience" || section.id == "projects" =>
            {
                for entry in entries {
                    let title = entry.title.trim();
                    let organization = entry.organization.trim();
                    let line = match (title.is_empty(), organization.is_empty()) {
                        (false, false) => format!("{title} - {organization}"),
                        (false, true) => title.to_string(),
                        (true, false) => organization.to_string(),
                        (true, true) => continue,
                    };
                    entry_lines.push(line);
                }
            }
            _ => {}
        }
    }

    let metadata = DIGEST_METADATA_KEYS
        .iter()
        .filter_map(|key| {
            resume
                .metadata
                .get(key)
                .map(|value| (key.to_string(), value.to_string()))
        })
        .collect();

    ResumeDigest {
        metadata,
        highlights: Highlights {
            summary: dedupe_preserve_order(summary_bullets, MAX_SUMMARY_BULLETS),
            skills: dedupe_preserve_order(skills, MAX_SKILLS),
            entries: dedupe_preserve_order(entry_lines, MAX_ENTRIES),
        },
    }
}

/// Deduplicates trimmed items keeping first-seen order, up to `limit`.
fn dedupe_preserve_order(items: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for item in items {
        let normalized = item.trim().to_string();
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }
        result.push(normalized);
        if result.len() >= limit {
            break;
        }
    }
    result
}
