//! Section → Markdown renderers.
//!
//! Each renderer is a pure function emitting the canonical dialect: a `##`
//! title line followed by the type-specific body. The parsers accept this
//! output byte-for-byte, so render → parse → render is stable.

use crate::models::resume::{Entry, Metadata, Resume, Section, SectionBody, SkillGroup};

/// Pseudo-section id addressing the metadata block.
pub const HEADER_SECTION_ID: &str = "header";
pub const HEADER_TITLE: &str = "Header";

/// Renders one section; id-specific shapes (projects) take precedence over
/// the type default, mirroring the parser dispatch.
pub fn render_section(section: &Section) -> String {
    match (&section.id[..], &section.body) {
        ("projects", SectionBody::Entries { entries }) => render_projects(section, entries),
        (_, SectionBody::Summary { bullets }) => render_summary(section, bullets),
        (_, SectionBody::Skills { groups }) => render_skills(section, groups),
        (_, SectionBody::Entries { entries }) => render_entries(section, entries),
        (_, SectionBody::Raw { content }) => render_raw(section, content),
    }
}

fn render_summary(section: &Section, bullets: &[String]) -> String {
    let mut lines = vec![format!("## {}", section.display_title())];
    for bullet in bullets {
        lines.push(format!("- {bullet}"));
    }
    lines.join("\n")
}

fn render_skills(section: &Section, groups: &[SkillGroup]) -> String {
    let mut lines = vec![format!("## {}", section.display_title())];
    for group in groups {
        lines.push(format!("- {}: {}", group.category, group.items.join(", ")));
    }
    lines.join("\n")
}

/// Experience and generic entries: the em-dash heading shape, location and
/// period segments omitted when empty, blank line between entries.
fn render_entries(section: &Section, entries: &[Entry]) -> String {
    let mut lines = vec![format!("## {}", section.display_title())];
    for entry in entries {
        let mut heading = format!("### {} — {}", entry.title, entry.organization);
        if let Some(location) = entry.location.as_deref().filter(|l| !l.is_empty()) {
            heading.push_str(&format!(" ({location})"));
        }
        if let Some(period) = entry.period.as_deref().filter(|p| !p.is_empty()) {
            heading.push_str(&format!(" | {period}"));
        }
        lines.push(heading);
        for bullet in &entry.bullets {
            lines.push(format!("- {bullet}"));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

/// Projects omit the location segment entirely; the em-dash organization
/// segment appears only when an organization is present.
fn render_projects(section: &Section, entries: &[Entry]) -> String {
    let mut lines = vec![format!("## {}", section.display_title())];
    for entry in entries {
        let mut heading = if entry.organization.is_empty() {
            format!("### {}", entry.title)
        } else {
            format!("### {} — {}", entry.title, entry.organization)
        };
        if let Some(period) = entry.period.as_deref().filter(|p| !p.is_empty()) {
            heading.push_str(&format!(" | {period}"));
        }
        lines.push(heading);
        for bullet in &entry.bullets {
            lines.push(format!("- {bullet}"));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

fn render_raw(section: &Section, content: &str) -> String {
    match &section.title {
        Some(title) if !title.is_empty() => format!("## {title}\n{content}"),
        _ => content.to_string(),
    }
}

/// Header pseudo-section: `key: value` lines, known fields in display order,
/// extension fields after, empty values skipped.
pub fn render_header(metadata: &Metadata) -> String {
    let mut lines = vec![format!("## {HEADER_TITLE}")];
    for (key, value) in metadata.fields_in_order() {
        lines.push(format!("{key}: {value}"));
    }
    lines.join("\n")
}

/// Whole-resume Markdown: contact block, then every section in document
/// order, blank-line separated.
pub fn render_resume(resume: &Resume) -> String {
    let meta = &resume.metadata;
    let contact_lines = [
        format!("# {} {}", meta.first_name, meta.last_name)
            .trim()
            .to_string(),
        meta.position.clone().unwrap_or_default(),
        meta.address.clone().unwrap_or_default(),
        meta.email.clone().unwrap_or_default(),
        meta.mobile.clone().unwrap_or_default(),
        meta.github.clone().unwrap_or_default(),
        meta.linkedin.clone().unwrap_or_default(),
    ];
    let contact = contact_lines
        .iter()
        .filter(|line| !line.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    let mut parts = Vec::new();
    if !contact.is_empty() {
        parts.push(contact);
    }
    for section in &resume.sections {
        parts.push(render_section(section));
    }
    parts.retain(|part| !part.is_empty());
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SkillGroup;
    use crate::transcode::parse::{parse_section, ParseContext};

    const CTX: ParseContext<'static> = ParseContext {
        version: "resume",
        section_id: "roundtrip",
    };

    fn section(id: &str, title: &str, body: SectionBody) -> Section {
        Section {
            id: id.to_string(),
            title: Some(title.to_string()),
            body,
        }
    }

    fn sample_experience() -> Section {
        section(
            "experience",
            "Experience",
            SectionBody::Entries {
                entries: vec![
                    Entry {
                        title: "Software Engineer".to_string(),
                        organization: "NovaTech".to_string(),
                        location: Some("Remote".to_string()),
                        period: Some("2020 - Present".to_string()),
                        bullets: vec!["Built ingestion".to_string(), "Cut latency".to_string()],
                    },
                    Entry {
                        title: "Backend Developer".to_string(),
                        organization: "CloudSphere".to_string(),
                        location: None,
                        period: Some("2017 - 2020".to_string()),
                        bullets: vec!["Ran the warehouse".to_string()],
                    },
                ],
            },
        )
    }

    #[test]
    fn test_render_summary() {
        let section = section(
            "summary",
            "Summary",
            SectionBody::Summary {
                bullets: vec!["First".to_string(), "Second".to_string()],
            },
        );
        assert_eq!(render_section(&section), "## Summary\n- First\n- Second");
    }

    #[test]
    fn test_render_skills_comma_joins_items() {
        let section = section(
            "skills",
            "Skills",
            SectionBody::Skills {
                groups: vec![SkillGroup {
                    category: "Programming".to_string(),
                    items: vec!["Python".to_string(), "Go".to_string()],
                }],
            },
        );
        assert_eq!(
            render_section(&section),
            "## Skills\n- Programming: Python, Go"
        );
    }

    #[test]
    fn test_render_entries_omits_empty_segments() {
        let markdown = render_section(&sample_experience());
        assert!(markdown.contains("### Software Engineer — NovaTech (Remote) | 2020 - Present"));
        assert!(markdown.contains("### Backend Developer — CloudSphere | 2017 - 2020"));
        assert!(!markdown.contains("()"));
    }

    #[test]
    fn test_render_projects_has_no_location_segment() {
        let section = section(
            "projects",
            "Projects",
            SectionBody::Entries {
                entries: vec![Entry {
                    title: "Pipeline".to_string(),
                    organization: String::new(),
                    location: Some("Remote".to_string()),
                    period: Some("2023".to_string()),
                    bullets: vec!["Streamed events".to_string()],
                }],
            },
        );
        let markdown = render_section(&section);
        assert!(markdown.contains("### Pipeline | 2023"));
        assert!(!markdown.contains("Remote"));
    }

    #[test]
    fn test_render_raw_without_title_is_content_only() {
        let section = Section {
            id: "notes".to_string(),
            title: None,
            body: SectionBody::Raw {
                content: "free text".to_string(),
            },
        };
        // display_title would derive "Notes", but raw omits the header when
        // no explicit title is stored.
        assert_eq!(render_raw(&section, "free text"), "free text");
    }

    #[test]
    fn test_render_header_field_order_and_extras() {
        let mut metadata = Metadata {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            position: Some("Engineer".to_string()),
            ..Metadata::default()
        };
        metadata.set("website", "ada.dev".to_string());
        let markdown = render_header(&metadata);
        assert_eq!(
            markdown,
            "## Header\nfirst_name: Ada\nlast_name: Lovelace\nposition: Engineer\nemail: ada@example.com\nwebsite: ada.dev"
        );
    }

    #[test]
    fn test_roundtrip_summary() {
        let original = section(
            "summary",
            "Summary",
            SectionBody::Summary {
                bullets: vec!["One".to_string(), "Two".to_string()],
            },
        );
        let reparsed = parse_section(&render_section(&original), &original, CTX);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_roundtrip_skills() {
        let original = section(
            "skills",
            "Skills",
            SectionBody::Skills {
                groups: vec![
                    SkillGroup {
                        category: "Programming".to_string(),
                        items: vec!["Python".to_string(), "Go".to_string()],
                    },
                    SkillGroup {
                        category: "Cloud".to_string(),
                        items: vec!["AWS".to_string()],
                    },
                ],
            },
        );
        let reparsed = parse_section(&render_section(&original), &original, CTX);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_roundtrip_experience() {
        let original = sample_experience();
        let reparsed = parse_section(&render_section(&original), &original, CTX);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_roundtrip_projects() {
        let original = section(
            "projects",
            "Projects",
            SectionBody::Entries {
                entries: vec![
                    Entry {
                        title: "Recommendation Engine".to_string(),
                        organization: String::new(),
                        location: None,
                        period: Some("2021".to_string()),
                        bullets: vec!["Personalized feeds".to_string()],
                    },
                    Entry {
                        title: "Realtime Pipeline".to_string(),
                        organization: "DataWorks".to_string(),
                        location: None,
                        period: Some("2023".to_string()),
                        bullets: vec!["Stream processing".to_string()],
                    },
                ],
            },
        );
        let reparsed = parse_section(&render_section(&original), &original, CTX);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_roundtrip_raw() {
        let original = section(
            "certifications",
            "Certifications",
            SectionBody::Raw {
                content: "AWS SA Pro, 2023\nCKA, 2022".to_string(),
            },
        );
        let reparsed = parse_section(&render_section(&original), &original, CTX);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_render_resume_contact_block_and_sections() {
        let resume = Resume {
            source: "manual_input".to_string(),
            metadata: Metadata {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                position: Some("Engineer".to_string()),
                email: Some("ada@example.com".to_string()),
                ..Metadata::default()
            },
            sections: vec![section(
                "summary",
                "Summary",
                SectionBody::Summary {
                    bullets: vec!["Leads teams".to_string()],
                },
            )],
        };
        let markdown = render_resume(&resume);
        assert_eq!(
            markdown,
            "# Ada Lovelace\nEngineer\nada@example.com\n\n## Summary\n- Leads teams"
        );
    }
}
