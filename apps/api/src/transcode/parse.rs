//! Markdown → section parsers, one per section kind.
//!
//! Every parser consumes the edited Markdown together with the stored section
//! and returns a NEW section value; the update protocol replaces the old one
//! by id. A parser fully rebuilds its bullets/groups/entries/content from the
//! input, so re-applying the same Markdown is idempotent. Heading lines that
//! match no grammar are logged and dropped; the surrounding entry stays open
//! so later bullets still attach.

use tracing::{debug, error};

use crate::models::resume::{Entry, Section, SectionBody, SkillGroup};
use crate::transcode::grammar::{
    self, HeadingFields, EDUCATION_HEADINGS, EXPERIENCE_HEADINGS, PROJECT_HEADINGS,
};

/// Where a parse came from; carried for logging only.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub version: &'a str,
    pub section_id: &'a str,
}

type SectionParser = fn(&str, &Section, ParseContext) -> Section;

/// Id-specific parser overrides. A section with id `education` stores
/// entries-shaped data but needs the education grammars, so dispatch checks
/// the id before falling back to the section type.
fn id_override(section_id: &str) -> Option<SectionParser> {
    match section_id {
        "experience" => Some(parse_experience),
        "projects" => Some(parse_projects),
        "education" => Some(parse_education),
        _ => None,
    }
}

fn type_default(body: &SectionBody) -> SectionParser {
    match body {
        SectionBody::Summary { .. } => parse_summary,
        SectionBody::Skills { .. } => parse_skills,
        SectionBody::Entries { .. } => parse_experience,
        SectionBody::Raw { .. } => parse_raw,
    }
}

/// Parses `markdown` into a replacement for `section`, dispatching by id
/// first and section type second.
pub fn parse_section(markdown: &str, section: &Section, ctx: ParseContext) -> Section {
    let parser = id_override(&section.id).unwrap_or_else(|| type_default(&section.body));
    debug!(
        version = ctx.version,
        section_id = ctx.section_id,
        section_type = section.body.type_name(),
        "parsing section markdown"
    );
    parser(markdown, section, ctx)
}

/// Header pseudo-section: every non-blank, non-heading line containing `:`
/// becomes a `key: value` pair, in input order.
pub fn parse_header_markdown(markdown: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for raw_line in markdown.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    pairs
}

/// Summary: every non-heading, non-blank line is a bullet; a leading `-` or
/// `*` marker is stripped, bare lines are taken verbatim.
pub fn parse_summary(markdown: &str, section: &Section, _ctx: ParseContext) -> Section {
    let mut title = section.title.clone();
    let mut bullets = Vec::new();
    for line in markdown.trim().lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if stripped.starts_with('#') {
            title = Some(heading_text(stripped));
            continue;
        }
        bullets.push(strip_bullet_marker(stripped).to_string());
    }
    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Summary { bullets },
    }
}

/// Skills: each `- ` line splits once on the first `:` into category and a
/// `,`/`;`-separated item list; bold markers are stripped from both sides.
/// A line with no `:` becomes a category with an empty item list.
pub fn parse_skills(markdown: &str, section: &Section, _ctx: ParseContext) -> Section {
    let mut title = section.title.clone();
    let mut groups = Vec::new();
    for line in markdown.trim().lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if stripped.starts_with('#') {
            title = Some(heading_text(stripped));
            continue;
        }
        let Some(content) = stripped.strip_prefix('-').map(str::trim) else {
            continue;
        };
        let group = match content.split_once(':') {
            Some((category, items)) => SkillGroup {
                category: strip_bold_open(category.trim()).to_string(),
                items: items
                    .split([',', ';'])
                    .map(|item| strip_bold_enclosing(item.trim()))
                    .filter(|item| !item.is_empty())
                    .collect(),
            },
            None => SkillGroup {
                category: strip_bold_pair(content).to_string(),
                items: Vec::new(),
            },
        };
        groups.push(group);
    }
    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Skills { groups },
    }
}

/// Experience and generic entries: `###` headings through the em-dash/pipe
/// chain, quoted-bold lines as a fallback heading form, bullets attached to
/// the open entry.
pub fn parse_experience(markdown: &str, section: &Section, ctx: ParseContext) -> Section {
    let mut title = section.title.clone();
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for line in markdown.trim().lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if let Some(text) = section_title_text(stripped) {
            title = Some(text);
            continue;
        }
        if stripped.starts_with("###") {
            match grammar::match_first(EXPERIENCE_HEADINGS, stripped) {
                Some(fields) => open_entry(&mut entries, &mut current, fields),
                None => log_unmatched_heading(ctx, stripped),
            }
            continue;
        }
        if let Some(fields) = grammar::match_quoted_entry(stripped) {
            open_entry(&mut entries, &mut current, fields);
            continue;
        }
        attach_bullet(&mut current, stripped);
    }
    flush_entry(&mut entries, &mut current);

    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Entries { entries },
    }
}

/// Projects: organization-qualified headings before title-only ones; no
/// quoted fallback, organization defaults to empty for the simple form.
pub fn parse_projects(markdown: &str, section: &Section, ctx: ParseContext) -> Section {
    let mut title = section.title.clone();
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for line in markdown.trim().lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if let Some(text) = section_title_text(stripped) {
            title = Some(text);
            continue;
        }
        if stripped.starts_with("###") {
            match grammar::match_first(PROJECT_HEADINGS, stripped) {
                Some(fields) => open_entry(&mut entries, &mut current, fields),
                None => log_unmatched_heading(ctx, stripped),
            }
            continue;
        }
        attach_bullet(&mut current, stripped);
    }
    flush_entry(&mut entries, &mut current);

    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Entries { entries },
    }
}

/// Education: `###` headings through the general chain, plus the bold forms —
/// `**Degree**, University | Period` on one line, or `**Degree**` alone with
/// the university on the following non-bullet line.
pub fn parse_education(markdown: &str, section: &Section, ctx: ParseContext) -> Section {
    let mut title = section.title.clone();
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;
    let mut pending_degree: Option<String> = None;

    for line in markdown.trim().lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if let Some(text) = section_title_text(stripped) {
            title = Some(text);
            continue;
        }
        if stripped.starts_with("###") {
            pending_degree = None;
            match grammar::match_first(EDUCATION_HEADINGS, stripped) {
                Some(fields) => open_entry(&mut entries, &mut current, fields),
                None => log_unmatched_heading(ctx, stripped),
            }
            continue;
        }
        if stripped.starts_with("**") {
            if let Some(fields) = grammar::match_education_bold(stripped) {
                open_entry(&mut entries, &mut current, fields);
                pending_degree = None;
            } else if let Some(degree) = grammar::match_bold_degree_only(stripped) {
                flush_entry(&mut entries, &mut current);
                pending_degree = Some(degree);
            } else {
                log_unmatched_heading(ctx, stripped);
            }
            continue;
        }
        if pending_degree.is_some() && !stripped.starts_with('-') {
            if let Some((organization, period)) = grammar::match_university_line(stripped) {
                if let Some(degree) = pending_degree.take() {
                    open_entry(
                        &mut entries,
                        &mut current,
                        HeadingFields {
                            title: degree,
                            organization,
                            location: String::new(),
                            period,
                        },
                    );
                }
                continue;
            }
        }
        attach_bullet(&mut current, stripped);
    }
    flush_entry(&mut entries, &mut current);

    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Entries { entries },
    }
}

/// Raw: a leading `#` line becomes the title, everything after it the
/// content; otherwise the whole input is the content, verbatim.
pub fn parse_raw(markdown: &str, section: &Section, _ctx: ParseContext) -> Section {
    let trimmed = markdown.trim();
    let (title, content) = match trimmed.lines().next() {
        Some(first) if first.starts_with('#') => {
            let body = trimmed
                .split_once('\n')
                .map(|(_, rest)| rest)
                .unwrap_or("");
            (Some(heading_text(first)), body.trim().to_string())
        }
        _ => (section.title.clone(), trimmed.to_string()),
    };
    Section {
        id: section.id.clone(),
        title,
        body: SectionBody::Raw { content },
    }
}

fn open_entry(entries: &mut Vec<Entry>, current: &mut Option<Entry>, fields: HeadingFields) {
    flush_entry(entries, current);
    *current = Some(Entry {
        title: fields.title,
        organization: fields.organization,
        location: non_empty(fields.location),
        period: non_empty(fields.period),
        bullets: Vec::new(),
    });
}

fn flush_entry(entries: &mut Vec<Entry>, current: &mut Option<Entry>) {
    if let Some(entry) = current.take() {
        entries.push(entry);
    }
}

fn attach_bullet(current: &mut Option<Entry>, line: &str) {
    let Some(entry) = current.as_mut() else {
        return;
    };
    if let Some(text) = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
    {
        entry.bullets.push(text.trim().to_string());
    }
}

fn log_unmatched_heading(ctx: ParseContext, line: &str) {
    error!(
        version = ctx.version,
        section_id = ctx.section_id,
        line,
        "failed to match entry heading"
    );
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Text of any heading line, all leading hashes stripped.
fn heading_text(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}

/// `## text` exactly (two hashes, not three) sets the section title.
fn section_title_text(line: &str) -> Option<String> {
    if line.starts_with("##") && !line.starts_with("###") {
        Some(heading_text(line))
    } else {
        None
    }
}

fn strip_bullet_marker(line: &str) -> &str {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .map(str::trim)
        .unwrap_or(line)
}

/// Strips one pair of enclosing `**` markers from a skill category, keeping
/// everything after the closing marker; a missing closing marker just drops
/// the opening one.
fn strip_bold_open(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("**") else {
        return text;
    };
    match rest.find("**") {
        Some(end) => rest[..end].trim_end(),
        None => rest.trim(),
    }
}

/// Strips `**` from the start and end of a skill item independently.
fn strip_bold_enclosing(text: &str) -> String {
    let text = text.strip_prefix("**").map(str::trim).unwrap_or(text);
    let text = text.strip_suffix("**").map(str::trim_end).unwrap_or(text);
    text.to_string()
}

/// Strips a full `**…**` pair from a no-colon category line.
fn strip_bold_pair(text: &str) -> &str {
    text.strip_prefix("**")
        .and_then(|rest| rest.strip_suffix("**"))
        .map(str::trim)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: ParseContext<'static> = ParseContext {
        version: "resume",
        section_id: "test",
    };

    fn summary_section(bullets: &[&str]) -> Section {
        Section {
            id: "summary".to_string(),
            title: Some("Summary".to_string()),
            body: SectionBody::Summary {
                bullets: bullets.iter().map(|b| b.to_string()).collect(),
            },
        }
    }

    fn entries_section(id: &str) -> Section {
        Section {
            id: id.to_string(),
            title: None,
            body: SectionBody::Entries { entries: vec![] },
        }
    }

    fn entries_of(section: &Section) -> &[Entry] {
        match &section.body {
            SectionBody::Entries { entries } => entries,
            other => panic!("expected entries body, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_summary_accepts_markers_and_bare_lines() {
        let markdown = "## Summary\n- Led a platform team\n* Shipped the billing rewrite\nMentored four engineers\n";
        let parsed = parse_summary(markdown, &summary_section(&[]), CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Summary {
                bullets: vec![
                    "Led a platform team".to_string(),
                    "Shipped the billing rewrite".to_string(),
                    "Mentored four engineers".to_string(),
                ]
            }
        );
        assert_eq!(parsed.title.as_deref(), Some("Summary"));
    }

    #[test]
    fn test_reparse_replaces_bullets_not_appends() {
        let existing = summary_section(&["old one", "old two", "old three"]);
        let parsed = parse_summary("- only bullet\n", &existing, CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Summary {
                bullets: vec!["only bullet".to_string()]
            }
        );
    }

    #[test]
    fn test_skills_strips_bold_from_category_and_items() {
        let markdown = "## Skills\n- **Programming:** Python, JavaScript, Go\n";
        let parsed = parse_skills(markdown, &entries_section("skills"), CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Skills {
                groups: vec![SkillGroup {
                    category: "Programming".to_string(),
                    items: vec![
                        "Python".to_string(),
                        "JavaScript".to_string(),
                        "Go".to_string()
                    ],
                }]
            }
        );
    }

    #[test]
    fn test_skills_tolerates_missing_closing_bold() {
        let parsed = parse_skills("- **Cloud: AWS; GCP\n", &entries_section("skills"), CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Skills {
                groups: vec![SkillGroup {
                    category: "Cloud".to_string(),
                    items: vec!["AWS".to_string(), "GCP".to_string()],
                }]
            }
        );
    }

    #[test]
    fn test_skills_line_without_colon_is_bare_category() {
        let parsed = parse_skills("- **Leadership**\n", &entries_section("skills"), CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Skills {
                groups: vec![SkillGroup {
                    category: "Leadership".to_string(),
                    items: vec![],
                }]
            }
        );
    }

    #[test]
    fn test_experience_multiple_entries_and_quoted_fallback() {
        let markdown = "\
## Experience
### Software Engineer — NovaTech (Remote) | 2020 - Present
- Built the ingestion service
- Cut p99 latency in half
'**Data Engineer | ByteWorks | 2017 - 2020**'
- Maintained the warehouse
";
        let parsed = parse_experience(markdown, &entries_section("experience"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Software Engineer");
        assert_eq!(entries[0].location.as_deref(), Some("Remote"));
        assert_eq!(entries[0].bullets.len(), 2);
        assert_eq!(entries[1].organization, "ByteWorks");
        assert_eq!(entries[1].location, None);
        assert_eq!(entries[1].bullets, vec!["Maintained the warehouse"]);
    }

    #[test]
    fn test_malformed_heading_dropped_bullets_attach_to_prior_entry() {
        let markdown = "\
### Software Engineer — NovaTech | 2020 - Present
- First bullet
### not a recognizable heading
- Still belongs to NovaTech
";
        let parsed = parse_experience(markdown, &entries_section("experience"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].bullets,
            vec!["First bullet", "Still belongs to NovaTech"]
        );
    }

    #[test]
    fn test_malformed_heading_before_any_entry_drops_bullets() {
        let markdown = "### broken heading\n- orphaned bullet\n";
        let parsed = parse_experience(markdown, &entries_section("experience"), CTX);
        assert!(entries_of(&parsed).is_empty());
    }

    #[test]
    fn test_projects_simple_form_defaults_empty_organization() {
        let markdown = "\
## Projects
### Recommendation Engine | 2021
- Collaborative filtering with deep learning
### Realtime Pipeline — DataWorks | 2023
- Stream processing at scale
";
        let parsed = parse_projects(markdown, &entries_section("projects"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].organization, "");
        assert_eq!(entries[0].period.as_deref(), Some("2021"));
        assert_eq!(entries[1].organization, "DataWorks");
    }

    #[test]
    fn test_education_two_line_bold_form() {
        let markdown = "\
## Education
**M.S. Computer Science**
Stanford University | 2016 - 2018
- GPA: 3.9/4.0
**B.S. Computer Science**, MIT | 2012 - 2016
- Relevant coursework: Algorithms
";
        let parsed = parse_education(markdown, &entries_section("education"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "M.S. Computer Science");
        assert_eq!(entries[0].organization, "Stanford University");
        assert_eq!(entries[0].period.as_deref(), Some("2016 - 2018"));
        assert_eq!(entries[0].bullets, vec!["GPA: 3.9/4.0"]);
        assert_eq!(entries[1].organization, "MIT");
    }

    #[test]
    fn test_education_heading_form_falls_back_to_general_chain() {
        let markdown = "### M.S. CS | Stanford | 2016 - 2018 | California\n- Thesis on distributed systems\n";
        let parsed = parse_education(markdown, &entries_section("education"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].organization, "Stanford");
        assert_eq!(entries[0].location.as_deref(), Some("California"));
    }

    #[test]
    fn test_raw_first_heading_line_becomes_title() {
        let section = Section {
            id: "certifications".to_string(),
            title: None,
            body: SectionBody::Raw {
                content: String::new(),
            },
        };
        let parsed = parse_raw("## Certifications\nAWS SA Pro, 2023\nCKA, 2022", &section, CTX);
        assert_eq!(parsed.title.as_deref(), Some("Certifications"));
        assert_eq!(
            parsed.body,
            SectionBody::Raw {
                content: "AWS SA Pro, 2023\nCKA, 2022".to_string()
            }
        );

        let parsed = parse_raw("just text, no heading", &section, CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Raw {
                content: "just text, no heading".to_string()
            }
        );
    }

    #[test]
    fn test_header_markdown_parses_key_value_pairs_in_order() {
        let markdown = "## Header\nposition: Staff Engineer\nemail: ada@example.com\nnot a pair\n";
        let pairs = parse_header_markdown(markdown);
        assert_eq!(
            pairs,
            vec![
                ("position".to_string(), "Staff Engineer".to_string()),
                ("email".to_string(), "ada@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_dispatch_prefers_id_over_type() {
        // An entries-typed section with the education id must go through the
        // education parser, which understands the bold two-line form.
        let markdown = "**Ph.D. Physics**\nCaltech | 2010 - 2015\n";
        let parsed = parse_section(markdown, &entries_section("education"), CTX);
        let entries = entries_of(&parsed);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Ph.D. Physics");
        assert_eq!(entries[0].organization, "Caltech");
    }

    #[test]
    fn test_dispatch_falls_back_to_type() {
        let section = Section {
            id: "highlights".to_string(),
            title: None,
            body: SectionBody::Summary { bullets: vec![] },
        };
        let parsed = parse_section("- a bullet", &section, CTX);
        assert_eq!(
            parsed.body,
            SectionBody::Summary {
                bullets: vec!["a bullet".to_string()]
            }
        );
    }
}
