//! Heading grammars for entry-style sections.
//!
//! Resume Markdown accumulates heading dialects: the renderer always emits the
//! em-dash form, but hand-edited content arrives pipe-delimited, quoted-bold,
//! or in the education-specific bold shapes. Each grammar is a regex-backed
//! matcher producing the same normalized field tuple; parsing contexts try
//! their matchers in a fixed priority order and take the first hit.

use lazy_static::lazy_static;
use regex::Regex;

/// Normalized fields captured from one entry heading line. Fields that the
/// matched grammar does not carry are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingFields {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub period: String,
}

/// One heading matcher: returns the normalized tuple on match, `None` otherwise.
pub type HeadingMatcher = fn(&str) -> Option<HeadingFields>;

lazy_static! {
    // ### Software Engineer — NovaTech (Remote) | 2020 - Present
    static ref EM_DASH_ENTRY: Regex = Regex::new(
        r"^###\s+(?P<title>[^—]+?)\s+—\s+(?P<organization>[^(|]+?)(?:\s+\((?P<location>[^)]+)\))?(?:\s+\|\s+(?P<period>.*))?$"
    )
    .unwrap();
    // ### Backend Developer | CloudSphere Inc. | 2017 - 2020 | Beijing, China
    static ref PIPE_ENTRY: Regex = Regex::new(
        r"^###\s+(?P<title>[^|]+?)\s*\|\s*(?P<organization>[^|]+?)\s*\|\s*(?P<period>[^|]+?)\s*\|\s*(?P<location>.+)$"
    )
    .unwrap();
    // '**Software Engineer | NovaTech Solutions | 2020 - Present**'
    static ref QUOTED_ENTRY: Regex = Regex::new(
        r#"^['"]?\*\*(?P<title>[^|]+?)\s*\|\s*(?P<organization>[^|]+?)(?:\s*\|\s*(?P<period>[^*]+?))?\*\*['"]?$"#
    )
    .unwrap();
    // ### Intelligent Recommendation Engine | 2021
    static ref PROJECT_SIMPLE: Regex =
        Regex::new(r"^###\s+(?P<title>[^|]+?)\s*\|\s*(?P<period>.+)$").unwrap();
    // ### Realtime Pipeline — DataWorks | 2023
    static ref PROJECT_WITH_ORG: Regex = Regex::new(
        r"^###\s+(?P<title>[^—]+?)\s+—\s+(?P<organization>[^|]+?)(?:\s+\|\s+(?P<period>.*))?$"
    )
    .unwrap();
    // **M.S. Computer Science**, Stanford University | 2016 - 2018
    static ref EDUCATION_BOLD: Regex = Regex::new(
        r"^\*\*(?P<title>[^*]+)\*\*,?\s*(?P<organization>[^|]+?)(?:\s+\|\s+(?P<period>.*))?$"
    )
    .unwrap();
    // **M.S. Computer Science**  (degree alone; university expected on the next line)
    static ref BOLD_DEGREE_ONLY: Regex = Regex::new(r"^\*\*(?P<title>[^*]+)\*\*\s*$").unwrap();
    // Stanford University | 2016 - 2018
    static ref UNIVERSITY_LINE: Regex =
        Regex::new(r"^(?P<organization>[^|]+?)(?:\s+\|\s+(?P<period>.*))?$").unwrap();
}

fn capture(re: &Regex, line: &str) -> Option<HeadingFields> {
    let caps = re.captures(line)?;
    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };
    Some(HeadingFields {
        title: field("title"),
        organization: field("organization"),
        location: field("location"),
        period: field("period"),
    })
}

/// `### Title — Organization (Location) | Period`, location and period optional.
pub fn match_em_dash_entry(line: &str) -> Option<HeadingFields> {
    capture(&EM_DASH_ENTRY, line)
}

/// `### Title | Organization | Period | Location`, all four fields required.
pub fn match_pipe_entry(line: &str) -> Option<HeadingFields> {
    capture(&PIPE_ENTRY, line)
}

/// `'**Title | Organization | Period**'` with optional surrounding quotes.
/// Not a `###` heading; tried per-line by the experience parser only.
pub fn match_quoted_entry(line: &str) -> Option<HeadingFields> {
    capture(&QUOTED_ENTRY, line)
}

/// `### Title | Period`, no organization.
pub fn match_project_simple(line: &str) -> Option<HeadingFields> {
    capture(&PROJECT_SIMPLE, line)
}

/// `### Title — Organization | Period`.
pub fn match_project_with_org(line: &str) -> Option<HeadingFields> {
    capture(&PROJECT_WITH_ORG, line)
}

/// `**Degree**, University | Period` on a single line.
pub fn match_education_bold(line: &str) -> Option<HeadingFields> {
    capture(&EDUCATION_BOLD, line)
}

/// `**Degree**` alone; the university line is expected to follow.
pub fn match_bold_degree_only(line: &str) -> Option<String> {
    BOLD_DEGREE_ONLY
        .captures(line)
        .map(|caps| caps["title"].trim().to_string())
}

/// `University | Period` continuation line for a pending degree.
pub fn match_university_line(line: &str) -> Option<(String, String)> {
    let caps = UNIVERSITY_LINE.captures(line)?;
    let organization = caps["organization"].trim().to_string();
    let period = caps
        .name("period")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((organization, period))
}

/// Experience and generic entries: em-dash form first, then pipe-delimited.
pub const EXPERIENCE_HEADINGS: &[HeadingMatcher] = &[match_em_dash_entry, match_pipe_entry];

/// Projects: organization-qualified before title-only, otherwise the simple
/// form would swallow `Title — Org | Period` with the dash inside the title.
pub const PROJECT_HEADINGS: &[HeadingMatcher] = &[match_project_with_org, match_project_simple];

/// Education headings: the `### Degree — University (Location) | Period` form
/// coincides with the em-dash entry grammar, so the chain is the general one.
pub const EDUCATION_HEADINGS: &[HeadingMatcher] = &[match_em_dash_entry, match_pipe_entry];

/// Applies the chain in order and returns the first match.
pub fn match_first(chain: &[HeadingMatcher], line: &str) -> Option<HeadingFields> {
    chain.iter().find_map(|matcher| matcher(line))
}
