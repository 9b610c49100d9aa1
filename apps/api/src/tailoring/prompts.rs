// Prompts for the tailoring collaborator. Text in, text out: the model
// receives rendered section Markdown and returns replacement Markdown that
// goes straight back through the section parsers.

pub const TAILOR_SECTION_SYSTEM: &str = "You are a careful resume editor. \
    You revise one resume section at a time, returned as Markdown. \
    Preserve the existing heading structure and bullet formatting exactly; \
    change only the wording of the content.";

pub const TAILOR_SECTION_PROMPT_TEMPLATE: &str = "\
You are updating a resume section stored as Markdown. Preserve the existing \
heading structure and bullet formatting while tailoring the content to match \
the job description analysis.

Current Section Markdown:
---
{section_content}
---

Job Description Analysis:
---
{jd_analysis}
---

Return revised Markdown for the section. Use concise bullet points and keep \
any heading titles unchanged.";

pub const JD_ANALYSIS_SYSTEM: &str = "You are a precise assistant that \
    extracts structured information from job descriptions. Respond with a \
    structured text summary; fill fields you cannot support from the text \
    with N/A.";

pub const JD_ANALYSIS_PROMPT_TEMPLATE: &str = "\
Please analyze the following Job Description and extract the key information. \
Structure the output clearly.

Job Description:
---
{jd_text}
---

Extract the following:
- **Job Title:**
- **Company:**
- **Key Responsibilities:** (Summarize main duties)
- **Required Skills:** (List essential technical and soft skills)
- **Required Experience:** (Mention years of experience, specific domains, tools, etc.)
- **Educational Requirements:** (If specified)
- **Keywords:** (List important nouns and technologies)
- **Notes:** (Anything else that could make the resume stand out)

If you cannot find information for a specific field based only on the provided \
Job Description text, fill it with N/A. Provide the output as a structured \
text summary.";

/// Returned without an LLM call when the JD text is too short to analyze.
pub const JD_ANALYSIS_EMPTY: &str = "JD Analysis:
**Job Title:** N/A
**Company:** N/A
**Key Responsibilities:** N/A
**Required Skills:** N/A
**Required Experience:** N/A
**Educational Requirements:** N/A
**Keywords:** N/A
**Notes:** N/A (No valid Job Description provided)";
