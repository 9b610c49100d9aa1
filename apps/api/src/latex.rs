//! LaTeX rendering — structured sections to awesome-cv markup.
//!
//! Pure text generation; compiling the TeX (xelatex) belongs to an external
//! toolchain. Consumes the same `Section` records as the Markdown renderers.

use crate::models::resume::{Entry, Metadata, Resume, Section, SectionBody};

/// Escapes TeX special characters. Backslash goes first so the escapes it
/// introduces are not re-escaped.
pub fn escape_tex(text: &str) -> String {
    let mut out = text.replace('\\', r"\textbackslash{}");
    for (from, to) in [
        ("{", r"\{"),
        ("}", r"\}"),
        ("$", r"\$"),
        ("#", r"\#"),
        ("%", r"\%"),
        ("&", r"\&"),
        ("_", r"\_"),
        ("~", r"\textasciitilde{}"),
        ("^", r"\textasciicircum{}"),
    ] {
        out = out.replace(from, to);
    }
    out
}

/// Converts inline Markdown emphasis to TeX: `**bold**` and `*italic*`.
/// Newlines collapse to spaces; everything else is escaped.
pub fn markdown_inline_to_latex(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\n', " ");
    let text = escape_tex(&text);

    let mut out = String::new();
    for (i, chunk) in text.split("**").enumerate() {
        if i % 2 == 1 {
            out.push_str(r"\textbf{");
            out.push_str(chunk);
            out.push('}');
        } else {
            out.push_str(chunk);
        }
    }

    let mut final_out = String::new();
    for (i, chunk) in out.split('*').enumerate() {
        if i % 2 == 1 {
            final_out.push_str(r"\textit{");
            final_out.push_str(chunk);
            final_out.push('}');
        } else {
            final_out.push_str(chunk);
        }
    }
    final_out
}

/// Renders one section into awesome-cv vocabulary.
pub fn render_section_latex(section: &Section) -> String {
    let title = escape_tex(&section.display_title());
    match &section.body {
        SectionBody::Summary { bullets } => {
            let mut lines = vec![format!("\\cvsection{{{title}}}"), "\\begin{cvitems}".to_string()];
            for bullet in bullets {
                lines.push(format!("  \\item {{{}}}", markdown_inline_to_latex(bullet)));
            }
            lines.push("\\end{cvitems}".to_string());
            lines.join("\n") + "\n"
        }
        SectionBody::Skills { groups } => {
            let mut lines = vec![format!("\\cvsection{{{title}}}"), "\\begin{cvskills}".to_string()];
            for group in groups {
                let category = escape_tex(&group.category);
                let items = group
                    .items
                    .iter()
                    .map(|item| escape_tex(item))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("  \\cvskill\n    {{{category}}}\n    {{{items}}}"));
            }
            lines.push("\\end{cvskills}".to_string());
            lines.join("\n") + "\n"
        }
        SectionBody::Entries { entries } => {
            let mut lines = vec![format!("\\cvsection{{{title}}}"), "\\begin{cventries}".to_string()];
            for entry in entries {
                lines.push(render_entry_latex(entry));
            }
            lines.push("\\end{cventries}".to_string());
            lines.join("\n") + "\n"
        }
        SectionBody::Raw { content } => {
            format!("\\cvsection{{{title}}}\n{}\n", markdown_inline_to_latex(content))
        }
    }
}

fn render_entry_latex(entry: &Entry) -> String {
    let role = escape_tex(&entry.title);
    let organization = escape_tex(&entry.organization);
    let location = escape_tex(entry.location.as_deref().unwrap_or(""));
    let period = escape_tex(entry.period.as_deref().unwrap_or(""));

    let items = if entry.bullets.is_empty() {
        String::new()
    } else {
        let mut bullet_lines = vec!["      \\begin{cvitems}".to_string()];
        for bullet in &entry.bullets {
            bullet_lines.push(format!("        \\item {{{}}}", markdown_inline_to_latex(bullet)));
        }
        bullet_lines.push("      \\end{cvitems}".to_string());
        bullet_lines.join("\n")
    };

    format!(
        "  \\cventry\n    {{{role}}}\n    {{{organization}}}\n    {{{location}}}\n    {{{period}}}\n    {{\n{items}\n    }}"
    )
}

fn header_commands(metadata: &Metadata) -> Vec<String> {
    let mut commands = Vec::new();
    let first = escape_tex(&metadata.first_name);
    let last = escape_tex(&metadata.last_name);
    if !first.is_empty() || !last.is_empty() {
        commands.push(format!("\\name{{{first}}}{{{last}}}"));
    }
    for (command, value) in [
        ("position", &metadata.position),
        ("address", &metadata.address),
        ("mobile", &metadata.mobile),
        ("email", &metadata.email),
        ("github", &metadata.github),
        ("linkedin", &metadata.linkedin),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            commands.push(format!("\\{command}{{{}}}", escape_tex(value)));
        }
    }
    commands
}

/// Renders the complete resume as a standalone awesome-cv document.
pub fn render_resume_latex(resume: &Resume) -> String {
    let mut lines = vec![
        "\\documentclass[11pt, a4paper]{awesome-cv}".to_string(),
        "\\colorlet{awesome}{awesome-red}".to_string(),
    ];
    lines.extend(header_commands(&resume.metadata));
    lines.push("\\begin{document}".to_string());
    lines.push("\\makecvheader".to_string());
    for section in &resume.sections {
        lines.push(render_section_latex(section));
    }
    lines.push("\\end{document}".to_string());
    lines.join("\n") + "\n"
}
