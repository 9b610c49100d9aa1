//! Resume data model — metadata, tagged section variants, and the document root.
//!
//! The YAML wire shape is flat: every section carries `id`, `type`, an optional
//! `title`, and the variant fields of its type. `Metadata` keeps its known
//! fields in a struct and routes unrecognized keys into an ordered extension
//! list so they survive load/save untouched.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known metadata keys in display order. The header renderer and serializer
/// both follow this order; extension keys come after, in stored order.
pub const METADATA_DISPLAY_ORDER: [&str; 8] = [
    "first_name",
    "last_name",
    "position",
    "address",
    "mobile",
    "email",
    "github",
    "linkedin",
];

/// Personal information block of a resume.
///
/// `first_name` and `last_name` are mandatory for a valid document; the other
/// known fields are optional. Keys outside the known set land in `extra` and
/// round-trip losslessly, keeping their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl Metadata {
    /// Looks up a field by key: known fields first, then the extension list.
    pub fn get(&self, key: &str) -> Option<&str> {
        let known = match key {
            "first_name" => Some(self.first_name.as_str()),
            "last_name" => Some(self.last_name.as_str()),
            "position" => self.position.as_deref(),
            "address" => self.address.as_deref(),
            "mobile" => self.mobile.as_deref(),
            "email" => self.email.as_deref(),
            "github" => self.github.as_deref(),
            "linkedin" => self.linkedin.as_deref(),
            _ => None,
        };
        if METADATA_DISPLAY_ORDER.contains(&key) {
            return known.filter(|v| !v.is_empty());
        }
        self.extra
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a field by key, routing unknown keys into the extension list.
    /// An existing extension entry is overwritten in place.
    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "position" => self.position = Some(value),
            "address" => self.address = Some(value),
            "mobile" => self.mobile = Some(value),
            "email" => self.email = Some(value),
            "github" => self.github = Some(value),
            "linkedin" => self.linkedin = Some(value),
            _ => {
                if let Some(slot) = self.extra.iter_mut().find(|(k, _)| k == key) {
                    slot.1 = value;
                } else {
                    self.extra.push((key.to_string(), value));
                }
            }
        }
    }

    /// Merges parsed `key: value` pairs, overwriting only the matched keys.
    /// Returns the list of keys that were applied.
    pub fn merge(&mut self, updates: impl IntoIterator<Item = (String, String)>) -> Vec<String> {
        let mut applied = Vec::new();
        for (key, value) in updates {
            self.set(&key, value);
            applied.push(key);
        }
        applied
    }

    /// All non-empty fields in display order, extensions last.
    pub fn fields_in_order(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        for key in METADATA_DISPLAY_ORDER {
            if let Some(value) = self.get(key) {
                out.push((key, value));
            }
        }
        for (key, value) in &self.extra {
            out.push((key.as_str(), value.as_str()));
        }
        out
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("first_name", &self.first_name)?;
        map.serialize_entry("last_name", &self.last_name)?;
        for (key, value) in [
            ("position", &self.position),
            ("address", &self.address),
            ("mobile", &self.mobile),
            ("email", &self.email),
            ("github", &self.github),
            ("linkedin", &self.linkedin),
        ] {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Accepts scalar YAML values for metadata fields; everything is stored as a
/// string (an unquoted phone number or zip code must not fail the load).
#[derive(Deserialize)]
#[serde(untagged)]
enum MetadataScalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl MetadataScalar {
    fn into_string(self) -> String {
        match self {
            MetadataScalar::String(s) => s,
            MetadataScalar::Int(i) => i.to_string(),
            MetadataScalar::Float(f) => f.to_string(),
            MetadataScalar::Bool(b) => b.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetadataVisitor;

        impl<'de> Visitor<'de> for MetadataVisitor {
            type Value = Metadata;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of metadata fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
                let mut metadata = Metadata::default();
                while let Some((key, value)) = access.next_entry::<String, MetadataScalar>()? {
                    metadata.set(&key, value.into_string());
                }
                Ok(metadata)
            }
        }

        deserializer.deserialize_map(MetadataVisitor)
    }
}

/// One named group of skills, rendered as `- {category}: {items, comma-joined}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// One dated record in an entries-type section: a job, a project, or a degree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Type-specific payload of a section, discriminated by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionBody {
    Summary {
        #[serde(default)]
        bullets: Vec<String>,
    },
    Skills {
        #[serde(default)]
        groups: Vec<SkillGroup>,
    },
    Entries {
        #[serde(default)]
        entries: Vec<Entry>,
    },
    Raw {
        #[serde(default)]
        content: String,
    },
}

impl SectionBody {
    pub fn type_name(&self) -> &'static str {
        match self {
            SectionBody::Summary { .. } => "summary",
            SectionBody::Skills { .. } => "skills",
            SectionBody::Entries { .. } => "entries",
            SectionBody::Raw { .. } => "raw",
        }
    }
}

/// One structured subdivision of a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    /// The title shown in rendered Markdown: the stored title, or a default
    /// derived from the id (`work_history` becomes `Work History`).
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => title_case(&self.id.replace('_', " ")),
        }
    }

    /// Per-section validity: the body must carry content, and entries-type
    /// sections with the experience/projects ids must keep a matching title.
    pub fn validate(&self) -> Result<(), String> {
        match &self.body {
            SectionBody::Summary { bullets } => {
                if bullets.is_empty() {
                    return Err(format!("section '{}' has no bullets", self.id));
                }
            }
            SectionBody::Skills { groups } => {
                if groups.is_empty() {
                    return Err(format!("section '{}' has no skill groups", self.id));
                }
            }
            SectionBody::Entries { entries } => {
                if entries.is_empty() {
                    return Err(format!("section '{}' has no entries", self.id));
                }
                let title = self.display_title();
                if self.id == "experience"
                    && (!title.contains("Experience") || title.contains("Projects"))
                {
                    return Err(format!(
                        "section 'experience' has mismatched title '{title}'"
                    ));
                }
                if self.id == "projects"
                    && (!title.contains("Project") || title.contains("Experience"))
                {
                    return Err(format!("section 'projects' has mismatched title '{title}'"));
                }
            }
            SectionBody::Raw { content } => {
                if content.is_empty() {
                    return Err(format!("section '{}' has no content", self.id));
                }
            }
        }
        Ok(())
    }
}

/// Complete resume document: provenance label, metadata, ordered sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub source: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Resume {
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn section_by_id(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Whole-document validity: non-empty source, mandatory names, at least
    /// one section, and every section's own predicate.
    pub fn validate(&self) -> Result<(), String> {
        if self.source.is_empty() {
            return Err("resume source must not be empty".to_string());
        }
        if self.metadata.first_name.is_empty() || self.metadata.last_name.is_empty() {
            return Err("metadata must include first_name and last_name".to_string());
        }
        if self.sections.is_empty() {
            return Err("resume must contain at least one section".to_string());
        }
        for section in &self.sections {
            section.validate()?;
        }
        Ok(())
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
