//! Content tailoring — rewrites one section's Markdown against a JD analysis.
//!
//! The contract with the transcoder is text in, text out: the tailored
//! Markdown is handed back to the caller, who applies it through the normal
//! section-update path so the parsers stay the single write surface.

pub mod prompts;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmRegistry};
use self::prompts::{
    JD_ANALYSIS_EMPTY, JD_ANALYSIS_PROMPT_TEMPLATE, JD_ANALYSIS_SYSTEM,
    TAILOR_SECTION_PROMPT_TEMPLATE, TAILOR_SECTION_SYSTEM,
};

/// JD text shorter than this is treated as no JD at all.
const MIN_JD_LENGTH: usize = 20;

/// The tailoring seam. Carried in `AppState` as `Arc<dyn SectionTailor>` so
/// the handlers never see a concrete provider.
#[async_trait]
pub trait SectionTailor: Send + Sync {
    /// Analyzes a raw job description into a structured text summary.
    async fn analyze_jd(&self, jd_text: &str) -> Result<String, AppError>;

    /// Returns replacement Markdown for one section, tailored to the analysis.
    async fn tailor_section(
        &self,
        section_markdown: &str,
        jd_analysis: &str,
    ) -> Result<String, AppError>;
}

/// LLM-backed tailor; the client comes out of the registry at construction.
pub struct LlmSectionTailor {
    llm: LlmClient,
}

impl LlmSectionTailor {
    pub fn new(registry: &LlmRegistry, provider: &str) -> Result<Self, AppError> {
        let llm = registry
            .get(provider)
            .map_err(|e| AppError::Llm(e.to_string()))?
            .clone();
        Ok(Self { llm })
    }
}

#[async_trait]
impl SectionTailor for LlmSectionTailor {
    async fn analyze_jd(&self, jd_text: &str) -> Result<String, AppError> {
        if jd_text.trim().len() < MIN_JD_LENGTH {
            return Ok(JD_ANALYSIS_EMPTY.to_string());
        }
        let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
        let analysis = self
            .llm
            .call_text(&prompt, JD_ANALYSIS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to analyze JD: {e}")))?;
        Ok(format!("JD Analysis:\n{analysis}"))
    }

    async fn tailor_section(
        &self,
        section_markdown: &str,
        jd_analysis: &str,
    ) -> Result<String, AppError> {
        let prompt = TAILOR_SECTION_PROMPT_TEMPLATE
            .replace("{section_content}", section_markdown)
            .replace("{jd_analysis}", jd_analysis);
        self.llm
            .call_text(&prompt, TAILOR_SECTION_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to tailor section: {e}")))
    }
}
