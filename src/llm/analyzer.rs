//! LLM-based scoring of a single resume

use crate::llm::client::ModelBackend;
use crate::llm::prompts::{render_ranking_prompt, PromptParams};
use crate::processing::normalizer::normalize;
use crate::processing::record::AnalysisRecord;
use log::{debug, info, warn};

/// Scores resumes with one model call each. Failures never escape: a failed
/// call or an unparseable reply becomes the canonical error record.
pub struct ResumeAnalyzer<B> {
    backend: B,
}

impl<B: ModelBackend> ResumeAnalyzer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn analyze(
        &self,
        resume_text: &str,
        filename: &str,
        job_description: &str,
    ) -> AnalysisRecord {
        let prompt = render_ranking_prompt(&PromptParams {
            job_description,
            filename,
            resume_text,
        });
        debug!("Prompt for {} is {} characters", filename, prompt.len());

        let raw = match self.backend.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Model call failed for {}: {}", filename, e);
                return AnalysisRecord::error(filename);
            }
        };
        debug!("Model replied with {} characters for {}", raw.len(), filename);

        let record = normalize(&raw, filename);
        if record.is_error() {
            warn!("Could not parse model response for {}", filename);
        } else {
            info!("{} scored {}%", filename, record.match_percentage);
        }
        record
    }
}
