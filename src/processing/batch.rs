//! Sequential batch: extract, analyze and rank every uploaded resume

use crate::error::{RankerError, Result};
use crate::input::manager::{InputManager, ResumeFile};
use crate::llm::analyzer::ResumeAnalyzer;
use crate::llm::client::{Credential, ModelBackend};
use crate::processing::ranker::rank;
use crate::processing::record::AnalysisRecord;
use indicatif::ProgressBar;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

pub const CREDENTIAL_PROMPT: &str =
    "Add your Gemini API key with --api-key or the GEMINI_API_KEY environment variable to begin.";
pub const AWAITING_INPUT_MESSAGE: &str =
    "Provide PDF resumes and a job description (--job or --job-text) to start the analysis.";

/// What the user supplied for one run
#[derive(Debug, Clone, Default)]
pub struct SessionInputs {
    pub api_key: Option<String>,
    pub job_description: Option<String>,
    pub resumes: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// No credential was supplied; nothing else is attempted
    NeedsCredential,
    /// Resumes or job description are missing
    AwaitingInput,
    Ranked(RankedBatch),
}

impl SessionOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SessionOutcome::NeedsCredential => Some(CREDENTIAL_PROMPT),
            SessionOutcome::AwaitingInput => Some(AWAITING_INPUT_MESSAGE),
            SessionOutcome::Ranked(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedBatch {
    pub records: Vec<AnalysisRecord>,
    pub processing_time_ms: u64,
}

pub enum Readiness {
    Halt(SessionOutcome),
    Ready {
        credential: Credential,
        job_description: String,
    },
}

/// Gate a run on its inputs: the credential first, then files and job description
pub fn check_inputs(inputs: &SessionInputs) -> Readiness {
    let Some(credential) = Credential::new(inputs.api_key.as_deref()) else {
        return Readiness::Halt(SessionOutcome::NeedsCredential);
    };

    let job_description = inputs
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty());

    match job_description {
        Some(jd) if !inputs.resumes.is_empty() => Readiness::Ready {
            credential,
            job_description: jd.to_string(),
        },
        _ => Readiness::Halt(SessionOutcome::AwaitingInput),
    }
}

/// Runs the analyzer over resumes one at a time
pub struct BatchRunner {
    manager: InputManager,
    skip_unreadable: bool,
    progress: ProgressBar,
}

impl BatchRunner {
    pub fn new(manager: InputManager) -> Self {
        Self {
            manager,
            skip_unreadable: false,
            progress: ProgressBar::hidden(),
        }
    }

    /// Record unreadable PDFs as error rows instead of aborting the batch
    pub fn skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn manager(&self) -> &InputManager {
        &self.manager
    }

    /// Analyze every file in upload order, then rank. One record per file.
    pub async fn run<B: ModelBackend>(
        &mut self,
        analyzer: &ResumeAnalyzer<B>,
        job_description: &str,
        files: &[ResumeFile],
    ) -> Result<RankedBatch> {
        let start_time = Instant::now();
        let mut records = Vec::with_capacity(files.len());

        for file in files {
            self.progress.set_message(format!("Analysing {} …", file.filename));

            let text = match self.manager.extract_text(file) {
                Ok(text) => text,
                Err(RankerError::PdfExtraction(msg)) if self.skip_unreadable => {
                    warn!("Skipping unreadable resume: {}", msg);
                    records.push(AnalysisRecord::error(&file.filename));
                    continue;
                }
                Err(e) => {
                    self.progress.finish_and_clear();
                    return Err(e);
                }
            };

            records.push(analyzer.analyze(&text, &file.filename, job_description).await);
        }

        self.progress.finish_and_clear();
        info!("Analysed {} resumes", records.len());

        Ok(RankedBatch {
            records: rank(records),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

/// Full run: gate on inputs, load the resumes, connect to the model and rank.
///
/// `connect` is only invoked once the inputs are complete, so a missing
/// credential never reaches the network layer.
pub async fn run_session<B, F>(
    inputs: &SessionInputs,
    runner: &mut BatchRunner,
    connect: F,
) -> Result<SessionOutcome>
where
    B: ModelBackend,
    F: FnOnce(Credential) -> Result<B>,
{
    let (credential, job_description) = match check_inputs(inputs) {
        Readiness::Halt(outcome) => return Ok(outcome),
        Readiness::Ready {
            credential,
            job_description,
        } => (credential, job_description),
    };

    let mut files = Vec::with_capacity(inputs.resumes.len());
    for path in &inputs.resumes {
        files.push(runner.manager().load_resume(path).await?);
    }

    let analyzer = ResumeAnalyzer::new(connect(credential)?);
    let batch = runner.run(&analyzer, &job_description, &files).await?;
    Ok(SessionOutcome::Ranked(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    struct NeverCalled;

    impl ModelBackend for NeverCalled {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            panic!("model must not be called");
        }
    }

    fn inputs(api_key: Option<&str>, job: Option<&str>, resumes: &[&str]) -> SessionInputs {
        SessionInputs {
            api_key: api_key.map(str::to_string),
            job_description: job.map(str::to_string),
            resumes: resumes.iter().map(PathBuf::from).collect(),
        }
    }

    #[tokio::test]
    async fn test_empty_credential_halts_before_anything_else() {
        let mut runner = BatchRunner::new(InputManager::new());
        let outcome = run_session(
            &inputs(Some(""), Some("job"), &["missing.pdf"]),
            &mut runner,
            |_| -> Result<NeverCalled> { panic!("must not connect") },
        )
        .await
        .unwrap();

        assert_eq!(outcome, SessionOutcome::NeedsCredential);
        assert_eq!(outcome.message(), Some(CREDENTIAL_PROMPT));
    }

    #[test]
    fn test_missing_job_or_files_awaits_input() {
        for case in [
            inputs(Some("key"), None, &["a.pdf"]),
            inputs(Some("key"), Some("   "), &["a.pdf"]),
            inputs(Some("key"), Some("job"), &[]),
        ] {
            assert!(matches!(
                check_inputs(&case),
                Readiness::Halt(SessionOutcome::AwaitingInput)
            ));
        }
    }

    #[test]
    fn test_complete_inputs_are_ready() {
        match check_inputs(&inputs(Some("key"), Some(" Rust dev "), &["a.pdf"])) {
            Readiness::Ready {
                credential,
                job_description,
            } => {
                assert_eq!(credential.expose(), "key");
                assert_eq!(job_description, "Rust dev");
            }
            Readiness::Halt(outcome) => panic!("unexpected halt: {:?}", outcome),
        }
    }

    #[tokio::test]
    async fn test_unreadable_pdf_aborts_by_default() {
        let mut runner = BatchRunner::new(InputManager::new());
        let analyzer = ResumeAnalyzer::new(NeverCalled);
        let files = vec![ResumeFile::new("bad.pdf", b"garbage".to_vec())];

        let result = runner.run(&analyzer, "job", &files).await;
        assert!(matches!(result, Err(RankerError::PdfExtraction(_))));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_can_be_skipped() {
        let mut runner = BatchRunner::new(InputManager::new()).skip_unreadable(true);
        let analyzer = ResumeAnalyzer::new(NeverCalled);
        let files = vec![ResumeFile::new("bad.pdf", b"garbage".to_vec())];

        let batch = runner.run(&analyzer, "job", &files).await.unwrap();
        assert_eq!(batch.records, vec![AnalysisRecord::error("bad.pdf")]);
    }
}
