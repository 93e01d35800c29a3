//! Integration tests for the resume ranker

use printpdf::{BuiltinFont, Mm, PdfDocument};
use resume_ranker::config::OutputFormat;
use resume_ranker::error::{RankerError, Result};
use resume_ranker::input::InputManager;
use resume_ranker::llm::ModelBackend;
use resume_ranker::output::{RankingReport, ReportGenerator};
use resume_ranker::processing::batch::{run_session, BatchRunner, SessionInputs, SessionOutcome};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Answers according to which resume the prompt is about
struct StubBackend {
    replies: Vec<(&'static str, String)>,
    calls: Arc<AtomicUsize>,
}

impl ModelBackend for StubBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .iter()
            .find(|(filename, _)| prompt.contains(&format!("RESUME ({})", filename)))
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| RankerError::ModelInvocation("quota exceeded".to_string()))
    }
}

fn write_pdf(dir: &Path, name: &str, text: &str) -> PathBuf {
    let (doc, page, layer) = PdfDocument::new(name, Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
    doc.get_page(page)
        .get_layer(layer)
        .use_text(text, 12.0, Mm(20.0), Mm(270.0), &font);

    let path = dir.join(name);
    std::fs::write(&path, doc.save_to_bytes().unwrap()).unwrap();
    path
}

fn reply(score: u32, fit: &str) -> String {
    format!(
        r#"Here is my assessment:
```json
{{"filename": "ignored.pdf", "match_percentage": {score}, "overall_fit": "{fit}",
  "key_strengths": ["Rust"], "matching_skills": ["tokio"], "missing_requirements": [],
  "experience_level": "SENIOR", "summary": "Solid.", "recommendation": "CONSIDER"}}
```"#
    )
}

#[tokio::test]
async fn test_batch_is_ranked_by_score() {
    let dir = TempDir::new().unwrap();
    let resumes = vec![
        write_pdf(dir.path(), "low.pdf", "Junior web developer"),
        write_pdf(dir.path(), "high.pdf", "Senior Rust engineer"),
        write_pdf(dir.path(), "mid.pdf", "Backend developer"),
    ];

    let calls = Arc::new(AtomicUsize::new(0));
    let backend = StubBackend {
        replies: vec![
            ("low.pdf", reply(10, "WEAK")),
            ("high.pdf", reply(90, "STRONG")),
            ("mid.pdf", reply(50, "MODERATE")),
        ],
        calls: calls.clone(),
    };

    let inputs = SessionInputs {
        api_key: Some("test-key".to_string()),
        job_description: Some("Senior Rust engineer with async experience".to_string()),
        resumes,
    };
    let mut runner = BatchRunner::new(InputManager::new());

    let outcome = run_session(&inputs, &mut runner, |credential| {
        assert_eq!(credential.expose(), "test-key");
        Ok(backend)
    })
    .await
    .unwrap();

    let SessionOutcome::Ranked(batch) = outcome else {
        panic!("expected a ranked batch, got {:?}", outcome);
    };

    let order: Vec<(&str, u8)> = batch
        .records
        .iter()
        .map(|r| (r.filename.as_str(), r.match_percentage))
        .collect();
    assert_eq!(order, vec![("high.pdf", 90), ("mid.pdf", 50), ("low.pdf", 10)]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_failed_analysis_sorts_to_bottom() {
    let dir = TempDir::new().unwrap();
    let resumes = vec![
        write_pdf(dir.path(), "broken.pdf", "Anything"),
        write_pdf(dir.path(), "prose.pdf", "Anything else"),
        write_pdf(dir.path(), "good.pdf", "Rust engineer"),
    ];

    // broken.pdf has no scripted reply, so its model call fails
    let backend = StubBackend {
        replies: vec![
            ("prose.pdf", "I cannot evaluate this candidate.".to_string()),
            ("good.pdf", reply(64, "MODERATE")),
        ],
        calls: Arc::new(AtomicUsize::new(0)),
    };

    let inputs = SessionInputs {
        api_key: Some("k".to_string()),
        job_description: Some("Rust engineer".to_string()),
        resumes,
    };
    let mut runner = BatchRunner::new(InputManager::new());
    let outcome = run_session(&inputs, &mut runner, |_| Ok(backend)).await.unwrap();

    let SessionOutcome::Ranked(batch) = outcome else {
        panic!("expected a ranked batch");
    };

    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.records[0].filename, "good.pdf");
    assert!(!batch.records[0].is_error());
    // Ties at zero keep upload order
    assert_eq!(batch.records[1].filename, "broken.pdf");
    assert_eq!(batch.records[2].filename, "prose.pdf");
    assert!(batch.records[1].is_error());
    assert!(batch.records[2].is_error());

    let report = RankingReport::new(batch, "stub-model");
    assert_eq!(report.metadata.error_count, 2);

    let json = ReportGenerator::new(false, true)
        .generate(&report, OutputFormat::Json)
        .unwrap();
    assert!(json.contains("\"filename\": \"good.pdf\""));
    assert!(json.contains("Failed to parse model response."));
}

#[tokio::test]
async fn test_missing_credential_never_connects() {
    let inputs = SessionInputs {
        api_key: Some("   ".to_string()),
        job_description: Some("Rust engineer".to_string()),
        resumes: vec![PathBuf::from("does-not-exist.pdf")],
    };
    let mut runner = BatchRunner::new(InputManager::new());

    let outcome = run_session(&inputs, &mut runner, |_| -> Result<StubBackend> {
        panic!("must not connect without a credential")
    })
    .await
    .unwrap();

    assert_eq!(outcome, SessionOutcome::NeedsCredential);
}

#[tokio::test]
async fn test_missing_job_description_awaits_input() {
    let inputs = SessionInputs {
        api_key: Some("k".to_string()),
        job_description: None,
        resumes: vec![PathBuf::from("a.pdf")],
    };
    let mut runner = BatchRunner::new(InputManager::new());

    let outcome = run_session(&inputs, &mut runner, |_| -> Result<StubBackend> {
        panic!("must not connect without a job description")
    })
    .await
    .unwrap();

    assert_eq!(outcome, SessionOutcome::AwaitingInput);
    assert!(outcome.message().is_some());
}

#[tokio::test]
async fn test_non_pdf_resume_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "plain text resume").unwrap();

    let result = InputManager::new().load_resume(&path).await;
    assert!(matches!(result, Err(RankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_job_description_from_markdown() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.md");
    std::fs::write(
        &path,
        "## Senior Rust Engineer\n\n**Requirements:**\n\n- Tokio\n- PostgreSQL\n",
    )
    .unwrap();

    let text = InputManager::new().read_job_description(&path).await.unwrap();
    assert!(text.contains("Senior Rust Engineer"));
    assert!(text.contains("Tokio"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_identical_uploads_share_cached_text() {
    let dir = TempDir::new().unwrap();
    let first = write_pdf(dir.path(), "first.pdf", "Same content");
    let second = dir.path().join("second.pdf");
    std::fs::copy(&first, &second).unwrap();

    let mut manager = InputManager::new();
    let a = manager.load_resume(&first).await.unwrap();
    let b = manager.load_resume(&second).await.unwrap();

    let text_a = manager.extract_text(&a).unwrap();
    let text_b = manager.extract_text(&b).unwrap();
    assert_eq!(text_a, text_b);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}
