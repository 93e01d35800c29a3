//! Ranking report: the sorted table plus one detail block per resume

use crate::processing::batch::RankedBatch;
use crate::processing::ranker::rank;
use crate::processing::record::AnalysisRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column headers of the summary table, in display order
pub const TABLE_COLUMNS: [&str; 5] = [
    "filename",
    "match_percentage",
    "overall_fit",
    "experience_level",
    "recommendation",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    /// Records sorted by match score, highest first
    pub records: Vec<AnalysisRecord>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub resume_count: usize,
    pub error_count: usize,
    pub processing_time_ms: u64,
    pub version: String,
}

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub filename: String,
    pub match_percentage: u8,
    pub overall_fit: String,
    pub experience_level: String,
    pub recommendation: String,
}

impl TableRow {
    pub fn cells(&self) -> [String; 5] {
        [
            self.filename.clone(),
            self.match_percentage.to_string(),
            self.overall_fit.clone(),
            self.experience_level.clone(),
            self.recommendation.clone(),
        ]
    }
}

/// Expandable per-resume view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailBlock {
    pub title: String,
    pub summary: String,
    pub key_strengths: String,
    pub matching_skills: String,
    /// `None` when the model listed no missing requirements
    pub missing_requirements: Option<String>,
    pub recommendation: String,
    pub is_error: bool,
}

impl RankingReport {
    pub fn new(batch: RankedBatch, model: impl Into<String>) -> Self {
        let records = rank(batch.records);
        let error_count = records.iter().filter(|r| r.is_error()).count();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                model: model.into(),
                resume_count: records.len(),
                error_count,
                processing_time_ms: batch.processing_time_ms,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            records,
        }
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.records.iter().map(table_row).collect()
    }

    pub fn detail_blocks(&self) -> Vec<DetailBlock> {
        self.records.iter().map(detail_block).collect()
    }
}

pub fn table_row(record: &AnalysisRecord) -> TableRow {
    TableRow {
        filename: record.filename.clone(),
        match_percentage: record.match_percentage,
        overall_fit: record.overall_fit.to_string(),
        experience_level: record.experience_level.to_string(),
        recommendation: record.recommendation.to_string(),
    }
}

/// Title reads `"{filename} — {match_percentage}% ({overall_fit})"`
pub fn detail_title(record: &AnalysisRecord) -> String {
    format!(
        "{} — {}% ({})",
        record.filename, record.match_percentage, record.overall_fit
    )
}

pub fn detail_block(record: &AnalysisRecord) -> DetailBlock {
    DetailBlock {
        title: detail_title(record),
        summary: record.summary.clone(),
        key_strengths: record.key_strengths.join(", "),
        matching_skills: record.matching_skills.join(", "),
        missing_requirements: if record.missing_requirements.is_empty() {
            None
        } else {
            Some(record.missing_requirements.join(", "))
        },
        recommendation: record.recommendation.to_string(),
        is_error: record.is_error(),
    }
}
