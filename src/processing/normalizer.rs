//! Turns a free-form model reply into an [`AnalysisRecord`]
//!
//! The reply is expected to contain one JSON object. Extraction is greedy: the
//! span runs from the first `{` to the last `}` in the whole reply, so a reply
//! holding two separate objects, or prose with braces around the object, fails
//! to parse and falls back to the canonical error record.

use crate::processing::record::{AnalysisRecord, ExperienceLevel, OverallFit, Recommendation};
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("JSON value is not an object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field has unexpected type: {0}")]
    InvalidShape(serde_json::Error),

    #[error("match_percentage is not a number: {0}")]
    InvalidScore(String),
}

/// Loosely-typed mirror of the record as the model emits it
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    match_percentage: Option<Value>,
    #[serde(default)]
    overall_fit: Option<String>,
    #[serde(default)]
    key_strengths: Option<Vec<String>>,
    #[serde(default)]
    matching_skills: Option<Vec<String>>,
    #[serde(default)]
    missing_requirements: Option<Vec<String>>,
    #[serde(default)]
    experience_level: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    recommendation: Option<String>,
}

/// Greedy outermost span: first `{` through last `}`
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a model reply, reporting why it could not be turned into a record.
///
/// The returned record's `filename` is always `filename`; whatever the model
/// echoed back is ignored.
pub fn parse_response(raw: &str, filename: &str) -> Result<AnalysisRecord, ParseFailure> {
    let span = extract_json_span(raw).ok_or(ParseFailure::NoJsonObject)?;
    let value: Value = serde_json::from_str(span)?;
    if !value.is_object() {
        return Err(ParseFailure::NotAnObject);
    }

    let raw_record: RawRecord = serde_json::from_value(value).map_err(ParseFailure::InvalidShape)?;
    let score = raw_record
        .match_percentage
        .ok_or(ParseFailure::MissingField("match_percentage"))?;

    Ok(AnalysisRecord {
        filename: filename.to_string(),
        match_percentage: coerce_percentage(&score)?,
        overall_fit: raw_record
            .overall_fit
            .map(OverallFit::from_model)
            .unwrap_or_default(),
        key_strengths: raw_record.key_strengths.unwrap_or_default(),
        matching_skills: raw_record.matching_skills.unwrap_or_default(),
        missing_requirements: raw_record.missing_requirements.unwrap_or_default(),
        experience_level: raw_record
            .experience_level
            .map(ExperienceLevel::from)
            .unwrap_or_default(),
        summary: raw_record.summary.unwrap_or_default(),
        recommendation: raw_record
            .recommendation
            .map(Recommendation::from_model)
            .unwrap_or_default(),
    })
}

/// Parse a model reply, substituting the canonical error record on failure
pub fn normalize(raw: &str, filename: &str) -> AnalysisRecord {
    match parse_response(raw, filename) {
        Ok(record) => record,
        Err(e) => {
            debug!("Could not parse response for {}: {}", filename, e);
            AnalysisRecord::error(filename)
        }
    }
}

/// Scores are clamped into 0..=100; fractions round, "85%" style strings are accepted.
fn coerce_percentage(value: &Value) -> Result<u8, ParseFailure> {
    let number = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ParseFailure::InvalidScore(n.to_string()))?,
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseFailure::InvalidScore(s.clone()))?,
        other => return Err(ParseFailure::InvalidScore(other.to_string())),
    };

    if !number.is_finite() {
        return Err(ParseFailure::InvalidScore(value.to_string()));
    }

    Ok(number.round().clamp(0.0, 100.0) as u8)
}
