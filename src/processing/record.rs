//! The per-resume analysis record and its tag types

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PARSE_FAILURE_SUMMARY: &str = "Failed to parse model response.";

/// Normalized result of comparing one resume against the job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub filename: String,
    pub match_percentage: u8,
    pub overall_fit: OverallFit,
    pub key_strengths: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub summary: String,
    pub recommendation: Recommendation,
}

impl AnalysisRecord {
    /// The canonical error record emitted when a resume could not be analyzed
    pub fn error(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            match_percentage: 0,
            overall_fit: OverallFit::Error,
            key_strengths: Vec::new(),
            matching_skills: Vec::new(),
            missing_requirements: Vec::new(),
            experience_level: ExperienceLevel::Unknown,
            summary: PARSE_FAILURE_SUMMARY.to_string(),
            recommendation: Recommendation::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.overall_fit == OverallFit::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OverallFit {
    Strong,
    Moderate,
    Weak,
    Error,
    /// Any label the model produced outside the known set
    Other(String),
}

impl OverallFit {
    pub fn as_str(&self) -> &str {
        match self {
            OverallFit::Strong => "STRONG",
            OverallFit::Moderate => "MODERATE",
            OverallFit::Weak => "WEAK",
            OverallFit::Error => "ERROR",
            OverallFit::Other(label) => label,
        }
    }

    /// Parse a label written by the model. `ERROR` is reserved for failed
    /// analyses, so a model cannot claim it.
    pub fn from_model(label: String) -> Self {
        match OverallFit::from(label) {
            OverallFit::Error => OverallFit::default(),
            fit => fit,
        }
    }
}

impl From<String> for OverallFit {
    fn from(value: String) -> Self {
        match normalize_tag(&value).as_str() {
            "STRONG" => OverallFit::Strong,
            "MODERATE" => OverallFit::Moderate,
            "WEAK" => OverallFit::Weak,
            "ERROR" => OverallFit::Error,
            _ => OverallFit::Other(value.trim().to_string()),
        }
    }
}

impl From<OverallFit> for String {
    fn from(value: OverallFit) -> Self {
        value.as_str().to_string()
    }
}

impl Default for OverallFit {
    fn default() -> Self {
        OverallFit::Other(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    #[default]
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "JUNIOR",
            ExperienceLevel::Mid => "MID",
            ExperienceLevel::Senior => "SENIOR",
            ExperienceLevel::Unknown => "UNKNOWN",
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(value: String) -> Self {
        match normalize_tag(&value).as_str() {
            "JUNIOR" => ExperienceLevel::Junior,
            "MID" | "MID_LEVEL" => ExperienceLevel::Mid,
            "SENIOR" => ExperienceLevel::Senior,
            _ => ExperienceLevel::Unknown,
        }
    }
}

impl From<ExperienceLevel> for String {
    fn from(value: ExperienceLevel) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    StronglyConsider,
    Consider,
    Reject,
    Error,
    Other(String),
}

impl Recommendation {
    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::StronglyConsider => "STRONGLY_CONSIDER",
            Recommendation::Consider => "CONSIDER",
            Recommendation::Reject => "REJECT",
            Recommendation::Error => "ERROR",
            Recommendation::Other(label) => label,
        }
    }

    /// Like [`OverallFit::from_model`], `ERROR` from the model is dropped.
    pub fn from_model(label: String) -> Self {
        match Recommendation::from(label) {
            Recommendation::Error => Recommendation::default(),
            rec => rec,
        }
    }
}

impl From<String> for Recommendation {
    fn from(value: String) -> Self {
        match normalize_tag(&value).as_str() {
            "STRONGLY_CONSIDER" => Recommendation::StronglyConsider,
            "CONSIDER" => Recommendation::Consider,
            "REJECT" => Recommendation::Reject,
            "ERROR" => Recommendation::Error,
            _ => Recommendation::Other(value.trim().to_string()),
        }
    }
}

impl From<Recommendation> for String {
    fn from(value: Recommendation) -> Self {
        value.as_str().to_string()
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Recommendation::Other(String::new())
    }
}

impl fmt::Display for OverallFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase and fold spaces/hyphens so "strongly consider" matches STRONGLY_CONSIDER
fn normalize_tag(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .replace([' ', '-'], "_")
}
