//! Ordering of analysis records by match score

use crate::processing::record::AnalysisRecord;

/// Stable sort by `match_percentage`, highest first. Ties keep input order.
pub fn rank(mut records: Vec<AnalysisRecord>) -> Vec<AnalysisRecord> {
    records.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::record::{ExperienceLevel, OverallFit, Recommendation};
    use proptest::prelude::*;

    fn record(filename: &str, score: u8) -> AnalysisRecord {
        AnalysisRecord {
            filename: filename.to_string(),
            match_percentage: score,
            overall_fit: OverallFit::Moderate,
            key_strengths: vec![],
            matching_skills: vec![],
            missing_requirements: vec![],
            experience_level: ExperienceLevel::Mid,
            summary: String::new(),
            recommendation: Recommendation::Consider,
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let ranked = rank(vec![record("a.pdf", 10), record("b.pdf", 90), record("c.pdf", 50)]);
        let scores: Vec<u8> = ranked.iter().map(|r| r.match_percentage).collect();
        assert_eq!(scores, vec![90, 50, 10]);
    }

    #[test]
    fn test_ties_keep_upload_order() {
        let ranked = rank(vec![
            record("first.pdf", 70),
            record("low.pdf", 20),
            record("second.pdf", 70),
            record("first.pdf", 70),
        ]);
        let names: Vec<&str> = ranked.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["first.pdf", "second.pdf", "first.pdf", "low.pdf"]);
    }

    #[test]
    fn test_error_records_sink_to_bottom() {
        let ranked = rank(vec![AnalysisRecord::error("broken.pdf"), record("ok.pdf", 1)]);
        assert_eq!(ranked[0].filename, "ok.pdf");
        assert!(ranked[1].is_error());
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_rank_is_descending_permutation(
            scores in prop::collection::hash_set(0u8..=100, 0..30)
        ) {
            let records: Vec<AnalysisRecord> = scores
                .iter()
                .enumerate()
                .map(|(i, score)| record(&format!("{}.pdf", i), *score))
                .collect();

            let ranked = rank(records.clone());
            prop_assert_eq!(ranked.len(), records.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].match_percentage > pair[1].match_percentage);
            }
            for original in &records {
                prop_assert!(ranked.contains(original));
            }
            prop_assert_eq!(rank(ranked.clone()), ranked);
        }
    }
}
