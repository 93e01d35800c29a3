//! Prompt for scoring one resume against a job description

pub const RECRUITER_PERSONA: &str = "You are an expert technical recruiter.";

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Copy)]
pub struct PromptParams<'a> {
    pub job_description: &'a str,
    pub filename: &'a str,
    pub resume_text: &'a str,
}

/// Render the ranking prompt. Job description and resume text are embedded
/// verbatim; the JSON example echoes the filename back to the model.
pub fn render_ranking_prompt(params: &PromptParams<'_>) -> String {
    format!(
        r#"
{persona}

JOB DESCRIPTION:
{job}

RESUME ({filename}):
{resume}

Return ONLY valid JSON like:
{{
  "filename":"{filename}",
  "match_percentage":25,
  "overall_fit":"MODERATE",
  "key_strengths":["..."],
  "matching_skills":["..."],
  "missing_requirements":["..."],
  "experience_level":"JUNIOR",
  "summary":"brief text",
  "recommendation":"CONSIDER"
}}
"#,
        persona = RECRUITER_PERSONA,
        job = params.job_description,
        filename = params.filename,
        resume = params.resume_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PromptParams<'static> {
        PromptParams {
            job_description: "Senior Software Engineer role requiring React and Python.",
            filename: "jane_doe.pdf",
            resume_text: "Software Engineer with Python experience at Tech Corp.",
        }
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = render_ranking_prompt(&params());
        assert!(prompt.contains(RECRUITER_PERSONA));
        assert!(prompt.contains("JOB DESCRIPTION:\nSenior Software Engineer role requiring React and Python."));
        assert!(prompt.contains("RESUME (jane_doe.pdf):\nSoftware Engineer with Python experience at Tech Corp."));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_example_object_is_valid_json() {
        let prompt = render_ranking_prompt(&params());
        let start = prompt.rfind("{\n").unwrap();
        let end = prompt.rfind('}').unwrap();
        let example: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(example["filename"], "jane_doe.pdf");
        assert_eq!(example["match_percentage"], 25);
        assert_eq!(example["overall_fit"], "MODERATE");
    }

    #[test]
    fn test_braces_in_inputs_are_not_template_markers() {
        let prompt = render_ranking_prompt(&PromptParams {
            job_description: "Knows {resume} and {job}",
            filename: "x.pdf",
            resume_text: "literal {filename}",
        });
        assert!(prompt.contains("Knows {resume} and {job}"));
        assert!(prompt.contains("literal {filename}"));
    }
}
