use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::matching::AnalysisResult;

pub const RESUME_CHAR_LIMIT: usize = 4000;
pub const JOB_CHAR_LIMIT: usize = 2000;
pub const SKILL_LIST_LIMIT: usize = 10;

pub const ENRICHMENT_SYSTEM: &str = "You are an expert career coach and resume analyst. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const ENRICHMENT_PROMPT: &str = r#"Analyze this resume against the job description and provide actionable feedback.

RESUME:
{resume}

JOB DESCRIPTION:
{job}

BASIC ANALYSIS RESULTS:
- Match Score: {score}%
- Matched Skills: {matched}
- Missing Skills: {missing}

Respond with a JSON object of exactly this shape:
{
    "overall_impression": "2-3 sentence overall assessment of the resume fit",
    "strengths": ["strength 1", "strength 2", "strength 3"],
    "weaknesses": ["weakness 1", "weakness 2", "weakness 3"],
    "missing_skills_analysis": "Explain which missing skills are critical vs nice-to-have",
    "experience_relevance": "How relevant is the candidate's experience to this role",
    "improvement_suggestions": [
        {"area": "specific area to improve", "current": "what's wrong or missing", "suggestion": "specific actionable advice"}
    ],
    "rewritten_bullets": [
        {"original_context": "brief description of a weak point in resume", "improved": "rewritten version with metrics and action verbs"}
    ],
    "keywords_to_add": ["keyword1", "keyword2", "keyword3"],
    "ats_score": 75,
    "interview_likelihood": "low/medium/high",
    "summary": "One paragraph summary of what the candidate should focus on"
}"#;

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn skill_list(skills: &[String]) -> String {
    skills
        .iter()
        .take(SKILL_LIST_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(resume|job|score|matched|missing)\}").expect("Invalid placeholder regex")
});

/// Fills the template in one pass; inserted text is never rescanned, so
/// braces inside the resume or job description stay literal.
pub fn build_enrichment_prompt(resume: &str, job: &str, analysis: &AnalysisResult) -> String {
    PLACEHOLDER
        .replace_all(ENRICHMENT_PROMPT, |caps: &Captures| match &caps[1] {
            "resume" => truncate_chars(resume, RESUME_CHAR_LIMIT).to_string(),
            "job" => truncate_chars(job, JOB_CHAR_LIMIT).to_string(),
            "score" => format!("{:.1}", analysis.match_score),
            "matched" => skill_list(&analysis.matched_skills),
            _ => skill_list(&analysis.missing_skills),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analyze;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_prompt_carries_analysis_summary() {
        let analysis = analyze("Python and Django", "Python, Django, Kubernetes");
        let prompt = build_enrichment_prompt("Python and Django", "Python, Django, Kubernetes", &analysis);
        assert!(prompt.contains("- Match Score: 66.7%"));
        assert!(prompt.contains("- Matched Skills: django, python"));
        assert!(prompt.contains("- Missing Skills: kubernetes"));
        assert!(prompt.contains("\"rewritten_bullets\""));
    }

    #[test]
    fn test_placeholders_in_user_text_stay_literal() {
        let analysis = analyze("Rust", "Rust");
        let prompt = build_enrichment_prompt("resume body", "Paste your {resume} and {score} here", &analysis);
        assert!(prompt.contains("Paste your {resume} and {score} here"));
        assert_eq!(prompt.matches("resume body").count(), 1);
    }

    #[test]
    fn test_prompt_truncates_inputs() {
        let analysis = analyze("", "");
        let resume = "r".repeat(RESUME_CHAR_LIMIT + 100);
        let job = "j".repeat(JOB_CHAR_LIMIT + 100);
        let prompt = build_enrichment_prompt(&resume, &job, &analysis);
        assert!(prompt.contains(&"r".repeat(RESUME_CHAR_LIMIT)));
        assert!(!prompt.contains(&"r".repeat(RESUME_CHAR_LIMIT + 1)));
        assert!(!prompt.contains(&"j".repeat(JOB_CHAR_LIMIT + 1)));
    }
}
