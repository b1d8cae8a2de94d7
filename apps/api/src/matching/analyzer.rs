//! Analysis orchestrator: composes extraction, scoring, categorisation and the
//! metadata detectors into one [`AnalysisResult`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::extractor::{extract_skills, skill_frequency};
use crate::matching::metadata::{
    detect_education, detect_experience_level, extract_years_required, EducationLevel,
    ExperienceLevel,
};
use crate::matching::scoring::score_match;
use crate::matching::vocabulary::{SkillCategory, Vocabulary};

/// A JD skill counts as high priority once it appears this many times.
pub const HIGH_PRIORITY_FREQUENCY: usize = 2;

/// Skills bucketed by vocabulary category. Every category key is always
/// serialized, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedSkills {
    pub programming: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub cloud_devops: Vec<String>,
    pub data_ai: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl CategorizedSkills {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Programming => &self.programming,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::Databases => &self.databases,
            SkillCategory::CloudDevops => &self.cloud_devops,
            SkillCategory::DataAi => &self.data_ai,
            SkillCategory::Tools => &self.tools,
            SkillCategory::SoftSkills => &self.soft_skills,
        }
    }

    fn bucket_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Programming => &mut self.programming,
            SkillCategory::Frameworks => &mut self.frameworks,
            SkillCategory::Databases => &mut self.databases,
            SkillCategory::CloudDevops => &mut self.cloud_devops,
            SkillCategory::DataAi => &mut self.data_ai,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::SoftSkills => &mut self.soft_skills,
        }
    }
}

/// Buckets `skills` by category, keeping input order inside each bucket.
/// Names outside the vocabulary are dropped.
pub fn categorize_skills<S: AsRef<str>>(skills: &[S]) -> CategorizedSkills {
    let vocabulary = Vocabulary::global();
    let mut categorized = CategorizedSkills::default();
    for skill in skills {
        if let Some(entry) = vocabulary.entry(skill.as_ref()) {
            categorized.bucket_mut(entry.category).push(entry.name.to_string());
        }
    }
    categorized
}

/// Everything known about one resume / job-description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub high_priority_missing: Vec<String>,
    pub matched_categories: CategorizedSkills,
    pub missing_categories: CategorizedSkills,
    pub resume_skill_count: usize,
    pub jd_skill_count: usize,
    pub jd_experience_level: ExperienceLevel,
    pub jd_years_required: Option<u64>,
    pub jd_education: Vec<EducationLevel>,
    pub resume_experience_level: ExperienceLevel,
    pub resume_education: Vec<EducationLevel>,
}

/// Runs the full deterministic analysis. No I/O.
pub fn analyze(resume_text: &str, jd_text: &str) -> AnalysisResult {
    let resume_skills = extract_skills(resume_text);
    let jd_skills = extract_skills(jd_text);

    let outcome = score_match(&resume_skills, &jd_skills);

    let jd_list: Vec<&str> = jd_skills.iter().copied().collect();
    let jd_frequency = skill_frequency(jd_text, &jd_list);

    let high_priority_missing: Vec<String> = outcome
        .missing
        .iter()
        .filter(|skill| jd_frequency.get(skill.as_str()).copied().unwrap_or(0) >= HIGH_PRIORITY_FREQUENCY)
        .cloned()
        .collect();

    let result = AnalysisResult {
        match_score: outcome.score,
        matched_categories: categorize_skills(&outcome.matched),
        missing_categories: categorize_skills(&outcome.missing),
        matched_skills: outcome.matched,
        missing_skills: outcome.missing,
        extra_skills: outcome.extra,
        high_priority_missing,
        resume_skill_count: resume_skills.len(),
        jd_skill_count: jd_skills.len(),
        jd_experience_level: detect_experience_level(jd_text),
        jd_years_required: extract_years_required(jd_text),
        jd_education: detect_education(jd_text),
        resume_experience_level: detect_experience_level(resume_text),
        resume_education: detect_education(resume_text),
    };

    debug!(
        score = result.match_score,
        matched = result.matched_skills.len(),
        missing = result.missing_skills.len(),
        high_priority = result.high_priority_missing.len(),
        "Skill analysis complete"
    );

    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SCENARIO_RESUME: &str = "Experienced in Python, Django, and AWS. Led a team of 5 engineers. Increased throughput by 30%.";
    pub(crate) const SCENARIO_JD: &str = "Looking for a senior Python developer with Django and Kubernetes experience, 5+ years required.";

    #[test]
    fn test_scenario_analysis() {
        let result = analyze(SCENARIO_RESUME, SCENARIO_JD);

        assert_eq!(result.match_score, 66.7);
        assert_eq!(result.matched_skills, vec!["django", "python"]);
        assert_eq!(result.missing_skills, vec!["kubernetes"]);
        assert!(result.extra_skills.is_empty());
        assert!(result.high_priority_missing.is_empty());
        assert_eq!(result.resume_skill_count, 2);
        assert_eq!(result.jd_skill_count, 3);
        assert_eq!(result.jd_experience_level, ExperienceLevel::Senior);
        assert_eq!(result.jd_years_required, Some(5));
        assert_eq!(result.jd_education, vec![EducationLevel::Bachelors]);
        assert_eq!(result.matched_categories.programming, vec!["python"]);
        assert_eq!(result.matched_categories.frameworks, vec!["django"]);
        assert_eq!(result.missing_categories.cloud_devops, vec!["kubernetes"]);
    }

    #[test]
    fn test_high_priority_missing_needs_two_mentions() {
        let result = analyze(
            "Python developer",
            "Docker is required. Python plus Docker experience; Redis nice to have",
        );
        assert_eq!(result.missing_skills, vec!["docker", "redis"]);
        assert_eq!(result.high_priority_missing, vec!["docker"]);
        for skill in &result.high_priority_missing {
            assert!(result.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_empty_jd_skills_score_zero() {
        let result = analyze("Rust and Go", "We value punctuality.");
        assert_eq!(result.match_score, 0.0);
        assert_eq!(result.jd_skill_count, 0);
        assert_eq!(result.extra_skills, vec!["go", "rust"]);
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_categorize_drops_unknown_and_keeps_order() {
        let categorized = categorize_skills(&["sql", "cobol", "mysql", "git"]);
        assert_eq!(categorized.databases, vec!["sql", "mysql"]);
        assert_eq!(categorized.tools, vec!["git"]);
        assert!(categorized.programming.is_empty());
        assert_eq!(categorized.get(SkillCategory::Tools), ["git".to_string()]);
    }

    #[test]
    fn test_result_serializes_expected_keys() {
        let value = serde_json::to_value(analyze(SCENARIO_RESUME, SCENARIO_JD)).unwrap();
        assert_eq!(value["jd_experience_level"], "senior");
        assert_eq!(value["jd_years_required"], 5);
        assert_eq!(value["jd_education"], serde_json::json!(["bachelors"]));
        assert!(value["missing_categories"]["soft_skills"].as_array().unwrap().is_empty());
    }
}
