//! The individual suggestion rules and their evaluation order.

use crate::matching::{AnalysisResult, EducationLevel, ExperienceLevel};
use crate::matching::vocabulary::SkillCategory;
use crate::suggestions::signals::{
    check_contact_info, contextual_skill_usage, count_action_verbs, find_metrics, find_sections,
    measure_length,
};
use crate::suggestions::{Severity, SuggestionItem, SuggestionRule};

/// Evaluation order. Position in this table is position in the output.
pub static RULES: &[&dyn SuggestionRule] = &[
    &ScoreBandRule,
    &CriticalGapRule,
    &MISSING_PROGRAMMING,
    &MISSING_FRAMEWORKS,
    &MISSING_CLOUD_DEVOPS,
    &ExperienceLevelRule,
    &YearsRequiredRule,
    &ActionVerbRule,
    &MetricsRule,
    &LengthRule,
    &SectionsRule,
    &ContactRule,
    &SkillsInContextRule,
    &AtsTipRule,
    &EducationRule,
];

const CRITICAL_GAP_LIMIT: usize = 5;
const CATEGORY_GAP_LIMIT: usize = 4;

const MIN_ACTION_VERBS: usize = 5;
const STRONG_ACTION_VERBS: usize = 10;

const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 1200;

const STRONG_METRICS: usize = 4;
const MIN_CONTEXT_RATIO: f64 = 0.3;

fn head(items: &[String], n: usize) -> String {
    items.iter().take(n).map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── 1. score band ───────────────────────────────────────────────────────────

pub struct ScoreBandRule;

impl SuggestionRule for ScoreBandRule {
    fn name(&self) -> &'static str {
        "score_band"
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        let score = analysis.match_score;
        let item = if score >= 80.0 {
            SuggestionItem::new(
                Severity::Success,
                "Match Score",
                format!("Excellent match ({score:.1}%)! Your skills align very well with this job. Focus on tailoring your experience descriptions to highlight relevant achievements."),
            )
        } else if score >= 60.0 {
            SuggestionItem::new(
                Severity::Info,
                "Match Score",
                format!("Good match ({score:.1}%)! You have a solid foundation. Adding a few more relevant skills could push your application to the top."),
            )
        } else if score >= 40.0 {
            SuggestionItem::new(
                Severity::Warning,
                "Match Score",
                format!("Moderate match ({score:.1}%). Consider emphasizing transferable skills and any relevant projects or coursework."),
            )
        } else {
            SuggestionItem::new(
                Severity::Danger,
                "Match Score",
                format!("Low match ({score:.1}%). This role may require skills you haven't highlighted. Consider if you have relevant experience that isn't reflected in your resume."),
            )
        };
        vec![item]
    }
}

// ── 2. high-priority gaps ───────────────────────────────────────────────────

pub struct CriticalGapRule;

impl SuggestionRule for CriticalGapRule {
    fn name(&self) -> &'static str {
        "critical_gap"
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        if analysis.high_priority_missing.is_empty() {
            return vec![];
        }
        vec![SuggestionItem::new(
            Severity::Danger,
            "Critical Skills Gap",
            format!(
                "These skills are mentioned multiple times in the job description and are likely essential: {}",
                head(&analysis.high_priority_missing, CRITICAL_GAP_LIMIT)
            ),
        )]
    }
}

// ── 3-5. per-category gaps ──────────────────────────────────────────────────

/// Reports missing skills of one category: `"{lead}: a, b. {advice}"`.
pub struct MissingCategoryRule {
    pub category: SkillCategory,
    pub severity: Severity,
    pub label: &'static str,
    pub lead: &'static str,
    pub advice: &'static str,
}

pub const MISSING_PROGRAMMING: MissingCategoryRule = MissingCategoryRule {
    category: SkillCategory::Programming,
    severity: Severity::Warning,
    label: "Programming Languages",
    lead: "Missing programming languages",
    advice: "If you have experience with similar languages, highlight your ability to learn quickly.",
};

pub const MISSING_FRAMEWORKS: MissingCategoryRule = MissingCategoryRule {
    category: SkillCategory::Frameworks,
    severity: Severity::Warning,
    label: "Frameworks",
    lead: "Missing frameworks/libraries",
    advice: "Consider adding relevant projects to demonstrate these skills.",
};

pub const MISSING_CLOUD_DEVOPS: MissingCategoryRule = MissingCategoryRule {
    category: SkillCategory::CloudDevops,
    severity: Severity::Info,
    label: "Cloud/DevOps",
    lead: "Missing cloud/DevOps skills",
    advice: "Free tier accounts on AWS/Azure can help you gain hands-on experience.",
};

impl SuggestionRule for MissingCategoryRule {
    fn name(&self) -> &'static str {
        self.category.as_str()
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        let missing = analysis.missing_categories.get(self.category);
        if missing.is_empty() {
            return vec![];
        }
        vec![SuggestionItem::new(
            self.severity,
            self.label,
            format!("{}: {}. {}", self.lead, head(missing, CATEGORY_GAP_LIMIT), self.advice),
        )]
    }
}

// ── 6-7. experience ─────────────────────────────────────────────────────────

pub struct ExperienceLevelRule;

impl SuggestionRule for ExperienceLevelRule {
    fn name(&self) -> &'static str {
        "experience_level"
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        let level = analysis.jd_experience_level;
        if level == ExperienceLevel::NotSpecified {
            return vec![];
        }
        let advice = if level == ExperienceLevel::Senior {
            "Highlight your growth and quick learning ability."
        } else {
            "Your enthusiasm and recent projects can compensate for less experience."
        };
        vec![SuggestionItem::new(
            Severity::Info,
            "Experience Level",
            format!("This appears to be a {}-level position. {advice}", level.as_str()),
        )]
    }
}

pub struct YearsRequiredRule;

impl SuggestionRule for YearsRequiredRule {
    fn name(&self) -> &'static str {
        "years_required"
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        match analysis.jd_years_required {
            Some(years) if years > 0 => vec![SuggestionItem::new(
                Severity::Info,
                "Years Required",
                format!("The job requires approximately {years}+ years of experience. Include all relevant experience including internships, freelance work, and significant personal projects."),
            )],
            _ => vec![],
        }
    }
}

// ── 8-10. writing quality ───────────────────────────────────────────────────

pub struct ActionVerbRule;

impl SuggestionRule for ActionVerbRule {
    fn name(&self) -> &'static str {
        "action_verbs"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        let report = count_action_verbs(resume_text);
        if report.total < MIN_ACTION_VERBS {
            return vec![SuggestionItem::new(
                Severity::Warning,
                "Action Verbs",
                "Your resume lacks strong action verbs. Start bullet points with words like: Led, Developed, Implemented, Achieved, Optimized, Delivered.",
            )];
        }
        if report.total >= STRONG_ACTION_VERBS {
            return vec![];
        }
        let empty = report.empty_categories();
        if empty.is_empty() {
            return vec![];
        }
        let named: Vec<&str> = empty.into_iter().take(2).collect();
        vec![SuggestionItem::new(
            Severity::Info,
            "Action Verbs",
            format!(
                "Consider adding more {} action verbs to showcase different aspects of your experience.",
                named.join(", ")
            ),
        )]
    }
}

pub struct MetricsRule;

impl SuggestionRule for MetricsRule {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        match find_metrics(resume_text).count {
            0 => vec![SuggestionItem::new(
                Severity::Warning,
                "Quantifiable Results",
                "No metrics found! Add numbers to demonstrate impact: \"Increased sales by 25%\", \"Reduced load time by 40%\", \"Managed team of 5\", \"Processed 10K+ records daily\".",
            )],
            n if n < STRONG_METRICS => vec![SuggestionItem::new(
                Severity::Info,
                "Quantifiable Results",
                format!("Found {n} metrics. Try to add more quantifiable achievements to each role - aim for at least 2-3 per position."),
            )],
            _ => vec![],
        }
    }
}

pub struct LengthRule;

impl SuggestionRule for LengthRule {
    fn name(&self) -> &'static str {
        "length"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        let words = measure_length(resume_text).words;
        if words < MIN_WORDS {
            vec![SuggestionItem::new(
                Severity::Warning,
                "Content Length",
                format!("Your resume seems too short ({words} words). Add more details about your responsibilities, achievements, and projects."),
            )]
        } else if words > MAX_WORDS {
            vec![SuggestionItem::new(
                Severity::Info,
                "Content Length",
                format!("Your resume is quite long ({words} words). For most roles, keep it to 1-2 pages. Prioritize the most relevant information."),
            )]
        } else {
            vec![]
        }
    }
}

// ── 11-13. structure and presentation ───────────────────────────────────────

pub struct SectionsRule;

impl SuggestionRule for SectionsRule {
    fn name(&self) -> &'static str {
        "sections"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        let critical = find_sections(resume_text).critical_missing();
        if critical.is_empty() {
            return vec![];
        }
        let names: Vec<String> = critical.into_iter().map(title_case).collect();
        vec![SuggestionItem::new(
            Severity::Danger,
            "Resume Structure",
            format!(
                "Missing critical sections: {}. These are essential for most job applications.",
                names.join(", ")
            ),
        )]
    }
}

pub struct ContactRule;

impl SuggestionRule for ContactRule {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        let contact = check_contact_info(resume_text);
        let mut items = Vec::new();
        if !contact.email {
            items.push(SuggestionItem::new(
                Severity::Danger,
                "Contact Info",
                "No email address detected! Make sure your contact information is clearly visible at the top of your resume.",
            ));
        }
        if !contact.linkedin && !contact.github {
            items.push(SuggestionItem::new(
                Severity::Info,
                "Online Presence",
                "Consider adding LinkedIn or GitHub profiles to showcase your professional network and code samples.",
            ));
        }
        items
    }
}

pub struct SkillsInContextRule;

impl SuggestionRule for SkillsInContextRule {
    fn name(&self) -> &'static str {
        "skills_in_context"
    }

    fn evaluate(&self, analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem> {
        let (contextual, total) = contextual_skill_usage(resume_text, &analysis.matched_skills);
        if total == 0 || (contextual as f64 / total as f64) >= MIN_CONTEXT_RATIO {
            return vec![];
        }
        vec![SuggestionItem::new(
            Severity::Info,
            "Skills Integration",
            "Your skills appear to be listed but not demonstrated in context. Show how you used each skill in your experience descriptions.",
        )]
    }
}

// ── 14-15. closing advice ───────────────────────────────────────────────────

pub struct AtsTipRule;

impl SuggestionRule for AtsTipRule {
    fn name(&self) -> &'static str {
        "ats_tip"
    }

    fn evaluate(&self, _analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        vec![SuggestionItem::new(
            Severity::Info,
            "ATS Optimization",
            "For ATS compatibility: Use standard section headings, avoid tables/graphics, save as PDF, and include exact keywords from the job description.",
        )]
    }
}

pub struct EducationRule;

impl SuggestionRule for EducationRule {
    fn name(&self) -> &'static str {
        "education"
    }

    fn evaluate(&self, analysis: &AnalysisResult, _resume_text: &str) -> Vec<SuggestionItem> {
        let advanced = [EducationLevel::Masters, EducationLevel::Phd];
        let jd_wants_advanced = advanced.iter().any(|l| analysis.jd_education.contains(l));
        let resume_has_advanced = advanced.iter().any(|l| analysis.resume_education.contains(l));
        if !jd_wants_advanced || resume_has_advanced {
            return vec![];
        }
        vec![SuggestionItem::new(
            Severity::Info,
            "Education",
            "This position may prefer advanced degrees. Emphasize relevant coursework, certifications, and hands-on project experience.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analyzer::CategorizedSkills;

    fn blank() -> AnalysisResult {
        AnalysisResult {
            match_score: 0.0,
            matched_skills: vec![],
            missing_skills: vec![],
            extra_skills: vec![],
            high_priority_missing: vec![],
            matched_categories: CategorizedSkills::default(),
            missing_categories: CategorizedSkills::default(),
            resume_skill_count: 0,
            jd_skill_count: 0,
            jd_experience_level: ExperienceLevel::NotSpecified,
            jd_years_required: None,
            jd_education: vec![],
            resume_experience_level: ExperienceLevel::NotSpecified,
            resume_education: vec![],
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rule_table_has_fifteen_steps_in_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 15);
        assert_eq!(names.first(), Some(&"score_band"));
        assert_eq!(&names[2..5], &["programming", "frameworks", "cloud_devops"]);
        assert_eq!(names.last(), Some(&"education"));
    }

    #[test]
    fn test_score_band_boundaries() {
        let mut a = blank();
        for (score, severity, prefix) in [
            (80.0, Severity::Success, "Excellent match (80.0%)!"),
            (60.0, Severity::Info, "Good match (60.0%)!"),
            (40.0, Severity::Warning, "Moderate match (40.0%)."),
            (39.9, Severity::Danger, "Low match (39.9%)."),
        ] {
            a.match_score = score;
            let items = ScoreBandRule.evaluate(&a, "");
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].severity, severity);
            assert!(items[0].message.starts_with(prefix), "{}", items[0].message);
        }
    }

    #[test]
    fn test_critical_gap_lists_first_five() {
        let mut a = blank();
        assert!(CriticalGapRule.evaluate(&a, "").is_empty());
        a.high_priority_missing = strings(&["a", "b", "c", "d", "e", "f"]);
        let items = CriticalGapRule.evaluate(&a, "");
        assert_eq!(items[0].severity, Severity::Danger);
        assert!(items[0].message.ends_with("likely essential: a, b, c, d, e"));
    }

    #[test]
    fn test_category_gaps_list_first_four() {
        let mut a = blank();
        a.missing_categories.programming = strings(&["c++", "go", "java", "python", "rust"]);
        let items = MISSING_PROGRAMMING.evaluate(&a, "");
        assert_eq!(items[0].severity, Severity::Warning);
        assert!(items[0]
            .message
            .starts_with("Missing programming languages: c++, go, java, python. If you"));
        assert!(MISSING_FRAMEWORKS.evaluate(&a, "").is_empty());
        assert!(MISSING_CLOUD_DEVOPS.evaluate(&a, "").is_empty());

        a.missing_categories.frameworks = strings(&["react"]);
        let items = MISSING_FRAMEWORKS.evaluate(&a, "");
        assert_eq!(items[0].category, "Frameworks");
        assert!(items[0].message.starts_with("Missing frameworks/libraries: react."));
    }

    #[test]
    fn test_experience_level_branches() {
        let mut a = blank();
        assert!(ExperienceLevelRule.evaluate(&a, "").is_empty());

        a.jd_experience_level = ExperienceLevel::Senior;
        let items = ExperienceLevelRule.evaluate(&a, "");
        assert_eq!(
            items[0].message,
            "This appears to be a senior-level position. Highlight your growth and quick learning ability."
        );

        a.jd_experience_level = ExperienceLevel::Entry;
        let items = ExperienceLevelRule.evaluate(&a, "");
        assert!(items[0].message.starts_with("This appears to be a entry-level position. Your enthusiasm"));
    }

    #[test]
    fn test_years_required_needs_positive_value() {
        let mut a = blank();
        assert!(YearsRequiredRule.evaluate(&a, "").is_empty());
        a.jd_years_required = Some(0);
        assert!(YearsRequiredRule.evaluate(&a, "").is_empty());
        a.jd_years_required = Some(3);
        let items = YearsRequiredRule.evaluate(&a, "");
        assert!(items[0].message.starts_with("The job requires approximately 3+ years"));
    }

    #[test]
    fn test_action_verb_tiers() {
        let a = blank();
        let few = ActionVerbRule.evaluate(&a, "Led and managed");
        assert_eq!(few[0].severity, Severity::Warning);

        // 5 distinct verbs; achievement, creation, technical, analysis empty
        let some = ActionVerbRule.evaluate(&a, "led managed increased reduced optimized");
        assert_eq!(some.len(), 1);
        assert_eq!(
            some[0].message,
            "Consider adding more achievement, creation action verbs to showcase different aspects of your experience."
        );

        let many = "led managed achieved delivered created built improved reduced engineered analyzed";
        assert!(ActionVerbRule.evaluate(&a, many).is_empty());

        let balanced = "led achieved created improved engineered analyzed";
        assert!(ActionVerbRule.evaluate(&a, balanced).is_empty());
    }

    #[test]
    fn test_repeating_one_verb_still_lacks_action_verbs() {
        let items = ActionVerbRule.evaluate(&blank(), "Led A. Led B. Led C. Led D. Led E.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].severity, Severity::Warning);
        assert!(items[0].message.starts_with("Your resume lacks strong action verbs."));
    }

    #[test]
    fn test_metric_tiers() {
        let a = blank();
        assert!(MetricsRule.evaluate(&a, "none")[0].message.starts_with("No metrics found!"));
        let items = MetricsRule.evaluate(&a, "grew 30%");
        assert_eq!(items[0].message.split('.').next(), Some("Found 2 metrics"));
        assert!(MetricsRule.evaluate(&a, "10 20 30 40").is_empty());
    }

    #[test]
    fn test_length_tiers() {
        let a = blank();
        assert!(LengthRule.evaluate(&a, "short text")[0].message.contains("(2 words)"));
        assert!(LengthRule.evaluate(&a, &"word ".repeat(500)).is_empty());
        let long = LengthRule.evaluate(&a, &"word ".repeat(1201));
        assert_eq!(long[0].severity, Severity::Info);
        assert!(long[0].message.contains("(1201 words)"));
    }

    #[test]
    fn test_sections_rule_title_cases() {
        let a = blank();
        let items = SectionsRule.evaluate(&a, "summary only");
        assert!(items[0]
            .message
            .starts_with("Missing critical sections: Experience, Education, Skills."));
        assert!(SectionsRule.evaluate(&a, "Experience Education Skills").is_empty());
    }

    #[test]
    fn test_contact_rule_items() {
        let a = blank();
        let items = ContactRule.evaluate(&a, "plain text");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "Contact Info");
        assert_eq!(items[1].category, "Online Presence");
        assert!(ContactRule.evaluate(&a, "me@site.io github.com/me").is_empty());
    }

    #[test]
    fn test_skills_in_context_ratio() {
        let mut a = blank();
        assert!(SkillsInContextRule.evaluate(&a, "").is_empty());

        a.matched_skills = strings(&["python", "sql", "rust", "go"]);
        let listed = "Skills: python\nsql\nrust\ngo";
        assert_eq!(SkillsInContextRule.evaluate(&a, listed).len(), 1);

        let shown = "Built python tooling\nDeployed sql schemas\nrust\ngo";
        assert!(SkillsInContextRule.evaluate(&a, shown).is_empty());
    }

    #[test]
    fn test_ats_tip_always_fires() {
        assert_eq!(AtsTipRule.evaluate(&blank(), "").len(), 1);
    }

    #[test]
    fn test_education_rule() {
        let mut a = blank();
        a.jd_education = vec![EducationLevel::Bachelors];
        assert!(EducationRule.evaluate(&a, "").is_empty());

        a.jd_education = vec![EducationLevel::Phd];
        assert_eq!(EducationRule.evaluate(&a, "").len(), 1);

        a.resume_education = vec![EducationLevel::Masters];
        assert!(EducationRule.evaluate(&a, "").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("skills"), "Skills");
        assert_eq!(title_case(""), "");
    }
}
