//! Skill vocabulary: canonical skills grouped into seven disjoint categories,
//! the alias table, and the compiled boundary-pattern registry.
//!
//! Everything here is built once on first use and shared read-only by every
//! analysis call.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The seven fixed skill categories, in categorisation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Frameworks,
    Databases,
    CloudDevops,
    DataAi,
    Tools,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Programming,
        SkillCategory::Frameworks,
        SkillCategory::Databases,
        SkillCategory::CloudDevops,
        SkillCategory::DataAi,
        SkillCategory::Tools,
        SkillCategory::SoftSkills,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Databases => "databases",
            SkillCategory::CloudDevops => "cloud_devops",
            SkillCategory::DataAi => "data_ai",
            SkillCategory::Tools => "tools",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }

    fn skills(self) -> &'static [&'static str] {
        match self {
            SkillCategory::Programming => PROGRAMMING_LANGUAGES,
            SkillCategory::Frameworks => FRAMEWORKS_LIBRARIES,
            SkillCategory::Databases => DATABASES,
            SkillCategory::CloudDevops => CLOUD_DEVOPS,
            SkillCategory::DataAi => DATA_AI_ML,
            SkillCategory::Tools => TOOLS_PLATFORMS,
            SkillCategory::SoftSkills => SOFT_SKILLS,
        }
    }
}

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust",
    "ruby", "php", "swift", "kotlin", "scala", "r programming", "matlab",
    "perl", "bash", "shell scripting", "powershell", "objective-c", "dart",
];

const FRAMEWORKS_LIBRARIES: &[&str] = &[
    "react", "angular", "vue", "node.js", "express", "django", "flask",
    "fastapi", "spring", "spring boot", ".net", "rails", "laravel",
    "next.js", "nuxt.js", "svelte", "jquery", "bootstrap", "tailwind",
    "material ui", "redux", "mobx", "graphql", "rest api",
];

const DATABASES: &[&str] = &[
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    "cassandra", "dynamodb", "oracle", "sqlite", "neo4j", "firebase",
    "snowflake", "bigquery", "couchdb", "mariadb",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "amazon web services", "azure", "gcp", "google cloud platform",
    "docker", "kubernetes", "jenkins", "terraform", "ansible", "ci/cd",
    "github actions", "gitlab ci", "circleci", "nginx", "apache",
    "linux", "unix", "devops", "microservices", "serverless",
];

const DATA_AI_ML: &[&str] = &[
    "machine learning", "deep learning", "artificial intelligence",
    "data analysis", "data science", "pandas", "numpy", "tensorflow",
    "pytorch", "keras", "scikit-learn", "natural language processing",
    "computer vision", "opencv", "hadoop", "spark", "airflow",
    "power bi", "tableau", "excel", "data visualization", "statistics",
];

const TOOLS_PLATFORMS: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "jira", "confluence",
    "slack", "figma", "adobe xd", "photoshop", "illustrator",
    "vs code", "intellij", "postman", "swagger", "jupyter",
];

const SOFT_SKILLS: &[&str] = &[
    "communication", "teamwork", "leadership", "problem solving",
    "time management", "critical thinking", "adaptability", "creativity",
    "collaboration", "attention to detail", "project management",
    "analytical skills", "interpersonal skills", "decision making",
    "conflict resolution", "presentation skills", "negotiation",
    "customer service", "mentoring", "strategic thinking",
    "public speaking", "technical writing", "research", "agile", "scrum",
];

/// Informal token → canonical skill. Targets that are not vocabulary entries
/// (e.g. `ui/ux`) are inert: they get appended but never match a skill.
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("node", "node.js"),
    ("nodejs", "node.js"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("vuejs", "vue"),
    ("angular.js", "angular"),
    ("angularjs", "angular"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("k8s", "kubernetes"),
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("ai", "artificial intelligence"),
    ("nlp", "natural language processing"),
    ("cv", "computer vision"),
    ("aws", "amazon web services"),
    ("gcp", "google cloud platform"),
    ("ci/cd", "ci/cd"),
    ("cicd", "ci/cd"),
    ("dotnet", ".net"),
    ("csharp", "c#"),
    ("cpp", "c++"),
    ("golang", "go"),
    ("tf", "terraform"),
    ("ui", "ui/ux"),
    ("ux", "ui/ux"),
];

/// Builds the boundary-aware pattern for one skill: the literal must be
/// flanked by text start/end or one of space, comma, semicolon, colon,
/// hyphen, parenthesis or bracket.
pub fn boundary_pattern(skill: &str) -> Regex {
    let pattern = format!(
        r"(?:^|[\s,;:\-()\[\]]){}(?:$|[\s,;:\-()\[\]])",
        regex::escape(&skill.to_lowercase())
    );
    Regex::new(&pattern).expect("escaped skill literal is always a valid pattern")
}

/// One registry entry: canonical name, category tag, compiled pattern.
#[derive(Debug)]
pub struct SkillEntry {
    pub name: &'static str,
    pub category: SkillCategory,
    pub pattern: Regex,
}

#[derive(Debug)]
pub struct Vocabulary {
    entries: Vec<SkillEntry>,
    by_name: HashMap<&'static str, usize>,
    aliases: HashMap<&'static str, &'static str>,
}

static VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

impl Vocabulary {
    /// The process-wide vocabulary, compiled on first access.
    pub fn global() -> &'static Vocabulary {
        &VOCABULARY
    }

    fn build() -> Self {
        let mut entries = Vec::new();
        let mut by_name = HashMap::new();

        for category in SkillCategory::ALL {
            for &name in category.skills() {
                // First category wins; the tables are disjoint so this never skips in practice.
                if by_name.contains_key(name) {
                    continue;
                }
                by_name.insert(name, entries.len());
                entries.push(SkillEntry {
                    name,
                    category,
                    pattern: boundary_pattern(name),
                });
            }
        }

        Self {
            entries,
            by_name,
            aliases: SKILL_ALIASES.iter().copied().collect(),
        }
    }

    /// All skills in category order, then table order.
    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks a skill up case-insensitively.
    pub fn entry(&self, skill: &str) -> Option<&SkillEntry> {
        let idx = match self.by_name.get(skill) {
            Some(idx) => *idx,
            None => *self.by_name.get(skill.to_lowercase().as_str())?,
        };
        Some(&self.entries[idx])
    }

    /// Restores vocabulary casing for a skill name; unknown names yield `None`.
    pub fn canonical(&self, skill: &str) -> Option<&'static str> {
        self.entry(skill).map(|e| e.name)
    }

    /// Canonical expansion of an informal token, if the token is a known alias.
    pub fn alias(&self, token: &str) -> Option<&'static str> {
        self.aliases.get(token.to_lowercase().as_str()).copied()
    }
}
