//! Text normalization for skill matching.

use std::sync::LazyLock;

use regex::Regex;

use crate::matching::vocabulary::Vocabulary;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\|,;:\-()\[\]{}]").expect("Invalid separator regex"));

// `.`, `+` and `#` survive so that `c++`, `c#` and `.net` stay intact.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.+#]").expect("Invalid non-word regex"));

/// Lowercases, turns separators and stray punctuation into spaces, and
/// collapses whitespace runs. No alias handling.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let separated = SEPARATORS.replace_all(&lowered, " ");
    let stripped = NON_WORD.replace_all(&separated, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `text`, then appends the canonical form of every alias token to
/// the end. Aliases are added, never substituted, so both spellings remain
/// visible to the pattern matcher.
pub fn normalize_with_aliases(text: &str) -> String {
    let mut normalized = normalize(text);
    let vocabulary = Vocabulary::global();

    let expansions: Vec<&'static str> = normalized
        .split(' ')
        .filter_map(|token| match vocabulary.alias(token) {
            Some(canonical) if canonical != token => Some(canonical),
            _ => None,
        })
        .collect();

    for canonical in expansions {
        normalized.push(' ');
        normalized.push_str(canonical);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(normalize("  Senior   Rust\tEngineer\n"), "senior rust engineer");
    }

    #[test]
    fn test_normalize_keeps_symbol_tokens() {
        assert_eq!(
            normalize("C++/C#, .NET (Core); Node.js: k8s!"),
            "c++ c# .net core node.js k8s"
        );
    }

    #[test]
    fn test_normalize_strips_other_punctuation() {
        assert_eq!(normalize("Python & Django @ \"ACME\""), "python django acme");
        assert_eq!(normalize("under_score stays"), "under_score stays");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" --- "), "");
    }

    #[test]
    fn test_aliases_are_appended_not_substituted() {
        assert_eq!(normalize_with_aliases("I use JS daily"), "i use js daily javascript");
    }

    #[test]
    fn test_alias_expansion_per_occurrence() {
        assert_eq!(
            normalize_with_aliases("k8s and k8s"),
            "k8s and k8s kubernetes kubernetes"
        );
    }

    #[test]
    fn test_canonical_tokens_are_untouched() {
        assert_eq!(normalize_with_aliases("python kubernetes"), "python kubernetes");
    }

    #[test]
    fn test_slash_alias_only_reachable_via_compact_form() {
        // "ci/cd" is split by normalization; only "cicd" expands.
        assert_eq!(normalize_with_aliases("CI/CD"), "ci cd");
        assert_eq!(normalize_with_aliases("cicd"), "cicd ci/cd");
    }
}
