//! Skill Taxonomy: canonical skill names and the lowercase tokens that identify them.
//!
//! A single `SkillTaxonomy` is built at startup and shared (`Arc`) by the
//! extractor, the level estimator, the gap analyzer and the ATS scorer, so a
//! skill resolves to the same canonical name everywhere.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A normalized skill name. Equality and hashing ignore ASCII case; the
/// display form is whatever the taxonomy (or the caller) supplied.
#[derive(Debug, Clone, Eq)]
pub struct CanonicalSkill(String);

impl CanonicalSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased name; the primary token used by the level estimator.
    pub fn primary_token(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for CanonicalSkill {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for CanonicalSkill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for CanonicalSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalSkill {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Serialize for CanonicalSkill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CanonicalSkill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(CanonicalSkill)
    }
}

/// One taxonomy entry. `tokens[0]` is always the lowercased canonical name.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub skill: CanonicalSkill,
    pub tokens: Vec<String>,
}

/// Declaration order matters: when a token could match several entries the
/// first declared one wins.
const DEFAULT_ENTRIES: &[(&str, &[&str])] = &[
    ("Java", &["java", "j2ee", "j2se", "core java", "java ee"]),
    (
        "Spring Boot",
        &["spring boot", "spring", "spring framework", "spring mvc", "spring cloud"],
    ),
    (
        "SQL",
        &["sql", "database", "mysql", "postgresql", "oracle", "db", "rdbms"],
    ),
    (
        "REST API",
        &["rest api", "rest", "restful", "api", "web services", "microservices"],
    ),
    (
        "Docker",
        &["docker", "containers", "containerization", "dockerfile"],
    ),
    (
        "AWS",
        &["aws", "amazon web services", "cloud", "ec2", "s3", "lambda", "rds"],
    ),
    (
        "DSA",
        &[
            "dsa",
            "data structures",
            "algorithms",
            "algorithm",
            "leetcode",
            "competitive programming",
        ],
    ),
    (
        "System Design",
        &[
            "system design",
            "distributed systems",
            "architecture",
            "microservices architecture",
        ],
    ),
    (
        "JavaScript",
        &["javascript", "js", "ecmascript", "node.js", "nodejs", "es6"],
    ),
    ("React", &["react", "reactjs", "react.js", "react native"]),
    (
        "Python",
        &["python", "django", "flask", "fastapi", "pandas", "numpy"],
    ),
    (
        "Git",
        &["git", "github", "version control", "gitlab", "bitbucket"],
    ),
    ("Maven", &["maven", "mvn", "build tool"]),
    ("Kubernetes", &["kubernetes", "k8s", "container orchestration"]),
    ("MongoDB", &["mongodb", "nosql", "document database"]),
    ("Redis", &["redis", "cache", "caching"]),
];

/// Immutable canonical-skill table.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: Vec<SkillEntry>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_ENTRIES
                .iter()
                .map(|(name, tokens)| (name.to_string(), tokens.iter().map(|t| t.to_string()).collect())),
        )
    }
}

impl SkillTaxonomy {
    /// Builds a taxonomy from `(canonical name, tokens)` pairs.
    ///
    /// Tokens are lowercased and the lowercased canonical name is moved to the
    /// front so every entry has a primary token.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, tokens)| {
                let primary = name.to_lowercase();
                let mut normalized = vec![primary.clone()];
                for token in tokens {
                    let token = token.trim().to_lowercase();
                    if !token.is_empty() && !normalized.contains(&token) {
                        normalized.push(token);
                    }
                }
                SkillEntry {
                    skill: CanonicalSkill::new(name),
                    tokens: normalized,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Resolves a free-form token to a canonical skill.
    ///
    /// Exact matches on a canonical name or synonym are tried first, so
    /// "javascript" resolves to JavaScript rather than to Java. Failing that,
    /// the first entry with a synonym contained in the token wins.
    pub fn lookup(&self, token: &str) -> Option<CanonicalSkill> {
        let needle = token.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| e.tokens.iter().any(|t| *t == needle))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.tokens.iter().any(|t| needle.contains(t.as_str())))
            })
            .map(|e| e.skill.clone())
    }

    /// Returns the taxonomy display form for a known skill, or the trimmed
    /// name unchanged. Only exact (case-insensitive) matches are canonicalized.
    pub fn canonicalize(&self, name: &str) -> CanonicalSkill {
        let trimmed = name.trim();
        self.entries
            .iter()
            .find(|e| e.tokens.iter().any(|t| t.eq_ignore_ascii_case(trimmed)))
            .map(|e| e.skill.clone())
            .unwrap_or_else(|| CanonicalSkill::new(trimmed))
    }

    pub fn tokens_for(&self, skill: &CanonicalSkill) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.skill == *skill)
            .map(|e| e.tokens.as_slice())
    }

    /// True when the skill's name or any of its synonyms occurs in `lowered_text`.
    /// `lowered_text` must already be lowercase.
    pub fn matches_text(&self, skill: &CanonicalSkill, lowered_text: &str) -> bool {
        if lowered_text.contains(&skill.primary_token()) {
            return true;
        }
        self.tokens_for(skill)
            .map(|tokens| tokens.iter().any(|t| lowered_text.contains(t.as_str())))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_entry_starts_with_its_lowercased_name() {
        let taxonomy = SkillTaxonomy::default();
        for entry in taxonomy.entries() {
            assert_eq!(entry.tokens[0], entry.skill.as_str().to_lowercase());
        }
    }

    #[test]
    fn test_default_taxonomy_has_unified_skill_table() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.len(), 16);
        assert!(taxonomy.tokens_for(&"Kubernetes".into()).is_some());
        assert!(taxonomy.tokens_for(&"Redis".into()).is_some());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.lookup("  PostgreSQL "), Some("SQL".into()));
        assert_eq!(taxonomy.lookup("K8S"), Some("Kubernetes".into()));
    }

    #[test]
    fn test_lookup_prefers_exact_match_over_substring() {
        let taxonomy = SkillTaxonomy::default();
        // "javascript" contains "java", but it is an exact JavaScript token.
        let found = taxonomy.lookup("javascript").unwrap();
        assert_eq!(found.as_str(), "JavaScript");
    }

    #[test]
    fn test_lookup_substring_tie_break_is_first_declared() {
        let taxonomy = SkillTaxonomy::default();
        // Contains both "java" (Java) and "spring" (Spring Boot); Java is declared first.
        assert_eq!(taxonomy.lookup("java spring stack"), Some("Java".into()));
    }

    #[test]
    fn test_lookup_unknown_token_is_none() {
        let taxonomy = SkillTaxonomy::default();
        assert!(taxonomy.lookup("Terraform").is_none());
        assert!(taxonomy.lookup("   ").is_none());
    }

    #[test]
    fn test_canonicalize_keeps_unknown_names_verbatim() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.canonicalize("rest api").as_str(), "REST API");
        assert_eq!(taxonomy.canonicalize(" GraphQL ").as_str(), "GraphQL");
    }

    #[test]
    fn test_canonical_skill_identity_ignores_case() {
        let mut set = HashSet::new();
        set.insert(CanonicalSkill::from("AWS"));
        assert!(set.contains(&CanonicalSkill::from("aws")));
        assert_eq!(CanonicalSkill::from("Java"), CanonicalSkill::from("JAVA"));
    }

    #[test]
    fn test_from_entries_normalizes_tokens() {
        let taxonomy = SkillTaxonomy::from_entries(vec![(
            "Rust".to_string(),
            vec!["  Cargo ".to_string(), "rust".to_string(), String::new()],
        )]);
        let tokens = taxonomy.tokens_for(&"rust".into()).unwrap();
        assert_eq!(tokens, ["rust".to_string(), "cargo".to_string()]);
    }

    #[test]
    fn test_matches_text_uses_synonyms() {
        let taxonomy = SkillTaxonomy::default();
        assert!(taxonomy.matches_text(&"AWS".into(), "deployed on amazon web services"));
        assert!(!taxonomy.matches_text(&"Docker".into(), "bare metal only"));
    }
}
