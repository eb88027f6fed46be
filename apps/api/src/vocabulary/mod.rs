//! Skill vocabulary: alias resolution, synonym groups, known skills, and match weights.
//!
//! Built once at startup (`builtin()` or `from_json_file()`), validated, then shared
//! read-only behind an `Arc` for the lifetime of the process.
//!
//! Load-time guarantees:
//! - every alias target is a fixed point (chains are flattened, cycles rejected)
//! - the synonym graph is symmetric, so `are_synonyms` is a single lookup
//! - known skills and weight keys are already normalized

pub mod defaults;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Alias cycle detected starting at '{0}'")]
    AliasCycle(String),

    #[error("Empty token in {0}")]
    EmptyToken(&'static str),

    #[error("Weight for '{skill}' must be positive, got {weight}")]
    InvalidWeight { skill: String, weight: f64 },
}

/// On-disk vocabulary format. Every field is optional; missing fields are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySpec {
    pub aliases: BTreeMap<String, String>,
    pub synonyms: BTreeMap<String, Vec<String>>,
    pub known_skills: Vec<String>,
    pub weights: BTreeMap<String, f64>,
    pub default_weight: Option<f64>,
}

impl VocabularySpec {
    /// The tables compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            aliases: defaults::ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            synonyms: defaults::SYNONYMS
                .iter()
                .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
                .collect(),
            known_skills: defaults::KNOWN_SKILLS.iter().map(|s| s.to_string()).collect(),
            weights: defaults::CORE_SKILLS
                .iter()
                .map(|s| (s.to_string(), defaults::CORE_SKILL_WEIGHT))
                .collect(),
            default_weight: Some(defaults::DEFAULT_WEIGHT),
        }
    }
}

/// Immutable, validated vocabulary shared by the extractor, matcher, and handlers.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    aliases: HashMap<String, String>,
    synonyms: HashMap<String, BTreeSet<String>>,
    known_skills: BTreeSet<String>,
    weights: HashMap<String, f64>,
    default_weight: f64,
}

impl Vocabulary {
    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::from_spec(VocabularySpec::builtin())
    }

    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path)?;
        let spec: VocabularySpec = serde_json::from_str(&raw)?;
        let vocabulary = Self::from_spec(spec)?;
        info!(
            path = %path.display(),
            known_skills = vocabulary.known_skills.len(),
            aliases = vocabulary.aliases.len(),
            "Vocabulary loaded from file"
        );
        Ok(vocabulary)
    }

    /// Validates and freezes a vocabulary spec.
    pub fn from_spec(spec: VocabularySpec) -> Result<Self, VocabularyError> {
        let aliases = flatten_aliases(&spec.aliases)?;

        let mut vocabulary = Vocabulary {
            aliases,
            synonyms: HashMap::new(),
            known_skills: BTreeSet::new(),
            weights: HashMap::new(),
            default_weight: spec.default_weight.unwrap_or(defaults::DEFAULT_WEIGHT),
        };

        if vocabulary.default_weight <= 0.0 || !vocabulary.default_weight.is_finite() {
            return Err(VocabularyError::InvalidWeight {
                skill: "<default>".to_string(),
                weight: vocabulary.default_weight,
            });
        }

        for skill in &spec.known_skills {
            let token = vocabulary.normalize(skill);
            if token.is_empty() {
                return Err(VocabularyError::EmptyToken("known_skills"));
            }
            vocabulary.known_skills.insert(token);
        }

        for (skill, &weight) in &spec.weights {
            if weight <= 0.0 || !weight.is_finite() {
                return Err(VocabularyError::InvalidWeight {
                    skill: skill.clone(),
                    weight,
                });
            }
            let token = vocabulary.normalize(skill);
            vocabulary.weights.insert(token, weight);
        }

        // Symmetrise: a lists b ⇒ both a→b and b→a are stored.
        let mut synonyms: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (skill, group) in &spec.synonyms {
            let head = vocabulary.normalize(skill);
            if head.is_empty() {
                return Err(VocabularyError::EmptyToken("synonyms"));
            }
            for member in group {
                let member = vocabulary.normalize(member);
                if member.is_empty() || member == head {
                    continue;
                }
                synonyms
                    .entry(head.clone())
                    .or_default()
                    .insert(member.clone());
                synonyms.entry(member).or_default().insert(head.clone());
            }
        }
        vocabulary.synonyms = synonyms;

        Ok(vocabulary)
    }

    /// Lower-cases and trims `raw`, then resolves it through the alias table.
    /// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = raw.trim().to_lowercase();
        match self.aliases.get(&cleaned) {
            Some(target) => target.clone(),
            None => cleaned,
        }
    }

    pub fn is_known(&self, token: &str) -> bool {
        self.known_skills.contains(token)
    }

    /// Known skills in sorted order.
    pub fn known_skills(&self) -> impl Iterator<Item = &str> {
        self.known_skills.iter().map(String::as_str)
    }

    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        self.synonyms_of(a).is_some_and(|group| group.contains(b))
    }

    pub fn synonyms_of(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.synonyms.get(token)
    }

    pub fn weight(&self, token: &str) -> f64 {
        self.weights
            .get(token)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

/// Resolves every alias to its terminal target so that no target is itself a key.
fn flatten_aliases(
    raw: &BTreeMap<String, String>,
) -> Result<HashMap<String, String>, VocabularyError> {
    let cleaned: BTreeMap<String, String> = raw
        .iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_lowercase()))
        .filter(|(k, v)| k != v)
        .collect();

    let mut flattened = HashMap::with_capacity(cleaned.len());
    for (key, target) in &cleaned {
        if key.is_empty() || target.is_empty() {
            return Err(VocabularyError::EmptyToken("aliases"));
        }

        let mut visited = BTreeSet::from([key.as_str()]);
        let mut current = target.as_str();
        while let Some(next) = cleaned.get(current) {
            if !visited.insert(current) {
                return Err(VocabularyError::AliasCycle(key.clone()));
            }
            current = next.as_str();
        }

        if current != target {
            warn!(alias = %key, via = %target, resolved = %current, "Flattened alias chain");
        }
        flattened.insert(key.clone(), current.to_string());
    }

    Ok(flattened)
}
