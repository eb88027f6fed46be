//! Keyword extraction: finds known skills mentioned in free text (usually a job description).
//!
//! Four passes over the cleaned text, each adding vocabulary hits:
//! 1. multi-word known skills found as contiguous substrings
//! 2. whitespace-split words, normalized
//! 3. phrase chunks (runs of content words between stop words), normalized
//! 4. Unicode word tokens, normalized
//!
//! The result is deduplicated and ordered by first discovery.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::vocabulary::Vocabulary;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static regex is valid"));

/// Longest sub-phrase (in words) taken from inside a chunk.
const MAX_SUBPHRASE_WORDS: usize = 3;

/// Words that end a phrase chunk.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "nor", "but", "of", "in", "on", "at", "to", "for", "from",
    "by", "with", "without", "into", "onto", "over", "under", "about", "as", "via", "per",
    "is", "are", "was", "were", "be", "been", "being", "am", "will", "would", "should", "can",
    "could", "may", "might", "must", "shall", "do", "does", "did", "have", "has", "had",
    "we", "you", "they", "he", "she", "it", "i", "our", "your", "their", "its", "my", "us",
    "them", "this", "that", "these", "those", "who", "whom", "which", "what", "where", "when",
    "why", "how", "if", "then", "than", "so", "such", "not", "no", "also", "very", "etc",
    "plus", "using", "use", "used", "including", "like", "within", "across", "strong",
    "good", "great", "excellent", "proficient", "proficiency", "knowledge", "familiarity",
    "experience", "experienced", "skills", "skill", "ability", "years", "year", "required",
    "preferred", "nice", "work", "working", "build", "building", "develop",
    "developing", "design", "designing",
];

/// Extracts the set of known skills mentioned in `text`.
/// Empty or non-matching text yields an empty list.
pub fn extract_keywords(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let full_text = words.join(" ");

    let mut found = KeywordSet::default();

    for skill in vocabulary.known_skills() {
        if skill.contains(' ') && full_text.contains(skill) {
            found.insert(skill.to_string());
        }
    }

    for word in &words {
        found.insert_if_known(word, vocabulary);
    }

    for phrase in phrase_chunks(&words) {
        found.insert_if_known(&phrase, vocabulary);
    }

    for token in cleaned.unicode_words() {
        found.insert_if_known(token, vocabulary);
    }

    found.into_vec()
}

/// Splits a word sequence into chunks at stop words and yields each chunk plus its
/// inner sub-phrases of two to three words.
pub fn phrase_chunks(words: &[&str]) -> Vec<String> {
    let mut phrases = Vec::new();

    for chunk in words.split(|w| STOP_WORDS.contains(w)) {
        if chunk.is_empty() {
            continue;
        }
        phrases.push(chunk.join(" "));

        let max_len = MAX_SUBPHRASE_WORDS.min(chunk.len().saturating_sub(1));
        for len in 2..=max_len {
            for window in chunk.windows(len) {
                phrases.push(window.join(" "));
            }
        }
    }

    phrases
}

/// Insertion-ordered set of normalized keywords.
#[derive(Default)]
struct KeywordSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl KeywordSet {
    fn insert(&mut self, keyword: String) {
        if self.seen.insert(keyword.clone()) {
            self.ordered.push(keyword);
        }
    }

    fn insert_if_known(&mut self, raw: &str, vocabulary: &Vocabulary) {
        let token = vocabulary.normalize(raw);
        if vocabulary.is_known(&token) {
            self.insert(token);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
