//! Skill Extractor: maps free text to the set of vocabulary skills it mentions.
//!
//! Matching is exact on normalized tokens: no stemming, no fuzzy distance.
//! Both the text and every vocabulary entry go through `normalize_text`, so
//! `CI/CD`, `ci / cd` and `ci-cd` all meet on the same token sequence.

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::Vocabulary;

/// Characters kept inside tokens because they change a technical term's meaning (`c++`, `c#`).
const TECH_CHARS: &[char] = &['+', '#'];

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Case-folds `text` and reduces it to single-space separated tokens.
///
/// Any character that is neither alphanumeric nor in `TECH_CHARS` acts as a separator.
/// Leading `+`/`#` are dropped so hashtags (`#rust`) still match the bare term.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    for raw in lowered.split(|c: char| !(c.is_alphanumeric() || TECH_CHARS.contains(&c))) {
        let token = raw.trim_start_matches(TECH_CHARS);
        if !token.is_empty() {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

/// Canonical form of a skill name: lower-cased, trimmed, internal whitespace collapsed.
/// This is the identity used for set membership.
pub fn normalize_skill(skill: &str) -> String {
    skill
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalizes the first letter of every alphabetic run: `"rest api"` → `"Rest Api"`,
/// `"ci/cd"` → `"Ci/Cd"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// Text that has already been through `normalize_text`, padded for boundary-safe search.
#[derive(Debug, Clone)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self(format!(" {} ", normalize_text(text)))
    }

    /// Byte offset of the first whole-token occurrence of `pattern`.
    /// `pattern` must already be normalized.
    pub fn find_phrase(&self, pattern: &str) -> Option<usize> {
        if pattern.is_empty() {
            return None;
        }
        self.0.find(&format!(" {pattern} "))
    }

    pub fn contains_phrase(&self, pattern: &str) -> bool {
        self.find_phrase(pattern).is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SkillSet
// ────────────────────────────────────────────────────────────────────────────

/// An ordered set of normalized skill names.
///
/// Order is insertion order; duplicates (after `normalize_skill`) are ignored.
/// Sets are small (tens of entries), so a `Vec` scan is the whole index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary skill strings, skipping blanks and duplicates.
    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for skill in skills {
            set.insert(skill.as_ref());
        }
        set
    }

    /// Inserts `skill` in normalized form. Returns false for blanks and duplicates.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = normalize_skill(skill);
        if skill.is_empty() || self.0.contains(&skill) {
            return false;
        }
        self.0.push(skill);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        let skill = normalize_skill(skill);
        self.0.iter().any(|s| *s == skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Skills present in both sets, in `self`'s order.
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(
            self.0
                .iter()
                .filter(|s| other.0.contains(s))
                .cloned()
                .collect(),
        )
    }

    /// Skills in `self` that are absent from `other`, in `self`'s order.
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(
            self.0
                .iter()
                .filter(|s| !other.0.contains(s))
                .cloned()
                .collect(),
        )
    }

    /// `self` followed by the skills of `other` it does not already hold.
    pub fn union(&self, other: &SkillSet) -> SkillSet {
        let mut out = self.clone();
        for skill in other.iter() {
            out.insert(skill);
        }
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Returns every vocabulary skill mentioned in `text`, ordered by first mention.
///
/// An empty result is a valid outcome; callers decide on a default set.
pub fn extract(text: &str, vocabulary: &Vocabulary) -> SkillSet {
    let normalized = NormalizedText::new(text);

    let mut hits: Vec<(usize, &str)> = vocabulary
        .skills()
        .iter()
        .filter_map(|entry| {
            normalized
                .find_phrase(&entry.pattern)
                .map(|pos| (pos, entry.name.as_str()))
        })
        .collect();

    // Same position happens when two entries normalize alike (`node.js` / `node js`).
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    SkillSet::from_skills(hits.into_iter().map(|(_, name)| name))
}
