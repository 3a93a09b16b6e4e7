//! Sentence classification
//!
//! Each sentence gets exactly one [`ClassificationRecord`]: the first
//! pattern of [`CATALOGUE`] that matches, with its representative pair,
//! or [`Rule::Unclassified`] when nothing matches.

use crate::index::SentenceIndex;
use crate::pattern::{CATALOGUE, Governor, Labels, NO_FORM, Pattern};
use crate::tree::Sentence;
use log::debug;
use std::fmt;

/// Outcome of classifying one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Matched(Pattern),
    Unclassified,
}

impl Rule {
    pub fn label(self, labels: Labels) -> &'static str {
        match self {
            Rule::Matched(pattern) => pattern.label(labels),
            Rule::Unclassified => labels.unclassified(),
        }
    }

    pub fn pattern(self) -> Option<Pattern> {
        match self {
            Rule::Matched(pattern) => Some(pattern),
            Rule::Unclassified => None,
        }
    }

    #[inline]
    pub fn is_classified(self) -> bool {
        matches!(self, Rule::Matched(_))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Labels::English))
    }
}

/// One row of the classification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRecord {
    pub sentence: String,
    pub rule: Rule,
    pub governor: Governor,
    pub dependent: String,
}

impl ClassificationRecord {
    fn unclassified(sentence: &Sentence) -> Self {
        Self {
            sentence: sentence.text_or_placeholder().to_string(),
            rule: Rule::Unclassified,
            governor: Governor::Missing,
            dependent: NO_FORM.to_string(),
        }
    }

    pub fn governor_form(&self, labels: Labels) -> &str {
        self.governor.form(labels)
    }
}

/// Classify one sentence against the catalogue in precedence order
pub fn classify(sentence: &Sentence) -> ClassificationRecord {
    classify_in(&SentenceIndex::build(sentence))
}

/// [`classify`] over a prebuilt index
pub fn classify_in(index: &SentenceIndex<'_>) -> ClassificationRecord {
    let sentence = index.sentence();

    for pattern in CATALOGUE {
        if let Some(rep) = pattern.representative_in(index) {
            debug!(
                "{:?} classified as {}",
                sentence.text_or_placeholder(),
                pattern
            );
            return ClassificationRecord {
                sentence: sentence.text_or_placeholder().to_string(),
                rule: Rule::Matched(pattern),
                governor: rep.governor,
                dependent: rep.dependent,
            };
        }
    }

    debug!("{:?} unclassified", sentence.text_or_placeholder());
    ClassificationRecord::unclassified(sentence)
}

/// Classify every sentence, keeping unclassified records
pub fn classify_sentences(sentences: &[Sentence]) -> Vec<ClassificationRecord> {
    sentences.iter().map(classify).collect()
}

/// Drop unclassified records before results are published
pub fn retain_classified(records: Vec<ClassificationRecord>) -> Vec<ClassificationRecord> {
    records
        .into_iter()
        .filter(|record| record.rule.is_classified())
        .collect()
}
