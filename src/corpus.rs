//! Collections of sentences
//!
//! A [`Corpus`] runs the classifier and the pair extractor over many
//! sentences, sequentially or on the rayon thread pool. Sentences are
//! independent, and results always come back in corpus order.

use crate::classifier::{ClassificationRecord, classify, classify_in, retain_classified};
use crate::config::AnalysisConfig;
use crate::extractor::{PairRecord, extract_pairs, extract_pairs_in};
use crate::index::SentenceIndex;
use crate::pattern::Pattern;
use crate::tree::Sentence;
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Ordered collection of parsed sentences
///
/// # Examples
///
/// ```
/// use udpatterns::{Corpus, Sentence, Token};
///
/// let sentence = Sentence::new(vec![
///     Token::new(1, "Corre", "VERB", "root", 0),
///     Token::new(2, "bem", "ADV", "advmod", 1),
/// ])
/// .unwrap();
///
/// let corpus = Corpus::new(vec![sentence]);
/// let analysis = corpus.analyze();
/// assert_eq!(analysis.classified.len(), 1);
/// assert_eq!(analysis.pairs.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    config: AnalysisConfig,
}

/// Published output of a corpus run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// One record per classified sentence, unclassified ones removed
    pub classified: Vec<ClassificationRecord>,
    /// Number of sentences that matched no pattern
    pub unclassified: usize,
    pub pairs: Vec<PairRecord>,
}

/// Per-pattern counts for aggregate reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub sentences: usize,
    pub unclassified: usize,
    pub classified: BTreeMap<Pattern, usize>,
    pub pairs: BTreeMap<Pattern, usize>,
}

impl Analysis {
    pub fn summary(&self) -> Summary {
        let mut classified = BTreeMap::new();
        for record in &self.classified {
            if let Some(pattern) = record.rule.pattern() {
                *classified.entry(pattern).or_insert(0) += 1;
            }
        }

        let mut pairs = BTreeMap::new();
        for record in &self.pairs {
            *pairs.entry(record.pattern).or_insert(0) += 1;
        }

        Summary {
            sentences: self.classified.len() + self.unclassified,
            unclassified: self.unclassified,
            classified,
            pairs,
        }
    }
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self::with_config(sentences, AnalysisConfig::default())
    }

    pub fn with_config(sentences: Vec<Sentence>, config: AnalysisConfig) -> Self {
        Self { sentences, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    pub fn push(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// `sent_id` metadata, or `sent_<n>` with `n` the 1-based position
    pub fn sentence_id(&self, position: usize) -> Option<String> {
        self.sentences
            .get(position)
            .map(|sentence| sentence_id(position, sentence))
    }

    /// Apply `f` to every sentence, keeping corpus order
    fn map_sentences<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> T + Sync + Send,
    {
        if self.config.parallel {
            self.sentences
                .par_iter()
                .enumerate()
                .map(|(pos, sentence)| f(pos, sentence))
                .collect()
        } else {
            self.sentences
                .iter()
                .enumerate()
                .map(|(pos, sentence)| f(pos, sentence))
                .collect()
        }
    }

    /// One record per sentence, unclassified ones included
    pub fn classify_all(&self) -> Vec<ClassificationRecord> {
        self.map_sentences(|_, sentence| classify(sentence))
    }

    /// Classification records with unclassified sentences removed
    pub fn classified(&self) -> Vec<ClassificationRecord> {
        retain_classified(self.classify_all())
    }

    /// Every pair record of the corpus
    pub fn extract_pairs(&self) -> Vec<PairRecord> {
        self.map_sentences(|pos, sentence| extract_pairs(&sentence_id(pos, sentence), sentence))
            .into_iter()
            .flatten()
            .collect()
    }

    /// Classify and extract in one pass
    pub fn analyze(&self) -> Analysis {
        info!(
            "Analyzing {} sentences ({})",
            self.sentences.len(),
            if self.config.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let per_sentence = self.map_sentences(|pos, sentence| {
            let index = SentenceIndex::build(sentence);
            (
                classify_in(&index),
                extract_pairs_in(&sentence_id(pos, sentence), &index),
            )
        });

        let mut analysis = Analysis::default();
        for (record, pairs) in per_sentence {
            if record.rule.is_classified() {
                analysis.classified.push(record);
            } else {
                analysis.unclassified += 1;
            }
            analysis.pairs.extend(pairs);
        }

        info!(
            "{} sentences classified, {} unclassified, {} pairs",
            analysis.classified.len(),
            analysis.unclassified,
            analysis.pairs.len()
        );
        analysis
    }
}

fn sentence_id(position: usize, sentence: &Sentence) -> String {
    sentence
        .sent_id
        .clone()
        .unwrap_or_else(|| format!("sent_{}", position + 1))
}

impl FromIterator<Sentence> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Rule;
    use crate::tree::Token;

    fn create_test_corpus() -> Corpus {
        vec![
            // ela foi vista
            Sentence::with_metadata(
                Some("ela foi vista".to_string()),
                Some("cf-1".to_string()),
                vec![
                    Token::new(1, "ela", "PRON", "nsubj:pass", 3),
                    Token::new(2, "foi", "AUX", "aux:pass", 3),
                    Token::new(3, "vista", "VERB", "root", 0),
                ],
            )
            .unwrap(),
            // O menino correu
            Sentence::with_metadata(
                Some("O menino correu".to_string()),
                None,
                vec![
                    Token::new(1, "O", "DET", "det", 2),
                    Token::new(2, "menino", "NOUN", "nsubj", 3),
                    Token::new(3, "correu", "VERB", "root", 0),
                ],
            )
            .unwrap(),
            // Ele comeu o bolo
            Sentence::with_metadata(
                Some("Ele comeu o bolo".to_string()),
                None,
                vec![
                    Token::new(1, "Ele", "PRON", "nsubj", 2),
                    Token::new(2, "comeu", "VERB", "root", 0),
                    Token::new(3, "o", "DET", "det", 4),
                    Token::new(4, "bolo", "NOUN", "obj", 2),
                ],
            )
            .unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sentence_ids() {
        let corpus = create_test_corpus();

        assert_eq!(corpus.sentence_id(0).as_deref(), Some("cf-1"));
        assert_eq!(corpus.sentence_id(2).as_deref(), Some("sent_3"));
        assert_eq!(corpus.sentence_id(3), None);
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let corpus = create_test_corpus();
        let rules: Vec<_> = corpus.classify_all().iter().map(|r| r.rule).collect();

        assert_eq!(
            rules,
            vec![
                Rule::Matched(Pattern::PassiveVoice),
                Rule::Unclassified,
                Rule::Matched(Pattern::DirectTransitive),
            ]
        );
        assert_eq!(corpus.classified().len(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = create_test_corpus();
        let mut sequential = create_test_corpus();
        sequential.set_config(AnalysisConfig::default().sequential());

        assert_eq!(parallel.analyze(), sequential.analyze());
        assert_eq!(parallel.extract_pairs(), sequential.extract_pairs());
    }

    #[test]
    fn test_extract_pairs_ids() {
        let corpus = create_test_corpus();
        let pairs = corpus.extract_pairs();
        let ids: Vec<_> = pairs.iter().map(|p| p.sentence_id.as_str()).collect();

        assert_eq!(ids, vec!["cf-1", "cf-1", "sent_3"]);
    }

    #[test]
    fn test_unclassified_sentences_yield_no_pairs() {
        let corpus = create_test_corpus();
        let records = corpus.classify_all();
        let pairs = corpus.extract_pairs();

        for (pos, record) in records.iter().enumerate() {
            if !record.rule.is_classified() {
                let id = corpus.sentence_id(pos).unwrap();
                assert!(pairs.iter().all(|p| p.sentence_id != id));
            }
        }
    }

    #[test]
    fn test_analyze_agrees_with_separate_runs() {
        let corpus = create_test_corpus();
        let analysis = corpus.analyze();

        assert_eq!(analysis.classified, corpus.classified());
        assert_eq!(analysis.pairs, corpus.extract_pairs());
        assert_eq!(analysis.unclassified, 1);
    }

    #[test]
    fn test_summary() {
        let summary = create_test_corpus().analyze().summary();

        assert_eq!(summary.sentences, 3);
        assert_eq!(summary.unclassified, 1);
        assert_eq!(summary.classified.get(&Pattern::PassiveVoice), Some(&1));
        assert_eq!(summary.classified.get(&Pattern::DirectTransitive), Some(&1));
        assert_eq!(summary.pairs.get(&Pattern::PassiveVoice), Some(&2));
        assert_eq!(summary.pairs.get(&Pattern::DirectTransitive), Some(&1));
        assert_eq!(summary.pairs.get(&Pattern::AdverbialAdjunct), None);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::default();
        let analysis = corpus.analyze();

        assert!(corpus.is_empty());
        assert!(analysis.classified.is_empty());
        assert!(analysis.pairs.is_empty());
        assert_eq!(analysis.summary(), Summary::default());
    }
}
