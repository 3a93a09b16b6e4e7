//! Pair extraction
//!
//! Unlike the classifier, extraction runs every pattern on every sentence
//! and keeps every instantiation, for downstream statistics.

use crate::index::SentenceIndex;
use crate::pattern::{CATALOGUE, Pair, Pattern};
use crate::tree::{Sentence, TokenId};
use log::debug;

/// One row of the pair table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRecord {
    pub sentence_id: String,
    pub sentence: String,
    pub pattern: Pattern,
    pub origin_id: TokenId,
    pub origin_form: String,
    pub destination_id: TokenId,
    pub destination_form: String,
}

impl PairRecord {
    fn new(sentence_id: &str, sentence: &Sentence, pattern: Pattern, pair: Pair<'_>) -> Self {
        Self {
            sentence_id: sentence_id.to_string(),
            sentence: sentence.text_or_placeholder().to_string(),
            pattern,
            origin_id: pair.origin.id,
            origin_form: pair.origin.form.clone(),
            destination_id: pair.destination.id,
            destination_form: pair.destination.form.clone(),
        }
    }
}

/// All pair records of one sentence, grouped by pattern in catalogue order
pub fn extract_pairs(sentence_id: &str, sentence: &Sentence) -> Vec<PairRecord> {
    extract_pairs_in(sentence_id, &SentenceIndex::build(sentence))
}

/// [`extract_pairs`] over a prebuilt index
pub fn extract_pairs_in(sentence_id: &str, index: &SentenceIndex<'_>) -> Vec<PairRecord> {
    let sentence = index.sentence();

    let records: Vec<PairRecord> = CATALOGUE
        .into_iter()
        .flat_map(|pattern| {
            pattern
                .extract_all_in(index)
                .into_iter()
                .map(move |pair| PairRecord::new(sentence_id, sentence, pattern, pair))
        })
        .collect();

    debug!("{}: {} pairs", sentence_id, records.len());
    records
}

/// Pair records for `(sentence_id, sentence)` items, in input order
pub fn extract_from<'a, I>(sentences: I) -> Vec<PairRecord>
where
    I: IntoIterator<Item = (&'a str, &'a Sentence)>,
{
    sentences
        .into_iter()
        .flat_map(|(id, sentence)| extract_pairs(id, sentence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Token;

    fn passive() -> Sentence {
        Sentence::with_metadata(
            Some("ela foi vista".to_string()),
            Some("s1".to_string()),
            vec![
                Token::new(1, "ela", "PRON", "nsubj:pass", 3),
                Token::new(2, "foi", "AUX", "aux:pass", 3),
                Token::new(3, "vista", "VERB", "root", 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_extract_passive_pairs() {
        let s = passive();
        let records = extract_pairs("s1", &s);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.pattern == Pattern::PassiveVoice));
        assert_eq!(records[0].sentence_id, "s1");
        assert_eq!(records[0].sentence, "ela foi vista");
        assert_eq!(
            (records[0].origin_id, records[0].origin_form.as_str()),
            (1, "ela")
        );
        assert_eq!(
            (records[0].destination_id, records[0].destination_form.as_str()),
            (3, "vista")
        );
        assert_eq!(records[1].origin_form, "foi");
    }

    #[test]
    fn test_shared_index() {
        let s = passive();
        let index = SentenceIndex::build(&s);

        let record = crate::classifier::classify_in(&index);
        assert_eq!(record.rule.pattern(), Some(Pattern::PassiveVoice));
        assert_eq!(record.dependent, "foi");
        assert_eq!(extract_pairs_in("s1", &index), extract_pairs("s1", &s));
    }

    #[test]
    fn test_extract_multiple_patterns() {
        // Ela deu o livro ao irmão rapidamente
        let s = Sentence::new(vec![
            Token::new(1, "Ela", "PRON", "nsubj", 2),
            Token::new(2, "deu", "VERB", "root", 0),
            Token::new(3, "o", "DET", "det", 4),
            Token::new(4, "livro", "NOUN", "obj", 2),
            Token::new(5, "ao", "ADP", "case", 6),
            Token::new(6, "irmão", "NOUN", "iobj", 2),
            Token::new(7, "rapidamente", "ADV", "advmod", 2),
        ])
        .unwrap();

        let records = extract_pairs("s", &s);
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.pattern, r.origin_form.as_str(), r.destination_form.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Pattern::BitransitiveVerb, "deu", "livro"),
                (Pattern::BitransitiveVerb, "deu", "irmão"),
                (Pattern::DirectTransitive, "livro", "deu"),
                (Pattern::IndirectTransitive, "irmão", "deu"),
                (Pattern::AdverbialAdjunct, "rapidamente", "deu"),
            ]
        );
    }

    #[test]
    fn test_sentence_without_patterns_yields_nothing() {
        let s = Sentence::new(vec![
            Token::new(1, "O", "DET", "det", 2),
            Token::new(2, "menino", "NOUN", "nsubj", 3),
            Token::new(3, "correu", "VERB", "root", 0),
        ])
        .unwrap();

        assert!(extract_pairs("s", &s).is_empty());
    }

    #[test]
    fn test_extract_from_keeps_input_order() {
        let a = passive();
        let b = Sentence::new(vec![
            Token::new(1, "Corre", "VERB", "root", 0),
            Token::new(2, "bem", "ADV", "advmod", 1),
        ])
        .unwrap();

        let records = extract_from([("b", &b), ("a", &a)]);
        let ids: Vec<_> = records.iter().map(|r| r.sentence_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "a"]);
        assert_eq!(records[0].sentence, "N/A");

        assert_eq!(records, extract_from([("b", &b), ("a", &a)]));
        assert!(extract_from(Vec::<(&str, &Sentence)>::new()).is_empty());
    }
}
