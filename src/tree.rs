//! Sentence data structures for pattern classification
//!
//! A [`Sentence`] is an ordered list of [`Token`]s as delivered by a
//! Universal Dependencies parser. Token ids are 1-based positions, and a
//! head of 0 marks the root. Nothing here repairs malformed trees: a head
//! that points outside the sentence is kept as-is and simply fails to
//! resolve.

use log::debug;
use thiserror::Error;

/// 1-based position of a token within its sentence
pub type TokenId = usize;

/// Head value marking the root of the tree
pub const ROOT: TokenId = 0;

/// Placeholder shown when a sentence has no `# text` metadata
pub const MISSING_TEXT: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("token id {id} not found in sentence of {len} tokens")]
    NotFound { id: TokenId, len: usize },

    #[error("token at position {position} has id 0; ids are 1-based")]
    ZeroId { position: usize },
}

/// A single word of a dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub upos: String,
    pub deprel: String,
    pub head: TokenId,
}

impl Token {
    pub fn new(id: TokenId, form: &str, upos: &str, deprel: &str, head: TokenId) -> Self {
        Self {
            id,
            form: form.to_string(),
            upos: upos.to_string(),
            deprel: deprel.to_string(),
            head,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.head == ROOT
    }

    #[inline]
    pub fn has_upos(&self, upos: &str) -> bool {
        self.upos == upos
    }
}

/// A dependency tree (sentence)
///
/// Immutable once built; all classification code reads it through shared
/// references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: Option<String>,
    pub sent_id: Option<String>,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Build a sentence from tokens in linear order
    ///
    /// Only the shape is checked (every id must be positive). Cycles,
    /// duplicate ids and dangling heads are accepted.
    pub fn new(tokens: Vec<Token>) -> Result<Self, TreeError> {
        Self::with_metadata(None, None, tokens)
    }

    pub fn with_metadata(
        text: Option<String>,
        sent_id: Option<String>,
        tokens: Vec<Token>,
    ) -> Result<Self, TreeError> {
        if let Some(position) = tokens.iter().position(|tok| tok.id == 0) {
            return Err(TreeError::ZeroId { position });
        }
        Ok(Self {
            text,
            sent_id,
            tokens,
        })
    }

    /// Sentence text, or `N/A` when the parser supplied none
    pub fn text_or_placeholder(&self) -> &str {
        self.text.as_deref().unwrap_or(MISSING_TEXT)
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Strict lookup by 1-based id
    pub fn token(&self, id: TokenId) -> Result<&Token, TreeError> {
        self.get(id).ok_or(TreeError::NotFound {
            id,
            len: self.tokens.len(),
        })
    }

    /// Lookup by 1-based id, `None` when out of range
    #[inline]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        id.checked_sub(1).and_then(|pos| self.tokens.get(pos))
    }

    /// True when `head` points at a token of this sentence
    #[inline]
    pub fn head_in_range(&self, head: TokenId) -> bool {
        (1..=self.tokens.len()).contains(&head)
    }

    /// Governor of `token`, or `None` for the root and for dangling heads
    pub fn resolve_head(&self, token: &Token) -> Option<&Token> {
        if token.is_root() {
            return None;
        }
        if !self.head_in_range(token.head) {
            debug!(
                "token {} ({:?}) has head {} outside sentence of {} tokens",
                token.id,
                token.form,
                token.head,
                self.tokens.len()
            );
            return None;
        }
        self.get(token.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_sentence() -> Sentence {
        Sentence::with_metadata(
            Some("O menino correu".to_string()),
            Some("s1".to_string()),
            vec![
                Token::new(1, "O", "DET", "det", 2),
                Token::new(2, "menino", "NOUN", "nsubj", 3),
                Token::new(3, "correu", "VERB", "root", 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sentence_creation() {
        let sentence = create_test_sentence();

        assert_eq!(sentence.len(), 3);
        assert_eq!(sentence.text_or_placeholder(), "O menino correu");
        assert_eq!(sentence.token(2).unwrap().form, "menino");
    }

    #[test]
    fn test_zero_id_rejected() {
        let result = Sentence::new(vec![
            Token::new(1, "a", "DET", "det", 2),
            Token::new(0, "b", "NOUN", "root", 0),
        ]);

        assert_eq!(result, Err(TreeError::ZeroId { position: 1 }));
    }

    #[test]
    fn test_strict_lookup_out_of_range() {
        let sentence = create_test_sentence();

        assert_eq!(sentence.token(0), Err(TreeError::NotFound { id: 0, len: 3 }));
        assert_eq!(sentence.token(4), Err(TreeError::NotFound { id: 4, len: 3 }));
    }

    #[test]
    fn test_resolve_head() {
        let sentence = create_test_sentence();
        let tokens = sentence.tokens();

        assert_eq!(sentence.resolve_head(&tokens[0]).unwrap().form, "menino");
        assert_eq!(sentence.resolve_head(&tokens[1]).unwrap().form, "correu");
        assert!(sentence.resolve_head(&tokens[2]).is_none()); // root
    }

    #[test]
    fn test_resolve_dangling_head() {
        let sentence = Sentence::new(vec![
            Token::new(1, "ela", "PRON", "nsubj", 99),
            Token::new(2, "saiu", "VERB", "root", 0),
        ])
        .unwrap();

        assert!(sentence.resolve_head(&sentence.tokens()[0]).is_none());
        assert!(!sentence.head_in_range(99));
        assert!(sentence.head_in_range(2));
    }

    #[test]
    fn test_missing_text_placeholder() {
        let sentence = Sentence::new(vec![Token::new(1, "Oi", "INTJ", "root", 0)]).unwrap();

        assert_eq!(sentence.text_or_placeholder(), "N/A");
        assert!(sentence.sent_id.is_none());
    }
}
