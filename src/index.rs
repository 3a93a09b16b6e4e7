//! Inverted indices over a single sentence
//!
//! Patterns ask the same few questions of a tree over and over: which
//! tokens carry a relation, which tokens are verbs, which tokens hang off
//! a given head. The index answers them without rescanning the sentence.
//! All position lists are ascending, so "first" always means leftmost.

use crate::tree::{Sentence, Token, TokenId};
use rustc_hash::FxHashMap;

/// Inverted index for one sentence
#[derive(Debug, Clone)]
pub struct SentenceIndex<'a> {
    sentence: &'a Sentence,
    /// Index by head id (0-based positions of dependents)
    children: FxHashMap<TokenId, Vec<usize>>,
    /// Index by UPOS tag
    by_upos: FxHashMap<&'a str, Vec<usize>>,
    /// Index by dependency relation
    by_deprel: FxHashMap<&'a str, Vec<usize>>,
}

impl<'a> SentenceIndex<'a> {
    /// Build an index from a sentence
    pub fn build(sentence: &'a Sentence) -> Self {
        let mut index = Self {
            sentence,
            children: FxHashMap::default(),
            by_upos: FxHashMap::default(),
            by_deprel: FxHashMap::default(),
        };

        for (pos, token) in sentence.tokens().iter().enumerate() {
            index.add_token(pos, token);
        }

        index
    }

    fn add_token(&mut self, pos: usize, token: &'a Token) {
        if !token.is_root() {
            self.children.entry(token.head).or_default().push(pos);
        }
        self.by_upos.entry(token.upos.as_str()).or_default().push(pos);
        self.by_deprel
            .entry(token.deprel.as_str())
            .or_default()
            .push(pos);
    }

    #[inline]
    pub fn sentence(&self) -> &'a Sentence {
        self.sentence
    }

    fn resolve<'s>(
        &'s self,
        positions: Option<&'s Vec<usize>>,
    ) -> impl Iterator<Item = &'a Token> + 's {
        let tokens = self.sentence.tokens();
        positions
            .map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&pos| &tokens[pos])
    }

    /// Tokens whose head is `id`, in sentence order
    pub fn children(&self, id: TokenId) -> impl Iterator<Item = &'a Token> + '_ {
        self.resolve(self.children.get(&id))
    }

    /// First child of `id` with the given relation
    pub fn first_child_with(&self, id: TokenId, deprel: &str) -> Option<&'a Token> {
        self.children(id).find(|child| child.deprel == deprel)
    }

    /// Tokens with the given UPOS tag, in sentence order
    pub fn with_upos(&self, upos: &str) -> impl Iterator<Item = &'a Token> + '_ {
        self.resolve(self.by_upos.get(upos))
    }

    /// Tokens with the given relation, in sentence order
    pub fn with_deprel(&self, deprel: &str) -> impl Iterator<Item = &'a Token> + '_ {
        self.resolve(self.by_deprel.get(deprel))
    }

    /// Tokens carrying any of `deprels`, merged back into sentence order
    pub fn with_any_deprel(&self, deprels: &[&str]) -> Vec<&'a Token> {
        let mut positions: Vec<usize> = deprels
            .iter()
            .filter_map(|deprel| self.by_deprel.get(deprel))
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();

        let tokens = self.sentence.tokens();
        positions.into_iter().map(|pos| &tokens[pos]).collect()
    }

    /// Governor of `token` when it resolves to a token of the sentence
    #[inline]
    pub fn governor(&self, token: &Token) -> Option<&'a Token> {
        self.sentence.resolve_head(token)
    }
}
