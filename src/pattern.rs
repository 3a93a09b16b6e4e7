//! The pattern catalogue
//!
//! Eight syntactic patterns, each a variant of [`Pattern`]. A pattern is
//! defined by the tokens that *anchor* it in a sentence; the predicate,
//! the representative pair and the full pair enumeration are all derived
//! from that single anchor query.
//!
//! [`CATALOGUE`] fixes the precedence order used by the classifier.

use crate::index::SentenceIndex;
use crate::tree::{Sentence, Token, TokenId};
use serde::{Deserialize, Serialize};
use std::fmt;

const VERB: &str = "VERB";
const ADV: &str = "ADV";

const OBJ: &str = "obj";
const IOBJ: &str = "iobj";
const COP: &str = "cop";
const ADVMOD: &str = "advmod";
const EXPL_PREFIX: &str = "expl";

const INDIRECT_RELATIONS: &[&str] = &[IOBJ, "obl"];
const SUBORDINATE_RELATIONS: &[&str] = &["ccomp", "advcl", "xcomp", "acl:relcl", "mark", "csubj"];
const AUX_PASS: &str = "aux:pass";
const PASSIVE_RELATIONS: &[&str] = &[AUX_PASS, "nsubj:pass"];
const REFLEXIVE_FORMS: &[&str] = &["se", "me", "te", "nos", "vos"];

/// Language used for rule names and placeholders in output rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Labels {
    #[default]
    English,
    Portuguese,
}

impl Labels {
    pub fn unclassified(self) -> &'static str {
        match self {
            Labels::English => "unclassified",
            Labels::Portuguese => "Não classificada",
        }
    }

    pub fn free_governor(self) -> &'static str {
        match self {
            Labels::English => "(advmod - free)",
            Labels::Portuguese => "(advmod - livre)",
        }
    }
}

/// Placeholder for a governor or dependent that does not exist
pub const NO_FORM: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pattern {
    BitransitiveVerb,
    DirectTransitive,
    IndirectTransitive,
    SubordinateClause,
    PassiveVoice,
    CopularPredicate,
    ReflexivePronoun,
    AdverbialAdjunct,
}

/// All patterns in precedence order
pub const CATALOGUE: [Pattern; 8] = [
    Pattern::BitransitiveVerb,
    Pattern::DirectTransitive,
    Pattern::IndirectTransitive,
    Pattern::SubordinateClause,
    Pattern::PassiveVoice,
    Pattern::CopularPredicate,
    Pattern::ReflexivePronoun,
    Pattern::AdverbialAdjunct,
];

/// Governor side of a representative pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Governor {
    Token { id: TokenId, form: String },
    /// Adverbial adjuncts are reported without a governor
    Free,
    /// Head is the root or points outside the sentence
    Missing,
}

impl Governor {
    fn of(token: &Token) -> Self {
        Governor::Token {
            id: token.id,
            form: token.form.clone(),
        }
    }

    pub fn form(&self, labels: Labels) -> &str {
        match self {
            Governor::Token { form, .. } => form,
            Governor::Free => labels.free_governor(),
            Governor::Missing => NO_FORM,
        }
    }
}

/// The single governor/dependent pair chosen to characterize a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representative {
    pub governor: Governor,
    pub dependent: String,
}

/// One instantiation of a pattern: origin token and destination token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    pub origin: &'a Token,
    pub destination: &'a Token,
}

#[inline]
fn has_verbal_governor(index: &SentenceIndex<'_>, token: &Token) -> bool {
    index
        .governor(token)
        .is_some_and(|governor| governor.has_upos(VERB))
}

#[inline]
fn is_reflexive(token: &Token) -> bool {
    token.deprel.starts_with(EXPL_PREFIX)
        && REFLEXIVE_FORMS.contains(&token.form.to_lowercase().as_str())
}

impl Pattern {
    /// Canonical English name
    pub fn name(self) -> &'static str {
        self.label(Labels::English)
    }

    pub fn label(self, labels: Labels) -> &'static str {
        match labels {
            Labels::English => match self {
                Pattern::BitransitiveVerb => "Bitransitive verb",
                Pattern::DirectTransitive => "Direct transitive",
                Pattern::IndirectTransitive => "Indirect transitive",
                Pattern::SubordinateClause => "Subordinate clause",
                Pattern::PassiveVoice => "Passive voice",
                Pattern::CopularPredicate => "Copular predicate",
                Pattern::ReflexivePronoun => "Reflexive pronoun",
                Pattern::AdverbialAdjunct => "Adverbial adjunct",
            },
            Labels::Portuguese => match self {
                Pattern::BitransitiveVerb => "Verbo bitransitivo",
                Pattern::DirectTransitive => "Verbo transitivo direto",
                Pattern::IndirectTransitive => "Verbo transitivo indireto",
                Pattern::SubordinateClause => "Oração subordinada",
                Pattern::PassiveVoice => "Voz passiva",
                Pattern::CopularPredicate => "Verbo com predicativo do sujeito",
                Pattern::ReflexivePronoun => "Pronome reflexivo",
                Pattern::AdverbialAdjunct => "Adjunto adverbial",
            },
        }
    }

    /// Look a pattern up by its English or Portuguese label
    pub fn from_label(label: &str) -> Option<Pattern> {
        CATALOGUE.into_iter().find(|p| {
            p.label(Labels::English) == label || p.label(Labels::Portuguese) == label
        })
    }

    /// Tokens that anchor this pattern, in sentence order
    ///
    /// For the bitransitive pattern the anchor is the verb; for every other
    /// pattern it is the dependent.
    fn anchors<'a>(self, index: &SentenceIndex<'a>) -> Vec<&'a Token> {
        match self {
            Pattern::BitransitiveVerb => index
                .with_upos(VERB)
                .filter(|verb| {
                    index.first_child_with(verb.id, OBJ).is_some()
                        && index.first_child_with(verb.id, IOBJ).is_some()
                })
                .collect(),
            Pattern::DirectTransitive => index
                .with_deprel(OBJ)
                .filter(|tok| has_verbal_governor(index, tok))
                .collect(),
            Pattern::IndirectTransitive => index
                .with_any_deprel(INDIRECT_RELATIONS)
                .into_iter()
                .filter(|tok| has_verbal_governor(index, tok))
                .collect(),
            Pattern::SubordinateClause => index.with_any_deprel(SUBORDINATE_RELATIONS),
            Pattern::PassiveVoice => index.with_any_deprel(PASSIVE_RELATIONS),
            Pattern::CopularPredicate => index
                .with_deprel(COP)
                .filter(|tok| has_verbal_governor(index, tok))
                .collect(),
            Pattern::ReflexivePronoun => index
                .sentence()
                .tokens()
                .iter()
                .filter(|tok| is_reflexive(tok))
                .collect(),
            Pattern::AdverbialAdjunct => index
                .with_deprel(ADVMOD)
                .filter(|tok| tok.has_upos(ADV))
                .collect(),
        }
    }

    pub fn matches_in(self, index: &SentenceIndex<'_>) -> bool {
        !self.anchors(index).is_empty()
    }

    /// Does the sentence contain this pattern?
    pub fn matches(self, sentence: &Sentence) -> bool {
        self.matches_in(&SentenceIndex::build(sentence))
    }

    pub fn representative_in(self, index: &SentenceIndex<'_>) -> Option<Representative> {
        let mut anchors = self.anchors(index);
        if self == Pattern::PassiveVoice {
            // Passive auxiliary before passive subject; stable, so ties keep
            // sentence order
            anchors.sort_by_key(|tok| tok.deprel != AUX_PASS);
        }
        let first = *anchors.first()?;

        let representative = match self {
            Pattern::BitransitiveVerb => {
                let obj = index.first_child_with(first.id, OBJ)?;
                let iobj = index.first_child_with(first.id, IOBJ)?;
                Representative {
                    governor: Governor::of(first),
                    dependent: format!("{}, {}", obj.form, iobj.form),
                }
            }
            Pattern::AdverbialAdjunct => Representative {
                governor: Governor::Free,
                dependent: first.form.clone(),
            },
            _ => {
                // First anchor whose head resolves
                let (dependent, governor) = anchors
                    .iter()
                    .find_map(|tok| index.governor(tok).map(|gov| (*tok, Governor::of(gov))))
                    .unwrap_or((first, Governor::Missing));
                Representative {
                    governor,
                    dependent: dependent.form.clone(),
                }
            }
        };

        Some(representative)
    }

    /// The representative governor/dependent pair, `None` when the
    /// pattern does not match
    pub fn representative(self, sentence: &Sentence) -> Option<Representative> {
        self.representative_in(&SentenceIndex::build(sentence))
    }

    pub fn extract_all_in<'a>(self, index: &SentenceIndex<'a>) -> Vec<Pair<'a>> {
        let anchors = self.anchors(index);

        match self {
            Pattern::BitransitiveVerb => anchors
                .into_iter()
                .flat_map(move |verb| {
                    index
                        .children(verb.id)
                        .filter(|child| child.deprel == OBJ || child.deprel == IOBJ)
                        .map(move |child| Pair {
                            origin: verb,
                            destination: child,
                        })
                })
                .collect(),
            _ => anchors
                .into_iter()
                .filter_map(|tok| {
                    index.governor(tok).map(|governor| Pair {
                        origin: tok,
                        destination: governor,
                    })
                })
                .collect(),
        }
    }

    /// Every governor/dependent pair instantiating this pattern
    pub fn extract_all(self, sentence: &Sentence) -> Vec<Pair<'_>> {
        self.extract_all_in(&SentenceIndex::build(sentence))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
