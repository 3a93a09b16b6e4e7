//! Python bindings for udpatterns
//!
//! CoNLL-U parsing stays on the Python side (the `conllu` package); sentences
//! cross the boundary as lists of `(id, form, upos, deprel, head)` tuples.
//! Multiword-token and empty-node lines have non-integer ids and must be
//! filtered out before they are passed in.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::{AnalysisConfig, ConfigError};
use crate::corpus::Corpus;
use crate::export::{self, ExportError};
use crate::pattern::{CATALOGUE, Labels};
use crate::tree::{Sentence, Token, TreeError};

type TokenTuple = (usize, String, String, String, usize);
type ClassificationRow = (String, String, String, String);
type PairRow = (String, String, String, String, usize, String, usize);

impl From<TreeError> for PyErr {
    fn from(err: TreeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        match err {
            ConfigError::Io { .. } => PyIOError::new_err(err.to_string()),
            ConfigError::Json(_) => PyValueError::new_err(err.to_string()),
        }
    }
}

impl From<ExportError> for PyErr {
    fn from(err: ExportError) -> PyErr {
        PyIOError::new_err(err.to_string())
    }
}

/// A collection of parsed sentences to classify.
///
/// Example:
///     >>> from conllu import parse_incr
///     >>> corpus = Corpus()
///     >>> for sent in parse_incr(open("bosque.conllu")):
///     ...     tokens = [(t["id"], t["form"], t["upos"], t["deprel"], t["head"])
///     ...               for t in sent if isinstance(t["id"], int)]
///     ...     corpus.add_sentence(tokens, sent.metadata.get("text"),
///     ...                         sent.metadata.get("sent_id"))
///     >>> rows = corpus.classify()
#[pyclass(name = "Corpus")]
pub struct PyCorpus {
    inner: Corpus,
}

#[pymethods]
impl PyCorpus {
    /// Create an empty corpus.
    ///
    /// Args:
    ///     config: optional JSON object with `parallel` and `labels` keys
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(json) => AnalysisConfig::from_json_str(json)?,
            None => AnalysisConfig::default(),
        };
        Ok(PyCorpus {
            inner: Corpus::with_config(Vec::new(), config),
        })
    }

    /// Load the analysis config from a JSON file.
    #[staticmethod]
    fn from_config_file(path: &str) -> PyResult<Self> {
        Ok(PyCorpus {
            inner: Corpus::with_config(Vec::new(), AnalysisConfig::from_path(path)?),
        })
    }

    /// Append one sentence.
    ///
    /// Args:
    ///     tokens: list of (id, form, upos, deprel, head) tuples in order
    ///     text: sentence text (`# text`)
    ///     sent_id: sentence id (`# sent_id`)
    ///
    /// Raises:
    ///     ValueError: if a token id is 0
    #[pyo3(signature = (tokens, text=None, sent_id=None))]
    fn add_sentence(
        &mut self,
        tokens: Vec<TokenTuple>,
        text: Option<String>,
        sent_id: Option<String>,
    ) -> PyResult<()> {
        let tokens = tokens
            .into_iter()
            .map(|(id, form, upos, deprel, head)| Token {
                id,
                form,
                upos,
                deprel,
                head,
            })
            .collect();
        self.inner.push(Sentence::with_metadata(text, sent_id, tokens)?);
        Ok(())
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Classified sentences as (sentence, rule, governor, dependent) rows.
    fn classify(&self) -> Vec<ClassificationRow> {
        let labels = self.inner.config().labels;
        self.inner
            .classified()
            .into_iter()
            .map(|r| {
                let governor = r.governor_form(labels).to_string();
                (r.sentence, r.rule.label(labels).to_string(), governor, r.dependent)
            })
            .collect()
    }

    /// Every extracted pair as (sentence_id, sentence, pattern,
    /// origin_form, origin_id, destination_form, destination_id) rows.
    fn extract(&self) -> Vec<PairRow> {
        let labels = self.inner.config().labels;
        self.inner
            .extract_pairs()
            .into_iter()
            .map(|p| {
                (
                    p.sentence_id,
                    p.sentence,
                    p.pattern.label(labels).to_string(),
                    p.origin_form,
                    p.origin_id,
                    p.destination_form,
                    p.destination_id,
                )
            })
            .collect()
    }

    fn classification_csv(&self) -> PyResult<String> {
        let labels = self.inner.config().labels;
        Ok(export::classification_csv(&self.inner.classified(), labels)?)
    }

    fn pair_csv(&self) -> PyResult<String> {
        let labels = self.inner.config().labels;
        Ok(export::pair_csv(&self.inner.extract_pairs(), labels)?)
    }

    /// The `tokens_to_check` hand-off CSV, or None when no pattern matched.
    fn tokens_to_check_csv(&self) -> PyResult<Option<String>> {
        let labels = self.inner.config().labels;
        Ok(export::tokens_to_check_csv(&self.inner.extract_pairs(), labels)?)
    }

    fn __repr__(&self) -> String {
        format!("<Corpus len={}>", self.inner.len())
    }
}

/// Names of the catalogue patterns in precedence order.
#[pyfunction]
#[pyo3(signature = (portuguese=false))]
fn patterns(portuguese: bool) -> Vec<&'static str> {
    let labels = if portuguese {
        Labels::Portuguese
    } else {
        Labels::English
    };
    CATALOGUE.iter().map(|p| p.label(labels)).collect()
}

#[pymodule]
fn udpatterns(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCorpus>()?;
    m.add_function(wrap_pyfunction!(patterns, m)?)?;
    Ok(())
}
