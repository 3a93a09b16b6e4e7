//! CSV tables handed to downstream consumers
//!
//! Column names are fixed; the attention-analysis tools join on
//! `sentence` and `rule`. All output is UTF-8.

use crate::classifier::ClassificationRecord;
use crate::extractor::PairRecord;
use crate::pattern::Labels;
use std::io;
use thiserror::Error;

pub const CLASSIFICATION_COLUMNS: [&str; 4] = ["sentence", "rule", "governante", "dependente"];

pub const PAIR_COLUMNS: [&str; 7] = [
    "Sentence ID",
    "Sentence",
    "Pattern",
    "Origin Token",
    "Origin ID",
    "Destination Token",
    "Destination ID",
];

pub const TOKENS_TO_CHECK_COLUMNS: [&str; 5] = [
    "sentence",
    "rule",
    "token_origem",
    "token_destino",
    "tokens_to_check",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// `tokens_to_check` cell: a two-element list of quoted forms, as the
/// downstream reader expects it (`['"foi"', '"vista"']`)
pub fn tokens_to_check_cell(origin: &str, destination: &str) -> String {
    format!("['\"{}\"', '\"{}\"']", origin, destination)
}

/// Classification table, one row per classified sentence
///
/// Unclassified records are skipped.
pub fn write_classification_table<W: io::Write>(
    writer: W,
    records: &[ClassificationRecord],
    labels: Labels,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CLASSIFICATION_COLUMNS)?;

    for record in records.iter().filter(|r| r.rule.is_classified()) {
        wtr.write_record([
            record.sentence.as_str(),
            record.rule.label(labels),
            record.governor_form(labels),
            record.dependent.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Pair table, one row per extracted pair
pub fn write_pair_table<W: io::Write>(
    writer: W,
    pairs: &[PairRecord],
    labels: Labels,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(PAIR_COLUMNS)?;

    for pair in pairs {
        wtr.write_record([
            pair.sentence_id.as_str(),
            pair.sentence.as_str(),
            pair.pattern.label(labels),
            pair.origin_form.as_str(),
            pair.origin_id.to_string().as_str(),
            pair.destination_form.as_str(),
            pair.destination_id.to_string().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renamed pair table consumed by the attention-analysis tools
pub fn write_tokens_to_check<W: io::Write>(
    writer: W,
    pairs: &[PairRecord],
    labels: Labels,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TOKENS_TO_CHECK_COLUMNS)?;

    for pair in pairs {
        wtr.write_record([
            pair.sentence.as_str(),
            pair.pattern.label(labels),
            pair.origin_form.as_str(),
            pair.destination_form.as_str(),
            tokens_to_check_cell(&pair.origin_form, &pair.destination_form).as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn classification_csv(
    records: &[ClassificationRecord],
    labels: Labels,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_classification_table(&mut buf, records, labels)?;
    Ok(String::from_utf8(buf)?)
}

pub fn pair_csv(pairs: &[PairRecord], labels: Labels) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_pair_table(&mut buf, pairs, labels)?;
    Ok(String::from_utf8(buf)?)
}

/// The hand-off file, or `None` when there are no pairs and nothing
/// should be written
pub fn tokens_to_check_csv(
    pairs: &[PairRecord],
    labels: Labels,
) -> Result<Option<String>, ExportError> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut buf = Vec::new();
    write_tokens_to_check(&mut buf, pairs, labels)?;
    Ok(Some(String::from_utf8(buf)?))
}
