//! Classify a couple of hand-built sentences and print the output tables

use udpatterns::export::{classification_csv, pair_csv, tokens_to_check_csv};
use udpatterns::{AnalysisConfig, Corpus, Labels, Sentence, Token};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sentences = vec![
        Sentence::with_metadata(
            Some("Ela deu o livro ao irmão.".to_string()),
            Some("demo-1".to_string()),
            vec![
                Token::new(1, "Ela", "PRON", "nsubj", 2),
                Token::new(2, "deu", "VERB", "root", 0),
                Token::new(3, "o", "DET", "det", 4),
                Token::new(4, "livro", "NOUN", "obj", 2),
                Token::new(5, "ao", "ADP", "case", 6),
                Token::new(6, "irmão", "NOUN", "iobj", 2),
                Token::new(7, ".", "PUNCT", "punct", 2),
            ],
        )?,
        Sentence::with_metadata(
            Some("A carta foi escrita ontem.".to_string()),
            Some("demo-2".to_string()),
            vec![
                Token::new(1, "A", "DET", "det", 2),
                Token::new(2, "carta", "NOUN", "nsubj:pass", 4),
                Token::new(3, "foi", "AUX", "aux:pass", 4),
                Token::new(4, "escrita", "VERB", "root", 0),
                Token::new(5, "ontem", "ADV", "advmod", 4),
                Token::new(6, ".", "PUNCT", "punct", 4),
            ],
        )?,
        Sentence::with_metadata(
            Some("O menino.".to_string()),
            None,
            vec![
                Token::new(1, "O", "DET", "det", 2),
                Token::new(2, "menino", "NOUN", "root", 0),
                Token::new(3, ".", "PUNCT", "punct", 2),
            ],
        )?,
    ];

    let config = AnalysisConfig::default().with_labels(Labels::Portuguese);
    let labels = config.labels;
    let corpus = Corpus::with_config(sentences, config);
    let analysis = corpus.analyze();

    println!("=== Classification ===\n");
    print!("{}", classification_csv(&analysis.classified, labels)?);

    println!("\n=== Pairs ===\n");
    print!("{}", pair_csv(&analysis.pairs, labels)?);

    println!("\n=== tokens_to_check ===\n");
    match tokens_to_check_csv(&analysis.pairs, labels)? {
        Some(csv) => print!("{}", csv),
        None => println!("No patterns found; nothing to export."),
    }

    let summary = analysis.summary();
    println!(
        "\n{} sentences, {} unclassified",
        summary.sentences, summary.unclassified
    );
    for (pattern, count) in &summary.pairs {
        println!("  {}: {} pairs", pattern, count);
    }

    Ok(())
}
