use anyhow::Context;
use veritext::models::AnalyzeOptions;
use veritext::services::analysis::{compare_documents, DocumentAnalyzer};
use veritext::services::config_store::ConfigStore;
use veritext::services::text_processor::normalize_punctuation;
use veritext::services::web_search::{DuckDuckGoClient, SearchProvider};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin check_text -- <path.txt> [--web] [--min-len <n>] [--threshold <0..1>] [--out <json_path>]\n  cargo run --bin check_text -- <a.txt> <b.txt> [more.txt ...] --compare [--threshold <0..1>] [--out <json_path>]\n\nNotes:\n  - `--web` also checks key phrases against web search results.\n  - `--compare` scores every pair of the given documents instead of analyzing one.\n  - Defaults come from the config file when present."
        );
        return Ok(());
    }

    veritext::init_logging();

    let path = args[1].clone();
    let check_web = has_flag(&args, "--web");
    let min_len = parse_arg_value(&args, "--min-len").and_then(|s| s.parse::<usize>().ok());
    let threshold = parse_arg_value(&args, "--threshold").and_then(|s| s.parse::<f64>().ok());
    let out_path = parse_arg_value(&args, "--out");

    // Config file provides defaults; CLI flags win.
    let config = ConfigStore::default_config_dir()
        .map(ConfigStore::new)
        .map(|store| store.load().unwrap_or_default())
        .unwrap_or_default();

    let options = AnalyzeOptions {
        min_sentence_length: min_len.unwrap_or(config.analysis.min_sentence_length),
        plagiarism_threshold: threshold.unwrap_or(config.analysis.plagiarism_threshold),
        length_factor_cap: config.analysis.length_factor_cap,
    };

    if has_flag(&args, "--compare") {
        let mut names = Vec::new();
        let mut documents = Vec::new();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--min-len" | "--threshold" | "--out" => i += 2,
                flag if flag.starts_with("--") => i += 1,
                file => {
                    let raw = std::fs::read_to_string(file)
                        .with_context(|| format!("read file {}", file))?;
                    names.push(file.to_string());
                    documents.push(normalize_punctuation(&raw));
                    i += 1;
                }
            }
        }

        let comparisons = compare_documents(&documents, options.plagiarism_threshold);
        println!("Compared {} documents, {} pairs", documents.len(), comparisons.len());
        for c in &comparisons {
            println!(
                "  {} vs {}: {:6.2}% {:?}",
                names[c.document_a], names[c.document_b], c.similarity, c.status
            );
        }

        if let Some(out_path) = out_path {
            let json = serde_json::to_string_pretty(&comparisons)?;
            std::fs::write(&out_path, json).with_context(|| format!("write {}", out_path))?;
            println!("Wrote JSON: {}", out_path);
        }

        return Ok(());
    }

    let raw = std::fs::read_to_string(&path).with_context(|| format!("read file {}", path))?;
    let text = normalize_punctuation(&raw);

    let search_client;
    let provider: Option<&dyn SearchProvider> = if check_web || config.analysis.check_web {
        search_client = DuckDuckGoClient::new();
        Some(&search_client)
    } else {
        None
    };

    let analyzer = DocumentAnalyzer::new(options)
        .with_search_timeout(std::time::Duration::from_secs(config.search.timeout_secs));
    let report = analyzer.build_report(&text, provider).await?;

    println!("File: {}", path);
    println!(
        "Text: {} chars, {} words, {} sentences",
        report.text_length, report.word_count, report.sentence_count
    );
    println!("Overall plagiarism: {:.1}%", report.overall_plagiarism);
    println!(
        "Flagged sentences: {}",
        report.detailed_report.flagged_sentences.len()
    );
    println!();

    for a in &report.detailed_report.sentence_analysis {
        println!(
            "[S{:04}] sim={:6.2}% {:6} {} {}",
            a.position,
            a.similarity,
            format!("{:?}", a.category).to_lowercase(),
            if a.flagged { "FLAG" } else { "    " },
            preview(&a.sentence, 100)
        );
    }

    if !report.detailed_report.sources.is_empty() {
        println!();
        println!("Sources:");
        for url in &report.detailed_report.sources {
            println!("  {}", url);
        }
    }

    println!();
    println!("Suggestions:");
    for s in &report.suggestions {
        println!("  - {}", s);
    }

    if let Some(out_path) = out_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&out_path, json).with_context(|| format!("write {}", out_path))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
