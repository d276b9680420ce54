use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use transtype::extraction::ConfidenceLevel;
use transtype::{ProcessorConfig, TranscriptInput, TranscriptOutput, TranscriptProcessor};

#[derive(Parser)]
#[command(
    name = "transtype",
    version,
    about = "Extract structured field values from conversation transcripts"
)]
struct Cli {
    /// TranscriptInput JSON file. Reads stdin when omitted or "-".
    input: Option<PathBuf>,
    /// Model identifier (overrides TRANSTYPE_MODEL)
    #[arg(long)]
    model: Option<String>,
    /// Do not ask the model to justify extracted values
    #[arg(long)]
    no_reasoning: bool,
    /// Print a per-field summary to stderr after the JSON output
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    transtype::init_tracing();

    let mut config = ProcessorConfig::from_env()?;
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    config = config.with_reasoning(!cli.no_reasoning);

    let raw = read_input(cli.input.as_deref())?;
    let input: TranscriptInput =
        serde_json::from_str(&raw).context("Input is not a valid TranscriptInput")?;

    let processor = TranscriptProcessor::new(config)?;
    let output = processor.process(&input)?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.summary {
        eprintln!("{}", render_summary(&output));
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Values longer than this are cut in the summary.
const SUMMARY_VALUE_WIDTH: usize = 30;

fn render_summary(output: &TranscriptOutput) -> String {
    let mut lines = vec![format!("Fields extracted: {}", output.fields.len())];
    for field in &output.fields {
        let level = ConfidenceLevel::from_score(field.field_confidence);
        let line = match &field.field_value {
            Some(value) => format!(
                "  {}: found ({:.2}, {level}) - '{}'",
                field.field_name,
                field.field_confidence,
                truncate(value, SUMMARY_VALUE_WIDTH)
            ),
            None => format!(
                "  {}: not found ({:.2}, {level})",
                field.field_name, field.field_confidence
            ),
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use transtype::FieldResult;

    use super::*;

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"messages": [{{"role": "user", "content": "Hello"}}]}}"#).unwrap();

        let raw = read_input(Some(file.path())).unwrap();
        let input: TranscriptInput = serde_json::from_str(&raw).unwrap();
        assert_eq!(input.messages.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("absent.json"), "{err}");
    }

    #[test]
    fn summary_reports_found_and_missing() {
        let output = TranscriptOutput {
            fields: vec![
                FieldResult {
                    field_name: "agent_name".into(),
                    field_value: Some("Joan London".into()),
                    field_confidence: 0.91,
                    field_reason: None,
                },
                FieldResult {
                    field_name: "customer_fax".into(),
                    field_value: None,
                    field_confidence: 0.5,
                    field_reason: None,
                },
            ],
        };
        let summary = render_summary(&output);
        assert!(summary.starts_with("Fields extracted: 2"));
        assert!(summary.contains("agent_name: found (0.91, high) - 'Joan London'"));
        assert!(summary.contains("customer_fax: not found (0.50, low)"));
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "a".repeat(40);
        assert_eq!(truncate(&long, 30), format!("{}...", "a".repeat(30)));
        assert_eq!(truncate("short", 30), "short");
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["transtype", "in.json", "--model", "openai/gpt-4o-mini", "--no-reasoning", "--summary"]);
        assert_eq!(cli.input.as_deref(), Some(Path::new("in.json")));
        assert_eq!(cli.model.as_deref(), Some("openai/gpt-4o-mini"));
        assert!(cli.no_reasoning);
        assert!(cli.summary);
    }
}
