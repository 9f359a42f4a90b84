use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use literature_analyzer::config::get_config;
use literature_analyzer::models::MetadataRecord;
use literature_analyzer::pipeline::AnalysisPipeline;
use literature_analyzer::sources::ResolverChain;
use literature_analyzer::utils::{
    classification_table, modules_table, plain_classification, plain_report, summary_table,
    terminal_info, types_table,
};
use literature_analyzer::AnalysisReport;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Literature Analyzer - Classify academic papers and extract their key content
#[derive(Parser, Debug)]
#[command(name = "literature-analyzer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify academic papers and extract structured content modules", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self, is_tty: bool) -> Self {
        match self {
            OutputFormat::Auto if is_tty => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a paper and extract its content modules
    #[command(alias = "a")]
    Analyze {
        /// Paper text (read from --file or stdin when omitted)
        text: Option<String>,

        /// Read the paper text from a file
        #[arg(long, short, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Paper title, kept out of the extracted modules
        #[arg(long, short)]
        title: Option<String>,

        /// Metadata record (JSON) to attach to the report
        #[arg(long, short)]
        metadata: Option<PathBuf>,
    },

    /// Classify a paper without extracting modules
    #[command(alias = "c")]
    Classify {
        /// Paper text (read from --file or stdin when omitted)
        text: Option<String>,

        /// Read the paper text from a file
        #[arg(long, short, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Resolve a DOI and analyze the paper's title and abstract
    Doi {
        /// DOI, doi: reference or doi.org URL
        doi: String,
    },

    /// List supported paper types and their modules
    Types,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = get_config(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("literature_analyzer={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let pipeline = AnalysisPipeline::from_config(&config).context("Invalid heading pattern")?;
    let terminal = terminal_info();
    let format = cli.output.resolve(terminal.is_tty());

    match cli.command {
        Commands::Analyze {
            text,
            file,
            title,
            metadata,
        } => {
            let text = read_input(text, file.as_deref())?;
            let metadata = metadata.as_deref().map(read_metadata).transpose()?;
            let report = pipeline.analyze(&text, title.as_deref(), metadata)?;
            output_report(&pipeline, &report, format, terminal.width())?;
        }
        Commands::Classify { text, file } => {
            let text = read_input(text, file.as_deref())?;
            let result = pipeline.classify(&text)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Plain => println!("{}", plain_classification(&result)),
                _ => println!("{}", classification_table(&result, terminal.width())),
            }
        }
        Commands::Doi { doi } => {
            let chain = ResolverChain::from_settings(&config.resolver)?;
            let report = pipeline.analyze_doi(&chain, &doi).await?;
            output_report(&pipeline, &report, format, terminal.width())?;
        }
        Commands::Types => output_types(&pipeline, format, terminal.width())?,
    }

    Ok(())
}

/// Text from the argument, a file, or stdin, in that order
fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No input: pass TEXT, --file, or pipe the text on stdin");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn read_metadata(path: &Path) -> Result<MetadataRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid metadata record in {}", path.display()))
}

fn output_report(
    pipeline: &AnalysisPipeline,
    report: &AnalysisReport,
    format: OutputFormat,
    width: usize,
) -> Result<()> {
    let schema = pipeline.catalog().schema(report.paper_type);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Plain => print!("{}", plain_report(report, schema)),
        _ => {
            println!("{}", summary_table(report, width));
            println!("{}", modules_table(report, schema, width));
        }
    }
    Ok(())
}

fn output_types(pipeline: &AnalysisPipeline, format: OutputFormat, width: usize) -> Result<()> {
    let catalog = pipeline.catalog();
    match format {
        OutputFormat::Json => {
            let types: Vec<serde_json::Value> = catalog
                .types()
                .map(|paper_type| {
                    let modules: Vec<serde_json::Value> = catalog
                        .schema(paper_type)
                        .labels()
                        .map(|(key, label)| serde_json::json!({ "key": key, "label": label }))
                        .collect();
                    serde_json::json!({
                        "type": paper_type,
                        "description": paper_type.description(),
                        "summary": paper_type.summary(),
                        "modules": modules,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&types)?);
        }
        OutputFormat::Plain => {
            for paper_type in catalog.types() {
                let keys: Vec<&str> = catalog.schema(paper_type).keys().collect();
                println!("{} - {}", paper_type, paper_type.summary());
                println!("  modules: {}", keys.join(", "));
            }
        }
        _ => println!("{}", types_table(catalog, width)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        let version = env!("CARGO_PKG_VERSION");
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2);
        assert!(parts[0].parse::<u32>().is_ok());
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["literature-analyzer", "types"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Types));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["literature-analyzer", "-v", "types"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["literature-analyzer", "types", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["literature-analyzer", "-o", "json", "types"]);
        assert_eq!(cli.output, OutputFormat::Json);

        let cli = Cli::parse_from(["literature-analyzer", "types", "--output", "plain"]);
        assert_eq!(cli.output, OutputFormat::Plain);
    }

    #[test]
    fn test_output_format_resolution() {
        assert_eq!(OutputFormat::Auto.resolve(true), OutputFormat::Table);
        assert_eq!(OutputFormat::Auto.resolve(false), OutputFormat::Json);
        assert_eq!(OutputFormat::Plain.resolve(true), OutputFormat::Plain);
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::parse_from([
            "literature-analyzer",
            "--config",
            "/path/to/config.toml",
            "types",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_cli_analyze_command() {
        let cli = Cli::parse_from([
            "literature-analyzer",
            "analyze",
            "Objective: to test things.",
            "--title",
            "A title",
        ]);
        match cli.command {
            Commands::Analyze {
                text,
                file,
                title,
                metadata,
            } => {
                assert_eq!(text.as_deref(), Some("Objective: to test things."));
                assert!(file.is_none());
                assert_eq!(title.as_deref(), Some("A title"));
                assert!(metadata.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_text_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "literature-analyzer",
            "classify",
            "some text",
            "--file",
            "paper.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_doi_command() {
        let cli = Cli::parse_from(["literature-analyzer", "doi", "10.1056/NEJMoa2034577"]);
        assert!(matches!(cli.command, Commands::Doi { ref doi } if doi == "10.1056/NEJMoa2034577"));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["literature-analyzer"]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.txt");
        std::fs::write(&path, "Case Report: a patient.").unwrap();

        assert_eq!(
            read_input(None, Some(&path)).unwrap(),
            "Case Report: a patient."
        );
        assert_eq!(
            read_input(Some("inline".to_string()), None).unwrap(),
            "inline"
        );
        assert!(read_input(None, Some(&dir.path().join("missing.txt"))).is_err());
    }

    #[test]
    fn test_read_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, r#"{"title": "Only a title"}"#).unwrap();

        let record = read_metadata(&path).unwrap();
        assert_eq!(record.title, "Only a title");
        assert!(record.authors.is_empty());

        std::fs::write(&path, "not json").unwrap();
        assert!(read_metadata(&path).is_err());
    }
}
