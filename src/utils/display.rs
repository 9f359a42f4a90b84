//! Terminal rendering of reports, classifications and the type listing.
//!
//! Tables are built with `comfy-table`; cell text is cut by display width so
//! Chinese text (two columns per character) lines up with English text.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

use crate::models::{AnalysisReport, ClassificationResult, PaperType};
use crate::templates::{ModuleSchema, TemplateCatalog};

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Width reserved for the label column of report tables
const LABEL_WIDTH: usize = 24;

/// Cached terminal capabilities
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| Terminal {
        width: terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH),
        is_tty: io::stdout().is_terminal(),
    })
}

impl Terminal {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }
}

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Cut `text` to at most `max_width` columns, ending with `...` when cut
///
/// ```
/// use literature_analyzer::utils::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("临床研究", 7), "临床...");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let kept: String = text
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();

    format!("{}...", kept.trim_end())
}

fn base_table(width: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width.min(u16::MAX as usize) as u16);
    table
}

/// Summary table: type, confidence, per-type scores and metadata highlights
pub fn summary_table(report: &AnalysisReport, width: usize) -> Table {
    let value_width = width.saturating_sub(LABEL_WIDTH + 7).max(20);
    let classification = report.classification();

    let mut table = base_table(width);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![
        Cell::new("Paper type").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} ({})",
            report.paper_type_description, report.paper_type
        )),
    ]);
    table.add_row(vec![
        Cell::new("Confidence").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", report.confidence)),
    ]);
    table.add_row(vec![
        Cell::new("Scores").add_attribute(Attribute::Bold),
        Cell::new(format_scores(classification.scores.iter().map(|(t, s)| (*t, *s)))),
    ]);

    if let Some(metadata) = report.metadata() {
        let rows = [
            ("Title", metadata.title.clone()),
            ("Authors", metadata.authors.join(", ")),
            ("Journal", metadata.journal.clone()),
            ("Published", metadata.publication_date.clone()),
            ("DOI", metadata.doi.clone()),
        ];
        for (label, value) in rows.into_iter().filter(|(_, v)| !v.is_empty()) {
            table.add_row(vec![
                Cell::new(label).add_attribute(Attribute::Bold),
                Cell::new(truncate_to_width(&value, value_width)),
            ]);
        }
    }

    table.add_row(vec![
        Cell::new("Generated").add_attribute(Attribute::Bold),
        Cell::new(&report.generation_time),
    ]);
    table
}

/// Module table: one row per extracted module in schema order
pub fn modules_table(report: &AnalysisReport, schema: &ModuleSchema, width: usize) -> Table {
    let value_width = width.saturating_sub(LABEL_WIDTH + 7).max(20);

    let mut table = base_table(width);
    table.set_header(vec!["Module", "Content"]);
    for (key, content) in report.core_info.iter() {
        let label = schema.get(key).map_or(key, |m| m.label);
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(truncate_to_width(content, value_width * 4)),
        ]);
    }
    table
}

/// Classification table: every type with its raw score, winner marked
pub fn classification_table(result: &ClassificationResult, width: usize) -> Table {
    let mut table = base_table(width);
    table.set_header(vec!["Type", "Description", "Score", ""]);
    for paper_type in PaperType::ALL {
        let chosen = paper_type == result.paper_type;
        let mut name = Cell::new(paper_type.id());
        if chosen {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            name,
            Cell::new(paper_type.description()),
            Cell::new(format!("{:.1}", result.score(paper_type))),
            Cell::new(if chosen {
                format!("confidence {:.2}", result.confidence)
            } else {
                String::new()
            }),
        ]);
    }
    table
}

/// Supported types with their description and module keys
pub fn types_table(catalog: &TemplateCatalog, width: usize) -> Table {
    let mut table = base_table(width);
    table.set_header(vec!["Type", "Description", "Modules"]);
    for paper_type in catalog.types() {
        let modules: Vec<&str> = catalog.schema(paper_type).keys().collect();
        table.add_row(vec![
            Cell::new(paper_type.id()).add_attribute(Attribute::Bold),
            Cell::new(format!(
                "{}\n{}",
                paper_type.description(),
                paper_type.summary()
            )),
            Cell::new(modules.join(", ")),
        ]);
    }
    table
}

/// Plain-text report for pipes and log files
pub fn plain_report(report: &AnalysisReport, schema: &ModuleSchema) -> String {
    let mut out = format!(
        "Paper type: {} ({})\nConfidence: {:.2}\nScores: {}\n",
        report.paper_type_description,
        report.paper_type,
        report.confidence,
        format_scores(report.classification().scores.iter().map(|(t, s)| (*t, *s)))
    );
    if let Some(metadata) = report.metadata() {
        if !metadata.title.is_empty() {
            out.push_str(&format!("Title: {}\n", metadata.title));
        }
        if !metadata.doi.is_empty() {
            out.push_str(&format!("DOI: {}\n", metadata.doi));
        }
    }
    out.push('\n');
    for (key, content) in report.core_info.iter() {
        let label = schema.get(key).map_or(key, |m| m.label);
        out.push_str(&format!("{}: {}\n", label, content));
    }
    out.push_str(&format!("\nGenerated: {}\n", report.generation_time));
    out
}

/// Plain-text classification line
pub fn plain_classification(result: &ClassificationResult) -> String {
    format!(
        "{} ({:.2}) scores: {}",
        result.paper_type,
        result.confidence,
        format_scores(result.scores_by_type.iter().map(|(t, s)| (*t, *s)))
    )
}

fn format_scores(scores: impl Iterator<Item = (PaperType, f64)>) -> String {
    scores
        .map(|(paper_type, score)| format!("{}={:.1}", paper_type, score))
        .collect::<Vec<_>>()
        .join(", ")
}
