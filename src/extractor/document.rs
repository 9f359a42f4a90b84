//! Input text prepared for extraction: headings located, sentences split.

use regex::Regex;

use crate::utils::{normalize_whitespace, trim_leading_separators};

/// Words that end with a period without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "vs", "fig", "figs", "al", "approx", "dr", "no", "ref", "eq", "ca",
];

/// Compiled matcher for every recognized section heading
///
/// A heading is one of the known names, optionally preceded by markdown
/// hashes or section numbers. At the start of a line it ends with a colon
/// (ASCII or full-width) or the end of the line. Right after a sentence end
/// inside a line the colon is required.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    regex: Regex,
}

impl HeadingPattern {
    /// Build the matcher; `headings` should be sorted longest first
    pub fn new(headings: &[&str]) -> Result<Self, regex::Error> {
        let alternation = headings
            .iter()
            .filter(|h| !h.trim().is_empty())
            .map(|h| regex::escape(h.trim()))
            .collect::<Vec<_>>()
            .join("|");

        // An empty alternation would match at every line start
        let alternation = if alternation.is_empty() {
            r"\b\B".to_string()
        } else {
            alternation
        };

        // At a line start the colon is optional; after a sentence end inside
        // a line it is required, so wrapped prose never yields headings.
        let pattern = format!(
            r"(?im)^{}[ \t]*(?::|：|$)|(?:[.!?]\s+|[。！？；]){}[ \t]*(?::|：)",
            labeled("line", &alternation),
            labeled("inline", &alternation)
        );

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }
}

/// Optional markdown hashes and section number, then one of the headings
///
/// Capture groups are `{name}_label` (whole label) and `{name}_heading`.
fn labeled(name: &str, alternation: &str) -> String {
    format!(
        r"(?P<{name}_label>[ \t]*(?:#{{1,6}}[ \t]*)?(?:\d+(?:\.\d+)*\.?[ \t]+)?(?P<{name}_heading>{alternation}))"
    )
}

/// A heading found in the document body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Lowercase heading name
    pub name: String,
    /// Byte offset where the heading line starts (after any sentence end)
    pub start: usize,
    /// Byte offset where the section content starts
    pub content_start: usize,
}

/// Text ready for the extraction strategies
#[derive(Debug, Clone)]
pub struct Document {
    body: String,
    headings: Vec<Heading>,
    sentences: Vec<String>,
    lower_sentences: Vec<String>,
}

impl Document {
    /// Parse `text`, dropping a leading `title` from the body when present
    pub fn parse(text: &str, title: Option<&str>, pattern: &HeadingPattern) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let body = strip_title(&normalized, title).to_string();

        let headings: Vec<Heading> = pattern
            .regex
            .captures_iter(&body)
            .filter_map(|caps| {
                let (label, name) = match (caps.name("line_label"), caps.name("line_heading")) {
                    (Some(label), Some(name)) => (label, name),
                    _ => (caps.name("inline_label")?, caps.name("inline_heading")?),
                };
                let whole = caps.get(0)?;
                Some(Heading {
                    name: name.as_str().to_lowercase(),
                    start: label.start(),
                    content_start: whole.end(),
                })
            })
            .collect();

        let mut sentences = Vec::new();
        let mut segment_start = 0;
        for heading in &headings {
            sentences.extend(split_sentences(&body[segment_start..heading.start]));
            segment_start = heading.content_start;
        }
        sentences.extend(split_sentences(&body[segment_start..]));

        let lower_sentences = sentences.iter().map(|s| s.to_lowercase()).collect();

        Self {
            body,
            headings,
            sentences,
            lower_sentences,
        }
    }

    /// Body text after title removal
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Content of the section introduced by the heading at `index`
    ///
    /// Runs until the next recognized heading or the end of the body.
    pub fn section(&self, index: usize) -> Option<&str> {
        let heading = self.headings.get(index)?;
        let end = self
            .headings
            .get(index + 1)
            .map_or(self.body.len(), |next| next.start);
        let content = self.body.get(heading.content_start..end)?;
        Some(trim_leading_separators(content).trim_end())
    }

    /// Sentences outside of heading names, in document order
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Lowercase copies of [`Document::sentences`]
    pub fn lower_sentences(&self) -> &[String] {
        &self.lower_sentences
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Remove a leading copy of the title, unless nothing would remain
fn strip_title<'a>(text: &'a str, title: Option<&str>) -> &'a str {
    let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
        return text;
    };

    let trimmed = text.trim_start();
    let Some(prefix) = trimmed.get(..title.len()) else {
        return text;
    };
    if prefix.to_lowercase() != title.to_lowercase() {
        return text;
    }

    let after = &trimmed[title.len()..];
    if !closes_title_line(after) {
        return text;
    }

    let rest = trim_leading_separators(after);
    if rest.trim().is_empty() {
        text
    } else {
        rest
    }
}

/// Whether the text right after a title prefix ends the title line
///
/// Accepts a line break, the end of input, or a separator (`:`, `.`, `-`,
/// `|`) followed by whitespace. Full-width punctuation needs no space.
fn closes_title_line(after: &str) -> bool {
    let mut chars = after
        .trim_start_matches(|c: char| c == ' ' || c == '\t')
        .chars();
    match chars.next() {
        None | Some('\n') => true,
        Some('：' | '。' | '—') => true,
        Some(':' | '.' | '-' | '–' | '|') => chars.next().map_or(true, char::is_whitespace),
        Some(_) => false,
    }
}

/// Split a heading-free segment into whitespace-normalized sentences
fn split_sentences(segment: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in paragraphs(segment) {
        let mut current = String::new();
        let mut chars = paragraph.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            let ends_sentence = match c {
                '。' | '！' | '？' | '；' => true,
                '.' | '!' | '?' => {
                    chars.peek().map_or(true, |n| n.is_whitespace())
                        && !(c == '.' && ends_with_abbreviation(&current))
                }
                _ => false,
            };
            if ends_sentence {
                push_sentence(&mut sentences, &mut current);
            }
        }
        push_sentence(&mut sentences, &mut current);
    }
    sentences
}

/// Join hard-wrapped lines; blank lines separate paragraphs
fn paragraphs(segment: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for line in segment.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = normalize_whitespace(current);
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    current.clear();
}

fn ends_with_abbreviation(text: &str) -> bool {
    let Some(word) = text.split_whitespace().last() else {
        return false;
    };
    let word = word
        .trim_end_matches('.')
        .trim_start_matches(|c: char| c == '(' || c == '[')
        .to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateCatalog;

    fn pattern() -> HeadingPattern {
        HeadingPattern::new(&TemplateCatalog::builtin().headings()).unwrap()
    }

    #[test]
    fn test_headings_found_at_line_start() {
        let doc = Document::parse(
            "Background: Diabetes treatment study.\n    Objective: To evaluate new drug efficacy.\n",
            None,
            &pattern(),
        );
        let names: Vec<&str> = doc.headings().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["background", "objective"]);
        assert_eq!(doc.section(0), Some("Diabetes treatment study."));
        assert_eq!(doc.section(1), Some("To evaluate new drug efficacy."));
    }

    #[test]
    fn test_headings_after_sentence_end() {
        let doc = Document::parse(
            "Some preamble. Methods: We did things. Results: It worked.",
            None,
            &pattern(),
        );
        let names: Vec<&str> = doc.headings().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["methods", "results"]);
        assert_eq!(doc.section(0), Some("We did things."));
        assert_eq!(
            doc.sentences(),
            &["Some preamble.", "We did things.", "It worked."]
        );
    }

    #[test]
    fn test_heading_without_colon_on_own_line() {
        let doc = Document::parse("## Results\nCells grew faster.\n\nDiscussion\nDone.", None, &pattern());
        let names: Vec<&str> = doc.headings().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["results", "discussion"]);
        assert_eq!(doc.section(0), Some("Cells grew faster."));
    }

    #[test]
    fn test_wrapped_line_ending_in_heading_word_is_prose() {
        let doc = Document::parse(
            "We analysed outcomes in two groups of adults. Treatment\nwas given daily for a month. Outcome improved.",
            None,
            &pattern(),
        );
        assert!(doc.headings().is_empty());
        assert_eq!(
            doc.sentences(),
            &[
                "We analysed outcomes in two groups of adults.",
                "Treatment was given daily for a month.",
                "Outcome improved.",
            ]
        );
    }

    #[test]
    fn test_heading_word_inside_sentence_is_ignored() {
        let doc = Document::parse("The results were striking: all cells died.", None, &pattern());
        assert!(doc.headings().is_empty());
    }

    #[test]
    fn test_chinese_headings() {
        let doc = Document::parse("背景：糖尿病是常见病。目的：评估新药疗效。", None, &pattern());
        let names: Vec<&str> = doc.headings().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["背景", "目的"]);
        assert_eq!(doc.section(0), Some("糖尿病是常见病。"));
        assert_eq!(doc.sentences(), &["糖尿病是常见病。", "评估新药疗效。"]);
    }

    #[test]
    fn test_sentence_splitting() {
        let sentences = split_sentences(
            "First line wraps\n    onto the next. Second sentence, e.g. with an abbreviation!\n\nNew paragraph without period\n\nLast? Yes.",
        );
        assert_eq!(
            sentences,
            vec![
                "First line wraps onto the next.",
                "Second sentence, e.g. with an abbreviation!",
                "New paragraph without period",
                "Last?",
                "Yes.",
            ]
        );
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        let sentences = split_sentences("Levels rose by 2.5 units (p<0.001). Done.");
        assert_eq!(sentences, vec!["Levels rose by 2.5 units (p<0.001).", "Done."]);
    }

    #[test]
    fn test_title_is_stripped() {
        let doc = Document::parse(
            "Gene X in Zebrafish\n\nWe studied gene X. It matters.",
            Some("gene x in zebrafish"),
            &pattern(),
        );
        assert_eq!(doc.sentences(), &["We studied gene X.", "It matters."]);
    }

    #[test]
    fn test_title_kept_when_nothing_else_remains() {
        let doc = Document::parse("Only The Title", Some("Only The Title"), &pattern());
        assert_eq!(doc.body(), "Only The Title");
    }

    #[test]
    fn test_title_prefix_of_longer_word_is_kept() {
        let text = "Cancers of the lung remain poorly characterized at the molecular level. We profiled tumors.";
        let doc = Document::parse(text, Some("Cancer"), &pattern());
        assert_eq!(doc.body(), text);
        assert!(doc.sentences()[0].starts_with("Cancers of the lung"));
    }

    #[test]
    fn test_title_running_into_first_sentence_is_kept() {
        let text = "Gene X regulates autophagy in yeast. Knockdown reduced growth.";
        let doc = Document::parse(text, Some("Gene X"), &pattern());
        assert_eq!(doc.body(), text);
        assert_eq!(doc.sentences()[0], "Gene X regulates autophagy in yeast.");
    }

    #[test]
    fn test_title_ended_by_separator_is_stripped() {
        let doc = Document::parse("Gene X.\nWe studied it. It matters.", Some("Gene X"), &pattern());
        assert_eq!(doc.sentences(), &["We studied it.", "It matters."]);
    }

    #[test]
    fn test_title_not_at_start_is_kept() {
        let doc = Document::parse("Intro text. Some Title appears.", Some("Some Title"), &pattern());
        assert_eq!(doc.body(), "Intro text. Some Title appears.");
    }

    #[test]
    fn test_empty_heading_list() {
        let pattern = HeadingPattern::new(&[]).unwrap();
        let doc = Document::parse("Results: nothing is a heading here.", None, &pattern);
        assert!(doc.headings().is_empty());
        assert_eq!(doc.sentences().len(), 1);
    }
}
