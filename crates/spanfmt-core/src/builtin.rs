//! Minimal services so the server is usable without an external toolchain.
//! Real deployments inject their own `ImportOrganizer` and `RangeFormatter`.

use crate::config::{ImportConfig, WhitespaceConfig};
use crate::error::ServiceError;
use crate::format::{ImportOrganizer, RangeFormatter};
use crate::model::{Document, Span, SpanEdit};

/// Sorts and de-duplicates each contiguous run of import lines.
pub struct ImportBlockSorter {
    prefixes: Vec<String>,
}

impl ImportBlockSorter {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            prefixes: config.prefixes.clone(),
        }
    }

    fn is_import(&self, line: &str) -> bool {
        let line = line.trim_start();
        self.prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    fn sort_run(document: &Document, run: &[(usize, &str)]) -> Option<SpanEdit> {
        let (first, _) = run[0];
        let (last, last_line) = run[run.len() - 1];

        let mut sorted: Vec<&str> = run.iter().map(|(_, line)| *line).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let original: Vec<&str> = run.iter().map(|(_, line)| *line).collect();
        if sorted == original {
            return None;
        }

        let span = Span::new(document.uri.clone(), first, last + last_line.len()).ok()?;
        Some(SpanEdit::new(span, sorted.join("\n")))
    }
}

impl ImportOrganizer for ImportBlockSorter {
    fn organize_imports(&self, document: &Document) -> Result<Vec<SpanEdit>, ServiceError> {
        let mut edits = Vec::new();
        let mut run: Vec<(usize, &str)> = Vec::new();
        let mut offset = 0;

        for chunk in document.text.split_inclusive('\n') {
            let line = chunk.strip_suffix('\n').unwrap_or(chunk);
            if self.is_import(line) {
                run.push((offset, line));
            } else if !run.is_empty() {
                edits.extend(Self::sort_run(document, &run));
                run.clear();
            }
            offset += chunk.len();
        }
        if !run.is_empty() {
            edits.extend(Self::sort_run(document, &run));
        }

        Ok(edits)
    }
}

/// Strips trailing blanks from every line the span touches.
pub struct WhitespaceFormatter {
    config: WhitespaceConfig,
}

impl WhitespaceFormatter {
    pub fn new(config: &WhitespaceConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Widen `span` to whole lines, terminators excluded.
    fn line_bounds(text: &str, span: &Span) -> (usize, usize) {
        let start = text[..span.start()]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);

        // A non-empty span ending at column 0 does not touch that line.
        let end = if !span.is_empty() && text[..span.end()].ends_with('\n') {
            span.end() - 1
        } else {
            text[span.end()..]
                .find('\n')
                .map(|i| span.end() + i)
                .unwrap_or(text.len())
        };

        (start, end.max(start))
    }

    /// Replace everything after the last non-blank character with a single
    /// `\n`. `blanks` decides whether trailing spaces count as blank.
    fn final_newline_edit(document: &Document, blanks: &[char]) -> Option<SpanEdit> {
        let text = &document.text;
        if text.is_empty() {
            return None;
        }
        let body = text.trim_end_matches(blanks);
        if &text[body.len()..] == "\n" {
            return None;
        }
        let span = Span::new(document.uri.clone(), body.len(), text.len()).ok()?;
        Some(SpanEdit::new(span, "\n"))
    }
}

impl RangeFormatter for WhitespaceFormatter {
    fn format(&self, document: &Document, span: &Span) -> Result<Vec<SpanEdit>, ServiceError> {
        let text = &document.text;
        if span.end() > text.len()
            || !text.is_char_boundary(span.start())
            || !text.is_char_boundary(span.end())
        {
            return Err(ServiceError::new(
                "whitespace",
                format!("span {}..{} is outside the document", span.start(), span.end()),
            ));
        }

        let (start, end) = Self::line_bounds(text, span);
        let mut edits = Vec::new();

        if self.config.trim_trailing {
            let mut offset = start;
            for line in text[start..end].split('\n') {
                let content = line.strip_suffix('\r').unwrap_or(line);
                let kept = content.trim_end_matches([' ', '\t']).len();
                if kept < content.len() {
                    let span =
                        Span::new(document.uri.clone(), offset + kept, offset + content.len())
                            .map_err(|e| ServiceError::new("whitespace", e.to_string()))?;
                    edits.push(SpanEdit::new(span, ""));
                }
                offset += line.len() + 1;
            }
        }

        if self.config.final_newline && (end == text.len() || span.end() == text.len()) {
            let blanks: &[char] = if self.config.trim_trailing {
                &[' ', '\t', '\n']
            } else {
                &['\n']
            };
            if let Some(tail) = Self::final_newline_edit(document, blanks) {
                // The tail edit covers any trim edit inside it.
                edits.retain(|e| e.span.start() < tail.span.start());
                edits.push(tail);
            }
        }

        Ok(edits)
    }
}
