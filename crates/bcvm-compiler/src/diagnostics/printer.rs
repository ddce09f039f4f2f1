//! Rendering of assembly diagnostics.
//!
//! Without source text each diagnostic is one `line N: message` row. With
//! source, each gets a snippet of just its own line, labelled with what went
//! wrong in terms of that line's operation name.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::{DiagnosticKind, DiagnosticMessage, Diagnostics};
use crate::source::Span;

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in snippet headers.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source.and_then(|s| line_at(s, diag.line())) {
                Some((start, text)) => self.format_snippet(w, &renderer, diag, start, text)?,
                None => write!(w, "{diag}")?,
            }
        }
        Ok(())
    }

    fn format_snippet(
        &self,
        w: &mut impl Write,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
        line_start: usize,
        text: &str,
    ) -> std::fmt::Result {
        let opname = text.split_whitespace().next().unwrap_or_default();
        let label = annotation_label(diag.kind(), opname);
        let range = rebase(diag.range(), line_start, text.len());

        let mut snippet = Snippet::source(text)
            .line_start(diag.line())
            .annotation(AnnotationKind::Primary.span(range).label(label.as_str()));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(diag.message()).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// What the underline says, given the operation name on the offending line.
fn annotation_label(kind: DiagnosticKind, opname: &str) -> String {
    match kind {
        DiagnosticKind::InvalidOpcode => "not an operation".to_string(),
        DiagnosticKind::MissingName => format!("`{opname}` needs a name after the sigil"),
        DiagnosticKind::WrongArity => format!("wrong operand count for `{opname}`"),
        DiagnosticKind::DuplicateSymbol => "declared earlier".to_string(),
        DiagnosticKind::ArgumentInStaticSection => "no `$function` above this line".to_string(),
        DiagnosticKind::MalformedArgument => format!("`{opname}` takes `#name` arguments"),
        DiagnosticKind::MalformedLiteral => format!("`{opname}` operand is not a number, char or symbol"),
        DiagnosticKind::UndefinedSymbol => format!("used by `{opname}` but never declared"),
    }
}

/// Byte offset and text of 1-based line `number`, without its line ending.
fn line_at(source: &str, number: usize) -> Option<(usize, &str)> {
    let mut offset = 0;
    for (idx, raw) in source.split('\n').enumerate() {
        if idx + 1 == number {
            return Some((offset, raw.strip_suffix('\r').unwrap_or(raw)));
        }
        offset += raw.len() + 1;
    }
    None
}

/// Move a source-wide span onto its line. Empty spans widen to one byte.
fn rebase(range: Span, line_start: usize, line_len: usize) -> Span {
    let start = range.start.saturating_sub(line_start).min(line_len);
    let end = range.end.saturating_sub(line_start).clamp(start, line_len);
    if start == end {
        return start..(start + 1).min(line_len);
    }
    start..end
}
