//! Line model for assembly source.
//!
//! Assembly is line oriented: every line that is not blank and not a `//`
//! comment is one declaration or instruction. Spans are byte ranges into the
//! whole source text so diagnostics can point at them.

use std::ops::Range;

/// Byte range into the source text.
pub type Span = Range<usize>;

/// A code-carrying source line, split at the first whitespace run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'s> {
    /// 1-based line number.
    pub number: usize,
    pub opname: &'s str,
    pub opname_span: Span,
    /// Trimmed text after the operation name. Empty when absent.
    pub args: &'s str,
    /// Byte offset of `args` in the source.
    pub args_offset: usize,
}

impl Line<'_> {
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn args_span(&self) -> Span {
        self.args_offset..self.args_offset + self.args.len()
    }

    /// Span covering the whole trimmed line.
    pub fn span(&self) -> Span {
        let end = if self.has_args() {
            self.args_span().end
        } else {
            self.opname_span.end
        };
        self.opname_span.start..end
    }

    /// The operation name without its sigil, for `@label` and `$function` lines.
    pub fn sigil_name(&self) -> &str {
        &self.opname[1..]
    }
}

/// Iterate over code-carrying lines, skipping blank and `//` lines.
pub fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().filter_map(move |(idx, raw)| {
        let start = offset;
        offset += raw.len() + 1;
        parse_line(raw, start, idx + 1)
    })
}

fn parse_line(raw: &str, start: usize, number: usize) -> Option<Line<'_>> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with("//") {
        return None;
    }
    let text_start = start + (raw.len() - raw.trim_start().len());

    let (opname, args, args_offset) = match text.find(char::is_whitespace) {
        Some(split) => {
            let rest = text[split..].trim_start();
            let args_offset = text_start + (text.len() - rest.len());
            (&text[..split], rest, args_offset)
        }
        None => (text, "", text_start + text.len()),
    };

    Some(Line {
        number,
        opname,
        opname_span: text_start..text_start + opname.len(),
        args,
        args_offset,
    })
}

/// Whitespace-separated words of `text` with their absolute spans.
pub fn words(text: &str, offset: usize) -> Vec<(&str, Span)> {
    let mut out = Vec::new();
    let mut rest = text;
    let mut pos = offset;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        rest = &rest[start..];
        pos += start;
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        out.push((&rest[..len], pos..pos + len));
        rest = &rest[len..];
        pos += len;
    }
    out
}
