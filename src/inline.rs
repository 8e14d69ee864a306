use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::Run;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Split a block's prose into plain, bold, and inline code runs.
///
/// The earliest marker span wins; when a bold and a code span start at the
/// same offset, bold wins. Markers without a partner stay literal inside the
/// surrounding plain run. Spans do not nest.
pub fn format_inline(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut bold = Marker::new(&BOLD, Run::Bold);
    let mut code = Marker::new(&CODE, Run::Code);
    let mut pos = 0;

    while pos < text.len() {
        let found = match (bold.next_at(text, pos), code.next_at(text, pos)) {
            (Some(b), Some(c)) if b.start <= c.start => (b, bold.wrap),
            (Some(b), None) => (b, bold.wrap),
            (_, Some(c)) => (c, code.wrap),
            (None, None) => break,
        };
        let (span, wrap) = found;

        if span.start > pos {
            runs.push(Run::Plain(text[pos..span.start].to_string()));
        }
        runs.push(wrap(text[span.inner.clone()].to_string()));
        pos = span.end;
    }

    if pos < text.len() {
        runs.push(Run::Plain(text[pos..].to_string()));
    }
    runs
}

#[derive(Debug, Clone)]
struct Span {
    start: usize,
    end: usize,
    inner: std::ops::Range<usize>,
}

/// One marker pattern with its most recent match, in absolute offsets.
///
/// The cached match stays valid while it starts at or after the cursor, so
/// each pattern searches again only once the cursor has passed its match.
struct Marker {
    regex: &'static Regex,
    wrap: fn(String) -> Run,
    cached: Option<Span>,
    exhausted: bool,
}

impl Marker {
    fn new(regex: &'static Regex, wrap: fn(String) -> Run) -> Self {
        Self {
            regex,
            wrap,
            cached: None,
            exhausted: false,
        }
    }

    fn next_at(&mut self, text: &str, pos: usize) -> Option<Span> {
        if self.exhausted {
            return None;
        }
        if let Some(span) = self.cached.as_ref().filter(|span| span.start >= pos) {
            return Some(span.clone());
        }

        let found = self.regex.captures_at(text, pos).and_then(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Span {
                start: whole.start(),
                end: whole.end(),
                inner: inner.range(),
            })
        });
        self.exhausted = found.is_none();
        self.cached = found.clone();
        found
    }
}
