use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, Document};

const FENCE: &str = "```";
const RULE: &str = "---";
const HTML_CLOSE: &str = "</html>";

static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static HTML_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^<(!doctype|[a-z][a-z0-9-]*)(?:[\s>/]|$)").unwrap());

/// Segment lesson text into a document of blocks.
///
/// Never fails: a line no other rule claims becomes (part of) a paragraph.
pub fn segment(text: &str) -> Document {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut segmenter = Segmenter {
        lines,
        pos: 0,
        code: Vec::new(),
        blocks: Vec::new(),
    };

    let mut mode = Mode::Default;
    while segmenter.pos < segmenter.lines.len() {
        mode = match mode {
            Mode::Default => segmenter.step_default(),
            Mode::FencedCode => segmenter.step_fenced(),
            Mode::HtmlCapture { closer } => segmenter.step_html(closer),
        };
    }

    // An unterminated fence or HTML capture keeps what it collected.
    if !matches!(mode, Mode::Default) {
        segmenter.flush_code();
    }

    log::debug!(
        "segmented {} lines into {} blocks",
        segmenter.lines.len(),
        segmenter.blocks.len()
    );
    Document::new(segmenter.blocks)
}

/// Scanner state between lines.
#[derive(Debug)]
enum Mode {
    Default,
    /// Inside a ``` fence; every line is code until the closing fence.
    FencedCode,
    /// Inside a raw HTML snippet; `closer` is the lowercase end tag of the
    /// element that opened it.
    HtmlCapture { closer: String },
}

struct Segmenter<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    // Lines of the code block being captured
    code: Vec<&'a str>,
    blocks: Vec<Block>,
}

impl<'a> Segmenter<'a> {
    fn step_default(&mut self) -> Mode {
        let line = self.lines[self.pos];
        let trimmed = line.trim();

        if is_fence(trimmed) {
            self.pos += 1;
            return Mode::FencedCode;
        }

        if trimmed.is_empty() {
            self.pos += 1;
            return Mode::Default;
        }

        if trimmed == RULE {
            self.blocks.push(Block::HorizontalRule);
            self.pos += 1;
            return Mode::Default;
        }

        if let Some(closer) = html_closer(trimmed) {
            self.capture_line();
            if ends_with_closer(trimmed, &closer) {
                self.flush_code();
                return Mode::Default;
            }
            return Mode::HtmlCapture { closer };
        }

        if let Some(text) = heading_text(trimmed) {
            self.blocks.push(Block::Heading {
                text: text.to_string(),
            });
            self.pos += 1;
            return Mode::Default;
        }

        if numbered_item(trimmed).is_some() {
            let items = self.take_items(numbered_item);
            self.blocks.push(Block::NumberedList { items });
            return Mode::Default;
        }

        if bullet_item(trimmed).is_some() {
            let items = self.take_items(bullet_item);
            self.blocks.push(Block::BulletList { items });
            return Mode::Default;
        }

        self.paragraph();
        Mode::Default
    }

    fn step_fenced(&mut self) -> Mode {
        let line = self.lines[self.pos];
        let trimmed = line.trim();

        if is_fence(trimmed) {
            self.pos += 1;
            self.flush_code();
            return Mode::Default;
        }

        if trimmed == HTML_CLOSE {
            self.capture_line();
            self.flush_code();
            // The fence that normally follows the sample closes this block too.
            if self.lines.get(self.pos).is_some_and(|l| is_fence(l.trim())) {
                self.pos += 1;
            }
            return Mode::Default;
        }

        self.capture_line();
        Mode::FencedCode
    }

    fn step_html(&mut self, closer: String) -> Mode {
        let line = self.lines[self.pos];
        let trimmed = line.trim();

        if self.is_stray_fence_before_prose(trimmed) {
            self.capture_line();
            self.flush_code();
            return Mode::Default;
        }

        if trimmed.is_empty() {
            let continues = self
                .lines
                .get(self.pos + 1)
                .is_some_and(|next| looks_like_html(next));
            if continues {
                self.capture_line();
                return Mode::HtmlCapture { closer };
            }
            // Leave the blank line for the default scanner to drop.
            self.flush_code();
            return Mode::Default;
        }

        if trimmed.starts_with('<') || line.starts_with([' ', '\t']) {
            self.capture_line();
            if ends_with_closer(trimmed, &closer) {
                self.flush_code();
                return Mode::Default;
            }
            return Mode::HtmlCapture { closer };
        }

        self.flush_code();
        Mode::Default
    }

    /// A fence line, then a blank line, then a line starting with "Let".
    ///
    /// Lessons close unfenced HTML samples this way; the fence belongs to the
    /// sample rather than opening a new code block.
    fn is_stray_fence_before_prose(&self, trimmed: &str) -> bool {
        is_fence(trimmed)
            && self
                .lines
                .get(self.pos + 1)
                .is_some_and(|l| l.trim().is_empty())
            && self
                .lines
                .get(self.pos + 2)
                .is_some_and(|l| l.trim_start().starts_with("Let"))
    }

    /// Append the current line to the code buffer verbatim and advance.
    fn capture_line(&mut self) {
        let line = self.lines[self.pos];
        self.code.push(line.strip_suffix('\r').unwrap_or(line));
        self.pos += 1;
    }

    fn flush_code(&mut self) {
        let lines = std::mem::take(&mut self.code);
        let content = lines.join("\n");
        if content.is_empty() {
            log::trace!("dropping empty code capture ending at line {}", self.pos);
            return;
        }
        log::trace!(
            "code block of {} lines ending at line {}",
            lines.len(),
            self.pos
        );
        self.blocks.push(Block::CodeBlock { content });
    }

    /// Collect contiguous lines accepted by `item`, stripped of their markers.
    fn take_items(&mut self, item: fn(&str) -> Option<&str>) -> Vec<String> {
        let mut items = Vec::new();
        while let Some(text) = self.lines.get(self.pos).and_then(|l| item(l.trim())) {
            items.push(text.to_string());
            self.pos += 1;
        }
        items
    }

    fn paragraph(&mut self) {
        let mut parts = vec![self.lines[self.pos].trim()];
        self.pos += 1;

        while let Some(next) = self.lines.get(self.pos) {
            let next = next.trim();
            if ends_paragraph(next) {
                break;
            }
            parts.push(next);
            self.pos += 1;
        }

        self.blocks.push(Block::Paragraph {
            text: parts.join(" "),
        });
    }
}

fn is_fence(trimmed: &str) -> bool {
    trimmed.starts_with(FENCE)
}

fn looks_like_html(line: &str) -> bool {
    line.trim_start().starts_with('<')
}

/// End tag that closes the HTML snippet opened by this line, if it opens one.
fn html_closer(trimmed: &str) -> Option<String> {
    let caps = HTML_OPENER.captures(trimmed)?;
    let tag = caps[1].to_ascii_lowercase();
    if tag == "!doctype" {
        return Some(HTML_CLOSE.to_string());
    }
    Some(format!("</{tag}>"))
}

fn ends_with_closer(trimmed: &str, closer: &str) -> bool {
    let lower = trimmed.to_ascii_lowercase();
    lower.ends_with(HTML_CLOSE) || lower.ends_with(closer)
}

/// Text of a line that is exactly one bold span, e.g. `**Setup**`.
fn heading_text(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix("**")?.strip_suffix("**")?;
    if inner.contains("**") || inner.trim().is_empty() {
        return None;
    }
    Some(inner)
}

fn numbered_item(trimmed: &str) -> Option<&str> {
    let marker = NUMBERED_MARKER.find(trimmed)?;
    let rest = trimmed[marker.end()..].trim();
    (!rest.is_empty()).then_some(rest)
}

fn bullet_item(trimmed: &str) -> Option<&str> {
    if trimmed == RULE {
        return None;
    }
    let rest = trimmed
        .strip_prefix('•')
        .or_else(|| trimmed.strip_prefix("- "))?
        .trim();
    (!rest.is_empty()).then_some(rest)
}

fn ends_paragraph(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed == RULE
        || heading_text(trimmed).is_some()
        || numbered_item(trimmed).is_some()
        || bullet_item(trimmed).is_some()
        || trimmed.starts_with('<')
        || is_fence(trimmed)
}
