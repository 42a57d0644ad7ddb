//! Trace extraction
//!
//! Isolates the JSON-shaped substring from model output that interleaves
//! reasoning prose, markdown fences, and the structured answer. Extraction
//! never fails: when nothing JSON-shaped is found the trimmed input is
//! returned verbatim.

use regex::Regex;
use std::sync::LazyLock;

static RE_REASONING_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<think>.*?</think>|<thinking>.*?</thinking>|<reasoning>.*?</reasoning>")
        .unwrap()
});

// Applied after closed spans are removed, so any opener left has no closer:
// the stream was cut off mid-trace and the rest of the text is trace.
static RE_REASONING_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(?:think|thinking|reasoning)>.*$").unwrap());

static RE_FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^```[^\n]*\r?\n(.*?)^```").unwrap());

/// Extracts the best-candidate JSON substring from raw model output.
///
/// With `prefer_last` (the default), the last candidate wins: models tend to
/// restate their final answer after discarded drafts.
pub struct Extractor {
    prefer_last: bool,
}

impl Extractor {
    pub fn new() -> Self {
        Self { prefer_last: true }
    }

    pub fn with_prefer_last(mut self, prefer_last: bool) -> Self {
        self.prefer_last = prefer_last;
        self
    }

    /// Extract the JSON-shaped region from `text`.
    ///
    /// Priority order: reasoning spans are stripped first; fenced code blocks
    /// that hold a JSON value win over bare spans; otherwise a single
    /// bracket-depth scan selects candidates, with a trailing unterminated
    /// span counting as one (the partial-stream case). Falls back to the
    /// first `{`/`[` onward, then to the trimmed input.
    pub fn extract(&self, text: &str) -> String {
        let cleaned = strip_reasoning(text);

        let fenced = fenced_json_blocks(&cleaned);
        if !fenced.is_empty() {
            let block = if self.prefer_last {
                fenced.last()
            } else {
                fenced.first()
            };
            return block.map(|b| b.trim().to_string()).unwrap_or_default();
        }

        let spans = bracket_spans(&cleaned);
        if !spans.is_empty() {
            let (start, end) = if self.prefer_last {
                *spans.last().unwrap()
            } else {
                spans[0]
            };
            return cleaned[start..end].trim().to_string();
        }

        let brace = cleaned.find('{');
        let bracket = cleaned.find('[');
        let first = match (brace, bracket) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };

        match first {
            Some(pos) => cleaned[pos..].trim().to_string(),
            None => cleaned.trim().to_string(),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove reasoning-trace spans, including an unterminated trailing opener.
fn strip_reasoning(text: &str) -> String {
    let without_spans = RE_REASONING_SPAN.replace_all(text, "");
    RE_REASONING_TAIL.replace(&without_spans, "").into_owned()
}

/// Bodies of fenced code blocks whose trimmed content starts with `{` or `[`.
fn fenced_json_blocks(text: &str) -> Vec<String> {
    RE_FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|cap| {
            let body = cap.get(1)?.as_str();
            let trimmed = body.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                Some(body.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Byte ranges of top-level bracket spans found by a single left-to-right
/// scan. Quotes toggle string mode unless escaped; characters inside strings
/// never affect depth. A trailing span still open at end of input is emitted
/// as a candidate.
fn bracket_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut span_start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => {
                if depth == 0 {
                    span_start = Some(i);
                }
                depth += 1;
            }
            '}' | ']' if !in_string => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(start) = span_start.take() {
                            spans.push((start, i + c.len_utf8()));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        if let Some(start) = span_start {
            spans.push((start, text.len()));
        }
    }

    spans
}
