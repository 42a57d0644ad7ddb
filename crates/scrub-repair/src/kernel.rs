//! Repair kernels
//!
//! A kernel owns the bracket/quote automaton and produces the structurally
//! completed text. The default in-process kernel lives here; an alternate
//! natively-compiled kernel would be another `RepairKernel` impl honoring the
//! identical `fixed_text` contract, selected through `KernelKind` rather than
//! a runtime conditional import.

use scrub_core::{PatchKind, RepairPatch};
use serde::{Deserialize, Serialize};

/// Structural completion produced by a kernel. Parsing the completed text is
/// the engine's job, not the kernel's.
#[derive(Debug, Clone)]
pub struct KernelRepair {
    pub fixed_text: String,
    pub patches: Vec<RepairPatch>,
}

/// Contract shared by all repair kernels.
///
/// Kernels must use a growable buffer and an unbounded nesting stack; a
/// fixed-capacity implementation risks silent truncation on deeply nested or
/// very large documents.
pub trait RepairKernel: Send + Sync {
    fn close(&self, input: &str) -> KernelRepair;
}

/// Which kernel the engine runs. Resolved from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    #[default]
    Stream,
}

impl KernelKind {
    pub fn build(self) -> Box<dyn RepairKernel> {
        match self {
            KernelKind::Stream => Box::new(StreamKernel),
        }
    }
}

/// Default in-process kernel: a single-pass automaton over three states
/// (normal, inside-string, escaped) with an explicit stack of expected
/// closers.
pub struct StreamKernel;

impl RepairKernel for StreamKernel {
    fn close(&self, input: &str) -> KernelRepair {
        let mut in_string = false;
        let mut escaped = false;
        let mut stack: Vec<char> = Vec::new();

        for c in input.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' if in_string => escaped = true,
                '"' => in_string = !in_string,
                '{' if !in_string => stack.push('}'),
                '[' if !in_string => stack.push(']'),
                '}' | ']' if !in_string => {
                    // A closer that doesn't match the stack top is copied
                    // through untouched and never popped.
                    if stack.last() == Some(&c) {
                        stack.pop();
                    }
                }
                _ => {}
            }
        }

        let mut fixed = input.to_string();
        let mut patches = Vec::new();

        if in_string {
            let position = fixed.len();
            if escaped {
                // A trailing backslash is an incomplete escape; complete it
                // to a literal backslash so the appended quote cannot be
                // swallowed on a rescan.
                fixed.push('\\');
            }
            fixed.push('"');
            patches.push(RepairPatch {
                kind: PatchKind::UnclosedString,
                position,
            });
        }

        // A dangling separator before an unterminated value. Only reachable
        // when the scan ended outside a string: closing a string leaves a
        // quote at the end.
        let trimmed_len = fixed.trim_end().len();
        if fixed[..trimmed_len].ends_with(',') {
            let position = trimmed_len - 1;
            fixed.truncate(position);
            patches.push(RepairPatch {
                kind: PatchKind::TrailingComma,
                position,
            });
        }

        // Innermost open structure closes first.
        while let Some(closer) = stack.pop() {
            patches.push(RepairPatch {
                kind: PatchKind::MissingCloser,
                position: fixed.len(),
            });
            fixed.push(closer);
        }

        KernelRepair {
            fixed_text: fixed,
            patches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(input: &str) -> KernelRepair {
        StreamKernel.close(input)
    }

    #[test]
    fn test_complete_input_untouched() {
        let out = close("{\"a\": [1, 2], \"b\": \"x\"}");
        assert_eq!(out.fixed_text, "{\"a\": [1, 2], \"b\": \"x\"}");
        assert!(out.patches.is_empty());
    }

    #[test]
    fn test_unclosed_string_and_brackets() {
        let out = close("{\"user\": {\"name\": \"Linus\", \"role\": \"admin");
        assert_eq!(
            out.fixed_text,
            "{\"user\": {\"name\": \"Linus\", \"role\": \"admin\"}}"
        );
        let kinds: Vec<PatchKind> = out.patches.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PatchKind::UnclosedString,
                PatchKind::MissingCloser,
                PatchKind::MissingCloser
            ]
        );
    }

    #[test]
    fn test_trailing_comma_stripped() {
        let out = close("[1, 2, ");
        assert_eq!(out.fixed_text, "[1, 2]");
        let kinds: Vec<PatchKind> = out.patches.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PatchKind::TrailingComma, PatchKind::MissingCloser]);
    }

    #[test]
    fn test_comma_inside_string_kept() {
        let out = close("[\"a,");
        assert_eq!(out.fixed_text, "[\"a,\"]");
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let out = close("{\"msg\": \"say \\\"hi");
        assert_eq!(out.fixed_text, "{\"msg\": \"say \\\"hi\"}");
    }

    #[test]
    fn test_dangling_escape_completed() {
        let out = close("\"abc\\");
        assert_eq!(out.fixed_text, "\"abc\\\\\"");
        assert_eq!(out.patches.len(), 1);
        assert_eq!(out.patches[0].kind, PatchKind::UnclosedString);
    }

    #[test]
    fn test_mismatched_closer_never_popped() {
        // '}' doesn't match the expected ']', so it's copied through and the
        // stack unwinds over it.
        let out = close("{\"a\": [1}");
        assert_eq!(out.fixed_text, "{\"a\": [1}]}");
    }

    #[test]
    fn test_deep_nesting() {
        let opens = "[".repeat(300);
        let out = close(&opens);
        assert_eq!(out.fixed_text.len(), 600);
        assert!(out.fixed_text.ends_with(&"]".repeat(300)));
        assert_eq!(out.patches.len(), 300);
    }

    #[test]
    fn test_patch_positions() {
        let out = close("{\"a\": \"b");
        // Quote appended at byte 8, closer at byte 9.
        assert_eq!(out.patches[0].position, 8);
        assert_eq!(out.patches[1].position, 9);
    }

    #[test]
    fn test_empty_input() {
        let out = close("");
        assert_eq!(out.fixed_text, "");
        assert!(out.patches.is_empty());
    }
}
