use serde::{Deserialize, Serialize};

/// A single structural alteration applied while repairing a fragment.
///
/// Patches are recorded in the order they were applied: string closing and
/// comma trimming before bracket closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairPatch {
    pub kind: PatchKind,
    /// Byte offset in the repaired text where the alteration took effect.
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchKind {
    UnclosedString,
    TrailingComma,
    MissingCloser,
}

/// Outcome of running the repair engine over a (possibly truncated) fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairResult {
    /// The input with any structural completions applied.
    pub fixed_text: String,
    /// Present unless `fixed_text` still fails to parse (degenerate input,
    /// e.g. mismatched closer types).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_value: Option<serde_json::Value>,
    /// True when any repair step fired, i.e. the source stream may not be
    /// finished yet.
    pub is_partial: bool,
    pub patches: Vec<RepairPatch>,
}
