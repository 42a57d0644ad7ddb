use scrub_core::RepairResult;
use scrub_extract::Extractor;
use tracing::debug;

use crate::kernel::{KernelKind, RepairKernel};

/// Front door for repair: optionally isolates the JSON-shaped region first,
/// runs the configured kernel, then parses the completed text.
pub struct RepairEngine {
    kernel: Box<dyn RepairKernel>,
    extractor: Option<Extractor>,
}

impl RepairEngine {
    /// Engine with the default kernel and no extraction step.
    pub fn new() -> Self {
        Self {
            kernel: KernelKind::default().build(),
            extractor: None,
        }
    }

    pub fn with_kernel(mut self, kernel: Box<dyn RepairKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    /// Run the extractor over raw model output before repairing.
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Repair `text` into valid JSON. Never fails: un-repairable input comes
    /// back with `parsed_value` absent and the best-effort `fixed_text`.
    pub fn repair(&self, text: &str) -> RepairResult {
        let source = match &self.extractor {
            Some(extractor) => extractor.extract(text),
            None => text.to_string(),
        };

        let repair = self.kernel.close(&source);
        let parsed_value: Option<serde_json::Value> = serde_json::from_str(&repair.fixed_text).ok();
        let is_partial = !repair.patches.is_empty();

        if parsed_value.is_none() {
            debug!(
                patches = repair.patches.len(),
                "repaired text still fails to parse"
            );
        }

        RepairResult {
            fixed_text: repair.fixed_text,
            parsed_value,
            is_partial,
            patches: repair.patches,
        }
    }
}

impl Default for RepairEngine {
    fn default() -> Self {
        Self::new()
    }
}
