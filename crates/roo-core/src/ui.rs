//! The display/prompt collaborator the engine is handed instead of
//! reaching for ambient terminal state. The CLI provides the real
//! terminal implementation; tests script one.

use crate::error::Result;

/// Capability set the engine needs from its front end. Prompt methods
/// return `Ok(None)` when the user cancels; cancellation is an outcome,
/// not an error.
pub trait Ui {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);

    /// Single choice among `items`. Returns the chosen index.
    fn prompt_list(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Multi-select among `items`. Returns the chosen indices.
    fn prompt_checkbox(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>>;

    /// Yes/no confirmation with a default answer.
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;
}

/// Discards messages and cancels every prompt. For non-interactive
/// library callers that have no front end to report through.
pub struct SilentUi;

impl Ui for SilentUi {
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}

    fn prompt_list(&self, _prompt: &str, _items: &[String]) -> Result<Option<usize>> {
        Ok(None)
    }

    fn prompt_checkbox(&self, _prompt: &str, _items: &[String]) -> Result<Option<Vec<usize>>> {
        Ok(None)
    }

    fn prompt_confirm(&self, _prompt: &str, _default: bool) -> Result<Option<bool>> {
        Ok(None)
    }
}
