//! Best-effort clipboard access.

use log::warn;

/// Puts `text` on the system clipboard.
///
/// Failures are logged and reported as `false`; a missing clipboard never
/// aborts the run.
pub fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not copy to clipboard: {e}");
            false
        }
    }
}
