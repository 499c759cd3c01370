//! Lenient-input warnings with colored terminal output.
//!
//! Style input is consumed permissively: a bad selector or an unknown property
//! is dropped, never fatal. Each drop is reported here once per unique message
//! so a document that repeats the same mistake does not flood stderr.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about dropped or unsupported input (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("CSS", "dropping unknown property 'colour'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Telegraph {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if the exact warning has been emitted since the last clear.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before laying out a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "recorded message");
        assert!(was_warned("Test", "recorded message"));
        assert!(!was_warned("Test", "never emitted"));
    }

    #[test]
    fn test_warnings_are_keyed_by_component() {
        warn_once("Alpha", "shared text");
        assert!(was_warned("Alpha", "shared text"));
        assert!(!was_warned("Beta", "shared text"));
    }
}
