//! Thread-safe capture of values emitted by callbacks under test.
//!
//! # Examples
//!
//! ```
//! use config_overrides_test_helpers::recorder::Recorder;
//!
//! let recorder = Recorder::default();
//! let sink = recorder.clone();
//! let callback = move |value: &str| sink.push(value.to_owned());
//! callback("first");
//! callback("second");
//! assert_eq!(recorder.take(), vec!["first", "second"]);
//! assert!(recorder.take().is_empty());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared, cloneable buffer of recorded values.
#[derive(Debug)]
pub struct Recorder<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Recorder<T> {
    /// Appends a value.
    pub fn push(&self, value: T) {
        self.entries.lock().push(value);
    }

    /// Number of values recorded and not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is waiting to be taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Removes and returns every recorded value in arrival order.
    #[must_use]
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.entries.lock())
    }
}
