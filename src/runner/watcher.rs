// teenyc - a tiny BASIC to C transpiler
// Copyright (C) 2026  The teenyc authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! File watching for recompile-on-save.
//!
//! This module provides the `SourceWatcher` struct for monitoring a source
//! file and triggering recompilation on changes.
//!
//! # Editor Compatibility
//!
//! Different editors save files differently:
//! - **Direct write**: Truncate and write (vim with `set nobackup nowritebackup`)
//! - **Atomic save**: Write to temp file, then rename (VS Code, most modern editors)
//! - **Backup save**: Rename original to backup, write new file
//!
//! The watcher handles all these patterns by watching the parent directory
//! and filtering events for the target file.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::RunnerError;

/// Debounce window for file change events.
/// Multiple rapid changes within this window are collapsed into one.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Watches a source file for changes.
///
/// Uses the `notify` crate to monitor file system events and trigger
/// recompilation when the source file is modified.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use teenyc::runner::SourceWatcher;
///
/// let watcher = SourceWatcher::new(Path::new("main.teeny")).expect("Failed to create watcher");
///
/// println!("Watching for changes...");
/// watcher.wait_for_change().expect("Watch error");
/// println!("File changed!");
/// ```
pub struct SourceWatcher {
    /// The underlying file system watcher.
    _watcher: RecommendedWatcher,
    /// Receiver for file system events.
    rx: Receiver<Result<Event, notify::Error>>,
    /// Canonical path being watched.
    path: PathBuf,
}

impl SourceWatcher {
    /// Create a new SourceWatcher for the given source file.
    ///
    /// Watches the file for modifications. The watcher monitors the parent
    /// directory to catch atomic save operations (write to temp + rename).
    ///
    /// # Arguments
    ///
    /// * `path` - Source file path to watch
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::WatchError` if the path cannot be resolved or
    /// the watcher cannot be created.
    pub fn new(path: &Path) -> Result<Self, RunnerError> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(tx)
            .map_err(|e| RunnerError::WatchError(format!("Failed to create watcher: {}", e)))?;

        let canonical = path.canonicalize().map_err(|e| {
            RunnerError::WatchError(format!("Cannot resolve path {}: {}", path.display(), e))
        })?;

        // Watch the parent directory to catch atomic saves
        if let Some(parent) = canonical.parent() {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .map_err(|e| {
                    RunnerError::WatchError(format!("Failed to watch {}: {}", parent.display(), e))
                })?;
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            path: canonical,
        })
    }

    /// Get the watched path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for a file change event.
    ///
    /// Blocks until the watched file is modified. Implements debouncing to
    /// collapse multiple rapid changes into a single event.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` when a change is detected, or an error if watching fails.
    pub fn wait_for_change(&self) -> Result<(), RunnerError> {
        loop {
            // Block waiting for an event
            let event = self
                .rx
                .recv()
                .map_err(|e| RunnerError::WatchError(format!("Watch channel closed: {}", e)))?
                .map_err(|e| RunnerError::WatchError(format!("Watch error: {}", e)))?;

            // Check if this event touches the watched file
            if !self.is_relevant_event(&event) {
                continue;
            }

            // Wait for debounce period to collapse rapid changes
            std::thread::sleep(DEBOUNCE_DURATION);

            // Drain any events that came during the debounce window
            self.drain_pending_events();

            return Ok(());
        }
    }

    /// Check if an event is relevant to the watched file.
    fn is_relevant_event(&self, event: &Event) -> bool {
        // Only care about modifications and creates (for atomic saves)
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) => {}
            _ => return false,
        }

        for event_path in &event.paths {
            // Try to canonicalize for comparison
            let canonical = event_path
                .canonicalize()
                .unwrap_or_else(|_| event_path.clone());

            if canonical == self.path {
                return true;
            }

            // Also check filename match (for atomic saves where the path
            // might differ briefly)
            if let (Some(event_name), Some(watched_name)) =
                (canonical.file_name(), self.path.file_name())
            {
                if event_name == watched_name
                    && canonical.parent().is_some()
                    && canonical.parent() == self.path.parent()
                {
                    return true;
                }
            }
        }

        false
    }

    /// Drain any pending events from the channel.
    fn drain_pending_events(&self) {
        while self.rx.try_recv().is_ok() {
            // Discard event
        }
    }
}
