// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Where the human-readable CT diagnostics go.

use parking_lot::Mutex;
use std::io::Write;

/// Receives diagnostic text. Each call carries one or more whole lines,
/// without the trailing newline.
pub trait DiagnosticSink: core::fmt::Debug + Send + Sync {
    fn emit(&self, text: &str);
}

/// Writes diagnostics to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, text: &str) {
        // One write under the lock so concurrent handshakes don't split lines.
        let mut buf = String::with_capacity(text.len() + 1);
        buf.push_str(text);
        buf.push('\n');
        let _ = std::io::stderr().lock().write_all(buf.as_bytes());
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.blocks
            .lock()
            .iter()
            .flat_map(|block| block.lines().map(str::to_string))
            .collect()
    }

    /// Returns true if any emitted line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.blocks.lock().iter().any(|block| block.contains(needle))
    }

    pub fn clear(&self) {
        self.blocks.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, text: &str) {
        self.blocks.lock().push(text.to_string());
    }
}
