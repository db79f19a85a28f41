//! Tally the outcome of an import into an [ImportSummary].

use crate::{ParsedRow, WriteOutcome};

/// A row which did not make it to the store, and why.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowNote {
    pub line: u64,
    pub reason: String,
}

impl std::fmt::Display for RowNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// The result of one import run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub success_count: usize,
    pub error_count: usize,
    /// Well-formed rows, whether or not they were written.
    pub valid_rows: usize,
    /// Rejected rows first, then failed writes, each in line order.
    pub notes: Vec<RowNote>,
}

/// How an import run should be reported to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportStatus {
    Success,
    PartialSuccess,
    Failure,
    /// Nothing in the input was worth sending to the store.
    NoValidRows,
}

impl ImportSummary {
    /// Build the summary from the parsed rows and the outcome of writing the valid ones.
    pub fn aggregate(parsed: &[ParsedRow], written: &[WriteOutcome]) -> Self {
        let rejections = parsed.iter().filter_map(|row| {
            let reason = row.outcome.as_ref().err()?;
            Some(RowNote {
                line: row.line,
                reason: reason.to_string(),
            })
        });
        let failures = written.iter().filter_map(|outcome| {
            let err = outcome.result.as_ref().err()?;
            Some(RowNote {
                line: outcome.line,
                reason: err.to_string(),
            })
        });
        let notes: Vec<_> = rejections.chain(failures).collect();

        Self {
            success_count: written.iter().filter(|outcome| outcome.result.is_ok()).count(),
            error_count: notes.len(),
            valid_rows: parsed.iter().filter(|row| row.outcome.is_ok()).count(),
            notes,
        }
    }

    pub fn status(&self) -> ImportStatus {
        if self.valid_rows == 0 {
            ImportStatus::NoValidRows
        } else if self.success_count == 0 {
            ImportStatus::Failure
        } else if self.error_count == 0 {
            ImportStatus::Success
        } else {
            ImportStatus::PartialSuccess
        }
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status() {
            ImportStatus::Success => write!(f, "imported {} marks", self.success_count),
            ImportStatus::PartialSuccess => write!(
                f,
                "imported {} marks, {} rows failed",
                self.success_count, self.error_count
            ),
            ImportStatus::Failure => {
                write!(f, "import failed, {} rows failed", self.error_count)
            }
            ImportStatus::NoValidRows => f.write_str("no valid rows found in file"),
        }
    }
}
