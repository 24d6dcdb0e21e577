//! Failure stages and their exit codes
//!
//! A script driving albumctl tells which part of the run failed only from
//! the exit status.

use std::fmt;
use std::process::ExitCode;

/// Part of the run a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration or pool creation
    Connect,
    /// The diagnostic greeting query
    Diagnostic,
    /// Any album operation, migration or output write
    Operation,
}

impl Stage {
    pub fn code(self) -> u8 {
        match self {
            Self::Connect => 1,
            Self::Diagnostic => 2,
            Self::Operation => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Diagnostic => "diagnostic query",
            Self::Operation => "operation",
        })
    }
}

/// Error tagged with the stage it happened in
#[derive(Debug)]
pub struct StageError {
    pub stage: Stage,
    pub source: anyhow::Error,
}

impl StageError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.stage.code())
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole cause chain on one line; a cause already quoted at the end of
        // the previous message is skipped
        write!(f, "{}", self.stage)?;
        let mut previous = String::new();
        for cause in self.source.chain() {
            let message = cause.to_string();
            if !previous.is_empty() && previous.ends_with(&message) {
                continue;
            }
            write!(f, ": {message}")?;
            previous = message;
        }
        Ok(())
    }
}

/// Attach a stage to any error convertible into `anyhow::Error`
pub trait StageExt<T> {
    fn stage(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E> StageExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn stage(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|err| StageError {
            stage,
            source: err.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use albumctl_store::StoreError;
    use anyhow::Context;

    #[test]
    fn codes_are_distinct_per_stage() {
        assert_eq!(Stage::Connect.code(), 1);
        assert_eq!(Stage::Diagnostic.code(), 2);
        assert_eq!(Stage::Operation.code(), 3);
    }

    #[test]
    fn display_is_single_line_with_causes() {
        let err = Err::<(), _>(StoreError::NotFound { id: 9 })
            .context("lookup failed")
            .stage(Stage::Operation)
            .unwrap_err();

        let line = err.to_string();
        assert_eq!(line, "operation: lookup failed: album 9: no such album");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn driver_cause_is_printed_once() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = Err::<(), _>(StoreError::query(
            "albums_by_artist",
            "\"John Coltrane\"",
            sqlx::Error::Io(io),
        ))
        .context("find albums failed")
        .stage(Stage::Operation)
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "operation: find albums failed: albums_by_artist \"John Coltrane\": \
             error communicating with database: connection reset"
        );
    }
}
