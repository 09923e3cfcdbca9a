//! Error types produced by the interpreter and its built-in namespaces.

use std::io;
use std::path::PathBuf;

/// Errors that abort interpretation.
///
/// Every variant is fatal for a script run: the interpreter does not retry
/// and does not skip the failing line.
#[derive(Debug, thiserror::Error)]
pub enum CapyError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("unsupported CapyScript version: {requested}. Current version is {current}.")]
    UnsupportedVersion { requested: String, current: String },

    #[error("invalid file type: {} (expected a .capy file)", .0.display())]
    InvalidFileType(PathBuf),

    #[error("{command}: expected arguments `{usage}`")]
    ArgumentCount {
        command: &'static str,
        usage: &'static str,
    },

    #[error("{command}: expected {expected}, found `{found}`")]
    ArgumentKind {
        command: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{0}: division by zero")]
    DivisionByZero(&'static str),

    #[error("{0}: end of input")]
    EndOfInput(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A failure while running a script, tagged with the 1-based line it happened on.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: CapyError,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CapyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_display() {
        let e = CapyError::UnknownCommand("bogus.cmd".into());
        assert_eq!(format!("{e}"), "unknown command: bogus.cmd");
    }

    #[test]
    fn unsupported_version_display() {
        let e = CapyError::UnsupportedVersion {
            requested: "0.9.0".into(),
            current: "1.0.0".into(),
        };
        assert_eq!(
            format!("{e}"),
            "unsupported CapyScript version: 0.9.0. Current version is 1.0.0."
        );
    }

    #[test]
    fn invalid_file_type_display() {
        let e = CapyError::InvalidFileType(PathBuf::from("hello.txt"));
        assert_eq!(
            format!("{e}"),
            "invalid file type: hello.txt (expected a .capy file)"
        );
    }

    #[test]
    fn argument_kind_display() {
        let e = CapyError::ArgumentKind {
            command: "math.add",
            expected: "a number",
            found: "abc".into(),
        };
        assert_eq!(format!("{e}"), "math.add: expected a number, found `abc`");
    }

    #[test]
    fn script_error_carries_line() {
        let e = ScriptError {
            line: 3,
            source: CapyError::ModuleNotFound("nope".into()),
        };
        assert_eq!(format!("{e}"), "line 3: module not found: nope");
    }
}
