use thompson_nfa::CompileError;

/// An error that occurred while compiling a pattern.
///
/// The error keeps the offending pattern so that it can be reported as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pattern: String,
    kind: CompileError,
}

impl Error {
    pub(crate) fn new(pattern: &str, kind: CompileError) -> Error {
        Error { pattern: pattern.to_string(), kind }
    }

    /// The pattern that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// What was wrong with the pattern.
    pub fn kind(&self) -> &CompileError {
        &self.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "failed to compile {:?}: {}", self.pattern, self.kind)
    }
}
