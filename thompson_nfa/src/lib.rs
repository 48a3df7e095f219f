//! Thompson NFA construction and simulation
//!
//! This library compiles a small regular expression language (literal
//! characters, concatenation, alternation `|`, Kleene closure `*` and
//! grouping `()`) into a nondeterministic finite automaton using Thompson's
//! construction, and decides whether an input matches the automaton from
//! start to end.
//!
//! The pipeline is:
//! - implicit concatenations are made explicit ([`compiler::explicit_concat`])
//! - the token stream is put in postfix order with the shunting-yard
//!   algorithm ([`compiler::to_postfix`])
//! - the postfix stream is folded into a single [`Fragment`] on a stack
//! - the [`Matcher`] simulates the automaton by stepping epsilon closures,
//!   which runs in time proportional to the automaton size times the input
//!   length
//!
//! States live in an index arena ([`NFA`]), so the cyclic graphs produced by
//! closures need no reference counting.
//!
//! ```
//! let automaton = thompson_nfa::compile("(a|b)*c").unwrap();
//! assert!(automaton.is_match("abbac"));
//! assert!(!automaton.is_match("abba"));
//! ```

#[macro_use]
mod macros;

pub mod compiler;
pub mod fragment;
pub mod matcher;
pub mod nfa;

pub use compiler::{compile, Compiler, RegexToken};
pub use fragment::{Automaton, Fragment};
pub use matcher::Matcher;
pub use nfa::{State, StateId, NFA};

/// The result of compiling a pattern into a Thompson NFA
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The pattern is not a well formed expression of the grammar
    MalformedPattern(Malformed),
}

/// The specific way in which a pattern is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// A `(` was never closed.
    UnmatchedOpenParen,
    /// A `)` has no `(` to close.
    UnmatchedCloseParen,
    /// A group `()` with nothing inside.
    EmptyGroup,
    /// The operator (`*`, `|` or the concatenation) lacks an operand.
    MissingOperand(char),
    /// The fold ended with this many fragments instead of one.
    DanglingFragments(usize),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::MalformedPattern(why) => write!(f, "malformed pattern: {}", why),
        }
    }
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::UnmatchedOpenParen => write!(f, "unclosed group, missing ')'"),
            Malformed::UnmatchedCloseParen => write!(f, "unopened group, unexpected ')'"),
            Malformed::EmptyGroup => write!(f, "empty group '()'"),
            Malformed::MissingOperand(op) => write!(f, "operator '{}' is missing an operand", op),
            Malformed::DanglingFragments(n) => {
                write!(f, "expected one expression, found {}", n)
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<Malformed> for CompileError {
    fn from(why: Malformed) -> CompileError {
        CompileError::MalformedPattern(why)
    }
}
