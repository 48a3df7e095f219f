use core::str::FromStr;

use thompson_nfa::Automaton;

use crate::error::Error;

/// A compiled regular expression.
///
/// A `Regex` owns the automaton compiled from its pattern. Compiling a new
/// pattern into an existing `Regex` (see [`Regex::set_pattern`]) releases the
/// previous automaton only once the new one compiled successfully.
///
/// Matching takes `&self`, so a `Regex` can be shared between threads and
/// used concurrently.
///
/// # Example
///
/// ```
/// use thompson_regex::Regex;
///
/// let re = Regex::new("(a|b)*c").unwrap();
/// assert!(re.is_match("abac"));
/// assert!(!re.is_match("abacx"));
/// ```
///
/// # Empty regex
///
/// [`Regex::default`] is a handle that has not been given a pattern yet. Its
/// pattern is the empty string but it holds no automaton, so it matches
/// nothing, not even the empty string. Compiling `""` with [`Regex::new`] or
/// [`Regex::set_pattern`] gives a regex that matches only the empty string.
///
/// ```
/// use thompson_regex::Regex;
///
/// let mut re = Regex::default();
/// assert!(!re.is_match(""));
/// re.set_pattern("").unwrap();
/// assert!(re.is_match(""));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Regex {
    pattern: String,
    automaton: Automaton,
}

impl Regex {
    /// Compiles a pattern.
    ///
    /// The empty pattern is valid and matches only the empty string.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern is malformed, for example when its
    /// parentheses are unbalanced or an operator lacks an operand.
    ///
    /// ```
    /// use thompson_regex::{CompileError, Malformed, Regex};
    ///
    /// let err = Regex::new("a|").unwrap_err();
    /// assert_eq!(
    ///     err.kind(),
    ///     &CompileError::MalformedPattern(Malformed::MissingOperand('|')),
    /// );
    /// ```
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        let automaton = compile(pattern)?;
        Ok(Regex { pattern: pattern.to_string(), automaton })
    }

    /// Recompiles this `Regex` from a new pattern.
    ///
    /// On error the `Regex` keeps its previous pattern and automaton.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        let automaton = compile(pattern)?;
        self.automaton.clear();
        debug!("recompiled {:?} as {:?}", self.pattern, pattern);

        self.automaton = automaton;
        self.pattern = pattern.to_string();
        Ok(())
    }

    /// Returns the pattern exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if and only if the whole of `input` matches.
    ///
    /// ```
    /// use thompson_regex::Regex;
    ///
    /// let re = Regex::new("ab*").unwrap();
    /// assert!(re.is_match("abbb"));
    /// assert!(!re.is_match("xabbb"));
    /// assert!(!re.is_match("abbbx"));
    /// ```
    pub fn is_match(&self, input: &str) -> bool {
        self.automaton.is_match(input)
    }

    /// The compiled automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

fn compile(pattern: &str) -> Result<Automaton, Error> {
    thompson_nfa::compile(pattern).map_err(|kind| Error::new(pattern, kind))
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    fn from_str(s: &str) -> Result<Regex, Error> {
        Regex::new(s)
    }
}

impl core::fmt::Display for Regex {
    /// Shows the original regular expression.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
