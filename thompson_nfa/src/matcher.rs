use std::collections::HashSet;

use crate::fragment::Automaton;
use crate::nfa::StateId;

/// A matcher that simulates a Thompson NFA against input
///
/// The simulation keeps the set of states the automaton could be in. It
/// starts from the epsilon closure of the start state and, for every input
/// character, moves along matching labeled edges and takes the epsilon
/// closure of the result. Each step touches every state at most once, so
/// matching is linear in the input length for a fixed automaton, and epsilon
/// cycles cannot cause it to loop.
pub struct Matcher<'a> {
    automaton: &'a Automaton,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given automaton
    pub fn new(automaton: &'a Automaton) -> Self {
        Self { automaton }
    }

    /// Check if the entire input matches
    pub fn is_match(&self, input: &str) -> bool {
        let Some(start) = self.automaton.start() else {
            return false;
        };
        let nfa = self.automaton.nfa();

        let mut current_states = nfa.epsilon_closure([start]);
        for current_char in input.chars() {
            let next_states = self.step_states(&current_states, current_char);
            trace!(
                "on {:?}: {} states -> {} states",
                current_char,
                current_states.len(),
                next_states.len()
            );
            if next_states.is_empty() {
                return false;
            }
            current_states = next_states;
        }

        nfa.is_accepting(&current_states)
    }

    /// Step from current states using a character, closing over epsilon
    /// edges afterwards
    fn step_states(&self, current_states: &HashSet<StateId>, current_char: char) -> HashSet<StateId> {
        let nfa = self.automaton.nfa();
        nfa.epsilon_closure(nfa.step(current_states, current_char))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    fn check(pattern: &str, accepted: &[&str], rejected: &[&str]) {
        let automaton = compile(pattern).unwrap();
        let matcher = Matcher::new(&automaton);
        for input in accepted {
            assert!(matcher.is_match(input), "{:?} should match {:?}", pattern, input);
        }
        for input in rejected {
            assert!(!matcher.is_match(input), "{:?} should not match {:?}", pattern, input);
        }
    }

    #[test]
    fn test_simple_char_match() {
        check("a", &["a"], &["", "b", "aa"]);
    }

    #[test]
    fn test_concat() {
        check("ab", &["ab"], &["a", "b", "ba", "abc"]);
    }

    #[test]
    fn test_alternation() {
        check("a|b", &["a", "b"], &["ab", "", "c"]);
    }

    #[test]
    fn test_closure() {
        check("a*", &["", "a", "aaaa"], &["ab", "b"]);
    }

    #[test]
    fn test_grouping() {
        check("(a|b)c", &["ac", "bc"], &["a", "c", "abc"]);
    }

    #[test]
    fn test_empty_pattern() {
        check("", &[""], &["a", " "]);
    }

    #[test]
    fn test_nested_closures() {
        check("(a*b*)*", &["", "ab", "ba", "bbbaaab"], &["c", "abc"]);
        check("((a|b)*c)*", &["", "c", "abc", "cc", "bacabc"], &["a", "ab", "cab"]);
    }

    #[test]
    fn test_worked_example() {
        check(
            "((Hello)|(Hi)) Worlds*",
            &["Hello World", "Hi World", "Hello Worlds", "Hi Worldsss"],
            &["Hello Worl", "hi world", "Hello Worldx", ""],
        );
    }

    #[test]
    fn test_non_ascii_literals() {
        check("é(ß|λ)*", &["é", "éßλß"], &["e", "éx"]);
    }

    #[test]
    fn test_no_exponential_blowup() {
        // (a|a)* followed by a mismatch defeats naive backtracking.
        let pattern = "(a|a)*(a|a)*(a|a)*b";
        let input = "a".repeat(5_000);
        check(pattern, &["aaab", "b"], &[input.as_str()]);
    }

    #[test]
    fn test_empty_automaton_matches_nothing() {
        let automaton = Automaton::empty();
        let matcher = Matcher::new(&automaton);
        assert!(!matcher.is_match(""));
        assert!(!matcher.is_match("a"));
    }
}
