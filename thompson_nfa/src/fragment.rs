use std::collections::HashMap;
use std::fmt;

use crate::matcher::Matcher;
use crate::nfa::{State, StateId, NFA};

/// Fragment of an NFA with a single start and a single accept state.
///
/// A fragment is the unit of Thompson's construction. Its `accept` state is
/// the only accepting state reachable from `start`. Fragments are not
/// `Clone`: the composition operators on [`NFA`] consume their operands, so
/// the states of a fragment that was absorbed into a larger one can only be
/// released through the larger fragment.
#[derive(Debug, PartialEq, Eq)]
pub struct Fragment {
    start: StateId,
    accept: StateId,
}

impl Fragment {
    /// The entry state
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The only accepting state
    pub fn accept(&self) -> StateId {
        self.accept
    }
}

impl NFA {
    /// A fragment matching exactly the symbol `c`: `start -c-> accept`.
    pub fn literal(&mut self, c: char) -> Fragment {
        let start = self.add_state(false);
        let accept = self.add_state(true);
        self.add_symbol_transition(start, c, accept);
        Fragment { start, accept }
    }

    /// A fragment matching only the empty string: `start -ε-> accept`.
    pub fn epsilon(&mut self) -> Fragment {
        let start = self.add_state(false);
        let accept = self.add_state(true);
        self.add_epsilon_transition(start, accept);
        Fragment { start, accept }
    }

    /// `lhs` followed by `rhs`.
    pub fn concat(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        self.check_fragment(&lhs);
        self.check_fragment(&rhs);

        self.set_accepting(lhs.accept, false);
        self.add_epsilon_transition(lhs.accept, rhs.start);
        Fragment { start: lhs.start, accept: rhs.accept }
    }

    /// Either `lhs` or `rhs`.
    pub fn alternate(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        self.check_fragment(&lhs);
        self.check_fragment(&rhs);

        let start = self.add_state(false);
        let accept = self.add_state(true);
        self.add_epsilon_transition(start, lhs.start);
        self.add_epsilon_transition(start, rhs.start);

        self.set_accepting(lhs.accept, false);
        self.set_accepting(rhs.accept, false);
        self.add_epsilon_transition(lhs.accept, accept);
        self.add_epsilon_transition(rhs.accept, accept);
        Fragment { start, accept }
    }

    /// Zero or more repetitions of `inner` (Kleene closure).
    pub fn close(&mut self, inner: Fragment) -> Fragment {
        self.check_fragment(&inner);

        let start = self.add_state(false);
        let accept = self.add_state(true);
        self.add_epsilon_transition(start, inner.start);
        self.add_epsilon_transition(start, accept);

        self.set_accepting(inner.accept, false);
        self.add_epsilon_transition(inner.accept, inner.start);
        self.add_epsilon_transition(inner.accept, accept);
        Fragment { start, accept }
    }

    /// Deep copy a fragment of `source` into this arena.
    ///
    /// Every state reachable from the fragment is copied exactly once, no
    /// matter how many paths lead to it, and every edge is copied with its
    /// multiplicity. The copy shares no state with the original.
    ///
    /// Returns `None`, leaving this arena untouched, when the fragment's
    /// start or accept state is not live in `source`.
    pub fn copy_fragment(&mut self, source: &NFA, fragment: &Fragment) -> Option<Fragment> {
        let snapshot = source.snapshot(fragment);
        self.install_copy(snapshot, fragment)
    }

    /// Deep copy a fragment that lives in this arena.
    ///
    /// Returns `None` when the fragment's states are not live here.
    pub fn duplicate(&mut self, fragment: &Fragment) -> Option<Fragment> {
        let snapshot = self.snapshot(fragment);
        self.install_copy(snapshot, fragment)
    }

    /// Release every state reachable from the fragment's start, each once.
    /// Returns the number of states released.
    pub fn teardown(&mut self, fragment: Fragment) -> usize {
        let reachable = self.reachable(&[fragment.start, fragment.accept]);
        let released = self.release(&reachable);
        trace!("released {} states from fragment {:?}", released, fragment);
        released
    }

    fn snapshot(&self, fragment: &Fragment) -> Vec<(StateId, State)> {
        self.reachable(&[fragment.start, fragment.accept])
            .into_iter()
            .filter_map(|id| self.get(id).map(|state| (id, state.clone())))
            .collect()
    }

    fn install_copy(
        &mut self,
        snapshot: Vec<(StateId, State)>,
        fragment: &Fragment,
    ) -> Option<Fragment> {
        let owns = |id: StateId| snapshot.iter().any(|(old, _)| *old == id);
        if !owns(fragment.start) || !owns(fragment.accept) {
            return None;
        }

        // First allocate every copy so that back edges have a target.
        let mut copies: HashMap<StateId, StateId> = HashMap::with_capacity(snapshot.len());
        for (old, state) in &snapshot {
            copies.insert(*old, self.add_state(state.is_accepting()));
        }

        for (old, state) in &snapshot {
            let new = copies[old];
            for (symbol, targets) in state.symbol_transitions() {
                for target in targets {
                    if let Some(&to) = copies.get(target) {
                        self.add_symbol_transition(new, symbol, to);
                    }
                }
            }
            for target in state.epsilon_transitions() {
                if let Some(&to) = copies.get(target) {
                    self.add_epsilon_transition(new, to);
                }
            }
        }

        let copy = Fragment {
            start: *copies.get(&fragment.start)?,
            accept: *copies.get(&fragment.accept)?,
        };
        debug_assert_eq!(self.accepting_states(&copy), vec![copy.accept]);
        Some(copy)
    }

    /// In debug builds, check that `accept` is the only accepting state
    /// reachable from `start`.
    fn check_fragment(&self, fragment: &Fragment) {
        debug_assert_eq!(
            self.accepting_states(fragment),
            vec![fragment.accept],
            "fragment {:?} must have exactly one accepting state",
            fragment,
        );
    }
}

/// A compiled Thompson NFA: an arena together with its root fragment.
///
/// The automaton owns every state reachable from the root. An automaton
/// without a root is the empty automaton, which matches nothing. Cloning an
/// automaton deep copies the reachable graph into a fresh, compact arena.
#[derive(Debug, Default)]
pub struct Automaton {
    nfa: NFA,
    fragment: Option<Fragment>,
}

impl Automaton {
    /// The automaton with no states
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an arena and the fragment that owns its states.
    ///
    /// The fragment must have been built in `nfa`.
    pub(crate) fn new(nfa: NFA, fragment: Fragment) -> Self {
        Self { nfa, fragment: Some(fragment) }
    }

    /// Whether there is no root fragment
    pub fn is_empty(&self) -> bool {
        self.fragment.is_none()
    }

    /// The backing arena
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }

    /// The root fragment, if any
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Starting state
    pub fn start(&self) -> Option<StateId> {
        self.fragment.as_ref().map(Fragment::start)
    }

    /// Number of states reachable from the root
    pub fn state_count(&self) -> usize {
        self.fragment
            .as_ref()
            .map_or(0, |f| self.nfa.reachable(&[f.start, f.accept]).len())
    }

    /// Tear the automaton down, leaving it empty. Returns the number of
    /// states released; clearing an empty automaton releases nothing.
    pub fn clear(&mut self) -> usize {
        match self.fragment.take() {
            Some(fragment) => self.nfa.teardown(fragment),
            None => 0,
        }
    }

    /// Check if the entire input is accepted
    pub fn is_match(&self, input: &str) -> bool {
        Matcher::new(self).is_match(input)
    }
}

impl Clone for Automaton {
    fn clone(&self) -> Automaton {
        let mut nfa = NFA::new();
        let fragment = self.fragment.as_ref().and_then(|f| nfa.copy_fragment(&self.nfa, f));
        Automaton { nfa, fragment }
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.fragment.as_ref() else {
            return writeln!(f, "empty automaton");
        };
        writeln!(f, "start: {}, accept: {}", root.start, root.accept)?;
        for id in self.nfa.reachable(&[root.start, root.accept]) {
            let Some(state) = self.nfa.get(id) else { continue };
            let mut edges = Vec::new();
            for (symbol, targets) in state.symbol_transitions() {
                for target in targets {
                    edges.push(format!("{:?} -> {}", symbol, target));
                }
            }
            for target in state.epsilon_transitions() {
                edges.push(format!("ε -> {}", target));
            }
            if state.is_accepting() {
                edges.push("MATCH".to_string());
            }
            writeln!(f, "{:>4}: {}", id, edges.join(", "))?;
        }
        Ok(())
    }
}
