use std::collections::{BTreeMap, HashSet};

use crate::fragment::Fragment;

/// A state ID in the NFA
pub type StateId = usize;

/// A single node of a Thompson NFA.
///
/// A state carries its acceptance flag, its labeled edges (a symbol may fan
/// out to several destinations) and its epsilon edges. The flag and edges
/// are only changed by the fragment operators on [`NFA`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    accepting: bool,
    symbol_transitions: BTreeMap<char, Vec<StateId>>,
    epsilon_transitions: Vec<StateId>,
}

impl State {
    /// Create a state with no outgoing edges
    pub fn new(accepting: bool) -> Self {
        State { accepting, ..State::default() }
    }

    /// Whether reaching this state with no input left is a match
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Destinations reachable by consuming `symbol`
    pub fn transitions(&self, symbol: char) -> &[StateId] {
        self.symbol_transitions.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All labeled edges, ordered by symbol
    pub fn symbol_transitions(&self) -> impl Iterator<Item = (char, &[StateId])> + '_ {
        self.symbol_transitions.iter().map(|(&symbol, targets)| (symbol, targets.as_slice()))
    }

    /// Destinations reachable without consuming input
    pub fn epsilon_transitions(&self) -> &[StateId] {
        &self.epsilon_transitions
    }

    /// Every destination of this state, labeled edges first
    fn successors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.symbol_transitions
            .values()
            .flatten()
            .chain(self.epsilon_transitions.iter())
            .copied()
    }
}

/// An arena holding the states of one or more Thompson NFA fragments.
///
/// States are addressed by [`StateId`]. Slots released by
/// [`NFA::teardown`] are put on a free list and reused by
/// later calls to [`NFA::add_state`].
#[derive(Debug, Clone, Default)]
pub struct NFA {
    /// State slots; `None` marks a released slot
    states: Vec<Option<State>>,
    /// Released slots available for reuse
    free: Vec<StateId>,
}

impl NFA {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self { states: Vec::new(), free: Vec::new() }
    }

    /// Add a new state and return its ID
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        let state = State::new(accepting);
        match self.free.pop() {
            Some(id) => {
                self.states[id] = Some(state);
                id
            }
            None => {
                self.states.push(Some(state));
                self.states.len() - 1
            }
        }
    }

    /// Look up a live state
    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.get_mut(id).and_then(Option::as_mut)
    }

    /// Number of live states
    pub fn len(&self) -> usize {
        self.states.len() - self.free.len()
    }

    /// Whether the arena holds no live state
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots, live or released
    pub fn capacity(&self) -> usize {
        self.states.len()
    }

    /// Add a labeled edge `from -symbol-> to`
    pub fn add_symbol_transition(&mut self, from: StateId, symbol: char, to: StateId) {
        if let Some(state) = self.get_mut(from) {
            state.symbol_transitions.entry(symbol).or_default().push(to);
        }
    }

    /// Add an epsilon edge `from -ε-> to`
    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        if let Some(state) = self.get_mut(from) {
            state.epsilon_transitions.push(to);
        }
    }

    /// Set or clear the acceptance flag of a state
    pub fn set_accepting(&mut self, id: StateId, accepting: bool) {
        if let Some(state) = self.get_mut(id) {
            state.accepting = accepting;
        }
    }

    /// Every live state reachable from `roots` through any edge, each listed
    /// once, in depth-first discovery order.
    pub fn reachable(&self, roots: &[StateId]) -> Vec<StateId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<StateId> = roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(state) = self.get(id) else { continue };
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            // Reversed so that the first edge is explored first.
            let successors: Vec<StateId> = state.successors().collect();
            for &next in successors.iter().rev() {
                if !seen.contains(&next) {
                    stack.push(next);
                }
            }
        }

        order
    }

    /// Get epsilon closure of a set of states
    ///
    /// Each state is visited at most once, so epsilon cycles introduced by
    /// closures terminate.
    pub fn epsilon_closure<I>(&self, seeds: I) -> HashSet<StateId>
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut closure = HashSet::new();
        let mut stack = Vec::new();
        for id in seeds {
            if self.get(id).is_some() && closure.insert(id) {
                stack.push(id);
            }
        }

        while let Some(id) = stack.pop() {
            let Some(state) = self.get(id) else { continue };
            for &next in &state.epsilon_transitions {
                if self.get(next).is_some() && closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Destinations of every `symbol` edge leaving a state in `states`
    pub fn step(&self, states: &HashSet<StateId>, symbol: char) -> HashSet<StateId> {
        states
            .iter()
            .filter_map(|&id| self.get(id))
            .flat_map(|state| state.transitions(symbol).iter().copied())
            .collect()
    }

    /// Check if any state in the set is accepting
    pub fn is_accepting(&self, states: &HashSet<StateId>) -> bool {
        states
            .iter()
            .any(|&id| self.get(id).map_or(false, State::is_accepting))
    }

    /// The accepting states reachable from a fragment's start.
    ///
    /// For a well formed fragment this is exactly `[fragment.accept()]`.
    pub fn accepting_states(&self, fragment: &Fragment) -> Vec<StateId> {
        self.reachable(&[fragment.start()])
            .into_iter()
            .filter(|&id| self.get(id).map_or(false, State::is_accepting))
            .collect()
    }

    /// Release a set of slots, returning how many were live.
    pub(crate) fn release(&mut self, ids: &[StateId]) -> usize {
        let mut released = 0;
        for &id in ids {
            if let Some(slot) = self.states.get_mut(id) {
                if slot.take().is_some() {
                    self.free.push(id);
                    released += 1;
                }
            }
        }
        released
    }
}
