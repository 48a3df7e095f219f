use std::fmt;

use crate::{
    fragment::{Automaton, Fragment},
    nfa::NFA,
    CompileError, CompileResult, Malformed,
};

/// Represents a token in a regular expression.
///
/// Concatenation has no spelling in a pattern; [`explicit_concat`] inserts
/// it. Because it is a distinct variant rather than a reserved character,
/// every character that is not `|`, `*`, `(` or `)` is a literal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RegexToken {
    /// The Kleene star operator (`*`), for zero or more repetitions.
    Kleene,
    /// The concatenation operator (implicitly added), for joining expressions.
    Concat,
    /// The union operator (`|`).
    Union,
    /// An opening parenthesis (`(`).
    OpenParen,
    /// A closing parenthesis (`)`).
    CloseParen,
    /// A literal character.
    Character(char),
}

impl RegexToken {
    /// Returns the precedence of an operator. Higher numbers bind tighter.
    fn precedence(&self) -> u8 {
        match self {
            RegexToken::Kleene => 3,
            RegexToken::Concat => 2,
            RegexToken::Union => 1,
            RegexToken::OpenParen | RegexToken::CloseParen | RegexToken::Character(_) => 0,
        }
    }

    /// The character this token is written as. Concatenation renders as `·`.
    pub fn as_char(&self) -> char {
        match self {
            RegexToken::Kleene => '*',
            RegexToken::Concat => '·',
            RegexToken::Union => '|',
            RegexToken::OpenParen => '(',
            RegexToken::CloseParen => ')',
            RegexToken::Character(c) => *c,
        }
    }
}

impl From<char> for RegexToken {
    fn from(value: char) -> Self {
        match value {
            '*' => RegexToken::Kleene,
            '|' => RegexToken::Union,
            '(' => RegexToken::OpenParen,
            ')' => RegexToken::CloseParen,
            c => RegexToken::Character(c),
        }
    }
}

impl fmt::Display for RegexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Inserts explicit concatenation operators into the pattern.
///
/// A concatenation goes before every character except the first, unless the
/// previous character opens a new operand (`|`, `(`) or the current one only
/// makes sense attached to what precedes it (`|`, `*`, `)`). Nothing is
/// validated here; malformed input surfaces later.
pub fn explicit_concat(pattern: &str) -> Vec<RegexToken> {
    let mut output = Vec::with_capacity(pattern.len() * 2);
    let mut previous: Option<char> = None;

    for current in pattern.chars() {
        if let Some(previous) = previous {
            let opens = matches!(previous, '|' | '(');
            let attaches = matches!(current, '|' | '*' | ')');
            if !opens && !attaches {
                output.push(RegexToken::Concat);
            }
        }
        output.push(current.into());
        previous = Some(current);
    }

    output
}

/// The pattern with explicit concatenations, rendered as a string.
pub fn explicit_concat_string(pattern: &str) -> String {
    explicit_concat(pattern).iter().map(RegexToken::as_char).collect()
}

/// Implements the Shunting-yard algorithm to convert infix to postfix.
#[derive(Debug, Default)]
struct ShuntingYard {
    /// The resulting postfix expression.
    output: Vec<RegexToken>,
    /// The stack used to temporarily hold operators and open parentheses.
    operator_stack: Vec<RegexToken>,
    /// The token processed last, to detect `()`.
    previous: Option<RegexToken>,
}

impl ShuntingYard {
    fn process(&mut self, current: RegexToken) -> CompileResult<()> {
        match current {
            RegexToken::Character(_) => self.output.push(current),
            RegexToken::OpenParen => self.operator_stack.push(current),
            RegexToken::CloseParen => {
                if self.previous == Some(RegexToken::OpenParen) {
                    return Err(Malformed::EmptyGroup.into());
                }
                loop {
                    match self.operator_stack.pop() {
                        Some(RegexToken::OpenParen) => break,
                        Some(operator) => self.output.push(operator),
                        None => return Err(Malformed::UnmatchedCloseParen.into()),
                    }
                }
            }
            operator => {
                // Equal precedence pops too, which makes binary operators
                // left associative.
                while let Some(&top) = self.operator_stack.last() {
                    if top == RegexToken::OpenParen || top.precedence() < operator.precedence() {
                        break;
                    }
                    self.output.push(top);
                    self.operator_stack.pop();
                }
                self.operator_stack.push(operator);
            }
        }
        self.previous = Some(current);
        Ok(())
    }

    fn finish(mut self) -> CompileResult<Vec<RegexToken>> {
        while let Some(operator) = self.operator_stack.pop() {
            if operator == RegexToken::OpenParen {
                return Err(Malformed::UnmatchedOpenParen.into());
            }
            self.output.push(operator);
        }
        Ok(self.output)
    }
}

/// Converts explicit-concatenation tokens into postfix order.
///
/// The output never contains parentheses.
pub fn to_postfix(tokens: &[RegexToken]) -> CompileResult<Vec<RegexToken>> {
    let mut st = ShuntingYard::default();
    for &token in tokens {
        st.process(token)?;
    }
    st.finish()
}

/// Compiler that folds a pattern into a Thompson NFA
#[derive(Debug, Default)]
pub struct Compiler {
    nfa: NFA,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { nfa: NFA::new() }
    }

    /// Compile a pattern into an automaton.
    ///
    /// The empty pattern compiles to an automaton accepting only the empty
    /// string. On error nothing is returned; the partially built arena is
    /// dropped with the compiler.
    pub fn compile(mut self, pattern: &str) -> CompileResult<Automaton> {
        if pattern.is_empty() {
            let fragment = self.nfa.epsilon();
            return Ok(Automaton::new(self.nfa, fragment));
        }

        let postfix = to_postfix(&explicit_concat(pattern))?;
        debug!(
            "postfix of {:?}: {}",
            pattern,
            postfix.iter().map(RegexToken::as_char).collect::<String>()
        );

        let fragment = self.fold(&postfix)?;
        debug_assert_eq!(self.nfa.accepting_states(&fragment), vec![fragment.accept()]);
        debug!("compiled {:?} into {} states", pattern, self.nfa.len());
        Ok(Automaton::new(self.nfa, fragment))
    }

    /// Thompson's construction over a postfix token stream.
    fn fold(&mut self, postfix: &[RegexToken]) -> CompileResult<Fragment> {
        let mut stack: Vec<Fragment> = Vec::new();

        for &token in postfix {
            trace!("fold '{}' with {} fragments on the stack", token, stack.len());
            let fragment = match token {
                RegexToken::Character(c) => self.nfa.literal(c),
                RegexToken::Kleene => {
                    let inner = pop_operand(&mut stack, token)?;
                    self.nfa.close(inner)
                }
                RegexToken::Concat => {
                    // The right operand was pushed last.
                    let rhs = pop_operand(&mut stack, token)?;
                    let lhs = pop_operand(&mut stack, token)?;
                    self.nfa.concat(lhs, rhs)
                }
                RegexToken::Union => {
                    let rhs = pop_operand(&mut stack, token)?;
                    let lhs = pop_operand(&mut stack, token)?;
                    self.nfa.alternate(lhs, rhs)
                }
                RegexToken::OpenParen | RegexToken::CloseParen => {
                    unreachable!("parentheses never reach the postfix stream")
                }
            };
            stack.push(fragment);
        }

        let fragment = stack.pop().ok_or(Malformed::DanglingFragments(0))?;
        if !stack.is_empty() {
            return Err(Malformed::DanglingFragments(stack.len() + 1).into());
        }
        Ok(fragment)
    }
}

fn pop_operand(stack: &mut Vec<Fragment>, operator: RegexToken) -> CompileResult<Fragment> {
    stack
        .pop()
        .ok_or(CompileError::MalformedPattern(Malformed::MissingOperand(operator.as_char())))
}

/// Compile a pattern with a fresh [`Compiler`].
pub fn compile(pattern: &str) -> CompileResult<Automaton> {
    Compiler::new().compile(pattern)
}

/// Unit tests for concatenation insertion, Shunting-yard and the fold.
#[cfg(test)]
mod tests {
    use super::*;
    use RegexToken::*;

    fn postfix(pattern: &str) -> String {
        to_postfix(&explicit_concat(pattern))
            .unwrap()
            .iter()
            .map(RegexToken::as_char)
            .collect()
    }

    fn malformed(pattern: &str) -> Malformed {
        match compile(pattern) {
            Err(CompileError::MalformedPattern(why)) => why,
            Ok(_) => panic!("{:?} should not compile", pattern),
        }
    }

    #[test]
    fn test_or() {
        assert_eq!(explicit_concat("a|b"), vec![Character('a'), Union, Character('b')]);
    }

    #[test]
    fn test_basic_concat() {
        assert_eq!(explicit_concat("ab"), vec![Character('a'), Concat, Character('b')]);
    }

    #[test]
    fn test_basic_concat_after_unary() {
        let expected = vec![
            Character('a'),
            Concat,
            Character('b'),
            Kleene,
            Concat,
            Character('c'),
        ];
        assert_eq!(explicit_concat("ab*c"), expected);
    }

    #[test]
    fn test_parens() {
        let expected = vec![
            OpenParen,
            Character('a'),
            CloseParen,
            Concat,
            OpenParen,
            Character('b'),
            CloseParen,
        ];
        assert_eq!(explicit_concat("(a)(b)"), expected);
    }

    #[test]
    fn test_plus_is_a_literal() {
        assert_eq!(explicit_concat_string("a+b"), "a·+·b");
        assert_eq!(explicit_concat_string("((Hello)|(Hi)) Worlds*"), "((H·e·l·l·o)|(H·i))· ·W·o·r·l·d·s*");
    }

    #[test]
    fn test_empty_pattern_has_no_tokens() {
        assert!(explicit_concat("").is_empty());
        assert!(to_postfix(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_sy1() {
        assert_eq!(postfix("a*|b"), "a*b|");
    }

    #[test]
    fn test_sy2() {
        assert_eq!(postfix("a*c|b"), "a*c·b|");
    }

    #[test]
    fn test_sy3() {
        assert_eq!(postfix("a*(c|b)"), "a*cb|·");
    }

    #[test]
    fn test_sy4() {
        assert_eq!(postfix("(a*)(c|b)"), "a*cb|·");
    }

    #[test]
    fn test_sy5() {
        assert_eq!(postfix("ab*c"), "ab*·c·");
    }

    #[test]
    fn test_sy6() {
        assert_eq!(postfix("a(b|c)d"), "abc|·d·");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(postfix("abc"), "ab·c·");
        assert_eq!(postfix("a|b|c"), "ab|c|");
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(
            to_postfix(&explicit_concat("(a")),
            Err(CompileError::MalformedPattern(Malformed::UnmatchedOpenParen))
        );
        assert_eq!(
            to_postfix(&explicit_concat("a)")),
            Err(CompileError::MalformedPattern(Malformed::UnmatchedCloseParen))
        );
    }

    #[test]
    fn test_malformed_patterns() {
        assert_eq!(malformed("("), Malformed::UnmatchedOpenParen);
        assert_eq!(malformed(")"), Malformed::UnmatchedCloseParen);
        assert_eq!(malformed("*"), Malformed::MissingOperand('*'));
        assert_eq!(malformed("|"), Malformed::MissingOperand('|'));
        assert_eq!(malformed("a|"), Malformed::MissingOperand('|'));
        assert_eq!(malformed("*a"), Malformed::MissingOperand('*'));
        assert_eq!(malformed("()"), Malformed::EmptyGroup);
        assert_eq!(malformed("a(|b)c"), Malformed::MissingOperand('·'));
    }

    #[test]
    fn test_state_counts() {
        assert_eq!(compile("a").unwrap().state_count(), 2);
        assert_eq!(compile("ab").unwrap().state_count(), 4);
        assert_eq!(compile("a|b").unwrap().state_count(), 6);
        assert_eq!(compile("a*").unwrap().state_count(), 4);
        assert_eq!(compile("(a|b)*c").unwrap().state_count(), 10);
        assert_eq!(compile("").unwrap().state_count(), 2);
    }

    #[test]
    fn test_single_accepting_state() {
        for pattern in ["a", "ab", "a|b", "a**", "((Hello)|(Hi)) Worlds*", "(a*|b*)*"] {
            let automaton = compile(pattern).unwrap();
            let fragment = automaton.fragment().unwrap();
            assert_eq!(
                automaton.nfa().accepting_states(fragment),
                vec![fragment.accept()],
                "{:?}",
                pattern
            );
        }
    }
}
