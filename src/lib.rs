/*!
This crate provides a small regular expression engine built on Thompson's
construction. A pattern is compiled into a nondeterministic finite automaton,
and an input is tested by simulating every state the automaton could be in
at once, which takes time linear in the input length.

# Syntax

| Syntax  | Meaning                              |
|---------|--------------------------------------|
| `x`     | the literal character `x`            |
| `xy`    | `x` followed by `y`                  |
| `x\|y`  | `x` or `y`                           |
| `x*`    | zero or more `x`                     |
| `(x)`   | grouping                             |

Every character other than `|`, `*`, `(` and `)` is a literal. There are no
escapes, classes, anchors or counted repetitions. Precedence, from tightest
to loosest: `*`, concatenation, `|`.

# Matching is whole-string

[`Regex::is_match`] only reports a match when the *entire* input is matched,
as if the pattern were wrapped in `^` and `$`.

```
use thompson_regex::Regex;

let re = Regex::new("((Hello)|(Hi)) Worlds*").unwrap();
assert!(re.is_match("Hi Worldsss"));
assert!(!re.is_match("Hi Worlds!"));
```

# Crate features

* **logging** - Emits compilation and simulation details through the
  [`log`](https://docs.rs/log) facade.
* **cli** - Builds the interactive `thompson-regex` binary. Enabled by
  default, and enables `logging`.
*/

#![deny(missing_docs)]

pub use crate::error::Error;
pub use crate::regex::Regex;

pub use thompson_nfa::{Automaton, CompileError, Malformed};

#[macro_use]
mod macros;

mod error;
mod regex;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
