//! # prooflint_rules
//!
//! The builtin pattern rule set: issue categories, matchers and fixes.
//!
//! Rules are plain data. Each category holds a list of `PatternEntry`
//! values whose `Matcher` implementations find spans in a sentence; the
//! checker in `prooflint_core` decides what to do with the matches.

mod builtin;
mod category;
mod fix;
mod matcher;
mod ruleset;

pub use category::CategoryId;
pub use fix::{FixAction, inherit_case};
pub use matcher::{
    CounterpartMatcher, MatchSpan, Matcher, PhraseMatcher, RegexMatcher, RepeatedWordMatcher,
    UnbalancedQuoteMatcher,
};
pub use ruleset::{Category, PatternEntry, RuleSet};
