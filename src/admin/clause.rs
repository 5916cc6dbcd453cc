//! Conditional clause parsing
//!
//! A clause is a run of `Keyword[=value]` arguments that narrows which
//! records a command operates on. Each entity type supplies a static
//! [`ClauseRules`] table; [`parse_clause`] is the single dispatch routine
//! that walks the arguments against it.

use super::option::{Keyword, OptionToken, split_list, split_option};
use log::debug;
use thiserror::Error;

/// Folds one value into a condition; the flag reports whether the value
/// contributed anything.
pub type ValueHandler<C> = fn(C, &str) -> (C, bool);

/// Whether a rule applies to bare tokens, valued tokens or both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Bare,
    Valued,
    Any,
}

#[derive(Debug)]
pub enum ClauseAction<C> {
    /// Ends the clause without consuming the token (`Set`)
    Boundary,
    /// Introduces a clause and carries no value (`Where`)
    Introducer,
    /// Appends report columns (`Format`)
    Format,
    /// Sets a flag on the condition
    Flag(fn(C) -> C),
    /// A condition-style keyword
    Condition(ValueHandler<C>),
    /// An assignment-style keyword
    Assignment(ValueHandler<C>),
}

impl<C> Clone for ClauseAction<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ClauseAction<C> {}

#[derive(Debug)]
pub struct KeywordRule<C> {
    pub keyword: Keyword,
    pub arity: Arity,
    pub action: ClauseAction<C>,
}

impl<C> Clone for KeywordRule<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for KeywordRule<C> {}

impl<C> KeywordRule<C> {
    pub const fn new(keyword: Keyword, arity: Arity, action: ClauseAction<C>) -> Self {
        Self { keyword, arity, action }
    }

    fn applies_to(&self, token: &OptionToken<'_>) -> bool {
        let arity_ok = match self.arity {
            Arity::Bare => token.is_bare(),
            Arity::Valued => !token.is_bare(),
            Arity::Any => true,
        };
        arity_ok && self.keyword.matches(token.keyword)
    }
}

/// Keyword table for one entity type, consulted in order
#[derive(Debug)]
pub struct ClauseRules<C: 'static> {
    pub rules: &'static [KeywordRule<C>],
    /// Applied to bare tokens that match no rule
    pub fallback: Option<ClauseAction<C>>,
}

impl<C> ClauseRules<C> {
    fn lookup(&self, token: &OptionToken<'_>) -> Option<ClauseAction<C>> {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(token))
            .map(|rule| rule.action)
            .or(if token.is_bare() { self.fallback } else { None })
    }
}

/// Which keyword categories appeared in a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Empty = 0,
    Condition = 1,
    Assignment = 2,
    Mixed = 3,
}

impl ClauseKind {
    fn from_flags(condition: bool, assignment: bool) -> Self {
        match (condition, assignment) {
            (true, true) => ClauseKind::Mixed,
            (false, true) => ClauseKind::Assignment,
            (true, false) => ClauseKind::Condition,
            (false, false) => ClauseKind::Empty,
        }
    }

    /// Numeric disambiguation code, 0 through 3
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error("Unknown condition: {0}\n Use keyword 'set' to modify value")]
    UnknownCondition(String),
}

/// Result of one [`parse_clause`] pass
#[derive(Debug, Clone)]
pub struct ClauseOutcome<C> {
    pub filter: C,
    /// Report columns requested through `Format`, in order
    pub format: Vec<String>,
    /// Index to resume scanning from
    pub next: usize,
    pub kind: ClauseKind,
    pub errors: Vec<ClauseError>,
}

/// Fold `args[start..]` into `filter` according to `rules`
///
/// Scanning stops at a boundary keyword, leaving `next` pointing at it, or
/// at the first unknown keyword, leaving `next` just past it so the caller
/// can resume and collect further diagnostics.
///
/// # Examples
/// ```rust
/// use acctmgr::api::models::FederationCondition;
/// use acctmgr::commands::federation::FEDERATION_CLAUSE;
/// use acctmgr::admin::clause::{parse_clause, ClauseKind};
///
/// let args: Vec<String> = ["where", "Names=a", "Set", "x=1"].iter().map(|s| s.to_string()).collect();
/// let outcome = parse_clause(&FEDERATION_CLAUSE, &args, 0, FederationCondition::default());
/// assert_eq!(outcome.next, 2);
/// assert_eq!(outcome.kind, ClauseKind::Assignment);
/// ```
pub fn parse_clause<C>(
    rules: &ClauseRules<C>,
    args: &[String],
    start: usize,
    filter: C,
) -> ClauseOutcome<C> {
    let mut filter = filter;
    let mut format = Vec::new();
    let mut errors = Vec::new();
    let mut condition_set = false;
    let mut assignment_set = false;
    let mut index = start;

    while index < args.len() {
        let token = split_option(&args[index]);

        match rules.lookup(&token) {
            Some(ClauseAction::Boundary) => break,
            Some(ClauseAction::Introducer) => {}
            Some(ClauseAction::Format) => {
                format.extend(split_list(token.value_or_raw()).into_iter().map(str::to_string));
            }
            Some(ClauseAction::Flag(set_flag)) => filter = set_flag(filter),
            Some(ClauseAction::Condition(handler)) => {
                let (next, added) = handler(filter, token.value_or_raw());
                filter = next;
                condition_set |= added;
            }
            Some(ClauseAction::Assignment(handler)) => {
                let (next, added) = handler(filter, token.value_or_raw());
                filter = next;
                assignment_set |= added;
            }
            None => {
                debug!("Unknown condition keyword: {}", token.raw);
                errors.push(ClauseError::UnknownCondition(token.raw.to_string()));
                index += 1;
                break;
            }
        }
        index += 1;
    }

    let kind = ClauseKind::from_flags(condition_set, assignment_set);
    debug!("Parsed clause from {} to {}: kind {:?}", start, index, kind);

    ClauseOutcome {
        filter,
        format,
        next: index,
        kind,
        errors,
    }
}
