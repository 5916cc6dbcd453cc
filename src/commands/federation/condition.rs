use crate::admin::clause::{Arity, ClauseAction, ClauseRules, KeywordRule};
use crate::admin::option::Keyword;
use crate::api::models::FederationCondition;

fn add_names(condition: FederationCondition, value: &str) -> (FederationCondition, bool) {
    condition.with_names(value)
}

fn set_with_deleted(condition: FederationCondition) -> FederationCondition {
    condition.with_deleted()
}

/// Keywords accepted in a federation `where` clause
pub static FEDERATION_CLAUSE: ClauseRules<FederationCondition> = ClauseRules {
    rules: &[
        KeywordRule::new(Keyword::new("Set", 3), Arity::Any, ClauseAction::Boundary),
        KeywordRule::new(Keyword::new("Where", 5), Arity::Bare, ClauseAction::Introducer),
        KeywordRule::new(
            Keyword::new("WithDeleted", 5),
            Arity::Bare,
            ClauseAction::Flag(set_with_deleted),
        ),
        KeywordRule::new(
            Keyword::new("Names", 1),
            Arity::Valued,
            ClauseAction::Assignment(add_names),
        ),
        KeywordRule::new(
            Keyword::new("Federations", 3),
            Arity::Valued,
            ClauseAction::Assignment(add_names),
        ),
        KeywordRule::new(Keyword::new("Format", 2), Arity::Valued, ClauseAction::Format),
    ],
    fallback: Some(ClauseAction::Assignment(add_names)),
};
