//! Accounting records exchanged with the storage service

use crate::admin::option::push_unique;
use crate::admin::{AdminEntity, EntityCondition, FieldKind, FieldValue, Reportable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Federation flag bits
///
/// The accounting service defines no federation flags yet, so every set bit
/// is shown by its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FederationFlags(pub u32);

impl FederationFlags {
    pub const NONE: FederationFlags = FederationFlags(0);

    /// One display name per set bit
    pub fn names(self) -> Vec<Cow<'static, str>> {
        (0..u32::BITS)
            .map(|bit| 1u32 << bit)
            .filter(|mask| self.0 & mask != 0)
            .map(|mask| Cow::Owned(format!("{:#x}", mask)))
            .collect()
    }
}

impl fmt::Display for FederationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Federation {
    pub name: String,
    #[serde(default)]
    pub flags: FederationFlags,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Federation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: FederationFlags::NONE,
            deleted: false,
        }
    }
}

impl Reportable for Federation {
    fn field(&self, kind: FieldKind) -> FieldValue<'_> {
        match kind {
            FieldKind::Federation => FieldValue::Text(&self.name),
            FieldKind::Flags => FieldValue::Flags(self.flags.names()),
            _ => FieldValue::Absent,
        }
    }
}

impl AdminEntity for Federation {
    type Condition = FederationCondition;

    const NOUN: &'static str = "federation";
    const COLLECTION: &'static str = "federations";
    const HEADING: &'static str = "Federation(s)";
    const DEFAULT_FORMAT: &'static str = "Fe,Fl";

    fn name(&self) -> &str {
        &self.name
    }

    fn with_name(name: &str) -> Self {
        Federation::new(name)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![("Name", self.name.clone())]
    }
}

/// Which federations a query selects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FederationCondition {
    /// `None` until a name is given; never `Some` and empty
    pub names: Option<Vec<String>>,
    pub with_deleted: bool,
}

impl FederationCondition {
    /// Add the comma separated names in `value`
    ///
    /// Returns the new condition and whether any name was added.
    pub fn with_names(self, value: &str) -> (Self, bool) {
        let mut names = self.names.unwrap_or_default();
        let added = push_unique(&mut names, value) > 0;
        let names = if names.is_empty() { None } else { Some(names) };
        (Self { names, ..self }, added)
    }

    pub fn with_deleted(self) -> Self {
        Self { with_deleted: true, ..self }
    }
}

impl EntityCondition<Federation> for FederationCondition {
    fn for_names(names: Vec<String>) -> Self {
        let names = if names.is_empty() { None } else { Some(names) };
        Self { names, with_deleted: false }
    }

    fn matches(&self, record: &Federation) -> bool {
        if record.deleted && !self.with_deleted {
            return false;
        }
        match &self.names {
            Some(names) => names.iter().any(|name| name.eq_ignore_ascii_case(&record.name)),
            None => true,
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(names) = &self.names {
            pairs.push(("name", names.join(",")));
        }
        if self.with_deleted {
            pairs.push(("with_deleted", "true".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lazily_allocated() {
        let condition = FederationCondition::default();
        assert_eq!(condition.names, None);

        let (condition, added) = condition.with_names("");
        assert!(!added);
        assert_eq!(condition.names, None);

        let (condition, added) = condition.with_names("a,b");
        assert!(added);
        let (condition, added) = condition.with_names("B,c");
        assert!(added);
        assert_eq!(condition.names, Some(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn test_condition_matching() {
        let live = Federation::new("Fed1");
        let gone = Federation { deleted: true, ..Federation::new("fed2") };

        let all = FederationCondition::default();
        assert!(all.matches(&live));
        assert!(!all.matches(&gone));
        assert!(all.clone().with_deleted().matches(&gone));

        let named = FederationCondition::for_names(vec!["fed1".into()]);
        assert!(named.matches(&live));
        assert!(!named.matches(&Federation::new("fed3")));
    }

    #[test]
    fn test_query_pairs() {
        let (condition, _) = FederationCondition::default().with_names("a,b");
        let condition = condition.with_deleted();
        assert_eq!(
            condition.query_pairs(),
            vec![("name", "a,b".to_string()), ("with_deleted", "true".to_string())]
        );
        assert!(FederationCondition::default().query_pairs().is_empty());
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(FederationFlags::NONE.to_string(), "");
        assert!(FederationFlags::NONE.names().is_empty());
        assert_eq!(FederationFlags(0b101).to_string(), "0x1,0x4");
    }

    #[test]
    fn test_federation_json_shape() {
        let federation: Federation = serde_json::from_str(r#"{"name":"fed1"}"#).unwrap();
        assert_eq!(federation, Federation::new("fed1"));
        assert_eq!(
            serde_json::to_string(&federation).unwrap(),
            r#"{"name":"fed1","flags":0}"#
        );
    }
}
