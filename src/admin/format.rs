//! Report format resolution
//!
//! A format is a list of column tokens such as `Fe,Fl` or `Federation%-20`.
//! Each token is matched against one table shared by every entity type and
//! resolved to a [`FieldDescriptor`].

use super::option::Keyword;
use thiserror::Error;

/// The attribute a report column shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Cluster,
    Federation,
    Features,
    FedState,
    Flags,
}

/// A resolved report column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Column width; positive right-justifies, negative left-justifies
    pub width: i32,
}

impl FieldDescriptor {
    pub fn abs_width(&self) -> usize {
        self.width.unsigned_abs() as usize
    }

    pub fn left_justified(&self) -> bool {
        self.width < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Bad column width in format field '{0}'")]
    BadWidth(String),
}

struct FieldSpec {
    keyword: Keyword,
    kind: FieldKind,
    width: i32,
}

const FIELD_TABLE: &[FieldSpec] = &[
    FieldSpec { keyword: Keyword::new("Cluster", 2), kind: FieldKind::Cluster, width: 10 },
    FieldSpec { keyword: Keyword::new("Federation", 2), kind: FieldKind::Federation, width: 10 },
    FieldSpec { keyword: Keyword::new("Features", 3), kind: FieldKind::Features, width: 20 },
    FieldSpec { keyword: Keyword::new("FedState", 4), kind: FieldKind::FedState, width: 12 },
    FieldSpec { keyword: Keyword::new("Flags", 2), kind: FieldKind::Flags, width: 20 },
];

/// Resolve one column token, honouring an optional `%width` suffix
pub fn resolve_field(token: &str) -> Result<FieldDescriptor, FormatError> {
    let token = token.trim();
    let (object, width) = match token.split_once('%') {
        Some((object, width)) => {
            let width = width
                .parse::<i32>()
                .ok()
                .filter(|w| *w != 0)
                .ok_or_else(|| FormatError::BadWidth(token.to_string()))?;
            (object, Some(width))
        }
        None => (token, None),
    };

    let spec = FIELD_TABLE
        .iter()
        .find(|spec| spec.keyword.matches(object))
        .ok_or_else(|| FormatError::UnknownField(token.to_string()))?;

    Ok(FieldDescriptor {
        name: spec.keyword.name,
        kind: spec.kind,
        width: width.unwrap_or(spec.width),
    })
}

/// Resolve a whole format list, substituting `default_format` when empty
///
/// # Examples
/// ```rust
/// use acctmgr::admin::format::{resolve_format, FieldKind};
///
/// let fields = resolve_format(&[], "Fe,Fl").unwrap();
/// assert_eq!(fields[0].kind, FieldKind::Federation);
/// assert_eq!(fields[1].kind, FieldKind::Flags);
/// ```
pub fn resolve_format(
    tokens: &[String],
    default_format: &str,
) -> Result<Vec<FieldDescriptor>, FormatError> {
    if tokens.is_empty() {
        return default_format.split(',').map(resolve_field).collect();
    }
    tokens.iter().map(|token| resolve_field(token)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let fields = resolve_format(&[], "Fe,Fl").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Federation");
        assert_eq!(fields[0].width, 10);
        assert_eq!(fields[1].name, "Flags");
        assert_eq!(fields[1].width, 20);
    }

    #[test]
    fn test_abbreviations_and_case() {
        assert_eq!(resolve_field("fed").unwrap().kind, FieldKind::Federation);
        assert_eq!(resolve_field("FEA").unwrap().kind, FieldKind::Features);
        assert_eq!(resolve_field("feds").unwrap().kind, FieldKind::FedState);
        assert_eq!(resolve_field("cl").unwrap().kind, FieldKind::Cluster);
    }

    #[test]
    fn test_width_override() {
        let field = resolve_field("Federation%-25").unwrap();
        assert_eq!(field.width, -25);
        assert_eq!(field.abs_width(), 25);
        assert!(field.left_justified());

        let field = resolve_field("Fl%5").unwrap();
        assert_eq!(field.width, 5);
        assert!(!field.left_justified());
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(
            resolve_field("Bogus"),
            Err(FormatError::UnknownField("Bogus".into()))
        );
        assert_eq!(resolve_field("F"), Err(FormatError::UnknownField("F".into())));
        assert_eq!(resolve_field("Fe%x"), Err(FormatError::BadWidth("Fe%x".into())));
        assert_eq!(resolve_field("Fe%0"), Err(FormatError::BadWidth("Fe%0".into())));
    }

    #[test]
    fn test_resolve_format_reports_first_unknown() {
        let tokens = vec!["Fe".to_string(), "Nope".to_string()];
        assert_eq!(
            resolve_format(&tokens, "Fe,Fl").unwrap_err().to_string(),
            "Unknown field 'Nope'"
        );
    }
}
