//! Keyword/value option splitting
//!
//! Administration commands take free-form arguments of the form
//! `Keyword[=value[,value...]]`. Keywords may be abbreviated down to a
//! per-keyword minimum length and are matched case-insensitively.

/// Assignment operator found between keyword and value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOp {
    /// `Keyword=value`
    Set,
    /// `Keyword+=value`
    Add,
    /// `Keyword-=value`
    Remove,
}

/// One command-line argument split into keyword prefix and value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionToken<'a> {
    /// The whole argument as typed
    pub raw: &'a str,
    /// Everything before the operator, or the whole argument when bare
    pub keyword: &'a str,
    pub op: Option<OptionOp>,
    /// Everything after the operator; `Some("")` for a dangling `=`
    pub value: Option<&'a str>,
}

impl<'a> OptionToken<'a> {
    /// True when the argument carried no operator at all
    pub fn is_bare(&self) -> bool {
        self.value.is_none()
    }

    /// The value, or the whole argument for a bare token
    pub fn value_or_raw(&self) -> &'a str {
        self.value.unwrap_or(self.raw)
    }
}

/// Split an argument at its first `=`, `+=` or `-=`
///
/// # Examples
/// ```rust
/// use acctmgr::admin::option::{split_option, OptionOp};
///
/// let token = split_option("Names+=a,b");
/// assert_eq!(token.keyword, "Names");
/// assert_eq!(token.op, Some(OptionOp::Add));
/// assert_eq!(token.value, Some("a,b"));
/// ```
pub fn split_option(arg: &str) -> OptionToken<'_> {
    let bytes = arg.as_bytes();
    for (pos, byte) in bytes.iter().enumerate() {
        let (op, op_len) = match byte {
            b'=' => (OptionOp::Set, 1),
            b'+' if bytes.get(pos + 1) == Some(&b'=') => (OptionOp::Add, 2),
            b'-' if bytes.get(pos + 1) == Some(&b'=') => (OptionOp::Remove, 2),
            _ => continue,
        };
        return OptionToken {
            raw: arg,
            keyword: &arg[..pos],
            op: Some(op),
            value: Some(&arg[pos + op_len..]),
        };
    }

    OptionToken {
        raw: arg,
        keyword: arg,
        op: None,
        value: None,
    }
}

/// A keyword together with the shortest abbreviation it accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub name: &'static str,
    pub min_len: usize,
}

impl Keyword {
    pub const fn new(name: &'static str, min_len: usize) -> Self {
        Self { name, min_len }
    }

    /// Whether `prefix` is an accepted abbreviation of this keyword
    ///
    /// The prefix must be at least `min_len` long, no longer than the
    /// keyword itself, and equal to the keyword's leading characters
    /// ignoring ASCII case.
    pub fn matches(&self, prefix: &str) -> bool {
        let len = prefix.len();
        len >= self.min_len
            && len <= self.name.len()
            && self.name.as_bytes()[..len].eq_ignore_ascii_case(prefix.as_bytes())
    }
}

/// Split a comma separated value list
///
/// A single pair of enclosing quotes is stripped from the value first and a
/// trailing comma is ignored. Interior empty items are kept so that callers
/// can reject blank names explicitly.
pub fn split_list(value: &str) -> Vec<&str> {
    let value = strip_quotes(value);
    if value.is_empty() {
        return Vec::new();
    }
    let value = value.strip_suffix(',').unwrap_or(value);
    value.split(',').collect()
}

/// Append the items of `value` to `list`, skipping case-insensitive
/// duplicates. Returns how many items were added.
pub fn push_unique(list: &mut Vec<String>, value: &str) -> usize {
    let mut added = 0;
    for item in split_list(value) {
        if list.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            continue;
        }
        list.push(item.to_string());
        added += 1;
    }
    added
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
