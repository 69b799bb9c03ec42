use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Scope signals of an admin user, as delivered by the session/profile payload.
///
/// Only the four fields that take part in scope resolution live here. Every field
/// decodes leniently: numbers, booleans, arrays and objects are turned into their
/// text form instead of failing the whole payload, and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeUser {
    #[serde(default, deserialize_with = "lenient_text")]
    pub scope_type: Option<ScopeText>,
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub scope_center_id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub center_id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_system_super_admin: Option<bool>,
}

impl ScopeUser {
    pub fn with_scope_type(mut self, scope_type: impl Into<ScopeText>) -> Self {
        self.scope_type = Some(scope_type.into());
        self
    }

    pub fn with_scope_center_id(mut self, id: impl Into<Identifier>) -> Self {
        self.scope_center_id = Some(id.into());
        self
    }

    pub fn with_center_id(mut self, id: impl Into<Identifier>) -> Self {
        self.center_id = Some(id.into());
        self
    }

    pub fn with_super_admin(mut self, flag: bool) -> Self {
        self.is_system_super_admin = Some(flag);
        self
    }

    /// Read a user record out of an arbitrary JSON value.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) mean "no user". Any other
    /// non-object value is a user without scope signals.
    pub fn from_json(value: &Value) -> Option<ScopeUser> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Object(_) => Some(ScopeUser::deserialize(value).unwrap_or_default()),
            _ => Some(ScopeUser::default()),
        }
    }
}

/// Free-form scope classification such as `"system_admin"` or `"center_admin"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeText(String);

impl ScopeText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScopeText {
    fn from(value: &str) -> Self {
        ScopeText(value.to_string())
    }
}

impl From<String> for ScopeText {
    fn from(value: String) -> Self {
        ScopeText(value)
    }
}

impl fmt::Display for ScopeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tenant identifier. The platform sends these as either numbers or strings,
/// so the text form is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn trimmed(&self) -> &str {
        trim_padding(&self.0)
    }

    /// Whitespace-only identifiers carry no tenant signal.
    pub fn is_present(&self) -> bool {
        !self.trimmed().is_empty()
    }

    /// Identifiers compare by their trimmed text, so `12`, `"12"` and `" 12 "` match.
    pub fn same_center(&self, other: &Identifier) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier(value)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier(value.to_string())
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier(value.to_string())
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Identifier(value.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip leading/trailing whitespace, including the U+FEFF byte-order mark
/// that browser `String.prototype.trim` also removes.
pub fn trim_padding(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Text form of a loosely typed JSON value; `None` for `null`.
pub(crate) fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| coerce_to_text(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_string()),
    }
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<ScopeText>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_text(&value).map(ScopeText))
}

pub(crate) fn lenient_identifier<'de, D>(deserializer: D) -> Result<Option<Identifier>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_text(&value).map(Identifier))
}

pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(Some(flag)),
        _ => Ok(None),
    }
}
