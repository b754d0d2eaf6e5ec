//! Request validation for ad payloads
//!
//! Both the create and the update path run the same rule table. The
//! [`Mode`] flag decides whether an absent field is an error (create) or a
//! no-op (update). A field that is present but blank is always an error.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::ad::{AdPatch, NewAd};

/// Maximum length for title and owner, in characters after trimming
pub const MAX_SHORT_FIELD_LEN: usize = 100;

/// Per-field validation rule
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// JSON key
    pub name: &'static str,
    /// Human-readable name used in messages
    pub label: &'static str,
    pub required_on_create: bool,
    pub trim: bool,
    pub non_blank: bool,
    pub max_len: Option<usize>,
}

pub const TITLE: FieldRule = FieldRule {
    name: "title",
    label: "Title",
    required_on_create: true,
    trim: true,
    non_blank: true,
    max_len: Some(MAX_SHORT_FIELD_LEN),
};

pub const DESCRIPTION: FieldRule = FieldRule {
    name: "description",
    label: "Description",
    required_on_create: true,
    trim: true,
    non_blank: true,
    max_len: None,
};

pub const OWNER: FieldRule = FieldRule {
    name: "owner",
    label: "Owner",
    required_on_create: true,
    trim: true,
    non_blank: true,
    max_len: Some(MAX_SHORT_FIELD_LEN),
};

/// Rules in reporting order
pub const AD_FIELDS: [FieldRule; 3] = [TITLE, DESCRIPTION, OWNER];

/// Which write path is being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Category of a field-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required field absent
    Missing,
    /// Present but not a JSON string
    StringType,
    /// String value violates a rule
    ValueError,
}

/// One violated rule, addressed by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn missing(rule: &FieldRule) -> Self {
        Self {
            field: rule.name,
            message: "Field required".to_owned(),
            kind: FieldErrorKind::Missing,
        }
    }

    fn not_a_string(rule: &FieldRule) -> Self {
        Self {
            field: rule.name,
            message: "Input should be a valid string".to_owned(),
            kind: FieldErrorKind::StringType,
        }
    }

    fn empty(rule: &FieldRule) -> Self {
        Self {
            field: rule.name,
            message: format!("{} cannot be empty", rule.label),
            kind: FieldErrorKind::ValueError,
        }
    }

    fn has_nul(rule: &FieldRule) -> Self {
        Self {
            field: rule.name,
            message: format!("{} cannot contain NUL characters", rule.label),
            kind: FieldErrorKind::ValueError,
        }
    }

    fn too_long(rule: &FieldRule, max: usize) -> Self {
        Self {
            field: rule.name,
            message: format!("{} cannot exceed {} characters", rule.label, max),
            kind: FieldErrorKind::ValueError,
        }
    }
}

/// Validation failure for a write payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not a JSON object
    Malformed,

    /// One or more field rules violated, in rule-table order
    Fields(Vec<FieldError>),

    /// Update payload carries no recognized field
    EmptyUpdate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "request body is not a JSON object"),
            Self::Fields(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                write!(f, "invalid fields: {}", fields.join(", "))
            }
            Self::EmptyUpdate => write!(f, "no fields to update"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a create payload into a normalized [`NewAd`].
pub fn validate_create(body: &Value) -> Result<NewAd, ValidationError> {
    let mut values = validate_fields(body, Mode::Create)?;

    Ok(NewAd {
        title: take_required(&mut values, &TITLE)?,
        description: take_required(&mut values, &DESCRIPTION)?,
        owner: take_required(&mut values, &OWNER)?,
    })
}

/// Validate an update payload into a normalized [`AdPatch`].
pub fn validate_update(body: &Value) -> Result<AdPatch, ValidationError> {
    let mut values = validate_fields(body, Mode::Update)?;

    let patch = AdPatch {
        title: values.remove(TITLE.name),
        description: values.remove(DESCRIPTION.name),
        owner: values.remove(OWNER.name),
    };

    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }

    Ok(patch)
}

/// Apply the rule table, collecting every violation.
///
/// Returns the normalized value of each field that was present. Unknown keys
/// are ignored.
pub fn validate_fields(
    body: &Value,
    mode: Mode,
) -> Result<BTreeMap<&'static str, String>, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::Malformed)?;

    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for rule in &AD_FIELDS {
        match object.get(rule.name) {
            None if mode == Mode::Create && rule.required_on_create => {
                errors.push(FieldError::missing(rule));
            }
            None => {}
            Some(raw) => match check_value(rule, raw) {
                Ok(value) => {
                    values.insert(rule.name, value);
                }
                Err(e) => errors.push(e),
            },
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::Fields(errors));
    }

    Ok(values)
}

fn check_value(rule: &FieldRule, raw: &Value) -> Result<String, FieldError> {
    let s = raw.as_str().ok_or_else(|| FieldError::not_a_string(rule))?;
    let trimmed = s.trim();

    if rule.non_blank && trimmed.is_empty() {
        return Err(FieldError::empty(rule));
    }

    // PostgreSQL text columns cannot hold U+0000
    if s.contains('\0') {
        return Err(FieldError::has_nul(rule));
    }

    if let Some(max) = rule.max_len {
        if trimmed.chars().count() > max {
            return Err(FieldError::too_long(rule, max));
        }
    }

    let value = if rule.trim { trimmed } else { s };
    Ok(value.to_owned())
}

fn take_required(
    values: &mut BTreeMap<&'static str, String>,
    rule: &FieldRule,
) -> Result<String, ValidationError> {
    values
        .remove(rule.name)
        .ok_or_else(|| ValidationError::Fields(vec![FieldError::missing(rule)]))
}
