//! Declarative field validation for outbound requests.
//!
//! Every request type describes its fields through [`Schema`]: a table of
//! [`FieldSpec`] entries (field name, wire name, rules, omit policy) paired
//! with the current value. The same table drives validation here and query
//! encoding in [`crate::encoding`].
//!
//! Violations are translated into readable messages:
//!
//! - a missing required field becomes `Required field <name> is missing or empty`;
//! - a value outside its allowed set becomes
//!   `Field '<path>' invalid value: '<value>', valid values are: "a","b"`;
//! - anything else keeps the violation's own description.

use crate::error::ValidationError;
use crate::time::RadosTime;
use crate::types::{TriBool, UserCap, CAP_PERMS, CAP_TYPES};
use std::fmt;

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The value must be non-empty.
    Required,
    /// Skip the remaining rules when the value is empty.
    OmitEmpty,
    /// The value must equal one of these strings.
    OneOf(&'static [&'static str]),
    /// The value must look like an email address.
    Email,
    /// Validate each element of a list against its own schema.
    Dive,
}

impl Rule {
    /// Short tag naming the rule in raw violations.
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::OmitEmpty => "omitempty",
            Rule::OneOf(_) => "oneof",
            Rule::Email => "email",
            Rule::Dive => "dive",
        }
    }
}

/// Static description of one request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in messages.
    pub name: &'static str,
    /// Query parameter name.
    pub wire: &'static str,
    /// Rules checked before encoding.
    pub rules: &'static [Rule],
    /// Leave the parameter out of the query when the value is empty.
    pub omit_empty: bool,
}

impl FieldSpec {
    /// A field with no rules that is omitted from the query when empty.
    pub const fn new(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            rules: &[],
            omit_empty: true,
        }
    }

    /// Attach rules.
    pub const fn rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }

    /// Always send the parameter, even when empty.
    pub const fn always(mut self) -> Self {
        self.omit_empty = false;
        self
    }
}

/// Current value of a request field.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// Text.
    Str(&'a str),
    /// Integer.
    Int(i64),
    /// Plain boolean; `false` counts as empty.
    Bool(bool),
    /// Boolean with an explicit unset state.
    Tri(TriBool),
    /// Optional timestamp.
    Time(Option<&'a RadosTime>),
    /// Capability list, sent as `type=perm` pairs joined by `;`.
    Caps(&'a [UserCap]),
}

impl FieldValue<'_> {
    /// True for the zero value of the field's type.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::Bool(b) => !*b,
            FieldValue::Tri(t) => t.is_unset(),
            FieldValue::Time(t) => t.is_none(),
            FieldValue::Caps(c) => c.is_empty(),
        }
    }

    fn display(&self) -> String {
        match self {
            FieldValue::Str(s) => s.to_string(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Tri(t) => t
                .as_option()
                .map(|b| b.to_string())
                .unwrap_or_default(),
            FieldValue::Time(t) => t.map(|t| t.to_string()).unwrap_or_default(),
            FieldValue::Caps(c) => c
                .iter()
                .map(|cap| cap.to_string())
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

/// A field spec together with its value.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Static description.
    pub spec: &'static FieldSpec,
    /// Current value.
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Pair a spec with a value.
    pub fn new(spec: &'static FieldSpec, value: FieldValue<'a>) -> Self {
        Self { spec, value }
    }
}

/// Types that expose their fields for validation and query encoding.
pub trait Schema: Sync {
    /// Type name used as the root of violation paths.
    fn type_name(&self) -> &'static str;

    /// The field table, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A single rule violation, as reported before translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Full path, e.g. `UserCreateRequest.user_caps[1].perm`.
    pub namespace: String,
    /// Field name.
    pub field: &'static str,
    /// The violated rule.
    pub rule: Rule,
    /// The offending value.
    pub value: String,
}

impl FieldViolation {
    /// Readable message for this violation.
    pub fn message(&self) -> String {
        match self.rule {
            Rule::Required => format!("Required field {} is missing or empty", self.field),
            Rule::OneOf(allowed) => format!(
                "Field '{}' invalid value: '{}', valid values are: {}",
                self.namespace,
                self.value,
                allowed
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.namespace,
            self.field,
            self.rule.tag()
        )
    }
}

impl Schema for UserCap {
    fn type_name(&self) -> &'static str {
        "UserCap"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const TYPE: FieldSpec =
            FieldSpec::new("type", "type").rules(&[Rule::Required, Rule::OneOf(CAP_TYPES)]);
        const PERM: FieldSpec =
            FieldSpec::new("perm", "perm").rules(&[Rule::Required, Rule::OneOf(CAP_PERMS)]);

        vec![
            Field::new(&TYPE, FieldValue::Str(&self.cap_type)),
            Field::new(&PERM, FieldValue::Str(&self.perm)),
        ]
    }
}

/// Collect every rule violation of `value`, in field order.
pub fn violations(value: &dyn Schema) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(value, value.type_name(), &mut out);
    out
}

fn collect(value: &dyn Schema, prefix: &str, out: &mut Vec<FieldViolation>) {
    for field in value.fields() {
        let namespace = format!("{}.{}", prefix, field.spec.name);
        let empty = field.value.is_empty();

        for rule in field.spec.rules {
            let ok = match rule {
                Rule::OmitEmpty if empty => break,
                Rule::OmitEmpty => true,
                Rule::Required => !empty,
                Rule::OneOf(allowed) => match field.value {
                    FieldValue::Str(s) => allowed.contains(&s),
                    other => allowed.contains(&other.display().as_str()),
                },
                Rule::Email => match field.value {
                    FieldValue::Str(s) => is_email(s),
                    _ => false,
                },
                Rule::Dive => {
                    if let FieldValue::Caps(items) = field.value {
                        for (i, item) in items.iter().enumerate() {
                            collect(item, &format!("{}[{}]", namespace, i), out);
                        }
                    }
                    true
                }
            };

            if !ok {
                out.push(FieldViolation {
                    namespace: namespace.clone(),
                    field: field.spec.name,
                    rule: *rule,
                    value: field.value.display(),
                });
                // A field reports only its first failing rule.
                break;
            }
        }
    }
}

/// Validate `value`, returning translated messages or, when `raw` is set,
/// the violation list itself.
pub fn validate(value: &dyn Schema, raw: bool) -> Result<(), ValidationError> {
    let found = violations(value);
    if found.is_empty() {
        return Ok(());
    }

    if raw {
        return Err(ValidationError::Raw(found));
    }
    Err(ValidationError::Fields(
        found.iter().map(FieldViolation::message).collect(),
    ))
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !s.chars().any(char::is_whitespace)
}
