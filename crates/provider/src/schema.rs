//! Resource schema declarations
//!
//! Every resource is described by a static [`ResourceSchema`] whose field
//! table drives validation, expand and flatten. Field names are the
//! user-facing (underscored) names; the wire name defaults to the same name
//! with underscores replaced by hyphens and can be overridden per field.

use std::borrow::Cow;

use fortios_sdk::CmdbPath;
use serde::Serialize;
use serde_json::Value;

use crate::state::ResourceData;

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    String,
    Int,
    /// Ordered list of objects with their own field table
    List { elem: &'static [FieldSchema] },
}

impl FieldType {
    fn describe(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "integer",
            FieldType::List { .. } => "list",
        }
    }
}

/// Declared validation rule of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Validation {
    None,
    StringLenBetween { min: usize, max: usize },
    IntBetween { min: i64, max: i64 },
}

/// One field of a resource or of a list element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire: Option<&'static str>,
    #[serde(flatten)]
    pub kind: FieldType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    pub validation: Validation,
}

impl FieldSchema {
    const fn new(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            wire: None,
            kind,
            required: false,
            optional: true,
            computed: false,
            force_new: false,
            validation: Validation::None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldType::Int)
    }

    pub const fn list(name: &'static str, elem: &'static [FieldSchema]) -> Self {
        Self::new(name, FieldType::List { elem })
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Optional and filled in by the server when unset
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Server-owned, never sent
    pub const fn computed_only(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn string_len(mut self, min: usize, max: usize) -> Self {
        self.validation = Validation::StringLenBetween { min, max };
        self
    }

    pub const fn int_between(mut self, min: i64, max: i64) -> Self {
        self.validation = Validation::IntBetween { min, max };
        self
    }

    pub const fn with_wire_name(mut self, wire: &'static str) -> Self {
        self.wire = Some(wire);
        self
    }

    /// Name of the field in API payloads
    pub fn wire_name(&self) -> Cow<'static, str> {
        match self.wire {
            Some(wire) => Cow::Borrowed(wire),
            None if self.name.contains('_') => Cow::Owned(self.name.replace('_', "-")),
            None => Cow::Borrowed(self.name),
        }
    }

    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    /// Integers whose legal range includes zero are sent even when zero.
    pub fn zero_is_set(&self) -> bool {
        match (self.kind, self.validation) {
            (FieldType::Int, Validation::IntBetween { min, max }) => min <= 0 && 0 <= max,
            (FieldType::Int, _) => true,
            _ => false,
        }
    }

    fn validate_value(&self, path: &str, value: &Value, diags: &mut Vec<Diagnostic>) {
        match (self.kind, value) {
            (FieldType::String, Value::String(s)) => {
                if let Validation::StringLenBetween { min, max } = self.validation {
                    if s.len() < min || s.len() > max {
                        diags.push(Diagnostic::error(
                            path,
                            format!(
                                "expected length of {} to be in the range ({} - {}), got {}",
                                path, min, max, s
                            ),
                        ));
                    }
                }
            }
            (FieldType::Int, Value::Number(n)) => {
                let Some(n) = n.as_i64() else {
                    diags.push(Diagnostic::error(path, format!("{} must be an integer", path)));
                    return;
                };
                if let Validation::IntBetween { min, max } = self.validation {
                    if n < min || n > max {
                        diags.push(Diagnostic::error(
                            path,
                            format!(
                                "expected {} to be in the range ({} - {}), got {}",
                                path, min, max, n
                            ),
                        ));
                    }
                }
            }
            (FieldType::List { elem }, Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}.{}", path, i);
                    match item {
                        Value::Object(element) => {
                            validate_fields(elem, element, &item_path, diags)
                        }
                        Value::Null => {}
                        _ => diags.push(Diagnostic::error(
                            &item_path,
                            format!("{} must be an object", item_path),
                        )),
                    }
                }
            }
            (kind, _) => diags.push(Diagnostic::error(
                path,
                format!("{} must be a {}", path, kind.describe()),
            )),
        }
    }
}

/// How a resource maps onto the CMDB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Multi-entry table keyed by mkey
    Table,
    /// Settings object; no create or delete endpoint
    Singleton,
    /// Free-form request against any API path
    Generic,
}

/// Static description of one resource type
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceSchema {
    /// Terraform type name, e.g. `fortios_log_customfield`
    pub type_name: &'static str,
    /// Identifier used when the API returns no mkey, and in error messages
    pub literal: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<CmdbPath>,
    pub kind: ResourceKind,
    pub fields: &'static [FieldSchema],
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check a configuration against the declared field rules
    pub fn validate(&self, data: &ResourceData) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        validate_fields(self.fields, data.attributes(), "", &mut diags);
        diags
    }
}

fn validate_fields(
    fields: &[FieldSchema],
    values: &serde_json::Map<String, Value>,
    prefix: &str,
    diags: &mut Vec<Diagnostic>,
) {
    let join = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        }
    };

    for field in fields {
        let path = join(field.name);
        match values.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    diags.push(Diagnostic::error(
                        &path,
                        format!("The argument \"{}\" is required, but no definition was found.", path),
                    ));
                }
            }
            Some(_) if field.is_computed_only() => diags.push(Diagnostic::warning(
                &path,
                format!("\"{}\" is set by the server; the configured value is ignored.", path),
            )),
            Some(value) => field.validate_value(&path, value, diags),
        }
    }

    for key in values.keys() {
        if !fields.iter().any(|f| f.name == key) {
            let path = join(key);
            diags.push(Diagnostic::error(
                &path,
                format!("An argument named \"{}\" is not expected here.", path),
            ));
        }
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A validation finding tied to an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub attribute: String,
}

impl Diagnostic {
    pub fn error(attribute: &str, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute: attribute.to_string(),
        }
    }

    pub fn warning(attribute: &str, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute: attribute.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
