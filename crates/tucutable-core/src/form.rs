//! Form fields used around tables (filter bars, row editors).
//!
//! A field's widget is described by its [`FieldKind`] up front, so validation and rendering never
//! inspect the widget at runtime.

use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Select { options: Vec<String> },
    Checkbox,
    Radio { options: Vec<String> },
    PinCode { length: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Bool(b) => !b,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Required(String),
    MinLength(usize, String),
    MaxLength(usize, String),
    /// The value must be one of the field's options.
    OneOf(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        };
        Self {
            name: name.into(),
            kind,
            value,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn value(mut self, value: FieldValue) -> Self {
        self.value = value;
        self
    }

    /// The message of the first failing rule, then the kind's own constraint.
    pub fn validate(&self) -> Option<String> {
        for rule in &self.rules {
            if let Some(msg) = self.check(rule) {
                return Some(msg);
            }
        }
        self.check_kind()
    }

    fn check(&self, rule: &Rule) -> Option<String> {
        let text = self.value.as_text().unwrap_or_default();
        let chars = text.chars().count();
        let failed = match rule {
            Rule::Required(_) => self.value.is_blank(),
            Rule::MinLength(n, _) => !self.value.is_blank() && chars < *n,
            Rule::MaxLength(n, _) => chars > *n,
            Rule::OneOf(_) => match &self.kind {
                FieldKind::Select { options } | FieldKind::Radio { options } => {
                    !self.value.is_blank() && !options.iter().any(|o| o == text)
                }
                _ => false,
            },
        };
        if !failed {
            return None;
        }
        let msg = match rule {
            Rule::Required(m) | Rule::MinLength(_, m) | Rule::MaxLength(_, m) | Rule::OneOf(m) => m,
        };
        Some(msg.clone())
    }

    fn check_kind(&self) -> Option<String> {
        let FieldKind::PinCode { length } = self.kind else {
            return None;
        };
        let text = self.value.as_text().unwrap_or_default();
        if text.is_empty() {
            return None;
        }
        let valid = text.len() == length && text.bytes().all(|b| b.is_ascii_digit());
        (!valid).then(|| format!("Enter the {length}-digit code"))
    }
}

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(f) => {
                f.value = value;
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|f| Some((f.name.clone(), f.validate()?)))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn signup() -> Form {
        Form::new(vec![
            Field::new("name", FieldKind::Text)
                .rule(Rule::Required("Name is required".into()))
                .rule(Rule::MinLength(3, "Too short".into())),
            Field::new(
                "plan",
                FieldKind::Select {
                    options: vec!["free".into(), "pro".into()],
                },
            )
            .rule(Rule::OneOf("Pick a plan".into())),
            Field::new("terms", FieldKind::Checkbox).rule(Rule::Required("Accept the terms".into())),
            Field::new("otp", FieldKind::PinCode { length: 4 }),
        ])
    }

    #[test]
    fn reports_first_failing_rule_per_field() {
        let mut f = signup();
        f.set_value("plan", text("team"));
        f.set_value("otp", text("12a4"));

        let errors = f.validate();
        assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(errors.get("plan").map(String::as_str), Some("Pick a plan"));
        assert_eq!(errors.get("terms").map(String::as_str), Some("Accept the terms"));
        assert_eq!(errors.get("otp").map(String::as_str), Some("Enter the 4-digit code"));

        f.set_value("name", text("Al"));
        assert_eq!(
            f.validate().get("name").map(String::as_str),
            Some("Too short")
        );
    }

    #[test]
    fn valid_form_has_no_errors() {
        let mut f = signup();
        f.set_value("name", text("Ada"));
        f.set_value("plan", text("pro"));
        f.set_value("terms", FieldValue::Bool(true));
        f.set_value("otp", text("0042"));
        assert!(f.is_valid());
        assert!(!f.set_value("missing", text("x")));
    }

    #[test]
    fn kinds_are_tagged_in_json() {
        let kind: FieldKind =
            serde_json::from_str(r#"{"type":"pinCode","length":6}"#).unwrap();
        assert_eq!(kind, FieldKind::PinCode { length: 6 });
    }
}
