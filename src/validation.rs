//! Declarative form validation.
//!
//! Each route declares a slice of [`Rule`]s; [`validate`] checks all of them and
//! returns every violated rule's message so the form can be re-rendered.

use serde::Serialize;

use crate::models::Slug;

/// What a rule checks on its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The field is present and not the empty string.
    NonEmpty,
    /// If the field is non-empty, it is a usable page slug.
    Slug,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Rule {
            field,
            check: Check::NonEmpty,
            message,
        }
    }

    pub const fn slug(field: &'static str, message: &'static str) -> Self {
        Rule {
            field,
            check: Check::Slug,
            message,
        }
    }

    fn passes(&self, value: &str) -> bool {
        match self.check {
            Check::NonEmpty => !value.is_empty(),
            Check::Slug => value.is_empty() || Slug::parse(value).is_some(),
        }
    }
}

/// A violated rule, in the shape the templates display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub msg: String,
}

impl FieldError {
    /// An error not tied to a single field, such as rejected credentials.
    pub fn general(msg: impl Into<String>) -> Self {
        FieldError {
            field: "",
            msg: msg.into(),
        }
    }
}

/// Gives validation rules read access to a submitted form by field name.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
}

/// Checks `form` against every rule. Missing fields count as empty.
pub fn validate<F: FormFields>(form: &F, rules: &[Rule]) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = rules
        .iter()
        .filter(|rule| !rule.passes(form.field(rule.field).unwrap_or("")))
        .map(|rule| FieldError {
            field: rule.field,
            msg: rule.message.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
