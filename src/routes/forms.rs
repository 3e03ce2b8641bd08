//! Submitted form bodies and the validation rules that apply to them.
//!
//! Every field defaults to the empty string so that a missing field is
//! reported by the rules with a 400 rather than rejected by the extractor.

use serde::Deserialize;

use crate::validation::{FormFields, Rule};

pub const LOGIN_RULES: &[Rule] = &[
    Rule::required("username", "A username is required"),
    Rule::required("password", "A password is required"),
];

pub const CREATE_RULES: &[Rule] = &[
    Rule::required("url", "The URL field is required"),
    Rule::slug("url", URL_CHARSET_MESSAGE),
    Rule::required("content", "The content field is required"),
];

pub const EDIT_RULES: &[Rule] = &[Rule::required("content", "Content is required")];

pub const URL_CHARSET_MESSAGE: &str =
    "The URL may only contain letters, digits, '-' and '_' (at most 128 characters)";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl FormFields for LoginForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

/// Body of the create and edit forms. `url` is ignored when editing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PageForm {
    pub url: String,
    pub content: String,
}

impl FormFields for PageForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "url" => Some(&self.url),
            "content" => Some(&self.content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: String::new(),
            password: "x".to_string(),
        };
        let errors = validate(&form, LOGIN_RULES).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "A username is required");
    }

    #[test]
    fn edit_ignores_url() {
        let form = PageForm {
            url: String::new(),
            content: "Bye".to_string(),
        };
        assert!(validate(&form, EDIT_RULES).is_ok());
    }

    #[test]
    fn create_rejects_traversal() {
        let form = PageForm {
            url: "../../etc/passwd".to_string(),
            content: "x".to_string(),
        };
        let errors = validate(&form, CREATE_RULES).unwrap_err();
        assert_eq!(errors[0].msg, URL_CHARSET_MESSAGE);
    }
}
