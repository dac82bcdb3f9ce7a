//! Required-field checks run before a form is submitted.
//!
//! Apart from the email shape on the forgot-password form, anything beyond
//! "is it filled in" is left to the backend.

use std::collections::BTreeMap;

/// Field name to message. Empty means the form may be submitted.
#[derive(Debug, Default, Clone, PartialEq, thiserror::Error)]
#[error("{}", joined(.0))]
pub struct FormErrors(BTreeMap<&'static str, String>);

fn joined(messages: &BTreeMap<&'static str, String>) -> String {
    messages
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn require(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.insert(field, format!("{} is required.", label));
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn check_login(email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("email", "Email", email);
    errors.require("password", "Password", password);
    errors.into_result()
}

pub fn check_register(full_name: &str, email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("full_name", "Full name", full_name);
    errors.require("email", "Email", email);
    errors.require("password", "Password", password);
    errors.into_result()
}

pub fn check_forgot_password(email: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("email", "Email", email);
    if errors.is_empty() && !looks_like_email(email.trim()) {
        errors
            .0
            .insert("email", "Please enter a valid email address.".to_string());
    }
    errors.into_result()
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn check_reset_password(token: &str, new_password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("token", "Reset token", token);
    errors.require("new_password", "New password", new_password);
    errors.into_result()
}

pub fn check_profile(full_name: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("full_name", "Full name", full_name);
    errors.into_result()
}

pub fn check_change_password(current: &str, new: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("current_password", "Current password", current);
    errors.require("new_password", "New password", new);
    errors.into_result()
}

pub fn check_category(name: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("name", "Category name", name);
    errors.into_result()
}

/// A task needs a title and a category. Returns the category id.
pub fn check_task(title: &str, category: Option<i64>) -> Result<i64, FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("title", "Title", title);
    if category.is_none() {
        errors.0.insert("category", "Category is required.".to_string());
    }
    errors.into_result()?;
    Ok(category.unwrap_or_default())
}
