//! Core type definitions for the terminal UI

use std::time::Instant;

use crate::flows::{AccountMode, CredentialsForm};

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Albums,
    Account,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Albums,
            ActiveSection::Albums => ActiveSection::Account,
            ActiveSection::Account => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Account,
            ActiveSection::Albums => ActiveSection::Search,
            ActiveSection::Account => ActiveSection::Albums,
        }
    }
}

/// Input field of the account form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Username,
    FullName,
    Email,
    Password,
}

impl FormField {
    /// Fields shown in `mode`, top to bottom
    pub fn visible(mode: AccountMode) -> &'static [FormField] {
        match mode {
            AccountMode::Login => &[FormField::Username, FormField::Password],
            AccountMode::Register => &[
                FormField::Username,
                FormField::FullName,
                FormField::Email,
                FormField::Password,
            ],
        }
    }

    pub fn next(self, mode: AccountMode) -> Self {
        let fields = Self::visible(mode);
        let index = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(index + 1) % fields.len()]
    }

    pub fn prev(self, mode: AccountMode) -> Self {
        let fields = Self::visible(mode);
        let index = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(index + fields.len() - 1) % fields.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Username => "Username",
            FormField::FullName => "Full name",
            FormField::Email => "Email",
            FormField::Password => "Password",
        }
    }

    pub fn value_mut(self, form: &mut CredentialsForm) -> &mut String {
        match self {
            FormField::Username => &mut form.username,
            FormField::FullName => &mut form.full_name,
            FormField::Email => &mut form.email,
            FormField::Password => &mut form.password,
        }
    }

    pub fn value(self, form: &CredentialsForm) -> &str {
        match self {
            FormField::Username => &form.username,
            FormField::FullName => &form.full_name,
            FormField::Email => &form.email,
            FormField::Password => &form.password,
        }
    }
}

/// Blocking dialog shown over the UI until dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), is_error: true }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), is_error: false }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    /// Set while the query on screen is the one the feed shows results for.
    /// Only the search box title reads it; clearing the box reloads the
    /// discover feed whether or not the text was submitted.
    pub search_submitted: bool,
    pub account_mode: AccountMode,
    pub form: CredentialsForm,
    pub form_field: FormField,
    pub alert: Option<Alert>,
    pub alert_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub show_album_detail: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Albums,
            search_query: String::new(),
            search_submitted: false,
            account_mode: AccountMode::Login,
            form: CredentialsForm::default(),
            form_field: FormField::Username,
            alert: None,
            alert_timestamp: None,
            show_help_popup: false,
            show_album_detail: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cycle() {
        let mut section = ActiveSection::Search;
        for _ in 0..3 {
            section = section.next();
        }
        assert_eq!(section, ActiveSection::Search);
        assert_eq!(ActiveSection::Search.prev(), ActiveSection::Account);
    }

    #[test]
    fn login_form_skips_registration_fields() {
        assert_eq!(FormField::Username.next(AccountMode::Login), FormField::Password);
        assert_eq!(FormField::Password.next(AccountMode::Login), FormField::Username);
        assert_eq!(FormField::Username.next(AccountMode::Register), FormField::FullName);
        assert_eq!(FormField::Username.prev(AccountMode::Register), FormField::Password);
    }

    #[test]
    fn hidden_field_falls_back_to_first_visible() {
        // Switching from register to login while on Email
        assert_eq!(FormField::Email.next(AccountMode::Login), FormField::Password);
    }
}
