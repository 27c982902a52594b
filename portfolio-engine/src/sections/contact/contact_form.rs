use constants::layout::{CONTACT_SUBMIT_DELAY_SECS, CONTACT_SUCCESS_DISPLAY_SECS};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn label_key(self) -> &'static str {
        match self {
            FormField::Name => "contact.form.name",
            FormField::Email => "contact.form.email",
            FormField::Message => "contact.form.message",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0:?} is required")]
    MissingField(FormField),
    #[error("'{0}' is not an email address")]
    InvalidEmail(String),
    #[error("a submission is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Submitting { since: f32 },
    Success { since: f32 },
    Invalid,
}

impl SubmitStatus {
    /// Translation key of the submit button label.
    pub fn label_key(self) -> &'static str {
        match self {
            SubmitStatus::Idle => "contact.form.submit",
            SubmitStatus::Submitting { .. } => "contact.form.sending",
            SubmitStatus::Success { .. } => "contact.form.success",
            SubmitStatus::Invalid => "contact.form.error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact form fields and the simulated send cycle.
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    focus: Option<FormField>,
    status: SubmitStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: None,
            status: SubmitStatus::Idle,
        }
    }
}

impl ContactForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn set_focus(&mut self, field: Option<FormField>) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(FormField::Name, FormField::next));
    }

    fn editable(&self) -> Option<FormField> {
        match self.status {
            SubmitStatus::Submitting { .. } => None,
            _ => self.focus,
        }
    }

    /// Type into the focused field. Newlines only go into the message.
    pub fn insert(&mut self, input: &str) -> bool {
        let Some(field) = self.editable() else {
            return false;
        };
        let accepted: String = input
            .chars()
            .filter(|c| !c.is_control() || (*c == '\n' && field == FormField::Message))
            .collect();
        if accepted.is_empty() {
            return false;
        }
        self.value_mut(field).push_str(&accepted);
        if self.status == SubmitStatus::Invalid {
            self.status = SubmitStatus::Idle;
        }
        true
    }

    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.editable() else {
            return false;
        };
        self.value_mut(field).pop().is_some()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        for field in FormField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        let email = self.email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !valid {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Start the simulated send. Invalid input leaves the fields untouched.
    pub fn submit(&mut self, now: f32) -> Result<(), ContactError> {
        if matches!(self.status, SubmitStatus::Submitting { .. }) {
            return Err(ContactError::Busy);
        }
        if let Err(error) = self.validate() {
            self.status = SubmitStatus::Invalid;
            return Err(error);
        }
        self.status = SubmitStatus::Submitting { since: now };
        self.focus = None;
        Ok(())
    }

    /// Advance the send cycle; returns the submission when it completes.
    pub fn tick(&mut self, now: f32) -> Option<Submission> {
        match self.status {
            SubmitStatus::Submitting { since } if now - since >= CONTACT_SUBMIT_DELAY_SECS => {
                self.status = SubmitStatus::Success { since: now };
                Some(Submission {
                    name: std::mem::take(&mut self.name),
                    email: std::mem::take(&mut self.email),
                    message: std::mem::take(&mut self.message),
                })
            }
            SubmitStatus::Success { since } if now - since >= CONTACT_SUCCESS_DISPLAY_SECS => {
                self.status = SubmitStatus::Idle;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_focus(Some(FormField::Name));
        form.insert("Ada");
        form.focus_next();
        form.insert("ada@example.com");
        form.focus_next();
        form.insert("Hello\nthere");
        form
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let form = filled();
        assert_eq!(form.value(FormField::Name), "Ada");
        assert_eq!(form.value(FormField::Email), "ada@example.com");
        assert_eq!(form.value(FormField::Message), "Hello\nthere");
    }

    #[test]
    fn newlines_are_dropped_outside_the_message() {
        let mut form = ContactForm::default();
        form.set_focus(Some(FormField::Name));
        assert!(!form.insert("\n"));
        assert!(form.value(FormField::Name).is_empty());
    }

    #[test]
    fn nothing_is_typed_without_focus() {
        let mut form = ContactForm::default();
        assert!(!form.insert("a"));
        assert!(!form.backspace());
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut form = ContactForm::default();
        form.focus_next();
        assert_eq!(form.focus(), Some(FormField::Name));
        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), Some(FormField::Name));
    }

    #[test]
    fn missing_fields_block_submission() {
        let mut form = ContactForm::default();
        assert_eq!(
            form.submit(0.0),
            Err(ContactError::MissingField(FormField::Name))
        );
        assert_eq!(form.status(), SubmitStatus::Invalid);

        form.set_focus(Some(FormField::Name));
        form.insert("A");
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = filled();
        form.set_focus(Some(FormField::Email));
        for _ in 0.."example.com".len() {
            form.backspace();
        }
        assert!(matches!(
            form.submit(0.0),
            Err(ContactError::InvalidEmail(_))
        ));
    }

    #[test]
    fn submission_completes_then_returns_to_idle() {
        let mut form = filled();
        form.submit(10.0).unwrap();
        assert_eq!(form.status().label_key(), "contact.form.sending");
        assert_eq!(form.submit(10.5), Err(ContactError::Busy));
        assert!(!form.insert("x"));

        assert_eq!(form.tick(11.0), None);
        let sent = form.tick(11.5).unwrap();
        assert_eq!(sent.name, "Ada");
        assert_eq!(sent.message, "Hello\nthere");
        assert!(form.value(FormField::Email).is_empty());
        assert_eq!(form.status().label_key(), "contact.form.success");

        assert_eq!(form.tick(14.0), None);
        assert!(matches!(form.status(), SubmitStatus::Success { .. }));
        form.tick(14.5);
        assert_eq!(form.status(), SubmitStatus::Idle);
    }
}
