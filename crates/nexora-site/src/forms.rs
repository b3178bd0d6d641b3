//! Contact and demo-request forms: local validation and a pluggable submit.
//!
//! Validation reports every failing field at once. A form that fails is
//! never handed to the sink, and nothing is retried.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"))
}

fn mobile_regex() -> &'static Regex {
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^\d{10}$").expect("Invalid mobile regex"))
}

/// Services a demo can be requested for.
pub const DEMO_SERVICES: [&str; 10] = [
    "Web Application VAPT",
    "Mobile Application VAPT",
    "Network Security Audit",
    "Endpoint Security & Ransomware Defense",
    "SOC & Threat Monitoring (Managed SOC/SIEM)",
    "Cyber Awareness Training & Phishing Simulation",
    "Incident Response",
    "Secure Development & Consulting",
    "Deepfake Detection & Analysis",
    "Other",
];

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const PHONE_MAX: usize = 20;
pub const COMPANY_MAX: usize = 100;
pub const MESSAGE_MAX: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Mobile,
    Phone,
    Company,
    Service,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Mobile => "mobile",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::Service => "service",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FieldError {
    #[error("is required")]
    Required,
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must be a valid 10-digit mobile number")]
    InvalidMobile,
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    #[error("must be one of the offered services")]
    UnknownService,
}

/// Every field error of one submission, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first error of a field; later ones for the same field are ignored.
    pub fn add(&mut self, field: Field, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    Contact,
    Demo,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Demo => "demo",
        }
    }
}

/// A form that can be checked locally and reset after a successful submit.
pub trait Form: Default + Sized {
    const KIND: FormKind;

    /// Validate, returning the normalized form that would be sent.
    fn validate(&self) -> Result<Self, ValidationErrors>;

    fn into_submission(self) -> Submission;
}

/// "Book a demo" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoRequest {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub service: String,
    #[serde(default)]
    pub remark: String,
}

impl Form for DemoRequest {
    const KIND: FormKind = FormKind::Demo;

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add(Field::Name, FieldError::Required);
        }

        let digits: String = self.mobile.chars().filter(char::is_ascii_digit).collect();
        if self.mobile.trim().is_empty() {
            errors.add(Field::Mobile, FieldError::Required);
        } else if !mobile_regex().is_match(&digits) {
            errors.add(Field::Mobile, FieldError::InvalidMobile);
        }

        if self.email.trim().is_empty() {
            errors.add(Field::Email, FieldError::Required);
        } else if !email_regex().is_match(&self.email) {
            errors.add(Field::Email, FieldError::InvalidEmail);
        }

        if self.service.is_empty() {
            errors.add(Field::Service, FieldError::Required);
        } else if !DEMO_SERVICES.contains(&self.service.as_str()) {
            errors.add(Field::Service, FieldError::UnknownService);
        }

        errors.into_result(DemoRequest {
            name: self.name.trim().to_string(),
            mobile: digits,
            email: self.email.clone(),
            service: self.service.clone(),
            remark: self.remark.trim().to_string(),
        })
    }

    fn into_submission(self) -> Submission {
        Submission::Demo(self)
    }
}

/// Contact page form. Every field is trimmed before it is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    pub message: String,
}

impl Form for ContactMessage {
    const KIND: FormKind = FormKind::Contact;

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let trimmed = ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        required_within(&mut errors, Field::Name, &trimmed.name, NAME_MAX);
        if trimmed.email.is_empty() {
            errors.add(Field::Email, FieldError::Required);
        } else if !email_regex().is_match(&trimmed.email) {
            errors.add(Field::Email, FieldError::InvalidEmail);
        } else {
            within(&mut errors, Field::Email, &trimmed.email, EMAIL_MAX);
        }
        within(&mut errors, Field::Phone, &trimmed.phone, PHONE_MAX);
        within(&mut errors, Field::Company, &trimmed.company, COMPANY_MAX);
        required_within(&mut errors, Field::Message, &trimmed.message, MESSAGE_MAX);

        errors.into_result(trimmed)
    }

    fn into_submission(self) -> Submission {
        Submission::Contact(self)
    }
}

fn within(errors: &mut ValidationErrors, field: Field, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, FieldError::TooLong { max });
    }
}

fn required_within(errors: &mut ValidationErrors, field: Field, value: &str, max: usize) {
    if value.is_empty() {
        errors.add(field, FieldError::Required);
    } else {
        within(errors, field, value, max);
    }
}

/// A validated form on its way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Submission {
    Contact(ContactMessage),
    Demo(DemoRequest),
}

impl Submission {
    pub fn kind(&self) -> FormKind {
        match self {
            Submission::Contact(_) => FormKind::Contact,
            Submission::Demo(_) => FormKind::Demo,
        }
    }
}

/// Where submissions go. The site has no backend; a sink decides what "sent" means.
pub trait SubmissionSink {
    fn accept(&mut self, submission: Submission);

    fn reject(&mut self, _kind: FormKind, _errors: &ValidationErrors) {}
}

/// Validate `form` and hand it to `sink`. On success the form is reset to empty.
pub fn submit<F: Form>(form: &mut F, sink: &mut impl SubmissionSink) -> Result<(), ValidationErrors> {
    match form.validate() {
        Ok(valid) => {
            let submission = valid.into_submission();
            info!(kind = submission.kind().as_str(), "form submitted");
            sink.accept(submission);
            *form = F::default();
            Ok(())
        }
        Err(errors) => {
            debug!(kind = F::KIND.as_str(), fields = errors.len(), "form rejected");
            sink.reject(F::KIND, &errors);
            Err(errors)
        }
    }
}

/// A notification the page would show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

/// Sink that only records the toast the page would show.
///
/// Only the contact page toasts. The demo dialog swaps to its own
/// confirmation panel on success and shows errors inline, so demo
/// submissions are accepted silently.
#[derive(Debug, Clone, Default)]
pub struct ToastSink {
    pub toasts: Vec<Toast>,
    pub accepted: Vec<Submission>,
}

impl ToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    fn push(&mut self, title: &str, description: &str) {
        self.toasts.push(Toast {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

impl SubmissionSink for ToastSink {
    fn accept(&mut self, submission: Submission) {
        if submission.kind() == FormKind::Contact {
            self.push(
                "Message Sent!",
                "Thank you for contacting us. We'll get back to you soon.",
            );
        }
        self.accepted.push(submission);
    }

    fn reject(&mut self, kind: FormKind, _errors: &ValidationErrors) {
        if kind == FormKind::Contact {
            self.push("Validation Error", "Please check the form for errors.");
        }
    }
}
