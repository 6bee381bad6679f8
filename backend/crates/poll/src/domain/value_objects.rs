//! Domain Value Objects
//!
//! Immutable, validated values for the poll domain. Raw request fields are
//! turned into these once, at the edge; the engine itself never re-checks
//! string content.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Structural limits on a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLimits {
    pub min_options: usize,
    pub max_options: usize,
    /// Measured in Unicode scalar values, after trimming
    pub question_max_chars: usize,
    /// Measured in Unicode scalar values, after trimming
    pub option_max_chars: usize,
}

impl Default for PollLimits {
    fn default() -> Self {
        Self {
            min_options: 2,
            max_options: 6,
            question_max_chars: 255,
            option_max_chars: 255,
        }
    }
}

/// Per-field validation messages, reported together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(field, messages)| (field.clone(), serde_json::json!(messages)))
                .collect(),
        )
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Poll question: trimmed, non-empty, bounded length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    pub fn new(raw: impl Into<String>, max_chars: usize) -> Result<Self, String> {
        let question = raw.into().trim().to_string();

        if question.is_empty() {
            return Err("Poll question cannot be empty".to_string());
        }

        if question.chars().count() > max_chars {
            return Err(format!(
                "Poll question cannot be longer than {} characters",
                max_chars
            ));
        }

        Ok(Self(question))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(question: impl Into<String>) -> Self {
        Self(question.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display text of one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionText(String);

impl OptionText {
    pub fn new(raw: impl Into<String>, max_chars: usize) -> Result<Self, String> {
        let text = raw.into().trim().to_string();

        if text.is_empty() {
            return Err("Option text cannot be empty".to_string());
        }

        if text.chars().count() > max_chars {
            return Err(format!(
                "Option text cannot be longer than {} characters",
                max_chars
            ));
        }

        Ok(Self(text))
    }

    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered option texts, each paired with its zero-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTexts(Vec<(i16, OptionText)>);

impl OptionTexts {
    pub fn new(raw: Vec<String>, limits: &PollLimits) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if raw.len() < limits.min_options {
            errors.add(
                "options",
                format!("At least {} options are required", limits.min_options),
            );
        }

        if raw.len() > limits.max_options {
            errors.add(
                "options",
                format!("A maximum of {} options are allowed", limits.max_options),
            );
        }

        let mut texts = Vec::with_capacity(raw.len());
        for (index, text) in raw.into_iter().enumerate() {
            // Positions are stored as smallint
            let Ok(position) = i16::try_from(index) else {
                errors.add("options", "Too many options to store");
                break;
            };

            match OptionText::new(text, limits.option_max_chars) {
                Ok(text) => texts.push((position, text)),
                Err(message) => errors.add(format!("options[{}]", index), message),
            }
        }

        errors.into_result(Self(texts))
    }
}

impl IntoIterator for OptionTexts {
    type Item = (i16, OptionText);
    type IntoIter = std::vec::IntoIter<(i16, OptionText)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Expiry instant, strictly after the creation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry(DateTime<Utc>);

impl Expiry {
    pub fn new(expires_at: DateTime<Utc>, created_at: DateTime<Utc>) -> Result<Self, String> {
        if expires_at <= created_at {
            return Err("Expiration time must be in the future".to_string());
        }
        Ok(Self(expires_at))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Validated input for poll creation
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub owner_id: UserId,
    pub question: Question,
    pub expires_at: Expiry,
    pub options: OptionTexts,
}

impl NewPoll {
    /// Validate every field and report all failures at once
    pub fn parse(
        owner_id: UserId,
        question: String,
        options: Vec<String>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
        limits: &PollLimits,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let question = Question::new(question, limits.question_max_chars)
            .map_err(|message| errors.add("question", message))
            .ok();

        let expires_at = Expiry::new(expires_at, now)
            .map_err(|message| errors.add("expiresAt", message))
            .ok();

        let options = match OptionTexts::new(options, limits) {
            Ok(options) => Some(options),
            Err(option_errors) => {
                for (field, messages) in option_errors.0 {
                    for message in messages {
                        errors.add(field.clone(), message);
                    }
                }
                None
            }
        };

        match (question, expires_at, options) {
            (Some(question), Some(expires_at), Some(options)) if errors.is_empty() => Ok(Self {
                owner_id,
                question,
                expires_at,
                options,
            }),
            _ => Err(errors),
        }
    }
}
