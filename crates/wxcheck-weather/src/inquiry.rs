//! Run-all-checks aggregation.
//!
//! An [`Inquiry`] holds one read-only subject and applies every registered
//! predicate to it in order. A `Fail` verdict never stops the inquiry; only a
//! predicate *error* does, and then no result is produced at all.

use serde::Serialize;

/// Outcome of one check, carrying its display message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum Verdict {
    Pass(String),
    Fail(String),
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self::Pass(message.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Pass(message) | Self::Fail(message) => message,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            Self::Pass(message) | Self::Fail(message) => message,
        }
    }
}

/// Sequential, non-short-circuiting check runner over a shared subject
#[derive(Debug)]
pub struct Inquiry<'a, S> {
    subject: &'a S,
    verdicts: Vec<Verdict>,
}

impl<'a, S> Inquiry<'a, S> {
    pub fn subject(subject: &'a S) -> Self {
        Self {
            subject,
            verdicts: Vec::new(),
        }
    }

    /// Apply `predicate` and record its verdict, pass or fail.
    ///
    /// # Errors
    ///
    /// Returns the predicate's error; the inquiry is consumed.
    pub fn inquire<E, F>(mut self, predicate: F) -> Result<Self, E>
    where
        F: FnOnce(&S) -> Result<Verdict, E>,
    {
        let verdict = predicate(self.subject)?;
        self.verdicts.push(verdict);
        Ok(self)
    }

    /// Finish the inquiry
    pub fn join(self) -> InquiryResult {
        InquiryResult {
            verdicts: self.verdicts,
        }
    }
}

/// Verdicts in the order their predicates were registered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InquiryResult {
    verdicts: Vec<Verdict>,
}

impl InquiryResult {
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(Verdict::is_pass)
    }

    /// Display messages, pass and fail alike
    pub fn messages(&self) -> Vec<String> {
        self.verdicts
            .iter()
            .map(|v| v.message().to_string())
            .collect()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.verdicts.into_iter().map(Verdict::into_message).collect()
    }
}
