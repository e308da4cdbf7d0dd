//! Raw commit records
//!
//! A record is newline-separated: subject, body lines, then a fixed trailer
//! of hash, date, author name and author email.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use bumpkit_core::CommitFormatError;

/// Trailer fields following the body
const TRAILER_LEN: usize = 4;

/// Subject, at least one body line and the trailer
const MIN_LINES: usize = 2 + TRAILER_LEN;

/// A raw record split into its fields
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawRecord<'a> {
    pub subject: &'a str,
    pub body: String,
    pub hash: &'a str,
    pub date: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Split and validate a raw record
    pub fn split(raw: &'a str) -> Result<Self, CommitFormatError> {
        let mut lines: Vec<&str> = raw.split('\n').collect();
        if lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }

        if lines.len() < MIN_LINES {
            return Err(CommitFormatError::TooFewFields { found: lines.len() });
        }

        let trailer = lines.len() - TRAILER_LEN;
        let (hash, date, name, email) = (
            lines[trailer],
            lines[trailer + 1],
            lines[trailer + 2],
            lines[trailer + 3],
        );

        if !is_hash(hash) {
            return Err(CommitFormatError::InvalidHash(hash.to_string()));
        }
        if !is_date(date) {
            return Err(CommitFormatError::InvalidDate(date.to_string()));
        }
        // An email-shaped name only signals a shift when the email slot isn't one
        if name.trim().is_empty() || is_date(name) || (is_email(name) && !is_email(email)) {
            return Err(CommitFormatError::InvalidName(name.to_string()));
        }
        if !is_email(email) {
            return Err(CommitFormatError::InvalidEmail(email.to_string()));
        }

        Ok(Self {
            subject: lines[0].trim(),
            body: lines[1..trailer].join("\n").trim().to_string(),
            hash,
            date,
            name,
            email,
        })
    }

    /// `subject + "\n" + body`, trimmed, with runs of blank lines collapsed
    pub fn message(&self) -> String {
        let mut out: Vec<&str> = Vec::new();
        let mut previous_blank = false;

        for line in self.subject.lines().chain(self.body.lines()) {
            let blank = line.trim().is_empty();
            if blank && previous_blank {
                continue;
            }
            out.push(if blank { "" } else { line });
            previous_blank = blank;
        }

        out.join("\n").trim().to_string()
    }
}

fn is_hash(value: &str) -> bool {
    (4..=64).contains(&value.len()) && value.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_date(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_email(value: &str) -> bool {
    value.contains('@') && !value.chars().any(char::is_whitespace)
}
