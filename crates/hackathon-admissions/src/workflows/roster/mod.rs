//! CSV import of reviewed applicant rosters and per-reviewer scores.
//!
//! Roster header:
//! `id,name,email,school,major,gender,avg_originality,avg_technicality,avg_passion,referral`.
//! `school`, `major`, `gender`, and `referral` may be blank; `referral` may be omitted.
//!
//! Review header:
//! `applicant_id,reviewer_id,originality,technicality,passion,completed,referral`.
//! `referral` may be blank or omitted.

mod parser;

use crate::workflows::rankings::{ApplicantRecord, ReviewScore};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidFlag {
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidFlag {
                line,
                column,
                value,
            } => write!(
                f,
                "line {line}: {column} must be true/false/yes/no/1/0, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidFlag { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, RosterImportError> {
        parser::parse_records(reader)
    }
}

pub struct ReviewImporter;

impl ReviewImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ReviewScore>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ReviewScore>, RosterImportError> {
        parser::parse_reviews(reader)
    }
}
