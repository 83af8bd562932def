use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::RosterImportError;
use crate::workflows::rankings::{ApplicantId, ApplicantRecord, Gender, ReviewScore};

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<ApplicantRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row?;
        // Header is line 1.
        let line = records.len() as u64 + 2;
        let referral = optional_flag(row.referral.as_deref(), line, "referral")?;

        records.push(ApplicantRecord {
            id: ApplicantId(row.id),
            name: row.name,
            email: row.email,
            school: row.school,
            major: row.major,
            avg_originality: row.avg_originality,
            avg_technicality: row.avg_technicality,
            avg_passion: row.avg_passion,
            gender: row.gender.as_deref().map(Gender::from_label),
            referral,
        });
    }

    Ok(records)
}

pub(crate) fn parse_reviews<R: Read>(reader: R) -> Result<Vec<ReviewScore>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut reviews = Vec::new();

    for row in csv_reader.deserialize::<ReviewRow>() {
        let row = row?;
        let line = reviews.len() as u64 + 2;
        let completed = required_flag(&row.completed, line, "completed")?;
        let referral = optional_flag(row.referral.as_deref(), line, "referral")?;

        reviews.push(ReviewScore {
            applicant_id: ApplicantId(row.applicant_id),
            reviewer_id: row.reviewer_id,
            originality: row.originality,
            technicality: row.technicality,
            passion: row.passion,
            completed,
            referral,
        });
    }

    Ok(reviews)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    school: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    major: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    avg_originality: f64,
    avg_technicality: f64,
    avg_passion: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    referral: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    applicant_id: String,
    reviewer_id: String,
    originality: f64,
    technicality: f64,
    passion: f64,
    completed: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    referral: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn required_flag(value: &str, line: u64, column: &'static str) -> Result<bool, RosterImportError> {
    parse_flag(value).ok_or_else(|| RosterImportError::InvalidFlag {
        line,
        column,
        value: value.to_string(),
    })
}

fn optional_flag(
    value: Option<&str>,
    line: u64,
    column: &'static str,
) -> Result<bool, RosterImportError> {
    value.map_or(Ok(false), |value| required_flag(value, line, column))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
