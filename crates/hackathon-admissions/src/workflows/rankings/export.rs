use std::io::Write;

use serde::Serialize;

use super::allocation::AllocationResult;
use super::domain::RankedApplicant;

/// File name offered for the accepted email download.
pub const ACCEPTED_EMAILS_FILENAME: &str = "accepted-emails.txt";

/// Accepted and promoted emails, one per line in rank order.
pub fn accepted_emails(result: &AllocationResult) -> String {
    let mut out = String::new();
    for applicant in &result.accepted {
        out.push_str(&applicant.record.email);
        out.push('\n');
    }
    out
}

const RANKED_CSV_HEADER: [&str; 6] = [
    "rank",
    "name",
    "email",
    "school",
    "composite_score",
    "quota_status",
];

#[derive(Serialize)]
struct RankedRow<'a> {
    rank: usize,
    name: &'a str,
    email: &'a str,
    school: &'a str,
    composite_score: String,
    quota_status: &'a str,
}

/// Write the ranked table as CSV. The header row is written even for an empty ranking.
pub fn write_ranked_csv<W: Write>(
    ranked: &[RankedApplicant],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RANKED_CSV_HEADER)?;

    for applicant in ranked {
        csv_writer.serialize(RankedRow {
            rank: applicant.rank,
            name: &applicant.record.name,
            email: &applicant.record.email,
            school: applicant.school_bucket(),
            composite_score: format!("{:.3}", applicant.composite_score),
            quota_status: applicant
                .quota_status
                .map(|status| status.label())
                .unwrap_or(""),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
