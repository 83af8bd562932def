use serde::{Deserialize, Deserializer, Serialize};

/// Bucket used for applicants who did not report a school.
pub const UNKNOWN_SCHOOL: &str = "Unknown";

/// Identifier wrapper for applicants (the applicant's user id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Self-reported gender from the application form.
///
/// Serializes as snake_case. Deserializes leniently through [`Gender::from_label`], so form
/// labels such as `"Non-Binary"` are accepted and unknown values become [`Gender::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
    PreferNotToAnswer,
}

impl Gender {
    /// Lenient parse of the labels the application form stores. Unrecognized labels
    /// land in [`Gender::Other`].
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Self::Male,
            "female" | "f" => Self::Female,
            "non-binary" | "nonbinary" | "non_binary" | "non binary" => Self::NonBinary,
            "prefer not to answer" | "prefer_not_to_answer" => Self::PreferNotToAnswer,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-Binary",
            Self::Other => "Other",
            Self::PreferNotToAnswer => "Prefer not to answer",
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Reviewed applicant as fetched for the rankings board. Read-only input to the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    pub avg_originality: f64,
    pub avg_technicality: f64,
    pub avg_passion: f64,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub referral: bool,
}

impl ApplicantRecord {
    /// School name used for quota bookkeeping and statistics.
    pub fn school_bucket(&self) -> &str {
        match self.school.as_deref().map(str::trim) {
            Some(school) if !school.is_empty() => school,
            _ => UNKNOWN_SCHOOL,
        }
    }

    pub fn unweighted_total(&self) -> f64 {
        self.avg_originality + self.avg_technicality + self.avg_passion
    }
}

/// Outcome of quota allocation for one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaStatus {
    Accepted,
    Promoted,
    QuotaExceeded,
    NoSpace,
}

impl QuotaStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Promoted => "promoted",
            Self::QuotaExceeded => "quota_exceeded",
            Self::NoSpace => "no_space",
        }
    }

    /// Whether the applicant holds a seat in the class.
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Accepted | Self::Promoted)
    }
}

/// An applicant annotated by ranking and, later, allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedApplicant {
    #[serde(flatten)]
    pub record: ApplicantRecord,
    pub composite_score: f64,
    pub rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_status: Option<QuotaStatus>,
}

impl RankedApplicant {
    pub fn school_bucket(&self) -> &str {
        self.record.school_bucket()
    }

    pub fn is_admitted(&self) -> bool {
        self.quota_status
            .map(QuotaStatus::is_admitted)
            .unwrap_or(false)
    }
}
