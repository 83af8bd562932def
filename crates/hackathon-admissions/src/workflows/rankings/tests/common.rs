use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::rankings::domain::{ApplicantId, ApplicantRecord, Gender};
use crate::workflows::rankings::repository::{ApplicantRepository, RepositoryError};
use crate::workflows::rankings::{RankingParameters, RankingsService};

pub(super) fn applicant(id: &str, school: Option<&str>, scores: [f64; 3]) -> ApplicantRecord {
    ApplicantRecord {
        id: ApplicantId(id.to_string()),
        name: format!("Applicant {id}"),
        email: format!("{id}@example.com"),
        school: school.map(str::to_string),
        major: None,
        avg_originality: scores[0],
        avg_technicality: scores[1],
        avg_passion: scores[2],
        gender: None,
        referral: false,
    }
}

pub(super) fn with_gender(mut record: ApplicantRecord, gender: Gender) -> ApplicantRecord {
    record.gender = Some(gender);
    record
}

const SCHOOLS: [Option<&str>; 5] = [
    Some("Western"),
    Some("Waterloo"),
    Some("McMaster"),
    Some("Queen's"),
    None,
];

const GENDERS: [Option<Gender>; 4] = [
    Some(Gender::Male),
    Some(Gender::Female),
    Some(Gender::NonBinary),
    None,
];

/// Small deterministic generator so sweeps are reproducible without a property framework.
pub(super) struct Lcg(u64);

impl Lcg {
    pub(super) fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub(super) fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub(super) fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Ratings on the 0..=5 half-point scale reviewers use.
    pub(super) fn rating(&mut self) -> f64 {
        self.below(11) as f64 / 2.0
    }
}

pub(super) fn generated_roster(rng: &mut Lcg, size: usize) -> Vec<ApplicantRecord> {
    (0..size)
        .map(|index| {
            let school = SCHOOLS[rng.below(SCHOOLS.len() as u64) as usize];
            let mut record = applicant(
                &format!("gen-{index:03}"),
                school,
                [rng.rating(), rng.rating(), rng.rating()],
            );
            record.gender = GENDERS[rng.below(GENDERS.len() as u64) as usize];
            record.referral = rng.below(10) == 0;
            record
        })
        .collect()
}

#[derive(Default)]
pub(super) struct InMemoryRoster {
    records: Mutex<Vec<ApplicantRecord>>,
}

impl InMemoryRoster {
    pub(super) fn seeded(records: Vec<ApplicantRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl ApplicantRepository for InMemoryRoster {
    fn all_for_rankings(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Ok(self.records.lock().expect("roster mutex poisoned").clone())
    }

    fn replace_all(&self, roster: Vec<ApplicantRecord>) -> Result<(), RepositoryError> {
        *self.records.lock().expect("roster mutex poisoned") = roster;
        Ok(())
    }
}

pub(super) struct UnavailableRoster;

impl ApplicantRepository for UnavailableRoster {
    fn all_for_rankings(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace_all(&self, _roster: Vec<ApplicantRecord>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with(
    records: Vec<ApplicantRecord>,
    target_size: usize,
) -> Arc<RankingsService<InMemoryRoster>> {
    Arc::new(RankingsService::new(
        Arc::new(InMemoryRoster::seeded(records)),
        RankingParameters::with_target_size(target_size),
        450,
    ))
}

pub(super) async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
