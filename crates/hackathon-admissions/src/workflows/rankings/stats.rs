use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Gender, RankedApplicant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderShare {
    pub gender: Gender,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolShare {
    pub school: String,
    pub count: usize,
    pub percentage: f64,
}

/// Gender and school make-up of the top of the ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionStats {
    pub window: usize,
    pub considered: usize,
    pub genders: Vec<GenderShare>,
    pub schools: Vec<SchoolShare>,
}

/// Distribution over the first `window` entries of `ranked`.
///
/// Missing gender counts as [`Gender::Other`]; missing school counts as `Unknown`.
/// Percentages are of `min(window, ranked.len())`, rounded to two decimals.
pub fn distribution_stats(ranked: &[RankedApplicant], window: usize) -> DistributionStats {
    let top = &ranked[..window.min(ranked.len())];
    let considered = top.len();

    let mut genders: BTreeMap<Gender, usize> = BTreeMap::new();
    let mut schools: BTreeMap<&str, usize> = BTreeMap::new();
    for applicant in top {
        let gender = applicant.record.gender.unwrap_or(Gender::Other);
        *genders.entry(gender).or_insert(0) += 1;
        *schools.entry(applicant.school_bucket()).or_insert(0) += 1;
    }

    let genders = genders
        .into_iter()
        .map(|(gender, count)| GenderShare {
            gender,
            label: gender.label(),
            count,
            percentage: percentage(count, considered),
        })
        .collect();

    let mut schools: Vec<SchoolShare> = schools
        .into_iter()
        .map(|(school, count)| SchoolShare {
            school: school.to_string(),
            count,
            percentage: percentage(count, considered),
        })
        .collect();
    schools.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.school.cmp(&b.school)));

    DistributionStats {
        window,
        considered,
        genders,
        schools,
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn empty_ranking_has_no_buckets() {
        let stats = distribution_stats(&[], 450);
        assert_eq!(stats.considered, 0);
        assert!(stats.genders.is_empty());
        assert!(stats.schools.is_empty());
    }
}
