use super::domain::RankedApplicant;

/// Case-insensitive match against email, name, school, and major. A blank query keeps
/// everyone. Ranks are left untouched so filtered rows still show their standing.
pub fn filter_applicants<'a>(
    ranked: &'a [RankedApplicant],
    query: &str,
) -> Vec<&'a RankedApplicant> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return ranked.iter().collect();
    }

    ranked
        .iter()
        .filter(|applicant| matches_query(applicant, &needle))
        .collect()
}

fn matches_query(applicant: &RankedApplicant, needle: &str) -> bool {
    let record = &applicant.record;
    let contains = |value: &str| value.to_lowercase().contains(needle);

    contains(record.email.as_str())
        || contains(record.name.as_str())
        || record.school.as_deref().is_some_and(contains)
        || record.major.as_deref().is_some_and(contains)
}
