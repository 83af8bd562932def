use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-school cap on accepted applicants. A cap of `0`, or no entry, means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolQuotas(BTreeMap<String, usize>);

impl SchoolQuotas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, school: impl Into<String>, cap: usize) -> Self {
        self.set(school, cap);
        self
    }

    pub fn set(&mut self, school: impl Into<String>, cap: usize) {
        self.0.insert(school.into(), cap);
    }

    pub fn remove(&mut self, school: &str) -> Option<usize> {
        self.0.remove(school)
    }

    /// Effective cap for a school, `None` when unlimited.
    pub fn limit_for(&self, school: &str) -> Option<usize> {
        self.0.get(school).copied().filter(|cap| *cap > 0)
    }

    /// Schools with an effective cap.
    pub fn limited(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0
            .iter()
            .filter(|(_, cap)| **cap > 0)
            .map(|(school, cap)| (school.as_str(), *cap))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a `SCHOOL=CAP` pair as given on the command line.
    pub fn parse_entry(raw: &str) -> Result<(String, usize), String> {
        let (school, cap) = raw
            .rsplit_once('=')
            .ok_or_else(|| format!("expected SCHOOL=CAP, got '{raw}'"))?;
        let school = school.trim();
        if school.is_empty() {
            return Err(format!("missing school name in '{raw}'"));
        }
        let cap = cap
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid cap in '{raw}' ({err})"))?;
        Ok((school.to_string(), cap))
    }
}

impl FromIterator<(String, usize)> for SchoolQuotas {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
