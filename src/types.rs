// src/types.rs

//! Small value types shared by the graph builder and the scheduler client.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

/// Boxed future returned by the collaborator traits (scheduler, auth).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Scheduler-assigned job number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(JobId)
            .map_err(|_| format!("invalid job id: {s:?}"))
    }
}

/// "Do not start until all of these jobs have finished."
///
/// This is the dependency handle threaded through graph construction. A
/// handle for a single job is a one-element set; the empty set means no hold
/// at all. Joining two handles is a set union, which is the only fan-in
/// operation the builder needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    jobs: BTreeSet<JobId>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for exactly one submitted job.
    pub fn single(job: JobId) -> Self {
        let mut jobs = BTreeSet::new();
        jobs.insert(job);
        Self { jobs }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn contains(&self, job: JobId) -> bool {
        self.jobs.contains(&job)
    }

    pub fn iter(&self) -> impl Iterator<Item = JobId> + '_ {
        self.jobs.iter().copied()
    }

    /// Fan-in: a new handle waiting on everything in `self` and `other`.
    pub fn union(&self, other: &DependencySet) -> DependencySet {
        Self {
            jobs: self.jobs.union(&other.jobs).copied().collect(),
        }
    }

    /// Serialise to the scheduler's `-hold_jid` wire format (`12,13,14`).
    ///
    /// Returns `None` for the empty set so callers never emit an empty hold.
    pub fn to_hold_arg(&self) -> Option<String> {
        if self.jobs.is_empty() {
            return None;
        }
        let ids: Vec<String> = self.jobs.iter().map(|j| j.to_string()).collect();
        Some(ids.join(","))
    }
}

impl Extend<JobId> for DependencySet {
    fn extend<I: IntoIterator<Item = JobId>>(&mut self, iter: I) {
        self.jobs.extend(iter);
    }
}

impl Extend<DependencySet> for DependencySet {
    fn extend<I: IntoIterator<Item = DependencySet>>(&mut self, iter: I) {
        for set in iter {
            self.jobs.extend(set.jobs);
        }
    }
}

impl FromIterator<JobId> for DependencySet {
    fn from_iter<I: IntoIterator<Item = JobId>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<DependencySet> for DependencySet {
    fn from_iter<I: IntoIterator<Item = DependencySet>>(iter: I) -> Self {
        let mut out = DependencySet::new();
        out.extend(iter);
        out
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_hold_arg() {
            Some(s) => f.write_str(&s),
            None => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_set_union() {
        let a: DependencySet = [JobId(3), JobId(1)].into_iter().collect();
        let b: DependencySet = [JobId(1), JobId(7)].into_iter().collect();
        let u = a.union(&b);
        assert_eq!(u.len(), 3);
        assert_eq!(u.to_hold_arg().as_deref(), Some("1,3,7"));
    }

    #[test]
    fn empty_set_has_no_hold() {
        assert_eq!(DependencySet::new().to_hold_arg(), None);
        assert_eq!(DependencySet::new().to_string(), "-");
    }

    #[test]
    fn single_is_one_element_set() {
        let s = DependencySet::single(JobId(42));
        assert_eq!(s.len(), 1);
        assert!(s.contains(JobId(42)));
        assert_eq!(s.to_hold_arg().as_deref(), Some("42"));
    }

    #[test]
    fn collecting_sets_flattens() {
        let sets = vec![
            DependencySet::single(JobId(1)),
            DependencySet::single(JobId(2)),
            DependencySet::single(JobId(2)),
        ];
        let all: DependencySet = sets.into_iter().collect();
        assert_eq!(all.iter().collect::<Vec<_>>(), vec![JobId(1), JobId(2)]);
    }

    #[test]
    fn job_id_parses_trimmed() {
        assert_eq!(" 123\n".parse::<JobId>(), Ok(JobId(123)));
        assert!("abc".parse::<JobId>().is_err());
    }
}
