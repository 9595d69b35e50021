use super::Process;
use crate::config::MatcherKind;

/// Resolves a declared dependency name to the process it refers to.
///
/// Implementations decide what "refers to" means; the graph and impact
/// analyses only ever go through this trait.
pub trait DependencyMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `dependency` refers to `candidate`
    fn matches(&self, dependency: &str, candidate: &Process) -> bool;

    /// First process in slice order that `dependency` refers to
    fn resolve<'a>(&self, dependency: &str, processes: &'a [Process]) -> Option<&'a Process> {
        processes.iter().find(|p| self.matches(dependency, p))
    }
}

/// Case-insensitive substring match of the dependency name against the
/// candidate's title or any of its tags.
///
/// Ambiguous by nature: when several processes share vocabulary the first
/// one in input order wins. Blank names never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyNameMatcher;

impl DependencyMatcher for FuzzyNameMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn matches(&self, dependency: &str, candidate: &Process) -> bool {
        let needle = dependency.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        candidate.title.to_lowercase().contains(&needle)
            || candidate
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Dependencies are process ids
#[derive(Debug, Clone, Copy, Default)]
pub struct IdMatcher;

impl DependencyMatcher for IdMatcher {
    fn name(&self) -> &'static str {
        "id"
    }

    fn matches(&self, dependency: &str, candidate: &Process) -> bool {
        candidate.id == dependency.trim()
    }
}

pub fn matcher_for(kind: MatcherKind) -> Box<dyn DependencyMatcher> {
    match kind {
        MatcherKind::Fuzzy => Box::new(FuzzyNameMatcher),
        MatcherKind::Id => Box::new(IdMatcher),
    }
}
