//! Wildcard triple patterns.

use crate::term::{Fact, Resource, Term};

/// Triple pattern where `None` in a position matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub subject: Option<Resource>,
    pub predicate: Option<Resource>,
    pub object: Option<Term>,
}

impl Pattern {
    /// Pattern matching every fact.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<Resource>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<Resource>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    #[must_use]
    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    #[must_use]
    pub fn matches(&self, fact: &Fact) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == fact.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == fact.predicate)
            && self.object.as_ref().map_or(true, |o| *o == fact.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_matches_everything() {
        let fact = Fact::link("Step_A1_1", "followedBy", "Step_B1_1");
        assert!(Pattern::any().matches(&fact));
    }

    #[test]
    fn test_positions_constrain_independently() {
        let fact = Fact::link("Step_A1_1", "followedBy", "Step_B1_1");

        assert!(Pattern::any().with_subject("Step_A1_1").matches(&fact));
        assert!(Pattern::any().with_predicate("followedBy").matches(&fact));
        assert!(Pattern::any().with_object(Term::node("Step_B1_1")).matches(&fact));

        assert!(!Pattern::any().with_subject("Step_A1_2").matches(&fact));
        assert!(!Pattern::any().with_object(Term::Bool(true)).matches(&fact));
    }
}
