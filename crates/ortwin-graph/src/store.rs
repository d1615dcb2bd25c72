//! The mutable fact snapshot and reversible mutations.

use crate::pattern::Pattern;
use crate::term::{Fact, Resource, Term};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Direction of a [`Mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOp {
    Add,
    Remove,
}

/// One reversible change to a [`GraphStore`].
///
/// Sensor events are sequences of mutations; the repair flow applies their
/// inverses when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mutation {
    pub op: MutationOp,
    pub fact: Fact,
}

impl Mutation {
    pub fn add(fact: Fact) -> Self {
        Self {
            op: MutationOp::Add,
            fact,
        }
    }

    pub fn remove(fact: Fact) -> Self {
        Self {
            op: MutationOp::Remove,
            fact,
        }
    }

    /// The mutation that undoes this one (add <-> remove).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            op: match self.op {
                MutationOp::Add => MutationOp::Remove,
                MutationOp::Remove => MutationOp::Add,
            },
            fact: self.fact.clone(),
        }
    }
}

/// Mutable snapshot of world-state facts.
///
/// Set semantics: duplicate adds and absent removes are no-ops. Iteration
/// order is insertion order, which keeps query results deterministic for a
/// given mutation history; equivalent graphs reached by different histories
/// may iterate differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore {
    facts: IndexSet<Fact>,
}

impl GraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact. Returns `false` when it was already present.
    pub fn insert(&mut self, fact: Fact) -> bool {
        self.facts.insert(fact)
    }

    /// Remove a fact. Returns `false` when it was absent.
    pub fn remove(&mut self, fact: &Fact) -> bool {
        self.facts.shift_remove(fact)
    }

    #[must_use]
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// Apply a mutation. Returns whether the store changed.
    pub fn apply(&mut self, mutation: &Mutation) -> bool {
        match mutation.op {
            MutationOp::Add => self.insert(mutation.fact.clone()),
            MutationOp::Remove => self.remove(&mutation.fact),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// All facts matching a wildcard pattern, in insertion order.
    pub fn matching<'a>(&'a self, pattern: &'a Pattern) -> impl Iterator<Item = &'a Fact> {
        self.facts.iter().filter(move |f| pattern.matches(f))
    }

    /// Objects of all `(subject, predicate, ?)` facts.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Resource,
        predicate: &'a Resource,
    ) -> impl Iterator<Item = &'a Term> {
        self.facts
            .iter()
            .filter(move |f| f.subject == *subject && f.predicate == *predicate)
            .map(|f| &f.object)
    }

    /// Subjects of all `(?, predicate, object)` facts.
    pub fn subjects<'a>(
        &'a self,
        predicate: &'a Resource,
        object: &'a Term,
    ) -> impl Iterator<Item = &'a Resource> {
        self.facts
            .iter()
            .filter(move |f| f.predicate == *predicate && f.object == *object)
            .map(|f| &f.subject)
    }
}

impl FromIterator<Fact> for GraphStore {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fact(s: &str, p: &str, o: &str) -> Fact {
        Fact::link(s, p, o)
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = GraphStore::new();
        assert!(store.insert(fact("a", "p", "b")));
        assert!(!store.insert(fact("a", "p", "b")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = GraphStore::new();
        assert!(!store.remove(&fact("a", "p", "b")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_objects_and_subjects() {
        let store: GraphStore = [
            fact("Step_A1_1", "followedBy", "Step_B1_1"),
            fact("Step_A1_2", "followedBy", "Step_B1_1"),
            Fact::new("A_Phase1", "phaseOrder", Term::Int(1)),
        ]
        .into_iter()
        .collect();

        let subject = Resource::new("Step_A1_1");
        let pred = Resource::new("followedBy");
        let objs: Vec<_> = store.objects(&subject, &pred).collect();
        assert_eq!(objs, vec![&Term::node("Step_B1_1")]);

        let object = Term::node("Step_B1_1");
        let subs: Vec<_> = store.subjects(&pred, &object).collect();
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn test_matching_pattern() {
        let store: GraphStore = [
            fact("s1", "p", "o1"),
            fact("s1", "q", "o2"),
            fact("s2", "p", "o1"),
        ]
        .into_iter()
        .collect();

        let pattern = Pattern::any().with_predicate("p");
        let hits: Vec<_> = store.matching(&pattern).collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_mutation_inverse_swaps_op() {
        let m = Mutation::add(fact("a", "p", "b"));
        assert_eq!(m.inverse().op, MutationOp::Remove);
        assert_eq!(m.inverse().inverse(), m);
    }

    fn arb_fact() -> impl Strategy<Value = Fact> {
        let name = prop::sample::select(vec!["a", "b", "c", "d"]);
        let pred = prop::sample::select(vec!["p", "q"]);
        (name.clone(), pred, name).prop_map(|(s, p, o)| fact(s, p, o))
    }

    fn arb_mutation() -> impl Strategy<Value = Mutation> {
        (any::<bool>(), arb_fact()).prop_map(|(add, f)| {
            if add {
                Mutation::add(f)
            } else {
                Mutation::remove(f)
            }
        })
    }

    proptest! {
        /// Round-trip law behind the repair flow: undoing the mutations that
        /// actually changed the store, in reverse order, restores it exactly.
        #[test]
        fn prop_effective_mutations_reverse_cleanly(
            base in prop::collection::vec(arb_fact(), 0..8),
            muts in prop::collection::vec(arb_mutation(), 0..12),
        ) {
            let mut store: GraphStore = base.into_iter().collect();
            let before = store.clone();

            let mut applied = Vec::new();
            for m in &muts {
                if store.apply(m) {
                    applied.push(m.clone());
                }
            }
            for m in applied.iter().rev() {
                store.apply(&m.inverse());
            }

            // IndexSet equality ignores order, so compare as sets of facts.
            prop_assert_eq!(store, before);
        }
    }
}
