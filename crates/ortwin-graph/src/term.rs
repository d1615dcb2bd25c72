//! Triple components: resources, terms, facts.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identifier for a node in the fact graph (a step, phase, plan, tool, ...).
///
/// Identifiers are plain local names; the materialization step strips the
/// ontology namespace before the snapshot reaches this crate. [`label`]
/// renders an identifier for the operator by replacing underscores with
/// spaces, e.g. `Calibrate_Instruments` -> `Calibrate Instruments`.
///
/// [`label`]: Resource::label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(String);

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form of the identifier.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl From<&str> for Resource {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Resource {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object position of a fact: a node identifier or a typed literal.
///
/// The snapshot carries two literal kinds: booleans (`isFinalPhase true`) and
/// integers (`phaseOrder 2`). Everything else is a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Bool(bool),
    Int(i64),
    Node(Resource),
}

impl Term {
    pub fn node(name: impl Into<String>) -> Self {
        Term::Node(Resource::new(name))
    }

    #[must_use]
    pub fn as_node(&self) -> Option<&Resource> {
        match self {
            Term::Node(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::Bool(b) => write!(f, "{b}"),
            Term::Int(n) => write!(f, "{n}"),
            Term::Node(r) => write!(f, "{r}"),
        }
    }
}

/// One `(subject, predicate, object)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub subject: Resource,
    pub predicate: Resource,
    pub object: Term,
}

impl Fact {
    pub fn new(subject: impl Into<Resource>, predicate: impl Into<Resource>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Fact whose object is a node identifier.
    pub fn link(
        subject: impl Into<Resource>,
        predicate: impl Into<Resource>,
        object: impl Into<Resource>,
    ) -> Self {
        Self::new(subject, predicate, Term::Node(object.into()))
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
