//! Fact-graph snapshot for procedure world state
//!
//! Provides the mutable set of `(subject, predicate, object)` facts the
//! procedure engine runs against:
//! - [`Resource`], [`Term`], [`Fact`] — typed triple components
//! - [`Pattern`] — wildcard triple matching
//! - [`Mutation`] — reversible add/remove operations
//! - [`GraphStore`] — the snapshot itself, with set semantics
//!
//! The store is deliberately small: callers get `insert`/`remove`/`matching`
//! and nothing else leaks the underlying representation. Anything resembling
//! a query language lives with the callers as typed lookups.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod pattern;
pub mod store;
pub mod term;

pub use pattern::Pattern;
pub use store::{GraphStore, Mutation, MutationOp};
pub use term::{Fact, Resource, Term};
