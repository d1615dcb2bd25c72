//! Typed read-only queries over the plan/phase/step structure.
//!
//! This is the query catalogue of the engine: every lookup the navigator,
//! controller, and question answerer need is a named method here, expressed
//! against the [`GraphStore`] primitives. Empty results are valid answers,
//! not errors.

use crate::error::{ProcedureError, StructureError};
use crate::vocab;
use ortwin_graph::{GraphStore, Resource, Term};
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;

/// Result of the successor-phase query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub phase: Resource,
    pub current_order: i64,
    pub next_order: i64,
    /// Start step of the phase plus its co-occurring partner, if any.
    pub first_steps: Vec<Resource>,
}

/// Read-only view of the procedure structure inside a fact snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ProcedureGraph<'a> {
    store: &'a GraphStore,
}

impl<'a> ProcedureGraph<'a> {
    #[must_use]
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Steps reachable from the current step set.
    ///
    /// Union of steps that `follows` a current step, steps a current step is
    /// `followedBy`, and co-occurring partners of anything discovered.
    /// Deduplicated, and never contains a member of `current`. Empty means
    /// the current steps are the last of their phase.
    #[must_use]
    pub fn next_steps(&self, current: &[Resource]) -> Vec<Resource> {
        let follows = Resource::new(vocab::FOLLOWS);
        let followed_by = Resource::new(vocab::FOLLOWED_BY);

        let mut next: Vec<Resource> = Vec::new();
        let push = |step: &Resource, next: &mut Vec<Resource>| {
            if !current.contains(step) && !next.contains(step) {
                next.push(step.clone());
            }
        };

        for step in current {
            let as_object = Term::Node(step.clone());
            for successor in self.store.subjects(&follows, &as_object) {
                push(successor, &mut next);
            }
            for successor in self.store.objects(step, &followed_by) {
                if let Some(successor) = successor.as_node() {
                    push(successor, &mut next);
                }
            }
        }

        // Close over co-occurrence: partners of discovered steps join them.
        let mut i = 0;
        while i < next.len() {
            let partners = self.co_occurring(&next[i]);
            for partner in partners {
                push(&partner, &mut next);
            }
            i += 1;
        }

        next
    }

    /// Co-occurring partners of a step, checked in both edge directions.
    #[must_use]
    pub fn co_occurring(&self, step: &Resource) -> Vec<Resource> {
        let co_occurs = Resource::new(vocab::CO_OCCURS_WITH);
        let as_object = Term::Node(step.clone());

        let mut partners: Vec<Resource> = Vec::new();
        for partner in self.store.objects(step, &co_occurs) {
            if let Some(partner) = partner.as_node() {
                if partner != step && !partners.contains(partner) {
                    partners.push(partner.clone());
                }
            }
        }
        for partner in self.store.subjects(&co_occurs, &as_object) {
            if partner != step && !partners.contains(partner) {
                partners.push(partner.clone());
            }
        }
        partners
    }

    /// The phase of `plan` ordered directly after `phase`.
    ///
    /// `Ok(None)` means no successor exists. More than one candidate phase,
    /// or more than one start step on the successor, is a hard error: the
    /// schema does not enforce uniqueness, so this query does.
    pub fn next_phase(
        &self,
        phase: &Resource,
        plan: &Resource,
    ) -> Result<Option<PhaseTransition>, ProcedureError> {
        let current_order = self
            .phase_order(phase)
            .ok_or_else(|| ProcedureError::MissingPhaseOrder {
                phase: phase.clone(),
            })?;
        let next_order = current_order + 1;

        let candidates: Vec<Resource> = self
            .phases_of(plan)
            .into_iter()
            .filter(|p| self.phase_order(p) == Some(next_order))
            .collect();

        let next = match candidates.len() {
            0 => return Ok(None),
            1 => candidates.into_iter().next().unwrap_or_else(|| unreachable!()),
            rows => {
                return Err(ProcedureError::NextPhaseAmbiguous {
                    phase: phase.clone(),
                    rows,
                })
            }
        };

        let start_step_pred = Resource::new(vocab::PHASE_START_STEP);
        let starts: Vec<Resource> = self
            .store
            .objects(&next, &start_step_pred)
            .filter_map(Term::as_node)
            .cloned()
            .collect();
        if starts.len() != 1 {
            return Err(ProcedureError::NextPhaseAmbiguous {
                phase: phase.clone(),
                rows: starts.len(),
            });
        }
        let start = starts.into_iter().next().unwrap_or_else(|| unreachable!());

        let mut first_steps = vec![start.clone()];
        for partner in self.co_occurring(&start) {
            if !first_steps.contains(&partner) {
                first_steps.push(partner);
            }
        }

        Ok(Some(PhaseTransition {
            phase: next,
            current_order,
            next_order,
            first_steps,
        }))
    }

    /// Phases attached to a plan via `hasPhase`.
    #[must_use]
    pub fn phases_of(&self, plan: &Resource) -> Vec<Resource> {
        let has_phase = Resource::new(vocab::HAS_PHASE);
        self.store
            .objects(plan, &has_phase)
            .filter_map(Term::as_node)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn phase_order(&self, phase: &Resource) -> Option<i64> {
        let pred = Resource::new(vocab::PHASE_ORDER);
        let order = self.store.objects(phase, &pred).find_map(Term::as_int);
        order
    }

    /// Task label of a phase, if one is recorded.
    #[must_use]
    pub fn phase_task(&self, phase: &Resource) -> Option<String> {
        self.first_label(phase, vocab::PHASE_TASK)
    }

    /// Action label of a step, if one is recorded.
    #[must_use]
    pub fn step_action(&self, step: &Resource) -> Option<String> {
        self.first_label(step, vocab::STEP_ACTION)
    }

    /// Action labels of a step set, falling back to the step's own label.
    #[must_use]
    pub fn step_actions(&self, steps: &[Resource]) -> Vec<String> {
        steps
            .iter()
            .map(|s| self.step_action(s).unwrap_or_else(|| s.label()))
            .collect()
    }

    #[must_use]
    pub fn is_final_phase(&self, phase: &Resource) -> bool {
        let pred = Resource::new(vocab::IS_FINAL_PHASE);
        let is_final = self
            .store
            .objects(phase, &pred)
            .any(|t| t.as_bool() == Some(true));
        is_final
    }

    #[must_use]
    pub fn tools_for_steps(&self, steps: &[Resource]) -> Vec<String> {
        self.labels_for_steps(steps, vocab::TOOL_USED)
    }

    #[must_use]
    pub fn actors_for_steps(&self, steps: &[Resource]) -> Vec<String> {
        self.labels_for_steps(steps, vocab::ACTOR_PRESENT)
    }

    #[must_use]
    pub fn capabilities_for_steps(&self, steps: &[Resource]) -> Vec<String> {
        self.labels_for_steps(steps, vocab::CAPABILITY_REQUIRED)
    }

    #[must_use]
    pub fn materials_for_steps(&self, steps: &[Resource]) -> Vec<String> {
        self.labels_for_steps(steps, vocab::MATERIAL_USED)
    }

    /// Check the static invariants of one plan:
    /// ordering edges form a DAG, phase orders are present and distinct,
    /// and exactly one phase is final.
    pub fn validate_structure(&self, plan: &Resource) -> Result<(), StructureError> {
        let phases = self.phases_of(plan);

        let mut seen_orders: Vec<i64> = Vec::new();
        for phase in &phases {
            let order = self
                .phase_order(phase)
                .ok_or_else(|| StructureError::UnorderedPhase {
                    phase: phase.clone(),
                })?;
            if seen_orders.contains(&order) {
                return Err(StructureError::DuplicatePhaseOrder {
                    plan: plan.clone(),
                    order,
                });
            }
            seen_orders.push(order);
        }

        let finals = phases.iter().filter(|p| self.is_final_phase(p)).count();
        if finals != 1 {
            return Err(StructureError::FinalPhaseCount {
                plan: plan.clone(),
                count: finals,
            });
        }

        // follows/followedBy must be acyclic across the whole snapshot.
        let mut ids: HashMap<Resource, usize> = HashMap::new();
        let id_of = |step: &Resource, ids: &mut HashMap<Resource, usize>| {
            let next_id = ids.len();
            *ids.entry(step.clone()).or_insert(next_id)
        };
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for fact in self.store.iter() {
            let Some(object) = fact.object.as_node() else {
                continue;
            };
            // Both predicates point execution-order-forward from predecessor
            // to successor once normalized.
            let edge = match fact.predicate.as_str() {
                vocab::FOLLOWED_BY => Some((&fact.subject, object)),
                vocab::FOLLOWS => Some((object, &fact.subject)),
                _ => None,
            };
            if let Some((earlier, later)) = edge {
                let a = id_of(earlier, &mut ids);
                let b = id_of(later, &mut ids);
                graph.add_edge(a, b, ());
            }
        }
        if is_cyclic_directed(&graph) {
            return Err(StructureError::CycleDetected);
        }

        Ok(())
    }

    fn first_label(&self, subject: &Resource, predicate: &str) -> Option<String> {
        let pred = Resource::new(predicate);
        let label = self
            .store
            .objects(subject, &pred)
            .find_map(Term::as_node)
            .map(Resource::label);
        label
    }

    fn labels_for_steps(&self, steps: &[Resource], predicate: &str) -> Vec<String> {
        let pred = Resource::new(predicate);
        let mut labels: Vec<String> = Vec::new();
        for step in steps {
            for value in self.store.objects(step, &pred) {
                if let Some(node) = value.as_node() {
                    let label = node.label();
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
            }
        }
        labels
    }
}
