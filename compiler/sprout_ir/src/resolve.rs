//! Forward-reference resolution.
//!
//! Walks the graph reachable from a set of roots and rewrites every edge
//! that points at a `Reference` so it points at the reference's final
//! target. Afterwards no reachable edge leads to a placeholder; the
//! placeholders themselves stay in the arena, unreachable.

use rustc_hash::FxHashSet;

use crate::{IrError, RuleArena, RuleId, RuleKind};

impl RuleArena {
    /// Follow a chain of bound references to the first real rule.
    ///
    /// Returns `id` itself when it is not a reference.
    pub fn follow_references(&self, id: RuleId) -> Result<RuleId, IrError> {
        let mut current = id;
        // A chain longer than the arena must revisit some reference.
        for _ in 0..=self.len() {
            match self.kind(current) {
                RuleKind::Reference(Some(target)) => current = *target,
                RuleKind::Reference(None) => {
                    return Err(IrError::UnboundReference { rule: current });
                }
                _ => return Ok(current),
            }
        }
        Err(IrError::ReferenceCycle { rule: id })
    }

    /// Rewrite all reference edges reachable from `roots`.
    ///
    /// Returns the roots with references replaced by their targets, in the
    /// same order. Running it again on a resolved graph changes nothing.
    pub fn resolve_references(&mut self, roots: &[RuleId]) -> Result<Vec<RuleId>, IrError> {
        let resolved_roots = roots
            .iter()
            .map(|&root| self.follow_references(root))
            .collect::<Result<Vec<_>, _>>()?;

        let mut visited = FxHashSet::default();
        let mut pending = resolved_roots.clone();
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            for slot in 0..self.kind(id).children().len() {
                let child = self.kind(id).children()[slot];
                let target = self.follow_references(child)?;
                if target != child {
                    self.get_mut(id).kind_mut().children_mut()[slot] = target;
                }
                if !visited.contains(&target) {
                    pending.push(target);
                }
            }
        }
        Ok(resolved_roots)
    }

    /// Check whether any edge reachable from `roots` still leads to a
    /// reference (bound or not).
    pub fn has_unresolved(&self, roots: &[RuleId]) -> bool {
        let mut visited = FxHashSet::default();
        let mut pending = roots.to_vec();
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            if self.get(id).is_reference() {
                return true;
            }
            pending.extend(self.kind(id).children().iter().copied());
        }
        false
    }

    /// All rules reachable from `roots`, each once, in depth-first pre-order.
    pub fn reachable(&self, roots: &[RuleId]) -> Vec<RuleId> {
        let mut visited = FxHashSet::default();
        let mut order = Vec::new();
        let mut pending: Vec<RuleId> = roots.iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            pending.extend(self.kind(id).children().iter().rev().copied());
        }
        order
    }
}
