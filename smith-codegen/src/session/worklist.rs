//! Id-based record of every candidate a session has seen.

use buildsmith_ir::QualifiedName;
use indexmap::IndexMap;

/// Stable handle to a worklist entry. Ids are assigned in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkId(usize);

/// Where a candidate stands across rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkState {
    /// Seen but not yet emitted.
    Pending {
        deferrals: usize,
        /// `name: Type` of each property unresolved at the last deferral.
        unresolved: Vec<String>,
    },
    Emitted {
        output: QualifiedName,
    },
    /// Failed a lint or a collision check.
    Rejected,
    /// Deferred past the retry bound.
    Abandoned,
}

impl WorkState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, WorkState::Pending { .. })
    }
}

#[derive(Debug, Default)]
pub struct Worklist {
    entries: IndexMap<QualifiedName, WorkState>,
}

impl Worklist {
    /// The id of `name`, adding a pending entry on first sight.
    pub fn track(&mut self, name: &QualifiedName) -> WorkId {
        if let Some(index) = self.entries.get_index_of(name) {
            return WorkId(index);
        }
        let (index, _) = self.entries.insert_full(
            name.clone(),
            WorkState::Pending {
                deferrals: 0,
                unresolved: Vec::new(),
            },
        );
        WorkId(index)
    }

    pub fn is_settled(&self, name: &QualifiedName) -> bool {
        self.entries.get(name).is_some_and(WorkState::is_settled)
    }

    /// Whether some entry already produced `output`.
    pub fn has_claimed(&self, output: &QualifiedName) -> bool {
        self.entries
            .values()
            .any(|state| matches!(state, WorkState::Emitted { output: o } if o == output))
    }

    /// Count one more deferral, returning the total so far.
    pub fn defer(&mut self, id: WorkId, unresolved: Vec<String>) -> usize {
        match self.entries.get_index_mut(id.0) {
            Some((_, WorkState::Pending { deferrals, unresolved: last })) => {
                *deferrals += 1;
                *last = unresolved;
                *deferrals
            }
            _ => 0,
        }
    }

    pub fn emit(&mut self, id: WorkId, output: QualifiedName) {
        self.settle(id, WorkState::Emitted { output });
    }

    pub fn reject(&mut self, id: WorkId) {
        self.settle(id, WorkState::Rejected);
    }

    pub fn abandon(&mut self, id: WorkId) {
        self.settle(id, WorkState::Abandoned);
    }

    /// Entries still waiting, in first-seen order.
    pub fn pending(&self) -> impl Iterator<Item = (WorkId, &QualifiedName, &WorkState)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (_, state))| !state.is_settled())
            .map(|(index, (name, state))| (WorkId(index), name, state))
    }

    pub fn has_pending(&self) -> bool {
        self.pending().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn settle(&mut self, id: WorkId, state: WorkState) {
        if let Some((_, slot)) = self.entries.get_index_mut(id.0) {
            *slot = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> QualifiedName {
        QualifiedName::parse(path).unwrap()
    }

    #[test]
    fn test_track_is_idempotent() {
        let mut worklist = Worklist::default();
        let a = worklist.track(&name("m::A"));
        let b = worklist.track(&name("m::B"));
        assert_eq!(worklist.track(&name("m::A")), a);
        assert_ne!(a, b);
        assert_eq!(worklist.len(), 2);
    }

    #[test]
    fn test_defer_counts_and_keeps_last_reason() {
        let mut worklist = Worklist::default();
        let id = worklist.track(&name("m::A"));
        assert_eq!(worklist.defer(id, vec!["x: X".into()]), 1);
        assert_eq!(worklist.defer(id, vec!["y: Y".into()]), 2);
        let (_, _, state) = worklist.pending().next().unwrap();
        assert_eq!(
            state,
            &WorkState::Pending {
                deferrals: 2,
                unresolved: vec!["y: Y".into()]
            }
        );
    }

    #[test]
    fn test_settled_entries_leave_pending() {
        let mut worklist = Worklist::default();
        let a = worklist.track(&name("m::A"));
        let b = worklist.track(&name("m::B"));
        worklist.track(&name("m::C"));

        worklist.emit(a, name("m::ABuilder"));
        worklist.reject(b);

        assert!(worklist.is_settled(&name("m::A")));
        assert!(worklist.has_claimed(&name("m::ABuilder")));
        assert!(!worklist.has_claimed(&name("m::BBuilder")));
        let pending: Vec<_> = worklist.pending().map(|(_, n, _)| n.to_string()).collect();
        assert_eq!(pending, vec!["m::C"]);
        assert_eq!(worklist.defer(a, Vec::new()), 0);
    }
}
