//! Task mutations as tagged commands.
//!
//! Every change the manager can make is one [`Mutation`]. Its
//! [`MutationKind`] states whether the local collection is changed before the
//! store confirms (optimistic) or only after (confirmed).

use super::task::Task;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Edit,
    Toggle,
    Delete,
    Reorder,
}

impl MutationKind {
    /// Optimistic mutations are applied locally before the store call and
    /// are not reverted when the call fails.
    pub const fn is_optimistic(self) -> bool {
        matches!(self, MutationKind::Reorder)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MutationKind::Add => "add",
            MutationKind::Edit => "edit",
            MutationKind::Toggle => "toggle",
            MutationKind::Delete => "delete",
            MutationKind::Reorder => "reorder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add {
        title: String,
        description: String,
        due_date: Option<NaiveDate>,
    },
    Edit {
        id: String,
        title: String,
        description: String,
        due_date: Option<NaiveDate>,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
    Reorder {
        sequence: Vec<String>,
    },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Add { .. } => MutationKind::Add,
            Mutation::Edit { .. } => MutationKind::Edit,
            Mutation::Toggle { .. } => MutationKind::Toggle,
            Mutation::Delete { .. } => MutationKind::Delete,
            Mutation::Reorder { .. } => MutationKind::Reorder,
        }
    }
}

/// Result of applying a [`Mutation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Canonical record after add, edit or toggle.
    Task(Task),
    /// Id of the deleted task.
    Removed(String),
    /// Number of tasks whose order changed.
    Reordered(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reorder_is_optimistic() {
        let optimistic: Vec<_> = [
            MutationKind::Add,
            MutationKind::Edit,
            MutationKind::Toggle,
            MutationKind::Delete,
            MutationKind::Reorder,
        ]
        .into_iter()
        .filter(|kind| kind.is_optimistic())
        .collect();
        assert_eq!(optimistic, vec![MutationKind::Reorder]);
    }

    #[test]
    fn mutation_reports_kind() {
        let m = Mutation::Reorder { sequence: vec![] };
        assert_eq!(m.kind(), MutationKind::Reorder);
        assert_eq!(Mutation::Delete { id: "a".into() }.kind().as_str(), "delete");
    }
}
