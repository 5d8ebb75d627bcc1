//! The member picker shown beside the task form.

use crate::models::Member;

/// Roster members, newest joiners first.
///
/// Filtering only narrows what is displayed; it has no effect on which
/// members a [`TaskForm`](crate::TaskForm) has assigned.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    members: Vec<Member>,
}

impl RosterView {
    pub fn new(mut members: Vec<Member>) -> Self {
        members.sort_by(|a, b| b.join_date.cmp(&a.join_date).then(b.id.cmp(&a.id)));
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members whose name contains `query`, ignoring case. A blank query
    /// matches everyone.
    pub fn filter(&self, query: &str) -> Vec<&Member> {
        let needle = query.trim().to_lowercase();
        self.members
            .iter()
            .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
            .collect()
    }
}
