use chiedza_core::datasets::DatasetKind;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Bootstrap,
    Login,
    SignOut,
    LoadGroups,
    LoadMembers,
    LoadLoans,
    SaveSettings,
    AddGroup,
}

impl TaskKind {
    pub fn for_dataset(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Groups => TaskKind::LoadGroups,
            DatasetKind::Members => TaskKind::LoadMembers,
            DatasetKind::Loans => TaskKind::LoadLoans,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// The reducer claims the slot with `begin` when it emits the effect, so a
/// completion is only accepted for the most recently started task of a kind.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    /// Records the cancel token, unless the task was superseded meanwhile.
    pub fn on_started(&mut self, started: &TaskStarted) {
        if self.active == Some(started.id) {
            self.cancel = started.cancel.clone();
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Forgets the active task, returning its cancel token.
    pub fn clear(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub bootstrap: TaskState,
    pub login: TaskState,
    pub sign_out: TaskState,
    pub load_groups: TaskState,
    pub load_members: TaskState,
    pub load_loans: TaskState,
    pub save_settings: TaskState,
    pub add_group: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Bootstrap => &mut self.bootstrap,
            TaskKind::Login => &mut self.login,
            TaskKind::SignOut => &mut self.sign_out,
            TaskKind::LoadGroups => &mut self.load_groups,
            TaskKind::LoadMembers => &mut self.load_members,
            TaskKind::LoadLoans => &mut self.load_loans,
            TaskKind::SaveSettings => &mut self.save_settings,
            TaskKind::AddGroup => &mut self.add_group,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.bootstrap.is_running()
            || self.login.is_running()
            || self.sign_out.is_running()
            || self.load_groups.is_running()
            || self.load_members.is_running()
            || self.load_loans.is_running()
            || self.save_settings.is_running()
            || self.add_group.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_completion_is_rejected() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();

        let first = seq.next_id();
        state.begin(first);
        let second = seq.next_id();
        state.begin(second);

        assert!(!state.finish_if_active(first));
        assert!(state.finish_if_active(second));
        assert!(!state.is_running());
    }

    #[test]
    fn test_cleared_task_drops_completion_and_yields_token() {
        let mut state = TaskState::default();
        let id = TaskId(7);
        state.begin(id);
        state.on_started(&TaskStarted {
            id,
            cancel: Some(CancellationToken::new()),
        });

        let token = state.clear();
        assert!(token.is_some());
        assert!(!state.finish_if_active(id));
    }

    #[test]
    fn test_started_for_stale_task_keeps_no_token() {
        let mut state = TaskState::default();
        state.begin(TaskId(2));
        state.on_started(&TaskStarted {
            id: TaskId(1),
            cancel: Some(CancellationToken::new()),
        });
        assert!(state.cancel.is_none());
    }
}
