use indexmap::IndexMap;

/// Error raised by a command body. Carries only a message so the engine
/// stays independent of any particular command set.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CommandError(String);

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        CommandError(message.into())
    }
}

/// Error type for history operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("no command named {0:?}")]
    UnknownCommand(String),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// A command body: mutates the state and returns the arguments its inverse
/// needs to restore the pre-call state exactly.
pub type CommandFn<S, A> = fn(&mut S, &A) -> Result<A, CommandError>;

/// A named command's `(perform, undo)` pair. Involutions register the same
/// fn for both.
#[derive(Debug)]
pub struct CommandSpec<S, A> {
    pub perform: CommandFn<S, A>,
    pub undo: CommandFn<S, A>,
}

// Derived Clone/Copy would bound S and A; fn pointers never need that.
impl<S, A> Clone for CommandSpec<S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for CommandSpec<S, A> {}

/// One applied command: the name and args that ran, plus the undo-args its
/// perform returned. Carries the spec so undo/redo never re-resolve names.
#[derive(Debug)]
struct Record<S, A> {
    name: &'static str,
    spec: CommandSpec<S, A>,
    args: A,
    undo_args: A,
}

/// Generic undo/redo engine over named reversible commands. `past` holds
/// applied records (most recent last), `future` holds undone ones;
/// performing anything new empties `future`.
#[derive(Debug)]
pub struct History<S, A> {
    commands: IndexMap<&'static str, CommandSpec<S, A>>,
    past: Vec<Record<S, A>>,
    future: Vec<Record<S, A>>,
}

impl<S, A> Default for History<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> History<S, A> {
    pub fn new() -> Self {
        History {
            commands: IndexMap::new(),
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, perform: CommandFn<S, A>, undo: CommandFn<S, A>) {
        self.commands.insert(name, CommandSpec { perform, undo });
    }

    /// Registered command names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Execute a named command. On success the record lands on `past` and
    /// `future` is emptied; on any error nothing is recorded.
    pub fn perform(&mut self, state: &mut S, name: &str, args: A) -> Result<(), HistoryError> {
        let (name, spec) = self
            .commands
            .get_key_value(name)
            .map(|(n, s)| (*n, *s))
            .ok_or_else(|| HistoryError::UnknownCommand(name.to_string()))?;
        let undo_args = (spec.perform)(state, &args)?;
        self.future.clear();
        self.past.push(Record {
            name,
            spec,
            args,
            undo_args,
        });
        Ok(())
    }

    /// Undo the most recent command. Returns false (leaving state alone)
    /// when there is nothing to undo.
    pub fn undo(&mut self, state: &mut S) -> Result<bool, CommandError> {
        let Some(record) = self.past.pop() else {
            return Ok(false);
        };
        (record.spec.undo)(state, &record.undo_args)?;
        self.future.push(record);
        Ok(true)
    }

    /// Re-apply the most recently undone command. Returns false when there
    /// is nothing to redo.
    pub fn redo(&mut self, state: &mut S) -> Result<bool, CommandError> {
        let Some(record) = self.future.pop() else {
            return Ok(false);
        };
        (record.spec.perform)(state, &record.args)?;
        self.past.push(record);
        Ok(true)
    }

    /// Replace the args of the top `past` record in place, without running
    /// anything and without touching `future`. Coalesces an in-progress
    /// edit into a single undoable step.
    pub fn update(&mut self, args: A) {
        if let Some(top) = self.past.last_mut() {
            top.args = args;
        }
    }

    /// Drop both stacks. Used when the whole state is replaced (import),
    /// since old records no longer invert anything real.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Name of the command that would be undone next
    pub fn last_performed(&self) -> Option<&'static str> {
        self.past.last().map(|r| r.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The engine is domain-agnostic; exercise it over a toy counter.
    struct Counter {
        value: i64,
    }

    fn add(state: &mut Counter, args: &i64) -> Result<i64, CommandError> {
        state.value += args;
        Ok(*args)
    }

    fn subtract(state: &mut Counter, args: &i64) -> Result<i64, CommandError> {
        state.value -= args;
        Ok(*args)
    }

    fn fail(_state: &mut Counter, _args: &i64) -> Result<i64, CommandError> {
        Err(CommandError::new("nope"))
    }

    fn counter_history() -> History<Counter, i64> {
        let mut history = History::new();
        history.register("add", add, subtract);
        history.register("fail", fail, fail);
        history
    }

    #[test]
    fn unknown_command_is_an_error() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        let err = history.perform(&mut state, "bogus", 1).unwrap_err();
        assert!(matches!(err, HistoryError::UnknownCommand(name) if name == "bogus"));
        assert_eq!(state.value, 0);
        assert_eq!(history.past_len(), 0);
    }

    #[test]
    fn perform_then_undo_restores_state() {
        let mut history = counter_history();
        let mut state = Counter { value: 10 };
        history.perform(&mut state, "add", 5).unwrap();
        assert_eq!(state.value, 15);
        assert!(history.undo(&mut state).unwrap());
        assert_eq!(state.value, 10);
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 1);
    }

    #[test]
    fn undo_then_redo_restores_the_performed_state() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        history.perform(&mut state, "add", 7).unwrap();
        history.undo(&mut state).unwrap();
        assert!(history.redo(&mut state).unwrap());
        assert_eq!(state.value, 7);
        assert_eq!(history.past_len(), 1);
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn perform_clears_future() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        history.perform(&mut state, "add", 1).unwrap();
        history.perform(&mut state, "add", 2).unwrap();
        history.undo(&mut state).unwrap();
        assert!(history.can_redo());
        history.perform(&mut state, "add", 9).unwrap();
        assert!(!history.can_redo());
        assert!(!history.redo(&mut state).unwrap());
        assert_eq!(state.value, 10);
    }

    #[test]
    fn undo_and_redo_are_no_ops_when_empty() {
        let mut history = counter_history();
        let mut state = Counter { value: 3 };
        assert!(!history.undo(&mut state).unwrap());
        assert!(!history.redo(&mut state).unwrap());
        assert_eq!(state.value, 3);
    }

    #[test]
    fn failed_perform_records_nothing() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        history.perform(&mut state, "add", 1).unwrap();
        history.undo(&mut state).unwrap();
        let err = history.perform(&mut state, "fail", 1);
        assert!(err.is_err());
        // Neither stack was touched by the failed perform
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 1);
    }

    #[test]
    fn update_replaces_only_the_top_args() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        history.perform(&mut state, "add", 4).unwrap();
        history.update(6);
        assert_eq!(history.past_len(), 1);
        assert_eq!(history.future_len(), 0);
        // Undo still uses the original undo-args; redo uses the new args
        history.undo(&mut state).unwrap();
        assert_eq!(state.value, 0);
        history.redo(&mut state).unwrap();
        assert_eq!(state.value, 6);
    }

    #[test]
    fn update_on_empty_history_is_a_no_op() {
        let mut history = counter_history();
        history.update(9);
        assert_eq!(history.past_len(), 0);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        history.perform(&mut state, "add", 1).unwrap();
        history.perform(&mut state, "add", 2).unwrap();
        history.undo(&mut state).unwrap();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn names_come_back_in_registration_order() {
        let history = counter_history();
        let names: Vec<&str> = history.names().collect();
        assert_eq!(names, vec!["add", "fail"]);
    }

    #[test]
    fn last_performed_tracks_the_top_record() {
        let mut history = counter_history();
        let mut state = Counter { value: 0 };
        assert_eq!(history.last_performed(), None);
        history.perform(&mut state, "add", 1).unwrap();
        assert_eq!(history.last_performed(), Some("add"));
    }
}
