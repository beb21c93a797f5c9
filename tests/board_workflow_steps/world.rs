//! Shared world state for board workflow BDD scenarios.

use kanban::board::domain::Task;
use kanban::{ErrorKind, InMemoryKanban, Response};
use rstest::fixture;

/// Password used for every scenario user.
pub const PASSWORD: &str = "Secret12";

/// Outcome of the most recent `When` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Category of the rejection, when there was one.
    pub error_kind: Option<ErrorKind>,
    /// Message of the rejection, when there was one.
    pub error_message: Option<String>,
}

/// Scenario world for board workflow behaviour tests.
pub struct BoardWorld {
    /// System under test.
    pub system: InMemoryKanban,
    /// Outcome of the latest `When` step.
    pub last_outcome: Option<Outcome>,
}

impl BoardWorld {
    /// Creates a world over an empty in-memory system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: InMemoryKanban::in_memory(),
            last_outcome: None,
        }
    }

    /// Records the envelope of the step's operation.
    pub fn record<T>(&mut self, response: Response<T>) {
        self.last_outcome = Some(Outcome {
            error_kind: response.error_kind,
            error_message: response.error_message,
        });
    }

    /// Finds a task on a board as seen by `email`, with its column name.
    pub fn find_task(
        &self,
        email: &str,
        board: &str,
        task_id: u64,
    ) -> Result<(String, Task), eyre::Report> {
        let columns = self
            .system
            .columns(email, board)
            .return_value
            .ok_or_else(|| eyre::eyre!("{email} cannot see board {board}"))?;
        columns
            .into_iter()
            .find_map(|column| {
                let name = column.ordinal().display_name().to_owned();
                column
                    .tasks()
                    .iter()
                    .find(|task| task.id().value() == task_id)
                    .cloned()
                    .map(|task| (name, task))
            })
            .ok_or_else(|| eyre::eyre!("task {task_id} not found on {board}"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Converts a failed envelope into a step error.
pub fn ensure_ok<T>(response: Response<T>, step: &str) -> Result<Option<T>, eyre::Report> {
    match response.error_message {
        Some(message) => Err(eyre::eyre!("{step} failed: {message}")),
        None => Ok(response.return_value),
    }
}
