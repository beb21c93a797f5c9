//! Task entity and its validated fields.

use super::{BoardDomainError, TaskId};
use crate::account::domain::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum task description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 300;

/// Task title of 1 to 50 characters that is not all whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validates a title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TitleLength`] for an empty or oversized
    /// title and [`BoardDomainError::BlankTitle`] for a whitespace-only one.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let text = value.into();
        let length = text.chars().count();
        if length == 0 || length > MAX_TITLE_LENGTH {
            return Err(BoardDomainError::TitleLength {
                length,
                max: MAX_TITLE_LENGTH,
            });
        }
        if text.trim().is_empty() {
            return Err(BoardDomainError::BlankTitle);
        }
        Ok(Self(text))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task description of 1 to 300 characters that is not all whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Validates a description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DescriptionLength`] for an empty or
    /// oversized description and [`BoardDomainError::BlankDescription`] for a
    /// whitespace-only one.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let text = value.into();
        let length = text.chars().count();
        if length == 0 || length > MAX_DESCRIPTION_LENGTH {
            return Err(BoardDomainError::DescriptionLength {
                length,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }
        if text.trim().is_empty() {
            return Err(BoardDomainError::BlankDescription);
        }
        Ok(Self(text))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable task field named by an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// The title.
    Title,
    /// The description.
    Description,
    /// The due date.
    DueDate,
}

impl TaskField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "due_date",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskField {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "due_date" | "dueDate" => Ok(Self::DueDate),
            other => Err(BoardDomainError::UnknownField(other.to_owned())),
        }
    }
}

/// Value carried by an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// New text for the title or description.
    Text(String),
    /// New due date.
    Date(DateTime<Utc>),
}

/// A single field change applied to a task, as reported to the row store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    /// The title was replaced.
    Title(TaskTitle),
    /// The description was replaced.
    Description(TaskDescription),
    /// The due date was replaced.
    DueDate(DateTime<Utc>),
    /// The assignee was set or cleared.
    Assignee(Option<EmailAddress>),
}

/// Input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Requested title.
    pub title: String,
    /// Requested description.
    pub description: String,
    /// Requested due date, which must not be in the past.
    pub due_date: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft from its parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date,
        }
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date, which may by now lie in the past.
    pub due_date: DateTime<Utc>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted assignee; `None` when the task is open.
    pub assignee: Option<EmailAddress>,
}

/// A unit of work on a board.
///
/// An assigned task may only be changed by its assignee. An open task can be
/// changed or claimed by anyone the board has already authorised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    created_at: DateTime<Utc>,
    due_date: DateTime<Utc>,
    title: TaskTitle,
    description: TaskDescription,
    assignee: Option<EmailAddress>,
}

impl Task {
    /// Creates an open task stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the title, description or due date
    /// is invalid.
    pub fn new(id: TaskId, draft: TaskDraft, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let now = clock.utc();
        ensure_not_past(draft.due_date, now)?;
        Ok(Self {
            id,
            created_at: now,
            due_date: draft.due_date,
            title: TaskTitle::new(draft.title)?,
            description: TaskDescription::new(draft.description)?,
            assignee: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            created_at: data.created_at,
            due_date: data.due_date,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&EmailAddress> {
        self.assignee.as_ref()
    }

    /// Returns whether `email` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, email: &EmailAddress) -> bool {
        self.assignee.as_ref() == Some(email)
    }

    /// Returns whether `email` may change the task: it is open or assigned
    /// to `email`.
    #[must_use]
    pub fn is_open_to(&self, email: &EmailAddress) -> bool {
        self.assignee.as_ref().is_none_or(|assignee| assignee == email)
    }

    fn ensure_open_to(&self, email: &EmailAddress) -> Result<(), BoardDomainError> {
        if self.is_open_to(email) {
            Ok(())
        } else {
            Err(BoardDomainError::NotAssignee {
                task: self.id,
                email: email.clone(),
            })
        }
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TitleLength`] or
    /// [`BoardDomainError::BlankTitle`].
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<TaskChange, BoardDomainError> {
        self.title = TaskTitle::new(value)?;
        Ok(TaskChange::Title(self.title.clone()))
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DescriptionLength`] or
    /// [`BoardDomainError::BlankDescription`].
    pub fn set_description(
        &mut self,
        value: impl Into<String>,
    ) -> Result<TaskChange, BoardDomainError> {
        self.description = TaskDescription::new(value)?;
        Ok(TaskChange::Description(self.description.clone()))
    }

    /// Replaces the due date.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DueDateInPast`] when `due` is before the
    /// current time.
    pub fn set_due_date(
        &mut self,
        due: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<TaskChange, BoardDomainError> {
        ensure_not_past(due, clock.utc())?;
        self.due_date = due;
        Ok(TaskChange::DueDate(due))
    }

    /// Assigns the task to `assignee` on behalf of `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotAssignee`] when the task is assigned to
    /// someone other than `requester`.
    pub fn assign(
        &mut self,
        requester: &EmailAddress,
        assignee: &EmailAddress,
    ) -> Result<TaskChange, BoardDomainError> {
        self.ensure_open_to(requester)?;
        self.assignee = Some(assignee.clone());
        Ok(TaskChange::Assignee(self.assignee.clone()))
    }

    /// Clears the assignee. Returns `false` when the task was already open.
    pub fn unassign(&mut self) -> bool {
        self.assignee.take().is_some()
    }

    /// Applies a tagged field update on behalf of `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotAssignee`] when someone else holds the
    /// task, [`BoardDomainError::WrongValueType`] when the value does not fit
    /// the field, or the field's own validation error.
    pub fn update(
        &mut self,
        requester: &EmailAddress,
        field: TaskField,
        value: FieldValue,
        clock: &impl Clock,
    ) -> Result<TaskChange, BoardDomainError> {
        self.ensure_open_to(requester)?;
        match (field, value) {
            (TaskField::Title, FieldValue::Text(text)) => self.set_title(text),
            (TaskField::Description, FieldValue::Text(text)) => self.set_description(text),
            (TaskField::DueDate, FieldValue::Date(due)) => self.set_due_date(due, clock),
            (mismatched, _) => Err(BoardDomainError::WrongValueType(mismatched)),
        }
    }
}

fn ensure_not_past(due: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), BoardDomainError> {
    if due < now {
        return Err(BoardDomainError::DueDateInPast { due });
    }
    Ok(())
}
