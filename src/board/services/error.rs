//! Service-level errors for board registry operations.

use crate::account::domain::{AccountDomainError, EmailAddress};
use crate::account::ports::SessionError;
use crate::board::{
    domain::{BoardDomainError, BoardId, BoardName},
    ports::BoardStoreError,
};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned by [`super::BoardRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A board, column or task rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// An email argument is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] AccountDomainError),

    /// The session gate does not know the user.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The caller holds no session.
    #[error("user is not logged in: {0}")]
    NotLoggedIn(EmailAddress),

    /// No board with that name is visible to the user.
    #[error("board '{name}' not found for {email}")]
    BoardNotFound {
        /// The requesting user.
        email: EmailAddress,
        /// The requested board name.
        name: BoardName,
    },

    /// No board has that identifier.
    #[error("board doesn't exist: {0}")]
    UnknownBoard(BoardId),

    /// The user is a member of the board but not its owner.
    #[error("user {email} does not own board '{name}'")]
    NotOwner {
        /// The requesting user.
        email: EmailAddress,
        /// The requested board name.
        name: BoardName,
    },

    /// The owner already has a board with that name.
    #[error("{owner} already owns a board named '{name}'")]
    BoardNameTaken {
        /// The owner.
        owner: EmailAddress,
        /// The clashing name.
        name: BoardName,
    },

    /// The owner tried to leave their own board.
    #[error("the owner cannot leave board {0} before transferring it")]
    OwnerCannotLeave(BoardId),

    /// The prospective owner has not joined the board.
    #[error("new owner is not a board member: {0}")]
    NewOwnerNotMember(EmailAddress),

    /// The destination owner already holds the board.
    #[error("{owner} already owns board {board}")]
    TransferCollision {
        /// The destination owner.
        owner: EmailAddress,
        /// The board being transferred.
        board: BoardId,
    },

    /// The row store could not be read or cleared.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

impl RegistryError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidEmail(_) => ErrorKind::Validation,
            Self::NotLoggedIn(_) | Self::NotOwner { .. } => ErrorKind::Authorization,
            Self::Session(_) | Self::BoardNotFound { .. } | Self::UnknownBoard(_) => {
                ErrorKind::NotFound
            }
            Self::BoardNameTaken { .. }
            | Self::OwnerCannotLeave(_)
            | Self::NewOwnerNotMember(_)
            | Self::TransferCollision { .. } => ErrorKind::State,
            Self::Store(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for board registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
