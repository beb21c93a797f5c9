//! Read-only views over the live board graph. None of these touch the row
//! store.

use super::BoardRegistry;
use crate::account::domain::EmailAddress;
use crate::account::ports::SessionGate;
use crate::board::{
    domain::{Board, BoardId, BoardName, Column, ColumnOrdinal, Task, WipLimit},
    ports::BoardStore,
    services::{RegistryError, RegistryResult},
};
use mockable::Clock;
use std::collections::BTreeMap;

impl<S, G, C> BoardRegistry<S, G, C>
where
    S: BoardStore,
    G: SessionGate,
    C: Clock + Send + Sync,
{
    /// Returns every board in id order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    /// Returns the board with `board_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBoard`].
    pub fn board(&self, board_id: BoardId) -> RegistryResult<&Board> {
        self.boards
            .get(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))
    }

    fn member_board(&self, email: &EmailAddress, board_name: &str) -> RegistryResult<&Board> {
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(email, &name)?;
        self.board(board_id)
    }

    /// Returns the ids of every board the caller belongs to, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`] or
    /// [`RegistryError::Session`] for an unknown user.
    pub fn user_boards(&self, email: &str) -> RegistryResult<Vec<BoardId>> {
        let member = self.authorize(email)?;
        Ok(self
            .boards
            .values()
            .filter(|board| board.is_member(&member))
            .map(Board::id)
            .collect())
    }

    /// Returns every other owner's board ids, keyed by owner.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEmail`].
    pub fn all_boards(&self, email: &str) -> RegistryResult<BTreeMap<EmailAddress, Vec<BoardId>>> {
        let caller = EmailAddress::new(email)?;
        Ok(self
            .owner_index
            .iter()
            .filter(|(owner, _)| **owner != caller)
            .map(|(owner, ids)| (owner.clone(), ids.iter().copied().collect()))
            .collect())
    }

    /// Returns the In Progress tasks assigned to the caller across every
    /// board they belong to.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`] or
    /// [`RegistryError::Session`] for an unknown user.
    pub fn in_progress_tasks(&self, email: &str) -> RegistryResult<Vec<Task>> {
        let member = self.authorize(email)?;
        Ok(self
            .boards
            .values()
            .filter(|board| board.is_member(&member))
            .flat_map(|board| board.in_progress_tasks_of(&member))
            .cloned()
            .collect())
    }

    /// Returns the three columns of a board the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`] or
    /// [`RegistryError::BoardNotFound`].
    pub fn columns(&self, email: &str, board_name: &str) -> RegistryResult<&[Column; 3]> {
        let member = self.authorize(email)?;
        Ok(self.member_board(&member, board_name)?.columns())
    }

    /// Returns one column of a board the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`] or
    /// [`RegistryError::BoardNotFound`].
    pub fn column(
        &self,
        email: &str,
        board_name: &str,
        ordinal: ColumnOrdinal,
    ) -> RegistryResult<&Column> {
        let member = self.authorize(email)?;
        Ok(self.member_board(&member, board_name)?.column(ordinal))
    }

    /// Returns the WIP limit of a column.
    ///
    /// # Errors
    ///
    /// See [`BoardRegistry::column`].
    pub fn column_limit(
        &self,
        email: &str,
        board_name: &str,
        ordinal: ColumnOrdinal,
    ) -> RegistryResult<WipLimit> {
        Ok(self.column(email, board_name, ordinal)?.limit())
    }

    /// Returns the display name of a column.
    ///
    /// # Errors
    ///
    /// See [`BoardRegistry::column`].
    pub fn column_name(
        &self,
        email: &str,
        board_name: &str,
        ordinal: ColumnOrdinal,
    ) -> RegistryResult<&'static str> {
        Ok(self.column(email, board_name, ordinal)?.ordinal().display_name())
    }

    /// Returns the name of a board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBoard`].
    pub fn board_name(&self, board_id: BoardId) -> RegistryResult<&BoardName> {
        Ok(self.board(board_id)?.name())
    }

    /// Returns the owner of a board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBoard`].
    pub fn board_owner(&self, board_id: BoardId) -> RegistryResult<&EmailAddress> {
        Ok(self.board(board_id)?.owner())
    }

    /// Returns the members of a board the caller belongs to, in email order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEmail`] or
    /// [`RegistryError::BoardNotFound`].
    pub fn board_members(&self, email: &str, board_name: &str) -> RegistryResult<Vec<EmailAddress>> {
        let member = EmailAddress::new(email)?;
        Ok(self
            .member_board(&member, board_name)?
            .members()
            .iter()
            .cloned()
            .collect())
    }
}
