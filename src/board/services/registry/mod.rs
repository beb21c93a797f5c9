//! Board registry: identity allocation, ownership and the live board graph.

mod queries;
mod rebuild;
mod tasks;

pub use rebuild::RebuildSummary;

use super::{RegistryError, RegistryResult, WriteThrough};
use crate::account::domain::EmailAddress;
use crate::account::ports::SessionGate;
use crate::board::{
    domain::{Board, BoardId, BoardName, ColumnOrdinal, TaskChange, TaskId, WipLimit},
    ports::{BoardStore, BoardWrite},
};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Registry-wide identifier counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IdAllocator {
    next_board: BoardId,
    next_task: TaskId,
}

impl IdAllocator {
    const INITIAL_BOARD: BoardId = BoardId::new(1);
    const INITIAL_TASK: TaskId = TaskId::new(0);

    const fn resume(next_board: BoardId, next_task: TaskId) -> Self {
        Self {
            next_board,
            next_task,
        }
    }

    const fn allocate_board(&mut self) -> BoardId {
        let id = self.next_board;
        self.next_board = id.successor();
        id
    }

    const fn peek_task(&self) -> TaskId {
        self.next_task
    }

    const fn commit_task(&mut self) {
        self.next_task = self.next_task.successor();
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::resume(Self::INITIAL_BOARD, Self::INITIAL_TASK)
    }
}

/// The top-level authority over every board.
///
/// Boards are held in a primary map keyed by id, with a secondary index from
/// owner email to the ids that owner holds. Every successful mutation is
/// mirrored into the row store through [`WriteThrough`] before returning.
///
/// The registry is a single-writer structure: mutating operations take
/// `&mut self`, so callers sharing it across threads must wrap it in a lock.
///
/// Mutating operations and user-scoped reads require the caller to be logged
/// in according to the [`SessionGate`].
pub struct BoardRegistry<S, G, C>
where
    S: BoardStore,
    G: SessionGate,
    C: Clock + Send + Sync,
{
    boards: BTreeMap<BoardId, Board>,
    owner_index: BTreeMap<EmailAddress, BTreeSet<BoardId>>,
    ids: IdAllocator,
    sync: WriteThrough<S>,
    sessions: Arc<G>,
    clock: Arc<C>,
}

impl<S, G, C> BoardRegistry<S, G, C>
where
    S: BoardStore,
    G: SessionGate,
    C: Clock + Send + Sync,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new(store: Arc<S>, sessions: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            boards: BTreeMap::new(),
            owner_index: BTreeMap::new(),
            ids: IdAllocator::default(),
            sync: WriteThrough::new(store),
            sessions,
            clock,
        }
    }

    /// Returns the id the next created board will receive.
    #[must_use]
    pub const fn next_board_id(&self) -> BoardId {
        self.ids.next_board
    }

    /// Returns the id the next added task will receive.
    #[must_use]
    pub const fn next_task_id(&self) -> TaskId {
        self.ids.peek_task()
    }

    fn authorize(&self, raw_email: &str) -> RegistryResult<EmailAddress> {
        let email = EmailAddress::new(raw_email)?;
        if !self.sessions.is_logged_in(&email)? {
            return Err(RegistryError::NotLoggedIn(email));
        }
        Ok(email)
    }

    fn index_owner(&mut self, owner: EmailAddress, id: BoardId) {
        self.owner_index.entry(owner).or_default().insert(id);
    }

    fn unindex_owner(&mut self, owner: &EmailAddress, id: BoardId) {
        if let Some(ids) = self.owner_index.get_mut(owner) {
            ids.remove(&id);
            if ids.is_empty() {
                self.owner_index.remove(owner);
            }
        }
    }

    fn owned_by<'a>(&'a self, owner: &EmailAddress) -> impl Iterator<Item = &'a Board> + 'a {
        self.owner_index
            .get(owner)
            .into_iter()
            .flatten()
            .filter_map(|id| self.boards.get(id))
    }

    /// Resolves a board the caller owns.
    ///
    /// A member asking for a board they do not own gets
    /// [`RegistryError::NotOwner`] rather than a not-found error.
    fn owned_board_id(&self, owner: &EmailAddress, name: &BoardName) -> RegistryResult<BoardId> {
        if let Some(board) = self.owned_by(owner).find(|board| board.name() == name) {
            return Ok(board.id());
        }
        if self.member_board_id(owner, name).is_ok() {
            return Err(RegistryError::NotOwner {
                email: owner.clone(),
                name: name.clone(),
            });
        }
        Err(RegistryError::BoardNotFound {
            email: owner.clone(),
            name: name.clone(),
        })
    }

    /// Resolves a board by name among those the user belongs to. On
    /// ambiguity the lowest id wins.
    fn member_board_id(&self, email: &EmailAddress, name: &BoardName) -> RegistryResult<BoardId> {
        self.boards
            .values()
            .find(|board| board.name() == name && board.is_member(email))
            .map(Board::id)
            .ok_or_else(|| RegistryError::BoardNotFound {
                email: email.clone(),
                name: name.clone(),
            })
    }

    /// Creates a board owned by `email` and returns its id.
    ///
    /// The board row, its three unbounded columns and the owner's membership
    /// row are written through.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`], a blank-name
    /// [`RegistryError::Domain`] error or [`RegistryError::BoardNameTaken`].
    pub fn create_board(&mut self, email: &str, board_name: &str) -> RegistryResult<BoardId> {
        let owner = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        if self.owned_by(&owner).any(|board| board.name() == &name) {
            return Err(RegistryError::BoardNameTaken { owner, name });
        }

        let id = self.ids.allocate_board();
        let board = Board::new(id, name.clone(), owner.clone());
        let mut writes = vec![BoardWrite::InsertBoard {
            board: id,
            name,
            owner: owner.clone(),
        }];
        writes.extend(board.columns().iter().map(|column| BoardWrite::InsertColumn {
            board: id,
            ordinal: column.ordinal(),
            limit: column.limit(),
        }));
        writes.push(BoardWrite::InsertMember {
            board: id,
            email: owner.clone(),
        });

        self.boards.insert(id, board);
        self.index_owner(owner.clone(), id);
        self.sync.mirror(writes);
        tracing::info!(board = %id, %owner, "board created");
        Ok(id)
    }

    /// Deletes a board the caller owns, with its tasks, columns and
    /// memberships.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`] or [`RegistryError::NotOwner`].
    pub fn delete_board(&mut self, email: &str, board_name: &str) -> RegistryResult<()> {
        let owner = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let id = self.owned_board_id(&owner, &name)?;

        self.boards.remove(&id);
        self.unindex_owner(&owner, id);
        self.sync.mirror([
            BoardWrite::DeleteBoardTasks(id),
            BoardWrite::DeleteColumns(id),
            BoardWrite::DeleteBoardMembers(id),
            BoardWrite::DeleteBoard(id),
        ]);
        tracing::info!(board = %id, %owner, "board deleted");
        Ok(())
    }

    /// Hands a board to one of its members.
    ///
    /// The new owner does not need to be logged in.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`], [`RegistryError::NotOwner`],
    /// [`RegistryError::TransferCollision`] or
    /// [`RegistryError::NewOwnerNotMember`].
    pub fn transfer_ownership(
        &mut self,
        current_owner: &str,
        new_owner: &str,
        board_name: &str,
    ) -> RegistryResult<()> {
        let owner = self.authorize(current_owner)?;
        let heir = EmailAddress::new(new_owner)?;
        let name = BoardName::new(board_name)?;
        let id = self.owned_board_id(&owner, &name)?;

        if self
            .owner_index
            .get(&heir)
            .is_some_and(|ids| ids.contains(&id))
        {
            return Err(RegistryError::TransferCollision { owner: heir, board: id });
        }
        let board = self
            .boards
            .get_mut(&id)
            .ok_or(RegistryError::UnknownBoard(id))?;
        if !board.is_member(&heir) {
            return Err(RegistryError::NewOwnerNotMember(heir));
        }
        board.transfer_to(&heir)?;

        self.unindex_owner(&owner, id);
        self.index_owner(heir.clone(), id);
        self.sync.mirror([BoardWrite::UpdateOwner {
            board: id,
            owner: heir.clone(),
        }]);
        tracing::info!(board = %id, from = %owner, to = %heir, "board ownership transferred");
        Ok(())
    }

    /// Adds the caller to a board found by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::UnknownBoard`] or an already-a-member
    /// [`RegistryError::Domain`] error.
    pub fn join_board(&mut self, email: &str, board_id: BoardId) -> RegistryResult<()> {
        let member = self.authorize(email)?;
        let board = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?;
        board.join(&member)?;
        self.sync.mirror([BoardWrite::InsertMember {
            board: board_id,
            email: member,
        }]);
        Ok(())
    }

    /// Removes the caller from a board found by id and unassigns their
    /// Backlog and In Progress tasks there.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::UnknownBoard`], [`RegistryError::OwnerCannotLeave`]
    /// or a not-a-member [`RegistryError::Domain`] error.
    pub fn leave_board(&mut self, email: &str, board_id: BoardId) -> RegistryResult<()> {
        let member = self.authorize(email)?;
        let board = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?;
        if board.owner() == &member {
            return Err(RegistryError::OwnerCannotLeave(board_id));
        }
        let unassigned = board.leave(&member)?;

        let mut writes = vec![BoardWrite::DeleteMember {
            board: board_id,
            email: member,
        }];
        writes.extend(
            unassigned
                .into_iter()
                .map(|(ordinal, task)| BoardWrite::UpdateTask {
                    board: board_id,
                    ordinal,
                    task,
                    change: TaskChange::Assignee(None),
                }),
        );
        self.sync.mirror(writes);
        Ok(())
    }

    /// Sets the WIP limit of a column on a board the caller owns.
    ///
    /// `limit` is a positive count or [`WipLimit::UNBOUNDED_SENTINEL`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`], an invalid-limit or
    /// limit-below-count [`RegistryError::Domain`] error,
    /// [`RegistryError::BoardNotFound`] or [`RegistryError::NotOwner`].
    pub fn limit_column(
        &mut self,
        email: &str,
        board_name: &str,
        ordinal: ColumnOrdinal,
        limit: i64,
    ) -> RegistryResult<()> {
        let owner = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let wip_limit = WipLimit::from_raw(limit)?;
        let id = self.owned_board_id(&owner, &name)?;
        self.boards
            .get_mut(&id)
            .ok_or(RegistryError::UnknownBoard(id))?
            .set_column_limit(ordinal, wip_limit)?;
        self.sync.mirror([BoardWrite::UpdateColumnLimit {
            board: id,
            ordinal,
            limit: wip_limit,
        }]);
        Ok(())
    }
}
