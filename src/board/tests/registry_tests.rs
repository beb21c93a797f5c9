//! Board registry tests: ownership, membership, name resolution and the
//! task workflow over the in-memory store.

use std::sync::{Arc, Mutex, PoisonError};

use super::support::{Harness, MEMBER, OUTSIDER, OWNER, PASSWORD, draft, email, in_days};
use crate::account::{adapters::memory::InMemoryAccountRepository, services::AccountService};
use crate::board::{
    domain::{BoardDomainError, BoardId, ColumnOrdinal, FieldValue, TaskField, TaskId, WipLimit},
    ports::{BoardStore, store::MockBoardStore},
    services::{BoardRegistry, RegistryError},
};
use crate::error::ErrorKind;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

/// A harness with board 1 "Launch" owned by `OWNER` and joined by `MEMBER`.
#[fixture]
fn launched(mut harness: Harness) -> Harness {
    harness
        .registry
        .create_board(OWNER, "Launch")
        .expect("create board");
    harness
        .registry
        .join_board(MEMBER, BoardId::new(1))
        .expect("member joins");
    harness
}

fn kind_of<T>(result: Result<T, RegistryError>) -> Option<ErrorKind> {
    result.err().map(|err| err.kind())
}

#[rstest]
fn boards_get_sequential_ids_and_persisted_columns(mut harness: Harness) {
    let first = harness
        .registry
        .create_board(OWNER, "  Launch ")
        .expect("create");
    let second = harness
        .registry
        .create_board(MEMBER, "Launch")
        .expect("same name, other owner");

    assert_eq!((first.value(), second.value()), (1, 2));
    assert_eq!(harness.registry.next_board_id(), BoardId::new(3));
    assert_eq!(
        harness
            .registry
            .board_name(first)
            .map(|name| name.as_str().to_owned())
            .ok(),
        Some("Launch".to_owned())
    );
    let snapshot = harness.store.snapshot().expect("snapshot");
    assert_eq!(snapshot.boards.len(), 2);
    assert_eq!(snapshot.columns.len(), 6);
    assert_eq!(snapshot.members.len(), 2);
}

#[rstest]
fn board_names_are_unique_per_owner(mut harness: Harness) {
    harness.registry.create_board(OWNER, "Launch").expect("create");

    let result = harness.registry.create_board(OWNER, "Launch");

    assert!(matches!(result, Err(RegistryError::BoardNameTaken { .. })));
    assert_eq!(kind_of(result), Some(ErrorKind::State));
}

#[rstest]
fn mutations_require_a_session(mut harness: Harness) {
    harness.accounts.logout(OWNER).expect("logout");

    let logged_out = harness.registry.create_board(OWNER, "Launch");
    let unknown = harness
        .registry
        .create_board("ghost@example.com", "Launch");

    assert!(matches!(logged_out, Err(RegistryError::NotLoggedIn(_))));
    assert_eq!(kind_of(logged_out), Some(ErrorKind::Authorization));
    assert!(matches!(unknown, Err(RegistryError::Session(_))));
    assert_eq!(kind_of(unknown), Some(ErrorKind::NotFound));
}

#[rstest]
fn blank_board_name_is_rejected(mut harness: Harness) {
    let result = harness.registry.create_board(OWNER, "   ");
    assert!(matches!(
        result,
        Err(RegistryError::Domain(BoardDomainError::BlankBoardName))
    ));
}

#[rstest]
fn joining_twice_fails_without_a_second_row(mut launched: Harness) {
    let result = launched.registry.join_board(MEMBER, BoardId::new(1));

    assert!(matches!(
        result,
        Err(RegistryError::Domain(BoardDomainError::AlreadyMember(_)))
    ));
    let members = launched.store.snapshot().expect("snapshot").members;
    assert_eq!(members.len(), 2);
}

#[rstest]
fn joining_an_unknown_board_is_not_found(mut harness: Harness) {
    let result = harness.registry.join_board(MEMBER, BoardId::new(9));
    assert!(matches!(result, Err(RegistryError::UnknownBoard(_))));
    assert_eq!(kind_of(result), Some(ErrorKind::NotFound));
}

#[rstest]
fn owner_only_operations_reject_members(mut launched: Harness) {
    let delete = launched.registry.delete_board(MEMBER, "Launch");
    let limit = launched
        .registry
        .limit_column(MEMBER, "Launch", ColumnOrdinal::Backlog, 3);
    let stranger = launched.registry.delete_board(OUTSIDER, "Launch");

    assert!(matches!(delete, Err(RegistryError::NotOwner { .. })));
    assert_eq!(kind_of(limit), Some(ErrorKind::Authorization));
    assert!(matches!(stranger, Err(RegistryError::BoardNotFound { .. })));
}

#[rstest]
fn transfer_hands_owner_rights_over_at_once(mut launched: Harness) {
    launched
        .registry
        .transfer_ownership(OWNER, MEMBER, "Launch")
        .expect("transfer");

    assert_eq!(
        launched.registry.board_owner(BoardId::new(1)).ok(),
        Some(&email(MEMBER))
    );
    assert!(matches!(
        launched
            .registry
            .limit_column(OWNER, "Launch", ColumnOrdinal::Backlog, 2),
        Err(RegistryError::NotOwner { .. })
    ));
    launched
        .registry
        .limit_column(MEMBER, "Launch", ColumnOrdinal::Backlog, 2)
        .expect("new owner limits");
    let boards = launched.store.snapshot().expect("snapshot").boards;
    assert_eq!(boards.first().map(|board| board.owner.clone()), Some(email(MEMBER)));
}

#[rstest]
fn transfer_requires_the_heir_to_be_a_member(mut launched: Harness) {
    let result = launched
        .registry
        .transfer_ownership(OWNER, OUTSIDER, "Launch");

    assert!(matches!(result, Err(RegistryError::NewOwnerNotMember(_))));
    assert_eq!(
        launched.registry.board_owner(BoardId::new(1)).ok(),
        Some(&email(OWNER))
    );
}

#[rstest]
fn transfer_to_the_current_owner_fails_closed() {
    let accounts = Arc::new(AccountService::new(Arc::new(
        InMemoryAccountRepository::new(),
    )));
    accounts.register(OWNER, PASSWORD).expect("registration");
    let written = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&written);
    let mut store = MockBoardStore::new();
    store.expect_apply().returning(move |write| {
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(write.label());
        Ok(())
    });
    let mut registry = BoardRegistry::new(Arc::new(store), accounts, Arc::new(DefaultClock));
    let board = registry.create_board(OWNER, "Launch").expect("create");
    let before = registry.all_boards(OUTSIDER).expect("index before");

    let result = registry.transfer_ownership(OWNER, OWNER, "Launch");

    assert!(matches!(
        &result,
        Err(RegistryError::TransferCollision { owner, board: id })
            if owner == &email(OWNER) && *id == board
    ));
    assert_eq!(kind_of(result), Some(ErrorKind::State));
    assert_eq!(registry.board_owner(board).ok(), Some(&email(OWNER)));
    assert_eq!(registry.all_boards(OUTSIDER).ok(), Some(before));
    let labels = written.lock().unwrap_or_else(PoisonError::into_inner).clone();
    assert!(!labels.contains(&"update_owner"), "unexpected writes: {labels:?}");
}

#[rstest]
fn owner_cannot_leave_before_transferring(mut launched: Harness) {
    let result = launched.registry.leave_board(OWNER, BoardId::new(1));
    assert!(matches!(result, Err(RegistryError::OwnerCannotLeave(_))));

    launched
        .registry
        .transfer_ownership(OWNER, MEMBER, "Launch")
        .expect("transfer");
    launched
        .registry
        .leave_board(OWNER, BoardId::new(1))
        .expect("former owner leaves");
}

#[rstest]
fn leaving_unassigns_and_persists_the_change(mut launched: Harness) {
    let task = launched
        .registry
        .add_task(MEMBER, "Launch", draft("Mine"))
        .expect("add");
    launched
        .registry
        .assign_task(MEMBER, "Launch", MEMBER, ColumnOrdinal::Backlog, task)
        .expect("claim");

    launched
        .registry
        .leave_board(MEMBER, BoardId::new(1))
        .expect("leave");

    let snapshot = launched.store.snapshot().expect("snapshot");
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(
        snapshot.tasks.first().map(|row| row.task.assignee.clone()),
        Some(None)
    );
}

#[rstest]
fn delete_board_cascades_for_everyone(mut launched: Harness) {
    launched
        .registry
        .add_task(OWNER, "Launch", draft("Doomed"))
        .expect("add");

    launched
        .registry
        .delete_board(OWNER, "Launch")
        .expect("delete");

    assert!(launched.registry.user_boards(MEMBER).expect("boards").is_empty());
    assert!(launched.store.snapshot().expect("snapshot").is_empty());
    assert!(matches!(
        launched.registry.board(BoardId::new(1)),
        Err(RegistryError::UnknownBoard(_))
    ));
}

#[rstest]
fn task_ids_are_global_and_only_spent_on_success(mut launched: Harness) {
    launched
        .registry
        .create_board(MEMBER, "Side")
        .expect("second board");
    let first = launched
        .registry
        .add_task(OWNER, "Launch", draft("One"))
        .expect("add");
    let rejected = launched.registry.add_task(
        OWNER,
        "Launch",
        draft(&"x".repeat(51)),
    );
    let second = launched
        .registry
        .add_task(MEMBER, "Side", draft("Two"))
        .expect("add");

    assert!(rejected.is_err());
    assert_eq!((first.value(), second.value()), (0, 1));
    assert_eq!(launched.registry.next_task_id(), TaskId::new(2));
}

#[rstest]
fn name_resolution_is_scoped_to_membership(mut launched: Harness) {
    let result = launched
        .registry
        .add_task(OUTSIDER, "Launch", draft("Intruder"));

    assert!(matches!(result, Err(RegistryError::BoardNotFound { .. })));
}

#[rstest]
fn lowest_board_id_wins_on_name_clash(mut launched: Harness) {
    launched
        .registry
        .create_board(MEMBER, "Launch")
        .expect("member's own board");

    let task = launched
        .registry
        .add_task(MEMBER, "Launch", draft("Where"))
        .expect("add");

    let board = launched.registry.board(BoardId::new(1)).expect("board 1");
    assert!(board.task(task).is_ok());
}

#[rstest]
fn done_tasks_are_frozen(mut launched: Harness) {
    let task = launched
        .registry
        .add_task(OWNER, "Launch", draft("T1"))
        .expect("add");
    launched
        .registry
        .assign_task(OWNER, "Launch", OWNER, ColumnOrdinal::Backlog, task)
        .expect("assign");
    assert_eq!(
        launched.registry.advance_task(OWNER, "Launch", task).ok(),
        Some(ColumnOrdinal::InProgress)
    );
    assert_eq!(
        launched.registry.advance_task(OWNER, "Launch", task).ok(),
        Some(ColumnOrdinal::Done)
    );

    let remove = launched.registry.remove_task(OWNER, "Launch", task);
    let update = launched.registry.update_task(
        OWNER,
        "Launch",
        ColumnOrdinal::Done,
        task,
        TaskField::Title,
        FieldValue::Text("Again".to_owned()),
    );
    let advance = launched.registry.advance_task(OWNER, "Launch", task);

    assert!(matches!(
        remove,
        Err(RegistryError::Domain(BoardDomainError::RemoveFromDone(_)))
    ));
    assert!(matches!(
        update,
        Err(RegistryError::Domain(BoardDomainError::UpdateInDone(_)))
    ));
    assert!(matches!(
        advance,
        Err(RegistryError::Domain(BoardDomainError::AlreadyDone(_)))
    ));
}

#[rstest]
fn wip_limit_scenario(mut launched: Harness) {
    launched
        .registry
        .add_task(OWNER, "Launch", draft("First"))
        .expect("add");
    launched
        .registry
        .limit_column(OWNER, "Launch", ColumnOrdinal::Backlog, 1)
        .expect("limit to one");

    let full = launched.registry.add_task(OWNER, "Launch", draft("Second"));
    assert!(matches!(
        full,
        Err(RegistryError::Domain(BoardDomainError::ColumnFull(_)))
    ));

    let zero = launched
        .registry
        .limit_column(OWNER, "Launch", ColumnOrdinal::Backlog, 0);
    assert!(matches!(
        zero,
        Err(RegistryError::Domain(BoardDomainError::InvalidLimit(0)))
    ));

    launched
        .registry
        .limit_column(OWNER, "Launch", ColumnOrdinal::Backlog, 2)
        .expect("raise limit");
    launched
        .registry
        .add_task(OWNER, "Launch", draft("Second"))
        .expect("room again");
    assert_eq!(
        launched
            .registry
            .column_limit(MEMBER, "Launch", ColumnOrdinal::Backlog)
            .map(WipLimit::to_raw)
            .ok(),
        Some(2)
    );
}

#[rstest]
fn update_task_persists_each_field(mut launched: Harness) {
    let task = launched
        .registry
        .add_task(OWNER, "Launch", draft("Draft"))
        .expect("add");
    let due = in_days(12);

    launched
        .registry
        .update_task(
            OWNER,
            "Launch",
            ColumnOrdinal::Backlog,
            task,
            TaskField::Description,
            FieldValue::Text("Polished".to_owned()),
        )
        .expect("description");
    launched
        .registry
        .update_task(
            OWNER,
            "Launch",
            ColumnOrdinal::Backlog,
            task,
            TaskField::DueDate,
            FieldValue::Date(due),
        )
        .expect("due date");

    let snapshot = launched.store.snapshot().expect("snapshot");
    let row = snapshot.tasks.first().expect("task row");
    assert_eq!(row.task.description.as_str(), "Polished");
    assert_eq!(row.task.due_date, due);
}

#[rstest]
fn read_views(mut launched: Harness) {
    launched
        .registry
        .create_board(OUTSIDER, "Elsewhere")
        .expect("outsider board");
    let task = launched
        .registry
        .add_task(MEMBER, "Launch", draft("Busy"))
        .expect("add");
    launched
        .registry
        .assign_task(MEMBER, "Launch", MEMBER, ColumnOrdinal::Backlog, task)
        .expect("claim");
    launched
        .registry
        .advance_task(MEMBER, "Launch", task)
        .expect("advance");

    let in_progress = launched.registry.in_progress_tasks(MEMBER).expect("tasks");
    assert_eq!(in_progress.iter().map(|held| held.id()).collect::<Vec<_>>(), [task]);

    let members = launched
        .registry
        .board_members(OWNER, "Launch")
        .expect("members");
    assert_eq!(members, [email(MEMBER), email(OWNER)]);

    let others = launched.registry.all_boards(OWNER).expect("all boards");
    assert_eq!(others.len(), 1);
    assert_eq!(others.get(&email(OUTSIDER)), Some(&vec![BoardId::new(2)]));

    assert_eq!(
        launched
            .registry
            .column_name(OWNER, "Launch", ColumnOrdinal::InProgress)
            .ok(),
        Some("in progress")
    );
    let columns = launched.registry.columns(OWNER, "Launch").expect("columns");
    assert_eq!(
        columns.each_ref().map(|column| column.tasks().len()),
        [0, 1, 0]
    );
    assert_eq!(
        launched
            .registry
            .column(OWNER, "Launch", ColumnOrdinal::InProgress)
            .map(|column| column.tasks().len())
            .ok(),
        Some(1)
    );
    assert_eq!(launched.registry.boards().count(), 2);
}
