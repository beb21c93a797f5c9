//! When steps for board workflow BDD scenarios.

use super::world::BoardWorld;
use chrono::{Duration, Utc};
use rstest_bdd_macros::when;

#[when(r#""{email}" adds a task titled "{title}" due in {days:i64} days to "{board}""#)]
fn add_task(world: &mut BoardWorld, email: String, title: String, days: i64, board: String) {
    let due = Utc::now() + Duration::days(days);
    let response = world
        .system
        .add_task(&email, &board, &title, "Scenario task", due);
    world.record(response);
}

#[when(r#""{email}" assigns task {task_id:u64} in column {column:i64} of "{board}" to "{assignee}""#)]
fn assign_task(
    world: &mut BoardWorld,
    email: String,
    task_id: u64,
    column: i64,
    board: String,
    assignee: String,
) {
    let response = world
        .system
        .assign_task(&email, &board, &assignee, column, task_id);
    world.record(response);
}

#[when(r#""{email}" advances task {task_id:u64} on "{board}""#)]
fn advance_task(world: &mut BoardWorld, email: String, task_id: u64, board: String) {
    let response = world.system.advance_task(&email, &board, task_id);
    world.record(response);
}

#[when(r#""{email}" removes task {task_id:u64} from "{board}""#)]
fn remove_task(world: &mut BoardWorld, email: String, task_id: u64, board: String) {
    let response = world.system.remove_task(&email, &board, task_id);
    world.record(response);
}

#[when(r#""{email}" renames task {task_id:u64} in column {column:i64} of "{board}" to "{title}""#)]
fn rename_task(
    world: &mut BoardWorld,
    email: String,
    task_id: u64,
    column: i64,
    board: String,
    title: String,
) {
    let response = world
        .system
        .update_task_title(&email, &board, column, task_id, &title);
    world.record(response);
}

#[when(r#""{email}" limits column {column:i64} of "{board}" to {limit:i64}"#)]
fn limit_column(world: &mut BoardWorld, email: String, column: i64, board: String, limit: i64) {
    let response = world.system.limit_column(&email, &board, column, limit);
    world.record(response);
}

#[when(r#""{email}" transfers "{board}" to "{new_owner}""#)]
fn transfer(world: &mut BoardWorld, email: String, board: String, new_owner: String) {
    let response = world.system.transfer_ownership(&email, &new_owner, &board);
    world.record(response);
}

#[when(r#""{email}" joins board {board_id:u64}"#)]
fn join(world: &mut BoardWorld, email: String, board_id: u64) {
    let response = world.system.join_board(&email, board_id);
    world.record(response);
}

#[when(r#""{email}" leaves board {board_id:u64}"#)]
fn leave(world: &mut BoardWorld, email: String, board_id: u64) {
    let response = world.system.leave_board(&email, board_id);
    world.record(response);
}
