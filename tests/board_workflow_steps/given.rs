//! Given steps for board workflow BDD scenarios.

use super::world::{BoardWorld, PASSWORD, ensure_ok};
use chrono::{Duration, Utc};
use rstest_bdd_macros::given;

#[given(r#"a registered user "{email}""#)]
fn registered_user(world: &mut BoardWorld, email: String) -> Result<(), eyre::Report> {
    ensure_ok(world.system.register(&email, PASSWORD), "register")?;
    Ok(())
}

#[given(r#""{email}" owns a board named "{board}""#)]
fn owns_board(world: &mut BoardWorld, email: String, board: String) -> Result<(), eyre::Report> {
    ensure_ok(world.system.create_board(&email, &board), "create board")?;
    Ok(())
}

#[given(r#""{email}" has joined board {board_id:u64}"#)]
fn has_joined(world: &mut BoardWorld, email: String, board_id: u64) -> Result<(), eyre::Report> {
    ensure_ok(world.system.join_board(&email, board_id), "join board")?;
    Ok(())
}

#[given(r#""{email}" has added a task titled "{title}" to "{board}""#)]
fn has_added_task(
    world: &mut BoardWorld,
    email: String,
    title: String,
    board: String,
) -> Result<(), eyre::Report> {
    let due = Utc::now() + Duration::days(7);
    ensure_ok(
        world
            .system
            .add_task(&email, &board, &title, "Scenario task", due),
        "add task",
    )?;
    Ok(())
}

#[given(r#""{email}" has claimed task {task_id:u64} on "{board}""#)]
fn has_claimed(
    world: &mut BoardWorld,
    email: String,
    task_id: u64,
    board: String,
) -> Result<(), eyre::Report> {
    ensure_ok(
        world.system.assign_task(&email, &board, &email, 0, task_id),
        "claim task",
    )?;
    Ok(())
}

#[given(r#""{email}" has advanced task {task_id:u64} on "{board}" {times:u32} times"#)]
fn has_advanced(
    world: &mut BoardWorld,
    email: String,
    task_id: u64,
    board: String,
    times: u32,
) -> Result<(), eyre::Report> {
    for _ in 0..times {
        ensure_ok(
            world.system.advance_task(&email, &board, task_id),
            "advance task",
        )?;
    }
    Ok(())
}
