//! Then steps for board workflow BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;

#[then("the operation succeeds")]
fn operation_succeeds(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no operation recorded"))?;
    if let Some(message) = &outcome.error_message {
        return Err(eyre::eyre!("expected success, got error: {message}"));
    }
    Ok(())
}

#[then(r#"the operation fails with a "{kind}" error mentioning "{fragment}""#)]
fn operation_fails(
    world: &BoardWorld,
    kind: String,
    fragment: String,
) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no operation recorded"))?;
    let actual_kind = outcome
        .error_kind
        .ok_or_else(|| eyre::eyre!("expected a {kind} error, operation succeeded"))?;
    if actual_kind.as_str() != kind {
        return Err(eyre::eyre!("expected a {kind} error, got {actual_kind}"));
    }
    let message = outcome.error_message.as_deref().unwrap_or_default();
    if !message.contains(&fragment) {
        return Err(eyre::eyre!("error '{message}' does not mention '{fragment}'"));
    }
    Ok(())
}

#[then(r#""{email}" sees task {task_id:u64} in the "{column}" column of "{board}""#)]
fn task_in_column(
    world: &BoardWorld,
    email: String,
    task_id: u64,
    column: String,
    board: String,
) -> Result<(), eyre::Report> {
    let (found_in, _) = world.find_task(&email, &board, task_id)?;
    if found_in != column {
        return Err(eyre::eyre!(
            "task {task_id} is in {found_in}, expected {column}"
        ));
    }
    Ok(())
}

#[then(r#""{email}" sees task {task_id:u64} on "{board}" unassigned"#)]
fn task_unassigned(
    world: &BoardWorld,
    email: String,
    task_id: u64,
    board: String,
) -> Result<(), eyre::Report> {
    let (_, task) = world.find_task(&email, &board, task_id)?;
    if let Some(assignee) = task.assignee() {
        return Err(eyre::eyre!("task {task_id} is still assigned to {assignee}"));
    }
    Ok(())
}

#[then(r#""{email}" sees task {task_id:u64} on "{board}" assigned to "{assignee}""#)]
fn task_assigned(
    world: &BoardWorld,
    email: String,
    task_id: u64,
    board: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let (_, task) = world.find_task(&email, &board, task_id)?;
    let actual = task.assignee().map(|held| held.as_str().to_owned());
    if actual.as_deref() != Some(assignee.as_str()) {
        return Err(eyre::eyre!(
            "task {task_id} is assigned to {actual:?}, expected {assignee}"
        ));
    }
    Ok(())
}
