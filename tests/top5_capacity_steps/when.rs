//! When steps for Top 5 capacity BDD scenarios.

use super::world::{CapacityWorld, run_async};
use eyre::WrapErr;
use quintet::task::domain::{Category, Priority, TaskDraft};
use rstest_bdd_macros::when;

#[when(r#"a new Top 5 task "{text}" is submitted"#)]
fn submit_candidate(world: &mut CapacityWorld, text: String) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(text, Priority::Top5, Category::Ops)
        .wrap_err("build candidate draft")?
        .with_workspace(world.workspace);
    let outcome = run_async(world.service.add_task(&mut world.session, draft))
        .wrap_err("submit the candidate")?;
    world.last_add = Some(outcome);
    Ok(())
}

#[when("the conflict is resolved by moving the task to Urgent")]
fn resolve_by_moving_to_urgent(world: &mut CapacityWorld) -> Result<(), eyre::Report> {
    run_async(world.service.resolve_move_to_urgent(&mut world.session))
        .wrap_err("resolve the conflict via Urgent")?;
    Ok(())
}

#[when("the conflict is resolved by replacing the first occupant")]
fn resolve_by_replacing(world: &mut CapacityWorld) -> Result<(), eyre::Report> {
    let target = world
        .session
        .pending_conflict()
        .and_then(|conflict| conflict.occupants().first())
        .map(|occupant| occupant.id().clone())
        .ok_or_else(|| eyre::eyre!("a conflict with occupants should be pending"))?;
    let swap = run_async(world.service.resolve_replace(&mut world.session, &target))
        .wrap_err("resolve the conflict via replace")?;
    world.last_swap = Some(swap);
    Ok(())
}
