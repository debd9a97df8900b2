//! Given steps for Top 5 capacity BDD scenarios.

use super::world::{CapacityWorld, run_async};
use eyre::WrapErr;
use quintet::task::domain::{Category, Priority, TaskDraft, capacity};
use quintet::task::services::AddOutcome;
use rstest_bdd_macros::given;

#[given("a workspace with 5 active Top 5 tasks")]
fn workspace_at_capacity(world: &mut CapacityWorld) -> Result<(), eyre::Report> {
    for index in 0..5 {
        let draft = TaskDraft::new(format!("slot {index}"), Priority::Top5, Category::Ops)
            .wrap_err("build seed draft")?
            .with_workspace(world.workspace);
        let outcome = run_async(world.service.add_task(&mut world.session, draft))
            .wrap_err("seed the Top 5 bucket")?;
        if !matches!(outcome, AddOutcome::Created(_)) {
            return Err(eyre::eyre!("seeding must not raise a conflict"));
        }
    }
    Ok(())
}

#[given(r#"a pending Top 5 task "{text}""#)]
fn pending_candidate(world: &mut CapacityWorld, text: String) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(text, Priority::Top5, Category::Ops)
        .wrap_err("build candidate draft")?
        .with_workspace(world.workspace);
    let outcome = run_async(world.service.add_task(&mut world.session, draft))
        .wrap_err("submit the candidate")?;
    if !matches!(outcome, AddOutcome::ConflictPending(_)) {
        return Err(eyre::eyre!("the candidate should have raised a conflict"));
    }
    world.last_add = Some(outcome);
    Ok(())
}

#[given("one occupant has been completed")]
fn occupant_completed(world: &mut CapacityWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_tasks(world.workspace))
        .wrap_err("list the workspace")?;
    let occupant = capacity::live_top5(&tasks, None)
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("the bucket should have occupants"))?;
    run_async(
        world
            .service
            .toggle_completed(world.workspace, occupant.id()),
    )
    .wrap_err("complete an occupant")?;
    Ok(())
}
