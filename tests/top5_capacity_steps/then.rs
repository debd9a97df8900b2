//! Then steps for Top 5 capacity BDD scenarios.

use super::world::{CapacityWorld, run_async};
use eyre::WrapErr;
use quintet::task::domain::{Priority, Task, capacity};
use quintet::task::services::AddOutcome;
use rstest_bdd_macros::then;

fn find_by_text(world: &CapacityWorld, text: &str) -> Result<Task, eyre::Report> {
    let tasks = run_async(world.service.list_tasks(world.workspace))
        .wrap_err("list the workspace")?;
    tasks
        .into_iter()
        .find(|task| task.text() == text)
        .ok_or_else(|| eyre::eyre!("expected a task with text {text:?}"))
}

#[then("the capacity conflict is raised instead of creating the task")]
fn conflict_raised(world: &CapacityWorld) -> Result<(), eyre::Report> {
    let Some(AddOutcome::ConflictPending(conflict)) = world.last_add.as_ref() else {
        return Err(eyre::eyre!("expected a pending capacity conflict"));
    };
    if conflict.occupants().len() != 5 {
        return Err(eyre::eyre!("the conflict should carry all 5 occupants"));
    }
    let tasks = run_async(world.service.list_tasks(world.workspace))
        .wrap_err("list the workspace")?;
    if tasks.len() != 5 {
        return Err(eyre::eyre!("no sixth task may be created"));
    }
    Ok(())
}

#[then("the bucket still holds 5 active Top 5 tasks")]
fn bucket_still_full(world: &CapacityWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_tasks(world.workspace))
        .wrap_err("list the workspace")?;
    if capacity::live_top5_count(&tasks, None) != 5 {
        return Err(eyre::eyre!("expected exactly 5 active Top 5 tasks"));
    }
    Ok(())
}

#[then(r#"the task "{text}" is filed under Urgent"#)]
fn task_filed_under_urgent(world: &CapacityWorld, text: String) -> Result<(), eyre::Report> {
    let task = find_by_text(world, &text)?;
    if task.priority() != Priority::Urgent {
        return Err(eyre::eyre!(
            "expected {text:?} under Urgent, found {}",
            task.priority()
        ));
    }
    Ok(())
}

#[then(r#"the task "{text}" occupies a Top 5 slot"#)]
fn task_in_top5(world: &CapacityWorld, text: String) -> Result<(), eyre::Report> {
    let task = find_by_text(world, &text)?;
    if task.priority() != Priority::Top5 {
        return Err(eyre::eyre!(
            "expected {text:?} in Top 5, found {}",
            task.priority()
        ));
    }
    Ok(())
}

#[then("the replaced occupant is filed under Urgent")]
fn replaced_occupant_demoted(world: &CapacityWorld) -> Result<(), eyre::Report> {
    let swap = world
        .last_swap
        .as_ref()
        .ok_or_else(|| eyre::eyre!("a replace resolution should have run"))?;
    let stored = find_by_text(world, swap.demoted.text())?;
    if stored.priority() != Priority::Urgent {
        return Err(eyre::eyre!("the swapped-out occupant should be Urgent"));
    }
    Ok(())
}

#[then("the task is created directly without raising a conflict")]
fn created_directly(world: &CapacityWorld) -> Result<(), eyre::Report> {
    if !matches!(world.last_add, Some(AddOutcome::Created(_))) {
        return Err(eyre::eyre!("expected a direct creation"));
    }
    if world.session.pending_conflict().is_some() {
        return Err(eyre::eyre!("no conflict should be pending"));
    }
    Ok(())
}
