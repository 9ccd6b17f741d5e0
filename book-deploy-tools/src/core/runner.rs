// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Selection and ordering of deployment scripts.

use std::{future::Future, pin::Pin};

use crate::Result;

pub type ScriptFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// A deployment procedure run against an environment `E`.
pub trait DeployScript<E> {
    fn id(&self) -> &str;

    /// Tags used to select this script, and to depend on it.
    fn tags(&self) -> &[&str];

    /// Tags of scripts that must run before this one.
    fn dependencies(&self) -> &[&str];

    fn run<'a>(&'a self, env: &'a E) -> ScriptFuture<'a>;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Scripts to run for the requested `tags`, dependencies first.
///
/// No tags selects every script. Each script appears at most once.
pub fn plan<'s, E>(
    scripts: &[&'s dyn DeployScript<E>],
    tags: &[String],
) -> Result<Vec<&'s dyn DeployScript<E>>, RunnerError> {
    let mut marks = vec![Mark::Unvisited; scripts.len()];
    let mut path = Vec::new();
    let mut order = Vec::new();
    for (index, script) in scripts.iter().enumerate() {
        let selected = tags.is_empty()
            || script
                .tags()
                .iter()
                .any(|tag| tags.iter().any(|requested| requested == tag));
        if selected {
            visit(index, scripts, &mut marks, &mut path, &mut order)?;
        }
    }
    Ok(order.into_iter().map(|index| scripts[index]).collect())
}

fn visit<E>(
    index: usize,
    scripts: &[&dyn DeployScript<E>],
    marks: &mut [Mark],
    path: &mut Vec<String>,
    order: &mut Vec<usize>,
) -> Result<(), RunnerError> {
    match marks[index] {
        Mark::Done => return Ok(()),
        Mark::Visiting => {
            let mut cycle = path.clone();
            cycle.push(scripts[index].id().to_owned());
            return Err(RunnerError::DependencyCycle(cycle));
        }
        Mark::Unvisited => {}
    }

    marks[index] = Mark::Visiting;
    path.push(scripts[index].id().to_owned());
    for dependency in scripts[index].dependencies() {
        let providers: Vec<_> = scripts
            .iter()
            .enumerate()
            .filter(|(_, script)| script.tags().contains(dependency))
            .map(|(index, _)| index)
            .collect();
        if providers.is_empty() {
            return Err(RunnerError::UnknownDependency {
                script: scripts[index].id().to_owned(),
                tag: (*dependency).to_owned(),
            });
        }
        for provider in providers {
            visit(provider, scripts, marks, path, order)?;
        }
    }
    path.pop();
    marks[index] = Mark::Done;
    order.push(index);
    Ok(())
}

/// Run the scripts selected by `tags` in dependency order, stopping at the first failure.
pub async fn run_scripts<E>(
    env: &E,
    scripts: &[&dyn DeployScript<E>],
    tags: &[String],
) -> Result<()> {
    let plan = plan(scripts, tags)?;
    if plan.is_empty() {
        warn!(@yellow, "no deployment scripts match tags {tags:?}");
    }
    for script in plan {
        info!(@grey, "running deployment script {}", script.id());
        script.run(env).await?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("script {script} depends on tag {tag}, which no script provides")]
    UnknownDependency { script: String, tag: String },
    #[error("dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),
}
