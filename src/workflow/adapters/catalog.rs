//! Immutable workflow catalog built from a set of workflows.

use crate::config::WorkflowSeed;
use crate::task::ports::WorkflowCatalog;
use crate::workflow::domain::Workflow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Steps and default step of one task type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Ordered step names.
    pub steps: Vec<String>,
    /// Step preselected when a task enters progress without one.
    pub default_step: Option<String>,
}

/// Point-in-time lookup table from task type to workflow steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    entries: HashMap<String, CatalogEntry>,
}

impl CatalogSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from workflows.
    #[must_use]
    pub fn from_workflows<'a>(workflows: impl IntoIterator<Item = &'a Workflow>) -> Self {
        workflows
            .into_iter()
            .fold(Self::new(), |snapshot, workflow| {
                snapshot.with_entry(
                    workflow.name().as_str(),
                    CatalogEntry {
                        steps: workflow.steps().to_vec(),
                        default_step: workflow.default_step().map(str::to_owned),
                    },
                )
            })
    }

    /// Builds a snapshot from configured seed workflows.
    #[must_use]
    pub fn from_seeds(seeds: &[WorkflowSeed]) -> Self {
        seeds.iter().fold(Self::new(), |snapshot, seed| {
            snapshot.with_entry(
                seed.name.as_str(),
                CatalogEntry {
                    steps: seed.steps.clone(),
                    default_step: None,
                },
            )
        })
    }

    /// Adds or replaces the entry for `task_type`.
    #[must_use]
    pub fn with_entry(mut self, task_type: impl Into<String>, entry: CatalogEntry) -> Self {
        self.entries.insert(task_type.into(), entry);
        self
    }

    /// Adds or replaces `task_type` with the given steps and no default step.
    #[must_use]
    pub fn with_steps<S: Into<String>>(
        self,
        task_type: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Self {
        self.with_entry(
            task_type,
            CatalogEntry {
                steps: steps.into_iter().map(Into::into).collect(),
                default_step: None,
            },
        )
    }

    /// Returns the entry for `task_type`.
    #[must_use]
    pub fn entry(&self, task_type: &str) -> Option<&CatalogEntry> {
        self.entries.get(task_type)
    }

    /// Returns the known task types in lexical order.
    #[must_use]
    pub fn task_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of task types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the snapshot holds no task types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WorkflowCatalog for CatalogSnapshot {
    fn steps(&self, task_type: &str) -> Vec<String> {
        self.entry(task_type)
            .map(|entry| entry.steps.clone())
            .unwrap_or_default()
    }

    fn default_step(&self, task_type: &str) -> Option<String> {
        self.entry(task_type)
            .and_then(|entry| entry.default_step.clone())
    }
}
