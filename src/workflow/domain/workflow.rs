//! Workflow aggregate root.

use super::{WorkflowDomainError, WorkflowId, WorkflowName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of named steps for one task type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    id: WorkflowId,
    name: WorkflowName,
    description: String,
    steps: Vec<String>,
    default_step: Option<String>,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkflowData {
    /// Workflow identifier.
    pub id: WorkflowId,
    /// Unique name.
    pub name: WorkflowName,
    /// Free-text description.
    pub description: String,
    /// Ordered step names.
    pub steps: Vec<String>,
    /// Step a task starts on when it enters progress without one.
    pub default_step: Option<String>,
    /// Whether this is the default workflow.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Trims step names and rejects blanks and duplicates.
///
/// # Errors
///
/// Returns [`WorkflowDomainError::EmptyStepName`] or
/// [`WorkflowDomainError::DuplicateStep`].
pub fn normalize_steps<S: AsRef<str>>(
    steps: impl IntoIterator<Item = S>,
) -> Result<Vec<String>, WorkflowDomainError> {
    let mut seen = HashSet::new();
    steps
        .into_iter()
        .map(|step| {
            let name = normalize_step(step.as_ref())?;
            if !seen.insert(name.clone()) {
                return Err(WorkflowDomainError::DuplicateStep(name));
            }
            Ok(name)
        })
        .collect()
}

fn normalize_step(step: &str) -> Result<String, WorkflowDomainError> {
    let trimmed = step.trim();
    if trimmed.is_empty() {
        return Err(WorkflowDomainError::EmptyStepName);
    }
    Ok(trimmed.to_owned())
}

impl Workflow {
    /// Creates a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError`] when a step name is blank or repeated.
    pub fn new<S: AsRef<str>>(
        name: WorkflowName,
        description: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
        clock: &impl Clock,
    ) -> Result<Self, WorkflowDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: WorkflowId::new(),
            name,
            description: description.into(),
            steps: normalize_steps(steps)?,
            default_step: None,
            is_default: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a workflow from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkflowData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            steps: data.steps,
            default_step: data.default_step,
            is_default: data.is_default,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the workflow identifier.
    #[must_use]
    pub const fn id(&self) -> WorkflowId {
        self.id
    }

    /// Returns the workflow name.
    #[must_use]
    pub const fn name(&self) -> &WorkflowName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered step names.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Returns the default step, if configured.
    #[must_use]
    pub fn default_step(&self) -> Option<&str> {
        self.default_step.as_deref()
    }

    /// Returns whether this is the default workflow.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the workflow.
    pub fn rename(&mut self, name: WorkflowName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Marks or unmarks the workflow as the default workflow.
    pub fn set_is_default(&mut self, is_default: bool, clock: &impl Clock) {
        self.is_default = is_default;
        self.touch(clock);
    }

    /// Replaces all steps, keeping their order.
    ///
    /// A default step that no longer exists is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError`] when a step name is blank or repeated.
    pub fn replace_steps<S: AsRef<str>>(
        &mut self,
        steps: impl IntoIterator<Item = S>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.steps = normalize_steps(steps)?;
        self.retain_default_step();
        self.touch(clock);
        Ok(())
    }

    /// Appends a step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError`] when the name is blank or already
    /// present.
    pub fn add_step(
        &mut self,
        title: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        let step = normalize_step(title.as_ref())?;
        if self.steps.contains(&step) {
            return Err(WorkflowDomainError::DuplicateStep(step));
        }
        self.steps.push(step);
        self.touch(clock);
        Ok(())
    }

    /// Renames the step at `index`. A default step follows the rename.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::StepIndexOutOfRange`] for a bad index,
    /// or a step name error when the new name is blank or taken.
    pub fn rename_step(
        &mut self,
        index: usize,
        title: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        let step = normalize_step(title.as_ref())?;
        let len = self.steps.len();
        let taken = self
            .steps
            .iter()
            .enumerate()
            .any(|(position, existing)| position != index && *existing == step);
        let slot = self
            .steps
            .get_mut(index)
            .ok_or(WorkflowDomainError::StepIndexOutOfRange { index, len })?;
        if taken {
            return Err(WorkflowDomainError::DuplicateStep(step));
        }
        let previous = std::mem::replace(slot, step.clone());
        if self.default_step.as_deref() == Some(previous.as_str()) {
            self.default_step = Some(step);
        }
        self.touch(clock);
        Ok(())
    }

    /// Removes the step at `index` and returns its name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::StepIndexOutOfRange`] for a bad index.
    pub fn remove_step(
        &mut self,
        index: usize,
        clock: &impl Clock,
    ) -> Result<String, WorkflowDomainError> {
        if index >= self.steps.len() {
            return Err(WorkflowDomainError::StepIndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        let removed = self.steps.remove(index);
        self.retain_default_step();
        self.touch(clock);
        Ok(removed)
    }

    /// Sets or clears the default step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::UnknownDefaultStep`] when the step is
    /// not part of the workflow.
    pub fn set_default_step(
        &mut self,
        step: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        let resolved = step
            .map(str::trim)
            .map(|name| {
                if self.steps.iter().any(|existing| existing == name) {
                    Ok(name.to_owned())
                } else {
                    Err(WorkflowDomainError::UnknownDefaultStep(name.to_owned()))
                }
            })
            .transpose()?;
        self.default_step = resolved;
        self.touch(clock);
        Ok(())
    }

    fn retain_default_step(&mut self) {
        if let Some(current) = self.default_step.as_deref()
            && !self.steps.iter().any(|step| step == current)
        {
            self.default_step = None;
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
