//! Issue aggregate root.

use super::{IssueDomainError, IssueId, IssueStatus};
use crate::task::domain::Priority;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_TITLE_LENGTH: usize = 200;

/// A work problem with candidate solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    id: IssueId,
    title: String,
    description: String,
    priority: Priority,
    status: IssueStatus,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
    solutions: Vec<String>,
    successful_solution: Option<String>,
}

/// Parameter object for reconstructing a persisted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueData {
    /// Issue identifier.
    pub id: IssueId,
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Status.
    pub status: IssueStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Resolution timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Candidate solutions in the order they were added.
    pub solutions: Vec<String>,
    /// Solution that resolved the issue.
    pub successful_solution: Option<String>,
}

fn validate_title(title: &str) -> Result<String, IssueDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(IssueDomainError::EmptyTitle);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(IssueDomainError::TitleTooLong);
    }
    Ok(trimmed.to_owned())
}

impl Issue {
    /// Creates an open issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] or
    /// [`IssueDomainError::TitleTooLong`].
    pub fn new(
        title: impl AsRef<str>,
        description: impl Into<String>,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<Self, IssueDomainError> {
        Ok(Self {
            id: IssueId::new(),
            title: validate_title(title.as_ref())?,
            description: description.into(),
            priority,
            status: IssueStatus::Open,
            created_at: clock.utc(),
            resolved_at: None,
            solutions: Vec::new(),
            successful_solution: None,
        })
    }

    /// Reconstructs an issue from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            resolved_at: data.resolved_at,
            solutions: data.solutions,
            successful_solution: data.successful_solution,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the resolution timestamp, if resolved.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    /// Returns the candidate solutions in insertion order.
    #[must_use]
    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    /// Returns the solution marked as successful.
    #[must_use]
    pub fn successful_solution(&self) -> Option<&str> {
        self.successful_solution.as_deref()
    }

    /// Returns whether the issue is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == IssueStatus::Open
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] or
    /// [`IssueDomainError::TitleTooLong`].
    pub fn set_title(&mut self, title: impl AsRef<str>) -> Result<(), IssueDomainError> {
        self.title = validate_title(title.as_ref())?;
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Marks the issue resolved. The first resolution time is kept.
    pub fn resolve(&mut self, clock: &impl Clock) {
        self.status = IssueStatus::Resolved;
        if self.resolved_at.is_none() {
            self.resolved_at = Some(clock.utc());
        }
    }

    /// Appends a candidate solution.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptySolution`] for blank text.
    pub fn add_solution(&mut self, solution: impl AsRef<str>) -> Result<(), IssueDomainError> {
        let trimmed = solution.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IssueDomainError::EmptySolution);
        }
        self.solutions.push(trimmed.to_owned());
        Ok(())
    }

    /// Marks the solution at `index` as the one that worked.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::SolutionIndexOutOfRange`] for a bad
    /// index.
    pub fn mark_solution_successful(&mut self, index: usize) -> Result<(), IssueDomainError> {
        let solution = self
            .solutions
            .get(index)
            .ok_or(IssueDomainError::SolutionIndexOutOfRange {
                index,
                len: self.solutions.len(),
            })?;
        self.successful_solution = Some(solution.clone());
        Ok(())
    }
}
