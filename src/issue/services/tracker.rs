//! Service layer for issue tracking.

use crate::issue::{
    domain::{Issue, IssueDomainError, IssueId},
    ports::{IssueRepository, IssueRepositoryError},
};
use crate::task::domain::{ParsePriorityError, Priority};
use mockable::Clock;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for recording an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    title: String,
    description: String,
    priority: Option<String>,
}

impl CreateIssueRequest {
    /// Creates a request with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the raw priority. Unrecognised values fall back to medium.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for editing an issue. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIssueRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority; must be `high`, `medium`, or `low`.
    pub priority: Option<String>,
}

/// Service-level errors for issue operations.
#[derive(Debug, Error)]
pub enum IssueTrackerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),
    /// The requested priority is not recognised.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IssueRepositoryError),
    /// No issue exists with the given identifier.
    #[error("issue {0} not found")]
    NotFound(IssueId),
}

/// Result type for issue tracker operations.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Issue tracking service.
#[derive(Clone)]
pub struct IssueTrackerService<R, C>
where
    R: IssueRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> IssueTrackerService<R, C>
where
    R: IssueRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new issue tracker service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_issue_or_error(&self, id: IssueId) -> IssueTrackerResult<Issue> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IssueTrackerError::NotFound(id))
    }

    async fn save(&self, issue: Issue) -> IssueTrackerResult<Issue> {
        self.repository.update(&issue).await?;
        Ok(issue)
    }

    /// Records a new open issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Domain`] for a blank or overlong title
    /// and [`IssueTrackerError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateIssueRequest) -> IssueTrackerResult<Issue> {
        let priority = Priority::from_lenient(request.priority.as_deref());
        let issue = Issue::new(&request.title, request.description, priority, &*self.clock)?;
        self.repository.store(&issue).await?;
        info!(issue_id = %issue.id(), %priority, "issue recorded");
        Ok(issue)
    }

    /// Retrieves an issue by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: IssueId) -> IssueTrackerResult<Option<Issue>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists all issues, highest priority first, newest first within a
    /// priority.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Repository`] when lookup fails.
    pub async fn list(&self) -> IssueTrackerResult<Vec<Issue>> {
        let mut issues = self.repository.list_all().await?;
        issues.sort_by_key(|issue| (issue.priority().rank(), Reverse(issue.created_at())));
        Ok(issues)
    }

    /// Lists open issues in the order of [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Repository`] when lookup fails.
    pub async fn list_open(&self) -> IssueTrackerResult<Vec<Issue>> {
        let mut issues = self.list().await?;
        issues.retain(Issue::is_open);
        Ok(issues)
    }

    /// Lists all issues including resolved ones, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Repository`] when lookup fails.
    pub async fn list_recent(&self) -> IssueTrackerResult<Vec<Issue>> {
        let mut issues = self.repository.list_all().await?;
        issues.sort_by_key(|issue| Reverse(issue.created_at()));
        Ok(issues)
    }

    /// Edits title, description, or priority.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`], domain errors for an invalid
    /// title, [`IssueTrackerError::InvalidPriority`], or repository errors.
    pub async fn update(
        &self,
        id: IssueId,
        request: UpdateIssueRequest,
    ) -> IssueTrackerResult<Issue> {
        let mut issue = self.find_issue_or_error(id).await?;
        if let Some(title) = request.title {
            issue.set_title(title)?;
        }
        if let Some(description) = request.description {
            issue.set_description(description);
        }
        if let Some(raw) = request.priority {
            issue.set_priority(Priority::try_from(raw.as_str())?);
        }
        let saved = self.save(issue).await?;
        info!(issue_id = %id, "issue updated");
        Ok(saved)
    }

    /// Marks an issue resolved.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`] or repository errors.
    pub async fn resolve(&self, id: IssueId) -> IssueTrackerResult<Issue> {
        let mut issue = self.find_issue_or_error(id).await?;
        issue.resolve(&*self.clock);
        let saved = self.save(issue).await?;
        info!(issue_id = %id, "issue resolved");
        Ok(saved)
    }

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`] or repository errors.
    pub async fn delete(&self, id: IssueId) -> IssueTrackerResult<()> {
        self.find_issue_or_error(id).await?;
        self.repository.delete(id).await?;
        info!(issue_id = %id, "issue deleted");
        Ok(())
    }

    /// Appends a candidate solution.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`],
    /// [`IssueDomainError::EmptySolution`], or repository errors.
    pub async fn add_solution(
        &self,
        id: IssueId,
        solution: impl AsRef<str> + Send,
    ) -> IssueTrackerResult<Issue> {
        let mut issue = self.find_issue_or_error(id).await?;
        issue.add_solution(solution)?;
        let saved = self.save(issue).await?;
        info!(issue_id = %id, solutions = saved.solutions().len(), "solution added");
        Ok(saved)
    }

    /// Marks the solution at `index` as the one that worked.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`],
    /// [`IssueDomainError::SolutionIndexOutOfRange`], or repository errors.
    pub async fn mark_solution_successful(
        &self,
        id: IssueId,
        index: usize,
    ) -> IssueTrackerResult<Issue> {
        let mut issue = self.find_issue_or_error(id).await?;
        issue.mark_solution_successful(index)?;
        let saved = self.save(issue).await?;
        info!(issue_id = %id, index, "solution marked successful");
        Ok(saved)
    }
}
