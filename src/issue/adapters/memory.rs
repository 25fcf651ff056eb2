//! In-memory issue repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::issue::{
    domain::{Issue, IssueId},
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};

/// Thread-safe in-memory issue repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueRepository {
    state: Arc<RwLock<HashMap<IssueId, Issue>>>,
}

impl InMemoryIssueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> IssueRepositoryResult<RwLockReadGuard<'_, HashMap<IssueId, Issue>>> {
        self.state.read().map_err(|err| {
            IssueRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> IssueRepositoryResult<RwLockWriteGuard<'_, HashMap<IssueId, Issue>>> {
        self.state.write().map_err(|err| {
            IssueRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let mut issues = self.write()?;
        if issues.contains_key(&issue.id()) {
            return Err(IssueRepositoryError::DuplicateIssue(issue.id()));
        }
        issues.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn update(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let mut issues = self.write()?;
        let slot = issues
            .get_mut(&issue.id())
            .ok_or(IssueRepositoryError::NotFound(issue.id()))?;
        *slot = issue.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        let issues = self.read()?;
        Ok(issues.get(&id).cloned())
    }

    async fn list_all(&self) -> IssueRepositoryResult<Vec<Issue>> {
        let issues = self.read()?;
        Ok(issues.values().cloned().collect())
    }

    async fn delete(&self, id: IssueId) -> IssueRepositoryResult<()> {
        let mut issues = self.write()?;
        issues
            .remove(&id)
            .map(|_| ())
            .ok_or(IssueRepositoryError::NotFound(id))
    }
}
