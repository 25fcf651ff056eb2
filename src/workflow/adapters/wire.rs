//! Decoding of the backend's workflow listing into a catalog snapshot.

use super::catalog::{CatalogEntry, CatalogSnapshot};
use crate::workflow::domain::{WorkflowDomainError, normalize_steps};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned while decoding workflow payloads.
#[derive(Debug, Error)]
pub enum WorkflowDecodeError {
    /// The payload is not valid JSON or misses required fields.
    #[error("malformed workflow payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A workflow record violates a workflow invariant.
    #[error("invalid workflow '{name}': {source}")]
    InvalidWorkflow {
        /// Name of the offending record.
        name: String,
        /// Violated invariant.
        #[source]
        source: WorkflowDomainError,
    },
}

#[derive(Debug, Deserialize)]
struct WorkflowRecord {
    name: String,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    default_step: Option<String>,
}

impl WorkflowRecord {
    fn into_entry(self) -> Result<(String, CatalogEntry), WorkflowDecodeError> {
        let name = self.name.trim().to_owned();
        let invalid = |source| WorkflowDecodeError::InvalidWorkflow {
            name: name.clone(),
            source,
        };
        if name.is_empty() {
            return Err(invalid(WorkflowDomainError::EmptyName));
        }
        let steps = normalize_steps(&self.steps).map_err(invalid)?;
        let default_step = self
            .default_step
            .map(|step| step.trim().to_owned())
            .filter(|step| !step.is_empty());
        if let Some(step) = default_step.as_ref()
            && !steps.contains(step)
        {
            return Err(invalid(WorkflowDomainError::UnknownDefaultStep(step.clone())));
        }
        Ok((
            name,
            CatalogEntry {
                steps,
                default_step,
            },
        ))
    }
}

/// Decodes a JSON array of workflow objects into a catalog snapshot.
///
/// Only `name`, `steps`, and `default_step` are read; other fields the
/// backend sends are ignored.
///
/// # Errors
///
/// Returns [`WorkflowDecodeError`] for the first malformed or invalid record.
pub fn decode_catalog(json: &str) -> Result<CatalogSnapshot, WorkflowDecodeError> {
    let records: Vec<WorkflowRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(WorkflowRecord::into_entry)
        .try_fold(CatalogSnapshot::new(), |snapshot, entry| {
            let (name, catalog_entry) = entry?;
            Ok(snapshot.with_entry(name, catalog_entry))
        })
}
