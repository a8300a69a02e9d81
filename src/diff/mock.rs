//! diff::mock
//!
//! Mock differ for deterministic testing.
//!
//! The mock is scripted with one [`Patch`] describing "the" comparison. For
//! each request it applies the path filter, then answers in the requested
//! shape. Every request is recorded.

use std::sync::{Arc, Mutex};

use super::request::{CompareRequest, ShapeKind};
use super::traits::{DiffError, DiffOutput, TreeDiffer};
use super::types::Patch;

/// Mock differ for testing.
#[derive(Debug, Clone)]
pub struct MockDiffer {
    inner: Arc<Mutex<MockDifferInner>>,
}

#[derive(Debug)]
struct MockDifferInner {
    patch: Patch,
    fail_on: Option<FailOn>,
    requests: Vec<CompareRequest>,
}

/// Configuration for how the mock misbehaves.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail every comparison with the given error.
    Diff(DiffError),
    /// Always answer with a summary, whatever shape was asked for.
    SummaryOnly,
}

impl MockDiffer {
    /// A differ that reports no changes.
    pub fn new() -> Self {
        Self::with_patch(Patch::default())
    }

    /// A differ that reports the given patch.
    pub fn with_patch(patch: Patch) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockDifferInner {
                patch,
                fail_on: None,
                requests: Vec::new(),
            })),
        }
    }

    /// Configure a failure mode.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<CompareRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

impl Default for MockDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeDiffer for MockDiffer {
    fn diff(&self, request: &CompareRequest) -> Result<DiffOutput, DiffError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());

        if let Some(FailOn::Diff(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let files = inner
            .patch
            .files()
            .iter()
            .filter(|f| match &request.paths {
                None => true,
                Some(paths) => paths.iter().any(|p| f.change.touches(p)),
            })
            .cloned()
            .collect();
        let patch = Patch::new(files);

        if matches!(inner.fail_on, Some(FailOn::SummaryOnly)) {
            return Ok(DiffOutput::Summary(patch.changes()));
        }
        Ok(match request.shape {
            ShapeKind::Summary => DiffOutput::Summary(patch.changes()),
            ShapeKind::Patch => DiffOutput::Patch(patch),
        })
    }
}
