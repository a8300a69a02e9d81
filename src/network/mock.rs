//! network::mock
//!
//! Mock network implementation for deterministic testing.
//!
//! # Design
//!
//! The mock records every request it receives, serves a fixed list of
//! advertised references, and can be configured to fail specific
//! operations.
//!
//! # Example
//!
//! ```
//! use gitbridge::core::types::Remote;
//! use gitbridge::network::mock::{MockNetwork, MockOperation};
//! use gitbridge::sync::NetworkExt;
//!
//! let network = MockNetwork::new();
//! let origin = Remote::new("origin", None);
//!
//! network.fetch_remote(&origin).unwrap();
//!
//! let ops = network.operations();
//! assert_eq!(ops.len(), 1);
//! assert!(matches!(&ops[0], MockOperation::Fetch(req) if req.refspecs.is_none()));
//! ```

use std::sync::{Arc, Mutex};

use super::traits::{DirectReference, Network, NetworkError};
use crate::sync::request::{FetchRequest, ListReferencesRequest, PushRequest};

/// Mock network for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockNetwork {
    inner: Arc<Mutex<MockNetworkInner>>,
}

#[derive(Debug)]
struct MockNetworkInner {
    /// References returned by `list_references`.
    references: Vec<DirectReference>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
    /// Number of pushes accepted so far.
    pushes: usize,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail every fetch with the given error.
    Fetch(NetworkError),
    /// Fail every push with the given error.
    Push(NetworkError),
    /// Accept this many pushes, then fail the rest.
    PushAfter(usize, NetworkError),
    /// Fail every reference listing with the given error.
    ListReferences(NetworkError),
}

/// Recorded operation for test verification.
///
/// Requests are recorded before any configured failure is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    Fetch(FetchRequest),
    Push(PushRequest),
    ListReferences(ListReferencesRequest),
}

impl MockNetwork {
    /// Create a mock network that advertises no references.
    pub fn new() -> Self {
        Self::with_references(Vec::new())
    }

    /// Create a mock network that advertises the given references.
    pub fn with_references(references: Vec<DirectReference>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockNetworkInner {
                references,
                fail_on: None,
                operations: Vec::new(),
                pushes: 0,
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Recorded push requests, in submission order.
    pub fn pushes(&self) -> Vec<PushRequest> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Push(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
        inner.pushes = 0;
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl Network for MockNetwork {
    fn fetch(&self, request: &FetchRequest) -> Result<(), NetworkError> {
        self.record(MockOperation::Fetch(request.clone()));

        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Fetch(e)) => Err(e.clone()),
            _ => Ok(()),
        }
    }

    fn push(&self, request: &PushRequest) -> Result<(), NetworkError> {
        self.record(MockOperation::Push(request.clone()));

        let mut inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Push(e)) => return Err(e.clone()),
            Some(FailOn::PushAfter(limit, e)) if inner.pushes >= *limit => {
                return Err(e.clone())
            }
            _ => {}
        }
        inner.pushes += 1;
        Ok(())
    }

    fn list_references(
        &self,
        request: &ListReferencesRequest,
    ) -> Result<Vec<DirectReference>, NetworkError> {
        self.record(MockOperation::ListReferences(request.clone()));

        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::ListReferences(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        Ok(inner
            .references
            .iter()
            .filter(|r| request.options.accepts(&r.name))
            .cloned()
            .collect())
    }
}
