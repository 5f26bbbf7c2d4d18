//! Pending image requests
//!
//! Image bytes are fetched by the UI, so a rectangle is parked here under a
//! fresh request id until the matching response arrives.

use crate::document::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Id handed to the UI with a download request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request id to node table
///
/// Ids increase monotonically from 0 and are never reused, even after the
/// entry is taken.
///
/// Entries are only removed by [`take`](Self::take). A request the UI never
/// answers stays in the table for the life of the plugin.
#[derive(Debug, Default)]
pub struct PendingImages {
    next_id: u64,
    nodes: HashMap<RequestId, NodeId>,
}

impl PendingImages {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `node` and return its request id
    pub fn register(&mut self, node: NodeId) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Remove and return the node waiting on `id`
    pub fn take(&mut self, id: RequestId) -> Option<NodeId> {
        self.nodes.remove(&id)
    }

    /// Node waiting on `id`, without removing it
    #[must_use]
    pub fn get(&self, id: RequestId) -> Option<&NodeId> {
        self.nodes.get(&id)
    }

    /// Number of outstanding requests
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is outstanding
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
