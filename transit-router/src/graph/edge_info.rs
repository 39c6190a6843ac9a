//! Human-readable description of each graph edge.

use std::ops::Index;

use super::directed::EdgeId;

/// What an edge of the transit graph stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeInfo {
    /// Waiting for a bus at a stop.
    Wait { stop_name: String, time: f64 },

    /// Riding one bus across `span_count` stops without getting off.
    Ride {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl EdgeInfo {
    /// Time spent on this edge, in minutes.
    pub fn time(&self) -> f64 {
        match self {
            EdgeInfo::Wait { time, .. } | EdgeInfo::Ride { time, .. } => *time,
        }
    }
}

/// Edge metadata indexed by [`EdgeId`].
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    entries: Vec<EdgeInfo>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metadata of the edge that was just added to the graph.
    ///
    /// Must be called once per edge, in the order edges are added.
    pub(crate) fn record(&mut self, id: EdgeId, info: EdgeInfo) {
        debug_assert_eq!(id.0, self.entries.len(), "edge metadata out of order");
        self.entries.push(info);
    }

    pub fn get(&self, id: EdgeId) -> Option<&EdgeInfo> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &EdgeInfo)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, info)| (EdgeId(i), info))
    }
}

impl Index<EdgeId> for EdgeTable {
    type Output = EdgeInfo;

    fn index(&self, id: EdgeId) -> &EdgeInfo {
        &self.entries[id.0]
    }
}
