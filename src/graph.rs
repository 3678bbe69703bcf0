//! Bidirectional connections between points.

use hashbrown::HashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Connection;

/// Ordered list of connections with a set index for duplicate checks.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    connections: Vec<Connection>,
    index: HashSet<Connection>,
}

/// Pair consecutive ids without returning to the start.
pub fn path_connections(sequence: &[String]) -> Vec<(String, String)> {
    sequence
        .windows(2)
        .map(|w| (w[0].clone(), w[1].clone()))
        .collect()
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a graph along a walking order, skipping pairs `is_known` rejects.
    pub fn from_sequence(sequence: &[String], is_known: impl Fn(&str) -> bool) -> Self {
        let mut graph = Self::new();
        for (from, to) in path_connections(sequence) {
            let _ = graph.add(&from, &to, &is_known);
        }
        debug!("Seeded route graph with {} connections", graph.len());
        graph
    }

    /// Add a connection. Self-loops, unknown endpoints and duplicates are rejected.
    pub fn add(
        &mut self,
        from_id: &str,
        to_id: &str,
        is_known: impl Fn(&str) -> bool,
    ) -> Result<Connection> {
        if from_id == to_id || !is_known(from_id) || !is_known(to_id) {
            return Err(Error::InvalidConnection);
        }

        let connection = Connection::normalized(from_id, to_id);
        if !self.index.insert(connection.clone()) {
            return Err(Error::InvalidConnection);
        }

        self.connections.push(connection.clone());
        Ok(connection)
    }

    /// Remove a connection given in either direction.
    pub fn remove(&mut self, from_id: &str, to_id: &str) -> Result<Connection> {
        let connection = Connection::normalized(from_id, to_id);
        if !self.index.remove(&connection) {
            return Err(Error::ConnectionNotFound);
        }

        self.connections.retain(|c| c != &connection);
        Ok(connection)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn first(&self) -> Option<&Connection> {
        self.connections.first()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
