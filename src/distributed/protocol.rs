//! Wire messages between the coordinator and its worker ranks.
//!
//! Every message is one JSON document on its own line, written to the
//! worker's stdin or read from its stdout. The exchange has two phases:
//! each worker reports a [`Summary`] of its shard, then waits for a
//! [`Directive`]; only the elected winner answers with a [`RoutePayload`].

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::NodeId;

/// Failure anywhere on a worker channel. Always fatal to the whole run:
/// the coordinator has no fallback source for a lost route.
#[derive(Debug, Error)]
pub enum DistributedError {
    #[error("worker channel: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("worker stream closed before a message arrived")]
    UnexpectedEof,
    #[error("worker announced rank {announced}, expected {expected}")]
    RankMismatch { expected: usize, announced: usize },
    #[error("winning route has {received} nodes, {announced} were announced")]
    LengthMismatch { announced: usize, received: usize },
    #[error("winning route is not depot framed")]
    MalformedRoute,
    #[error("worker rank {rank} exited with {status}")]
    WorkerFailed {
        rank: usize,
        status: std::process::ExitStatus,
    },
    #[error("{customers} customers exceed the partitionable candidate range")]
    CandidateOverflow { customers: usize },
}

/// Per-rank shard result, worker to coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Rank of the reporting worker.
    pub rank: usize,
    /// The shard's best candidate, absent when nothing was feasible.
    pub best: Option<BestSummary>,
}

/// Cheap description of a shard's best candidate; the route itself stays
/// with the worker until the election is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSummary {
    /// Total cost of the shard's best route.
    pub cost: u64,
    /// Enumeration index of the winning candidate.
    pub candidate_index: u64,
    /// Node count of the route, depot entries included.
    pub route_len: usize,
}

/// Coordinator instruction closing the summary phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// The worker won the election and must send its route.
    SendRoute,
    /// The worker lost and exits without sending anything.
    Shutdown,
}

/// The winning route, sent only in answer to [`Directive::SendRoute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePayload {
    /// Full node sequence of the winning route.
    pub nodes: Vec<NodeId>,
}

/// Writes one message as a JSON line and flushes it.
pub fn write_message<T, W>(writer: &mut W, message: &T) -> Result<(), DistributedError>
where
    T: Serialize,
    W: Write,
{
    serde_json::to_writer(&mut *writer, message)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads one JSON line into a message.
pub fn read_message<T, R>(reader: &mut R) -> Result<T, DistributedError>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(DistributedError::UnexpectedEof);
    }
    Ok(serde_json::from_str(line.trim_end())?)
}
