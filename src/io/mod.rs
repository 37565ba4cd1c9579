//! Instance loading.
//!
//! An instance is a whitespace-separated token stream; newlines carry no
//! meaning beyond separating tokens:
//!
//! ```text
//! N                  node count, nodes are 0..N-1, node 0 is the depot
//! id demand          one line per non-depot node, in any order
//! K                  directed edge count
//! from to weight     one line per edge
//! ```
//!
//! A repeated `from to` pair overwrites the earlier weight. Content after
//! the last edge line is ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{CostMatrix, Graph, NodeId, DEPOT};

/// Reasons an instance is rejected before the engine starts.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read the instance")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input while reading the {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid {expected} token {token:?}")]
    InvalidToken {
        expected: &'static str,
        token: String,
    },
    #[error("an instance needs at least the depot node")]
    NoNodes,
    #[error("node {node} is out of range for {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },
    #[error("a demand line names the depot")]
    DepotDemand,
    #[error("node {node} has more than one demand line")]
    DuplicateDemand { node: NodeId },
    #[error("node {node} declares zero demand")]
    ZeroDemand { node: NodeId },
}

struct Tokens<'a> {
    stream: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            stream: text.split_whitespace(),
        }
    }

    fn number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        match self.stream.next() {
            None => Err(ParseError::UnexpectedEof(expected)),
            Some(token) => token.parse().map_err(|_| ParseError::InvalidToken {
                expected,
                token: token.to_string(),
            }),
        }
    }
}

/// Parses an instance from its textual form.
///
/// # Examples
///
/// ```
/// use rota::io::parse_graph;
///
/// let graph = parse_graph("3  1 4  2 2  2  0 1 7  1 2 9").expect("well formed");
/// assert_eq!(graph.num_customers(), 2);
/// assert_eq!(graph.demand(1), 4);
/// assert_eq!(graph.cost(0, 1), Some(7));
/// assert_eq!(graph.cost(2, 0), None);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] for truncated input, non-numeric tokens, node
/// ids outside the declared range, a demand line naming the depot, a
/// duplicated or zero demand, or an edge weight outside `u32`.
pub fn parse_graph(text: &str) -> Result<Graph, ParseError> {
    let mut tokens = Tokens::new(text);

    let nodes: usize = tokens.number("node count")?;
    if nodes == 0 {
        return Err(ParseError::NoNodes);
    }

    let mut demands = vec![0u64; nodes];
    let mut seen = vec![false; nodes];
    for _ in 1..nodes {
        let node: usize = tokens.number("customer id")?;
        let demand: u64 = tokens.number("customer demand")?;
        if node >= nodes {
            return Err(ParseError::NodeOutOfRange { node, nodes });
        }
        if node == DEPOT {
            return Err(ParseError::DepotDemand);
        }
        if seen[node] {
            return Err(ParseError::DuplicateDemand { node });
        }
        if demand == 0 {
            return Err(ParseError::ZeroDemand { node });
        }
        seen[node] = true;
        demands[node] = demand;
    }

    let edges: usize = tokens.number("edge count")?;
    let mut costs = CostMatrix::new(nodes);
    for _ in 0..edges {
        let from: usize = tokens.number("edge source")?;
        let to: usize = tokens.number("edge target")?;
        let weight: u32 = tokens.number("edge weight")?;
        if from >= nodes {
            return Err(ParseError::NodeOutOfRange { node: from, nodes });
        }
        if to >= nodes {
            return Err(ParseError::NodeOutOfRange { node: to, nodes });
        }
        costs.set(from, to, weight);
    }

    Ok(Graph::new(costs, demands).expect("a parsed instance satisfies the model invariants"))
}

/// Reads and parses the instance at `path`.
///
/// # Errors
///
/// Returns [`ParseError::Io`] when the file cannot be read, otherwise any
/// error of [`parse_graph`].
pub fn load_graph(path: &Path) -> Result<Graph, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_graph(&text)
}
