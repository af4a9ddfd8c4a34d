//! Quote graph construction.

use std::collections::HashMap;

use crate::code::CurrencyCode;
use crate::quote::DirectQuote;

/// A directed conversion step: one unit of `from` buys `rate` units of `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
}

/// Adjacency map of every conversion available on one date.
///
/// Owned by a single resolution call and never shared.
#[derive(Debug, Default, Clone)]
pub struct RateGraph {
    adjacency: HashMap<CurrencyCode, Vec<Edge>>,
}

impl RateGraph {
    /// Builds the graph from a day's quotes.
    ///
    /// Each quote `(b, t, r)` contributes `b -> t` at `r` and `t -> b` at
    /// `1 / r`. Every currency's edge list holds its forward edges in quote
    /// order followed by its reverse edges in quote order.
    pub fn from_quotes(quotes: &[DirectQuote]) -> Self {
        let mut adjacency: HashMap<CurrencyCode, Vec<Edge>> = HashMap::new();

        let forward = quotes.iter().map(|q| Edge {
            from: q.base,
            to: q.target,
            rate: q.rate,
        });
        let reverse = quotes.iter().map(|q| Edge {
            from: q.target,
            to: q.base,
            rate: 1.0 / q.rate,
        });

        for edge in forward.chain(reverse) {
            adjacency.entry(edge.from).or_default().push(edge);
        }

        Self { adjacency }
    }

    /// Outgoing edges of `code`, empty for currencies not in the graph.
    pub fn edges(&self, code: &CurrencyCode) -> &[Edge] {
        self.adjacency.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.adjacency.contains_key(code)
    }

    /// Number of currencies with at least one edge.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
