//! Result assembly and the top-level resolution entry point.

use serde::{Deserialize, Serialize};

use crate::code::CurrencyCode;
use crate::graph::RateGraph;
use crate::quote::DirectQuote;
use crate::search::{PathOutcome, optimal_exchange};

/// One hop of a conversion chain.
///
/// Serialized as a two-element array, `["USD", "EUR"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(CurrencyCode, CurrencyCode)", into = "(CurrencyCode, CurrencyCode)")]
pub struct CrossPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CrossPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }
}

impl From<(CurrencyCode, CurrencyCode)> for CrossPair {
    fn from((from, to): (CurrencyCode, CurrencyCode)) -> Self {
        Self { from, to }
    }
}

impl From<CrossPair> for (CurrencyCode, CurrencyCode) {
    fn from(pair: CrossPair) -> Self {
        (pair.from, pair.to)
    }
}

/// Effective rate between two currencies and the hops that produce it.
///
/// `rate` is `None` and `cross_pairs` is empty when the pair is unreachable.
/// When several chains tie, `cross_pairs` holds them back to back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossPairResult {
    pub rate: Option<f64>,
    pub cross_pairs: Vec<CrossPair>,
}

impl CrossPairResult {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_reachable(&self) -> bool {
        self.rate.is_some()
    }
}

impl From<Option<PathOutcome>> for CrossPairResult {
    fn from(outcome: Option<PathOutcome>) -> Self {
        match outcome {
            Some(PathOutcome { rate, hops }) => Self {
                rate: Some(rate),
                cross_pairs: hops,
            },
            None => Self::unreachable(),
        }
    }
}

/// Resolves the rate from `base` to `target` over one date's quotes.
///
/// Quotes are expected to be pre-validated (see [`DirectQuote::new`]). An
/// empty slice simply yields an unreachable result; telling "no data for this
/// date" apart from "no path" is up to the caller.
pub fn resolve_rate(
    base: CurrencyCode,
    target: CurrencyCode,
    quotes: &[DirectQuote],
) -> CrossPairResult {
    let graph = RateGraph::from_quotes(quotes);
    optimal_exchange(&graph, base, target).into()
}
