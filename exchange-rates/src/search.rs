//! Optimal exchange search.
//!
//! A best-first label-setting search shaped like Dijkstra's algorithm, except
//! that weights compose by multiplication and start at the identity factor 1.
//! The cumulative weight of a currency is the number of its units obtained per
//! unit of the base currency, and the search looks for the smallest one.
//!
//! Two behaviours differ from a textbook shortest-path search and are kept
//! on purpose:
//!
//! - The loop stops once the target holds any finite weight, checked before
//!   each pop. The first chain that reaches the target wins even if a longer
//!   chain explored later would be cheaper; only edges of the expansion that
//!   first reached it can still improve or tie it.
//! - An exact tie (`==` on `f64`, no tolerance) appends the tying chain to the
//!   hops already recorded for that currency instead of replacing them, so a
//!   tied result is a concatenation of chains rather than one path.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::code::CurrencyCode;
use crate::graph::RateGraph;
use crate::result::CrossPair;

/// Best weight found for the target and the hops recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    pub rate: f64,
    pub hops: Vec<CrossPair>,
}

/// Queue entry ordered by weight, then by currency code.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    weight: f64,
    code: CurrencyCode,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.code.cmp(&other.code))
    }
}

fn weight_of(best: &HashMap<CurrencyCode, f64>, code: &CurrencyCode) -> f64 {
    best.get(code).copied().unwrap_or(f64::INFINITY)
}

/// Searches `graph` for the cheapest chain from `base` to `target`.
///
/// Returns `None` when no hop reaches the target. That includes a base or
/// target missing from the graph and `base == target`, whose weight starts
/// finite so no hop is ever recorded.
pub fn optimal_exchange(
    graph: &RateGraph,
    base: CurrencyCode,
    target: CurrencyCode,
) -> Option<PathOutcome> {
    if !graph.contains(&base) || !graph.contains(&target) {
        tracing::debug!(%base, %target, "currency has no quotes on this date");
        return None;
    }

    let mut best: HashMap<CurrencyCode, f64> = HashMap::new();
    let mut hops: HashMap<CurrencyCode, Vec<CrossPair>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(base, 1.0);
    queue.push(Reverse(Frontier {
        weight: 1.0,
        code: base,
    }));

    let mut expanded = 0usize;
    while weight_of(&best, &target) == f64::INFINITY {
        let Some(Reverse(Frontier {
            weight,
            code: current,
        })) = queue.pop()
        else {
            break;
        };
        expanded += 1;

        // Stale entries are expanded too, with the weight they were queued at.
        let prefix = hops.get(&current).cloned().unwrap_or_default();

        for edge in graph.edges(&current) {
            let candidate = weight * edge.rate;
            let known = weight_of(&best, &edge.to);

            let mut chain = prefix.clone();
            chain.push(CrossPair::new(current, edge.to));

            if candidate < known {
                best.insert(edge.to, candidate);
                hops.insert(edge.to, chain);
                queue.push(Reverse(Frontier {
                    weight: candidate,
                    code: edge.to,
                }));
            } else if candidate == known {
                hops.entry(edge.to).or_default().extend(chain);
            }
        }
    }

    let chain = hops.remove(&target).unwrap_or_default();
    if chain.is_empty() {
        tracing::debug!(%base, %target, expanded, "no chain reaches target");
        return None;
    }

    let rate = weight_of(&best, &target);
    tracing::debug!(%base, %target, rate, hops = chain.len(), expanded, "resolved cross rate");
    Some(PathOutcome { rate, hops: chain })
}
