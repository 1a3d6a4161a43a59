//! Graph coloring of the body-contact graph.
//!
//! The solver mutates both bodies of an arbiter directly, so arbiters
//! sharing a body must not run concurrently. Greedy coloring of the
//! conflict graph (an edge wherever two arbiters share a body) yields
//! batches that are safe to solve in parallel, executed batch by batch.
//! The core solver itself stays single-threaded; this module only
//! provides the partitioning.

use crate::arbiter::Arbiter;

/// Groups arbiters into batches with pairwise-disjoint body sets.
///
/// `slot_count` is the body arena's slot capacity (`BodyHandle::index`
/// upper bound). Returns batches of indices into `arbiters`; iterating
/// batches in order and arbiters within a batch in any order visits
/// every arbiter exactly once.
pub fn batch_arbiters(arbiters: &[Arbiter], slot_count: usize) -> Vec<Vec<usize>> {
    if arbiters.is_empty() {
        return Vec::new();
    }

    // Body slot → arbiters touching it.
    let mut by_body: Vec<Vec<usize>> = vec![Vec::new(); slot_count];
    for (i, arbiter) in arbiters.iter().enumerate() {
        let (a, b) = arbiter.handles();
        by_body[a.index()].push(i);
        by_body[b.index()].push(i);
    }

    // Conflict adjacency: arbiters sharing any body.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); arbiters.len()];
    for touching in &by_body {
        for i in 0..touching.len() {
            for j in (i + 1)..touching.len() {
                adjacency[touching[i]].push(touching[j]);
                adjacency[touching[j]].push(touching[i]);
            }
        }
    }

    // Greedy coloring, first free color. A node's color never exceeds
    // its degree, so degree + 1 slots always contain a free one.
    let mut colors = vec![usize::MAX; arbiters.len()];
    let mut color_count = 0;
    for i in 0..arbiters.len() {
        let mut used = vec![false; adjacency[i].len() + 1];
        for &n in &adjacency[i] {
            if let Some(slot) = used.get_mut(colors[n]) {
                *slot = true;
            }
        }
        let color = used
            .iter()
            .position(|&u| !u)
            .unwrap_or(adjacency[i].len());
        colors[i] = color;
        color_count = color_count.max(color + 1);
    }

    let mut batches: Vec<Vec<usize>> = vec![Vec::new(); color_count];
    for (i, &color) in colors.iter().enumerate() {
        batches[color].push(i);
    }
    batches
}
