/*!
# Dijkstra

Single-source shortest paths with arc capacities interpreted as lengths,
generic over the keyed min-heaps of [`crate::heap`]. Lengths must be
non-negative.
*/

use std::marker::PhantomData;

use crate::{
    errors::{FlowError, FlowResult},
    heap::{MinHeap, PairingHeap},
    node::{Capacity, Node},
    ops::*,
};

/// Single-source shortest-path computation driven by the heap `M`
#[derive(Default, Clone)]
pub struct Dijkstra<M: MinHeap<Node, Capacity> = PairingHeap<Node, Capacity>> {
    _heap: PhantomData<M>,
}

impl<M: MinHeap<Node, Capacity>> Dijkstra<M> {
    pub fn new() -> Self {
        Self { _heap: PhantomData }
    }

    /// Computes the distances from `source` to every node; unreachable
    /// nodes yield `None`
    pub fn run<G>(&self, graph: &G, source: Node) -> FlowResult<Vec<Option<Capacity>>>
    where
        G: CapacitatedArcs + GraphType,
    {
        if !graph.has_node(source) {
            return Err(FlowError::NodeNotFound(source));
        }

        let mut dist: Vec<Option<Capacity>> = vec![None; graph.len()];
        let mut heap = M::new();
        heap.insert(source, 0.0, false);

        while !heap.is_empty() {
            let (u, d) = heap.pop()?;
            dist[u as usize] = Some(d);

            for (v, length) in graph.arcs_of(u) {
                if dist[v as usize].is_none() {
                    // Ignored unless it improves the tentative distance
                    heap.insert(v, d + length, false);
                }
            }
        }

        Ok(dist)
    }

    /// Computes the distance from `source` to `target` only
    pub fn distance<G>(&self, graph: &G, source: Node, target: Node) -> FlowResult<Option<Capacity>>
    where
        G: CapacitatedArcs + GraphType,
    {
        if !graph.has_node(target) {
            return Err(FlowError::NodeNotFound(target));
        }
        Ok(self.run(graph, source)?[target as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        heap::LazyBinaryHeap,
        repr::{CapAdjArray, CapAdjUndir},
    };
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn directed_distances() {
        let graph = CapAdjArray::from_arcs(
            5,
            [
                (0u32, 1u32, 2.0),
                (0, 2, 5.0),
                (1, 2, 1.0),
                (2, 3, 2.0),
                (1, 3, 7.0),
            ],
        );

        let dist = Dijkstra::<PairingHeap<Node, Capacity>>::new()
            .run(&graph, 0)
            .unwrap();
        assert_eq!(dist, vec![Some(0.0), Some(2.0), Some(3.0), Some(5.0), None]);
    }

    #[test]
    fn undirected_distances() {
        let graph =
            CapAdjUndir::from_arcs(4, [(0u32, 1u32, 1.0), (1, 2, 1.0), (2, 3, 1.0), (0, 3, 10.0)]);

        let dijkstra = Dijkstra::<LazyBinaryHeap<Node, Capacity>>::new();
        assert_eq!(dijkstra.distance(&graph, 0, 3).unwrap(), Some(3.0));
        assert_eq!(dijkstra.distance(&graph, 3, 0).unwrap(), Some(3.0));
    }

    #[test]
    fn invalid_source_is_rejected() {
        let graph = CapAdjArray::new(3);
        assert_eq!(
            Dijkstra::<PairingHeap<Node, Capacity>>::new()
                .run(&graph, 3)
                .unwrap_err(),
            FlowError::NodeNotFound(3)
        );
    }

    /// Reference distances by repeated relaxation
    fn bellman_ford(graph: &CapAdjArray, source: Node) -> Vec<Option<Capacity>> {
        let mut dist = vec![None; graph.len()];
        dist[source as usize] = Some(0.0);
        for _ in 0..graph.len() {
            for e in graph.cap_edges() {
                if let Some(du) = dist[e.0 as usize] {
                    let cand = du + e.2;
                    if dist[e.1 as usize].is_none_or(|dv| cand < dv) {
                        dist[e.1 as usize] = Some(cand);
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn heaps_agree_with_reference() {
        let rng = &mut Pcg64Mcg::seed_from_u64(123);

        for _ in 0..20 {
            let n = rng.random_range(2..30u32);
            let mut graph = CapAdjArray::new(n);
            for _ in 0..(4 * n) {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u != v {
                    graph.try_add_arc(u, v, rng.random_range(1..20) as Capacity);
                }
            }

            let expected = bellman_ford(&graph, 0);
            let pairing = Dijkstra::<PairingHeap<Node, Capacity>>::new()
                .run(&graph, 0)
                .unwrap();
            let binary = Dijkstra::<LazyBinaryHeap<Node, Capacity>>::new()
                .run(&graph, 0)
                .unwrap();

            assert_eq!(pairing, expected);
            assert_eq!(binary, expected);
        }
    }
}
