/*!
# Cuts & Connectivity

Flow-based cut sets and connectivity numbers, built by running the
max-flow engines on auxiliary unit-capacity networks:

- **edge connectivity** uses the input arcs with unit capacities (both
  directions for undirected graphs),
- **node connectivity** splits every node `v` into an in-copy `v` and an
  out-copy `v + n` joined by a unit arc, reducing node cuts to edge cuts.

Cut *sets* are read off the source side of the minimum cut, i.e. the nodes
reachable from `s` in the final residual network.
*/

use itertools::Itertools;

use crate::{
    edge::Edge,
    errors::{FlowError, FlowResult},
    node::{Capacity, Node, NodeBitSet, NumNodes},
    ops::*,
    repr::CapAdjArray,
    residual::ResidualNetwork,
};

use super::{validate_endpoints, EdmondsKarp};

/// Unit-capacity digraph for edge-connectivity computations.
/// Undirected edges become two reciprocal arcs.
pub fn build_auxiliary_edge_connectivity<G>(graph: &G) -> CapAdjArray
where
    G: CapacitatedArcs + GraphType,
{
    let mut aux = CapAdjArray::new(graph.number_of_nodes());
    for e in graph.cap_edges().filter(|e| !e.is_loop()) {
        aux.try_add_arc(e.0, e.1, 1.0);
        if !G::Dir::DIRECTED {
            aux.try_add_arc(e.1, e.0, 1.0);
        }
    }
    aux
}

/// Unit-capacity digraph for node-connectivity computations.
///
/// Every node `v` of the input becomes an in-copy `v` and an out-copy
/// `v + n` joined by the internal arc `(v, v + n)`. Each input edge
/// `(u, v)` becomes `(u + n, v)`, plus `(v + n, u)` for undirected inputs.
/// A minimum edge cut between `s + n` and `t` in this digraph corresponds
/// to a minimum s-t node cut in the input.
pub fn build_auxiliary_node_connectivity<G>(graph: &G) -> CapAdjArray
where
    G: CapacitatedArcs + GraphType,
{
    let n = graph.number_of_nodes();
    let mut aux = CapAdjArray::new(2 * n);

    for v in graph.vertices_range() {
        aux.add_arc(v, v + n, 1.0);
    }
    for e in graph.cap_edges().filter(|e| !e.is_loop()) {
        aux.try_add_arc(e.0 + n, e.1, 1.0);
        if !G::Dir::DIRECTED {
            aux.try_add_arc(e.1 + n, e.0, 1.0);
        }
    }

    aux
}

/// Maps a node of the split digraph back to the input node it copies
fn split_label(x: Node, n: NumNodes) -> Node {
    if x < n {
        x
    } else {
        x - n
    }
}

/// Runs a maximum flow on `aux` and returns the flow value together with
/// the source side of the induced minimum cut
fn st_cut_partition(
    aux: &CapAdjArray,
    s: Node,
    t: Node,
    cutoff: Option<Capacity>,
) -> FlowResult<(Capacity, NodeBitSet)> {
    let mut ek = EdmondsKarp::new();
    if let Some(c) = cutoff {
        ek.set_cutoff(c);
    }
    let network = ek.run(aux, s, t)?;
    let reach = network.reachable_from(s);
    Ok((network.flow_value(), reach))
}

/// Reuses a prepared residual network for one unit-flow value query
fn unit_flow_on(
    network: &mut ResidualNetwork,
    s: Node,
    t: Node,
    cutoff: NumNodes,
) -> FlowResult<NumNodes> {
    let flow = EdmondsKarp::new()
        .cutoff(cutoff as Capacity)
        .run_on(network, s, t)?;
    Ok(flow as NumNodes)
}

/// Flow-based cut and connectivity queries, available on every
/// capacitated graph
pub trait Connectivity: CapacitatedArcs + GraphType + AdjacencyTest + GraphEdgeOrder {
    /// Returns the edges of a minimum cardinality s-t edge cut: a smallest
    /// set of edges whose removal destroys all s-t paths. Edge capacities
    /// are not considered.
    fn minimum_st_edge_cut(&self, s: Node, t: Node) -> FlowResult<Vec<Edge>> {
        validate_endpoints(self.number_of_nodes(), s, t)?;

        let aux = build_auxiliary_edge_connectivity(self);
        let (_, reach) = st_cut_partition(&aux, s, t, None)?;

        // Any input edge linking the two sides of the partition is part
        // of the cut set
        let mut cut = Vec::new();
        for u in reach.iter_set_bits() {
            for v in self.neighbors_of(u) {
                if !reach.get_bit(v) {
                    cut.push(Edge(u, v));
                }
            }
        }
        Ok(cut)
    }

    /// Returns a minimum cardinality set of nodes whose removal destroys
    /// all s-t paths, or an empty set if s and t are adjacent (no node cut
    /// can separate adjacent nodes).
    fn minimum_st_node_cut(&self, s: Node, t: Node) -> FlowResult<Vec<Node>> {
        validate_endpoints(self.number_of_nodes(), s, t)?;
        if self.has_edge(s, t) || self.has_edge(t, s) {
            return Ok(Vec::new());
        }

        let n = self.number_of_nodes();
        let aux = build_auxiliary_node_connectivity(self);
        let (_, reach) = st_cut_partition(&aux, s + n, t, None)?;

        // Both endpoints of every cut arc map back to cut candidates;
        // internal arcs contribute exactly their split node
        let mut cut = NodeBitSet::new(n);
        for u in reach.iter_set_bits() {
            for v in aux.neighbors_of(u) {
                if !reach.get_bit(v) {
                    cut.set_bit(split_label(u, n));
                    cut.set_bit(split_label(v, n));
                }
            }
        }
        cut.clear_bit(s);
        cut.clear_bit(t);

        Ok(cut.iter_set_bits().collect())
    }

    /// Local edge connectivity: the number of edges of a minimum s-t edge
    /// cut. With a `cutoff`, the computation stops early once the value is
    /// known to be at least the cutoff.
    fn local_edge_connectivity(
        &self,
        s: Node,
        t: Node,
        cutoff: Option<NumNodes>,
    ) -> FlowResult<NumNodes> {
        validate_endpoints(self.number_of_nodes(), s, t)?;
        let aux = build_auxiliary_edge_connectivity(self);
        let (flow, _) = st_cut_partition(&aux, s, t, cutoff.map(|c| c as Capacity))?;
        Ok(flow as NumNodes)
    }

    /// Local node connectivity: the number of node-disjoint s-t paths,
    /// which for non-adjacent s, t equals the size of a minimum s-t node
    /// cut
    fn local_node_connectivity(
        &self,
        s: Node,
        t: Node,
        cutoff: Option<NumNodes>,
    ) -> FlowResult<NumNodes> {
        validate_endpoints(self.number_of_nodes(), s, t)?;
        let n = self.number_of_nodes();
        let aux = build_auxiliary_node_connectivity(self);
        let (flow, _) = st_cut_partition(&aux, s + n, t, cutoff.map(|c| c as Capacity))?;
        Ok(flow as NumNodes)
    }

    /// Global edge connectivity: the smallest number of edges whose removal
    /// disconnects the graph; 0 for disconnected graphs
    fn edge_connectivity(&self) -> FlowResult<NumNodes> {
        let n = self.number_of_nodes();
        if n < 2 {
            return Err(FlowError::InvalidInput(
                "connectivity is undefined for graphs with less than two nodes",
            ));
        }
        if !is_weakly_connected(self) {
            return Ok(0);
        }

        let aux = build_auxiliary_edge_connectivity(self);
        let mut network = ResidualNetwork::build(&aux);

        // Edge connectivity is bounded by the minimum degree
        let mut bound = if Self::Dir::DIRECTED {
            total_degrees(self).into_iter().min().unwrap()
        } else {
            self.degrees().min().unwrap()
        };

        if Self::Dir::DIRECTED {
            // A minimum cut separates some consecutive pair of the cyclic
            // node order
            for u in self.vertices_range() {
                let v = if u + 1 == n { 0 } else { u + 1 };
                bound = bound.min(unit_flow_on(&mut network, u, v, bound)?);
            }
        } else {
            // A minimum cut separates node 0 from some other node
            for v in 1..n {
                bound = bound.min(unit_flow_on(&mut network, 0, v, bound)?);
            }
        }

        Ok(bound)
    }

    /// Global node connectivity: the smallest number of nodes whose removal
    /// disconnects the graph; 0 for disconnected graphs, `n - 1` for
    /// complete graphs
    fn node_connectivity(&self) -> FlowResult<NumNodes> {
        let n = self.number_of_nodes();
        if n < 2 {
            return Err(FlowError::InvalidInput(
                "connectivity is undefined for graphs with less than two nodes",
            ));
        }
        if !is_weakly_connected(self) {
            return Ok(0);
        }

        let aux = build_auxiliary_node_connectivity(self);
        let mut network = ResidualNetwork::build(&aux);

        // For directed graphs both directions count as adjacency
        let neighborhoods: Vec<NodeBitSet> = if Self::Dir::DIRECTED {
            symmetric_neighborhoods(self)
        } else {
            self.vertices().map(|u| self.neighbors_of_as_bitset(u)).collect()
        };

        // Node connectivity is bounded by degree; start from a node
        // of minimum degree
        let v = (0..n)
            .min_by_key(|&u| neighborhoods[u as usize].cardinality())
            .unwrap();
        let mut bound = neighborhoods[v as usize].cardinality() as NumNodes;

        let mut query = |network: &mut ResidualNetwork, bound: &mut NumNodes, x: Node, y: Node| {
            let flow = unit_flow_on(network, x + n, y, *bound)?;
            *bound = (*bound).min(flow);
            FlowResult::Ok(())
        };

        // All non-neighbors of v
        for w in self.vertices_range() {
            if w != v && !neighborhoods[v as usize].get_bit(w) {
                query(&mut network, &mut bound, v, w)?;
            }
        }

        // And all non-adjacent pairs of neighbors of v. A pair joined by an
        // arc cannot be separated by removing nodes.
        let neighbors = neighborhoods[v as usize].iter_set_bits().collect_vec();
        for (&x, &y) in neighbors.iter().tuple_combinations() {
            if !self.has_edge(x, y) {
                query(&mut network, &mut bound, x, y)?;
            }
            if Self::Dir::DIRECTED && !self.has_edge(y, x) {
                query(&mut network, &mut bound, y, x)?;
            }
        }

        Ok(bound)
    }
}

impl<G: CapacitatedArcs + GraphType + AdjacencyTest + GraphEdgeOrder> Connectivity for G {}

/// Ignoring directions, are all nodes in one component?
fn is_weakly_connected<G: CapacitatedArcs + GraphType>(graph: &G) -> bool {
    let n = graph.number_of_nodes();
    let mut adj = vec![Vec::new(); n as usize];
    for e in graph.cap_edges() {
        adj[e.0 as usize].push(e.1);
        adj[e.1 as usize].push(e.0);
    }

    let mut seen = NodeBitSet::new(n);
    seen.set_bit(0);
    let mut stack = vec![0 as Node];
    while let Some(u) = stack.pop() {
        for &v in &adj[u as usize] {
            if !seen.set_bit(v) {
                stack.push(v);
            }
        }
    }

    seen.cardinality() as NumNodes == n
}

/// In-degree plus out-degree per node of a directed graph
fn total_degrees<G: CapacitatedArcs + GraphType>(graph: &G) -> Vec<NumNodes> {
    let mut degrees: Vec<NumNodes> = graph.degrees().collect();
    for e in graph.cap_edges() {
        degrees[e.1 as usize] += 1;
    }
    degrees
}

/// Union of in- and out-neighbors per node of a directed graph
fn symmetric_neighborhoods<G: CapacitatedArcs + GraphType>(graph: &G) -> Vec<NodeBitSet> {
    let mut nbs: Vec<NodeBitSet> = graph
        .vertices()
        .map(|u| graph.neighbors_of_as_bitset(u))
        .collect();
    for e in graph.cap_edges() {
        nbs[e.1 as usize].set_bit(e.0);
    }
    nbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algo::ShortestAugmentingPath,
        repr::{CapAdjArray, CapAdjUndir},
    };
    use itertools::Itertools;

    /// Outer 5-cycle, spokes, inner pentagram
    fn petersen() -> CapAdjUndir {
        CapAdjUndir::from_unit_arcs(
            10,
            [
                (0u32, 1u32),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
                (5, 7),
                (7, 9),
                (9, 6),
                (6, 8),
                (8, 5),
            ],
        )
    }

    fn complete(n: NumNodes) -> CapAdjUndir {
        CapAdjUndir::from_unit_arcs(
            n,
            (0..n).tuple_combinations().map(|(u, v)| (u, v)),
        )
    }

    #[test]
    fn petersen_edge_connectivity() {
        let graph = petersen();
        assert_eq!(graph.edge_connectivity().unwrap(), 3);
        assert_eq!(graph.local_edge_connectivity(0, 7, None).unwrap(), 3);
        assert_eq!(graph.minimum_st_edge_cut(0, 7).unwrap().len(), 3);
    }

    #[test]
    fn petersen_node_connectivity() {
        let graph = petersen();
        assert_eq!(graph.node_connectivity().unwrap(), 3);

        let cut = graph.minimum_st_node_cut(0, 7).unwrap();
        assert_eq!(cut.len(), 3);
        // Removing the cut must disconnect 0 from 7
        let mut pruned = CapAdjUndir::new(10);
        for e in graph.cap_edges() {
            if !cut.contains(&e.0) && !cut.contains(&e.1) {
                pruned.add_arc(e.0, e.1, e.2);
            }
        }
        assert_eq!(pruned.local_edge_connectivity(0, 7, None).unwrap(), 0);
    }

    #[test]
    fn k5_node_connectivity_all_pairs() {
        let graph = complete(5);
        assert_eq!(graph.node_connectivity().unwrap(), 4);

        let aux = build_auxiliary_node_connectivity(&graph);
        for (s, t) in (0..5u32).tuple_combinations() {
            assert_eq!(graph.local_node_connectivity(s, t, None).unwrap(), 4);
            assert_eq!(graph.local_node_connectivity(t, s, None).unwrap(), 4);

            // Both flow engines agree on the split network
            let ek = EdmondsKarp::new().run(&aux, s + 5, t).unwrap();
            let sap = ShortestAugmentingPath::new()
                .two_phase(true)
                .run(&aux, s + 5, t)
                .unwrap();
            assert_eq!(ek.flow_value(), 4.0);
            assert_eq!(sap.flow_value(), 4.0);

            // Adjacent nodes cannot be separated
            assert!(graph.minimum_st_node_cut(s, t).unwrap().is_empty());
        }
    }

    #[test]
    fn path_graph_cuts() {
        let graph = CapAdjUndir::from_unit_arcs(4, [(0u32, 1u32), (1, 2), (2, 3)]);

        assert_eq!(graph.minimum_st_node_cut(0, 3).unwrap().len(), 1);
        assert_eq!(graph.minimum_st_edge_cut(0, 3).unwrap().len(), 1);
        assert_eq!(graph.edge_connectivity().unwrap(), 1);
        assert_eq!(graph.node_connectivity().unwrap(), 1);
    }

    #[test]
    fn disconnected_graphs() {
        let graph = CapAdjUndir::from_unit_arcs(4, [(0u32, 1u32), (2, 3)]);
        assert_eq!(graph.edge_connectivity().unwrap(), 0);
        assert_eq!(graph.node_connectivity().unwrap(), 0);
        assert_eq!(graph.local_edge_connectivity(0, 3, None).unwrap(), 0);
    }

    #[test]
    fn trivial_graphs_are_rejected() {
        let graph = CapAdjUndir::new(1);
        assert!(graph.edge_connectivity().is_err());
        assert!(graph.node_connectivity().is_err());
    }

    #[test]
    fn directed_edge_connectivity() {
        // A directed 4-cycle: removing any single arc breaks it
        let cycle = CapAdjArray::from_unit_arcs(4, [(0u32, 1u32), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(cycle.edge_connectivity().unwrap(), 1);

        // Two antiparallel cycles
        let doubled = CapAdjArray::from_unit_arcs(
            4,
            [
                (0u32, 1u32),
                (1, 2),
                (2, 3),
                (3, 0),
                (1, 0),
                (2, 1),
                (3, 2),
                (0, 3),
            ],
        );
        assert_eq!(doubled.edge_connectivity().unwrap(), 2);
    }

    #[test]
    fn directed_node_cut_respects_orientation() {
        // 0 -> 1 -> 2 and 0 -> 3 -> 2: removing {1, 3} separates 0 from 2
        let graph =
            CapAdjArray::from_unit_arcs(4, [(0u32, 1u32), (1, 2), (0, 3), (3, 2)]);
        let mut cut = graph.minimum_st_node_cut(0, 2).unwrap();
        cut.sort_unstable();
        assert_eq!(cut, vec![1, 3]);
        assert_eq!(graph.local_node_connectivity(0, 2, None).unwrap(), 2);

        // Reverse direction carries no flow at all
        assert_eq!(graph.local_node_connectivity(2, 0, None).unwrap(), 0);
    }

    #[test]
    fn cutoff_caps_the_reported_value() {
        let graph = complete(6);
        let capped = graph.local_edge_connectivity(0, 5, Some(2)).unwrap();
        assert!((2..5).contains(&capped));
    }
}
