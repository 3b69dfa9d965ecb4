/*!
# Residual Networks

A residual network `R` built from an input graph `G` has the same nodes as
`G` and contains the arc pair `(u, v)` and `(v, u)` iff `(u, v)` is not a
self-loop and at least one direction exists in `G` with positive capacity.

Arcs are stored in a flat array; the two directions of a pair occupy
adjacent indices, so the reverse of arc `a` is always `a ^ 1`. Each arc
carries a fixed `capacity` and a mutable `flow` satisfying
`flow(u, v) == -flow(v, u)` at all times.

Infinite input capacities are projected onto a finite sentinel
`inf = 3 * sum(finite capacities) + 1`. The residual capacity of an
unbounded arc is thus always more than `2/3 * inf` while a bounded arc
stays below `1/3 * inf`, so an augmentation moving more than `inf / 2`
units proves an all-infinite s-t path exists.
*/

use fxhash::FxHashMap;

use crate::{
    edge::{CapEdge, NumEdges},
    errors::{FlowError, FlowResult},
    node::{Capacity, Node, NodeBitSet, NumNodes},
    ops::*,
};

/// Index of an arc in a residual network
pub type ArcId = NumEdges;

/// One direction of a residual arc pair
#[derive(Debug, Clone, Copy)]
pub struct ResArc {
    head: Node,
    capacity: Capacity,
    flow: Capacity,
}

impl ResArc {
    /// The node this arc points to
    pub fn head(&self) -> Node {
        self.head
    }

    /// The fixed capacity of this arc
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// The current flow over this arc; negative if the reverse
    /// direction carries flow
    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// Remaining capacity, i.e. `capacity - flow`
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// Returns *true* if more flow can be pushed over this arc
    pub fn is_admissible(&self) -> bool {
        self.flow < self.capacity
    }
}

/// A residual network over nodes `0..n` with paired arcs.
///
/// Exclusively owned by one flow computation at a time; the flow engines
/// reset all flows at the start of a run, so a network can be reused for
/// several source/sink pairs without rebuilding.
#[derive(Debug)]
pub struct ResidualNetwork {
    out_arcs: Vec<Vec<ArcId>>,
    arcs: Vec<ResArc>,
    inf: Capacity,
    flow_value: Capacity,
}

impl GraphNodeOrder for ResidualNetwork {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }
}

impl ResidualNetwork {
    /// Builds a residual network from a capacitated graph and initializes a
    /// zero flow. Self-loops and non-positive capacities are excluded; the
    /// builder never mutates the input graph.
    pub fn build<G>(graph: &G) -> Self
    where
        G: CapacitatedArcs + GraphType,
    {
        let n = graph.number_of_nodes();

        let edges: Vec<CapEdge> = graph
            .cap_edges()
            .filter(|e| !e.is_loop() && e.2 > 0.0)
            .collect();

        // Simulate infinity with three times the sum of the finite capacities.
        // Unbounded arcs then still participate in residual arithmetic but can
        // never appear in a minimum cut of a bounded instance.
        let inf = 3.0
            * edges
                .iter()
                .filter(|e| e.2.is_finite())
                .map(|e| e.2)
                .sum::<Capacity>()
            + 1.0;

        let mut network = Self {
            out_arcs: vec![Vec::new(); n as usize],
            arcs: Vec::with_capacity(2 * edges.len()),
            inf,
            flow_value: 0.0,
        };

        if G::Dir::DIRECTED {
            let mut forward: FxHashMap<(Node, Node), ArcId> = FxHashMap::default();
            for CapEdge(u, v, c) in edges {
                let r = c.min(inf);
                if let Some(&rev) = forward.get(&(v, u)) {
                    // The pair was created when (v, u) was visited; the arc
                    // (u, v) is its zero-capacity partner.
                    network.arcs[(rev ^ 1) as usize].capacity = r;
                } else {
                    forward.insert((u, v), network.push_pair(u, v, r, 0.0));
                }
            }
        } else {
            for CapEdge(u, v, c) in edges {
                // Both directions get the full capacity
                let r = c.min(inf);
                network.push_pair(u, v, r, r);
            }
        }

        network
    }

    /// Appends the arc pair `(u, v)` / `(v, u)` and returns the id of the
    /// forward arc; the reverse arc is its xor-partner
    fn push_pair(&mut self, u: Node, v: Node, cap_uv: Capacity, cap_vu: Capacity) -> ArcId {
        let a = self.arcs.len() as ArcId;
        self.arcs.push(ResArc {
            head: v,
            capacity: cap_uv,
            flow: 0.0,
        });
        self.arcs.push(ResArc {
            head: u,
            capacity: cap_vu,
            flow: 0.0,
        });
        self.out_arcs[u as usize].push(a);
        self.out_arcs[v as usize].push(a ^ 1);
        a
    }

    /// The id of the reverse arc of `a`
    pub fn rev(a: ArcId) -> ArcId {
        a ^ 1
    }

    /// Read access to an arc
    pub fn arc(&self, a: ArcId) -> &ResArc {
        &self.arcs[a as usize]
    }

    /// The node an arc leaves from
    pub fn tail(&self, a: ArcId) -> Node {
        self.arcs[(a ^ 1) as usize].head
    }

    /// The ids of all arcs leaving `u`
    pub fn arcs_of(&self, u: Node) -> &[ArcId] {
        &self.out_arcs[u as usize]
    }

    /// The number of arcs (both directions counted)
    pub fn number_of_arcs(&self) -> NumEdges {
        self.arcs.len() as NumEdges
    }

    /// The number of arc pairs
    pub fn number_of_arc_pairs(&self) -> NumEdges {
        (self.arcs.len() / 2) as NumEdges
    }

    /// The finite sentinel standing in for infinite capacity
    pub fn inf(&self) -> Capacity {
        self.inf
    }

    /// The total flow reaching the sink in the last completed run
    pub fn flow_value(&self) -> Capacity {
        self.flow_value
    }

    pub(crate) fn set_flow_value(&mut self, flow_value: Capacity) {
        self.flow_value = flow_value;
    }

    /// The flow from `u` to `v`, or `0` if no such arc exists
    pub fn flow_between(&self, u: Node, v: Node) -> Capacity {
        self.out_arcs[u as usize]
            .iter()
            .find(|&&a| self.arcs[a as usize].head == v)
            .map_or(0.0, |&a| self.arcs[a as usize].flow)
    }

    /// Resets all flows to zero
    pub(crate) fn reset_flows(&mut self) {
        for arc in &mut self.arcs {
            arc.flow = 0.0;
        }
        self.flow_value = 0.0;
    }

    /// Pushes `delta` units over `a` and pulls them from its reverse
    pub(crate) fn push_flow(&mut self, a: ArcId, delta: Capacity) {
        self.arcs[a as usize].flow += delta;
        self.arcs[(a ^ 1) as usize].flow -= delta;
    }

    /// Augments flow along a path of arc ids from the source to the sink.
    /// Returns the bottleneck pushed, or [`FlowError::UnboundedFlow`] if the
    /// bottleneck proves an all-infinite-capacity path.
    pub(crate) fn augment(&mut self, path: &[ArcId]) -> FlowResult<Capacity> {
        let mut flow = self.inf;
        for &a in path {
            flow = flow.min(self.arcs[a as usize].residual());
        }

        if flow * 2.0 > self.inf {
            return Err(FlowError::UnboundedFlow);
        }

        for &a in path {
            self.push_flow(a, flow);
        }
        Ok(flow)
    }

    /// Returns the set of nodes reachable from `s` over arcs with remaining
    /// residual capacity. After a completed max-flow run this is the source
    /// side of a minimum s-t cut.
    pub fn reachable_from(&self, s: Node) -> NodeBitSet {
        let mut seen = self.vertex_bitset_unset();
        seen.set_bit(s);
        let mut queue = vec![s];

        while let Some(u) = queue.pop() {
            for &a in &self.out_arcs[u as usize] {
                let arc = &self.arcs[a as usize];
                if arc.is_admissible() && !seen.set_bit(arc.head) {
                    queue.push(arc.head);
                }
            }
        }

        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{CapAdjArray, CapAdjUndir};

    #[test]
    fn directed_build_pairs_arcs() {
        let graph = CapAdjArray::from_arcs(3, [(0u32, 1u32, 4.0), (1, 2, 2.0)]);
        let network = ResidualNetwork::build(&graph);

        assert_eq!(network.number_of_nodes(), 3);
        assert_eq!(network.number_of_arc_pairs(), 2);
        assert_eq!(network.inf(), 3.0 * 6.0 + 1.0);

        for a in 0..network.number_of_arcs() {
            assert_eq!(network.tail(a), network.arc(ResidualNetwork::rev(a)).head());
            assert_eq!(network.arc(a).flow(), 0.0);
        }

        // Reverse direction exists with zero capacity
        let back = network
            .arcs_of(1)
            .iter()
            .find(|&&a| network.arc(a).head() == 0)
            .unwrap();
        assert_eq!(network.arc(*back).capacity(), 0.0);
    }

    #[test]
    fn antiparallel_arcs_share_a_pair() {
        let graph = CapAdjArray::from_arcs(2, [(0u32, 1u32, 4.0), (1, 0, 7.0)]);
        let network = ResidualNetwork::build(&graph);

        assert_eq!(network.number_of_arc_pairs(), 1);
        let a = network.arcs_of(0)[0];
        assert_eq!(network.arc(a).capacity(), 4.0);
        assert_eq!(network.arc(ResidualNetwork::rev(a)).capacity(), 7.0);
    }

    #[test]
    fn undirected_build_mirrors_capacity() {
        let graph = CapAdjUndir::from_arcs(2, [(0u32, 1u32, 5.0)]);
        let network = ResidualNetwork::build(&graph);

        assert_eq!(network.number_of_arc_pairs(), 1);
        let a = network.arcs_of(0)[0];
        assert_eq!(network.arc(a).capacity(), 5.0);
        assert_eq!(network.arc(ResidualNetwork::rev(a)).capacity(), 5.0);
    }

    #[test]
    fn self_loops_and_zero_capacity_excluded() {
        let graph = CapAdjArray::from_arcs(3, [(0u32, 0u32, 9.0), (0, 1, 0.0), (1, 2, 1.0)]);
        let network = ResidualNetwork::build(&graph);
        assert_eq!(network.number_of_arc_pairs(), 1);
    }

    #[test]
    fn infinite_capacity_is_projected() {
        let graph = CapAdjArray::from_arcs(
            3,
            [
                (0u32, 1u32, Capacity::INFINITY),
                (1, 2, 5.0),
            ],
        );
        let network = ResidualNetwork::build(&graph);

        assert_eq!(network.inf(), 16.0);
        let a = network.arcs_of(0)[0];
        assert_eq!(network.arc(a).capacity(), network.inf());
    }

    #[test]
    fn all_infinite_falls_back_to_constant() {
        let graph = CapAdjArray::from_arcs(2, [(0u32, 1u32, Capacity::INFINITY)]);
        let network = ResidualNetwork::build(&graph);
        assert_eq!(network.inf(), 1.0);
        assert_eq!(network.arc(network.arcs_of(0)[0]).capacity(), 1.0);
    }

    #[test]
    fn push_flow_keeps_antisymmetry() {
        let graph = CapAdjArray::from_arcs(2, [(0u32, 1u32, 4.0)]);
        let mut network = ResidualNetwork::build(&graph);

        let a = network.arcs_of(0)[0];
        network.push_flow(a, 3.0);
        assert_eq!(network.arc(a).flow(), 3.0);
        assert_eq!(network.arc(ResidualNetwork::rev(a)).flow(), -3.0);
        assert_eq!(network.flow_between(0, 1), 3.0);
        assert_eq!(network.flow_between(1, 0), -3.0);

        network.reset_flows();
        assert_eq!(network.arc(a).flow(), 0.0);
    }

    #[test]
    fn augment_detects_unbounded_path() {
        let graph = CapAdjArray::from_arcs(
            3,
            [
                (0u32, 1u32, Capacity::INFINITY),
                (1, 2, Capacity::INFINITY),
            ],
        );
        let mut network = ResidualNetwork::build(&graph);

        let a = network.arcs_of(0)[0];
        let b = *network
            .arcs_of(1)
            .iter()
            .find(|&&x| network.arc(x).head() == 2)
            .unwrap();
        assert_eq!(network.augment(&[a, b]), Err(FlowError::UnboundedFlow));
    }

    #[test]
    fn reachability_follows_residual_arcs() {
        let graph = CapAdjArray::from_arcs(4, [(0u32, 1u32, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        let mut network = ResidualNetwork::build(&graph);

        assert_eq!(network.reachable_from(0).cardinality(), 4);

        // Saturate the middle arc: 2 and 3 become unreachable from 0
        let b = *network
            .arcs_of(1)
            .iter()
            .find(|&&x| network.arc(x).head() == 2)
            .unwrap();
        network.push_flow(b, 1.0);

        let reach = network.reachable_from(0);
        assert!(reach.get_bit(0) && reach.get_bit(1));
        assert!(!reach.get_bit(2) && !reach.get_bit(3));
    }
}
