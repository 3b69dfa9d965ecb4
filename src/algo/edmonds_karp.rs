/*!
# Edmonds-Karp

Maximum-flow engine that augments along shortest paths found by a
bidirectional breadth-first search which always expands the smaller
frontier. Runs in `O(n m^2)`; it also serves as the second phase of the
two-phase [`ShortestAugmentingPath`](super::ShortestAugmentingPath) engine.
*/

use crate::{
    errors::FlowResult,
    node::{Capacity, Node, NodeBitSet, NumNodes},
    ops::*,
    residual::{ArcId, ResidualNetwork},
};

use super::validate_endpoints;

/// Sentinel for "no arc recorded"
const NO_ARC: ArcId = ArcId::MAX;

/// Configurable Edmonds-Karp maximum-flow computation
#[derive(Default, Clone)]
pub struct EdmondsKarp {
    cutoff: Option<Capacity>,
}

impl EdmondsKarp {
    /// Creates a default configuration without a cutoff
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminate early once the flow value reaches `cutoff`. The residual
    /// network then no longer induces a minimum cut.
    pub fn set_cutoff(&mut self, cutoff: Capacity) {
        self.cutoff = Some(cutoff);
    }

    /// Chainable version of [`Self::set_cutoff`]
    pub fn cutoff(mut self, cutoff: Capacity) -> Self {
        self.set_cutoff(cutoff);
        self
    }

    /// Builds a residual network for `graph` and computes a maximum s-t
    /// flow on it
    pub fn run<G>(&self, graph: &G, s: Node, t: Node) -> FlowResult<ResidualNetwork>
    where
        G: CapacitatedArcs + GraphType,
    {
        validate_endpoints(graph.number_of_nodes(), s, t)?;
        let mut network = ResidualNetwork::build(graph);
        self.run_on(&mut network, s, t)?;
        Ok(network)
    }

    /// Computes a maximum s-t flow on an existing residual network,
    /// resetting any flow left from a previous run
    pub fn run_on(&self, network: &mut ResidualNetwork, s: Node, t: Node) -> FlowResult<Capacity> {
        validate_endpoints(network.number_of_nodes(), s, t)?;
        network.reset_flows();

        let cutoff = self.cutoff.unwrap_or(Capacity::INFINITY);
        let flow_value = edmonds_karp_core(network, s, t, cutoff)?;
        network.set_flow_value(flow_value);
        Ok(flow_value)
    }
}

/// Breadth-first search state of one direction.
/// `arcs[v]` is the arc over which `v` was discovered, oriented along the
/// s-t direction; the root carries `NO_ARC`.
struct Frontier {
    arcs: Vec<ArcId>,
    seen: NodeBitSet,
    queue: Vec<Node>,
}

impl Frontier {
    fn start(n: NumNodes, root: Node) -> Self {
        let mut seen = NodeBitSet::new(n);
        seen.set_bit(root);
        Self {
            arcs: vec![NO_ARC; n as usize],
            seen,
            queue: vec![root],
        }
    }

    fn discovered(&self, v: Node) -> bool {
        self.seen.get_bit(v)
    }
}

/// Augments flow along shortest paths until no augmenting path exists or
/// the flow value reaches `cutoff`. Returns the total flow pushed.
pub(crate) fn edmonds_karp_core(
    network: &mut ResidualNetwork,
    s: Node,
    t: Node,
    cutoff: Capacity,
) -> FlowResult<Capacity> {
    let mut flow_value = 0.0;
    while flow_value < cutoff {
        let Some((meet, pred, succ)) = bidirectional_bfs(network, s, t) else {
            break;
        };

        // Splice the two half-paths at the meeting node
        let mut path: Vec<ArcId> = Vec::new();
        let mut u = meet;
        while u != s {
            let a = pred.arcs[u as usize];
            path.push(a);
            u = network.tail(a);
        }
        path.reverse();
        let mut u = meet;
        while u != t {
            let a = succ.arcs[u as usize];
            path.push(a);
            u = network.arc(a).head();
        }

        flow_value += network.augment(&path)?;
    }

    Ok(flow_value)
}

/// Bidirectional breadth-first search for an augmenting path. Expands the
/// smaller frontier each round; returns the meeting node together with both
/// search states, or `None` if the frontiers cannot meet.
fn bidirectional_bfs(
    network: &ResidualNetwork,
    s: Node,
    t: Node,
) -> Option<(Node, Frontier, Frontier)> {
    let n = network.number_of_nodes();
    let mut pred = Frontier::start(n, s);
    let mut succ = Frontier::start(n, t);

    loop {
        let mut next = Vec::new();

        if pred.queue.len() <= succ.queue.len() {
            for &u in &pred.queue {
                for &a in network.arcs_of(u) {
                    let v = network.arc(a).head();
                    if !pred.discovered(v) && network.arc(a).is_admissible() {
                        pred.seen.set_bit(v);
                        pred.arcs[v as usize] = a;
                        if succ.discovered(v) {
                            return Some((v, pred, succ));
                        }
                        next.push(v);
                    }
                }
            }
            if next.is_empty() {
                return None;
            }
            pred.queue = next;
        } else {
            for &u in &succ.queue {
                for &a in network.arcs_of(u) {
                    // The in-arc (v, u) is the reverse of the out-arc (u, v)
                    let back = ResidualNetwork::rev(a);
                    let v = network.arc(a).head();
                    if !succ.discovered(v) && network.arc(back).is_admissible() {
                        succ.seen.set_bit(v);
                        succ.arcs[v as usize] = back;
                        if pred.discovered(v) {
                            return Some((v, pred, succ));
                        }
                        next.push(v);
                    }
                }
            }
            if next.is_empty() {
                return None;
            }
            succ.queue = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algo::ShortestAugmentingPath, errors::FlowError, repr::CapAdjArray};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn diamond() -> CapAdjArray {
        CapAdjArray::from_arcs(
            7,
            [
                (0u32, 1u32, 3.0),
                (0, 2, 1.0),
                (1, 3, 3.0),
                (2, 3, 5.0),
                (2, 4, 4.0),
                (4, 5, 2.0),
                (3, 6, 2.0),
                (5, 6, 3.0),
            ],
        )
    }

    #[test]
    fn diamond_flow() {
        let network = EdmondsKarp::new().run(&diamond(), 0, 6).unwrap();
        assert_eq!(network.flow_value(), 3.0);
    }

    #[test]
    fn validation_matches_sap() {
        let ek = EdmondsKarp::new();
        assert_eq!(
            ek.run(&diamond(), 0, 7).unwrap_err(),
            FlowError::NodeNotFound(7)
        );
        assert!(matches!(
            ek.run(&diamond(), 2, 2).unwrap_err(),
            FlowError::InvalidInput(_)
        ));
    }

    #[test]
    fn disconnected_pair() {
        let graph = CapAdjArray::from_arcs(4, [(0u32, 1u32, 1.0), (2, 3, 1.0)]);
        assert_eq!(
            EdmondsKarp::new().run(&graph, 0, 3).unwrap().flow_value(),
            0.0
        );
    }

    #[test]
    fn unbounded_path_is_reported() {
        let graph = CapAdjArray::from_arcs(
            3,
            [
                (0u32, 1u32, Capacity::INFINITY),
                (1, 2, Capacity::INFINITY),
            ],
        );
        assert_eq!(
            EdmondsKarp::new().run(&graph, 0, 2).unwrap_err(),
            FlowError::UnboundedFlow
        );
    }

    #[test]
    fn cutoff_stops_early() {
        let flow = EdmondsKarp::new()
            .cutoff(1.0)
            .run(&diamond(), 0, 6)
            .unwrap()
            .flow_value();
        assert!((1.0..3.0).contains(&flow));
    }

    #[test]
    fn agrees_with_shortest_augmenting_path() {
        let rng = &mut Pcg64::seed_from_u64(99);

        for _ in 0..30 {
            let n = rng.random_range(4..25u32);
            let mut graph = CapAdjArray::new(n);
            for _ in 0..(3 * n) {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u != v {
                    graph.try_add_arc(u, v, rng.random_range(1..15) as Capacity);
                }
            }

            let ek = EdmondsKarp::new().run(&graph, 0, n - 1).unwrap();
            let sap = ShortestAugmentingPath::new().run(&graph, 0, n - 1).unwrap();
            assert_eq!(ek.flow_value(), sap.flow_value());
        }
    }
}
