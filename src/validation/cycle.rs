use crate::graph::{Graph, NodeId};
use ahash::AHashSet;

/// Depth-first cycle search over every outgoing connection, control and data alike.
///
/// The search keeps its own stack of `(node, remaining successors)` frames, so
/// graph depth never translates into native recursion.
pub struct CycleDetector<'a> {
    graph: &'a Graph,
}

impl<'a> CycleDetector<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Returns `true` if a cycle is reachable from `start`.
    pub fn has_cycle_from(&self, start: NodeId) -> bool {
        self.search(start, &mut AHashSet::new())
    }

    /// The first node, in graph order, from which a cycle is reachable.
    ///
    /// Equivalent to calling `has_cycle_from` on every node in turn, but `visited`
    /// is shared between starts: a node fully explored without finding a cycle
    /// cannot lead to one later, so each node is expanded once.
    pub fn first_cycle_start(&self) -> Option<NodeId> {
        let mut visited = AHashSet::new();
        self.graph
            .nodes()
            .map(|node| node.id())
            .find(|&id| !visited.contains(&id) && self.search(id, &mut visited))
    }

    fn search(&self, start: NodeId, visited: &mut AHashSet<NodeId>) -> bool {
        let mut on_stack = AHashSet::new();
        let mut stack = vec![(start, self.successors(start))];
        visited.insert(start);
        on_stack.insert(start);

        while let Some((node, successors)) = stack.last_mut() {
            let Some(next) = successors.pop() else {
                let done = *node;
                stack.pop();
                on_stack.remove(&done);
                continue;
            };
            if on_stack.contains(&next) {
                return true;
            }
            if visited.insert(next) {
                on_stack.insert(next);
                stack.push((next, self.successors(next)));
            }
        }
        false
    }

    /// Successors in reverse, so popping visits them in connection order.
    fn successors(&self, node: NodeId) -> Vec<NodeId> {
        let mut next: Vec<NodeId> = self.graph.outgoing(node).map(|c| c.to.node).collect();
        next.reverse();
        next
    }
}
