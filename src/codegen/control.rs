use super::data::input_value;
use crate::ast::{Block, Expression, Statement};
use crate::error::GenerationError;
use crate::graph::{Graph, Node, NodeId, NodeKind};
use ahash::AHashSet;

/// The node reached through the control output `port_name`, if it is linked.
pub(super) fn follow(graph: &Graph, node: &Node, port_name: &str) -> Option<NodeId> {
    let port = node.output(port_name).filter(|p| p.is_control())?;
    graph.outgoing_from(port.id()).next().map(|c| c.to.node)
}

/// Nodes on the current control path, in order, with constant-time membership.
#[derive(Debug, Default)]
pub(super) struct ControlPath {
    order: Vec<NodeId>,
    members: AHashSet<NodeId>,
}

impl ControlPath {
    pub(super) fn starting_at(node: NodeId) -> Self {
        let mut path = Self::default();
        path.order.push(node);
        path.members.insert(node);
        path
    }

    /// Adds `node`, failing if it is already on the path.
    fn enter(&mut self, node: NodeId) -> Result<(), GenerationError> {
        if !self.members.insert(node) {
            return Err(GenerationError::ControlCycle(node));
        }
        self.order.push(node);
        Ok(())
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn truncate(&mut self, len: usize) {
        while self.order.len() > len {
            if let Some(node) = self.order.pop() {
                self.members.remove(&node);
            }
        }
    }
}

/// A straight run of statements being collected.
struct Chain {
    statements: Vec<Statement>,
    current: Option<NodeId>,
    /// Path length when the chain started; restored once it ends.
    mark: usize,
}

/// A branch whose arms are still being generated. The true arm is generated first.
struct PendingBranch {
    node: NodeId,
    condition: Expression,
    else_start: Option<NodeId>,
    then_branch: Option<Block>,
}

/// Emits the statements reachable from `start` along control connections.
///
/// Branch arms nest without native recursion: `chains` always holds one more
/// entry than `branches`, and each open branch owns the chain right above it.
pub(super) fn emit_chain(
    graph: &Graph,
    start: Option<NodeId>,
    path: &mut ControlPath,
    limit: Option<usize>,
) -> Result<Block, GenerationError> {
    let mut chains = vec![Chain {
        statements: Vec::new(),
        current: start,
        mark: path.len(),
    }];
    let mut branches: Vec<PendingBranch> = Vec::new();

    loop {
        let Some(chain) = chains.last_mut() else {
            return Ok(Block::default());
        };

        let Some(id) = chain.current else {
            let Some(finished) = chains.pop() else {
                return Ok(Block::default());
            };
            path.truncate(finished.mark);
            let block = Block::new(finished.statements);

            let Some(branch) = branches.last_mut() else {
                return Ok(block);
            };
            if branch.then_branch.is_none() {
                branch.then_branch = Some(block);
                chains.push(Chain {
                    statements: Vec::new(),
                    current: branch.else_start,
                    mark: path.len(),
                });
                continue;
            }

            let Some(branch) = branches.pop() else {
                return Ok(block);
            };
            let Some(parent) = chains.last_mut() else {
                return Ok(block);
            };
            parent.statements.push(Statement::If {
                node: branch.node,
                condition: branch.condition,
                then_branch: branch.then_branch.unwrap_or_default(),
                else_branch: block,
            });
            continue;
        };

        path.enter(id)?;
        let node = graph.node(id).ok_or(GenerationError::NodeNotFound(id))?;

        let step = match &node.kind {
            NodeKind::Print => {
                let value = input_value(graph, node, "value", limit)?;
                chain.statements.push(Statement::Print { node: id, value });
                Step::Continue(follow(graph, node, "exec"))
            }
            NodeKind::Delay => {
                let millis = input_value(graph, node, "millis", limit)?;
                chain.statements.push(Statement::Delay { node: id, millis });
                Step::Continue(follow(graph, node, "exec"))
            }
            NodeKind::Branch => Step::Open(PendingBranch {
                node: id,
                condition: input_value(graph, node, "condition", limit)?,
                else_start: follow(graph, node, "false"),
                then_branch: None,
            }),
            NodeKind::OnStart | NodeKind::Custom(_) => {
                log::warn!(
                    "Node #{} '{}' has no statement form, continuing through it",
                    id,
                    node.title
                );
                Step::Continue(follow(graph, node, "exec"))
            }
            NodeKind::Number { .. }
            | NodeKind::Text { .. }
            | NodeKind::Boolean { .. }
            | NodeKind::Add
            | NodeKind::Subtract
            | NodeKind::Multiply
            | NodeKind::Divide
            | NodeKind::Equals
            | NodeKind::GreaterThan
            | NodeKind::And
            | NodeKind::Or => Step::Continue(None),
        };

        match step {
            Step::Continue(next) => chain.current = next,
            Step::Open(branch) => {
                // Each arm terminates its own path; the branch node stays on it.
                chain.current = None;
                let then_start = follow(graph, node, "true");
                branches.push(branch);
                chains.push(Chain {
                    statements: Vec::new(),
                    current: then_start,
                    mark: path.len(),
                });
            }
        }
    }
}

enum Step {
    Continue(Option<NodeId>),
    Open(PendingBranch),
}
