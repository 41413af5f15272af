//! The node graph: an arena of nodes and connections with owned lookup tables.
//!
//! All structural edits go through `Graph` so referential integrity holds at all
//! times: removing a node removes its incident connections, and every input port
//! has at most one incoming connection.

use crate::ast::Value;
use crate::error::GraphError;
use ahash::AHashMap;

pub mod connection;
pub mod node;
pub mod port;

pub use connection::*;
pub use node::*;
pub use port::*;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    connections: Vec<Option<Connection>>,
    port_owners: AHashMap<PortId, NodeId>,
    /// Input port -> the single connection terminating there.
    inbound: AHashMap<PortId, ConnectionId>,
    /// Output port -> connections leaving it, in creation order.
    outbound: AHashMap<PortId, Vec<ConnectionId>>,
    next_port: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, allocating identifiers for it and its ports.
    pub fn add_node(
        &mut self,
        title: impl Into<String>,
        category: Category,
        kind: NodeKind,
        position: (f32, f32),
        inputs: Vec<PortSpec>,
        outputs: Vec<PortSpec>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let inputs = inputs
            .into_iter()
            .map(|spec| self.attach_port(id, PortDirection::Input, spec))
            .collect();
        let outputs = outputs
            .into_iter()
            .map(|spec| self.attach_port(id, PortDirection::Output, spec))
            .collect();
        let node = Node::new(id, title.into(), category, kind, position, inputs, outputs);
        log::debug!("Added node #{} '{}'", id, node.title);
        self.nodes.push(Some(node));
        id
    }

    fn attach_port(&mut self, node: NodeId, direction: PortDirection, spec: PortSpec) -> Port {
        let id = PortId(self.next_port);
        self.next_port += 1;
        self.port_owners.insert(id, node);
        Port::attach(id, node, direction, spec)
    }

    /// Removes a node together with every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let node = self
            .nodes
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .ok_or(GraphError::NodeNotFound(id))?;

        let mut incident: Vec<ConnectionId> = node
            .ports()
            .flat_map(|port| self.port_connections(port.id()))
            .collect();
        incident.sort_unstable();
        incident.dedup();
        for connection_id in incident {
            self.unlink(connection_id);
        }
        for port in node.ports() {
            self.port_owners.remove(&port.id());
        }
        log::debug!("Removed node #{} '{}'", id, node.title);
        Ok(node)
    }

    /// Links two ports. The endpoints may be given in either order.
    ///
    /// A link into an occupied input port replaces the existing connection, and so
    /// does a link out of an occupied control output. Data outputs fan out.
    pub fn connect(&mut self, a: PortId, b: PortId) -> Result<ConnectionId, GraphError> {
        let port_a = self.port(a).ok_or(GraphError::PortNotFound(a))?;
        let port_b = self.port(b).ok_or(GraphError::PortNotFound(b))?;
        port_a
            .check_link(port_b)
            .map_err(|reason| GraphError::Incompatible {
                from: a,
                to: b,
                reason,
            })?;

        let (output, input) = if port_a.is_input() {
            (port_b, port_a)
        } else {
            (port_a, port_b)
        };
        let from = PortRef {
            node: output.node(),
            port: output.id(),
        };
        let to = PortRef {
            node: input.node(),
            port: input.id(),
        };
        let is_control = output.is_control();

        let mut replaced = Vec::new();
        if let Some(existing) = self.inbound.get(&to.port) {
            replaced.push(*existing);
        }
        if is_control {
            if let Some(existing) = self.outbound.get(&from.port) {
                replaced.extend(existing.iter().copied());
            }
        }
        for connection_id in replaced {
            log::debug!("Connection #{} replaced by a new link", connection_id);
            self.unlink(connection_id);
        }

        let id = ConnectionId(self.connections.len() as u32);
        self.connections.push(Some(Connection {
            id,
            from,
            to,
            is_control,
        }));
        self.inbound.insert(to.port, id);
        self.outbound.entry(from.port).or_default().push(id);
        Ok(id)
    }

    /// Removes a connection by identifier.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<Connection, GraphError> {
        self.unlink(id).ok_or(GraphError::ConnectionNotFound(id))
    }

    fn unlink(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.get_mut(id.0 as usize)?.take()?;
        if self.inbound.get(&connection.to.port) == Some(&id) {
            self.inbound.remove(&connection.to.port);
        }
        if let Some(list) = self.outbound.get_mut(&connection.from.port) {
            list.retain(|c| *c != id);
            if list.is_empty() {
                self.outbound.remove(&connection.from.port);
            }
        }
        Some(connection)
    }

    /// Replaces the value stored on a literal node.
    pub fn set_literal(&mut self, id: NodeId, value: Value) -> Result<(), GraphError> {
        let node = self.node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        match &mut node.kind {
            NodeKind::Number { value: stored } => *stored = value.to_number(),
            NodeKind::Text { value: stored } => *stored = value.to_string(),
            NodeKind::Boolean { value: stored } => *stored = value.is_truthy(),
            _ => return Err(GraphError::NotALiteral(id)),
        }
        Ok(())
    }

    /// Replaces the literal used by an unconnected input data port.
    pub fn set_default(&mut self, port: PortId, value: Value) -> Result<(), GraphError> {
        let owner = *self
            .port_owners
            .get(&port)
            .ok_or(GraphError::PortNotFound(port))?;
        let target = self
            .node_mut(owner)
            .and_then(|node| node.port_mut(port))
            .ok_or(GraphError::PortNotFound(port))?;
        if !target.is_input() || target.is_control() {
            return Err(GraphError::NotADataInput(port));
        }
        target.default = Some(value);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Event nodes in insertion order.
    pub fn entry_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_event())
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        let owner = self.port_owners.get(&id)?;
        self.node(*owner)?.ports().find(|p| p.id() == id)
    }

    /// Finds a port on a node by direction and name.
    pub fn find_port(&self, node: NodeId, direction: PortDirection, name: &str) -> Option<PortId> {
        self.node(node)?.port(direction, name).map(Port::id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().flatten()
    }

    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    /// Every connection whose source is `node`, control and data alike.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Connection> {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.outputs())
            .flat_map(move |port| self.outgoing_from(port.id()))
    }

    /// The connection feeding an input port, if any.
    pub fn incoming_to(&self, port: PortId) -> Option<&Connection> {
        self.inbound.get(&port).and_then(|id| self.connection(*id))
    }

    /// Connections leaving an output port.
    pub fn outgoing_from(&self, port: PortId) -> impl Iterator<Item = &Connection> {
        self.outbound
            .get(&port)
            .into_iter()
            .flatten()
            .filter_map(|id| self.connection(*id))
    }

    /// `true` if any connection touches the node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| {
            n.ports()
                .any(|port| self.port_connections(port.id()).next().is_some())
        })
    }

    /// Ids of the connections attached to a port, from either index.
    fn port_connections(&self, port: PortId) -> impl Iterator<Item = ConnectionId> {
        self.inbound
            .get(&port)
            .into_iter()
            .chain(self.outbound.get(&port).into_iter().flatten())
            .copied()
    }
}
