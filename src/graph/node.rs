use super::port::{Port, PortDirection};
use crate::ast::Value;
use std::fmt;

/// Identifier of a node, unique within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// UI grouping tag. `Event` nodes are the entry points of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Event,
    Logic,
    Math,
    Data,
    Debug,
    Flow,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Event => "Event",
            Category::Logic => "Logic",
            Category::Math => "Math",
            Category::Data => "Data",
            Category::Debug => "Debug",
            Category::Flow => "Flow",
        };
        f.write_str(name)
    }
}

/// The concrete behavior of a node. The code generator matches on this exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Events
    OnStart,

    // Control flow and actions
    Branch,
    Print,
    Delay,

    // Pure data
    Number { value: f64 },
    Text { value: String },
    Boolean { value: bool },
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    GreaterThan,
    And,
    Or,

    /// A catalog entry without generator support.
    Custom(String),
}

impl NodeKind {
    /// The value held by a literal node.
    pub fn literal(&self) -> Option<Value> {
        match self {
            NodeKind::Number { value } => Some(Value::Number(*value)),
            NodeKind::Text { value } => Some(Value::Str(value.clone())),
            NodeKind::Boolean { value } => Some(Value::Bool(*value)),
            _ => None,
        }
    }
}

/// A unit of the graph. Its port list is fixed by its kind at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub title: String,
    pub category: Category,
    pub kind: NodeKind,
    /// Editor position; irrelevant to compilation.
    pub position: (f32, f32),
    pub(crate) inputs: Vec<Port>,
    pub(crate) outputs: Vec<Port>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        title: String,
        category: Category,
        kind: NodeKind,
        position: (f32, f32),
        inputs: Vec<Port>,
        outputs: Vec<Port>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            kind,
            position,
            inputs,
            outputs,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn is_event(&self) -> bool {
        self.category == Category::Event
    }

    /// Looks up a port by direction and name.
    pub fn port(&self, direction: PortDirection, name: &str) -> Option<&Port> {
        let ports = match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.iter().find(|p| p.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&Port> {
        self.port(PortDirection::Input, name)
    }

    pub fn output(&self, name: &str) -> Option<&Port> {
        self.port(PortDirection::Output, name)
    }

    pub(crate) fn port_mut(&mut self, id: super::PortId) -> Option<&mut Port> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find(|p| p.id() == id)
    }

    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
