//! Typed connection points on nodes.

use super::NodeId;
use crate::ast::Value;
use std::fmt;

/// Identifier of a port, unique within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The declared type of a data port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortType {
    Any,
    Number,
    String,
    Boolean,
    Custom(String),
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortType::Any => write!(f, "any"),
            PortType::Number => write!(f, "number"),
            PortType::String => write!(f, "string"),
            PortType::Boolean => write!(f, "boolean"),
            PortType::Custom(tag) => write!(f, "{}", tag),
        }
    }
}

/// Whether a port sequences execution or carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Control,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

/// Shape of a port before it is attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct PortSpec {
    pub name: String,
    pub port_type: PortType,
    pub kind: PortKind,
    pub default: Option<Value>,
}

impl PortSpec {
    /// An `exec`-style sequencing port.
    pub fn control(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port_type: PortType::Any,
            kind: PortKind::Control,
            default: None,
        }
    }

    pub fn data(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            name: name.into(),
            port_type,
            kind: PortKind::Data,
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A port attached to a node. The owning node and direction are fixed at attach time.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    id: PortId,
    node: NodeId,
    direction: PortDirection,
    pub name: String,
    pub port_type: PortType,
    pub kind: PortKind,
    /// Literal used when an input data port is left unconnected.
    pub default: Option<Value>,
}

/// The compatibility clause a rejected link violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRejection {
    SameNode,
    SameDirection,
    KindMismatch,
    TypeMismatch { output: PortType, input: PortType },
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRejection::SameNode => write!(f, "both ports belong to the same node"),
            LinkRejection::SameDirection => {
                write!(f, "exactly one port must be an input and the other an output")
            }
            LinkRejection::KindMismatch => {
                write!(f, "control ports can only be linked to control ports")
            }
            LinkRejection::TypeMismatch { output, input } => {
                write!(f, "type '{}' does not match type '{}'", output, input)
            }
        }
    }
}

impl Port {
    pub(crate) fn attach(id: PortId, node: NodeId, direction: PortDirection, spec: PortSpec) -> Self {
        let default = match direction {
            PortDirection::Input if spec.kind == PortKind::Data => spec.default,
            _ => None,
        };
        Self {
            id,
            node,
            direction,
            name: spec.name,
            port_type: spec.port_type,
            kind: spec.kind,
            default,
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    pub fn is_control(&self) -> bool {
        self.kind == PortKind::Control
    }

    /// Checks whether `self` and `other` may be linked, in either orientation.
    pub fn can_connect_to(&self, other: &Port) -> bool {
        self.check_link(other).is_ok()
    }

    /// Like `can_connect_to`, but names the violated clause.
    pub fn check_link(&self, other: &Port) -> Result<(), LinkRejection> {
        if self.node == other.node {
            return Err(LinkRejection::SameNode);
        }
        if self.direction == other.direction {
            return Err(LinkRejection::SameDirection);
        }
        if self.kind != other.kind {
            return Err(LinkRejection::KindMismatch);
        }
        if self.kind == PortKind::Data
            && self.port_type != other.port_type
            && self.port_type != PortType::Any
            && other.port_type != PortType::Any
        {
            let (output, input) = if self.is_input() {
                (other, self)
            } else {
                (self, other)
            };
            return Err(LinkRejection::TypeMismatch {
                output: output.port_type.clone(),
                input: input.port_type.clone(),
            });
        }
        Ok(())
    }
}
