use crate::graph::{ConnectionId, LinkRejection, NodeId, PortId};
use crate::validation::ValidationReport;
use thiserror::Error;

/// Errors raised by structural edits of a `Graph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node #{0} not found in the graph")]
    NodeNotFound(NodeId),

    #[error("Port #{0} not found in the graph")]
    PortNotFound(PortId),

    #[error("Connection #{0} not found in the graph")]
    ConnectionNotFound(ConnectionId),

    #[error("Ports #{from} and #{to} cannot be connected: {reason}")]
    Incompatible {
        from: PortId,
        to: PortId,
        reason: LinkRejection,
    },

    #[error("Node #{0} is not a literal node")]
    NotALiteral(NodeId),

    #[error("Port #{0} is not an input data port")]
    NotADataInput(PortId),
}

/// Errors that can occur while generating a program from a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("No entry point: the graph contains no event node")]
    NoEntryPoint,

    #[error("Node #{0} not found, but it is referenced by a connection")]
    NodeNotFound(NodeId),

    #[error("Control flow returns to node #{0}; the graph must be acyclic")]
    ControlCycle(NodeId),

    #[error("Resolution through node #{node} exceeded the nesting limit of {limit}")]
    NestingTooDeep { node: NodeId, limit: usize },
}

/// Errors reported by an injected capability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("{0}")]
    Failed(String),
}

/// Runtime errors of a generated program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("{source} (at node #{node})")]
    Capability {
        node: NodeId,
        #[source]
        source: CapabilityError,
    },

    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    #[error("Deadline of {0}ms exceeded")]
    DeadlineExceeded(u128),
}

/// Errors constructing an execution engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid execution limits: {0}")]
    InvalidLimits(String),
}

/// Errors returned by `Compiler::compile`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Graph validation failed: {}", .0.errors.join("; "))]
    Invalid(ValidationReport),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors that can occur when converting a blueprint definition into a `Graph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse blueprint JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{key}' uses an unregistered node type: '{type_name}'")]
    UnknownNodeType { key: String, type_name: String },

    #[error("Node key '{0}' is declared more than once")]
    DuplicateKey(String),

    #[error("Link endpoint '{0}' does not name a known node and port (expected 'key.port')")]
    UnknownEndpoint(String),

    #[error("Link from '{from}' to '{to}' was rejected: {source}")]
    LinkRejected {
        from: String,
        to: String,
        #[source]
        source: GraphError,
    },

    #[error("Node '{key}' has a value that is not a number, string, boolean or null")]
    UnsupportedValue { key: String },

    #[error("Node '{key}' rejected its value: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: GraphError,
    },
}
