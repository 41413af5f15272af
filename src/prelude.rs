//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, compile and run a blueprint.

// Pipeline
pub use crate::compiler::{CompileOutcome, Compiler, CompilerBuilder};
pub use crate::engine::{
    Capabilities, ExecutionEngine, ExecutionLimits, ExecutionOutcome, RecordingCapabilities,
    StdoutCapabilities,
};

// Graph model
pub use crate::catalog::{CatalogEntry, NodeCatalog};
pub use crate::graph::{
    Category, Connection, ConnectionId, Graph, Node, NodeId, NodeKind, PortDirection, PortId,
    PortKind, PortSpec, PortType,
};

// Phases
pub use crate::codegen::{CodeGenerator, ProgramGenerator};
pub use crate::listing::ListingFormatter;
pub use crate::validation::{DagValidator, StructuralCheck, ValidationReport};

// Program tree
pub use crate::ast::{BinaryOp, Block, EntryPoint, Expression, Program, Statement, Value};

// Input formats
pub use crate::blueprint::{BlueprintDefinition, IntoGraph};

// Logging
pub use crate::logging::{ConsoleSink, LogEntry, LogSink, MemorySink, Severity};

// Error types
pub use crate::error::{
    CapabilityError, CompileError, DefinitionError, EngineError, ExecutionError, GenerationError,
    GraphError,
};
