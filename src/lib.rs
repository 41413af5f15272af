//! # Sekkei - Visual Blueprint Compiler
//!
//! **Sekkei** compiles node-and-wire blueprints into a structured program and runs it
//! against an injected set of capabilities. Control wires decide what happens next;
//! data wires are resolved into pure expressions.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Graph**: Spawn nodes from the `NodeCatalog` and link their ports, or
//!     load a `BlueprintDefinition` and convert it with `IntoGraph`.
//! 2.  **Validate**: The `DagValidator` rejects graphs that contain a cycle.
//! 3.  **Generate**: The `CodeGenerator` walks control flow from every event node and
//!     emits a `Program`. `ListingFormatter` renders it as readable source.
//! 4.  **Execute**: The `ExecutionEngine` runs the program, calling back into your
//!     `Capabilities` implementation.
//!
//! The `Compiler` sequences these phases and reports each one to a `LogSink`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sekkei::prelude::*;
//!
//! let catalog = NodeCatalog::new();
//! let mut graph = Graph::new();
//! let start = catalog.spawn(&mut graph, "Event: On Start", (0.0, 0.0)).unwrap();
//! let print = catalog.spawn(&mut graph, "Debug: Print", (200.0, 0.0)).unwrap();
//!
//! let from = graph.find_port(start, PortDirection::Output, "exec").unwrap();
//! let to = graph.find_port(print, PortDirection::Input, "exec").unwrap();
//! graph.connect(from, to).unwrap();
//!
//! let mut compiler = Compiler::builder().build();
//! let mut capabilities = RecordingCapabilities::new();
//! let mut sink = MemorySink::new();
//! let outcome = tokio_test::block_on(compiler.compile_and_run(&graph, &mut capabilities, &mut sink));
//!
//! assert!(outcome.is_success());
//! assert_eq!(capabilities.lines(), vec!["Hello"]);
//! ```

pub mod ast;
pub mod blueprint;
pub mod catalog;
pub mod codegen;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod graph;
pub mod listing;
pub mod logging;
pub mod prelude;
pub mod validation;
