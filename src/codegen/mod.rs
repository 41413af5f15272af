//! Translates a validated graph into a `Program`.
//!
//! Every event node starts an independent code path. The walk follows control
//! connections and emits one statement per action node; branch nodes emit an
//! `If` whose arms are generated in turn. Data inputs resolve to expressions by
//! evaluating upstream pure nodes, or to the port's literal default when
//! unconnected. Both walks keep their own work stacks, so neither the length of a
//! control chain, the nesting of branches nor the depth of a data chain is limited
//! by the native stack. Shared data nodes are re-derived at every use, which is sound
//! because data nodes are side-effect free.

use crate::ast::{EntryPoint, Program};
use crate::error::GenerationError;
use crate::graph::Graph;

mod control;
mod data;

/// A strategy turning a graph into a runnable program.
pub trait ProgramGenerator: Send + Sync {
    fn generate(&self, graph: &Graph) -> Result<Program, GenerationError>;
}

/// The built-in generator. Unlimited by default; see `with_nesting_limit`.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    nesting_limit: Option<usize>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects data chains more than `limit` wires deep with
    /// `GenerationError::NestingTooDeep`.
    pub fn with_nesting_limit(mut self, limit: usize) -> Self {
        self.nesting_limit = Some(limit);
        self
    }
}

impl ProgramGenerator for CodeGenerator {
    fn generate(&self, graph: &Graph) -> Result<Program, GenerationError> {
        let mut entries = Vec::new();
        for event in graph.entry_nodes() {
            let mut path = control::ControlPath::starting_at(event.id());
            let start = control::follow(graph, event, "exec");
            let body = control::emit_chain(graph, start, &mut path, self.nesting_limit)?;
            log::debug!(
                "Entry '{}' (#{}) generated {} statement(s)",
                event.title,
                event.id(),
                body.statement_count()
            );
            entries.push(EntryPoint {
                node: event.id(),
                title: event.title.clone(),
                body,
            });
        }

        if entries.is_empty() {
            return Err(GenerationError::NoEntryPoint);
        }
        Ok(Program { entries })
    }
}
