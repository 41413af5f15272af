//! Sequences Validate -> Generate -> Execute, reporting every phase to a log sink.
//!
//! A failed phase stops the pipeline and is always preceded by at least one
//! `error` entry. Nothing is retried, and the compiler stays usable after any
//! outcome.

use crate::ast::Program;
use crate::codegen::ProgramGenerator;
use crate::engine::{Capabilities, ExecutionEngine, ExecutionLimits, ExecutionOutcome};
use crate::error::{CompileError, EngineError, GenerationError};
use crate::graph::Graph;
use crate::listing::ListingFormatter;
use crate::logging::LogSink;
use crate::validation::{DagValidator, ValidationReport};

mod builder;

pub use builder::CompilerBuilder;

/// Where a compile-and-run cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileOutcome {
    /// Validation failed; nothing was generated.
    Rejected(ValidationReport),
    /// The generator failed; nothing was executed.
    GenerationFailed(GenerationError),
    /// The execution engine could not be constructed.
    EngineUnavailable(EngineError),
    /// The program ran, successfully or not.
    Executed(ExecutionOutcome),
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Executed(outcome) if outcome.is_success())
    }
}

pub struct Compiler {
    validator: DagValidator,
    generator: Box<dyn ProgramGenerator>,
    limits: ExecutionLimits,
    runs: u64,
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    /// Number of `compile_and_run` cycles that reached the execution phase.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Validates and generates, without executing.
    pub fn compile(&self, graph: &Graph, sink: &mut dyn LogSink) -> Result<Program, CompileError> {
        sink.info(&format!(
            "Validating graph ({} nodes, {} connections)...",
            graph.node_count(),
            graph.connection_count()
        ));
        let report = self.validator.validate(graph);
        for warning in &report.warnings {
            sink.warning(warning);
        }
        if !report.is_valid {
            for error in &report.errors {
                sink.error(error);
            }
            sink.error("Compilation aborted: the graph is not a valid DAG");
            return Err(CompileError::Invalid(report));
        }
        sink.success("Graph is a valid DAG");

        sink.info("Generating code...");
        let program = self.generator.generate(graph).map_err(|error| {
            sink.error(&format!("Code generation failed: {}", error));
            CompileError::Generation(error)
        })?;
        log::debug!(
            "Generated program:\n{}",
            ListingFormatter::format_program(&program)
        );
        sink.success(&format!(
            "Generated {} entry point(s) with {} statement(s)",
            program.entries.len(),
            program.statement_count()
        ));
        Ok(program)
    }

    /// Runs the full pipeline.
    ///
    /// Takes `&mut self`, so a compiler cannot start a new cycle while one of its
    /// executions is still pending.
    pub async fn compile_and_run<C: Capabilities>(
        &mut self,
        graph: &Graph,
        capabilities: &mut C,
        sink: &mut dyn LogSink,
    ) -> CompileOutcome {
        let program = match self.compile(graph, sink) {
            Ok(program) => program,
            Err(CompileError::Invalid(report)) => return CompileOutcome::Rejected(report),
            Err(CompileError::Generation(error)) => {
                return CompileOutcome::GenerationFailed(error);
            }
        };
        self.run(&program, capabilities, sink).await
    }

    /// Executes an already compiled program with this compiler's limits.
    ///
    /// Pairs with `compile` when the program is also needed for something else,
    /// such as printing its listing, so the graph is only compiled once.
    pub async fn run<C: Capabilities>(
        &mut self,
        program: &Program,
        capabilities: &mut C,
        sink: &mut dyn LogSink,
    ) -> CompileOutcome {
        let engine = match ExecutionEngine::new(self.limits) {
            Ok(engine) => engine,
            Err(error) => {
                sink.error(&format!("Execution engine unavailable: {}", error));
                return CompileOutcome::EngineUnavailable(error);
            }
        };

        sink.info("Executing...");
        self.runs += 1;
        CompileOutcome::Executed(engine.execute(program, capabilities, sink).await)
    }
}
