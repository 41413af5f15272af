//! Structural validation run before any code is generated.

use crate::graph::Graph;

mod cycle;

pub use cycle::CycleDetector;

/// Outcome of validating a graph. Warnings never make a graph invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    pub fn error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// A structural rule the validator enforces.
pub trait StructuralCheck: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, graph: &Graph, report: &mut ValidationReport);
}

/// Fails the graph on the first cycle found, scanning from every node.
pub struct CycleCheck;

impl StructuralCheck for CycleCheck {
    fn name(&self) -> &str {
        "cycles"
    }

    fn check(&self, graph: &Graph, report: &mut ValidationReport) {
        let start = CycleDetector::new(graph).first_cycle_start();
        if let Some(node) = start.and_then(|id| graph.node(id)) {
            report.error(format!(
                "Cycle detected starting at node '{}' (#{})",
                node.title,
                node.id()
            ));
        }
    }
}

/// Warns about non-event nodes without a single connection.
pub struct OrphanCheck;

impl StructuralCheck for OrphanCheck {
    fn name(&self) -> &str {
        "orphans"
    }

    fn check(&self, graph: &Graph, report: &mut ValidationReport) {
        for node in graph.nodes() {
            if !node.is_event() && !graph.is_connected(node.id()) {
                report.warn(format!(
                    "Node '{}' (#{}) is not connected and will be ignored",
                    node.title,
                    node.id()
                ));
            }
        }
    }
}

/// Runs every registered structural check over a graph.
pub struct DagValidator {
    checks: Vec<Box<dyn StructuralCheck>>,
}

impl Default for DagValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DagValidator {
    /// The cycle check followed by the orphan check.
    pub fn new() -> Self {
        Self {
            checks: vec![Box::new(CycleCheck), Box::new(OrphanCheck)],
        }
    }

    /// A validator without any checks.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check(mut self, check: Box<dyn StructuralCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn validate(&self, graph: &Graph) -> ValidationReport {
        let mut report = ValidationReport::default();
        for check in &self.checks {
            check.check(graph, &mut report);
            log::debug!(
                "Check '{}' done: {} error(s), {} warning(s) so far",
                check.name(),
                report.errors.len(),
                report.warnings.len()
            );
        }
        report
    }
}
