//! Common test utilities for building blueprint graphs and running them.
use sekkei::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Stack size for threads that must not recurse per node.
#[allow(dead_code)]
pub const SMALL_STACK: usize = 256 * 1024;

/// A catalog and the graph being built from it.
#[allow(dead_code)]
pub struct Fixture {
    pub catalog: NodeCatalog,
    pub graph: Graph,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Self {
            catalog: NodeCatalog::new(),
            graph: Graph::new(),
        }
    }

    pub fn spawn(&mut self, name: &str) -> NodeId {
        self.catalog
            .spawn(&mut self.graph, name, (0.0, 0.0))
            .unwrap_or_else(|| panic!("'{}' is not in the catalog", name))
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        let id = self.spawn("Data: Number");
        self.graph.set_literal(id, Value::Number(value)).unwrap();
        id
    }

    pub fn text(&mut self, value: &str) -> NodeId {
        let id = self.spawn("Data: String");
        self.graph.set_literal(id, Value::from(value)).unwrap();
        id
    }

    pub fn output(&self, node: NodeId, name: &str) -> PortId {
        self.graph
            .find_port(node, PortDirection::Output, name)
            .unwrap_or_else(|| panic!("node #{} has no output '{}'", node, name))
    }

    pub fn input(&self, node: NodeId, name: &str) -> PortId {
        self.graph
            .find_port(node, PortDirection::Input, name)
            .unwrap_or_else(|| panic!("node #{} has no input '{}'", node, name))
    }

    /// Links `from.0`'s output `from.1` to `to.0`'s input `to.1`.
    pub fn link(&mut self, from: (NodeId, &str), to: (NodeId, &str)) -> ConnectionId {
        let output = self.output(from.0, from.1);
        let input = self.input(to.0, to.1);
        self.graph.connect(output, input).unwrap()
    }

    /// `len` chained `Math: Add` nodes, each adding its `b` default of 1 to the
    /// previous result. Returns the last node; the chain evaluates to `len`.
    pub fn add_chain(&mut self, len: usize) -> NodeId {
        let mut previous: Option<NodeId> = None;
        for _ in 0..len {
            let add = self.spawn("Math: Add");
            let b = self.input(add, "b");
            self.graph.set_default(b, Value::Number(1.0)).unwrap();
            if let Some(previous) = previous {
                self.link((previous, "result"), (add, "a"));
            }
            previous = Some(add);
        }
        previous.expect("chain length must be at least 1")
    }

    /// Links the `exec` chain through `nodes` in order.
    pub fn chain(&mut self, nodes: &[NodeId]) {
        for pair in nodes.windows(2) {
            self.link((pair[0], "exec"), (pair[1], "exec"));
        }
    }
}

/// `On Start -> Print` with the print value left at its default.
#[allow(dead_code)]
pub fn hello_world() -> (Fixture, NodeId, NodeId) {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let print = fx.spawn("Debug: Print");
    fx.chain(&[start, print]);
    (fx, start, print)
}

/// Two `Math: Add` nodes feeding each other.
#[allow(dead_code)]
pub fn cyclic_graph() -> Fixture {
    let mut fx = Fixture::new();
    let first = fx.spawn("Math: Add");
    let second = fx.spawn("Math: Add");
    fx.link((first, "result"), (second, "a"));
    fx.link((second, "result"), (first, "a"));
    fx
}

/// `On Start` followed by `depth` branches, each nested in the true arm of the
/// previous one, with a print printing "deepest" in the innermost true arm.
#[allow(dead_code)]
pub fn nested_branches(depth: usize) -> Fixture {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let mut previous = (start, "exec");
    for _ in 0..depth {
        let branch = fx.spawn("Logic: Branch");
        fx.link(previous, (branch, "exec"));
        previous = (branch, "true");
    }
    let print = fx.spawn("Debug: Print");
    let value = fx.input(print, "value");
    fx.graph.set_default(value, Value::from("deepest")).unwrap();
    fx.link(previous, (print, "exec"));
    fx
}

/// Runs `f` on a thread with a `SMALL_STACK` stack and returns its result.
#[allow(dead_code)]
pub fn on_small_stack<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .stack_size(SMALL_STACK)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

/// Compiles and runs `graph` with a default compiler.
#[allow(dead_code)]
pub fn run(graph: &Graph) -> (CompileOutcome, RecordingCapabilities, MemorySink) {
    let mut compiler = Compiler::builder().build();
    let mut capabilities = RecordingCapabilities::new();
    let mut sink = MemorySink::new();
    let outcome = tokio_test::block_on(compiler.compile_and_run(graph, &mut capabilities, &mut sink));
    (outcome, capabilities, sink)
}

/// Generates with the default generator, bypassing validation.
#[allow(dead_code)]
pub fn generate(graph: &Graph) -> Result<Program, GenerationError> {
    CodeGenerator::new().generate(graph)
}

/// A generator that counts its invocations and produces an empty program.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct SpyGenerator {
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl SpyGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProgramGenerator for SpyGenerator {
    fn generate(&self, _graph: &Graph) -> Result<Program, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Program::default())
    }
}
