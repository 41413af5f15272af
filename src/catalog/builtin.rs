use super::{CatalogEntry, NodeCatalog};
use crate::ast::Value;
use crate::graph::{Category, NodeKind, PortSpec, PortType};

fn exec() -> PortSpec {
    PortSpec::control("exec")
}

/// The `a`/`b` operand pair of a binary node.
fn operands(port_type: PortType, default: Value) -> Vec<PortSpec> {
    vec![
        PortSpec::data("a", port_type.clone()).with_default(default.clone()),
        PortSpec::data("b", port_type).with_default(default),
    ]
}

fn result(port_type: PortType) -> Vec<PortSpec> {
    vec![PortSpec::data("result", port_type)]
}

/// Declares every built-in node with its category, title, kind and port layout.
macro_rules! define_builtin_nodes {
    ( $( ($category:ident, $title:expr, $kind:expr, $inputs:expr, $outputs:expr) ),* $(,)? ) => {
        pub(super) fn register_builtin_nodes(catalog: &mut NodeCatalog) {
            $(
                catalog.register(CatalogEntry {
                    title: $title.to_string(),
                    category: Category::$category,
                    kind: $kind,
                    inputs: $inputs,
                    outputs: $outputs,
                });
            )*
        }
    };
}

define_builtin_nodes! {
    // Events
    (Event, "On Start", NodeKind::OnStart, vec![], vec![exec()]),

    // Control flow
    (Logic, "Branch", NodeKind::Branch,
        vec![exec(), PortSpec::data("condition", PortType::Boolean).with_default(true)],
        vec![PortSpec::control("true"), PortSpec::control("false")]),
    (Flow, "Delay", NodeKind::Delay,
        vec![exec(), PortSpec::data("millis", PortType::Number).with_default(0.0)],
        vec![exec()]),
    (Debug, "Print", NodeKind::Print,
        vec![exec(), PortSpec::data("value", PortType::Any).with_default("Hello")],
        vec![exec()]),

    // Comparison and logic
    (Logic, "Equals", NodeKind::Equals,
        operands(PortType::Any, Value::Number(0.0)), result(PortType::Boolean)),
    (Logic, "Greater Than", NodeKind::GreaterThan,
        operands(PortType::Number, Value::Number(0.0)), result(PortType::Boolean)),
    (Logic, "And", NodeKind::And,
        operands(PortType::Boolean, Value::Bool(false)), result(PortType::Boolean)),
    (Logic, "Or", NodeKind::Or,
        operands(PortType::Boolean, Value::Bool(false)), result(PortType::Boolean)),

    // Arithmetic
    (Math, "Add", NodeKind::Add,
        operands(PortType::Number, Value::Number(0.0)), result(PortType::Number)),
    (Math, "Subtract", NodeKind::Subtract,
        operands(PortType::Number, Value::Number(0.0)), result(PortType::Number)),
    (Math, "Multiply", NodeKind::Multiply,
        operands(PortType::Number, Value::Number(0.0)), result(PortType::Number)),
    (Math, "Divide", NodeKind::Divide,
        operands(PortType::Number, Value::Number(0.0)), result(PortType::Number)),

    // Literals
    (Data, "Number", NodeKind::Number { value: 0.0 },
        vec![], vec![PortSpec::data("value", PortType::Number)]),
    (Data, "String", NodeKind::Text { value: String::new() },
        vec![], vec![PortSpec::data("value", PortType::String)]),
    (Data, "Boolean", NodeKind::Boolean { value: false },
        vec![], vec![PortSpec::data("value", PortType::Boolean)]),
}
