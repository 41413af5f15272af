use crate::ast::{BinaryOp, Expression, Value};
use crate::error::GenerationError;
use crate::graph::{Graph, Node, NodeId, NodeKind, Port, PortType};

/// Pending work of the data resolution.
enum Task<'g> {
    /// Resolve whatever feeds this input port. `None` is a port the node lacks.
    Input { port: Option<&'g Port>, depth: usize },
    /// Build the expression of a data node reached at `depth` wires upstream.
    Node { id: NodeId, depth: usize },
    /// Pop the two most recent operands and join them.
    Combine(BinaryOp),
}

/// Resolves the expression feeding the input data port `port_name` of `node`.
///
/// A connected port evaluates its upstream node; an unconnected one falls back to
/// the port's literal default. The walk uses an explicit work stack, so the depth
/// of the data chain is bounded only by `limit` when one is set.
pub(super) fn input_value(
    graph: &Graph,
    node: &Node,
    port_name: &str,
    limit: Option<usize>,
) -> Result<Expression, GenerationError> {
    let mut tasks = vec![Task::Input {
        port: node.input(port_name),
        depth: 0,
    }];
    let mut values: Vec<Expression> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Input { port: None, .. } => values.push(Expression::Undefined),
            Task::Input {
                port: Some(port),
                depth,
            } => match graph.incoming_to(port.id()) {
                Some(connection) => tasks.push(Task::Node {
                    id: connection.from.node,
                    depth: depth + 1,
                }),
                None => values.push(default_literal(port)),
            },
            Task::Node { id, depth } => {
                if let Some(limit) = limit.filter(|limit| depth > *limit) {
                    return Err(GenerationError::NestingTooDeep { node: id, limit });
                }
                let node = graph.node(id).ok_or(GenerationError::NodeNotFound(id))?;
                match data_form(node) {
                    DataForm::Leaf(expression) => values.push(expression),
                    DataForm::Binary(op) => {
                        tasks.push(Task::Combine(op));
                        tasks.push(Task::Input {
                            port: node.input("b"),
                            depth,
                        });
                        tasks.push(Task::Input {
                            port: node.input("a"),
                            depth,
                        });
                    }
                }
            }
            Task::Combine(op) => {
                let rhs = values.pop().unwrap_or_default();
                let lhs = values.pop().unwrap_or_default();
                values.push(Expression::binary(op, lhs, rhs));
            }
        }
    }

    Ok(values.pop().unwrap_or_default())
}

/// The literal an unconnected input contributes. String ports always yield a
/// string literal, unset defaults yield `0`.
pub(super) fn default_literal(port: &Port) -> Expression {
    match (&port.default, &port.port_type) {
        (None, _) => Expression::literal(0.0),
        (Some(value @ Value::Str(_)), PortType::String) => Expression::Literal(value.clone()),
        (Some(value), PortType::String) => Expression::Literal(Value::Str(value.to_string())),
        (Some(value), _) => Expression::Literal(value.clone()),
    }
}

enum DataForm {
    Leaf(Expression),
    Binary(BinaryOp),
}

/// What a node contributes when it sits upstream of a data input.
fn data_form(node: &Node) -> DataForm {
    let op = match &node.kind {
        NodeKind::Number { .. } | NodeKind::Text { .. } | NodeKind::Boolean { .. } => {
            let literal = node.kind.literal().map(Expression::Literal);
            return DataForm::Leaf(literal.unwrap_or(Expression::Undefined));
        }
        NodeKind::Add => BinaryOp::Add,
        NodeKind::Subtract => BinaryOp::Sub,
        NodeKind::Multiply => BinaryOp::Mul,
        NodeKind::Divide => BinaryOp::Div,
        NodeKind::Equals => BinaryOp::Eq,
        NodeKind::GreaterThan => BinaryOp::Gt,
        NodeKind::And => BinaryOp::And,
        NodeKind::Or => BinaryOp::Or,
        NodeKind::OnStart
        | NodeKind::Branch
        | NodeKind::Print
        | NodeKind::Delay
        | NodeKind::Custom(_) => {
            log::debug!(
                "Node #{} '{}' has no data evaluation, using undefined",
                node.id(),
                node.title
            );
            return DataForm::Leaf(Expression::Undefined);
        }
    };
    DataForm::Binary(op)
}
