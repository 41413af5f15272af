//! Tests for graph construction, link compatibility and structural edits.
mod common;
use common::*;
use sekkei::graph::LinkRejection;
use sekkei::prelude::*;

#[test]
fn test_connect_normalises_orientation() {
    let mut fx = Fixture::new();
    let number = fx.number(1.0);
    let add = fx.spawn("Math: Add");
    let input = fx.input(add, "a");
    let output = fx.output(number, "value");

    let id = fx.graph.connect(input, output).unwrap();
    let connection = fx.graph.connection(id).unwrap();
    assert_eq!(connection.from.port, output);
    assert_eq!(connection.from.node, number);
    assert_eq!(connection.to.port, input);
    assert!(!connection.is_control);
}

#[test]
fn test_can_connect_to_is_symmetric() {
    let mut fx = Fixture::new();
    let names: Vec<String> = fx.catalog.names().into_iter().map(String::from).collect();
    for name in &names {
        fx.spawn(name);
    }
    let ports: Vec<&sekkei::graph::Port> = fx.graph.nodes().flat_map(|n| n.ports()).collect();
    assert!(ports.len() > 20);
    for a in &ports {
        for b in &ports {
            assert_eq!(
                a.can_connect_to(b),
                b.can_connect_to(a),
                "asymmetric result for ports #{} and #{}",
                a.id(),
                b.id()
            );
        }
    }
}

#[test]
fn test_rejects_ports_on_the_same_node() {
    let mut fx = Fixture::new();
    let add = fx.spawn("Math: Add");
    let a = fx.output(add, "result");
    let b = fx.input(add, "a");
    let err = fx.graph.connect(a, b).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Incompatible {
            reason: LinkRejection::SameNode,
            ..
        }
    ));
}

#[test]
fn test_rejects_same_direction() {
    let mut fx = Fixture::new();
    let first = fx.spawn("Math: Add");
    let second = fx.spawn("Math: Add");
    let a = fx.input(first, "a");
    let b = fx.input(second, "b");
    let err = fx.graph.connect(a, b).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Incompatible {
            reason: LinkRejection::SameDirection,
            ..
        }
    ));
}

#[test]
fn test_rejects_control_to_data() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let print = fx.spawn("Debug: Print");
    let a = fx.output(start, "exec");
    let b = fx.input(print, "value");
    let err = fx.graph.connect(a, b).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Incompatible {
            reason: LinkRejection::KindMismatch,
            ..
        }
    ));
}

#[test]
fn test_rejects_mismatched_data_types() {
    let mut fx = Fixture::new();
    let number = fx.number(1.0);
    let branch = fx.spawn("Logic: Branch");
    let a = fx.output(number, "value");
    let b = fx.input(branch, "condition");
    let err = fx.graph.connect(a, b).unwrap_err();
    assert_eq!(
        err,
        GraphError::Incompatible {
            from: a,
            to: b,
            reason: LinkRejection::TypeMismatch {
                output: PortType::Number,
                input: PortType::Boolean,
            },
        }
    );
    assert_eq!(fx.graph.connection_count(), 0);
}

#[test]
fn test_any_port_accepts_every_data_type() {
    let mut fx = Fixture::new();
    let text = fx.text("hi");
    let print = fx.spawn("Debug: Print");
    let equals = fx.spawn("Logic: Equals");
    fx.link((text, "value"), (print, "value"));
    fx.link((text, "value"), (equals, "a"));
    assert_eq!(fx.graph.connection_count(), 2);
}

#[test]
fn test_new_link_replaces_existing_input_link() {
    let mut fx = Fixture::new();
    let one = fx.number(1.0);
    let two = fx.number(2.0);
    let add = fx.spawn("Math: Add");
    let first = fx.link((one, "value"), (add, "a"));
    let second = fx.link((two, "value"), (add, "a"));

    assert_eq!(fx.graph.connection_count(), 1);
    assert!(fx.graph.connection(first).is_none());
    let incoming = fx.graph.incoming_to(fx.input(add, "a")).unwrap();
    assert_eq!(incoming.id, second);
    assert_eq!(incoming.from.node, two);
}

#[test]
fn test_new_link_replaces_existing_control_output_link() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let first = fx.spawn("Debug: Print");
    let second = fx.spawn("Debug: Print");
    fx.link((start, "exec"), (first, "exec"));
    fx.link((start, "exec"), (second, "exec"));

    let targets: Vec<NodeId> = fx
        .graph
        .outgoing_from(fx.output(start, "exec"))
        .map(|c| c.to.node)
        .collect();
    assert_eq!(targets, vec![second]);
}

#[test]
fn test_data_outputs_fan_out() {
    let mut fx = Fixture::new();
    let number = fx.number(3.0);
    let add = fx.spawn("Math: Add");
    fx.link((number, "value"), (add, "a"));
    fx.link((number, "value"), (add, "b"));
    assert_eq!(fx.graph.outgoing(number).count(), 2);
}

#[test]
fn test_remove_node_removes_incident_connections() {
    let (mut fx, start, print) = hello_world();
    let number = fx.number(1.0);
    fx.link((number, "value"), (print, "value"));
    assert_eq!(fx.graph.connection_count(), 2);

    let removed = fx.graph.remove_node(print).unwrap();
    assert_eq!(removed.id(), print);
    assert_eq!(fx.graph.connection_count(), 0);
    assert!(fx.graph.node(print).is_none());
    assert!(!fx.graph.is_connected(start));
    assert_eq!(fx.graph.node_count(), 2);
    assert_eq!(
        fx.graph.remove_node(print).unwrap_err(),
        GraphError::NodeNotFound(print)
    );
}

#[test]
fn test_disconnect_unknown_connection() {
    let (mut fx, _, _) = hello_world();
    let id = fx.graph.connections().next().unwrap().id;
    fx.graph.disconnect(id).unwrap();
    assert_eq!(
        fx.graph.disconnect(id).unwrap_err(),
        GraphError::ConnectionNotFound(id)
    );
}

#[test]
fn test_set_literal_and_default_validation() {
    let (mut fx, start, print) = hello_world();
    assert_eq!(
        fx.graph.set_literal(print, Value::from(1.0)).unwrap_err(),
        GraphError::NotALiteral(print)
    );

    let exec_out = fx.output(start, "exec");
    assert_eq!(
        fx.graph.set_default(exec_out, Value::from(1.0)).unwrap_err(),
        GraphError::NotADataInput(exec_out)
    );

    let value = fx.input(print, "value");
    fx.graph.set_default(value, Value::from("Bye")).unwrap();
    assert_eq!(
        fx.graph.port(value).unwrap().default,
        Some(Value::from("Bye"))
    );
}

#[test]
fn test_set_literal_coerces_to_node_type() {
    let mut fx = Fixture::new();
    let number = fx.spawn("Data: Number");
    fx.graph.set_literal(number, Value::from("42")).unwrap();
    assert_eq!(
        fx.graph.node(number).unwrap().kind,
        NodeKind::Number { value: 42.0 }
    );
}

#[test]
fn test_entry_nodes_in_insertion_order() {
    let mut fx = Fixture::new();
    let first = fx.spawn("Event: On Start");
    fx.spawn("Debug: Print");
    let second = fx.spawn("Event: On Start");
    let entries: Vec<NodeId> = fx.graph.entry_nodes().map(|n| n.id()).collect();
    assert_eq!(entries, vec![first, second]);
}

#[test]
fn test_outgoing_covers_every_output_port() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let branch = fx.spawn("Logic: Branch");
    let yes = fx.spawn("Debug: Print");
    let no = fx.spawn("Debug: Print");
    fx.chain(&[start, branch]);
    let to_yes = fx.link((branch, "true"), (yes, "exec"));
    let to_no = fx.link((branch, "false"), (no, "exec"));

    let mut ids: Vec<ConnectionId> = fx.graph.outgoing(branch).map(|c| c.id).collect();
    ids.sort();
    assert_eq!(ids, vec![to_yes, to_no]);
    assert!(fx.graph.outgoing(yes).next().is_none());

    fx.graph.disconnect(to_yes).unwrap();
    assert_eq!(fx.graph.outgoing(branch).map(|c| c.id).collect::<Vec<_>>(), vec![to_no]);
    assert!(!fx.graph.is_connected(yes));
    assert!(fx.graph.is_connected(no));
}

#[test]
fn test_remove_node_in_the_middle_of_a_chain() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let first = fx.spawn("Debug: Print");
    let second = fx.spawn("Debug: Print");
    let number = fx.number(2.0);
    fx.chain(&[start, first, second]);
    fx.link((number, "value"), (first, "value"));
    fx.link((number, "value"), (second, "value"));
    assert_eq!(fx.graph.connection_count(), 4);

    fx.graph.remove_node(first).unwrap();
    assert_eq!(fx.graph.connection_count(), 2);
    assert!(!fx.graph.is_connected(start));
    assert!(fx.graph.is_connected(second));
    assert_eq!(fx.graph.outgoing(number).count(), 1);
}
