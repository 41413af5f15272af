//! Tests for program generation and listings.
mod common;
use common::*;
use sekkei::prelude::*;

#[test]
fn test_no_event_node_is_an_error() {
    let mut fx = Fixture::new();
    let print = fx.spawn("Debug: Print");
    let number = fx.number(1.0);
    fx.link((number, "value"), (print, "value"));
    assert_eq!(generate(&fx.graph), Err(GenerationError::NoEntryPoint));
    assert_eq!(generate(&Graph::new()), Err(GenerationError::NoEntryPoint));
}

#[test]
fn test_hello_world_listing() {
    let (fx, start, print) = hello_world();
    let program = generate(&fx.graph).unwrap();

    assert_eq!(program.entries.len(), 1);
    assert_eq!(program.entries[0].node, start);
    assert_eq!(
        program.entries[0].body.statements,
        vec![Statement::Print {
            node: print,
            value: Expression::literal("Hello"),
        }]
    );
    assert_eq!(
        ListingFormatter::format_program(&program),
        "async (api) => {\n    // On Start\n    await api.print(\"Hello\");\n}\n"
    );
}

#[test]
fn test_nested_arithmetic_is_fully_parenthesised() {
    let (mut fx, _, print) = hello_world();
    let two = fx.number(2.0);
    let three = fx.number(3.0);
    let four = fx.number(4.0);
    let inner = fx.spawn("Math: Add");
    let outer = fx.spawn("Math: Add");
    fx.link((two, "value"), (inner, "a"));
    fx.link((three, "value"), (inner, "b"));
    fx.link((inner, "result"), (outer, "a"));
    fx.link((four, "value"), (outer, "b"));
    fx.link((outer, "result"), (print, "value"));

    let program = generate(&fx.graph).unwrap();
    let Statement::Print { value, .. } = &program.entries[0].body.statements[0] else {
        panic!("expected a print statement");
    };
    assert_eq!(ListingFormatter::format_expression(value), "((2 + 3) + 4)");
    assert_eq!(value.evaluate(), Value::Number(9.0));
    assert_eq!(value.size(), 5);
}

#[test]
fn test_unconnected_operands_use_port_defaults() {
    let (mut fx, _, print) = hello_world();
    let multiply = fx.spawn("Math: Multiply");
    fx.link((multiply, "result"), (print, "value"));
    let b = fx.input(multiply, "b");
    fx.graph.set_default(b, Value::from(6.0)).unwrap();

    let program = generate(&fx.graph).unwrap();
    let listing = ListingFormatter::format_program(&program);
    assert!(listing.contains("await api.print((0 * 6));"));
}

#[test]
fn test_branch_listing() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let branch = fx.spawn("Logic: Branch");
    let yes = fx.spawn("Debug: Print");
    let no = fx.spawn("Debug: Print");
    let five = fx.number(5.0);
    let three = fx.number(3.0);
    let greater = fx.spawn("Logic: Greater Than");
    fx.chain(&[start, branch]);
    fx.link((branch, "true"), (yes, "exec"));
    fx.link((branch, "false"), (no, "exec"));
    fx.link((five, "value"), (greater, "a"));
    fx.link((three, "value"), (greater, "b"));
    fx.link((greater, "result"), (branch, "condition"));
    let yes_value = fx.input(yes, "value");
    fx.graph.set_default(yes_value, Value::from("yes")).unwrap();
    let no_value = fx.input(no, "value");
    fx.graph.set_default(no_value, Value::from("no")).unwrap();

    let program = generate(&fx.graph).unwrap();
    assert_eq!(program.statement_count(), 3);
    assert_eq!(
        ListingFormatter::format_program(&program),
        concat!(
            "async (api) => {\n",
            "    // On Start\n",
            "    if ((5 > 3)) {\n",
            "        await api.print(\"yes\");\n",
            "    } else {\n",
            "        await api.print(\"no\");\n",
            "    }\n",
            "}\n",
        )
    );
}

#[test]
fn test_branch_with_unlinked_arms() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let branch = fx.spawn("Logic: Branch");
    fx.chain(&[start, branch]);

    let program = generate(&fx.graph).unwrap();
    assert_eq!(
        program.entries[0].body.statements,
        vec![Statement::If {
            node: branch,
            condition: Expression::literal(true),
            then_branch: Block::default(),
            else_branch: Block::default(),
        }]
    );
}

#[test]
fn test_chain_emits_statements_in_order() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let first = fx.spawn("Debug: Print");
    let delay = fx.spawn("Flow: Delay");
    let second = fx.spawn("Debug: Print");
    fx.chain(&[start, first, delay, second]);

    let program = generate(&fx.graph).unwrap();
    let nodes: Vec<NodeId> = program.entries[0]
        .body
        .statements
        .iter()
        .map(Statement::node)
        .collect();
    assert_eq!(nodes, vec![first, delay, second]);
    assert!(ListingFormatter::format_program(&program).contains("    await api.delay(0);\n"));
}

#[test]
fn test_every_event_is_an_entry_point() {
    let mut fx = Fixture::new();
    let first = fx.spawn("Event: On Start");
    let second = fx.spawn("Event: On Start");
    let print = fx.spawn("Debug: Print");
    fx.chain(&[second, print]);

    let program = generate(&fx.graph).unwrap();
    let entries: Vec<NodeId> = program.entries.iter().map(|e| e.node).collect();
    assert_eq!(entries, vec![first, second]);
    assert!(program.entries[0].body.is_empty());
    assert_eq!(program.entries[1].body.statement_count(), 1);
}

#[test]
fn test_shared_data_node_is_rederived_per_use() {
    let mut fx = Fixture::new();
    let start = fx.spawn("Event: On Start");
    let first = fx.spawn("Debug: Print");
    let second = fx.spawn("Debug: Print");
    let text = fx.text("shared");
    fx.chain(&[start, first, second]);
    fx.link((text, "value"), (first, "value"));
    fx.link((text, "value"), (second, "value"));

    let program = generate(&fx.graph).unwrap();
    let values: Vec<&Expression> = program.entries[0]
        .body
        .statements
        .iter()
        .map(|s| match s {
            Statement::Print { value, .. } => value,
            other => panic!("unexpected statement {:?}", other),
        })
        .collect();
    assert_eq!(values, vec![&Expression::literal("shared"); 2]);
}

#[test]
fn test_custom_data_node_yields_undefined() {
    let (mut fx, _, print) = hello_world();
    fx.catalog.register(CatalogEntry::custom(
        Category::Data,
        "Sensor",
        vec![],
        vec![PortSpec::data("value", PortType::Any)],
    ));
    let sensor = fx.spawn("Data: Sensor");
    fx.link((sensor, "value"), (print, "value"));

    let program = generate(&fx.graph).unwrap();
    assert_eq!(
        program.entries[0].body.statements,
        vec![Statement::Print {
            node: print,
            value: Expression::Undefined,
        }]
    );
    assert!(ListingFormatter::format_program(&program).contains("await api.print(undefined);"));
}

#[test]
fn test_custom_action_node_passes_control_through() {
    let mut fx = Fixture::new();
    fx.catalog.register(CatalogEntry::custom(
        Category::Flow,
        "Log Marker",
        vec![PortSpec::control("exec")],
        vec![PortSpec::control("exec")],
    ));
    let start = fx.spawn("Event: On Start");
    let marker = fx.spawn("Flow: Log Marker");
    let print = fx.spawn("Debug: Print");
    fx.chain(&[start, marker, print]);

    let program = generate(&fx.graph).unwrap();
    let nodes: Vec<NodeId> = program.entries[0]
        .body
        .statements
        .iter()
        .map(Statement::node)
        .collect();
    assert_eq!(nodes, vec![print]);
}

#[test]
fn test_control_cycle_through_custom_node() {
    let mut fx = Fixture::new();
    fx.catalog.register(CatalogEntry::custom(
        Category::Flow,
        "Merge",
        vec![PortSpec::control("exec"), PortSpec::control("again")],
        vec![PortSpec::control("exec")],
    ));
    let start = fx.spawn("Event: On Start");
    let merge = fx.spawn("Flow: Merge");
    let print = fx.spawn("Debug: Print");
    fx.chain(&[start, merge, print]);
    fx.link((print, "exec"), (merge, "again"));

    assert_eq!(
        generate(&fx.graph),
        Err(GenerationError::ControlCycle(merge))
    );
}

#[test]
fn test_nesting_limit() {
    let (mut fx, _, print) = hello_world();
    let inner = fx.spawn("Math: Add");
    let outer = fx.spawn("Math: Add");
    fx.link((inner, "result"), (outer, "a"));
    fx.link((outer, "result"), (print, "value"));

    let shallow = CodeGenerator::new().with_nesting_limit(1);
    assert_eq!(
        shallow.generate(&fx.graph),
        Err(GenerationError::NestingTooDeep {
            node: inner,
            limit: 1
        })
    );
    assert!(CodeGenerator::new().with_nesting_limit(2).generate(&fx.graph).is_ok());
}

#[test]
fn test_default_generator_has_no_nesting_limit() {
    let (mut fx, _, print) = hello_world();
    let last = fx.add_chain(301);
    fx.link((last, "result"), (print, "value"));

    let program = generate(&fx.graph).unwrap();
    let Statement::Print { value, .. } = &program.entries[0].body.statements[0] else {
        panic!("expected a print statement");
    };
    assert_eq!(value.evaluate(), Value::Number(301.0));
    // 301 additions, 301 `b` defaults and the leading `a` default.
    assert_eq!(value.size(), 603);
}

#[test]
fn test_deep_data_chain_on_a_small_stack() {
    let (value, size, listing_len) = on_small_stack(|| {
        let (mut fx, _, print) = hello_world();
        let last = fx.add_chain(20_000);
        fx.link((last, "result"), (print, "value"));

        let program = generate(&fx.graph).unwrap();
        let Statement::Print { value, .. } = &program.entries[0].body.statements[0] else {
            panic!("expected a print statement");
        };
        let listing = ListingFormatter::format_expression(value);
        (value.evaluate(), value.size(), listing.len())
    });
    assert_eq!(value, Value::Number(20_000.0));
    assert_eq!(size, 40_001);
    // "(" and " + 1)" per addition around the leading "0".
    assert_eq!(listing_len, 20_000 * 6 + 1);
}

#[test]
fn test_deeply_nested_branches_on_a_small_stack() {
    let program = on_small_stack(|| {
        let fx = nested_branches(1000);
        generate(&fx.graph).unwrap()
    });
    assert_eq!(program.statement_count(), 1001);

    let listing = on_small_stack(move || ListingFormatter::format_program(&program));
    // Header and title, three lines per branch, the print and the closing brace.
    assert_eq!(listing.lines().count(), 3004);
    let indent = "    ".repeat(1001);
    assert!(listing.contains(&format!("{}await api.print(\"deepest\");\n", indent)));
}

#[test]
fn test_long_control_chain_on_a_small_stack() {
    let count = on_small_stack(|| {
        let mut fx = Fixture::new();
        let mut nodes = vec![fx.spawn("Event: On Start")];
        nodes.extend((0..20_000).map(|_| fx.spawn("Debug: Print")));
        fx.chain(&nodes);
        generate(&fx.graph).unwrap().statement_count()
    });
    assert_eq!(count, 20_000);
}

#[test]
fn test_strings_use_listing_escapes() {
    let (mut fx, _, print) = hello_world();
    let value = fx.input(print, "value");
    fx.graph
        .set_default(value, Value::from("a\"b\\c\n\u{1b}\t\u{2028}"))
        .unwrap();

    let listing = ListingFormatter::format_program(&generate(&fx.graph).unwrap());
    assert!(listing.contains(r#"await api.print("a\"b\\c\n\u001b\t\u2028");"#));
}
