use super::definition::{BlueprintDefinition, LinkDefinition};
use crate::ast::Value;
use crate::catalog::NodeCatalog;
use crate::error::DefinitionError;
use crate::graph::{Graph, NodeId, PortDirection, PortId};
use ahash::AHashMap;

/// Types that can be turned into an editable `Graph`.
///
/// Implement this for your own blueprint format to feed it to the compiler. The
/// catalog decides which node types exist and what ports they carry.
pub trait IntoGraph {
    fn into_graph(self, catalog: &NodeCatalog) -> Result<Graph, DefinitionError>;
}

impl IntoGraph for BlueprintDefinition {
    fn into_graph(self, catalog: &NodeCatalog) -> Result<Graph, DefinitionError> {
        let mut graph = Graph::new();
        let mut keys: AHashMap<String, NodeId> = AHashMap::new();

        for node in self.nodes {
            if keys.contains_key(&node.key) {
                return Err(DefinitionError::DuplicateKey(node.key));
            }
            let id = catalog
                .spawn(&mut graph, &node.type_name, node.position.unwrap_or_default())
                .ok_or_else(|| DefinitionError::UnknownNodeType {
                    key: node.key.clone(),
                    type_name: node.type_name.clone(),
                })?;

            if let Some(raw) = &node.value {
                let value = json_to_value(&node.key, raw)?;
                graph
                    .set_literal(id, value)
                    .map_err(|source| DefinitionError::InvalidValue {
                        key: node.key.clone(),
                        source,
                    })?;
            }

            for (port_name, raw) in &node.defaults {
                let port = graph
                    .find_port(id, PortDirection::Input, port_name)
                    .ok_or_else(|| {
                        DefinitionError::UnknownEndpoint(format!("{}.{}", node.key, port_name))
                    })?;
                let value = json_to_value(&node.key, raw)?;
                graph
                    .set_default(port, value)
                    .map_err(|source| DefinitionError::InvalidValue {
                        key: node.key.clone(),
                        source,
                    })?;
            }

            keys.insert(node.key, id);
        }

        for LinkDefinition { from, to } in self.links {
            let output = resolve(&graph, &keys, &from, PortDirection::Output)?;
            let input = resolve(&graph, &keys, &to, PortDirection::Input)?;
            graph
                .connect(output, input)
                .map_err(|source| DefinitionError::LinkRejected { from, to, source })?;
        }

        log::debug!(
            "Built graph with {} nodes and {} connections",
            graph.node_count(),
            graph.connection_count()
        );
        Ok(graph)
    }
}

/// Resolves `key.port` to a port id. The port name may itself contain dots.
fn resolve(
    graph: &Graph,
    keys: &AHashMap<String, NodeId>,
    endpoint: &str,
    direction: PortDirection,
) -> Result<PortId, DefinitionError> {
    endpoint
        .split_once('.')
        .and_then(|(key, port)| {
            let node = keys.get(key)?;
            graph.find_port(*node, direction, port)
        })
        .ok_or_else(|| DefinitionError::UnknownEndpoint(endpoint.to_string()))
}

fn json_to_value(key: &str, raw: &serde_json::Value) -> Result<Value, DefinitionError> {
    match raw {
        serde_json::Value::Null => Ok(Value::Undefined),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => Ok(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
        serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
        _ => Err(DefinitionError::UnsupportedValue {
            key: key.to_string(),
        }),
    }
}
