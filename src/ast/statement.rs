use super::Expression;
use crate::graph::NodeId;
use std::mem;

/// A single emitted statement. Every statement remembers the node it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `await api.print(value)`
    Print { node: NodeId, value: Expression },
    /// `await api.delay(millis)`
    Delay { node: NodeId, millis: Expression },
    /// A branch owns its continuation: nothing follows it in the enclosing block
    /// that was reachable only through the branch node.
    If {
        node: NodeId,
        condition: Expression,
        then_branch: Block,
        else_branch: Block,
    },
}

impl Statement {
    pub fn node(&self) -> NodeId {
        match self {
            Statement::Print { node, .. }
            | Statement::Delay { node, .. }
            | Statement::If { node, .. } => *node,
        }
    }
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Counts statements at every nesting level, including both arms of every branch.
    pub fn statement_count(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;
        while let Some(block) = pending.pop() {
            count += block.statements.len();
            for statement in &block.statements {
                if let Statement::If {
                    then_branch,
                    else_branch,
                    ..
                } = statement
                {
                    pending.push(then_branch);
                    pending.push(else_branch);
                }
            }
        }
        count
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.statements);
        // Arms are emptied into `pending` first, so nested blocks drop shallowly.
        while let Some(statement) = pending.pop() {
            if let Statement::If {
                mut then_branch,
                mut else_branch,
                ..
            } = statement
            {
                pending.append(&mut then_branch.statements);
                pending.append(&mut else_branch.statements);
            }
        }
    }
}

/// The code path generated for one event node.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    pub node: NodeId,
    pub title: String,
    pub body: Block,
}

/// The procedure generated from a graph: one independent code path per event node,
/// in graph iteration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub entries: Vec<EntryPoint>,
}

impl Program {
    pub fn statement_count(&self) -> usize {
        self.entries.iter().map(|e| e.body.statement_count()).sum()
    }
}
