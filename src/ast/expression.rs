use super::Value;
use std::fmt;
use std::mem;

/// Binary operators that pure data nodes compile to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Logic / comparison
    Eq,
    Gt,
    And,
    Or,
}

impl BinaryOp {
    /// The infix symbol used in program listings.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "===",
            BinaryOp::Gt => ">",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Applies the operator to two already evaluated operands.
    pub fn apply(self, lhs: Value, rhs: Value) -> Value {
        match self {
            BinaryOp::Add => lhs.add(&rhs),
            BinaryOp::Sub => lhs.sub(&rhs),
            BinaryOp::Mul => lhs.mul(&rhs),
            BinaryOp::Div => lhs.div(&rhs),
            BinaryOp::Eq => Value::Bool(lhs.strict_eq(&rhs)),
            BinaryOp::Gt => Value::Bool(lhs.greater_than(&rhs)),
            BinaryOp::And => lhs.logical_and(rhs),
            BinaryOp::Or => lhs.logical_or(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A side-effect free expression resolved from the data side of the graph.
///
/// Trees can be as deep as the data chains they come from, so sizing, evaluation
/// and drop walk them with explicit stacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Expression {
    Literal(Value),
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// Emitted for node variants the generator has no case for.
    #[default]
    Undefined,
}

enum Step<'e> {
    Eval(&'e Expression),
    Apply(BinaryOp),
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Number of nodes in the expression tree.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut size = 0;
        while let Some(expression) = pending.pop() {
            size += 1;
            if let Expression::Binary { lhs, rhs, .. } = expression {
                pending.push(lhs);
                pending.push(rhs);
            }
        }
        size
    }

    /// Evaluates the expression. Evaluation is total: every operator is defined
    /// for every operand pair.
    pub fn evaluate(&self) -> Value {
        let mut steps = vec![Step::Eval(self)];
        let mut values: Vec<Value> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Eval(Expression::Literal(value)) => values.push(value.clone()),
                Step::Eval(Expression::Undefined) => values.push(Value::Undefined),
                Step::Eval(Expression::Binary { op, lhs, rhs }) => {
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Eval(rhs));
                    steps.push(Step::Eval(lhs));
                }
                Step::Apply(op) => {
                    let rhs = values.pop().unwrap_or_default();
                    let lhs = values.pop().unwrap_or_default();
                    values.push(op.apply(lhs, rhs));
                }
            }
        }

        values.pop().unwrap_or_default()
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Expression>> = Vec::new();
        if let Expression::Binary { lhs, rhs, .. } = self {
            pending.push(mem::take(lhs));
            pending.push(mem::take(rhs));
        }
        // Children are detached before each box is freed, so every drop is shallow.
        while let Some(mut expression) = pending.pop() {
            if let Expression::Binary { lhs, rhs, .. } = expression.as_mut() {
                pending.push(mem::take(lhs));
                pending.push(mem::take(rhs));
            }
        }
    }
}
