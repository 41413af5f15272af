use crate::ast::{BinaryOp, Block, Expression, Program, Statement, Value};
use itertools::Itertools;
use std::fmt::Write;
use std::slice;

const INDENT: &str = "    ";

/// Renders generated programs as human-readable procedure text.
///
/// Blocks and expressions are walked with explicit stacks, so a listing can be
/// produced for any program the generator accepts.
pub struct ListingFormatter;

enum Work<'p> {
    Statements(slice::Iter<'p, Statement>, usize),
    Line(String),
}

enum Piece<'e> {
    Expr(&'e Expression),
    Close(BinaryOp),
    Text(&'static str),
}

impl ListingFormatter {
    /// Formats a whole program as an asynchronous procedure taking the capability object `api`.
    pub fn format_program(program: &Program) -> String {
        let mut out = String::from("async (api) => {\n");
        let sections = program
            .entries
            .iter()
            .map(|entry| {
                let mut section = format!("{}// {}\n", INDENT, entry.title);
                Self::format_block(&entry.body, 1, &mut section);
                section
            })
            .join("\n");
        out.push_str(&sections);
        out.push_str("}\n");
        out
    }

    fn format_block(block: &Block, level: usize, out: &mut String) {
        let mut work = vec![Work::Statements(block.statements.iter(), level)];

        while let Some(item) = work.last_mut() {
            let (statements, level) = match item {
                Work::Line(line) => {
                    out.push_str(line);
                    work.pop();
                    continue;
                }
                Work::Statements(statements, level) => (statements, *level),
            };
            let Some(statement) = statements.next() else {
                work.pop();
                continue;
            };

            let indent = INDENT.repeat(level);
            match statement {
                Statement::Print { value, .. } => {
                    out.push_str(&format!(
                        "{}await api.print({});\n",
                        indent,
                        Self::format_expression(value)
                    ));
                }
                Statement::Delay { millis, .. } => {
                    out.push_str(&format!(
                        "{}await api.delay({});\n",
                        indent,
                        Self::format_expression(millis)
                    ));
                }
                Statement::If {
                    condition,
                    then_branch,
                    else_branch,
                    ..
                } => {
                    out.push_str(&format!(
                        "{}if ({}) {{\n",
                        indent,
                        Self::format_expression(condition)
                    ));
                    // Pushed in reverse: the last item is written first.
                    work.push(Work::Line(format!("{}}}\n", indent)));
                    work.push(Work::Statements(else_branch.statements.iter(), level + 1));
                    work.push(Work::Line(format!("{}}} else {{\n", indent)));
                    work.push(Work::Statements(then_branch.statements.iter(), level + 1));
                }
            }
        }
    }

    /// Formats an expression with every binary operation parenthesised.
    pub fn format_expression(expr: &Expression) -> String {
        let mut out = String::new();
        let mut pieces = vec![Piece::Expr(expr)];

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Expr(Expression::Literal(value)) => out.push_str(&Self::format_value(value)),
                Piece::Expr(Expression::Undefined) => out.push_str("undefined"),
                Piece::Expr(Expression::Binary { op, lhs, rhs }) => {
                    out.push('(');
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Expr(rhs));
                    pieces.push(Piece::Close(*op));
                    pieces.push(Piece::Expr(lhs));
                }
                Piece::Close(op) => {
                    let _ = write!(out, " {} ", op);
                }
                Piece::Text(text) => out.push_str(text),
            }
        }
        out
    }

    /// Format a literal value. Strings are quoted and escaped.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Str(s) => quote(s),
            other => other.to_string(),
        }
    }
}

/// Double-quotes `s` with the escapes of the listing language: named escapes for
/// the common control characters, `\uXXXX` for the rest and for the line and
/// paragraph separators.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
