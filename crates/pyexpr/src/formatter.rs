//! Renders an AST back to canonical source text.
//!
//! `parse_expression(&format_ast(&ast))` yields `ast` again for any tree
//! the parser can produce.

use crate::ast::{precedence, AstNode, BinaryOp, UnaryOp};
use crate::value::float_repr;

pub fn format_ast(node: &AstNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &AstNode) {
    match node {
        AstNode::None => out.push_str("None"),
        AstNode::Bool(true) => out.push_str("True"),
        AstNode::Bool(false) => out.push_str("False"),
        AstNode::Integer(value) => out.push_str(&value.to_string()),
        AstNode::Float(value) => out.push_str(&float_literal(*value)),
        AstNode::String(value) => write_string(out, value),
        AstNode::Name(name) => out.push_str(name),
        AstNode::List(items) => {
            out.push('[');
            write_list(out, items);
            out.push(']');
        }
        AstNode::Tuple(items) => {
            out.push('(');
            write_list(out, items);
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        AstNode::Dict(entries) => {
            out.push('{');
            for (index, (key, value)) in entries.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_node(out, key);
                out.push_str(": ");
                write_node(out, value);
            }
            out.push('}');
        }
        AstNode::Unary { op, operand } => {
            out.push_str(op.symbol());
            if *op == UnaryOp::Not {
                out.push(' ');
            }
            let bp = precedence::unary(*op);
            write_child(out, operand, precedence::of(operand) < bp);
        }
        AstNode::Binary { left, op, right } => {
            let bp = precedence::binary(*op);
            let (left_wrap, right_wrap) = if *op == BinaryOp::Pow {
                (precedence::of(left) <= bp, precedence::of(right) < bp)
            } else {
                (precedence::of(left) < bp, precedence::of(right) <= bp)
            };
            write_child(out, left, left_wrap);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            write_child(out, right, right_wrap);
        }
        AstNode::Compare { left, comparisons } => {
            write_child(out, left, precedence::of(left) <= precedence::COMPARISON);
            for (op, right) in comparisons {
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                write_child(out, right, precedence::of(right) <= precedence::COMPARISON);
            }
        }
        AstNode::BoolOp { left, op, right } => {
            let bp = precedence::boolean(*op);
            write_child(out, left, precedence::of(left) < bp);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            write_child(out, right, precedence::of(right) <= bp);
        }
        AstNode::Conditional {
            condition,
            if_true,
            if_false,
        } => {
            let bp = precedence::CONDITIONAL;
            write_child(out, if_true, precedence::of(if_true) <= bp);
            out.push_str(" if ");
            write_child(out, condition, precedence::of(condition) <= bp);
            out.push_str(" else ");
            write_child(out, if_false, precedence::of(if_false) < bp);
        }
        AstNode::Call {
            callee,
            args,
            kwargs,
        } => {
            write_target(out, callee);
            out.push('(');
            write_list(out, args);
            for (index, (name, value)) in kwargs.iter().enumerate() {
                if index > 0 || !args.is_empty() {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push('=');
                write_node(out, value);
            }
            out.push(')');
        }
        AstNode::Lookup { target, key } => {
            write_target(out, target);
            out.push('[');
            write_node(out, key);
            out.push(']');
        }
        AstNode::ObjLookup { target, name } => {
            // `1.x` would lex as the float `1.`.
            let wrap = precedence::of(target) < precedence::POSTFIX
                || matches!(**target, AstNode::Integer(_));
            write_child(out, target, wrap);
            out.push('.');
            out.push_str(name);
        }
    }
}

fn write_target(out: &mut String, target: &AstNode) {
    write_child(out, target, precedence::of(target) < precedence::POSTFIX);
}

fn write_child(out: &mut String, node: &AstNode, wrap: bool) {
    if wrap {
        out.push('(');
        write_node(out, node);
        out.push(')');
    } else {
        write_node(out, node);
    }
}

fn write_list(out: &mut String, items: &[AstNode]) {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_node(out, item);
    }
}

/// Infinity comes from overflowing literals such as `1e999`.
fn float_literal(value: f64) -> String {
    if value == f64::INFINITY {
        "1e999".to_string()
    } else {
        float_repr(value)
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
#[path = "formatter_test.rs"]
mod tests;
