//! Classification of cell text and postfix tokens.

use regex::Regex;
use std::sync::OnceLock;

use super::cell_ref::reference_re;

fn literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]+\.)?[0-9]+$").unwrap())
}

/// What a piece of cell text is, in classification priority order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Term<'a> {
    Literal(f64),
    Reference(&'a str),
    Expression(&'a str),
}

impl<'a> Term<'a> {
    pub fn classify(text: &'a str) -> Term<'a> {
        if literal_re().is_match(text)
            && let Ok(value) = text.parse::<f64>()
        {
            return Term::Literal(value);
        }
        if reference_re().is_match(text) {
            return Term::Reference(text);
        }
        Term::Expression(text)
    }
}

/// Postfix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Increment,
    Decrement,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Operator> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "++" => Some(Operator::Increment),
            "--" => Some(Operator::Decrement),
            _ => None,
        }
    }

    /// Apply to the value stack. Returns false (stack untouched) when there
    /// are too few operands.
    ///
    /// Binary operators pop `a` then `b` and push `a+b`, `a-b`, `a*b`, `b/a`.
    pub fn apply(self, stack: &mut Vec<f64>) -> bool {
        match self {
            Operator::Increment | Operator::Decrement => {
                let Some(a) = stack.pop() else {
                    return false;
                };
                stack.push(if self == Operator::Increment { a + 1.0 } else { a - 1.0 });
            }
            _ => {
                let n = stack.len();
                if n < 2 {
                    return false;
                }
                let (a, b) = (stack[n - 1], stack[n - 2]);
                stack.truncate(n - 2);
                let result = match self {
                    Operator::Add => a + b,
                    Operator::Subtract => a - b,
                    Operator::Multiply => a * b,
                    _ => b / a,
                };
                stack.push(result);
            }
        }
        true
    }
}
