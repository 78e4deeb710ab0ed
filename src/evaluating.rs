use crate::error_handling::*;
use crate::parsing::*;
use log::debug;
use std::collections::HashMap;
use std::str::FromStr;

/// Values bound by assignment, kept for the whole session.
pub type Variables = HashMap<String, f64>;

pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> Result<f64> {
        use BinaryOperator::*;

        match self {
            addition => Ok(left + right),
            subtraction => Ok(left - right),
            multiplication => Ok(left * right),
            division if right == 0.0 => Err(CalcError::divide_by_zero),
            division => Ok(left / right),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for BinaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            _ => Err(InvalidOperator),
        }
    }
}

// operand (operator operand)*, folded left to right
fn fold(node: &SyntaxNode, variables: &mut Variables) -> Result<f64> {
    let Some((first, rest)) = node.children.split_first() else {
        unreachable!("{} node without operands", node.tag);
    };

    let mut result = evaluate(first, variables)?;
    for step in rest.chunks(2) {
        let [operator, operand] = step else {
            unreachable!("{} node with a dangling operator", node.tag);
        };
        let operand = evaluate(operand, variables)?;
        let Ok(operator) = operator.text().parse::<BinaryOperator>() else {
            unreachable!("'{}' is not an operator", operator.text());
        };
        result = operator.call(result, operand)?;
    }
    Ok(result)
}

/// Evaluates a parsed line against the session's variables.
///
/// Assignments made before a failure stay bound.
pub fn evaluate(node: &SyntaxNode, variables: &mut Variables) -> Result<f64> {
    use Tag::*;
    match (node.tag, node.children.as_slice()) {
        (additive | multitive, _) => fold(node, variables),

        (assignment, [name, bound]) => {
            let value = evaluate(bound, variables)?;
            debug!("{} = {value}", name.text());
            variables.insert(name.text().into(), value);
            Ok(value)
        },

        (variable, [name]) => variables
            .get(name.text())
            .copied()
            .ok_or_else(|| CalcError::undefined_variable(name.text().into())),

        (number, []) => match node.text().parse() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("'{}' is not a number", node.text()),
        },

        (start | expression | primary, [inner]) => evaluate(inner, variables),

        (tag, children) => unreachable!("{tag} node with {} children", children.len()),
    }
}
