use serde_json::Value;

use crate::command::types::{CompareOp, FilterExpr};
use crate::engine::errors::ValidationError;
use crate::engine::types::ScalarValue;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Joiner {
    And,
    Or,
}

/// Parses a filter array:
///
/// * `[field, op, value]` and `[field, value]` (implicit `=`)
/// * `["!", expr]`
/// * `[expr, "and" | "or", expr, ...]`, adjacent expressions without an operator are
///   joined with `and`
///
/// `null` and `[]` mean "no filter".
pub fn parse_filter(value: &Value) -> Result<Option<FilterExpr>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        Value::Array(_) => parse_expr(value).map(Some),
        other => Err(malformed(format!("expected an array, got {}", other))),
    }
}

fn parse_expr(value: &Value) -> Result<FilterExpr, ValidationError> {
    let Value::Array(items) = value else {
        return Err(malformed(format!("expected an array, got {}", value)));
    };

    match items.first() {
        None => Err(malformed("empty filter group".to_string())),
        Some(Value::String(head)) if head == "!" => parse_not(items),
        Some(Value::String(_)) => parse_condition(items),
        Some(Value::Array(_)) => parse_group(items),
        Some(other) => Err(malformed(format!("unexpected filter element {}", other))),
    }
}

fn parse_not(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    if items.len() != 2 {
        return Err(malformed("'!' takes exactly one operand".to_string()));
    }
    Ok(FilterExpr::Not(Box::new(parse_expr(&items[1])?)))
}

fn parse_condition(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    let field = match &items[0] {
        Value::String(s) => s.clone(),
        other => return Err(malformed(format!("field name expected, got {}", other))),
    };

    let (op, value) = match items.len() {
        2 => (CompareOp::Eq, &items[1]),
        3 => match &items[1] {
            Value::String(op) => (CompareOp::parse(op)?, &items[2]),
            other => return Err(malformed(format!("operator expected, got {}", other))),
        },
        n => {
            return Err(malformed(format!(
                "condition on '{}' has {} elements, expected 2 or 3",
                field, n
            )));
        }
    };

    if value.is_array() || value.is_object() {
        return Err(malformed(format!(
            "condition on '{}' compares against a non-scalar {}",
            field, value
        )));
    }

    Ok(FilterExpr::Compare {
        field,
        op,
        value: ScalarValue::from(value),
    })
}

fn parse_group(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    let mut operands: Vec<FilterExpr> = Vec::new();
    let mut joiner: Option<Joiner> = None;
    let mut expect_operand = true;

    for item in items {
        match item {
            Value::String(word) => {
                let next = match word.to_ascii_lowercase().as_str() {
                    "and" => Joiner::And,
                    "or" => Joiner::Or,
                    _ => return Err(malformed(format!("unknown group operator '{}'", word))),
                };
                if expect_operand {
                    return Err(malformed(format!("'{}' without a left operand", word)));
                }
                merge_joiner(&mut joiner, next)?;
                expect_operand = true;
            }
            Value::Array(_) => {
                if !expect_operand {
                    // Adjacent operands are an implicit "and"
                    merge_joiner(&mut joiner, Joiner::And)?;
                }
                operands.push(parse_expr(item)?);
                expect_operand = false;
            }
            other => return Err(malformed(format!("unexpected filter element {}", other))),
        }
    }

    if expect_operand {
        return Err(malformed("filter group ends with an operator".to_string()));
    }

    if operands.len() == 1 {
        return Ok(operands.remove(0));
    }

    Ok(match joiner.unwrap_or(Joiner::And) {
        Joiner::And => FilterExpr::And(operands),
        Joiner::Or => FilterExpr::Or(operands),
    })
}

fn merge_joiner(current: &mut Option<Joiner>, next: Joiner) -> Result<(), ValidationError> {
    match current {
        Some(j) if *j != next => Err(ValidationError::MixedLogicalOperators),
        _ => {
            *current = Some(next);
            Ok(())
        }
    }
}

fn malformed(msg: String) -> ValidationError {
    ValidationError::MalformedFilter(msg)
}
