use std::cmp::Ordering;

use crate::command::types::{CompareOp, FilterExpr};
use crate::engine::core::record::{FieldAccessor, FieldPath, FieldValue, Record, RecordSchema};
use crate::engine::errors::ValidationError;
use crate::engine::types::ScalarValue;

/// Filter tree with every field reference resolved against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        field: FieldAccessor,
        op: CompareOp,
        value: ScalarValue,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn resolve(expr: &FilterExpr, schema: &RecordSchema) -> Result<Self, ValidationError> {
        Ok(match expr {
            FilterExpr::Compare { field, op, value } => Predicate::Compare {
                field: FieldAccessor::resolve(FieldPath::parse(field)?, schema),
                op: *op,
                value: value.clone(),
            },
            FilterExpr::And(items) => Predicate::And(
                items
                    .iter()
                    .map(|e| Predicate::resolve(e, schema))
                    .collect::<Result<_, _>>()?,
            ),
            FilterExpr::Or(items) => Predicate::Or(
                items
                    .iter()
                    .map(|e| Predicate::resolve(e, schema))
                    .collect::<Result<_, _>>()?,
            ),
            FilterExpr::Not(inner) => Predicate::Not(Box::new(Predicate::resolve(inner, schema)?)),
        })
    }

    pub fn evaluate(&self, record: &Record) -> bool {
        match self {
            Predicate::Compare { field, op, value } => match record.get_field_scalar(field) {
                // Unknown or absent fields make the comparison false, never an error
                FieldValue::Missing => false,
                FieldValue::Present(actual) => compare(&actual, *op, value),
            },
            Predicate::And(items) => items.iter().all(|p| p.evaluate(record)),
            Predicate::Or(items) => items.iter().any(|p| p.evaluate(record)),
            Predicate::Not(inner) => !inner.evaluate(record),
        }
    }

    /// Whether any comparison in the tree reads an unresolved field.
    pub fn references_unresolved(&self) -> bool {
        match self {
            Predicate::Compare { field, .. } => !field.is_resolved(),
            Predicate::And(items) | Predicate::Or(items) => {
                items.iter().any(|p| p.references_unresolved())
            }
            Predicate::Not(inner) => inner.references_unresolved(),
        }
    }
}

fn compare(actual: &ScalarValue, op: CompareOp, expected: &ScalarValue) -> bool {
    if op.is_string_op() {
        let (Some(a), Some(e)) = (actual.as_str(), expected.as_str()) else {
            return false;
        };
        return match op {
            CompareOp::StartsWith => a.starts_with(e),
            CompareOp::EndsWith => a.ends_with(e),
            CompareOp::Contains => a.contains(e),
            CompareOp::NotContains => !a.contains(e),
            _ => false,
        };
    }

    match (actual.is_null(), expected.is_null()) {
        (true, true) => return matches!(op, CompareOp::Eq),
        (true, false) | (false, true) => return matches!(op, CompareOp::Neq),
        (false, false) => {}
    }

    match actual.compare(expected) {
        Some(ord) => match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Neq => ord != Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Gte => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Lte => ord != Ordering::Greater,
            _ => false,
        },
        // Mismatched kinds are never equal
        None => matches!(op, CompareOp::Neq),
    }
}
