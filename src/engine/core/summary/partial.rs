use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::engine::core::summary::spec::AggregateKind;
use crate::engine::core::summary::value::{NumericValue, SummaryValue};

/// Mergeable intermediate state of one aggregate. Providers that push aggregation
/// down return these per group so the tree can be rolled up without the records.
#[derive(Clone, Debug, PartialEq)]
pub enum AggState {
    Count { count: u64 },
    Sum { sum: Decimal },
    Avg { sum: Decimal, count: u64 },
    Min { min: Option<NumericValue> },
    Max { max: Option<NumericValue> },
}

impl AggState {
    pub fn empty(kind: AggregateKind) -> Self {
        match kind {
            AggregateKind::Count => AggState::Count { count: 0 },
            AggregateKind::Sum => AggState::Sum { sum: Decimal::ZERO },
            AggregateKind::Avg => AggState::Avg {
                sum: Decimal::ZERO,
                count: 0,
            },
            AggregateKind::Min => AggState::Min { min: None },
            AggregateKind::Max => AggState::Max { max: None },
        }
    }

    pub fn kind(&self) -> AggregateKind {
        match self {
            AggState::Count { .. } => AggregateKind::Count,
            AggState::Sum { .. } => AggregateKind::Sum,
            AggState::Avg { .. } => AggregateKind::Avg,
            AggState::Min { .. } => AggregateKind::Min,
            AggState::Max { .. } => AggregateKind::Max,
        }
    }

    /// Folds `other` into `self`. Returns `false` when the decimal accumulator
    /// overflows; mismatched variants are ignored.
    #[must_use]
    pub fn merge(&mut self, other: &AggState) -> bool {
        match (self, other) {
            (AggState::Count { count: a }, AggState::Count { count: b }) => *a += *b,
            (AggState::Sum { sum: a }, AggState::Sum { sum: b }) => match a.checked_add(*b) {
                Some(v) => *a = v,
                None => return false,
            },
            (AggState::Avg { sum: a1, count: c1 }, AggState::Avg { sum: a2, count: c2 }) => {
                match a1.checked_add(*a2) {
                    Some(v) => *a1 = v,
                    None => return false,
                }
                *c1 += *c2;
            }
            (AggState::Min { min: a }, AggState::Min { min: b }) => {
                *a = pick(*a, *b, Ordering::Less);
            }
            (AggState::Max { max: a }, AggState::Max { max: b }) => {
                *a = pick(*a, *b, Ordering::Greater);
            }
            _ => {}
        }
        true
    }

    pub fn finalize(&self) -> SummaryValue {
        match self {
            AggState::Count { count } => SummaryValue::Count(*count),
            AggState::Sum { sum } => SummaryValue::Number(NumericValue::Decimal(*sum)),
            AggState::Avg { sum, count } => {
                if *count == 0 {
                    SummaryValue::Null
                } else {
                    SummaryValue::Number(NumericValue::Decimal(*sum / Decimal::from(*count)))
                }
            }
            AggState::Min { min } => min.map(SummaryValue::Number).unwrap_or(SummaryValue::Null),
            AggState::Max { max } => max.map(SummaryValue::Number).unwrap_or(SummaryValue::Null),
        }
    }
}

/// Keeps whichever candidate sits on the `wanted` side; equal values go through the
/// tie-break so the outcome is order independent.
pub(crate) fn pick(
    current: Option<NumericValue>,
    candidate: Option<NumericValue>,
    wanted: Ordering,
) -> Option<NumericValue> {
    match (current, candidate) {
        (None, c) => c,
        (c, None) => c,
        (Some(cur), Some(cand)) => match cand.compare(&cur) {
            Ordering::Equal => Some(cur.prefer_on_tie(cand)),
            ord if ord == wanted => Some(cand),
            _ => Some(cur),
        },
    }
}
