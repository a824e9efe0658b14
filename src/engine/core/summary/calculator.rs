use tracing::trace;

use crate::engine::core::context::ExecutionContext;
use crate::engine::core::record::Record;
use crate::engine::core::summary::ops::AggregatorImpl;
use crate::engine::core::summary::partial::AggState;
use crate::engine::core::summary::spec::SummarySpec;
use crate::engine::core::summary::value::SummaryVector;
use crate::engine::errors::LoadError;

/// Computes summary vectors for a fixed list of specs.
pub struct SummaryCalculator<'a> {
    specs: &'a [SummarySpec],
}

impl<'a> SummaryCalculator<'a> {
    pub fn new(specs: &'a [SummarySpec]) -> Self {
        Self { specs }
    }

    /// Runs one pass over `records`, feeding every aggregator per record.
    pub fn accumulate<'r, I>(
        &self,
        records: I,
        ctx: &ExecutionContext,
    ) -> Result<Vec<AggregatorImpl>, LoadError>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let mut aggs: Vec<AggregatorImpl> =
            self.specs.iter().map(AggregatorImpl::from_spec).collect();
        if aggs.is_empty() {
            return Ok(aggs);
        }
        for (idx, record) in records.into_iter().enumerate() {
            ctx.checkpoint(idx)?;
            for agg in aggs.iter_mut() {
                agg.update_from_record(record)?;
            }
        }
        Ok(aggs)
    }

    pub fn summarize<'r, I>(&self, records: I, ctx: &ExecutionContext) -> Result<SummaryVector, LoadError>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let aggs = self.accumulate(records, ctx)?;
        let values: Vec<_> = aggs.iter().map(|a| a.finalize()).collect();
        trace!(target: "shape::summary", specs = self.specs.len(), "Summary computed");
        Ok(SummaryVector(values))
    }

    /// Mergeable states for the same pass, used by push-down capable sources.
    pub fn partial_states<'r, I>(
        &self,
        records: I,
        ctx: &ExecutionContext,
    ) -> Result<Vec<AggState>, LoadError>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        Ok(self
            .accumulate(records, ctx)?
            .iter()
            .map(|a| a.snapshot())
            .collect())
    }
}

/// Summarizes `records` under `specs`; see [`SummaryCalculator::summarize`].
pub fn summarize<'r, I>(
    records: I,
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<SummaryVector, LoadError>
where
    I: IntoIterator<Item = &'r Record>,
{
    SummaryCalculator::new(specs).summarize(records, ctx)
}

/// Finalizes partial states produced by [`SummaryCalculator::partial_states`] or a provider.
pub fn finalize_states(states: &[AggState]) -> SummaryVector {
    SummaryVector(states.iter().map(|s| s.finalize()).collect())
}

/// Folds `parts` left to right into one state per spec. Parent groups are rolled up
/// from their children this way on every execution path, so decimal rounding lands
/// in the same places.
pub fn merge_states<'s, I>(parts: I, specs: &[SummarySpec]) -> Result<Vec<AggState>, LoadError>
where
    I: IntoIterator<Item = &'s [AggState]>,
{
    let mut merged: Vec<AggState> = specs.iter().map(|s| AggState::empty(s.aggregate)).collect();
    for part in parts {
        for ((acc, state), spec) in merged.iter_mut().zip(part).zip(specs) {
            if !acc.merge(state) {
                return Err(LoadError::NumericOverflow {
                    field: spec.field_name().to_string(),
                });
            }
        }
    }
    Ok(merged)
}
