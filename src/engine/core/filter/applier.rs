use tracing::debug;

use crate::engine::core::context::ExecutionContext;
use crate::engine::core::filter::predicate::Predicate;
use crate::engine::core::record::Record;
use crate::engine::errors::LoadError;

/// Keeps the records matching `predicate`, in input order. `None` passes everything.
pub fn apply(
    records: &[Record],
    predicate: Option<&Predicate>,
    ctx: &ExecutionContext,
) -> Result<Vec<Record>, LoadError> {
    ctx.check_cancelled()?;
    let Some(predicate) = predicate else {
        return Ok(records.to_vec());
    };

    if predicate.references_unresolved() {
        debug!(target: "shape::filter", "Filter references unknown fields; affected comparisons are false");
    }

    let mut out = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        ctx.checkpoint(idx)?;
        if predicate.evaluate(record) {
            out.push(record.clone());
        }
    }

    debug!(
        target: "shape::filter",
        input = records.len(),
        output = out.len(),
        "Filter applied"
    );
    Ok(out)
}
