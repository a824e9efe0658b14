use tracing::debug;

use crate::engine::core::context::ExecutionContext;
use crate::engine::core::group::group;
use crate::engine::core::record::Record;
use crate::engine::core::result::load_result::{LoadData, LoadResult};
use crate::engine::core::summary::summarize;
use crate::engine::errors::LoadError;
use crate::engine::query::LoadOptions;

/// Builds the result from already filtered records: group tree (or flat records) plus
/// the total summary over the same filtered set.
pub fn assemble(
    filtered: Vec<Record>,
    options: &LoadOptions,
    ctx: &ExecutionContext,
) -> Result<LoadResult, LoadError> {
    let summary = summarize(&filtered, &options.total_summary_specs, ctx)?;
    let total = filtered.len();

    let data = if options.is_grouped() {
        LoadData::Groups(group(
            &filtered,
            &options.group_selectors,
            &options.group_summary_specs,
            ctx,
        )?)
    } else {
        LoadData::Records(filtered)
    };

    debug!(
        target: "shape::result",
        total,
        grouped = options.is_grouped(),
        "Result assembled"
    );
    Ok(LoadResult::new(data, summary).with_counts(
        total,
        options.require_total_count,
        options.require_group_count,
    ))
}
