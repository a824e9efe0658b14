use std::cmp::Ordering;

use tracing::debug;

use crate::engine::core::context::ExecutionContext;
use crate::engine::core::group::{GroupItems, GroupKey, GroupNode, GroupSelector};
use crate::engine::core::summary::{AggState, SummarySpec, finalize_states, merge_states};
use crate::engine::errors::{LoadError, SourceError};
use crate::engine::query::provider::AggregateRow;

/// Rebuilds the group tree from pushed-down rows: rows are sorted on their key tuple
/// with the same per-level ordering the local grouper uses, then each parent merges
/// its children's partial states in child order. Leaves are always collapsed.
pub fn rebuild_groups(
    rows: Vec<AggregateRow>,
    selectors: &[GroupSelector],
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<Vec<GroupNode>, LoadError> {
    let mut rows = rows
        .into_iter()
        .map(|row| validate_row(row, selectors.len(), specs))
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by(|a, b| compare_keys(&a.keys, &b.keys, selectors));

    let nodes: Vec<GroupNode> = build_level(&rows, 0, selectors.len(), specs, ctx)?
        .into_iter()
        .map(|(node, _)| node)
        .collect();
    debug!(
        target: "shape::pushdown",
        rows = rows.len(),
        top_level_groups = nodes.len(),
        "Group tree rebuilt from provider rows"
    );
    Ok(nodes)
}

/// Merges the partial states of `rows` into one state per spec.
pub fn merge_rows(rows: &[AggregateRow], specs: &[SummarySpec]) -> Result<Vec<AggState>, LoadError> {
    merge_states(rows.iter().map(|r| r.states.as_slice()), specs)
}

fn validate_row(
    mut row: AggregateRow,
    levels: usize,
    specs: &[SummarySpec],
) -> Result<AggregateRow, LoadError> {
    if row.keys.len() != levels {
        return Err(malformed(format!(
            "expected {} group keys, got {}",
            levels,
            row.keys.len()
        )));
    }
    if row.states.len() != specs.len()
        || row
            .states
            .iter()
            .zip(specs)
            .any(|(state, spec)| state.kind() != spec.aggregate)
    {
        return Err(malformed("aggregate states do not match the requested summaries".to_string()));
    }
    row.keys = row.keys.into_iter().map(GroupKey::normalized).collect();
    Ok(row)
}

fn malformed(message: String) -> LoadError {
    LoadError::Source(SourceError::Other(format!("malformed aggregate row: {}", message)))
}

fn compare_keys(a: &[GroupKey], b: &[GroupKey], selectors: &[GroupSelector]) -> Ordering {
    for ((ka, kb), selector) in a.iter().zip(b).zip(selectors) {
        let ord = if selector.desc { kb.cmp(ka) } else { ka.cmp(kb) };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn build_level(
    rows: &[AggregateRow],
    depth: usize,
    levels: usize,
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<Vec<(GroupNode, Vec<AggState>)>, LoadError> {
    let mut nodes = Vec::new();
    let mut start = 0;
    while start < rows.len() {
        ctx.check_cancelled()?;
        let key = &rows[start].keys[depth];
        let len = rows[start..]
            .iter()
            .take_while(|r| &r.keys[depth] == key)
            .count();
        let run = &rows[start..start + len];

        let (items, states) = if depth + 1 < levels {
            let children = build_level(run, depth + 1, levels, specs, ctx)?;
            let states = merge_states(children.iter().map(|(_, s)| s.as_slice()), specs)?;
            let child_nodes = children.into_iter().map(|(node, _)| node).collect();
            (GroupItems::Groups(child_nodes), states)
        } else {
            (GroupItems::Collapsed, merge_rows(run, specs)?)
        };
        let node = GroupNode {
            key: key.clone(),
            items,
            count: run.iter().map(|r| r.count as usize).sum(),
            summary: finalize_states(&states),
        };
        nodes.push((node, states));
        start += len;
    }
    Ok(nodes)
}
