use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::engine::core::context::ExecutionContext;
use crate::engine::core::group::group_key::GroupKey;
use crate::engine::core::group::node::{GroupItems, GroupNode};
use crate::engine::core::group::selector::GroupSelector;
use crate::engine::core::record::Record;
use crate::engine::core::summary::{
    AggState, SummaryCalculator, SummarySpec, finalize_states, merge_states,
};
use crate::engine::errors::{LoadError, ValidationError};

/// Builds the group tree for `records`, one level per selector.
pub fn group(
    records: &[Record],
    selectors: &[GroupSelector],
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<Vec<GroupNode>, LoadError> {
    ctx.check_cancelled()?;
    if selectors.is_empty() {
        return Ok(Vec::new());
    }
    let max = ctx.settings.max_group_depth;
    if selectors.len() > max {
        return Err(ValidationError::TooManyGroupLevels {
            requested: selectors.len(),
            max,
        }
        .into());
    }

    let members: Vec<&Record> = records.iter().collect();
    let nodes: Vec<GroupNode> = build_level(&members, selectors, 0, specs, ctx)?
        .into_iter()
        .map(|(node, _)| node)
        .collect();
    debug!(
        target: "shape::group",
        records = records.len(),
        levels = selectors.len(),
        top_level_groups = nodes.len(),
        "Group tree built"
    );
    Ok(nodes)
}

/// Builds one level of nodes, each paired with the partial states its summary was
/// finalized from.
fn build_level(
    records: &[&Record],
    selectors: &[GroupSelector],
    depth: usize,
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<Vec<(GroupNode, Vec<AggState>)>, LoadError> {
    let partitions = partition(records, &selectors[depth], ctx)?;
    let threshold = ctx.settings.parallel_group_threshold.max(1);

    if partitions.len() >= threshold {
        trace!(
            target: "shape::group",
            depth,
            partitions = partitions.len(),
            "Building sibling groups in parallel"
        );
        // Indexed collect keeps the sorted partition order
        partitions
            .into_par_iter()
            .map(|(key, members)| build_node(key, members, selectors, depth, specs, ctx))
            .collect()
    } else {
        partitions
            .into_iter()
            .map(|(key, members)| build_node(key, members, selectors, depth, specs, ctx))
            .collect()
    }
}

/// Splits `records` by the selector's key and returns the partitions in key order.
/// Records keep their relative input order inside a partition.
fn partition<'r>(
    records: &[&'r Record],
    selector: &GroupSelector,
    ctx: &ExecutionContext,
) -> Result<Vec<(GroupKey, Vec<&'r Record>)>, LoadError> {
    let mut map: HashMap<GroupKey, Vec<&'r Record>, AHashRandomState> =
        HashMap::with_hasher(AHashRandomState::new());
    for (idx, record) in records.iter().enumerate() {
        ctx.checkpoint(idx)?;
        let key = GroupKey::from_field_value(record.get_field_scalar(&selector.field));
        map.entry(key).or_default().push(*record);
    }

    let mut partitions: Vec<_> = map.into_iter().collect();
    partitions.sort_by(|(a, _), (b, _)| a.cmp(b));
    if selector.desc {
        partitions.reverse();
    }
    Ok(partitions)
}

/// Leaves summarize their own records; inner nodes merge their children's states in
/// child order.
fn build_node(
    key: GroupKey,
    members: Vec<&Record>,
    selectors: &[GroupSelector],
    depth: usize,
    specs: &[SummarySpec],
    ctx: &ExecutionContext,
) -> Result<(GroupNode, Vec<AggState>), LoadError> {
    ctx.check_cancelled()?;

    let (items, states) = if depth + 1 < selectors.len() {
        let children = build_level(&members, selectors, depth + 1, specs, ctx)?;
        let states = merge_states(children.iter().map(|(_, s)| s.as_slice()), specs)?;
        let child_nodes = children.into_iter().map(|(node, _)| node).collect();
        (GroupItems::Groups(child_nodes), states)
    } else {
        let states = SummaryCalculator::new(specs).partial_states(members.iter().copied(), ctx)?;
        let items = if selectors[depth].expanded {
            GroupItems::Records(members.iter().map(|r| (*r).clone()).collect())
        } else {
            GroupItems::Collapsed
        };
        (items, states)
    };

    let node = GroupNode {
        key,
        items,
        count: members.len(),
        summary: finalize_states(&states),
    };
    Ok((node, states))
}
