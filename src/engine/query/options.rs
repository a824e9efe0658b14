use tracing::debug;

use crate::command::types::{GroupingInfo, LoadRequest, SummaryInfo};
use crate::engine::core::filter::Predicate;
use crate::engine::core::group::GroupSelector;
use crate::engine::core::record::{FieldAccessor, FieldPath, RecordSchema};
use crate::engine::core::summary::{AggregateKind, SummarySpec};
use crate::engine::errors::{LoadError, ValidationError};
use crate::engine::types::LogicalType;
use crate::shared::config::EngineConfig;

/// Load options validated and resolved against one source schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadOptions {
    pub filter: Option<Predicate>,
    pub group_selectors: Vec<GroupSelector>,
    pub group_summary_specs: Vec<SummarySpec>,
    pub total_summary_specs: Vec<SummarySpec>,
    pub require_total_count: bool,
    pub require_group_count: bool,
}

impl LoadOptions {
    /// Validates `request` and binds every field reference to `schema`.
    ///
    /// Unknown fields are not an error here; they resolve to `Unresolved` accessors.
    /// Aggregates over fields the schema declares as text or boolean are rejected.
    pub fn resolve(
        request: &LoadRequest,
        schema: &RecordSchema,
        settings: &EngineConfig,
    ) -> Result<Self, LoadError> {
        let filter = match request.parsed_filter()? {
            Some(expr) => Some(Predicate::resolve(&expr, schema)?),
            None => None,
        };

        if request.group.len() > settings.max_group_depth {
            return Err(ValidationError::TooManyGroupLevels {
                requested: request.group.len(),
                max: settings.max_group_depth,
            }
            .into());
        }
        let group_selectors = request
            .group
            .iter()
            .map(|g| resolve_selector(g, schema))
            .collect::<Result<Vec<_>, _>>()?;

        let group_summary_specs = resolve_specs(&request.group_summary, schema)?;
        let total_summary_specs = resolve_specs(&request.total_summary, schema)?;

        let options = Self {
            filter,
            group_selectors,
            group_summary_specs,
            total_summary_specs,
            require_total_count: request.require_total_count,
            require_group_count: request.require_group_count,
        };
        debug!(
            target: "shape::options",
            filtered = options.filter.is_some(),
            levels = options.group_selectors.len(),
            group_specs = options.group_summary_specs.len(),
            total_specs = options.total_summary_specs.len(),
            "Load options resolved"
        );
        Ok(options)
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_selectors.is_empty()
    }

    /// Whether the deepest group level keeps its records.
    pub fn deepest_expanded(&self) -> bool {
        self.group_selectors.last().is_some_and(|s| s.expanded)
    }
}

fn resolve_selector(info: &GroupingInfo, schema: &RecordSchema) -> Result<GroupSelector, LoadError> {
    let path = FieldPath::parse(&info.selector)?;
    let selector = GroupSelector::new(FieldAccessor::resolve(path, schema), info.is_expanded);
    Ok(if info.desc { selector.descending() } else { selector })
}

fn resolve_specs(infos: &[SummaryInfo], schema: &RecordSchema) -> Result<Vec<SummarySpec>, LoadError> {
    infos.iter().map(|info| resolve_spec(info, schema)).collect()
}

fn resolve_spec(info: &SummaryInfo, schema: &RecordSchema) -> Result<SummarySpec, LoadError> {
    let aggregate = AggregateKind::parse(&info.summary_type)?;
    if !aggregate.needs_field() {
        return Ok(SummarySpec::count());
    }

    let selector = info
        .selector
        .as_deref()
        .ok_or_else(|| ValidationError::MissingSelector(info.summary_type.clone()))?;
    let accessor = FieldAccessor::resolve(FieldPath::parse(selector)?, schema);

    if let Some(found @ (LogicalType::String | LogicalType::Boolean)) = accessor.logical_type() {
        return Err(LoadError::AggregateTypeMismatch {
            field: accessor.name().to_string(),
            aggregate,
            found,
        });
    }
    Ok(SummarySpec::new(accessor, aggregate))
}
