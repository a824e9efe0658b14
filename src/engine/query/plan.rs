use tracing::debug;

use crate::engine::query::options::LoadOptions;
use crate::engine::query::provider::ProviderCapabilities;

/// Where one concern of a load is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Local,
    Pushed,
}

/// Per-concern split between the provider and the local evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub filter: Placement,
    pub groups: Placement,
    pub total_summary: Placement,
}

impl ExecutionPlan {
    pub fn local() -> Self {
        Self {
            filter: Placement::Local,
            groups: Placement::Local,
            total_summary: Placement::Local,
        }
    }

    pub fn build(options: &LoadOptions, capabilities: &ProviderCapabilities) -> Self {
        let filter = if options.filter.is_none() || capabilities.filter {
            Placement::Pushed
        } else {
            Placement::Local
        };

        // Expanded leaves need the records themselves, which rows cannot carry
        let groups = if options.is_grouped()
            && !options.deepest_expanded()
            && capabilities.grouping
            && filter == Placement::Pushed
            && capabilities.supports_all(&options.group_summary_specs)
        {
            Placement::Pushed
        } else {
            Placement::Local
        };

        let total_summary = if groups == Placement::Pushed
            && capabilities.supports_all(&options.total_summary_specs)
        {
            Placement::Pushed
        } else {
            Placement::Local
        };

        let plan = Self {
            filter,
            groups,
            total_summary,
        };
        debug!(target: "shape::plan", ?plan, "Execution plan built");
        plan
    }

    /// Whether the records themselves must be fetched.
    pub fn fetches_records(&self) -> bool {
        self.groups == Placement::Local || self.total_summary == Placement::Local
    }
}
