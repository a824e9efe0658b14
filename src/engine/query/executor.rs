use std::future::Future;

use tracing::{debug, info};

use crate::engine::core::cancel::CancellationToken;
use crate::engine::core::context::ExecutionContext;
use crate::engine::core::filter::{Predicate, apply};
use crate::engine::core::record::FieldAccessor;
use crate::engine::core::result::{LoadData, LoadResult, assemble};
use crate::engine::core::summary::{SummaryVector, finalize_states, summarize};
use crate::engine::errors::{LoadError, SourceError};
use crate::engine::query::data_source::DataSource;
use crate::engine::query::options::LoadOptions;
use crate::engine::query::plan::{ExecutionPlan, Placement};
use crate::engine::query::provider::QueryProvider;
use crate::engine::query::pushdown::{merge_rows, rebuild_groups};
use crate::shared::config::{CONFIG, EngineConfig};

/// Runs resolved load options against a data source, evaluating locally whatever the
/// source cannot push down. Every plan produces the same result.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    settings: EngineConfig,
}

impl QueryExecutor {
    pub fn new(settings: EngineConfig) -> Self {
        Self { settings }
    }

    /// Executor configured from the global settings.
    pub fn from_config() -> Self {
        Self::new(CONFIG.engine.clone())
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    pub async fn execute(
        &self,
        source: &DataSource,
        options: &LoadOptions,
        cancel: &CancellationToken,
    ) -> Result<LoadResult, LoadError> {
        let ctx = ExecutionContext::new(self.settings.clone(), cancel.clone());
        ctx.check_cancelled()?;

        let result = match source {
            DataSource::Memory(memory) => {
                debug!(target: "shape::executor", records = memory.records().len(), "Executing locally");
                let filtered = apply(memory.records(), options.filter.as_ref(), &ctx)?;
                assemble(filtered, options, &ctx)?
            }
            DataSource::Provider(provider) => {
                let plan = ExecutionPlan::build(options, &provider.capabilities());
                self.execute_plan(provider.as_ref(), plan, options, &ctx).await?
            }
        };

        info!(
            target: "shape::executor",
            total_count = ?result.total_count,
            grouped = options.is_grouped(),
            "Load executed"
        );
        Ok(result)
    }

    async fn execute_plan(
        &self,
        provider: &dyn QueryProvider,
        plan: ExecutionPlan,
        options: &LoadOptions,
        ctx: &ExecutionContext,
    ) -> Result<LoadResult, LoadError> {
        let pushed_filter = match plan.filter {
            Placement::Pushed => options.filter.as_ref(),
            Placement::Local => None,
        };

        let records = if plan.fetches_records() {
            let fetched = race(&ctx.cancel, provider.fetch(pushed_filter)).await?;
            let filtered = match plan.filter {
                Placement::Local => apply(&fetched, options.filter.as_ref(), ctx)?,
                Placement::Pushed => fetched,
            };
            Some(filtered)
        } else {
            None
        };

        if plan.groups == Placement::Local && plan.total_summary == Placement::Local {
            // Nothing left for the provider; `records` is always fetched on this plan
            let filtered = records.unwrap_or_default();
            return assemble(filtered, options, ctx);
        }

        ctx.check_cancelled()?;
        let fields: Vec<FieldAccessor> = options
            .group_selectors
            .iter()
            .map(|s| s.field.clone())
            .collect();
        let rows = race(
            &ctx.cancel,
            provider.aggregate(pushed_filter, &fields, &options.group_summary_specs),
        )
        .await?;
        let pushed_total: usize = rows.iter().map(|r| r.count as usize).sum();
        let groups = rebuild_groups(rows, &options.group_selectors, &options.group_summary_specs, ctx)?;

        let (summary, total) = match (&plan.total_summary, &records) {
            (Placement::Local, Some(records)) => (
                summarize(records, &options.total_summary_specs, ctx)?,
                records.len(),
            ),
            _ => (
                self.pushed_total_summary(provider, pushed_filter, options, ctx)
                    .await?,
                pushed_total,
            ),
        };

        Ok(LoadResult::new(LoadData::Groups(groups), summary).with_counts(
            total,
            options.require_total_count,
            options.require_group_count,
        ))
    }

    async fn pushed_total_summary(
        &self,
        provider: &dyn QueryProvider,
        filter: Option<&Predicate>,
        options: &LoadOptions,
        ctx: &ExecutionContext,
    ) -> Result<SummaryVector, LoadError> {
        let specs = &options.total_summary_specs;
        if specs.is_empty() {
            return Ok(SummaryVector::default());
        }
        let rows = race(&ctx.cancel, provider.aggregate(filter, &[], specs)).await?;
        Ok(finalize_states(&merge_rows(&rows, specs)?))
    }
}

/// Awaits a provider call unless the token fires first.
async fn race<T, F>(cancel: &CancellationToken, call: F) -> Result<T, LoadError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoadError::Cancelled),
        result = call => result.map_err(LoadError::from),
    }
}
