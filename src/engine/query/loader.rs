use crate::command::types::LoadRequest;
use crate::engine::core::cancel::CancellationToken;
use crate::engine::core::result::LoadResult;
use crate::engine::errors::LoadError;
use crate::engine::query::data_source::DataSource;
use crate::engine::query::executor::QueryExecutor;
use crate::engine::query::options::LoadOptions;

/// Resolves `request` against the source schema and executes it.
pub async fn load(
    source: &DataSource,
    request: &LoadRequest,
    executor: &QueryExecutor,
    cancel: &CancellationToken,
) -> Result<LoadResult, LoadError> {
    let outcome = resolve_and_execute(source, request, executor, cancel).await;
    if let Err(e) = &outcome {
        e.log_error();
    }
    outcome
}

async fn resolve_and_execute(
    source: &DataSource,
    request: &LoadRequest,
    executor: &QueryExecutor,
    cancel: &CancellationToken,
) -> Result<LoadResult, LoadError> {
    cancel.check()?;
    let schema = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(LoadError::Cancelled),
        schema = source.schema() => schema?,
    };
    let options = LoadOptions::resolve(request, &schema, executor.settings())?;
    executor.execute(source, &options, cancel).await
}
