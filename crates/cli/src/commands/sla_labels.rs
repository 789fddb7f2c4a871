//! `ci-actions sla-labels`: the SLA label action.

use std::future::Future;
use std::sync::Arc;

use github::GithubClient;
use runner::{RunError, SlaLabelRun};
use sla::Timestamp;

use crate::config::SlaLabelsArgs;

/// Validates inputs, wires the GitHub adapter into the run, and executes it.
///
/// The run executes on its own task so that a panic inside it is reported as
/// [`RunError::Unknown`] rather than tearing down the process.
///
/// # Errors
///
/// Configuration errors, client construction errors, and any [`RunError`].
pub async fn execute(args: SlaLabelsArgs) -> anyhow::Result<()> {
    let config = args.into_config()?;
    let client = Arc::new(GithubClient::new(&config.token, &config.api_url)?);

    let run = SlaLabelRun::new(
        client.clone(),
        client,
        config.repository,
        config.required_labels,
    );

    isolated(async move { run.execute(Timestamp::now()).await }).await?;
    Ok(())
}

/// Runs `task` on its own Tokio task, turning a panic into
/// [`RunError::Unknown`].
async fn isolated<F, T>(task: F) -> Result<T, RunError>
where
    F: Future<Output = Result<T, RunError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(result) => result,
        Err(join) if join.is_panic() => Err(RunError::from_panic(&*join.into_panic())),
        Err(join) => Err(RunError::Unknown {
            detail: join.to_string(),
        }),
    }
}
