//! Walks through the fetch patterns against a live API and prints one
//! labelled line per result.
//!
//! Usage: `fetch-demo [handle...]`. Point it at the mock server with
//! `FETCH_BASE_URL=http://127.0.0.1:3000`.

use std::time::{Duration, Instant};

use fetch_core::sequence::delayed;
use fetch_core::{Config, FetchOutcome, FetchResult, GitHubClient, User};
use futures::StreamExt;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_HANDLES: [&str; 2] = ["octocat", "idonotexist22222"];

fn describe(result: &FetchResult<User>) -> String {
    match result {
        Ok(user) => user.name.clone().unwrap_or_else(|| user.login.clone()),
        Err(err) => format!("error: {err}"),
    }
}

fn print_outcomes(label: &str, outcomes: &[FetchOutcome<User>], elapsed: Duration) {
    for outcome in outcomes {
        println!("::{label}::{}::{}", outcome.id, describe(&outcome.result));
    }
    println!("::{label}::took {elapsed:?}");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config = Config::from_env()?;
    let client = GitHubClient::from_config(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let handles: Vec<String> = if args.is_empty() {
        DEFAULT_HANDLES.iter().map(|h| h.to_string()).collect()
    } else {
        args
    };
    let first = handles[0].as_str();

    let single = client.users().fetch(first).await?;
    println!("::single::{first}::{}", describe(&single));

    let orchestrator = client.user_orchestrator();

    let start = Instant::now();
    let outcomes = orchestrator.run_sequential(handles.as_slice()).await?;
    print_outcomes("sequential", &outcomes, start.elapsed());

    let start = Instant::now();
    let outcomes = orchestrator.run_concurrent(handles.as_slice()).await?;
    print_outcomes("concurrent", &outcomes, start.elapsed());

    let mut lazy = Box::pin(orchestrator.stream_sequential(handles.as_slice())?);
    while let Some(outcome) = lazy.next().await {
        println!("::stream::{}::{}", outcome.id, describe(&outcome.result));
    }

    for (label, both) in [
        ("user+repos sequential", client.user_and_repos_sequential(first).await?),
        ("user+repos concurrent", client.user_and_repos_concurrent(first).await?),
    ] {
        let repos = match &both.repos {
            Ok(repos) => repos.len().to_string(),
            Err(err) => format!("error: {err}"),
        };
        println!("::{label}::{}::repos={repos}", describe(&both.user));
    }

    let mut ticks = Box::pin(delayed(1..=3, Duration::from_secs(1)));
    while let Some(tick) = ticks.next().await {
        println!("::delayed::{tick}");
    }

    Ok(())
}
