//! image-dims - print image dimensions read from container headers.
//!
//! This binary expands its arguments into files and probes them on a pool of
//! blocking workers, printing results in the order the files were found.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_dims::{collect_files, probe_path, Config, DetectError, ImageInfo, OutputFormat};

type ProbeResult = Result<ImageInfo, DetectError>;

/// A file queued for reporting, in discovery order.
enum Pending {
    /// The directory walk failed before a file could be probed.
    Walk(DetectError),
    Probe(PathBuf, JoinHandle<ProbeResult>),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: String,
    #[serde(flatten)]
    info: Option<&'a ImageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let files = collect_files(&config.paths, config.follow_links);
    debug!(files = files.len(), jobs = config.jobs, "Probing files");

    let (tx, mut rx) = mpsc::channel::<Pending>(config.jobs);
    let permits = Arc::new(Semaphore::new(config.jobs));

    let producer = tokio::spawn(async move {
        for file in files {
            let pending = match file {
                Err(e) => Pending::Walk(e),
                Ok(path) => {
                    let Ok(permit) = permits.clone().acquire_owned().await else {
                        break;
                    };
                    let target = path.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        let _permit = permit;
                        probe_path(&target)
                    });
                    Pending::Probe(path, handle)
                }
            };

            if tx.send(pending).await.is_err() {
                break;
            }
        }
    });

    let mut failures = 0usize;
    while let Some(pending) = rx.recv().await {
        let (path, result) = match pending {
            Pending::Walk(e) => (e.path.clone(), Err(e)),
            Pending::Probe(path, handle) => {
                let path = path.display().to_string();
                let result = handle
                    .await
                    .unwrap_or_else(|e| Err(DetectError::unreadable(&path, e.to_string())));
                (path, result)
            }
        };

        if result.is_err() {
            failures += 1;
        }
        report(config.output, &path, &result);
    }

    if let Err(e) = producer.await {
        error!("File producer failed: {}", e);
        return ExitCode::FAILURE;
    }

    if failures > 0 {
        debug!(failures, "Some files could not be probed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Write one result line.
fn report(output: OutputFormat, path: &str, result: &ProbeResult) {
    match output {
        OutputFormat::Text => match result {
            Ok(info) => println!(
                "{} {} {}",
                path, info.dimensions.width, info.dimensions.height
            ),
            Err(e) => eprintln!("*** error: {} {}", path, e),
        },
        OutputFormat::Json => {
            let line = JsonReport {
                path: path.to_string(),
                info: result.as_ref().ok(),
                error: result.as_ref().err().map(ToString::to_string),
            };
            match serde_json::to_string(&line) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize result for {}: {}", path, e),
            }
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "image_dims=debug"
    } else {
        "image_dims=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
