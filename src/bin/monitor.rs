use std::io::Write;

use anyhow::Context;

use tmd2771::{report, session};

static BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");
static RUSTC_VERSION: &str = env!("VERGEN_RUSTC_SEMVER");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!(
        "Monitor starting. Built on {} with Rustc {}.",
        &BUILD_TIMESTAMP,
        &RUSTC_VERSION
    );

    let config = session::SessionConfig::default();
    log::info!("Polling every {:?}", config.poll_interval);
    let mut session = session::open(config)?;

    let stdout = std::io::stdout();
    session
        .monitor(None, |result| {
            let mut out = stdout.lock();
            let written = match result {
                Ok(measurement) => report::emit(&mut out, &measurement),
                Err(e) => {
                    log::error!("TMD2771 read failed: {e}");
                    out.write_all(report::ERROR_REPORT.as_bytes())
                        .and_then(|_| out.flush())
                }
            };
            if let Err(e) = written {
                log::error!("Failed to write report: {e}");
            }
        })
        .context("TMD2771 bring-up failed")?;
    Ok(())
}
