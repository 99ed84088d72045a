use anyhow::Context;

use tmd2771::{report, session};

static BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");
static RUSTC_VERSION: &str = env!("VERGEN_RUSTC_SEMVER");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!(
        "Basic init done. Built on {} with Rustc {}.",
        &BUILD_TIMESTAMP,
        &RUSTC_VERSION
    );

    let mut session = session::open(session::SessionConfig::default())?;
    session.configure().context("TMD2771 bring-up failed")?;
    session.settle();
    let measurement = session.sample().context("TMD2771 data read failed")?;
    drop(session);

    report::emit(&mut std::io::stdout().lock(), &measurement)
        .context("failed to write report")?;
    Ok(())
}
