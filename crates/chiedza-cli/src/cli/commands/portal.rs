//! Interactive portal.

use anyhow::Result;
use chiedza_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, demo: bool) -> Result<()> {
    chiedza_tui::run_portal(config, demo).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _demo: bool) -> Result<()> {
    anyhow::bail!("The portal is not available in this build (compiled without the `tui` feature)")
}
