//! Full-screen staff portal for Chiedza MIS.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use chiedza_core::config::Config;
pub use runtime::PortalRuntime;

/// Runs the portal until the user quits. With `demo`, the login screen is
/// skipped and every section shows fixture data.
pub async fn run_portal(config: &Config, demo: bool) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The portal requires a terminal.\n\
             Use `chiedza report ...` for non-interactive output."
        );
    }

    let mut runtime = PortalRuntime::new(config)?;
    runtime.run(demo)?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
