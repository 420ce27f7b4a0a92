//! Full-screen TUI for the mediq client.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use mediq_core::api::ApiClient;
use mediq_core::session::SessionStore;
pub use runtime::TuiRuntime;

/// Runs the interactive auth flow.
pub async fn run(base_url: &str, store: SessionStore) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive interface requires a terminal.\n\
             Use `mediq whoami` or `mediq logout` for non-interactive use."
        );
    }

    let client = ApiClient::new(base_url, store.clone());
    let mut runtime = TuiRuntime::new(client, store)?;
    runtime.run()
}
