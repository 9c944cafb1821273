//! Headless entry point: print one view of the registry.
//!
//! Usage: `rukun [dashboard|warga|iuran|kematian]` (default `dashboard`).

use anyhow::{Context, Result};

use rukun_desktop::{DesktopConfig, render};
use rukun_store::{ActiveView, FileStorage, RegistryStore};
use rukun_treasury::CurrencyFormat;

fn main() -> Result<()> {
    let config = DesktopConfig::from_env().context("failed to resolve configuration")?;
    rukun_observability::init_with(config.log_format);

    let view = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<ActiveView>()
            .map_err(anyhow::Error::msg)
            .context("expected one of: dashboard, warga, iuran, kematian")?,
        None => ActiveView::default(),
    };

    let storage = FileStorage::open(config.data_dir.clone())
        .with_context(|| format!("failed to open data directory {:?}", config.data_dir))?;
    let store = RegistryStore::open(storage, config.recovery)
        .context("failed to load registry (set RUKUN_RECOVERY=reset to start over)")?;

    tracing::info!(view = view.as_str(), data_dir = %config.data_dir.display(), "rendering view");
    print!("{}", render(view, store.registry(), &CurrencyFormat::rupiah()));

    Ok(())
}
