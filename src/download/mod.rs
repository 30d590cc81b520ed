pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;

use anyhow::Result;
use std::path::PathBuf;

use crate::ui::{Phase, Ui};

/// Make sure a pokedex JSON file is available locally, downloading it into
/// the cache directory if missing (or if `force` is set). Returns the path
/// to the cached dataset.
pub fn ensure_pokedex_downloaded(
    cache_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<PathBuf> {
    ui.set_phase(Phase::Checking);

    let cache = CacheManager::new(cache_dir)?;
    let dest = cache.dataset_path();

    if !force && cache.is_cached() {
        ui.log(format!("Using cached dataset: {:?}", dest));
        return Ok(dest);
    }

    ui.set_phase(Phase::Downloading);
    let client = PokedexClient::new()?;
    client.download_dataset(&dest, ui)?;

    Ok(dest)
}
