use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::Path;

use crate::ui::Ui;

const POKEDEX_URL: &str =
    "https://raw.githubusercontent.com/Biuni/PokemonGO-Pokedex/master/pokedex.json";

pub struct PokedexClient {
    client: Client,
}

impl PokedexClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("pokedex-to-sqlite")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Download the pokedex JSON document to the given path
    pub fn download_dataset(&self, dest: &Path, ui: &mut impl Ui) -> Result<()> {
        let response = self
            .client
            .get(POKEDEX_URL)
            .send()
            .context("Failed to start download")?
            .error_for_status()
            .context("Dataset request was rejected")?;

        let total_size = response.content_length().unwrap_or(0);

        let mut file = std::fs::File::create(dest).context("Failed to create destination file")?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];
        let mut reader = response;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .context("Failed to read from response")?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .context("Failed to write to file")?;

            downloaded += bytes_read as u64;
            ui.set_progress(downloaded, total_size, format_bytes(downloaded, total_size));
        }

        ui.clear_progress();
        ui.log("Download complete");
        Ok(())
    }
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    format!("{} / {}", fmt(current), fmt(total))
}
