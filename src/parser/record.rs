use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level shape of the pokedex JSON document
#[derive(Debug, Deserialize)]
pub struct RawDataset {
    pub pokemon: Vec<RawPokemon>,
}

/// One raw creature record as it appears in the dataset.
///
/// Free-text fields (`height`, `weight`, `egg`) carry unit suffixes and are
/// parsed by `fields` during ingestion; they are kept verbatim here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemon {
    /// Zero-padded dex code, e.g. "001" - unique within the dataset
    pub num: String,
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
    /// e.g. "0.71 m"
    pub height: String,
    /// e.g. "6.9 kg"
    pub weight: String,
    #[serde(default)]
    pub candy: Option<String>,
    #[serde(default)]
    pub candy_count: Option<i64>,
    /// e.g. "2 km", or "Not in Eggs"
    #[serde(default)]
    pub egg: Option<String>,
    #[serde(default)]
    pub spawn_chance: Option<f64>,
    #[serde(default)]
    pub avg_spawns: Option<f64>,
    #[serde(default)]
    pub spawn_time: Option<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub next_evolution: Vec<RawEvolution>,
}

/// A successor reference inside a `next_evolution` list
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvolution {
    pub num: String,
    pub name: String,
}

/// Parse a pokedex JSON document
pub fn parse_dataset(json: &str) -> Result<Vec<RawPokemon>> {
    let dataset: RawDataset = serde_json::from_str(json).context("Failed to parse pokedex JSON")?;
    Ok(dataset.pokemon)
}

/// Read and parse a pokedex JSON file
pub fn load_dataset(path: &Path) -> Result<Vec<RawPokemon>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {:?}", path))?;
    parse_dataset(&json)
}
