use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// Run-scoped dedup maps for the shared lookup entities.
///
/// Each map covers one entity kind and guarantees that a dedup key (candy
/// name, egg distance, type name, weakness name) resolves to exactly one
/// surrogate id for the lifetime of an ingestion run. Rows are inserted on
/// first sight only. The maps are in-memory and single-writer; a `Lookups`
/// value is created per run and threaded through the pipeline explicitly.
#[derive(Debug, Default)]
pub struct Lookups {
    candy_by_name: HashMap<String, i64>,
    /// Keyed by tenths of a km so exact distances stay hashable
    egg_by_distance: HashMap<i64, i64>,
    type_by_name: HashMap<String, i64>,
    weakness_by_name: HashMap<String, i64>,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a candy name to its surrogate id, inserting on first sight.
    /// The candy_count of the first record to mention the candy is stored
    /// with it.
    pub fn candy_id(&mut self, conn: &Connection, name: &str, count: Option<i64>) -> Result<i64> {
        if let Some(&id) = self.candy_by_name.get(name) {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO candy (name, candy_count) VALUES (?1, ?2)",
            params![name, count],
        )
        .with_context(|| format!("Failed to insert candy: {}", name))?;

        let id = conn.last_insert_rowid();
        self.candy_by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolve an egg hatching distance to its surrogate id
    pub fn egg_id(&mut self, conn: &Connection, distance_km: f64) -> Result<i64> {
        let key = (distance_km * 10.0).round() as i64;
        if let Some(&id) = self.egg_by_distance.get(&key) {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO egg (distance_km) VALUES (?1)",
            params![distance_km],
        )
        .with_context(|| format!("Failed to insert egg distance: {}", distance_km))?;

        let id = conn.last_insert_rowid();
        self.egg_by_distance.insert(key, id);
        Ok(id)
    }

    /// Resolve a type name to its surrogate id
    pub fn type_id(&mut self, conn: &Connection, name: &str) -> Result<i64> {
        Self::named_id(
            &mut self.type_by_name,
            conn,
            "INSERT INTO type (type_name) VALUES (?1)",
            name,
        )
    }

    /// Resolve a weakness name to its surrogate id
    pub fn weakness_id(&mut self, conn: &Connection, name: &str) -> Result<i64> {
        Self::named_id(
            &mut self.weakness_by_name,
            conn,
            "INSERT INTO weakness (weakness_name) VALUES (?1)",
            name,
        )
    }

    fn named_id(
        map: &mut HashMap<String, i64>,
        conn: &Connection,
        insert_sql: &str,
        name: &str,
    ) -> Result<i64> {
        if let Some(&id) = map.get(name) {
            return Ok(id);
        }

        conn.execute(insert_sql, params![name])
            .with_context(|| format!("Failed to insert lookup value: {}", name))?;

        let id = conn.last_insert_rowid();
        map.insert(name.to_string(), id);
        Ok(id)
    }

    /// Distinct lookup rows created this run: (candies, eggs, types, weaknesses)
    pub fn counts(&self) -> (u64, u64, u64, u64) {
        (
            self.candy_by_name.len() as u64,
            self.egg_by_distance.len() as u64,
            self.type_by_name.len() as u64,
            self.weakness_by_name.len() as u64,
        )
    }
}
