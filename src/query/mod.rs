//! Read-only query surface consumed by the presentation layer.
//!
//! All reads are parameterized statements against the persisted schema.
//! SQL failures are recovered locally: the error is logged to stderr and
//! the caller sees an empty result, never a propagated error. Plain absence
//! (unknown name, no predecessor) is an empty result without logging.

mod chain;

pub use chain::ChainLink;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// How many creatures share a type, across the whole database
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCount {
    pub type_name: String,
    pub count: i64,
}

/// Full profile of one creature, as consumed by the dashboard
#[derive(Debug, Clone)]
pub struct PokemonProfile {
    pub num: String,
    pub name: String,
    pub img_url: Option<String>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub spawn_chance: Option<f64>,
    pub avg_spawns: Option<f64>,
    pub spawn_time: Option<String>,
    pub candy: Option<String>,
    pub egg_distance_km: Option<f64>,
    /// Cost of the first outgoing evolution edge; all of a creature's
    /// outgoing edges carry the same cost, so one value suffices
    pub evolution_cost: Option<i64>,
    pub types: Vec<String>,
    pub weaknesses: Vec<String>,
    pub type_distribution: Vec<TypeCount>,
}

pub struct PokedexDb {
    conn: Connection,
}

impl PokedexDb {
    /// Open a database for reading. Connectivity failure here is fatal and
    /// aborts before any query runs.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .context("Database connectivity check failed")?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (used by tests sharing an in-memory db)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Every creature name, in insertion (pokemon_id) order
    pub fn all_names(&self) -> Vec<String> {
        recover("all_names", self.try_all_names())
    }

    /// Full profile for one creature, or None if the name is not stored
    pub fn profile(&self, name: &str) -> Option<PokemonProfile> {
        recover("profile", self.try_profile(name))
    }

    /// Name of the creature with an evolution edge into `name`
    pub fn predecessor_of(&self, name: &str) -> Option<String> {
        recover("predecessor_of", self.try_predecessor_of(name))
    }

    /// Names of the creatures `name` evolves into, in edge insertion order
    pub fn successors_of(&self, name: &str) -> Vec<String> {
        recover("successors_of", self.try_successors_of(name))
    }

    /// Global type counts, most common first
    pub fn type_distribution(&self) -> Vec<TypeCount> {
        recover("type_distribution", self.try_type_distribution())
    }

    fn try_all_names(&self) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name FROM pokemon ORDER BY pokemon_id")?;
        let names = stmt.query_map([], |row| row.get(0))?;
        names.collect()
    }

    fn try_profile(&self, name: &str) -> rusqlite::Result<Option<PokemonProfile>> {
        let core = self
            .conn
            .prepare_cached(
                "SELECT p.num, p.name, p.img_url, p.height_m, p.weight_kg,
                        p.spawn_chance, p.avg_spawns, p.spawn_time,
                        c.name, e.distance_km
                 FROM pokemon p
                 LEFT JOIN candy c ON c.candy_id = p.candy_id
                 LEFT JOIN egg e ON e.egg_id = p.egg_id
                 WHERE p.name = ?1",
            )?
            .query_row([name], |row| {
                Ok(PokemonProfile {
                    num: row.get(0)?,
                    name: row.get(1)?,
                    img_url: row.get(2)?,
                    height_m: row.get(3)?,
                    weight_kg: row.get(4)?,
                    spawn_chance: row.get(5)?,
                    avg_spawns: row.get(6)?,
                    spawn_time: row.get(7)?,
                    candy: row.get(8)?,
                    egg_distance_km: row.get(9)?,
                    evolution_cost: None,
                    types: Vec::new(),
                    weaknesses: Vec::new(),
                    type_distribution: Vec::new(),
                })
            })
            .optional()?;

        let Some(mut profile) = core else {
            return Ok(None);
        };

        profile.types = self.names_for(
            "SELECT t.type_name
             FROM pokemon p
             JOIN pokemon_type pt ON p.pokemon_id = pt.pokemon_id
             JOIN type t ON pt.type_id = t.type_id
             WHERE p.name = ?1",
            name,
        )?;

        profile.weaknesses = self.names_for(
            "SELECT w.weakness_name
             FROM pokemon p
             JOIN pokemon_weakness pw ON p.pokemon_id = pw.pokemon_id
             JOIN weakness w ON pw.weakness_id = w.weakness_id
             WHERE p.name = ?1",
            name,
        )?;

        profile.evolution_cost = self
            .conn
            .prepare_cached(
                "SELECT e.cost
                 FROM pokemon p
                 JOIN evolution e ON p.pokemon_id = e.from_pokemon_id
                 WHERE p.name = ?1
                 LIMIT 1",
            )?
            .query_row([name], |row| row.get(0))
            .optional()?
            .flatten();

        profile.type_distribution = self.try_type_distribution()?;

        Ok(Some(profile))
    }

    fn try_predecessor_of(&self, name: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .prepare_cached(
                "SELECT prev.name
                 FROM pokemon cur
                 JOIN evolution e ON cur.pokemon_id = e.to_pokemon_id
                 JOIN pokemon prev ON e.from_pokemon_id = prev.pokemon_id
                 WHERE cur.name = ?1
                 LIMIT 1",
            )?
            .query_row([name], |row| row.get(0))
            .optional()
    }

    fn try_successors_of(&self, name: &str) -> rusqlite::Result<Vec<String>> {
        self.names_for(
            "SELECT next.name
             FROM pokemon cur
             JOIN evolution e ON cur.pokemon_id = e.from_pokemon_id
             JOIN pokemon next ON e.to_pokemon_id = next.pokemon_id
             WHERE cur.name = ?1
             ORDER BY e.evolution_id",
            name,
        )
    }

    fn try_type_distribution(&self) -> rusqlite::Result<Vec<TypeCount>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT t.type_name, COUNT(pt.pokemon_id) AS type_count
             FROM type t
             JOIN pokemon_type pt ON t.type_id = pt.type_id
             GROUP BY t.type_name
             ORDER BY type_count DESC, t.type_name",
        )?;
        let counts = stmt.query_map([], |row| {
            Ok(TypeCount {
                type_name: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        counts.collect()
    }

    fn names_for(&self, sql: &str, name: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let names = stmt.query_map([name], |row| row.get(0))?;
        names.collect()
    }
}

/// Recover a failed read locally: log it, hand the caller "no data"
fn recover<T: Default>(label: &str, result: rusqlite::Result<T>) -> T {
    result.unwrap_or_else(|err| {
        eprintln!("query {} failed: {}", label, err);
        T::default()
    })
}
