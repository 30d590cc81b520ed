use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

use super::evolution::{backfill_costs, link_evolutions};
use super::lookups::Lookups;
use super::schema_gen::{generate_create_table, generate_drop_table, generate_indexes};
use crate::parser::{fields, RawPokemon};
use crate::schema::ALL_TABLES;
use crate::ui::{Phase, Ui};

/// Counts reported by a completed ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub pokemon: u64,
    pub candies: u64,
    pub eggs: u64,
    pub types: u64,
    pub weaknesses: u64,
    pub edges: u64,
    pub backfilled: u64,
}

pub struct PokedexWriter {
    conn: Connection,
}

impl PokedexWriter {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open database")?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // Enable foreign keys and optimize for bulk insert
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Hand the underlying connection to a reader
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Drop (if present) and recreate all tables. Junctions and edges are
    /// dropped before the entities they reference; entities are created
    /// before junctions. Safe to call repeatedly.
    pub fn reset_schema(&self) -> Result<()> {
        for schema in ALL_TABLES.iter().rev() {
            self.conn
                .execute(&generate_drop_table(schema), [])
                .with_context(|| format!("Failed to drop table: {}", schema.name))?;
        }

        for schema in ALL_TABLES {
            self.conn
                .execute(&generate_create_table(schema), [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Run the full three-pass ingestion inside one transaction:
    /// load creatures (building the code->id map), link evolution edges,
    /// backfill edge costs. A failure in any pass rolls everything back.
    pub fn ingest(&mut self, records: &[RawPokemon], ui: &mut impl Ui) -> Result<IngestStats> {
        let tx = self.conn.transaction()?;

        let mut lookups = Lookups::new();
        let mut by_num: HashMap<String, i64> = HashMap::new();

        ui.set_phase(Phase::Loading);
        for (i, record) in records.iter().enumerate() {
            let id = load_pokemon(&tx, &mut lookups, record)?;
            by_num.insert(record.num.clone(), id);
            ui.set_progress(i as u64 + 1, records.len() as u64, record.name.clone());
        }
        ui.clear_progress();

        ui.set_phase(Phase::Linking);
        let edges = link_evolutions(&tx, &by_num, records, ui)?;
        let backfilled = backfill_costs(&tx, &by_num, records)?;

        tx.commit().context("Failed to commit ingestion")?;

        let (candies, eggs, types, weaknesses) = lookups.counts();
        Ok(IngestStats {
            pokemon: records.len() as u64,
            candies,
            eggs,
            types,
            weaknesses,
            edges,
            backfilled,
        })
    }

    /// Finalize the database (VACUUM, etc.)
    pub fn finalize(self) -> Result<()> {
        self.conn.execute("PRAGMA optimize;", [])?;
        Ok(())
    }
}

/// Insert one creature row plus its type and weakness junction rows,
/// resolving candy and egg foreign keys through the dedup maps. Returns the
/// generated pokemon id.
///
/// Height and weight are free text with unit suffixes; a record whose
/// leading token does not parse fails the run, since silently skipping a
/// creature would break every evolution edge that references it. Eggs are
/// softer: no recognizable "X km" pattern just means no egg.
pub fn load_pokemon(conn: &Connection, lookups: &mut Lookups, record: &RawPokemon) -> Result<i64> {
    let height_m = fields::leading_number(&record.height)
        .with_context(|| format!("{}: unparseable height {:?}", record.name, record.height))?;
    let weight_kg = fields::leading_number(&record.weight)
        .with_context(|| format!("{}: unparseable weight {:?}", record.name, record.weight))?;

    let candy_id = match record.candy.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => Some(lookups.candy_id(conn, name, record.candy_count)?),
        None => None,
    };

    let egg_id = match record.egg.as_deref().and_then(fields::parse_egg_distance) {
        Some(distance) => Some(lookups.egg_id(conn, distance)?),
        None => None,
    };

    conn.execute(
        "INSERT INTO pokemon
            (num, name, img_url, height_m, weight_kg,
             spawn_chance, avg_spawns, spawn_time, candy_id, egg_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.num,
            record.name,
            record.img,
            height_m,
            weight_kg,
            record.spawn_chance,
            record.avg_spawns,
            record.spawn_time,
            candy_id,
            egg_id,
        ],
    )
    .with_context(|| format!("Failed to insert pokemon: {}", record.name))?;

    let pokemon_id = conn.last_insert_rowid();

    for type_name in &record.types {
        if type_name.is_empty() {
            continue;
        }
        let type_id = lookups.type_id(conn, type_name)?;
        conn.execute(
            "INSERT INTO pokemon_type (pokemon_id, type_id) VALUES (?1, ?2)",
            params![pokemon_id, type_id],
        )
        .with_context(|| format!("Failed to link type {} for {}", type_name, record.name))?;
    }

    for weakness_name in &record.weaknesses {
        if weakness_name.is_empty() {
            continue;
        }
        let weakness_id = lookups.weakness_id(conn, weakness_name)?;
        conn.execute(
            "INSERT INTO pokemon_weakness (pokemon_id, weakness_id) VALUES (?1, ?2)",
            params![pokemon_id, weakness_id],
        )
        .with_context(|| {
            format!("Failed to link weakness {} for {}", weakness_name, record.name)
        })?;
    }

    Ok(pokemon_id)
}

/// Reset the schema and ingest a parsed dataset into a database file
pub fn ingest_to_sqlite(
    records: &[RawPokemon],
    output_db: &Path,
    ui: &mut impl Ui,
) -> Result<IngestStats> {
    let mut writer = PokedexWriter::open(output_db)?;
    writer.reset_schema()?;
    let stats = writer.ingest(records, ui)?;
    writer.finalize()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawEvolution;
    use crate::ui::SilentUi;

    fn record(num: &str, name: &str) -> RawPokemon {
        RawPokemon {
            num: num.to_string(),
            name: name.to_string(),
            img: Some(format!("http://example.net/{}.png", num)),
            height: "0.71 m".to_string(),
            weight: "6.9 kg".to_string(),
            candy: Some("Bulbasaur Candy".to_string()),
            candy_count: Some(25),
            egg: Some("2 km".to_string()),
            spawn_chance: Some(0.69),
            avg_spawns: Some(69.0),
            spawn_time: Some("20:00".to_string()),
            types: vec!["Grass".to_string(), "Poison".to_string()],
            weaknesses: vec!["Fire".to_string(), "Ice".to_string()],
            next_evolution: vec![],
        }
    }

    #[test]
    fn test_reset_schema_is_idempotent() {
        let writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();
        writer.reset_schema().unwrap();

        let tables: i64 = writer
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 8);
    }

    #[test]
    fn test_load_pokemon_parses_free_text_fields() {
        let writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();

        let mut lookups = Lookups::new();
        let id = load_pokemon(writer.connection(), &mut lookups, &record("001", "Bulbasaur"))
            .unwrap();

        let (height, weight, egg_id): (f64, f64, Option<i64>) = writer
            .connection()
            .query_row(
                "SELECT height_m, weight_kg, egg_id FROM pokemon WHERE pokemon_id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        assert!((height - 0.71).abs() < 1e-9);
        assert!((weight - 6.9).abs() < 1e-9);
        assert!(egg_id.is_some());
    }

    #[test]
    fn test_load_pokemon_no_egg_means_null_fk() {
        let writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();

        let mut lookups = Lookups::new();
        let mut raw = record("026", "Raichu");
        raw.egg = Some("Not in Eggs".to_string());

        let id = load_pokemon(writer.connection(), &mut lookups, &raw).unwrap();

        let egg_id: Option<i64> = writer
            .connection()
            .query_row(
                "SELECT egg_id FROM pokemon WHERE pokemon_id = ?1",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(egg_id, None);

        let eggs: i64 = writer
            .connection()
            .query_row("SELECT COUNT(*) FROM egg", [], |row| row.get(0))
            .unwrap();
        assert_eq!(eggs, 0);
    }

    #[test]
    fn test_load_pokemon_rejects_unparseable_height() {
        let writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();

        let mut lookups = Lookups::new();
        let mut raw = record("001", "Bulbasaur");
        raw.height = "tall".to_string();

        assert!(load_pokemon(writer.connection(), &mut lookups, &raw).is_err());
    }

    #[test]
    fn test_ingest_rolls_back_on_failure() {
        let mut writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();

        let good = record("001", "Bulbasaur");
        let mut bad = record("002", "Ivysaur");
        bad.weight = "heavy".to_string();

        let result = writer.ingest(&[good, bad], &mut SilentUi);
        assert!(result.is_err());

        let rows: i64 = writer
            .connection()
            .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_ingest_stats() {
        let mut writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();

        let mut bulbasaur = record("001", "Bulbasaur");
        bulbasaur.next_evolution = vec![RawEvolution {
            num: "002".to_string(),
            name: "Ivysaur".to_string(),
        }];
        let mut ivysaur = record("002", "Ivysaur");
        ivysaur.candy_count = Some(100);

        let stats = writer.ingest(&[bulbasaur, ivysaur], &mut SilentUi).unwrap();

        assert_eq!(stats.pokemon, 2);
        assert_eq!(stats.candies, 1);
        assert_eq!(stats.eggs, 1);
        assert_eq!(stats.types, 2);
        assert_eq!(stats.weaknesses, 2);
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.backfilled, 1);
    }
}
