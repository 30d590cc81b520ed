//! Table schema definitions for the normalized pokedex database
//!
//! `ALL_TABLES` lists tables in FK dependency order: lookup entities first,
//! then the pokemon table that references them, then junctions and edges.
//! Dropping in reverse order never violates a foreign key.

use super::types::*;

// =============================================================================
// Lookup Entities (deduplicated during ingestion)
// =============================================================================

pub static CANDY: TableSchema = TableSchema {
    name: "candy",
    columns: &[
        Column::required("candy_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("candy_count", ColumnType::Integer),
    ],
    primary_key: &["candy_id"],
    foreign_keys: &[],
    indexes: &[],
};

pub static EGG: TableSchema = TableSchema {
    name: "egg",
    columns: &[
        Column::required("egg_id", ColumnType::Integer),
        Column::required("distance_km", ColumnType::Real),
    ],
    primary_key: &["egg_id"],
    foreign_keys: &[],
    indexes: &[],
};

pub static TYPE: TableSchema = TableSchema {
    name: "type",
    columns: &[
        Column::required("type_id", ColumnType::Integer),
        Column::required("type_name", ColumnType::Text).unique(),
    ],
    primary_key: &["type_id"],
    foreign_keys: &[],
    indexes: &[],
};

pub static WEAKNESS: TableSchema = TableSchema {
    name: "weakness",
    columns: &[
        Column::required("weakness_id", ColumnType::Integer),
        Column::required("weakness_name", ColumnType::Text).unique(),
    ],
    primary_key: &["weakness_id"],
    foreign_keys: &[],
    indexes: &[],
};

// =============================================================================
// Creatures
// =============================================================================

pub static POKEMON: TableSchema = TableSchema {
    name: "pokemon",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::new("num", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::new("img_url", ColumnType::Text),
        Column::new("height_m", ColumnType::Real),
        Column::new("weight_kg", ColumnType::Real),
        Column::new("spawn_chance", ColumnType::Real),
        Column::new("avg_spawns", ColumnType::Real),
        Column::new("spawn_time", ColumnType::Text),
        Column::new("candy_id", ColumnType::Integer),
        Column::new("egg_id", ColumnType::Integer),
    ],
    primary_key: &["pokemon_id"],
    foreign_keys: &[
        ForeignKey::new("candy_id", "candy", "candy_id"),
        ForeignKey::new("egg_id", "egg", "egg_id"),
    ],
    // Name-keyed lookups are the dashboard's access path
    indexes: &[Index::on(&["name"])],
};

// =============================================================================
// Junctions and Edges
// =============================================================================

pub static POKEMON_TYPE: TableSchema = TableSchema {
    name: "pokemon_type",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("type_id", ColumnType::Integer),
    ],
    primary_key: &["pokemon_id", "type_id"],
    foreign_keys: &[
        ForeignKey::new("pokemon_id", "pokemon", "pokemon_id"),
        ForeignKey::new("type_id", "type", "type_id"),
    ],
    indexes: &[],
};

pub static POKEMON_WEAKNESS: TableSchema = TableSchema {
    name: "pokemon_weakness",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("weakness_id", ColumnType::Integer),
    ],
    primary_key: &["pokemon_id", "weakness_id"],
    foreign_keys: &[
        ForeignKey::new("pokemon_id", "pokemon", "pokemon_id"),
        ForeignKey::new("weakness_id", "weakness", "weakness_id"),
    ],
    indexes: &[],
};

pub static EVOLUTION: TableSchema = TableSchema {
    name: "evolution",
    columns: &[
        Column::required("evolution_id", ColumnType::Integer),
        Column::required("from_pokemon_id", ColumnType::Integer),
        Column::required("to_pokemon_id", ColumnType::Integer),
        Column::new("cost", ColumnType::Integer),
    ],
    primary_key: &["evolution_id"],
    foreign_keys: &[
        ForeignKey::new("from_pokemon_id", "pokemon", "pokemon_id"),
        ForeignKey::new("to_pokemon_id", "pokemon", "pokemon_id"),
    ],
    indexes: &[],
};

/// All tables in FK dependency order (parents before children)
pub static ALL_TABLES: &[&TableSchema] = &[
    &CANDY,
    &EGG,
    &TYPE,
    &WEAKNESS,
    &POKEMON,
    &POKEMON_TYPE,
    &POKEMON_WEAKNESS,
    &EVOLUTION,
];

/// Look up a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// All table names, in creation order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
