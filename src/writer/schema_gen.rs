use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut lines = Vec::new();

    // A single-column integer key becomes a rowid alias so inserts get
    // generated ids via last_insert_rowid()
    let surrogate_key = match schema.primary_key {
        [single] => {
            let col = schema.columns.iter().find(|c| c.name == *single);
            col.is_some_and(|c| c.col_type == ColumnType::Integer)
                .then_some(*single)
        }
        _ => None,
    };

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        };

        let pk = if surrogate_key == Some(col.name) {
            " PRIMARY KEY"
        } else {
            ""
        };
        let null_constraint = if !col.nullable && pk.is_empty() {
            " NOT NULL"
        } else {
            ""
        };
        let unique = if col.unique { " UNIQUE" } else { "" };

        lines.push(format!(
            "    {} {}{}{}{}",
            col.name, sql_type, pk, null_constraint, unique
        ));
    }

    // Composite keys (junction tables) get an explicit PRIMARY KEY clause
    if surrogate_key.is_none() && !schema.primary_key.is_empty() {
        lines.push(format!(
            "    PRIMARY KEY ({})",
            schema.primary_key.join(", ")
        ));
    }

    for fk in schema.foreign_keys {
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&lines.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements: one per foreign key column, plus any
/// explicit index definitions on the schema
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    let fk_indexes = schema.foreign_keys.iter().map(|fk| {
        format!(
            "CREATE INDEX idx_{}_{} ON {}({})",
            schema.name, fk.column, schema.name, fk.column
        )
    });

    let explicit_indexes = schema.indexes.iter().map(|index| {
        format!(
            "CREATE INDEX idx_{}_{} ON {}({})",
            schema.name,
            index.columns.join("_"),
            schema.name,
            index.columns.join(", ")
        )
    });

    fk_indexes.chain(explicit_indexes).collect()
}

/// Generate DROP TABLE SQL for a table schema
pub fn generate_drop_table(schema: &TableSchema) -> String {
    format!("DROP TABLE IF EXISTS {}", schema.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{EVOLUTION, POKEMON, POKEMON_TYPE};

    #[test]
    fn test_generate_create_table_surrogate_key() {
        let sql = generate_create_table(&POKEMON);
        assert!(sql.contains("CREATE TABLE pokemon"));
        assert!(sql.contains("pokemon_id INTEGER PRIMARY KEY"));
        assert!(sql.contains("name TEXT NOT NULL"));
        assert!(sql.contains("FOREIGN KEY (candy_id) REFERENCES candy(candy_id)"));
        assert!(sql.contains("FOREIGN KEY (egg_id) REFERENCES egg(egg_id)"));
    }

    #[test]
    fn test_generate_create_table_composite_key() {
        let sql = generate_create_table(&POKEMON_TYPE);
        assert!(sql.contains("PRIMARY KEY (pokemon_id, type_id)"));
        // Junction columns must not individually claim the rowid
        assert!(!sql.contains("INTEGER PRIMARY KEY"));
    }

    #[test]
    fn test_generate_create_table_nullable_cost() {
        let sql = generate_create_table(&EVOLUTION);
        assert!(sql.contains("cost INTEGER"));
        assert!(!sql.contains("cost INTEGER NOT NULL"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&POKEMON);
        assert!(indexes.iter().any(|i| i.contains("idx_pokemon_candy_id")));
        assert!(indexes.iter().any(|i| i.contains("idx_pokemon_egg_id")));
        assert!(indexes.iter().any(|i| i.contains("idx_pokemon_name")));
    }

    #[test]
    fn test_generate_drop_table() {
        assert_eq!(
            generate_drop_table(&POKEMON),
            "DROP TABLE IF EXISTS pokemon"
        );
    }
}
