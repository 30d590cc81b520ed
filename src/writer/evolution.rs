//! Two-pass evolution edge construction.
//!
//! Pass A inserts directed edges between already-loaded creatures; Pass B
//! backfills the candy cost onto every outgoing edge of a creature. Pass B
//! must run only after Pass A has completed for the whole dataset, since a
//! creature's outgoing edges are inserted while iterating that creature's
//! own record, not the records of its successors.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;

use crate::parser::RawPokemon;
use crate::ui::Ui;

/// Pass A: insert a directed edge for every resolvable `next_evolution`
/// entry. A successor code missing from the code->id map is a referential
/// gap in the raw dataset; the edge is skipped and logged, never inserted
/// half-formed. Returns the number of edges inserted.
pub fn link_evolutions(
    conn: &Connection,
    by_num: &HashMap<String, i64>,
    records: &[RawPokemon],
    ui: &mut impl Ui,
) -> Result<u64> {
    let mut stmt = conn
        .prepare("INSERT INTO evolution (from_pokemon_id, to_pokemon_id) VALUES (?1, ?2)")
        .context("Failed to prepare evolution insert")?;

    let mut edges: u64 = 0;

    for record in records {
        let Some(&from_id) = by_num.get(&record.num) else {
            continue;
        };

        for next in &record.next_evolution {
            match by_num.get(&next.num) {
                Some(&to_id) => {
                    stmt.execute(params![from_id, to_id]).with_context(|| {
                        format!("Failed to insert edge {} -> {}", record.num, next.num)
                    })?;
                    edges += 1;
                }
                None => {
                    ui.log(format!(
                        "{}: successor #{} ({}) not in dataset, skipping edge",
                        record.name, next.num, next.name
                    ));
                }
            }
        }
    }

    Ok(edges)
}

/// Pass B: for each creature that declares a candy count and lists next
/// evolutions, apply that count as the cost of every outgoing edge. The
/// dataset carries a single cost per creature stage, so branching
/// evolutions all receive the same value. Last write wins, which makes the
/// pass idempotent. Returns the number of edge rows updated.
pub fn backfill_costs(
    conn: &Connection,
    by_num: &HashMap<String, i64>,
    records: &[RawPokemon],
) -> Result<u64> {
    let mut stmt = conn
        .prepare("UPDATE evolution SET cost = ?1 WHERE from_pokemon_id = ?2")
        .context("Failed to prepare cost backfill")?;

    let mut updated: u64 = 0;

    for record in records {
        let Some(cost) = record.candy_count else {
            continue;
        };
        if record.next_evolution.is_empty() {
            continue;
        }
        let Some(&from_id) = by_num.get(&record.num) else {
            continue;
        };

        let rows = stmt
            .execute(params![cost, from_id])
            .with_context(|| format!("Failed to backfill cost for {}", record.name))?;
        updated += rows as u64;
    }

    Ok(updated)
}
