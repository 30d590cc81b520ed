//! Evolution chain traversal.
//!
//! A chain is resolved in two steps: walk "has predecessor" edges upward
//! until the root ancestor, then breadth-first walk outgoing edges downward
//! from the root. Both directions carry a visited set, so malformed cyclic
//! or convergent data terminates instead of looping, and each member is
//! emitted at most once.

use rusqlite::OptionalExtension;
use std::collections::{HashSet, VecDeque};

use super::PokedexDb;

/// One member of an evolution chain, in discovery order
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    pub name: String,
    pub num: String,
    pub img_url: Option<String>,
    /// Whether this member is the creature the chain was queried for
    pub is_queried: bool,
}

impl PokedexDb {
    /// Resolve the full evolution chain containing `start_name`.
    ///
    /// Output ordering is breadth-first discovery order from the root, not
    /// stage order; on a clean tree these coincide. An unknown name yields
    /// an empty chain; a creature with no edges yields a chain of itself.
    pub fn evolution_chain(&self, start_name: &str) -> Vec<ChainLink> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut root = start_name.to_string();
        let mut current = start_name.to_string();

        loop {
            match self.predecessor_of(&current) {
                Some(prev) if !seen.contains(&prev) => {
                    seen.insert(prev.clone());
                    root = prev.clone();
                    current = prev;
                }
                // No predecessor, or a repeat: the chain root is resolved
                _ => break,
            }
        }

        let mut chain = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(root);

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }

            let Some((num, img_url)) = self.display_row(&name) else {
                continue;
            };

            for next in self.successors_of(&name) {
                queue.push_back(next);
            }

            chain.push(ChainLink {
                is_queried: name == start_name,
                name,
                num,
                img_url,
            });
        }

        chain
    }

    fn display_row(&self, name: &str) -> Option<(String, Option<String>)> {
        super::recover("chain_display", self.try_display_row(name))
    }

    fn try_display_row(
        &self,
        name: &str,
    ) -> rusqlite::Result<Option<(String, Option<String>)>> {
        self.conn
            .prepare_cached("SELECT num, img_url FROM pokemon WHERE name = ?1 LIMIT 1")?
            .query_row([name], |row| {
                let num: Option<String> = row.get(0)?;
                Ok((num.unwrap_or_default(), row.get(1)?))
            })
            .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RawEvolution, RawPokemon};
    use crate::ui::SilentUi;
    use crate::writer::PokedexWriter;

    fn raw(num: &str, name: &str, next: &[(&str, &str)]) -> RawPokemon {
        RawPokemon {
            num: num.to_string(),
            name: name.to_string(),
            img: Some(format!("http://example.net/{}.png", num)),
            height: "1.0 m".to_string(),
            weight: "10.0 kg".to_string(),
            candy: None,
            candy_count: None,
            egg: None,
            spawn_chance: None,
            avg_spawns: None,
            spawn_time: None,
            types: vec!["Normal".to_string()],
            weaknesses: vec![],
            next_evolution: next
                .iter()
                .map(|(n, name)| RawEvolution {
                    num: n.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn db_with(records: &[RawPokemon]) -> PokedexDb {
        let mut writer = PokedexWriter::open_in_memory().unwrap();
        writer.reset_schema().unwrap();
        writer.ingest(records, &mut SilentUi).unwrap();
        PokedexDb::from_connection(writer.into_connection())
    }

    fn names(chain: &[ChainLink]) -> Vec<&str> {
        chain.iter().map(|link| link.name.as_str()).collect()
    }

    #[test]
    fn test_linear_chain_from_middle() {
        let db = db_with(&[
            raw("001", "Bulbasaur", &[("002", "Ivysaur")]),
            raw("002", "Ivysaur", &[("003", "Venusaur")]),
            raw("003", "Venusaur", &[]),
        ]);

        let chain = db.evolution_chain("Ivysaur");
        assert_eq!(names(&chain), vec!["Bulbasaur", "Ivysaur", "Venusaur"]);

        let flagged: Vec<&str> = chain
            .iter()
            .filter(|link| link.is_queried)
            .map(|link| link.name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Ivysaur"]);
    }

    #[test]
    fn test_isolated_creature_is_its_own_chain() {
        let db = db_with(&[raw("083", "Farfetch'd", &[])]);

        let chain = db.evolution_chain("Farfetch'd");
        assert_eq!(names(&chain), vec!["Farfetch'd"]);
        assert!(chain[0].is_queried);
    }

    #[test]
    fn test_unknown_name_yields_empty_chain() {
        let db = db_with(&[raw("025", "Pikachu", &[])]);
        assert!(db.evolution_chain("Mewtwo").is_empty());
    }

    #[test]
    fn test_branching_chain_root_first() {
        let db = db_with(&[
            raw(
                "133",
                "Eevee",
                &[("134", "Vaporeon"), ("135", "Jolteon")],
            ),
            raw("134", "Vaporeon", &[]),
            raw("135", "Jolteon", &[]),
        ]);

        let chain = db.evolution_chain("Eevee");
        assert_eq!(names(&chain), vec!["Eevee", "Vaporeon", "Jolteon"]);
        assert!(chain[0].is_queried);
    }

    #[test]
    fn test_convergent_branches_emit_shared_descendant_once() {
        // Both branches point at the same descendant; it must appear once
        let db = db_with(&[
            raw(
                "133",
                "Eevee",
                &[("134", "Vaporeon"), ("135", "Jolteon")],
            ),
            raw("134", "Vaporeon", &[("700", "Sylveon")]),
            raw("135", "Jolteon", &[("700", "Sylveon")]),
            raw("700", "Sylveon", &[]),
        ]);

        let chain = db.evolution_chain("Jolteon");
        assert_eq!(
            names(&chain),
            vec!["Eevee", "Vaporeon", "Jolteon", "Sylveon"]
        );
    }

    #[test]
    fn test_cyclic_edges_terminate() {
        // A two-node cycle is a graph anomaly; traversal must still finish
        let db = db_with(&[
            raw("360", "Wynaut", &[("202", "Wobbuffet")]),
            raw("202", "Wobbuffet", &[("360", "Wynaut")]),
        ]);

        let chain = db.evolution_chain("Wynaut");
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.iter().filter(|link| link.is_queried).count(), 1);
    }

    #[test]
    fn test_chain_carries_display_data() {
        let db = db_with(&[raw("025", "Pikachu", &[])]);
        let chain = db.evolution_chain("Pikachu");
        assert_eq!(chain[0].num, "025");
        assert_eq!(
            chain[0].img_url.as_deref(),
            Some("http://example.net/025.png")
        );
    }
}
