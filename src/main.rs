use anyhow::Result;
use pokedex_to_sqlite::{
    cli::{Cli, Commands},
    download::ensure_pokedex_downloaded,
    parser::load_dataset,
    query::PokedexDb,
    schema::table_names,
    ui::{ConsoleUi, Phase, Ui},
    writer::ingest_to_sqlite,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Sync {
            output_db,
            force,
            cache_dir,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            // Download pokedex if needed
            let dataset_path = ensure_pokedex_downloaded(cache_dir, force, &mut ui)?;

            let records = load_dataset(&dataset_path)?;
            let stats = ingest_to_sqlite(&records, &output_db, &mut ui)?;
            ui.set_phase(Phase::Complete);

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} pokemon, {} evolution edges) in {:.1}s",
                output_db,
                stats.pokemon,
                stats.edges,
                elapsed.as_secs_f64()
            );
        }

        Commands::Download { output, force } => {
            let mut ui = ConsoleUi::new();
            let path = ensure_pokedex_downloaded(output, force, &mut ui)?;
            println!("Pokedex downloaded to {:?}", path);
        }

        Commands::Ingest {
            input_json,
            output_db,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            let records = load_dataset(&input_json)?;
            let stats = ingest_to_sqlite(&records, &output_db, &mut ui)?;
            ui.set_phase(Phase::Complete);

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} pokemon, {} evolution edges) in {:.1}s",
                output_db,
                stats.pokemon,
                stats.edges,
                elapsed.as_secs_f64()
            );
        }

        Commands::ListNames { db } => {
            let db = PokedexDb::open(&db)?;
            for name in db.all_names() {
                println!("{}", name);
            }
        }

        Commands::Profile { db, name } => {
            let db = PokedexDb::open(&db)?;
            print_profile(&db, &name);
        }

        Commands::Chain { db, name } => {
            let db = PokedexDb::open(&db)?;
            print_chain(&db, &name);
        }

        Commands::ListTables => {
            println!("Schema tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

fn print_profile(db: &PokedexDb, name: &str) {
    let Some(profile) = db.profile(name) else {
        println!("No data for {}", name);
        return;
    };

    println!("{} | #{}", profile.name, profile.num);
    println!("  Height:       {}", fmt_unit(profile.height_m, "m"));
    println!("  Weight:       {}", fmt_unit(profile.weight_kg, "kg"));
    println!("  Egg distance: {}", fmt_unit(profile.egg_distance_km, "km"));
    println!("  Candy:        {}", profile.candy.as_deref().unwrap_or("N/A"));
    println!(
        "  Candy count:  {}",
        fmt_unit(profile.evolution_cost, "units")
    );
    println!("  Types:        {}", profile.types.join(", "));
    println!("  Weaknesses:   {}", profile.weaknesses.join(", "));
}

fn print_chain(db: &PokedexDb, name: &str) {
    let chain = db.evolution_chain(name);
    if chain.is_empty() {
        println!("No data for {}", name);
        return;
    }

    let rendered: Vec<String> = chain
        .iter()
        .map(|link| {
            if link.is_queried {
                format!("[{}]", link.name)
            } else {
                link.name.clone()
            }
        })
        .collect();
    println!("{}", rendered.join(" -> "));

    for link in &chain {
        println!("  #{} {}", link.num, link.name);
    }
}

fn fmt_unit<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "N/A".to_string(),
    }
}
