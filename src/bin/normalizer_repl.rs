//! Interactive normalization tool
//!
//! Prompts for a CSV file, a primary key, and dependency declarations, then
//! normalizes the table to a chosen normal form and prints the result.

use anyhow::{Context, Result};
use normal_form_engine::ingestion::load_delimited_file;
use normal_form_engine::render::{render_dependencies, render_primary_key, render_relation};
use normal_form_engine::{NormalForm, NormalFormEngine, Relation};
use std::io::{self, Write};

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn create_relation() -> Result<Relation> {
    loop {
        let path = prompt("CSV file containing a single table: ")?;
        if path.is_empty() {
            continue;
        }
        match load_delimited_file(&path) {
            Ok(parsed) => {
                let name = std::path::Path::new(&path)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("table")
                    .to_string();
                return parsed
                    .into_relation(name)
                    .context("CSV data rejected by relation");
            }
            Err(err) => println!("Could not load '{}': {}", path, err),
        }
    }
}

fn input_primary_key(relation: &mut Relation) -> Result<()> {
    loop {
        println!("\nColumns: [{}]", relation.attribute_names().join(", "));
        let entry = prompt(
            "Primary key (comma-separated attributes if the key is composite): ",
        )?;
        let attributes: Vec<&str> = entry
            .split(',')
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .collect();
        if attributes.is_empty() {
            println!("The primary key needs at least one attribute.");
            continue;
        }
        match relation.set_primary_key(&attributes) {
            Ok(()) => return Ok(()),
            Err(err) => println!("One or more attributes had an issue: {}", err),
        }
    }
}

fn input_functional_dependencies(relation: &mut Relation) -> Result<()> {
    loop {
        println!("\nColumns: [{}]", relation.attribute_names().join(", "));
        let entry = prompt(
            "Functional dependency (Det1, Det2 -> Dep1, Dep2), or enter if finished: ",
        )?;
        if entry.is_empty() {
            return Ok(());
        }
        let Some((determinant, dependant)) = entry.split_once("->") else {
            println!("No '->' in the declaration. Please try again.");
            continue;
        };
        let determinant: Vec<&str> = determinant
            .split(',')
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .collect();
        let dependant: Vec<&str> = dependant
            .split(',')
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .collect();
        match relation.declare_fd(&determinant, &dependant) {
            Ok(()) => println!("Added {} to the dependency list.", entry),
            Err(err) => println!("One or more attributes had an issue: {}", err),
        }
    }
}

fn input_multivalued_dependencies(relation: &mut Relation) -> Result<()> {
    loop {
        let entry = prompt(
            "Multivalued dependency (X ->> Y | Z), or enter if finished: ",
        )?;
        if entry.is_empty() {
            return Ok(());
        }
        let parsed = entry.split_once("->>").and_then(|(det, rest)| {
            rest.split_once('|')
                .map(|(a, b)| (det.trim(), a.trim(), b.trim()))
        });
        let Some((det, a, b)) = parsed else {
            println!("Expected the form 'X ->> Y | Z'. Please try again.");
            continue;
        };
        match relation.declare_mvd(det, a, b) {
            Ok(()) => println!("Added {} to the dependency list.", entry),
            Err(err) => println!("Declaration had an issue: {}", err),
        }
    }
}

fn choose_target() -> Result<NormalForm> {
    loop {
        let entry = prompt("\nTarget normal form (1NF, 2NF, 3NF, BCNF, 4NF, 5NF): ")?;
        match entry.parse::<NormalForm>() {
            Ok(form) => return Ok(form),
            Err(err) => println!("{}", err),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("normal_form_engine=info")),
        )
        .init();

    println!("Normal Form Engine - Interactive Tool");
    println!("{}", "=".repeat(60));

    let mut relation = create_relation()?;
    input_primary_key(&mut relation)?;
    input_functional_dependencies(&mut relation)?;
    input_multivalued_dependencies(&mut relation)?;

    let engine = NormalFormEngine::new();
    let max_rows = engine.config().max_display_rows;

    println!();
    println!("{}", render_relation(&relation, max_rows));
    println!("{}", render_primary_key(&relation));
    let dependencies = render_dependencies(&relation);
    if !dependencies.is_empty() {
        println!("{}", dependencies);
    }

    let target = choose_target()?;
    match engine.normalize(&relation, target) {
        Ok(result) => {
            println!("\n{} produced {} relation(s):\n", target, result.len());
            for decomposed in &result {
                println!("{}", render_relation(decomposed, max_rows));
                println!("{}", render_primary_key(decomposed));
                let deps = render_dependencies(decomposed);
                if !deps.is_empty() {
                    println!("{}", deps);
                }
                println!();
            }
        }
        Err(err) => println!("Normalization failed: {}", err),
    }

    Ok(())
}
