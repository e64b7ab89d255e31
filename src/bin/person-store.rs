//! CLI to query and extend a directory of person CSV files.
//!
//! Usage:
//!   person-store -d <dir> list [--search TEXT] [--color COLOR] [--sort field:dir]...
//!   person-store -d <dir> get <id>
//!   person-store -d <dir> add <first> <last> <zipcode> <city> <color>
//!
//! The directory may also come from the PERSONS_CSV_DIR environment
//! variable. Colors are accepted by German name or numeric code.

use std::env;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use csv_persons::{Color, CsvPersonStore, PageRequest, Person, PersonRepository, SortOrder};

#[derive(Parser)]
#[command(name = "person-store")]
#[command(about = "Query and extend a directory of person CSV files")]
struct Cli {
    /// Directory containing the CSV sources (default: $PERSONS_CSV_DIR)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List persons, optionally filtered, sorted, and paginated
    List {
        /// Substring to search for in name, zipcode, or city
        #[arg(long)]
        search: Option<String>,

        /// Keep only persons with this favorite color
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,

        /// Sort criterion "field" or "field:asc|desc"; repeatable.
        /// Criteria run as successive stable passes, so the last one
        /// listed is the dominant key.
        #[arg(long = "sort")]
        sort: Vec<SortOrder>,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Page size
        #[arg(long, default_value_t = 20)]
        size: usize,
    },

    /// Show one person by id
    Get { id: u64 },

    /// Append a new person and reload
    Add {
        first_name: String,
        last_name: String,
        zipcode: String,
        city: String,
        #[arg(value_parser = parse_color)]
        color: Color,
    },
}

/// Accept a color by German name ("türkis") or numeric code ("6").
fn parse_color(s: &str) -> Result<Color, String> {
    if let Some(color) = Color::from_name(s) {
        return Ok(color);
    }
    s.parse::<u32>()
        .ok()
        .and_then(Color::from_code)
        .ok_or_else(|| format!("unknown color '{s}' (expected a German name or a code 1-7)"))
}

fn resolve_directory(cli: &Cli) -> PathBuf {
    if let Some(directory) = &cli.directory {
        return directory.clone();
    }
    match env::var_os("PERSONS_CSV_DIR") {
        Some(directory) => PathBuf::from(directory),
        None => {
            eprintln!("No source directory: pass --directory or set PERSONS_CSV_DIR");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let directory = resolve_directory(&cli);

    let store = match CsvPersonStore::open(&directory) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening store at '{}': {e}", directory.display());
            process::exit(1);
        }
    };

    match cli.command {
        Command::List { search, color, sort, page, size } => {
            let request = PageRequest::new(page, size);
            let result = match (search.as_deref(), color) {
                (Some(text), Some(color)) => {
                    store.find_by_search_and_color(text, color, &sort, request)
                }
                (Some(text), None) => store.find_by_search(text, &sort, request),
                (None, Some(color)) => store.find_by_color(color, &sort, request),
                (None, None) => store.find_all(&sort, request),
            };
            for person in &result.items {
                println!("{person}");
            }
            eprintln!("Page {page}: {} of {} persons", result.items.len(), result.total);
        }
        Command::Get { id } => match store.find_by_id(id) {
            Some(person) => println!("{person}"),
            None => {
                eprintln!("No person with id {id}");
                process::exit(1);
            }
        },
        Command::Add { first_name, last_name, zipcode, city, color } => {
            let person = Person {
                id: 0, // reassigned by the reload
                first_name,
                last_name,
                zipcode,
                city,
                color,
            };
            match store.save(&person) {
                Ok(saved) => println!("{saved}"),
                Err(e) => {
                    eprintln!("Error saving person: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
