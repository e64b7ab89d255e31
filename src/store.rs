//! The in-memory person repository over CSV sources.
//!
//! The store parses every source once at construction and serves all
//! queries from that cached snapshot. Writes never patch the snapshot:
//! `save` appends to the dated overflow file, reparses the full source
//! set, and swaps the snapshot wholesale. Readers clone an `Arc` to the
//! current snapshot at call entry, so they see either the pre- or
//! post-save list but never a partial one, and they never block a
//! writer. Saves themselves are serialized by a dedicated lock so two
//! writers cannot race the append-reparse-swap sequence.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::color::Color;
use crate::error::StoreError;
use crate::parser::CsvParser;
use crate::person::Person;
use crate::query::{Direction, Page, PageRequest, SortField, SortOrder};
use crate::writer::CsvWriter;

/// The repository contract served to the layer above.
///
/// `sort` is a list of criteria applied as successive stable passes
/// (see [`crate::query`]); an empty list means ascending by id.
pub trait PersonRepository {
    fn find_all(&self, sort: &[SortOrder], page: PageRequest) -> Page;

    fn find_by_color(&self, color: Color, sort: &[SortOrder], page: PageRequest) -> Page;

    fn find_by_id(&self, id: u64) -> Option<Person>;

    /// Case-insensitive substring search over first name, last name,
    /// zipcode, and city.
    fn find_by_search(&self, search: &str, sort: &[SortOrder], page: PageRequest) -> Page;

    /// Both the search and the color predicate must hold.
    fn find_by_search_and_color(
        &self,
        search: &str,
        color: Color,
        sort: &[SortOrder],
        page: PageRequest,
    ) -> Page;

    /// Persist a new record and return it as re-read from the sources.
    ///
    /// Record ids are reassigned by parse order on every reload, so the
    /// returned record's id usually differs from the one supplied and
    /// no id is stable across saves.
    fn save(&self, person: &Person) -> Result<Person, StoreError>;
}

/// CSV-backed [`PersonRepository`] holding the parsed record set in
/// memory.
pub struct CsvPersonStore {
    parser: CsvParser,
    writer: CsvWriter,
    snapshot: RwLock<Arc<Vec<Person>>>,
    save_lock: Mutex<()>,
}

impl CsvPersonStore {
    /// Build a store over the `*.csv` files of `directory`, parsing
    /// them all up front. An unreadable source is fatal here.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = directory.into();
        let parser = CsvParser::new(&directory);
        let persons = parser.read_all().map_err(StoreError::Initialization)?;
        Ok(CsvPersonStore {
            parser,
            writer: CsvWriter::new(directory),
            snapshot: RwLock::new(Arc::new(persons)),
            save_lock: Mutex::new(()),
        })
    }

    /// The current snapshot. Cheap; clones only the `Arc`.
    fn snapshot(&self) -> Arc<Vec<Person>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn query(
        &self,
        keep: impl Fn(&Person) -> bool,
        sort: &[SortOrder],
        page: PageRequest,
    ) -> Page {
        let snapshot = self.snapshot();
        let mut persons: Vec<Person> = snapshot.iter().filter(|&p| keep(p)).cloned().collect();
        apply_sort(&mut persons, sort);
        Page::slice(persons, page)
    }
}

impl PersonRepository for CsvPersonStore {
    fn find_all(&self, sort: &[SortOrder], page: PageRequest) -> Page {
        self.query(|_| true, sort, page)
    }

    fn find_by_color(&self, color: Color, sort: &[SortOrder], page: PageRequest) -> Page {
        self.query(|p| p.color == color, sort, page)
    }

    fn find_by_id(&self, id: u64) -> Option<Person> {
        self.snapshot().iter().find(|p| p.id == id).cloned()
    }

    fn find_by_search(&self, search: &str, sort: &[SortOrder], page: PageRequest) -> Page {
        self.query(|p| matches_search(p, search), sort, page)
    }

    fn find_by_search_and_color(
        &self,
        search: &str,
        color: Color,
        sort: &[SortOrder],
        page: PageRequest,
    ) -> Page {
        self.query(|p| matches_search(p, search) && p.color == color, sort, page)
    }

    fn save(&self, person: &Person) -> Result<Person, StoreError> {
        // One save at a time: append, full reparse, swap.
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.writer.append(person).map_err(StoreError::Csv)?;
        let persons = self.parser.read_all().map_err(StoreError::Csv)?;
        let saved = persons.last().cloned().ok_or_else(|| {
            StoreError::Csv(io::Error::new(
                io::ErrorKind::InvalidData,
                "no records parsed after append",
            ))
        })?;
        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(persons);
        Ok(saved)
    }
}

/// Apply sort criteria as successive stable passes, in the order given.
///
/// Stability makes the LAST criterion the dominant key; earlier ones
/// only break its ties. An empty list sorts ascending by id.
fn apply_sort(persons: &mut [Person], sort: &[SortOrder]) {
    const DEFAULT: [SortOrder; 1] = [SortOrder {
        field: SortField::Id,
        direction: Direction::Asc,
    }];
    let sort = if sort.is_empty() { &DEFAULT[..] } else { sort };
    for order in sort {
        persons.sort_by(|a, b| order.compare(a, b));
    }
}

fn matches_search(person: &Person, search: &str) -> bool {
    let needle = search.to_lowercase();
    person.first_name.to_lowercase().contains(&needle)
        || person.last_name.to_lowercase().contains(&needle)
        || person.zipcode.to_lowercase().contains(&needle)
        || person.city.to_lowercase().contains(&needle)
}
