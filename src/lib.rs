//! # csv-persons
//!
//! A resilient flat-file person record store with in-memory querying.
//!
//! The input is a directory of loosely formatted CSV files describing
//! persons (name, zipcode, city, favorite color). The files are
//! hand-edited in the wild: delimiters mix comma, semicolon, and tab,
//! fields carry stray punctuation, and records are sometimes broken
//! across physical lines. The parser flattens each file into a token
//! stream and regroups it into fixed-width records, so a malformed
//! entry costs one record, never the whole load.
//!
//! On top of the parsed set, [`CsvPersonStore`] serves filtered,
//! searched, sorted, paginated views and persists new records by
//! appending to a dated overflow file and reloading everything.
//!
//! ## Example
//!
//! ```
//! use csv_persons::{Color, parse_source};
//!
//! // Mixed delimiters and a record broken across two lines.
//! let mut persons = Vec::new();
//! parse_source(
//!     "Müller;Hans\t67742 Lauterecken,1\nPetersen,Peter\n18439 Stralsund,2\n",
//!     &mut persons,
//! );
//!
//! assert_eq!(persons.len(), 2);
//! assert_eq!(persons[0].first_name, "Hans");
//! assert_eq!(persons[1].color, Color::Green);
//! ```

pub mod color;
pub mod error;
pub mod parser;
pub mod person;
pub mod query;
pub mod sanitize;
pub mod store;
pub mod writer;

pub use color::Color;
pub use error::{EntryError, StoreError};
pub use parser::{CsvParser, parse_source};
pub use person::Person;
pub use query::{Direction, Page, PageRequest, SortField, SortOrder};
pub use sanitize::{sanitize_alphabetic, sanitize_numeric};
pub use store::{CsvPersonStore, PersonRepository};
pub use writer::CsvWriter;
