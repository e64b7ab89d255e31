//! Token-stream CSV parser for person records.
//!
//! The source files are not RFC-conformant CSV: delimiters vary between
//! comma, semicolon, and tab inside the same file, and single records
//! are sometimes broken across physical lines. Instead of parsing line
//! by line, the parser flattens each source into one stream of stripped
//! field tokens and materializes a [`Person`] whenever four tokens have
//! accumulated. A record split across lines therefore parses exactly
//! like the same fields on one line.
//!
//! Individual malformed entries never fail a load: a 4-token group that
//! fails validation is skipped with a warning and does not consume a
//! record id. Only an unreadable source aborts the whole parse.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::color::Color;
use crate::error::EntryError;
use crate::person::Person;
use crate::sanitize::{sanitize_alphabetic, sanitize_numeric};

/// Fixed number of logical columns per record.
const COLUMN_COUNT: usize = 4;

/// Field delimiters accepted interchangeably.
const SEPARATORS: [char; 3] = [',', ';', '\t'];

/// Reads person records out of every `*.csv` file in one directory.
#[derive(Debug, Clone)]
pub struct CsvParser {
    directory: PathBuf,
}

impl CsvParser {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        CsvParser { directory: directory.into() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolve the source files: every `*.csv` directly in the
    /// directory, in lexicographic path order. This order defines
    /// record id assignment across files.
    pub fn resolve_sources(&self) -> io::Result<Vec<PathBuf>> {
        let mut sources: Vec<PathBuf> = fs::read_dir(&self.directory)?
            .collect::<io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        sources.sort();
        Ok(sources)
    }

    /// Parse every source file and return the accepted records in
    /// order, ids assigned 1, 2, 3, ... by accepted-parse order.
    ///
    /// Fails only if a source cannot be read; malformed entries are
    /// skipped individually (see [`parse_source`]).
    pub fn read_all(&self) -> io::Result<Vec<Person>> {
        let mut persons = Vec::new();
        for path in self.resolve_sources()? {
            let content = fs::read_to_string(&path)?;
            parse_source(&content, &mut persons);
        }
        Ok(persons)
    }
}

/// Parse one source's text, appending accepted records to `persons`.
///
/// Lines are stripped and split on any of `,` `;` tab; empty tokens are
/// discarded and the rest accumulate in a token buffer that survives
/// line boundaries. Every [`COLUMN_COUNT`] tokens the buffer is turned
/// into a record (or skipped with a warning) and cleared. Leftover
/// tokens at end of source are dropped; the buffer never carries over
/// into the next source.
pub fn parse_source(content: &str, persons: &mut Vec<Person>) {
    let mut fields: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for column in line.split(SEPARATORS) {
            let column = column.trim();
            if column.is_empty() {
                continue;
            }
            fields.push(column.to_string());
            if fields.len() == COLUMN_COUNT {
                let id = persons.len() as u64 + 1;
                match build_person(id, &fields) {
                    Ok(person) => persons.push(person),
                    Err(e) => warn!("Failed to parse CSV entry {fields:?}: {e}"),
                }
                fields.clear();
            }
        }
    }
}

/// Materialize a record from exactly [`COLUMN_COUNT`] raw tokens:
/// lastname, firstname, "zipcode city", color code.
fn build_person(id: u64, fields: &[String]) -> Result<Person, EntryError> {
    let (zipcode, city) = fields[2]
        .split_once(char::is_whitespace)
        .ok_or_else(|| EntryError::MissingCity(fields[2].clone()))?;
    let code = parse_code(&fields[3])?;
    Ok(Person {
        id,
        last_name: sanitize_alphabetic(&fields[0]),
        first_name: sanitize_alphabetic(&fields[1]),
        zipcode: sanitize_numeric(zipcode),
        city: sanitize_alphabetic(city),
        color: Color::from_code(code).ok_or(EntryError::UnknownColorCode(code))?,
    })
}

fn parse_code(field: &str) -> Result<u32, EntryError> {
    sanitize_numeric(field)
        .parse()
        .map_err(|_| EntryError::NotNumeric(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Vec<Person> {
        let mut persons = Vec::new();
        parse_source(content, &mut persons);
        persons
    }

    fn write_sources(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_parses_well_formed_lines() {
        let persons = parse(
            "Müller,Hans,67742 Lauterecken,1\n\
             Petersen,Peter,18439 Stralsund,2\n\
             Johnson,Johnny,88888 made up,3\n",
        );
        assert_eq!(persons.len(), 3);
        assert_eq!(persons[0].first_name, "Hans");
        assert_eq!(persons[0].last_name, "Müller");
        assert_eq!(persons[0].zipcode, "67742");
        assert_eq!(persons[0].city, "Lauterecken");
        assert_eq!(persons[0].color, Color::Blue);
        // City keeps its interior space.
        assert_eq!(persons[2].city, "made up");
    }

    #[test]
    fn test_mixed_separators_in_one_record() {
        let persons = parse("Müller;Hans\t67742 Lauterecken,1\n");
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].first_name, "Hans");
        assert_eq!(persons[0].color, Color::Blue);
    }

    #[test]
    fn test_record_broken_across_lines() {
        let one_line = parse("Petersen,Peter,18439 Stralsund,2\n");
        let broken = parse("Petersen,Peter,\n18439 Stralsund,2\n");
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].city, one_line[0].city);
        assert_eq!(broken[0].zipcode, one_line[0].zipcode);
        assert_eq!(broken[0].color, one_line[0].color);
    }

    #[test]
    fn test_empty_lines_do_not_reset_the_buffer() {
        let persons = parse("Petersen,Peter\n\n   \n18439 Stralsund,2\n");
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].zipcode, "18439");
    }

    #[test]
    fn test_empty_tokens_are_discarded() {
        let persons = parse("Müller,,,Hans,,67742 Lauterecken,,1\n");
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].first_name, "Hans");
    }

    #[test]
    fn test_bad_color_code_skips_entry_without_consuming_id() {
        let persons = parse(
            "Müller,Hans,67742 Lauterecken,9\n\
             Petersen,Peter,18439 Stralsund,2\n",
        );
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].id, 1);
        assert_eq!(persons[0].last_name, "Petersen");
    }

    #[test]
    fn test_non_numeric_color_skips_entry() {
        let persons = parse("Müller,Hans,67742 Lauterecken,blau\n");
        assert!(persons.is_empty());
    }

    #[test]
    fn test_missing_city_part_skips_entry() {
        let persons = parse("Müller,Hans,67742,1\n");
        assert!(persons.is_empty());
    }

    #[test]
    fn test_special_characters_are_sanitized() {
        let persons = parse("Andersson-Meyer!,A@nde#rs,3213/2 S:chweden,2\n");
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].last_name, "Andersson-Meyer");
        assert_eq!(persons[0].first_name, "Anders");
        assert_eq!(persons[0].zipcode, "32132");
        assert_eq!(persons[0].city, "Schweden");
        assert_eq!(persons[0].color, Color::Green);
    }

    #[test]
    fn test_leftover_tokens_are_dropped_at_end_of_source() {
        let persons = parse("Müller,Hans,67742 Lauterecken,1\nPetersen,Peter\n");
        assert_eq!(persons.len(), 1);
    }

    #[test]
    fn test_ids_follow_accepted_parse_order() {
        let persons = parse(
            "Müller,Hans,67742 Lauterecken,1\n\
             Broken,Entry,00000 Nowhere,99\n\
             Petersen,Peter,18439 Stralsund,2\n",
        );
        let ids: Vec<u64> = persons.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_read_all_merges_files_in_lexicographic_order() {
        let dir = write_sources(&[
            (
                "b.csv",
                "Petersen,Peter,18439 Stralsund,2\n",
            ),
            (
                "a.csv",
                "Müller,Hans,67742 Lauterecken,1\nStark,Sansa,55443 Winterfell,4\n",
            ),
        ]);
        let persons = CsvParser::new(dir.path()).read_all().unwrap();
        assert_eq!(persons.len(), 3);
        assert_eq!(persons[0].last_name, "Müller");
        assert_eq!(persons[1].last_name, "Stark");
        assert_eq!(persons[2].last_name, "Petersen");
        assert_eq!(persons[2].id, 3);
    }

    #[test]
    fn test_read_all_ignores_non_csv_files() {
        let dir = write_sources(&[
            ("persons.csv", "Müller,Hans,67742 Lauterecken,1\n"),
            ("notes.txt", "Petersen,Peter,18439 Stralsund,2\n"),
        ]);
        let persons = CsvParser::new(dir.path()).read_all().unwrap();
        assert_eq!(persons.len(), 1);
    }

    #[test]
    fn test_read_all_fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(CsvParser::new(missing).read_all().is_err());
    }

    #[test]
    fn test_buffer_does_not_carry_over_between_sources() {
        // a.csv ends with two stray tokens; b.csv starts a fresh record.
        let dir = write_sources(&[
            ("a.csv", "Müller,Hans\n"),
            ("b.csv", "Petersen,Peter,18439 Stralsund,2\n"),
        ]);
        let persons = CsvParser::new(dir.path()).read_all().unwrap();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].last_name, "Petersen");
    }
}
