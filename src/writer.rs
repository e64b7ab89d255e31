//! Append-side of the CSV persistence model.
//!
//! New records are never merged into the seed files. They go to a dated
//! overflow file in the same directory, in exactly the textual shape
//! the parser consumes, and the store then reloads everything.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::person::Person;

/// Appends person records to the dated overflow file of a directory.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    directory: PathBuf,
}

impl CsvWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        CsvWriter { directory: directory.into() }
    }

    /// Today's overflow file. The `zzz_` prefix makes it sort after the
    /// usual seed files, so freshly saved records normally parse last;
    /// that is not guaranteed if a seed file is named to sort later.
    pub fn overflow_path(&self) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d");
        self.directory.join(format!("zzz_persons_{date}.csv"))
    }

    /// Append one record line, creating the overflow file if absent.
    ///
    /// Field order matches the parser's expectation: lastname,
    /// firstname, "zipcode city", color code.
    pub fn append(&self, person: &Person) -> io::Result<PathBuf> {
        let path = self.overflow_path();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", format_line(person))?;
        Ok(path)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn format_line(person: &Person) -> String {
    format!(
        "{},{},{} {},{}",
        person.last_name,
        person.first_name,
        person.zipcode,
        person.city,
        person.color.code()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::parser::CsvParser;
    use std::fs;
    use tempfile::TempDir;

    fn person() -> Person {
        Person {
            id: 0,
            first_name: "Kunigunde".to_string(),
            last_name: "Grundwitz".to_string(),
            zipcode: "10439".to_string(),
            city: "Berlin".to_string(),
            color: Color::Green,
        }
    }

    #[test]
    fn test_append_creates_dated_file() {
        let dir = TempDir::new().unwrap();
        let writer = CsvWriter::new(dir.path());

        let path = writer.append(&person()).unwrap();

        assert_eq!(path, writer.overflow_path());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("zzz_persons_"));
        assert!(name.ends_with(".csv"));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Grundwitz,Kunigunde,10439 Berlin,2\n");
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = TempDir::new().unwrap();
        let writer = CsvWriter::new(dir.path());

        writer.append(&person()).unwrap();
        writer.append(&person()).unwrap();

        let content = fs::read_to_string(writer.overflow_path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_written_line_round_trips_through_the_parser() {
        let dir = TempDir::new().unwrap();
        CsvWriter::new(dir.path()).append(&person()).unwrap();

        let persons = CsvParser::new(dir.path()).read_all().unwrap();

        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].first_name, "Kunigunde");
        assert_eq!(persons[0].zipcode, "10439");
        assert_eq!(persons[0].city, "Berlin");
        assert_eq!(persons[0].color, Color::Green);
    }

    #[test]
    fn test_append_fails_when_directory_is_gone() {
        let dir = TempDir::new().unwrap();
        let writer = CsvWriter::new(dir.path().join("missing"));
        assert!(writer.append(&person()).is_err());
    }
}
