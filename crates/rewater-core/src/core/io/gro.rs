//! Fixed-width atom records of the GROMACS `.gro` coordinate format.
//!
//! An atom line is laid out as
//!
//! ```text
//! columns  1-10   residue number and name
//! columns 11-15   atom name
//! columns 16-20   atom index
//! columns 21-44   x, y, z in nm (3 x %8.3f)
//! columns 45-68   optional velocities
//! ```
//!
//! Only the columns needed to recognise and relocate water molecules are ever decoded;
//! everything else is carried over byte-for-byte.

use nalgebra::Point3;
use std::ops::Range;
use thiserror::Error;

/// Length units of `.gro` files are nanometres; geometry is done in Angstrom.
pub const ANGSTROM_PER_NM: f64 = 10.0;

/// Atom indices are written modulo this value, keeping the low five digits.
pub const INDEX_MODULUS: usize = 100_000;

const NAME_COLUMNS: Range<usize> = 10..15;
const INDEX_COLUMNS: Range<usize> = 15..20;
const COORDINATE_COLUMNS: Range<usize> = 20..44;
const COORDINATE_WIDTH: usize = 8;
const TAG_LENGTH: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroErrorKind {
    #[error("file format error (atom name)")]
    AtomName,
    #[error("file format error (coordinates)")]
    Coordinates,
    #[error("file format error (atom)")]
    Atom,
    #[error("file format error (atom count)")]
    AtomCount,
    #[error("file format error (truncated file)")]
    Truncated,
    #[error("file too short to contain a water molecule")]
    NoRoomForWater,
    #[error("file too short for {0} atoms")]
    TooFewLines(usize),
}

/// A malformed `.gro` file, together with the raw line that could not be handled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}; current line:\n{line}")]
pub struct GroError {
    pub kind: GroErrorKind,
    pub line: String,
}

impl GroError {
    pub fn new(kind: GroErrorKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
        }
    }
}

fn columns(line: &str, range: Range<usize>, kind: GroErrorKind) -> Result<&str, GroError> {
    line.get(range).ok_or_else(|| GroError::new(kind, line))
}

/// Returns the atom name (columns 11-15) without surrounding spaces.
pub fn atom_name(line: &str) -> Result<&str, GroError> {
    if line.len() < NAME_COLUMNS.end {
        return Err(GroError::new(GroErrorKind::AtomName, line));
    }
    columns(line, NAME_COLUMNS, GroErrorKind::AtomName).map(|name| name.trim_matches(' '))
}

/// Upper-cases a name and keeps its first two characters.
///
/// All water recognition compares these tags, so `OW1`, `Ow` and `OW` are the same atom kind.
pub fn standardise(name: &str) -> String {
    name.chars()
        .take(TAG_LENGTH)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Shorthand for `standardise(atom_name(line))`.
pub fn atom_tag(line: &str) -> Result<String, GroError> {
    atom_name(line).map(standardise)
}

/// Parses the position of an atom line and converts it to Angstrom.
pub fn coordinates(line: &str) -> Result<Point3<f64>, GroError> {
    if line.len() < COORDINATE_COLUMNS.end {
        return Err(GroError::new(GroErrorKind::Coordinates, line));
    }
    let mut xyz = [0.0; 3];
    for (axis, value) in xyz.iter_mut().enumerate() {
        let start = COORDINATE_COLUMNS.start + axis * COORDINATE_WIDTH;
        let field = columns(line, start..start + COORDINATE_WIDTH, GroErrorKind::Coordinates)?;
        *value = field
            .trim()
            .parse::<f64>()
            .map_err(|_| GroError::new(GroErrorKind::Coordinates, line))?
            * ANGSTROM_PER_NM;
    }
    Ok(Point3::new(xyz[0], xyz[1], xyz[2]))
}

/// Reads the declared number of atoms from the second line of the file.
pub fn parse_atom_count(line: &str) -> Result<usize, GroError> {
    line.split_whitespace()
        .next()
        .and_then(|field| field.parse::<i64>().ok())
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| GroError::new(GroErrorKind::AtomCount, line))
}

/// Re-emits an atom line with a new index and without velocities.
///
/// `position` (in nm) replaces the coordinate columns and `name` replaces the atom name,
/// right-justified and cut to five characters. The index is written modulo
/// [`INDEX_MODULUS`]; the field is never widened, so files with more than 99999 atoms wrap
/// around the same way GROMACS numbers them.
pub fn rewrite_line(
    line: &str,
    index: usize,
    position: Option<&Point3<f64>>,
    name: Option<&str>,
) -> Result<String, GroError> {
    if line.len() < COORDINATE_COLUMNS.end {
        return Err(GroError::new(GroErrorKind::Atom, line));
    }
    let head = columns(line, 0..NAME_COLUMNS.start, GroErrorKind::Atom)?;
    let original_name = columns(line, NAME_COLUMNS, GroErrorKind::Atom)?;
    let original_coordinates = columns(line, COORDINATE_COLUMNS, GroErrorKind::Atom)?;

    let mut record = String::with_capacity(COORDINATE_COLUMNS.end);
    record.push_str(head);
    match name {
        Some(name) => record.push_str(&format!("{:>5.5}", name)),
        None => record.push_str(original_name),
    }
    record.push_str(&format!(
        "{:>width$}",
        index % INDEX_MODULUS,
        width = INDEX_COLUMNS.len()
    ));
    match position {
        Some(p) => record.push_str(&format!("{:8.3}{:8.3}{:8.3}", p.x, p.y, p.z)),
        None => record.push_str(original_coordinates),
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_O: &str = "    1SOL     OW    1   0.126   1.624   1.679  0.1227 -0.0580  0.0434";
    const SHORT: &str = "    1SOL     OW    1   0.126";

    #[test]
    fn atom_name_trims_surrounding_spaces() {
        assert_eq!(atom_name(WATER_O).unwrap(), "OW");
        assert_eq!(atom_name("    1SOL    HW1").unwrap(), "HW1");
    }

    #[test]
    fn atom_name_rejects_lines_shorter_than_the_name_field() {
        let err = atom_name("    1SOL   OW").unwrap_err();
        assert_eq!(err.kind, GroErrorKind::AtomName);
        assert_eq!(err.line, "    1SOL   OW");
        assert!(err.to_string().contains("atom name"));
    }

    #[test]
    fn standardise_uppercases_and_truncates_to_two_characters() {
        assert_eq!(standardise("hw1"), "HW");
        assert_eq!(standardise("Ow"), "OW");
        assert_eq!(standardise("LP2"), "LP");
        assert_eq!(standardise("C"), "C");
        assert_eq!(standardise(""), "");
    }

    #[test]
    fn standardise_is_idempotent() {
        for name in ["OW", "hw2", "mW", "x", "", "EPW", "Na+", "1HW"] {
            let once = standardise(name);
            assert_eq!(standardise(&once), once);
        }
    }

    #[test]
    fn coordinates_are_converted_to_angstrom() {
        let p = coordinates(WATER_O).unwrap();
        assert!((p.x - 1.26).abs() < 1e-12);
        assert!((p.y - 16.24).abs() < 1e-12);
        assert!((p.z - 16.79).abs() < 1e-12);
    }

    #[test]
    fn coordinates_fail_on_short_line() {
        let err = coordinates(SHORT).unwrap_err();
        assert_eq!(err.kind, GroErrorKind::Coordinates);
        assert!(err.to_string().contains("coordinates"));
    }

    #[test]
    fn coordinates_fail_on_non_numeric_field() {
        let line = "    1SOL     OW    1   0.126   abcde   1.679";
        let err = coordinates(line).unwrap_err();
        assert_eq!(err.kind, GroErrorKind::Coordinates);
    }

    #[test]
    fn parse_atom_count_accepts_padded_numbers() {
        assert_eq!(parse_atom_count("  648").unwrap(), 648);
        assert_eq!(parse_atom_count("0").unwrap(), 0);
    }

    #[test]
    fn parse_atom_count_rejects_negative_and_non_numeric_values() {
        for line in ["-3", "abc", "", "   "] {
            let err = parse_atom_count(line).unwrap_err();
            assert_eq!(err.kind, GroErrorKind::AtomCount);
        }
    }

    #[test]
    fn rewrite_line_updates_index_and_drops_velocities() {
        let out = rewrite_line(WATER_O, 42, None, None).unwrap();
        assert_eq!(out, "    1SOL     OW   42   0.126   1.624   1.679");
    }

    #[test]
    fn rewrite_line_replaces_coordinates() {
        let p = Point3::new(0.1, -0.25, 12.3456);
        let out = rewrite_line(WATER_O, 1, Some(&p), None).unwrap();
        assert_eq!(out, "    1SOL     OW    1   0.100  -0.250  12.346");
    }

    #[test]
    fn rewrite_line_replaces_name_right_justified() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let out = rewrite_line(WATER_O, 4, Some(&p), Some("MW")).unwrap();
        assert_eq!(out, "    1SOL     MW    4   0.000   0.000   0.000");
        let out = rewrite_line(WATER_O, 5, Some(&p), Some("LP1")).unwrap();
        assert_eq!(&out[10..15], "  LP1");
        let out = rewrite_line(WATER_O, 5, Some(&p), Some("TOOLONG")).unwrap();
        assert_eq!(&out[10..15], "TOOLO");
    }

    #[test]
    fn rewrite_line_wraps_index_at_field_width() {
        let out = rewrite_line(WATER_O, 99_999, None, None).unwrap();
        assert_eq!(&out[15..20], "99999");
        let out = rewrite_line(WATER_O, 100_000, None, None).unwrap();
        assert_eq!(&out[15..20], "    0");
        let out = rewrite_line(WATER_O, 123_456, None, None).unwrap();
        assert_eq!(&out[15..20], "23456");
    }

    #[test]
    fn rewrite_line_rejects_short_lines() {
        let err = rewrite_line(SHORT, 1, None, None).unwrap_err();
        assert_eq!(err.kind, GroErrorKind::Atom);
        assert_eq!(err.line, SHORT);
    }
}
