use crate::core::io::gro::{GroError, GroErrorKind, atom_tag};
use tracing::debug;

/// Line index of the first atom record (after title and atom count).
pub const FIRST_ATOM_LINE: usize = 2;

const WATER_CORE_ATOMS: usize = 3;
const OXYGEN_TAG: &str = "OW";
const HYDROGEN_TAG: &str = "HW";
const EXTRA_SITE_TAGS: [&str; 3] = ["MW", "LP", "EP"];

/// A classified stretch of atom lines, referenced by line index into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// A line that is passed through with only its index renumbered.
    Atom { line: usize },
    /// An OW, HW, HW run starting at `start`, followed by `consumed - 3` extra-site
    /// lines of the original model that are dropped.
    Water { start: usize, consumed: usize },
}

impl Span {
    /// Number of input atom lines covered by this span.
    pub fn input_atoms(&self) -> usize {
        match self {
            Span::Atom { .. } => 1,
            Span::Water { consumed, .. } => *consumed,
        }
    }

    pub fn discarded_sites(&self) -> usize {
        match self {
            Span::Atom { .. } => 0,
            Span::Water { consumed, .. } => consumed - WATER_CORE_ATOMS,
        }
    }
}

/// Result of scanning the atom section of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub spans: Vec<Span>,
    /// First line index not covered by `spans`. Atom lines from here up to the end of the
    /// atom section are renumbered as ordinary atoms.
    pub resume_at: usize,
}

impl Classification {
    pub fn water_count(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| matches!(s, Span::Water { .. }))
            .count()
    }

    /// Input lines belonging to water runs, including their dropped extra sites.
    pub fn water_atoms(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| matches!(s, Span::Water { .. }))
            .map(Span::input_atoms)
            .sum()
    }

    pub fn discarded_sites(&self) -> usize {
        self.spans.iter().map(Span::discarded_sites).sum()
    }

    /// Atom count of the rewritten file when every water run becomes `model_size` atoms.
    pub fn output_atom_count(&self, declared_atoms: usize, model_size: usize) -> usize {
        declared_atoms - self.water_atoms() + self.water_count() * model_size
    }
}

fn tag_at<S: AsRef<str>>(lines: &[S], index: usize) -> Result<String, GroError> {
    let line = lines.get(index).ok_or_else(|| {
        GroError::new(
            GroErrorKind::Truncated,
            format!("<missing line {}>", index + 1),
        )
    })?;
    atom_tag(line.as_ref())
}

fn starts_water<S: AsRef<str>>(lines: &[S], index: usize) -> Result<bool, GroError> {
    Ok(tag_at(lines, index)? == OXYGEN_TAG
        && tag_at(lines, index + 1)? == HYDROGEN_TAG
        && tag_at(lines, index + 2)? == HYDROGEN_TAG)
}

/// Partitions the atom section of a `.gro` file into ordinary atoms and water runs.
///
/// A water run is three consecutive atoms tagged `OW`, `HW`, `HW`, plus any directly
/// following `MW`/`LP`/`EP` sites. Scanning covers line indices `FIRST_ATOM_LINE..atom_count`
/// so the two lookahead lines of a run always fall inside the atom section; extra sites are
/// consumed up to its end at `atom_count + FIRST_ATOM_LINE`. Tags are only compared after
/// [`standardise`](crate::core::io::gro::standardise).
pub fn classify<S: AsRef<str>>(
    lines: &[S],
    atom_count: usize,
) -> Result<Classification, GroError> {
    let section_end = atom_count + FIRST_ATOM_LINE;
    let mut spans = Vec::new();
    let mut cursor = FIRST_ATOM_LINE;

    while cursor < atom_count {
        if starts_water(lines, cursor)? {
            let start = cursor;
            cursor += WATER_CORE_ATOMS;
            while cursor < section_end
                && EXTRA_SITE_TAGS.contains(&tag_at(lines, cursor)?.as_str())
            {
                cursor += 1;
            }
            spans.push(Span::Water {
                start,
                consumed: cursor - start,
            });
        } else {
            spans.push(Span::Atom { line: cursor });
            cursor += 1;
        }
    }

    let classification = Classification {
        spans,
        resume_at: cursor.max(FIRST_ATOM_LINE),
    };
    debug!(
        waters = classification.water_count(),
        discarded_sites = classification.discarded_sites(),
        resume_at = classification.resume_at,
        "Classified atom section."
    );
    Ok(classification)
}
