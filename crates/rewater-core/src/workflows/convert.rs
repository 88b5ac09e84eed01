use crate::core::io::gro::{
    ANGSTROM_PER_NM, GroError, GroErrorKind, coordinates, parse_atom_count, rewrite_line,
};
use crate::core::models::water::WaterModel;
use crate::engine::classifier::{FIRST_ATOM_LINE, Span, classify};
use crate::engine::error::ConversionError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use std::io::Write;
use tracing::{info, instrument};

/// Smallest file that can hold a water molecule: title, count, three atoms.
const MIN_LINES: usize = 5;

/// Counts describing one finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    pub waters_converted: usize,
    pub atoms_in: usize,
    pub atoms_out: usize,
    pub sites_discarded: usize,
}

fn to_file_units(p: &Point3<f64>) -> Point3<f64> {
    Point3::from(p.coords / ANGSTROM_PER_NM)
}

fn line_at<S: AsRef<str>>(lines: &[S], index: usize) -> Result<&str, GroError> {
    lines.get(index).map(|l| l.as_ref()).ok_or_else(|| {
        GroError::new(
            GroErrorKind::Truncated,
            format!("<missing line {}>", index + 1),
        )
    })
}

/// Writes the O, H1, H2 records of one water run plus the target model's virtual sites.
fn write_water<S: AsRef<str>>(
    writer: &mut impl Write,
    lines: &[S],
    start: usize,
    first_index: usize,
    model: &WaterModel,
) -> Result<(), ConversionError> {
    let o_line = line_at(lines, start)?;
    let h1_line = line_at(lines, start + 1)?;
    let h2_line = line_at(lines, start + 2)?;

    let ideal = model
        .transform(
            &coordinates(o_line)?,
            &coordinates(h1_line)?,
            &coordinates(h2_line)?,
        )
        .map_err(|source| ConversionError::Geometry {
            line: o_line.to_string(),
            source,
        })?;

    let core = [(o_line, ideal.oxygen), (h1_line, ideal.h1), (h2_line, ideal.h2)];
    for (offset, (line, position)) in core.iter().enumerate() {
        let record = rewrite_line(
            line,
            first_index + offset,
            Some(&to_file_units(position)),
            None,
        )?;
        writeln!(writer, "{}", record)?;
    }

    // Virtual sites borrow the residue columns of the second hydrogen.
    let sites = ideal.extra_sites();
    let names = model.virtual_site_names();
    for (offset, (name, position)) in names.iter().zip(&sites).enumerate() {
        let record = rewrite_line(
            h2_line,
            first_index + core.len() + offset,
            Some(&to_file_units(position)),
            Some(*name),
        )?;
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}

/// Rewrites a `.gro` file so that every water molecule matches `model`.
///
/// The title is copied, the atom count is recomputed, ordinary atoms are renumbered and
/// stripped of velocities, and each recognised water run is replaced by the model's
/// idealized O, H1, H2 and virtual sites. Lines after the atom section (the box vector)
/// are copied verbatim.
///
/// Nothing is written before the header has been validated, but the output is streamed:
/// when a later record fails, the lines already emitted stay in `writer`. Callers that
/// need all-or-nothing output should write into a buffer first.
#[instrument(skip_all, name = "convert_workflow", fields(model = model.name()))]
pub fn run<S: AsRef<str>>(
    lines: &[S],
    model: &WaterModel,
    writer: &mut impl Write,
    reporter: &ProgressReporter,
) -> Result<ConversionSummary, ConversionError> {
    if lines.len() < MIN_LINES {
        return Err(GroError::new(GroErrorKind::NoRoomForWater, lines.len().to_string()).into());
    }
    let count_line = line_at(lines, 1)?;
    let atom_count = parse_atom_count(count_line)?;
    if lines.len() < atom_count + FIRST_ATOM_LINE {
        return Err(GroError::new(GroErrorKind::TooFewLines(atom_count), count_line).into());
    }

    reporter.report(Progress::PhaseStart {
        name: "Classifying atoms",
    });
    let classification = classify(lines, atom_count)?;
    reporter.report(Progress::PhaseFinish);

    let model_size = model.size();
    let waters = classification.water_count();
    let new_count = classification.output_atom_count(atom_count, model_size);
    info!(
        atoms = atom_count,
        waters,
        new_atoms = new_count,
        "Converting water molecules to '{}'.",
        model.name()
    );

    writeln!(writer, "{}", line_at(lines, 0)?)?;
    writeln!(writer, "{}", new_count)?;

    reporter.report(Progress::PhaseStart {
        name: "Rewriting atoms",
    });
    reporter.report(Progress::TaskStart {
        total_steps: waters as u64,
    });

    let mut next_index = 1;
    for span in &classification.spans {
        match *span {
            Span::Atom { line } => {
                let record = rewrite_line(line_at(lines, line)?, next_index, None, None)?;
                writeln!(writer, "{}", record)?;
                next_index += 1;
            }
            Span::Water { start, .. } => {
                write_water(writer, lines, start, next_index, model)?;
                next_index += model_size;
                reporter.report(Progress::TaskIncrement);
            }
        }
    }

    let section_end = atom_count + FIRST_ATOM_LINE;
    for (index, line) in lines.iter().enumerate().skip(classification.resume_at) {
        let line = line.as_ref();
        if index < section_end {
            writeln!(writer, "{}", rewrite_line(line, next_index, None, None)?)?;
            next_index += 1;
        } else {
            writeln!(writer, "{}", line)?;
        }
    }
    writer.flush()?;

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    debug_assert_eq!(next_index - 1, new_count);

    let summary = ConversionSummary {
        waters_converted: waters,
        atoms_in: atom_count,
        atoms_out: new_count,
        sites_discarded: classification.discarded_sites(),
    };
    info!(
        waters = summary.waters_converted,
        discarded = summary.sites_discarded,
        "Conversion finished."
    );
    Ok(summary)
}
