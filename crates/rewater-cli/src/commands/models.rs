use crate::error::Result;
use rewater::core::models::registry::ModelRegistry;
use rewater::core::models::water::WaterModel;
use std::io::{self, Write};

fn describe(model: &WaterModel) -> String {
    let g = model.geometry();
    let mut text = format!("r-oh {:.5} A, angle {:.2} deg", g.r_oh, g.angle);
    if g.has_m_site() {
        text.push_str(&format!(", r-om {:.5} A", g.r_om));
    }
    if g.has_lone_pairs() {
        text.push_str(&format!(", r-ol {:.3} A, lp-angle {:.2} deg", g.r_ol, g.lp_angle));
    }
    text
}

/// Writes the catalog, built-in models first, marking the default model.
pub fn write_catalog(out: &mut impl Write, registry: &ModelRegistry) -> io::Result<()> {
    let default_model = registry.default_model();
    writeln!(out, "Supported models:")?;
    for model in registry.models() {
        let marker = if model.name() == default_model.name() {
            " (default)"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<12} {} sites  {}{}",
            model.name(),
            model.size(),
            describe(&model),
            marker
        )?;
    }
    Ok(())
}

pub fn run(registry: &ModelRegistry) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_catalog(&mut stdout, registry)?;
    stdout.flush()?;
    Ok(())
}
