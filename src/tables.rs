use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::band::EnergyBand, quantity::distance::Miles};

#[must_use]
pub fn build_bands_table(bands: &[EnergyBand]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Band", "Range", "Range (mi)", "Contour"]);
    for band in bands {
        table.add_row(vec![
            Cell::new(band.label).add_attribute(Attribute::Bold),
            Cell::new(band.range).set_alignment(CellAlignment::Right),
            Cell::new(Miles::from(band.range))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            if band.geometry.is_some() {
                Cell::new("mapped").fg(Color::Green)
            } else {
                Cell::new("missing").fg(Color::DarkYellow)
            },
        ]);
    }
    table
}
