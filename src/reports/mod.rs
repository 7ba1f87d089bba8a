use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyevolve::keyboard::{Key, Layout};
use keyevolve::scorer::Evaluation;

const RULE: &str = "----------";

fn render_plane<'a>(out: &mut String, layout: &'a Layout, plane: impl Fn(usize) -> &'a [Key]) {
    let row_count = layout.rows().len();
    for row in 0..row_count {
        out.push('\n');
        // Lower rows sit further right, like a staggered board.
        out.push_str(&" ".repeat(row + row / row_count));
        for key in plane(row) {
            out.push(*key);
            out.push(' ');
        }
    }
    out.push('\n');
}

/// Text grid of the unshifted plane, optionally followed by the shifted one.
pub fn render_layout(layout: &Layout, shift: bool) -> String {
    let rows = layout.rows();
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nNON-SHIFT");
    render_plane(&mut out, layout, |r| rows[r].unshifted.as_slice());
    out.push_str(RULE);
    if shift {
        out.push_str("\nSHIFT");
        render_plane(&mut out, layout, |r| rows[r].shifted.as_slice());
        out.push_str(RULE);
    }
    out
}

pub fn print_layout(name: &str, layout: &Layout, shift: bool) {
    println!("\nLayout: {}", name);
    println!("{}", render_layout(layout, shift));
    let home: String = layout.home_keys().iter().collect();
    println!("Home keys: {}", home);
}

pub fn print_scoring_report(results: &[(String, Evaluation)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Typed"),
        Cell::new("Skipped"),
        Cell::new("Cost/Key"),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, e) in results {
        let per_key = if e.typed > 0 {
            e.cost / e.typed as f64
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", e.cost)).fg(Color::Cyan),
            Cell::new(e.typed),
            Cell::new(e.skipped),
            Cell::new(format!("{:.4}", per_key)),
        ]);
    }
    println!("\n{}", table);
}
