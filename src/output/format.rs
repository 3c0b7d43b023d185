use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Only color when the terminal wants it
pub(super) fn color_if(use_color: bool, color: Color) -> Option<Color> {
    use_color.then_some(color)
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

/// Format a percentage share with one decimal: "75.0%"
pub(super) fn format_share(share: f64) -> String {
    format!("{share:.1}%")
}

/// Render JSON output; serde_json only fails here on non-string map keys
pub(super) fn to_json_string<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_has_one_decimal() {
        assert_eq!(format_share(75.0), "75.0%");
        assert_eq!(format_share(33.3333), "33.3%");
        assert_eq!(format_share(0.0), "0.0%");
    }

    #[test]
    fn color_only_when_enabled() {
        assert_eq!(color_if(false, Color::Red), None);
        assert_eq!(color_if(true, Color::Red), Some(Color::Red));
    }

    #[test]
    fn styled_table_renders_rows() {
        let mut table = create_styled_table();
        table.set_header(vec![header_cell("Day", false)]);
        table.add_row(vec![styled_cell("Monday", None, false)]);
        let rendered = table.to_string();
        assert!(rendered.contains("Monday"));
        assert!(rendered.contains('├'));
    }
}
