use std::fmt::Write;

use crate::store::LabelMap;

/// Column widths for [`render_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Right-aligned id column.
    pub id_width: usize,
    /// Left-aligned label column.
    pub label_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            id_width: 7,
            label_width: 50,
        }
    }
}

/// Render `map` as a two-column `ID | LABEL` table, one line per label in
/// insertion order. Every line, the last included, ends with `\n`.
///
/// The rule line puts its `+` under the `|` of the other lines.
pub fn render_table(map: &LabelMap, options: &RenderOptions) -> String {
    let RenderOptions {
        id_width,
        label_width,
    } = *options;
    let mut out = String::new();
    let _ = writeln!(out, "{:>id_width$} | {:<label_width$}", "ID", "LABEL");
    let _ = writeln!(
        out,
        "{}+{}",
        "-".repeat(id_width + 1),
        "-".repeat(label_width + 1)
    );
    for (label, id) in map.map() {
        let _ = writeln!(
            out,
            "{:>id_width$} | {:<label_width$}",
            id.to_string(),
            label
        );
    }
    out
}
