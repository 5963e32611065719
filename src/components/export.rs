//! Export report panel

use maud::{Markup, html};

/// Renders the plain-text report in a read-only text area
pub fn export_panel(report: &str) -> Markup {
    html! {
        section class="export-panel" {
            h2 { "Exportar comentarios" }
            textarea class="export-text" readonly rows="12" { (report) }
        }
    }
}
