// ============================================================================
// Vue : onglet Settings
// ============================================================================

use std::path::Path;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::ui::theme::Palette;

/// Dessine les préférences courantes et leurs raccourcis
pub fn render(frame: &mut Frame, settings: &Settings, path: Option<&Path>, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(" Display Settings ", palette.title()));

    let row = |label: &'static str, value: String, key: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), palette.muted()),
            Span::styled(format!("{:<12}", value), palette.body()),
            Span::styled(key, palette.key_hint()),
        ])
    };

    let location = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".to_string());

    let mut lines = vec![
        Line::from(""),
        row("Theme", settings.theme.label().to_string(), "[t] toggle"),
        row("Font size", settings.font_size.label().to_string(), "[+/-] change"),
        row("Base currency", settings.base_currency.clone(), "[ [ ] ] on Rates tab"),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{:<16}", "Config file"), palette.muted()),
            Span::styled(location, palette.body()),
        ]),
        Line::from(Span::styled("Preferences are saved when you quit.", palette.muted())),
    ];

    // Taille Large : lignes aérées
    if palette.row_spacing > 0 {
        lines = lines
            .into_iter()
            .flat_map(|line| [line, Line::from("")])
            .collect();
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
