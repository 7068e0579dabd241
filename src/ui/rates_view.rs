// ============================================================================
// Vue : onglet Rates
// ============================================================================
// Affiche les taux de change pour la devise de base courante
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::RatesBoard;
use crate::config::Settings;
use crate::models::{format_rate, ExchangeRates};
use crate::ui::theme::Palette;

/// Dessine l'onglet Rates
pub fn render(frame: &mut Frame, board: &RatesBoard, settings: &Settings, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_status(frame, board, settings, palette, chunks[0]);

    match &board.rates {
        // Les taux affichés ne correspondent plus à la base choisie : on
        // attend la réponse en cours plutôt que d'afficher des valeurs fausses
        Some(rates) if rates.base == settings.base_currency => {
            render_table(frame, rates, palette, chunks[1])
        }
        _ => render_placeholder(frame, board, palette, chunks[1]),
    }
}

/// Base, heure de mise à jour, état du chargement
fn render_status(frame: &mut Frame, board: &RatesBoard, settings: &Settings, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(" Exchange Rates ", palette.title()));

    let updated = board
        .rates
        .as_ref()
        .map(|rates| rates.fetched_at.format("%d/%m/%Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    let state = if board.loading {
        Span::styled("⏳ Loading...", palette.key_hint())
    } else if let Some(error) = &board.error {
        Span::styled(format!("⚠ {}", error), palette.amount(false))
    } else {
        Span::styled("✓ Up to date", palette.amount(true))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Base currency: ", palette.muted()),
            Span::styled(format!("1 {}", settings.base_currency), palette.body()),
            Span::raw("   "),
            state,
        ]),
        Line::from(vec![
            Span::styled("Last update: ", palette.muted()),
            Span::styled(updated, palette.body()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Tableau code / taux, dans l'ordre des devises suivies
fn render_table(frame: &mut Frame, rates: &ExchangeRates, palette: &Palette, area: Rect) {
    let header = Row::new(vec![Cell::from("Currency"), Cell::from("Rate")])
        .style(palette.title())
        .bottom_margin(1);

    let rows: Vec<Row> = rates
        .ordered()
        .into_iter()
        .map(|(code, rate)| {
            let value = rate.map(format_rate).unwrap_or_else(|| "n/a".to_string());
            Row::new(vec![
                Cell::from(Span::styled(code, palette.body())),
                Cell::from(Span::styled(value, palette.body())),
            ])
            .bottom_margin(palette.row_spacing)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(Span::styled(format!(" 1 {} = ", rates.base), palette.title())),
        );

    frame.render_widget(table, area);
}

/// Pas encore de taux : chargement, erreur ou invitation à rafraîchir
fn render_placeholder(frame: &mut Frame, board: &RatesBoard, palette: &Palette, area: Rect) {
    let message = if board.loading {
        Span::styled("Fetching live rates...", palette.muted())
    } else if board.error.is_some() {
        Span::styled("Could not load rates, press [r] to retry", palette.amount(false))
    } else {
        Span::styled("Press [r] to load live rates", palette.muted())
    };

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
