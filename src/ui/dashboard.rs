// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine le cadre commun (header, onglets, footer) et délègue le contenu
// à la vue de l'onglet actif.
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Widgets : Block, Paragraph, Tabs
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Status, Tab};
use crate::ui::theme::Palette;
use crate::ui::{rates_view, settings_view, transactions_view};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que chaque onglet a sa vue
pub fn render(frame: &mut Frame, app: &App) {
    // Les préférences sont résolues une fois puis passées explicitement
    let palette = Palette::resolve(&app.settings);
    let size = frame.size();

    // Fond de l'écran selon le thème
    frame.render_widget(Block::default().style(palette.base()), size);

    let chunks = create_layout(size);

    render_header(frame, &palette, chunks[0]);
    render_tabs(frame, app, &palette, chunks[1]);

    match app.current_tab {
        Tab::Transactions => transactions_view::render(frame, app, &palette, chunks[2]),
        Tab::Rates => rates_view::render(frame, &app.rates, &app.settings, &palette, chunks[2]),
        Tab::Settings => settings_view::render(
            frame,
            &app.settings,
            app.settings_path.as_deref(),
            &palette,
            chunks[2],
        ),
    }

    render_footer(frame, app, &palette, chunks[3]);
}

/// Crée le layout principal (header, onglets, contenu, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header : titre + slogan
            Constraint::Length(3), // Onglets
            Constraint::Min(0),    // Contenu : tout le reste
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Dessine le header avec le titre
fn render_header(frame: &mut Frame, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border());

    let text = vec![
        Line::from(Span::styled("fineas", palette.title())),
        Line::from(Span::styled("Track your money, build your future", palette.muted())),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Barre d'onglets ("1 Transactions", "2 Rates", "3 Settings")
fn render_tabs(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .select(app.current_tab.index())
        .style(palette.muted())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

// ============================================================================
// Footer : raccourcis, confirmation de quit ou message de statut
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border());

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", Style::default().fg(palette.expense).add_modifier(Modifier::BOLD)),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(palette.expense)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(palette.expense).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(status) = &app.status {
        match status {
            Status::Info(message) => Line::from(Span::styled(message.clone(), palette.amount(true))),
            Status::Error(message) => Line::from(vec![
                Span::styled("Error: ", palette.amount(false)),
                Span::styled(message.clone(), palette.body()),
            ]),
        }
    } else {
        shortcuts_line(app, palette)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Raccourcis contextuels selon l'onglet et le mode
fn shortcuts_line<'a>(app: &App, palette: &Palette) -> Line<'a> {
    let hint = |key: &'a str, label: &'a str| -> Vec<Span<'a>> {
        vec![Span::styled(key, palette.key_hint()), Span::raw(label)]
    };

    let mut spans = Vec::new();

    if app.is_editing() {
        spans.extend(hint("[Enter]", " Add  "));
        spans.extend(hint("[Tab]", " Field  "));
        spans.extend(hint("[←→]", " Type  "));
        spans.extend(hint("[Esc]", " Close"));
        return Line::from(spans);
    }

    spans.extend(hint("[q]", " Quit  "));
    spans.extend(hint("[Tab/1-3]", " Tabs  "));

    match app.current_tab {
        Tab::Transactions => {
            spans.extend(hint("[a]", " Add  "));
            spans.extend(hint("[↑↓ / j k]", " Scroll  "));
        }
        Tab::Rates => {
            spans.extend(hint("[r]", " Refresh  "));
            spans.extend(hint("[ [ ] ]", " Base  "));
        }
        Tab::Settings => {}
    }

    spans.extend(hint("[t]", " Theme  "));
    spans.extend(hint("[+/-]", " Size"));

    Line::from(spans)
}
