// ============================================================================
// Vue : onglet Transactions
// ============================================================================
// Trois zones :
// 1. Cartes de résumé (Income, Expenses, Balance)
// 2. Formulaire "Add New Transaction"
// 3. Liste des transactions récentes (la plus récente en haut)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{AddForm, App, FormField};
use crate::models::{format_currency, format_signed, Transaction, TransactionKind};
use crate::ui::theme::Palette;

/// Longueur max d'une description dans la liste
const DESCRIPTION_WIDTH: usize = 30;

/// Dessine l'onglet Transactions
pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Cartes de résumé
            Constraint::Length(7), // Formulaire
            Constraint::Min(0),    // Liste
        ])
        .split(area);

    render_summary(frame, app, palette, chunks[0]);
    render_form(frame, &app.form, app.is_editing(), palette, chunks[1]);
    render_list(frame, app, palette, chunks[2]);
}

// ============================================================================
// Cartes de résumé
// ============================================================================

/// Income / Expenses / Balance côte à côte
///
/// Les totaux sont recalculés à chaque frame depuis le ledger.
fn render_summary(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let totals = app.totals();

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let entries = [
        ("Income", totals.total_income, true),
        ("Expenses", totals.total_expense, false),
        ("Balance", totals.balance, totals.is_balance_positive()),
    ];

    for ((label, value, positive), card) in entries.into_iter().zip(cards.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border())
            .title(Span::styled(format!(" {} ", label), palette.muted()));

        let paragraph = Paragraph::new(Line::from(Span::styled(
            format_currency(value),
            palette.amount(positive),
        )))
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, *card);
    }
}

// ============================================================================
// Formulaire
// ============================================================================

/// Dessine le formulaire d'ajout
///
/// En mode Editing, le champ actif affiche un curseur et la bordure passe
/// à la couleur des revenus pour signaler la saisie.
fn render_form(frame: &mut Frame, form: &AddForm, editing: bool, palette: &Palette, area: Rect) {
    let border_style = if editing {
        Style::default().fg(palette.income)
    } else {
        palette.border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Add New Transaction ", palette.title()));

    let lines = vec![
        kind_selector(form.kind, palette),
        input_line(
            "Amount (€)   ",
            &form.amount,
            "0.00",
            editing && form.focus == FormField::Amount,
            palette,
        ),
        input_line(
            "Description  ",
            &form.description,
            "What was this for?",
            editing && form.focus == FormField::Description,
            palette,
        ),
        Line::from(""),
        if editing {
            Line::from(Span::styled("[Enter] Add Transaction", palette.key_hint()))
        } else {
            Line::from(Span::styled("[a] Add Transaction", palette.muted()))
        },
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// "💸 Expense   💰 Income" avec l'option active en surbrillance
fn kind_selector<'a>(selected: TransactionKind, palette: &Palette) -> Line<'a> {
    let option = |kind: TransactionKind| {
        let label = format!(" {} {} ", kind.icon(), kind.label());
        if kind == selected {
            Span::styled(
                label,
                Style::default()
                    .fg(palette.background)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, palette.muted())
        }
    };

    Line::from(vec![
        option(TransactionKind::Expense),
        Span::raw("  "),
        option(TransactionKind::Income),
    ])
}

/// Ligne "Label valeur█" (ou placeholder grisé si vide)
fn input_line<'a>(label: &'a str, value: &str, placeholder: &'a str, focused: bool, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::styled(label, palette.body())];

    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder, palette.muted()));
    } else {
        spans.push(Span::styled(value.to_string(), palette.body()));
    }

    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(palette.text).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    Line::from(spans)
}

// ============================================================================
// Liste des transactions
// ============================================================================

/// Dessine la liste, ou l'état vide
fn render_list(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(
            format!(" Recent Transactions ({}) ", app.ledger.len()),
            palette.title(),
        ));

    if app.ledger.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", palette.body())),
            Line::from(Span::styled(
                "Add your first transaction above to get started!",
                palette.muted(),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .ledger
        .transactions()
        .iter()
        .map(|tx| transaction_item(tx, palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight).add_modifier(Modifier::BOLD));

    // CONCEPT RATATUI : StatefulWidget
    // - ListState garde la sélection et fait défiler la liste si besoin
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Une ligne de la liste : icône, description, date, montant signé
fn transaction_item<'a>(tx: &Transaction, palette: &Palette) -> ListItem<'a> {
    let line = Line::from(vec![
        Span::raw(format!(" {} ", tx.kind().icon())),
        Span::styled(
            format!("{:<width$}", truncate(tx.description(), DESCRIPTION_WIDTH), width = DESCRIPTION_WIDTH),
            palette.body(),
        ),
        Span::styled(format!(" {:>10} ", tx.display_date()), palette.muted()),
        Span::styled(
            format!("{:>16}", format_signed(tx.kind(), tx.amount())),
            palette.amount(tx.is_income()),
        ),
    ]);

    // Taille de police Large : une ligne vide entre les transactions
    let mut lines = vec![line];
    for _ in 0..palette.row_spacing {
        lines.push(Line::from(""));
    }

    ListItem::new(Text::from(lines))
}

/// Tronque avec ellipse si le texte dépasse max caractères
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max - 1).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use ratatui::{backend::TestBackend, Terminal};

    /// Rend l'écran complet dans un buffer et retourne son texte
    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| crate::ui::render(frame, app))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Salary", 10), "Salary");
        assert_eq!(truncate("A very long description", 10), "A very lo…");
    }

    #[test]
    fn test_empty_state_is_rendered() {
        let app = App::default();
        let screen = render_to_string(&app);

        assert!(screen.contains("No transactions yet"));
        assert!(screen.contains("Recent Transactions (0)"));
    }

    #[test]
    fn test_totals_are_rendered() {
        let mut app = App::default();
        app.ledger
            .add_transaction("100", TransactionKind::Income, "Salary")
            .unwrap();
        app.ledger
            .add_transaction("40", TransactionKind::Expense, "Groceries")
            .unwrap();

        let screen = render_to_string(&app);
        assert!(screen.contains("100,00 €"));
        assert!(screen.contains("40,00 €"));
        assert!(screen.contains("60,00 €"));
        assert!(screen.contains("Recent Transactions (2)"));
        assert!(screen.contains("Groceries"));
    }
}
