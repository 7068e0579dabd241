// ============================================================================
// Gestion des événements : clavier -> état
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Sépare la logique de gestion des événements de la boucle principale
// - Modifie l'état de App selon l'événement
// - Retourne une AppCommand quand une tâche async doit être lancée
//
// Aucune dépendance au terminal : testable avec de faux KeyEvent.
// ============================================================================

use tracing::{debug, info};

use crate::app::{App, Tab};
use crate::ui::events::{
    get_char_from_event, is_add_event, is_backspace_event, is_backtab_event, is_down_event,
    is_enter_event, is_escape_event, is_font_larger_event, is_font_smaller_event, is_force_quit_event,
    is_kind_toggle_event, is_next_base_event, is_previous_base_event, is_quit_event, is_refresh_event,
    is_tab_event, is_theme_event, is_up_event, tab_index_from_event, Event,
};
use crate::worker::AppCommand;

/// Traite un événement et met à jour l'état de l'application
pub fn handle_event(app: &mut App, event: &Event) -> Option<AppCommand> {
    if let Event::Tick = event {
        return None;
    }

    if is_force_quit_event(event) {
        info!("User forced quit");
        app.quit();
        return None;
    }

    if app.is_editing() {
        handle_editing(app, event);
        return None;
    }

    handle_normal(app, event)
}

/// Mode Editing : les touches remplissent le formulaire
fn handle_editing(app: &mut App, event: &Event) {
    if is_escape_event(event) {
        info!("User closed the add form");
        app.cancel_editing();
    } else if is_enter_event(event) {
        app.submit_form();
    } else if is_tab_event(event) || is_backtab_event(event) {
        app.form.toggle_focus();
    } else if is_kind_toggle_event(event) {
        app.form.toggle_kind();
        debug!(kind = app.form.kind.label(), "Form kind toggled");
    } else if is_backspace_event(event) {
        app.form.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        app.form.push_char(c);
    }
}

/// Mode Normal : raccourcis
fn handle_normal(app: &mut App, event: &Event) -> Option<AppCommand> {
    // Two-step quit : toute autre touche annule la demande
    if is_quit_event(event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return None;
    }
    app.cancel_quit();
    // Le message précédent est acquitté par la touche suivante
    app.status = None;

    // Navigation entre onglets
    if is_tab_event(event) {
        return app.next_tab();
    }
    if is_backtab_event(event) {
        return app.previous_tab();
    }
    if let Some(tab) = tab_index_from_event(event).and_then(Tab::from_index) {
        return app.select_tab(tab);
    }

    // Préférences d'affichage (tous les onglets)
    if is_theme_event(event) {
        app.toggle_theme();
        return None;
    }
    if is_font_larger_event(event) {
        app.larger_font();
        return None;
    }
    if is_font_smaller_event(event) {
        app.smaller_font();
        return None;
    }

    match app.current_tab {
        Tab::Transactions => {
            if is_add_event(event) {
                info!("User opened the add form");
                app.start_editing();
            } else if is_up_event(event) {
                app.navigate_up();
            } else if is_down_event(event) {
                app.navigate_down();
            }
            None
        }
        Tab::Rates => {
            if is_refresh_event(event) {
                info!("User requested rates refresh");
                Some(app.refresh_rates())
            } else if is_next_base_event(event) {
                Some(app.next_base_currency())
            } else if is_previous_base_event(event) {
                Some(app.previous_base_currency())
            } else {
                None
            }
        }
        Tab::Settings => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, &key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::default();

        handle_event(&mut app, &key(KeyCode::Char('q')));
        assert!(app.is_running());
        assert!(app.is_awaiting_quit_confirmation());

        // Autre touche : annulation
        handle_event(&mut app, &key(KeyCode::Char('j')));
        assert!(!app.is_awaiting_quit_confirmation());

        handle_event(&mut app, &key(KeyCode::Char('q')));
        handle_event(&mut app, &key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn test_add_transaction_with_keyboard() {
        let mut app = App::default();

        handle_event(&mut app, &key(KeyCode::Char('a')));
        assert!(app.is_editing());

        type_text(&mut app, "25.5");
        handle_event(&mut app, &key(KeyCode::Tab));
        type_text(&mut app, "Coffee");
        handle_event(&mut app, &key(KeyCode::Enter));

        assert!(!app.is_editing());
        assert_eq!(app.ledger.len(), 1);
        let tx = app.ledger.latest().unwrap();
        assert_eq!(tx.description(), "Coffee");
        assert_eq!(tx.kind(), TransactionKind::Expense);
        assert_eq!(app.totals().total_expense, 25.5);
    }

    #[test]
    fn test_editing_keys_are_not_shortcuts() {
        let mut app = App::default();
        handle_event(&mut app, &key(KeyCode::Char('a')));
        handle_event(&mut app, &key(KeyCode::Tab));

        // 'q' et 't' sont du texte dans le formulaire
        type_text(&mut app, "qt");
        assert!(app.is_running());
        assert_eq!(app.form.description, "qt");
        assert_eq!(app.settings.theme, crate::config::Theme::Light);
    }

    #[test]
    fn test_kind_toggle_and_escape() {
        let mut app = App::default();
        handle_event(&mut app, &key(KeyCode::Char('a')));
        handle_event(&mut app, &key(KeyCode::Right));
        assert_eq!(app.form.kind, TransactionKind::Income);

        handle_event(&mut app, &key(KeyCode::Esc));
        assert!(!app.is_editing());
    }

    #[test]
    fn test_tab_key_enters_rates_and_requests_refresh() {
        let mut app = App::default();

        let command = handle_event(&mut app, &key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Rates);
        assert!(matches!(command, Some(AppCommand::RefreshRates { request: 1, .. })));

        let command = handle_event(&mut app, &key(KeyCode::Char('r')));
        assert!(matches!(command, Some(AppCommand::RefreshRates { request: 2, .. })));

        let command = handle_event(&mut app, &key(KeyCode::Char(']')));
        assert_eq!(
            command,
            Some(AppCommand::RefreshRates {
                request: 3,
                base: "USD".to_string(),
            })
        );
    }

    #[test]
    fn test_number_keys_select_tab() {
        let mut app = App::default();
        assert!(handle_event(&mut app, &key(KeyCode::Char('3'))).is_none());
        assert_eq!(app.current_tab, Tab::Settings);

        handle_event(&mut app, &key(KeyCode::Char('1')));
        assert_eq!(app.current_tab, Tab::Transactions);
    }

    #[test]
    fn test_preferences_shortcuts() {
        let mut app = App::default();
        handle_event(&mut app, &key(KeyCode::Char('t')));
        handle_event(&mut app, &key(KeyCode::Char('+')));
        assert_eq!(app.settings.theme, crate::config::Theme::Dark);
        assert_eq!(app.settings.font_size, crate::config::FontSize::Large);
    }
}
