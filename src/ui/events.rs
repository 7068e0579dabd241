// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier et les ticks de l'application, et fournit des
// helpers pour reconnaître chaque raccourci.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (aucune entrée pendant le timeout)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au max tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release :
                // on ne garde que Press pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                // Resize, souris, Release... : le prochain draw s'adapte
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Extrait le KeyEvent d'un événement
fn key_of(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) => Some(key),
        Event::Tick => None,
    }
}

fn key_matches(event: &Event, predicate: impl Fn(KeyCode) -> bool) -> bool {
    key_of(event).map(|key| predicate(key.code)).unwrap_or(false)
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Ctrl+C : quitter immédiatement (le raw mode désactive le signal)
pub fn is_force_quit_event(event: &Event) -> bool {
    key_of(event)
        .map(|key| key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        .unwrap_or(false)
}

pub fn is_escape_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Esc)
}

pub fn is_enter_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Enter)
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Backspace)
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Down | KeyCode::Char('j')))
}

/// Tab : onglet suivant (mode Normal) ou champ suivant (mode Editing)
pub fn is_tab_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Tab)
}

/// Shift+Tab : onglet précédent
pub fn is_backtab_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::BackTab)
}

/// ← / → : bascule Expense / Income dans le formulaire
pub fn is_kind_toggle_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Left | KeyCode::Right))
}

/// 'a' : ouvrir le formulaire d'ajout
pub fn is_add_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('a') | KeyCode::Char('A')))
}

/// 'r' : rafraîchir les taux
pub fn is_refresh_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('r') | KeyCode::Char('R')))
}

/// 't' : basculer le thème
pub fn is_theme_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('t') | KeyCode::Char('T')))
}

/// '+' (ou '=' sans shift) : agrandir
pub fn is_font_larger_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('+') | KeyCode::Char('=')))
}

/// '-' : réduire
pub fn is_font_smaller_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Char('-'))
}

/// ']' : devise de base suivante
pub fn is_next_base_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Char(']'))
}

/// '[' : devise de base précédente
pub fn is_previous_base_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Char('['))
}

/// '1', '2', '3' : index de l'onglet (0-based)
pub fn tab_index_from_event(event: &Event) -> Option<usize> {
    match key_of(event)?.code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Extrait le caractère saisi (sans Ctrl/Alt)
pub fn get_char_from_event(event: &Event) -> Option<char> {
    let key = key_of(event)?;
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_force_quit_needs_control() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(is_force_quit_event(&ctrl_c));
        assert!(!is_force_quit_event(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(tab_index_from_event(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(tab_index_from_event(&key(KeyCode::Char('3'))), Some(2));
        assert_eq!(tab_index_from_event(&key(KeyCode::Char('0'))), None);
        assert_eq!(tab_index_from_event(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_get_char_ignores_control() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('x'))), Some('x'));
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(get_char_from_event(&ctrl_x), None);
        assert_eq!(get_char_from_event(&Event::Tick), None);
    }
}
