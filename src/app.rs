// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Ownership : App possède le Ledger, l'UI ne le lit que par référence
// 3. Enums pour state machines : onglet actif, mode de saisie
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les actions qui nécessitent le réseau retournent une AppCommand que
//   l'event loop transmet au worker
// ============================================================================

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::models::rates::{next_currency, previous_currency};
use crate::models::{ExchangeRates, Ledger, RequestTracker, Totals, TransactionKind};
use crate::worker::{AppCommand, AppResult};

// ============================================================================
// Enum : Tab
// ============================================================================

/// Onglets de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Résumé, formulaire d'ajout et liste des transactions
    #[default]
    Transactions,

    /// Taux de change en direct
    Rates,

    /// Thème, taille de police, devise de base
    Settings,
}

impl Tab {
    /// Tous les onglets dans l'ordre d'affichage
    pub const ALL: [Tab; 3] = [Tab::Transactions, Tab::Rates, Tab::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Transactions => "Transactions",
            Tab::Rates => "Rates",
            Tab::Settings => "Settings",
        }
    }

    /// Position dans la barre d'onglets
    pub fn index(&self) -> usize {
        match self {
            Tab::Transactions => 0,
            Tab::Rates => 1,
            Tab::Settings => 2,
        }
    }

    /// Onglet à une position donnée (touches 1, 2, 3)
    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    /// Cycle : Transactions → Rates → Settings → Transactions
    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Mode de saisie
///
/// CONCEPT : Modal input (Vim-like)
/// - Normal : les touches sont des raccourcis
/// - Editing : les touches remplissent le formulaire d'ajout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Champ texte actif du formulaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Amount,
    Description,
}

/// Formulaire "Add New Transaction"
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    /// Montant tel que saisi (validé par le ledger)
    pub amount: String,
    pub description: String,
    /// Sélecteur Expense / Income (Expense par défaut)
    pub kind: TransactionKind,
    pub focus: FormField,
}

impl AddForm {
    /// Ajoute un caractère au champ actif
    ///
    /// Le champ montant n'accepte que des chiffres, '.' et '-' : le reste
    /// ne pourrait de toute façon jamais former un montant valide.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Amount => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.amount.push(c);
                }
            }
            FormField::Description => self.description.push(c),
        }
    }

    /// Supprime le dernier caractère du champ actif
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Amount => FormField::Description,
            FormField::Description => FormField::Amount,
        };
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }

    /// Vide montant et description après un ajout réussi
    ///
    /// Le type sélectionné est conservé (comme dans le formulaire d'origine).
    pub fn clear_inputs(&mut self) {
        self.amount.clear();
        self.description.clear();
        self.focus = FormField::Amount;
    }
}

/// Erreur affichée quand le worker des taux a disparu
pub const WORKER_UNAVAILABLE: &str = "Rates service unavailable";

/// Message affiché dans le footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// État de l'onglet Rates
#[derive(Debug, Clone, Default)]
pub struct RatesBoard {
    /// Derniers taux appliqués
    pub rates: Option<ExchangeRates>,

    /// Une requête est en cours (la dernière émise)
    pub loading: bool,

    /// Erreur de la dernière requête
    pub error: Option<String>,

    /// Numérotation des requêtes : seule la dernière est appliquée
    pub tracker: RequestTracker,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' = demande de confirmation
    pub confirm_quit: bool,

    pub current_tab: Tab,

    pub input_mode: InputMode,

    /// Ledger de la session (jamais persisté)
    pub ledger: Ledger,

    pub form: AddForm,

    pub rates: RatesBoard,

    /// Préférences d'affichage, passées explicitement au rendu
    pub settings: Settings,

    /// Fichier d'où viennent les préférences (affiché dans Settings)
    pub settings_path: Option<PathBuf>,

    /// Index de la transaction sélectionnée dans la liste
    pub selected_index: usize,

    /// Dernier message pour l'utilisateur (succès ou erreur)
    pub status: Option<Status>,
}

impl App {
    /// Crée l'application avec un ledger vide
    pub fn new(settings: Settings) -> Self {
        Self {
            running: true,
            confirm_quit: false,
            current_tab: Tab::default(),
            input_mode: InputMode::default(),
            ledger: Ledger::new(),
            form: AddForm::default(),
            rates: RatesBoard::default(),
            settings,
            settings_path: None,
            selected_index: 0,
            status: None,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Onglets
    // ========================================================================

    /// Change d'onglet
    ///
    /// Activer l'onglet Rates déclenche un rafraîchissement des taux :
    /// la commande retournée doit être envoyée au worker.
    pub fn select_tab(&mut self, tab: Tab) -> Option<AppCommand> {
        if tab == self.current_tab {
            return None;
        }

        info!(from = self.current_tab.title(), to = tab.title(), "Switching tab");
        self.current_tab = tab;

        if tab == Tab::Rates {
            Some(self.refresh_rates())
        } else {
            None
        }
    }

    pub fn next_tab(&mut self) -> Option<AppCommand> {
        self.select_tab(self.current_tab.next())
    }

    pub fn previous_tab(&mut self) -> Option<AppCommand> {
        self.select_tab(self.current_tab.previous())
    }

    // ========================================================================
    // Taux de change
    // ========================================================================

    /// Émet une nouvelle requête de taux pour la devise de base courante
    ///
    /// CONCEPT : Requête numérotée
    /// - Chaque appel invalide les requêtes précédentes encore en vol
    pub fn refresh_rates(&mut self) -> AppCommand {
        let request = self.rates.tracker.issue();
        self.rates.loading = true;
        self.rates.error = None;

        debug!(request, base = %self.settings.base_currency, "Issuing rates refresh");
        AppCommand::RefreshRates {
            request,
            base: self.settings.base_currency.clone(),
        }
    }

    /// Devise de base suivante + rafraîchissement
    pub fn next_base_currency(&mut self) -> AppCommand {
        self.settings.base_currency = next_currency(&self.settings.base_currency).to_string();
        self.refresh_rates()
    }

    /// Devise de base précédente + rafraîchissement
    pub fn previous_base_currency(&mut self) -> AppCommand {
        self.settings.base_currency = previous_currency(&self.settings.base_currency).to_string();
        self.refresh_rates()
    }

    /// Applique un résultat du worker
    ///
    /// Retourne false si le résultat est périmé (une requête plus récente
    /// a été émise entre-temps) : il est alors ignoré.
    pub fn apply_result(&mut self, result: AppResult) -> bool {
        let request = result.request();
        if !self.rates.tracker.is_current(request) {
            warn!(
                request,
                latest = self.rates.tracker.latest(),
                "Discarding stale rates response"
            );
            return false;
        }

        match result {
            AppResult::RatesLoaded { rates, .. } => {
                info!(request, base = %rates.base, "Applying rates");
                self.rates.rates = Some(rates);
                self.rates.error = None;
            }
            AppResult::RatesFailed { base, error, .. } => {
                warn!(request, base = %base, error = %error, "Rates refresh failed");
                self.rates.error = Some(error);
            }
        }

        self.rates.loading = false;
        true
    }

    /// Le worker ne répond plus : la requête en cours n'aboutira jamais
    pub fn mark_worker_unavailable(&mut self) {
        if self.rates.loading {
            warn!(request = self.rates.tracker.latest(), "Rates request dropped, worker unavailable");
            self.rates.loading = false;
            self.rates.error = Some(WORKER_UNAVAILABLE.to_string());
        }
    }

    // ========================================================================
    // Formulaire d'ajout
    // ========================================================================

    /// Ouvre le formulaire (passe en mode Editing sur l'onglet Transactions)
    pub fn start_editing(&mut self) {
        self.current_tab = Tab::Transactions;
        self.input_mode = InputMode::Editing;
        self.status = None;
    }

    /// Ferme le formulaire sans rien ajouter (la saisie est conservée)
    pub fn cancel_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }

    /// Valide le formulaire
    ///
    /// - Succès : transaction ajoutée, champs vidés, retour en mode Normal
    /// - Erreur : message d'erreur, champs conservés pour correction
    pub fn submit_form(&mut self) -> bool {
        match self
            .ledger
            .add_transaction(&self.form.amount, self.form.kind, &self.form.description)
        {
            Ok(tx) => {
                let message = format!(
                    "Added {} \"{}\" {}",
                    tx.category().to_lowercase(),
                    tx.description(),
                    crate::models::format_currency(tx.amount())
                );
                info!(id = %tx.id(), "Transaction submitted");

                self.form.clear_inputs();
                self.input_mode = InputMode::Normal;
                self.selected_index = 0;
                self.status = Some(Status::Info(message));
                true
            }
            Err(e) => {
                debug!(error = %e, "Transaction form rejected");
                self.status = Some(Status::Error(e.to_string()));
                false
            }
        }
    }

    // ========================================================================
    // Liste des transactions
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.ledger.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Totaux recalculés à chaque appel (aucun cache)
    pub fn totals(&self) -> Totals {
        self.ledger.compute_totals()
    }

    // ========================================================================
    // Préférences d'affichage
    // ========================================================================

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggle();
        info!(theme = self.settings.theme.label(), "Theme changed");
    }

    pub fn larger_font(&mut self) {
        self.settings.font_size = self.settings.font_size.larger();
        info!(font_size = self.settings.font_size.label(), "Font size changed");
    }

    pub fn smaller_font(&mut self) {
        self.settings.font_size = self.settings.font_size.smaller();
        info!(font_size = self.settings.font_size.label(), "Font size changed");
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontSize, Theme};
    use std::collections::HashMap;

    fn fill_form(app: &mut App, amount: &str, description: &str, kind: TransactionKind) {
        app.start_editing();
        app.form.amount = amount.to_string();
        app.form.description = description.to_string();
        app.form.kind = kind;
    }

    fn sample_rates(base: &str) -> ExchangeRates {
        let mapping: HashMap<String, f64> = [("USD".to_string(), 1.08), ("EUR".to_string(), 0.92)]
            .into_iter()
            .collect();
        ExchangeRates::from_mapping(base, &mapping)
    }

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert!(app.ledger.is_empty());
        assert_eq!(app.current_tab, Tab::Transactions);
        assert_eq!(app.form.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_submit_clears_inputs() {
        let mut app = App::default();
        fill_form(&mut app, "100", "Salary", TransactionKind::Income);

        assert!(app.submit_form());
        assert_eq!(app.ledger.len(), 1);
        assert!(app.form.amount.is_empty());
        assert!(app.form.description.is_empty());
        assert_eq!(app.form.kind, TransactionKind::Income);
        assert!(!app.is_editing());
        assert!(matches!(app.status, Some(Status::Info(_))));
    }

    #[test]
    fn test_failed_submit_keeps_inputs() {
        let mut app = App::default();
        fill_form(&mut app, "-5", "Refund", TransactionKind::Expense);

        assert!(!app.submit_form());
        assert!(app.ledger.is_empty());
        assert_eq!(app.form.amount, "-5");
        assert_eq!(app.form.description, "Refund");
        assert!(app.is_editing());
        assert_eq!(
            app.status,
            Some(Status::Error("Please enter a valid amount".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_status() {
        let mut app = App::default();
        fill_form(&mut app, "10", "   ", TransactionKind::Expense);

        assert!(!app.submit_form());
        assert_eq!(
            app.status,
            Some(Status::Error("Please fill in all fields".to_string()))
        );
    }

    #[test]
    fn test_amount_field_filters_characters() {
        let mut form = AddForm::default();
        for c in "12a.5€".chars() {
            form.push_char(c);
        }
        assert_eq!(form.amount, "12.5");

        form.toggle_focus();
        for c in "Café".chars() {
            form.push_char(c);
        }
        assert_eq!(form.description, "Café");

        form.backspace();
        assert_eq!(form.description, "Caf");
    }

    #[test]
    fn test_switching_to_rates_issues_refresh() {
        let mut app = App::default();

        let command = app.select_tab(Tab::Rates);
        assert_eq!(
            command,
            Some(AppCommand::RefreshRates {
                request: 1,
                base: "EUR".to_string(),
            })
        );
        assert!(app.rates.loading);

        // Déjà sur Rates : pas de nouvelle requête
        assert_eq!(app.select_tab(Tab::Rates), None);
        // Autres onglets : pas de requête
        assert_eq!(app.select_tab(Tab::Settings), None);
    }

    #[test]
    fn test_stale_rates_are_discarded() {
        let mut app = App::default();
        let first = app.refresh_rates();
        let second = app.next_base_currency();

        let (AppCommand::RefreshRates { request: old, .. }, AppCommand::RefreshRates { request: new, base }) =
            (first, second);
        assert_eq!(base, "USD");

        // L'ancienne réponse arrive après la nouvelle requête : ignorée
        assert!(!app.apply_result(AppResult::RatesLoaded {
            request: old,
            rates: sample_rates("EUR"),
        }));
        assert!(app.rates.rates.is_none());
        assert!(app.rates.loading);

        assert!(app.apply_result(AppResult::RatesLoaded {
            request: new,
            rates: sample_rates("USD"),
        }));
        assert_eq!(app.rates.rates.as_ref().map(|r| r.base.as_str()), Some("USD"));
        assert!(!app.rates.loading);
    }

    #[test]
    fn test_worker_unavailable_stops_loading() {
        let mut app = App::default();
        app.refresh_rates();
        assert!(app.rates.loading);

        app.mark_worker_unavailable();
        assert!(!app.rates.loading);
        assert_eq!(app.rates.error.as_deref(), Some(WORKER_UNAVAILABLE));

        // Sans requête en cours, l'état affiché n'est pas touché
        let mut idle = App::default();
        idle.mark_worker_unavailable();
        assert_eq!(idle.rates.error, None);
    }

    #[test]
    fn test_rates_failure_sets_error() {
        let mut app = App::default();
        let AppCommand::RefreshRates { request, base } = app.refresh_rates();

        assert!(app.apply_result(AppResult::RatesFailed {
            request,
            base,
            error: "HTTP 500".to_string(),
        }));
        assert_eq!(app.rates.error.as_deref(), Some("HTTP 500"));
        assert!(!app.rates.loading);
    }

    #[test]
    fn test_navigation() {
        let mut app = App::default();
        for (amount, description) in [("1", "a"), ("2", "b"), ("3", "c")] {
            fill_form(&mut app, amount, description, TransactionKind::Expense);
            app.submit_form();
        }

        app.navigate_down();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_display_preferences() {
        let mut app = App::default();
        app.toggle_theme();
        app.larger_font();
        assert_eq!(app.settings.theme, Theme::Dark);
        assert_eq!(app.settings.font_size, FontSize::Large);

        app.smaller_font();
        app.smaller_font();
        assert_eq!(app.settings.font_size, FontSize::Small);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Transactions.next(), Tab::Rates);
        assert_eq!(Tab::Settings.next(), Tab::Transactions);
        assert_eq!(Tab::Transactions.previous(), Tab::Settings);
        assert_eq!(Tab::from_index(2), Some(Tab::Settings));
        assert_eq!(Tab::from_index(3), None);
    }
}
