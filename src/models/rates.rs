// ============================================================================
// Taux de change
// ============================================================================
// Instantané des taux pour une devise de base, restreint à un ensemble
// fixe de devises suivies, et numérotation des requêtes de rafraîchissement.
// ============================================================================

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// Devises affichées dans l'onglet Rates, dans l'ordre d'affichage
pub const TRACKED_CURRENCIES: [&str; 8] = ["EUR", "USD", "GBP", "JPY", "CHF", "CAD", "AUD", "CNY"];

/// Devise de base utilisée quand la configuration n'en fournit pas de valide
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";

/// Vrai si le code fait partie des devises suivies
pub fn is_tracked(code: &str) -> bool {
    TRACKED_CURRENCIES.contains(&code)
}

/// Devise suivante dans la liste (cyclique), utilisée par la touche ]
///
/// Un code inconnu repart du début de la liste.
pub fn next_currency(code: &str) -> &'static str {
    match TRACKED_CURRENCIES.iter().position(|c| *c == code) {
        Some(i) => TRACKED_CURRENCIES[(i + 1) % TRACKED_CURRENCIES.len()],
        None => TRACKED_CURRENCIES[0],
    }
}

/// Devise précédente (cyclique), touche [
pub fn previous_currency(code: &str) -> &'static str {
    let len = TRACKED_CURRENCIES.len();
    match TRACKED_CURRENCIES.iter().position(|c| *c == code) {
        Some(i) => TRACKED_CURRENCIES[(i + len - 1) % len],
        None => TRACKED_CURRENCIES[0],
    }
}

/// Taux de change pour une devise de base
///
/// CONCEPT RUST : BTreeMap
/// - Map triée : l'ordre d'itération est stable
/// - L'affichage suit cependant l'ordre de TRACKED_CURRENCIES
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    pub base: String,
    pub fetched_at: DateTime<Utc>,
    pub rates: BTreeMap<String, f64>,
}

impl ExchangeRates {
    /// Construit l'instantané en ne gardant que les devises suivies
    /// (sauf la devise de base elle-même)
    pub fn from_mapping(base: &str, mapping: &HashMap<String, f64>) -> Self {
        let rates = TRACKED_CURRENCIES
            .iter()
            .filter(|code| **code != base)
            .filter_map(|code| mapping.get(*code).map(|rate| (code.to_string(), *rate)))
            .collect();

        Self {
            base: base.to_string(),
            fetched_at: Utc::now(),
            rates,
        }
    }

    /// Taux pour une devise (None si absente de la réponse)
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Convertit un montant exprimé dans la devise de base
    pub fn convert(&self, amount: f64, code: &str) -> Option<f64> {
        if code == self.base {
            return Some(amount);
        }
        self.rate_for(code).map(|rate| amount * rate)
    }

    /// Lignes (code, taux) dans l'ordre d'affichage
    pub fn ordered(&self) -> Vec<(&'static str, Option<f64>)> {
        TRACKED_CURRENCIES
            .iter()
            .filter(|code| **code != self.base)
            .map(|code| (*code, self.rate_for(code)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// ============================================================================
// Structure : RequestTracker
// ============================================================================
// Chaque rafraîchissement reçoit un numéro strictement croissant.
// Une réponse n'est appliquée que si son numéro est le dernier émis :
// une ancienne requête qui répond après une plus récente est ignorée.
// ============================================================================

/// Numérotation monotone des requêtes de taux
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self { latest: 0 }
    }

    /// Émet un nouveau numéro de requête
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Vrai seulement pour le dernier numéro émis
    pub fn is_current(&self, request: u64) -> bool {
        self.latest != 0 && request == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
