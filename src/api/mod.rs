// ============================================================================
// Module : api
// ============================================================================
// Clients HTTP vers les services externes (taux de change)
// ============================================================================

pub mod exchange_rates; // Client API des taux de change

// Re-export des fonctions principales
pub use exchange_rates::{fetch_exchange_rates, parse_rates_body};
