// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application : transactions, ledger,
// formatage monétaire et taux de change
// ============================================================================

pub mod transaction; // Transaction, TransactionKind, TransactionId
pub mod ledger;      // Ledger, Totals, LedgerError
pub mod money;       // format_currency et variantes
pub mod rates;       // ExchangeRates, RequestTracker, devises suivies

// Re-export des structures principales pour simplifier les imports
// On peut faire : use fineas::models::Ledger;
pub use transaction::{Transaction, TransactionId, TransactionKind};
pub use ledger::{Ledger, LedgerError, Totals};
pub use money::{format_currency, format_rate, format_signed};
pub use rates::{ExchangeRates, RequestTracker, TRACKED_CURRENCIES};
