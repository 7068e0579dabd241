// ============================================================================
// Structure : Ledger
// ============================================================================
// Collection ordonnée des transactions de la session (la plus récente
// en premier) et totaux dérivés.
//
// CONCEPTS RUST :
// 1. Result<T, E> avec une erreur métier typée (thiserror)
// 2. Validation avant mutation : l'état ne peut pas devenir incohérent
// 3. Iterators : fold pour calculer les totaux en une seule passe
// ============================================================================

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Transaction, TransactionKind};

/// Erreurs de saisie d'une transaction
///
/// CONCEPT RUST : thiserror
/// - #[error("...")] génère l'implémentation de Display
/// - Le message est directement affichable à l'utilisateur
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Montant ou description vide
    #[error("Please fill in all fields")]
    MissingFields,

    /// Montant non numérique, infini ou <= 0
    #[error("Please enter a valid amount")]
    InvalidAmount(String),
}

/// Totaux calculés à la demande
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Totals {
    /// Solde positif ou nul (affiché en vert)
    pub fn is_balance_positive(&self) -> bool {
        self.balance >= 0.0
    }
}

/// Ledger en mémoire, jamais persisté
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Transactions, index 0 = la plus récente
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Crée un ledger vide (démarrage de l'application)
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Ajoute une transaction à partir de la saisie utilisateur
    ///
    /// Ordre de validation :
    /// 1. description (trimée) ou montant vide -> MissingFields
    /// 2. montant non numérique, non fini ou <= 0 -> InvalidAmount
    /// 3. montant qui rendrait le total de son type infini -> InvalidAmount
    ///
    /// CONCEPT RUST : Early return avec ?
    /// - Chaque étape de validation peut interrompre la fonction
    /// - Le Vec n'est touché qu'une fois toutes les vérifications passées
    pub fn add_transaction(
        &mut self,
        amount: &str,
        kind: TransactionKind,
        description: &str,
    ) -> Result<&Transaction, LedgerError> {
        let description = description.trim();

        // "   " n'est pas vide : il passe au parsing et sera refusé là
        if description.is_empty() || amount.is_empty() {
            warn!("Rejected transaction with missing fields");
            return Err(LedgerError::MissingFields);
        }

        let amount_text = amount.trim();
        let value = parse_amount(amount_text)?;
        self.check_total_stays_finite(value, kind, amount_text)?;

        let transaction = Transaction::new(value, kind, description.to_string());
        debug!(
            id = %transaction.id(),
            amount = value,
            kind = transaction.category(),
            "Transaction added"
        );

        // Nouvelle transaction en tête de liste
        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    /// Calcule les totaux en une seule passe
    ///
    /// Pure : ne modifie rien, donc deux appels successifs sans ajout
    /// retournent exactement la même valeur.
    pub fn compute_totals(&self) -> Totals {
        let (total_income, total_expense) =
            self.transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), tx| match tx.kind() {
                    TransactionKind::Income => (income + tx.amount(), expense),
                    TransactionKind::Expense => (income, expense + tx.amount()),
                });

        Totals {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Refuse un montant qui ferait déborder le total de son type
    fn check_total_stays_finite(
        &self,
        value: f64,
        kind: TransactionKind,
        text: &str,
    ) -> Result<(), LedgerError> {
        let totals = self.compute_totals();
        let current = match kind {
            TransactionKind::Income => totals.total_income,
            TransactionKind::Expense => totals.total_expense,
        };

        if (current + value).is_finite() {
            Ok(())
        } else {
            warn!(amount = %text, current, "Rejected transaction overflowing totals");
            Err(LedgerError::InvalidAmount(text.to_string()))
        }
    }

    /// Toutes les transactions, la plus récente en premier
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Dernière transaction ajoutée
    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Convertit le texte saisi en montant strictement positif
fn parse_amount(text: &str) -> Result<f64, LedgerError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => {
            warn!(amount = %text, "Rejected transaction with invalid amount");
            Err(LedgerError::InvalidAmount(text.to_string()))
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger_totals() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(
            ledger.compute_totals(),
            Totals {
                total_income: 0.0,
                total_expense: 0.0,
                balance: 0.0,
            }
        );
    }

    #[test]
    fn test_salary_and_groceries() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("100", TransactionKind::Income, "Salary")
            .unwrap();
        ledger
            .add_transaction("40", TransactionKind::Expense, "Groceries")
            .unwrap();

        let totals = ledger.compute_totals();
        assert_eq!(totals.total_income, 100.0);
        assert_eq!(totals.total_expense, 40.0);
        assert_eq!(totals.balance, 60.0);
    }

    #[test]
    fn test_same_expense_twice() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("25.5", TransactionKind::Expense, "Coffee")
            .unwrap();
        ledger
            .add_transaction("25.5", TransactionKind::Expense, "Coffee")
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.compute_totals().total_expense, 51.0);
        assert_ne!(ledger.transactions()[0].id(), ledger.transactions()[1].id());
    }

    #[test]
    fn test_newest_first() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("10", TransactionKind::Income, "A")
            .unwrap();
        ledger
            .add_transaction("20", TransactionKind::Expense, "B")
            .unwrap();

        assert_eq!(ledger.latest().unwrap().description(), "B");
        assert_eq!(ledger.get(1).unwrap().description(), "A");
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut ledger = Ledger::new();

        for amount in ["0", "-5", "0.0"] {
            let result = ledger.add_transaction(amount, TransactionKind::Expense, "Refund");
            assert_eq!(result, Err(LedgerError::InvalidAmount(amount.to_string())));
        }
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn test_non_numeric_amounts_rejected() {
        let mut ledger = Ledger::new();

        for amount in ["abc", "12abc", "NaN", "inf"] {
            assert!(matches!(
                ledger.add_transaction(amount, TransactionKind::Income, "Gift"),
                Err(LedgerError::InvalidAmount(_))
            ));
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let mut ledger = Ledger::new();

        assert_eq!(
            ledger
                .add_transaction("10", TransactionKind::Expense, "   ")
                .unwrap_err(),
            LedgerError::MissingFields
        );
        assert_eq!(
            ledger
                .add_transaction("", TransactionKind::Expense, "Lunch")
                .unwrap_err(),
            LedgerError::MissingFields
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_blank_amount_is_invalid_not_missing() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger
                .add_transaction("   ", TransactionKind::Expense, "x")
                .unwrap_err(),
            LedgerError::InvalidAmount(String::new())
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_huge_amounts_keep_totals_finite() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("1e308", TransactionKind::Income, "a")
            .unwrap();
        ledger
            .add_transaction("1e308", TransactionKind::Expense, "b")
            .unwrap();

        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(
                ledger.add_transaction("1e308", kind, "c").unwrap_err(),
                LedgerError::InvalidAmount("1e308".to_string())
            );
        }

        assert_eq!(ledger.len(), 2);
        let totals = ledger.compute_totals();
        assert!(totals.balance.is_finite());
        assert_eq!(totals.total_income - totals.total_expense, totals.balance);
        assert_eq!(crate::models::format_currency(totals.balance), "0,00 €");
    }

    #[test]
    fn test_missing_fields_checked_before_amount() {
        // Montant invalide ET description vide : MissingFields gagne
        let mut ledger = Ledger::new();
        let result = ledger.add_transaction("-5", TransactionKind::Expense, "");
        assert_eq!(result.unwrap_err(), LedgerError::MissingFields);
    }

    #[test]
    fn test_description_is_trimmed() {
        let mut ledger = Ledger::new();
        let tx = ledger
            .add_transaction(" 12.5 ", TransactionKind::Expense, "  Lunch  ")
            .unwrap();

        assert_eq!(tx.description(), "Lunch");
        assert_eq!(tx.amount(), 12.5);
        assert_eq!(tx.category(), "Expense");
    }

    #[test]
    fn test_totals_are_idempotent() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction("3.3", TransactionKind::Income, "a")
            .unwrap();
        ledger
            .add_transaction("1.1", TransactionKind::Expense, "b")
            .unwrap();

        let first = ledger.compute_totals();
        let second = ledger.compute_totals();
        assert_eq!(first, second);
        assert_eq!(first.total_income - first.total_expense, first.balance);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(LedgerError::MissingFields.to_string(), "Please fill in all fields");
        assert_eq!(
            LedgerError::InvalidAmount("x".to_string()).to_string(),
            "Please enter a valid amount"
        );
    }
}
