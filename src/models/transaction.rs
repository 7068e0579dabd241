// ============================================================================
// Structure : Transaction
// ============================================================================
// Représente une entrée ou une sortie d'argent enregistrée par l'utilisateur
//
// CONCEPTS RUST :
// 1. Immutabilité : champs privés + accesseurs, aucune méthode &mut self
// 2. Newtype : TransactionId enveloppe un Uuid (type opaque)
// 3. Enum fermé : TransactionKind n'a que deux variantes possibles
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifiant opaque d'une transaction
///
/// CONCEPT RUST : Newtype pattern
/// - Empêche de confondre un id de transaction avec un autre Uuid
/// - Le contenu n'est pas exposé, seulement comparable et affichable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Génère un nouvel identifiant aléatoire (UUID v4)
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type de transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionKind {
    Income,
    /// Sélection par défaut du formulaire
    #[default]
    Expense,
}

impl TransactionKind {
    /// Libellé affiché (et catégorie de la transaction)
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TransactionKind::Income => "💰",
            TransactionKind::Expense => "💸",
        }
    }

    /// Signe affiché devant le montant dans la liste
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }

    /// Bascule Income <-> Expense (sélecteur du formulaire)
    pub fn toggle(&self) -> TransactionKind {
        match self {
            TransactionKind::Income => TransactionKind::Expense,
            TransactionKind::Expense => TransactionKind::Income,
        }
    }
}

/// Transaction enregistrée dans le ledger
///
/// CONCEPT RUST : Encapsulation
/// - Les champs sont privés : seul le module ledger peut en créer une
///   (via pub(crate) new), après validation
/// - Une fois créée, la transaction ne peut plus être modifiée
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    amount: f64,
    kind: TransactionKind,
    description: String,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Construit une transaction déjà validée
    ///
    /// L'appelant garantit : amount > 0 et fini, description non vide et trimée.
    pub(crate) fn new(amount: f64, kind: TransactionKind, description: String) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            kind,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Catégorie lisible, toujours dérivée du type
    ///
    /// CONCEPT : Donnée dérivée plutôt que stockée
    /// - Impossible d'avoir une catégorie "Income" sur une dépense
    pub fn category(&self) -> &'static str {
        self.kind.label()
    }

    /// Montant signé : positif pour un revenu, négatif pour une dépense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Date courte pour la liste (ex: "18/10/2026")
    pub fn display_date(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
