// ============================================================================
// fineas - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // API des taux de change
pub mod app;     // État de l'application
pub mod config;  // Préférences d'affichage
pub mod handler; // Clavier -> état
pub mod models;  // Structures de données (ledger, transactions, taux)
pub mod ui;      // Interface utilisateur
pub mod worker;  // Worker thread pour les appels réseau
