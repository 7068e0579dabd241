// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;            // Gestion des événements clavier
pub mod theme;             // Palette dérivée des préférences
pub mod dashboard;         // Cadre commun et routage par onglet
pub mod transactions_view; // Résumé, formulaire, liste
pub mod rates_view;        // Taux de change
pub mod settings_view;     // Préférences d'affichage

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
pub use theme::Palette;
