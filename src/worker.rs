// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui traite les commandes async
// - Reçoit des AppCommand via un channel (command_rx)
// - Envoie des AppResult via un autre channel (result_tx)
// - Permet de faire des appels API sans bloquer l'UI
//
// Le worker ne touche jamais à l'état de l'application : il ne fait que
// transformer une commande en résultat. C'est App qui décide d'appliquer
// ou non le résultat (numéro de requête).
// ============================================================================

use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::{error, info};

use crate::api::fetch_exchange_rates;
use crate::models::ExchangeRates;

/// Commandes envoyées au worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Recharger les taux pour une devise de base
    /// - request : numéro émis par le RequestTracker
    RefreshRates { request: u64, base: String },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug, Clone)]
pub enum AppResult {
    /// Taux récupérés avec succès
    RatesLoaded { request: u64, rates: ExchangeRates },

    /// Erreur lors du chargement des taux
    RatesFailed {
        request: u64,
        base: String,
        error: String,
    },
}

impl AppResult {
    /// Numéro de la requête à l'origine de ce résultat
    pub fn request(&self) -> u64 {
        match self {
            AppResult::RatesLoaded { request, .. } | AppResult::RatesFailed { request, .. } => *request,
        }
    }
}

/// Lance le worker thread qui exécute les tâches async en arrière-plan
///
/// CONCEPT RUST : Thread + async runtime
/// - std::thread::spawn() : crée un thread OS
/// - tokio::runtime::Runtime : runtime async dans ce thread
/// - Le thread s'arrête quand command_tx est droppé (channel fermé)
pub fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker disabled");
                return;
            }
        };

        // Boucle de traitement des commandes
        // - recv() bloque jusqu'à la prochaine commande
        // - Err(_) : channel fermé, on quitte
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            let result = match command {
                AppCommand::RefreshRates { request, base } => {
                    // block_on() bloque le thread worker (pas l'UI)
                    match runtime.block_on(fetch_exchange_rates(&base)) {
                        Ok(rates) => {
                            info!(request, base = %base, count = rates.rates.len(), "Rates loaded");
                            AppResult::RatesLoaded { request, rates }
                        }
                        Err(e) => {
                            error!(request, base = %base, error = ?e, "Failed to load rates");
                            AppResult::RatesFailed {
                                request,
                                base,
                                error: format!("{:#}", e),
                            }
                        }
                    }
                }
            };

            if result_tx.send(result).is_err() {
                info!("Result channel closed, worker exiting");
                break;
            }
        }

        info!("Worker thread exiting (channel closed)");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_request_tag() {
        let failed = AppResult::RatesFailed {
            request: 7,
            base: "EUR".to_string(),
            error: "boom".to_string(),
        };
        assert_eq!(failed.request(), 7);
    }

    #[test]
    fn test_worker_exits_when_commands_close() {
        let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
        let (result_tx, _result_rx) = mpsc::channel::<AppResult>();

        let handle = spawn_background_worker(command_rx, result_tx);
        drop(command_tx);

        assert!(handle.join().is_ok());
    }
}
