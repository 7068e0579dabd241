// ============================================================================
// fineas - suivi de finances personnelles dans le terminal
// ============================================================================
// Programme TUI : enregistrement des revenus/dépenses, totaux, taux de
// change en direct et préférences d'affichage.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread + channels : appels HTTP sans bloquer l'UI
// 4. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use fineas::app::App;
use fineas::config::Settings;
use fineas::handler::handle_event;
use fineas::ui::{render, EventHandler};
use fineas::worker::{spawn_background_worker, AppCommand, AppResult};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans ./logs/fineas.log.<date>
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f logs/fineas.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=fineas=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "fineas.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // UI thread vs worker thread
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour fineas, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fineas=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

/// Charge les préférences du fichier (sans les variables d'environnement)
///
/// Un fichier invalide n'empêche pas le démarrage : on part des valeurs
/// par défaut et on le signale dans les logs.
fn load_stored_settings() -> Settings {
    match Settings::default_path() {
        Some(path) => Settings::load_from(&path).unwrap_or_else(|e| {
            warn!(error = ?e, "Invalid settings file, using defaults");
            Settings::default()
        }),
        None => {
            warn!("No config directory available, using default settings");
            Settings::default()
        }
    }
}

/// Sauvegarde les préférences à la sortie (le ledger, lui, n'est jamais écrit)
///
/// Seuls les changements faits dans l'app sont écrits, pas les FINEAS_*.
fn save_settings(app: &App, stored: &Settings, initial: &Settings) {
    if let Some(path) = &app.settings_path {
        let settings = app.settings.to_persist(stored, initial);
        if let Err(e) = settings.save_to(path) {
            warn!(error = ?e, "Failed to save settings");
        }
    }
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Logging en premier : si l'init échoue, on continue sans logs
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("fineas starting up");

    let stored_settings = load_stored_settings();
    let initial_settings = stored_settings.clone().with_env_overrides();

    let mut app = App::new(initial_settings.clone());
    app.settings_path = Settings::default_path();
    info!(
        theme = app.settings.theme.label(),
        font_size = app.settings.font_size.label(),
        base_currency = %app.settings.base_currency,
        "Settings ready"
    );

    // Channels pour communiquer avec le worker
    // - command_tx/rx : commandes vers le worker
    // - result_tx/rx : résultats vers l'UI
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    // Le worker s'arrête de lui-même quand command_tx est droppé
    let _worker = spawn_background_worker(command_rx, result_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    save_settings(&app, &stored_settings, &initial_settings);

    match &result {
        Ok(_) => info!(transactions = app.ledger.len(), "Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Appliquer les résultats du worker
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//
// App est possédée par la boucle : pas de Mutex, le worker ne la voit jamais.
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    let mut worker_connected = true;

    while app.is_running() {
        // ========================================
        // 0. RÉSULTATS : non-bloquant avec try_recv
        // ========================================
        while worker_connected {
            match result_rx.try_recv() {
                Ok(result) => {
                    app.apply_result(result);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Loggé une seule fois
                    error!("Worker thread disconnected!");
                    worker_connected = false;
                    app.mark_worker_unavailable();
                }
            }
        }

        // ========================================
        // 1. RENDER
        // ========================================
        terminal.draw(|frame| render(frame, app))?;

        // ========================================
        // 2. INPUT
        // ========================================
        let event = events.next().context("Échec de la lecture des événements clavier")?;
        if let Some(command) = handle_event(app, &event) {
            if let Err(e) = command_tx.send(command) {
                error!(error = %e, "Failed to send command to worker");
                app.mark_worker_unavailable();
            }
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    terminal.show_cursor()?;

    Ok(())
}
