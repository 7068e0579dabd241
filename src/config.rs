// ============================================================================
// Configuration : préférences d'affichage
// ============================================================================
// Thème, taille de police et devise de base des taux.
//
// Pas d'état global : les Settings sont chargés au démarrage, possédés par
// App et passés explicitement aux fonctions de rendu.
//
// Fichier : <config_dir>/fineas/settings.json
// - Linux : ~/.config/fineas/settings.json
// - macOS : ~/Library/Application Support/fineas/settings.json
//
// Variables d'environnement (appliquées après le fichier) :
// - FINEAS_THEME=light|dark
// - FINEAS_BASE_CURRENCY=USD
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::rates::{is_tracked, DEFAULT_BASE_CURRENCY};

const THEME_ENV: &str = "FINEAS_THEME";
const BASE_CURRENCY_ENV: &str = "FINEAS_BASE_CURRENCY";

/// Thème de couleurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Parse "light" / "dark" (insensible à la casse)
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Taille de police
///
/// Dans un terminal on ne change pas la police : la taille joue sur
/// l'espacement des lignes et l'emphase du texte (voir ui::theme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Taille suivante, bloquée à Large
    pub fn larger(&self) -> FontSize {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium | FontSize::Large => FontSize::Large,
        }
    }

    /// Taille précédente, bloquée à Small
    pub fn smaller(&self) -> FontSize {
        match self {
            FontSize::Large => FontSize::Medium,
            FontSize::Medium | FontSize::Small => FontSize::Small,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
        }
    }
}

/// Préférences sérialisables de l'application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub font_size: FontSize,
    /// Devise de base de l'onglet Rates (doit être une devise suivie)
    pub base_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: FontSize::default(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }
}

impl Settings {
    /// Chemin par défaut du fichier de préférences
    ///
    /// None si le système n'expose pas de répertoire de configuration.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fineas").join("settings.json"))
    }

    /// Charge les préférences depuis un fichier JSON
    ///
    /// - Fichier absent : valeurs par défaut
    /// - Fichier illisible ou JSON invalide : erreur avec contexte
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!(?path, "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&data)
            .with_context(|| format!("Fichier de préférences invalide : {}", path.display()))?;

        info!(?path, "Settings loaded");
        Ok(settings.normalized())
    }

    /// Sauvegarde les préférences (JSON indenté), crée le répertoire parent
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Échec de la création de {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Échec de la sérialisation des préférences")?;
        fs::write(path, json).with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

        info!(?path, "Settings saved");
        Ok(())
    }

    /// Applique les variables d'environnement FINEAS_*
    pub fn with_env_overrides(self) -> Settings {
        let theme = std::env::var(THEME_ENV).ok();
        let base = std::env::var(BASE_CURRENCY_ENV).ok();
        self.with_overrides(theme.as_deref(), base.as_deref())
    }

    /// Applique des surcharges explicites (valeurs invalides ignorées)
    pub fn with_overrides(mut self, theme: Option<&str>, base_currency: Option<&str>) -> Settings {
        if let Some(value) = theme {
            match Theme::parse(value) {
                Some(theme) => self.theme = theme,
                None => warn!(value = %value, "Ignoring unknown theme override"),
            }
        }

        if let Some(value) = base_currency {
            self.base_currency = value.trim().to_uppercase();
        }

        self.normalized()
    }

    /// Préférences à écrire sur disque à la sortie
    ///
    /// `stored` : valeurs du fichier, `initial` : valeurs au démarrage
    /// (fichier + environnement). Seuls les champs modifiés dans l'app
    /// remplacent le fichier : une surcharge FINEAS_* n'est jamais écrite.
    pub fn to_persist(&self, stored: &Settings, initial: &Settings) -> Settings {
        Settings {
            theme: if self.theme != initial.theme {
                self.theme
            } else {
                stored.theme
            },
            font_size: if self.font_size != initial.font_size {
                self.font_size
            } else {
                stored.font_size
            },
            base_currency: if self.base_currency != initial.base_currency {
                self.base_currency.clone()
            } else {
                stored.base_currency.clone()
            },
        }
    }

    /// Garantit une devise de base suivie
    fn normalized(mut self) -> Settings {
        self.base_currency = self.base_currency.trim().to_uppercase();
        if !is_tracked(&self.base_currency) {
            warn!(
                base_currency = %self.base_currency,
                fallback = DEFAULT_BASE_CURRENCY,
                "Untracked base currency, falling back"
            );
            self.base_currency = DEFAULT_BASE_CURRENCY.to_string();
        }
        self
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
