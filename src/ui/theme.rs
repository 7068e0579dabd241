// ============================================================================
// Palette : thème et taille de police -> styles ratatui
// ============================================================================
// Les fonctions de rendu ne lisent jamais d'état global : elles reçoivent
// une Palette résolue à partir des Settings.
// ============================================================================

use ratatui::style::{Color, Modifier, Style};

use crate::config::{FontSize, Settings, Theme};

/// Couleurs et emphase utilisées par tous les écrans
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub income: Color,
    pub expense: Color,
    pub highlight: Color,
    /// Emphase appliquée au texte principal (BOLD en Large)
    pub emphasis: Modifier,
    /// Lignes vides entre les éléments d'une liste
    pub row_spacing: u16,
}

impl Palette {
    /// Résout la palette pour des préférences données
    pub fn resolve(settings: &Settings) -> Palette {
        let base = match settings.theme {
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                border: Color::Blue,
                income: Color::Green,
                expense: Color::Red,
                highlight: Color::LightBlue,
                emphasis: Modifier::empty(),
                row_spacing: 0,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                border: Color::Cyan,
                income: Color::LightGreen,
                expense: Color::LightRed,
                highlight: Color::DarkGray,
                emphasis: Modifier::empty(),
                row_spacing: 0,
            },
        };

        // CONCEPT : Struct update syntax
        // - ..base reprend tous les champs non précisés
        match settings.font_size {
            FontSize::Small => base,
            FontSize::Medium => Palette {
                emphasis: Modifier::BOLD,
                ..base
            },
            FontSize::Large => Palette {
                emphasis: Modifier::BOLD,
                row_spacing: 1,
                ..base
            },
        }
    }

    /// Style de base de l'écran
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text).add_modifier(self.emphasis)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Vert pour un revenu ou un solde positif, rouge sinon
    pub fn amount(&self, positive: bool) -> Style {
        let color = if positive { self.income } else { self.expense };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Touche dans le footer
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_changes_colors() {
        let light = Palette::resolve(&Settings::default());
        let dark = Palette::resolve(&Settings {
            theme: Theme::Dark,
            ..Settings::default()
        });

        assert_eq!(light.background, Color::White);
        assert_eq!(dark.background, Color::Black);
        assert_ne!(light.text, dark.text);
    }

    #[test]
    fn test_font_size_changes_spacing() {
        let small = Palette::resolve(&Settings {
            font_size: FontSize::Small,
            ..Settings::default()
        });
        let large = Palette::resolve(&Settings {
            font_size: FontSize::Large,
            ..Settings::default()
        });

        assert_eq!(small.row_spacing, 0);
        assert_eq!(small.emphasis, Modifier::empty());
        assert_eq!(large.row_spacing, 1);
        assert!(large.emphasis.contains(Modifier::BOLD));
    }
}
