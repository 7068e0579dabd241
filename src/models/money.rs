// ============================================================================
// Formatage monétaire
// ============================================================================
// Convention d'affichage fixe : euro, locale allemande
// - 2 décimales, virgule comme séparateur décimal
// - point comme séparateur de milliers
// - symbole € après le montant
//
// Exemple : 1234.5 -> "1.234,50 €"
//
// Le formatage ne touche jamais à la valeur numérique : seules les
// chaînes affichées sont produites ici.
// ============================================================================

use crate::models::TransactionKind;

/// Symbole de la devise du ledger
pub const CURRENCY_SYMBOL: &str = "€";

/// Formate un montant selon la convention de-DE / EUR
///
/// CONCEPT RUST : &str et String
/// - format!("{:.2}") arrondit à 2 décimales
/// - split_once() découpe sans allocation (retourne deux &str)
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    // -0,00 n'a pas de sens à l'écran
    let negative = value < 0.0 && rounded != "0.00";

    format!(
        "{}{},{} {}",
        if negative { "-" } else { "" },
        group_thousands(integer),
        fraction,
        CURRENCY_SYMBOL
    )
}

/// Montant d'une ligne de la liste, préfixé par le signe du type
///
/// Format : "+100,00 €" ou "-40,00 €"
pub fn format_signed(kind: TransactionKind, amount: f64) -> String {
    format!("{}{}", kind.sign(), format_currency(amount))
}

/// Taux de change : 4 décimales, même séparateur décimal
pub fn format_rate(rate: f64) -> String {
    format!("{:.4}", rate).replace('.', ",")
}

/// Insère un '.' toutes les 3 positions en partant de la droite
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_amounts() {
        assert_eq!(format_currency(0.0), "0,00 €");
        assert_eq!(format_currency(60.0), "60,00 €");
        assert_eq!(format_currency(25.5), "25,50 €");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_currency(1234.5), "1.234,50 €");
        assert_eq!(format_currency(1_000_000.0), "1.000.000,00 €");
        assert_eq!(format_currency(999.999), "1.000,00 €");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(-60.0), "-60,00 €");
        assert_eq!(format_currency(-1234.56), "-1.234,56 €");
        // Arrondi à zéro : pas de signe
        assert_eq!(format_currency(-0.001), "0,00 €");
    }

    #[test]
    fn test_format_does_not_alter_value() {
        let value = 51.0;
        let _ = format_currency(value);
        assert_eq!(value, 51.0);
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(TransactionKind::Income, 100.0), "+100,00 €");
        assert_eq!(format_signed(TransactionKind::Expense, 40.0), "-40,00 €");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1.08), "1,0800");
        assert_eq!(format_rate(161.2345), "161,2345");
    }
}
