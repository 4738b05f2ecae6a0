// ============================================================================
// Module : format
// ============================================================================
// Fonctions pures de formatage pour l'affichage des cotations
//
// CONCEPTS RUST :
// 1. Fonctions pures : pas d'I/O, pas d'état, même entrée => même sortie
// 2. Option<f64> : une valeur absente s'affiche toujours "N/A"
// 3. format!("{:.*}", n, x) : précision passée en paramètre
// ============================================================================

/// Sentinelle affichée pour toute valeur absente ou non finie
pub const NOT_AVAILABLE: &str = "N/A";

/// Symbole monétaire préfixé à tous les montants
pub const CURRENCY_SYMBOL: &str = "$";

/// En dessous de ce prix, on affiche 6 décimales (actifs à faible valeur unitaire)
pub const PRICE_DECIMAL_THRESHOLD: f64 = 1.0;

pub const BILLION: f64 = 1_000_000_000.0;
pub const MILLION: f64 = 1_000_000.0;
pub const THOUSAND: f64 = 1_000.0;

/// Seuils des suffixes, du plus grand au plus petit (bornes inclusives)
const MAGNITUDE_SUFFIXES: [(f64, &str); 3] = [(BILLION, "B"), (MILLION, "M"), (THOUSAND, "K")];

/// Formatte un prix : "$45,000.50" ou "$0.000123"
///
/// 2 décimales si price >= 1.0, 6 sinon.
pub fn format_price(price: f64) -> String {
    let decimals = if price >= PRICE_DECIMAL_THRESHOLD { 2 } else { 6 };
    format!("{}{}", CURRENCY_SYMBOL, with_thousands(price, decimals))
}

/// Formatte un grand montant (market cap, volume) avec suffixe B/M/K
///
/// # Exemples
/// - `Some(1_000_000_000.0)` -> "$1.00B" (le seuil est inclusif)
/// - `Some(25_000_000.0)` -> "$25.00M"
/// - `Some(999.5)` -> "$999.50"
/// - `None` -> "N/A"
pub fn format_magnitude(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return NOT_AVAILABLE.to_string();
    };

    // CONCEPT RUST : Iterator::find
    // - Premier seuil atteint en partant du plus grand
    match MAGNITUDE_SUFFIXES
        .iter()
        .find(|(threshold, _)| value >= *threshold)
    {
        Some((threshold, suffix)) => format!(
            "{}{}{}",
            CURRENCY_SYMBOL,
            with_thousands(value / threshold, 2),
            suffix
        ),
        None => format!("{}{}", CURRENCY_SYMBOL, with_thousands(value, 2)),
    }
}

/// Formatte une offre en circulation : "19,000,000"
pub fn format_supply(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => with_thousands(v, 0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formatte une variation en pourcentage avec signe explicite : "+0.50%", "-2.30%"
pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:+.2}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formatte un nombre avec `decimals` décimales et séparateurs de milliers
///
/// ```
/// use cryptofetch::format::with_thousands;
/// assert_eq!(with_thousands(1234567.891, 2), "1,234,567.89");
/// ```
pub fn with_thousands(value: f64, decimals: usize) -> String {
    group_thousands(&format!("{:.*}", decimals, value))
}

/// Insère des virgules dans la partie entière d'un nombre déjà formatté
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = fraction {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// NaN et ±inf sont traités comme des valeurs absentes
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// ============================================================================
// Tests unitaires
// ============================================================================
