// ============================================================================
// Module : display
// ============================================================================
// Rendu texte du rapport : bannière + tableau aligné
//
// Le rendu est construit dans une String plutôt qu'écrit directement sur
// stdout : main() n'imprime rien tant que le tableau complet n'est pas prêt.
// ============================================================================

use crate::models::FormattedRow;

/// Titres des colonnes, dans l'ordre d'affichage
pub const COLUMNS: [&str; 10] = [
    "Rank",
    "Name",
    "Symbol",
    "Price",
    "Market Cap",
    "Volume (24h)",
    "Change (1h)",
    "Change (24h)",
    "Change (7d)",
    "Circulating Supply",
];

pub const BANNER_WIDTH: usize = 100;
pub const TITLE: &str = "CRYPTOCURRENCY DATA - POWERED BY COINMARKETCAP";

const COLUMN_SEPARATOR: &str = "  ";

/// Rend le tableau : en-tête puis une ligne par actif
///
/// Chaque colonne est alignée à droite sur sa cellule la plus large
/// (en-tête comprise). Largeur mesurée en caractères, pas en octets.
pub fn render_table(rows: &[FormattedRow]) -> String {
    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS, &widths);
    for row in rows {
        push_line(&mut out, &row.cells(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 10], widths: &[usize; 10]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    out.push_str(&line);
    out.push('\n');
}

/// Rend le rapport complet : bannière, titre, tableau, bannière
pub fn render_report(rows: &[FormattedRow]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = format!("\n{banner}\n{TITLE}\n{banner}\n\n");
    out.push_str(&render_table(rows));
    out.push_str(&format!("\n{banner}\n\n"));
    out
}

/// Lignes de synthèse affichées après le tableau
pub fn render_summary(count: usize) -> String {
    format!("Summary Statistics:\nTotal cryptocurrencies fetched: {}\n", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    fn row(rank: u32, name: &str, symbol: &str, price: f64) -> FormattedRow {
        FormattedRow::from(&Row {
            rank,
            name: name.to_string(),
            symbol: symbol.to_string(),
            price: Some(price),
            market_cap: None,
            volume_24h: None,
            percent_change_1h: None,
            percent_change_24h: None,
            percent_change_7d: None,
            circulating_supply: None,
            last_updated: None,
        })
    }

    #[test]
    fn test_header_order() {
        let table = render_table(&[]);
        let header = table.lines().next().unwrap();

        let mut last = 0;
        for title in COLUMNS {
            let pos = header.find(title).unwrap();
            assert!(pos >= last, "{} out of order", title);
            last = pos;
        }
    }

    #[test]
    fn test_columns_right_aligned() {
        let table = render_table(&[
            row(1, "Bitcoin", "BTC", 45000.5),
            row(2, "Ethereum", "ETH", 3000.0),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        // Toutes les lignes ont la même largeur
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
        assert!(lines[1].contains(" Bitcoin"));
        assert!(lines[2].contains("Ethereum"));
        assert!(lines[1].contains("$45,000.50"));
    }

    #[test]
    fn test_report_banners() {
        let report = render_report(&[row(1, "Bitcoin", "BTC", 1.0)]);
        let banner = "=".repeat(BANNER_WIDTH);

        assert_eq!(report.matches(&banner).count(), 3);
        assert!(report.contains(TITLE));
        assert!(report.contains("Bitcoin"));
    }

    #[test]
    fn test_report_layout() {
        let report = render_report(&[]);
        let banner = "=".repeat(BANNER_WIDTH);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], banner);
        assert_eq!(lines[2], TITLE);
        assert_eq!(lines[3], banner);
        assert_eq!(lines[4], "");
        assert!(lines[5].contains("Rank"));
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], banner);
        assert!(report.ends_with(&format!("{banner}\n\n")));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            render_summary(3),
            "Summary Statistics:\nTotal cryptocurrencies fetched: 3\n"
        );
    }
}
