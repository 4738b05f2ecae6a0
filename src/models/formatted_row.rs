// ============================================================================
// Structure : FormattedRow
// ============================================================================
// Même champs que Row, mais chaque valeur numérique est remplacée par sa
// chaîne d'affichage. C'est le seul artefact consommé par le rendu du tableau.
// ============================================================================

use crate::format::{format_magnitude, format_percent, format_price, format_supply, NOT_AVAILABLE};
use crate::models::Row;

/// Ligne prête à afficher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub market_cap: String,
    pub volume_24h: String,
    pub change_1h: String,
    pub change_24h: String,
    pub change_7d: String,
    pub circulating_supply: String,
}

impl FormattedRow {
    /// Cellules dans l'ordre des colonnes du tableau
    pub fn cells(&self) -> [&str; 10] {
        [
            self.rank.as_str(),
            self.name.as_str(),
            self.symbol.as_str(),
            self.price.as_str(),
            self.market_cap.as_str(),
            self.volume_24h.as_str(),
            self.change_1h.as_str(),
            self.change_24h.as_str(),
            self.change_7d.as_str(),
            self.circulating_supply.as_str(),
        ]
    }
}

/// CONCEPT RUST : From<&T>
/// - Conversion sans consommer la Row (emprunt)
/// - Permet `rows.iter().map(FormattedRow::from)`
impl From<&Row> for FormattedRow {
    fn from(row: &Row) -> Self {
        Self {
            rank: row.rank.to_string(),
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            price: row
                .price
                .filter(|p| p.is_finite())
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_price),
            market_cap: format_magnitude(row.market_cap),
            volume_24h: format_magnitude(row.volume_24h),
            change_1h: format_percent(row.percent_change_1h),
            change_24h: format_percent(row.percent_change_24h),
            change_7d: format_percent(row.percent_change_7d),
            circulating_supply: format_supply(row.circulating_supply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitcoin_row() -> Row {
        Row {
            rank: 1,
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price: Some(45123.456),
            market_cap: Some(880_000_000_000.0),
            volume_24h: Some(25_000_000.0),
            percent_change_1h: Some(0.5),
            percent_change_24h: Some(-2.3),
            percent_change_7d: None,
            circulating_supply: Some(19_000_000.0),
            last_updated: None,
        }
    }

    #[test]
    fn test_formatted_row_from_row() {
        let formatted = FormattedRow::from(&bitcoin_row());

        assert_eq!(formatted.rank, "1");
        assert_eq!(formatted.price, "$45,123.46");
        assert_eq!(formatted.market_cap, "$880.00B");
        assert_eq!(formatted.volume_24h, "$25.00M");
        assert_eq!(formatted.change_1h, "+0.50%");
        assert_eq!(formatted.change_24h, "-2.30%");
        assert_eq!(formatted.change_7d, "N/A");
        assert_eq!(formatted.circulating_supply, "19,000,000");
    }

    #[test]
    fn test_missing_price_is_not_available() {
        let mut row = bitcoin_row();
        row.price = None;

        assert_eq!(FormattedRow::from(&row).price, "N/A");
    }

    #[test]
    fn test_cells_order() {
        let formatted = FormattedRow::from(&bitcoin_row());
        let cells = formatted.cells();

        assert_eq!(cells[0], "1");
        assert_eq!(cells[2], "BTC");
        assert_eq!(cells[9], "19,000,000");
    }
}
