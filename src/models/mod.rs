// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod listing;        // Réponse brute de l'API + ligne aplatie
pub mod formatted_row;  // Ligne prête à afficher

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use cryptofetch::models::listing::Row;
// On peut faire : use cryptofetch::models::Row;
pub use listing::{Listing, Quote, Row};
pub use formatted_row::FormattedRow;
