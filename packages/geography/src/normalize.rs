//! Municipality name normalization.
//!
//! Provides a deterministic normalization applied symmetrically to
//! tabular municipality names and geographic feature names, so that
//! equal real-world entities always produce equal join keys. There is
//! no fuzzy matching: a key that matches no feature simply stays off
//! the map.

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Normalizes a municipality name into its canonical join key.
///
/// The pipeline:
/// 1. NFD decomposition, dropping combining marks (strips diacritics)
/// 2. Uppercase
/// 3. Collapse internal whitespace, trim
///
/// Idempotent: normalizing an already-normalized name is a no-op.
#[must_use]
pub fn normalize(name: &str) -> String {
    let ascii_ish: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let upper = ascii_ish.to_uppercase();
    upper.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_uppercases() {
        assert_eq!(normalize("Foz do Iguaçu"), "FOZ DO IGUACU");
        assert_eq!(normalize("Maringá"), "MARINGA");
        assert_eq!(normalize("São José dos Pinhais"), "SAO JOSE DOS PINHAIS");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  Foz  do   Iguaçu "), "FOZ DO IGUACU");
    }

    #[test]
    fn is_idempotent() {
        let names = ["Foz do Iguaçu", "CURITIBA", "União da Vitória"];
        for name in names {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn table_and_feature_spellings_agree() {
        // The tables ship pre-normalized names; the GeoJSON features
        // carry accented display names. Both must map to the same key.
        assert_eq!(normalize("FOZ DO IGUACU"), normalize("Foz do Iguaçu"));
    }

    #[test]
    fn empty_input_yields_empty_key() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
