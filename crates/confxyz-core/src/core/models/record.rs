use super::value::Metadata;
use nalgebra::Point3;
use serde::Serialize;

/// One parsed unit of an extended-XYZ file.
///
/// A configuration bundles the typed header metadata with per-atom data for a
/// single record: an ordered list of element symbols and the matching ordered
/// list of Cartesian positions. The record stream reader constructs a
/// configuration from one header line plus `atom_count` atom lines; once
/// returned it is never mutated by the library, and the caller is free to
/// convert it into a domain-specific molecule representation and discard it.
///
/// Invariant: `symbols.len() == positions.len()`, both equal to the atom count
/// declared on the record's count line. The reader enforces this and fails the
/// parse rather than truncating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// Typed key-value pairs from the record's header line.
    pub metadata: Metadata,
    /// Element symbols in file order (e.g., `["O", "H", "H"]`).
    pub symbols: Vec<String>,
    /// Cartesian coordinates in file order, one per symbol.
    pub positions: Vec<Point3<f64>>,
}

impl Configuration {
    /// Bundles parsed record parts into a configuration.
    ///
    /// # Arguments
    ///
    /// * `metadata` - The typed header mapping.
    /// * `symbols` - Element symbols in file order.
    /// * `positions` - Coordinates in file order, one per symbol.
    pub fn new(metadata: Metadata, symbols: Vec<String>, positions: Vec<Point3<f64>>) -> Self {
        debug_assert_eq!(symbols.len(), positions.len());
        Self {
            metadata,
            symbols,
            positions,
        }
    }

    /// Returns the number of atoms in this configuration.
    pub fn atom_count(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the configuration contains no atoms.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over `(symbol, position)` pairs in file order.
    pub fn atoms(&self) -> impl Iterator<Item = (&str, &Point3<f64>)> {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.positions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::value::ScalarValue;

    fn water() -> Configuration {
        let mut metadata = Metadata::new();
        metadata.insert("comment", ScalarValue::String("water".into()));
        Configuration::new(
            metadata,
            vec!["O".to_string(), "H".to_string(), "H".to_string()],
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.757, 0.586, 0.0),
                Point3::new(-0.757, 0.586, 0.0),
            ],
        )
    }

    #[test]
    fn atom_count_matches_both_arrays() {
        let config = water();
        assert_eq!(config.atom_count(), 3);
        assert_eq!(config.symbols.len(), config.positions.len());
        assert!(!config.is_empty());
    }

    #[test]
    fn atoms_iterates_in_file_order() {
        let config = water();
        let atoms: Vec<(&str, &Point3<f64>)> = config.atoms().collect();
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[0].0, "O");
        assert_eq!(atoms[1].0, "H");
        assert_eq!(*atoms[1].1, Point3::new(0.757, 0.586, 0.0));
    }

    #[test]
    fn configuration_clone_and_equality() {
        let config = water();
        let copy = config.clone();
        assert_eq!(config, copy);
    }
}
