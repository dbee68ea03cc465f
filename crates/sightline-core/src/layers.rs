use crate::constants::MAX_LAYERS;
use crate::error::LayerError;

/// Newtype for render layer indices. Valid values are < MAX_LAYERS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u8);

/// Bit set over render layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Matches no layer.
    pub const NONE: LayerMask = LayerMask(0);

    /// Return this mask with `layer` added.
    pub fn with(self, layer: LayerId) -> Self {
        LayerMask(self.0 | (1 << layer.0 as u32))
    }

    /// Whether `layer` is in the mask.
    pub fn contains(self, layer: LayerId) -> bool {
        self.0 & (1 << layer.0 as u32) != 0
    }

    /// Build a mask from a set of layers.
    pub fn of(layers: &[LayerId]) -> Self {
        layers.iter().fold(LayerMask::NONE, |m, &l| m.with(l))
    }
}

/// Startup registry mapping layer names to ids, in registration order.
/// The analogue of the engine-side layer table the settings file names
/// layers against. Capacity is MAX_LAYERS; names are unique.
#[derive(Debug, Default, Clone)]
pub struct LayerTable {
    names: Vec<String>,
}

impl LayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a layer name, returning its id. Fails when the table is
    /// full or the name is already taken.
    pub fn register(&mut self, name: &str) -> Result<LayerId, LayerError> {
        if self.names.iter().any(|n| n == name) {
            return Err(LayerError::DuplicateName(name.to_string()));
        }
        if self.names.len() >= MAX_LAYERS {
            return Err(LayerError::TableFull(MAX_LAYERS));
        }
        let id = LayerId(self.names.len() as u8);
        self.names.push(name.to_string());
        Ok(id)
    }

    /// Resolve a layer name to its id. `None` when the name is unknown.
    pub fn id_of(&self, name: &str) -> Option<LayerId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| LayerId(i as u8))
    }

    /// Name of a layer id, for diagnostics.
    pub fn name_of(&self, layer: LayerId) -> Option<&str> {
        self.names.get(layer.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_with_contains() {
        let a = LayerId(0);
        let b = LayerId(5);
        let mask = LayerMask::NONE.with(a).with(b);
        assert!(mask.contains(a));
        assert!(mask.contains(b));
        assert!(!mask.contains(LayerId(1)));
        assert!(LayerMask::ALL.contains(LayerId(31)));
        assert!(!LayerMask::NONE.contains(LayerId(0)));
    }

    #[test]
    fn test_mask_of() {
        let mask = LayerMask::of(&[LayerId(2), LayerId(3)]);
        assert_eq!(mask, LayerMask::NONE.with(LayerId(2)).with(LayerId(3)));
    }

    #[test]
    fn test_table_register_and_lookup() {
        let mut table = LayerTable::new();
        let def = table.register("Default").unwrap();
        let occ = table.register("Occludable").unwrap();
        assert_eq!(def, LayerId(0));
        assert_eq!(occ, LayerId(1));
        assert_eq!(table.id_of("Occludable"), Some(occ));
        assert_eq!(table.id_of("Missing"), None);
        assert_eq!(table.name_of(def), Some("Default"));
    }

    #[test]
    fn test_table_duplicate_rejected() {
        let mut table = LayerTable::new();
        table.register("Walls").unwrap();
        assert!(matches!(
            table.register("Walls"),
            Err(LayerError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_table_capacity() {
        let mut table = LayerTable::new();
        for i in 0..MAX_LAYERS {
            table.register(&format!("layer{i}")).unwrap();
        }
        assert!(matches!(
            table.register("overflow"),
            Err(LayerError::TableFull(_))
        ));
    }
}
