// Registry of renderable tile variants, keyed by (type name, variant index)

use std::collections::HashMap;

use log::debug;

use crate::engine::assets::TextureHandle;

/// Index of a variant inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantId(pub(crate) u32);

impl VariantId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One renderable look for a tile type
#[derive(Debug, Clone, PartialEq)]
pub struct TileVariant {
    pub type_name: String,
    pub variant: u32,
    pub image: TextureHandle,
}

/// Populated before map load; read-only afterwards
#[derive(Debug, Default)]
pub struct TileVariantRegistry {
    variants: Vec<TileVariant>,
    by_key: HashMap<String, HashMap<u32, VariantId>>,
}

impl TileVariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variant. Registering the same key twice replaces the image.
    pub fn register(&mut self, type_name: &str, variant: u32, image: TextureHandle) -> VariantId {
        if let Some(id) = self.lookup(type_name, variant) {
            self.variants[id.index()].image = image;
            return id;
        }

        let id = VariantId(self.variants.len() as u32);
        self.variants.push(TileVariant {
            type_name: type_name.to_string(),
            variant,
            image,
        });
        self.by_key
            .entry(type_name.to_string())
            .or_default()
            .insert(variant, id);

        debug!("Registered tile variant {}:{} as {:?}", type_name, variant, id);
        id
    }

    /// Look up a variant's id
    pub fn lookup(&self, type_name: &str, variant: u32) -> Option<VariantId> {
        self.by_key
            .get(type_name)
            .and_then(|variants| variants.get(&variant))
            .copied()
    }

    pub fn get(&self, type_name: &str, variant: u32) -> Option<&TileVariant> {
        self.lookup(type_name, variant).and_then(|id| self.variant(id))
    }

    pub fn variant(&self, id: VariantId) -> Option<&TileVariant> {
        self.variants.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};

    fn handle(n: u64) -> TextureHandle {
        AssetHandle::new(AssetId::from_u64(n))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TileVariantRegistry::new();
        registry.register("grass", 0, handle(1));
        registry.register("grass", 1, handle(2));
        registry.register("stone", 0, handle(3));

        assert_eq!(registry.len(), 3);
        let variant = registry.get("grass", 1).unwrap();
        assert_eq!(variant.type_name, "grass");
        assert_eq!(variant.variant, 1);
        assert_eq!(variant.image, handle(2));
    }

    #[test]
    fn test_missing_variant() {
        let mut registry = TileVariantRegistry::new();
        registry.register("grass", 0, handle(1));

        assert!(registry.get("grass", 7).is_none());
        assert!(registry.get("lava", 0).is_none());
    }

    #[test]
    fn test_reregister_keeps_id() {
        let mut registry = TileVariantRegistry::new();
        let first = registry.register("grass", 0, handle(1));
        let second = registry.register("grass", 0, handle(9));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.variant(first).unwrap().image, handle(9));
    }
}
