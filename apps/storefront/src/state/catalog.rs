//! # Catalog State
//!
//! The menu, loaded once at startup and read-only afterwards.

use od_core::{CatalogItem, CatalogProvider, CoreError, CoreResult, StaticCatalog};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: StaticCatalog,
}

impl CatalogState {
    pub fn new(catalog: StaticCatalog) -> Self {
        CatalogState { catalog }
    }

    /// Loads the shipped menu.
    pub fn builtin() -> CoreResult<Self> {
        Ok(Self::new(StaticCatalog::builtin()?))
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Looks up an item, failing with `ItemNotFound`.
    pub fn item(&self, id: u32) -> CoreResult<&CatalogItem> {
        self.catalog.find(id).ok_or(CoreError::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_menu_lookup() {
        let state = CatalogState::builtin().unwrap();
        assert_eq!(state.item(8).unwrap().name, "Chicken Mortadella");
        assert!(matches!(state.item(999), Err(CoreError::ItemNotFound(999))));
    }
}
