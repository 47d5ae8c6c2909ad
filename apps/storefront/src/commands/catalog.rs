//! # Catalog Commands
//!
//! Menu browsing for the home screen and the search bar.

use od_core::{CatalogItem, CatalogSection};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, StorefrontConfig};

/// The home screen: store name and the sectioned menu.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub store_name: String,
    pub sections: Vec<CatalogSection>,
}

/// Gets the full menu, every category in display order.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OD                                                       🔍  🛒       │
/// │  [NEW ARRIVAL] [MONDAY OVERDOSE] [OD ON THE GO] [O-DONUT] ...          │
/// │                                                                         │
/// │  NEW ARRIVAL                                                            │
/// │  ┌───────────────┐  ┌───────────────┐                                  │
/// │  │ Buy 2 OD-Wich │  │ Thank You     │                                  │
/// │  │ Rs. 861.00    │  │ Rs. 1629.00   │                                  │
/// │  └───────────────┘  └───────────────┘                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_menu(catalog: &CatalogState, config: &StorefrontConfig) -> MenuResponse {
    debug!("get_menu command");
    MenuResponse {
        store_name: config.store_name.clone(),
        sections: catalog.catalog().sections(),
    }
}

/// Searches item names and descriptions. An empty query lists everything.
pub fn search_menu(catalog: &CatalogState, query: &str) -> Result<Vec<CatalogItem>, ApiError> {
    debug!(query = %query, "search_menu command");
    let results = catalog.catalog().search(query)?;
    Ok(results.into_iter().cloned().collect())
}

/// Gets one menu item by id.
pub fn get_item(catalog: &CatalogState, item_id: u32) -> Result<CatalogItem, ApiError> {
    debug!(item_id = item_id, "get_item command");
    Ok(catalog.item(item_id)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use od_core::Category;

    #[test]
    fn test_menu_has_every_category() {
        let catalog = CatalogState::builtin().unwrap();
        let menu = get_menu(&catalog, &StorefrontConfig::default());

        assert_eq!(menu.store_name, "OD");
        assert_eq!(menu.sections.len(), Category::ALL.len());
        assert_eq!(menu.sections[0].category, Category::NewArrival);
        let total: usize = menu.sections.iter().map(|s| s.items.len()).sum();
        assert_eq!(total, 34);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = CatalogState::builtin().unwrap();
        let results = search_menu(&catalog, "MORTADELLA").unwrap();
        assert!(results.iter().any(|item| item.id == 8));
        assert!(results.iter().all(|item| item.name.to_lowercase().contains("mortadella")
            || item
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains("mortadella"))));

        assert_eq!(search_menu(&catalog, "").unwrap().len(), 34);
    }

    #[test]
    fn test_overlong_query_is_rejected() {
        let catalog = CatalogState::builtin().unwrap();
        let err = search_menu(&catalog, &"a".repeat(101)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_item_not_found() {
        let catalog = CatalogState::builtin().unwrap();
        assert_eq!(get_item(&catalog, 33).unwrap().name, "SandWich");
        assert_eq!(get_item(&catalog, 0).unwrap_err().code, ErrorCode::NotFound);
    }
}
