//! Role catalog DTOs.
//!
//! The user-management screen builds its permission-editing grid from this
//! catalog: one entry per role with the role's resolver defaults and the
//! preset grid an administrator starts from.

use fabriq_core::permissions::{self, Action, Module, PermissionMap, Role};
use serde::Serialize;
use utoipa::ToSchema;

/// One role's defaults and editing-grid preset.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleCatalogEntry {
    pub role: Role,
    /// Modules visible by default when the user has no explicit map
    pub default_modules: Vec<Module>,
    /// Actions granted by default within those modules
    pub default_actions: Vec<Action>,
    /// Full grid the editing UI seeds from when this role is selected
    #[schema(value_type = Object)]
    pub preset: PermissionMap,
}

impl RoleCatalogEntry {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            default_modules: permissions::default_modules(role).to_vec(),
            default_actions: permissions::default_actions(role).to_vec(),
            preset: permissions::role_preset(role),
        }
    }

    /// The whole catalog, in display order.
    pub fn catalog() -> Vec<Self> {
        Role::ALL.into_iter().map(Self::for_role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_roles() {
        let catalog = RoleCatalogEntry::catalog();
        assert_eq!(catalog.len(), Role::ALL.len());
        assert_eq!(catalog[0].role, Role::SuperUser);
        assert_eq!(
            catalog[0].default_modules.len(),
            Module::ALL.len()
        );
    }

    #[test]
    fn test_entry_serializes_display_strings() {
        let entry = RoleCatalogEntry::for_role(Role::UnitHead);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""role":"Unit Head""#));
        assert!(json.contains(r#""default_actions":["view","edit","alter"]"#));
    }
}
