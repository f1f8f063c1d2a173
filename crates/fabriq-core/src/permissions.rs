//! Role and module based permission resolution.
//!
//! Every screen in the Fabriq client maps to a [`Module`], and every
//! operation on a module maps to an [`Action`]. Whether a user may reach a
//! module/action pair is decided here, from two inputs:
//!
//! 1. the user's [`Role`], which selects a static default module set and a
//!    static default action list, and
//! 2. an optional per-user [`PermissionMap`], set by an administrator, which
//!    fully overrides the role defaults for every module it lists.
//!
//! The resolver is a pure lookup over constants plus the caller-supplied
//! [`AccessProfile`]; it holds no state and performs no I/O. Super User
//! bypasses every rule, including a present-but-contradicting permission
//! map. For all other roles an explicit map entry is authoritative: an
//! entry with `view: false` denies access even when the role default would
//! have granted it.
//!
//! # Example
//!
//! ```
//! use fabriq_core::permissions::{AccessProfile, Action, Module, Role};
//!
//! let user = AccessProfile::new(Role::Dispatch);
//! assert!(user.has_module_access(Module::Dispatches));
//! assert!(!user.has_permission(Module::Dispatches, Action::Delete));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use utoipa::ToSchema;

/// A user's role.
///
/// Roles form a fixed closed set. A role is assigned at user creation and
/// only a Super User may change it afterwards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    ToSchema,
)]
pub enum Role {
    #[serde(rename = "Super User")]
    SuperUser,
    #[serde(rename = "Unit Head")]
    UnitHead,
    Production,
    Packing,
    Dispatch,
    Accounts,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 6] = [
        Role::SuperUser,
        Role::UnitHead,
        Role::Production,
        Role::Packing,
        Role::Dispatch,
        Role::Accounts,
    ];

    /// The display string, which is also the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperUser => "Super User",
            Role::UnitHead => "Unit Head",
            Role::Production => "Production",
            Role::Packing => "Packing",
            Role::Dispatch => "Dispatch",
            Role::Accounts => "Accounts",
        }
    }

    /// Parse a stored role string. Returns `None` for anything outside the
    /// closed set, leaving the caller to fall back to no access.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Super User" => Some(Role::SuperUser),
            "Unit Head" => Some(Role::UnitHead),
            "Production" => Some(Role::Production),
            "Packing" => Some(Role::Packing),
            "Dispatch" => Some(Role::Dispatch),
            "Accounts" => Some(Role::Accounts),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigable application area subject to access control.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    ToSchema,
)]
pub enum Module {
    Dashboard,
    Orders,
    Manufacturing,
    Dispatches,
    Sales,
    Accounts,
    Inventory,
    Customers,
    Suppliers,
    Purchases,
    Settings,
}

impl Module {
    /// All modules, in sidebar order.
    pub const ALL: [Module; 11] = [
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Dispatches,
        Module::Sales,
        Module::Accounts,
        Module::Inventory,
        Module::Customers,
        Module::Suppliers,
        Module::Purchases,
        Module::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "Dashboard",
            Module::Orders => "Orders",
            Module::Manufacturing => "Manufacturing",
            Module::Dispatches => "Dispatches",
            Module::Sales => "Sales",
            Module::Accounts => "Accounts",
            Module::Inventory => "Inventory",
            Module::Customers => "Customers",
            Module::Suppliers => "Suppliers",
            Module::Purchases => "Purchases",
            Module::Settings => "Settings",
        }
    }

    /// Parse a stored module name. Returns `None` for names outside the
    /// closed set so retired or not-yet-rolled-out modules resolve to no
    /// access instead of failing.
    pub fn parse(s: &str) -> Option<Module> {
        Module::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CRUD-style operation evaluated against a module.
///
/// `Alter` is a derived composite meaning "edit OR delete"; it never appears
/// as a stored flag, only as a query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Add,
    Edit,
    Delete,
    Alter,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Alter => "alter",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four stored permission flags for one module.
///
/// Flags are independent; no flag implies another. Keys missing from a
/// stored entry deserialize to `false`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    ToSchema,
)]
pub struct ModulePermission {
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub add: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

impl ModulePermission {
    /// No access at all. What an administrator starts from in the grid.
    pub const NONE: ModulePermission = ModulePermission {
        view: false,
        add: false,
        edit: false,
        delete: false,
    };

    /// Every flag granted.
    pub const FULL: ModulePermission = ModulePermission {
        view: true,
        add: true,
        edit: true,
        delete: true,
    };

    /// Whether this entry grants `action`. `Alter` is edit OR delete.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Add => self.add,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
            Action::Alter => self.edit || self.delete,
        }
    }
}

/// Per-user, per-module override of the stored permission flags.
///
/// A module absent from the map falls back to the role defaults; a module
/// present in the map is resolved from the map alone. Serialized as a JSON
/// object keyed by module name. Unrecognized module keys encountered during
/// deserialization are skipped rather than rejected, so rows written before
/// a module was retired still load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMap(BTreeMap<Module, ModulePermission>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module: Module) -> Option<ModulePermission> {
        self.0.get(&module).copied()
    }

    pub fn insert(&mut self, module: Module, entry: ModulePermission) {
        self.0.insert(module, entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Module, ModulePermission)> + '_ {
        self.0.iter().map(|(m, p)| (*m, *p))
    }
}

impl FromIterator<(Module, ModulePermission)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (Module, ModulePermission)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for PermissionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(m, p)| (m.as_str(), p)))
    }
}

impl<'de> Deserialize<'de> for PermissionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Null entries count as absent, like unknown module keys
        let raw = BTreeMap::<String, Option<ModulePermission>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(key, entry)| match (Module::parse(&key), entry) {
                    (Some(module), Some(entry)) => Some((module, entry)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

/// The resolver's view of a user: a role plus the optional explicit map.
///
/// Built from JWT claims on each request, or from a user row. A caller with
/// no logged-in user passes `None` to the free functions below and gets the
/// most restrictive answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessProfile {
    pub role: Role,
    pub permissions: Option<PermissionMap>,
}

impl AccessProfile {
    /// Profile with no explicit map; role defaults apply everywhere.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            permissions: None,
        }
    }

    pub fn with_permissions(role: Role, permissions: PermissionMap) -> Self {
        Self {
            role,
            permissions: Some(permissions),
        }
    }

    /// Whether the user may see `module` at all.
    ///
    /// An explicit map entry is consulted before the role table and its
    /// `view` flag is final, even when false.
    pub fn has_module_access(&self, module: Module) -> bool {
        if self.role == Role::SuperUser {
            return true;
        }
        if let Some(map) = &self.permissions
            && let Some(entry) = map.get(module)
        {
            return entry.view;
        }
        default_modules(self.role).contains(&module)
    }

    /// Whether the user may perform `action` on `module`.
    ///
    /// With an explicit entry the flag (or the edit-or-delete composite for
    /// [`Action::Alter`]) answers directly. Without one, module access must
    /// hold first, then the role's default action list decides.
    pub fn has_permission(&self, module: Module, action: Action) -> bool {
        if self.role == Role::SuperUser {
            return true;
        }
        if let Some(map) = &self.permissions
            && let Some(entry) = map.get(module)
        {
            return entry.allows(action);
        }
        if !self.has_module_access(module) {
            return false;
        }
        default_actions(self.role).contains(&action)
    }

    /// The modules to show in the navigation, in sidebar order.
    ///
    /// Once an explicit map exists it alone decides, for every role: only
    /// entries with `view: true` appear. Without a map the role default set
    /// is returned.
    pub fn modules(&self) -> Vec<Module> {
        if let Some(map) = &self.permissions {
            return Module::ALL
                .into_iter()
                .filter(|m| map.get(*m).is_some_and(|entry| entry.view))
                .collect();
        }
        default_modules(self.role).to_vec()
    }

    /// Whether the user may open the user-management screen.
    pub fn can_manage_users(&self) -> bool {
        matches!(self.role, Role::SuperUser | Role::UnitHead)
    }

    /// Whether the user may open system settings.
    pub fn can_access_settings(&self) -> bool {
        self.role == Role::SuperUser
    }
}

/// Whether `user` may see `module`. Absent user means not logged in: false.
pub fn has_module_access(user: Option<&AccessProfile>, module: Module) -> bool {
    user.is_some_and(|u| u.has_module_access(module))
}

/// Whether `user` may perform `action` on `module`. Absent user: false.
pub fn has_permission(user: Option<&AccessProfile>, module: Module, action: Action) -> bool {
    user.is_some_and(|u| u.has_permission(module, action))
}

/// The modules `user` may see. Absent user: empty.
pub fn user_modules(user: Option<&AccessProfile>) -> Vec<Module> {
    user.map(AccessProfile::modules).unwrap_or_default()
}

/// Whether `user` may manage users. Absent user: false.
pub fn can_manage_users(user: Option<&AccessProfile>) -> bool {
    user.is_some_and(AccessProfile::can_manage_users)
}

/// Whether `user` may access settings. Absent user: false.
pub fn can_access_settings(user: Option<&AccessProfile>) -> bool {
    user.is_some_and(AccessProfile::can_access_settings)
}

/// The default module set for a role, used when no explicit map entry
/// exists for the module being checked.
pub fn default_modules(role: Role) -> &'static [Module] {
    const UNIT_HEAD: &[Module] = &[
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Dispatches,
        Module::Sales,
        Module::Accounts,
        Module::Inventory,
        Module::Customers,
        Module::Suppliers,
        Module::Purchases,
    ];
    const PRODUCTION: &[Module] = &[
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Inventory,
    ];
    const PACKING: &[Module] = &[
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Dispatches,
        Module::Inventory,
    ];
    const DISPATCH: &[Module] = &[
        Module::Dashboard,
        Module::Orders,
        Module::Dispatches,
        Module::Inventory,
    ];
    const ACCOUNTS: &[Module] = &[
        Module::Dashboard,
        Module::Orders,
        Module::Sales,
        Module::Accounts,
        Module::Customers,
        Module::Suppliers,
        Module::Purchases,
    ];

    match role {
        Role::SuperUser => &Module::ALL,
        Role::UnitHead => UNIT_HEAD,
        Role::Production => PRODUCTION,
        Role::Packing => PACKING,
        Role::Dispatch => DISPATCH,
        Role::Accounts => ACCOUNTS,
    }
}

/// The default action list for a role, consulted only after module access
/// has already passed via the default module set.
///
/// This table is deliberately independent from [`default_modules`]; the two
/// layers are maintained separately and may disagree. Super User never
/// reaches this lookup (it short-circuits earlier) and so shares the
/// read-only fallback row with any role the table does not list.
pub fn default_actions(role: Role) -> &'static [Action] {
    const UNIT_HEAD: &[Action] = &[Action::View, Action::Edit, Action::Alter];
    const EDITOR: &[Action] = &[Action::View, Action::Edit];
    const VIEW_ONLY: &[Action] = &[Action::View];

    match role {
        Role::UnitHead => UNIT_HEAD,
        Role::Production | Role::Packing | Role::Dispatch | Role::Accounts => EDITOR,
        Role::SuperUser => VIEW_ONLY,
    }
}

/// The permission grid an administrator starts from when assigning a role
/// in the user-management screen.
///
/// Returns a full map over every module, unpicked modules all-false. This
/// table is a grid-seeding convenience and is maintained separately from
/// the resolver defaults above; it does not agree with them everywhere
/// (the Dispatch preset includes Customers, the Accounts preset omits
/// Orders and Purchases, the Packing preset withholds `add`).
pub fn role_preset(role: Role) -> PermissionMap {
    const GRANT: ModulePermission = ModulePermission {
        view: true,
        add: true,
        edit: true,
        delete: false,
    };
    const VIEW_ONLY: ModulePermission = ModulePermission {
        view: true,
        add: false,
        edit: false,
        delete: false,
    };
    const PACKING_GRANT: ModulePermission = ModulePermission {
        view: true,
        add: false,
        edit: true,
        delete: false,
    };

    let mut preset: PermissionMap = Module::ALL
        .into_iter()
        .map(|m| (m, ModulePermission::NONE))
        .collect();

    match role {
        Role::SuperUser => {
            for module in Module::ALL {
                preset.insert(module, ModulePermission::FULL);
            }
        }
        Role::UnitHead => {
            for module in Module::ALL {
                if module == Module::Settings {
                    preset.insert(module, VIEW_ONLY);
                } else {
                    preset.insert(module, GRANT);
                }
            }
        }
        Role::Production => {
            for module in [
                Module::Dashboard,
                Module::Orders,
                Module::Manufacturing,
                Module::Inventory,
            ] {
                preset.insert(module, GRANT);
            }
        }
        Role::Accounts => {
            for module in [
                Module::Dashboard,
                Module::Sales,
                Module::Accounts,
                Module::Customers,
                Module::Suppliers,
            ] {
                preset.insert(module, GRANT);
            }
        }
        Role::Dispatch => {
            for module in [
                Module::Dashboard,
                Module::Orders,
                Module::Dispatches,
                Module::Customers,
            ] {
                preset.insert(module, GRANT);
            }
        }
        Role::Packing => {
            for module in [
                Module::Dashboard,
                Module::Orders,
                Module::Manufacturing,
                Module::Inventory,
            ] {
                preset.insert(module, PACKING_GRANT);
            }
        }
    }

    preset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_display_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Operator"), None);
        assert_eq!(Role::parse("super user"), None);
    }

    #[test]
    fn test_module_parse_round_trip() {
        for module in Module::ALL {
            assert_eq!(Module::parse(module.as_str()), Some(module));
        }
        assert_eq!(Module::parse("Companies"), None);
    }

    #[test]
    fn test_role_serde_uses_display_strings() {
        let json = serde_json::to_string(&Role::SuperUser).unwrap();
        assert_eq!(json, r#""Super User""#);
        let role: Role = serde_json::from_str(r#""Unit Head""#).unwrap();
        assert_eq!(role, Role::UnitHead);
    }

    #[test]
    fn test_module_permission_alter_is_edit_or_delete() {
        let edit_only = ModulePermission {
            view: true,
            add: false,
            edit: true,
            delete: false,
        };
        assert!(edit_only.allows(Action::Alter));

        let delete_only = ModulePermission {
            view: true,
            add: false,
            edit: false,
            delete: true,
        };
        assert!(delete_only.allows(Action::Alter));

        assert!(!ModulePermission::NONE.allows(Action::Alter));
        assert!(ModulePermission::FULL.allows(Action::Alter));
    }

    #[test]
    fn test_module_permission_missing_keys_default_false() {
        let entry: ModulePermission = serde_json::from_str(r#"{"view":true}"#).unwrap();
        assert!(entry.view);
        assert!(!entry.add);
        assert!(!entry.edit);
        assert!(!entry.delete);
    }

    #[test]
    fn test_permission_map_skips_unknown_modules() {
        let json = r#"{"Orders":{"view":true},"Warehouse":{"view":true}}"#;
        let map: PermissionMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get(Module::Orders).unwrap().view);
    }

    #[test]
    fn test_permission_map_treats_null_entries_as_absent() {
        let json = r#"{"Orders":null,"Sales":{"view":true}}"#;
        let map: PermissionMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get(Module::Orders).is_none());
    }

    #[test]
    fn test_permission_map_serializes_by_module_name() {
        let mut map = PermissionMap::new();
        map.insert(Module::Inventory, ModulePermission::FULL);
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains(r#""Inventory""#));
    }

    #[test]
    fn test_default_modules_table() {
        assert_eq!(default_modules(Role::SuperUser).len(), Module::ALL.len());
        assert_eq!(default_modules(Role::UnitHead).len(), 10);
        assert!(!default_modules(Role::UnitHead).contains(&Module::Settings));
        assert_eq!(
            default_modules(Role::Production),
            &[
                Module::Dashboard,
                Module::Orders,
                Module::Manufacturing,
                Module::Inventory
            ]
        );
        assert!(default_modules(Role::Packing).contains(&Module::Dispatches));
        assert!(!default_modules(Role::Dispatch).contains(&Module::Manufacturing));
        assert!(!default_modules(Role::Accounts).contains(&Module::Inventory));
    }

    #[test]
    fn test_default_actions_table() {
        assert_eq!(
            default_actions(Role::UnitHead),
            &[Action::View, Action::Edit, Action::Alter]
        );
        for role in [
            Role::Production,
            Role::Packing,
            Role::Dispatch,
            Role::Accounts,
        ] {
            assert_eq!(default_actions(role), &[Action::View, Action::Edit]);
        }
    }

    #[test]
    fn test_unit_head_defaults_deny_delete_but_allow_alter() {
        let user = AccessProfile::new(Role::UnitHead);
        assert!(!user.has_permission(Module::Orders, Action::Delete));
        assert!(user.has_permission(Module::Orders, Action::Alter));
    }

    #[test]
    fn test_preset_covers_every_module() {
        for role in Role::ALL {
            assert_eq!(role_preset(role).len(), Module::ALL.len());
        }
    }

    #[test]
    fn test_preset_drifts_from_resolver_defaults() {
        // The grid-seeding table is maintained separately from the resolver
        // tables; these drifts are part of the contract.
        let dispatch = role_preset(Role::Dispatch);
        assert!(dispatch.get(Module::Customers).unwrap().view);
        assert!(!default_modules(Role::Dispatch).contains(&Module::Customers));

        let accounts = role_preset(Role::Accounts);
        assert!(!accounts.get(Module::Orders).unwrap().view);
        assert!(default_modules(Role::Accounts).contains(&Module::Orders));

        let packing = role_preset(Role::Packing);
        let entry = packing.get(Module::Orders).unwrap();
        assert!(entry.view && entry.edit && !entry.add);
    }

    #[test]
    fn test_unit_head_preset_settings_view_only() {
        let preset = role_preset(Role::UnitHead);
        let settings = preset.get(Module::Settings).unwrap();
        assert!(settings.view && !settings.add && !settings.edit && !settings.delete);
        let orders = preset.get(Module::Orders).unwrap();
        assert!(orders.view && orders.add && orders.edit && !orders.delete);
    }
}
