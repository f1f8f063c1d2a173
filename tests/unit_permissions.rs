use fabriq_core::permissions::{
    AccessProfile, Action, Module, ModulePermission, PermissionMap, Role, can_access_settings,
    can_manage_users, default_modules, has_module_access, has_permission, user_modules,
};

fn profile(role: Role) -> AccessProfile {
    AccessProfile::new(role)
}

fn entry(view: bool, add: bool, edit: bool, delete: bool) -> ModulePermission {
    ModulePermission {
        view,
        add,
        edit,
        delete,
    }
}

#[test]
fn test_absent_user_gets_nothing() {
    assert!(!has_module_access(None, Module::Dashboard));
    assert!(!has_permission(None, Module::Dashboard, Action::View));
    assert!(user_modules(None).is_empty());
    assert!(!can_manage_users(None));
    assert!(!can_access_settings(None));
}

#[test]
fn test_role_defaults_grant_exactly_their_module_set() {
    for role in Role::ALL {
        let user = profile(role);
        let granted = default_modules(role);

        for module in Module::ALL {
            let expected = role == Role::SuperUser || granted.contains(&module);
            assert_eq!(
                has_module_access(Some(&user), module),
                expected,
                "role {:?} module {:?}",
                role,
                module
            );
        }
    }
}

#[test]
fn test_super_user_bypasses_contradicting_explicit_map() {
    let mut map = PermissionMap::new();
    map.insert(Module::Inventory, entry(false, false, false, false));
    let user = AccessProfile::with_permissions(Role::SuperUser, map);

    assert!(has_module_access(Some(&user), Module::Inventory));
    assert!(has_permission(Some(&user), Module::Inventory, Action::Delete));
}

#[test]
fn test_explicit_map_is_authoritative_per_module() {
    // Production's role default would grant nothing on Sales and everything
    // on Orders up to edit; the map must override in both directions.
    let mut map = PermissionMap::new();
    map.insert(Module::Orders, entry(true, false, true, false));
    map.insert(Module::Sales, entry(true, true, false, false));
    let user = AccessProfile::with_permissions(Role::Production, map);

    // Explicit false on add is final even though an administrator could
    // have granted it
    assert!(!has_permission(Some(&user), Module::Orders, Action::Add));
    // alter = edit OR delete
    assert!(has_permission(Some(&user), Module::Orders, Action::Alter));
    // Broader than role: Sales is outside Production's default set
    assert!(has_module_access(Some(&user), Module::Sales));
    assert!(has_permission(Some(&user), Module::Sales, Action::Add));
}

#[test]
fn test_explicit_view_false_denies_module_in_default_set() {
    let mut map = PermissionMap::new();
    map.insert(Module::Inventory, entry(false, true, true, true));
    let user = AccessProfile::with_permissions(Role::Production, map);

    // Inventory is in Production's default set, but the entry's view flag
    // is consulted exactly, with no fallback to the role table
    assert!(!has_module_access(Some(&user), Module::Inventory));
}

#[test]
fn test_module_absent_from_map_falls_back_to_role_defaults() {
    let mut map = PermissionMap::new();
    map.insert(Module::Orders, entry(true, false, true, false));
    let user = AccessProfile::with_permissions(Role::Production, map);

    // Inventory is not in the map; Production's defaults grant view/edit
    assert!(has_permission(Some(&user), Module::Inventory, Action::Edit));
    assert!(!has_permission(Some(&user), Module::Inventory, Action::Delete));
    assert!(!has_permission(Some(&user), Module::Inventory, Action::Add));
}

#[test]
fn test_fallback_requires_module_access_first() {
    let user = profile(Role::Dispatch);
    // Manufacturing is outside Dispatch's default set; no action passes,
    // not even view
    assert!(!has_permission(Some(&user), Module::Manufacturing, Action::View));
    assert!(!has_permission(Some(&user), Module::Manufacturing, Action::Edit));
}

#[test]
fn test_user_modules_from_map_ignores_role() {
    let mut map = PermissionMap::new();
    map.insert(Module::Sales, entry(true, false, false, false));
    map.insert(Module::Suppliers, entry(true, false, false, false));
    map.insert(Module::Orders, entry(false, true, true, true));
    let user = AccessProfile::with_permissions(Role::Production, map);

    // Exactly the view-true modules, in sidebar order; Orders has every
    // other flag but not view, so it does not appear
    assert_eq!(
        user_modules(Some(&user)),
        vec![Module::Sales, Module::Suppliers]
    );
}

#[test]
fn test_user_modules_with_empty_map_is_empty() {
    let user = AccessProfile::with_permissions(Role::UnitHead, PermissionMap::new());
    assert!(user_modules(Some(&user)).is_empty());
}

#[test]
fn test_user_modules_without_map_uses_role_defaults() {
    let user = profile(Role::Packing);
    assert_eq!(user_modules(Some(&user)), default_modules(Role::Packing));
}

#[test]
fn test_management_flags() {
    assert!(can_manage_users(Some(&profile(Role::SuperUser))));
    assert!(can_manage_users(Some(&profile(Role::UnitHead))));
    assert!(!can_manage_users(Some(&profile(Role::Production))));

    assert!(can_access_settings(Some(&profile(Role::SuperUser))));
    assert!(!can_access_settings(Some(&profile(Role::UnitHead))));
}

#[test]
fn test_resolution_is_idempotent() {
    let mut map = PermissionMap::new();
    map.insert(Module::Orders, entry(true, false, true, false));
    let user = AccessProfile::with_permissions(Role::Accounts, map);

    let first = has_permission(Some(&user), Module::Orders, Action::Alter);
    let second = has_permission(Some(&user), Module::Orders, Action::Alter);
    assert_eq!(first, second);
    assert_eq!(user_modules(Some(&user)), user_modules(Some(&user)));
}

#[test]
fn test_view_action_is_the_default_everywhere() {
    // Every role's default action list includes view, so module access
    // implies view permission when no map exists
    for role in Role::ALL {
        let user = profile(role);
        for module in default_modules(role) {
            assert!(has_permission(Some(&user), *module, Action::View));
        }
    }
}
