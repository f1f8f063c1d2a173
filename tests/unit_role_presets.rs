use fabriq_core::permissions::{Module, ModulePermission, Role, role_preset};

fn assert_entry(role: Role, module: Module, expected: ModulePermission) {
    let preset = role_preset(role);
    assert_eq!(
        preset.get(module),
        Some(expected),
        "preset for {:?} / {:?}",
        role,
        module
    );
}

#[test]
fn test_every_preset_lists_every_module() {
    for role in Role::ALL {
        let preset = role_preset(role);
        assert_eq!(preset.len(), Module::ALL.len(), "role {:?}", role);
        for module in Module::ALL {
            assert!(preset.get(module).is_some());
        }
    }
}

#[test]
fn test_super_user_preset_is_all_full() {
    for module in Module::ALL {
        assert_entry(Role::SuperUser, module, ModulePermission::FULL);
    }
}

#[test]
fn test_unit_head_preset_settings_is_view_only() {
    assert_entry(
        Role::UnitHead,
        Module::Settings,
        ModulePermission {
            view: true,
            add: false,
            edit: false,
            delete: false,
        },
    );
    assert_entry(
        Role::UnitHead,
        Module::Manufacturing,
        ModulePermission {
            view: true,
            add: true,
            edit: true,
            delete: false,
        },
    );
}

#[test]
fn test_production_preset_modules() {
    let grant = ModulePermission {
        view: true,
        add: true,
        edit: true,
        delete: false,
    };
    for module in [
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Inventory,
    ] {
        assert_entry(Role::Production, module, grant);
    }
    assert_entry(Role::Production, Module::Sales, ModulePermission::NONE);
    assert_entry(Role::Production, Module::Settings, ModulePermission::NONE);
}

#[test]
fn test_accounts_preset_omits_orders_and_purchases() {
    let preset = role_preset(Role::Accounts);
    assert_eq!(preset.get(Module::Orders), Some(ModulePermission::NONE));
    assert_eq!(preset.get(Module::Purchases), Some(ModulePermission::NONE));
    assert!(preset.get(Module::Sales).unwrap().view);
    assert!(preset.get(Module::Suppliers).unwrap().add);
}

#[test]
fn test_dispatch_preset_includes_customers() {
    let preset = role_preset(Role::Dispatch);
    assert!(preset.get(Module::Customers).unwrap().view);
    assert_eq!(preset.get(Module::Inventory), Some(ModulePermission::NONE));
}

#[test]
fn test_packing_preset_withholds_add() {
    let expected = ModulePermission {
        view: true,
        add: false,
        edit: true,
        delete: false,
    };
    for module in [
        Module::Dashboard,
        Module::Orders,
        Module::Manufacturing,
        Module::Inventory,
    ] {
        assert_entry(Role::Packing, module, expected);
    }
    assert_entry(Role::Packing, Module::Dispatches, ModulePermission::NONE);
}
