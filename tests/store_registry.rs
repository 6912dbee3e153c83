mod common;

use common::{app_store, bars, store_with_bars, strings};
use serde_json::json;
use slicestore::modules::foo::{self, FooState};
use slicestore::store::{Module, ModuleDescriptor, Store, StoreError, StoreOptions};

#[test]
fn new_store_is_empty() {
    let store = Store::initialize(StoreOptions::default()).unwrap();
    assert!(store.module_names().is_empty());
    assert_eq!(store.root_state().unwrap(), json!({}));
}

#[test]
fn registered_module_starts_empty() {
    let store = app_store();
    assert!(store.has_module("foo"));
    assert_eq!(
        store.module_state::<FooState>("foo").unwrap(),
        &FooState::default()
    );
    assert_eq!(
        store.mutation_types(),
        strings(&["foo/addBar", "foo/removeBar"])
    );
}

#[test]
fn duplicate_registration_keeps_first_module() {
    let mut store = store_with_bars(&["kept"]);
    let err = store.register_module(foo::module()).unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateModule {
            name: "foo".to_string()
        }
    );
    assert_eq!(store.module_names(), strings(&["foo"]));
    assert_eq!(bars(&store), strings(&["kept"]));
}

#[test]
fn unknown_module_read_fails() {
    let store = app_store();
    assert_eq!(
        store.module_state::<FooState>("missing").unwrap_err(),
        StoreError::ModuleNotFound {
            name: "missing".to_string()
        }
    );
    assert!(matches!(
        store.state_value("missing"),
        Err(StoreError::ModuleNotFound { .. })
    ));
}

#[test]
fn unknown_module_dispatch_fails() {
    let mut store = app_store();
    assert!(matches!(
        store.dispatch_mutation("missing", "addBar", json!("a")),
        Err(StoreError::ModuleNotFound { .. })
    ));
}

#[test]
fn unknown_mutation_type_fails() {
    let mut store = app_store();
    assert!(matches!(
        store.commit("addBar", json!("a")),
        Err(StoreError::OperationNotFound { .. })
    ));
    assert!(bars(&store).is_empty());
}

#[test]
fn same_reducer_under_two_names_is_independent() {
    let mut store = app_store();
    let other = Module::<foo::FooReducer>::new(ModuleDescriptor::new("other"))
        .mutation(foo::ADD_BAR, foo::FooIntent::AddBar)
        .mutation(foo::REMOVE_BAR, foo::FooIntent::RemoveBar);
    store.register_module(other).unwrap();

    store.commit("other/addBar", json!("o")).unwrap();
    store.commit("foo/addBar", json!("f")).unwrap();

    assert_eq!(bars(&store), strings(&["f"]));
    assert_eq!(
        store.module_state::<FooState>("other").unwrap().bars,
        strings(&["o"])
    );
    assert_eq!(store.module_names(), strings(&["foo", "other"]));
}

#[test]
fn static_state_is_cloned_from_initial_value() {
    let seeded = Module::<foo::FooReducer>::new(
        ModuleDescriptor::new("seeded").state_factory(false),
    )
    .with_state(FooState {
        bars: strings(&["seed"]),
    })
    .mutation(foo::ADD_BAR, foo::FooIntent::AddBar);

    let mut store = app_store();
    store.register_module(seeded).unwrap();
    store.commit("seeded/addBar", json!("next")).unwrap();
    assert_eq!(
        store.state_value("seeded").unwrap(),
        json!({ "bars": ["seed", "next"] })
    );
}

#[test]
fn unregister_then_register_starts_fresh() {
    let mut store = store_with_bars(&["a"]);
    store.unregister_module("foo").unwrap();
    assert!(matches!(
        store.commit("foo/addBar", json!("b")),
        Err(StoreError::OperationNotFound { .. })
    ));
    store.register_module(foo::module()).unwrap();
    assert!(bars(&store).is_empty());
}
