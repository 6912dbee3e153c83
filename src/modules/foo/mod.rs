//! The `foo` module: an ordered list of string identifiers.

mod intent;
mod reducer;
mod state;

pub use intent::FooIntent;
pub use reducer::FooReducer;
pub use state::FooState;

use crate::store::{Module, ModuleDescriptor};

pub const NAME: &str = "foo";
pub const ADD_BAR: &str = "addBar";
pub const REMOVE_BAR: &str = "removeBar";

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new(NAME)
        .namespaced(true)
        .state_factory(true)
        .dynamic(true)
}

/// Module definition with `addBar` and `removeBar`, both taking a string.
pub fn module() -> Module<FooReducer> {
    Module::new(descriptor())
        .mutation(ADD_BAR, FooIntent::AddBar)
        .mutation(REMOVE_BAR, FooIntent::RemoveBar)
}
