//! Model-View-Intent primitives shared by every state module.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Store ──→ View
//!    ↑                                        │
//!    └────────────────────────────────────────┘
//! ```
//!
//! - **State**: value owned by the store under a module name
//! - **Intent**: a decoded mutation (operation + payload)
//! - **Reducer**: pure function producing the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ModuleState;
