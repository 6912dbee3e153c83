use serde::{Deserialize, Serialize};

use crate::mvi::ModuleState;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FooState {
    /// Insertion-ordered; may contain duplicates.
    pub bars: Vec<String>,
}

impl ModuleState for FooState {}

impl FooState {
    pub fn contains(&self, bar: &str) -> bool {
        self.bars.iter().any(|b| b == bar)
    }
}
