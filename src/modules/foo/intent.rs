use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooIntent {
    /// Append to the end. Duplicates and empty strings are accepted.
    AddBar(String),
    /// Remove every element equal to the payload.
    RemoveBar(String),
}

impl Intent for FooIntent {}
