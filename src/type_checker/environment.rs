use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Variable name to type, scoped to one point of the traversal.
///
/// Binding constructs build a child scope with [`Environment::extend`], which
/// leaves the receiver untouched. Only the leaky checker mode writes into an
/// existing scope through [`Environment::declare_variable`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn get_variable(&self, variable_name: &str, current_position: &Position) -> Result<Type, Error> {
        self.variable_lookup.get(variable_name).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedVariable {
                    variable: variable_name.to_string(),
                },
                current_position.clone(),
            )
        })
    }

    /// A copy of this scope with `variable_name` bound, shadowing any
    /// previous binding.
    pub fn extend(&self, variable_name: &str, variable_type: Type) -> Environment {
        let mut child = self.clone();
        child.declare_variable(variable_name, variable_type);
        child
    }

    /// Binds `variable_name` in place. Later writes win.
    pub fn declare_variable(&mut self, variable_name: &str, variable_type: Type) {
        self.variable_lookup.insert(variable_name.to_string(), variable_type);
    }

    pub fn contains(&self, variable_name: &str) -> bool {
        self.variable_lookup.contains_key(variable_name)
    }
}

impl FromIterator<(String, Type)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, Type)>>(iter: I) -> Self {
        Environment {
            variable_lookup: iter.into_iter().collect(),
        }
    }
}
