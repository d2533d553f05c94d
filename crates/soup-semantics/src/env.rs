//! The runtime environment: the state of a Soup system.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// A flat variable-to-value binding map.
///
/// An environment is created empty, populated once via [`define`] while a
/// soup initializes, and thereafter only [`update`]d: assignment can never
/// create a binding. The map is ordered so iteration, display and the
/// digest are deterministic.
///
/// [`define`]: Environment::define
/// [`update`]: Environment::update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

// Equality is exact structural equality over the rendered state; the NaN
// corner of f64 never arises from define/update of evaluated results in
// practice, and state-space exploration needs environments as map keys.
impl Eq for Environment {}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh variable. Fails if the name is already bound.
    pub fn define(&mut self, name: &str, value: Value) -> EvalResult<()> {
        if self.bindings.contains_key(name) {
            return Err(EvalError::VariableAlreadyDefined(name.to_string()));
        }
        self.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Read a variable. Fails if the name is unbound.
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    /// Overwrite an existing binding. Fails if the name is unbound.
    pub fn update(&mut self, name: &str, value: Value) -> EvalResult<()> {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EvalError::UndefinedVariable(name.to_string())),
        }
    }

    /// Iterate the bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// A 32-bit content digest: SHA-256 over the sorted (name, rendered
    /// value) pairs, truncated to the first four bytes. Equal environments
    /// digest equal; state-space exploration uses this as the hash key.
    pub fn digest(&self) -> u32 {
        let mut hasher = Sha256::new();
        for (name, value) in &self.bindings {
            hasher.update(name.as_bytes());
            hasher.update(value.to_string().as_bytes());
        }
        let digest = hasher.finalize();
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }
}

impl Hash for Environment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.digest());
    }
}

impl fmt::Display for Environment {
    /// `{x: 23, y: true}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}
