use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::value::Value;

/// A name→value mapping chained to an optional enclosing environment. The
/// chain is acyclic and roots at the globals. Single-threaded; shared through
/// `Rc<RefCell<_>>`.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Always inserts into this innermost environment, shadowing any outer
    /// binding of the same name.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("Defining '{}'", name);

        self.values.insert(name.to_string(), value);
    }

    /// Walks outward only when the local lookup misses.
    pub fn get(&self, name: &str, line: usize) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name, line)
        } else {
            Err(LoxError::Runtime {
                line,
                message: format!("Undefined variable: '{}'", name),
            })
        }
    }

    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<()> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);

            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value, line)
        } else {
            Err(LoxError::Runtime {
                line,
                message: format!("Undefined variable: '{}'", name),
            })
        }
    }

    /// Reads `name` starting at the environment exactly `distance` hops
    /// outward. The resolver guarantees the chain is at least that deep.
    pub fn get_at(&self, distance: usize, name: &str, line: usize) -> Result<Value> {
        if distance == 0 {
            self.get(name, line)
        } else {
            self.enclosing
                .as_ref()
                .expect("resolved distance exceeds environment chain")
                .borrow()
                .get_at(distance - 1, name, line)
        }
    }

    /// Counterpart of [`get_at`](Self::get_at) for assignment.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value, line: usize) -> Result<()> {
        if distance == 0 {
            self.assign(name, value, line)
        } else {
            self.enclosing
                .as_ref()
                .expect("resolved distance exceeds environment chain")
                .borrow_mut()
                .assign_at(distance - 1, name, value, line)
        }
    }
}
