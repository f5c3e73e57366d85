use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use log::debug;

use crate::class::LoxInstance;
use crate::environment::Environment;
use crate::error::Result;
use crate::interpreter::{Interpreter, Interrupt};
use crate::stmt::FunctionDecl;
use crate::value::Value;

/// A user-defined function value: the shared declaration plus the environment
/// captured when the `fun` statement (or method table) was evaluated.
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl LoxFunction {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Returns a copy of this function whose closure is a fresh environment
    /// enclosing the original, with `this` bound to `instance`.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let mut environment: Environment = Environment::with_enclosing(self.closure.clone());

        environment.define("this", Value::Instance(instance));

        LoxFunction {
            declaration: self.declaration.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// The call protocol: bind parameters in a fresh environment enclosing
    /// the closure, run the body, and catch the `return` unwind. Initializers
    /// always yield the `this` bound in their closure.
    pub fn call<W: Write>(&self, interpreter: &mut Interpreter<W>, arguments: Vec<Value>) -> Result<Value> {
        debug!(
            "Calling <fn {}> with {} argument(s)",
            self.declaration.name.lexeme,
            arguments.len()
        );

        let environment: Rc<RefCell<Environment>> = Rc::new(RefCell::new(
            Environment::with_enclosing(self.closure.clone()),
        ));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        let returned: Value = match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => Value::Nil,

            Err(Interrupt::Return(value)) => value,

            Err(Interrupt::Error(error)) => return Err(error),
        };

        if self.is_initializer {
            return self
                .closure
                .borrow()
                .get_at(0, "this", self.declaration.name.line);
        }

        Ok(returned)
    }
}

impl fmt::Debug for LoxFunction {
    // The closure chain can reach back to this function; print the name only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}
