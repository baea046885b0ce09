//! Encodability check run before any output is produced.
//!
//! A tree can be built that has no JSON spelling: a float that is NaN or
//! infinite, or a container that (directly or through descendants) holds
//! itself. Both are reported with the JSON pointer of the offending node.

use tracing::trace;

use crate::array::JsonArray;
use crate::error::{JsonError, Result};
use crate::object::JsonObject;
use crate::pointer::format_pointer;
use crate::value::Value;

struct Checker {
    path: Vec<String>,
    ancestors: Vec<usize>,
}

impl Checker {
    fn visit(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Number(n) if !n.is_finite() => Err(self.fail("non-finite number")),
            Value::Array(a) => {
                self.enter(a.addr())?;
                for (index, item) in a.borrow().iter().enumerate() {
                    self.path.push(index.to_string());
                    self.visit(item)?;
                    self.path.pop();
                }
                self.ancestors.pop();
                Ok(())
            }
            Value::Object(o) => {
                self.enter(o.addr())?;
                for (key, item) in o.borrow().iter() {
                    self.path.push(key.clone());
                    self.visit(item)?;
                    self.path.pop();
                }
                self.ancestors.pop();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn enter(&mut self, addr: usize) -> Result<()> {
        if self.ancestors.contains(&addr) {
            return Err(self.fail("cyclic reference"));
        }
        self.ancestors.push(addr);
        Ok(())
    }

    fn fail(&self, reason: &'static str) -> JsonError {
        let pointer = format_pointer(&self.path);
        trace!(%pointer, reason, "value cannot be encoded");
        JsonError::Encoding {
            pointer,
            reason: reason.to_owned(),
        }
    }
}

impl Value {
    /// Checks that the tree can be written as JSON.
    ///
    /// # Errors
    ///
    /// [`JsonError::Encoding`] naming the first offending node.
    pub fn validate(&self) -> Result<()> {
        Checker {
            path: Vec::new(),
            ancestors: Vec::new(),
        }
        .visit(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl JsonObject {
    pub fn is_valid(&self) -> bool {
        Value::from(self).is_valid()
    }
}

impl JsonArray {
    pub fn is_valid(&self) -> bool {
        Value::from(self).is_valid()
    }
}
