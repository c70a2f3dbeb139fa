//! Master password for the cluster
//!
//! The password is materialized at plan time from the injected RNG and
//! carried as a secret property, so the plan document never contains it
//! in the clear.

use resgraph::{Declaration, Value};

pub const KIND: &str = "random:RandomPassword";

/// Password length matching the original deployment
pub const PASSWORD_LENGTH: usize = 16;

/// Generated master password, no special characters
#[derive(Debug, Clone)]
pub struct RandomPassword {
    /// Logical name, e.g. `demo-db-password`
    pub logical_name: String,
    /// The generated password value
    pub result: String,
}

impl RandomPassword {
    pub fn declaration(self) -> Declaration {
        Declaration::new(KIND, self.logical_name)
            .prop("length", PASSWORD_LENGTH as i64)
            .prop("special", false)
            .prop("result", Value::secret(self.result))
    }
}
