use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
}

/// The authenticated principal on whose behalf a service call runs.
///
/// Services that authorize take `Option<&Caller>`; `None` is an
/// unauthenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub customer_id: i32,
    roles: BTreeSet<Role>,
}

impl Caller {
    pub fn new(customer_id: i32, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            customer_id,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn customer(customer_id: i32) -> Self {
        Self::new(customer_id, [Role::Customer])
    }

    pub fn admin(customer_id: i32) -> Self {
        Self::new(customer_id, [Role::Customer, Role::Admin])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Admins may access every customer record, everyone else only their own.
    pub fn may_access(&self, customer_id: i32) -> bool {
        self.is_admin() || self.customer_id == customer_id
    }
}
