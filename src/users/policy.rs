use crate::{auth::claims::Actor, users::model::Role};

/// Self-or-admin rule used for reading and blocking a single user.
pub fn can_access(actor_id: i64, actor_role: Role, target_id: i64) -> bool {
    actor_role.is_admin() || actor_id == target_id
}

/// Listing every account has no "self" case: admins only.
pub fn can_list(actor_role: Role) -> bool {
    actor_role.is_admin()
}

impl Actor {
    pub fn can_access(&self, target_id: i64) -> bool {
        can_access(self.id, self.role, target_id)
    }
}
