use crate::domain::auth::errors::AuthorizationError;
use crate::domain::auth::models::Identity;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// May `identity` mutate a resource owned by `resource_owner`?
///
/// Admins may act on anything; everyone else only on what they posted.
pub fn authorize(identity: &Identity, resource_owner: &UserId) -> Decision {
    match identity.role {
        Role::Admin => Decision::Allow,
        Role::User if identity.user_id == *resource_owner => Decision::Allow,
        Role::User => Decision::Deny,
    }
}

/// [`authorize`] as a `Result`, for use with `?` ahead of a write.
pub fn ensure_can_modify(
    identity: &Identity,
    resource_owner: &UserId,
) -> Result<(), AuthorizationError> {
    match authorize(identity, resource_owner) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(AuthorizationError::OwnershipDenied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(user_id: UserId, role: Role) -> Identity {
        Identity::new(user_id, role, "token")
    }

    #[test]
    fn test_owner_may_modify() {
        let owner = UserId::new();
        assert_eq!(authorize(&identity(owner, Role::User), &owner), Decision::Allow);
    }

    #[test]
    fn test_admin_may_modify_any_resource() {
        let owner = UserId::new();
        let admin = identity(UserId::new(), Role::Admin);

        assert_eq!(authorize(&admin, &owner), Decision::Allow);
    }

    #[test]
    fn test_other_user_denied() {
        let owner = UserId::new();
        let other = identity(UserId::new(), Role::User);

        assert_eq!(authorize(&other, &owner), Decision::Deny);
        assert_eq!(
            ensure_can_modify(&other, &owner),
            Err(AuthorizationError::OwnershipDenied)
        );
    }

    #[test]
    fn test_admin_owning_the_resource() {
        let owner = UserId::new();
        assert!(ensure_can_modify(&identity(owner, Role::Admin), &owner).is_ok());
    }
}
