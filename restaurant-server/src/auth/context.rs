//! Authenticated principal
//!
//! Owners act on the restaurant bound to their token; administrators act on
//! whatever restaurant the request path names.

use super::jwt::{Claims, Role};

/// Principal resolved from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    Owner(OwnerContext),
    Admin(AdminContext),
}

/// Restaurant owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    pub principal_id: String,
    /// Restaurant bound to this owner, absent before the first creation
    pub restaurant_id: Option<String>,
}

/// Platform administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub principal_id: String,
}

impl AuthContext {
    pub fn principal_id(&self) -> &str {
        match self {
            AuthContext::Owner(owner) => &owner.principal_id,
            AuthContext::Admin(admin) => &admin.principal_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            AuthContext::Owner(_) => Role::Owner,
            AuthContext::Admin(_) => Role::Admin,
        }
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        match claims.role {
            Role::Owner => AuthContext::Owner(OwnerContext {
                principal_id: claims.sub,
                restaurant_id: claims.restaurant.filter(|r| !r.is_empty()),
            }),
            Role::Admin => AuthContext::Admin(AdminContext {
                principal_id: claims.sub,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, restaurant: Option<&str>) -> Claims {
        Claims {
            sub: "p-1".into(),
            role,
            restaurant: restaurant.map(String::from),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_owner_claims() {
        let ctx = AuthContext::from(claims(Role::Owner, Some("r-1")));
        assert_eq!(
            ctx,
            AuthContext::Owner(OwnerContext {
                principal_id: "p-1".into(),
                restaurant_id: Some("r-1".into()),
            })
        );
        assert_eq!(ctx.role(), Role::Owner);
    }

    #[test]
    fn test_owner_with_blank_restaurant_is_unbound() {
        let ctx = AuthContext::from(claims(Role::Owner, Some("")));
        match ctx {
            AuthContext::Owner(owner) => assert!(owner.restaurant_id.is_none()),
            other => panic!("expected owner, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_ignores_restaurant_claim() {
        let ctx = AuthContext::from(claims(Role::Admin, Some("r-1")));
        assert_eq!(ctx.principal_id(), "p-1");
        assert!(matches!(ctx, AuthContext::Admin(_)));
    }
}
