use accrue_core::UserId;

/// Authenticated owner of the request, derived from the bearer token.
///
/// Present on every protected route; handlers never take the owner from the body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    user_id: UserId,
}

impl OwnerContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
