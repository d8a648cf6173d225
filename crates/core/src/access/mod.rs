//! Visibility scoping for transactional records.
//!
//! There are no row-level permission lists: a caller is either staff (sees
//! and processes everything) or the owner of a record through its student
//! profile.

mod error;

pub use error::AccessError;

use uuid::Uuid;

/// The authenticated caller, passed explicitly into every scoped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Identity record ID.
    pub user_id: Uuid,
    /// Whether the identity carries the staff flag.
    pub is_staff: bool,
    /// Linked student profile, if any.
    pub profile_id: Option<Uuid>,
}

/// Base record set visible to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every record of the type.
    All,
    /// Only records owned by this student profile.
    Owner(Uuid),
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(user_id: Uuid, is_staff: bool, profile_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            is_staff,
            profile_id,
        }
    }

    /// Returns the scope used for list and detail reads.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::ProfileRequired` for a student without a profile.
    pub fn scope(&self) -> Result<Scope, AccessError> {
        if self.is_staff {
            return Ok(Scope::All);
        }
        self.require_profile().map(Scope::Owner)
    }

    /// Returns the caller's profile for owner operations (create, edit, delete).
    ///
    /// Staff are not exempt: owner operations act on the caller's own records.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::ProfileRequired` if no profile is linked.
    pub fn require_profile(&self) -> Result<Uuid, AccessError> {
        self.profile_id.ok_or(AccessError::ProfileRequired)
    }

    /// Guards staff-only actions.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::StaffOnly` if the caller is not staff.
    pub fn require_staff(&self) -> Result<(), AccessError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(AccessError::StaffOnly)
        }
    }
}

impl Scope {
    /// Returns the owning profile this scope is restricted to, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::Owner(profile_id) => Some(*profile_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_staff_sees_everything() {
        let actor = Actor::new(Uuid::new_v4(), true, None);
        assert_eq!(actor.scope().unwrap(), Scope::All);
        assert!(actor.require_staff().is_ok());
    }

    #[test]
    fn test_student_is_scoped_to_own_profile() {
        let profile = Uuid::new_v4();
        let actor = Actor::new(Uuid::new_v4(), false, Some(profile));

        let scope = actor.scope().unwrap();
        assert_eq!(scope, Scope::Owner(profile));
        assert_eq!(scope.owner(), Some(profile));
    }

    #[test]
    fn test_student_without_profile_is_denied_not_missing() {
        let actor = Actor::new(Uuid::new_v4(), false, None);
        assert_eq!(actor.scope(), Err(AccessError::ProfileRequired));
        assert_eq!(actor.require_profile(), Err(AccessError::ProfileRequired));
        assert_eq!(AccessError::ProfileRequired.status_code(), 403);
    }

    #[rstest]
    #[case::staff_with_profile(true, true, true)]
    #[case::staff_without_profile(true, false, false)]
    #[case::student_with_profile(false, true, true)]
    #[case::student_without_profile(false, false, false)]
    fn test_owner_operations_need_a_profile(
        #[case] is_staff: bool,
        #[case] has_profile: bool,
        #[case] allowed: bool,
    ) {
        let profile = has_profile.then(Uuid::new_v4);
        let actor = Actor::new(Uuid::new_v4(), is_staff, profile);
        assert_eq!(actor.require_profile().is_ok(), allowed);
    }

    #[test]
    fn test_students_cannot_use_staff_actions() {
        let actor = Actor::new(Uuid::new_v4(), false, Some(Uuid::new_v4()));
        assert_eq!(actor.require_staff(), Err(AccessError::StaffOnly));
    }

    #[test]
    fn test_all_scope_has_no_owner() {
        assert_eq!(Scope::All.owner(), None);
    }
}
