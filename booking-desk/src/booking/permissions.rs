//! Who may edit or cancel an appointment

use shared::models::{Appointment, Role, User};

/// Owners may modify their own appointments; admins may modify any
pub fn can_modify(owner_id: i64, user_id: i64, role: Role) -> bool {
    role == Role::Admin || owner_id == user_id
}

pub fn can_modify_appointment(appointment: &Appointment, user: &User) -> bool {
    can_modify(appointment.user_id, user.id, user.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_or_admin() {
        assert!(can_modify(7, 7, Role::User));
        assert!(!can_modify(7, 8, Role::User));
        assert!(can_modify(7, 8, Role::Admin));
        assert!(can_modify(7, 7, Role::Admin));
    }
}
