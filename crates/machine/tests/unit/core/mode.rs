//! # Privilege Level Tests

use uniproc_core::core::PrivilegeLevel;

#[test]
fn test_supervisor_permits_everything() {
    assert!(PrivilegeLevel::Supervisor.permits(PrivilegeLevel::Supervisor));
    assert!(PrivilegeLevel::Supervisor.permits(PrivilegeLevel::User));
}

#[test]
fn test_user_is_refused_supervisor_operations() {
    assert!(PrivilegeLevel::User.permits(PrivilegeLevel::User));
    assert!(!PrivilegeLevel::User.permits(PrivilegeLevel::Supervisor));
}

#[test]
fn test_names() {
    assert_eq!(PrivilegeLevel::User.to_string(), "User");
    assert_eq!(PrivilegeLevel::Supervisor.name(), "Supervisor");
}
