// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user and session persistence.

use crate::{PersistenceError, SqlitePersistence};
use servicebay_domain::Role;

#[test]
fn test_create_user_hashes_password_and_normalizes_email() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let user_id = persistence
        .create_user("Ada Driver", "  Ada@Example.COM ", "hunter22!", Role::Customer, None)
        .unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Customer);
    assert_ne!(user.password_hash, "hunter22!");
    assert!(
        persistence
            .verify_password("hunter22!", &user.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrong-pass1", &user.password_hash)
            .unwrap()
    );

    let by_email = persistence
        .get_user_by_email("ADA@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(by_email.user_id, user_id);
}

#[test]
fn test_duplicate_email_is_conflict() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_user("First", "same@example.com", "password1", Role::Customer, None)
        .unwrap();
    let result = persistence.create_user(
        "Second",
        "SAME@example.com",
        "password1",
        Role::Mechanic,
        None,
    );

    assert_eq!(
        result,
        Err(PersistenceError::Conflict(String::from(
            "A user with this email already exists"
        )))
    );
}

#[test]
fn test_list_and_count_users_by_role() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_user("Zed", "zed@example.com", "password1", Role::Mechanic, None)
        .unwrap();
    persistence
        .create_user("Amy", "amy@example.com", "password1", Role::Mechanic, None)
        .unwrap();
    persistence
        .create_user("Cal", "cal@example.com", "password1", Role::Customer, None)
        .unwrap();

    let mechanics = persistence.list_users_by_role(Role::Mechanic).unwrap();
    let names: Vec<&str> = mechanics.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
    assert_eq!(persistence.count_users_by_role(Role::Manager).unwrap(), 0);
    assert_eq!(persistence.count_users_by_role(Role::Customer).unwrap(), 1);
}

#[test]
fn test_deleting_user_removes_sessions() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let user_id = persistence
        .create_user("Mo", "mo@example.com", "password1", Role::Mechanic, None)
        .unwrap();
    persistence
        .create_session("token-abc", user_id, "2999-01-01T00:00:00Z")
        .unwrap();

    persistence.delete_user(user_id).unwrap();

    assert!(persistence.get_user_by_id(user_id).unwrap().is_none());
    assert!(
        persistence
            .get_session_by_token("token-abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_missing_user_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.delete_user(999),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let user_id = persistence
        .create_user("Sam", "sam@example.com", "password1", Role::Customer, None)
        .unwrap();

    let session_id = persistence
        .create_session("live-token", user_id, "2999-01-01T00:00:00Z")
        .unwrap();
    persistence
        .create_session("old-token", user_id, "2000-01-01T00:00:00Z")
        .unwrap();

    let session = persistence
        .get_session_by_token("live-token")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user_id);

    persistence.update_session_activity(session_id).unwrap();

    assert_eq!(persistence.delete_expired_sessions().unwrap(), 1);
    assert!(persistence.get_session_by_token("old-token").unwrap().is_none());

    persistence.delete_session("live-token").unwrap();
    assert!(
        persistence
            .get_session_by_token("live-token")
            .unwrap()
            .is_none()
    );
}
