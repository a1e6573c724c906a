use basket_core::db::open_db_in_memory;
use basket_core::{
    ContactError, ContactService, SqliteContactRepository, SqliteUserRepository, UserId,
    UserProfile, UserRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn seed_user(conn: &Connection, profile: UserProfile) -> UserId {
    SqliteUserRepository::new(conn).create_user(&profile).unwrap()
}

fn service(conn: &Connection) -> ContactService<SqliteUserRepository<'_>, SqliteContactRepository<'_>> {
    ContactService::new(
        SqliteUserRepository::new(conn),
        SqliteContactRepository::new(conn),
    )
}

#[test]
fn search_excludes_viewer_and_flags_existing_contacts() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("Samir").with_username("samir"));
    let sara = seed_user(&conn, UserProfile::new("Sara Ali").with_username("sara_a"));
    let salem = seed_user(&conn, UserProfile::new("Salem").with_username("salem77"));
    seed_user(&conn, UserProfile::new("Omar").with_username("omar"));

    let contacts = service(&conn);
    assert!(contacts.add(viewer, sara).unwrap());

    let hits = contacts.search(viewer, "  SA ").unwrap();
    let ids: Vec<_> = hits.iter().map(|hit| hit.profile.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&sara));
    assert!(ids.contains(&salem));
    assert!(!ids.contains(&viewer));

    let sara_hit = hits.iter().find(|hit| hit.profile.id == sara).unwrap();
    let salem_hit = hits.iter().find(|hit| hit.profile.id == salem).unwrap();
    assert!(sara_hit.is_contact);
    assert!(!salem_hit.is_contact);
}

#[test]
fn short_terms_return_nothing() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    seed_user(&conn, UserProfile::new("Sara"));

    let contacts = service(&conn);
    assert!(contacts.search(viewer, "s").unwrap().is_empty());
    assert!(contacts.search(viewer, "   ").unwrap().is_empty());
}

#[test]
fn search_matches_display_name_and_arabic_text() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    let mother = seed_user(&conn, UserProfile::new("Huda").with_display_name("أم أحمد"));

    let hits = service(&conn).search(viewer, "أحمد").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.id, mother);
}

#[test]
fn search_ignores_case_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    let elodie = seed_user(&conn, UserProfile::new("ÉLODIE Durand"));
    let maria = seed_user(&conn, UserProfile::new("guest").with_display_name("МАРИЯ"));
    let contacts = service(&conn);

    let hits = contacts.search(viewer, "élodie").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.id, elodie);

    let hits = contacts.search(viewer, "мария").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.id, maria);
}

#[test]
fn search_does_not_look_at_email() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    seed_user(&conn, UserProfile::new("Sara").with_email("hidden@example.com"));

    assert!(service(&conn).search(viewer, "hidden").unwrap().is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    seed_user(&conn, UserProfile::new("abcdef"));
    let literal = seed_user(&conn, UserProfile::new("50%_off"));

    let hits = service(&conn).search(viewer, "%_").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.id, literal);
}

#[test]
fn search_is_capped_at_twenty_results() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    for index in 0..25 {
        seed_user(&conn, UserProfile::new(format!("member {index:02}")));
    }

    let hits = service(&conn).search(viewer, "member").unwrap();
    assert_eq!(hits.len(), 20);
}

#[test]
fn add_is_idempotent_and_remove_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    let friend = seed_user(&conn, UserProfile::new("friend"));
    let contacts = service(&conn);

    assert!(contacts.add(viewer, friend).unwrap());
    assert!(!contacts.add(viewer, friend).unwrap());

    let listed = contacts.list(viewer).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].profile.id, friend);
    // relations are directed
    assert!(contacts.list(friend).unwrap().is_empty());

    assert!(contacts.remove(viewer, friend).unwrap());
    assert!(!contacts.remove(viewer, friend).unwrap());
    assert!(contacts.list(viewer).unwrap().is_empty());
}

#[test]
fn add_rejects_self_and_unknown_users() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    let contacts = service(&conn);

    assert!(matches!(
        contacts.add(viewer, viewer).unwrap_err(),
        ContactError::SelfContact
    ));

    let ghost = Uuid::new_v4();
    match contacts.add(viewer, ghost).unwrap_err() {
        ContactError::UserNotFound(id) => assert_eq!(id, ghost),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_username_is_a_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::new(&conn);
    users
        .create_user(&UserProfile::new("one").with_username("family"))
        .unwrap();
    assert!(users
        .create_user(&UserProfile::new("two").with_username("family"))
        .is_err());
}

#[test]
fn search_hit_serializes_with_snake_case_fields() {
    let conn = open_db_in_memory().unwrap();
    let viewer = seed_user(&conn, UserProfile::new("viewer"));
    seed_user(&conn, UserProfile::new("Nadia").with_username("nadia"));

    let hits = service(&conn).search(viewer, "nad").unwrap();
    let json = serde_json::to_value(&hits[0]).unwrap();
    assert_eq!(json["is_contact"], serde_json::json!(false));
    assert_eq!(json["profile"]["username"], serde_json::json!("nadia"));
    assert_eq!(json["profile"]["display_name"], serde_json::Value::Null);
}
