//! Integration tests for registration, authentication, and listing.

mod helpers;

use filevault_core::ErrorKind;
use filevault_core::types::PageRequest;
use filevault_entity::user::UserRole;

#[tokio::test]
async fn test_register_creates_unblocked_user() {
    let app = helpers::TestApp::new();

    let user = app.users.register("  alice ").await.unwrap();
    assert_eq!(user.name, "alice");
    assert_eq!(user.role, UserRole::User);
    assert!(!user.is_blocked);

    let ctx = app.users.authenticate("alice").await.unwrap();
    assert_eq!(ctx.user_id, user.id);
    assert_eq!(ctx.role, UserRole::User);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_blank_names() {
    let app = helpers::TestApp::new();
    app.users.register("alice").await.unwrap();

    let err = app.users.register("alice").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = app.users.register("   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_authenticate_unknown_user() {
    let app = helpers::TestApp::new();
    let err = app.users.authenticate("nobody").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_blocked_actor_cannot_act_with_stale_context() {
    let app = helpers::TestApp::new();
    let mike = app.actor("mike", UserRole::Moderator).await;
    let root = app.actor("root", UserRole::Admin).await;
    app.create_user("erin", UserRole::User).await;

    app.users
        .apply_role_and_block_change(&root, "mike", None, Some(true))
        .await
        .unwrap();

    let err = app
        .users
        .apply_role_and_block_change(&mike, "erin", None, Some(true))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(!app.reload("erin").await.is_blocked);
}

#[tokio::test]
async fn test_list_users_pages_by_name() {
    let app = helpers::TestApp::new();
    for name in ["dave", "bob", "carol", "alice"] {
        app.users.register(name).await.unwrap();
    }

    let page = app.users.list(&PageRequest::new(2, 3)).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["dave"]);
    assert_eq!(page.total_items, 4);
    assert_eq!(page.total_pages(), 2);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_roles_are_seeded() {
    let app = helpers::TestApp::new();
    let roles: Vec<_> = app
        .users
        .list_roles()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(roles, UserRole::ALL.to_vec());
}
