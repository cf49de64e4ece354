//! Integration tests for role and block changes guarded by the change history.

mod helpers;

use filevault_core::ErrorKind;
use filevault_entity::user::UserRole;

#[tokio::test]
async fn test_user_cannot_change_role() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    app.create_user("bob", UserRole::User).await;

    let view = app
        .users
        .apply_role_and_block_change(&alice, "bob", Some("ADMIN"), None)
        .await
        .unwrap();

    assert_eq!(view.role, UserRole::User);
    assert_eq!(app.reload("bob").await.role, UserRole::User);
    assert_eq!(app.store.history_len().await, 0);
}

#[tokio::test]
async fn test_promoted_user_cannot_retaliate() {
    let app = helpers::TestApp::new();
    let carol = app.actor("carol", UserRole::Admin).await;
    let carol_id = app.reload("carol").await.id;
    let dave_id = app.create_user("dave", UserRole::User).await.id;

    let view = app
        .users
        .apply_role_and_block_change(&carol, "dave", Some("admin"), None)
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::Admin);

    let history = app.users.history("dave").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].actor_id, carol_id);
    assert_eq!(history[0].target_id, dave_id);
    assert_eq!(history[0].new_role, UserRole::Admin);

    // dave now holds every permission but carol is a prior benefactor.
    let dave = app.login("dave").await;
    let view = app
        .users
        .apply_role_and_block_change(&dave, "carol", Some("USER"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::Admin);
    assert!(!view.is_blocked);

    let stored = app.reload("carol").await;
    assert_eq!(stored.role, UserRole::Admin);
    assert!(!stored.is_blocked);
    assert!(app.users.history("carol").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_benefactor_rule_does_not_affect_third_parties() {
    let app = helpers::TestApp::new();
    let carol = app.actor("carol", UserRole::Admin).await;
    app.create_user("dave", UserRole::User).await;
    app.create_user("erin", UserRole::User).await;

    app.users
        .apply_role_and_block_change(&carol, "dave", Some("ADMIN"), None)
        .await
        .unwrap();

    let dave = app.login("dave").await;
    let view = app
        .users
        .apply_role_and_block_change(&dave, "erin", Some("MODERATOR"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::Moderator);
    assert!(view.is_blocked);
}

#[tokio::test]
async fn test_moderator_block_applies_without_role_change() {
    let app = helpers::TestApp::new();
    let mike = app.actor("mike", UserRole::Moderator).await;
    app.create_user("erin", UserRole::User).await;

    let view = app
        .users
        .apply_role_and_block_change(&mike, "erin", Some("ADMIN"), Some(true))
        .await
        .unwrap();

    assert_eq!(view.role, UserRole::User);
    assert!(view.is_blocked);
    assert_eq!(app.store.history_len().await, 0);

    let err = app.users.authenticate("erin").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    let view = app
        .users
        .apply_role_and_block_change(&mike, "erin", None, Some(false))
        .await
        .unwrap();
    assert!(!view.is_blocked);
    assert!(app.users.authenticate("erin").await.is_ok());
}

#[tokio::test]
async fn test_invalid_role_name_fails_only_when_role_change_is_allowed() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;
    app.create_user("bob", UserRole::User).await;

    let err = app
        .users
        .apply_role_and_block_change(&root, "bob", Some("SUPERUSER"), Some(true))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidRole);

    let bob = app.reload("bob").await;
    assert_eq!(bob.role, UserRole::User);
    assert!(!bob.is_blocked);
    assert_eq!(app.store.history_len().await, 0);
}

#[tokio::test]
async fn test_invalid_role_name_is_ignored_without_change_role() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let mike = app.actor("mike", UserRole::Moderator).await;
    app.create_user("erin", UserRole::User).await;

    // alice holds neither permission: nothing happens and nothing fails
    let view = app
        .users
        .apply_role_and_block_change(&alice, "erin", Some("SUPERUSER"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::User);
    assert!(!view.is_blocked);

    // mike may block but not change roles, so the block still applies
    let view = app
        .users
        .apply_role_and_block_change(&mike, "erin", Some("SUPERUSER"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::User);
    assert!(view.is_blocked);
    assert!(app.reload("erin").await.is_blocked);
    assert_eq!(app.store.history_len().await, 0);
}

#[tokio::test]
async fn test_missing_role_row_rolls_back_the_request() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;
    app.create_user("bob", UserRole::User).await;
    app.store.remove_role(UserRole::Moderator).await;

    let err = app
        .users
        .apply_role_and_block_change(&root, "bob", Some("MODERATOR"), Some(true))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidRole);

    let bob = app.reload("bob").await;
    assert_eq!(bob.role, UserRole::User);
    assert!(!bob.is_blocked);
    assert_eq!(app.store.history_len().await, 0);
}

#[tokio::test]
async fn test_missing_users_are_not_found() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;

    let err = app
        .users
        .apply_role_and_block_change(&root, "ghost", None, Some(true))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_self_demotion_is_recorded() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;

    let view = app
        .users
        .apply_role_and_block_change(&root, "root", Some("USER"), None)
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::User);

    let history = app.users.history("root").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].actor_id, history[0].target_id);
}

#[tokio::test]
async fn test_self_change_judges_both_fields_on_one_snapshot() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;

    // The role change makes root their own benefactor. The block is still
    // judged against the snapshot taken before it.
    let view = app
        .users
        .apply_role_and_block_change(&root, "root", Some("USER"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::User);
    assert!(view.is_blocked);

    let stored = app.reload("root").await;
    assert_eq!(stored.role, UserRole::User);
    assert!(stored.is_blocked);
    assert_eq!(app.store.history_len().await, 1);
}

#[tokio::test]
async fn test_second_self_change_is_refused() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;

    app.users
        .apply_role_and_block_change(&root, "root", Some("ADMIN"), None)
        .await
        .unwrap();

    let view = app
        .users
        .apply_role_and_block_change(&root, "root", Some("USER"), Some(true))
        .await
        .unwrap();
    assert_eq!(view.role, UserRole::Admin);
    assert!(!view.is_blocked);
    assert_eq!(app.store.history_len().await, 1);
}

#[tokio::test]
async fn test_crossing_promotions_apply_once() {
    let app = helpers::TestApp::new();
    let x = app.actor("x", UserRole::Admin).await;
    let y = app.actor("y", UserRole::Admin).await;

    let (a, b) = tokio::join!(
        app.users
            .apply_role_and_block_change(&x, "y", Some("MODERATOR"), None),
        app.users
            .apply_role_and_block_change(&y, "x", Some("MODERATOR"), None),
    );
    a.unwrap();
    b.unwrap();

    // Whichever request commits first makes its actor a benefactor of the
    // other, so the second request is refused.
    assert_eq!(app.store.history_len().await, 1);
    let demoted = [app.reload("x").await, app.reload("y").await]
        .iter()
        .filter(|u| u.role == UserRole::Moderator)
        .count();
    assert_eq!(demoted, 1);
}
