//! Integration tests for file access enforcement and filtered listings.

mod helpers;

use filevault_auth::{AccessMode, FileFilterParams, can_access};
use filevault_core::ErrorKind;
use filevault_core::config::VaultConfig;
use filevault_service::UpdateFileRequest;
use filevault_entity::user::UserRole;

fn names(files: &[filevault_entity::file::FileMetadata]) -> Vec<String> {
    let mut names: Vec<String> = files.iter().map(|f| f.full_name()).collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_registered_file_is_private_to_owner() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let bob = app.actor("bob", UserRole::User).await;

    let file = app
        .files
        .register(&alice, "Report.PDF", Some("q3".into()), 2048)
        .await
        .unwrap();
    assert_eq!(file.name, "Report");
    assert_eq!(file.extension, "pdf");
    assert!(!file.is_public);

    assert_eq!(app.files.get(&alice, file.id).await.unwrap().id, file.id);
    let err = app.files.get(&bob, file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_public_file_is_readable_but_not_writable_by_others() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let bob = app.actor("bob", UserRole::User).await;
    let file = app.upload(&alice, "shared.txt", true).await;

    assert!(app.files.get(&bob, file.id).await.is_ok());

    let req = UpdateFileRequest {
        is_public: Some(false),
        ..Default::default()
    };
    let err = app.files.update(&bob, file.id, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    let err = app.files.delete(&bob, file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_moderator_manages_files_of_others() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let mike = app.actor("mike", UserRole::Moderator).await;
    let file = app.upload(&alice, "draft.txt", false).await;

    assert!(app.files.get(&mike, file.id).await.is_ok());

    let updated = app
        .files
        .update(
            &mike,
            file.id,
            UpdateFileRequest {
                name: Some("final.MD".into()),
                comment: Some("reviewed".into()),
                is_public: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.full_name(), "final.md");
    assert_eq!(updated.comment.as_deref(), Some("reviewed"));
    assert!(updated.is_public);
    assert_eq!(updated.owner_id, alice.user_id);
    assert!(updated.modified_at >= file.modified_at);
    assert_eq!(updated.uploaded_at, file.uploaded_at);

    let deleted = app.files.delete(&mike, file.id).await.unwrap();
    assert_eq!(deleted.id, file.id);
    let err = app.files.get(&alice, file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_owner_can_update_and_delete_own_file() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let file = app.upload(&alice, "notes.txt", false).await;

    let updated = app
        .files
        .update(
            &alice,
            file.id,
            UpdateFileRequest {
                is_public: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_public);
    assert!(app.files.delete(&alice, file.id).await.is_ok());
}

#[tokio::test]
async fn test_size_limit_is_exclusive() {
    let app = helpers::TestApp::with_vault(VaultConfig {
        max_file_size_mb: 1,
        ..Default::default()
    });
    let alice = app.actor("alice", UserRole::User).await;
    let limit = 1024 * 1024;

    let err = app
        .files
        .register(&alice, "big.iso", None, limit)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert!(app.files.register(&alice, "ok.iso", None, limit - 1).await.is_ok());

    let err = app.files.register(&alice, "  ", None, 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_empty_criteria_lists_exactly_the_readable_files() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let bob = app.actor("bob", UserRole::User).await;
    let mike = app.actor("mike", UserRole::Moderator).await;

    app.upload(&alice, "a-private.txt", false).await;
    app.upload(&alice, "a-public.txt", true).await;
    app.upload(&bob, "b-private.txt", false).await;
    app.upload(&bob, "b-public.txt", true).await;

    let everything = app.files.list(&mike, &FileFilterParams::default()).await.unwrap();
    assert_eq!(everything.len(), 4);

    let listed = app.files.list(&alice, &FileFilterParams::default()).await.unwrap();
    let expected: Vec<_> = everything
        .iter()
        .filter(|f| {
            can_access(
                alice.principal(),
                f,
                AccessMode::READ.required,
                AccessMode::READ.allow_if_public,
            )
        })
        .cloned()
        .collect();
    assert_eq!(names(&listed), names(&expected));
    assert_eq!(names(&listed), vec!["a-private.txt", "a-public.txt", "b-public.txt"]);

    let pairs = app.files.names(&alice).await.unwrap();
    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|p| listed.iter().any(|f| f.id == p.id)));
}

#[tokio::test]
async fn test_extension_filter_is_conjoined_with_name() {
    let app = helpers::TestApp::new();
    let root = app.actor("root", UserRole::Admin).await;
    for name in ["Budget.pdf", "budget.DOCX", "budget.xlsx", "Contract.pdf", "50%_off.pdf"] {
        app.upload(&root, name, false).await;
    }

    let params = FileFilterParams {
        extensions: vec!["pdf".into(), "docx".into()],
        ..Default::default()
    };
    let found = app.files.list(&root, &params).await.unwrap();
    assert_eq!(
        names(&found),
        vec!["50%_off.pdf", "Budget.pdf", "Contract.pdf", "budget.docx"]
    );

    let params = FileFilterParams {
        name: Some("BUDGET".into()),
        extensions: vec!["pdf".into(), "docx".into()],
        ..Default::default()
    };
    let found = app.files.list(&root, &params).await.unwrap();
    assert_eq!(names(&found), vec!["Budget.pdf", "budget.docx"]);

    let params = FileFilterParams {
        name: Some("%_".into()),
        ..Default::default()
    };
    let found = app.files.list(&root, &params).await.unwrap();
    assert_eq!(names(&found), vec!["50%_off.pdf"]);
}

#[tokio::test]
async fn test_listing_is_idempotent() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    app.upload(&alice, "one.txt", false).await;
    app.upload(&alice, "two.txt", true).await;

    let params = FileFilterParams {
        name: Some("o".into()),
        ..Default::default()
    };
    let first = app.files.list(&alice, &params).await.unwrap();
    let second = app.files.list(&alice, &params).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_many_fails_on_any_unreadable_file() {
    let app = helpers::TestApp::new();
    let alice = app.actor("alice", UserRole::User).await;
    let bob = app.actor("bob", UserRole::User).await;
    let public = app.upload(&bob, "public.txt", true).await;
    let private = app.upload(&bob, "private.txt", false).await;

    let files = app.files.get_many(&alice, &[public.id]).await.unwrap();
    assert_eq!(files.len(), 1);

    let err = app
        .files
        .get_many(&alice, &[public.id, private.id])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}
