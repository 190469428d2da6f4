use super::*;

/// Tests configuring a command for the first time.
///
/// Expected: Ok with roles stored
#[tokio::test]
async fn configures_new_command() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandPermissionRepository::new(db);
    let permission = repo.set_roles(1, "purge", &[5, 6]).await?;

    assert_eq!(permission.role_ids, vec![5, 6]);
    assert_eq!(repo.get(1, "purge").await?, Some(permission));

    Ok(())
}

/// Tests replacing the role set of a configured command.
///
/// Verifies that old roles are removed rather than merged.
///
/// Expected: Ok with only the new roles and a single configuration row
#[tokio::test]
async fn replaces_existing_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandPermissionRepository::new(db);
    repo.set_roles(1, "ficha", &[1, 2]).await?;
    let permission = repo.set_roles(1, "ficha", &[3]).await?;

    assert_eq!(permission.role_ids, vec![3]);
    let rows = entity::prelude::CommandPermission::find().count(db).await?;
    assert_eq!(rows, 1);
    let role_rows = entity::prelude::CommandPermissionRole::find()
        .count(db)
        .await?;
    assert_eq!(role_rows, 1);

    Ok(())
}

/// Tests storing an explicit empty role set.
///
/// Verifies that selecting zero roles still marks the command configured.
///
/// Expected: Ok(Some) with no roles
#[tokio::test]
async fn stores_explicit_empty_set() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandPermissionRepository::new(db);
    repo.set_roles(1, "comandos", &[]).await?;

    let permission = repo.get(1, "comandos").await?;
    assert!(permission.is_some());
    assert!(permission.unwrap().role_ids.is_empty());

    Ok(())
}
