use super::*;

/// Tests joining, leaving, removing and restoring participants.
///
/// Verifies that removed members are listed apart and restored members return to the
/// active list.
///
/// Expected: Ok with the roster partitioned at each step
#[tokio::test]
async fn roster_partitions_removed() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_action(db, 1).await?;
    let repo = ActionRepository::new(db);

    repo.add_participant(action.id, 10).await?;
    repo.add_participant(action.id, 11).await?;
    repo.add_participant(action.id, 12).await?;

    assert!(repo.delete_participant(action.id, 11).await?);
    assert!(repo.set_removed(action.id, 12, Some(99)).await?);

    let roster = repo.get_roster(action.id).await?.unwrap();
    let active: Vec<u64> = roster.participants.iter().map(|p| p.user_id).collect();
    assert_eq!(active, [10]);
    assert_eq!(roster.removed.len(), 1);
    assert_eq!(roster.removed[0].removed_by, Some(99));

    repo.set_removed(action.id, 12, None).await?;
    let roster = repo.get_roster(action.id).await?.unwrap();
    let active: Vec<u64> = roster.participants.iter().map(|p| p.user_id).collect();
    assert_eq!(active, [10, 12]);
    assert!(roster.removed.is_empty());

    Ok(())
}

/// Tests joining the same action twice.
///
/// Expected: Err from the unique index
#[tokio::test]
async fn duplicate_participant_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_action(db, 1).await?;
    let repo = ActionRepository::new(db);

    repo.add_participant(action.id, 10).await?;

    assert!(repo.add_participant(action.id, 10).await.is_err());

    Ok(())
}

/// Tests toggling registrations and storing the message id.
///
/// Expected: Ok with the flag and message id stored
#[tokio::test]
async fn registrations_and_message() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_action(db, 1).await?;
    let repo = ActionRepository::new(db);

    assert!(repo.set_registrations_open(action.id, true).await?.registrations_open);
    assert!(!repo.set_registrations_open(action.id, false).await?.registrations_open);
    assert_eq!(repo.set_message(action.id, 777).await?.message_id, Some(777));

    assert!(matches!(
        repo.set_message(action.id + 100, 1).await,
        Err(sea_orm::DbErr::RecordNotFound(_))
    ));

    Ok(())
}

/// Tests cancelling an action.
///
/// Expected: Ok(true) with the action and its participants gone
#[tokio::test]
async fn delete_removes_participants() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_action(db, 1).await?;
    let repo = ActionRepository::new(db);
    repo.add_participant(action.id, 10).await?;

    assert!(repo.delete(action.id).await?);
    assert!(repo.get_roster(action.id).await?.is_none());
    assert!(!repo.delete_participant(action.id, 10).await?);

    Ok(())
}

/// Tests listing unfinished actions across guilds.
///
/// Expected: Ok with only the open actions
#[tokio::test]
async fn unfinished_excludes_finished() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let open = factory::create_action(db, 1).await?;
    let other_guild = factory::create_action(db, 2).await?;
    let action_type = factory::create_action_type(db, 1).await?;
    ActionFactory::new(db, action_type).finished().build().await?;

    let ids: Vec<i32> = ActionRepository::new(db)
        .get_unfinished()
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(ids, [open.id, other_guild.id]);

    Ok(())
}
