use super::*;

/// Tests finishing an action with a victory.
///
/// Verifies that each credited member gets one participation and their share, and
/// that a second finish credits nothing.
///
/// Expected: Ok(Some) then Ok(None) with stats counted once
#[tokio::test]
async fn finish_credits_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_action(db, 1).await?;
    let repo = ActionRepository::new(db);

    let finished = repo
        .finish(action.id, ActionResult::Victory, &[(10, 500), (11, 499)])
        .await?
        .unwrap();
    assert_eq!(finished.status, ActionStatus::Finished);
    assert_eq!(finished.result, Some(ActionResult::Victory));
    assert!(!finished.registrations_open);
    assert!(finished.closed_at.is_some());

    let again = repo
        .finish(action.id, ActionResult::Defeat, &[(10, 0)])
        .await?;
    assert!(again.is_none());

    let stats = repo.ranking(1, 10).await?;
    assert_eq!(stats.len(), 2);
    let first = stats.iter().find(|s| s.user_id == 10).unwrap();
    assert_eq!(first.participations, 1);
    assert_eq!(first.total_earned_cents, 500);

    Ok(())
}

/// Tests the ranking order.
///
/// Expected: most participations first, ties broken by most earned
#[tokio::test]
async fn ranking_orders_by_participations_then_earned() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    let first = factory::create_action(db, 1).await?;
    let second = factory::create_action(db, 1).await?;

    repo.finish(first.id, ActionResult::Victory, &[(10, 100), (11, 300), (12, 0)])
        .await?;
    repo.finish(second.id, ActionResult::Defeat, &[(12, 0)]).await?;

    let ranking: Vec<u64> = repo
        .ranking(1, 10)
        .await?
        .into_iter()
        .map(|s| s.user_id)
        .collect();

    assert_eq!(ranking, [12, 11, 10]);
    assert!(repo.ranking(2, 10).await?.is_empty());

    Ok(())
}

/// Tests resetting a guild's actions.
///
/// Verifies that types and other guilds survive.
///
/// Expected: Ok with the deleted actions returned and stats zeroed
#[tokio::test]
async fn reset_keeps_types() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    let action_type = ActionTypeFactory::new(db, 1).build().await?;
    let action = ActionFactory::new(db, action_type.clone())
        .message_id(700)
        .build()
        .await?;
    repo.add_participant(action.id, 10).await?;
    repo.finish(action.id, ActionResult::Defeat, &[(10, 0)]).await?;
    let other = factory::create_action(db, 2).await?;
    repo.finish(other.id, ActionResult::Defeat, &[(10, 0)]).await?;

    let deleted = repo.reset(1).await?;

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].message_id, Some(700));
    assert!(repo.get(action.id).await?.is_none());
    assert!(repo.ranking(1, 10).await?.is_empty());
    assert_eq!(repo.ranking(2, 10).await?.len(), 1);
    assert_eq!(repo.get_types(1).await?.len(), 1);

    Ok(())
}
