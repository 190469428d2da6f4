use super::*;

/// Tests reading settings for a guild that never configured actions.
///
/// Expected: Ok with every field unset
#[tokio::test]
async fn defaults_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = ActionRepository::new(db).get_settings(1).await?;

    assert_eq!(settings, Default::default());

    Ok(())
}

/// Tests moving the ranking to another channel.
///
/// Verifies that the stored ranking message is forgotten with the old channel.
///
/// Expected: Ok with the new channel and no message id
#[tokio::test]
async fn ranking_channel_change_clears_message() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    repo.update_settings(1, ActionSettingsUpdate::RankingChannel(Some(30)))
        .await?;
    let with_message = repo
        .update_settings(1, ActionSettingsUpdate::RankingMessage(Some(31)))
        .await?;
    assert_eq!(with_message.ranking_message_id, Some(31));

    let moved = repo
        .update_settings(1, ActionSettingsUpdate::RankingChannel(Some(40)))
        .await?;
    assert_eq!(moved.ranking_channel_id, Some(40));
    assert_eq!(moved.ranking_message_id, None);

    let channel = repo
        .update_settings(1, ActionSettingsUpdate::ActionChannel(Some(50)))
        .await?;
    assert_eq!(channel.action_channel_id, Some(50));
    assert_eq!(channel.ranking_channel_id, Some(40));

    Ok(())
}

/// Tests replacing the responsible roles.
///
/// Expected: Ok with only the latest set stored, per guild
#[tokio::test]
async fn replaces_responsible_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    repo.set_responsible_roles(1, &[5, 6]).await?;
    repo.set_responsible_roles(2, &[9]).await?;
    repo.set_responsible_roles(1, &[7]).await?;

    assert_eq!(repo.get_settings(1).await?.responsible_role_ids, vec![7]);
    assert_eq!(repo.get_settings(2).await?.responsible_role_ids, vec![9]);

    repo.set_responsible_roles(1, &[]).await?;
    assert!(repo.get_settings(1).await?.responsible_role_ids.is_empty());

    Ok(())
}
