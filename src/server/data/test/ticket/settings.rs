use super::*;

/// Tests reading settings for an unconfigured guild.
///
/// Expected: Ok with defaults
#[tokio::test]
async fn defaults_when_unconfigured() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let settings = repo.get_settings(1).await?;

    assert!(settings.category_id.is_none());
    assert!(settings.staff_role_id.is_none());
    assert_eq!(settings.max_open_per_user, DEFAULT_MAX_OPEN_PER_USER);

    Ok(())
}

/// Tests applying individual settings changes.
///
/// Verifies that each update touches only its own field.
///
/// Expected: Ok with all written fields present
#[tokio::test]
async fn applies_each_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.update_settings(1, TicketSettingsUpdate::Category(Some(10)))
        .await?;
    repo.update_settings(1, TicketSettingsUpdate::LogChannel(Some(11)))
        .await?;
    repo.update_settings(1, TicketSettingsUpdate::StaffRole(Some(12)))
        .await?;
    let settings = repo
        .update_settings(1, TicketSettingsUpdate::MaxOpenPerUser(3))
        .await?;

    assert_eq!(settings.category_id, Some(10));
    assert_eq!(settings.log_channel_id, Some(11));
    assert_eq!(settings.staff_role_id, Some(12));
    assert_eq!(settings.max_open_per_user, 3);

    let cleared = repo
        .update_settings(1, TicketSettingsUpdate::StaffRole(None))
        .await?;
    assert!(cleared.staff_role_id.is_none());
    assert_eq!(cleared.category_id, Some(10));

    Ok(())
}
