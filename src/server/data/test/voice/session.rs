use super::*;

/// Tests opening and taking a session.
///
/// Expected: Ok(Some) once, then Ok(None) since the session is consumed
#[tokio::test]
async fn take_session_consumes_it() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let joined_at = Utc::now() - Duration::minutes(30);
    let repo = VoiceRepository::new(db);
    repo.start_session(1, 2, 10, joined_at).await?;

    let taken = repo.take_session(1, 2).await?.unwrap();
    assert_eq!(taken.channel_id, 10);
    assert_eq!(taken.joined_at.timestamp(), joined_at.timestamp());

    assert!(repo.take_session(1, 2).await?.is_none());
    assert!(repo.get_session(1, 2).await?.is_none());

    Ok(())
}

/// Tests that starting a session replaces a stale one.
///
/// Expected: Ok with only the newest session kept
#[tokio::test]
async fn start_session_replaces_stale_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_voice_session(db, 1, 2, 10, Utc::now() - Duration::hours(5)).await?;

    let repo = VoiceRepository::new(db);
    repo.start_session(1, 2, 11, Utc::now()).await?;

    let session = repo.get_session(1, 2).await?.unwrap();
    assert_eq!(session.channel_id, 11);

    Ok(())
}
