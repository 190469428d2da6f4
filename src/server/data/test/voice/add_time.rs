use super::*;

/// Tests accumulating time per channel.
///
/// Verifies that repeated additions to one channel sum and separate channels keep
/// separate totals.
///
/// Expected: Ok with totals ordered largest first
#[tokio::test]
async fn accumulates_per_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);
    repo.add_time(1, 2, 10, 600).await?;
    repo.add_time(1, 2, 10, 300).await?;
    repo.add_time(1, 2, 11, 1200).await?;

    let times = repo.get_times(1, 2).await?;

    assert_eq!(
        times,
        vec![
            VoiceTime {
                channel_id: 11,
                total_seconds: 1200
            },
            VoiceTime {
                channel_id: 10,
                total_seconds: 900
            },
        ]
    );

    Ok(())
}

/// Tests a member with no recorded time.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn empty_for_unknown_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);

    assert!(repo.get_times(1, 2).await?.is_empty());

    Ok(())
}

/// Tests adding time to an accumulator already near `i64::MAX`.
///
/// Expected: Ok with the total clamped at `i64::MAX`
#[tokio::test]
async fn saturates_at_max() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);
    repo.add_time(1, 2, 10, i64::MAX - 10).await?;
    repo.add_time(1, 2, 10, 60).await?;

    let times = repo.get_times(1, 2).await?;

    assert_eq!(times[0].total_seconds, i64::MAX);

    Ok(())
}
