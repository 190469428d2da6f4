use super::*;

fn log_param(user_id: u64, reason: &str, count: i32) -> CreateWarningLogParam {
    CreateWarningLogParam {
        guild_id: 1,
        user_id,
        moderator_id: 50,
        reason: reason.to_string(),
        outcome: WarningOutcome {
            count,
            action: WarningAction::for_count(count),
        },
    }
}

/// Tests appending to the warning history.
///
/// Expected: Ok with the outcome's count and action stored
#[tokio::test]
async fn appends_log_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);
    let entry = repo.append_log(log_param(2, "spam", 2)).await?;

    assert_eq!(entry.user_id, 2);
    assert_eq!(entry.moderator_id, 50);
    assert_eq!(entry.count, 2);
    assert_eq!(entry.action, "adv2");
    assert_eq!(entry.reason, "spam");

    Ok(())
}

/// Tests reading the history for a member.
///
/// Verifies that entries come back newest first and other members' entries are excluded.
///
/// Expected: Ok with the member's two entries in reverse order
#[tokio::test]
async fn returns_member_history_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);
    repo.append_log(log_param(2, "first", 1)).await?;
    repo.append_log(log_param(3, "other member", 1)).await?;
    repo.append_log(log_param(2, "second", 2)).await?;

    let logs = repo.get_logs(1, 2).await?;
    let reasons: Vec<&str> = logs.iter().map(|l| l.reason.as_str()).collect();

    assert_eq!(reasons, vec!["second", "first"]);

    Ok(())
}
