use super::*;

/// Tests closing and reopening a ticket.
///
/// Verifies that `closed_at` is stamped on close and cleared on reopen.
///
/// Expected: Ok with matching status and timestamp at each step
#[tokio::test]
async fn close_and_reopen() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = TicketFactory::new(db, 1, 2).channel_id(700).build().await?;

    let repo = TicketRepository::new(db);
    let closed = repo.set_status(700, TicketStatus::Closed).await?;
    assert_eq!(closed.status, TicketStatus::Closed);
    assert!(closed.closed_at.is_some());
    assert!(repo.get_open().await?.is_empty());

    let reopened = repo.set_status(700, TicketStatus::Open).await?;
    assert_eq!(reopened.status, TicketStatus::Open);
    assert!(reopened.closed_at.is_none());
    assert_eq!(repo.get_open().await?[0].id, created.id);

    Ok(())
}

/// Tests claiming a ticket and recording its control message.
///
/// Expected: Ok with the claimer and message id stored
#[tokio::test]
async fn claim_and_control_message() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    TicketFactory::new(db, 1, 2).channel_id(700).build().await?;

    let repo = TicketRepository::new(db);
    repo.set_claimed(700, 55).await?;
    let ticket = repo.set_control_message(700, 800).await?;

    assert_eq!(ticket.claimed_by, Some(55));
    assert_eq!(ticket.control_message_id, Some(800));

    Ok(())
}

/// Tests updating a ticket in a channel with no ticket.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn missing_ticket_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo.set_status(1, TicketStatus::Closed).await;

    assert!(matches!(result, Err(sea_orm::DbErr::RecordNotFound(_))));

    Ok(())
}
