use super::*;

/// Tests recording a new ticket.
///
/// Expected: Ok with an open, unclaimed ticket retrievable by channel
#[tokio::test]
async fn creates_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParam {
            guild_id: 1,
            channel_id: 500,
            opener_id: 2,
        })
        .await?;

    assert_eq!(ticket.status, TicketStatus::Open);
    assert!(ticket.claimed_by.is_none());
    assert_eq!(repo.get_by_channel(500).await?, Some(ticket));
    assert!(repo.get_by_channel(501).await?.is_none());

    Ok(())
}

/// Tests counting a member's open tickets.
///
/// Verifies that closed tickets and other members' tickets are not counted.
///
/// Expected: Ok(2)
#[tokio::test]
async fn counts_only_open_tickets_of_opener() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db, 1, 2).await?;
    factory::create_ticket(db, 1, 2).await?;
    TicketFactory::new(db, 1, 2).closed().build().await?;
    factory::create_ticket(db, 1, 3).await?;
    factory::create_ticket(db, 9, 2).await?;

    let repo = TicketRepository::new(db);

    assert_eq!(repo.count_open_by_opener(1, 2).await?, 2);

    Ok(())
}
