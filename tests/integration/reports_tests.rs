//! Dashboard, genre and overdue reports

use ken_library::models::{
    book::CreateBook,
    transaction::IssueCopy,
};

use crate::common::{book, copy, date, member, services};

#[tokio::test]
async fn overdue_is_strictly_past_due_and_open() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let alice = member(&services, "Alice").await;
    let today = date(2024, 4, 10);

    let mut loans = Vec::new();
    for (accession_no, due) in [
        ("ACC-001", date(2024, 4, 9)),
        ("ACC-002", date(2024, 4, 10)),
        ("ACC-003", date(2024, 4, 11)),
        ("ACC-004", date(2024, 4, 1)),
    ] {
        let c = copy(&services, dune.id, accession_no).await;
        let loan = services
            .lending
            .issue(IssueCopy {
                copy_id: Some(c.id),
                member_id: alice.id,
                issue_date: Some(date(2024, 3, 20)),
                due_date: Some(due),
                ..Default::default()
            })
            .await
            .unwrap();
        loans.push(loan);
    }

    let overdue = services.reports.overdue_as_of(today).await.unwrap();
    assert_eq!(overdue.len(), 2);
    // Earliest due date first
    assert_eq!(overdue[0].accession_no.as_deref(), Some("ACC-004"));
    assert_eq!(overdue[0].days_overdue, 9);
    assert_eq!(overdue[1].accession_no.as_deref(), Some("ACC-001"));
    assert_eq!(overdue[1].days_overdue, 1);
    assert_eq!(overdue[1].member_name, "Alice");

    // Returning removes a loan from the report
    services
        .lending
        .return_transaction(loans[3].id, Some(today))
        .await
        .unwrap();
    let overdue = services.reports.overdue_as_of(today).await.unwrap();
    assert_eq!(overdue.len(), 1);

    let dashboard = services.reports.dashboard_as_of(today).await.unwrap();
    assert_eq!(dashboard.total_titles, 1);
    assert_eq!(dashboard.total_copies, 4);
    assert_eq!(dashboard.issued_now, 3);
    assert_eq!(dashboard.overdue, 1);
}

#[tokio::test]
async fn titles_grouped_by_genre() {
    let services = services().await;
    for (title, genre) in [
        ("Dune", Some("Sci-Fi")),
        ("Foundation", Some("Sci-Fi")),
        ("Emma", Some("Classic")),
        ("Untitled Notes", None),
    ] {
        services
            .catalog
            .create_book(CreateBook {
                title: title.to_string(),
                genre: genre.map(str::to_string),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let genres = services.reports.titles_by_genre().await.unwrap();
    assert_eq!(genres.len(), 3);
    assert_eq!(genres[0].genre.as_deref(), Some("Sci-Fi"));
    assert_eq!(genres[0].titles, 2);
    assert!(genres.iter().any(|g| g.genre.is_none() && g.titles == 1));
}

#[tokio::test]
async fn empty_store_reports_zeroes() {
    let services = services().await;
    let dashboard = services.reports.dashboard().await.unwrap();
    assert_eq!(dashboard.total_titles, 0);
    assert_eq!(dashboard.issued_now, 0);
    assert!(services.reports.overdue().await.unwrap().is_empty());
    assert!(services.reports.titles_by_genre().await.unwrap().is_empty());
}
