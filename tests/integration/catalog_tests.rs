//! Books, copies, members, locations and bulk import

use std::str::FromStr;

use rust_decimal::Decimal;

use ken_library::{
    models::{
        book::{BookQuery, CreateBook, UpdateBook},
        copy::{CopyCondition, CopyQuery, CreateCopy, UpdateCopy},
        location::CreateLocation,
        member::{CreateMember, UpdateMember},
        transaction::{Availability, IssueCopy},
    },
    AppError,
};

use crate::common::{book, copy, date, member, services};

fn row(title: &str, author: Option<&str>) -> CreateBook {
    CreateBook {
        title: title.to_string(),
        author: author.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn identical_book_is_stored_once() {
    let services = services().await;

    let (first, created) = services
        .catalog
        .create_book(row("Dune", Some("Frank Herbert")))
        .await
        .unwrap();
    assert!(created);

    let (second, created) = services
        .catalog
        .create_book(row(" Dune ", Some("Frank Herbert ")))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);

    // Blank and missing author are the same record
    let (a, _) = services.catalog.create_book(row("Emma", None)).await.unwrap();
    let (b, created) = services.catalog.create_book(row("Emma", Some("  "))).await.unwrap();
    assert!(!created);
    assert_eq!(a.id, b.id);

    // A different author is a different record
    let (_, created) = services
        .catalog
        .create_book(row("Dune", Some("Someone Else")))
        .await
        .unwrap();
    assert!(created);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let services = services().await;
    let err = services.catalog.create_book(row("   ", None)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn import_is_idempotent() {
    let services = services().await;
    let rows = vec![
        row("Dune", Some("Frank Herbert")),
        row("Dune", Some("Frank Herbert")),
        row("", Some("Nobody")),
        row("Emma", Some("Jane Austen")),
    ];

    let report = services.catalog.import_books(rows.clone()).await.unwrap();
    assert_eq!(report.received, 4);
    assert_eq!(report.created, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped, 1);

    let again = services.catalog.import_books(rows).await.unwrap();
    assert_eq!(again.created, 0);
    assert_eq!(again.duplicates, 3);

    let books = services.catalog.search_books(&BookQuery::default()).await.unwrap();
    assert_eq!(books.len(), 2);
}

#[tokio::test]
async fn import_reports_invalid_rows() {
    let services = services().await;
    let rows = vec![
        CreateBook {
            year: Some(12000),
            ..row("Far Future", None)
        },
        row("Dune", None),
    ];
    let report = services.catalog.import_books(rows).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("Row 1"));
}

#[tokio::test]
async fn search_matches_title_author_and_genre() {
    let services = services().await;
    services
        .catalog
        .create_book(CreateBook {
            genre: Some("Sci-Fi".into()),
            ..row("Dune", Some("Frank Herbert"))
        })
        .await
        .unwrap();
    services.catalog.create_book(row("Emma", Some("Jane Austen"))).await.unwrap();

    let by_author = services
        .catalog
        .search_books(&BookQuery {
            q: Some("herbert".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].title, "Dune");

    let by_genre = services
        .catalog
        .search_books(&BookQuery {
            genre: Some("Sci-Fi".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_genre.len(), 1);
}

#[tokio::test]
async fn book_with_copies_cannot_be_edited() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let emma = book(&services, "Emma").await;
    copy(&services, dune.id, "ACC-001").await;

    let changes = UpdateBook {
        genre: Some("Sci-Fi".into()),
        ..Default::default()
    };
    let err = services.catalog.update_book(dune.id, changes.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let updated = services.catalog.update_book(emma.id, changes).await.unwrap();
    assert_eq!(updated.genre.as_deref(), Some("Sci-Fi"));
    assert_eq!(updated.title, "Emma");

    let err = services
        .catalog
        .update_book(404, UpdateBook::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn copy_requires_existing_book() {
    let services = services().await;
    let err = services
        .catalog
        .create_copy(CreateCopy {
            book_id: 42,
            accession_no: Some("ACC-001".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn accession_number_is_unique() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let emma = book(&services, "Emma").await;

    let first = copy(&services, dune.id, "ACC-001").await;
    let (again, created) = services
        .catalog
        .create_copy(CreateCopy {
            book_id: dune.id,
            accession_no: Some("ACC-001".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(again.id, first.id);

    let other = copy(&services, emma.id, "ACC-002").await;
    let err = services
        .catalog
        .update_copy(
            other.id,
            UpdateCopy {
                accession_no: Some("ACC-001".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn copy_fields_round_trip_through_store() {
    let services = services().await;
    let dune = book(&services, "Dune").await;

    let (stored, _) = services
        .catalog
        .create_copy(CreateCopy {
            book_id: dune.id,
            accession_no: Some("ACC-010".into()),
            condition: CopyCondition::Worn,
            acquired_date: Some(date(2023, 5, 2)),
            purchase_price: Some(Decimal::from_str("12.50").unwrap()),
            current_location: Some("Compartment 3".into()),
        })
        .await
        .unwrap();

    let fetched = services.catalog.get_copy(stored.id).await.unwrap();
    assert_eq!(fetched.condition, CopyCondition::Worn);
    assert_eq!(fetched.acquired_date, Some(date(2023, 5, 2)));
    assert_eq!(fetched.purchase_price, Some(Decimal::from_str("12.50").unwrap()));

    let updated = services
        .catalog
        .update_copy(
            stored.id,
            UpdateCopy {
                condition: Some(CopyCondition::Damaged),
                current_location: Some("Compartment 7".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.condition, CopyCondition::Damaged);
    assert_eq!(updated.current_location.as_deref(), Some("Compartment 7"));
    assert_eq!(updated.accession_no.as_deref(), Some("ACC-010"));
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let err = services
        .catalog
        .create_copy(CreateCopy {
            book_id: dune.id,
            accession_no: Some("ACC-001".into()),
            purchase_price: Some(Decimal::from_str("-1").unwrap()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn copies_for_book_show_holder() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let issued = copy(&services, dune.id, "ACC-001").await;
    copy(&services, dune.id, "ACC-002").await;
    let alice = member(&services, "Alice").await;

    services
        .lending
        .issue(IssueCopy {
            copy_id: Some(issued.id),
            member_id: alice.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let copies = services.catalog.copies_for_book(dune.id).await.unwrap();
    assert_eq!(copies.len(), 2);
    let listed = copies.iter().find(|c| c.id == issued.id).unwrap();
    assert_eq!(listed.availability, Availability::Issued);
    assert_eq!(listed.issued_to.as_ref().map(|m| m.id), Some(alice.id));
    let free = copies.iter().find(|c| c.id != issued.id).unwrap();
    assert_eq!(free.availability, Availability::Available);
    assert!(free.issued_to.is_none());
}

#[tokio::test]
async fn label_payload_names_accession_and_title() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let c = copy(&services, dune.id, "ACC-001").await;
    let label = services.catalog.label(c.id).await.unwrap();
    assert_eq!(label.payload, "KEN|ACC-001|Dune");

    let err = services.catalog.label(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn members_may_share_a_name() {
    let services = services().await;
    let first = member(&services, "Alice").await;
    let second = member(&services, "Alice").await;
    assert_ne!(first.id, second.id);

    let err = services
        .members
        .create(CreateMember {
            name: "  ".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let updated = services
        .members
        .update(
            first.id,
            UpdateMember {
                phone: Some("555-0100".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn default_locations_are_seeded_once() {
    let services = services().await;

    let added = services.locations.ensure_default_locations(45).await.unwrap();
    assert_eq!(added, 45);
    let again = services.locations.ensure_default_locations(45).await.unwrap();
    assert_eq!(again, 0);

    let locations = services.locations.list().await.unwrap();
    assert_eq!(locations.len(), 45);
    assert_eq!(locations[0].code, "Compartment 1");
    assert_eq!(locations[44].code, "Compartment 45");

    let (existing, created) = services
        .locations
        .create(CreateLocation {
            code: "Compartment 1".into(),
            description: Some("ignored".into()),
        })
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(existing.id, locations[0].id);

    let (_, created) = services
        .locations
        .create(CreateLocation {
            code: "Reading Room".into(),
            description: None,
        })
        .await
        .unwrap();
    assert!(created);
}

#[tokio::test]
async fn guarded_update_refuses_books_with_copies() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    copy(&services, dune.id, "ACC-001").await;

    let err = services
        .repository
        .books
        .update(dune.id, &row("Dune Messiah", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(services.catalog.get_book(dune.id).await.unwrap().title, "Dune");

    let err = services
        .repository
        .books
        .update(999, &row("Nothing", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn copy_listing_filters_by_availability() {
    let services = services().await;
    let dune = book(&services, "Dune").await;
    let issued = copy(&services, dune.id, "ACC-001").await;
    let free = copy(&services, dune.id, "ACC-002").await;
    let alice = member(&services, "Alice").await;

    services
        .lending
        .issue(IssueCopy {
            copy_id: Some(issued.id),
            member_id: alice.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let available = services
        .catalog
        .list_copies(&CopyQuery {
            availability: Some(Availability::Available),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, free.id);

    let on_loan = services
        .catalog
        .list_copies(&CopyQuery {
            availability: Some(Availability::Issued),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_loan.len(), 1);
    assert_eq!(on_loan[0].id, issued.id);

    let all = services.catalog.list_copies(&CopyQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn export_returns_every_row_and_column() {
    let services = services().await;
    services.locations.ensure_default_locations(45).await.unwrap();
    let dune = book(&services, "Dune").await;
    let alice = member(&services, "Alice").await;

    // More copies than a single listing page holds
    for i in 0..1005 {
        services
            .catalog
            .create_copy(CreateCopy {
                book_id: dune.id,
                accession_no: Some(format!("ACC-{:04}", i)),
                purchase_price: Some(Decimal::from_str("9.99").unwrap()),
                acquired_date: Some(date(2022, 1, 3)),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    let loan = services
        .lending
        .issue(IssueCopy {
            accession_no: Some("ACC-0000".into()),
            member_id: alice.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let copies = services.export.copies().await.unwrap();
    assert_eq!(copies.len(), 1005);
    assert_eq!(copies[0].purchase_price, Some(Decimal::from_str("9.99").unwrap()));
    assert_eq!(copies[0].acquired_date, Some(date(2022, 1, 3)));

    let snapshot = services.export.snapshot().await.unwrap();
    assert_eq!(snapshot.books.len(), 1);
    assert_eq!(snapshot.copies.len(), 1005);
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(snapshot.locations.len(), 45);
    assert_eq!(snapshot.transactions.len(), 1);
    assert_eq!(snapshot.transactions[0].id, loan.id);
}
