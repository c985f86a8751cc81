//! Integration tests for the branch repository and write protection.

mod common;

use ledgerline_db::entities::branches;
use ledgerline_db::repositories::{
    BranchError, BranchRepository, CreateBranchInput, UpdateBranchInput,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

fn branch_code() -> String {
    format!("BR-{}", &Uuid::new_v4().simple().to_string()[..12])
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_duplicate_branch_code_rejected() {
    let db = common::connect().await;
    let existing = common::create_branch(&db).await;

    let repo = BranchRepository::new(db.clone());
    let result = repo
        .create_branch(CreateBranchInput {
            code: existing.code.clone(),
            name: "Copycat".to_string(),
            currency_id: existing.currency_id,
            is_head_office: false,
        })
        .await;

    assert!(matches!(result, Err(BranchError::DuplicateCode(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_second_head_office_rejected() {
    let db = common::connect().await;
    let currency = common::create_currency(&db).await;
    let repo = BranchRepository::new(db.clone());

    // Reuse the existing head office if a previous run seeded one
    let first = match repo.find_head_office().await.expect("query head office") {
        Some(head) => head,
        None => repo
            .create_branch(CreateBranchInput {
                code: branch_code(),
                name: "Head Office".to_string(),
                currency_id: currency.id,
                is_head_office: true,
            })
            .await
            .expect("Failed to create head office"),
    };

    let result = repo
        .create_branch(CreateBranchInput {
            code: branch_code(),
            name: "Second Head Office".to_string(),
            currency_id: currency.id,
            is_head_office: true,
        })
        .await;

    assert!(matches!(result, Err(BranchError::HeadOfficeExists(_))));
    assert_eq!(
        repo.find_head_office()
            .await
            .expect("query head office")
            .expect("head office exists")
            .id,
        first.id
    );
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_system_branch_rejects_update_but_allows_toggle() {
    let db = common::connect().await;
    let currency = common::create_currency(&db).await;

    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let seeded = branches::ActiveModel {
        id: Set(Uuid::now_v7()),
        code: Set(branch_code()),
        name: Set("Seeded Branch".to_string()),
        currency_id: Set(currency.id),
        is_head_office: Set(false),
        is_system_generated: Set(true),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let seeded = seeded.insert(&db).await.expect("Failed to seed branch");

    let repo = BranchRepository::new(db.clone());

    let result = repo
        .update_branch(
            seeded.id,
            UpdateBranchInput {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BranchError::Protected(_))));

    // Deactivation is the supported way to retire seeded records
    let toggled = repo
        .set_active(seeded.id, false)
        .await
        .expect("Toggle should be allowed");
    assert!(!toggled.active);
}
