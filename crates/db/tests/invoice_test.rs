//! Integration tests for the invoice repository.

mod common;

use chrono::NaiveDate;
use ledgerline_core::document::LinesPatch;
use ledgerline_db::entities::sea_orm_active_enums::{ContactKind, DocumentStatus};
use ledgerline_db::repositories::{
    ContactRepository, CreateContactInput, CreateInvoiceInput, InvoiceError, InvoiceLineInput,
    InvoiceRepository, RecordPaymentInput, UpdateInvoiceInput,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

fn invoice_no() -> String {
    format!("INV-{}", Uuid::new_v4())
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date")
}

fn line(qty: Decimal, rate: Decimal, tax: Option<Decimal>) -> InvoiceLineInput {
    InvoiceLineInput {
        line_id: None,
        description: "Widget".to_string(),
        qty,
        rate,
        discount_amount: dec!(0),
        tax_rate_percent: tax,
    }
}

async fn create_customer(db: &DatabaseConnection, branch_id: Uuid) -> Uuid {
    let repo = ContactRepository::new(db.clone());
    repo.create_contact(CreateContactInput {
        branch_id,
        kind: ContactKind::Customer,
        name: "Acme Ltd".to_string(),
        email: None,
        phone: None,
        credit_limit: None,
        credit_days: None,
        receivable_account_id: None,
        payable_account_id: None,
    })
    .await
    .expect("Failed to create contact")
    .id
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_create_invoice_derives_totals() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(2), dec!(50), Some(dec!(10)))],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    assert_eq!(created.invoice.status, DocumentStatus::Draft);
    assert_eq!(created.invoice.subtotal, dec!(100.00));
    assert_eq!(created.invoice.tax_total, dec!(10.00));
    assert_eq!(created.invoice.grand_total, dec!(110.00));
    assert_eq!(created.invoice.balance_due, dec!(110.00));
    assert_eq!(created.lines.len(), 1);
    assert_eq!(created.lines[0].line_total, dec!(100.00));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_negative_qty_rejected() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let result = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(-1), dec!(50), None)],
            created_by: None,
        })
        .await;

    assert!(matches!(result, Err(InvoiceError::Document(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_replace_lines_recomputes_totals() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(2), dec!(50), Some(dec!(10)))],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    let updated = repo
        .update_invoice(
            created.invoice.id,
            UpdateInvoiceInput {
                lines: LinesPatch::Replace(vec![line(dec!(3), dec!(20), None)]),
                expected_version: 0,
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update invoice");

    assert_eq!(updated.invoice.subtotal, dec!(60.00));
    assert_eq!(updated.invoice.tax_total, dec!(0));
    assert_eq!(updated.invoice.grand_total, dec!(60.00));
    assert_eq!(updated.invoice.lock_version, 1);
    assert_eq!(updated.lines.len(), 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_replace_with_empty_set_deletes_all_lines() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(2), dec!(50), None)],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    let updated = repo
        .update_invoice(
            created.invoice.id,
            UpdateInvoiceInput {
                lines: LinesPatch::Replace(vec![]),
                expected_version: 0,
                ..Default::default()
            },
        )
        .await
        .expect("Failed to clear lines");

    assert!(updated.lines.is_empty());
    assert_eq!(updated.invoice.grand_total, dec!(0));

    // An invoice without lines cannot post
    let result = repo.post_invoice(created.invoice.id).await;
    assert!(matches!(result, Err(InvoiceError::Empty)));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_payment_lifecycle() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(2), dec!(50), Some(dec!(10)))],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    repo.post_invoice(created.invoice.id)
        .await
        .expect("Invoice should post");

    // Partial payment
    let after_partial = repo
        .record_payment(
            created.invoice.id,
            RecordPaymentInput {
                payment_date: date(),
                amount: dec!(40),
                method: Some("bank".to_string()),
                reference: None,
            },
        )
        .await
        .expect("Partial payment should succeed");
    assert_eq!(after_partial.status, DocumentStatus::PartiallyPaid);
    assert_eq!(after_partial.balance_due, dec!(70.00));

    // Settling payment
    let after_full = repo
        .record_payment(
            created.invoice.id,
            RecordPaymentInput {
                payment_date: date(),
                amount: dec!(70),
                method: Some("bank".to_string()),
                reference: None,
            },
        )
        .await
        .expect("Settling payment should succeed");
    assert_eq!(after_full.status, DocumentStatus::Paid);
    assert_eq!(after_full.balance_due, dec!(0.00));

    // A paid invoice takes no more payments
    let result = repo
        .record_payment(
            created.invoice.id,
            RecordPaymentInput {
                payment_date: date(),
                amount: dec!(1),
                method: None,
                reference: None,
            },
        )
        .await;
    assert!(matches!(result, Err(InvoiceError::Document(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_overpayment_rejected() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(1), dec!(100), None)],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    repo.post_invoice(created.invoice.id)
        .await
        .expect("Invoice should post");

    let result = repo
        .record_payment(
            created.invoice.id,
            RecordPaymentInput {
                payment_date: date(),
                amount: dec!(150),
                method: None,
                reference: None,
            },
        )
        .await;

    assert!(matches!(result, Err(InvoiceError::Document(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_draft_invoice_rejects_payment() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(1), dec!(100), None)],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    let result = repo
        .record_payment(
            created.invoice.id,
            RecordPaymentInput {
                payment_date: date(),
                amount: dec!(10),
                method: None,
                reference: None,
            },
        )
        .await;

    assert!(matches!(result, Err(InvoiceError::Document(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_contact_with_invoices_cannot_be_deleted() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    repo.create_invoice(CreateInvoiceInput {
        branch_id: branch.id,
        contact_id,
        invoice_no: invoice_no(),
        invoice_date: date(),
        due_date: None,
        lines: vec![line(dec!(1), dec!(10), None)],
        created_by: None,
    })
    .await
    .expect("Failed to create invoice");

    let contacts = ContactRepository::new(db.clone());
    let result = contacts.delete_contact(contact_id).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_concurrent_full_payments_settle_exactly_once() {
    let db = common::connect().await;
    let branch = common::create_branch(&db).await;
    let contact_id = create_customer(&db, branch.id).await;

    let repo = InvoiceRepository::new(db.clone());
    let created = repo
        .create_invoice(CreateInvoiceInput {
            branch_id: branch.id,
            contact_id,
            invoice_no: invoice_no(),
            invoice_date: date(),
            due_date: None,
            lines: vec![line(dec!(1), dec!(100), None)],
            created_by: None,
        })
        .await
        .expect("Failed to create invoice");

    repo.post_invoice(created.invoice.id)
        .await
        .expect("Invoice should post");

    let payment = || RecordPaymentInput {
        payment_date: date(),
        amount: dec!(100),
        method: None,
        reference: None,
    };

    // Both payments see the same balance; the header lock makes the
    // second one re-check after the first commits and fail.
    let (first, second) = tokio::join!(
        repo.record_payment(created.invoice.id, payment()),
        repo.record_payment(created.invoice.id, payment()),
    );
    assert!(first.is_ok() != second.is_ok());
    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(loser, Err(InvoiceError::Document(_))));

    let stored = repo
        .find_invoice_by_id(created.invoice.id)
        .await
        .expect("Failed to load invoice")
        .expect("Invoice should exist");
    assert_eq!(stored.invoice.status, DocumentStatus::Paid);
    assert_eq!(stored.invoice.balance_due, dec!(0.00));
    assert_eq!(repo.list_payments(created.invoice.id).await.expect("payments").len(), 1);
}
