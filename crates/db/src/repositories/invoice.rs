//! Invoice repository.
//!
//! Invoices carry priced lines. Header totals (subtotal, discount,
//! tax, grand total) are derived from the stored lines on every
//! mutation, and the balance due tracks allocated payments.

use chrono::NaiveDate;
use ledgerline_core::document::{
    DocumentError, DocumentLine, DocumentStatus as CoreStatus, LinesPatch, PricedLine,
    PricedTotals, ValidationReport, assign_line_ids, balance_due, ensure_editable, ensure_version,
    settlement_status,
};
use ledgerline_core::registry::{BranchProfile, RegistryError};
use ledgerline_shared::types::{LineId, Page, PageRequest};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    branches, contacts, invoice_lines, invoice_payments, invoices,
    sea_orm_active_enums::DocumentStatus,
};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(Uuid),

    /// Contact not found.
    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),

    /// Invoice number already used in the branch.
    #[error("Invoice number '{0}' already exists in this branch")]
    DuplicateNumber(String),

    /// Cannot post an invoice without lines.
    #[error("Invoice has no lines")]
    Empty,

    /// Payment must be positive.
    #[error("Payment amount must be positive")]
    NonPositivePayment,

    /// Document lifecycle rule failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Branch scoping rule failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A single invoice line as submitted by a caller.
#[derive(Debug, Clone)]
pub struct InvoiceLineInput {
    /// Line identity; generated when the caller supplies none.
    pub line_id: Option<LineId>,
    /// Line description.
    pub description: String,
    /// Quantity.
    pub qty: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Flat discount for this line.
    pub discount_amount: Decimal,
    /// Tax rate percentage, if taxed.
    pub tax_rate_percent: Option<Decimal>,
}

impl InvoiceLineInput {
    fn to_priced(&self) -> PricedLine {
        PricedLine {
            line_id: self.line_id,
            qty: self.qty,
            rate: self.rate,
            discount_amount: self.discount_amount,
            tax_rate_percent: self.tax_rate_percent,
        }
    }
}

impl DocumentLine for InvoiceLineInput {
    fn line_id(&self) -> Option<LineId> {
        self.line_id
    }

    fn set_line_id(&mut self, id: LineId) {
        self.line_id = Some(id);
    }
}

/// An invoice header with its lines.
#[derive(Debug, Clone)]
pub struct InvoiceWithLines {
    /// The invoice header.
    pub invoice: invoices::Model,
    /// Lines in position order.
    pub lines: Vec<invoice_lines::Model>,
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Billed contact.
    pub contact_id: Uuid,
    /// Invoice number (unique within branch).
    pub invoice_no: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Invoice lines.
    pub lines: Vec<InvoiceLineInput>,
    /// User creating the invoice.
    pub created_by: Option<Uuid>,
}

/// Input for updating a draft invoice.
#[derive(Debug, Clone, Default)]
pub struct UpdateInvoiceInput {
    /// Invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Line replacement: `Unchanged` keeps the stored set, `Replace`
    /// swaps it wholesale.
    pub lines: LinesPatch<InvoiceLineInput>,
    /// Version the writer read before mutating.
    pub expected_version: i32,
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Amount allocated to this invoice.
    pub amount: Decimal,
    /// Payment method label.
    pub method: Option<String>,
    /// External reference.
    pub reference: Option<String>,
}

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Filter by status.
    pub status: Option<DocumentStatus>,
    /// Filter by contact.
    pub contact_id: Option<Uuid>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Free-text search over the invoice number.
    pub search: Option<String>,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft invoice with its lines in one transaction.
    ///
    /// Header totals are derived from the lines; caller-supplied
    /// totals are never trusted.
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<InvoiceWithLines, InvoiceError> {
        let branch = branches::Entity::find_by_id(input.branch_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::BranchNotFound(input.branch_id))?;
        BranchProfile::from(branch).ensure_writable()?;

        let contact = contacts::Entity::find_by_id(input.contact_id)
            .one(&self.db)
            .await?;
        if contact.is_none() {
            return Err(InvoiceError::ContactNotFound(input.contact_id));
        }

        let taken = invoices::Entity::find()
            .filter(invoices::Column::BranchId.eq(input.branch_id))
            .filter(invoices::Column::InvoiceNo.eq(&input.invoice_no))
            .one(&self.db)
            .await?;
        if taken.is_some() {
            return Err(InvoiceError::DuplicateNumber(input.invoice_no));
        }

        let mut lines = input.lines;
        validate_line_inputs(&lines)?;
        assign_line_ids(&mut lines);

        let priced: Vec<PricedLine> = lines.iter().map(InvoiceLineInput::to_priced).collect();
        let totals = PricedTotals::compute(&priced);

        let invoice_id = Uuid::now_v7();
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let txn = self.db.begin().await?;

        let header = invoices::ActiveModel {
            id: Set(invoice_id),
            branch_id: Set(input.branch_id),
            contact_id: Set(input.contact_id),
            invoice_no: Set(input.invoice_no),
            invoice_date: Set(input.invoice_date),
            due_date: Set(input.due_date),
            status: Set(DocumentStatus::Draft),
            subtotal: Set(totals.subtotal),
            discount_total: Set(totals.discount_total),
            tax_total: Set(totals.tax_total),
            grand_total: Set(totals.grand_total),
            balance_due: Set(totals.grand_total),
            lock_version: Set(0),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let invoice = header.insert(&txn).await?;

        let stored = insert_lines(&txn, invoice_id, &lines).await?;

        txn.commit().await?;

        tracing::info!(invoice_id = %invoice_id, lines = stored.len(), "created invoice");
        Ok(InvoiceWithLines {
            invoice,
            lines: stored,
        })
    }

    /// Updates a draft invoice, optionally replacing its lines
    /// wholesale, and recomputes the header totals.
    ///
    /// The header is re-read under a row lock inside the transaction,
    /// so two writers holding the same version serialize and the loser
    /// gets a version mismatch instead of merging line sets.
    pub async fn update_invoice(
        &self,
        id: Uuid,
        input: UpdateInvoiceInput,
    ) -> Result<InvoiceWithLines, InvoiceError> {
        if let LinesPatch::Replace(new_lines) = &input.lines {
            validate_line_inputs(new_lines)?;
        }

        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;

        ensure_editable(invoice.status.into())?;
        ensure_version(input.expected_version, invoice.lock_version)?;

        let stored = match input.lines {
            LinesPatch::Unchanged => {
                invoice_lines::Entity::find()
                    .filter(invoice_lines::Column::InvoiceId.eq(id))
                    .order_by_asc(invoice_lines::Column::Position)
                    .all(&txn)
                    .await?
            }
            LinesPatch::Replace(mut new_lines) => {
                assign_line_ids(&mut new_lines);
                invoice_lines::Entity::delete_many()
                    .filter(invoice_lines::Column::InvoiceId.eq(id))
                    .exec(&txn)
                    .await?;
                insert_lines(&txn, id, &new_lines).await?
            }
        };

        let priced: Vec<PricedLine> = stored.iter().map(priced_from_model).collect();
        let totals = PricedTotals::compute(&priced);

        let mut model: invoices::ActiveModel = invoice.into();
        if let Some(date) = input.invoice_date {
            model.invoice_date = Set(date);
        }
        if let Some(due) = input.due_date {
            model.due_date = Set(due);
        }
        model.subtotal = Set(totals.subtotal);
        model.discount_total = Set(totals.discount_total);
        model.tax_total = Set(totals.tax_total);
        model.grand_total = Set(totals.grand_total);
        model.balance_due = Set(totals.grand_total);
        model.lock_version = Set(input.expected_version + 1);
        model.updated_at = Set(chrono::Utc::now().into());
        let invoice = model.update(&txn).await?;

        txn.commit().await?;

        Ok(InvoiceWithLines {
            invoice,
            lines: stored,
        })
    }

    /// Approves a draft invoice, locking its content ahead of posting.
    pub async fn approve_invoice(&self, id: Uuid) -> Result<invoices::Model, InvoiceError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;

        let status: CoreStatus = invoice.status.into();
        if !status.can_approve() {
            return Err(InvoiceError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Approved,
            }));
        }

        let mut model: invoices::ActiveModel = invoice.into();
        model.status = Set(DocumentStatus::Approved);
        model.updated_at = Set(chrono::Utc::now().into());
        let invoice = model.update(&txn).await?;

        txn.commit().await?;
        Ok(invoice)
    }

    /// Posts an invoice: its totals become receivable and payments can
    /// be allocated against it.
    ///
    /// The header row lock keeps a concurrent draft edit from clearing
    /// the lines between the emptiness check and the status write.
    pub async fn post_invoice(&self, id: Uuid) -> Result<invoices::Model, InvoiceError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;

        let status: CoreStatus = invoice.status.into();
        if !status.can_post() {
            return Err(InvoiceError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Posted,
            }));
        }

        let line_count = invoice_lines::Entity::find()
            .filter(invoice_lines::Column::InvoiceId.eq(id))
            .count(&txn)
            .await?;
        if line_count == 0 {
            return Err(InvoiceError::Empty);
        }

        let mut model: invoices::ActiveModel = invoice.into();
        model.status = Set(DocumentStatus::Posted);
        model.updated_at = Set(chrono::Utc::now().into());
        let invoice = model.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(invoice_id = %id, "posted invoice");
        Ok(invoice)
    }

    /// Voids an invoice.
    pub async fn void_invoice(&self, id: Uuid) -> Result<invoices::Model, InvoiceError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;

        let status: CoreStatus = invoice.status.into();
        if !status.can_void() {
            return Err(InvoiceError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Void,
            }));
        }

        let mut model: invoices::ActiveModel = invoice.into();
        model.status = Set(DocumentStatus::Void);
        model.updated_at = Set(chrono::Utc::now().into());
        let invoice = model.update(&txn).await?;

        txn.commit().await?;
        Ok(invoice)
    }

    /// Records a payment against a posted invoice and rolls the
    /// settlement status forward.
    ///
    /// The payment insert, balance update, and status change happen in
    /// one transaction, with the header locked so concurrent payments
    /// serialize against the overpayment check.
    pub async fn record_payment(
        &self,
        id: Uuid,
        input: RecordPaymentInput,
    ) -> Result<invoices::Model, InvoiceError> {
        if input.amount <= Decimal::ZERO {
            return Err(InvoiceError::NonPositivePayment);
        }

        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;

        let status: CoreStatus = invoice.status.into();
        if !status.accepts_payments() {
            return Err(InvoiceError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::PartiallyPaid,
            }));
        }

        if input.amount > invoice.balance_due {
            return Err(InvoiceError::Document(DocumentError::Overpayment));
        }

        let payment = invoice_payments::ActiveModel {
            id: Set(Uuid::now_v7()),
            invoice_id: Set(id),
            payment_date: Set(input.payment_date),
            amount: Set(input.amount),
            method: Set(input.method),
            reference: Set(input.reference),
            created_at: Set(chrono::Utc::now().into()),
        };
        payment.insert(&txn).await?;

        let payments = invoice_payments::Entity::find()
            .filter(invoice_payments::Column::InvoiceId.eq(id))
            .all(&txn)
            .await?;
        let paid: Decimal = payments.iter().map(|p| p.amount).sum();

        let grand_total = invoice.grand_total;
        let mut model: invoices::ActiveModel = invoice.into();
        model.balance_due = Set(balance_due(grand_total, paid));
        model.status = Set(settlement_status(grand_total, paid).into());
        model.updated_at = Set(chrono::Utc::now().into());
        let invoice = model.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(invoice_id = %id, amount = %input.amount, "recorded payment");
        Ok(invoice)
    }

    /// Finds an invoice with its lines.
    pub async fn find_invoice_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<InvoiceWithLines>, InvoiceError> {
        let invoice = invoices::Entity::find_by_id(id).one(&self.db).await?;
        match invoice {
            Some(invoice) => {
                let lines = invoice_lines::Entity::find()
                    .filter(invoice_lines::Column::InvoiceId.eq(id))
                    .order_by_asc(invoice_lines::Column::Position)
                    .all(&self.db)
                    .await?;
                Ok(Some(InvoiceWithLines { invoice, lines }))
            }
            None => Ok(None),
        }
    }

    /// Lists an invoice's payments, oldest first.
    pub async fn list_payments(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<invoice_payments::Model>, InvoiceError> {
        Ok(invoice_payments::Entity::find()
            .filter(invoice_payments::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_payments::Column::PaymentDate)
            .all(&self.db)
            .await?)
    }

    /// Lists a page of a branch's invoices, newest first.
    pub async fn list_invoices(
        &self,
        branch_id: Uuid,
        filter: InvoiceFilter,
        page: PageRequest,
    ) -> Result<Page<invoices::Model>, InvoiceError> {
        let mut query = invoices::Entity::find()
            .filter(invoices::Column::BranchId.eq(branch_id))
            .order_by_desc(invoices::Column::InvoiceDate);

        if let Some(status) = filter.status {
            query = query.filter(invoices::Column::Status.eq(status));
        }
        if let Some(contact_id) = filter.contact_id {
            query = query.filter(invoices::Column::ContactId.eq(contact_id));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(invoices::Column::InvoiceDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(invoices::Column::InvoiceDate.lte(to));
        }
        if let Some(search) = filter.search {
            query = query.filter(invoices::Column::InvoiceNo.contains(&search));
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;
        Ok(Page::new(data, page, total))
    }
}

fn validate_line_inputs(lines: &[InvoiceLineInput]) -> Result<(), InvoiceError> {
    let mut report = ValidationReport::new();
    for (index, line) in lines.iter().enumerate() {
        line.to_priced().validate_into(index, &mut report);
    }
    if report.is_empty() {
        Ok(())
    } else {
        Err(InvoiceError::Document(DocumentError::Invalid(report)))
    }
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    invoice_id: Uuid,
    lines: &[InvoiceLineInput],
) -> Result<Vec<invoice_lines::Model>, DbErr> {
    let mut stored = Vec::with_capacity(lines.len());
    for (position, line) in lines.iter().enumerate() {
        let model = invoice_lines::ActiveModel {
            id: Set(line.line_id.map_or_else(Uuid::now_v7, LineId::into_inner)),
            invoice_id: Set(invoice_id),
            description: Set(line.description.clone()),
            qty: Set(line.qty),
            rate: Set(line.rate),
            discount_amount: Set(line.discount_amount),
            tax_rate_percent: Set(line.tax_rate_percent),
            line_total: Set(line.to_priced().line_total()),
            position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
        };
        stored.push(model.insert(txn).await?);
    }
    Ok(stored)
}

fn priced_from_model(model: &invoice_lines::Model) -> PricedLine {
    PricedLine {
        line_id: Some(LineId::from_uuid(model.id)),
        qty: model.qty,
        rate: model.rate,
        discount_amount: model.discount_amount,
        tax_rate_percent: model.tax_rate_percent,
    }
}
