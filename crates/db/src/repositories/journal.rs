//! Journal voucher repository.
//!
//! Vouchers follow the shared document protocol: the header and its
//! lines are written in one transaction, header totals are recomputed
//! from the stored lines on every mutation, and updates replace the
//! line set wholesale when a new set is supplied.

use std::collections::HashMap;

use chrono::NaiveDate;
use ledgerline_core::document::{
    DocumentError, DocumentStatus as CoreStatus, LinesPatch, assign_line_ids, ensure_editable,
    ensure_version,
};
use ledgerline_core::journal::{
    JournalError, JournalLineInput, journal_total, validate_lines, validate_postable,
};
use ledgerline_core::registry::{BranchProfile, RegistryError};
use ledgerline_shared::types::{AccountId, LineId, Page, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    branches, journal_voucher_lines, journal_vouchers, sea_orm_active_enums::DocumentStatus,
};

use super::account::AccountRepository;

/// Error types for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherError {
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    NotFound(Uuid),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(Uuid),

    /// Voucher number already used in the branch.
    #[error("Voucher number '{0}' already exists in this branch")]
    DuplicateNumber(String),

    /// Document lifecycle rule failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Double-entry rule failed.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Branch scoping rule failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A voucher header with its lines.
#[derive(Debug, Clone)]
pub struct VoucherWithLines {
    /// The voucher header.
    pub voucher: journal_vouchers::Model,
    /// Lines in position order.
    pub lines: Vec<journal_voucher_lines::Model>,
}

/// Input for creating a voucher.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Voucher number (unique within branch).
    pub voucher_no: String,
    /// Voucher date.
    pub voucher_date: NaiveDate,
    /// Narration text.
    pub narration: Option<String>,
    /// Voucher lines.
    pub lines: Vec<JournalLineInput>,
    /// User creating the voucher.
    pub created_by: Option<Uuid>,
}

/// Input for updating a draft voucher.
#[derive(Debug, Clone, Default)]
pub struct UpdateVoucherInput {
    /// Voucher date.
    pub voucher_date: Option<NaiveDate>,
    /// Narration text.
    pub narration: Option<Option<String>>,
    /// Line replacement: `Unchanged` keeps the stored set, `Replace`
    /// swaps it wholesale.
    pub lines: LinesPatch<JournalLineInput>,
    /// Version the writer read before mutating.
    pub expected_version: i32,
}

/// Filter options for listing vouchers.
#[derive(Debug, Clone, Default)]
pub struct VoucherFilter {
    /// Filter by status.
    pub status: Option<DocumentStatus>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Free-text search over voucher number and narration.
    pub search: Option<String>,
}

/// Journal voucher repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft voucher with its lines in one transaction.
    ///
    /// Line amounts are validated before anything is written; the
    /// header total is derived from the lines, never taken from the
    /// caller.
    pub async fn create_voucher(
        &self,
        input: CreateVoucherInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        let branch = branches::Entity::find_by_id(input.branch_id)
            .one(&self.db)
            .await?
            .ok_or(VoucherError::BranchNotFound(input.branch_id))?;
        BranchProfile::from(branch).ensure_writable()?;

        let taken = journal_vouchers::Entity::find()
            .filter(journal_vouchers::Column::BranchId.eq(input.branch_id))
            .filter(journal_vouchers::Column::VoucherNo.eq(&input.voucher_no))
            .one(&self.db)
            .await?;
        if taken.is_some() {
            return Err(VoucherError::DuplicateNumber(input.voucher_no));
        }

        let mut lines = input.lines;
        let report = validate_lines(&lines);
        if !report.is_empty() {
            return Err(VoucherError::Journal(JournalError::Invalid(report)));
        }
        assign_line_ids(&mut lines);

        let voucher_id = Uuid::now_v7();
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let txn = self.db.begin().await?;

        let header = journal_vouchers::ActiveModel {
            id: Set(voucher_id),
            branch_id: Set(input.branch_id),
            voucher_no: Set(input.voucher_no),
            voucher_date: Set(input.voucher_date),
            narration: Set(input.narration),
            status: Set(DocumentStatus::Draft),
            total: Set(journal_total(&lines)),
            lock_version: Set(0),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let voucher = header.insert(&txn).await?;

        let stored = insert_lines(&txn, voucher_id, &lines).await?;

        txn.commit().await?;

        tracing::info!(voucher_id = %voucher_id, lines = stored.len(), "created voucher");
        Ok(VoucherWithLines {
            voucher,
            lines: stored,
        })
    }

    /// Updates a draft voucher, optionally replacing its lines
    /// wholesale.
    ///
    /// Omitted lines leave the stored set untouched; a supplied set
    /// (including an empty one) deletes every stored line and inserts
    /// the new ones. The header total is recomputed either way. A
    /// `lock_version` mismatch aborts without writing.
    ///
    /// The header is re-read under a row lock inside the transaction,
    /// so two writers holding the same version serialize and the loser
    /// gets a version mismatch instead of merging line sets.
    pub async fn update_voucher(
        &self,
        id: Uuid,
        input: UpdateVoucherInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        if let LinesPatch::Replace(new_lines) = &input.lines {
            let report = validate_lines(new_lines);
            if !report.is_empty() {
                return Err(VoucherError::Journal(JournalError::Invalid(report)));
            }
        }

        let txn = self.db.begin().await?;

        let voucher = journal_vouchers::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VoucherError::NotFound(id))?;

        ensure_editable(voucher.status.into())?;
        ensure_version(input.expected_version, voucher.lock_version)?;

        let (line_inputs, stored) = match input.lines {
            LinesPatch::Unchanged => {
                let stored = load_lines(&txn, id).await?;
                let inputs = stored.iter().map(line_input_from_model).collect();
                (inputs, stored)
            }
            LinesPatch::Replace(mut new_lines) => {
                assign_line_ids(&mut new_lines);
                journal_voucher_lines::Entity::delete_many()
                    .filter(journal_voucher_lines::Column::VoucherId.eq(id))
                    .exec(&txn)
                    .await?;
                let stored = insert_lines(&txn, id, &new_lines).await?;
                (new_lines, stored)
            }
        };

        let mut model: journal_vouchers::ActiveModel = voucher.into();
        if let Some(date) = input.voucher_date {
            model.voucher_date = Set(date);
        }
        if let Some(narration) = input.narration {
            model.narration = Set(narration);
        }
        model.total = Set(journal_total(&line_inputs));
        model.lock_version = Set(input.expected_version + 1);
        model.updated_at = Set(chrono::Utc::now().into());
        let voucher = model.update(&txn).await?;

        txn.commit().await?;

        Ok(VoucherWithLines {
            voucher,
            lines: stored,
        })
    }

    /// Approves a draft voucher, locking its content ahead of posting.
    pub async fn approve_voucher(
        &self,
        id: Uuid,
    ) -> Result<journal_vouchers::Model, VoucherError> {
        let txn = self.db.begin().await?;

        let voucher = journal_vouchers::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VoucherError::NotFound(id))?;

        let status: CoreStatus = voucher.status.into();
        if !status.can_approve() {
            return Err(VoucherError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Approved,
            }));
        }

        let mut model: journal_vouchers::ActiveModel = voucher.into();
        model.status = Set(DocumentStatus::Approved);
        model.updated_at = Set(chrono::Utc::now().into());
        let voucher = model.update(&txn).await?;

        txn.commit().await?;
        Ok(voucher)
    }

    /// Posts a voucher after the full double-entry check.
    ///
    /// Requires total debits equal to total credits and every line
    /// account active and non-group. Failure leaves the voucher in its
    /// current status. The header row lock held for the duration of
    /// the check keeps a concurrent content update from swapping the
    /// lines between validation and the status write.
    pub async fn post_voucher(
        &self,
        id: Uuid,
        accounts_repo: &AccountRepository,
    ) -> Result<journal_vouchers::Model, VoucherError> {
        let txn = self.db.begin().await?;

        let voucher = journal_vouchers::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VoucherError::NotFound(id))?;

        let status: CoreStatus = voucher.status.into();
        if !status.can_post() {
            return Err(VoucherError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Posted,
            }));
        }

        let rows = load_lines(&txn, id).await?;
        let lines: Vec<JournalLineInput> = rows.iter().map(line_input_from_model).collect();

        // Resolve the referenced accounts up front, then run the pure
        // validator against the snapshot.
        let mut refs = HashMap::new();
        for line in &lines {
            let uuid = line.account_id.into_inner();
            if !refs.contains_key(&uuid)
                && let Some(account) = accounts_repo.resolve_account_ref(uuid).await?
            {
                refs.insert(uuid, account);
            }
        }
        validate_postable(&lines, |account_id: AccountId| {
            refs.get(&account_id.into_inner()).cloned()
        })?;

        let mut model: journal_vouchers::ActiveModel = voucher.into();
        model.status = Set(DocumentStatus::Posted);
        model.updated_at = Set(chrono::Utc::now().into());
        let voucher = model.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(voucher_id = %id, "posted voucher");
        Ok(voucher)
    }

    /// Voids a voucher. Content is untouched; the lines simply stop
    /// affecting balances.
    pub async fn void_voucher(&self, id: Uuid) -> Result<journal_vouchers::Model, VoucherError> {
        let txn = self.db.begin().await?;

        let voucher = journal_vouchers::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VoucherError::NotFound(id))?;

        let status: CoreStatus = voucher.status.into();
        if !status.can_void() {
            return Err(VoucherError::Document(DocumentError::InvalidTransition {
                from: status,
                to: CoreStatus::Void,
            }));
        }

        let mut model: journal_vouchers::ActiveModel = voucher.into();
        model.status = Set(DocumentStatus::Void);
        model.updated_at = Set(chrono::Utc::now().into());
        let voucher = model.update(&txn).await?;

        txn.commit().await?;
        Ok(voucher)
    }

    /// Finds a voucher with its lines.
    pub async fn find_voucher_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<VoucherWithLines>, VoucherError> {
        let voucher = journal_vouchers::Entity::find_by_id(id).one(&self.db).await?;
        match voucher {
            Some(voucher) => {
                let lines = journal_voucher_lines::Entity::find()
                    .filter(journal_voucher_lines::Column::VoucherId.eq(id))
                    .order_by_asc(journal_voucher_lines::Column::Position)
                    .all(&self.db)
                    .await?;
                Ok(Some(VoucherWithLines { voucher, lines }))
            }
            None => Ok(None),
        }
    }

    /// Lists a page of a branch's vouchers, newest first.
    pub async fn list_vouchers(
        &self,
        branch_id: Uuid,
        filter: VoucherFilter,
        page: PageRequest,
    ) -> Result<Page<journal_vouchers::Model>, VoucherError> {
        let mut query = journal_vouchers::Entity::find()
            .filter(journal_vouchers::Column::BranchId.eq(branch_id))
            .order_by_desc(journal_vouchers::Column::VoucherDate);

        if let Some(status) = filter.status {
            query = query.filter(journal_vouchers::Column::Status.eq(status));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_vouchers::Column::VoucherDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_vouchers::Column::VoucherDate.lte(to));
        }
        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(journal_vouchers::Column::VoucherNo.contains(&search))
                    .add(journal_vouchers::Column::Narration.contains(&search)),
            );
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;
        Ok(Page::new(data, page, total))
    }
}

async fn load_lines(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
) -> Result<Vec<journal_voucher_lines::Model>, DbErr> {
    journal_voucher_lines::Entity::find()
        .filter(journal_voucher_lines::Column::VoucherId.eq(voucher_id))
        .order_by_asc(journal_voucher_lines::Column::Position)
        .all(txn)
        .await
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
    lines: &[JournalLineInput],
) -> Result<Vec<journal_voucher_lines::Model>, DbErr> {
    let mut stored = Vec::with_capacity(lines.len());
    for (position, line) in lines.iter().enumerate() {
        let model = journal_voucher_lines::ActiveModel {
            id: Set(line.line_id.map_or_else(Uuid::now_v7, LineId::into_inner)),
            voucher_id: Set(voucher_id),
            account_id: Set(line.account_id.into_inner()),
            dr_amount: Set(line.dr_amount),
            cr_amount: Set(line.cr_amount),
            note: Set(line.note.clone()),
            position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
        };
        stored.push(model.insert(txn).await?);
    }
    Ok(stored)
}

fn line_input_from_model(model: &journal_voucher_lines::Model) -> JournalLineInput {
    JournalLineInput {
        line_id: Some(LineId::from_uuid(model.id)),
        account_id: AccountId::from_uuid(model.account_id),
        dr_amount: model.dr_amount,
        cr_amount: model.cr_amount,
        note: model.note.clone(),
    }
}
