//! Account repository for chart of accounts database operations.

use std::collections::HashSet;

use ledgerline_core::coa::{
    AccountRef, CoaError, DependentRows, balance_change, validate_delete_account,
    validate_new_account,
};
use ledgerline_core::protection::{ProtectionError, WriteOperation, check_write};
use ledgerline_shared::types::{AccountId, BranchId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::entities::{
    account_types, accounts, branches, journal_voucher_lines, journal_vouchers, opening_balances,
    sea_orm_active_enums::{AccountCategory, DocumentStatus, NormalBalance},
};

/// Error types for chart of accounts operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A placement or deletion rule failed.
    #[error(transparent)]
    Rule(#[from] CoaError),

    /// Record is system generated.
    #[error(transparent)]
    Protected(#[from] ProtectionError),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(Uuid),

    /// Account type not found.
    #[error("Account type not found: {0}")]
    AccountTypeNotFound(Uuid),

    /// Account type code already exists.
    #[error("Account type code '{0}' already exists")]
    DuplicateTypeCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account with its balance derived from posted activity.
#[derive(Debug, Clone)]
pub struct AccountWithBalance {
    /// The account record.
    pub account: accounts::Model,
    /// Opening balance plus posted voucher activity, signed by the
    /// account's normal balance side.
    pub balance: Decimal,
}

/// Input for creating an account type.
#[derive(Debug, Clone)]
pub struct CreateAccountTypeInput {
    /// Type code (globally unique).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account category.
    pub category: AccountCategory,
    /// Normal balance side; must follow the category's convention.
    pub normal_balance: NormalBalance,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Account type.
    pub account_type_id: Uuid,
    /// Parent group account, if any.
    pub parent_id: Option<Uuid>,
    /// Account code (unique within branch).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Whether this is a grouping node.
    pub is_group: bool,
}

/// Input for updating an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account code.
    pub code: Option<String>,
    /// Account name.
    pub name: Option<String>,
    /// Parent group account.
    pub parent_id: Option<Option<Uuid>>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type_id: Option<Uuid>,
    /// Filter by active status.
    pub active: Option<bool>,
    /// Filter by parent (None = root accounts only).
    pub parent_id: Option<Option<Uuid>>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account type, rejecting unconventional
    /// category/normal-balance pairings.
    pub async fn create_account_type(
        &self,
        input: CreateAccountTypeInput,
    ) -> Result<account_types::Model, AccountError> {
        let category: ledgerline_core::coa::AccountCategory = input.category.into();
        if !category.is_conventional(input.normal_balance.into()) {
            return Err(AccountError::Rule(CoaError::UnconventionalNormalBalance(
                input.code,
            )));
        }

        let existing = account_types::Entity::find()
            .filter(account_types::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateTypeCode(input.code));
        }

        let account_type = account_types::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code),
            name: Set(input.name),
            category: Set(input.category),
            normal_balance: Set(input.normal_balance),
            is_system_generated: Set(false),
            active: Set(true),
        };

        Ok(account_type.insert(&self.db).await?)
    }

    /// Creates an account in the branch tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken within the branch, the
    /// parent is missing, lives in another branch, or is not a group.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let branch = branches::Entity::find_by_id(input.branch_id)
            .one(&self.db)
            .await?;
        if branch.is_none() {
            return Err(AccountError::BranchNotFound(input.branch_id));
        }

        let account_type = account_types::Entity::find_by_id(input.account_type_id)
            .one(&self.db)
            .await?;
        if account_type.is_none() {
            return Err(AccountError::AccountTypeNotFound(input.account_type_id));
        }

        let parent = match input.parent_id {
            Some(parent_id) => Some(
                accounts::Entity::find_by_id(parent_id)
                    .one(&self.db)
                    .await?
                    .map(account_ref)
                    .ok_or(AccountError::Rule(CoaError::ParentNotFound(
                        AccountId::from_uuid(parent_id),
                    )))?,
            ),
            None => None,
        };

        let branch_codes = self.branch_codes(input.branch_id).await?;
        validate_new_account(
            &branch_codes,
            BranchId::from_uuid(input.branch_id),
            &input.code,
            parent.as_ref(),
        )?;

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            branch_id: Set(input.branch_id),
            account_type_id: Set(input.account_type_id),
            parent_id: Set(input.parent_id),
            code: Set(input.code),
            name: Set(input.name),
            is_group: Set(input.is_group),
            is_system_generated: Set(false),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Updates an account's fields. System-generated accounts reject
    /// updates; use [`Self::set_active`] to toggle them.
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::Rule(CoaError::AccountNotFound(
                AccountId::from_uuid(id),
            )))?;

        check_write(account.is_system_generated, WriteOperation::Update, false)?;

        if let Some(code) = &input.code
            && *code != account.code
        {
            let branch_codes = self.branch_codes(account.branch_id).await?;
            validate_new_account(
                &branch_codes,
                BranchId::from_uuid(account.branch_id),
                code,
                None,
            )?;
        }

        if let Some(Some(parent_id)) = input.parent_id {
            let parent = accounts::Entity::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .map(account_ref)
                .ok_or(AccountError::Rule(CoaError::ParentNotFound(
                    AccountId::from_uuid(parent_id),
                )))?;
            if parent.branch_id.into_inner() != account.branch_id {
                return Err(AccountError::Rule(CoaError::ParentWrongBranch(parent.id)));
            }
            if !parent.is_group {
                return Err(AccountError::Rule(CoaError::ParentNotGroup(parent.id)));
            }
            // The proposed parent must not sit in the account's own
            // subtree, or the chart would no longer be a tree. Walk
            // the parent's ancestor chain back to the root.
            let mut cursor = Some(parent_id);
            while let Some(current) = cursor {
                if current == id {
                    return Err(AccountError::Rule(CoaError::CircularParent(
                        AccountId::from_uuid(parent_id),
                    )));
                }
                cursor = accounts::Entity::find_by_id(current)
                    .one(&self.db)
                    .await?
                    .and_then(|row| row.parent_id);
            }
        }

        let mut model: accounts::ActiveModel = account.into();
        if let Some(code) = input.code {
            model.code = Set(code);
        }
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(parent_id) = input.parent_id {
            model.parent_id = Set(parent_id);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Toggles an account's active flag. Allowed for system-generated
    /// accounts.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::Rule(CoaError::AccountNotFound(
                AccountId::from_uuid(id),
            )))?;

        check_write(account.is_system_generated, WriteOperation::ToggleActive, false)?;

        let mut model: accounts::ActiveModel = account.into();
        model.active = Set(active);
        model.updated_at = Set(chrono::Utc::now().into());
        Ok(model.update(&self.db).await?)
    }

    /// Deletes an account if no ledger data references it.
    ///
    /// Protect-on-delete: children, voucher lines, and opening
    /// balances all veto the delete.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::Rule(CoaError::AccountNotFound(
                AccountId::from_uuid(id),
            )))?;

        check_write(account.is_system_generated, WriteOperation::Delete, false)?;

        let children = accounts::Entity::find()
            .filter(accounts::Column::ParentId.eq(id))
            .count(&self.db)
            .await?;
        let journal_lines = journal_voucher_lines::Entity::find()
            .filter(journal_voucher_lines::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;
        let balances = opening_balances::Entity::find()
            .filter(opening_balances::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;

        validate_delete_account(DependentRows {
            children,
            journal_lines,
            balances,
        })?;

        accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(account_id = %id, "deleted account");
        Ok(())
    }

    /// Records or replaces an account's opening balance.
    pub async fn set_opening_balance(
        &self,
        account_id: Uuid,
        as_of: chrono::NaiveDate,
        dr_amount: Decimal,
        cr_amount: Decimal,
    ) -> Result<opening_balances::Model, AccountError> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::Rule(CoaError::AccountNotFound(
                AccountId::from_uuid(account_id),
            )))?;

        // One row per account; replace any prior entry
        opening_balances::Entity::delete_many()
            .filter(opening_balances::Column::AccountId.eq(account.id))
            .exec(&self.db)
            .await?;

        let row = opening_balances::ActiveModel {
            id: Set(Uuid::now_v7()),
            account_id: Set(account.id),
            as_of: Set(as_of),
            dr_amount: Set(dr_amount),
            cr_amount: Set(cr_amount),
            created_at: Set(chrono::Utc::now().into()),
        };
        Ok(row.insert(&self.db).await?)
    }

    /// Finds an account with its derived balance.
    pub async fn find_account_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<AccountWithBalance>, AccountError> {
        let account = accounts::Entity::find_by_id(id).one(&self.db).await?;
        match account {
            Some(account) => {
                let balance = self.account_balance(&account).await?;
                Ok(Some(AccountWithBalance { account, balance }))
            }
            None => Ok(None),
        }
    }

    /// Lists a branch's accounts ordered by code, with balances.
    pub async fn list_accounts(
        &self,
        branch_id: Uuid,
        filter: AccountFilter,
    ) -> Result<Vec<AccountWithBalance>, AccountError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::BranchId.eq(branch_id))
            .order_by_asc(accounts::Column::Code);

        if let Some(type_id) = filter.account_type_id {
            query = query.filter(accounts::Column::AccountTypeId.eq(type_id));
        }
        if let Some(active) = filter.active {
            query = query.filter(accounts::Column::Active.eq(active));
        }
        if let Some(parent_id) = filter.parent_id {
            match parent_id {
                Some(pid) => query = query.filter(accounts::Column::ParentId.eq(pid)),
                None => query = query.filter(accounts::Column::ParentId.is_null()),
            }
        }

        let rows = query.all(&self.db).await?;
        let mut results = Vec::with_capacity(rows.len());
        for account in rows {
            let balance = self.account_balance(&account).await?;
            results.push(AccountWithBalance { account, balance });
        }
        Ok(results)
    }

    /// Lists the direct children of a group account, ordered by code.
    pub async fn list_children(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::ParentId.eq(parent_id))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Resolves an account for posting checks.
    pub(crate) async fn resolve_account_ref(
        &self,
        id: Uuid,
    ) -> Result<Option<AccountRef>, DbErr> {
        Ok(accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(account_ref))
    }

    async fn branch_codes(
        &self,
        branch_id: Uuid,
    ) -> Result<HashSet<ledgerline_core::coa::AccountCodeEntry>, AccountError> {
        let rows: Vec<(Uuid, String)> = accounts::Entity::find()
            .filter(accounts::Column::BranchId.eq(branch_id))
            .select_only()
            .column(accounts::Column::BranchId)
            .column(accounts::Column::Code)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(branch, code)| ledgerline_core::coa::AccountCodeEntry {
                branch_id: BranchId::from_uuid(branch),
                code,
            })
            .collect())
    }

    /// Opening balance plus dr/cr activity from ledger-affecting
    /// vouchers, signed by the account type's normal balance side.
    async fn account_balance(&self, account: &accounts::Model) -> Result<Decimal, AccountError> {
        let account_type = account_types::Entity::find_by_id(account.account_type_id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountTypeNotFound(account.account_type_id))?;
        let category = account_type.category.into();

        let mut balance = Decimal::ZERO;

        if let Some(opening) = opening_balances::Entity::find()
            .filter(opening_balances::Column::AccountId.eq(account.id))
            .one(&self.db)
            .await?
        {
            balance += balance_change(category, opening.dr_amount, opening.cr_amount);
        }

        let lines = journal_voucher_lines::Entity::find()
            .filter(journal_voucher_lines::Column::AccountId.eq(account.id))
            .join(
                JoinType::InnerJoin,
                journal_voucher_lines::Relation::JournalVouchers.def(),
            )
            .filter(journal_vouchers::Column::Status.is_in([
                DocumentStatus::Posted,
                DocumentStatus::PartiallyPaid,
                DocumentStatus::Paid,
            ]))
            .all(&self.db)
            .await?;

        for line in lines {
            balance += balance_change(category, line.dr_amount, line.cr_amount);
        }

        Ok(balance)
    }
}

fn account_ref(model: accounts::Model) -> AccountRef {
    AccountRef {
        id: AccountId::from_uuid(model.id),
        branch_id: BranchId::from_uuid(model.branch_id),
        is_group: model.is_group,
        is_system: model.is_system_generated,
        active: model.active,
    }
}
