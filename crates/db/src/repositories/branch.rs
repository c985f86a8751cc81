//! Branch repository for registry database operations.
//!
//! Branches are never hard-deleted; a branch is retired by toggling
//! its active flag, which keeps its documents reachable for history.

use ledgerline_core::protection::{ProtectionError, WriteOperation, check_write};
use ledgerline_core::registry::validate_head_office;
use ledgerline_shared::types::BranchId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{branches, currencies};

/// Error types for branch operations.
#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    /// Branch code already exists.
    #[error("Branch code '{0}' already exists")]
    DuplicateCode(String),

    /// Another branch is already the head office.
    #[error("Branch {0} is already the head office")]
    HeadOfficeExists(Uuid),

    /// Currency not found.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(Uuid),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    NotFound(Uuid),

    /// Record is system generated.
    #[error(transparent)]
    Protected(#[from] ProtectionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a branch.
#[derive(Debug, Clone)]
pub struct CreateBranchInput {
    /// Branch code (globally unique).
    pub code: String,
    /// Branch display name.
    pub name: String,
    /// Operating currency.
    pub currency_id: Uuid,
    /// Whether this branch is the head office.
    pub is_head_office: bool,
}

/// Input for updating a branch.
#[derive(Debug, Clone, Default)]
pub struct UpdateBranchInput {
    /// Branch code.
    pub code: Option<String>,
    /// Branch display name.
    pub name: Option<String>,
    /// Whether this branch is the head office.
    pub is_head_office: Option<bool>,
}

/// Branch repository for registry operations.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    db: DatabaseConnection,
}

impl BranchRepository {
    /// Creates a new branch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a branch, enforcing the single-head-office rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken, the currency is unknown,
    /// or another active branch is already the head office.
    pub async fn create_branch(
        &self,
        input: CreateBranchInput,
    ) -> Result<branches::Model, BranchError> {
        let existing = branches::Entity::find()
            .filter(branches::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(BranchError::DuplicateCode(input.code));
        }

        let currency = currencies::Entity::find_by_id(input.currency_id)
            .one(&self.db)
            .await?;
        if currency.is_none() {
            return Err(BranchError::CurrencyNotFound(input.currency_id));
        }

        let candidate = BranchId::new();
        let current_head = self.find_head_office().await?.map(|b| BranchId::from_uuid(b.id));
        validate_head_office(current_head, candidate, input.is_head_office)
            .map_err(|_| BranchError::HeadOfficeExists(current_head.map_or_else(Uuid::nil, BranchId::into_inner)))?;

        let now = chrono::Utc::now().into();
        let branch = branches::ActiveModel {
            id: Set(candidate.into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            currency_id: Set(input.currency_id),
            is_head_office: Set(input.is_head_office),
            is_system_generated: Set(false),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        tracing::info!(branch_id = %candidate, "creating branch");
        Ok(branch.insert(&self.db).await?)
    }

    /// Updates a branch's profile fields.
    ///
    /// System-generated branches reject updates; use
    /// [`Self::set_active`] to toggle them.
    pub async fn update_branch(
        &self,
        id: Uuid,
        input: UpdateBranchInput,
    ) -> Result<branches::Model, BranchError> {
        let branch = branches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BranchError::NotFound(id))?;

        check_write(branch.is_system_generated, WriteOperation::Update, false)?;

        if let Some(code) = &input.code
            && *code != branch.code
        {
            let taken = branches::Entity::find()
                .filter(branches::Column::Code.eq(code))
                .one(&self.db)
                .await?;
            if taken.is_some() {
                return Err(BranchError::DuplicateCode(code.clone()));
            }
        }

        if input.is_head_office == Some(true) && !branch.is_head_office {
            let current_head = self.find_head_office().await?;
            if let Some(head) = current_head
                && head.id != id
            {
                return Err(BranchError::HeadOfficeExists(head.id));
            }
        }

        let mut model: branches::ActiveModel = branch.into();
        if let Some(code) = input.code {
            model.code = Set(code);
        }
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(is_head_office) = input.is_head_office {
            model.is_head_office = Set(is_head_office);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Toggles a branch's active flag. Allowed for system-generated
    /// branches.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<branches::Model, BranchError> {
        let branch = branches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BranchError::NotFound(id))?;

        check_write(branch.is_system_generated, WriteOperation::ToggleActive, false)?;

        let mut model: branches::ActiveModel = branch.into();
        model.active = Set(active);
        model.updated_at = Set(chrono::Utc::now().into());
        Ok(model.update(&self.db).await?)
    }

    /// Finds a branch by ID.
    pub async fn find_branch_by_id(&self, id: Uuid) -> Result<Option<branches::Model>, BranchError> {
        Ok(branches::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Finds the current active head office, if any.
    pub async fn find_head_office(&self) -> Result<Option<branches::Model>, BranchError> {
        Ok(branches::Entity::find()
            .filter(branches::Column::IsHeadOffice.eq(true))
            .filter(branches::Column::Active.eq(true))
            .one(&self.db)
            .await?)
    }

    /// Lists branches ordered by code.
    pub async fn list_branches(
        &self,
        active_only: bool,
    ) -> Result<Vec<branches::Model>, BranchError> {
        let mut query = branches::Entity::find().order_by_asc(branches::Column::Code);
        if active_only {
            query = query.filter(branches::Column::Active.eq(true));
        }
        Ok(query.all(&self.db).await?)
    }
}
