//! Contact repository for counterparty database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use rust_decimal::Decimal;

use crate::entities::{accounts, branches, contacts, invoices, sea_orm_active_enums::ContactKind};

/// Error types for contact operations.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// Contact not found.
    #[error("Contact not found: {0}")]
    NotFound(Uuid),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(Uuid),

    /// Linked control account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Contact is referenced by documents and cannot be deleted.
    #[error("Cannot delete contact: {0} invoices reference it")]
    InUse(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a contact.
#[derive(Debug, Clone)]
pub struct CreateContactInput {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Customer, supplier, or both.
    pub kind: ContactKind,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Credit limit extended to this contact.
    pub credit_limit: Option<Decimal>,
    /// Payment terms in days.
    pub credit_days: Option<i32>,
    /// Receivable control account for this contact.
    pub receivable_account_id: Option<Uuid>,
    /// Payable control account for this contact.
    pub payable_account_id: Option<Uuid>,
}

/// Input for updating a contact.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactInput {
    /// Customer, supplier, or both.
    pub kind: Option<ContactKind>,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<Option<String>>,
    /// Contact phone.
    pub phone: Option<Option<String>>,
    /// Credit limit extended to this contact.
    pub credit_limit: Option<Option<Decimal>>,
    /// Payment terms in days.
    pub credit_days: Option<Option<i32>>,
    /// Active flag.
    pub active: Option<bool>,
}

/// Filter options for listing contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Filter by kind.
    pub kind: Option<ContactKind>,
    /// Filter by active status.
    pub active: Option<bool>,
    /// Case-insensitive name search.
    pub name_contains: Option<String>,
}

/// Contact repository for counterparty operations.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    db: DatabaseConnection,
}

impl ContactRepository {
    /// Creates a new contact repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a contact under a branch.
    pub async fn create_contact(
        &self,
        input: CreateContactInput,
    ) -> Result<contacts::Model, ContactError> {
        let branch = branches::Entity::find_by_id(input.branch_id)
            .one(&self.db)
            .await?;
        if branch.is_none() {
            return Err(ContactError::BranchNotFound(input.branch_id));
        }

        for account_id in [input.receivable_account_id, input.payable_account_id]
            .into_iter()
            .flatten()
        {
            let account = accounts::Entity::find_by_id(account_id)
                .one(&self.db)
                .await?;
            if account.is_none() {
                return Err(ContactError::AccountNotFound(account_id));
            }
        }

        let now = chrono::Utc::now().into();
        let contact = contacts::ActiveModel {
            id: Set(Uuid::now_v7()),
            branch_id: Set(input.branch_id),
            kind: Set(input.kind),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            credit_limit: Set(input.credit_limit),
            credit_days: Set(input.credit_days),
            receivable_account_id: Set(input.receivable_account_id),
            payable_account_id: Set(input.payable_account_id),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(contact.insert(&self.db).await?)
    }

    /// Updates a contact's fields.
    pub async fn update_contact(
        &self,
        id: Uuid,
        input: UpdateContactInput,
    ) -> Result<contacts::Model, ContactError> {
        let contact = contacts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ContactError::NotFound(id))?;

        let mut model: contacts::ActiveModel = contact.into();
        if let Some(kind) = input.kind {
            model.kind = Set(kind);
        }
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(email) = input.email {
            model.email = Set(email);
        }
        if let Some(phone) = input.phone {
            model.phone = Set(phone);
        }
        if let Some(credit_limit) = input.credit_limit {
            model.credit_limit = Set(credit_limit);
        }
        if let Some(credit_days) = input.credit_days {
            model.credit_days = Set(credit_days);
        }
        if let Some(active) = input.active {
            model.active = Set(active);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Deletes a contact if no documents reference it.
    pub async fn delete_contact(&self, id: Uuid) -> Result<(), ContactError> {
        let contact = contacts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ContactError::NotFound(id))?;

        let referencing = invoices::Entity::find()
            .filter(invoices::Column::ContactId.eq(contact.id))
            .count(&self.db)
            .await?;
        if referencing > 0 {
            return Err(ContactError::InUse(referencing));
        }

        contacts::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Finds a contact by ID.
    pub async fn find_contact_by_id(&self, id: Uuid) -> Result<Option<contacts::Model>, ContactError> {
        Ok(contacts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists a branch's contacts ordered by name.
    pub async fn list_contacts(
        &self,
        branch_id: Uuid,
        filter: ContactFilter,
    ) -> Result<Vec<contacts::Model>, ContactError> {
        let mut query = contacts::Entity::find()
            .filter(contacts::Column::BranchId.eq(branch_id))
            .order_by_asc(contacts::Column::Name);

        if let Some(kind) = filter.kind {
            query = query.filter(contacts::Column::Kind.eq(kind));
        }
        if let Some(active) = filter.active {
            query = query.filter(contacts::Column::Active.eq(active));
        }
        if let Some(fragment) = filter.name_contains {
            query = query.filter(contacts::Column::Name.contains(&fragment));
        }

        Ok(query.all(&self.db).await?)
    }
}
