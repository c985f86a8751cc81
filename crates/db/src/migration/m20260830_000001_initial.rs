//! Initial database migration.
//!
//! Creates the registry, chart of accounts, and transaction document
//! tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Registry
        db.execute_unprepared(CURRENCIES_SQL).await?;
        db.execute_unprepared(BRANCHES_SQL).await?;

        // Chart of accounts
        db.execute_unprepared(ACCOUNT_TYPES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(OPENING_BALANCES_SQL).await?;
        db.execute_unprepared(TAX_RATES_SQL).await?;

        // Contacts link to ledger accounts, so they follow the chart
        db.execute_unprepared(CONTACTS_SQL).await?;

        // Transaction documents
        db.execute_unprepared(JOURNAL_VOUCHERS_SQL).await?;
        db.execute_unprepared(JOURNAL_VOUCHER_LINES_SQL).await?;
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_LINES_SQL).await?;
        db.execute_unprepared(INVOICE_PAYMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const CURRENCIES_SQL: &str = r"
CREATE TABLE currencies (
    id UUID PRIMARY KEY,
    code CHAR(3) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    symbol VARCHAR(10) NOT NULL,
    decimal_places SMALLINT NOT NULL DEFAULT 2,
    is_base BOOLEAN NOT NULL DEFAULT false,
    active BOOLEAN NOT NULL DEFAULT true
);
";

const BRANCHES_SQL: &str = r"
CREATE TABLE branches (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    currency_id UUID NOT NULL REFERENCES currencies(id),
    is_head_office BOOLEAN NOT NULL DEFAULT false,
    is_system_generated BOOLEAN NOT NULL DEFAULT false,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- At most one active head office across the whole registry
CREATE UNIQUE INDEX idx_branches_head_office
    ON branches(is_head_office) WHERE is_head_office = true AND active = true;
";

const CONTACTS_SQL: &str = r"
CREATE TABLE contacts (
    id UUID PRIMARY KEY,
    branch_id UUID NOT NULL REFERENCES branches(id),
    kind VARCHAR(10) NOT NULL CHECK (kind IN ('customer', 'supplier', 'both')),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    credit_limit NUMERIC(19, 2),
    credit_days INTEGER,
    receivable_account_id UUID REFERENCES accounts(id),
    payable_account_id UUID REFERENCES accounts(id),
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contacts_branch ON contacts(branch_id) WHERE active = true;
";

const ACCOUNT_TYPES_SQL: &str = r"
CREATE TABLE account_types (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    category VARCHAR(20) NOT NULL
        CHECK (category IN ('asset', 'liability', 'equity', 'income', 'expense')),
    normal_balance VARCHAR(2) NOT NULL CHECK (normal_balance IN ('dr', 'cr')),
    is_system_generated BOOLEAN NOT NULL DEFAULT false,
    active BOOLEAN NOT NULL DEFAULT true
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    branch_id UUID NOT NULL REFERENCES branches(id),
    account_type_id UUID NOT NULL REFERENCES account_types(id),
    parent_id UUID REFERENCES accounts(id),
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    is_group BOOLEAN NOT NULL DEFAULT false,
    is_system_generated BOOLEAN NOT NULL DEFAULT false,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (branch_id, code)
);

CREATE INDEX idx_accounts_branch ON accounts(branch_id) WHERE active = true;
CREATE INDEX idx_accounts_parent ON accounts(parent_id) WHERE parent_id IS NOT NULL;
";

const OPENING_BALANCES_SQL: &str = r"
CREATE TABLE opening_balances (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    as_of DATE NOT NULL,
    dr_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    cr_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (account_id)
);
";

const TAX_RATES_SQL: &str = r"
CREATE TABLE tax_rates (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    rate_percent NUMERIC(7, 4) NOT NULL,
    is_system_generated BOOLEAN NOT NULL DEFAULT false,
    active BOOLEAN NOT NULL DEFAULT true
);
";

const JOURNAL_VOUCHERS_SQL: &str = r"
CREATE TABLE journal_vouchers (
    id UUID PRIMARY KEY,
    branch_id UUID NOT NULL REFERENCES branches(id),
    voucher_no VARCHAR(50) NOT NULL,
    voucher_date DATE NOT NULL,
    narration TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'draft'
        CHECK (status IN ('draft', 'approved', 'posted', 'partially_paid', 'paid', 'void')),
    total NUMERIC(19, 2) NOT NULL DEFAULT 0,
    lock_version INTEGER NOT NULL DEFAULT 0,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (branch_id, voucher_no)
);

CREATE INDEX idx_jv_branch_date ON journal_vouchers(branch_id, voucher_date);
CREATE INDEX idx_jv_status ON journal_vouchers(branch_id, status);
";

const JOURNAL_VOUCHER_LINES_SQL: &str = r"
CREATE TABLE journal_voucher_lines (
    id UUID PRIMARY KEY,
    voucher_id UUID NOT NULL REFERENCES journal_vouchers(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    dr_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    cr_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    note TEXT,
    position INTEGER NOT NULL DEFAULT 0,
    CHECK (dr_amount >= 0 AND cr_amount >= 0),
    CHECK ((dr_amount > 0) <> (cr_amount > 0))
);

CREATE INDEX idx_jvl_voucher ON journal_voucher_lines(voucher_id);
CREATE INDEX idx_jvl_account ON journal_voucher_lines(account_id);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    branch_id UUID NOT NULL REFERENCES branches(id),
    contact_id UUID NOT NULL REFERENCES contacts(id),
    invoice_no VARCHAR(50) NOT NULL,
    invoice_date DATE NOT NULL,
    due_date DATE,
    status VARCHAR(20) NOT NULL DEFAULT 'draft'
        CHECK (status IN ('draft', 'approved', 'posted', 'partially_paid', 'paid', 'void')),
    subtotal NUMERIC(19, 2) NOT NULL DEFAULT 0,
    discount_total NUMERIC(19, 2) NOT NULL DEFAULT 0,
    tax_total NUMERIC(19, 2) NOT NULL DEFAULT 0,
    grand_total NUMERIC(19, 2) NOT NULL DEFAULT 0,
    balance_due NUMERIC(19, 2) NOT NULL DEFAULT 0,
    lock_version INTEGER NOT NULL DEFAULT 0,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (branch_id, invoice_no)
);

CREATE INDEX idx_invoices_branch_date ON invoices(branch_id, invoice_date);
CREATE INDEX idx_invoices_status ON invoices(branch_id, status);
CREATE INDEX idx_invoices_contact ON invoices(contact_id);
";

const INVOICE_LINES_SQL: &str = r"
CREATE TABLE invoice_lines (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    description VARCHAR(500) NOT NULL,
    qty NUMERIC(15, 4) NOT NULL,
    rate NUMERIC(19, 4) NOT NULL,
    discount_amount NUMERIC(19, 2) NOT NULL DEFAULT 0,
    tax_rate_percent NUMERIC(7, 4),
    line_total NUMERIC(19, 2) NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    CHECK (qty >= 0 AND rate >= 0 AND discount_amount >= 0)
);

CREATE INDEX idx_invl_invoice ON invoice_lines(invoice_id);
";

const INVOICE_PAYMENTS_SQL: &str = r"
CREATE TABLE invoice_payments (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES invoices(id),
    payment_date DATE NOT NULL,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    method VARCHAR(50),
    reference VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_invp_invoice ON invoice_payments(invoice_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS invoice_payments;
DROP TABLE IF EXISTS invoice_lines;
DROP TABLE IF EXISTS invoices;
DROP TABLE IF EXISTS journal_voucher_lines;
DROP TABLE IF EXISTS journal_vouchers;
DROP TABLE IF EXISTS contacts;
DROP TABLE IF EXISTS tax_rates;
DROP TABLE IF EXISTS opening_balances;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS account_types;
DROP TABLE IF EXISTS branches;
DROP TABLE IF EXISTS currencies;
";
