//! Database seeder for Ledgerline development and testing.
//!
//! Seeds the base currency, the head-office branch, the conventional
//! account types, a default chart of accounts, and a default tax rate.
//! Everything seeded here is flagged system generated so ordinary
//! administration cannot edit or delete it.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use ledgerline_db::entities::{
    account_types, accounts, branches, currencies, tax_rates,
    sea_orm_active_enums::{AccountCategory, NormalBalance},
};
use ledgerline_shared::AppConfig;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Base currency ID (consistent for all seeds)
const BASE_CURRENCY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Head office branch ID (consistent for all seeds)
const HEAD_OFFICE_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    println!("Connecting to database...");
    let db = ledgerline_db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding base currency...");
    seed_base_currency(&db).await;

    println!("Seeding head office branch...");
    seed_head_office(&db).await;

    println!("Seeding account types...");
    seed_account_types(&db).await;

    println!("Seeding default chart of accounts...");
    seed_default_accounts(&db).await;

    println!("Seeding default tax rate...");
    seed_default_tax_rate(&db).await;

    println!("Seeding complete!");
}

fn base_currency_id() -> Uuid {
    Uuid::parse_str(BASE_CURRENCY_ID).unwrap()
}

fn head_office_id() -> Uuid {
    Uuid::parse_str(HEAD_OFFICE_ID).unwrap()
}

async fn seed_base_currency(db: &DatabaseConnection) {
    if currencies::Entity::find_by_id(base_currency_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Base currency already exists, skipping...");
        return;
    }

    let currency = currencies::ActiveModel {
        id: Set(base_currency_id()),
        code: Set("USD".to_string()),
        name: Set("US Dollar".to_string()),
        symbol: Set("$".to_string()),
        decimal_places: Set(2),
        is_base: Set(true),
        active: Set(true),
    };

    if let Err(e) = currency.insert(db).await {
        eprintln!("Failed to insert base currency: {e}");
    } else {
        println!("  Created base currency: USD");
    }
}

async fn seed_head_office(db: &DatabaseConnection) {
    if branches::Entity::find_by_id(head_office_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Head office already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let branch = branches::ActiveModel {
        id: Set(head_office_id()),
        code: Set("HO".to_string()),
        name: Set("Head Office".to_string()),
        currency_id: Set(base_currency_id()),
        is_head_office: Set(true),
        is_system_generated: Set(true),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = branch.insert(db).await {
        eprintln!("Failed to insert head office: {e}");
    } else {
        println!("  Created head office branch: HO");
    }
}

/// The five conventional account types, debit-normal for asset and
/// expense, credit-normal for the rest.
const ACCOUNT_TYPES: &[(&str, &str, AccountCategory, NormalBalance)] = &[
    ("ASSET", "Asset", AccountCategory::Asset, NormalBalance::Dr),
    (
        "LIABILITY",
        "Liability",
        AccountCategory::Liability,
        NormalBalance::Cr,
    ),
    ("EQUITY", "Equity", AccountCategory::Equity, NormalBalance::Cr),
    ("INCOME", "Income", AccountCategory::Income, NormalBalance::Cr),
    (
        "EXPENSE",
        "Expense",
        AccountCategory::Expense,
        NormalBalance::Dr,
    ),
];

async fn seed_account_types(db: &DatabaseConnection) {
    for (code, name, category, normal_balance) in ACCOUNT_TYPES {
        let existing = account_types::Entity::find()
            .filter(account_types::Column::Code.eq(*code))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            println!("  Account type {code} already exists, skipping...");
            continue;
        }

        let account_type = account_types::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set((*code).to_string()),
            name: Set((*name).to_string()),
            category: Set(*category),
            normal_balance: Set(*normal_balance),
            is_system_generated: Set(true),
            active: Set(true),
        };

        if let Err(e) = account_type.insert(db).await {
            eprintln!("Failed to insert account type {code}: {e}");
        } else {
            println!("  Created account type: {code}");
        }
    }
}

/// Default chart for the head office: one group per category with a
/// starter leaf under each.
const DEFAULT_ACCOUNTS: &[(&str, &str, &str, bool, Option<&str>)] = &[
    ("1000", "Assets", "ASSET", true, None),
    ("1100", "Cash", "ASSET", false, Some("1000")),
    ("1200", "Accounts Receivable", "ASSET", false, Some("1000")),
    ("2000", "Liabilities", "LIABILITY", true, None),
    ("2100", "Accounts Payable", "LIABILITY", false, Some("2000")),
    ("3000", "Equity", "EQUITY", true, None),
    ("3100", "Share Capital", "EQUITY", false, Some("3000")),
    ("4000", "Income", "INCOME", true, None),
    ("4100", "Sales", "INCOME", false, Some("4000")),
    ("5000", "Expenses", "EXPENSE", true, None),
    ("5100", "General Expenses", "EXPENSE", false, Some("5000")),
];

async fn seed_default_accounts(db: &DatabaseConnection) {
    for (code, name, type_code, is_group, parent_code) in DEFAULT_ACCOUNTS {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::BranchId.eq(head_office_id()))
            .filter(accounts::Column::Code.eq(*code))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            println!("  Account {code} already exists, skipping...");
            continue;
        }

        let Some(account_type) = account_types::Entity::find()
            .filter(account_types::Column::Code.eq(*type_code))
            .one(db)
            .await
            .ok()
            .flatten()
        else {
            eprintln!("Account type {type_code} missing, cannot seed account {code}");
            continue;
        };

        let parent_id = match parent_code {
            Some(parent_code) => accounts::Entity::find()
                .filter(accounts::Column::BranchId.eq(head_office_id()))
                .filter(accounts::Column::Code.eq(*parent_code))
                .one(db)
                .await
                .ok()
                .flatten()
                .map(|p| p.id),
            None => None,
        };

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            branch_id: Set(head_office_id()),
            account_type_id: Set(account_type.id),
            parent_id: Set(parent_id),
            code: Set((*code).to_string()),
            name: Set((*name).to_string()),
            is_group: Set(*is_group),
            is_system_generated: Set(true),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert account {code}: {e}");
        } else {
            println!("  Created account: {code} {name}");
        }
    }
}

async fn seed_default_tax_rate(db: &DatabaseConnection) {
    let existing = tax_rates::Entity::find()
        .filter(tax_rates::Column::Name.eq("Standard 10%"))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Default tax rate already exists, skipping...");
        return;
    }

    let tax_rate = tax_rates::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set("Standard 10%".to_string()),
        rate_percent: Set(dec!(10)),
        is_system_generated: Set(true),
        active: Set(true),
    };

    if let Err(e) = tax_rate.insert(db).await {
        eprintln!("Failed to insert default tax rate: {e}");
    } else {
        println!("  Created default tax rate: Standard 10%");
    }
}
