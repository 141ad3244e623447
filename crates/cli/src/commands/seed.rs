//! Seed the database with demo data.
//!
//! Creates (or reuses) a company, a small multi-brand catalog, and a year of
//! orders spread across the lookback windows so every trend granularity has
//! something to show. A slice of the orders is cancelled to exercise the
//! aggregation's exclusion rule.

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use brandboard_admin::db::{self, CompanyRepository, ProductRepository};
use brandboard_admin::models::product::{CreateProductInput, ProductFilter};
use brandboard_core::{Company, CurrencyCode, Product, ProductStatus};

/// (sku, name, brand, description, price cents)
const DEMO_PRODUCTS: &[(&str, &str, &str, &str, i64)] = &[
    ("BOOT-001", "Black Leather Boot", "Northpeak", "Full-grain leather ankle boot", 18900),
    ("SNK-010", "Canvas Sneaker", "Northpeak", "Low-top white canvas sneaker", 7900),
    ("TOTE-101", "Navy Canvas Tote", "Harbor & Co", "Roomy weekend canvas tote", 5900),
    ("WAL-102", "Tan Leather Wallet", "Harbor & Co", "Slim bifold wallet", 4500),
    ("TEE-201", "Grey Cotton Tee", "Loomworks", "Heavyweight cotton tee", 2900),
    ("HOOD-202", "Charcoal Fleece Hoodie", "Loomworks", "Brushed fleece pullover hoodie", 6900),
    ("MUG-301", "Ceramic Mug", "Hearthside", "Stoneware mug, 350ml", 1800),
    ("CAND-302", "Cedar Candle", "Hearthside", "Wood wick soy candle", 2400),
];

/// Seed a demo company with products and orders.
///
/// Idempotent on the company and catalog: re-running against an existing
/// slug reuses them and only appends more orders.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any insert fails.
pub async fn run(
    slug: &str,
    name: &str,
    order_count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ADMIN_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;

    let company = ensure_company(&pool, slug, name).await?;
    let products = ensure_catalog(&pool, &company).await?;
    seed_orders(&pool, &company, &products, order_count).await?;

    info!(slug, orders = order_count, "Seed complete");
    Ok(())
}

async fn ensure_company(
    pool: &PgPool,
    slug: &str,
    name: &str,
) -> Result<Company, Box<dyn std::error::Error>> {
    let repo = CompanyRepository::new(pool);
    if let Some(existing) = repo.find_by_slug(slug).await? {
        info!(slug, "Reusing existing company");
        return Ok(existing);
    }

    let company = repo.create(name, slug, None).await?;
    info!(slug, "Created company");
    Ok(company)
}

async fn ensure_catalog(
    pool: &PgPool,
    company: &Company,
) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let repo = ProductRepository::new(pool);
    let existing = repo.list(company.id, &ProductFilter::default()).await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "Reusing existing catalog");
        return Ok(existing);
    }

    let mut products = Vec::with_capacity(DEMO_PRODUCTS.len());
    for (sku, name, brand, description, cents) in DEMO_PRODUCTS {
        let input = CreateProductInput {
            sku: (*sku).to_string(),
            name: (*name).to_string(),
            brand: (*brand).to_string(),
            description: Some((*description).to_string()),
            price: Decimal::new(*cents, 2),
            currency_code: CurrencyCode::USD,
            status: ProductStatus::Active,
            color: None,
            material: None,
            category: None,
        };
        products.push(repo.create(company.id, &input).await?);
    }

    info!(count = products.len(), "Created catalog");
    Ok(products)
}

async fn seed_orders(
    pool: &PgPool,
    company: &Company,
    products: &[Product],
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let now = Utc::now();

    for _ in 0..count {
        // Weighted toward recent activity so short windows are not empty.
        let days_back: i64 = if rng.random_bool(0.5) {
            rng.random_range(0..31)
        } else {
            rng.random_range(0..365)
        };
        let placed_at = now - Duration::days(days_back) - Duration::hours(rng.random_range(0..24));

        let status = match rng.random_range(0..10) {
            0 => "pending",
            1 => "cancelled",
            2..=5 => "paid",
            _ => "fulfilled",
        };

        let order_number = format!("ORD-{:08}", rng.random_range(0..100_000_000u32));
        let customer_email = format!("customer{}@example.com", rng.random_range(1..500u32));

        let item_count = rng.random_range(1..=3usize);
        let mut items = Vec::with_capacity(item_count);
        let mut total = Decimal::ZERO;
        for _ in 0..item_count {
            let product = &products[rng.random_range(0..products.len())];
            let quantity = rng.random_range(1..=4i32);
            total += product.price.amount * Decimal::from(quantity);
            items.push((product.id, quantity, product.price.amount));
        }

        let order_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO orders (
                company_id, order_number, customer_email, status,
                total, currency_code, placed_at
            )
            VALUES ($1, $2, $3, $4, $5, 'USD', $6)
            ON CONFLICT (company_id, order_number) DO UPDATE SET updated_at = now()
            RETURNING id
            ",
        )
        .bind(company.id.as_i32())
        .bind(&order_number)
        .bind(&customer_email)
        .bind(status)
        .bind(total)
        .bind(placed_at)
        .fetch_one(pool)
        .await?;

        for (product_id, quantity, unit_price) in items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price, currency_code)
                VALUES ($1, $2, $3, $4, 'USD')
                ",
            )
            .bind(order_id)
            .bind(product_id.as_i32())
            .bind(quantity)
            .bind(unit_price)
            .execute(pool)
            .await?;
        }
    }

    info!(count, "Created orders");
    Ok(())
}
