use crate::{db, errors::AppError, forms::ProductInput, structs::Product, AppState};

pub async fn get_product_by_id(state: &AppState, id: i64) -> Result<Option<Product>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await
}

pub async fn get_all_products(state: &AppState) -> Result<Vec<Product>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await
}

pub async fn create_product(state: &AppState, input: ProductInput) -> Result<Product, AppError> {
    let now = db::now();
    let pool = state.db_pool.clone();
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (created_at, updated_at, name, description, price, sku, stock) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&now)
    .bind(&now)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(&input.sku)
    .bind(input.stock)
    .fetch_one(&pool)
    .await
    .map_err(AppError::from_db)?;
    log::info!("Product created: {}", product.id);
    Ok(product)
}

pub async fn update_product(
    state: &AppState,
    id: i64,
    input: ProductInput,
) -> Result<Product, AppError> {
    let updated_at = db::now();
    let pool = state.db_pool.clone();
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET updated_at = $1, name = $2, description = $3, price = $4, sku = $5, \
         stock = $6 WHERE id = $7 RETURNING *",
    )
    .bind(&updated_at)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(&input.sku)
    .bind(input.stock)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(AppError::from_db)?;
    product.ok_or(AppError::NotFound)
}

pub async fn delete_product(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = state.db_pool.clone();
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(AppError::from_db)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    log::info!("Product with id {} deleted", id);
    Ok(())
}
