use crate::{db, errors::AppError, forms::ServiceInput, structs::Service, AppState};

pub async fn get_service_by_id(state: &AppState, id: i64) -> Result<Option<Service>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await
}

pub async fn get_all_services(state: &AppState) -> Result<Vec<Service>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await
}

pub async fn create_service(state: &AppState, input: ServiceInput) -> Result<Service, AppError> {
    let now = db::now();
    let pool = state.db_pool.clone();
    let service = sqlx::query_as::<_, Service>(
        "INSERT INTO services (created_at, updated_at, name, description, price, duration) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(&now)
    .bind(&now)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.duration)
    .fetch_one(&pool)
    .await
    .map_err(AppError::from_db)?;
    log::info!("Service created: {}", service.id);
    Ok(service)
}

pub async fn update_service(
    state: &AppState,
    id: i64,
    input: ServiceInput,
) -> Result<Service, AppError> {
    let updated_at = db::now();
    let pool = state.db_pool.clone();
    let service = sqlx::query_as::<_, Service>(
        "UPDATE services SET updated_at = $1, name = $2, description = $3, price = $4, \
         duration = $5 WHERE id = $6 RETURNING *",
    )
    .bind(&updated_at)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.duration)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(AppError::from_db)?;
    service.ok_or(AppError::NotFound)
}

pub async fn delete_service(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = state.db_pool.clone();
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(AppError::from_db)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    log::info!("Service with id {} deleted", id);
    Ok(())
}
