use crate::{db, errors::AppError, forms::ClientInput, structs::Client, AppState};

pub async fn get_client_by_id(state: &AppState, id: i64) -> Result<Option<Client>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await
}

pub async fn get_all_clients(state: &AppState) -> Result<Vec<Client>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await
}

pub async fn create_client(state: &AppState, input: ClientInput) -> Result<Client, AppError> {
    let now = db::now();
    let pool = state.db_pool.clone();
    let client = sqlx::query_as::<_, Client>(
        "INSERT INTO clients (created_at, updated_at, name, last_name, email, phone, birth_date, address) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(&now)
    .bind(&now)
    .bind(&input.name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(input.birth_date.as_deref())
    .bind(input.address.as_deref())
    .fetch_one(&pool)
    .await
    .map_err(AppError::from_db)?;
    log::info!("Client created: {}", client.id);
    Ok(client)
}

pub async fn update_client(
    state: &AppState,
    id: i64,
    input: ClientInput,
) -> Result<Client, AppError> {
    let updated_at = db::now();
    let pool = state.db_pool.clone();
    let client = sqlx::query_as::<_, Client>(
        "UPDATE clients SET updated_at = $1, name = $2, last_name = $3, email = $4, phone = $5, \
         birth_date = $6, address = $7 WHERE id = $8 RETURNING *",
    )
    .bind(&updated_at)
    .bind(&input.name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(input.birth_date.as_deref())
    .bind(input.address.as_deref())
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(AppError::from_db)?;
    client.ok_or(AppError::NotFound)
}

pub async fn delete_client(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = state.db_pool.clone();
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(AppError::from_db)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    log::info!("Client with id {} deleted", id);
    Ok(())
}
