use crate::{db, errors::AppError, forms::AppointmentInput, structs::Appointment, AppState};

pub async fn get_appointment_by_id(
    state: &AppState,
    id: i64,
) -> Result<Option<Appointment>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await
}

pub async fn get_all_appointments(state: &AppState) -> Result<Vec<Appointment>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await
}

pub async fn create_appointment(
    state: &AppState,
    input: AppointmentInput,
) -> Result<Appointment, AppError> {
    let now = db::now();
    let pool = state.db_pool.clone();
    let appointment = sqlx::query_as::<_, Appointment>(
        "INSERT INTO appointments (created_at, updated_at, client_id, service_id, employee_id, \
         start_time, end_time) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&now)
    .bind(&now)
    .bind(input.client_id)
    .bind(input.service_id)
    .bind(input.employee_id)
    .bind(&input.start_time)
    .bind(&input.end_time)
    .fetch_one(&pool)
    .await
    .map_err(AppError::from_db)?;
    log::info!("Appointment created: {}", appointment.id);
    Ok(appointment)
}

pub async fn update_appointment(
    state: &AppState,
    id: i64,
    input: AppointmentInput,
) -> Result<Appointment, AppError> {
    let updated_at = db::now();
    let pool = state.db_pool.clone();
    let appointment = sqlx::query_as::<_, Appointment>(
        "UPDATE appointments SET updated_at = $1, client_id = $2, service_id = $3, \
         employee_id = $4, start_time = $5, end_time = $6 WHERE id = $7 RETURNING *",
    )
    .bind(&updated_at)
    .bind(input.client_id)
    .bind(input.service_id)
    .bind(input.employee_id)
    .bind(&input.start_time)
    .bind(&input.end_time)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(AppError::from_db)?;
    appointment.ok_or(AppError::NotFound)
}

pub async fn delete_appointment(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = state.db_pool.clone();
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(AppError::from_db)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    log::info!("Appointment with id {} deleted", id);
    Ok(())
}
