use crate::{db, errors::AppError, structs::User, utils, AppState};

pub async fn get_user_by_id(state: &AppState, id: i64) -> Result<Option<User>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await
}

pub async fn get_user_by_email(
    state: &AppState,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&pool)
        .await
}

pub async fn get_all_users(state: &AppState) -> Result<Vec<User>, sqlx::Error> {
    let pool = state.db_pool.clone();
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await
}

pub async fn create_user(
    state: &AppState,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, AppError> {
    let now = db::now();
    let pwd_hash = utils::hash_password(password)?;
    let pool = state.db_pool.clone();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (created_at, updated_at, email, name, pwd_hash) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&now)
    .bind(&now)
    .bind(email)
    .bind(name)
    .bind(&pwd_hash)
    .fetch_one(&pool)
    .await
    .map_err(AppError::from_db)?;
    log::info!("User created: {}", user.id);
    Ok(user)
}

/// Looks up the user by exact email match and verifies the password against
/// the stored argon2 hash. Both "no such user" and "wrong password" collapse
/// into the same `InvalidCredentials` condition.
pub async fn verify_login(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = get_user_by_email(state, email).await?;
    match user {
        Some(user) if utils::verify_password(password, &user.pwd_hash) => Ok(user),
        _ => {
            log::warn!("Failed login attempt for {}", email);
            Err(AppError::InvalidCredentials)
        }
    }
}

/// One-time seed: drops any user with the seed email and recreates it.
pub async fn seed_user(
    state: &AppState,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, AppError> {
    let pool = state.db_pool.clone();
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&pool)
        .await?;
    create_user(state, email, password, name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_state;

    #[tokio::test]
    async fn seed_creates_a_user_that_can_log_in() {
        let state = test_state().await;
        let user = seed_user(&state, "test@test.com", "123456", Some("Prueba"))
            .await
            .unwrap();
        assert_eq!(user.email, "test@test.com");
        assert_eq!(user.name.as_deref(), Some("Prueba"));

        let logged_in = verify_login(&state, "test@test.com", "123456").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn display_name_is_optional_and_preserved() {
        let state = test_state().await;
        let named = create_user(&state, "ana@test.com", "123456", Some("Ana"))
            .await
            .unwrap();
        let anonymous = create_user(&state, "sin@test.com", "123456", None)
            .await
            .unwrap();

        let fetched = get_user_by_id(&state, named.id).await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Ana"));
        let fetched = get_user_by_id(&state, anonymous.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, None);
    }

    #[tokio::test]
    async fn seeding_twice_replaces_the_user() {
        let state = test_state().await;
        seed_user(&state, "test@test.com", "123456", None).await.unwrap();
        seed_user(&state, "test@test.com", "654321", None).await.unwrap();

        assert!(verify_login(&state, "test@test.com", "123456").await.is_err());
        assert!(verify_login(&state, "test@test.com", "654321").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_identically() {
        let state = test_state().await;
        seed_user(&state, "test@test.com", "123456", None).await.unwrap();

        let wrong_pwd = verify_login(&state, "test@test.com", "nope").await.unwrap_err();
        let unknown = verify_login(&state, "nobody@test.com", "123456").await.unwrap_err();
        assert_eq!(wrong_pwd.to_string(), unknown.to_string());
        assert!(matches!(wrong_pwd, AppError::InvalidCredentials));
        assert!(matches!(unknown, AppError::InvalidCredentials));
    }
}
