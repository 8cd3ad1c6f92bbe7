use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
    pub name: Option<String>,
    // never leaked into template contexts
    #[serde(skip_serializing)]
    pub pwd_hash: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Client {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Service {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
    pub stock: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub client_id: i64,
    pub service_id: i64,
    pub employee_id: i64,
    pub start_time: String,
    pub end_time: String,
}
