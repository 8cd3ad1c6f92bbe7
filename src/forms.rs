//! Raw form payloads and their validated counterparts.
//!
//! Every POST body deserializes into a raw struct of strings, then a
//! `validate()` step produces a typed input (or an enumerated validation
//! error) before any repository call is attempted. Detail-page submissions
//! additionally carry an `_action` tag that resolves into a typed action
//! enum, so update and delete each get their own match arm.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::errors::AppError;

const DATE_FMT: &str = "%Y-%m-%d";
// what <input type="datetime-local"> submits
const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M";
const DATETIME_STORE_FMT: &str = "%Y-%m-%dT%H:%M:%S";

fn require(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_price(value: Option<String>, field: &str) -> Result<f64, AppError> {
    let raw = require(value, field)?;
    let price: f64 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", field)))?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(price)
}

fn parse_integer(value: Option<String>, field: &str) -> Result<i64, AppError> {
    require(value, field)?
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", field)))
}

fn parse_id(value: Option<String>, field: &str) -> Result<i64, AppError> {
    require(value, field)?
        .parse()
        .map_err(|_| AppError::Validation(format!("{} is not a valid id", field)))
}

fn parse_datetime(value: Option<String>, field: &str) -> Result<String, AppError> {
    let raw = require(value, field)?;
    let parsed = NaiveDateTime::parse_from_str(&raw, DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, DATETIME_STORE_FMT))
        .map_err(|_| {
            AppError::Validation(format!("{} must be a date and time", field))
        })?;
    Ok(parsed.format(DATETIME_STORE_FMT).to_string())
}

// ---------------------------------------------------------------------------
// Login

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default, rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

// ---------------------------------------------------------------------------
// Clients

#[derive(Debug, Deserialize)]
pub struct ClientForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "birthDate")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientInput {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

impl ClientForm {
    pub fn validate(self) -> Result<ClientInput, AppError> {
        let email = require(self.email, "email")?;
        if !email.contains('@') {
            return Err(AppError::Validation("email is not a valid address".to_owned()));
        }
        let birth_date = match optional(self.birth_date) {
            Some(raw) => {
                NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|_| {
                    AppError::Validation("birthDate must be a YYYY-MM-DD date".to_owned())
                })?;
                Some(raw)
            }
            None => None,
        };
        Ok(ClientInput {
            name: require(self.name, "name")?,
            last_name: require(self.last_name, "lastName")?,
            email,
            phone: require(self.phone, "phone")?,
            birth_date,
            address: optional(self.address),
        })
    }
}

// ---------------------------------------------------------------------------
// Services

#[derive(Debug, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i64,
}

impl ServiceForm {
    pub fn validate(self) -> Result<ServiceInput, AppError> {
        let duration = parse_integer(self.duration, "duration")?;
        if duration <= 0 {
            return Err(AppError::Validation(
                "duration must be a positive number of minutes".to_owned(),
            ));
        }
        Ok(ServiceInput {
            name: require(self.name, "name")?,
            description: require(self.description, "description")?,
            price: parse_price(self.price, "price")?,
            duration,
        })
    }
}

// ---------------------------------------------------------------------------
// Products

#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
    pub stock: i64,
}

impl ProductForm {
    pub fn validate(self) -> Result<ProductInput, AppError> {
        let stock = parse_integer(self.stock, "stock")?;
        if stock < 0 {
            return Err(AppError::Validation("stock cannot be negative".to_owned()));
        }
        Ok(ProductInput {
            name: require(self.name, "name")?,
            description: require(self.description, "description")?,
            price: parse_price(self.price, "price")?,
            sku: require(self.sku, "sku")?,
            stock,
        })
    }
}

// ---------------------------------------------------------------------------
// Appointments

#[derive(Debug, Deserialize)]
pub struct AppointmentForm {
    #[serde(default, rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(default, rename = "serviceId")]
    pub service_id: Option<String>,
    #[serde(default, rename = "employeeId")]
    pub employee_id: Option<String>,
    #[serde(default, rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(default, rename = "endTime")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentInput {
    pub client_id: i64,
    pub service_id: i64,
    pub employee_id: i64,
    pub start_time: String,
    pub end_time: String,
}

impl AppointmentForm {
    pub fn validate(self) -> Result<AppointmentInput, AppError> {
        Ok(AppointmentInput {
            client_id: parse_id(self.client_id, "clientId")?,
            service_id: parse_id(self.service_id, "serviceId")?,
            employee_id: parse_id(self.employee_id, "employeeId")?,
            start_time: parse_datetime(self.start_time, "startTime")?,
            end_time: parse_datetime(self.end_time, "endTime")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Detail-page actions

macro_rules! action_form {
    ($form_ty:ident, $raw_ty:ident, $action_ty:ident, $input_ty:ident {
        $($field:ident as $name:literal),* $(,)?
    }) => {
        #[derive(Debug, Deserialize)]
        pub struct $form_ty {
            #[serde(rename = "_action")]
            pub action: String,
            $(
                #[serde(default, rename = $name)]
                pub $field: Option<String>,
            )*
        }

        #[derive(Debug)]
        pub enum $action_ty {
            Update($input_ty),
            Delete,
        }

        impl $form_ty {
            pub fn into_action(self) -> Result<$action_ty, AppError> {
                match self.action.as_str() {
                    "update" => {
                        let raw = $raw_ty {
                            $($field: self.$field,)*
                        };
                        Ok($action_ty::Update(raw.validate()?))
                    }
                    "delete" => Ok($action_ty::Delete),
                    other => Err(AppError::Validation(format!(
                        "unknown action: {}",
                        other
                    ))),
                }
            }
        }
    };
}

action_form!(ClientActionForm, ClientForm, ClientAction, ClientInput {
    name as "name",
    last_name as "lastName",
    email as "email",
    phone as "phone",
    birth_date as "birthDate",
    address as "address",
});

action_form!(ServiceActionForm, ServiceForm, ServiceAction, ServiceInput {
    name as "name",
    description as "description",
    price as "price",
    duration as "duration",
});

action_form!(ProductActionForm, ProductForm, ProductAction, ProductInput {
    name as "name",
    description as "description",
    price as "price",
    sku as "sku",
    stock as "stock",
});

action_form!(
    AppointmentActionForm,
    AppointmentForm,
    AppointmentAction,
    AppointmentInput {
        client_id as "clientId",
        service_id as "serviceId",
        employee_id as "employeeId",
        start_time as "startTime",
        end_time as "endTime",
    }
);
