use actix_identity::Identity;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpRequest, Responder,
};
use tera::Context;

use crate::{
    auth, db,
    errors::AppError,
    forms::{ServiceAction, ServiceActionForm, ServiceForm},
    routes, AppState,
};

#[get("/services")]
pub async fn services_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let services = db::services::get_all_services(&state).await?;

    let mut context = Context::new();
    context.insert("title", "Servicios");
    context.insert("services", &services);

    routes::render("services/index.html", &context)
}

#[get("/services/new")]
pub async fn new_service_handler(
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let mut context = Context::new();
    context.insert("title", "Nuevo servicio");

    routes::render("services/new.html", &context)
}

#[post("/services/new")]
pub async fn new_service_form_handler(
    web::Form(form): web::Form<ServiceForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let service = db::services::create_service(&state, form.validate()?).await?;
    Ok(routes::see_other(format!("/services/{}", service.id)))
}

#[get("/services/{id}")]
pub async fn service_detail_handler(
    path: web::Path<i64>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    let service = db::services::get_service_by_id(&state, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut context = Context::new();
    context.insert("title", "Detalle de servicio");
    context.insert("service", &service);

    routes::render("services/detail.html", &context)
}

#[post("/services/{id}")]
pub async fn service_action_handler(
    path: web::Path<i64>,
    web::Form(form): web::Form<ServiceActionForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    match form.into_action()? {
        ServiceAction::Update(input) => {
            db::services::update_service(&state, id, input).await?;
            Ok(routes::see_other(format!("/services/{}", id)))
        }
        ServiceAction::Delete => {
            db::services::delete_service(&state, id).await?;
            Ok(routes::see_other("/services".to_owned()))
        }
    }
}
