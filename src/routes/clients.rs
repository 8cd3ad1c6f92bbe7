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
    forms::{ClientAction, ClientActionForm, ClientForm},
    routes, AppState,
};

#[get("/clients")]
pub async fn clients_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let clients = db::clients::get_all_clients(&state).await?;

    let mut context = Context::new();
    context.insert("title", "Clientes");
    context.insert("clients", &clients);

    routes::render("clients/index.html", &context)
}

#[get("/clients/new")]
pub async fn new_client_handler(
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let mut context = Context::new();
    context.insert("title", "Nuevo cliente");

    routes::render("clients/new.html", &context)
}

#[post("/clients/new")]
pub async fn new_client_form_handler(
    web::Form(form): web::Form<ClientForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let client = db::clients::create_client(&state, form.validate()?).await?;
    Ok(routes::see_other(format!("/clients/{}", client.id)))
}

#[get("/clients/{id}")]
pub async fn client_detail_handler(
    path: web::Path<i64>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    let client = db::clients::get_client_by_id(&state, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut context = Context::new();
    context.insert("title", "Detalle de cliente");
    context.insert("client", &client);

    routes::render("clients/detail.html", &context)
}

#[post("/clients/{id}")]
pub async fn client_action_handler(
    path: web::Path<i64>,
    web::Form(form): web::Form<ClientActionForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    match form.into_action()? {
        ClientAction::Update(input) => {
            db::clients::update_client(&state, id, input).await?;
            Ok(routes::see_other(format!("/clients/{}", id)))
        }
        ClientAction::Delete => {
            db::clients::delete_client(&state, id).await?;
            Ok(routes::see_other("/clients".to_owned()))
        }
    }
}
