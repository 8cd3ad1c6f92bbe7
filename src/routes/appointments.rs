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
    forms::{AppointmentAction, AppointmentActionForm, AppointmentForm},
    routes, AppState,
};

/// The appointment forms render selects over clients, services and employees,
/// so both form pages load all three lists.
async fn insert_reference_lists(
    state: &AppState,
    context: &mut Context,
) -> Result<(), AppError> {
    let clients = db::clients::get_all_clients(state).await?;
    let services = db::services::get_all_services(state).await?;
    let employees = db::users::get_all_users(state).await?;
    context.insert("clients", &clients);
    context.insert("services", &services);
    context.insert("employees", &employees);
    Ok(())
}

#[get("/appointments")]
pub async fn appointments_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let appointments = db::appointments::get_all_appointments(&state).await?;

    let mut context = Context::new();
    context.insert("title", "Citas");
    context.insert("appointments", &appointments);

    routes::render("appointments/index.html", &context)
}

#[get("/appointments/new")]
pub async fn new_appointment_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let mut context = Context::new();
    context.insert("title", "Nueva cita");
    insert_reference_lists(&state, &mut context).await?;

    routes::render("appointments/new.html", &context)
}

#[post("/appointments/new")]
pub async fn new_appointment_form_handler(
    web::Form(form): web::Form<AppointmentForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let appointment = db::appointments::create_appointment(&state, form.validate()?).await?;
    Ok(routes::see_other(format!("/appointments/{}", appointment.id)))
}

#[get("/appointments/{id}")]
pub async fn appointment_detail_handler(
    path: web::Path<i64>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    let appointment = db::appointments::get_appointment_by_id(&state, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut context = Context::new();
    context.insert("title", "Detalle de cita");
    context.insert("appointment", &appointment);
    insert_reference_lists(&state, &mut context).await?;

    routes::render("appointments/detail.html", &context)
}

#[post("/appointments/{id}")]
pub async fn appointment_action_handler(
    path: web::Path<i64>,
    web::Form(form): web::Form<AppointmentActionForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    match form.into_action()? {
        AppointmentAction::Update(input) => {
            db::appointments::update_appointment(&state, id, input).await?;
            Ok(routes::see_other(format!("/appointments/{}", id)))
        }
        AppointmentAction::Delete => {
            db::appointments::delete_appointment(&state, id).await?;
            Ok(routes::see_other("/appointments".to_owned()))
        }
    }
}
