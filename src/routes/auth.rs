use actix_identity::Identity;
use actix_web::{
    get,
    http::StatusCode,
    post,
    web::{self, Data},
    HttpMessage, HttpRequest, HttpResponse, Responder,
};
use serde::Deserialize;
use tera::Context;

use crate::{db, errors::AppError, forms::LoginForm, routes, AppState, TEMPLATES};

#[get("/")]
pub async fn index_handler() -> impl Responder {
    routes::see_other("/dashboard".to_owned())
}

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default, rename = "redirectTo")]
    redirect_to: Option<String>,
}

fn login_page(
    status: StatusCode,
    error: Option<&str>,
    redirect_to: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    context.insert("title", "Iniciar sesión");
    context.insert("error", &error);
    context.insert("redirect_to", redirect_to.unwrap_or(""));

    let rendered = TEMPLATES.render("login.html", &context).map_err(|e| {
        log::error!("Failed to render template: {}", e);
        AppError::Template(e)
    })?;

    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}

#[get("/login")]
pub async fn login_handler(query: web::Query<LoginQuery>) -> Result<impl Responder, AppError> {
    login_page(StatusCode::OK, None, query.redirect_to.as_deref())
}

#[post("/login")]
pub async fn login_form_handler(
    web::Form(form): web::Form<LoginForm>,
    state: Data<AppState>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    if form.email.is_empty() || form.password.is_empty() {
        return login_page(
            StatusCode::BAD_REQUEST,
            Some("All fields are required"),
            form.redirect_to.as_deref(),
        );
    }

    let user = match db::users::verify_login(&state, &form.email, &form.password).await {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            // same response for unknown email and wrong password
            return login_page(
                StatusCode::BAD_REQUEST,
                Some("Invalid email or password"),
                form.redirect_to.as_deref(),
            );
        }
        Err(e) => return Err(e),
    };

    Identity::login(&request.extensions(), user.id.to_string())?;

    // only same-site paths are honored as a return target
    let target = form
        .redirect_to
        .as_deref()
        .filter(|p| p.starts_with('/'))
        .unwrap_or("/dashboard");
    Ok(routes::see_other(target.to_owned()))
}

#[post("/logout")]
pub async fn logout_handler(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    routes::see_other("/login".to_owned())
}

/// Soft guard: the dashboard renders a degraded view instead of redirecting
/// when no session is present.
#[get("/dashboard")]
pub async fn dashboard_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<impl Responder, AppError> {
    let user = match identity.map(|id| id.id()) {
        Some(Ok(raw)) => match raw.parse::<i64>() {
            Ok(user_id) => db::users::get_user_by_id(&state, user_id).await?,
            Err(_) => None,
        },
        Some(Err(e)) => return Err(AppError::Identity(e)),
        None => None,
    };

    let mut context = Context::new();
    context.insert("title", "Panel");
    context.insert("user", &user);
    context.insert("version", env!("CARGO_PKG_VERSION"));

    routes::render("dashboard.html", &context)
}
