pub mod appointments;
pub mod auth;
pub mod clients;
pub mod products;
pub mod services;

use actix_web::{web, HttpResponse};
use tera::Context;

use crate::{errors::AppError, TEMPLATES};

/// Fixed paths (`/new`) register before the `{id}` routes so form URLs never
/// fall into the id extractor.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::index_handler)
        .service(auth::login_handler)
        .service(auth::login_form_handler)
        .service(auth::logout_handler)
        .service(auth::dashboard_handler)
        //
        .service(clients::new_client_handler)
        .service(clients::new_client_form_handler)
        .service(clients::clients_handler)
        .service(clients::client_detail_handler)
        .service(clients::client_action_handler)
        //
        .service(services::new_service_handler)
        .service(services::new_service_form_handler)
        .service(services::services_handler)
        .service(services::service_detail_handler)
        .service(services::service_action_handler)
        //
        .service(products::new_product_handler)
        .service(products::new_product_form_handler)
        .service(products::products_handler)
        .service(products::product_detail_handler)
        .service(products::product_action_handler)
        //
        .service(appointments::new_appointment_handler)
        .service(appointments::new_appointment_form_handler)
        .service(appointments::appointments_handler)
        .service(appointments::appointment_detail_handler)
        .service(appointments::appointment_action_handler);
}

pub(crate) fn render(template: &str, context: &Context) -> Result<HttpResponse, AppError> {
    let rendered = TEMPLATES.render(template, context).map_err(|e| {
        log::error!("Failed to render template {}: {}", template, e);
        AppError::Template(e)
    })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}

pub(crate) fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header(("Location", location))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_identity::IdentityMiddleware;
    use actix_session::{storage::CookieSessionStore, SessionMiddleware};
    use actix_web::{
        cookie::Key,
        dev::ServiceResponse,
        http::{header, StatusCode},
        test,
        web::Data,
        App,
    };

    use crate::db;
    use crate::db::test_support::test_state;

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .wrap(IdentityMiddleware::default())
                    .wrap(
                        SessionMiddleware::builder(
                            CookieSessionStore::default(),
                            Key::from(&[7u8; 64]),
                        )
                        .cookie_name("__session".to_owned())
                        .cookie_secure(false)
                        .build(),
                    )
                    .app_data(Data::new($state.clone()))
                    .configure(super::configure),
            )
            .await
        };
    }

    fn session_cookie<B>(resp: &ServiceResponse<B>) -> String {
        resp.headers()
            .get_all(header::SET_COOKIE)
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn location<B>(resp: &ServiceResponse<B>) -> String {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    }

    macro_rules! log_in {
        ($app:expr, $state:expr) => {{
            db::users::seed_user(&$state, "test@test.com", "123456", Some("Prueba"))
                .await
                .unwrap();
            let req = test::TestRequest::post()
                .uri("/login")
                .set_form([("email", "test@test.com"), ("password", "123456")])
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&resp), "/dashboard");
            session_cookie(&resp)
        }};
    }

    #[actix_web::test]
    async fn guarded_routes_redirect_to_login_with_return_path() {
        let state = test_state().await;
        let app = test_app!(state);

        // list, detail and form routes are all behind the same guard
        for path in [
            "/clients",
            "/services",
            "/products",
            "/appointments",
            "/clients/1",
            "/appointments/7",
            "/clients/new",
            "/products/new",
        ] {
            let req = test::TestRequest::get().uri(path).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", path);
            assert_eq!(
                location(&resp),
                format!("/login?redirectTo={}", path.replace('/', "%2F"))
            );
        }
    }

    #[actix_web::test]
    async fn login_failures_are_indistinguishable() {
        let state = test_state().await;
        let app = test_app!(state);
        db::users::seed_user(&state, "test@test.com", "123456", None)
            .await
            .unwrap();

        let wrong_pwd = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "test@test.com"), ("password", "wrong")])
            .to_request();
        let resp = test::call_service(&app, wrong_pwd).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body_wrong_pwd = test::read_body(resp).await;

        let unknown_email = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "nobody@test.com"), ("password", "123456")])
            .to_request();
        let resp = test::call_service(&app, unknown_email).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body_unknown = test::read_body(resp).await;

        assert_eq!(body_wrong_pwd, body_unknown);
    }

    #[actix_web::test]
    async fn login_honors_redirect_to() {
        let state = test_state().await;
        let app = test_app!(state);
        db::users::seed_user(&state, "test@test.com", "123456", None)
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([
                ("email", "test@test.com"),
                ("password", "123456"),
                ("redirectTo", "/products"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/products");
    }

    #[actix_web::test]
    async fn dashboard_renders_degraded_view_without_a_session() {
        let state = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn dashboard_greets_the_user_by_display_name() {
        let state = test_state().await;
        let app = test_app!(state);
        let cookie = log_in!(app, state);

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header((header::COOKIE, cookie))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Prueba"));
    }

    #[actix_web::test]
    async fn client_create_view_delete_scenario() {
        let state = test_state().await;
        let app = test_app!(state);
        let cookie = log_in!(app, state);

        let req = test::TestRequest::post()
            .uri("/clients/new")
            .insert_header((header::COOKIE, cookie.clone()))
            .set_form([
                ("name", "Ana"),
                ("lastName", "Ruiz"),
                ("email", "ana@x.com"),
                ("phone", "555"),
                ("birthDate", ""),
                ("address", ""),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let detail_path = location(&resp);
        assert!(detail_path.starts_with("/clients/"));

        let req = test::TestRequest::get()
            .uri(&detail_path)
            .insert_header((header::COOKIE, cookie.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        for field in ["Ana", "Ruiz", "ana@x.com", "555"] {
            assert!(body.contains(field), "detail view is missing {}", field);
        }

        let req = test::TestRequest::post()
            .uri(&detail_path)
            .insert_header((header::COOKIE, cookie.clone()))
            .set_form([("_action", "delete")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/clients");

        let req = test::TestRequest::get()
            .uri(&detail_path)
            .insert_header((header::COOKIE, cookie))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_client_id_is_404() {
        let state = test_state().await;
        let app = test_app!(state);
        let cookie = log_in!(app, state);

        let req = test::TestRequest::get()
            .uri("/clients/999")
            .insert_header((header::COOKIE, cookie))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn appointment_with_unknown_client_is_rejected() {
        let state = test_state().await;
        let app = test_app!(state);
        let cookie = log_in!(app, state);

        let req = test::TestRequest::post()
            .uri("/appointments/new")
            .insert_header((header::COOKIE, cookie))
            .set_form([
                ("clientId", "999"),
                ("serviceId", "999"),
                ("employeeId", "1"),
                ("startTime", "2025-06-01T10:30"),
                ("endTime", "2025-06-01T11:15"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(db::appointments::get_all_appointments(&state)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn update_action_changes_the_record() {
        let state = test_state().await;
        let app = test_app!(state);
        let cookie = log_in!(app, state);

        let req = test::TestRequest::post()
            .uri("/services/new")
            .insert_header((header::COOKIE, cookie.clone()))
            .set_form([
                ("name", "Corte"),
                ("description", "Corte de pelo"),
                ("price", "25.5"),
                ("duration", "45"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let detail_path = location(&resp);

        let req = test::TestRequest::post()
            .uri(&detail_path)
            .insert_header((header::COOKIE, cookie))
            .set_form([
                ("_action", "update"),
                ("name", "Corte"),
                ("description", "Corte y lavado"),
                ("price", "30"),
                ("duration", "60"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), detail_path);

        let id: i64 = detail_path.rsplit('/').next().unwrap().parse().unwrap();
        let service = db::services::get_service_by_id(&state, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(service.description, "Corte y lavado");
        assert_eq!(service.price, 30.0);
        assert_eq!(service.duration, 60);
    }
}
