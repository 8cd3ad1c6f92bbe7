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
    forms::{ProductAction, ProductActionForm, ProductForm},
    routes, AppState,
};

#[get("/products")]
pub async fn products_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let products = db::products::get_all_products(&state).await?;

    let mut context = Context::new();
    context.insert("title", "Productos");
    context.insert("products", &products);

    routes::render("products/index.html", &context)
}

#[get("/products/new")]
pub async fn new_product_handler(
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let mut context = Context::new();
    context.insert("title", "Nuevo producto");

    routes::render("products/new.html", &context)
}

#[post("/products/new")]
pub async fn new_product_form_handler(
    web::Form(form): web::Form<ProductForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let product = db::products::create_product(&state, form.validate()?).await?;
    Ok(routes::see_other(format!("/products/{}", product.id)))
}

#[get("/products/{id}")]
pub async fn product_detail_handler(
    path: web::Path<i64>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    let product = db::products::get_product_by_id(&state, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut context = Context::new();
    context.insert("title", "Detalle de producto");
    context.insert("product", &product);

    routes::render("products/detail.html", &context)
}

#[post("/products/{id}")]
pub async fn product_action_handler(
    path: web::Path<i64>,
    web::Form(form): web::Form<ProductActionForm>,
    state: Data<AppState>,
    identity: Option<Identity>,
    request: HttpRequest,
) -> Result<impl Responder, AppError> {
    auth::require_user_id(identity, &request)?;

    let id = path.into_inner();
    match form.into_action()? {
        ProductAction::Update(input) => {
            db::products::update_product(&state, id, input).await?;
            Ok(routes::see_other(format!("/products/{}", id)))
        }
        ProductAction::Delete => {
            db::products::delete_product(&state, id).await?;
            Ok(routes::see_other("/products".to_owned()))
        }
    }
}
