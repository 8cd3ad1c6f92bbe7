use actix_identity::Identity;
use actix_web::HttpRequest;

use crate::errors::AppError;

/// Resolves the logged-in user id from the session, or fails with an
/// `Unauthenticated` condition that redirects to the login page carrying the
/// originally requested path.
pub fn require_user_id(identity: Option<Identity>, req: &HttpRequest) -> Result<i64, AppError> {
    let Some(identity) = identity else {
        return Err(AppError::Unauthenticated {
            redirect_to: req.path().to_owned(),
        });
    };
    let raw = identity.id()?;
    raw.parse().map_err(|_| {
        log::warn!("Session carried a non-numeric user id: {}", raw);
        AppError::Unauthenticated {
            redirect_to: req.path().to_owned(),
        }
    })
}

pub fn login_redirect(original_path: &str) -> String {
    let query =
        serde_urlencoded::to_string([("redirectTo", original_path)]).unwrap_or_default();
    format!("/login?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_encodes_the_original_path() {
        assert_eq!(login_redirect("/clients"), "/login?redirectTo=%2Fclients");
        assert_eq!(
            login_redirect("/appointments/42"),
            "/login?redirectTo=%2Fappointments%2F42"
        );
    }
}
