use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::app_data::AppData;
use crate::errors::GuardError;
use crate::types::db::user;

/// Pull the Bearer credential off a request, if one was sent
pub fn extract_bearer(req: &Request) -> Option<Bearer> {
    Bearer::from_request(req).ok()
}

/// Authentication guard: resolve the logged-in user for this request
///
/// Runs before any authorization check. On failure the originally
/// requested path is remembered, either on the presented session or on a
/// fresh anonymous session whose token is handed back in the error, so
/// the next login can forward the client back here.
///
/// # Returns
/// * `Ok((user, session_token))` - The logged-in user and the validated token
/// * `Err(GuardError::AuthenticationRequired)` - No live login session
pub async fn require_login(
    app: &AppData,
    req: &Request,
) -> Result<(user::Model, String), GuardError> {
    let requested_path = req.uri().path().to_string();

    let Some(bearer) = extract_bearer(req) else {
        let login_session = app.session_service.remember_location(&requested_path).await;
        return Err(GuardError::AuthenticationRequired { login_session });
    };
    let token = bearer.token;

    let Some(user_id) = app.session_service.current_user_id(&token).await else {
        // Dead or anonymous session: keep the client's token and store the
        // destination on it
        app.session_service
            .store_location(&token, &requested_path)
            .await;
        return Err(GuardError::AuthenticationRequired {
            login_session: token,
        });
    };

    match app.user_store.find_by_id(&user_id).await {
        Ok(Some(user)) => Ok((user, token)),
        Ok(None) => {
            // Account deleted while the session was live
            app.session_service.log_out(&token).await;
            let login_session = app.session_service.remember_location(&requested_path).await;
            Err(GuardError::AuthenticationRequired { login_session })
        }
        Err(e) => Err(GuardError::Internal(e.to_string())),
    }
}

/// Authorization guard: the acting user must own the target resource
///
/// Call only after `require_login`; authentication is always checked first.
pub fn require_correct_user(current: &user::Model, owner_id: &str) -> Result<(), GuardError> {
    if current.id != owner_id {
        return Err(GuardError::Forbidden);
    }
    Ok(())
}

/// Authorization guard: the acting user must be an admin
///
/// Call only after `require_login`; authentication is always checked first.
pub fn require_admin(current: &user::Model) -> Result<(), GuardError> {
    if !current.admin {
        return Err(GuardError::Forbidden);
    }
    Ok(())
}
