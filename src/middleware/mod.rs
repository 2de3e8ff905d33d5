use crate::error::ApiError;
use crate::models::{User, UserRole};
use actix_session::{Session, SessionExt, SessionInsertError};
use actix_web::{
    body::EitherBody,
    dev::{self, forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpRequest, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use serde::Serialize;
use std::future::{ready, Ready as StdReady};

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin";

const SESSION_USER_ID: &str = "user_id";
const SESSION_EMAIL: &str = "email";
const SESSION_NAME: &str = "name";
const SESSION_ROLE: &str = "role";
const SESSION_CSRF_TOKEN: &str = "csrf_token";

/// The signed-in administrator, read back from the session cookie.
#[derive(Serialize, Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub user_id: String,
    pub email: String,
    pub name: String,
    /// Token for the panel's own POST forms, issued with the dashboard.
    pub csrf_token: Option<String>,
}

impl FromRequest for AuthenticatedAdmin {
    type Error = actix_web::Error;
    type Future = StdReady<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let session = req.get_session();
        if !admin_guard(&session) {
            return ready(Err(ApiError::Unauthorized.into()));
        }
        match (
            session.get::<String>(SESSION_USER_ID),
            session.get::<String>(SESSION_EMAIL),
            session.get::<String>(SESSION_NAME),
        ) {
            (Ok(Some(user_id)), Ok(Some(email)), Ok(Some(name))) => {
                let csrf_token = session.get::<String>(SESSION_CSRF_TOKEN).unwrap_or(None);
                ready(Ok(AuthenticatedAdmin { user_id, email, name, csrf_token }))
            }
            _ => ready(Err(ApiError::Unauthorized.into())),
        }
    }
}

/// Stores the fields the gate and `AuthenticatedAdmin` read back.
pub fn start_session(session: &Session, user: &User) -> Result<(), SessionInsertError> {
    session.renew();
    session.insert(SESSION_USER_ID, &user.id)?;
    session.insert(SESSION_EMAIL, &user.email)?;
    session.insert(SESSION_NAME, &user.name)?;
    session.insert(SESSION_ROLE, user.role.as_str())?;
    Ok(())
}

/// Keeps the CSRF token of the current cookie so every panel page can render it.
pub fn remember_csrf_token(session: &Session, token: &str) -> Result<(), SessionInsertError> {
    session.insert(SESSION_CSRF_TOKEN, token)
}

/// Refreshes the cached email after a profile change.
pub fn update_session_email(session: &Session, email: &str) -> Result<(), SessionInsertError> {
    session.insert(SESSION_EMAIL, email)
}

fn session_role(session: &Session) -> Option<String> {
    session.get::<String>(SESSION_ROLE).unwrap_or(None)
}

pub fn admin_guard(session: &Session) -> bool {
    session_role(session).as_deref() == Some(UserRole::Admin.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// HTML pages: send the browser somewhere useful.
    Redirect,
    /// JSON endpoints: answer 401.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
    Unauthorized,
}

/// Decides what happens to a request under `/admin` or `/api/admin` given
/// the role found in its session.
pub fn gate_decision(mode: GateMode, path: &str, role: Option<&str>) -> GateDecision {
    let is_admin = role == Some(UserRole::Admin.as_str());
    match mode {
        GateMode::Json if is_admin => GateDecision::Allow,
        GateMode::Json => GateDecision::Unauthorized,
        GateMode::Redirect if path.trim_end_matches('/') == LOGIN_PATH => GateDecision::Allow,
        GateMode::Redirect if is_admin => GateDecision::Allow,
        GateMode::Redirect if role.is_none() => GateDecision::Redirect(LOGIN_PATH),
        GateMode::Redirect => GateDecision::Redirect("/"),
    }
}

/// Session gate for the admin panel and the admin JSON API. Must be wrapped
/// inside the session middleware.
pub struct AdminGate {
    mode: GateMode,
}

impl AdminGate {
    pub fn pages() -> Self {
        AdminGate { mode: GateMode::Redirect }
    }

    pub fn api() -> Self {
        AdminGate { mode: GateMode::Json }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGateMiddleware { service, mode: self.mode })
    }
}

pub struct AdminGateMiddleware<S> {
    service: S,
    mode: GateMode,
}

impl<S, B> Service<ServiceRequest> for AdminGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let role = session_role(&req.get_session());
        let decision = gate_decision(self.mode, req.path(), role.as_deref());

        let denied = match decision {
            GateDecision::Allow => {
                let fut = self.service.call(req);
                return Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                });
            }
            GateDecision::Redirect(location) => {
                HttpResponse::Found().append_header(("location", location)).finish()
            }
            GateDecision::Unauthorized => {
                log::warn!("Rejected unauthenticated admin API call to {}", req.path());
                actix_web::ResponseError::error_response(&ApiError::Unauthorized)
            }
        };

        Box::pin(async move {
            let (http_req, _payload) = req.into_parts();
            Ok(ServiceResponse::new(http_req, denied.map_into_right_body()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_redirect_by_role() {
        let mode = GateMode::Redirect;
        assert_eq!(gate_decision(mode, "/admin", None), GateDecision::Redirect(LOGIN_PATH));
        assert_eq!(gate_decision(mode, "/admin/countries", Some("editor")), GateDecision::Redirect("/"));
        assert_eq!(gate_decision(mode, "/admin/countries", Some("admin")), GateDecision::Allow);
    }

    #[test]
    fn login_page_is_always_reachable() {
        assert_eq!(gate_decision(GateMode::Redirect, "/admin/login", None), GateDecision::Allow);
        assert_eq!(gate_decision(GateMode::Redirect, "/admin/login/", Some("editor")), GateDecision::Allow);
    }

    #[test]
    fn api_answers_unauthorized_for_non_admins() {
        let mode = GateMode::Json;
        assert_eq!(gate_decision(mode, "/api/admin/countries", None), GateDecision::Unauthorized);
        assert_eq!(gate_decision(mode, "/api/admin/countries", Some("editor")), GateDecision::Unauthorized);
        assert_eq!(gate_decision(mode, "/api/admin/countries", Some("admin")), GateDecision::Allow);
    }
}
