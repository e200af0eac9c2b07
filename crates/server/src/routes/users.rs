use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use service::errors::ServiceError;
use service::users::domain::{SignupInput, UserView};
use tracing::warn;

use crate::{errors::status_for, metrics::observe, pages, state::AppState};

const FAMILY: &str = "users";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password_user: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password_user: String,
}

impl From<SignupForm> for SignupInput {
    fn from(f: SignupForm) -> Self {
        Self { firstname: f.firstname, lastname: f.lastname, username: f.username, password: f.password_user }
    }
}

/// Login page, served for both GET and POST.
pub async fn index() -> Html<String> {
    Html(pages::login_page())
}

pub async fn signup_form() -> Html<String> {
    Html(pages::signup_page(None))
}

pub async fn user_redirect() -> Redirect {
    Redirect::to("/")
}

fn service_failure(e: &ServiceError) -> Response {
    (status_for(e), Html(pages::error_page("The service is temporarily unavailable."))).into_response()
}

/// Credential check. Unknown user and wrong password both land back on `/`.
pub async fn login(State(state): State<AppState>, form: Result<Form<LoginForm>, FormRejection>) -> Response {
    let Ok(Form(form)) = form else {
        return Redirect::to("/").into_response();
    };
    match observe(FAMILY, "verify", state.verifier.verify(&form.username, &form.password_user).await) {
        Ok(user) => Html(pages::user_page(&UserView::from(&user))).into_response(),
        Err(ServiceError::Unauthorized) => Redirect::to("/").into_response(),
        Err(e) => service_failure(&e),
    }
}

pub async fn data_processing(State(state): State<AppState>, form: Result<Form<SignupForm>, FormRejection>) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(err = %rejection, "signup form rejected");
            let page = pages::signup_page(Some("firstname, lastname, username and password are required"));
            return (StatusCode::BAD_REQUEST, Html(page)).into_response();
        }
    };
    match observe(FAMILY, "signup", state.users.signup(form.into()).await) {
        Ok(_) => Redirect::to("/").into_response(),
        Err(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, Html(pages::signup_page(Some(&msg)))).into_response(),
        Err(e) => service_failure(&e),
    }
}
