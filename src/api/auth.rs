use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::error::ApiError,
    management::{
        SESSION_COOKIE, SESSION_MAX_AGE_DAYS, STATE_COOKIE, STATE_MAX_AGE_MINUTES, ensure_fresh,
    },
    server::AppState,
    spotify::error::SpotifyError,
    types::{Session, SessionUser},
    utils,
};

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(time::Duration::days(SESSION_MAX_AGE_DAYS));
    cookie
}

fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(STATE_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(time::Duration::minutes(STATE_MAX_AGE_MINUTES));
    cookie
}

/// Removal needs a cookie with the same name and path as the one being
/// dropped.
fn named(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}

/// An authenticated request: the decoded (and lazily refreshed) session
/// plus the cookie jar the handler must return so a refreshed cookie
/// reaches the browser.
pub struct Authed {
    pub session: Session,
    pub jar: CookieJar,
}

pub struct AuthRejection {
    jar: CookieJar,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.jar, ApiError::unauthorized()).into_response()
    }
}

impl FromRequestParts<AppState> for Authed {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .expect("Could not read cookies into CookieJar.");

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(AuthRejection { jar });
        };

        // a cookie that does not decode is the same as no session
        let session = match state.codec.decode(cookie.value()) {
            Ok(session) => session,
            Err(_) => {
                return Err(AuthRejection {
                    jar: jar.remove(named(SESSION_COOKIE)),
                });
            }
        };

        let now_ms = Utc::now().timestamp_millis();
        match ensure_fresh(session, now_ms, state.spotify.as_ref()).await {
            Ok(fresh) => {
                let jar = if fresh.refreshed {
                    jar.add(session_cookie(
                        state.codec.encode(&fresh.session),
                        state.cookie_secure,
                    ))
                } else {
                    jar
                };
                Ok(Authed {
                    session: fresh.session,
                    jar,
                })
            }
            Err(err) => {
                tracing::warn!("token refresh failed: {err}");
                Err(AuthRejection {
                    jar: jar.remove(named(SESSION_COOKIE)),
                })
            }
        }
    }
}

pub async fn login(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let nonce = utils::generate_state_token();
    let auth_url = state.spotify.authorize_url(&nonce);
    let jar = jar.add(state_cookie(nonce, state.cookie_secure));
    (jar, Redirect::temporary(&auth_url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        let target = format!("/?error={}", urlencoding::encode(&error));
        return (jar, Redirect::temporary(&target)).into_response();
    }

    let stored_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    // the state cookie is single-use
    let jar = jar.remove(named(STATE_COOKIE));

    let code = match (params.code, params.state, stored_state) {
        (Some(code), Some(state), Some(stored)) if state == stored => code,
        _ => {
            return (jar, Redirect::temporary("/?error=state_mismatch")).into_response();
        }
    };

    match establish_session(&state, &code).await {
        Ok(cookie_value) => {
            let jar = jar.add(session_cookie(cookie_value, state.cookie_secure));
            (jar, Redirect::temporary("/")).into_response()
        }
        Err(err) => {
            tracing::warn!("login failed: {err}");
            (jar, Redirect::temporary("/?error=token_error")).into_response()
        }
    }
}

async fn establish_session(state: &AppState, code: &str) -> Result<String, SpotifyError> {
    let token = state.spotify.exchange_code(code).await?;
    let profile = state.spotify.user_profile(&token.access_token).await?;

    let now_ms = Utc::now().timestamp_millis();
    let session = Session {
        expires_at: now_ms + token.expires_in * 1000,
        access_token: token.access_token,
        refresh_token: token.refresh_token.unwrap_or_default(),
        user: SessionUser {
            name: profile
                .display_name
                .clone()
                .unwrap_or_else(|| profile.id.clone()),
            id: profile.id,
            email: profile.email,
            image: profile.images.first().map(|i| i.url.clone()),
        },
    };

    Ok(state.codec.encode(&session))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    // Redirect::to answers 303 so the browser re-GETs the root
    (jar.remove(named(SESSION_COOKIE)), Redirect::to("/"))
}

/// Reports the current session to the UI without requiring one: an absent,
/// malformed or unrefreshable session answers `{"user": null}` and clears
/// the cookie where one existed.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let anonymous = Json(json!({ "user": null }));

    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return anonymous.into_response();
    };

    let session = match state.codec.decode(cookie.value()) {
        Ok(session) => session,
        Err(_) => {
            return (jar.remove(named(SESSION_COOKIE)), anonymous).into_response();
        }
    };

    let now_ms = Utc::now().timestamp_millis();
    match ensure_fresh(session, now_ms, state.spotify.as_ref()).await {
        Ok(fresh) => {
            let body = Json(json!({
                "user": fresh.session.user,
                "accessToken": fresh.session.access_token,
            }));
            if fresh.refreshed {
                let jar = jar.add(session_cookie(
                    state.codec.encode(&fresh.session),
                    state.cookie_secure,
                ));
                (jar, body).into_response()
            } else {
                body.into_response()
            }
        }
        Err(err) => {
            tracing::warn!("token refresh failed: {err}");
            (jar.remove(named(SESSION_COOKIE)), anonymous).into_response()
        }
    }
}
