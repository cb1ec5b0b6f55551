//! Registration, profiles and permission administration.

use std::collections::BTreeSet;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use mysite_core::error::SiteError;
use mysite_core::model::{Profile, ProfilePatch};
use mysite_core::subject::{Subject, SubjectId};

use crate::app_state::AppState;
use crate::auth::{CurrentUser, NewAccount};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct Registered {
    pub id: SubjectId,
    pub username: String,
    pub token: String,
}

/// New accounts carry no role flags and no grants.
pub async fn register(
    State(app): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Registered>)> {
    let (subject, token) = app.register_user(NewAccount::named(body.username), None)?;
    Ok((
        StatusCode::CREATED,
        Json(Registered {
            id: subject.id,
            username: subject.username,
            token,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct Me {
    pub user: Subject,
    pub profile: Option<Profile>,
}

pub async fn me(State(app): State<AppState>, CurrentUser(user): CurrentUser) -> Json<Me> {
    let profile = app.store().profiles.get(&user.id).map(|p| p.value().clone());
    Json(Me { user, profile })
}

#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
}

pub async fn get_profile(
    State(app): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<PublicProfile>> {
    let not_found = || SiteError::NotFound(format!("user {username}"));
    let user = app.accounts().by_username(&username).ok_or_else(not_found)?;
    let profile = app.store().profiles.get(&user.id).ok_or_else(not_found)?;
    Ok(Json(PublicProfile {
        username: user.username,
        bio: profile.bio.clone(),
        avatar: profile.avatar.clone(),
    }))
}

/// Edit the caller's own profile. Only the owner's entry is ever addressed.
pub async fn edit_profile(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(patch): ApiJson<ProfilePatch>,
) -> ApiResult<Json<Profile>> {
    patch.validate()?;
    let mut profile = app
        .store()
        .profiles
        .get_mut(&user.id)
        .ok_or_else(|| SiteError::NotFound(format!("profile of {}", user.username)))?;
    patch.apply(profile.value_mut());
    Ok(Json(profile.value().clone()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionChange {
    #[serde(default)]
    pub grant: BTreeSet<String>,
    #[serde(default)]
    pub revoke: BTreeSet<String>,
}

pub async fn update_permissions(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(username): ApiPath<String>,
    ApiJson(change): ApiJson<PermissionChange>,
) -> ApiResult<Json<Subject>> {
    if !user.is_superuser {
        tracing::warn!(user = %user.username, target = %username, "permission change denied");
        return Err(SiteError::Forbidden("only superusers may change permissions".into()).into());
    }
    let policies = app.policies();
    policies.check_grants(change.grant.iter().map(String::as_str))?;
    policies.check_grants(change.revoke.iter().map(String::as_str))?;

    let updated = app
        .accounts()
        .update_permissions(&username, &change.grant, &change.revoke)?;
    tracing::info!(by = %user.username, target = %username, "permissions updated");
    Ok(Json(updated))
}
