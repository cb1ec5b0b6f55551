//! Blog articles and feed.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use mysite_core::error::SiteError;
use mysite_core::model::{Article, ArticlePatch, ArticleSummary, AuthorRef, NewArticle};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::feed;

use super::{paginate, Page, PageQuery};

fn newest_first(app: &AppState) -> Vec<Article> {
    let mut rows = app.store().articles.all();
    rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
    rows
}

pub async fn list_articles(
    State(app): State<AppState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> ApiResult<Json<Page<ArticleSummary>>> {
    let rows = newest_first(&app).iter().map(ArticleSummary::from).collect();
    Ok(Json(paginate(rows, q.page)?))
}

pub async fn get_article(State(app): State<AppState>, ApiPath(id): ApiPath<u64>) -> ApiResult<Json<Article>> {
    let article = app
        .store()
        .articles
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("article {id}")))?;
    Ok(Json(article))
}

pub async fn create_article(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<NewArticle>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    app.policies().articles.authorize_create(&user)?;
    body.validate()?;

    let author = AuthorRef::of(&user);
    let article = app
        .store()
        .articles
        .insert_with(|id| body.into_article(id, author, Utc::now()));
    tracing::info!(id = article.id, author = %article.author.name, "article published");
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
    ApiJson(patch): ApiJson<ArticlePatch>,
) -> ApiResult<Json<Article>> {
    patch.validate()?;
    let policy = &app.policies().articles;
    let article = app.store().articles.try_update(id, "article", |a| {
        policy.authorize_edit(&user, a)?;
        patch.apply(a, Utc::now());
        Ok(())
    })?;
    Ok(Json(article))
}

pub async fn delete_article(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<StatusCode> {
    let articles = &app.store().articles;
    let article = articles
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("article {id}")))?;
    app.policies().articles.authorize_delete(&user, &article)?;
    articles.remove(id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn latest_feed(State(app): State<AppState>) -> impl IntoResponse {
    let mut latest = newest_first(&app);
    latest.truncate(feed::FEED_LEN);
    let body = feed::render_rss(&app.cfg().server.public_url, &latest);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        body,
    )
}
