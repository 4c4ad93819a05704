//! Read-only JSON service over posts and projects
//!
//! Each request re-reads the content directories on the blocking pool.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::frontmatter::split_tag_list;
use crate::content::query::{self, ALL_TAGS};
use crate::content::{ContentError, ContentLoader, MarkdownRenderer, Post, Project};
use crate::Folio;

/// Server state
struct ServerState {
    loader: ContentLoader,
    renderer: MarkdownRenderer,
}

/// Errors surfaced to HTTP clients. Details stay in the logs.
#[derive(Debug)]
enum ApiError {
    NotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::InvalidSlug(slug) => {
                tracing::debug!("Rejected slug {:?}", slug);
                ApiError::NotFound
            }
            other => {
                tracing::error!("Content request failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!("Rendering failed: {:#}", e);
        ApiError::Internal
    }
}

#[derive(Debug, Deserialize)]
struct PostsQuery {
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectsQuery {
    /// Comma-separated; every tag must match
    tags: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostList {
    posts: Vec<Post>,
    tags: Vec<String>,
    selected: String,
}

#[derive(Debug, Serialize)]
struct ProjectList {
    projects: Vec<Project>,
    tags: Vec<String>,
    selected: Vec<String>,
}

/// A full record plus its rendered body
#[derive(Debug, Serialize)]
struct Detail<T> {
    #[serde(flatten)]
    record: T,
    html: String,
}

/// Build the application router
pub fn router(folio: &Folio) -> Router {
    let state = Arc::new(ServerState {
        loader: folio.loader(),
        renderer: MarkdownRenderer::from_config(&folio.config.highlight),
    });

    let app = Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(show_post))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/featured", get(featured_projects))
        .route("/api/projects/:slug", get(show_project))
        .with_state(state);

    let app = if folio.static_dir.is_dir() {
        tracing::debug!("Serving static files from {:?}", folio.static_dir);
        app.fallback_service(ServeDir::new(&folio.static_dir))
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving {:?} and {:?}", folio.posts_dir, folio.projects_dir);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a filesystem-bound job on the blocking pool
async fn blocking<T, F>(state: &Arc<ServerState>, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ServerState) -> Result<T, ApiError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || job(&state))
        .await
        .map_err(|e| {
            tracing::error!("Blocking task failed: {}", e);
            ApiError::Internal
        })?
}

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<PostList>, ApiError> {
    let selected = params
        .tag
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| ALL_TAGS.to_string());

    let list = blocking(&state, move |state| {
        let posts = state.loader.load_posts()?;
        let tags = query::post_tags(&posts);
        let posts = query::filter_by_tag(&posts, &selected)
            .into_iter()
            .cloned()
            .collect();
        Ok(PostList {
            posts,
            tags,
            selected,
        })
    })
    .await?;

    Ok(Json(list))
}

async fn show_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Detail<Post>>, ApiError> {
    let detail = blocking(&state, move |state| {
        let post = state.loader.get_post(&slug)?.ok_or(ApiError::NotFound)?;
        let html = state
            .renderer
            .render(post.content.as_deref().unwrap_or_default())?;
        Ok(Detail { record: post, html })
    })
    .await?;

    Ok(Json(detail))
}

async fn list_projects(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ProjectsQuery>,
) -> Result<Json<ProjectList>, ApiError> {
    let selected = params
        .tags
        .as_deref()
        .map(split_tag_list)
        .unwrap_or_default();

    let list = blocking(&state, move |state| {
        let projects = state.loader.load_projects()?;
        let tags = query::project_tags(&projects);
        let projects = query::filter_by_tags(&projects, &selected)
            .into_iter()
            .cloned()
            .collect();
        Ok(ProjectList {
            projects,
            tags,
            selected,
        })
    })
    .await?;

    Ok(Json(list))
}

async fn featured_projects(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects: Vec<Project> = blocking(&state, |state| {
        let projects = state.loader.load_projects()?;
        Ok(query::featured(&projects).into_iter().cloned().collect())
    })
    .await?;

    Ok(Json(projects))
}

async fn show_project(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Detail<Project>>, ApiError> {
    let detail = blocking(&state, move |state| {
        let project = state.loader.get_project(&slug)?.ok_or(ApiError::NotFound)?;
        let html = state.renderer.render(&project.content)?;
        Ok(Detail {
            record: project,
            html,
        })
    })
    .await?;

    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site() -> (TempDir, Folio) {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        fs::create_dir_all(&folio.posts_dir).unwrap();
        fs::create_dir_all(&folio.projects_dir).unwrap();

        fs::write(
            folio.posts_dir.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\ntags: [life]\n---\nHello **world**\n",
        )
        .unwrap();
        fs::write(
            folio.posts_dir.join("second.md"),
            "---\ntitle: Second\ndate: 2024-06-01\ncategory: tech\n---\nMore\n",
        )
        .unwrap();
        fs::write(
            folio.projects_dir.join("rover.md"),
            "---\ntitle: Rover\ndate: 2023-06-15\ntags: [ai, robotics]\nfeatured: true\n---\n# Rover\n",
        )
        .unwrap();
        fs::write(
            folio.projects_dir.join("vision.md"),
            "---\ntitle: Vision\ndate: 2024-02-01\ntags: [ai]\n---\nSee\n",
        )
        .unwrap();

        (tmp, folio)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_posts() {
        let (_tmp, folio) = site();

        let (status, body) = get_json(router(&folio), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tags"], serde_json::json!(["All", "life", "tech"]));
        assert_eq!(body["selected"], "All");
        assert_eq!(body["posts"][0]["slug"], "second");
        assert_eq!(body["posts"][1]["slug"], "first");
        assert!(body["posts"][0].get("content").is_none());

        let (_, body) = get_json(router(&folio), "/api/posts?tag=life").await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 1);
        assert_eq!(body["posts"][0]["title"], "First");
    }

    #[tokio::test]
    async fn test_show_post() {
        let (_tmp, folio) = site();

        let (status, body) = get_json(router(&folio), "/api/posts/first").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Hello **world**\n");
        assert!(body["html"].as_str().unwrap().contains("<strong>world</strong>"));

        let (status, body) = get_json(router(&folio), "/api/posts/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");

        let (status, _) = get_json(router(&folio), "/api/posts/..").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_projects_with_and_filter() {
        let (_tmp, folio) = site();

        let (_, body) = get_json(router(&folio), "/api/projects").await;
        assert_eq!(body["tags"], serde_json::json!(["ai", "robotics"]));
        assert_eq!(body["projects"][0]["slug"], "vision");

        let (_, body) = get_json(router(&folio), "/api/projects?tags=ai,robotics").await;
        let projects = body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["slug"], "rover");
        assert_eq!(body["selected"], serde_json::json!(["ai", "robotics"]));
    }

    #[tokio::test]
    async fn test_featured_and_show_project() {
        let (_tmp, folio) = site();

        let (_, body) = get_json(router(&folio), "/api/projects/featured").await;
        let featured = body.as_array().unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0]["slug"], "rover");

        let (status, body) = get_json(router(&folio), "/api/projects/vision").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Vision");
        assert_eq!(body["html"], "<p>See</p>\n");
    }

    #[tokio::test]
    async fn test_missing_directories_are_empty() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let (status, body) = get_json(router(&folio), "/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["projects"].as_array().unwrap().is_empty());
    }
}
