use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

pub async fn serve_root() -> Response {
    serve_asset("index.html")
}

pub async fn serve_path(Path(path): Path<String>) -> Response {
    let requested = path.trim_start_matches('/');

    if requested.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let target = if requested.is_empty() {
        "index.html"
    } else {
        requested
    };
    serve_asset(target)
}

fn serve_asset(path: &str) -> Response {
    match response_for_file(path) {
        Some(response) => response,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn response_for_file(path: &str) -> Option<Response> {
    let file = StaticAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let mut response = Response::new(Body::from(file.data.into_owned()));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref()).ok()?,
    );
    Some(response)
}
