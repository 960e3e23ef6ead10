// src/api/handlers/assets.rs
use actix_web::{HttpRequest, HttpResponse};
use rust_embed::RustEmbed;

/// The web form and anything it references, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

fn asset_path(request_path: &str) -> &str {
    match request_path.trim_start_matches('/') {
        "" => "index.html",
        path => path,
    }
}

pub async fn static_file_handler(req: HttpRequest) -> HttpResponse {
    let path = asset_path(req.path());

    let Some(asset) = StaticAssets::get(path) else {
        return HttpResponse::NotFound().body("404 Not Found");
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .body(asset.data.into_owned())
}
