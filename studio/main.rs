/// ViewWear Studio
///
/// A browser-based virtual garment try-on application served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Flow:
///   1. Photo    — upload, drag-drop, or capture a person photo
///   2. Garments — pick at most one garment per category, or add your own
///   3. Result   — the external image-edit provider composes the try-on
///
/// Provider configuration (environment):
///   VIEWWEAR_PROVIDER_URL    — image-edit endpoint (required for try-on)
///   VIEWWEAR_PROVIDER_TOKEN  — bearer token, optional
///   VIEWWEAR_PROVIDER_MODEL  — model id, default Qwen/Qwen-Image-Edit

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::Arc;
use tiny_http::Server;

use state::StudioState;

fn main() {
    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    let state = StudioState::from_env();

    // Upload directories must exist before the first multipart lands.
    let _ = std::fs::create_dir_all("public/garments");
    let _ = std::fs::create_dir_all("public/uploads");

    // An empty catalog gets the built-in garments.
    if let Err(e) = state.store.seed_defaults() {
        eprintln!("warning: could not seed the garment catalog: {}", e);
    }

    println!("╔══════════════════════════════════════════════╗");
    println!("║          ViewWear Studio                     ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Steps: Photo > Garments > Result            ║");
    println!("╚══════════════════════════════════════════════╝");
    if state.provider.is_none() {
        println!("note: VIEWWEAR_PROVIDER_URL is not set — try-on calls will be rejected.");
    }

    let shared = Arc::new(state);

    // Each request is dispatched on its own thread so a long provider call
    // does not stall page loads and catalog requests.
    for request in server.incoming_requests() {
        let state_clone = shared.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
