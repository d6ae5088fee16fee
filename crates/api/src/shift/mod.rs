use actix_web::web;

mod apply_shift;
mod preview_shift;
mod session;

use apply_shift::{cancel_shift_controller, confirm_shift_controller};
use preview_shift::{get_shift_preview_controller, preview_shift_controller};
pub use session::ShiftSessions;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/schools/{school_id}/shift/preview",
        web::post().to(preview_shift_controller),
    );
    cfg.route(
        "/schools/{school_id}/shift/preview",
        web::get().to(get_shift_preview_controller),
    );
    cfg.route(
        "/schools/{school_id}/shift/confirm",
        web::post().to(confirm_shift_controller),
    );
    cfg.route(
        "/schools/{school_id}/shift",
        web::delete().to(cancel_shift_controller),
    );
}
