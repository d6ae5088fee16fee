use actix_web::web;

mod cancel_lesson;
mod record_attendance;
pub mod sync_lessons;

use cancel_lesson::cancel_lesson_controller;
use record_attendance::record_attendance_controller;
use sync_lessons::sync_lessons_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/schools/{school_id}/lessons/sync",
        web::post().to(sync_lessons_controller),
    );

    cfg.route(
        "/lessons/{lesson_id}/attendance",
        web::post().to(record_attendance_controller),
    );
    cfg.route(
        "/lessons/{lesson_id}/cancel",
        web::post().to(cancel_lesson_controller),
    );
}
