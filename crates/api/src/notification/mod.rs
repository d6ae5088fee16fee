use actix_web::web;

mod board;
pub mod evaluate_notifications;
mod send_notification;

use board::{
    clear_dismissals_controller, dismiss_all_notifications_controller,
    dismiss_notification_controller, get_due_notifications_controller,
};
use evaluate_notifications::evaluate_notifications_controller;
use send_notification::send_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications",
        web::get().to(get_due_notifications_controller),
    );
    cfg.route(
        "/notifications/evaluate",
        web::post().to(evaluate_notifications_controller),
    );
    cfg.route(
        "/notifications/dismiss-all",
        web::post().to(dismiss_all_notifications_controller),
    );
    cfg.route(
        "/notifications/dismissals",
        web::delete().to(clear_dismissals_controller),
    );
    cfg.route(
        "/notifications/{key}/dismiss",
        web::post().to(dismiss_notification_controller),
    );
    cfg.route(
        "/notifications/{key}/send",
        web::post().to(send_notification_controller),
    );
}
