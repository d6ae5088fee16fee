use actix_web::web;

mod create_assignment;
mod delete_assignment;
mod sync;
mod update_assignment;

use create_assignment::create_assignment_controller;
use delete_assignment::delete_assignment_controller;
use update_assignment::update_assignment_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/assignments", web::post().to(create_assignment_controller));
    cfg.route(
        "/assignments/{assignment_id}",
        web::put().to(update_assignment_controller),
    );
    cfg.route(
        "/assignments/{assignment_id}",
        web::delete().to(delete_assignment_controller),
    );
}
