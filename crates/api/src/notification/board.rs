use crate::error::SchedulerError;
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::{
    clear_dismissals, dismiss_all_notifications, dismiss_notification, get_due_notifications,
};
use tutorhub_scheduler_domain::TargetRole;
use tutorhub_scheduler_infra::SchedulerContext;

fn parse_role(role: Option<&str>) -> Result<Option<TargetRole>, SchedulerError> {
    match role {
        None => Ok(None),
        Some(role) => TargetRole::parse(role).map(Some).ok_or_else(|| {
            SchedulerError::BadClientData(format!(
                "Unknown role: {}, expected one of student, teacher, manager or admin",
                role
            ))
        }),
    }
}

/// Lists the visible due notifications, optionally only those targeting `role`
pub async fn get_due_notifications_controller(
    query: web::Query<get_due_notifications::QueryParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let role = parse_role(query.role.as_deref())?;
    let visible = ctx.notifications.lock().unwrap().visible(role);

    Ok(HttpResponse::Ok().json(get_due_notifications::APIResponse::new(visible)))
}

/// Hides the notification until the dismissals are cleared
pub async fn dismiss_notification_controller(
    path: web::Path<dismiss_notification::PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> HttpResponse {
    let dismissed = ctx.notifications.lock().unwrap().dismiss(&path.key);

    HttpResponse::Ok().json(dismiss_notification::APIResponse { dismissed })
}

pub async fn dismiss_all_notifications_controller(ctx: web::Data<SchedulerContext>) -> HttpResponse {
    let dismissed_count = ctx.notifications.lock().unwrap().dismiss_all();

    HttpResponse::Ok().json(dismiss_all_notifications::APIResponse { dismissed_count })
}

/// Dismissed notifications that are still due reappear on the next evaluation
pub async fn clear_dismissals_controller(ctx: web::Data<SchedulerContext>) -> HttpResponse {
    ctx.notifications.lock().unwrap().clear_dismissals();

    HttpResponse::Ok().json(clear_dismissals::APIResponse {
        message: "Dismissals cleared".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles() {
        assert_eq!(parse_role(None).unwrap(), None);
        assert_eq!(parse_role(Some("admin")).unwrap(), Some(TargetRole::Admin));
        assert!(parse_role(Some("parent")).is_err());
    }
}
