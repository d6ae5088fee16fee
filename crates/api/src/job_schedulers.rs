use crate::{
    notification::evaluate_notifications::EvaluateNotificationsUseCase, shared::usecase::execute,
};
use actix_web::rt::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use std::time::Duration;
use tracing::info;
use tutorhub_scheduler_infra::SchedulerContext;

/// Seconds until the next multiple of `interval_secs` since the epoch
pub fn get_start_delay(now_ts: usize, interval_secs: usize) -> usize {
    let interval_secs = interval_secs.max(1);
    interval_secs - (now_ts / 1000) % interval_secs
}

/// A periodic job. Stopping it prevents further ticks, a running tick is
/// dropped at its next await point.
pub struct JobHandle {
    handle: JoinHandle<()>,
}

impl JobHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

async fn evaluate_notifications_tick(ctx: &SchedulerContext) {
    // Errors are logged by the usecase executor
    let _ = execute(EvaluateNotificationsUseCase, ctx).await;
}

/// Evaluates once right away and then on every multiple of the
/// configured poll interval
pub fn start_notification_evaluator(ctx: SchedulerContext) -> JobHandle {
    let handle = actix_web::rt::spawn(async move {
        let period = ctx.config.notification_poll_interval_secs.max(1);
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now.max(0) as usize, period as usize);
        info!(
            "Evaluating notifications every {} seconds, next run in {} seconds",
            period, secs_to_next_run
        );

        evaluate_notifications_tick(&ctx).await;
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
        let mut ticks = interval_at(start, Duration::from_secs(period));
        loop {
            ticks.tick().await;
            evaluate_notifications_tick(&ctx).await;
        }
    });

    JobHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime, setup};
    use actix_web::rt::time::sleep;
    use tutorhub_scheduler_domain::{NotificationTemplate, SchoolKind, TriggerType};

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 60), 10);
        assert_eq!(get_start_delay(50 * 1000, 30), 10);
        assert_eq!(get_start_delay(60 * 1000, 30), 30);
        assert_eq!(get_start_delay(59 * 1000, 30), 1);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
    }

    #[actix_web::test]
    async fn evaluator_fills_the_board_until_stopped() {
        let mut fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        fixture.set_now(datetime(date(2025, 3, 3), "10:05"));
        let lesson = fixture.lesson(date(2025, 3, 3), "10:00", "11:00");
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson])
            .await
            .unwrap();
        let template = NotificationTemplate::new(
            &fixture.school.id,
            "Started",
            TriggerType::LessonStart,
            "{class_name} started",
        );
        fixture
            .ctx
            .repos
            .notification_templates
            .insert(&template)
            .await
            .unwrap();

        let job = start_notification_evaluator(fixture.ctx.clone());
        sleep(Duration::from_millis(50)).await;
        job.stop();
        assert_eq!(fixture.ctx.notifications.lock().unwrap().len(), 1);
    }
}
