use actix_web::rt::time::sleep;
use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

/// Runs a task once no newer task has been scheduled for `delay`.
/// Every call to `schedule` supersedes the previously scheduled task.
#[derive(Debug, Clone)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = self.generation.clone();
        let delay = self.delay;
        actix_web::rt::spawn(async move {
            sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                task.await;
            }
        });
    }

    /// Drops the scheduled task, if any
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[actix_web::test]
    async fn only_the_last_task_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let runs = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let runs = runs.clone();
            debouncer.schedule(async move {
                runs.lock().unwrap().push(i);
            });
        }
        sleep(Duration::from_millis(100)).await;
        assert_eq!(*runs.lock().unwrap(), vec![2]);
    }

    #[actix_web::test]
    async fn cancel_drops_the_pending_task() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let runs = Arc::new(Mutex::new(0));

        let counter = runs.clone();
        debouncer.schedule(async move {
            *counter.lock().unwrap() += 1;
        });
        debouncer.cancel();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(*runs.lock().unwrap(), 0);
    }
}
