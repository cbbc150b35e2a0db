//! Host side of error-banner expiry.

use todo_core::{BannerTimer, ERROR_BANNER_TTL};
use tokio::{task::JoinHandle, time::Instant};

/// Hand `timer` to `deliver` once `ERROR_BANNER_TTL` has passed since the
/// call.
///
/// Nothing is cancelled here; a timer for a superseded message is still
/// delivered and the synchronizer ignores it.
pub fn schedule_expiry<F>(timer: BannerTimer, deliver: F) -> JoinHandle<()>
where
    F: FnOnce(BannerTimer) + Send + 'static,
{
    let deadline = Instant::now() + ERROR_BANNER_TTL;
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        deliver(timer);
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use todo_core::{ErrorMessage, ListSynchronizer, TodoClient, UserId};
    use tokio::sync::mpsc;

    use super::*;

    fn failing_add() -> (ListSynchronizer, BannerTimer) {
        let client = TodoClient::new("http://api.test", UserId::new(1).unwrap());
        let mut sync = ListSynchronizer::new(client);
        match sync.add("  ").as_slice() {
            [todo_core::Effect::ScheduleErrorExpiry(timer)] => {
                let timer = *timer;
                (sync, timer)
            }
            other => panic!("expected an expiry, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_three_seconds() {
        let (mut sync, timer) = failing_add();
        let (tx, mut rx) = mpsc::unbounded_channel();
        schedule_expiry(timer, move |timer| {
            let _ = tx.send(timer);
        });

        tokio::time::advance(Duration::from_millis(2999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert_eq!(sync.error(), Some(ErrorMessage::EmptyTitle));

        tokio::time::advance(Duration::from_millis(1)).await;
        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, timer);
        sync.expire_error(fired);
        assert_eq!(sync.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_error_survives_older_timer() {
        let (mut sync, first) = failing_add();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first_tx = tx.clone();
        schedule_expiry(first, move |timer| {
            let _ = first_tx.send(timer);
        });

        tokio::time::advance(Duration::from_millis(2000)).await;
        let second = match sync.add("").as_slice() {
            [todo_core::Effect::ScheduleErrorExpiry(timer)] => *timer,
            other => panic!("expected an expiry, got {other:?}"),
        };
        schedule_expiry(second, move |timer| {
            let _ = tx.send(timer);
        });

        tokio::time::advance(Duration::from_millis(1000)).await;
        sync.expire_error(rx.recv().await.unwrap());
        assert_eq!(sync.error(), Some(ErrorMessage::EmptyTitle));

        tokio::time::advance(Duration::from_millis(2000)).await;
        sync.expire_error(rx.recv().await.unwrap());
        assert_eq!(sync.error(), None);
    }
}
