use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::monitor::run_poll_cycle;

/// Elapsed time between cycles beyond which the loop reports itself delayed.
fn delay_threshold_secs(check_interval: u64) -> i64 {
    i64::try_from(check_interval.saturating_mul(2)).unwrap_or(i64::MAX)
}

pub(super) fn start_monitor_job(
    app_context: AppContext,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous_tick = None;

        loop {
            if *stop.borrow() {
                break;
            }

            let check_interval = app_context.config.read().await.check_interval;
            let now = Utc::now();

            if let Some(previous) = previous_tick {
                let elapsed_secs = now.signed_duration_since(previous).num_seconds().max(0);
                let threshold_secs = delay_threshold_secs(check_interval);
                if elapsed_secs > threshold_secs {
                    log::warn!(
                        "monitor_loop_delayed elapsed_secs={} threshold_secs={}",
                        elapsed_secs,
                        threshold_secs
                    );
                }
            }

            previous_tick = Some(now);

            let channel = app_context.alert_channel().await;
            let _ = run_poll_cycle(&app_context, &channel).await;

            let sleep_duration = Duration::from_secs(check_interval);
            tokio::select! {
                _ = sleep(sleep_duration) => {}
                _ = app_context.runtime_update_notify.notified() => {
                    log::info!(
                        "check_interval_change_interrupt_applied previous_sleep_secs={}",
                        check_interval
                    );
                }
                changed = stop.changed() => {
                    if changed.is_err() {
                        log::warn!("monitor stop signal dropped; stopping poll loop");
                        break;
                    }
                }
            }
        }

        log::info!("monitor_job_stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::watch;

    use crate::app_context::AppContext;
    use crate::config::Config;
    use crate::monitor::{DeviceScript, DeviceStatus, ScriptedConnector};

    use super::{delay_threshold_secs, start_monitor_job};

    fn quiet_config() -> Config {
        Config {
            check_interval: 3600,
            enable_telegram_alerts: false,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn stop_signal_ends_loop_between_cycles() {
        let connector = Arc::new(ScriptedConnector::new(vec![DeviceScript::Respond(Ok(
            "1.0".to_string(),
        ))]));
        let app = AppContext::new(quiet_config(), "unused.json", connector.clone())
            .expect("context should build");
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = start_monitor_job(app.clone(), stop_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        stop_tx.send(true).expect("loop should still be listening");

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop promptly")
            .expect("loop should not panic");

        assert_eq!(connector.closed_links(), 1);
        assert_eq!(app.device_state.lock().await.status(), DeviceStatus::Online);
    }

    #[tokio::test]
    async fn config_change_wakes_loop_for_next_cycle() {
        let connector = Arc::new(ScriptedConnector::new(vec![
            DeviceScript::Respond(Ok("1.0".to_string())),
            DeviceScript::Refuse("port busy".to_string()),
        ]));
        let app = AppContext::new(quiet_config(), "unused.json", connector.clone())
            .expect("context should build");
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = start_monitor_job(app.clone(), stop_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.apply_config(quiet_config())
            .await
            .expect("config should apply");
        tokio::time::sleep(Duration::from_millis(100)).await;

        stop_tx.send(true).expect("loop should still be listening");
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop promptly")
            .expect("loop should not panic");

        assert_eq!(app.device_state.lock().await.status(), DeviceStatus::Offline);
    }

    #[test]
    fn delay_threshold_saturates_for_huge_intervals() {
        assert_eq!(delay_threshold_secs(5), 10);
        assert_eq!(delay_threshold_secs(u64::MAX), i64::MAX);
        assert_eq!(delay_threshold_secs(i64::MAX as u64), i64::MAX);
    }

    #[tokio::test]
    async fn oversized_interval_does_not_kill_loop() {
        let connector = Arc::new(ScriptedConnector::new(vec![
            DeviceScript::Respond(Ok("1.0".to_string())),
            DeviceScript::Respond(Ok("2.0".to_string())),
        ]));
        let app = AppContext::new(quiet_config(), "unused.json", connector.clone())
            .expect("context should build");
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = start_monitor_job(app.clone(), stop_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.apply_config(Config {
            check_interval: u64::MAX,
            ..quiet_config()
        })
        .await
        .expect("config should apply");
        tokio::time::sleep(Duration::from_millis(100)).await;

        stop_tx.send(true).expect("loop should still be listening");
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop promptly")
            .expect("loop should not panic");

        assert_eq!(connector.closed_links(), 2);
    }
}
