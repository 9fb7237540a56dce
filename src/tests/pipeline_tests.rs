#[cfg(test)]
mod tests {
    use crate::db::alert;
    use crate::explorer::FetchStrategy;
    use crate::models::{ClassifiedAlert, Label, Outcome};
    use crate::pipeline::{AlertProcessor, Poller};
    use crate::state::AppState;
    use crate::tests::{
        memory_pool, test_config, tx, RecordingNotifier, StubSource, EXCHANGE_ADDRESS, SOURCE_ADDRESS,
    };
    use std::sync::Arc;

    const NOW: i64 = 1000;
    const DEAD: &str = "0xdead";
    const BEEF: &str = "0xbeef";

    fn alert_for(hash: &str) -> ClassifiedAlert {
        ClassifiedAlert {
            transaction: tx(hash, SOURCE_ADDRESS, EXCHANGE_ADDRESS, 2.0, 800),
            labels: vec![Label::KnownReceiver],
        }
    }

    /// State whose watch-list file holds `wallets` and whose exchange list
    /// holds the test exchange.
    async fn state_with(wallets: &[&str], strategy: FetchStrategy) -> Arc<AppState> {
        let mut config = test_config();
        config.fetch_strategy = strategy;
        std::fs::write(&config.wallet_file, wallets.join("\n")).unwrap();
        std::fs::write(&config.exchange_file, "0xexchange\n").unwrap();
        Arc::new(AppState::new(config, memory_pool().await))
    }

    #[tokio::test]
    async fn test_process_twice_inserts_once() {
        let pool = memory_pool().await;
        let notifier = RecordingNotifier::default();
        let processor = AlertProcessor::new(pool.clone(), notifier.clone());
        let a = alert_for("0xa");

        assert_eq!(processor.process(&a).await.unwrap(), Outcome::Inserted);
        assert_eq!(processor.process(&a).await.unwrap(), Outcome::DuplicateSkipped);

        assert_eq!(notifier.sent(), vec!["0xa".to_string()]);
        assert_eq!(alert::count_alerts(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_row() {
        let pool = memory_pool().await;
        let notifier = RecordingNotifier::failing();
        let processor = AlertProcessor::new(pool.clone(), notifier.clone());

        assert_eq!(processor.process(&alert_for("0xa")).await.unwrap(), Outcome::Inserted);
        assert!(alert::alert_exists(&pool, "0xa").await.unwrap());

        // No retry on the next pass
        assert_eq!(processor.process(&alert_for("0xa")).await.unwrap(), Outcome::DuplicateSkipped);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_exchange_scenario_end_to_end() {
        let state = state_with(&[SOURCE_ADDRESS], FetchStrategy::FullHistory).await;
        let source = StubSource::new().with_history(
            SOURCE_ADDRESS,
            vec![
                tx("0xa", SOURCE_ADDRESS, EXCHANGE_ADDRESS, 2.0, 800),
                tx("0xb", SOURCE_ADDRESS, EXCHANGE_ADDRESS, 0.5, 799),
                tx("0xc", SOURCE_ADDRESS, EXCHANGE_ADDRESS, 5.0, 100),
            ],
        );
        let notifier = RecordingNotifier::default();
        let poller = Poller::new(state.clone(), source, notifier.clone());

        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.fetched, 3);
        assert_eq!(stats.inserted, 1);
        assert_eq!(notifier.sent(), vec!["0xa".to_string()]);

        let rows = alert::get_all_alerts(&state.db_pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tx_hash, "0xa");
        assert_eq!(rows[0].labels, "known-receiver");
    }

    #[tokio::test]
    async fn test_failed_address_does_not_block_others() {
        let state = state_with(&[DEAD, BEEF], FetchStrategy::LatestOnly).await;
        let source = StubSource::new()
            .failing(DEAD)
            .with_history(BEEF, vec![tx("0xbeef1", BEEF, "0xsomewhere", 3.0, NOW - 20)]);
        let notifier = RecordingNotifier::default();
        let poller = Poller::new(state.clone(), source, notifier.clone());

        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.addresses, 2);
        assert_eq!(stats.inserted, 1);
        assert_eq!(notifier.sent(), vec!["0xbeef1".to_string()]);
        assert!(alert::alert_exists(&state.db_pool, "0xbeef1").await.unwrap());
        assert_eq!(state.cache.get(DEAD).await, None);
    }

    #[tokio::test]
    async fn test_repeated_polling_notifies_once() {
        let state = state_with(&[SOURCE_ADDRESS], FetchStrategy::FullHistory).await;
        let source = StubSource::new().with_history(
            SOURCE_ADDRESS,
            vec![
                tx("0x2", SOURCE_ADDRESS, "0xr", 4.0, NOW - 5),
                tx("0x1", SOURCE_ADDRESS, "0xr", 4.0, NOW - 50),
            ],
        );
        let notifier = RecordingNotifier::default();
        let poller = Poller::new(state.clone(), source.clone(), notifier.clone());

        let first = poller.run_iteration(NOW).await;
        assert_eq!(first.inserted, 2);

        // The cache short-circuits the unchanged address
        let second = poller.run_iteration(NOW + 10).await;
        assert_eq!(second.fetched, 0);
        assert_eq!(second.inserted, 0);

        // Without the cache the store still refuses the duplicates
        state.cache.invalidate(SOURCE_ADDRESS).await;
        let third = poller.run_iteration(NOW + 20).await;
        assert_eq!(third.inserted, 0);
        assert_eq!(third.duplicates, 2);

        // Oldest first
        assert_eq!(notifier.sent(), vec!["0x1".to_string(), "0x2".to_string()]);
    }

    #[tokio::test]
    async fn test_restart_does_not_renotify() {
        let pool = memory_pool().await;
        let mut config = test_config();
        config.fetch_strategy = FetchStrategy::LatestOnly;
        std::fs::write(&config.wallet_file, BEEF).unwrap();
        let history = vec![tx("0xbeef1", BEEF, "0xr", 3.0, NOW - 20)];

        let first_run = Arc::new(AppState::new(config.clone(), pool.clone()));
        let notifier = RecordingNotifier::default();
        Poller::new(first_run, StubSource::new().with_history(BEEF, history.clone()), notifier.clone())
            .run_iteration(NOW)
            .await;

        // Fresh state means an empty last-seen cache
        let second_run = Arc::new(AppState::new(config, pool.clone()));
        let stats = Poller::new(second_run, StubSource::new().with_history(BEEF, history), notifier.clone())
            .run_iteration(NOW + 5)
            .await;

        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(alert::count_alerts(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_latest_only_backfills_burst() {
        let state = state_with(&[BEEF], FetchStrategy::LatestOnly).await;
        state.cache.set(BEEF, "0xold").await;
        let source = StubSource::new().with_history(
            BEEF,
            vec![
                tx("0xnew3", BEEF, "0xr", 2.0, NOW - 1),
                tx("0xnew2", BEEF, "0xr", 2.0, NOW - 2),
                tx("0xnew1", BEEF, "0xr", 2.0, NOW - 3),
                tx("0xold", BEEF, "0xr", 2.0, NOW - 4),
                tx("0xolder", BEEF, "0xr", 2.0, NOW - 5),
            ],
        );
        let notifier = RecordingNotifier::default();
        let poller = Poller::new(state.clone(), source.clone(), notifier.clone());

        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.inserted, 3);
        assert_eq!(
            notifier.sent(),
            vec!["0xnew1".to_string(), "0xnew2".to_string(), "0xnew3".to_string()]
        );
        assert_eq!(state.cache.get(BEEF).await.as_deref(), Some("0xnew3"));

        // Latest probe plus one backfill window
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_backfill_retried_next_pass() {
        let state = state_with(&[BEEF], FetchStrategy::LatestOnly).await;
        state.cache.set(BEEF, "0xold").await;
        let source = StubSource::new()
            .with_history(
                BEEF,
                vec![
                    tx("0xnew2", BEEF, "0xr", 2.0, NOW - 1),
                    tx("0xnew1", BEEF, "0xr", 2.0, NOW - 2),
                    tx("0xold", BEEF, "0xr", 2.0, NOW - 3),
                ],
            )
            .failing_windows(1);
        let notifier = RecordingNotifier::default();
        let poller = Poller::new(state.clone(), source, notifier.clone());

        // Window request fails: only the newest row goes out, cache untouched
        let first = poller.run_iteration(NOW).await;
        assert_eq!(first.inserted, 1);
        assert_eq!(notifier.sent(), vec!["0xnew2".to_string()]);
        assert_eq!(state.cache.get(BEEF).await.as_deref(), Some("0xold"));

        // Explorer recovered: the rest of the burst is picked up
        let second = poller.run_iteration(NOW).await;
        assert_eq!(second.inserted, 1);
        assert_eq!(second.duplicates, 1);
        assert_eq!(notifier.sent(), vec!["0xnew2".to_string(), "0xnew1".to_string()]);
        assert_eq!(state.cache.get(BEEF).await.as_deref(), Some("0xnew2"));
    }

    #[tokio::test]
    async fn test_lists_reloaded_each_iteration() {
        let state = state_with(&[SOURCE_ADDRESS], FetchStrategy::FullHistory).await;
        let source = StubSource::new()
            .with_history(SOURCE_ADDRESS, vec![tx("0x1", SOURCE_ADDRESS, "0xr", 2.0, NOW)]);
        let poller = Poller::new(state.clone(), source.clone(), RecordingNotifier::default());

        // Flagged file missing: alert still raised, unlabelled
        poller.run_iteration(NOW).await;

        std::fs::write(
            &state.config.flagged_file,
            format!(r#"{{"exploit": {{"eth": ["{}"]}}, "note": "ignored"}}"#, SOURCE_ADDRESS.to_lowercase()),
        )
        .unwrap();
        source.push(SOURCE_ADDRESS, tx("0x2", SOURCE_ADDRESS, "0xr", 2.0, NOW));
        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.fetched, 1);
        assert_eq!(stats.inserted, 1);

        let rows = alert::get_all_alerts(&state.db_pool).await.unwrap();
        assert_eq!(rows[0].labels, "");
        assert_eq!(rows[1].labels, "flagged-sender");

        // Out-of-band edit to the watch-list
        std::fs::write(&state.config.wallet_file, format!("{}\n{}\n", SOURCE_ADDRESS, BEEF)).unwrap();
        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.addresses, 2);
        assert!(source.calls.lock().unwrap().iter().any(|(address, _)| address == BEEF));
    }

    #[tokio::test]
    async fn test_empty_watchlist_is_a_noop() {
        let state = state_with(&[], FetchStrategy::LatestOnly).await;
        let source = StubSource::new();
        let poller = Poller::new(state, source.clone(), RecordingNotifier::default());

        let stats = poller.run_iteration(NOW).await;
        assert_eq!(stats.addresses, 0);
        assert_eq!(source.call_count(), 0);
    }
}
