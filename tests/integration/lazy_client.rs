//! Memoized client construction.

use crate::common::{CountingFactory, FakeOktaApi, test_config};
use futures::future::join_all;
use okta_mcp_server::client::LazyClient;
use okta_mcp_server::config::OktaConfig;
use okta_mcp_server::error::{ConfigResult, ConfigurationError, ErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_sequential_calls_share_one_handle() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let source = move || -> ConfigResult<OktaConfig> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(test_config())
    };

    let factory = CountingFactory::default();
    let lazy = LazyClient::new(source, factory.clone());
    assert!(!lazy.is_initialized());

    let first = assert_ok!(lazy.get_client().await);
    let second = assert_ok!(lazy.get_client().await);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(factory.build_count(), 1);
    assert!(lazy.is_initialized());
}

#[tokio::test]
async fn test_concurrent_first_use_builds_once() {
    let factory = CountingFactory::new(FakeOktaApi::default())
        .with_delay(Duration::from_millis(20));
    let lazy = LazyClient::new(test_config(), factory.clone());

    let handles = join_all((0..16).map(|_| lazy.get_client())).await;

    assert_eq!(factory.build_count(), 1);
    let handles: Vec<_> = handles.into_iter().map(|h| h.unwrap()).collect();
    assert_eq!(handles.len(), 16);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
}

#[tokio::test]
async fn test_concurrent_first_use_across_tasks() {
    let factory = CountingFactory::default().with_delay(Duration::from_millis(20));
    let lazy = Arc::new(LazyClient::new(test_config(), factory.clone()));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let lazy = Arc::clone(&lazy);
            tokio::spawn(async move { lazy.get_client().await.unwrap() })
        })
        .collect();

    let handles: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(factory.build_count(), 1);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let configured = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&configured);
    let source = move || -> ConfigResult<OktaConfig> {
        if flag.load(Ordering::SeqCst) {
            Ok(test_config())
        } else {
            Err(ConfigurationError::MissingRequired {
                variables: vec!["OKTA_API_TOKEN"],
            })
        }
    };

    let factory = CountingFactory::default();
    let lazy = LazyClient::new(source, factory.clone());

    let err = assert_err!(lazy.get_client().await);
    assert_eq!(err.kind(), ErrorKind::MissingRequired);
    assert!(!lazy.is_initialized());
    assert_eq!(factory.build_count(), 0);

    // Operator fixes the environment; no restart needed
    configured.store(true, Ordering::SeqCst);
    assert_ok!(lazy.get_client().await);
    assert_eq!(factory.build_count(), 1);
}
