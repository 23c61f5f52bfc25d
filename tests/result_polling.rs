//! Result reads and poll schedules on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use vrf_range_client::config::{ContractsConfig, PollingConfig};
use vrf_range_client::vrf::{ResultReader, TransactionOrchestrator};
use vrf_range_client::Felt;

mod common;
use common::{CountingReader, FakeConnector};

fn tx() -> Felt {
    Felt::from_u128(0xfeed)
}

fn reader(chain: &Arc<CountingReader>) -> ResultReader<CountingReader> {
    let contracts = ContractsConfig::default();
    ResultReader::from_shared(chain.clone(), contracts.target_contract, &contracts.read_entrypoint)
}

fn ms(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|v| Duration::from_millis(*v)).collect()
}

#[tokio::test]
async fn test_all_zero_response_is_absent() {
    let chain = CountingReader::new(&["0", "0", "0", "0"]);
    assert_eq!(reader(&chain).fetch(Some(tx())).await.unwrap(), None);
    assert_eq!(chain.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_delay_reads_nothing() {
    let chain = CountingReader::new(&["0x5", "0x1", "0xa", "0x0"]);
    let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &ms(&[3000, 6000, 10000, 15000]));

    handle.cancel();
    assert!(updates.recv().await.is_none());

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(chain.calls(), 0);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_beats_elapsed_delay() {
    let chain = CountingReader::new(&["0x5", "0x1", "0xa", "0x0"]);
    for _ in 0..32 {
        let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &[Duration::ZERO; 4]);
        handle.cancel();
        assert!(updates.recv().await.is_none());
    }
    assert_eq!(chain.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels() {
    let chain = CountingReader::new(&["0x5", "0x1", "0xa", "0x0"]);
    let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &ms(&[100, 200]));

    drop(handle);
    assert!(updates.recv().await.is_none());
    assert_eq!(chain.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_remaining_polls() {
    let chain = CountingReader::new(&["0", "0", "0", "0"]);
    let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &ms(&[10, 1000, 2000]));

    let first = updates.recv().await.unwrap();
    assert_eq!(first.poll_index, 0);
    assert_eq!(first.transaction_hash, tx());
    assert!(first.result.unwrap().is_none());

    handle.cancel();
    assert!(updates.recv().await.is_none());
    assert_eq!(chain.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_read_completes_but_is_not_delivered() {
    let chain = CountingReader::with_latency(&["0x5", "0x1", "0xa", "0x0"], Duration::from_millis(100));
    let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &ms(&[10]));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(chain.calls(), 1);

    handle.cancel();
    assert!(updates.recv().await.is_none());
    handle.wait().await;
}

#[tokio::test(start_paused = true)]
async fn test_result_appears_on_later_poll() {
    let chain = CountingReader::new(&["0", "0", "0", "0"]);
    let (handle, mut updates) = reader(&chain).schedule_polls(tx(), &PollingConfig::default().delays());

    let first = updates.recv().await.unwrap();
    assert_eq!(first.delay, Duration::from_secs(3));
    assert!(first.result.unwrap().is_none());

    chain.set_response(&["0x4b0", "0x3e8", "0x514", "0x2a"]);
    let second = updates.recv().await.unwrap();
    assert_eq!(second.poll_index, 1);
    let result = second.result.unwrap().unwrap();
    assert_eq!((result.value, result.min, result.max), (1200, 1000, 1300));
    assert_eq!(result.generator, Some(Felt::from_u128(0x2a)));

    handle.cancel();
    assert!(updates.recv().await.is_none());
    assert_eq!(chain.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_poll_is_reported_not_fatal() {
    let chain = CountingReader::new(&["0x1"]);
    let (_handle, mut updates) = reader(&chain).schedule_polls(tx(), &ms(&[10, 20]));

    for _ in 0..2 {
        let update = updates.recv().await.unwrap();
        assert!(update.result.is_err());
    }
    assert!(updates.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_submit_then_poll() {
    let connector = FakeConnector::new(Felt::from_u128(0xca11), common::controller()).then_return(Ok(tx()));
    let mut orch = TransactionOrchestrator::new(
        connector,
        ContractsConfig::default(),
        Default::default(),
    );
    let hash = orch.execute(1, 100).await.transaction_hash().unwrap();

    let chain = CountingReader::new(&["0x2a", "0x1", "0x64", "0x0"]);
    let (handle, mut updates) = reader(&chain).schedule_polls(hash, &ms(&[3000]));
    let update = updates.recv().await.unwrap();
    assert_eq!(update.transaction_hash, tx());
    assert_eq!(update.result.unwrap().unwrap().value, 42);
    handle.wait().await;
}
