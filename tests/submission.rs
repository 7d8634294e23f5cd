use async_trait::async_trait;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ismp_document_client::metrics::Metrics;
use ismp_document_client::transport::{Transport, TransportError, TransportResponse};
use ismp_document_client::{
    Document, Product, ProductGroup, RateGate, SubmissionClient, SubmissionOutcome, TimeUnit,
};

/// Answers with a fixed status after an optional delay.
struct SlowTransport {
    status: u16,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for SlowTransport {
    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: &str,
        _body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(TransportResponse {
            status: self.status,
            body: String::new(),
        })
    }
}

fn client(limit: u32, status: u16, delay: Duration) -> (SubmissionClient<SlowTransport>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = SubmissionClient::new(
        "http://api.test/create".to_string(),
        "token".to_string(),
        RateGate::new(TimeUnit::Minutes, limit),
        SlowTransport {
            status,
            delay,
            calls: calls.clone(),
        },
        Arc::new(Metrics::new()),
    );
    (client, calls)
}

fn document(id: usize) -> Document {
    let mut document = Document::new(
        id.to_string(),
        "created",
        "LP_INTRODUCE_GOODS",
        "7700000000",
        "7700000000",
        "7700000001",
        "2024-03-01",
        "OWN_PRODUCTION",
        "2024-03-02",
    );
    document.add_product(Product::new("7700000000", "7700000001", "6403", format!("UIT-{}", id)));
    document
}

#[tokio::test]
async fn sequential_submissions_stop_at_limit() {
    let (client, calls) = client(3, 200, Duration::ZERO);

    let mut accepted = 0;
    let mut throttled = 0;
    for id in 0..10 {
        match client.submit(&document(id), ProductGroup::Shoes).await.unwrap() {
            SubmissionOutcome::Accepted { .. } => accepted += 1,
            SubmissionOutcome::Throttled { .. } => throttled += 1,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    assert_eq!(accepted, 3);
    assert_eq!(throttled, 7);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn rejected_submissions_leave_quota_intact() {
    let (client, calls) = client(2, 500, Duration::ZERO);

    for id in 0..5 {
        let outcome = client.submit(&document(id), ProductGroup::Electronics).await.unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Rejected { status: 500, .. }));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(client.gate().remaining(), 2);
}

#[tokio::test]
async fn concurrent_burst_is_admitted_before_successes_land() {
    let (client, calls) = client(3, 200, Duration::from_millis(50));
    let client = Arc::new(client);

    let documents: Vec<_> = (0..10).map(document).collect();
    let outcomes = join_all(
        documents
            .iter()
            .map(|doc| client.submit(doc, ProductGroup::Bicycle)),
    )
    .await;

    // Every poll happens before any success is recorded.
    let accepted = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(SubmissionOutcome::Accepted { .. })))
        .count();
    assert_eq!(accepted, 10);
    assert_eq!(calls.load(Ordering::SeqCst), 10);

    // Once the successes land the window is full.
    assert_eq!(client.gate().remaining(), 0);
    let outcome = client.submit(&document(99), ProductGroup::Bicycle).await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Throttled { .. }));
}

#[tokio::test]
async fn spawned_submitters_share_one_gate() {
    let (client, calls) = client(4, 200, Duration::ZERO);
    let client = Arc::new(client);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let client = client.clone();
            tokio::spawn(async move {
                let mut accepted = 0;
                for i in 0..5 {
                    let outcome = client
                        .submit(&document(worker * 10 + i), ProductGroup::Wheelchairs)
                        .await
                        .unwrap();
                    if outcome.is_accepted() {
                        accepted += 1;
                    }
                }
                accepted
            })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        accepted += handle.await.unwrap();
    }

    // Interleaving can admit a few extra polls, but never fewer than the limit.
    assert!(accepted >= 4);
    assert_eq!(calls.load(Ordering::SeqCst), accepted);
    assert_eq!(client.gate().remaining(), 0);
}
