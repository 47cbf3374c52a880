//! Blocking client tests.
//!
//! The mock PDP runs on its own multi-threaded runtime so the blocking client
//! can be driven from a plain test thread.

use authzen_client::{AuthzClient, ErrorKind, blocking};
use tokio::runtime::Runtime;

use crate::common::{TestPdp, fast_retries, view_readme};

fn start_pdp(runtime: &Runtime, status: u16, body: &str) -> TestPdp {
    runtime.block_on(async {
        let pdp = TestPdp::start().await;
        pdp.respond(status, body).await;
        pdp
    })
}

fn blocking_client(pdp: &TestPdp) -> blocking::AuthzClient {
    let client = AuthzClient::builder()
        .endpoint(pdp.endpoint())
        .retry_config(fast_retries())
        .build()
        .unwrap();
    blocking::AuthzClient::new(client).unwrap()
}

#[test]
fn test_blocking_allow() {
    let runtime = Runtime::new().unwrap();
    let pdp = start_pdp(&runtime, 200, r#"{"decision": true}"#);

    assert!(blocking_client(&pdp).is_allowed(&view_readme()).unwrap());
}

#[test]
fn test_blocking_client_failure() {
    let runtime = Runtime::new().unwrap();
    let pdp = start_pdp(&runtime, 403, "Forbidden");

    let err = blocking_client(&pdp).authorize(&view_readme()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientFailure);
    assert_eq!(err.status(), Some(403));
}
