//! End-to-end trace tests: a real call through the factory-built client.

use std::io::Write as _;
use std::sync::{Arc, Mutex};

use apigate::middleware::{GatewayConfig, HeaderGateway};
use apigate::{ApiService, FactoryOptions, factory, perform_api_call};
use assert2::{check, let_assert};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn capture() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
    let logs = Arc::new(Mutex::new(Vec::new()));
    let sink_logs = Arc::clone(&logs);
    (logs, move |text: String| {
        sink_logs.lock().expect("lock").push(text);
    })
}

#[tokio::test]
async fn test_trace_of_successful_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/load-test/api/auth-casbin-success-plugin-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"allowed"}"#))
        .mount(&mock_server)
        .await;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"headers":{{"X-Gateway-App-Id":"sample"}}}}"#).expect("write");
    let gateway = HeaderGateway::new(GatewayConfig::from_file(file.path()).expect("config"))
        .expect("gateway");

    let base_url = format!("{}/", mock_server.uri());
    let api = factory::create(
        &base_url,
        FactoryOptions::default()
            .client_header("Client-Header-Name1", "xxxxxx")
            .client_header("Client-Header-Name2", "yyyyyy")
            .gateway(gateway),
    )
    .expect("api");

    let (logs, sink) = capture();
    let call = api.auth_casbin_success_plugin_test().expect("call");
    perform_api_call(call, sink).await.expect("task");

    let logs = logs.lock().expect("lock");
    check!(logs.len() == 2);
    let_assert!([pending, done] = logs.as_slice());

    let url = format!("{base_url}load-test/api/auth-casbin-success-plugin-test");
    check!(pending.starts_with("Request started at: "));
    check!(pending.ends_with(&format!(
        "Request URL: {url}\nRequest Method: GET\nWaiting for response..."
    )));

    check!(done.contains("ms\n\nRequest URL: "));
    check!(done.contains(&format!("Request URL: {url}\nRequest Method: GET\n\n")));
    check!(done.contains(
        "client-header-name1: xxxxxx\nclient-header-name2: yyyyyy\nx-gateway-app-id: sample\n\n"
    ));
    check!(done.ends_with("Response Body:\n{\"result\":\"allowed\"}"));
}

#[tokio::test]
async fn test_trace_of_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let api = factory::create(
        &format!("{}/", mock_server.uri()),
        FactoryOptions::default().without_profiler(),
    )
    .expect("api");

    let (logs, sink) = capture();
    let call = api.auth_casbin_success_plugin_test().expect("call");
    perform_api_call(call, sink).await.expect("task");

    let logs = logs.lock().expect("lock");
    let_assert!(Some(done) = logs.last());
    check!(done.ends_with("Response Body:\nNo body"));
}
