//! End-to-end behaviour of the public transport API.

mod test_utils;

use gelf_transport::{
    AmbientDefaults, GelfLevel, GelfTransport, IpVersion, Meta, NormalizedMessage, Protocol,
    SendError, TransportError, TransportOptions, gelf_args,
};
use rstest::rstest;
use serde_json::json;

use test_utils::{Delivery, ThreadedClient};

fn ambient() -> AmbientDefaults {
    AmbientDefaults::new("api-3", Some("test".into()))
}

#[rstest]
fn no_options_resolve_to_udp_defaults() {
    let transport = GelfTransport::with_ambient(
        TransportOptions::default(),
        &ambient(),
        ThreadedClient::new,
    );
    let config = &transport.client().config;

    assert_eq!(config.adapter_name, Protocol::Udp);
    assert_eq!(config.adapter_options.host, "localhost");
    assert_eq!(config.adapter_options.port, 12201);
    assert_eq!(config.adapter_options.family, None);
    assert_eq!(config.fields.environment.as_deref(), Some("test"));
}

#[rstest]
fn tcp_over_ipv6_resolves_family_and_timeout() {
    let options = TransportOptions::new()
        .with_protocol(Protocol::Tcp)
        .with_ip_version(IpVersion::V6);
    let transport = GelfTransport::with_ambient(options, &ambient(), ThreadedClient::new);
    let adapter = &transport.config().adapter_options;

    assert_eq!(adapter.family, Some(IpVersion::V6));
    assert_eq!(adapter.timeout_ms, Some(4000));
    assert_eq!(adapter.protocol, None);
}

#[rstest]
fn tls_options_from_a_config_document() {
    let options: TransportOptions = serde_json::from_value(json!({
        "host": "2001:db8::10",
        "protocol": "tcp-tls",
        "ca_cert_pem": "-----BEGIN CERTIFICATE-----",
        "app_name": "ledger"
    }))
    .expect("valid options document");
    let transport = GelfTransport::with_ambient(options, &ambient(), ThreadedClient::new);
    let adapter = &transport.config().adapter_options;

    assert_eq!(adapter.family, Some(IpVersion::V6));
    assert_eq!(adapter.protocol, None);
    assert_eq!(
        adapter.ca,
        Some(vec!["-----BEGIN CERTIFICATE-----".to_owned()])
    );
    assert_eq!(transport.config().fields.app_name.as_deref(), Some("ledger"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn log_waits_for_the_background_acknowledgement() {
    let transport = GelfTransport::with_ambient(
        TransportOptions::default(),
        &ambient(),
        ThreadedClient::new,
    );

    transport
        .log(GelfLevel::Error, gelf_args!["Hello world!", 2.5])
        .await
        .expect("delivery acknowledged");

    assert_eq!(
        transport.client().deliveries(),
        vec![Delivery {
            message: "Hello world!".into(),
            severity: 3,
            meta: Some(Meta::Value(json!({"meta": 2.5}))),
        }]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_failure_rejects_the_call() {
    let transport = GelfTransport::with_ambient(
        TransportOptions::default(),
        &ambient(),
        ThreadedClient::failing,
    );

    let err = transport
        .log(0, gelf_args!["the message"])
        .await
        .expect_err("failure is propagated");
    assert!(matches!(err, TransportError::Send(SendError::Rejected(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hook_output_is_what_gets_delivered() {
    let options = TransportOptions::new().with_transform(|original: NormalizedMessage| {
        assert_eq!(original.message, "hello");
        Ok(NormalizedMessage::new(
            "the message",
            Some(Meta::Value(json!("the meta"))),
        ))
    });
    let transport = GelfTransport::with_ambient(options, &ambient(), ThreadedClient::new);

    transport
        .log(0, gelf_args!["hello", json!({"foo": "bar"})])
        .await
        .expect("delivery acknowledged");

    let deliveries = transport.client().deliveries();
    assert_eq!(deliveries[0].message, "the message");
    assert_eq!(deliveries[0].meta, Some(Meta::Value(json!("the meta"))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unawaited_calls_all_reach_the_client() {
    let transport = GelfTransport::with_ambient(
        TransportOptions::default(),
        &ambient(),
        ThreadedClient::new,
    );

    let calls: Vec<_> = (0..8)
        .map(|n| transport.log(6, gelf_args![format!("call {n}")]))
        .collect();
    for call in calls {
        call.await.expect("delivery acknowledged");
    }

    let mut messages: Vec<String> = transport
        .client()
        .deliveries()
        .into_iter()
        .map(|delivery| delivery.message)
        .collect();
    messages.sort();
    assert_eq!(messages.len(), 8);
    assert_eq!(messages[0], "call 0");
}

#[rstest]
#[tokio::test]
async fn empty_call_is_a_no_op() {
    let transport = GelfTransport::with_ambient(
        TransportOptions::default(),
        &ambient(),
        ThreadedClient::new,
    );
    transport.log(0, gelf_args![]).await.expect("skip succeeds");
    assert!(transport.client().deliveries().is_empty());
}
