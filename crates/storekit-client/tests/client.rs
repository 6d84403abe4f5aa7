//! End-to-end client tests against mock vendor hosts.

mod common;

use common::{bearer_token, signed_payload, TestHarness, BUNDLE_ID, ISSUER_ID, KEY_ID, PUBLIC_KEY};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use storekit_client::{
    ClientError, ConsumptionRequest, ConsumptionStatus, DeliveryStatus, Environment, Platform,
    SubscriptionStatusType, TokenClaims, AUDIENCE, TOKEN_LIFETIME_SECS,
};
use uuid::Uuid;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

const EXPIRES_MS: i64 = 1_767_225_600_000;

fn status_body() -> Value {
    json!({
        "environment": "Sandbox",
        "bundleId": BUNDLE_ID,
        "appAppleId": 1_234_567_890,
        "data": [{
            "subscriptionGroupIdentifier": "21000000",
            "lastTransactions": [{
                "originalTransactionId": "1000000123",
                "status": 1,
                "signedTransactionInfo": signed_payload(&json!({
                    "transactionId": "1000000456",
                    "originalTransactionId": "1000000123",
                    "productId": "com.example.app.monthly",
                    "expiresDate": EXPIRES_MS,
                    "type": "Auto-Renewable Subscription"
                })),
                "signedRenewalInfo": signed_payload(&json!({
                    "originalTransactionId": "1000000123",
                    "autoRenewStatus": 1
                }))
            }]
        }]
    })
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "errorCode": 4_010_000,
        "errorMessage": "Unauthenticated"
    }))
}

#[tokio::test]
async fn falls_back_to_sandbox_and_remembers_it() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/1000000123"))
        .respond_with(unauthorized())
        .mount(&harness.production)
        .await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/1000000123"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&harness.sandbox)
        .await;

    let client = harness.client();
    assert_eq!(client.current_environment(), Environment::Production);

    let status = client.get_subscription_status("1000000123").await.unwrap();
    assert_eq!(status.original_transaction_id, "1000000123");
    assert_eq!(status.status, 1);
    assert_eq!(status.status_type, SubscriptionStatusType::Active);
    assert_eq!(status.expiration_date.timestamp_millis(), EXPIRES_MS);
    assert_eq!(client.current_environment(), Environment::Sandbox);

    // The next call starts on sandbox.
    client.get_subscription_status("1000000123").await.unwrap();
    assert_eq!(harness.production_requests().await.len(), 1);
    assert_eq!(harness.sandbox_requests().await.len(), 2);
}

#[tokio::test]
async fn each_attempt_carries_a_valid_token() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .respond_with(unauthorized())
        .mount(&harness.production)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&harness.sandbox)
        .await;

    harness
        .client()
        .get_subscription_status("1000000123")
        .await
        .unwrap();

    let key = DecodingKey::from_ec_pem(PUBLIC_KEY.as_bytes()).unwrap();
    let mut validation = Validation::new(Algorithm::ES256);
    validation.set_audience(&[AUDIENCE]);

    let requests = [harness.production_requests().await, harness.sandbox_requests().await];
    for request in requests.iter().flatten() {
        let token = bearer_token(request).expect("bearer token");
        let header = decode_header(&token).unwrap();
        assert_eq!(header.kid.as_deref(), Some(KEY_ID));

        let claims = decode::<TokenClaims>(&token, &key, &validation).unwrap().claims;
        assert_eq!(claims.iss, ISSUER_ID);
        assert_eq!(claims.bid, BUNDLE_ID);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }
}

#[tokio::test]
async fn pinned_client_does_not_retry() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&harness.production)
        .await;

    let client = harness.pinned_client(Environment::Production);
    let err = client.verify_purchase("42").await.unwrap_err();

    match err {
        ClientError::Api {
            message, status, ..
        } => {
            assert_eq!(message, "upstream exploded (HTTP 500)");
            assert_eq!(status, Some(500));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(harness.production_requests().await.len(), 1);
    assert!(harness.sandbox_requests().await.is_empty());
    assert_eq!(client.current_environment(), Environment::Production);
}

#[tokio::test]
async fn second_failure_is_normalized() {
    let harness = TestHarness::start().await;
    let not_found = ResponseTemplate::new(404).set_body_json(json!({
        "errorCode": 4_040_010,
        "errorMessage": "Transaction id not found."
    }));
    Mock::given(method("GET"))
        .respond_with(not_found.clone())
        .mount(&harness.production)
        .await;
    Mock::given(method("GET"))
        .respond_with(not_found)
        .mount(&harness.sandbox)
        .await;

    let client = harness.client();
    let err = client.verify_purchase("42").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "App Store Server API error: Transaction id not found. (HTTP 404)"
    );
    assert!(matches!(
        err,
        ClientError::Api {
            status: Some(404),
            error_code: Some(4_040_010),
            ..
        }
    ));
    assert_eq!(client.current_environment(), Environment::Production);
}

#[tokio::test]
async fn history_keeps_order_and_undecodable_entries() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/history/1000000123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "revision": "rev-1",
            "bundleId": BUNDLE_ID,
            "environment": "Production",
            "hasMore": false,
            "signedTransactions": [
                signed_payload(&json!({"transactionId": "1"})),
                "not-a-token",
                signed_payload(&json!({"transactionId": "3"}))
            ]
        })))
        .mount(&harness.production)
        .await;

    let history = harness
        .pinned_client(Environment::Production)
        .get_transaction_history("1000000123")
        .await
        .unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history[0].as_ref().unwrap().transaction_id.as_deref(), Some("1"));
    assert!(history[1].is_none());
    assert_eq!(history[2].as_ref().unwrap().transaction_id.as_deref(), Some("3"));
}

#[tokio::test]
async fn consumption_without_consent_sends_nothing() {
    let harness = TestHarness::start().await;
    let request = ConsumptionRequest::new(
        ConsumptionStatus::NotConsumed,
        Platform::Apple,
        false,
        DeliveryStatus::DeliveredWorking,
    );

    let err = harness
        .client()
        .send_consumption_information("1000000456", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(harness.production_requests().await.is_empty());
    assert!(harness.sandbox_requests().await.is_empty());
}

#[tokio::test]
async fn consumption_with_consent_is_put() {
    let harness = TestHarness::start().await;
    Mock::given(method("PUT"))
        .and(path("/transactions/consumption/1000000456"))
        .and(body_json(json!({
            "customerConsented": true,
            "consumptionStatus": 2,
            "platform": 1,
            "sampleContentProvided": true,
            "deliveryStatus": 0
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&harness.production)
        .await;

    let request = ConsumptionRequest::new(
        ConsumptionStatus::PartiallyConsumed,
        Platform::Apple,
        true,
        DeliveryStatus::DeliveredWorking,
    )
    .with_customer_consent(true);

    harness
        .client()
        .send_consumption_information("1000000456", &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn app_account_token_is_put() {
    let harness = TestHarness::start().await;
    let token = Uuid::new_v4();
    Mock::given(method("PUT"))
        .and(path("/transactions/1000000123/appAccountToken"))
        .and(body_json(json!({"appAccountToken": token.to_string()})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&harness.sandbox)
        .await;

    harness
        .pinned_client(Environment::Sandbox)
        .set_app_account_token("1000000123", token)
        .await
        .unwrap();
}

#[tokio::test]
async fn lookups_return_vendor_json() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lookup/MQ2P4RZQ1K"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "signedTransactions": []
        })))
        .mount(&harness.production)
        .await;

    let body = harness.client().lookup_order("MQ2P4RZQ1K").await.unwrap();
    assert_eq!(body["status"], 0);
}
