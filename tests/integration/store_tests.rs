use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::json;

use labstore::{
    config::{GatewayConfig, StoreConfig},
    derived::CalibrationBucket,
    gateway::{Credential, HttpGateway, ListFilter, RequestContext},
    models::{
        CreateInstrument, CreateSupplier, CreateUsageLog, RecordId, SampleStatus,
        UpdateInstrument, UpdateSupplier,
    },
    store::{OperationClass, RequestState},
    AppError, Confirmation, Stores,
};

use crate::backend::{FakeBackend, TOKEN};

async fn setup(backend: &FakeBackend) -> Stores {
    let base_url = backend.spawn().await;
    let gateway = HttpGateway::new(&GatewayConfig {
        base_url,
        timeout_secs: 5,
    })
    .expect("gateway");
    Stores::new(Arc::new(gateway), &StoreConfig::default())
}

fn ctx() -> RequestContext {
    RequestContext::new(Credential::new(TOKEN))
}

fn seed_instruments(backend: &FakeBackend) {
    backend.seed(
        "instruments",
        vec![
            json!({ "id": 1, "name": "Centrifuge", "serial_number": "CF-1", "status": "Available", "calibration_date": "2024-01-05" }),
            json!({ "id": 2, "name": "Balance", "serial_number": "BL-2", "status": "In Use", "calibration_date": "2024-01-12" }),
        ],
    );
}

#[tokio::test]
async fn test_instrument_lifecycle() {
    let backend = FakeBackend::new();
    seed_instruments(&backend);
    let stores = setup(&backend).await;
    let instruments = &stores.instruments;

    let listed = instruments.list(&ctx(), &ListFilter::new()).await.unwrap();
    assert_eq!(listed.len(), 2);

    let created = instruments
        .create(
            &ctx(),
            CreateInstrument {
                name: Some("Spectrometer".into()),
                serial_number: Some("SP-3".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, RecordId::Int(101));
    assert_eq!(instruments.get(&created.id).map(|i| i.name), Some("Spectrometer".to_string()));
    assert_eq!(backend.records("instruments").len(), 3);

    let updated = instruments
        .update(
            &ctx(),
            &created.id,
            UpdateInstrument {
                model: Some("UV-2600".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.model.as_deref(), Some("UV-2600"));
    assert_eq!(updated.name, "Spectrometer");
    assert_eq!(instruments.position(&created.id), Some(2));

    instruments
        .delete(&ctx(), &RecordId::Int(1), Confirmation::granted())
        .await
        .unwrap();
    assert_eq!(instruments.len(), 2);
    assert!(instruments.get(&RecordId::Int(1)).is_none());
    assert_eq!(backend.records("instruments").len(), 2);

    // list again: local state matches the backend
    let relisted = instruments.list(&ctx(), &ListFilter::new()).await.unwrap();
    assert_eq!(relisted, instruments.collection());
}

#[tokio::test]
async fn test_calibration_from_backend_dates() {
    let backend = FakeBackend::new();
    seed_instruments(&backend);
    let stores = setup(&backend).await;
    stores.instruments.list(&ctx(), &ListFilter::new()).await.unwrap();

    let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let overdue = stores.instruments.calibration_status(&RecordId::Int(1), now).unwrap();
    assert_eq!(overdue.bucket, CalibrationBucket::Overdue);
    assert_eq!(overdue.hint.as_deref(), Some("Overdue by 5days"));

    let warning = stores.instruments.calibration_status(&RecordId::Int(2), now).unwrap();
    assert_eq!(warning.bucket, CalibrationBucket::Warning);
}

#[tokio::test]
async fn test_rejected_credential_is_auth_error() {
    let backend = FakeBackend::new();
    seed_instruments(&backend);
    let stores = setup(&backend).await;

    let bad = RequestContext::new(Credential::new("stale"));
    let err = stores.instruments.list(&bad, &ListFilter::new()).await.unwrap_err();
    assert_eq!(err, AppError::Authentication("Invalid token".into()));
    assert_eq!(
        stores.instruments.request_state(OperationClass::List),
        RequestState::Error("Invalid token".into())
    );

    let err = stores
        .instruments
        .list(&RequestContext::anonymous(), &ListFilter::new())
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_server_error_leaves_record_unchanged() {
    let backend = FakeBackend::new();
    seed_instruments(&backend);
    let stores = setup(&backend).await;
    stores.instruments.list(&ctx(), &ListFilter::new()).await.unwrap();
    let before = stores.instruments.get(&RecordId::Int(2));

    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    let err = stores
        .instruments
        .update(
            &ctx(),
            &RecordId::Int(2),
            UpdateInstrument {
                name: Some("Balance v2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Gateway("Request failed with status 500".into()));
    assert_eq!(stores.instruments.get(&RecordId::Int(2)), before);
}

#[tokio::test]
async fn test_gateway_message_is_surfaced() {
    let backend = FakeBackend::new();
    let stores = setup(&backend).await;

    backend.fail_next(
        StatusCode::CONFLICT,
        json!({ "message": "Serial number already registered" }),
    );
    let err = stores
        .instruments
        .create(
            &ctx(),
            CreateInstrument {
                name: Some("Centrifuge".into()),
                serial_number: Some("CF-1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Gateway("Serial number already registered".into()));
    assert!(stores.instruments.is_empty());
}

#[tokio::test]
async fn test_validation_never_calls_backend() {
    let backend = FakeBackend::new();
    let stores = setup(&backend).await;

    let err = stores
        .instruments
        .create(&ctx(), CreateInstrument::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let err = stores
        .usage_logs
        .log_usage(
            &ctx(),
            CreateUsageLog {
                instrument_id: Some(RecordId::Int(1)),
                start_time: Some(start),
                end_time: Some(start - chrono::Duration::seconds(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Validation("end_time before start_time".into()));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_refresh_unknown_id_is_not_found() {
    let backend = FakeBackend::new();
    seed_instruments(&backend);
    let stores = setup(&backend).await;

    let err = stores
        .instruments
        .refresh(&ctx(), &RecordId::Int(404))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::NotFound("instruments 404 not found".into()));
    assert!(stores.instruments.is_empty());
}

#[tokio::test]
async fn test_usage_sessions_for_instrument() {
    let backend = FakeBackend::new();
    backend.seed(
        "usage-logs",
        vec![
            json!({ "id": 1, "instrument_id": 1, "start_time": "2024-03-01T10:00:00Z", "end_time": "2024-03-01T11:00:00Z" }),
            json!({ "id": 2, "instrument_id": 2, "start_time": "2024-03-01T10:00:00Z", "end_time": null }),
            json!({ "id": 3, "instrument_id": 1, "start_time": "2024-03-01T12:00:00", "end_time": null }),
        ],
    );
    let stores = setup(&backend).await;
    let logs = &stores.usage_logs;

    let fetched = logs.list_for_instrument(&ctx(), &RecordId::Int(1)).await.unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(logs.request_state(OperationClass::InstrumentUsage), RequestState::Success);

    assert_eq!(logs.duration(&RecordId::Int(1)).unwrap().map(|d| d.to_string()), Some("1h 0m 0s".into()));
    assert_eq!(logs.duration(&RecordId::Int(3)).unwrap(), None);

    let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 45, 30).unwrap();
    let closed = logs.end_session(&ctx(), &RecordId::Int(3), end).await.unwrap();
    assert_eq!(closed.end_time, Some(end));
    assert_eq!(logs.duration(&RecordId::Int(3)).unwrap().map(|d| d.seconds()), Some(2730));
    assert!(logs.open_sessions().is_empty());
}

#[tokio::test]
async fn test_samples_envelope_and_status() {
    let backend = FakeBackend::new();
    backend.seed(
        "samples",
        vec![
            json!({ "id": "s-1", "name": "Serum A", "status": "Available", "collection_date": "2024-02-20" }),
            json!({ "id": "s-2", "name": "Serum B", "status": "Depleted" }),
            json!({ "id": "s-3", "name": "Tissue C", "status": "Quarantined" }),
        ],
    );
    let stores = setup(&backend).await;

    let samples = stores.samples.list(&ctx(), &ListFilter::new()).await.unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(stores.samples.by_status(SampleStatus::Depleted).len(), 1);
    assert_eq!(stores.samples.get(&RecordId::from("s-3")).unwrap().status, SampleStatus::Unknown);
    assert_eq!(
        stores.samples.status_badge(&RecordId::from("s-1")).map(|b| b.label),
        Some("Available".to_string())
    );

    stores
        .samples
        .delete(&ctx(), &RecordId::from("s-2"), Confirmation::granted())
        .await
        .unwrap();
    assert_eq!(backend.records("samples").len(), 2);

    stores.clear_all();
    assert!(stores.samples.is_empty());
    assert_eq!(stores.samples.request_state(OperationClass::List), RequestState::Idle);
}

#[tokio::test]
async fn test_supplier_round_trip() {
    let backend = FakeBackend::new();
    let stores = setup(&backend).await;
    let suppliers = &stores.suppliers;

    let created = suppliers
        .create(
            &ctx(),
            CreateSupplier {
                name: Some("Reagents Ltd".into()),
                email: Some("orders@reagents.example".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, RecordId::Int(101));
    assert_eq!(backend.records("suppliers").len(), 1);

    let err = suppliers
        .update(
            &ctx(),
            &created.id,
            UpdateSupplier {
                email: Some("not-an-address".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Validation("invalid email address".into()));
    assert_eq!(backend.calls(), 1);

    let updated = suppliers
        .update(
            &ctx(),
            &created.id,
            UpdateSupplier {
                phone: Some("+44 20 7946 0000".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("+44 20 7946 0000"));
    assert_eq!(updated.email.as_deref(), Some("orders@reagents.example"));
    assert_eq!(suppliers.get(&created.id), Some(updated));

    suppliers
        .delete(&ctx(), &created.id, Confirmation::granted())
        .await
        .unwrap();
    assert!(suppliers.is_empty());
    assert!(backend.records("suppliers").is_empty());

    let relisted = suppliers.list(&ctx(), &ListFilter::new()).await.unwrap();
    assert!(relisted.is_empty());
}

#[tokio::test]
async fn test_text_id_with_path_characters_addresses_its_own_record() {
    let backend = FakeBackend::new();
    backend.seed(
        "samples",
        vec![
            json!({ "id": "lot/7", "name": "Serum A", "status": "Available" }),
            json!({ "id": "7", "name": "Serum B", "status": "Available" }),
        ],
    );
    let stores = setup(&backend).await;
    stores.samples.list(&ctx(), &ListFilter::new()).await.unwrap();

    stores
        .samples
        .delete(&ctx(), &RecordId::from("lot/7"), Confirmation::granted())
        .await
        .unwrap();

    let remaining = backend.records("samples");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], "7");
    assert!(stores.samples.get(&RecordId::from("7")).is_some());
}
