use apex_storage::{
    AlarmStore, AssetStore, ConfigAlarmRecord, CoreAssetRecord, InMemoryAlarmStore,
    InMemoryAssetStore, InMemoryNodeStore, InMemoryPhraseStore, InMemoryRawScanStore,
    InMemorySystemParameterStore, InMemoryUserDefaultStore, NodeRecord, NodeStore, PhraseStore,
    RawScanStore, SystemParameterStore, UserDefaultStore,
};
use domain::RequestContext;
use uuid::Uuid;

fn ctx() -> RequestContext {
    RequestContext::system("corr-1")
}

#[tokio::test]
async fn asset_lookup_by_id() {
    let store = InMemoryAssetStore::new();
    let asset_id = Uuid::new_v4();
    store.insert_asset(CoreAssetRecord::new(asset_id, "WELL-01", 8));

    let found = store
        .get_core_asset(&ctx(), asset_id)
        .await
        .expect("query")
        .expect("asset");
    assert_eq!(found.node_id, "WELL-01");
    assert_eq!(found.poc_type, 8);

    let missing = store
        .get_core_asset(&ctx(), Uuid::new_v4())
        .await
        .expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn empty_correlation_is_rejected() {
    let store = InMemoryAssetStore::new();
    let ctx = RequestContext::new("", "user-1");
    let result = store.get_core_asset(&ctx, Uuid::new_v4()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn config_alarms_require_node_id() {
    let store = InMemoryAlarmStore::new();
    store.insert_config_alarms(
        "WELL-01",
        vec![ConfigAlarmRecord {
            address: 30001,
            bit: 2,
            description: "High Pressure".to_string(),
            priority: 10,
            normal_state: 0,
            current_value: Some("4".to_string()),
        }],
    );

    let alarms = store
        .get_config_alarms(&ctx(), "WELL-01")
        .await
        .expect("query");
    assert_eq!(alarms.len(), 1);
    assert!(store.get_config_alarms(&ctx(), "  ").await.is_err());
}

#[tokio::test]
async fn raw_scan_returns_only_requested_addresses() {
    let store = InMemoryRawScanStore::new();
    store.set_value("WELL-01", 40101, 1.0);
    store.set_value("WELL-01", 40102, 250.5);
    store.set_string_value("WELL-01", "TfReg:11.0.3", "2");

    let values = store
        .get_current_raw_scan_data(&ctx(), "WELL-01", &[40102, 40199])
        .await
        .expect("query");
    assert_eq!(values.len(), 1);
    assert_eq!(values.get(&40102), Some(&250.5));

    let strings = store
        .get_current_raw_scan_string_values(&ctx(), "WELL-01", &["TfReg:11.0.3".to_string()])
        .await
        .expect("query");
    assert_eq!(strings.get("TfReg:11.0.3").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn phrases_and_parameters() {
    let phrases = InMemoryPhraseStore::new();
    phrases.insert_phrase(4101, "Manuel");
    let found = phrases
        .get_phrases(&ctx(), &[4101, 4102])
        .await
        .expect("query");
    assert_eq!(found.len(), 1);

    let params = InMemorySystemParameterStore::new();
    params.set_parameter("SignificantDigits", "4");
    params.set_unit_default("pressure", "kPa");
    assert_eq!(
        params
            .get_parameter(&ctx(), "SignificantDigits")
            .await
            .expect("query")
            .as_deref(),
        Some("4")
    );
    let defaults = params.get_unit_defaults(&ctx()).await.expect("query");
    assert_eq!(defaults.get("pressure").map(String::as_str), Some("kPa"));
}

#[tokio::test]
async fn user_preferences_per_user() {
    let store = InMemoryUserDefaultStore::new();
    store.set_preference("user-1", "length", "m");
    let prefs = store
        .get_unit_preferences(&ctx(), "user-1")
        .await
        .expect("query");
    assert_eq!(prefs.get("length").map(String::as_str), Some("m"));
    let other = store
        .get_unit_preferences(&ctx(), "user-2")
        .await
        .expect("query");
    assert!(other.is_empty());
}

#[tokio::test]
async fn node_lookup_by_asset() {
    let store = InMemoryNodeStore::new();
    let asset_id = Uuid::new_v4();
    store.insert_node(NodeRecord {
        node_id: "WELL-01".to_string(),
        asset_id,
        enabled: true,
        port_id: Some(3),
        node_address: Some("5".to_string()),
        poc_type: 8,
    });
    let node = store
        .find_node_by_asset(&ctx(), asset_id)
        .await
        .expect("query")
        .expect("node");
    assert_eq!(node.port_id, Some(3));
}
