use visual_report::api::{
    CategorySummary, DEFAULT_GROUP_LABEL, REPORT_SNAPSHOT_JSON_SCHEMA_V1, ReportSnapshot,
    attribute_menu,
};
use visual_report::core::CycleToken;
use visual_report::render::{Color, MaterialStyle, PaletteStop};
use visual_report::{ReportConfig, ReportError};

#[test]
fn report_config_json_roundtrip() {
    let config = ReportConfig::default()
        .with_group_label("Misc")
        .with_min_percent(4.0)
        .with_material(MaterialStyle {
            shininess: 30.0,
            flat_shading: false,
        });

    let json = config
        .to_json_pretty()
        .expect("config should serialize to json");
    let restored = ReportConfig::from_json_str(&json).expect("config should deserialize");

    assert_eq!(restored, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = ReportConfig::from_json_str(r#"{ "min_percent": 5.0 }"#).expect("partial config");

    assert_eq!(config.group_label, DEFAULT_GROUP_LABEL);
    assert_eq!(config.min_percent, 5.0);
    assert_eq!(config.palette, ReportConfig::default().palette);
    assert!(config.material.flat_shading);
}

#[test]
fn palette_colors_serialize_as_hex() {
    let json = ReportConfig::default().to_json_pretty().expect("json");
    assert!(json.contains("\"#b58929\""));
    assert!(json.contains("\"#85992c\""));
}

#[test]
fn invalid_configs_are_rejected() {
    let cases = [
        ReportConfig::default().with_group_label("  "),
        ReportConfig::default().with_min_percent(-1.0),
        ReportConfig::default().with_min_percent(120.0),
        ReportConfig::default().with_min_percent(f64::NAN),
        ReportConfig::default().with_palette(vec![PaletteStop::new(0.0, Color::rgb(0.0, 0.0, 0.0))]),
        ReportConfig::default().with_palette(vec![
            PaletteStop::new(0.0, Color::rgb(0.0, 0.0, 0.0)),
            PaletteStop::new(0.5, Color::rgb(1.0, 1.0, 1.0)),
        ]),
        ReportConfig::default().with_material(MaterialStyle {
            shininess: -1.0,
            flat_shading: true,
        }),
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(ReportError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn out_of_range_config_json_is_rejected() {
    let err = ReportConfig::from_json_str(r#"{ "min_percent": 150.0 }"#).expect_err("rejected");
    assert!(matches!(err, ReportError::InvalidConfig(_)));

    let err = ReportConfig::from_json_str("not json").expect_err("rejected");
    assert!(matches!(err, ReportError::InvalidConfig(_)));
}

fn snapshot() -> ReportSnapshot {
    ReportSnapshot {
        attribute: "Material".to_owned(),
        cycle: CycleToken::new(3),
        categories: vec![
            CategorySummary {
                label: "Steel".to_owned(),
                color: Color::from_packed_rgb(0xB58929),
                value: 8,
            },
            CategorySummary {
                label: "Other".to_owned(),
                color: Color::from_packed_rgb(0x85992C),
                value: 3,
            },
        ],
        tree_nodes: 12,
    }
}

#[test]
fn snapshot_contract_v1_roundtrip() {
    let snapshot = snapshot();

    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    assert!(json.contains(&format!("\"schema_version\": {REPORT_SNAPSHOT_JSON_SCHEMA_V1}")));

    let restored = ReportSnapshot::from_json_compat_str(&json).expect("contract should parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn snapshot_compat_parser_accepts_bare_payload() {
    let snapshot = snapshot();
    let bare = serde_json::to_string(&snapshot).expect("bare json");

    let restored = ReportSnapshot::from_json_compat_str(&bare).expect("bare payload parses");

    assert_eq!(restored, snapshot);
}

#[test]
fn snapshot_compat_parser_rejects_unknown_schema() {
    let json = snapshot()
        .to_json_contract_v1_pretty()
        .expect("contract")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");

    let err = ReportSnapshot::from_json_compat_str(&json).expect_err("unknown schema");

    assert!(matches!(err, ReportError::InvalidData(_)));
}

#[test]
fn attribute_menu_strips_first_colon_and_keeps_order() {
    let menu = attribute_menu(["Mass:", "Material", "Item::Name", "Dimensions:Mass:kg"]);
    let names: Vec<&str> = menu.iter().map(|item| item.name.as_str()).collect();

    assert_eq!(names, vec!["Mass", "Material", "Item:Name", "DimensionsMass:kg"]);
    assert!(menu.iter().all(|item| item.value == item.name));
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_init_is_a_no_op_without_telemetry() {
    assert!(!visual_report::telemetry::init_default_tracing());
}
