use serde::Deserialize;

/// The `asset` header every glTF document carries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub version: String,
    pub generator: Option<String>,
    pub min_version: Option<String>,
}

#[test]
fn asset() -> serde_json::Result<()> {
    let asset: Asset =
        serde_json::from_str(r#"{ "version": "2.0", "generator": "orrery test" }"#)?;

    assert_eq!(asset.version, "2.0");
    assert_eq!(asset.generator.as_deref(), Some("orrery test"));
    assert_eq!(asset.min_version, None);

    Ok(())
}
