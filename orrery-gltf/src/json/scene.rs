use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub name: Option<String>,

    #[serde(default)]
    pub nodes: Vec<usize>,
}
