use serde::{Deserialize, Deserializer};

use super::{Document, Texture};

fn default_alpha_mode() -> AlphaMode {
    AlphaMode::Opaque
}

fn default_alpha_cutoff() -> f32 {
    0.5
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: Option<String>,

    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    pub emissive_texture: Option<MaterialTexture>,

    #[serde(default = "default_alpha_mode")]
    pub alpha_mode: AlphaMode,
    #[serde(default = "default_alpha_cutoff")]
    pub alpha_cutoff: f32,
    #[serde(default)]
    pub double_sided: bool,
}

impl Material {
    /// Uniform base color, defaulting to opaque white.
    pub fn base_color_factor(&self) -> glam::Vec4 {
        self.pbr_metallic_roughness
            .as_ref()
            .map(|pbr| pbr.base_color_factor)
            .unwrap_or(glam::Vec4::ONE)
    }

    pub fn base_color_texture(&self) -> Option<&MaterialTexture> {
        self.pbr_metallic_roughness
            .as_ref()
            .and_then(|pbr| pbr.base_color_texture.as_ref())
    }
}

fn default_base_color_factor() -> glam::Vec4 {
    glam::Vec4::ONE
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(default = "default_base_color_factor")]
    pub base_color_factor: glam::Vec4,

    pub base_color_texture: Option<MaterialTexture>,
}

fn default_tex_coord() -> usize {
    0
}

/// Reference from a material to a texture.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTexture {
    pub index: usize,

    #[serde(default = "default_tex_coord")]
    pub tex_coord: usize,
}

impl MaterialTexture {
    pub fn texture<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Texture> {
        doc.textures.get(self.index)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AlphaMode {
    Opaque,
    Mask,
    Blend,
}

impl<'de> Deserialize<'de> for AlphaMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "OPAQUE" => Ok(AlphaMode::Opaque),
            "MASK" => Ok(AlphaMode::Mask),
            "BLEND" => Ok(AlphaMode::Blend),

            value => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(value),
                &r#"one of ["OPAQUE", "MASK", "BLEND"]"#,
            )),
        }
    }
}

#[test]
fn material_defaults() -> serde_json::Result<()> {
    let material: Material = serde_json::from_str(r#"{ "name": "bare" }"#)?;

    assert_eq!(material.base_color_factor(), glam::Vec4::ONE);
    assert!(material.base_color_texture().is_none());
    assert_eq!(material.alpha_mode, AlphaMode::Opaque);
    assert_eq!(material.alpha_cutoff, 0.5);
    assert!(!material.double_sided);

    Ok(())
}

#[test]
fn texture_reference_resolves() -> serde_json::Result<()> {
    let doc: Document = serde_json::from_str(
        r#"{
            "materials": [{
                "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } }
            }],
            "textures": [{ "source": 0 }]
        }"#,
    )?;

    let texture_ref = doc.materials[0].base_color_texture().unwrap();
    assert_eq!(texture_ref.tex_coord, 0);
    assert!(texture_ref.texture(&doc).is_some());

    Ok(())
}

#[test]
fn alpha_mode() -> serde_json::Result<()> {
    let material: Material = serde_json::from_str(
        r#"{
            "alphaMode": "MASK",
            "pbrMetallicRoughness": { "baseColorFactor": [1, 0, 0, 0.5] }
        }"#,
    )?;

    assert_eq!(material.alpha_mode, AlphaMode::Mask);
    assert_eq!(material.base_color_factor(), glam::vec4(1.0, 0.0, 0.0, 0.5));

    assert!(serde_json::from_str::<Material>(r#"{ "alphaMode": "DITHER" }"#).is_err());

    Ok(())
}
