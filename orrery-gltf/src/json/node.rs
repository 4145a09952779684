use serde::Deserialize;

use super::{Document, Mesh};

fn default_translation() -> glam::Vec3 {
    glam::Vec3::ZERO
}

fn default_rotation() -> glam::Quat {
    glam::Quat::IDENTITY
}

fn default_scale() -> glam::Vec3 {
    glam::Vec3::ONE
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: Option<String>,

    /// Explicit column-major local transform. Takes precedence over the
    /// decomposed fields when present.
    pub matrix: Option<[f32; 16]>,

    #[serde(default = "default_translation")]
    pub translation: glam::Vec3,
    #[serde(default = "default_rotation")]
    pub rotation: glam::Quat,
    #[serde(default = "default_scale")]
    pub scale: glam::Vec3,

    pub mesh: Option<usize>,

    #[serde(default)]
    pub children: Vec<usize>,
}

impl Node {
    /// Local transform: the explicit matrix when given, otherwise scale,
    /// then rotation, then translation.
    pub fn transform(&self) -> glam::Mat4 {
        match self.matrix {
            Some(values) => glam::Mat4::from_cols_array(&values),
            None => glam::Mat4::from_scale_rotation_translation(
                self.scale,
                self.rotation,
                self.translation,
            ),
        }
    }

    pub fn mesh<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Mesh> {
        self.mesh.and_then(|id| doc.meshes.get(id))
    }
}

#[test]
fn transform_composes_scale_then_translation() -> serde_json::Result<()> {
    let node: Node =
        serde_json::from_str(r#"{ "scale": [2, 2, 2], "translation": [1, 0, 0] }"#)?;

    let expected = glam::Mat4::from_translation(glam::vec3(1.0, 0.0, 0.0))
        * glam::Mat4::from_scale(glam::vec3(2.0, 2.0, 2.0));
    assert_eq!(node.transform(), expected);

    // Scale applies before translation: the unit X point lands at 3, not 4.
    let moved = node.transform().transform_point3(glam::Vec3::X);
    assert_eq!(moved, glam::vec3(3.0, 0.0, 0.0));

    Ok(())
}

#[test]
fn explicit_matrix_wins_over_decomposed_fields() -> serde_json::Result<()> {
    let node: Node = serde_json::from_str(
        r#"{
            "matrix": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 5, 6, 7, 1],
            "scale": [2, 2, 2]
        }"#,
    )?;

    assert_eq!(
        node.transform(),
        glam::Mat4::from_translation(glam::vec3(5.0, 6.0, 7.0))
    );

    Ok(())
}

#[test]
fn missing_fields_default_to_identity() -> serde_json::Result<()> {
    let node: Node = serde_json::from_str(r#"{ "name": "empty" }"#)?;

    assert_eq!(node.transform(), glam::Mat4::IDENTITY);
    assert!(node.children.is_empty());
    assert_eq!(node.mesh, None);

    Ok(())
}
