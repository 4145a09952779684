use serde::{Deserialize, Deserializer};

/// Arity of one accessor element.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    /// Number of components per element.
    pub fn component_count(&self) -> usize {
        match self {
            ElementType::Scalar => 1,
            ElementType::Vec2 => 2,
            ElementType::Vec3 => 3,
            ElementType::Vec4 => 4,
            ElementType::Mat2 => 4,
            ElementType::Mat3 => 9,
            ElementType::Mat4 => 16,
        }
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "SCALAR" => Ok(ElementType::Scalar),
            "VEC2" => Ok(ElementType::Vec2),
            "VEC3" => Ok(ElementType::Vec3),
            "VEC4" => Ok(ElementType::Vec4),
            "MAT2" => Ok(ElementType::Mat2),
            "MAT3" => Ok(ElementType::Mat3),
            "MAT4" => Ok(ElementType::Mat4),

            value => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(value),
                &r#"one of ["SCALAR", "VEC2", "VEC3", "VEC4", "MAT2", "MAT3", "MAT4"]"#,
            )),
        }
    }
}

#[test]
fn element_type() -> serde_json::Result<()> {
    #[derive(Deserialize)]
    struct Test {
        pub ty: ElementType,
    }

    assert_eq!(
        serde_json::from_str::<Test>(r#"{ "ty": "VEC2" }"#)?.ty,
        ElementType::Vec2
    );

    assert!(serde_json::from_str::<Test>(r#"{ "ty": "VEC5" }"#).is_err());

    Ok(())
}
