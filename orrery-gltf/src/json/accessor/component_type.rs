use serde::{Deserialize, Deserializer};

/// Numeric type of one accessor component.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl ComponentType {
    /// Size of one component in bytes.
    pub fn size(&self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match usize::deserialize(deserializer)? {
            5120 => Ok(ComponentType::Byte),
            5121 => Ok(ComponentType::UnsignedByte),
            5122 => Ok(ComponentType::Short),
            5123 => Ok(ComponentType::UnsignedShort),
            5125 => Ok(ComponentType::UnsignedInt),
            5126 => Ok(ComponentType::Float),

            value => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Unsigned(value as u64),
                &"one of [5120, 5121, 5122, 5123, 5125, 5126]",
            )),
        }
    }
}

#[test]
fn component_type() -> serde_json::Result<()> {
    #[derive(Deserialize)]
    struct Test {
        pub component_type: ComponentType,
    }

    assert_eq!(
        serde_json::from_str::<Test>(r#"{ "component_type": 5121 }"#)?.component_type,
        ComponentType::UnsignedByte
    );

    assert!(serde_json::from_str::<Test>(r#"{ "component_type": 5124 }"#).is_err());

    Ok(())
}

#[test]
fn component_sizes() {
    assert_eq!(ComponentType::UnsignedByte.size(), 1);
    assert_eq!(ComponentType::UnsignedShort.size(), 2);
    assert_eq!(ComponentType::UnsignedInt.size(), 4);
    assert_eq!(ComponentType::Float.size(), 4);
}
