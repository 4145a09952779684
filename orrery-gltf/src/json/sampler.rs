use serde::{Deserialize, Deserializer};

fn default_wrap() -> WrapCode {
    WrapCode::Repeat
}

/// Texture sampling settings, stored as the format's GL codes.
///
/// Unknown codes deserialize into `Unsupported` variants that fall back to
/// the format defaults when mapped, so a bad sampler degrades instead of
/// failing the whole document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    pub mag_filter: Option<MagFilterCode>,
    pub min_filter: Option<MinFilterCode>,

    #[serde(default = "default_wrap")]
    pub wrap_s: WrapCode,
    #[serde(default = "default_wrap")]
    pub wrap_t: WrapCode,
}

impl Sampler {
    /// Sampler state for the scene model, filling unset filters with the
    /// trilinear defaults.
    pub fn state(&self) -> scene::Sampler {
        scene::Sampler {
            wrap_s: self.wrap_s.wrap(),
            wrap_t: self.wrap_t.wrap(),
            min_filter: self
                .min_filter
                .map(MinFilterCode::filter)
                .unwrap_or(scene::MinFilter::LinearMipmapLinear),
            mag_filter: self
                .mag_filter
                .map(MagFilterCode::filter)
                .unwrap_or(scene::MagFilter::Linear),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WrapCode {
    ClampToEdge,
    MirroredRepeat,
    Repeat,
    Unsupported(usize),
}

impl WrapCode {
    pub fn wrap(self) -> scene::Wrap {
        match self {
            WrapCode::ClampToEdge => scene::Wrap::ClampToEdge,
            WrapCode::MirroredRepeat => scene::Wrap::MirroredRepeat,
            WrapCode::Repeat | WrapCode::Unsupported(_) => scene::Wrap::Repeat,
        }
    }
}

impl<'de> Deserialize<'de> for WrapCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match usize::deserialize(deserializer)? {
            33071 => WrapCode::ClampToEdge,
            33648 => WrapCode::MirroredRepeat,
            10497 => WrapCode::Repeat,
            value => WrapCode::Unsupported(value),
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MagFilterCode {
    Nearest,
    Linear,
    Unsupported(usize),
}

impl MagFilterCode {
    pub fn filter(self) -> scene::MagFilter {
        match self {
            MagFilterCode::Nearest => scene::MagFilter::Nearest,
            MagFilterCode::Linear | MagFilterCode::Unsupported(_) => scene::MagFilter::Linear,
        }
    }
}

impl<'de> Deserialize<'de> for MagFilterCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match usize::deserialize(deserializer)? {
            9728 => MagFilterCode::Nearest,
            9729 => MagFilterCode::Linear,
            value => MagFilterCode::Unsupported(value),
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MinFilterCode {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
    Unsupported(usize),
}

impl MinFilterCode {
    pub fn filter(self) -> scene::MinFilter {
        match self {
            MinFilterCode::Nearest => scene::MinFilter::Nearest,
            MinFilterCode::Linear => scene::MinFilter::Linear,
            MinFilterCode::NearestMipmapNearest => scene::MinFilter::NearestMipmapNearest,
            MinFilterCode::LinearMipmapNearest => scene::MinFilter::LinearMipmapNearest,
            MinFilterCode::NearestMipmapLinear => scene::MinFilter::NearestMipmapLinear,
            MinFilterCode::LinearMipmapLinear | MinFilterCode::Unsupported(_) => {
                scene::MinFilter::LinearMipmapLinear
            }
        }
    }
}

impl<'de> Deserialize<'de> for MinFilterCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match usize::deserialize(deserializer)? {
            9728 => MinFilterCode::Nearest,
            9729 => MinFilterCode::Linear,
            9984 => MinFilterCode::NearestMipmapNearest,
            9985 => MinFilterCode::LinearMipmapNearest,
            9986 => MinFilterCode::NearestMipmapLinear,
            9987 => MinFilterCode::LinearMipmapLinear,
            value => MinFilterCode::Unsupported(value),
        })
    }
}

#[test]
fn sampler_codes() -> serde_json::Result<()> {
    let sampler: Sampler = serde_json::from_str(
        r#"{ "magFilter": 9728, "minFilter": 9987, "wrapS": 33648, "wrapT": 33071 }"#,
    )?;

    let state = sampler.state();
    assert_eq!(state.mag_filter, scene::MagFilter::Nearest);
    assert_eq!(state.min_filter, scene::MinFilter::LinearMipmapLinear);
    assert_eq!(state.wrap_s, scene::Wrap::MirroredRepeat);
    assert_eq!(state.wrap_t, scene::Wrap::ClampToEdge);

    Ok(())
}

#[test]
fn wrap_defaults_to_repeat() -> serde_json::Result<()> {
    let sampler: Sampler = serde_json::from_str("{}")?;

    assert_eq!(sampler.wrap_s, WrapCode::Repeat);
    assert_eq!(sampler.state().min_filter, scene::MinFilter::LinearMipmapLinear);

    Ok(())
}

#[test]
fn unknown_codes_degrade_to_defaults() -> serde_json::Result<()> {
    let sampler: Sampler =
        serde_json::from_str(r#"{ "magFilter": 1, "minFilter": 2, "wrapS": 3 }"#)?;

    assert_eq!(sampler.wrap_s, WrapCode::Unsupported(3));

    let state = sampler.state();
    assert_eq!(state.wrap_s, scene::Wrap::Repeat);
    assert_eq!(state.min_filter, scene::MinFilter::LinearMipmapLinear);
    assert_eq!(state.mag_filter, scene::MagFilter::Linear);

    Ok(())
}
