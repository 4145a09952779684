/// Pixel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(&self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Decoded pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    ClampToEdge,
    MirroredRepeat,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Wrap and filter state applied when sampling a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
}

impl Default for Sampler {
    /// Edge-clamped, trilinear sampling.
    fn default() -> Self {
        Self {
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            min_filter: MinFilter::LinearMipmapLinear,
            mag_filter: MagFilter::Linear,
        }
    }
}

/// A 2-D texture resource: decoded image plus sampler state.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub image: ImageData,
    pub sampler: Sampler,
}

impl Texture {
    pub fn new(image: ImageData) -> Self {
        Self {
            image,
            sampler: Sampler::default(),
        }
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sampler_is_edge_clamped_trilinear() {
        let sampler = Sampler::default();
        assert_eq!(sampler.wrap_s, Wrap::ClampToEdge);
        assert_eq!(sampler.wrap_t, Wrap::ClampToEdge);
        assert_eq!(sampler.min_filter, MinFilter::LinearMipmapLinear);
        assert_eq!(sampler.mag_filter, MagFilter::Linear);
    }

    #[test]
    fn pixel_format_channels() {
        assert_eq!(PixelFormat::Rgb8.channels(), 3);
        assert_eq!(PixelFormat::Rgba8.channels(), 4);
    }
}
