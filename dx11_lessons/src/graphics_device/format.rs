/// Pixel/element formats and display-capability value types

/// Pixel and vertex element formats used by the lessons
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Keep the current format (swap-chain resize)
    UNKNOWN,
    /// 8-bit RGBA, normalized
    R8G8B8A8_UNORM,
    /// 8-bit BGRA, normalized
    B8G8R8A8_UNORM,
    /// 24-bit depth + 8-bit stencil
    D24_UNORM_S8_UINT,
    /// 4 x f32
    R32G32B32A32_FLOAT,
    /// 3 x f32
    R32G32B32_FLOAT,
    /// 2 x f32
    R32G32_FLOAT,
    /// 32-bit unsigned index
    R32_UINT,
    /// 16-bit unsigned index
    R16_UINT,
}

impl Format {
    /// Size of one pixel or element in bytes (0 for UNKNOWN)
    pub fn bytes_per_element(self) -> u32 {
        match self {
            Format::UNKNOWN => 0,
            Format::R8G8B8A8_UNORM | Format::B8G8R8A8_UNORM | Format::D24_UNORM_S8_UINT => 4,
            Format::R32G32B32A32_FLOAT => 16,
            Format::R32G32B32_FLOAT => 12,
            Format::R32G32_FLOAT => 8,
            Format::R32_UINT => 4,
            Format::R16_UINT => 2,
        }
    }
}

/// Multisample count and quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl SampleDesc {
    /// No multisampling
    pub const SINGLE: SampleDesc = SampleDesc { count: 1, quality: 0 };
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Refresh rate as numerator / denominator (Hz)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// Let the display driver choose
    pub const UNSPECIFIED: Rational = Rational { numerator: 0, denominator: 1 };
}

impl Default for Rational {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

/// One display mode reported by the primary output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: Rational,
    pub format: Format,
}
