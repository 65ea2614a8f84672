//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};

/// Default 7-bit I2C address of SSD1306 breakouts (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit I2C address (SA0 high), common on 128x64 modules
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Panel dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Columns (segment outputs)
    pub width: u16,
    /// Rows (COM outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or > MAX_WIDTH
    /// - height is 0 or > MAX_HEIGHT
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH || height == 0 || height > MAX_HEIGHT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8-row pages, rounding a partial last page up
    pub fn pages(&self) -> u16 {
        self.height.div_ceil(8)
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.width as usize * self.pages() as usize
    }
}

/// Where the panel's drive voltage comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerMode {
    /// Internal charge pump steps up VCC from the 3.3V logic supply
    #[default]
    Internal,
    /// Panel VCC is supplied externally; charge pump disabled
    External,
}

/// Controller flavour, which only changes the column address of each page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// SSD1306: column 0 is the first visible column
    #[default]
    Ssd1306,
    /// SH1106: 132-column RAM, visible area starts at column 2
    Sh1106,
}

impl Variant {
    /// Column address the first visible pixel lives at
    pub fn column_offset(self) -> u8 {
        match self {
            Self::Ssd1306 => 0x00,
            Self::Sh1106 => 0x02,
        }
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Packed 1-bit image: row-major, MSB first, each row padded to a byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    /// Packed rows, `byte_width() * height` bytes
    pub data: &'a [u8],
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl<'a> Bitmap<'a> {
    /// Wrap packed image data
    pub const fn new(data: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Bytes per row
    pub fn byte_width(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }
}

/// Per-geometry controller settings that depend on how the panel is wired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryProfile {
    /// Width the profile applies to
    pub width: u16,
    /// Height the profile applies to
    pub height: u16,
    /// Argument for the COM pins hardware configuration command
    pub com_pins: u8,
    /// Contrast when driven by the internal charge pump
    pub contrast_internal: u8,
    /// Contrast when driven by an external supply
    pub contrast_external: u8,
}

impl GeometryProfile {
    /// Contrast to program for the given power mode
    pub fn contrast(&self, power: PowerMode) -> u8 {
        match power {
            PowerMode::Internal => self.contrast_internal,
            PowerMode::External => self.contrast_external,
        }
    }
}

/// Known panel geometries
pub const GEOMETRY_PROFILES: &[GeometryProfile] = &[
    GeometryProfile {
        width: 128,
        height: 32,
        com_pins: 0x02,
        contrast_internal: 0x8F,
        contrast_external: 0x8F,
    },
    GeometryProfile {
        width: 128,
        height: 64,
        com_pins: 0x12,
        contrast_internal: 0xCF,
        contrast_external: 0x9F,
    },
    GeometryProfile {
        width: 96,
        height: 16,
        com_pins: 0x02,
        contrast_internal: 0xAF,
        contrast_external: 0x10,
    },
];

/// Look up the wiring profile for `dims`, if the geometry is known
pub fn geometry_profile(dims: Dimensions) -> Option<&'static GeometryProfile> {
    GEOMETRY_PROFILES
        .iter()
        .find(|profile| profile.width == dims.width && profile.height == dims.height)
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// 7-bit I2C address
    pub address: u8,
    /// Controller flavour
    pub variant: Variant,
    /// Display rotation
    pub rotation: Rotation,
    /// Image drawn centred into the framebuffer during `begin`
    pub splash: Option<Bitmap<'static>>,
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => self.dimensions,
            Rotation::Rotate90 | Rotation::Rotate270 => Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            },
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1306_page::{Builder, Dimensions, Rotation, Variant};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .variant(Variant::Sh1106)
///     .rotation(Rotation::Rotate180)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Panel dimensions (required)
    dimensions: Option<Dimensions>,
    /// 7-bit I2C address
    address: u8,
    /// Controller flavour
    variant: Variant,
    /// Display rotation
    rotation: Rotation,
    /// Optional splash image
    splash: Option<Bitmap<'static>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            address: DEFAULT_ADDRESS,
            variant: Variant::Ssd1306,
            rotation: Rotation::Rotate0,
            splash: None,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the 7-bit I2C address
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the controller flavour
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Show `bitmap` centred on screen when the display comes up
    pub fn splash(mut self, bitmap: Bitmap<'static>) -> Self {
        self.splash = Some(bitmap);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            address: self.address,
            variant: self.variant,
            rotation: self.rotation,
            splash: self.splash,
        })
    }
}
