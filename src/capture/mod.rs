pub mod convolve;
pub mod mask;
pub mod noise;

/// Where the scene image comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenePreset {
    Reference,
    Random,
    Custom,
}

impl ScenePreset {
    pub const ALL: &[ScenePreset] = &[
        ScenePreset::Reference,
        ScenePreset::Random,
        ScenePreset::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Reference => "Reference Image",
            ScenePreset::Random => "Random Noise",
            ScenePreset::Custom => "Custom File",
        }
    }
}
