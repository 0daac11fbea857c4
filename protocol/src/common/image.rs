//! Thumbnail descriptors and the server's image size variants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Thumbnail descriptor: base path plus file extension
///
/// A concrete URL is `{path}/{variant}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub extension: String,
}

impl Image {
    pub fn url(&self, variant: ImageVariant) -> String {
        format!("{}/{}.{}", self.path, variant.as_str(), self.extension)
    }
}

/// Size variants supported by the image service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageVariant {
    PortraitSmall,
    PortraitMedium,
    PortraitXlarge,
    PortraitFantastic,
    PortraitUncanny,
    PortraitIncredible,
    StandardSmall,
    #[default]
    StandardMedium,
    StandardLarge,
    StandardXlarge,
    StandardFantastic,
    StandardAmazing,
    LandscapeSmall,
    LandscapeMedium,
    LandscapeLarge,
    LandscapeXlarge,
    LandscapeAmazing,
    LandscapeIncredible,
    Detail,
}

impl ImageVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PortraitSmall => "portrait_small",
            Self::PortraitMedium => "portrait_medium",
            Self::PortraitXlarge => "portrait_xlarge",
            Self::PortraitFantastic => "portrait_fantastic",
            Self::PortraitUncanny => "portrait_uncanny",
            Self::PortraitIncredible => "portrait_incredible",
            Self::StandardSmall => "standard_small",
            Self::StandardMedium => "standard_medium",
            Self::StandardLarge => "standard_large",
            Self::StandardXlarge => "standard_xlarge",
            Self::StandardFantastic => "standard_fantastic",
            Self::StandardAmazing => "standard_amazing",
            Self::LandscapeSmall => "landscape_small",
            Self::LandscapeMedium => "landscape_medium",
            Self::LandscapeLarge => "landscape_large",
            Self::LandscapeXlarge => "landscape_xlarge",
            Self::LandscapeAmazing => "landscape_amazing",
            Self::LandscapeIncredible => "landscape_incredible",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
