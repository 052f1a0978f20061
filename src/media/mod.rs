//! Image URL normalization and CDN URL building.

mod cdn;
mod normalize;

pub use cdn::{
    CdnConfig, CdnProvider, ImageFit, ImageFormat, ImageTransformOptions, ImageTransformSettings,
    transform_url,
};
pub use normalize::{CDN_HOSTS, ImageUrlNormalizer, PRODUCTION_DOMAIN, PRODUCTION_URL};
