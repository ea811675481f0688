//! Advertisement image validation and per-surface rendering.
//!
//! Each carrier keeps a base advertisement image at
//! `<image_dir>/<short_name>.png` with exact required dimensions. Mission
//! sends attach per-surface copies rendered into the temp directory; the
//! orchestrator cleans those up after the send.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AppError;
use crate::model::{carrier::CarrierData, mission::MissionParams};
use crate::service::surface::{ChannelSurface, ImageService, Notice};

/// Required dimensions of the base advertisement image.
pub const ADVERT_DIMENSIONS: (u32, u32) = (506, 285);

/// Dimensions of the forum render (2x the base for feed quality).
pub const FORUM_DIMENSIONS: (u32, u32) = (1012, 570);

/// How long the interactive upload sub-flow waits for a valid image.
const UPLOAD_WAIT: Duration = Duration::from_secs(60);

/// Polling interval while waiting for an upload.
const UPLOAD_POLL: Duration = Duration::from_secs(5);

pub struct AdvertImageService {
    image_dir: PathBuf,
    channels: Arc<dyn ChannelSurface>,
}

impl AdvertImageService {
    pub fn new(image_dir: PathBuf, channels: Arc<dyn ChannelSurface>) -> Self {
        Self {
            image_dir,
            channels,
        }
    }

    fn advert_path(&self, carrier: &CarrierData) -> PathBuf {
        self.image_dir.join(format!("{}.png", carrier.short_name))
    }

    fn dimensions_ok(path: &Path) -> bool {
        // header-only read, cheap enough to do inline
        image::image_dimensions(path)
            .map(|dims| dims == ADVERT_DIMENSIONS)
            .unwrap_or(false)
    }

    fn render(
        source: &Path,
        target: &Path,
        dimensions: (u32, u32),
    ) -> Result<(), AppError> {
        let base = image::open(source)
            .map_err(|e| AppError::InternalError(format!("Failed to open advert image: {}", e)))?;
        let rendered = base.resize_exact(
            dimensions.0,
            dimensions.1,
            image::imageops::FilterType::Lanczos3,
        );
        rendered
            .save(target)
            .map_err(|e| AppError::InternalError(format!("Failed to save advert image: {}", e)))?;
        Ok(())
    }

    fn render_to_temp(
        &self,
        params: &MissionParams,
        suffix: &str,
        dimensions: (u32, u32),
    ) -> Result<PathBuf, AppError> {
        let carrier = params.carrier()?;
        let source = self.advert_path(carrier);
        let target = std::env::temp_dir().join(format!("{}-{}.png", carrier.short_name, suffix));
        Self::render(&source, &target, dimensions)?;
        Ok(target)
    }
}

#[async_trait]
impl ImageService for AdvertImageService {
    async fn has_valid_advert(&self, carrier: &CarrierData) -> bool {
        let path = self.advert_path(carrier);
        path.is_file() && Self::dimensions_ok(&path)
    }

    async fn request_advert_upload(
        &self,
        origin_channel: u64,
        carrier: &CarrierData,
    ) -> Result<(), AppError> {
        self.channels
            .send_notice(
                origin_channel,
                Notice::warning(format!(
                    "**{}** needs a valid advertisement image ({}×{} px) to continue. \
                     Upload one now with `/carrier image` — waiting up to {} seconds.",
                    carrier.long_name,
                    ADVERT_DIMENSIONS.0,
                    ADVERT_DIMENSIONS.1,
                    UPLOAD_WAIT.as_secs()
                )),
            )
            .await?;

        let deadline = tokio::time::Instant::now() + UPLOAD_WAIT;
        while tokio::time::Instant::now() < deadline {
            if self.has_valid_advert(carrier).await {
                return Ok(());
            }
            tokio::time::sleep(UPLOAD_POLL).await;
        }
        Ok(())
    }

    async fn render_channel_image(&self, params: &MissionParams) -> Result<PathBuf, AppError> {
        self.render_to_temp(params, "channel", ADVERT_DIMENSIONS)
    }

    async fn render_forum_image(&self, params: &MissionParams) -> Result<PathBuf, AppError> {
        self.render_to_temp(params, "forum", FORUM_DIMENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        let buffer = image::RgbImage::new(width, height);
        buffer.save(path).unwrap();
    }

    #[test]
    fn dimensions_check_requires_exact_size() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.png");
        write_png(&good, ADVERT_DIMENSIONS.0, ADVERT_DIMENSIONS.1);
        assert!(AdvertImageService::dimensions_ok(&good));

        let wrong = dir.path().join("wrong.png");
        write_png(&wrong, 500, 285);
        assert!(!AdvertImageService::dimensions_ok(&wrong));

        let missing = dir.path().join("missing.png");
        assert!(!AdvertImageService::dimensions_ok(&missing));
    }

    #[test]
    fn render_scales_to_requested_dimensions() {
        let dir = tempfile::tempdir().unwrap();

        let source = dir.path().join("base.png");
        write_png(&source, ADVERT_DIMENSIONS.0, ADVERT_DIMENSIONS.1);

        let target = dir.path().join("forum.png");
        AdvertImageService::render(&source, &target, FORUM_DIMENSIONS).unwrap();

        assert_eq!(image::image_dimensions(&target).unwrap(), FORUM_DIMENSIONS);
    }
}
