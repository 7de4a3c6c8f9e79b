use std::sync::Arc;

use crate::assets::store::{ImageAsset, ImageFetcher};
use crate::canvas::DrawTarget;
use crate::foundation::core::{Point, Rect, Surface};
use crate::scene::config::ImageLayerConfig;

/// Raster image centered on the surface plus an offset.
#[derive(Clone, Debug)]
pub struct ImageLayer {
    asset: ImageAsset,
    width: f64,
    height: f64,
    offset: Point,
    alpha: f64,
}

impl ImageLayer {
    /// Layer over an asset handle.
    pub fn new(asset: ImageAsset, cfg: &ImageLayerConfig) -> Self {
        Self {
            asset,
            width: cfg.width,
            height: cfg.height,
            offset: cfg.offset,
            alpha: cfg.alpha,
        }
    }

    /// Underlying asset.
    pub fn asset(&self) -> &ImageAsset {
        &self.asset
    }

    /// Destination rectangle on `surface`.
    pub fn dest(&self, surface: Surface) -> Rect {
        let x = (surface.w() - self.width) / 2.0 + self.offset.x;
        let y = (surface.h() - self.height) / 2.0 + self.offset.y;
        Rect::new(x, y, x + self.width, y + self.height)
    }

    /// Blit the image if it is ready; otherwise draw nothing.
    pub fn render(&self, target: &mut dyn DrawTarget, surface: Surface) {
        if surface.is_empty() {
            return;
        }
        let Some(image) = self.asset.image() else {
            return;
        };
        target.save();
        target.set_global_alpha(self.alpha);
        target.draw_image(image, self.dest(surface));
        target.restore();
    }
}

/// Image layers in draw order, primary first.
#[derive(Clone, Debug, Default)]
pub struct ImageLayers {
    layers: Vec<ImageLayer>,
}

impl ImageLayers {
    /// Start background loads for every configured layer.
    ///
    /// Without a fetcher every layer is permanently not ready.
    pub fn load(cfgs: &[ImageLayerConfig], fetcher: Option<&Arc<dyn ImageFetcher>>) -> Self {
        let layers = cfgs
            .iter()
            .map(|cfg| {
                let asset = match fetcher {
                    Some(f) => ImageAsset::spawn_load(&cfg.source, Arc::clone(f)),
                    None => {
                        tracing::debug!(source = %cfg.source, "no image fetcher configured");
                        ImageAsset::failed(&cfg.source)
                    }
                };
                ImageLayer::new(asset, cfg)
            })
            .collect();
        Self { layers }
    }

    /// Build from prepared layers.
    pub fn from_layers(layers: Vec<ImageLayer>) -> Self {
        Self { layers }
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[ImageLayer] {
        &self.layers
    }

    /// Draw every ready layer in order.
    pub fn render(&self, target: &mut dyn DrawTarget, surface: Surface) {
        for layer in &self.layers {
            layer.render(target, surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/images.rs"]
mod tests;
