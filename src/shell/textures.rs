//! Texture cache
//!
//! Implements `TextureSource` the fire-and-forget way: `load` hands out a
//! handle immediately and queues the file, `populate` later decodes the
//! queued files a renderer asks for. A handle whose file never decodes
//! just stays empty, and the surface using it renders untextured.

use std::collections::HashMap;
use log::{info, warn};
use macroquad::prelude::{load_file, FilterMode, Texture2D};
use crate::material::{TextureHandle, TextureSource};

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

/// Decode PNG/JPEG bytes to RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image: {}", e))?;
    let rgba = img.to_rgba8();

    let width = u16::try_from(rgba.width())
        .map_err(|_| format!("Image too wide: {}", rgba.width()))?;
    let height = u16::try_from(rgba.height())
        .map_err(|_| format!("Image too tall: {}", rgba.height()))?;

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Load state of one queued texture
pub enum TextureState {
    Pending,
    Ready(Texture2D),
    Failed,
}

struct TextureEntry {
    path: String,
    state: TextureState,
}

/// Path-deduplicated texture store
pub struct TextureCache {
    handles: HashMap<String, TextureHandle>,
    entries: Vec<TextureEntry>,
    /// Refuse paths that are not on disk (native only)
    check_files: bool,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            entries: Vec::new(),
            check_files: cfg!(not(target_arch = "wasm32")),
        }
    }

    /// Queue every path without checking the filesystem first
    pub fn without_file_check() -> Self {
        Self { check_files: false, ..Self::new() }
    }

    /// Number of textures still waiting for `populate`
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.state, TextureState::Pending))
            .count()
    }

    /// The GPU texture, once loaded
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture2D> {
        match self.entries.get(handle.0 as usize).map(|e| &e.state) {
            Some(TextureState::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    /// Load the pending textures among `wanted`. Returns how many became
    /// ready. Other queued files stay pending and are never read.
    ///
    /// Needs a live macroquad context.
    pub async fn populate(&mut self, wanted: &[TextureHandle]) -> usize {
        let mut loaded = 0;

        for handle in wanted {
            let Some(entry) = self.entries.get_mut(handle.0 as usize) else {
                continue;
            };
            if !matches!(entry.state, TextureState::Pending) {
                continue;
            }

            let decoded = match load_file(&entry.path).await {
                Ok(bytes) => decode_image(&bytes),
                Err(e) => Err(format!("Failed to read {}: {}", entry.path, e)),
            };

            entry.state = match decoded {
                Ok(img) => {
                    let texture = Texture2D::from_rgba8(img.width, img.height, &img.rgba);
                    texture.set_filter(FilterMode::Linear);
                    loaded += 1;
                    TextureState::Ready(texture)
                }
                Err(e) => {
                    warn!("{}", e);
                    TextureState::Failed
                }
            };
        }

        info!(
            "Loaded {} of {} requested textures ({} queued files unused)",
            loaded,
            wanted.len(),
            self.pending()
        );
        loaded
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureSource for TextureCache {
    fn load(&mut self, path: &str) -> Option<TextureHandle> {
        if let Some(handle) = self.handles.get(path) {
            return Some(*handle);
        }

        if self.check_files && !std::path::Path::new(path).exists() {
            return None;
        }

        let handle = TextureHandle(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            path: path.to_string(),
            state: TextureState::Pending,
        });
        self.handles.insert(path.to_string(), handle);
        Some(handle)
    }
}
