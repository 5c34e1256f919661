//! Placeholder ("dot") textures
//!
//! A 1×1 white texture substituted when a material map slot is set but has no
//! texture, so a shader sampler is never left unbound.
//!
//! The texture is created lazily on first use, exactly once, no matter how
//! many binders or threads ask for it at the same time. One
//! [`DotTextures`] is created at startup and shared as an `Arc` by every binder
//! drawing with the same device.

use std::fmt;
use std::sync::OnceLock;

/// Opaque white, RGBA8.
pub const WHITE_DOT: [u8; 4] = [255, 255, 255, 255];

/// Creates 1×1 textures on the rendering device.
pub trait TextureFactory<T>: Send + Sync {
    fn create_dot_texture(&self, label: &str, rgba: [u8; 4]) -> T;
}

impl<T, F> TextureFactory<T> for F
where
    F: Fn(&str, [u8; 4]) -> T + Send + Sync,
{
    fn create_dot_texture(&self, label: &str, rgba: [u8; 4]) -> T {
        self(label, rgba)
    }
}

/// Lazily created, process-wide placeholder textures.
pub struct DotTextures<T> {
    factory: Box<dyn TextureFactory<T>>,
    white: OnceLock<T>,
}

impl<T> DotTextures<T> {
    pub fn new(factory: impl TextureFactory<T> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            white: OnceLock::new(),
        }
    }

    /// Creates the placeholder textures if they do not exist yet.
    #[inline]
    pub fn ensure(&self) {
        self.white();
    }

    /// The 1×1 white texture, created on first call.
    pub fn white(&self) -> &T {
        self.white.get_or_init(|| {
            log::info!("Creating placeholder texture 'WhiteDot'");
            self.factory.create_dot_texture("WhiteDot", WHITE_DOT)
        })
    }

    /// Whether [`white`](Self::white) has already been created.
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.white.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for DotTextures<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DotTextures")
            .field("white", &self.white.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn white_is_created_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let dots = DotTextures::new(move |label: &str, rgba: [u8; 4]| {
            counter.fetch_add(1, Ordering::SeqCst);
            (label.to_string(), rgba)
        });

        assert!(!dots.is_initialized());
        dots.ensure();
        dots.ensure();

        assert_eq!(dots.white(), &("WhiteDot".to_string(), WHITE_DOT));
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }
}
