//! Card art handed over by the page's image preloader.
//!
//! The preloader resolves to `{ image, index }` pairs: index `-1` is the
//! shared face-down art, `0..N` are card faces. Loading itself happens
//! outside the engine; this module only turns the results into an `ArtSet`.
//!
//! ```
//! use tarot_spread::assets::{ArtSet, ImageRef, LoadedImage};
//!
//! let loaded = (-1..22).map(|index| Ok(LoadedImage::new(ImageRef((index + 1) as u32), index)));
//! let art = ArtSet::from_loaded(loaded).unwrap();
//! assert_eq!(art.face_count(), 22);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AssetError, AssetLoadFailure, CardValue};

/// Opaque handle to a decoded image owned by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub u32);

/// One successfully preloaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedImage {
    pub image: ImageRef,
    /// `-1` for the face-down art, otherwise the face index.
    pub index: i32,
}

impl LoadedImage {
    #[must_use]
    pub fn new(image: ImageRef, index: i32) -> Self {
        Self { image, index }
    }
}

/// Face-down art plus one face per card value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtSet {
    back: ImageRef,
    faces: Vec<ImageRef>,
}

impl ArtSet {
    /// Build from art that is known to be complete.
    pub fn new(back: ImageRef, faces: Vec<ImageRef>) -> Result<Self, AssetError> {
        if faces.is_empty() {
            return Err(AssetError::NoFaces);
        }
        Ok(Self { back, faces })
    }

    /// Build from preloader results.
    ///
    /// Failed images are logged and left out. Surviving faces are ordered by
    /// their index and compacted, so card value `v` shows the `v`-th
    /// surviving face.
    pub fn from_loaded<I>(results: I) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = Result<LoadedImage, AssetLoadFailure>>,
    {
        let mut back = None;
        let mut faces: Vec<LoadedImage> = Vec::new();

        for result in results {
            match result {
                Ok(loaded) if loaded.index < 0 => back = Some(loaded.image),
                Ok(loaded) => faces.push(loaded),
                Err(failure) => warn!(index = failure.index, reason = %failure.reason, "card art failed to load, skipping"),
            }
        }

        let back = back.ok_or(AssetError::MissingFaceDownArt)?;
        faces.sort_by_key(|loaded| loaded.index);
        faces.dedup_by_key(|loaded| loaded.index);
        debug!(faces = faces.len(), "card art ready");

        Self::new(back, faces.into_iter().map(|loaded| loaded.image).collect())
    }

    /// Shared face-down art.
    #[must_use]
    pub fn back(&self) -> ImageRef {
        self.back
    }

    /// Face art for a card value.
    #[must_use]
    pub fn face(&self, value: CardValue) -> Option<ImageRef> {
        self.faces.get(value.index()).copied()
    }

    /// Number of distinct faces, i.e. the largest playable deck.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_loaded_orders_faces() {
        let loaded = vec![
            Ok(LoadedImage::new(ImageRef(30), 2)),
            Ok(LoadedImage::new(ImageRef(10), 0)),
            Ok(LoadedImage::new(ImageRef(99), -1)),
            Ok(LoadedImage::new(ImageRef(20), 1)),
        ];
        let art = ArtSet::from_loaded(loaded).unwrap();

        assert_eq!(art.back(), ImageRef(99));
        assert_eq!(art.face_count(), 3);
        assert_eq!(art.face(CardValue(0)), Some(ImageRef(10)));
        assert_eq!(art.face(CardValue(2)), Some(ImageRef(30)));
        assert_eq!(art.face(CardValue(3)), None);
    }

    #[test]
    fn test_failed_images_are_skipped() {
        let loaded = vec![
            Ok(LoadedImage::new(ImageRef(0), -1)),
            Ok(LoadedImage::new(ImageRef(1), 0)),
            Err(AssetLoadFailure { index: 1, reason: "404".into() }),
            Ok(LoadedImage::new(ImageRef(3), 2)),
        ];
        let art = ArtSet::from_loaded(loaded).unwrap();

        assert_eq!(art.face_count(), 2);
        assert_eq!(art.face(CardValue(1)), Some(ImageRef(3)));
    }

    #[test]
    fn test_missing_back() {
        let loaded = vec![Ok(LoadedImage::new(ImageRef(1), 0))];
        assert_eq!(ArtSet::from_loaded(loaded), Err(AssetError::MissingFaceDownArt));
    }

    #[test]
    fn test_no_faces() {
        let loaded = vec![Ok(LoadedImage::new(ImageRef(1), -1))];
        assert_eq!(ArtSet::from_loaded(loaded), Err(AssetError::NoFaces));
    }
}
