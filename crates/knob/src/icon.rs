use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOOKUP_SIZE: u16 = 128;

/// An icon theme name, or a path to an image file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(LOOKUP_SIZE)
        .with_scale(1)
        .with_cache()
        .find()
}
