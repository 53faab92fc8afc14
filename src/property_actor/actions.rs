//! Custom actions for the Property actor.
//!
//! A property's images live inside the property, so they are managed through
//! actions on it rather than through a resource of their own. That is also
//! why they disappear together with the property.

use crate::model::PropertyImage;

/// Image gallery operations. Images are addressed by position.
#[derive(Debug, Clone)]
pub enum PropertyAction {
    /// Appends an image. A primary image demotes any existing primary one.
    AddImage(PropertyImage),
    RemoveImage(usize),
    /// Marks one image as primary and clears the flag on the others.
    SetPrimaryImage(usize),
    ListImages,
}

/// Results from PropertyActions - variants match 1:1 with PropertyAction
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyActionResult {
    /// Position of the new image.
    AddImage(usize),
    /// The image that was removed.
    RemoveImage(PropertyImage),
    SetPrimaryImage(()),
    ListImages(Vec<PropertyImage>),
}
