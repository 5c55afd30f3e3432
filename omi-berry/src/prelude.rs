//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Label};

pub use crate::data::{Channel, ChannelImage, ChannelSet, Feature, Fluorophore, LabelImage};

pub use crate::options::OmiOptions;
pub use crate::record::{OmiRecord, RegionKey, RegionRecord};
pub use crate::shape::{PropertyRequest, ShapeProperty};

pub use crate::{regionprops_omi, OmiError, OmiResult};

#[cfg(feature = "rayon")]
pub use crate::par_regionprops_omi;
