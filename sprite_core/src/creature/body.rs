//! Body - the pixel-art parts a creature is drawn from

use serde::{Deserialize, Serialize};

/// Named body part slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartSlot {
    Head,
    Ears,
    Body,
    Legs,
    Tail,
    Wings,
}

impl PartSlot {
    /// Get all part slots, mandatory ones first
    pub fn all() -> &'static [PartSlot] {
        &[
            PartSlot::Head,
            PartSlot::Ears,
            PartSlot::Body,
            PartSlot::Legs,
            PartSlot::Tail,
            PartSlot::Wings,
        ]
    }

    /// Tail and wings may be missing
    pub fn is_optional(self) -> bool {
        matches!(self, PartSlot::Tail | PartSlot::Wings)
    }
}

/// A rectangular grid of palette indices.
///
/// Pixels are stored row-major; `None` is a transparent pixel. Every
/// `Some(index)` points into `colors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Option<u16>>,
    /// Palette of colour strings (e.g. "#ff6600")
    pub colors: Vec<String>,
}

impl BodyPart {
    /// A part filled with a single colour
    pub fn solid(width: u32, height: u32, color: &str) -> Self {
        BodyPart {
            width,
            height,
            pixels: vec![Some(0); (width * height) as usize],
            colors: vec![color.to_string()],
        }
    }

    /// An all-transparent part with an empty palette
    pub fn empty(width: u32, height: u32) -> Self {
        BodyPart {
            width,
            height,
            pixels: vec![None; (width * height) as usize],
            colors: Vec::new(),
        }
    }

    /// Palette index at (x, y). Out of bounds reads as transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .flatten()
    }

    /// Colour at (x, y), if the pixel is opaque
    pub fn color_at(&self, x: u32, y: u32) -> Option<&str> {
        self.pixel(x, y)
            .and_then(|index| self.colors.get(index as usize))
            .map(String::as_str)
    }

    /// Number of opaque pixels
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Check grid size and palette references
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == (self.width * self.height) as usize
            && self
                .pixels
                .iter()
                .flatten()
                .all(|&index| (index as usize) < self.colors.len())
    }
}

/// The full set of parts; head, ears, body and legs are mandatory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub head: BodyPart,
    pub ears: BodyPart,
    pub body: BodyPart,
    pub legs: BodyPart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<BodyPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wings: Option<BodyPart>,
}

impl Body {
    /// Get the part in a slot, if present
    pub fn part(&self, slot: PartSlot) -> Option<&BodyPart> {
        match slot {
            PartSlot::Head => Some(&self.head),
            PartSlot::Ears => Some(&self.ears),
            PartSlot::Body => Some(&self.body),
            PartSlot::Legs => Some(&self.legs),
            PartSlot::Tail => self.tail.as_ref(),
            PartSlot::Wings => self.wings.as_ref(),
        }
    }

    /// Iterate over present parts with their slot
    pub fn parts(&self) -> impl Iterator<Item = (PartSlot, &BodyPart)> {
        PartSlot::all()
            .iter()
            .filter_map(move |&slot| self.part(slot).map(|part| (slot, part)))
    }

    pub fn is_consistent(&self) -> bool {
        self.parts().all(|(_, part)| part.is_consistent())
    }
}
