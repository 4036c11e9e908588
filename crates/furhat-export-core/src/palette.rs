use std::collections::HashMap;

use crate::transcript::ROBOT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Speaker colors, handed out in order of first appearance
pub const PALETTE: [Rgb; 10] = [
    Rgb::new(0, 0, 255),     // blue
    Rgb::new(255, 0, 255),   // magenta
    Rgb::new(255, 165, 0),   // orange
    Rgb::new(0, 128, 0),     // green
    Rgb::new(128, 0, 128),   // purple
    Rgb::new(165, 42, 42),   // brown
    Rgb::new(255, 192, 203), // pink
    Rgb::new(64, 224, 208),  // turquoise
    Rgb::new(0, 0, 128),     // navy
    Rgb::new(128, 128, 0),   // olive
];

/// Participant to palette index mapping for a single conversion.
///
/// The robot always owns index 0. Every other participant gets the next index
/// when first seen, wrapping after the last palette entry, so an eleventh
/// speaker shares a color with the robot.
#[derive(Debug, Clone)]
pub struct ParticipantColors {
    indices: HashMap<String, usize>,
    order: Vec<String>,
    next: usize,
}

impl Default for ParticipantColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantColors {
    pub fn new() -> Self {
        Self {
            indices: HashMap::from([(ROBOT.to_string(), 0)]),
            order: vec![ROBOT.to_string()],
            next: 1,
        }
    }

    pub fn color_for(&mut self, participant: &str) -> Rgb {
        if let Some(&index) = self.indices.get(participant) {
            return PALETTE[index];
        }
        let index = self.next;
        self.next = (self.next + 1) % PALETTE.len();
        self.indices.insert(participant.to_string(), index);
        self.order.push(participant.to_string());
        PALETTE[index]
    }

    pub fn index_of(&self, participant: &str) -> Option<usize> {
        self.indices.get(participant).copied()
    }

    /// Participants with their palette index, in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.indices[name]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
