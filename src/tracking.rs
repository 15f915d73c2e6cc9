//! Hand and head tracking input
//!
//! Landmarks arrive normalized to `[0, 1]` in camera space (21-point hand
//! model, optional nose point). This module classifies hand shapes, detects
//! pinches and maps everything into the active game's screen space.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::{Rect, distance};
use crate::sim::state::GameKind;
use crate::sim::tick::TickInput;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const HAND_LANDMARK_COUNT: usize = 21;

/// Slack on the joint ordering test for an extended finger
const EXTENSION_TOLERANCE: f64 = 0.02;
/// Thumb tip to thumb MCP distance above which the thumb counts as extended
const THUMB_EXTENDED_DISTANCE: f64 = 0.1;
/// Index-middle tip spread, relative to index length, separating a V from a 2
const VICTORY_SPREAD: f64 = 0.5;

/// One detected hand, normalized camera coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub points: [DVec2; HAND_LANDMARK_COUNT],
}

impl HandLandmarks {
    #[inline]
    pub fn point(&self, index: usize) -> DVec2 {
        self.points[index]
    }
}

/// Tracker output for one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingFrame {
    /// Capture time; the session clock is used when absent
    pub timestamp_ms: Option<u64>,
    pub hand: Option<HandLandmarks>,
    /// Nose landmark, normalized
    pub nose: Option<DVec2>,
    /// Pointer click in screen coordinates
    pub click: Option<DVec2>,
    pub confirm: bool,
    pub quit: bool,
}

/// Recognized static hand shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandShape {
    OpenPalm,
    Victory,
    /// Counting gesture, 1 to 4 fingers
    Digit(u8),
    Other,
}

/// Thumb and index tips close together
pub fn is_pinching(hand: &HandLandmarks) -> bool {
    distance(hand.point(THUMB_TIP), hand.point(INDEX_TIP)) < PINCH_THRESHOLD
}

#[inline]
fn finger_extended(hand: &HandLandmarks, tip: usize, pip: usize, mcp: usize) -> bool {
    let (tip, pip, mcp) = (hand.point(tip), hand.point(pip), hand.point(mcp));
    tip.y < pip.y + EXTENSION_TOLERANCE && pip.y < mcp.y + EXTENSION_TOLERANCE
}

/// Classify the hand from finger extension
///
/// Order matters: an open palm needs the thumb too, so four fingers with a
/// folded thumb read as `Digit(4)`.
pub fn classify_shape(hand: &HandLandmarks) -> HandShape {
    let index = finger_extended(hand, INDEX_TIP, INDEX_PIP, INDEX_MCP);
    let middle = finger_extended(hand, MIDDLE_TIP, MIDDLE_PIP, MIDDLE_MCP);
    let ring = finger_extended(hand, RING_TIP, RING_PIP, RING_MCP);
    let pinky = finger_extended(hand, PINKY_TIP, PINKY_PIP, PINKY_MCP);
    let thumb = distance(hand.point(THUMB_TIP), hand.point(THUMB_MCP)) > THUMB_EXTENDED_DISTANCE;

    let spread = distance(hand.point(INDEX_TIP), hand.point(MIDDLE_TIP));
    let index_length = distance(hand.point(INDEX_TIP), hand.point(INDEX_MCP));

    match (index, middle, ring, pinky) {
        (true, true, true, true) if thumb => HandShape::OpenPalm,
        (true, true, false, false) if spread > VICTORY_SPREAD * index_length => HandShape::Victory,
        (true, true, false, false) => HandShape::Digit(2),
        (true, false, false, false) => HandShape::Digit(1),
        (true, true, true, false) => HandShape::Digit(3),
        (true, true, true, true) => HandShape::Digit(4),
        _ => HandShape::Other,
    }
}

/// Landmark that drives the hand cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorAnchor {
    IndexTip,
    Wrist,
}

/// Per-game mapping from camera space to screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    pub anchor: CursorAnchor,
    /// Screen rectangle the unit square is stretched over
    pub region: Rect,
    /// Mirror horizontally so the screen behaves like a mirror
    pub mirror: bool,
    /// Map the nose landmark to a head position
    pub track_head: bool,
}

impl InputMapper {
    pub fn for_game(kind: GameKind) -> Self {
        match kind {
            GameKind::Shooter => Self {
                anchor: CursorAnchor::IndexTip,
                region: Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
                mirror: true,
                track_head: false,
            },
            GameKind::Quiz => Self {
                anchor: CursorAnchor::Wrist,
                region: Rect::new(0.0, 0.0, QUIZ_WIDTH, QUIZ_HEIGHT),
                mirror: true,
                track_head: false,
            },
            GameKind::Pong => Self {
                anchor: CursorAnchor::Wrist,
                region: Rect::new(TABLE_LEFT, TABLE_TOP, TABLE_RIGHT - TABLE_LEFT, TABLE_BOTTOM - TABLE_TOP),
                mirror: true,
                track_head: true,
            },
        }
    }

    /// Normalized camera point to screen coordinates
    pub fn to_screen(&self, p: DVec2) -> DVec2 {
        let x = if self.mirror { 1.0 - p.x } else { p.x };
        DVec2::new(self.region.x + x * self.region.width, self.region.y + p.y * self.region.height)
    }

    /// Build this tick's input from a tracker frame
    pub fn map(&self, frame: &TrackingFrame, now_ms: u64) -> TickInput {
        let hand = frame.hand.as_ref();
        let anchor = match self.anchor {
            CursorAnchor::IndexTip => INDEX_TIP,
            CursorAnchor::Wrist => WRIST,
        };
        TickInput {
            now_ms,
            cursor: hand.map(|h| self.to_screen(h.point(anchor))),
            head: if self.track_head {
                frame.nose.map(|n| self.to_screen(n))
            } else {
                None
            },
            pinch: hand.is_some_and(is_pinching),
            shape: hand.map(classify_shape),
            click: frame.click,
            confirm: frame.confirm,
        }
    }
}
