//! Seven-segment score display
//!
//! Each digit is drawn from two bar shapes: a horizontal bar for the top,
//! middle and bottom segments and a vertical bar for the four sides. A minus
//! glyph (one horizontal bar) sits left of the tens digit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bar shape used by a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bar {
    /// 0.3 wide, 0.1 tall
    Horizontal,
    /// 0.05 wide, 0.3 tall
    Vertical,
}

/// Segment slots of one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Bottom,
    Middle,
    Top,
    LowerLeft,
    UpperLeft,
    LowerRight,
    UpperRight,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Bottom,
        Segment::Middle,
        Segment::Top,
        Segment::LowerLeft,
        Segment::UpperLeft,
        Segment::LowerRight,
        Segment::UpperRight,
    ];

    #[inline]
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn bar(self) -> Bar {
        match self {
            Segment::Bottom | Segment::Middle | Segment::Top => Bar::Horizontal,
            _ => Bar::Vertical,
        }
    }

    /// Lower-left corner of the bar relative to the digit origin
    pub fn offset(self) -> Vec2 {
        match self {
            Segment::Bottom => Vec2::new(0.05, 0.0),
            Segment::Middle => Vec2::new(0.05, 0.3),
            Segment::Top => Vec2::new(0.05, 0.6),
            Segment::LowerLeft => Vec2::new(0.0, 0.05),
            Segment::UpperLeft => Vec2::new(0.0, 0.35),
            Segment::LowerRight => Vec2::new(0.35, 0.05),
            Segment::UpperRight => Vec2::new(0.35, 0.35),
        }
    }
}

/// Set of lit segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentMask(pub u8);

impl SegmentMask {
    pub const ALL: SegmentMask = SegmentMask(0b111_1111);

    pub fn from_segments(segments: &[Segment]) -> Self {
        Self(segments.iter().fold(0, |acc, s| acc | s.bit()))
    }

    #[inline]
    pub fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lit segments in slot order
    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

/// Segment pattern for a decimal digit. Digits above 9 light nothing.
pub fn digit_segments(digit: u8) -> SegmentMask {
    use Segment::*;
    let lit: &[Segment] = match digit {
        0 => &[Bottom, Top, LowerLeft, UpperLeft, LowerRight, UpperRight],
        1 => &[LowerRight, UpperRight],
        2 => &[Bottom, Middle, Top, LowerLeft, UpperRight],
        3 => &[Bottom, Middle, Top, LowerRight, UpperRight],
        4 => &[Middle, UpperLeft, LowerRight, UpperRight],
        5 => &[Bottom, Middle, Top, UpperLeft, LowerRight],
        6 => &[Bottom, Middle, Top, LowerLeft, UpperLeft, LowerRight],
        7 => &[Top, LowerRight, UpperRight],
        8 => &Segment::ALL,
        9 => &[Bottom, Middle, Top, UpperLeft, LowerRight, UpperRight],
        _ => &[],
    };
    SegmentMask::from_segments(lit)
}

/// Where the display is drawn
pub const TENS_ORIGIN: Vec2 = Vec2::new(3.05, 3.15);
pub const UNITS_ORIGIN: Vec2 = Vec2::new(3.55, 3.15);
pub const MINUS_POS: Vec2 = Vec2::new(2.5, 3.45);

/// Derived score display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDisplay {
    pub negative: bool,
    pub tens: u8,
    pub units: u8,
    pub tens_segments: SegmentMask,
    pub units_segments: SegmentMask,
}

impl ScoreDisplay {
    /// Two digits of |score|; anything past 99 wraps to the last two digits
    pub fn from_score(score: i32) -> Self {
        let abs = score.unsigned_abs();
        let tens = ((abs / 10) % 10) as u8;
        let units = (abs % 10) as u8;
        Self {
            negative: score < 0,
            tens,
            units,
            tens_segments: digit_segments(tens),
            units_segments: digit_segments(units),
        }
    }

    /// Every lit bar as (shape, lower-left corner), minus glyph first
    pub fn bars(&self) -> Vec<(Bar, Vec2)> {
        let mut bars = Vec::with_capacity(15);
        if self.negative {
            bars.push((Bar::Horizontal, MINUS_POS));
        }
        for (origin, mask) in [
            (TENS_ORIGIN, self.tens_segments),
            (UNITS_ORIGIN, self.units_segments),
        ] {
            bars.extend(mask.iter().map(|s| (s.bar(), origin + s.offset())));
        }
        bars
    }
}
