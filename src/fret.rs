//! Turning pointer positions on the fret strip into a transpose offset.
//!
//! Move events pick a candidate fret; a release commits it to the voicing
//! sequence. Only the first contact point of an event is looked at.

use tracing::debug;

use crate::voicing::VoicingSequence;

/// A pointer position in the caller's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds. The left and top edges are inside, the right and
/// bottom edges are not, so neighbouring zones never both claim a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// One fret of the strip and the offset it stands for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretZone {
    /// Semitone offset committed when this fret is released on
    pub label: i32,
    pub bounds: Rect,
}

/// Tracks which fret the pointer is over between a drag and its release
#[derive(Debug, Clone)]
pub struct FretSelector {
    zones: Vec<FretZone>,
    hovered: Option<usize>,
}

impl FretSelector {
    pub fn new(zones: Vec<FretZone>) -> Self {
        Self {
            zones,
            hovered: None,
        }
    }

    pub fn zones(&self) -> &[FretZone] {
        &self.zones
    }

    /// Index of the zone under the pointer, if any
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }

    /// Offset that a release right now would commit
    pub fn candidate(&self) -> Option<i32> {
        self.hovered.map(|i| self.zones[i].label)
    }

    /// Zone containing `point`. With overlapping zones the last one wins.
    pub fn zone_at(&self, point: Point) -> Option<usize> {
        self.zones.iter().rposition(|zone| zone.bounds.contains(point))
    }

    /// Handle a move event. Returns the new candidate offset.
    ///
    /// A point outside every zone loses the hover, and with it the
    /// candidate. An event with no points changes nothing.
    pub fn pointer_moved(&mut self, points: &[Point]) -> Option<i32> {
        let Some(&first) = points.first() else {
            return self.candidate();
        };
        let hit = self.zone_at(first);
        if hit != self.hovered {
            debug!("Fret hover {:?} -> {:?}", self.hovered, hit);
        }
        self.hovered = hit;
        self.candidate()
    }

    /// Handle a release event. Commits the candidate into `voicings` and
    /// returns it; with nothing hovered the offset is left alone.
    pub fn pointer_released(&mut self, voicings: &mut VoicingSequence) -> Option<i32> {
        let committed = self.candidate();
        self.hovered = None;
        match committed {
            Some(offset) => {
                debug!("Committing fret offset {}", offset);
                voicings.set_offset(offset);
            }
            None => debug!("Release outside the frets, offset stays {}", voicings.offset()),
        }
        committed
    }
}
