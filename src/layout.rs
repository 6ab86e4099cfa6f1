//! Fret strip geometry, loaded from `.frets` files.
//!
//! The layout is read once at startup and turned into the fixed list of
//! zones the `FretSelector` hit-tests against.

use std::fs;
use std::path::Path;

use crate::error::LayoutError;
use crate::fret::{FretZone, Rect};

/// Fret strip layout. Zones sit left to right starting at the origin, each
/// one `width_step` wider and `height_step` shorter than the one before.
#[derive(Debug, Clone, PartialEq)]
pub struct FretLayout {
    /// Number of frets (1..=24)
    pub frets: u32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Width of the first (leftmost) fret
    pub fret_width: f32,
    pub width_step: f32,
    /// Height of the first fret
    pub fret_height: f32,
    pub height_step: f32,
    /// Leftmost fret carries the highest label when set
    pub descending: bool,
}

impl Default for FretLayout {
    fn default() -> Self {
        Self {
            frets: 12,
            origin_x: 0.0,
            origin_y: 0.0,
            fret_width: 4.0,
            width_step: 0.5,
            fret_height: 3.0,
            height_step: 0.0,
            descending: true,
        }
    }
}

impl FretLayout {
    /// Zones in left-to-right order, labelled 1..=frets
    pub fn zones(&self) -> Vec<FretZone> {
        let mut x = self.origin_x;
        (0..self.frets)
            .map(|i| {
                let width = self.fret_width + i as f32 * self.width_step;
                let height = (self.fret_height - i as f32 * self.height_step).max(1.0);
                let label = if self.descending { self.frets - i } else { i + 1 };
                let zone = FretZone {
                    label: label as i32,
                    bounds: Rect::new(x, self.origin_y, width, height),
                };
                x += width;
                zone
            })
            .collect()
    }

    /// Total width of the strip
    pub fn width(&self) -> f32 {
        self.zones().last().map_or(0.0, |z| z.bounds.right - self.origin_x)
    }

    /// Height of the tallest fret
    pub fn height(&self) -> f32 {
        self.zones()
            .iter()
            .map(|z| z.bounds.height())
            .fold(0.0, f32::max)
    }
}

/// Parse a single "key: value" line. Returns (key, value) or None.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.split('#').next().unwrap_or("").trim();
    let (key, value) = trimmed.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn parse_number(value: &str, key: &str, line: usize) -> Result<f32, LayoutError> {
    value.parse::<f32>().ok().filter(|v| v.is_finite()).ok_or_else(|| LayoutError::Parse {
        line,
        message: format!("invalid {}: {}", key, value),
    })
}

/// A width or height: a number greater than zero
fn parse_size(value: &str, key: &str, line: usize) -> Result<f32, LayoutError> {
    let size = parse_number(value, key, line)?;
    if size <= 0.0 {
        return Err(LayoutError::Parse {
            line,
            message: format!("{} must be positive", key),
        });
    }
    Ok(size)
}

/// Parse layout text.
///
/// Format (one per line, optional comments with #, every key optional):
/// ```text
/// frets: 12
/// origin_x: 0
/// origin_y: 0
/// fret_width: 4
/// width_step: 0.5
/// fret_height: 3
/// height_step: 0
/// descending: true
/// ```
pub fn parse(content: &str) -> Result<FretLayout, LayoutError> {
    let mut layout = FretLayout::default();

    for (line_idx, raw) in content.lines().enumerate() {
        let line = line_idx + 1;
        let Some((key, value)) = parse_line(raw) else {
            if raw.split('#').next().unwrap_or("").trim().is_empty() {
                continue;
            }
            return Err(LayoutError::Parse {
                line,
                message: format!("expected 'key: value', got '{}'", raw.trim()),
            });
        };

        match key {
            "frets" => {
                let frets: u32 = value.parse().map_err(|_| LayoutError::Parse {
                    line,
                    message: format!("invalid frets: {}", value),
                })?;
                if !(1..=24).contains(&frets) {
                    return Err(LayoutError::Parse {
                        line,
                        message: "frets must be 1-24".into(),
                    });
                }
                layout.frets = frets;
            }
            "origin_x" => layout.origin_x = parse_number(value, key, line)?,
            "origin_y" => layout.origin_y = parse_number(value, key, line)?,
            "fret_width" => layout.fret_width = parse_size(value, key, line)?,
            "width_step" => {
                let step = parse_number(value, key, line)?;
                if step < 0.0 {
                    return Err(LayoutError::Parse {
                        line,
                        message: "width_step must not be negative".into(),
                    });
                }
                layout.width_step = step;
            }
            "fret_height" => layout.fret_height = parse_size(value, key, line)?,
            "height_step" => layout.height_step = parse_number(value, key, line)?,
            "descending" => {
                layout.descending = value.parse().map_err(|_| LayoutError::Parse {
                    line,
                    message: format!("invalid descending (expected true/false): {}", value),
                })?;
            }
            _ => {
                return Err(LayoutError::Parse {
                    line,
                    message: format!("unknown key '{}'", key),
                });
            }
        }
    }

    Ok(layout)
}

/// Load a layout from a `.frets` file
pub fn load(path: &Path) -> Result<FretLayout, LayoutError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zones() {
        let zones = FretLayout::default().zones();
        assert_eq!(zones.len(), 12);
        assert_eq!(zones[0].label, 12);
        assert_eq!(zones[11].label, 1);
        assert_eq!(zones[0].bounds.left, 0.0);
        assert_eq!(zones[0].bounds.width(), 4.0);
        assert_eq!(zones[11].bounds.width(), 9.5);
    }

    #[test]
    fn test_zones_partition_the_strip() {
        let zones = FretLayout::default().zones();
        for pair in zones.windows(2) {
            assert_eq!(pair[0].bounds.right, pair[1].bounds.left);
        }
        let mut labels: Vec<i32> = zones.iter().map(|z| z.label).collect();
        labels.sort();
        assert_eq!(labels, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_parse_overrides() {
        let input = "# narrow strip\nfrets: 5\nfret_width: 2\nwidth_step: 0\ndescending: false\n";
        let layout = parse(input).unwrap();
        assert_eq!(layout.frets, 5);
        assert!(!layout.descending);
        let zones = layout.zones();
        assert_eq!(zones[0].label, 1);
        assert_eq!(zones[4].label, 5);
        assert_eq!(layout.width(), 10.0);
        assert_eq!(layout.height(), 3.0);
    }

    #[test]
    fn test_trailing_comments() {
        let layout = parse("fret_height: 2  # short\n").unwrap();
        assert_eq!(layout.fret_height, 2.0);
    }

    #[test]
    fn test_height_taper_floors_at_one() {
        let layout = parse("fret_height: 4\nheight_step: 1\n").unwrap();
        let zones = layout.zones();
        assert_eq!(zones[0].bounds.height(), 4.0);
        assert_eq!(zones[11].bounds.height(), 1.0);
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = parse("frets: 12\ncapo: 3").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown key 'capo'");
    }

    #[test]
    fn test_bad_size_reports_its_own_line() {
        let err = parse("fret_width: -1\nfrets: 12\nfret_height: 3\n\n# end\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: fret_width must be positive");

        let err = parse("frets: 6\nwidth_step: -0.5\nfrets: 7").unwrap_err();
        assert_eq!(err.to_string(), "line 2: width_step must not be negative");

        let err = parse("frets: 6\nfret_height: 0").unwrap_err();
        assert_eq!(err.to_string(), "line 2: fret_height must be positive");
    }

    #[test]
    fn test_bad_values() {
        assert!(parse("frets: 0").is_err());
        assert!(parse("frets: 30").is_err());
        assert!(parse("fret_width: wide").is_err());
        assert!(parse("descending: maybe").is_err());
        assert!(parse("fret_width: -1").is_err());
        assert!(parse("just some text").is_err());
    }
}
