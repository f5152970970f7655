//! Map file codec
//!
//! The map is the only channel between the editor and the game. It is a
//! whitespace-delimited text file with keyword-prefixed lines in a fixed
//! order; every real is written with six decimals. Units are meters.
//!
//! ```text
//! PixelPerMeter 50.000000
//! Gravity 9.800000
//! Ball <x> <y> <r>
//! Rect <lx> <ly> <rx> <ry>
//! Line <count>
//! <sx> <sy> <gx> <gy>
//! Goal <y>
//! GoalItem <count> <drift speed>
//! <x> <y> <r>
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use serde::{Deserialize, Serialize};

use crate::consts::MAP_PRECISION;
use crate::error::MapError;

/// Circle as stored on disk (ball or item)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleData {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Unrotated board rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectData {
    pub lx: f64,
    pub ly: f64,
    pub rx: f64,
    pub ry: f64,
}

/// Obstacle segment endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub sx: f64,
    pub sy: f64,
    pub gx: f64,
    pub gy: f64,
}

/// Everything a map file holds, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub pixel_per_meter: f64,
    pub gravity: f64,
    pub ball: CircleData,
    pub rect: RectData,
    pub lines: Vec<LineData>,
    pub goal_y: f64,
    pub item_drift_speed: f64,
    pub items: Vec<CircleData>,
}

/// Cursor over the whitespace-separated tokens of a map file
struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, MapError> {
        self.iter.next().ok_or(MapError::UnexpectedEnd { expected })
    }

    fn keyword(&mut self, expected: &'static str) -> Result<(), MapError> {
        let found = self.next(expected)?;
        if found != expected {
            return Err(MapError::Keyword {
                expected,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn real(&mut self, field: &'static str) -> Result<f64, MapError> {
        let token = self.next(field)?;
        token.parse::<f64>().map_err(|_| MapError::Number {
            field,
            token: token.to_string(),
        })
    }

    fn count(&mut self, field: &'static str) -> Result<usize, MapError> {
        let token = self.next(field)?;
        token.parse::<usize>().map_err(|_| MapError::Number {
            field,
            token: token.to_string(),
        })
    }

    fn circle(&mut self, what: &'static str) -> Result<CircleData, MapError> {
        Ok(CircleData {
            x: self.real(what)?,
            y: self.real(what)?,
            r: self.real(what)?,
        })
    }
}

impl MapData {
    /// Parse map text. Any missing or malformed token fails the whole parse.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut t = Tokens::new(text);

        t.keyword("PixelPerMeter")?;
        let pixel_per_meter = t.real("PixelPerMeter")?;

        t.keyword("Gravity")?;
        let gravity = t.real("Gravity")?;

        t.keyword("Ball")?;
        let ball = t.circle("Ball")?;

        t.keyword("Rect")?;
        let rect = RectData {
            lx: t.real("Rect")?,
            ly: t.real("Rect")?,
            rx: t.real("Rect")?,
            ry: t.real("Rect")?,
        };

        t.keyword("Line")?;
        let line_count = t.count("Line count")?;
        let mut lines = Vec::new();
        for _ in 0..line_count {
            lines.push(LineData {
                sx: t.real("Line")?,
                sy: t.real("Line")?,
                gx: t.real("Line")?,
                gy: t.real("Line")?,
            });
        }

        t.keyword("Goal")?;
        let goal_y = t.real("Goal")?;

        t.keyword("GoalItem")?;
        let item_count = t.count("GoalItem count")?;
        let item_drift_speed = t.real("GoalItem speed")?;
        let mut items = Vec::new();
        for _ in 0..item_count {
            items.push(t.circle("GoalItem")?);
        }

        if t.iter.next().is_some() {
            log::debug!("Ignoring trailing tokens after the last map item");
        }

        let map = Self {
            pixel_per_meter,
            gravity,
            ball,
            rect,
            lines,
            goal_y,
            item_drift_speed,
            items,
        };
        map.validate()?;
        Ok(map)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), MapError> {
        fn finite(field: &'static str, values: &[f64]) -> Result<(), MapError> {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(MapError::Invalid {
                    field,
                    reason: "value is not finite",
                })
            }
        }

        finite("PixelPerMeter", &[self.pixel_per_meter])?;
        if self.pixel_per_meter <= 0.0 {
            return Err(MapError::Invalid {
                field: "PixelPerMeter",
                reason: "scale must be positive",
            });
        }
        finite("Gravity", &[self.gravity])?;
        finite("Ball", &[self.ball.x, self.ball.y, self.ball.r])?;
        if self.ball.r < 0.0 {
            return Err(MapError::Invalid {
                field: "Ball",
                reason: "negative radius",
            });
        }

        let r = &self.rect;
        finite("Rect", &[r.lx, r.ly, r.rx, r.ry])?;
        if r.lx > r.rx || r.ly > r.ry {
            return Err(MapError::Invalid {
                field: "Rect",
                reason: "corners are not ordered (lx <= rx, ly <= ry)",
            });
        }

        for l in &self.lines {
            finite("Line", &[l.sx, l.sy, l.gx, l.gy])?;
        }
        finite("Goal", &[self.goal_y])?;
        finite("GoalItem speed", &[self.item_drift_speed])?;
        for c in &self.items {
            finite("GoalItem", &[c.x, c.y, c.r])?;
            if c.r < 0.0 {
                return Err(MapError::Invalid {
                    field: "GoalItem",
                    reason: "negative radius",
                });
            }
        }
        Ok(())
    }

    /// Render the map in file format
    pub fn to_text(&self) -> String {
        let p = MAP_PRECISION;
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "PixelPerMeter {:.p$}", self.pixel_per_meter);
        let _ = writeln!(out, "Gravity {:.p$}", self.gravity);
        let b = &self.ball;
        let _ = writeln!(out, "Ball {:.p$} {:.p$} {:.p$}", b.x, b.y, b.r);
        let r = &self.rect;
        let _ = writeln!(out, "Rect {:.p$} {:.p$} {:.p$} {:.p$}", r.lx, r.ly, r.rx, r.ry);
        let _ = writeln!(out, "Line {}", self.lines.len());
        for l in &self.lines {
            let _ = writeln!(out, "{:.p$} {:.p$} {:.p$} {:.p$}", l.sx, l.sy, l.gx, l.gy);
        }
        let _ = writeln!(out, "Goal {:.p$}", self.goal_y);
        let _ = writeln!(
            out,
            "GoalItem {} {:.p$}",
            self.items.len(),
            self.item_drift_speed
        );
        for c in &self.items {
            let _ = writeln!(out, "{:.p$} {:.p$} {:.p$}", c.x, c.y, c.r);
        }
        out
    }

    /// Read and parse a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&text)?;
        log::info!(
            "Loaded map {} ({} lines, {} items)",
            path.display(),
            map.lines.len(),
            map.items.len()
        );
        Ok(map)
    }

    /// Write the map file, replacing any existing one
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved map {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Small playable map shared by other module tests
    pub(crate) fn sample_map() -> MapData {
        MapData {
            pixel_per_meter: 50.0,
            gravity: 9.8,
            ball: CircleData {
                x: 4.0,
                y: 3.0,
                r: 0.5,
            },
            rect: RectData {
                lx: 1.0,
                ly: 1.0,
                rx: 15.0,
                ry: 13.0,
            },
            lines: vec![
                LineData {
                    sx: 2.0,
                    sy: 5.0,
                    gx: 10.0,
                    gy: 7.0,
                },
                LineData {
                    sx: 14.0,
                    sy: 8.0,
                    gx: 6.0,
                    gy: 10.5,
                },
            ],
            goal_y: 14.0,
            item_drift_speed: 2.0,
            items: vec![
                CircleData {
                    x: 1.0,
                    y: 14.5,
                    r: 0.6,
                },
                CircleData {
                    x: 9.0,
                    y: 14.5,
                    r: 0.6,
                },
            ],
        }
    }

    #[test]
    fn test_text_layout() {
        let text = sample_map().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "PixelPerMeter 50.000000");
        assert_eq!(lines[1], "Gravity 9.800000");
        assert_eq!(lines[2], "Ball 4.000000 3.000000 0.500000");
        assert_eq!(lines[4], "Line 2");
        assert_eq!(lines[7], "Goal 14.000000");
        assert_eq!(lines[8], "GoalItem 2 2.000000");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_two_segments_survive_exactly() {
        let mut map = sample_map();
        map.lines = vec![
            LineData {
                sx: 1.234567,
                sy: 2.345678,
                gx: 9.876543,
                gy: 8.765432,
            },
            LineData {
                sx: 0.000001,
                sy: -3.5,
                gx: 12.999999,
                gy: 4.25,
            },
        ];
        let back = MapData::parse(&map.to_text()).unwrap();
        assert_eq!(back.lines, map.lines);
    }

    #[test]
    fn test_parse_accepts_free_whitespace() {
        let text = "PixelPerMeter 40\nGravity 9.8 Ball 1 1 0.5\n\
                    Rect 0 0 10 10\nLine 1\n  0 5   10 5\nGoal 12\nGoalItem 0 1.5\n";
        let map = MapData::parse(text).unwrap();
        assert_eq!(map.pixel_per_meter, 40.0);
        assert_eq!(map.lines.len(), 1);
        assert!(map.items.is_empty());
        assert_eq!(map.item_drift_speed, 1.5);
    }

    #[test]
    fn test_parse_errors() {
        let text = sample_map().to_text();

        let truncated = &text[..text.find("Goal ").unwrap()];
        assert!(matches!(
            MapData::parse(truncated),
            Err(MapError::UnexpectedEnd { .. })
        ));

        let renamed = text.replace("Gravity", "Gravitation");
        assert!(matches!(
            MapData::parse(&renamed),
            Err(MapError::Keyword { expected: "Gravity", .. })
        ));

        let garbled = text.replace("9.800000", "9.8x");
        assert!(matches!(
            MapData::parse(&garbled),
            Err(MapError::Number { field: "Gravity", .. })
        ));

        let bad_count = text.replace("Line 2", "Line -2");
        assert!(matches!(
            MapData::parse(&bad_count),
            Err(MapError::Number { .. })
        ));
    }

    #[test]
    fn test_validation() {
        let mut map = sample_map();
        map.rect.lx = 20.0;
        assert!(matches!(map.validate(), Err(MapError::Invalid { field: "Rect", .. })));

        let mut map = sample_map();
        map.ball.r = f64::NAN;
        assert!(map.validate().is_err());

        let mut map = sample_map();
        map.pixel_per_meter = 0.0;
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("tilt_maze_definitely_missing_map.txt");
        let err = MapData::load(&path).unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tilt_maze_map_{}.txt", std::process::id()));
        let map = sample_map();
        map.save(&path).unwrap();
        let back = MapData::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back, map);
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1.0e4f64..1.0e4
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_tolerance(
            ppm in 1.0f64..500.0,
            g in -50.0f64..50.0,
            ball in (coord(), coord(), 0.0f64..10.0),
            lines in prop::collection::vec((coord(), coord(), coord(), coord()), 0..6),
            items in prop::collection::vec((coord(), coord(), 0.0f64..10.0), 0..4),
            goal in coord(),
            speed in -10.0f64..10.0,
        ) {
            let map = MapData {
                pixel_per_meter: ppm,
                gravity: g,
                ball: CircleData { x: ball.0, y: ball.1, r: ball.2 },
                rect: RectData { lx: -5.0, ly: -5.0, rx: 5.0, ry: 5.0 },
                lines: lines
                    .iter()
                    .map(|&(sx, sy, gx, gy)| LineData { sx, sy, gx, gy })
                    .collect(),
                goal_y: goal,
                item_drift_speed: speed,
                items: items.iter().map(|&(x, y, r)| CircleData { x, y, r }).collect(),
            };
            let back = MapData::parse(&map.to_text()).unwrap();
            let close = |a: f64, b: f64| (a - b).abs() <= 1e-6;

            prop_assert!(close(back.pixel_per_meter, map.pixel_per_meter));
            prop_assert!(close(back.gravity, map.gravity));
            prop_assert!(close(back.ball.x, map.ball.x) && close(back.ball.r, map.ball.r));
            prop_assert_eq!(back.lines.len(), map.lines.len());
            for (a, b) in back.lines.iter().zip(&map.lines) {
                prop_assert!(close(a.sx, b.sx) && close(a.sy, b.sy));
                prop_assert!(close(a.gx, b.gx) && close(a.gy, b.gy));
            }
            prop_assert!(close(back.goal_y, map.goal_y));
            prop_assert!(close(back.item_drift_speed, map.item_drift_speed));
            prop_assert_eq!(back.items.len(), map.items.len());
            for (a, b) in back.items.iter().zip(&map.items) {
                prop_assert!(close(a.x, b.x) && close(a.y, b.y) && close(a.r, b.r));
            }
        }
    }
}
