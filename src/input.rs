// src/input.rs
//
// Instance loading. Two formats:
// - puzzle text, one point per line:  "px, py, pz @ vx, vy, vz"
// - JSON (*.json):  {"points": [{"position": [..], "velocity": [..]}], "test_area": [min, max]}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::hail::{MovingPoint, worked_instance};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON instance: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub position: [i64; 3],
    pub velocity: [i64; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub points: Vec<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_area: Option<[i64; 2]>,
}

impl Instance {
    pub fn worked() -> Self {
        Self {
            points: worked_instance().iter().map(PointRecord::from).collect(),
            test_area: None,
        }
    }

    pub fn moving_points(&self) -> Vec<MovingPoint> {
        self.points
            .iter()
            .map(|r| MovingPoint::new(r.position, r.velocity))
            .collect()
    }
}

impl From<&MovingPoint> for PointRecord {
    fn from(p: &MovingPoint) -> Self {
        Self {
            position: p.position.into(),
            velocity: p.velocity.into(),
        }
    }
}

/// Load an instance from disk; `.json` files go through serde, anything
/// else is read as puzzle text.
pub fn load(path: &Path) -> Result<Instance, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&text),
        _ => parse_text(&text),
    }
}

pub fn parse_json(text: &str) -> Result<Instance, InputError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_text(text: &str) -> Result<Instance, InputError> {
    let points = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).map_err(|message| InputError::Parse { line: i + 1, message })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instance { points, test_area: None })
}

fn parse_line(line: &str) -> Result<PointRecord, String> {
    let (pos, vel) = line
        .split_once('@')
        .ok_or_else(|| format!("expected \"position @ velocity\", got {line:?}"))?;

    Ok(PointRecord {
        position: parse_triple(pos)?,
        velocity: parse_triple(vel)?,
    })
}

fn parse_triple(s: &str) -> Result<[i64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected 3 comma-separated integers, got {:?}", s.trim()));
    };

    let num = |n: &str| n.parse::<i64>().map_err(|e| format!("bad integer {n:?}: {e}"));
    Ok([num(*x)?, num(*y)?, num(*z)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        19, 13, 30 @ -2,  1, -2
        18, 19, 22 @ -1, -1, -2
        20, 25, 34 @ -2, -2, -4

        12, 31, 28 @ -1, -2, -1
        20, 19, 15 @  1, -5, -3
    "};

    #[test]
    fn test_parse_example_text() {
        let instance = parse_text(EXAMPLE).unwrap();
        assert_eq!(instance.points.len(), 5);
        assert_eq!(
            instance.points[4],
            PointRecord { position: [20, 19, 15], velocity: [1, -5, -3] }
        );
        assert_eq!(instance.test_area, None);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let text = "1, 2, 3 @ 4, 5, 6\n1, 2 @ 4, 5, 6\n";
        match parse_text(text) {
            Err(InputError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }

        assert!(matches!(parse_text("1, 2, 3\n"), Err(InputError::Parse { line: 1, .. })));
        assert!(matches!(parse_text("1, x, 3 @ 0, 0, 0"), Err(InputError::Parse { .. })));
    }

    #[test]
    fn test_parse_json_with_test_area() {
        let json = r#"{
            "points": [
                {"position": [19, 13, 30], "velocity": [-2, 1, -2]},
                {"position": [18, 19, 22], "velocity": [-1, -1, -2]}
            ],
            "test_area": [7, 27]
        }"#;
        let instance = parse_json(json).unwrap();
        assert_eq!(instance.points.len(), 2);
        assert_eq!(instance.test_area, Some([7, 27]));
        assert_eq!(instance.moving_points()[1].velocity.z, -2);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(parse_json("{\"points\": 3}"), Err(InputError::Json(_))));
    }

    #[test]
    fn test_worked_instance_matches_constants() {
        let points = Instance::worked().moving_points();
        assert_eq!(points, crate::hail::worked_instance());
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/hail.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hail.txt"));
    }
}
