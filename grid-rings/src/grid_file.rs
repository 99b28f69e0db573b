//! Pointing grid file (`.grd`) reading and writing
//!
//! A grid file is line oriented text with one value per non-blank line:
//!
//! ```text
//! 2                     number of points
//! -0.895125152281524    azimuth (radians)
//! 1.08333591598397      altitude (radians)
//! "true"                is mouse point
//! "False"               only slew
//! 1                     pier side
//! ...                   (5 lines per point)
//! ```
//!
//! Blank lines are ignored. Boolean fields may be quoted and are
//! case-insensitive; any value other than `true` reads as false.

use std::f64::consts::PI;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Number of non-blank lines describing one point
pub const LINES_PER_POINT: usize = 5;

/// Errors that can occur while reading a grid file
#[derive(Error, Debug)]
pub enum GridParseError {
    #[error("failed to read grid file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("grid file is empty: missing point count")]
    MissingPointCount,
    #[error("line {line}: invalid point count {value:?}")]
    InvalidPointCount { line: usize, value: String },
    #[error("grid file truncated: expected {expected} value lines, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("line {line}: invalid {field} value {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// One pointing entry as stored in a grid file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    /// Azimuth as stored (radians)
    pub azimuth: f64,
    /// Altitude as stored (radians)
    pub altitude: f64,
    /// Point was placed by hand in the planner
    pub is_mouse_point: bool,
    /// Mount only slews through this point; no calibration exposure
    pub only_slew: bool,
    /// Mount pier-side code
    pub pier_side: i32,
}

impl RawPoint {
    /// Build a calibration point from azimuth/altitude in degrees.
    ///
    /// Pier side follows the planner export rule: 0 east of the meridian
    /// (azimuth < 180°), 1 otherwise.
    pub fn from_horizontal_degrees(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth: azimuth_deg * (PI / 180.0),
            altitude: altitude_deg * (PI / 180.0),
            is_mouse_point: false,
            only_slew: false,
            pier_side: if azimuth_deg < 180.0 { 0 } else { 1 },
        }
    }
}

/// Contents of a grid file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFile {
    pub points: Vec<RawPoint>,
}

/// Non-blank line with its 1-based position in the source text
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

fn parse_number<T: std::str::FromStr>(
    line: &SourceLine<'_>,
    field: &'static str,
) -> Result<T, GridParseError> {
    line.text
        .parse::<T>()
        .map_err(|_| GridParseError::InvalidNumber {
            line: line.number,
            field,
            value: line.text.to_string(),
        })
}

/// Angles must be finite for the coordinate transform to mean anything
fn parse_angle(line: &SourceLine<'_>, field: &'static str) -> Result<f64, GridParseError> {
    let value: f64 = parse_number(line, field)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GridParseError::InvalidNumber {
            line: line.number,
            field,
            value: line.text.to_string(),
        })
    }
}

fn parse_flag(text: &str) -> bool {
    text.trim_matches('"').eq_ignore_ascii_case("true")
}

impl GridFile {
    pub fn new(points: Vec<RawPoint>) -> Self {
        Self { points }
    }

    /// Read and parse a grid file.
    ///
    /// The file is read fully and closed before parsing starts.
    pub fn read(path: &Path) -> Result<Self, GridParseError> {
        let text = std::fs::read_to_string(path).map_err(|source| GridParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded grid file {}", path.display());
        Self::parse(&text)
    }

    /// Parse grid file text
    pub fn parse(text: &str) -> Result<Self, GridParseError> {
        let lines: Vec<SourceLine<'_>> = text
            .lines()
            .enumerate()
            .map(|(i, l)| SourceLine {
                number: i + 1,
                text: l.trim(),
            })
            .filter(|l| !l.text.is_empty())
            .collect();

        let (count_line, values) = lines
            .split_first()
            .ok_or(GridParseError::MissingPointCount)?;
        let invalid_count = || GridParseError::InvalidPointCount {
            line: count_line.number,
            value: count_line.text.to_string(),
        };
        let count: usize = count_line.text.parse().map_err(|_| invalid_count())?;
        let expected = count
            .checked_mul(LINES_PER_POINT)
            .ok_or_else(invalid_count)?;
        if values.len() < expected {
            return Err(GridParseError::Truncated {
                expected,
                found: values.len(),
            });
        }
        if values.len() > expected {
            log::warn!(
                "Ignoring {} trailing lines after {} points",
                values.len() - expected,
                count
            );
        }

        let points = values[..expected]
            .chunks_exact(LINES_PER_POINT)
            .map(|chunk| {
                Ok(RawPoint {
                    azimuth: parse_angle(&chunk[0], "azimuth")?,
                    altitude: parse_angle(&chunk[1], "altitude")?,
                    is_mouse_point: parse_flag(chunk[2].text),
                    only_slew: parse_flag(chunk[3].text),
                    pier_side: parse_number(&chunk[4], "pier side")?,
                })
            })
            .collect::<Result<Vec<_>, GridParseError>>()?;

        log::debug!("Parsed {} grid points", points.len());
        Ok(Self { points })
    }

    /// Write the grid in file format
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.points.len())?;
        for p in &self.points {
            writeln!(out, "{}", p.azimuth)?;
            writeln!(out, "{}", p.altitude)?;
            writeln!(out, "\"{}\"", if p.is_mouse_point { "true" } else { "false" })?;
            writeln!(out, "\"{}\"", if p.only_slew { "True" } else { "False" })?;
            writeln!(out, "{}", p.pier_side)?;
        }
        Ok(())
    }

    /// Write the grid to a file, replacing any existing content
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "2\n\
        -0.895125152281524\n\
        1.08333591598397\n\
        \"true\"\n\
        \"False\"\n\
        1\n\
        \n\
        0.5\n\
        0.25\n\
        false\n\
        \"TRUE\"\n\
        0\n";

    #[test]
    fn test_parse_sample() {
        let grid = GridFile::parse(SAMPLE).unwrap();
        assert_eq!(grid.points.len(), 2);

        let first = grid.points[0];
        assert_relative_eq!(first.azimuth, -0.895125152281524);
        assert_relative_eq!(first.altitude, 1.08333591598397);
        assert!(first.is_mouse_point);
        assert!(!first.only_slew);
        assert_eq!(first.pier_side, 1);

        let second = grid.points[1];
        assert!(!second.is_mouse_point);
        assert!(second.only_slew);
        assert_eq!(second.pier_side, 0);
    }

    #[test]
    fn test_flag_convention() {
        assert!(parse_flag("true"));
        assert!(parse_flag("\"True\""));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("\"False\""));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            GridFile::parse("\n\n  \n"),
            Err(GridParseError::MissingPointCount)
        ));
    }

    #[test]
    fn test_zero_points() {
        let grid = GridFile::parse("0\n").unwrap();
        assert!(grid.points.is_empty());
    }

    #[test]
    fn test_invalid_count() {
        let err = GridFile::parse("\nabc\n").unwrap_err();
        match err {
            GridParseError::InvalidPointCount { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            GridFile::parse("-1\n"),
            Err(GridParseError::InvalidPointCount { .. })
        ));
    }

    #[test]
    fn test_truncated() {
        let err = GridFile::parse("2\n0.1\n0.2\n\"false\"\n\"False\"\n0\n0.3\n").unwrap_err();
        assert!(matches!(
            err,
            GridParseError::Truncated {
                expected: 10,
                found: 6
            }
        ));
    }

    #[test]
    fn test_invalid_number_reports_source_line() {
        let err = GridFile::parse("1\n\n0.1\nnorth\n\"false\"\n\"False\"\n0\n").unwrap_err();
        match err {
            GridParseError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 4);
                assert_eq!(field, "altitude");
                assert_eq!(value, "north");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_angles_rejected() {
        let text = "2\n0.1\n0.2\n\"false\"\n\"False\"\n0\nNaN\n0.2\n\"false\"\n\"False\"\n0\n";
        let err = GridFile::parse(text).unwrap_err();
        match err {
            GridParseError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 7);
                assert_eq!(field, "azimuth");
                assert_eq!(value, "NaN");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            GridFile::parse("1\n0.1\ninf\n\"false\"\n\"False\"\n0\n"),
            Err(GridParseError::InvalidNumber {
                line: 3,
                field: "altitude",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_pier_side() {
        let err = GridFile::parse("1\n0.1\n0.2\n\"false\"\n\"False\"\n1.5\n").unwrap_err();
        assert!(matches!(
            err,
            GridParseError::InvalidNumber {
                field: "pier side",
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_lines_ignored() {
        let grid = GridFile::parse("1\n0.1\n0.2\n\"false\"\n\"False\"\n0\nextra\n").unwrap();
        assert_eq!(grid.points.len(), 1);
    }

    #[test]
    fn test_write_then_parse() {
        let mut slewing = RawPoint::from_horizontal_degrees(200.0, 35.0);
        slewing.only_slew = true;
        slewing.is_mouse_point = true;
        let grid = GridFile::new(vec![RawPoint::from_horizontal_degrees(45.0, 60.0), slewing]);

        let mut buf = Vec::new();
        grid.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("2\n"));
        assert!(text.contains("\"True\""));

        assert_eq!(GridFile::parse(&text).unwrap(), grid);
    }

    #[test]
    fn test_from_horizontal_degrees() {
        let east = RawPoint::from_horizontal_degrees(90.0, 30.0);
        assert_relative_eq!(east.azimuth, PI / 2.0);
        assert_relative_eq!(east.altitude, PI / 6.0);
        assert_eq!(east.pier_side, 0);
        assert!(!east.only_slew);

        let west = RawPoint::from_horizontal_degrees(180.0, 30.0);
        assert_eq!(west.pier_side, 1);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            GridFile::read(Path::new("/nonexistent/grid.grd")),
            Err(GridParseError::Io { .. })
        ));
    }
}
