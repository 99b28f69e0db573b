//! Console reporting of ring analyses

use crate::analysis::RingAnalysis;
use crate::fit::{is_valid_sample, MIN_FIT_SAMPLES};
use crate::transform::TransformedPoint;
use std::io::Write;

/// Write the human-readable ring report
pub fn write_report<W: Write>(out: &mut W, analysis: &RingAnalysis) -> std::io::Result<()> {
    writeln!(
        out,
        "points={} rings={}",
        analysis.point_count(),
        analysis.ring_count()
    )?;
    writeln!(out, "ring summary: dec_mean, count, HA step stats")?;
    for s in &analysis.summaries {
        writeln!(
            out,
            "{:8.3}  {:2}  mean_step={:7.3}  spread={:7.3}  std={:7.3}",
            s.mean_dec_deg, s.count, s.steps.mean, s.steps.spread, s.steps.std_dev
        )?;
    }

    writeln!(out)?;
    writeln!(out, "ring mean dec spacings:")?;
    let spacings: Vec<String> = analysis
        .dec_spacings
        .iter()
        .map(|d| format!("{d:7.3}"))
        .collect();
    writeln!(out, "{}", spacings.join(" "))?;
    writeln!(out)?;

    match &analysis.fit {
        Some(fit) => writeln!(
            out,
            "fit: count ≈ {:.3} * cos(dec)^{:.3}",
            fit.coefficient, fit.exponent
        ),
        None => {
            let qualifying = analysis
                .summaries
                .iter()
                .filter(|s| is_valid_sample(s, analysis.config.fit_cos_floor))
                .count();
            writeln!(
                out,
                "fit: insufficient data ({qualifying} qualifying rings, need {MIN_FIT_SAMPLES})"
            )
        }
    }
}

/// Write one line per transformed point
pub fn write_points<W: Write>(out: &mut W, points: &[TransformedPoint]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>9} {:>9} {:>9} {:>9} {:>4} {:>5}",
        "dec", "ha", "az", "alt", "pier", "mouse"
    )?;
    for p in points {
        writeln!(
            out,
            "{:9.3} {:9.3} {:9.3} {:9.3} {:4} {:>5}",
            p.dec_deg, p.hour_angle_deg, p.azimuth_deg, p.altitude_deg, p.pier_side, p.is_mouse_point
        )?;
    }
    Ok(())
}

/// Write the analysis as pretty-printed JSON
pub fn write_json<W: Write>(out: &mut W, analysis: &RingAnalysis) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, analysis)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::grid_file::RawPoint;

    fn render(analysis: &RingAnalysis) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, analysis).unwrap();
        String::from_utf8(buf).unwrap()
    }

    /// Eight points on the 30° and 60° altitude circles
    fn altitude_circles() -> Vec<RawPoint> {
        [30.0, 60.0]
            .iter()
            .flat_map(|&alt| {
                [0.0, 90.0, 180.0, 270.0]
                    .into_iter()
                    .map(move |az| RawPoint::from_horizontal_degrees(az, alt))
            })
            .collect()
    }

    #[test]
    fn test_report_without_fit() {
        let analysis = RingAnalysis::run(&[], &AnalysisConfig::default());
        let text = render(&analysis);
        assert!(text.starts_with("points=0 rings=0\n"));
        assert!(text.contains("fit: insufficient data (0 qualifying rings, need 2)"));
        assert!(!text.contains("count ≈"));
    }

    #[test]
    fn test_report_lists_each_ring() {
        let points = vec![
            RawPoint::from_horizontal_degrees(0.0, 90.0),
            RawPoint::from_horizontal_degrees(180.0, 10.0),
        ];
        let analysis = RingAnalysis::run(&points, &AnalysisConfig::default());
        let text = render(&analysis);

        assert!(text.starts_with("points=2 rings=2\n"));
        assert!(text.contains("  48.000   1  mean_step=  0.000  spread=  0.000  std=  0.000"));
        assert!(text.ends_with("\nfit: count ≈ 1.000 * cos(dec)^0.000\n"));
    }

    #[test]
    fn test_json_fit_is_null_when_absent() {
        let analysis = RingAnalysis::run(&[], &AnalysisConfig::default());
        let mut buf = Vec::new();
        write_json(&mut buf, &analysis).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value["fit"].is_null());
        assert_eq!(value["config"]["observer_latitude_deg"], 48.0);
        assert!(value.get("rings").is_none());
    }

    #[test]
    fn test_json_contains_summaries() {
        let analysis = RingAnalysis::run(&altitude_circles(), &AnalysisConfig::default());
        let mut buf = Vec::new();
        write_json(&mut buf, &analysis).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["points"].as_array().unwrap().len(), 8);
        assert!(!value["summaries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_points_table() {
        let analysis = RingAnalysis::run(&altitude_circles(), &AnalysisConfig::default());
        let mut buf = Vec::new();
        write_points(&mut buf, &analysis.points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().next().unwrap().contains("dec"));
    }
}
