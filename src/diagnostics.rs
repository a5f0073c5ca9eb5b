//! Optional per-step diagnostics for polycurve construction.
//!
//! An observer attached to [`SegCreator`](crate::operations::polycurve::SegCreator)
//! sees the partially built segment list after every vertex. Observers only
//! read; the returned segments are identical with or without one.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DiagnosticsError, Result};
use crate::geometry::segment::Segment;
use crate::geometry::vertex::Vertex;
use crate::math::Point2;

/// Receives the segment list after each construction step.
pub trait StepObserver {
    /// Called once per input vertex, in order.
    ///
    /// # Errors
    ///
    /// Any error aborts construction and is returned to the caller.
    fn on_step(&mut self, step: usize, vertex: &Vertex, segments: &[Segment]) -> Result<()>;
}

/// Keeps a snapshot of the segment list after every step.
#[derive(Debug, Default, Clone)]
pub struct StepRecorder {
    pub steps: Vec<Vec<Segment>>,
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, _step: usize, _vertex: &Vertex, segments: &[Segment]) -> Result<()> {
        self.steps.push(segments.to_vec());
        Ok(())
    }
}

/// Writes one HTML page with an inline SVG plot per construction step.
///
/// Files are named `{name}_{step:03}.html` inside `dir`.
#[derive(Debug, Clone)]
pub struct HtmlStepWriter {
    dir: PathBuf,
    name: String,
}

impl HtmlStepWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Path of the page written for `step`.
    #[must_use]
    pub fn path_for(&self, step: usize) -> PathBuf {
        self.dir.join(format!("{}_{step:03}.html", self.name))
    }

    /// Renders the page for one step without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError::Format` if a value fails to format.
    pub fn render(&self, step: usize, vertex: &Vertex, segments: &[Segment]) -> Result<String> {
        let mut points: Vec<Point2> = vec![vertex.point];
        for seg in segments {
            points.extend([seg.p1(), seg.p2()]);
            points.extend(seg.midpoint());
        }
        let (min, max) = bounds(&points);
        let span = (max.x - min.x).max(max.y - min.y).max(1e-9);
        let margin = span * 0.1;
        let stroke = span / 200.0;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="800" viewBox="{} {} {} {}">"#,
            min.x - margin,
            -(max.y + margin),
            (max.x - min.x) + 2.0 * margin,
            (max.y - min.y) + 2.0 * margin,
        )
        .map_err(DiagnosticsError::from)?;
        // Model y points up; flip once for the whole drawing.
        svg.push_str("<g transform=\"scale(1,-1)\">\n");
        for (i, seg) in segments.iter().enumerate() {
            match seg {
                Segment::Line { p1, p2 } => {
                    writeln!(
                        svg,
                        r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#0066ff" stroke-width="{stroke}"><title>{i}: line</title></line>"##,
                        p1.x, p1.y, p2.x, p2.y
                    )
                    .map_err(DiagnosticsError::from)?;
                }
                Segment::Arc { p1, p2, radius, .. } => {
                    let sweep = seg.sweep().unwrap_or(0.0);
                    let large_arc = u8::from(sweep.abs() > std::f64::consts::PI);
                    let sweep_flag = u8::from(sweep > 0.0);
                    writeln!(
                        svg,
                        r##"<path d="M {} {} A {radius} {radius} 0 {large_arc} {sweep_flag} {} {}" fill="none" stroke="#cc0000" stroke-width="{stroke}"><title>{i}: arc r={radius}</title></path>"##,
                        p1.x, p1.y, p2.x, p2.y
                    )
                    .map_err(DiagnosticsError::from)?;
                }
            }
        }
        writeln!(
            svg,
            r##"<circle cx="{}" cy="{}" r="{}" fill="#00aa00"/>"##,
            vertex.point.x,
            vertex.point.y,
            stroke * 3.0
        )
        .map_err(DiagnosticsError::from)?;
        svg.push_str("</g>\n</svg>\n");

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{name} step {step}</title></head>\n<body>\n<p>{name} step {step}: {count} segments</p>\n{svg}</body>\n</html>\n",
            name = self.name,
            count = segments.len(),
        ))
    }

    fn write(&self, path: &Path, html: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(DiagnosticsError::from)?;
        fs::write(path, html).map_err(DiagnosticsError::from)?;
        tracing::trace!(path = %path.display(), "wrote step plot");
        Ok(())
    }
}

impl StepObserver for HtmlStepWriter {
    fn on_step(&mut self, step: usize, vertex: &Vertex, segments: &[Segment]) -> Result<()> {
        let html = self.render(step, vertex, segments)?;
        self.write(&self.path_for(step), &html)
    }
}

fn bounds(points: &[Point2]) -> (Point2, Point2) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolycurveError;

    fn corner_segments() -> Vec<Segment> {
        let h = 2.0 * std::f64::consts::FRAC_1_SQRT_2;
        vec![
            Segment::Line {
                p1: Point2::new(0.0, 0.0),
                p2: Point2::new(8.0, 0.0),
            },
            Segment::Arc {
                p1: Point2::new(8.0, 0.0),
                p2: Point2::new(10.0, 2.0),
                midpoint: Point2::new(8.0 + h, 2.0 - h),
                radius: 2.0,
                center: Point2::new(8.0, 2.0),
            },
        ]
    }

    #[test]
    fn render_contains_every_segment() {
        let writer = HtmlStepWriter::new("plots", "profile");
        let html = writer
            .render(1, &Vertex::filleted(10.0, 0.0, 2.0), &corner_segments())
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<line ").count(), 1);
        assert_eq!(html.matches("<path ").count(), 1);
        // Counter-clockwise quarter arc: small arc, positive sweep.
        assert!(html.contains(" 0 0 1 10 2\""));
    }

    #[test]
    fn format_failure_is_a_diagnostics_error() {
        let err: PolycurveError = DiagnosticsError::from(std::fmt::Error).into();
        assert!(matches!(
            err,
            PolycurveError::Diagnostics(DiagnosticsError::Format(_))
        ));
        assert_eq!(err.to_string(), "failed to format step plot");
    }

    #[test]
    fn step_file_names_are_padded() {
        let writer = HtmlStepWriter::new("plots", "hp");
        assert_eq!(writer.path_for(7), PathBuf::from("plots").join("hp_007.html"));
    }

    #[test]
    fn writes_one_file_per_step() {
        let dir = std::env::temp_dir().join(format!("polycurve-diag-{}", std::process::id()));
        let mut writer = HtmlStepWriter::new(&dir, "corner");
        let segments = corner_segments();
        writer
            .on_step(0, &Vertex::sharp(0.0, 0.0), &segments[..1])
            .unwrap();
        writer
            .on_step(1, &Vertex::filleted(10.0, 0.0, 2.0), &segments)
            .unwrap();
        assert!(writer.path_for(0).exists());
        assert!(writer.path_for(1).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn recorder_keeps_snapshots() {
        let mut recorder = StepRecorder::default();
        let segments = corner_segments();
        recorder
            .on_step(0, &Vertex::sharp(0.0, 0.0), &segments[..1])
            .unwrap();
        recorder
            .on_step(1, &Vertex::sharp(10.0, 0.0), &segments)
            .unwrap();
        assert_eq!(recorder.steps.len(), 2);
        assert_eq!(recorder.steps[1].len(), 2);
    }
}
