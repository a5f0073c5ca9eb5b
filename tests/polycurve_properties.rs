#![allow(clippy::unwrap_used)]

//! End-to-end properties of polycurve construction over a set of profiles.

use approx::assert_abs_diff_eq;
use polycurve::diagnostics::HtmlStepWriter;
use polycurve::error::GeometryError;
use polycurve::operations::indexed_lists_to_segments;
use polycurve::{
    build_polycurve, segments_to_indexed_lists, PolycurveConfig, PolycurveError, SegCreator,
    Segment, Vertex,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

struct Profile {
    name: &'static str,
    vertices: Vec<Vertex>,
    closed: bool,
}

fn profile(name: &'static str, points: &[(f64, f64, f64)], closed: bool) -> Profile {
    Profile {
        name,
        vertices: points.iter().map(|&p| Vertex::from(p)).collect(),
        closed,
    }
}

fn profiles() -> Vec<Profile> {
    vec![
        profile(
            "square_one_fillet",
            &[
                (0.0, 0.0, 0.0),
                (10.0, 0.0, 2.0),
                (10.0, 10.0, 0.0),
                (0.0, 10.0, 0.0),
            ],
            true,
        ),
        profile(
            "touching_fillets",
            &[
                (0.0, 0.0, 1.0),
                (4.0, 0.0, 1.0),
                (4.0, 2.0, 1.0),
                (0.0, 2.0, 1.0),
            ],
            true,
        ),
        profile(
            "l_shape",
            &[
                (0.0, 0.0, 0.0),
                (6.0, 0.0, 1.0),
                (6.0, 3.0, 1.0),
                (3.0, 3.0, 0.5),
                (3.0, 6.0, 1.0),
                (0.0, 6.0, 1.0),
            ],
            true,
        ),
        profile(
            "triangle",
            &[(0.0, 0.0, 1.0), (8.0, 0.0, 1.0), (4.0, 6.0, 1.0)],
            true,
        ),
        profile(
            "clockwise_rectangle",
            &[
                (0.0, 0.0, 0.5),
                (0.0, 5.0, 0.5),
                (8.0, 5.0, 0.0),
                (8.0, 0.0, 1.5),
            ],
            true,
        ),
        profile(
            "negative_radius_notch",
            &[
                (0.0, 0.0, 0.0),
                (10.0, 0.0, -2.0),
                (10.0, 10.0, 0.0),
                (0.0, 10.0, -1.0),
            ],
            true,
        ),
        profile(
            "open_zigzag",
            &[
                (0.0, 0.0, 0.0),
                (5.0, 0.0, 1.0),
                (5.0, 5.0, 1.0),
                (10.0, 5.0, 0.0),
            ],
            false,
        ),
        profile(
            "sharp_beside_fillet",
            &[
                (0.0, 0.0, 0.0),
                (10.0, 0.0, 2.0),
                (10.0, 2.0005, 0.0),
                (0.0, 2.0005, 0.0),
            ],
            true,
        ),
        profile(
            "fillets_a_hair_apart",
            &[
                (0.0, 0.0, 0.0),
                (10.0, 0.0, 2.0),
                (10.0, 4.0005, 2.0),
                (0.0, 4.0005, 0.0),
            ],
            true,
        ),
        profile(
            "closing_edge_beside_fillet",
            &[
                (0.0, 2.0004, 0.0),
                (5.0, 10.0, 0.0),
                (10.0, 0.0, 0.0),
                (0.0, 0.0, 2.0),
            ],
            true,
        ),
        profile(
            "closing_edge_between_fillets",
            &[
                (0.0, 0.0, 1.0),
                (10.0, 0.0, 0.0),
                (10.0, 10.0, 0.0),
                (0.0, 2.0002, 1.0),
            ],
            true,
        ),
    ]
}

fn config_for(p: &Profile) -> PolycurveConfig {
    PolycurveConfig::default().with_closed(p.closed)
}

fn effective_fillets(p: &Profile, config: &PolycurveConfig) -> usize {
    let n = p.vertices.len();
    p.vertices
        .iter()
        .enumerate()
        .filter(|(i, v)| {
            let end = !p.closed && (*i == 0 || *i == n - 1);
            !end && v.radius.is_some_and(|r| r.abs() >= config.tolerance)
        })
        .count()
}

#[test]
fn segments_are_continuous_and_closed() {
    init_tracing();
    for p in profiles() {
        let config = config_for(&p);
        let segs = build_polycurve(p.vertices.iter().copied(), &config).unwrap();
        for pair in segs.windows(2) {
            assert_eq!(pair[0].p2(), pair[1].p1(), "{}: gap between segments", p.name);
        }
        let (first, last) = (segs.first().unwrap(), segs.last().unwrap());
        if p.closed {
            assert_eq!(last.p2(), first.p1(), "{}: loop not closed", p.name);
        } else {
            assert_eq!(first.p1(), p.vertices[0].point, "{}", p.name);
            assert_eq!(last.p2(), p.vertices.last().unwrap().point, "{}", p.name);
        }
    }
}

#[test]
fn arcs_lie_on_their_circles() {
    init_tracing();
    for p in profiles() {
        let segs = build_polycurve(p.vertices.iter().copied(), &config_for(&p)).unwrap();
        for seg in &segs {
            if let Segment::Arc {
                p1,
                p2,
                midpoint,
                radius,
                center,
            } = seg
            {
                for q in [p1, p2, midpoint] {
                    assert_abs_diff_eq!((q - center).norm(), *radius, epsilon = 1e-6);
                }
            }
        }
    }
}

#[test]
fn arcs_only_at_filleted_vertices() {
    init_tracing();
    for p in profiles() {
        let config = config_for(&p);
        let segs = build_polycurve(p.vertices.iter().copied(), &config).unwrap();
        let arcs = segs.iter().filter(|s| s.is_arc()).count();
        assert_eq!(arcs, effective_fillets(&p, &config), "{}", p.name);
    }
}

#[test]
fn construction_is_deterministic() {
    for p in profiles() {
        let config = config_for(&p);
        let a = build_polycurve(p.vertices.iter().copied(), &config).unwrap();
        let b = build_polycurve(p.vertices.iter().copied(), &config).unwrap();
        assert_eq!(a, b, "{}", p.name);
    }
}

#[test]
fn indexed_form_rebuilds_the_same_curve() {
    for p in profiles() {
        let segs = build_polycurve(p.vertices.iter().copied(), &config_for(&p)).unwrap();
        let indexed = segments_to_indexed_lists(&segs, p.closed);
        assert_eq!(indexed.indices.len(), segs.len());
        for ix in &indexed.indices {
            assert!(ix.as_slice().iter().all(|&i| i >= 1 && i <= indexed.points.len()));
        }

        let rebuilt = indexed_lists_to_segments(&indexed).unwrap();
        for (a, b) in segs.iter().zip(&rebuilt) {
            assert_eq!(a.p1(), b.p1(), "{}", p.name);
            assert_eq!(a.p2(), b.p2(), "{}", p.name);
            assert_eq!(a.midpoint(), b.midpoint(), "{}", p.name);
        }
    }
}

#[test]
fn touching_fillets_leave_no_zero_length_lines() {
    let p = &profiles()[1];
    let segs = build_polycurve(p.vertices.iter().copied(), &config_for(p)).unwrap();
    assert_eq!(segs.len(), 6);
    assert!(segs.iter().all(|s| s.length() > 1e-6));
}

#[test]
fn sharp_polygon_has_one_line_per_vertex() {
    for n in 3..9_u32 {
        let pts: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let t = std::f64::consts::TAU * f64::from(i) / f64::from(n);
                (5.0 * t.cos(), 5.0 * t.sin())
            })
            .collect();
        let segs = build_polycurve(pts, &PolycurveConfig::default()).unwrap();
        assert_eq!(segs.len(), n as usize);
        assert!(segs.iter().all(|s| !s.is_arc()));
    }
}

#[test]
fn oversized_radius_is_an_error() {
    let err = build_polycurve(
        [(0.0, 0.0, 0.0), (4.0, 0.0, 5.0), (4.0, 4.0, 0.0), (0.0, 4.0, 0.0)],
        &PolycurveConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PolycurveError::Geometry(GeometryError::RadiusTooLarge { vertex: 1, .. })
    ));
}

#[test]
fn overlapping_fillets_are_an_error() {
    let err = build_polycurve(
        [(0.0, 0.0, 0.0), (10.0, 0.0, 3.0), (10.0, 4.0, 3.0), (0.0, 4.0, 0.0)],
        &PolycurveConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PolycurveError::Geometry(GeometryError::FilletOverlap { edge: 1 })
    ));
}

#[test]
fn merged_corner_never_pulls_an_arc_off_its_circle() {
    init_tracing();
    // The second vertex collapses onto the first, and the fillet at the
    // third vertex starts exactly where the second vertex was.
    let s = 5.0_f64.sqrt();
    let (ux, uy) = (2.0 / s, 1.0 / s);
    let v1 = (0.0006, 0.0003);
    let v2 = (v1.0 - 10.0 * uy, v1.1 + 10.0 * ux);
    let v3 = (v2.0 - 20.0 * ux, v2.1 - 20.0 * uy);
    let pts = [
        (0.0, 0.0, 0.0),
        (v1.0, v1.1, 0.0),
        (v2.0, v2.1, 10.0),
        (v3.0, v3.1, 0.0),
    ];

    match build_polycurve(pts, &PolycurveConfig::default()) {
        Ok(segs) => {
            for pair in segs.windows(2) {
                assert_eq!(pair[0].p2(), pair[1].p1());
            }
            for seg in &segs {
                if let Segment::Arc {
                    p1,
                    p2,
                    radius,
                    center,
                    ..
                } = seg
                {
                    assert_abs_diff_eq!((p1 - center).norm(), *radius, epsilon = 1e-6);
                    assert_abs_diff_eq!((p2 - center).norm(), *radius, epsilon = 1e-6);
                }
            }
        }
        Err(err) => assert!(
            matches!(
                err,
                PolycurveError::Geometry(GeometryError::FilletOverlap { .. })
            ),
            "unexpected error: {err}"
        ),
    }
}

#[test]
fn angle_thresholds_change_the_outcome() {
    let pts = [
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 1.0),
        (10.0, 4.0, 1.0),
        (0.0, 4.0, 0.0),
    ];
    let loose = build_polycurve(pts, &PolycurveConfig::default()).unwrap();
    assert_eq!(loose.len(), 6);

    let strict = PolycurveConfig::default().with_angle_thresholds(120.0, 5.0);
    let err = build_polycurve(pts, &strict).unwrap_err();
    assert!(matches!(
        err,
        PolycurveError::Geometry(GeometryError::FilletOverlap { edge: 1 })
    ));
}

#[test]
fn step_plots_do_not_change_the_result() {
    init_tracing();
    let p = &profiles()[2];
    let config = config_for(p);
    let plain = build_polycurve(p.vertices.iter().copied(), &config).unwrap();

    let dir = std::env::temp_dir().join(format!("polycurve-steps-{}", std::process::id()));
    let mut writer = HtmlStepWriter::new(&dir, p.name);
    let plotted = SegCreator::new(p.vertices.clone(), config)
        .with_observer(&mut writer)
        .execute()
        .unwrap();

    assert_eq!(plain, plotted);
    for step in 0..p.vertices.len() {
        assert!(writer.path_for(step).exists());
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
