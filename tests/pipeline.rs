#![allow(clippy::unwrap_used)]

use meshwave::analysis::{AnalyzeCollisions, CollisionReport};
use meshwave::contour::{AssembleContour, ContourSource};
use meshwave::error::SmoothingError;
use meshwave::math::Point3;
use meshwave::slicing::SliceMesh;
use meshwave::smoothing::{SmoothingBatch, SmoothingRequest, DEFAULT_INSTRUCTIONS};
use meshwave::{Mesh, Pipeline, PipelineParams, PipelineState, TimeAxis};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// A closed band of quads wrapped around the vertical axis.
fn cylinder(segments: u32, rings: u32) -> Mesh {
    let mut vertices = Vec::new();
    for ring in 0..=rings {
        let y = f64::from(ring) / f64::from(rings);
        for s in 0..segments {
            let a = std::f64::consts::TAU * f64::from(s) / f64::from(segments);
            vertices.push(Point3::new(a.cos(), y, a.sin() * (1.0 + 0.2 * y)));
        }
    }
    let mut indices = Vec::new();
    for ring in 0..rings {
        for s in 0..segments {
            let a = ring * segments + s;
            let b = ring * segments + (s + 1) % segments;
            let c = a + segments;
            let d = b + segments;
            indices.push([a, b, c]);
            indices.push([b, d, c]);
        }
    }
    Mesh::new(vertices, indices).unwrap()
}

#[test]
fn single_triangle_on_plane_yields_two_point_contour() {
    init_tracing();
    let mesh = Mesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();

    let output = SliceMesh::new(&mesh, 1).execute();
    assert_eq!(output.slices.len(), 1);

    let contour = AssembleContour::new(&output.slices[0]).execute();
    assert_eq!(contour.source, ContourSource::Segments);
    assert_eq!(contour.len(), 2);
    assert_eq!(AnalyzeCollisions::new(&contour.points).execute(), 0);
    assert_eq!(CollisionReport::from_slices(&output.slices).total, 0);
}

#[test]
fn flat_capture_freezes_to_fallback_shapes() {
    init_tracing();
    let mesh = Mesh::point_cloud(vec![
        Point3::new(-1.0, 0.5, 0.0),
        Point3::new(0.0, 0.5, 0.3),
        Point3::new(1.0, 0.5, 0.1),
    ]);
    let mut pipeline = Pipeline::new(PipelineParams::default().with_slice_count(7)).unwrap();
    pipeline.update_live(mesh).unwrap();
    let snapshot = pipeline.freeze().unwrap();

    assert_eq!(pipeline.state(), PipelineState::Frozen);
    assert_eq!(snapshot.contours.len(), 7);
    assert!(snapshot.contours.iter().all(|c| c.is_fallback()));
    assert!(snapshot.wavetables.iter().all(|w| w.len() == 512));
    assert_eq!(snapshot.collisions.total, 0);
}

#[test]
fn cylinder_slices_into_closed_contours() {
    init_tracing();
    let mut pipeline = Pipeline::new(
        PipelineParams::default()
            .with_slice_count(5)
            .with_table_size(64),
    )
    .unwrap();
    pipeline.update_live(cylinder(24, 7)).unwrap();
    let snapshot = pipeline.freeze().unwrap();

    for contour in &snapshot.contours {
        assert_eq!(contour.source, ContourSource::Segments);
        assert!(contour.len() >= 24);
    }
    for table in &snapshot.wavetables {
        assert_eq!(table.len(), 64);
        assert!(table.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}

#[test]
fn whole_mesh_range_ignores_empty_apex_slice() {
    init_tracing();
    // Square pyramid whose depth sits well away from zero.
    let mesh = Mesh::new(
        vec![
            Point3::new(-1.0, 0.0, 10.0),
            Point3::new(1.0, 0.0, 10.0),
            Point3::new(1.0, 0.0, 12.0),
            Point3::new(-1.0, 0.0, 12.0),
            Point3::new(0.0, 2.0, 11.0),
        ],
        vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
    )
    .unwrap();
    let mut pipeline = Pipeline::new(
        PipelineParams::default()
            .with_slice_count(3)
            .with_table_size(16),
    )
    .unwrap();
    pipeline.update_live(mesh).unwrap();
    let snapshot = pipeline.freeze().unwrap();

    assert!(!snapshot.contours[0].is_fallback());
    assert!(snapshot.contours[2].is_fallback());

    let base = snapshot.wavetables[0].samples();
    let lo = base.iter().copied().fold(f64::MAX, f64::min);
    let hi = base.iter().copied().fold(f64::MIN, f64::max);
    assert!(lo < -0.99, "lo={lo}");
    assert!(hi > 0.8, "hi={hi}");
}

#[test]
fn smoothing_batch_round_trip() {
    init_tracing();
    let mut pipeline = Pipeline::new(
        PipelineParams::default()
            .with_slice_count(3)
            .with_table_size(8),
    )
    .unwrap();
    pipeline.update_live(cylinder(12, 5)).unwrap();
    let snapshot = pipeline.freeze().unwrap();

    let batch = SmoothingBatch::from_snapshot(&snapshot, DEFAULT_INSTRUCTIONS, "token").unwrap();
    let mut client = |req: &SmoothingRequest| {
        if req.index == 1 {
            Err(SmoothingError::Transport("timeout".into()))
        } else {
            Ok(serde_json::to_string(&vec![0.5; req.target_length]).unwrap())
        }
    };
    let mut statuses = Vec::new();
    let outcome = batch.run(&mut client, |p| statuses.push(p.to_string()));
    assert_eq!(statuses.len(), 3);
    assert_eq!(outcome.failures.len(), 1);

    assert!(pipeline.apply_smoothing(outcome));
    let smoothed = pipeline.snapshot().unwrap();
    assert!(smoothed.wavetables[0].samples().iter().all(|s| (s - 0.5).abs() < 1e-12));
    assert!(smoothed.wavetables[1].is_silent());
    assert_eq!(smoothed.contours, snapshot.contours);
}

#[test]
fn smoothing_after_reconfiguration_is_discarded() {
    init_tracing();
    let mut pipeline = Pipeline::new(PipelineParams::default().with_slice_count(3)).unwrap();
    pipeline.update_live(cylinder(12, 5)).unwrap();
    let snapshot = pipeline.freeze().unwrap();
    let batch = SmoothingBatch::from_snapshot(&snapshot, DEFAULT_INSTRUCTIONS, "token").unwrap();

    pipeline.set_time_axis(TimeAxis::Secondary);

    let mut client = |req: &SmoothingRequest| {
        Ok::<_, SmoothingError>(serde_json::to_string(&vec![0.0; req.target_length]).unwrap())
    };
    let outcome = batch.run(&mut client, |_| {});
    assert!(!pipeline.apply_smoothing(outcome));
    assert_eq!(pipeline.snapshot().unwrap().time_axis, TimeAxis::Secondary);
}
