use super::*;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_pipeline").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn diagonal() -> PointSet {
    PointSet::new([10.0, 20.0, 30.0], [10.0, 20.0, 30.0]).unwrap()
}

#[test]
fn compute_frame_shapes_agree() {
    let params = HeatmapParams {
        grid_size: 5.0,
        ..HeatmapParams::default()
    };
    let frame = compute_frame(&diagonal(), &params).unwrap();
    let shape = frame.grid.shape();
    assert_eq!(shape, (8, 8));
    assert_eq!(frame.intensity.shape(), shape);
    assert_eq!(frame.alpha.shape(), shape);
    assert_eq!(frame.alpha.min_max(), Some((0.0, 1.0)));
}

#[test]
fn compute_frame_is_deterministic() {
    let params = HeatmapParams {
        grid_size: 2.0,
        ..HeatmapParams::default()
    };
    let a = compute_frame(&diagonal(), &params).unwrap();
    let b = compute_frame(&diagonal(), &params).unwrap();
    assert_eq!(a.intensity, b.intensity);
    assert_eq!(a.alpha, b.alpha);
}

#[test]
fn create_heatmap_from_points_writes_grid_sized_png() {
    let dir = out_dir("from_points");
    let out = dir.join("heat.png");
    let params = HeatmapParams {
        grid_size: 5.0,
        ..HeatmapParams::default()
    };
    let frame = create_heatmap_from_points(&out, &diagonal(), &params).unwrap();

    let img = image::open(&out).unwrap();
    let (rows, cols) = frame.grid.shape();
    assert_eq!((img.width(), img.height()), (cols as u32, rows as u32));
}

#[test]
fn create_heatmap_reads_json() {
    let dir = out_dir("from_json");
    let json = dir.join("points.json");
    std::fs::write(
        &json,
        r#"[{"x": 10, "y": 10}, {"x": 20, "y": 20}, {"x": 30, "y": 30}]"#,
    )
    .unwrap();
    let out = dir.join("heat.png");
    let params = HeatmapParams {
        grid_size: 5.0,
        ..HeatmapParams::default()
    };
    create_heatmap(&out, &json, &params).unwrap();
    assert!(out.exists());
}

#[test]
fn failed_frame_emits_no_output() {
    let dir = out_dir("failed");
    let out = dir.join("never.png");
    let params = HeatmapParams {
        bandwidth: 0.0,
        ..HeatmapParams::default()
    };
    assert!(create_heatmap_from_points(&out, &diagonal(), &params).is_err());
    assert!(!out.exists());

    let missing = create_heatmap(&out, &dir.join("missing.json"), &HeatmapParams::default());
    assert!(matches!(missing, Err(HeatError::NotFound(_))));
}

#[test]
fn params_load_partial_json() {
    let dir = out_dir("params");
    let path = dir.join("params.json");
    std::fs::write(&path, r#"{"bandwidth": 4.5, "colormap": "magma"}"#).unwrap();
    let params = HeatmapParams::from_path(&path).unwrap();
    assert_eq!(params.bandwidth, 4.5);
    assert_eq!(params.colormap, Colormap::Magma);
    assert_eq!(params.grid_size, HeatmapParams::default().grid_size);

    std::fs::write(&path, r#"{"bandwith": 4.5}"#).unwrap();
    assert!(matches!(
        HeatmapParams::from_path(&path),
        Err(HeatError::InvalidInput(_))
    ));
}

#[test]
fn parallel_frames_match_sequential_frames() {
    let dir = out_dir("frames");
    let params = HeatmapParams::for_point_cloud();
    let make_jobs = |sub: &str| -> Vec<FrameJob> {
        (0..4)
            .map(|i| {
                let shift = i as f64;
                FrameJob {
                    points: PointSet::new(
                        [10.0 + shift, 40.0, 70.0 - shift],
                        [15.0, 50.0 + shift, 80.0],
                    )
                    .unwrap(),
                    output: dir.join(sub).join(format!("frame_{i:04}.png")),
                }
            })
            .collect()
    };

    let seq = make_jobs("seq");
    let par = make_jobs("par");
    let stats = render_frames(&seq, &params, &RenderThreading::default()).unwrap();
    assert_eq!(stats.frames_rendered, 4);
    render_frames(
        &par,
        &params,
        &RenderThreading {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    for (a, b) in seq.iter().zip(&par) {
        let a = image::open(&a.output).unwrap().to_rgba8();
        let b = image::open(&b.output).unwrap().to_rgba8();
        assert_eq!(a, b);
    }
}

#[test]
fn render_frames_rejects_shared_paths_and_zero_threads() {
    let dir = out_dir("dupes");
    let job = FrameJob {
        points: diagonal(),
        output: dir.join("same.png"),
    };
    let jobs = vec![job.clone(), job];
    let params = HeatmapParams::for_point_cloud();
    assert!(render_frames(&jobs, &params, &RenderThreading::default()).is_err());
    assert!(!dir.join("same.png").exists());

    let single = &jobs[..1];
    let zero = RenderThreading {
        parallel: true,
        threads: Some(0),
    };
    assert!(matches!(
        render_frames(single, &params, &zero),
        Err(HeatError::InvalidInput(_))
    ));
}

#[test]
fn params_file_layers_over_a_base() {
    let dir = out_dir("params_over");
    let path = dir.join("params.json");
    std::fs::write(&path, r#"{"bandwidth": 4.0}"#).unwrap();

    let params = HeatmapParams::from_path_over(&path, HeatmapParams::for_point_cloud()).unwrap();
    assert_eq!(params.grid_size, 10.0);
    assert_eq!(params.bandwidth, 4.0);
    assert_eq!(params.colormap, Colormap::Jet);
}
