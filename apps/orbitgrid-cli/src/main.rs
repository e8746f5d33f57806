use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use orbitgrid_frame::{
    DebugTextBackend, FrameDriver, ManualScheduler, OrbitCamera, RenderContext, Viewport,
};
use orbitgrid_mesh::{ColoredTriangle, GridMesh, MAX_SUBDIVISIONS, tessellate};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbitgrid-cli", about = "CLI tool for orbitgrid: mesh and camera inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Tessellate the ground grid and print its layout
    Mesh {
        /// Cells per edge
        #[arg(
            short,
            long,
            default_value_t = 2,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISIONS as i64)
        )]
        subdivisions: u32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the vertex data of the triangle demo
    Triangle {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the orbit camera state at a time value
    Camera {
        /// Time value in milliseconds
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// JSON file overriding orbit parameters; missing fields keep defaults
        #[arg(long)]
        orbit: Option<PathBuf>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the frame loop headless with a manual refresh clock
    Simulate {
        /// Number of refresh callbacks to fire
        #[arg(short, long, default_value_t = 10)]
        frames: u64,
        /// Milliseconds between refreshes
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        interval: f64,
        /// Cells per edge of the simulated grid
        #[arg(
            short,
            long,
            default_value_t = 64,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISIONS as i64)
        )]
        subdivisions: u32,
        /// Fire a resize just before this frame (must be below --frames)
        #[arg(long)]
        resize_at: Option<u64>,
        /// Width after the resize; the loop starts at 1280x720
        #[arg(long, default_value_t = 1920)]
        resize_width: u32,
        /// Height after the resize
        #[arg(long, default_value_t = 1080)]
        resize_height: u32,
    },
}

#[derive(Serialize)]
struct MeshReport {
    subdivisions: u32,
    resolution: u32,
    vertices: usize,
    indices: usize,
    max_index: u16,
    /// Full vertex and index data, only for small grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridMesh>,
}

/// Grids up to this size are printed vertex by vertex.
const LISTING_LIMIT: u32 = 4;

#[derive(Serialize)]
struct CameraReport {
    camera: OrbitCamera,
    viewport: Viewport,
    time: f64,
    phase: f64,
    eye: Vec3,
    aspect: f32,
    view_proj: [[f32; 4]; 4],
}

fn mesh_report(subdivisions: u32) -> anyhow::Result<MeshReport> {
    let mesh = tessellate(subdivisions)?;
    Ok(MeshReport {
        subdivisions,
        resolution: mesh.resolution(),
        vertices: mesh.vertex_count(),
        indices: mesh.index_count(),
        max_index: mesh.indices().iter().copied().max().unwrap_or(0),
        grid: (subdivisions <= LISTING_LIMIT).then_some(mesh),
    })
}

fn load_orbit(path: Option<&Path>) -> anyhow::Result<OrbitCamera> {
    let Some(path) = path else {
        return Ok(OrbitCamera::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_orbit(&text).with_context(|| format!("invalid orbit file {}", path.display()))
}

fn parse_orbit(text: &str) -> anyhow::Result<OrbitCamera> {
    let camera: OrbitCamera = serde_json::from_str(text)?;
    if camera.time_scale <= 0.0 {
        anyhow::bail!("time_scale must be positive, got {}", camera.time_scale);
    }
    Ok(camera)
}

fn camera_report(camera: OrbitCamera, time: f64, viewport: Viewport) -> CameraReport {
    let aspect = viewport.aspect();
    CameraReport {
        camera,
        viewport,
        time,
        phase: camera.phase(time),
        eye: camera.eye(time),
        aspect,
        view_proj: camera.view_projection(time, aspect).to_cols_array_2d(),
    }
}

struct Simulation {
    frames: u64,
    interval: f64,
    subdivisions: u32,
    resize: Option<(u64, Viewport)>,
}

fn simulate(sim: Simulation) -> anyhow::Result<Vec<String>> {
    if let Some((at, _)) = sim.resize {
        if at >= sim.frames {
            anyhow::bail!("resize at frame {at} never fires in a {}-frame run", sim.frames);
        }
    }
    let mesh = tessellate(sim.subdivisions)?;
    let mut driver = FrameDriver::new(
        OrbitCamera::default(),
        RenderContext::new(Viewport::default(), mesh.index_count() as u32),
    );
    let mut scheduler = ManualScheduler::new();
    let mut backend = DebugTextBackend::new();
    driver.start(&mut scheduler);

    for frame in 0..sim.frames {
        if let Some((at, viewport)) = sim.resize {
            if at == frame {
                driver.resize(viewport, &mut backend, &mut scheduler);
            }
        }
        let Some(fired) = scheduler.next_due() else {
            anyhow::bail!("frame loop stopped after {frame} frames");
        };
        let t = frame as f64 * sim.interval;
        let Ok(_) = driver.on_frame(t, fired, &mut backend, &mut scheduler);
    }

    tracing::debug!(
        rendered = driver.frames_rendered(),
        pending = scheduler.pending_count(),
        "simulation finished"
    );
    Ok(backend.drain_lines())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("orbitgrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("mesh: {}", orbitgrid_mesh::crate_info());
            println!("frame: {}", orbitgrid_frame::crate_info());
            println!("render: {}", orbitgrid_render_wgpu::crate_info());
        }
        Commands::Mesh { subdivisions, json } => {
            let report = mesh_report(subdivisions)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Grid: subdivisions={}, resolution={}",
                    report.subdivisions, report.resolution
                );
                println!(
                    "Vertices: {}  Indices: {}  Max index: {}",
                    report.vertices, report.indices, report.max_index
                );
                if let Some(grid) = &report.grid {
                    for (i, p) in grid.positions().iter().enumerate() {
                        println!("  v{i:<3} ({:>6.3}, {:>6.3}, {:>6.3})", p[0], p[1], p[2]);
                    }
                    for t in grid.indices().chunks_exact(3) {
                        println!("  tri {:?}", t);
                    }
                }
            }
        }
        Commands::Triangle { json } => {
            let triangle = ColoredTriangle::new();
            if json {
                println!("{}", serde_json::to_string_pretty(&triangle)?);
            } else {
                for (p, c) in triangle.positions.iter().zip(&triangle.colors) {
                    println!(
                        "  ({:>5.2}, {:>5.2}, {:>5.2})  rgb({}, {}, {})",
                        p[0], p[1], p[2], c[0], c[1], c[2]
                    );
                }
                println!("  indices {:?}", triangle.indices);
            }
        }
        Commands::Camera {
            time,
            width,
            height,
            orbit,
            json,
        } => {
            let camera = load_orbit(orbit.as_deref())?;
            let report = camera_report(camera, time, Viewport::new(width, height));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Camera: t={:.2} phase={:.4} aspect={:.4}",
                    report.time, report.phase, report.aspect
                );
                println!(
                    "Eye: ({:.4}, {:.4}, {:.4})",
                    report.eye.x, report.eye.y, report.eye.z
                );
                println!("View-projection (columns):");
                for col in &report.view_proj {
                    println!(
                        "  [{:>9.4}, {:>9.4}, {:>9.4}, {:>9.4}]",
                        col[0], col[1], col[2], col[3]
                    );
                }
            }
        }
        Commands::Simulate {
            frames,
            interval,
            subdivisions,
            resize_at,
            resize_width,
            resize_height,
        } => {
            let lines = simulate(Simulation {
                frames,
                interval,
                subdivisions,
                resize: resize_at.map(|at| (at, Viewport::new(resize_width, resize_height))),
            })?;
            for line in lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mesh_report_small_grid_lists_everything() {
        let report = mesh_report(1).unwrap();
        assert_eq!(report.vertices, 4);
        assert_eq!(report.indices, 6);
        assert_eq!(report.max_index, 3);
        let grid = report.grid.as_ref().unwrap();
        assert_eq!(grid.indices(), &[0, 1, 3, 0, 3, 2]);
        assert_eq!(grid.vertex_count(), 4);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["grid"]["indices"], serde_json::json!([0, 1, 3, 0, 3, 2]));
        assert_eq!(json["grid"]["positions"][3], serde_json::json!([1.0, 0.0, 1.0]));
    }

    #[test]
    fn mesh_report_large_grid_is_summarized() {
        let report = mesh_report(100).unwrap();
        assert_eq!(report.vertices, 101 * 101);
        assert!(report.grid.is_none());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json.get("grid").is_none());
    }

    #[test]
    fn triangle_json_lists_vertex_colors() {
        let json: serde_json::Value = serde_json::to_value(ColoredTriangle::new()).unwrap();
        assert_eq!(json["indices"], serde_json::json!([0, 1, 2]));
        assert_eq!(json["colors"][0], serde_json::json!([1.0, 0.0, 0.0]));
        assert_eq!(json["positions"][2], serde_json::json!([0.0, 0.5, 0.0]));
    }

    #[test]
    fn camera_report_matches_orbit() {
        let report = camera_report(OrbitCamera::default(), 0.0, Viewport::new(800, 400));
        assert_eq!(report.aspect, 2.0);
        assert!((report.eye.z - 2.0).abs() < 1e-6);
        assert_eq!(report.eye.y, 1.5);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json.get("view_proj").is_some());
        assert_eq!(json["viewport"], serde_json::json!({ "width": 800, "height": 400 }));
        assert_eq!(json["camera"]["radius"], serde_json::json!(2.0));
        assert_eq!(json["camera"]["time_scale"], serde_json::json!(4096.0));
    }

    #[test]
    fn orbit_file_overrides_only_given_fields() {
        let camera = parse_orbit(r#"{ "radius": 5.0, "time_scale": 1000.0 }"#).unwrap();
        assert_eq!(camera.radius, 5.0);
        assert_eq!(camera.time_scale, 1000.0);
        assert_eq!(camera.height, OrbitCamera::default().height);
        assert_eq!(camera.far, OrbitCamera::default().far);

        let report = camera_report(camera, 0.0, Viewport::new(100, 100));
        assert!((report.eye.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn orbit_file_rejects_bad_input() {
        assert!(parse_orbit(r#"{ "time_scale": 0.0 }"#).is_err());
        assert!(parse_orbit(r#"{ "radius": "far" }"#).is_err());
        assert!(load_orbit(Some(Path::new("/nonexistent/orbit.json"))).is_err());
        assert_eq!(load_orbit(None).unwrap(), OrbitCamera::default());
    }

    #[test]
    fn simulation_emits_one_line_per_frame() {
        let lines = simulate(Simulation {
            frames: 5,
            interval: 16.0,
            subdivisions: 2,
            resize: None,
        })
        .unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.contains("indices=24")));
    }

    #[test]
    fn simulation_resize_applies_to_following_frames() {
        let lines = simulate(Simulation {
            frames: 4,
            interval: 16.0,
            subdivisions: 1,
            resize: Some((2, Viewport::new(300, 200))),
        })
        .unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("viewport=1280x720"));
        assert_eq!(lines[2], "resize 300x200");
        assert!(lines[3].contains("viewport=300x200"));
        assert!(lines[4].contains("viewport=300x200"));
    }

    #[test]
    fn simulation_rejects_resize_past_last_frame() {
        for at in [4, 10] {
            let err = simulate(Simulation {
                frames: 4,
                interval: 16.0,
                subdivisions: 1,
                resize: Some((at, Viewport::new(300, 200))),
            })
            .unwrap_err();
            assert!(err.to_string().contains("never fires"), "{err}");
        }
    }

    #[test]
    fn resize_defaults_to_landscape_1080p() {
        let cli = Cli::parse_from(["orbitgrid-cli", "simulate", "--resize-at", "3"]);
        let Commands::Simulate {
            resize_at,
            resize_width,
            resize_height,
            ..
        } = cli.command
        else {
            panic!("expected simulate");
        };
        assert_eq!(resize_at, Some(3));
        assert_eq!((resize_width, resize_height), (1920, 1080));
    }
}
