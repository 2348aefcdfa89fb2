// Tests for rasterizing and writing topology images

use image::Rgb;
use topoviz_core::{Route, RouteDocument, TopologyGraph};
use topoviz_render::{
    Layout, LayoutKind, RenderError, RenderOptions, Renderer, export_snapshot, save_png,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const NODE_FILL: Rgb<u8> = Rgb([0x1f, 0x78, 0xb4]);

fn two_routes() -> TopologyGraph {
    let document: RouteDocument = [
        ("r1".to_string(), Route::new(["A", "B", "C"])),
        ("r2".to_string(), Route::new(["B", "C"])),
    ]
    .into_iter()
    .collect();
    TopologyGraph::from_routes(&document)
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_empty_graph_renders_blank_image() {
    let renderer = Renderer::new(RenderOptions::default()).unwrap();
    let image = renderer.render(&TopologyGraph::new());

    assert_eq!(image.dimensions(), (640, 480));
    assert!(image.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_dpi_sets_image_size() {
    let options = RenderOptions {
        dpi: 300,
        ..RenderOptions::default()
    };
    let image = Renderer::new(options).unwrap().render(&two_routes());
    assert_eq!(image.dimensions(), (1920, 1440));
}

#[test]
fn test_nodes_are_drawn() {
    let graph = two_routes();
    let options = RenderOptions {
        layout: LayoutKind::Circular,
        ..RenderOptions::default()
    };
    let renderer = Renderer::new(options).unwrap();
    let layout = renderer.layout(&graph);
    let image = renderer.draw(&graph, &layout);

    let filled = image.pixels().filter(|p| **p == NODE_FILL).count();
    assert!(filled > 100, "only {} node pixels drawn", filled);
    assert!(image.pixels().any(|p| *p == Rgb([0, 0, 0])));
}

#[test]
fn test_unknown_hop_drawn_hollow() {
    let mut graph = TopologyGraph::new();
    graph.insert_node("a|*|b");
    let renderer = Renderer::new(RenderOptions::default()).unwrap();
    let layout = Layout::circular(1, 1.0);
    let image = renderer.draw(&graph, &layout);

    // The single node sits in the middle; its rim is blue, its interior is not
    let (w, h) = image.dimensions();
    let radius = (9.77f64 * 100.0 / 72.0).round() as u32;
    assert_eq!(*image.get_pixel(w / 2, h / 2 - radius), NODE_FILL);
    assert!(image.pixels().filter(|p| **p == NODE_FILL).count() < 400);
}

#[test]
fn test_self_loop_and_dense_graph_render() {
    let mut graph = TopologyGraph::new();
    graph.insert_edge("A", "A");
    for i in 0..30 {
        graph.insert_edge(&format!("n{}", i), &format!("n{}", (i * 7) % 30));
    }
    let options = RenderOptions {
        seed: Some(11),
        scale: 2.0,
        ..RenderOptions::default()
    };
    let image = Renderer::new(options).unwrap().render(&graph);
    assert_eq!(image.dimensions(), (1280, 960));
}

#[test]
fn test_invalid_options_rejected() {
    let options = RenderOptions {
        width_in: -1.0,
        ..RenderOptions::default()
    };
    assert!(matches!(
        Renderer::new(options),
        Err(RenderError::InvalidOptions(_))
    ));
}

#[test]
fn test_oversized_font_rejected() {
    let options = RenderOptions {
        font_size: 1e10,
        ..RenderOptions::default()
    };
    assert!(matches!(
        Renderer::new(options),
        Err(RenderError::InvalidOptions(_))
    ));
}

#[test]
fn test_largest_font_renders_long_labels() {
    let options = RenderOptions {
        font_size: 300.0,
        seed: Some(3),
        ..RenderOptions::default()
    };
    let document: RouteDocument = [(
        "r1".to_string(),
        Route::new(["a-very-long-router-name", "another-long-router-name"]),
    )]
    .into_iter()
    .collect();

    let image = Renderer::new(options)
        .unwrap()
        .render(&TopologyGraph::from_routes(&document));
    assert_eq!((image.width(), image.height()), (640, 480));
}

// ============================================================================
// Output Files
// ============================================================================

#[test]
fn test_save_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dag.png");

    let image = Renderer::new(RenderOptions::default())
        .unwrap()
        .render(&two_routes());
    save_png(&image, &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (640, 480));
    assert_eq!(decoded, image);
}

#[test]
fn test_save_empty_graph_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("topology.png");

    let image = Renderer::new(RenderOptions::default())
        .unwrap()
        .render(&TopologyGraph::new());
    save_png(&image, &path).unwrap();

    assert!(image::open(&path).is_ok());
}

#[test]
fn test_save_png_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("dag.png");

    let image = Renderer::new(RenderOptions::default())
        .unwrap()
        .render(&TopologyGraph::new());
    let result = save_png(&image, &path);

    assert!(matches!(result, Err(RenderError::IoError(_))));
    assert!(!path.exists());
}

#[test]
fn test_export_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    export_snapshot(&two_routes().snapshot(), &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "nodes": ["A", "B", "C"],
            "edges": [["A", "B"], ["B", "C"]]
        })
    );
}
