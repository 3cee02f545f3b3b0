//! Integration tests for austral
//!
//! These tests drive the composer end-to-end over synthetic polar datasets and
//! check the resulting scene description.

mod common;

use common::{assertions, test_data};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

use austral::colormaps::{ColourAesthetic, Guide};
use austral::data_loader::{load_coastline, load_dataset};
use austral::{
    AustralError, Column, Dataset, GeomKind, Layer, Mapping, PaletteTable, PlotRequest,
    Precision, Scale, ScaleKind, SceneComposer,
};

fn composer() -> SceneComposer {
    SceneComposer::new(
        PaletteTable::shared(),
        Arc::new(test_data::meridian_coastline()),
    )
}

fn fill_request(geom: GeomKind) -> PlotRequest {
    PlotRequest::new(Mapping::new().bind("fill", "v"), geom)
}

#[test]
fn test_end_to_end_point_scene() {
    let data = test_data::polar_grid();
    let scene = composer()
        .compose(&data, &fill_request(GeomKind::Point))
        .unwrap();

    // Records pass through untouched without a precision
    assert_eq!(scene.data, data);

    // Geometry layer first, coastline above it
    assert!(matches!(scene.layers[0], Layer::Geometry { .. }));
    assert!(matches!(scene.layers[1], Layer::Coastline { .. }));

    let (geom, mapping, _) = scene.geometry().unwrap();
    assert_eq!(geom, GeomKind::Point);
    assert_eq!(mapping.get("x"), Some("lon"));
    assert_eq!(mapping.get("y"), Some("lat"));
    assert_eq!(mapping.get("fill"), Some("v"));
    assert_eq!(mapping.get("size"), Some("lat"));

    match scene.scale("size") {
        Some(Scale::Size {
            range,
            guide_visible,
            ..
        }) => {
            assert_eq!(*range, [0.5, 1.5]);
            assert!(!guide_visible);
        }
        other => panic!("expected a size scale, got {:?}", other),
    }

    let fill = scene.colour_scale(ColourAesthetic::Fill).unwrap();
    assert_eq!(fill.kind, ScaleKind::Continuous);
    assert_eq!(
        fill.colors,
        vec!["#3288BD", "#99D594", "#E6F598", "#FEE08B", "#FC8D59", "#D53E4F"]
    );
    assert_eq!(fill.guide, Guide::ColourBar);
    assert!(scene.colour_scale(ColourAesthetic::Colour).is_none());

    let overlay = scene.coastline().unwrap();
    assert!(!overlay.is_empty());
    assertions::assert_overlay_within(overlay, 8.0, 42.0, -58.0);
    assert!(overlay.vertices().any(|v| v.lat == -89.0));
    // Every meridian inside the box is its own segment
    assert_eq!(overlay.segments.len(), 18);

    assert_eq!(scene.projection.name, "stereographic");
    assert_eq!(scene.projection.orientation, [-90.0, 0.0, 0.0]);
    assert!(!scene.theme.x_axis.labels);
    assert!(!scene.theme.x_axis.ticks);
    assert_eq!(scene.theme.y_axis.title.as_deref(), Some("Latitude"));
}

#[test]
fn test_composition_is_idempotent() {
    let data = test_data::polar_grid_with_classes(4);
    let composer = composer();
    let request = PlotRequest::new(
        Mapping::new().bind("fill", "v").bind("color", "class"),
        GeomKind::Point,
    )
    .with_precision(Precision::new(Some(10.0), None));

    let first = composer.compose(&data, &request).unwrap();
    let second = composer.compose(&data, &request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tile_scene_has_no_size_scale() {
    let scene = composer()
        .compose(&test_data::polar_grid(), &fill_request(GeomKind::Tile))
        .unwrap();

    let (geom, mapping, _) = scene.geometry().unwrap();
    assert_eq!(geom, GeomKind::Tile);
    assert!(!mapping.contains("size"));
    assert!(scene.scale("size").is_none());
    assert!(scene.colour_scale(ColourAesthetic::Fill).is_some());
}

#[test]
fn test_categorical_levels() {
    let few = composer()
        .compose(
            &test_data::polar_grid_with_classes(5),
            &PlotRequest::new(Mapping::new().bind("colour", "class"), GeomKind::Point),
        )
        .unwrap();
    let scale = few.colour_scale(ColourAesthetic::Colour).unwrap();
    assert_eq!(scale.kind, ScaleKind::DiscreteBrewer);
    assert_eq!(scale.palette.as_deref(), Some("Set3"));
    assert_eq!(scale.colors.len(), 5);
    assert_eq!(scale.guide, Guide::Legend);

    let many = composer()
        .compose(
            &test_data::polar_grid_with_classes(15),
            &PlotRequest::new(Mapping::new().bind("fill", "class"), GeomKind::Tile),
        )
        .unwrap();
    let scale = many.colour_scale(ColourAesthetic::Fill).unwrap();
    assert_eq!(scale.kind, ScaleKind::DiscreteDefault);
    assert!(scale.colors.is_empty());
    assert_eq!(scale.levels.len(), 15);
}

#[test]
fn test_precision_subsampling() {
    let data = test_data::polar_grid();

    let lat_only = composer()
        .compose(
            &data,
            &fill_request(GeomKind::Point).with_precision(Precision::new(Some(10.0), None)),
        )
        .unwrap();
    let lat = lat_only.data.lat().unwrap();
    // -85 is alone on the -90 key; -75 and -65 lose to -80 and -70
    assert_eq!(lat_only.data.len(), 28);
    assert!(lat.iter().all(|&y| [-85.0, -80.0, -70.0, -60.0].contains(&y)));

    let both = composer()
        .compose(
            &data,
            &fill_request(GeomKind::Point).with_precision(Precision::new(Some(10.0), Some(10.0))),
        )
        .unwrap();
    assert_eq!(both.data.len(), 16);
    assertions::assert_on_grid(both.data.lon().unwrap(), 10.0);

    // Precision finer than the 5 degree spacing leaves the records alone
    let fine = composer()
        .compose(
            &data,
            &fill_request(GeomKind::Point).with_precision(Precision::new(Some(3.0), Some(3.0))),
        )
        .unwrap();
    assert_eq!(fine.data, data);

    // Subsampled data has a higher minimum latitude but the box has no lower bound
    let overlay = both.coastline().unwrap();
    assert_eq!(overlay.bbox.unwrap().lat_min, None);
    assert!(overlay.vertices().any(|v| v.lat == -90.0));
}

#[test]
fn test_empty_record_file_composes() {
    let mut records_file = tempfile::NamedTempFile::new().unwrap();
    write!(records_file, "[]").unwrap();
    let loaded = load_dataset(records_file.path()).unwrap();

    let scene = composer()
        .compose(&loaded, &PlotRequest::new(Mapping::new(), GeomKind::Point))
        .unwrap();
    assert!(scene.data.is_empty());
    assert!(scene.coastline().unwrap().is_empty());
    assert!(scene.scale("size").is_some());
}

#[test]
fn test_coordinate_aliases_and_errors() {
    let data = Dataset::new(vec![
        Column::numeric("Latitude", vec![-70.0, -65.0]),
        Column::numeric("Longitude", vec![0.0, 5.0]),
        Column::numeric("depth", vec![10.0, 20.0]),
    ])
    .unwrap();
    let scene = composer()
        .compose(
            &data,
            &PlotRequest::new(Mapping::new().bind("fill", "depth"), GeomKind::Point),
        )
        .unwrap();
    assert_eq!(scene.data.column_names(), vec!["lat", "lon", "depth"]);

    let missing = composer().compose(
        &data,
        &PlotRequest::new(Mapping::new().bind("fill", "salinity"), GeomKind::Point),
    );
    assert!(matches!(missing, Err(AustralError::DataNotFound { .. })));

    let no_coords = Dataset::new(vec![Column::numeric("x", vec![1.0])]).unwrap();
    let result = composer().compose(&no_coords, &fill_request(GeomKind::Point));
    assert!(matches!(result, Err(AustralError::Schema { .. })));

    assert!(matches!(
        "polygon".parse::<GeomKind>(),
        Err(AustralError::UnsupportedGeometry { .. })
    ));
}

#[test]
fn test_points_project_inside_polar_disc() {
    let scene = composer()
        .compose(&test_data::polar_grid(), &fill_request(GeomKind::Point))
        .unwrap();
    let lat = scene.data.lat().unwrap();
    let lon = scene.data.lon().unwrap();

    let radius = |x: f64, y: f64| (x * x + y * y).sqrt();
    for (&y, &x) in lat.iter().zip(lon) {
        let (px, py) = scene.projection.project(x, y).unwrap();
        assertions::assert_in_range(radius(px, py), 0.0, 2.0);
    }

    let (x0, y0) = scene.projection.project(20.0, -85.0).unwrap();
    let (x1, y1) = scene.projection.project(20.0, -60.0).unwrap();
    assert!(radius(x0, y0) < radius(x1, y1));

    let (px, py) = scene.projection.project(0.0, -90.0).unwrap();
    assertions::assert_approx_eq(radius(px, py), 0.0, None);
}

#[test]
fn test_files_through_loader() {
    let data = test_data::polar_grid();
    let lat = data.lat().unwrap();
    let lon = data.lon().unwrap();
    let records: Vec<serde_json::Value> = lat
        .iter()
        .zip(lon)
        .enumerate()
        .map(|(i, (y, x))| {
            serde_json::json!({ "lat": y, "lon": x, "station": format!("s{}", i % 3) })
        })
        .collect();

    let mut records_file = tempfile::NamedTempFile::new().unwrap();
    write!(records_file, "{}", serde_json::to_string(&records).unwrap()).unwrap();

    let mut coast_file = tempfile::NamedTempFile::new().unwrap();
    write!(coast_file, "[[20, -89], [21, -88], null, [100, -70], [20, -70]]").unwrap();

    let loaded = load_dataset(records_file.path()).unwrap();
    let coastline = load_coastline(coast_file.path()).unwrap();
    assert_eq!(loaded.len(), data.len());

    let composer = SceneComposer::new(PaletteTable::shared(), Arc::new(coastline));
    let scene = composer
        .compose(
            &loaded,
            &PlotRequest::new(Mapping::new().bind("colour", "station"), GeomKind::Point),
        )
        .unwrap();

    let overlay = scene.coastline().unwrap();
    let lengths: Vec<usize> = overlay.segments.iter().map(|s| s.vertices.len()).collect();
    assert_eq!(lengths, vec![2, 1]);

    let scale = scene.colour_scale(ColourAesthetic::Colour).unwrap();
    assert_eq!(scale.levels, vec!["s0", "s1", "s2"]);

    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["projection"]["name"], "stereographic");
    assert_eq!(json["layers"][0]["type"], "geometry");
    assert_eq!(json["layers"][1]["type"], "coastline");
}
