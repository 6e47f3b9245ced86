//! Tests for projection definitions and coordinate transforms

use approx::assert_abs_diff_eq;
use greenland_viz::{
    errors::GreenlandVizError,
    grid::meshgrid_ij,
    projection::{
        Datum, Ellipsoid, PolarStereographic, ProjectionDefinition, Transformer, GREENLAND_PROJ,
    },
};
use ndarray::Array1;

fn greenland_grid(nx: usize, ny: usize) -> greenland_viz::grid::CoordinateGrid {
    let x = Array1::linspace(-800_000.0, 700_000.0, nx);
    let y = Array1::linspace(-3_400_000.0, -600_000.0, ny);
    meshgrid_ij(x.view(), y.view()).expect("valid axes")
}

#[test]
fn test_shape_preservation() {
    let transformer = Transformer::greenland_to_geographic().unwrap();
    for &(nx, ny) in &[(1, 1), (3, 2), (17, 41)] {
        let grid = greenland_grid(nx, ny);
        let geo = transformer.transform_grid(&grid).unwrap();
        assert_eq!(geo.shape(), (ny, nx));
        assert_eq!(geo.lon.dim(), geo.lat.dim());
    }
}

#[test]
fn test_flatten_reshape_equals_cellwise() {
    let transformer = Transformer::greenland_to_geographic().unwrap();
    let grid = greenland_grid(37, 53);

    let flat = transformer.transform_grid(&grid).unwrap();
    let cellwise = transformer.transform_grid_cellwise(&grid);

    for (a, b) in flat.lon.iter().zip(cellwise.lon.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    for (a, b) in flat.lat.iter().zip(cellwise.lat.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // Same for a single cell looked up directly
    let (lon, lat) = transformer.transform_point(grid.x[[20, 5]], grid.y[[20, 5]]);
    assert_eq!(lon.to_bits(), flat.lon[[20, 5]].to_bits());
    assert_eq!(lat.to_bits(), flat.lat[[20, 5]].to_bits());
}

#[test]
fn test_known_greenland_corner() {
    let transformer = Transformer::greenland_to_geographic().unwrap();

    let (lon, lat) = transformer.transform_point(-800_000.0, -3_400_000.0);
    assert_abs_diff_eq!(lon, -52.240_52, epsilon = 1e-4);
    assert_abs_diff_eq!(lat, 58.629_27, epsilon = 1e-4);

    let (lon, lat) = transformer.transform_point(0.0, -2_000_000.0);
    assert_abs_diff_eq!(lon, -39.0, epsilon = 1e-9);
    assert_abs_diff_eq!(lat, 71.742_51, epsilon = 1e-4);
}

#[test]
fn test_true_scale_at_standard_parallel() {
    let proj =
        PolarStereographic::from_definition(&ProjectionDefinition::greenland_stereographic())
            .unwrap();

    // On the true-scale latitude rho equals the parallel's radius a*m
    let ellipsoid = Ellipsoid::WGS84;
    let e = ellipsoid.eccentricity();
    let phi = 71.0_f64.to_radians();
    let parallel_radius = ellipsoid.a * phi.cos() / (1.0 - e * e * phi.sin().powi(2)).sqrt();

    let (x, y) = proj.forward(-39.0, 71.0);
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(y, -parallel_radius, epsilon = 1e-6);
}

#[test]
fn test_round_trip_away_from_pole() {
    let to_plane = Transformer::new(
        &ProjectionDefinition::geographic(),
        &ProjectionDefinition::greenland_stereographic(),
    )
    .unwrap();
    let to_geo = Transformer::greenland_to_geographic().unwrap();

    let mut lon = -75.0;
    while lon <= 10.0 {
        let mut lat = 55.0;
        while lat <= 88.0 {
            let (x, y) = to_plane.transform_point(lon, lat);
            let (lon2, lat2) = to_geo.transform_point(x, y);
            assert_abs_diff_eq!(lon2, lon, epsilon = 1e-6);
            assert_abs_diff_eq!(lat2, lat, epsilon = 1e-6);
            lat += 3.0;
        }
        lon += 5.0;
    }
}

#[test]
fn test_round_trip_through_point_lists() {
    let to_plane = Transformer::new(
        &ProjectionDefinition::geographic(),
        &ProjectionDefinition::greenland_stereographic(),
    )
    .unwrap();
    let to_geo = Transformer::greenland_to_geographic().unwrap();

    let lons = vec![-60.0, -45.0, -30.0, -20.0];
    let lats = vec![60.0, 65.0, 75.0, 82.5];

    let (xs, ys) = to_plane.transform_points(&lons, &lats).unwrap();
    let (lons2, lats2) = to_geo.transform_points(&xs, &ys).unwrap();

    for i in 0..lons.len() {
        assert_abs_diff_eq!(lons2[i], lons[i], epsilon = 1e-6);
        assert_abs_diff_eq!(lats2[i], lats[i], epsilon = 1e-6);
    }
}

#[test]
fn test_snyder_south_polar_example() {
    // Snyder (1987), ellipsoidal polar stereographic worked example:
    // International ellipsoid, true scale at 71°S, central meridian 100°W
    let def: ProjectionDefinition =
        "+proj=stere +ellps=intl +datum=nzgd49 +lat_ts=-71 +lat_0=-90 +lon_0=-100"
            .parse()
            .unwrap();
    let proj = PolarStereographic::from_definition(&def).unwrap();

    let (x, y) = proj.forward(150.0, -75.0);
    assert_abs_diff_eq!(x, -1_540_033.6, epsilon = 0.1);
    assert_abs_diff_eq!(y, -560_526.4, epsilon = 0.1);

    let (lon, lat) = proj.inverse(-1_540_033.6, -560_526.4);
    assert_abs_diff_eq!(lon, 150.0, epsilon = 1e-5);
    assert_abs_diff_eq!(lat, -75.0, epsilon = 1e-5);
}

#[test]
fn test_pole_scale_factor() {
    // Universal polar stereographic: true scale at the pole scaled by k_0
    let ups: ProjectionDefinition = "+proj=stere +lat_0=90 +lon_0=0 +k_0=0.994 +datum=WGS84"
        .parse()
        .unwrap();
    let unscaled: ProjectionDefinition = "+proj=stere +lat_0=90 +lon_0=0 +datum=WGS84"
        .parse()
        .unwrap();

    let (_, y_ups) = PolarStereographic::from_definition(&ups)
        .unwrap()
        .forward(0.0, 80.0);
    let (_, y_unscaled) = PolarStereographic::from_definition(&unscaled)
        .unwrap()
        .forward(0.0, 80.0);

    assert_abs_diff_eq!(y_ups / y_unscaled, 0.994, epsilon = 1e-12);
}

#[test]
fn test_longitudes_are_normalized() {
    let transformer = Transformer::greenland_to_geographic().unwrap();
    let geo = transformer.transform_grid(&greenland_grid(25, 25)).unwrap();

    for &lon in geo.lon.iter() {
        assert!((-180.0..=180.0).contains(&lon), "longitude {} out of range", lon);
    }
    let bounds = geo.bounds().unwrap();
    assert!(bounds.min_lat > 55.0 && bounds.max_lat < 90.0);
}

#[test]
fn test_identity_and_plane_to_plane() {
    let geo = ProjectionDefinition::geographic();
    let identity = Transformer::new(&geo, &geo).unwrap();
    assert_eq!(identity.transform_point(-45.0, 72.0), (-45.0, 72.0));

    let mut shifted = ProjectionDefinition::greenland_stereographic();
    shifted.lon_0 = 315.0;
    let replane =
        Transformer::new(&ProjectionDefinition::greenland_stereographic(), &shifted).unwrap();
    let back =
        Transformer::new(&shifted, &ProjectionDefinition::greenland_stereographic()).unwrap();

    let (x, y) = replane.transform_point(-300_000.0, -2_500_000.0);
    let (x2, y2) = back.transform_point(x, y);
    assert_abs_diff_eq!(x2, -300_000.0, epsilon = 1e-4);
    assert_abs_diff_eq!(y2, -2_500_000.0, epsilon = 1e-4);
}

#[test]
fn test_projection_errors() {
    let geo = ProjectionDefinition::geographic();

    let mut no_ellipsoid = ProjectionDefinition::greenland_stereographic();
    no_ellipsoid.ellipsoid = None;
    let mut no_datum = ProjectionDefinition::greenland_stereographic();
    no_datum.datum = None;
    let mut oblique = ProjectionDefinition::greenland_stereographic();
    oblique.lat_0 = Some(45.0);
    let mut wrong_hemisphere = ProjectionDefinition::greenland_stereographic();
    wrong_hemisphere.lat_ts = Some(-71.0);
    let mut zero_scale = ProjectionDefinition::greenland_stereographic();
    zero_scale.k_0 = 0.0;
    let mut mismatched = ProjectionDefinition::greenland_stereographic();
    mismatched.ellipsoid = Some(Ellipsoid::INTERNATIONAL);

    for def in [
        no_ellipsoid,
        no_datum,
        oblique,
        wrong_hemisphere,
        zero_scale,
        mismatched,
    ] {
        match Transformer::new(&def, &geo) {
            Err(GreenlandVizError::ProjectionError { .. }) => {}
            other => panic!("Expected ProjectionError for {:?}, got {:?}", def, other),
        }
    }

    // No datum shifts
    let mut nad83 = ProjectionDefinition::geographic();
    nad83.datum = Some(Datum::Nad83);
    nad83.ellipsoid = Some(Ellipsoid::GRS80);
    assert!(matches!(
        Transformer::new(&ProjectionDefinition::greenland_stereographic(), &nad83),
        Err(GreenlandVizError::ProjectionError { .. })
    ));

    // Parsed definitions are only checked when used
    let unvalidated: ProjectionDefinition = "+proj=stere +lat_0=90".parse().unwrap();
    assert!(unvalidated.validate().is_err());
    assert!(GREENLAND_PROJ.parse::<ProjectionDefinition>().unwrap().validate().is_ok());
}

#[test]
fn test_point_list_length_mismatch() {
    let transformer = Transformer::greenland_to_geographic().unwrap();
    let result = transformer.transform_points(&[0.0, 1.0], &[0.0]);
    assert!(matches!(result, Err(GreenlandVizError::ShapeMismatch { .. })));
}
