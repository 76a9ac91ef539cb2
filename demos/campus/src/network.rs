//! Built-in campus path network.
//!
//! A small synthetic campus: footpaths across a central quad plus a ring
//! road with spurs to each building.  Used when no GeoJSON file is given.

use cr_core::{ClassSpeeds, Coordinate, RouterConfig};
use cr_spatial::LineFeature;

const DORMS:   [f64; 2] = [-88.0540, 30.6920];
const LIBRARY: [f64; 2] = [-88.0500, 30.6950];
const GYM:     [f64; 2] = [-88.0460, 30.6920];
const LAB:     [f64; 2] = [-88.0500, 30.6890];
const QUAD:    [f64; 2] = [-88.0500, 30.6920];
const PARKING: [f64; 2] = [-88.0560, 30.6880];

/// Named points a query may use instead of `lon,lat`.
pub const LANDMARKS: [(&str, [f64; 2]); 6] = [
    ("dorms",   DORMS),
    ("library", LIBRARY),
    ("gym",     GYM),
    ("lab",     LAB),
    ("quad",    QUAD),
    ("parking", PARKING),
];

pub fn landmark(name: &str) -> Option<Coordinate> {
    LANDMARKS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, p)| p.into())
}

/// Footways across the quad plus the ring road and its spurs.
pub fn campus_lines() -> Vec<LineFeature> {
    let ring_nw = Coordinate::new(-88.0560, 30.6960);
    let ring_n  = Coordinate::new(-88.0500, 30.6960);
    let ring_ne = Coordinate::new(-88.0440, 30.6960);
    let ring_e  = Coordinate::new(-88.0440, 30.6920);
    let ring_se = Coordinate::new(-88.0440, 30.6880);
    let ring_s  = Coordinate::new(-88.0500, 30.6880);
    let ring_w  = Coordinate::new(-88.0560, 30.6920);

    let quad: Coordinate = QUAD.into();
    vec![
        // Footpaths radiating from the quad.
        LineFeature::with_class(vec![DORMS.into(), quad], "footway"),
        LineFeature::with_class(vec![quad, LIBRARY.into()], "footway"),
        LineFeature::with_class(vec![quad, GYM.into()], "footway"),
        LineFeature::with_class(vec![quad, LAB.into()], "footway"),
        // Ring road, clockwise from the car park.
        LineFeature::with_class(
            vec![PARKING.into(), ring_w, ring_nw, ring_n, ring_ne, ring_e, ring_se, ring_s, PARKING.into()],
            "road",
        ),
        // Service spurs.
        LineFeature::with_class(vec![ring_w, DORMS.into()], "service"),
        LineFeature::with_class(vec![ring_n, LIBRARY.into()], "service"),
        LineFeature::with_class(vec![ring_e, GYM.into()], "service"),
        LineFeature::with_class(vec![ring_s, LAB.into()], "service"),
    ]
}

/// Default speeds, with cars kept off the footways and bikes slowed on them.
pub fn campus_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.class_speeds.insert(
        "footway".into(),
        ClassSpeeds { cycling_kmh: Some(8.0), driving_kmh: Some(3.0), ..ClassSpeeds::default() },
    );
    config.class_speeds.insert(
        "service".into(),
        ClassSpeeds { driving_kmh: Some(20.0), ..ClassSpeeds::default() },
    );
    config
}
