mod support;

use nalgebra::{Point2, Point3, Vector3};
use support::{UNIT_BOX, approx_eq, bump, flat_quad, tilted_plane};
use surface_interrogation::{
    CageLayout, HighlightLines, InterrogationObject, InterrogationSettings, Isophotes, LightCage,
    LightLine, LightVector, LineOrientation, ReflectionLines,
    interrogation::{OFF_TEXTURE, Reflection},
};

fn bump_cage() -> LightCage {
    let mut cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 5);
    cage.set_cage_radius(0.1);
    cage
}

#[test]
fn single_line_always_uses_iso_value_zero() {
    let mut lines = HighlightLines::default();
    assert_eq!(lines.iso_values(), vec![0.0]);
    lines.set_radius(0.3);
    assert_eq!(lines.iso_values(), vec![0.0]);
}

#[test]
fn bands_span_the_radius_with_endpoints() {
    let mut lines = HighlightLines::default();
    lines.set_radius(0.4);
    lines.set_number_of_lines(5);
    let values = lines.iso_values();
    assert_eq!(values.len(), 5);
    assert_eq!(values[0], -0.4);
    assert_eq!(values[4], 0.4);
    for (v, expected) in values.iter().zip([-0.4, -0.2, 0.0, 0.2, 0.4]) {
        assert!(approx_eq(*v, expected, 1e-6));
    }
}

#[test]
fn zero_radius_disables_bands() {
    let mut lines = HighlightLines::default();
    lines.set_number_of_lines(5);
    assert_eq!(lines.iso_values(), vec![0.0]);
}

#[test]
fn isophote_bands_ignore_the_radius() {
    let mut isophotes = Isophotes::default();
    isophotes.set_number_of_lines(5);
    assert_eq!(isophotes.iso_values(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    isophotes.set_radius(0.25);
    assert_eq!(isophotes.iso_values(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
}

#[test]
fn number_of_lines_is_at_least_one() {
    let mut lines = HighlightLines::default();
    lines.set_number_of_lines(0);
    assert_eq!(lines.number_of_lines(), 1);
}

#[test]
fn compute_is_repeatable_after_clearing() {
    let object = bump(24);
    let cage = bump_cage();
    let mut lines = HighlightLines::default();
    lines.set_radius(0.1);
    lines.set_number_of_lines(3);

    lines.compute(&object, &cage);
    let first = lines.lines().to_vec();
    assert!(lines.polylines().count() > 0);

    lines.clear_lines();
    assert_eq!(lines.polylines().count(), 0);
    lines.compute(&object, &cage);
    assert_eq!(lines.lines(), first.as_slice());
}

#[test]
fn compute_without_clearing_accumulates() {
    let object = bump(16);
    let cage = bump_cage();
    let mut lines = HighlightLines::default();
    lines.compute(&object, &cage);
    let once = lines.segment_count();
    lines.compute(&object, &cage);
    assert_eq!(lines.lines().len(), 2 * cage.len());
    assert_eq!(lines.segment_count(), 2 * once);
}

#[test]
fn one_contour_set_per_cage_line() {
    let object = bump(16);
    let cage = bump_cage();
    let mut lines = HighlightLines::default();
    lines.set_radius(0.1);
    lines.set_number_of_lines(3);
    lines.compute(&object, &cage);

    assert_eq!(lines.lines().len(), 5);
    let isos = lines.iso_values();
    for (pass, set) in lines.lines().iter().enumerate() {
        assert_eq!(set.pass, pass);
        for polyline in &set.polylines {
            assert!(isos.contains(&polyline.iso_value()));
        }
    }
}

#[test]
fn highlight_line_on_tilted_plane_is_straight() {
    // normal line at (x, y, x/2) meets the light line (x = 0, z = 2) for x = 0.8
    let object = tilted_plane(8);
    let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
    let mut lines = HighlightLines::default();
    lines.compute(&object, &cage);

    let polylines: Vec<_> = lines.polylines().collect();
    assert_eq!(polylines.len(), 1);
    assert!(!polylines[0].is_closed());
    for p in polylines[0].points() {
        assert!(approx_eq(p.x, 0.8, 1e-6), "{}", p);
        assert!(approx_eq(p.z, 0.4, 1e-6));
    }
    assert!(approx_eq(polylines[0].length(), 2.0, 1e-6));
}

#[test]
fn flat_quad_under_vertical_line_is_uniform() {
    let object = flat_quad();
    let mut cage = LightCage::new(UNIT_BOX, CageLayout::default());
    cage.push_back(LightLine::new(Point3::new(0.0, 0.0, 2.0), Vector3::z()));

    let mut lines = HighlightLines::default();
    let scalars = lines.compute_scalars(&object, &cage, 0);
    assert_eq!(scalars.len(), 4);
    for s in &scalars {
        assert!(approx_eq(*s, scalars[0], 1e-6));
    }

    // the uniform value is exactly the iso value: no crossing
    assert_eq!(scalars[0], 0.0);
    lines.compute(&object, &cage);
    assert_eq!(lines.lines().len(), 1);
    assert!(lines.lines()[0].polylines.is_empty());
}

#[test]
fn empty_mesh_gives_empty_output() {
    let object = InterrogationObject::default();
    let cage = bump_cage();
    let mut lines = HighlightLines::default();
    assert!(lines.compute_scalars(&object, &cage, 0).is_empty());
    lines.compute(&object, &cage);
    assert_eq!(lines.lines().len(), cage.len());
    assert_eq!(lines.polylines().count(), 0);
    lines.compute_texture_coordinates(&object, &cage);
    assert!(lines.texture_coordinates().is_empty());
}

#[test]
fn empty_cage_gives_no_passes() {
    let mut lines = HighlightLines::default();
    lines.compute(&bump(8), &LightCage::default());
    assert!(lines.lines().is_empty());
}

#[test]
fn reflection_lines_follow_the_eye() {
    let object = bump(24);
    let cage = bump_cage();
    let mut lines = ReflectionLines::new(Reflection::new(Point3::new(0.0, 0.0, 6.0)));
    lines.compute(&object, &cage);
    let from_above = lines.lines().to_vec();
    assert!(lines.polylines().count() > 0);

    lines.set_eye_point(Point3::new(3.0, 0.0, 3.0));
    assert_eq!(lines.eye_point(), Point3::new(3.0, 0.0, 3.0));
    lines.clear_lines();
    lines.compute(&object, &cage);
    assert_ne!(lines.lines(), from_above.as_slice());
}

#[test]
fn isophote_terminator_on_sphere_is_the_equator() {
    let sphere = InterrogationObject::sphere(1.0, 16, 7);
    let light = LightVector::new(Vector3::z());
    let mut isophotes = Isophotes::default();
    isophotes.compute(&sphere, &light);

    assert_eq!(isophotes.lines().len(), 1);
    let polylines: Vec<_> = isophotes.polylines().collect();
    assert_eq!(polylines.len(), 1);
    assert!(polylines[0].is_closed());
    for p in polylines[0].points() {
        assert!(p.z.abs() < 1e-6, "{}", p);
    }
}

#[test]
fn highlight_texture_coordinates_follow_the_normal() {
    let object = flat_quad();
    let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
    let mut lines = HighlightLines::default();
    lines.compute_texture_coordinates(&object, &cage);

    let tcs = lines.texture_coordinates();
    assert_eq!(tcs.len(), 4);
    for (p, tc) in object.points().iter().zip(tcs) {
        assert!(approx_eq(tc.x, 0.5 * (p.x + 1.0), 1e-6));
        assert_eq!(tc.y, 0.5);
    }
}

#[test]
fn normals_parallel_to_the_light_plane_are_off_texture() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let object = InterrogationObject::new(points, vec![Vector3::x(); 3], vec![[0, 1, 2]]).unwrap();
    let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
    let mut lines = HighlightLines::default();
    lines.compute_texture_coordinates(&object, &cage);
    assert!(lines.texture_coordinates().iter().all(|tc| *tc == Point2::from(OFF_TEXTURE)));
}

#[test]
fn isophote_texture_coordinates_remap_the_cosine() {
    let object = flat_quad();
    let mut isophotes = Isophotes::default();
    isophotes.compute_texture_coordinates(&object, &LightVector::new(Vector3::z()));
    for tc in isophotes.texture_coordinates() {
        assert!(approx_eq(tc.x, 1.0, 1e-6));
        assert_eq!(tc.y, 0.5);
    }

    isophotes.compute_texture_coordinates(&object, &LightVector::new(Vector3::x()));
    for tc in isophotes.texture_coordinates() {
        assert!(approx_eq(tc.x, 0.5, 1e-6));
    }
}

#[test]
fn settings_round_trip_and_toggle() {
    let settings = InterrogationSettings {
        radius: 0.2,
        number_of_lines: 4,
        color: [0.0, 1.0, 0.0],
        pre_filter: false,
    };
    let mut lines = HighlightLines::with_settings(Default::default(), settings);
    assert_eq!(lines.radius(), 0.2);
    assert_eq!(lines.blend_color(), [0.0, 1.0, 0.0]);
    lines.toggle_pre_filter();
    assert!(lines.pre_filter());
    lines.toggle_pre_filter();
    assert!(!lines.pre_filter());
    assert_eq!(InterrogationSettings::default().number_of_lines, 1);
}

#[test]
fn textures_match_the_cage_layout() {
    let parallel = bump_cage();
    let mut lines = HighlightLines::default();
    let texture = lines.compute_texture(&parallel, 16);
    assert_eq!((texture.width(), texture.height()), (16, 1));

    lines.set_pre_filter(true);
    let texture = lines.compute_texture(&parallel, 16);
    assert_eq!((texture.width(), texture.height()), (16, 1));

    let mut criss_cross = LightCage::top_criss_cross(UNIT_BOX, 3, 3);
    criss_cross.set_cage_radius(0.1);
    let texture = lines.compute_texture(&criss_cross, 8);
    assert_eq!((texture.width(), texture.height()), (8, 8));
    assert!(texture.data().iter().any(|&v| v > 0.0));
    assert!(texture.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn lines_drawn_in_their_color() {
    let mut lines = Isophotes::default();
    lines.set_color([0.2, 0.4, 0.6]);
    assert_eq!(lines.color(), [0.2, 0.4, 0.6]);
    assert_eq!(lines.blend_color(), lines.color());
}

#[test]
fn reflection_texture_coordinates_mirror_the_eye_ray() {
    // eye ray from (0, 0, 10) mirrored at z = 0 reaches the light plane z = 2
    // at 1.2 times the point's offset from the eye axis
    let object = flat_quad();
    let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
    let mut lines = ReflectionLines::new(Reflection::new(Point3::new(0.0, 0.0, 10.0)));
    lines.compute_texture_coordinates(&object, &cage);

    let tcs = lines.texture_coordinates();
    assert_eq!(tcs.len(), 4);
    for (p, tc) in object.points().iter().zip(tcs) {
        assert!(approx_eq(tc.x, 0.5 * (1.2 * p.x + 1.0), 1e-6), "{} -> {}", p, tc);
        assert_eq!(tc.y, 0.5);
    }
    let corner = object
        .points()
        .iter()
        .position(|p| p.x == -1.0 && p.y == -1.0)
        .unwrap();
    assert!(approx_eq(tcs[corner].x, -0.1, 1e-6));

    // the highlight lookup along the normal stays inside the texture
    let mut highlights = HighlightLines::default();
    highlights.compute_texture_coordinates(&object, &cage);
    for (p, tc) in object.points().iter().zip(highlights.texture_coordinates()) {
        assert!(approx_eq(tc.x, 0.5 * (p.x + 1.0), 1e-6));
    }
}

#[test]
fn reflection_value_for_an_oblique_eye() {
    let line = LightLine::new(Point3::new(0.0, -1.0, 2.0), Vector3::y());
    let p = Point3::origin();
    let n = Vector3::z();
    let eye = Point3::new(3.0, 0.0, 4.0);

    // r = 2 (n·(e-p)) n - (e-p) = (-3, 0, 4)
    let to_eye = eye - p;
    let r = (n * (2.0 * n.dot(&to_eye)) - to_eye).normalize();
    assert!((r - Vector3::new(-0.6, 0.0, 0.8)).norm() < 1e-9);
    let expected = line.direction().cross(&r).dot(&(line.point() - p));

    let value = line.reflection_value(&p, &n, &eye);
    assert!(approx_eq(value, expected, 1e-6));
    // the mirrored ray meets z = 2 at x = -1.5, 1.5 * 0.8 away from the line
    assert!(approx_eq(value, 1.2, 1e-6));
    assert!(!approx_eq(value, line.highlight_value(&p, &n), 1e-3));
}
