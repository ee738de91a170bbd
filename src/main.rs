// main.rs
//
// Walks through each interrogation technique on a saddle surface and writes
// the results to `out/`: polylines as OBJ line elements and, with the
// `image-io` feature, the synthesized textures as PNG.

use std::fmt::Write as _;
use std::fs;

use log::LevelFilter;
use nalgebra::{Point3, Vector3};
use surface_interrogation::interrogation::Reflection;
use surface_interrogation::texture::DEFAULT_TEXTURE_SIZE;
use surface_interrogation::{
    Attenuation, HighlightLines, InterrogationLines, InterrogationObject, Isophotes, LightCage, LightVector,
    LineOrientation, Polyline, ScalarField, Transform,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // Ensure the output folder exists
    let _ = fs::create_dir_all("out");

    // z = 0.2 (x² - y²) over [-1, 1]²
    let saddle = InterrogationObject::height_field(2.0, 2.0, 48, 48, |x, y| 0.2 * (x * x - y * y));
    log::info!(
        "saddle: {} points, {} triangles, bbox {:?}",
        saddle.num_points(),
        saddle.num_triangles(),
        saddle.bbox()
    );

    // 1) highlight lines from five parallel light lines
    let mut cage = LightCage::top_parallel(saddle.bbox(), LineOrientation::AlongY, 5);
    cage.set_cage_radius(0.1);
    cage.set_cage_attenuation(Attenuation::Polynomial);

    let mut highlights = HighlightLines::default();
    highlights.compute(&saddle, &cage);
    report("highlight lines", &highlights);
    write_obj("out/highlight_lines.obj", highlights.polylines());

    // 2) the same cage turned by 30 degrees, banded into three lines per light
    cage.rotate_z(30.0);
    highlights.clear_lines();
    highlights.set_radius(0.05);
    highlights.set_number_of_lines(3);
    highlights.compute(&saddle, &cage);
    report("banded highlight lines", &highlights);
    write_obj("out/highlight_bands.obj", highlights.polylines());

    // 3) reflection lines seen from above the surface
    let mut reflections = InterrogationLines::new(Reflection::new(Point3::new(0.0, -3.0, 4.0)));
    reflections.compute(&saddle, &cage);
    report("reflection lines", &reflections);
    write_obj("out/reflection_lines.obj", reflections.polylines());

    // 4) isophotes for a light from above, seven bands
    let light = LightVector::new(Vector3::new(0.3, 0.2, 1.0));
    let mut isophotes = Isophotes::default();
    isophotes.set_number_of_lines(7);
    isophotes.compute(&saddle, &light);
    report("isophotes", &isophotes);
    write_obj("out/isophotes.obj", isophotes.polylines());

    // 5) textures and texture coordinates
    highlights.toggle_pre_filter();
    highlights.compute_texture_coordinates(&saddle, &cage);
    let highlight_texture = highlights.compute_texture(&cage, DEFAULT_TEXTURE_SIZE);

    let criss_cross = {
        let mut cage = LightCage::top_criss_cross(saddle.bbox(), 4, 4);
        cage.set_cage_radius(0.08);
        cage.set_pre_filter(true);
        cage
    };
    let criss_cross_texture = criss_cross.compute_texture(DEFAULT_TEXTURE_SIZE);

    isophotes.compute_texture_coordinates(&saddle, &light);
    let isophote_texture = isophotes.compute_texture(&light, DEFAULT_TEXTURE_SIZE);

    log::info!(
        "textures: highlight {}x{}, criss-cross {}x{}, isophote {}x{}",
        highlight_texture.width(),
        highlight_texture.height(),
        criss_cross_texture.width(),
        criss_cross_texture.height(),
        isophote_texture.width(),
        isophote_texture.height()
    );

    #[cfg(feature = "image-io")]
    {
        for (path, texture) in [
            ("out/highlight_texture.png", &highlight_texture),
            ("out/criss_cross_texture.png", &criss_cross_texture),
            ("out/isophote_texture.png", &isophote_texture),
        ] {
            if let Err(e) = texture.save(path) {
                log::error!("could not write {}: {}", path, e);
            }
        }
    }
}

fn report<F: ScalarField>(name: &str, lines: &InterrogationLines<F>) {
    log::info!(
        "{}: {} passes, {} polylines, {} segments",
        name,
        lines.lines().len(),
        lines.polylines().count(),
        lines.segment_count()
    );
}

/// Polylines as OBJ `v` and `l` elements.
fn write_obj<'a>(path: &str, polylines: impl Iterator<Item = &'a Polyline>) {
    let mut obj = String::new();
    let mut next_index = 1;
    for polyline in polylines {
        for p in polyline.points() {
            let _ = writeln!(obj, "v {} {} {}", p.x, p.y, p.z);
        }
        let mut indices: Vec<usize> = (next_index..next_index + polyline.len()).collect();
        if polyline.is_closed() {
            indices.push(next_index);
        }
        next_index += polyline.len();
        if indices.len() > 1 {
            let refs: Vec<String> = indices.iter().map(usize::to_string).collect();
            let _ = writeln!(obj, "l {}", refs.join(" "));
        }
    }
    if let Err(e) = fs::write(path, obj) {
        log::error!("could not write {}: {}", path, e);
    }
}
