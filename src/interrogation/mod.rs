//! Interrogation lines: scalar fields over the surface and their isocontours.
//!
//! [`InterrogationLines`] drives the pipeline for any [`ScalarField`]
//! strategy:
//! 1. evaluate the field at every point of the object, once per pass
//!    (one pass per cage line, a single pass for isophotes)
//! 2. contour each pass at the configured isovalues
//! 3. append the resulting polylines as one [`ContourSet`] per pass
//!
//! Results accumulate: [`InterrogationLines::clear_lines`] has to be called
//! before a `compute` meant to replace the previous result.
//!
//! The object and the light are borrowed per call rather than stored, so
//! they stay free to be transformed between computations.

use crate::contour::{self, ContourFilter, Polyline};
use crate::float_types::Real;
use crate::light::{Color, WHITE};
use crate::object::InterrogationObject;
use crate::texture::LuminanceImage;
use nalgebra::{Point2, Point3, Vector3};

pub mod highlight;
pub mod isophotes;
pub mod reflection;

pub use highlight::Highlight;
pub use isophotes::Isophote;
pub use reflection::Reflection;

/// Polygon count above which recomputing on every interaction gets slow.
pub const LARGE_MESH_POLYGONS: usize = 100_000;

/// Texture coordinate stored for points whose lookup ray misses the light
/// plane. It lies outside `[0, 1]`, so renderers show the border color.
pub const OFF_TEXTURE: [Real; 2] = [-100.0, 0.0];

pub type HighlightLines = InterrogationLines<Highlight>;
pub type ReflectionLines = InterrogationLines<Reflection>;
pub type Isophotes = InterrogationLines<Isophote>;

/// A scalar function over the surface, derived from a light source.
pub trait ScalarField: Sync {
    /// Light source the field is derived from.
    type Light: Sync;

    /// Number of scalar passes the light produces.
    fn passes(&self, light: &Self::Light) -> usize;

    /// Value of pass `pass` at a surface point with the given normal.
    fn scalar(&self, light: &Self::Light, pass: usize, point: &Point3<Real>, normal: &Vector3<Real>) -> Real;

    /// Range spanned by the isovalues when banding with `radius`, `None` when
    /// this radius does not allow bands.
    fn band_range(&self, radius: Real) -> Option<(Real, Real)>;

    /// Texture coordinate in `[0, 1]` of a surface point, `None` if the point
    /// cannot be mapped onto the light's texture.
    fn texture_coordinate(
        &self,
        light: &Self::Light,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<Point2<Real>>;

    /// Texture encoding the field, `size` texels wide.
    fn texture(&self, light: &Self::Light, settings: &InterrogationSettings, size: usize) -> LuminanceImage;
}

/// Runtime knobs shared by all interrogation techniques.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterrogationSettings {
    /// Half width of the band of isovalues; 0 disables banding.
    pub radius: Real,
    /// Number of isovalues per pass when banding.
    pub number_of_lines: usize,
    /// Line color, also the blend color of textures.
    pub color: Color,
    /// Supersample and filter synthesized textures.
    pub pre_filter: bool,
}

impl Default for InterrogationSettings {
    fn default() -> Self {
        InterrogationSettings {
            radius: 0.0,
            number_of_lines: 1,
            color: WHITE,
            pre_filter: false,
        }
    }
}

impl InterrogationSettings {
    pub fn toggle_pre_filter(&mut self) {
        self.pre_filter = !self.pre_filter;
    }
}

/// Polylines of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    /// Index of the pass, the cage line for highlight and reflection lines.
    pub pass: usize,
    pub polylines: Vec<Polyline>,
}

#[derive(Debug, Clone)]
pub struct InterrogationLines<F: ScalarField> {
    field: F,
    settings: InterrogationSettings,
    lines: Vec<ContourSet>,
    texture_coordinates: Vec<Point2<Real>>,
}

impl<F: ScalarField + Default> Default for InterrogationLines<F> {
    fn default() -> Self {
        InterrogationLines::new(F::default())
    }
}

impl<F: ScalarField> InterrogationLines<F> {
    pub fn new(field: F) -> Self {
        Self::with_settings(field, InterrogationSettings::default())
    }

    pub fn with_settings(field: F, settings: InterrogationSettings) -> Self {
        InterrogationLines {
            field,
            settings,
            lines: Vec::new(),
            texture_coordinates: Vec::new(),
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub const fn settings(&self) -> &InterrogationSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut InterrogationSettings {
        &mut self.settings
    }

    pub const fn radius(&self) -> Real {
        self.settings.radius
    }

    pub fn set_radius(&mut self, radius: Real) {
        self.settings.radius = radius;
    }

    pub const fn number_of_lines(&self) -> usize {
        self.settings.number_of_lines
    }

    /// At least one line is always drawn.
    pub fn set_number_of_lines(&mut self, number_of_lines: usize) {
        self.settings.number_of_lines = number_of_lines.max(1);
    }

    pub const fn color(&self) -> Color {
        self.settings.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.settings.color = color;
    }

    /// Color textures are blended with.
    pub const fn blend_color(&self) -> Color {
        self.settings.color
    }

    pub const fn pre_filter(&self) -> bool {
        self.settings.pre_filter
    }

    pub fn set_pre_filter(&mut self, pre_filter: bool) {
        self.settings.pre_filter = pre_filter;
    }

    pub fn toggle_pre_filter(&mut self) {
        self.settings.toggle_pre_filter();
    }

    /// Isovalues every pass is contoured at.
    ///
    /// Bands need more than one line and a band range; otherwise the single
    /// isovalue 0 is used.
    pub fn iso_values(&self) -> Vec<Real> {
        match self.field.band_range(self.settings.radius) {
            Some((low, high)) if self.settings.number_of_lines > 1 => {
                contour::iso_values(low, high, self.settings.number_of_lines)
            },
            _ => vec![0.0],
        }
    }

    /// Per-point scalars of one pass, in point order.
    pub fn compute_scalars(&self, object: &InterrogationObject, light: &F::Light, pass: usize) -> Vec<Real> {
        let field = &self.field;
        object.map_vertices(|point, normal| field.scalar(light, pass, point, normal))
    }

    /// Contour every pass of the field over `object` and append the results,
    /// one [`ContourSet`] per pass.
    pub fn compute(&mut self, object: &InterrogationObject, light: &F::Light) {
        if object.num_triangles() > LARGE_MESH_POLYGONS {
            log::warn!(
                "contouring {} polygons, interactive recomputation will be slow",
                object.num_triangles()
            );
        }

        let passes = self.field.passes(light);
        if passes == 0 {
            log::warn!("light source is empty, no interrogation lines computed");
        }

        let iso_values = self.iso_values();
        let filter = ContourFilter::new(object);
        for pass in 0..passes {
            let scalars = self.compute_scalars(object, light, pass);
            let polylines = filter.contour_all(&scalars, &iso_values);
            log::trace!("pass {}: {} polylines", pass, polylines.len());
            self.lines.push(ContourSet { pass, polylines });
        }

        log::debug!(
            "computed {} passes at {} isovalues over {} points, {} polylines total",
            passes,
            iso_values.len(),
            object.num_points(),
            self.polylines().count()
        );
    }

    /// Discard all computed polylines.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[ContourSet] {
        &self.lines
    }

    /// All polylines of all passes, in computation order.
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.lines.iter().flat_map(|set| set.polylines.iter())
    }

    /// Straight pieces over all polylines.
    pub fn segment_count(&self) -> usize {
        self.polylines().map(Polyline::segment_count).sum()
    }

    /// Map every point of `object` onto the light's texture. Points that
    /// cannot be mapped get [`OFF_TEXTURE`].
    pub fn compute_texture_coordinates(&mut self, object: &InterrogationObject, light: &F::Light) {
        let field = &self.field;
        self.texture_coordinates = object.map_vertices(|point, normal| {
            field
                .texture_coordinate(light, point, normal)
                .unwrap_or_else(|| Point2::from(OFF_TEXTURE))
        });
        log::debug!("computed {} texture coordinates", self.texture_coordinates.len());
    }

    /// Per-point texture coordinates of the last
    /// [`compute_texture_coordinates`](Self::compute_texture_coordinates).
    pub fn texture_coordinates(&self) -> &[Point2<Real>] {
        &self.texture_coordinates
    }

    /// Texture of the field, `size` texels wide.
    pub fn compute_texture(&self, light: &F::Light, size: usize) -> LuminanceImage {
        self.field.texture(light, &self.settings, size)
    }
}
