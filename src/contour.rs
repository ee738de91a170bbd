//! Isocontours of per-point scalar fields over a triangle mesh.
//!
//! Marching triangles: a point counts as *above* an isovalue when its scalar
//! is `>= iso`. A triangle with corners on both sides is crossed on exactly two
//! edges; the crossing point on an edge is interpolated linearly between its
//! two corners. Segments are joined into polylines through the edge they
//! share, so chaining is exact and needs no distance tolerance.

use crate::float_types::Real;
use crate::math;
use crate::object::{InterrogationObject, MeshTopology};
use hashbrown::HashMap;
use nalgebra::Point3;

/// A connected piece of an isocontour.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point3<Real>>,
    /// Closed polylines do not repeat their first point.
    closed: bool,
    iso_value: Real,
}

impl Polyline {
    pub fn new(points: Vec<Point3<Real>>, closed: bool, iso_value: Real) -> Self {
        Polyline {
            points,
            closed,
            iso_value,
        }
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub const fn iso_value(&self) -> Real {
        self.iso_value
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of straight pieces, including the closing one of a loop.
    pub fn segment_count(&self) -> usize {
        match (self.closed, self.points.len()) {
            (_, 0 | 1) => 0,
            (true, n) => n,
            (false, n) => n - 1,
        }
    }

    /// Straight pieces as point pairs, ready for a line renderer.
    pub fn segments(&self) -> impl Iterator<Item = [Point3<Real>; 2]> + '_ {
        let n = self.points.len();
        (0..self.segment_count()).map(move |i| [self.points[i], self.points[(i + 1) % n]])
    }

    /// Total length.
    pub fn length(&self) -> Real {
        self.segments().map(|[a, b]| (b - a).norm()).sum()
    }
}

/// `count` evenly spaced values spanning `[low, high]`, endpoints included.
///
/// A single value is placed at the midpoint.
pub fn iso_values(low: Real, high: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![0.5 * (low + high)],
        _ => {
            let step = (high - low) / (count - 1) as Real;
            let mut values: Vec<Real> = (0..count).map(|i| low + step * i as Real).collect();
            // no round-off at the upper end
            values[count - 1] = high;
            values
        },
    }
}

/// Extracts isocontours over the connectivity of one mesh.
///
/// The filter only borrows the mesh and its cached edge table; scalars are
/// passed per call, so one filter serves any number of passes.
#[derive(Debug, Clone, Copy)]
pub struct ContourFilter<'a> {
    points: &'a [Point3<Real>],
    triangles: &'a [[usize; 3]],
    topology: &'a MeshTopology,
}

impl<'a> ContourFilter<'a> {
    pub fn new(object: &'a InterrogationObject) -> Self {
        ContourFilter {
            points: object.points(),
            triangles: object.triangles(),
            topology: object.topology(),
        }
    }

    /// Polylines of every isovalue, in the order of `iso_values`.
    pub fn contour_all(&self, scalars: &[Real], iso_values: &[Real]) -> Vec<Polyline> {
        iso_values
            .iter()
            .flat_map(|&iso| self.contour(scalars, iso))
            .collect()
    }

    /// Polylines of one isovalue: open arcs first, then closed loops.
    ///
    /// A scalar array that does not match the point count yields nothing.
    pub fn contour(&self, scalars: &[Real], iso: Real) -> Vec<Polyline> {
        if scalars.len() != self.points.len() {
            debug_assert!(
                scalars.is_empty() && self.points.is_empty(),
                "{} scalars for {} points",
                scalars.len(),
                self.points.len()
            );
            return Vec::new();
        }

        let segments = self.segments(scalars, iso);
        if segments.is_empty() {
            return Vec::new();
        }

        let mut incident: HashMap<usize, Vec<usize>> = HashMap::with_capacity(segments.len() * 2);
        for (s, pair) in segments.iter().enumerate() {
            for &edge in pair {
                incident.entry(edge).or_default().push(s);
            }
        }

        let mut used = vec![false; segments.len()];
        let mut polylines = Vec::new();

        // open arcs start and end on mesh-boundary edges
        for s in 0..segments.len() {
            for &edge in &segments[s] {
                if !used[s] && incident[&edge].len() == 1 {
                    let chain = walk(edge, &segments, &incident, &mut used);
                    polylines.push(self.polyline(&chain, false, scalars, iso));
                }
            }
        }

        // everything left is a loop
        for s in 0..segments.len() {
            if used[s] {
                continue;
            }
            used[s] = true;
            let [start, next] = segments[s];
            let mut chain = vec![start];
            chain.extend(walk(next, &segments, &incident, &mut used));
            let closed = chain.len() > 2 && chain.first() == chain.last();
            if closed {
                chain.pop();
            }
            polylines.push(self.polyline(&chain, closed, scalars, iso));
        }

        log::trace!(
            "iso {}: {} segments chained into {} polylines",
            iso,
            segments.len(),
            polylines.len()
        );
        polylines
    }

    /// One segment per crossed triangle, as the pair of crossed edge ids.
    fn segments(&self, scalars: &[Real], iso: Real) -> Vec<[usize; 2]> {
        let mut segments = Vec::new();
        for (t, tri) in self.triangles.iter().enumerate() {
            let s = tri.map(|i| scalars[i]);
            let min = s[0].min(s[1]).min(s[2]);
            let max = s[0].max(s[1]).max(s[2]);
            // scalar-range culling: all corners on one side
            if !(min < iso && iso <= max) {
                continue;
            }

            let edges = self.topology.triangle_edges(t);
            let mut crossed = [0; 2];
            let mut found = 0;
            for k in 0..3 {
                let above_a = s[k] >= iso;
                let above_b = s[(k + 1) % 3] >= iso;
                if above_a != above_b && found < 2 {
                    crossed[found] = edges[k];
                    found += 1;
                }
            }
            if found == 2 {
                segments.push(crossed);
            }
        }
        segments
    }

    /// Crossing point on an edge.
    fn crossing(&self, edge: usize, scalars: &[Real], iso: Real) -> Point3<Real> {
        let [a, b] = self.topology.edge(edge);
        let d1 = scalars[a] - iso;
        let d2 = scalars[b] - iso;
        let denominator = d1.abs() + d2.abs();
        let t = if denominator > 0.0 { d1.abs() / denominator } else { 0.5 };
        math::lerp(&self.points[a], &self.points[b], t)
    }

    fn polyline(&self, chain: &[usize], closed: bool, scalars: &[Real], iso: Real) -> Polyline {
        let points = chain
            .iter()
            .map(|&edge| self.crossing(edge, scalars, iso))
            .collect();
        Polyline::new(points, closed, iso)
    }
}

/// Follow unused segments from `start`, returning the visited edge ids.
fn walk(
    start: usize,
    segments: &[[usize; 2]],
    incident: &HashMap<usize, Vec<usize>>,
    used: &mut [bool],
) -> Vec<usize> {
    let mut chain = vec![start];
    let mut current = start;
    while let Some(&s) = incident
        .get(&current)
        .and_then(|list| list.iter().find(|&&s| !used[s]))
    {
        used[s] = true;
        let [a, b] = segments[s];
        current = if a == current { b } else { a };
        chain.push(current);
    }
    chain
}
