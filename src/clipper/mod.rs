//! Polygon clipping against axis-aligned planes.
//!
//! The rasterizer slices every triangle into per-cell pieces by repeatedly
//! splitting a convex polygon against one grid line at a time, keeping both
//! halves: the piece that falls into the current row or column, and the rest,
//! which is carried on to the next grid line. This is the two-sided cousin of
//! Sutherland-Hodgman clipping, see [`axis_split`].

pub mod axis_split;

pub use axis_split::{split_polygon, ClipPolygon, SplitPlane, MAX_POLYGON_VERTICES};
