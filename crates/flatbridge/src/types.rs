// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value types shared with the C boundary.
//!
//! `Record` and `Point2f` are `#[repr(C)]` and cross the boundary as-is;
//! `Vertex` and `Contour` are the internal representation and are converted
//! while flattening.

/// Value-object exchanged with the managed side.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Record {
    pub id: i32,
    pub kind: i32,
    pub value: f32,
    /// Bumped by every `update_record` call; ignored on input.
    pub revision: u32,
}

/// Wire vertex (single precision).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

/// Internal vertex (double precision).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<&Vertex> for Point2f {
    #[allow(clippy::cast_possible_truncation)] // narrowing to the wire precision
    fn from(v: &Vertex) -> Self {
        Self {
            x: v.x as f32,
            y: v.y as f32,
        }
    }
}

impl From<&Point2f> for Vertex {
    fn from(p: &Point2f) -> Self {
        Self {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }
}

/// Labelled outline: one group of the jagged structures handed to the
/// managed side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub label: String,
    pub vertices: Vec<Vertex>,
}

impl Contour {
    #[must_use]
    pub fn new(label: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self {
            label: label.into(),
            vertices,
        }
    }
}
