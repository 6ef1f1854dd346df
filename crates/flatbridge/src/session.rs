// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native domain object exposed through a boundary handle.
//!
//! A `Session` holds a scalar, a value-object, a sequence of value-objects
//! and a list of contours. Contours are the jagged source: their labels and
//! vertices are flattened independently for the managed side, which rebuilds
//! them group by group.
//!
//! A session is not synchronised; the boundary wraps it in a mutex so calls
//! on one handle are serialised.

use crate::codec::{self, FlatArray, WireArray};
use crate::config::{Config, OutputMode};
use crate::error::{Error, Result};
use crate::types::{Contour, Point2f, Record, Vertex};

/// Boundary outputs kept alive by the session in [`OutputMode::Borrowed`].
#[derive(Debug, Default)]
pub struct RetainedOutputs {
    pub labels: Option<WireArray<u8>>,
    pub points: Option<WireArray<Point2f>>,
}

/// Native state behind one handle.
#[derive(Debug, Default)]
pub struct Session {
    config: Config,
    value: i32,
    record: Record,
    records: Vec<Record>,
    contours: Vec<Contour>,
    retained: RetainedOutputs,
}

impl Session {
    #[must_use]
    pub fn new(config: Config) -> Self {
        log::debug!("[session] created (output_mode={:?})", config.output_mode);
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        self.config.output_mode
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Replace the stored record as given.
    pub fn set_record(&mut self, record: Record) {
        self.record = record;
    }

    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Store `record` and write the stored copy back into it.
    ///
    /// The stored copy carries the next revision number; the incoming
    /// `revision` is ignored.
    pub fn update_record(&mut self, record: &mut Record) {
        let revision = self.record.revision.wrapping_add(1);
        self.record = Record {
            revision,
            ..*record
        };
        *record = self.record;
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        log::debug!("[session] storing {} records", records.len());
        self.records = records;
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn add_contour(&mut self, label: impl Into<String>, vertices: Vec<Vertex>) {
        self.contours.push(Contour::new(label, vertices));
    }

    pub fn clear_contours(&mut self) {
        self.contours.clear();
    }

    #[must_use]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Replace every contour from two flattened structures sharing one outer
    /// grouping (label bytes and wire points). On error the current contours
    /// are left untouched.
    ///
    /// # Errors
    /// `Error::GroupCountMismatch` when the group counts differ,
    /// `Error::InvalidArgument` when a label is not UTF-8.
    pub fn set_contours_from_flat(
        &mut self,
        labels: &FlatArray<u8>,
        points: &FlatArray<Point2f>,
    ) -> Result<()> {
        let contours = codec::zip_groups(labels, points)?
            .map(|(label, group)| {
                let label = std::str::from_utf8(label)
                    .map_err(|_| Error::InvalidArgument("contour label is not UTF-8"))?;
                let vertices = group.iter().map(Vertex::from).collect();
                Ok(Contour::new(label, vertices))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("[session] rebuilt {} contours", contours.len());
        self.contours = contours;
        Ok(())
    }

    /// Vertices of every contour, one group per contour, narrowed to the
    /// wire precision.
    #[must_use]
    pub fn contour_points(&self) -> FlatArray<Point2f> {
        let groups: Vec<&[Vertex]> = self
            .contours
            .iter()
            .map(|contour| contour.vertices.as_slice())
            .collect();
        codec::flatten_with(&groups, |v: &Vertex| Point2f::from(v))
    }

    /// Label bytes and vertices of every contour, flattened independently.
    #[must_use]
    pub fn contour_labels_and_points(&self) -> (FlatArray<u8>, FlatArray<Point2f>) {
        let labels: Vec<&[u8]> = self
            .contours
            .iter()
            .map(|contour| contour.label.as_bytes())
            .collect();
        let vertices: Vec<&[Vertex]> = self
            .contours
            .iter()
            .map(|contour| contour.vertices.as_slice())
            .collect();

        let to_point = |v: &Vertex| Point2f::from(v);
        codec::flatten_pair(&labels, u8::clone, &vertices, to_point)
    }

    /// Keep boundary outputs alive, dropping whatever was retained before.
    pub fn retain(&mut self, outputs: RetainedOutputs) -> &RetainedOutputs {
        self.retained = outputs;
        &self.retained
    }

    #[must_use]
    pub fn retained(&self) -> &RetainedOutputs {
        &self.retained
    }
}
