// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # flatbridge - jagged-array marshalling for managed runtimes
//!
//! Native state and codecs behind a C-linkage boundary. A managed runtime
//! (through `flatbridge-c`) creates a handle, pushes scalars and value-objects
//! into it, and pulls jagged structures back out as flat buffers.
//!
//! ## Quick Start
//!
//! ```rust
//! use flatbridge::{codec, Config, Session, Vertex};
//!
//! let mut session = Session::new(Config::default());
//! session.add_contour("triangle", vec![
//!     Vertex::new(0.0, 0.0),
//!     Vertex::new(1.0, 0.0),
//!     Vertex::new(0.0, 1.0),
//! ]);
//! session.add_contour("empty", Vec::new());
//!
//! let points = session.contour_points();
//! assert_eq!(points.group_sizes(), &[3, 0]);
//!
//! // The managed side splits the buffer back into groups.
//! let groups: Vec<_> = points.groups().collect();
//! assert_eq!(groups[0].len(), 3);
//!
//! let flat = codec::flatten(&[vec![1, 2], vec![], vec![3]]);
//! assert_eq!(flat.elements(), &[1, 2, 3]);
//! assert_eq!(flat.group_sizes(), &[2, 0, 1]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------+
//! |  managed runtime (P/Invoke)                                |
//! +------------------------------------------------------------+
//! |  flatbridge-c   handle | error codes | raw pointer/length  |
//! +------------------------------------------------------------+
//! |  flatbridge     Session | codec (FlatArray, WireArray)     |
//! +------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`codec`] - jagged <-> flat conversion (start here)
//! - [`session`] - native domain object behind a handle
//! - [`config`] - output ownership mode and log filter
//! - [`types`] - `#[repr(C)]` value types

pub mod codec;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use codec::{FlatArray, WireArray};
pub use config::{Config, OutputMode};
pub use error::{Error, Result};
pub use session::{RetainedOutputs, Session};
pub use types::{Contour, Point2f, Record, Vertex};
