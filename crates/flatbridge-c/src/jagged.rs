// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Jagged structures across the boundary.
//!
//! Every jagged value travels as two buffers: the elements of all groups
//! back to back, and one `int32_t` length per group. The caller rebuilds
//! group `i` from the next `sizes[i]` elements.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::slice;

use flatbridge::codec::{self, FlatArray};
use flatbridge::{OutputMode, Point2f, RetainedOutputs, Vertex};

use crate::{
    clear_out, free_buffer, lock, native_len, read_slice, report, session_cell, write_borrowed,
    write_owned, FbError, FbHandle, FbPoint2f,
};

// =============================================================================
// Output helpers
// =============================================================================

unsafe fn write_groups_owned<T>(
    elements: Vec<T>,
    sizes: Vec<i32>,
    out_data: *mut *mut T,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> Result<(), FbError> {
    write_owned(elements, out_data, out_count)?;
    if let Err(err) = write_owned(sizes, out_sizes, out_sizes_count) {
        free_buffer(*out_data, *out_count);
        clear_out(out_data, out_count);
        return Err(err);
    }
    Ok(())
}

/// Free an owned pair handed out by [`write_groups_owned`] and zero the outputs.
unsafe fn release_groups<T>(
    out_data: *mut *mut T,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) {
    free_buffer(*out_data, *out_count);
    free_buffer(*out_sizes, *out_sizes_count);
    clear_out(out_data, out_count);
    clear_out(out_sizes, out_sizes_count);
}

unsafe fn write_groups_borrowed<T>(
    elements: &[T],
    sizes: &[i32],
    out_data: *mut *mut T,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> Result<(), FbError> {
    write_borrowed(elements, out_data, out_count)?;
    write_borrowed(sizes, out_sizes, out_sizes_count)
}

fn all_non_null<T>(outs: &[*mut T]) -> bool {
    outs.iter().all(|p| !p.is_null())
}

fn status(result: Result<(), FbError>) -> FbError {
    match result {
        Ok(()) => FbError::FbOk,
        Err(err) => err,
    }
}

/// Read one flattened structure supplied by the caller.
unsafe fn read_flat<T, U>(
    data: *const T,
    count: i32,
    sizes: *const i32,
    sizes_count: i32,
    convert: impl FnMut(&T) -> U,
) -> Result<FlatArray<U>, FbError> {
    let data = read_slice(data, count)?;
    let sizes = read_slice(sizes, sizes_count)?;
    FlatArray::from_wire_parts(data.iter().map(convert).collect(), sizes)
        .map_err(|e| report("fb_set_contours", &e))
}

// =============================================================================
// Contour source
// =============================================================================

/// Append one contour
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `label` must be a valid null-terminated UTF-8 C string.
/// - `points` must point to `count` valid `FbPoint2f`s (may be NULL when `count` is 0).
#[no_mangle]
pub unsafe extern "C" fn fb_add_contour(
    handle: *mut FbHandle,
    label: *const c_char,
    points: *const FbPoint2f,
    count: i32,
) -> FbError {
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };
    if label.is_null() {
        return FbError::FbInvalidArgument;
    }
    let Ok(label) = CStr::from_ptr(label).to_str() else {
        return FbError::FbInvalidArgument;
    };
    let points = match read_slice(points, count) {
        Ok(points) => points,
        Err(err) => return err,
    };

    let vertices = points
        .iter()
        .map(|p| Vertex::from(&Point2f::from(p)))
        .collect();
    lock(cell).add_contour(label, vertices);
    FbError::FbOk
}

/// Remove every contour
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
#[no_mangle]
pub unsafe extern "C" fn fb_clear_contours(handle: *mut FbHandle) -> FbError {
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    lock(cell).clear_contours();
    FbError::FbOk
}

/// Number of stored contours
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
///
/// # Returns
/// Contour count, 0 if `handle` is NULL, or `INT32_MAX` as a saturation
/// sentinel when the count does not fit (`fb_get_contour_points` then fails
/// with `FbLengthOverflow`)
#[no_mangle]
pub unsafe extern "C" fn fb_contour_count(handle: *mut FbHandle) -> i32 {
    let Some(cell) = session_cell(handle) else {
        return 0;
    };

    let count = lock(cell).contours().len();
    saturating_count(count)
}

fn saturating_count(count: usize) -> i32 {
    i32::try_from(count).unwrap_or_else(|_| {
        log::warn!("[flatbridge-c] contour count {} saturated to INT32_MAX", count);
        i32::MAX
    })
}

/// Replace every contour from flattened labels and points
///
/// Labels are UTF-8 bytes grouped by `label_sizes`; points are grouped by
/// `point_sizes`. Both must describe the same number of groups. On error the
/// stored contours are left unchanged.
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - Each data pointer must point to the matching count of elements
///   (may be NULL when that count is 0).
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn fb_set_contours(
    handle: *mut FbHandle,
    labels: *const u8,
    labels_count: i32,
    label_sizes: *const i32,
    label_sizes_count: i32,
    points: *const FbPoint2f,
    points_count: i32,
    point_sizes: *const i32,
    point_sizes_count: i32,
) -> FbError {
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    let to_point = |p: &FbPoint2f| Point2f::from(p);
    let labels = read_flat(labels, labels_count, label_sizes, label_sizes_count, u8::clone);
    let points = read_flat(points, points_count, point_sizes, point_sizes_count, to_point);
    let (labels, points) = match (labels, points) {
        (Ok(labels), Ok(points)) => (labels, points),
        (Err(err), _) | (_, Err(err)) => return err,
    };

    match lock(cell).set_contours_from_flat(&labels, &points) {
        Ok(()) => FbError::FbOk,
        Err(e) => report("fb_set_contours", &e),
    }
}

// =============================================================================
// Jagged outputs
// =============================================================================

/// Get every contour's points as one jagged structure
///
/// Owned mode: release with `fb_point_buffer_free` and `fb_i32_buffer_free`.
/// Borrowed mode: buffers belong to the handle until its next call.
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - All four out pointers must be valid.
#[no_mangle]
pub unsafe extern "C" fn fb_get_contour_points(
    handle: *mut FbHandle,
    out_points: *mut *mut FbPoint2f,
    out_points_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> FbError {
    if out_points.is_null()
        || out_points_count.is_null()
        || out_sizes.is_null()
        || out_sizes_count.is_null()
    {
        return FbError::FbInvalidArgument;
    }
    clear_out(out_points, out_points_count);
    clear_out(out_sizes, out_sizes_count);
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    let mut session = lock(cell);
    let wire = match session.contour_points().into_wire() {
        Ok(wire) => wire,
        Err(e) => return report("fb_get_contour_points", &e),
    };
    log::debug!(
        "[flatbridge-c] contour points: {} groups, {} points",
        wire.group_sizes().len(),
        wire.elements().len()
    );

    let result = match session.output_mode() {
        OutputMode::Owned => {
            let (points, sizes) = wire.into_parts();
            let points = points.iter().map(FbPoint2f::from).collect();
            write_groups_owned(
                points,
                sizes,
                out_points,
                out_points_count,
                out_sizes,
                out_sizes_count,
            )
        }
        OutputMode::Borrowed => {
            let retained = session.retain(RetainedOutputs {
                labels: None,
                points: Some(wire),
            });
            match &retained.points {
                Some(points) => write_groups_borrowed(
                    points.elements(),
                    points.group_sizes(),
                    out_points.cast::<*mut Point2f>(),
                    out_points_count,
                    out_sizes,
                    out_sizes_count,
                ),
                None => Err(FbError::FbOperationFailed),
            }
        }
    };
    status(result)
}

/// Get every contour's label and points as two jagged structures
///
/// Labels are UTF-8 bytes without terminators. Both size arrays have one
/// entry per contour.
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - All eight out pointers must be valid.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn fb_get_contour_data(
    handle: *mut FbHandle,
    out_labels: *mut *mut u8,
    out_labels_count: *mut i32,
    out_label_sizes: *mut *mut i32,
    out_label_sizes_count: *mut i32,
    out_points: *mut *mut FbPoint2f,
    out_points_count: *mut i32,
    out_point_sizes: *mut *mut i32,
    out_point_sizes_count: *mut i32,
) -> FbError {
    if out_labels.is_null()
        || out_points.is_null()
        || !all_non_null(&[out_label_sizes, out_point_sizes])
        || !all_non_null(&[
            out_labels_count,
            out_label_sizes_count,
            out_points_count,
            out_point_sizes_count,
        ])
    {
        return FbError::FbInvalidArgument;
    }
    clear_out(out_labels, out_labels_count);
    clear_out(out_label_sizes, out_label_sizes_count);
    clear_out(out_points, out_points_count);
    clear_out(out_point_sizes, out_point_sizes_count);
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    let mut session = lock(cell);
    let (labels, points) = session.contour_labels_and_points();
    let wires = labels
        .into_wire()
        .and_then(|labels| points.into_wire().map(|points| (labels, points)));
    let (labels, points) = match wires {
        Ok(wires) => wires,
        Err(e) => return report("fb_get_contour_data", &e),
    };

    let result = match session.output_mode() {
        OutputMode::Owned => {
            let (label_bytes, label_sizes) = labels.into_parts();
            let (points, point_sizes) = points.into_parts();
            let points = points.iter().map(FbPoint2f::from).collect();
            write_groups_owned(
                label_bytes,
                label_sizes,
                out_labels,
                out_labels_count,
                out_label_sizes,
                out_label_sizes_count,
            )
            .and_then(|()| {
                let written = write_groups_owned(
                    points,
                    point_sizes,
                    out_points,
                    out_points_count,
                    out_point_sizes,
                    out_point_sizes_count,
                );
                if written.is_err() {
                    release_groups(
                        out_labels,
                        out_labels_count,
                        out_label_sizes,
                        out_label_sizes_count,
                    );
                }
                written
            })
        }
        OutputMode::Borrowed => {
            let retained = session.retain(RetainedOutputs {
                labels: Some(labels),
                points: Some(points),
            });
            match (&retained.labels, &retained.points) {
                (Some(labels), Some(points)) => write_groups_borrowed(
                    labels.elements(),
                    labels.group_sizes(),
                    out_labels,
                    out_labels_count,
                    out_label_sizes,
                    out_label_sizes_count,
                )
                .and_then(|()| {
                    write_groups_borrowed(
                        points.elements(),
                        points.group_sizes(),
                        out_points.cast::<*mut Point2f>(),
                        out_points_count,
                        out_point_sizes,
                        out_point_sizes_count,
                    )
                }),
                _ => Err(FbError::FbOperationFailed),
            }
        }
    };
    status(result)
}

// =============================================================================
// Stateless flattening
// =============================================================================

/// Read an array of `group_count` group pointers with their lengths.
/// A NULL `groups` is reported as `Ok(None)`.
unsafe fn read_jagged<'a, T>(
    groups: *const *const T,
    group_lens: *const i32,
    group_count: i32,
) -> Result<Option<Vec<&'a [T]>>, FbError> {
    if groups.is_null() {
        return Ok(None);
    }
    let count = native_len(group_count)?;
    if count == 0 {
        return Ok(Some(Vec::new()));
    }
    if group_lens.is_null() {
        return Err(FbError::FbInvalidArgument);
    }

    let pointers = slice::from_raw_parts(groups, count);
    let lens = slice::from_raw_parts(group_lens, count);
    pointers
        .iter()
        .zip(lens)
        .map(|(&data, &len)| read_slice(data, len))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[allow(clippy::too_many_arguments)]
unsafe fn flatten_copy<T: Copy>(
    context: &str,
    groups: *const *const T,
    group_lens: *const i32,
    group_count: i32,
    out_data: *mut *mut T,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> FbError {
    if out_data.is_null() || out_sizes.is_null() || !all_non_null(&[out_count, out_sizes_count]) {
        return FbError::FbInvalidArgument;
    }
    clear_out(out_data, out_count);
    clear_out(out_sizes, out_sizes_count);

    let jagged = match read_jagged(groups, group_lens, group_count) {
        Ok(jagged) => jagged,
        Err(err) => return err,
    };
    let wire =
        codec::try_flatten_with(jagged.as_deref(), |x: &T| *x).and_then(FlatArray::into_wire);
    match wire {
        Ok(wire) => {
            let (elements, sizes) = wire.into_parts();
            status(write_groups_owned(
                elements,
                sizes,
                out_data,
                out_count,
                out_sizes,
                out_sizes_count,
            ))
        }
        Err(e) => report(context, &e),
    }
}

/// Flatten a jagged `int32_t` array without a handle
///
/// `groups[i]` points to `group_lens[i]` values. Output is always owned:
/// release with `fb_i32_buffer_free`.
///
/// # Safety
/// - `groups` must point to `group_count` pointers (each may be NULL when its
///   length is 0), or be NULL (reported as `FbInvalidArgument`).
/// - `group_lens` must point to `group_count` lengths.
/// - All four out pointers must be valid.
#[no_mangle]
pub unsafe extern "C" fn fb_flatten_i32(
    groups: *const *const i32,
    group_lens: *const i32,
    group_count: i32,
    out_data: *mut *mut i32,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> FbError {
    flatten_copy(
        "fb_flatten_i32",
        groups,
        group_lens,
        group_count,
        out_data,
        out_count,
        out_sizes,
        out_sizes_count,
    )
}

/// Flatten a jagged `float` array without a handle
///
/// Same contract as `fb_flatten_i32`; release the data with
/// `fb_f32_buffer_free` and the sizes with `fb_i32_buffer_free`.
///
/// # Safety
/// See `fb_flatten_i32`.
#[no_mangle]
pub unsafe extern "C" fn fb_flatten_f32(
    groups: *const *const f32,
    group_lens: *const i32,
    group_count: i32,
    out_data: *mut *mut f32,
    out_count: *mut i32,
    out_sizes: *mut *mut i32,
    out_sizes_count: *mut i32,
) -> FbError {
    flatten_copy(
        "fb_flatten_f32",
        groups,
        group_lens,
        group_count,
        out_data,
        out_count,
        out_sizes,
        out_sizes_count,
    )
}

// =============================================================================
// Buffer release
// =============================================================================

/// Free an `int32_t` buffer (sizes, or `fb_flatten_i32` data)
///
/// # Safety
/// - `data`/`count` must be a pair returned by one owned-mode call, or NULL.
/// - Must only be called once per buffer.
#[no_mangle]
pub unsafe extern "C" fn fb_i32_buffer_free(data: *mut i32, count: i32) {
    free_buffer(data, count);
}

/// Free a `float` buffer returned by `fb_flatten_f32`
///
/// # Safety
/// See `fb_i32_buffer_free`.
#[no_mangle]
pub unsafe extern "C" fn fb_f32_buffer_free(data: *mut f32, count: i32) {
    free_buffer(data, count);
}

/// Free a label byte buffer returned by `fb_get_contour_data`
///
/// # Safety
/// See `fb_i32_buffer_free`.
#[no_mangle]
pub unsafe extern "C" fn fb_u8_buffer_free(data: *mut u8, count: i32) {
    free_buffer(data, count);
}

/// Free a point buffer returned in owned mode
///
/// # Safety
/// See `fb_i32_buffer_free`.
#[no_mangle]
pub unsafe extern "C" fn fb_point_buffer_free(data: *mut FbPoint2f, count: i32) {
    free_buffer(data, count);
}
