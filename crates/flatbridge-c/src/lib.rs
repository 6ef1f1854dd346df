// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # flatbridge C FFI Bindings
//!
//! This crate exposes a flatbridge [`Session`] to managed runtimes through a
//! C-compatible surface: an opaque handle, integer error codes and raw
//! pointer/count pairs.
//!
//! # Usage from C
//!
//! ```c
//! FbHandle* h = fb_handle_create();
//! fb_set_value(h, 42);
//!
//! FbPoint2f* points = NULL;
//! int32_t* sizes = NULL;
//! int32_t points_count = 0, sizes_count = 0;
//! if (fb_get_contour_points(h, &points, &points_count, &sizes, &sizes_count) == FB_OK) {
//!     // group i holds sizes[i] consecutive points
//!     fb_point_buffer_free(points, points_count);
//!     fb_i32_buffer_free(sizes, sizes_count);
//! }
//! fb_handle_destroy(h);
//! ```
//!
//! # Output ownership
//!
//! In the default owned mode every returned buffer is a fresh allocation the
//! caller releases with the matching `fb_*_buffer_free`. In borrowed mode
//! (`FLATBRIDGE_OUTPUT_MODE=borrowed`) buffers point into storage owned by
//! the handle, stay valid until the next call on that handle, and must not
//! be freed.
//!
//! # Safety
//!
//! All public functions are `unsafe` and require the caller to uphold the
//! invariants documented in each function's safety comment. A NULL handle
//! never faults: it yields `FbInvalidHandle`, zeroed outputs, or a sentinel.

mod jagged;
mod logging;

pub use jagged::*;
pub use logging::*;

use std::ffi::CStr;
use std::mem::{align_of, size_of};
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

use flatbridge::{Config, Error, OutputMode, Point2f, Record, Session};

/// Opaque handle to a Session
#[repr(C)]
pub struct FbHandle {
    _private: [u8; 0],
}

/// Value-object exchanged with the native session
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FbRecord {
    pub id: i32,
    pub kind: i32,
    pub value: f32,
    /// Assigned by the session; ignored on input
    pub revision: u32,
}

/// Single precision 2D point
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FbPoint2f {
    pub x: f32,
    pub y: f32,
}

// Borrowed outputs hand out session storage directly.
const _: () = {
    assert!(size_of::<FbRecord>() == size_of::<Record>());
    assert!(align_of::<FbRecord>() == align_of::<Record>());
    assert!(size_of::<FbPoint2f>() == size_of::<Point2f>());
    assert!(align_of::<FbPoint2f>() == align_of::<Point2f>());
};

impl From<&FbRecord> for Record {
    fn from(r: &FbRecord) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            value: r.value,
            revision: r.revision,
        }
    }
}

impl From<&Record> for FbRecord {
    fn from(r: &Record) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            value: r.value,
            revision: r.revision,
        }
    }
}

impl From<&FbPoint2f> for Point2f {
    fn from(p: &FbPoint2f) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<&Point2f> for FbPoint2f {
    fn from(p: &Point2f) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Error codes (C-compatible enum)
///
/// # Error Code Categories
///
/// - **0-9**: Success and generic errors
/// - **10-19**: Configuration errors
/// - **30-39**: Codec errors
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbError {
    /// Operation completed successfully
    FbOk = 0,
    /// Invalid argument provided (null pointer, negative count, bad UTF-8)
    FbInvalidArgument = 1,
    /// Handle is NULL ("Reference not set")
    FbInvalidHandle = 2,
    /// Generic operation failure
    FbOperationFailed = 3,

    // === Configuration errors (10-19) ===
    /// Configuration could not be parsed
    FbConfigError = 10,
    /// Configuration file not found
    FbConfigFileNotFound = 11,

    // === Codec errors (30-39) ===
    /// Group sizes do not add up to the element count
    FbSizeMismatch = 30,
    /// Paired jagged structures disagree on the number of groups
    FbGroupCountMismatch = 31,
    /// A count does not fit a 32-bit integer
    FbLengthOverflow = 32,
}

impl From<&Error> for FbError {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidArgument(_) => FbError::FbInvalidArgument,
            Error::SizeMismatch { .. } => FbError::FbSizeMismatch,
            Error::GroupCountMismatch { .. } => FbError::FbGroupCountMismatch,
            Error::LengthOverflow(_) => FbError::FbLengthOverflow,
            Error::Config(_) => FbError::FbConfigError,
            Error::ConfigFileNotFound(_) => FbError::FbConfigFileNotFound,
        }
    }
}

/// Output ownership mode for handle creation
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbOutputMode {
    /// Returned buffers are owned by the caller (release with `fb_*_buffer_free`)
    FbOutputOwned = 0,
    /// Returned buffers are owned by the handle, valid until its next call
    FbOutputBorrowed = 1,
}

impl From<FbOutputMode> for OutputMode {
    fn from(mode: FbOutputMode) -> Self {
        match mode {
            FbOutputMode::FbOutputOwned => OutputMode::Owned,
            FbOutputMode::FbOutputBorrowed => OutputMode::Borrowed,
        }
    }
}

impl From<OutputMode> for FbOutputMode {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Owned => FbOutputMode::FbOutputOwned,
            OutputMode::Borrowed => FbOutputMode::FbOutputBorrowed,
        }
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// A handle is a `Box<Mutex<Session>>`; the mutex serialises calls sharing it.
type SessionCell = Mutex<Session>;

/// Borrow the session cell behind a handle.
///
/// # Safety
/// `handle` must be NULL or a live pointer from `fb_handle_create*`.
pub(crate) unsafe fn session_cell<'a>(handle: *mut FbHandle) -> Option<&'a SessionCell> {
    if handle.is_null() {
        return None;
    }
    Some(&*handle.cast::<SessionCell>())
}

pub(crate) fn lock(cell: &SessionCell) -> MutexGuard<'_, Session> {
    cell.lock().unwrap_or_else(|err| err.into_inner())
}

/// Map a core error onto its code and log it.
pub(crate) fn report(context: &str, err: &Error) -> FbError {
    log::warn!("[flatbridge-c] {}: {}", context, err);
    FbError::from(err)
}

pub(crate) fn wire_len(len: usize) -> Result<i32, FbError> {
    i32::try_from(len).map_err(|_| FbError::FbLengthOverflow)
}

pub(crate) fn native_len(count: i32) -> Result<usize, FbError> {
    usize::try_from(count).map_err(|_| FbError::FbInvalidArgument)
}

/// Zero a pointer/count out-parameter pair (either may be NULL).
///
/// # Safety
/// Non-null pointers must be valid for writes.
pub(crate) unsafe fn clear_out<T>(out_ptr: *mut *mut T, out_count: *mut i32) {
    if !out_ptr.is_null() {
        *out_ptr = ptr::null_mut();
    }
    if !out_count.is_null() {
        *out_count = 0;
    }
}

/// Hand `items` to the caller as a fresh allocation. An empty buffer is
/// reported as NULL/0.
///
/// # Safety
/// `out_ptr` and `out_count` must be valid for writes.
pub(crate) unsafe fn write_owned<T>(
    items: Vec<T>,
    out_ptr: *mut *mut T,
    out_count: *mut i32,
) -> Result<(), FbError> {
    let count = wire_len(items.len())?;
    if count == 0 {
        clear_out(out_ptr, out_count);
        return Ok(());
    }

    let boxed = items.into_boxed_slice();
    *out_ptr = Box::into_raw(boxed).cast::<T>();
    *out_count = count;
    Ok(())
}

/// Point the caller at storage owned by the session.
///
/// # Safety
/// `out_ptr` and `out_count` must be valid for writes. The caller must treat
/// the buffer as read-only and must not free it.
pub(crate) unsafe fn write_borrowed<T>(
    items: &[T],
    out_ptr: *mut *mut T,
    out_count: *mut i32,
) -> Result<(), FbError> {
    let count = wire_len(items.len())?;
    if count == 0 {
        clear_out(out_ptr, out_count);
        return Ok(());
    }

    *out_ptr = items.as_ptr().cast_mut();
    *out_count = count;
    Ok(())
}

/// Read a caller-provided array; NULL is accepted only when `count` is 0.
///
/// # Safety
/// A non-null `data` must point to `count` initialised elements.
pub(crate) unsafe fn read_slice<'a, T>(data: *const T, count: i32) -> Result<&'a [T], FbError> {
    let len = native_len(count)?;
    if len == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(FbError::FbInvalidArgument);
    }
    Ok(std::slice::from_raw_parts(data, len))
}

/// Release a buffer produced by [`write_owned`].
///
/// # Safety
/// `data`/`count` must come from the same owned-mode output, once.
pub(crate) unsafe fn free_buffer<T>(data: *mut T, count: i32) {
    let Ok(len) = usize::try_from(count) else {
        return;
    };
    if !data.is_null() && len > 0 {
        let _ = Box::from_raw(ptr::slice_from_raw_parts_mut(data, len));
    }
}

fn into_handle(config: Config) -> *mut FbHandle {
    logging::init_once(&config);
    log::info!("[flatbridge-c] Creating handle (output_mode={:?})", config.output_mode);
    let cell: SessionCell = Mutex::new(Session::new(config));
    Box::into_raw(Box::new(cell)).cast::<FbHandle>()
}

// =============================================================================
// Handle lifecycle
// =============================================================================

/// Create a new handle, configured from `FLATBRIDGE_*` environment variables
///
/// # Safety
/// The returned handle must be released with `fb_handle_destroy`.
#[no_mangle]
pub unsafe extern "C" fn fb_handle_create() -> *mut FbHandle {
    into_handle(Config::from_env())
}

/// Create a new handle with an explicit output mode
///
/// Other settings still come from the environment.
///
/// # Safety
/// The returned handle must be released with `fb_handle_destroy`.
#[no_mangle]
pub unsafe extern "C" fn fb_handle_create_with_mode(mode: FbOutputMode) -> *mut FbHandle {
    into_handle(Config::from_env().with_output_mode(mode.into()))
}

/// Create a new handle from a YAML configuration file
///
/// # Safety
/// - `path` must be a valid null-terminated C string.
/// - The returned handle must be released with `fb_handle_destroy`.
///
/// # Returns
/// Opaque handle, or NULL if `path` is NULL or the file cannot be loaded
#[no_mangle]
pub unsafe extern "C" fn fb_handle_create_with_config(path: *const c_char) -> *mut FbHandle {
    if path.is_null() {
        return ptr::null_mut();
    }

    let Ok(path_str) = CStr::from_ptr(path).to_str() else {
        return ptr::null_mut();
    };

    match Config::load(Path::new(path_str)) {
        Ok(config) => into_handle(config),
        Err(e) => {
            log::error!("[flatbridge-c] fb_handle_create_with_config: {}", e);
            ptr::null_mut()
        }
    }
}

/// Destroy a handle
///
/// Buffers returned in borrowed mode become invalid; owned buffers stay valid.
///
/// # Safety
/// - `handle` must be a valid handle from `fb_handle_create*`, or NULL (no-op).
/// - Must not be called more than once with the same pointer.
#[no_mangle]
pub unsafe extern "C" fn fb_handle_destroy(handle: *mut FbHandle) {
    if !handle.is_null() {
        let _ = Box::from_raw(handle.cast::<SessionCell>());
    }
}

/// Get the output mode of a handle
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `out_mode` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn fb_handle_output_mode(
    handle: *mut FbHandle,
    out_mode: *mut FbOutputMode,
) -> FbError {
    if out_mode.is_null() {
        return FbError::FbInvalidArgument;
    }
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    *out_mode = lock(cell).output_mode().into();
    FbError::FbOk
}

/// Get flatbridge library version string
///
/// # Safety
/// The returned pointer is valid for the lifetime of the process (static storage).
#[no_mangle]
pub unsafe extern "C" fn fb_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}

/// Get a static, null-terminated description of an error code
///
/// `FbInvalidHandle` maps to `"Reference not set"`.
///
/// # Safety
/// The returned pointer is valid for the lifetime of the process (static storage).
#[no_mangle]
pub unsafe extern "C" fn fb_error_message(err: FbError) -> *const c_char {
    let msg: &'static str = match err {
        FbError::FbOk => "OK\0",
        FbError::FbInvalidArgument => "Invalid argument\0",
        FbError::FbInvalidHandle => "Reference not set\0",
        FbError::FbOperationFailed => "Operation failed\0",
        FbError::FbConfigError => "Configuration error\0",
        FbError::FbConfigFileNotFound => "Config file not found\0",
        FbError::FbSizeMismatch => "Group sizes do not match element count\0",
        FbError::FbGroupCountMismatch => "Group count mismatch\0",
        FbError::FbLengthOverflow => "Length exceeds 32-bit count\0",
    };
    msg.as_ptr().cast::<c_char>()
}

// =============================================================================
// Scalar and value-objects
// =============================================================================

/// Set the scalar value
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
#[no_mangle]
pub unsafe extern "C" fn fb_set_value(handle: *mut FbHandle, value: i32) -> FbError {
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    lock(cell).set_value(value);
    FbError::FbOk
}

/// Get the scalar value
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
///
/// # Returns
/// The stored value, or 0 if `handle` is NULL
#[no_mangle]
pub unsafe extern "C" fn fb_get_value(handle: *mut FbHandle) -> i32 {
    session_cell(handle).map_or(0, |cell| lock(cell).value())
}

/// Replace the stored record
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `record` must point to a valid `FbRecord`.
#[no_mangle]
pub unsafe extern "C" fn fb_set_record(handle: *mut FbHandle, record: *const FbRecord) -> FbError {
    if record.is_null() {
        return FbError::FbInvalidArgument;
    }
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    lock(cell).set_record(Record::from(&*record));
    FbError::FbOk
}

/// Store a record and write the stored copy back (set and get)
///
/// On return `*record` holds the stored record, with its new revision.
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `record` must point to a valid, writable `FbRecord`.
#[no_mangle]
pub unsafe extern "C" fn fb_update_record(handle: *mut FbHandle, record: *mut FbRecord) -> FbError {
    if record.is_null() {
        return FbError::FbInvalidArgument;
    }
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    let mut native = Record::from(&*record);
    lock(cell).update_record(&mut native);
    *record = FbRecord::from(&native);
    FbError::FbOk
}

/// Replace the stored record sequence
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `records` must point to `count` valid `FbRecord`s (may be NULL when `count` is 0).
#[no_mangle]
pub unsafe extern "C" fn fb_set_records(
    handle: *mut FbHandle,
    records: *const FbRecord,
    count: i32,
) -> FbError {
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };
    let records = match read_slice(records, count) {
        Ok(records) => records,
        Err(err) => return err,
    };

    lock(cell).set_records(records.iter().map(Record::from).collect());
    FbError::FbOk
}

/// Get the stored record sequence
///
/// Owned mode: release `*out_records` with `fb_record_buffer_free`.
/// Borrowed mode: `*out_records` aliases the handle's storage.
///
/// # Safety
/// - `handle` must be a valid handle or NULL.
/// - `out_records` and `out_count` must be valid pointers.
#[no_mangle]
pub unsafe extern "C" fn fb_get_records(
    handle: *mut FbHandle,
    out_records: *mut *mut FbRecord,
    out_count: *mut i32,
) -> FbError {
    if out_records.is_null() || out_count.is_null() {
        return FbError::FbInvalidArgument;
    }
    clear_out(out_records, out_count);
    let Some(cell) = session_cell(handle) else {
        return FbError::FbInvalidHandle;
    };

    let session = lock(cell);
    let written = match session.output_mode() {
        OutputMode::Owned => {
            let copy: Vec<FbRecord> = session.records().iter().map(FbRecord::from).collect();
            write_owned(copy, out_records, out_count)
        }
        OutputMode::Borrowed => {
            write_borrowed(session.records(), out_records.cast::<*mut Record>(), out_count)
        }
    };

    match written {
        Ok(()) => FbError::FbOk,
        Err(err) => err,
    }
}

/// Free a record buffer returned by `fb_get_records` in owned mode
///
/// # Safety
/// - `records`/`count` must be the pair returned by one owned-mode call, or NULL.
/// - Must only be called once per buffer.
#[no_mangle]
pub unsafe extern "C" fn fb_record_buffer_free(records: *mut FbRecord, count: i32) {
    free_buffer(records, count);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all)]
    use super::*;
    use std::ffi::CString;
    use std::io::Write;

    fn record(id: i32) -> FbRecord {
        FbRecord {
            id,
            kind: id % 3,
            value: id as f32 * 0.5,
            revision: 0,
        }
    }

    #[test]
    fn test_handle_create_destroy() {
        unsafe {
            let handle = fb_handle_create();
            assert!(!handle.is_null());
            fb_handle_destroy(handle);
            fb_handle_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn test_null_handle_sentinels() {
        unsafe {
            assert_eq!(fb_set_value(ptr::null_mut(), 3), FbError::FbInvalidHandle);
            assert_eq!(fb_get_value(ptr::null_mut()), 0);

            let rec = record(1);
            assert_eq!(fb_set_record(ptr::null_mut(), &rec), FbError::FbInvalidHandle);
            assert_eq!(
                fb_set_records(ptr::null_mut(), &rec, 1),
                FbError::FbInvalidHandle
            );

            let mut data: *mut FbRecord = 0x10 as *mut FbRecord;
            let mut count = 9;
            assert_eq!(
                fb_get_records(ptr::null_mut(), &mut data, &mut count),
                FbError::FbInvalidHandle
            );
            assert!(data.is_null());
            assert_eq!(count, 0);

            let mut mode = FbOutputMode::FbOutputBorrowed;
            assert_eq!(
                fb_handle_output_mode(ptr::null_mut(), &mut mode),
                FbError::FbInvalidHandle
            );
        }
    }

    #[test]
    fn test_error_message_for_invalid_handle() {
        unsafe {
            let msg = CStr::from_ptr(fb_error_message(FbError::FbInvalidHandle));
            assert_eq!(msg.to_str().unwrap(), "Reference not set");
            let msg = CStr::from_ptr(fb_error_message(FbError::FbOk));
            assert_eq!(msg.to_str().unwrap(), "OK");
        }
    }

    #[test]
    fn test_version() {
        unsafe {
            let version = CStr::from_ptr(fb_version());
            assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
        }
    }

    #[test]
    fn test_value_round_trip() {
        unsafe {
            let handle = fb_handle_create();
            assert_eq!(fb_set_value(handle, -17), FbError::FbOk);
            assert_eq!(fb_get_value(handle), -17);
            fb_handle_destroy(handle);
        }
    }

    #[test]
    fn test_update_record_writes_back() {
        unsafe {
            let handle = fb_handle_create();
            assert_eq!(fb_update_record(handle, ptr::null_mut()), FbError::FbInvalidArgument);

            let mut rec = record(5);
            rec.revision = 77;
            assert_eq!(fb_update_record(handle, &mut rec), FbError::FbOk);
            assert_eq!(rec.id, 5);
            assert_eq!(rec.revision, 1);

            assert_eq!(fb_update_record(handle, &mut rec), FbError::FbOk);
            assert_eq!(rec.revision, 2);
            fb_handle_destroy(handle);
        }
    }

    #[test]
    fn test_records_owned_copy() {
        unsafe {
            let handle = fb_handle_create_with_mode(FbOutputMode::FbOutputOwned);
            let input: Vec<FbRecord> = (0..4).map(record).collect();
            assert_eq!(
                fb_set_records(handle, input.as_ptr(), input.len() as i32),
                FbError::FbOk
            );

            let mut data = ptr::null_mut();
            let mut count = 0;
            assert_eq!(fb_get_records(handle, &mut data, &mut count), FbError::FbOk);
            assert_eq!(count, 4);

            // Owned buffers outlive the handle.
            fb_handle_destroy(handle);
            let out = std::slice::from_raw_parts(data, count as usize);
            assert_eq!(out, input.as_slice());
            fb_record_buffer_free(data, count);
        }
    }

    #[test]
    fn test_records_borrowed_alias_session() {
        unsafe {
            let handle = fb_handle_create_with_mode(FbOutputMode::FbOutputBorrowed);
            let mut mode = FbOutputMode::FbOutputOwned;
            assert_eq!(fb_handle_output_mode(handle, &mut mode), FbError::FbOk);
            assert_eq!(mode, FbOutputMode::FbOutputBorrowed);

            let input = [record(1), record(2)];
            assert_eq!(fb_set_records(handle, input.as_ptr(), 2), FbError::FbOk);

            let mut first = ptr::null_mut();
            let mut second = ptr::null_mut();
            let mut count = 0;
            assert_eq!(fb_get_records(handle, &mut first, &mut count), FbError::FbOk);
            assert_eq!(fb_get_records(handle, &mut second, &mut count), FbError::FbOk);
            assert_eq!(first, second);
            assert_eq!(std::slice::from_raw_parts(first, 2), &input[..]);
            fb_handle_destroy(handle);
        }
    }

    #[test]
    fn test_set_records_rejects_bad_input() {
        unsafe {
            let handle = fb_handle_create();
            assert_eq!(fb_set_records(handle, ptr::null(), 3), FbError::FbInvalidArgument);
            let rec = record(1);
            assert_eq!(fb_set_records(handle, &rec, -1), FbError::FbInvalidArgument);
            assert_eq!(fb_set_records(handle, ptr::null(), 0), FbError::FbOk);

            let mut data = ptr::null_mut();
            let mut count = -1;
            assert_eq!(fb_get_records(handle, &mut data, &mut count), FbError::FbOk);
            assert!(data.is_null());
            assert_eq!(count, 0);
            fb_handle_destroy(handle);
        }
    }

    #[test]
    fn test_create_with_config_file() {
        unsafe {
            assert!(fb_handle_create_with_config(ptr::null()).is_null());

            let missing = CString::new("/nonexistent/flatbridge.yaml").unwrap();
            assert!(fb_handle_create_with_config(missing.as_ptr()).is_null());

            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "output_mode: borrowed").unwrap();
            let path = CString::new(file.path().to_str().unwrap()).unwrap();
            let handle = fb_handle_create_with_config(path.as_ptr());
            assert!(!handle.is_null());

            let mut mode = FbOutputMode::FbOutputOwned;
            assert_eq!(fb_handle_output_mode(handle, &mut mode), FbError::FbOk);
            assert_eq!(mode, FbOutputMode::FbOutputBorrowed);
            fb_handle_destroy(handle);
        }
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            FbError::from(&Error::InvalidArgument("x")),
            FbError::FbInvalidArgument
        );
        assert_eq!(
            FbError::from(&Error::GroupCountMismatch { first: 1, second: 2 }),
            FbError::FbGroupCountMismatch
        );
        assert_eq!(
            FbError::from(&Error::SizeMismatch {
                expected: 1,
                actual: 0
            }),
            FbError::FbSizeMismatch
        );
        assert_eq!(FbError::from(&Error::LengthOverflow(0)), FbError::FbLengthOverflow);
    }
}
