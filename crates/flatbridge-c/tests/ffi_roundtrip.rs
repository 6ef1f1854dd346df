// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Boundary round trips driven the way a managed caller would: raw
//! pointers in, pointer/count pairs out, groups rebuilt on the caller side.

use std::ffi::CString;
use std::io::Write;
use std::ptr;
use std::slice;
use std::thread;

use flatbridge_c::*;

/// Caller-side reconstruction of one jagged structure.
unsafe fn rebuild<T: Copy>(
    data: *const T,
    count: i32,
    sizes: *const i32,
    sizes_count: i32,
) -> Vec<Vec<T>> {
    let data: &[T] = if count == 0 {
        &[]
    } else {
        slice::from_raw_parts(data, count as usize)
    };
    let sizes: &[i32] = if sizes_count == 0 {
        &[]
    } else {
        slice::from_raw_parts(sizes, sizes_count as usize)
    };

    let mut offset = 0;
    sizes
        .iter()
        .map(|&size| {
            let group = data[offset..offset + size as usize].to_vec();
            offset += size as usize;
            group
        })
        .collect()
}

struct ContourData {
    labels: *mut u8,
    labels_count: i32,
    label_sizes: *mut i32,
    label_sizes_count: i32,
    points: *mut FbPoint2f,
    points_count: i32,
    point_sizes: *mut i32,
    point_sizes_count: i32,
}

impl ContourData {
    /// Labels and points paired per contour, as the caller would rebuild them.
    unsafe fn contours(&self) -> Vec<(String, Vec<FbPoint2f>)> {
        let labels = rebuild(
            self.labels,
            self.labels_count,
            self.label_sizes,
            self.label_sizes_count,
        );
        let points = rebuild(
            self.points,
            self.points_count,
            self.point_sizes,
            self.point_sizes_count,
        );
        assert_eq!(labels.len(), points.len(), "group counts must agree");
        labels
            .into_iter()
            .map(|bytes| String::from_utf8(bytes).unwrap())
            .zip(points)
            .collect()
    }

    unsafe fn free(self) {
        fb_u8_buffer_free(self.labels, self.labels_count);
        fb_i32_buffer_free(self.label_sizes, self.label_sizes_count);
        fb_point_buffer_free(self.points, self.points_count);
        fb_i32_buffer_free(self.point_sizes, self.point_sizes_count);
    }
}

unsafe fn contour_data(handle: *mut FbHandle) -> (FbError, ContourData) {
    let mut out = ContourData {
        labels: ptr::null_mut(),
        labels_count: 0,
        label_sizes: ptr::null_mut(),
        label_sizes_count: 0,
        points: ptr::null_mut(),
        points_count: 0,
        point_sizes: ptr::null_mut(),
        point_sizes_count: 0,
    };
    let err = fb_get_contour_data(
        handle,
        &mut out.labels,
        &mut out.labels_count,
        &mut out.label_sizes,
        &mut out.label_sizes_count,
        &mut out.points,
        &mut out.points_count,
        &mut out.point_sizes,
        &mut out.point_sizes_count,
    );
    (err, out)
}

unsafe fn add_contour(handle: *mut FbHandle, label: &str, points: &[FbPoint2f]) {
    let label = CString::new(label).unwrap();
    let err = fb_add_contour(handle, label.as_ptr(), points.as_ptr(), points.len() as i32);
    assert_eq!(err, FbError::FbOk);
}

fn pt(x: f32, y: f32) -> FbPoint2f {
    FbPoint2f { x, y }
}

#[test]
fn contour_data_rebuilds_on_caller_side() {
    unsafe {
        let handle = fb_handle_create_with_mode(FbOutputMode::FbOutputOwned);
        let square = [pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0)];
        add_contour(handle, "square", &square);
        add_contour(handle, "", &[]);
        add_contour(handle, "dot", &[pt(0.5, 0.5)]);

        let (err, data) = contour_data(handle);
        assert_eq!(err, FbError::FbOk);
        // Owned buffers are independent of the handle.
        fb_handle_destroy(handle);

        let contours = data.contours();
        assert_eq!(
            contours,
            vec![
                ("square".to_string(), square.to_vec()),
                (String::new(), Vec::new()),
                ("dot".to_string(), vec![pt(0.5, 0.5)]),
            ]
        );
        data.free();
    }
}

#[test]
fn contour_data_pushed_back_round_trips() {
    unsafe {
        let source = fb_handle_create_with_mode(FbOutputMode::FbOutputOwned);
        add_contour(source, "left", &[pt(-1.0, 0.0), pt(-2.0, 0.0)]);
        add_contour(source, "right", &[pt(1.0, 0.0)]);
        let (err, data) = contour_data(source);
        assert_eq!(err, FbError::FbOk);

        let target = fb_handle_create_with_mode(FbOutputMode::FbOutputBorrowed);
        let err = fb_set_contours(
            target,
            data.labels,
            data.labels_count,
            data.label_sizes,
            data.label_sizes_count,
            data.points,
            data.points_count,
            data.point_sizes,
            data.point_sizes_count,
        );
        assert_eq!(err, FbError::FbOk);
        assert_eq!(fb_contour_count(target), 2);

        let (err, borrowed) = contour_data(target);
        assert_eq!(err, FbError::FbOk);
        assert_eq!(borrowed.contours(), data.contours());

        // Borrowed buffers belong to the handle and are not freed.
        data.free();
        fb_handle_destroy(source);
        fb_handle_destroy(target);
    }
}

#[test]
fn stateless_flatten_matches_documented_example() {
    unsafe {
        let first = [1.0f32, 2.0];
        let third = [3.0f32];
        let groups = [first.as_ptr(), ptr::null(), third.as_ptr()];
        let lens = [2, 0, 1];

        let mut data = ptr::null_mut();
        let mut count = 0;
        let mut sizes = ptr::null_mut();
        let mut sizes_count = 0;
        let err = fb_flatten_f32(
            groups.as_ptr(),
            lens.as_ptr(),
            3,
            &mut data,
            &mut count,
            &mut sizes,
            &mut sizes_count,
        );
        assert_eq!(err, FbError::FbOk);
        assert_eq!(
            rebuild(data, count, sizes, sizes_count),
            vec![vec![1.0, 2.0], vec![], vec![3.0]]
        );
        fb_f32_buffer_free(data, count);
        fb_i32_buffer_free(sizes, sizes_count);
    }
}

#[test]
fn handles_are_independent_across_threads() {
    let workers: Vec<_> = (0..4)
        .map(|worker: i32| {
            thread::spawn(move || unsafe {
                let handle = fb_handle_create();
                for i in 0..50 {
                    assert_eq!(fb_set_value(handle, worker * 1000 + i), FbError::FbOk);
                    assert_eq!(fb_get_value(handle), worker * 1000 + i);
                }
                fb_handle_destroy(handle);
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}

#[test]
fn shared_handle_serialises_calls() {
    const THREADS: usize = 8;
    const ITERS: usize = 100;

    // Raw pointers are not Send; the address is.
    let shared = unsafe { fb_handle_create_with_mode(FbOutputMode::FbOutputOwned) } as usize;

    let workers: Vec<_> = (0..THREADS)
        .map(|worker| {
            thread::spawn(move || unsafe {
                let handle = shared as *mut FbHandle;
                let outline = [pt(worker as f32, 0.0); 3];
                for i in 0..ITERS {
                    add_contour(handle, &format!("w{worker}-{i}"), &outline[..i % 4]);

                    let mut points = ptr::null_mut();
                    let mut count = 0;
                    let mut sizes = ptr::null_mut();
                    let mut sizes_count = 0;
                    let err = fb_get_contour_points(
                        handle,
                        &mut points,
                        &mut count,
                        &mut sizes,
                        &mut sizes_count,
                    );
                    assert_eq!(err, FbError::FbOk);
                    assert!(sizes_count as usize > i);

                    let group_sizes = slice::from_raw_parts(sizes, sizes_count as usize);
                    assert_eq!(group_sizes.iter().sum::<i32>(), count);

                    fb_point_buffer_free(points, count);
                    fb_i32_buffer_free(sizes, sizes_count);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    unsafe {
        let handle = shared as *mut FbHandle;
        assert_eq!(fb_contour_count(handle), (THREADS * ITERS) as i32);

        let mut points = ptr::null_mut();
        let mut count = 0;
        let mut sizes = ptr::null_mut();
        let mut sizes_count = 0;
        let err = fb_get_contour_points(
            handle,
            &mut points,
            &mut count,
            &mut sizes,
            &mut sizes_count,
        );
        assert_eq!(err, FbError::FbOk);
        let per_thread: usize = (0..ITERS).map(|i| i % 4).sum();
        assert_eq!(count as usize, THREADS * per_thread);

        fb_point_buffer_free(points, count);
        fb_i32_buffer_free(sizes, sizes_count);
        fb_handle_destroy(handle);
    }
}

#[test]
fn config_file_selects_borrowed_mode() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "output_mode: borrowed").unwrap();
    writeln!(file, "log_filter: \"flatbridge=debug\"").unwrap();
    let path = CString::new(file.path().to_str().unwrap()).unwrap();

    unsafe {
        let handle = fb_handle_create_with_config(path.as_ptr());
        assert!(!handle.is_null());

        let records = [FbRecord {
            id: 9,
            kind: 1,
            value: 2.5,
            revision: 0,
        }];
        assert_eq!(fb_set_records(handle, records.as_ptr(), 1), FbError::FbOk);

        let mut out = ptr::null_mut();
        let mut count = 0;
        assert_eq!(fb_get_records(handle, &mut out, &mut count), FbError::FbOk);
        assert_eq!(slice::from_raw_parts(out, count as usize), &records[..]);
        fb_handle_destroy(handle);
    }
}

#[test]
fn malformed_config_file_yields_null_handle() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "output_mode: [not, a, mode]").unwrap();
    let path = CString::new(file.path().to_str().unwrap()).unwrap();

    unsafe {
        assert!(fb_handle_create_with_config(path.as_ptr()).is_null());
    }
}
