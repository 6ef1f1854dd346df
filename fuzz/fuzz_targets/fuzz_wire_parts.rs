// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use flatbridge::FlatArray;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, data)) = data.split_first() else {
        return;
    };
    let (head, elements) = data.split_at(usize::from(split).min(data.len()) / 4 * 4);

    // Untrusted 32-bit sizes, as received from the managed side
    let sizes: Vec<i32> = head
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    if let Ok(flat) = FlatArray::from_wire_parts(elements.to_vec(), &sizes) {
        assert_eq!(flat.len(), elements.len());
        assert_eq!(flat.groups().map(<[u8]>::len).sum::<usize>(), elements.len());
        let _ = flat.into_wire();
    }
});
