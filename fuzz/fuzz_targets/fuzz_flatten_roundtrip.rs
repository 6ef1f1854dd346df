// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use flatbridge::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte of each chunk is the group length
    let mut groups: Vec<&[u8]> = Vec::new();
    let mut rest = data;
    while let Some((&len, tail)) = rest.split_first() {
        let len = usize::from(len).min(tail.len());
        let (group, tail) = tail.split_at(len);
        groups.push(group);
        rest = tail;
    }

    let flat = codec::flatten_with(&groups, |b: &u8| u16::from(*b));
    assert_eq!(flat.group_count(), groups.len());
    assert_eq!(flat.group_sizes().iter().sum::<usize>(), flat.len());

    for (rebuilt, original) in flat.groups().zip(&groups) {
        assert!(rebuilt.iter().map(|&v| v as u8).eq(original.iter().copied()));
    }
});
