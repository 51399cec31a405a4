// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

#![no_main]

use ct_lite_rustls::collect_scts;
use libfuzzer_sys::fuzz_target;

// The first byte picks where the input is split between the leaf
// certificate and the stapled OCSP response.
fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let (cert, ocsp) = rest.split_at(usize::from(split).min(rest.len()));
    let _ = collect_scts(cert, ocsp, Some(rest));
});
