#![no_main]
use gf_arrays::{ArrayRequest, Error, GaloisField};
use libfuzzer_sys::fuzz_target;

const FIELDS: [(u32, u32); 6] = [(2, 1), (2, 8), (3, 5), (7, 3), (3191, 1), (2, 100)];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, json)) = data.split_first() else {
        return;
    };
    let (p, m) = FIELDS[selector as usize % FIELDS.len()];
    let field = GaloisField::new(p, m, None).expect("fixed fields are valid");

    let Ok(request) = serde_json::from_slice::<ArrayRequest>(json) else {
        return;
    };
    // keep allocations bounded
    if serde_json::to_string(&request).map_or(true, |s| s.len() > 4096) {
        return;
    }
    if let ArrayRequest::Zeros { shape, .. }
    | ArrayRequest::Ones { shape, .. }
    | ArrayRequest::Random { shape, .. } = &request
    {
        if shape.iter().any(|&d| d > 16) || shape.len() > 3 {
            return;
        }
    }
    if let ArrayRequest::Identity { size, .. } = &request {
        if size.as_u64().map_or(false, |n| n > 64) {
            return;
        }
    }

    match request.build(&field) {
        Ok(array) => {
            assert!(field.is_valid_dtype(array.dtype()), "Array stored in an invalid dtype");
            assert_eq!(array.field(), &field, "Array tagged with the wrong field");
            assert!(
                array.to_biguint_vec().iter().all(|v| v < field.order()),
                "Array holds a value outside the field"
            );
        }
        Err(Error::Config(e)) => panic!("Config error after parsing: {e}"),
        Err(_) => {}
    }
});
