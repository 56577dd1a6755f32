#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Beliebige Bytes: decode darf nur Ok/Err liefern, nie paniken
    let _ = chefwire::decode(data);

    let opts = chefwire::DecodeOptions::default()
        .with_max_text_length(16)
        .with_max_repeated_count(4);
    let _ = chefwire::decode_with_options(data, &opts);

    for entry in chefwire::RawFields::new(data) {
        if entry.is_err() {
            break;
        }
    }
});
