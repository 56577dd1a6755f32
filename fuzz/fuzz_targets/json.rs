#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(user) = chefwire::from_json(json) {
            let bytes = chefwire::encode(&user);
            let decoded = chefwire::decode(&bytes).expect("encoded user must decode");
            assert_eq!(decoded, user);
            let back = chefwire::to_json(&decoded, false).expect("to_json");
            assert_eq!(chefwire::from_json(&back).expect("from_json"), user);
        }
    }
});
