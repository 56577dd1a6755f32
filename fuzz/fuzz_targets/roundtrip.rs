#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(user) = chefwire::decode(data) {
        let bytes = chefwire::encode(&user);
        assert_eq!(bytes.len(), chefwire::encoded_len(&user));
        let again = chefwire::decode(&bytes).expect("canonical bytes must decode");
        assert_eq!(again, user);
        assert_eq!(chefwire::encode(&again), bytes);
    }
});
