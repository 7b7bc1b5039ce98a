#![no_main]

use libfuzzer_sys::fuzz_target;
use signed_cookie::{InMemoryCookieJar, SignedCookieSigner};

// Any non-empty value must validate against its own signature
fuzz_target!(|data: (String, Vec<u8>)| {
    let (value, key) = data;
    let Ok(signer) = SignedCookieSigner::new("example.com", "/", "9999999999", &key, "sha256")
    else {
        return;
    };

    let jar = InMemoryCookieJar::new();
    if signer.set_cookie(&jar, "session", &value).is_ok() {
        assert!(matches!(signer.is_valid(&jar, "session", &value), Ok(true)));
    }
});
