#![no_main]

use libfuzzer_sys::fuzz_target;
use signed_cookie::Expiry;

// Expiry parsing should never panic, and accepted values render without panicking
fuzz_target!(|data: &str| {
    if let Ok(expiry) = data.parse::<Expiry>() {
        let _ = expiry.to_http_date();
        let _ = expiry.is_past();
    }
});
