#![no_main]

use libfuzzer_sys::fuzz_target;
use signed_cookie::is_valid_hostname;

// Hostname validation should never panic
fuzz_target!(|data: &str| {
    let _ = is_valid_hostname(data);
});
