#![no_main]
use libfuzzer_sys::fuzz_target;
use n3_api::parser::TriplesParser;
use n3_parser::{N3Error, N3Parser};

fuzz_target!(|data: &[u8]| {
    if let Ok(mut parser) = N3Parser::with_base(data, "http://example.com/") {
        let _ = parser.parse_all(&mut |_| Ok(()) as Result<(), N3Error>);
    }
});
