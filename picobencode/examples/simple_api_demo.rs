// Example walking a torrent-style metainfo dictionary with the pull API

use picobencode::{Event, ParseError, PullParser, SliceDecoder};

fn main() -> Result<(), ParseError> {
    let input: &[u8] =
        b"d8:announce15:http://tracker/4:infod6:lengthi1024e4:name8:file.bin6:pieces4:\x01\x02\x03\x04ee";
    let mut decoder = SliceDecoder::new(input);
    println!("Using SliceDecoder::new() - simple API:");
    println!("Input: {}", input.escape_ascii());

    while let Some(event) = decoder.next() {
        let indent = "  ".repeat(decoder.depth());
        match event? {
            Event::StartDict => println!("{}StartDict", indent),
            Event::EndDict => println!("{}EndDict", indent),
            Event::StartList => println!("{}StartList", indent),
            Event::EndList => println!("{}EndList", indent),
            Event::String(s) => match core::str::from_utf8(s) {
                Ok(text) => println!("{}String: '{}'", indent, text),
                Err(_) => println!("{}Bytes: {} bytes", indent, s.len()),
            },
            Event::Integer(n) => {
                // Display shows the canonical text; as_int() parses it on demand
                println!("{}Integer: {} ({:?})", indent, n, n.as_int());
            }
            Event::EndDocument => break,
        }
    }

    println!();
    println!("Successfully decoded with simple API!");
    Ok(())
}
