#[macro_use]
extern crate afl;
extern crate lc29;

const FIX_RATE_ACK: &[u8] = b"$PAIR001,051,0*3F\r\n";

fn parse(max_len: usize, chunksize: usize, data: &[u8]) {
    let mut framer = lc29::SentenceFramer::new(max_len);
    for chunk in data.chunks(chunksize) {
        for frame in framer.consume(chunk) {
            let Ok(frame) = frame else {
                // Oversized frames are expected on random input
                continue;
            };
            assert!(frame.len() <= max_len);
            // Whatever validates must also split without panicking
            if let Ok(sentence) = lc29::validate("$", &frame, true) {
                let fields = lc29::split_fields(sentence.as_str(), 32);
                assert!(fields.len() <= 32);
                let _ = lc29::try_split_fields(sentence.as_str(), 32);
            }
        }
    }

    // Leftover bytes must never swallow the next complete sentence
    let last = framer.consume(FIX_RATE_ACK).filter_map(Result::ok).last();
    assert_eq!(last.as_deref(), Some(FIX_RATE_ACK));
    assert!(framer.is_buffer_empty());

    let ack = lc29::validate(lc29::PAIR_ACK_IDENTIFIER, FIX_RATE_ACK, true).unwrap();
    assert_eq!(lc29::split_fields(ack.as_str(), 2), [51, 0]);
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let max_len = 32 + data[0] as usize;
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                parse(max_len, chunksize, &data[2..]);
            }
        }
    });
}
