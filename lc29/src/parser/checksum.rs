use crate::constants::{CHECKSUM_MARKER, TERMINATOR};

/// NMEA XOR checksum calculator supporting both streaming and single-shot use
#[derive(Default, Clone, Copy)]
pub(crate) struct NmeaChecksumCalc {
    ck: u8,
}

impl NmeaChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { ck: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.ck ^= byte;
    }

    pub(crate) const fn result(self) -> u8 {
        self.ck
    }
}

/// Computes the checksum of a framed sentence.
///
/// XORs every byte from index 1 up to the first `*`, the first byte of the
/// terminator, or the end of the buffer, whichever comes first. This never
/// fails: a frame without a marker yields the XOR over the scanned prefix.
pub const fn compute_checksum(sentence: &[u8]) -> u8 {
    let mut calc = NmeaChecksumCalc::new();
    let mut i = 1;
    while i < sentence.len() {
        let byte = sentence[i];
        if byte == CHECKSUM_MARKER || byte == TERMINATOR[0] {
            break;
        }
        calc.update_byte(byte);
        i += 1;
    }
    calc.result()
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

/// Decodes the two transmitted checksum digits
pub(crate) const fn decode_checksum(hi: u8, lo: u8) -> Option<u8> {
    match (hex_value(hi), hex_value(lo)) {
        (Some(hi), Some(lo)) => Some((hi << 4) | lo),
        _ => None,
    }
}

pub(crate) const fn encode_checksum(ck: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(ck >> 4) as usize], DIGITS[(ck & 0x0f) as usize]]
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIX_RATE_ACK: &[u8] = b"$PAIR001,051,0*3F\r\n";
    const FIX_RATE_QUERY: &[u8] = b"$PAIR051,1000*13\r\n";

    #[test]
    fn test_checksum_calc_new() {
        let calc = NmeaChecksumCalc::new();
        assert_eq!(calc.result(), 0);
    }

    #[test]
    fn test_checksum_calc_update_byte() {
        let mut calc = NmeaChecksumCalc::new();
        calc.update_byte(0x50);
        calc.update_byte(0x41);
        assert_eq!(calc.result(), 0x11);
        calc.update_byte(0x11);
        assert_eq!(calc.result(), 0);
    }

    #[test]
    fn test_checksum_calc_streaming_matches_single_shot() {
        let interior = &FIX_RATE_ACK[1..14];
        let mut single = NmeaChecksumCalc::new();
        single.update(interior);

        let mut streaming = NmeaChecksumCalc::new();
        for chunk in interior.chunks(3) {
            streaming.update(chunk);
        }
        assert_eq!(single.result(), streaming.result());
        assert_eq!(single.result(), 0x3F);
    }

    #[test]
    fn test_compute_checksum_known_sentences() {
        assert_eq!(compute_checksum(FIX_RATE_ACK), 0x3F);
        assert_eq!(compute_checksum(FIX_RATE_QUERY), 0x13);
        assert_eq!(compute_checksum(b"$PAIR063,0,3*3C\r\n"), 0x3C);
        assert_eq!(compute_checksum(b"$PQTMCFGEINSMSGOK*16\r\n"), 0x16);
        assert_eq!(compute_checksum(b"$PAIR6011,1,0*0D\r\n"), 0x0D);
    }

    #[test]
    fn test_compute_checksum_stops_at_terminator() {
        assert_eq!(
            compute_checksum(b"$PAIR051\r\n"),
            compute_checksum(b"$PAIR051*3E\r\n")
        );
    }

    #[test]
    fn test_compute_checksum_without_delimiter_uses_whole_prefix() {
        assert_eq!(compute_checksum(b"$PAIR051"), 0x3E);
        assert_eq!(compute_checksum(b"$"), 0);
        assert_eq!(compute_checksum(b""), 0);
    }

    #[test]
    fn test_decode_checksum() {
        assert_eq!(decode_checksum(b'3', b'F'), Some(0x3F));
        assert_eq!(decode_checksum(b'0', b'd'), Some(0x0D));
        assert_eq!(decode_checksum(b'G', b'0'), None);
        assert_eq!(decode_checksum(b'*', b'1'), None);
    }

    #[test]
    fn test_encode_checksum_is_uppercase() {
        assert_eq!(&encode_checksum(0x3F), b"3F");
        assert_eq!(&encode_checksum(0x0D), b"0D");
        assert_eq!(&encode_checksum(0xAB), b"AB");
    }
}
