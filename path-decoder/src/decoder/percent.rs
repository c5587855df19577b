/// Un-escape `%2E` ('.') and `%2F` ('/') in place. Returns the new length.
///
/// Those are the only two escapes that can smuggle path structure past a
/// normalizer, so nothing else is decoded: `%20`, `%25`, `%5C`, a lone `%` and
/// truncated sequences are all copied through verbatim.
pub fn decode_in_place(buf: &mut [u8]) -> usize {
    let len = buf.len();
    // read slot
    let mut src = 0;
    // write slot, never ahead of src
    let mut dst = 0;

    while src < len {
        if src + 3 <= len && buf[src] == b'%' && buf[src + 1] == b'2' {
            let decoded = match buf[src + 2] {
                b'e' | b'E' => Some(b'.'),
                b'f' | b'F' => Some(b'/'),
                _ => None,
            };
            if let Some(b) = decoded {
                buf[dst] = b;
                dst += 1;
                src += 3;
                continue;
            }
        }

        buf[dst] = buf[src];
        dst += 1;
        src += 1;
    }

    dst
}
