//! Removes `/.`, `/..` and empty `//` segments, in place.
//!
//! Follows RFC 3986 §5.2.4 ("Remove Dot Segments") but additionally collapses
//! duplicate slashes, which the RFC keeps as empty segments.
//!
//! Both passes walk the buffer one segment at a time. A segment always begins
//! with '/', so the byte under the read cursor is '/' at the top of every
//! iteration.

/// What the segment starting at `src` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// `//`: the segment is empty.
    Empty,
    /// `/..` at the end of the buffer.
    ParentAtEnd,
    /// `/../`
    Parent,
    /// `/.` at the end of the buffer.
    CurrentAtEnd,
    /// `/./`
    Current,
    /// Anything else, copied verbatim.
    Plain,
}

#[inline]
fn classify(buf: &[u8], src: usize) -> Segment {
    debug_assert_eq!(buf[src], b'/', "path segment must start with '/'");

    let peek = |i: usize| buf.get(src + i).copied();

    match (peek(1), peek(2), peek(3)) {
        (Some(b'/'), _, _) => Segment::Empty,
        (Some(b'.'), Some(b'.'), None) => Segment::ParentAtEnd,
        (Some(b'.'), Some(b'.'), Some(b'/')) => Segment::Parent,
        (Some(b'.'), None, _) => Segment::CurrentAtEnd,
        (Some(b'.'), Some(b'/'), _) => Segment::Current,
        _ => Segment::Plain,
    }
}

/// Read-only pre-scan: does `buf` contain anything [`remove_dot_segments`] would
/// rewrite?
pub fn contains_dot_segments(buf: &[u8]) -> bool {
    let mut src = 0;
    while src < buf.len() {
        if classify(buf, src) != Segment::Plain {
            return true;
        }

        // skip to the next segment
        src += 1;
        while src < buf.len() && buf[src] != b'/' {
            src += 1;
        }
    }

    false
}

/// Normalizes the path in `buf` in place and returns its new length.
///
/// `buf` must start with '/'. `..` above the root is absorbed; a path that
/// collapses to nothing becomes `/`.
pub fn remove_dot_segments(buf: &mut [u8]) -> usize {
    if !contains_dot_segments(buf) {
        return buf.len();
    }

    let len = buf.len();
    let mut src = 0;
    let mut dst = 0;

    while src < len {
        match classify(buf, src) {
            Segment::Empty => {
                // don't advance dst
                src += 1;
            }
            Segment::ParentAtEnd => {
                // "/.." -> "/", and the rewritten '/' is copied on the next turn
                src += 2;
                buf[src] = b'/';
                dst = retreat(buf, dst);
            }
            Segment::Parent => {
                // lands on the trailing '/'
                src += 3;
                dst = retreat(buf, dst);
            }
            Segment::CurrentAtEnd => {
                src += 1;
                buf[src] = b'/';
            }
            Segment::Current => {
                src += 2;
            }
            Segment::Plain => loop {
                buf[dst] = buf[src];
                dst += 1;
                src += 1;
                if src == len || buf[src] == b'/' {
                    break;
                }
            },
        }
    }

    if dst == 0 {
        buf[0] = b'/';
        dst = 1;
    }

    dst
}

/// Drop the last written segment: move `dst` back to its '/', clamped at 0.
#[inline]
fn retreat(buf: &[u8], mut dst: usize) -> usize {
    while dst > 0 {
        dst -= 1;
        if buf[dst] == b'/' {
            break;
        }
    }
    dst
}
