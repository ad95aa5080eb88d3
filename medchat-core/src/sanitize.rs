//! Neutralizes server-sourced text before it reaches the terminal.
//!
//! Replies, agent labels, source titles and debug traces are untrusted. Any
//! escape sequence in them could recolor, move the cursor, retitle the window
//! or forge hyperlinks, so everything rendered goes through [`sanitize`].

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use url::Url;

const ESC: char = '\u{1b}';
const BEL: char = '\u{07}';
const C1_CSI: char = '\u{9b}';
const C1_OSC: char = '\u{9d}';

fn is_kept(c: char) -> bool {
    c == '\n' || c == '\t' || !c.is_control()
}

/// Remove escape sequences and control characters, keeping newlines and tabs.
pub fn sanitize(input: &str) -> Cow<'_, str> {
    if input.chars().all(is_kept) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESC => match chars.next() {
                Some('[') => skip_csi(&mut chars),
                Some(']') | Some('P') | Some('X') | Some('^') | Some('_') => {
                    skip_string(&mut chars)
                }
                // Two-character escape, already consumed
                _ => {}
            },
            C1_CSI => skip_csi(&mut chars),
            C1_OSC => skip_string(&mut chars),
            c if is_kept(c) => out.push(c),
            _ => {}
        }
    }

    Cow::Owned(out)
}

/// CSI runs until a final byte in `@`..=`~`.
fn skip_csi(chars: &mut Peekable<Chars<'_>>) {
    for c in chars.by_ref() {
        if ('@'..='~').contains(&c) {
            break;
        }
    }
}

/// OSC/DCS/SOS/PM/APC run until BEL or ST (`ESC \`).
fn skip_string(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.next() {
        if c == BEL {
            break;
        }
        if c == ESC {
            if chars.peek() == Some(&'\\') {
                chars.next();
            }
            break;
        }
    }
}

/// Parse an absolute http(s) URL with a host.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (matches!(url.scheme(), "http" | "https") && has_host).then_some(url)
}

/// A URL is only rendered as a link when it parses as http(s) with a host
/// and survives sanitizing unchanged.
pub fn safe_link(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    parse_web_url(url).map(|_| url)
}
