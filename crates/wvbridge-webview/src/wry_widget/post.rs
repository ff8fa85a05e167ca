//! POST support: wry has no API for it, so the body is replayed through an
//! auto-submitting form.

/// Build a document that submits `body` (url-encoded `k=v&k=v`) to `url`.
pub(crate) fn post_form_html(url: &str, body: &[u8]) -> String {
    let mut inputs = String::new();
    for pair in body.split(|b| *b == b'&').filter(|p| !p.is_empty()) {
        let (name, value) = match pair.iter().position(|b| *b == b'=') {
            Some(i) => (&pair[..i], &pair[i + 1..]),
            None => (pair, &[][..]),
        };
        inputs.push_str(&format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            escape_attr(&form_decode(name)),
            escape_attr(&form_decode(value)),
        ));
    }
    format!(
        concat!(
            r#"<!DOCTYPE html><html><body>"#,
            r#"<form id="wvbridge-post" method="post" action="{}">{}</form>"#,
            r#"<script>document.getElementById("wvbridge-post").submit();</script>"#,
            r#"</body></html>"#
        ),
        escape_attr(url),
        inputs
    )
}

fn form_decode(raw: &[u8]) -> String {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|b| if *b == b'+' { b' ' } else { *b })
        .collect();
    String::from_utf8_lossy(&urlencoding::decode_binary(&spaced)).into_owned()
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
