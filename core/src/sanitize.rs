// matchday/src/sanitize.rs

//! Makes untrusted strings safe to interpolate into HTML email bodies.
//!
//! No markup survives: tags are removed, the text of `<script>`/`<style>`
//! elements is removed with them, and whatever remains is HTML-escaped.

/// Elements whose text content is dropped along with the tags.
const NON_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Strips markup, then escapes the remaining text for an HTML body.
pub fn sanitize_html(input: &str) -> String {
  escape_html(&strip_tags(input))
}

/// Plain-text variant for header fields such as the subject line: markup is
/// stripped and line breaks are collapsed, but nothing is entity-escaped.
pub fn sanitize_header(input: &str) -> String {
  strip_tags(input)
    .split(['\r', '\n'])
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn escape_html(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for c in input.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      other => out.push(other),
    }
  }
  out
}

/// A `<` opens a tag only when followed by a letter, `/`, `!` or `?`.
/// Anything else (`a < b`) is text.
fn opens_tag(next: Option<char>) -> bool {
  matches!(next, Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?')
}

fn tag_name(tag_body: &str) -> String {
  tag_body
    .trim_start_matches('/')
    .chars()
    .take_while(|c| c.is_ascii_alphanumeric())
    .collect::<String>()
    .to_ascii_lowercase()
}

/// Removes every tag. An unterminated `<tag` swallows the rest of the input,
/// since a browser would do the same.
pub fn strip_tags(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut rest = input;

  while let Some(lt) = rest.find('<') {
    out.push_str(&rest[..lt]);
    let after_lt = &rest[lt + 1..];

    if !opens_tag(after_lt.chars().next()) {
      out.push('<');
      rest = after_lt;
      continue;
    }

    let Some(gt) = after_lt.find('>') else {
      return out;
    };
    let tag_body = &after_lt[..gt];
    rest = &after_lt[gt + 1..];

    let name = tag_name(tag_body);
    if !tag_body.starts_with('/') && NON_TEXT_ELEMENTS.contains(&name.as_str()) {
      rest = skip_element_text(rest, &name);
    }
  }

  out.push_str(rest);
  out
}

/// Skips past the matching closing tag, or to the end if there is none.
fn skip_element_text<'a>(rest: &'a str, name: &str) -> &'a str {
  let closing = format!("</{}", name);
  let lowered = rest.to_ascii_lowercase();
  match lowered.find(&closing) {
    Some(start) => match rest[start..].find('>') {
      Some(end) => &rest[start + end + 1..],
      None => "",
    },
    None => "",
  }
}
