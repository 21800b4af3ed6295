//! Minimal SVG element builder.
//!
//! Attribute values and text are XML-escaped on output; `raw` content (the
//! stylesheet) is written as-is and must come from trusted code.

use std::fmt::{self, Write};

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Raw(String),
    Child(Element),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    content: Vec<Content>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Set an attribute only when a value is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Text(text.into()));
        self
    }

    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.content.push(Content::Raw(raw.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.content.push(Content::Child(child));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.content.push(Content::Child(child));
    }

    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, r#" {}="{}""#, name, Escaped(value))?;
        }
        if self.content.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        for content in &self.content {
            match content {
                Content::Text(text) => write!(out, "{}", Escaped(text))?,
                Content::Raw(raw) => out.write_str(raw)?,
                Content::Child(child) => child.render(out)?,
            }
        }
        write!(out, "</{}>", self.tag)
    }
}

/// The root `<svg>` element of a `width` x `height` canvas.
pub fn document(width: u32, height: u32) -> Element {
    Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", width)
        .attr("height", height)
        .attr("viewBox", format!("0 0 {} {}", width, height))
}

/// Format a coordinate with at most two decimals.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.2}", v);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// XML-escape `text`; also safe for HTML text and quoted attributes.
pub fn escape(text: &str) -> String {
    Escaped(text).to_string()
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let mut start = 0;
        for (i, b) in text.bytes().enumerate() {
            let esc = match b {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => continue,
            };
            f.write_str(&text[start..i])?;
            f.write_str(esc)?;
            start = i + 1;
        }
        f.write_str(&text[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(el: &Element) -> String {
        let mut out = String::new();
        el.render(&mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_element_self_closes() {
        let el = Element::new("rect").attr("width", 10).attr("class", "background");
        assert_eq!(render(&el), r#"<rect width="10" class="background"/>"#);
    }

    #[test]
    fn test_text_and_attrs_are_escaped() {
        let el = Element::new("text")
            .attr("data-x", r#"a"b"#)
            .text("<script>&");
        assert_eq!(
            render(&el),
            r#"<text data-x="a&quot;b">&lt;script&gt;&amp;</text>"#
        );
    }

    #[test]
    fn test_nested_and_raw() {
        let el = Element::new("g")
            .child(Element::new("style").raw(".a { fill: red; }"))
            .attr_opt("style", None::<String>);
        assert_eq!(render(&el), "<g><style>.a { fill: red; }</style></g>");
    }

    #[test]
    fn test_num() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(1.234), "1.23");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f64::NAN), "0");
    }
}
