//! Element lookup helpers over the TransXChange namespace.

use std::borrow::Cow;

use minidom::Element;

use super::error::ExtractError;

/// Namespace every TransXChange element lives in.
pub const TXC_NS: &str = "http://www.transxchange.org.uk/";

pub trait TxcElement {
    /// Direct children named `name`, in document order.
    fn txc_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a;

    /// First direct child named `name`.
    fn txc_child(&self, name: &'static str) -> Result<&Element, ExtractError>;

    /// This element and every element below it named `name`, in document order.
    fn txc_descendants<'a>(&'a self, name: &str) -> Vec<&'a Element>;

    /// Trimmed text of the first direct child named `name`.
    fn txc_child_text(&self, name: &'static str) -> Result<String, ExtractError>;
}

impl TxcElement for Element {
    fn txc_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |child| child.is(name, TXC_NS))
    }

    fn txc_child(&self, name: &'static str) -> Result<&Element, ExtractError> {
        self.txc_children(name)
            .next()
            .ok_or_else(|| ExtractError::MissingElement {
                parent: self.name().to_string(),
                child: name,
            })
    }

    fn txc_descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }

    fn txc_child_text(&self, name: &'static str) -> Result<String, ExtractError> {
        Ok(self.txc_child(name)?.text().trim().to_string())
    }
}

/// Drop comments and processing instructions other than the XML declaration,
/// neither of which the element tree keeps. CDATA sections pass through
/// untouched. An unterminated construct is left in place for the parser to
/// reject.
pub fn strip_markup_noise(text: &str) -> Cow<'_, str> {
    if !text.contains("<!--") && !has_processing_instruction(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let (keep, skip) = if tail.starts_with("<!--") {
            (false, tail.find("-->").map(|end| end + 3))
        } else if tail.starts_with("<![CDATA[") {
            (true, tail.find("]]>").map(|end| end + 3))
        } else if tail.starts_with("<?") {
            (is_declaration(tail), tail.find("?>").map(|end| end + 2))
        } else {
            (true, Some(1))
        };

        let Some(skip) = skip else {
            out.push_str(tail);
            return Cow::Owned(out);
        };
        if keep {
            out.push_str(&tail[..skip]);
        }
        rest = &tail[skip..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn has_processing_instruction(text: &str) -> bool {
    text.match_indices("<?")
        .any(|(i, _)| !is_declaration(&text[i..]))
}

/// `<?xml` followed by whitespace, as opposed to e.g. `<?xml-stylesheet`.
fn is_declaration(tail: &str) -> bool {
    tail.strip_prefix("<?xml")
        .and_then(|after| after.chars().next())
        .is_some_and(char::is_whitespace)
}

fn collect_descendants<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    if element.is(name, TXC_NS) {
        found.push(element);
    }
    for child in element.children() {
        collect_descendants(child, name, found);
    }
}
