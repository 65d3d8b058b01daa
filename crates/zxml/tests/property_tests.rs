//! Property-based tests for parsing and queries
//!
//! These tests use proptest to verify:
//! 1. Generated documents parse back into the same shape
//! 2. Queries agree with the generated model
//! 3. Arbitrary input never panics

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use zxml::{parse_bytes, parse_text, Config, Node};

/// Element model the generator works with
#[derive(Clone, Debug)]
struct Elem {
    tag: String,
    attrs: Vec<(String, String, char)>,
    text: Option<String>,
    children: Vec<Elem>,
}

fn ensure_eq<T: PartialEq + std::fmt::Debug>(left: T, right: T) -> Result<(), TestCaseError> {
    if left == right {
        Ok(())
    } else {
        Err(TestCaseError::fail(format!(
            "assertion failed: left={left:?} right={right:?}"
        )))
    }
}

fn render(elem: &Elem, out: &mut String) {
    out.push('<');
    out.push_str(&elem.tag);
    for (key, value, quote) in &elem.attrs {
        out.push_str(&format!(" {key}={quote}{value}{quote}"));
    }
    if elem.children.is_empty() && elem.text.is_none() {
        out.push_str(" />");
        return;
    }
    out.push('>');
    if let Some(text) = &elem.text {
        out.push_str("  ");
        out.push_str(text);
        out.push('\n');
    }
    for child in &elem.children {
        render(child, out);
        out.push(' ');
    }
    out.push_str(&format!("</{}>", elem.tag));
}

fn check(node: Node<'_>, elem: &Elem) -> Result<(), TestCaseError> {
    ensure_eq(node.tag(), elem.tag.as_str())?;
    ensure_eq(node.text(), elem.text.as_deref())?;
    let attrs: Vec<_> = node
        .attributes()
        .iter()
        .map(|a| (a.key().to_string(), a.value().to_string()))
        .collect();
    let expected: Vec<_> = elem
        .attrs
        .iter()
        .map(|(k, v, _)| (k.clone(), v.clone()))
        .collect();
    ensure_eq(attrs, expected)?;
    ensure_eq(node.child_count(), elem.children.len())?;
    for (i, child) in elem.children.iter().enumerate() {
        let Some(parsed) = node.child_at(i) else {
            return Err(TestCaseError::fail(format!("missing child {i}")));
        };
        ensure_eq(parsed.parent(), Some(node))?;
        check(parsed, child)?;
    }
    ensure_eq(node.child_at(elem.children.len()), None)
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]([a-zA-Z0-9 .,]{0,12}[a-zA-Z0-9])?"
}

fn arb_attr() -> impl Strategy<Value = (String, String, char)> {
    (arb_name(), prop_oneof![Just('"'), Just('\'')]).prop_flat_map(|(key, quote)| {
        let value = if quote == '"' {
            "[a-zA-Z0-9 ']{0,8}"
        } else {
            "[a-zA-Z0-9 \"]{0,8}"
        };
        (Just(key), value, Just(quote))
    })
}

fn arb_elem() -> impl Strategy<Value = Elem> {
    let leaf = (
        arb_name(),
        prop::collection::vec(arb_attr(), 0..3),
        prop::option::of(arb_text()),
    )
        .prop_map(|(tag, attrs, text)| Elem {
            tag,
            attrs,
            text,
            children: Vec::new(),
        });

    leaf.prop_recursive(6, 64, 4, |inner| {
        (
            arb_name(),
            prop::collection::vec(arb_attr(), 0..3),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(tag, attrs, children)| Elem {
                tag,
                attrs,
                text: None,
                children,
            })
    })
}

proptest! {
    /// Rendering a model and parsing it back gives the same tree
    #[test]
    fn generated_documents_round_trip(elems in prop::collection::vec(arb_elem(), 0..4)) {
        let mut xml = String::from("<?xml version=\"1.0\"?>\n");
        for elem in &elems {
            render(elem, &mut xml);
            xml.push_str("<!-- sep -->\n");
        }
        let doc = parse_text(&xml)
            .map_err(|err| TestCaseError::fail(format!("parse failed: {err}\n{xml}")))?;
        let root = doc.root();
        ensure_eq(root.child_count(), elems.len())?;
        for (i, elem) in elems.iter().enumerate() {
            let Some(node) = root.child_at(i) else {
                return Err(TestCaseError::fail(format!("missing top-level {i}")));
            };
            check(node, elem)?;
        }
    }

    /// find_tag agrees with a pre-order walk of the model
    #[test]
    fn find_tag_matches_model_pre_order(elem in arb_elem(), wanted in arb_name()) {
        fn first_pre_order<'e>(elem: &'e Elem, name: &str) -> Option<&'e Elem> {
            if elem.tag == name {
                return Some(elem);
            }
            elem.children.iter().find_map(|child| first_pre_order(child, name))
        }

        let mut xml = String::new();
        render(&elem, &mut xml);
        let doc = parse_text(&xml)
            .map_err(|err| TestCaseError::fail(format!("parse failed: {err}")))?;
        let found = doc.find_tag(&wanted, true);
        match first_pre_order(&elem, &wanted) {
            Some(expected) => match found {
                Some(node) => check(node, expected)?,
                None => return Err(TestCaseError::fail("model match not found")),
            },
            None => ensure_eq(found, None)?,
        }
    }

    /// The path of the first child at each level always resolves
    #[test]
    fn first_child_paths_resolve(elem in arb_elem()) {
        let mut xml = String::new();
        render(&elem, &mut xml);
        let doc = parse_text(&xml)
            .map_err(|err| TestCaseError::fail(format!("parse failed: {err}")))?;

        let mut segments = vec![elem.tag.clone()];
        let mut expected = &elem;
        while let Some(first) = expected.children.first() {
            segments.push(first.tag.clone());
            expected = first;
        }
        let Some(found) = doc.find_by_path(&segments.join("/"), true) else {
            return Err(TestCaseError::fail("path did not resolve"));
        };
        check(found, expected)?;
    }

    /// Any input either parses or fails cleanly
    #[test]
    fn arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _result = parse_bytes(&bytes);
    }

    /// Markup-shaped noise either parses or fails cleanly, in every mode
    #[test]
    fn markup_noise_never_panics(s in r#"[<>/=?!\-"' a-c\n]{0,64}"#) {
        let _ = parse_text(&s);
        let strict = Config::default()
            .with_end_tags(zxml::EndTagMode::Strict)
            .with_allow_unclosed(true);
        let _ = zxml::parse_text_with_config(&s, strict);
    }
}
