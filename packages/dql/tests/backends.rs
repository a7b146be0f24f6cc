//! The same query chain over every backend.

use std::collections::BTreeMap;

use dql::reflect::{reflect_record, ReflectNodeSetExt};
use dql::xml::XmlNodeSetExt;
use dql::{Error, NodeSet, Value};

struct Shop {
    owner: String,
    shelf: Shelf,
}

struct Shelf {
    label: String,
    items: BTreeMap<String, BTreeMap<String, i64>>,
}

reflect_record!(Shop { "Owner" => owner, "Shelf" => shelf });
reflect_record!(Shelf { "Label" => label, "Items" => items });

fn shop() -> Shop {
    let mut apple = BTreeMap::new();
    apple.insert("price".to_string(), 3);
    let mut pear = BTreeMap::new();
    pear.insert("price".to_string(), 5);
    let mut items = BTreeMap::new();
    items.insert("apple".to_string(), apple);
    items.insert("pear".to_string(), pear);
    Shop {
        owner: "ana".to_string(),
        shelf: Shelf {
            label: "fruit".to_string(),
            items,
        },
    }
}

const SHOP_JSON: &str = r#"{
    "owner": "ana",
    "shelf": {
        "label": "fruit",
        "items": { "apple": { "price": 3 }, "pear": { "price": 5 } }
    }
}"#;

const SHOP_XML: &str = r#"<shop owner="ana">
    <shelf label="fruit">
        <items><apple price="3"/><pear price="5"/></items>
    </shelf>
</shop>"#;

fn names<'a, N: dql::Node<'a>>(set: &NodeSet<'a, N>) -> Vec<String> {
    set.iter().map(|(k, _)| k.into_owned()).collect()
}

#[test]
fn test_chain_agrees_across_backends() {
    let value = shop();
    let reflected = dql::reflect::nodes(&value).elem("shelf").elem("items").child();
    assert_eq!(names(&reflected), vec!["apple", "pear"]);
    assert_eq!(reflected.attr_value("price").unwrap(), Value::Integer(3));

    let doc = dql::maps::Document::json(SHOP_JSON);
    let mapped = doc.nodes().elem("shelf").elem("items").child();
    assert_eq!(names(&mapped), vec!["apple", "pear"]);
    assert_eq!(mapped.attr("price").unwrap().as_i64(), Some(3));

    let doc = dql::xml::Document::parse(SHOP_XML);
    let marked = doc.nodes().elem("shelf").elem("items").child();
    assert_eq!(names(&marked), vec!["apple", "pear"]);
    assert_eq!(marked.attr("price").unwrap(), "3");

    // the page's top element sits under the unnamed document
    let page = dql::html::Document::parse(SHOP_XML);
    let scraped = page.nodes().elem("shop").elem("shelf").elem("items").child();
    assert_eq!(names(&scraped), vec!["apple", "pear"]);
    assert_eq!(scraped.attrs("price").iter().map(Result::unwrap).collect::<Vec<_>>(), vec!["3", "5"]);
}

#[test]
fn test_missing_elements_are_not_found_everywhere() {
    let value = shop();
    let cellar = dql::reflect::nodes(&value).elem("cellar").single();
    assert!(cellar.err().is_some_and(Error::is_not_found));

    let doc = dql::maps::Document::json(SHOP_JSON);
    let cellar = doc.nodes().elem("cellar").single();
    assert!(cellar.err().is_some_and(Error::is_not_found));

    let doc = dql::xml::Document::parse(SHOP_XML);
    assert!(doc.nodes().elem("cellar").text().unwrap_err().is_not_found());

    let page = dql::html::Document::parse(SHOP_XML);
    assert!(page.nodes().any("cellar").text().unwrap_err().is_not_found());
}

#[test]
fn test_load_errors_ride_to_the_end() {
    let doc = dql::maps::Document::json("{ not json");
    let err: &Error = doc.err().unwrap();
    let got = doc.nodes().any("items").child().attr("price").unwrap_err();
    assert!(got.same(err));

    let doc = dql::xml::Document::parse("<shop>");
    let err = doc.err().unwrap();
    let apple = doc.nodes().any("apple").single();
    assert!(apple.err().is_some_and(|e| e.same(err)));
}

#[test]
fn test_class_of_reflected_nodes() {
    let value = shop();
    let class = dql::reflect::nodes(&value).elem("shelf").class().unwrap();
    assert!(class.ends_with("Shelf"));
}
