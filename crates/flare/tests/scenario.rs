//! End-to-end write/render/reconcile cycles through the public surface.

use flare::{Component, ReactiveState, Template};
use serde_json::{json, Value};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A feed: the container declares the dependency, each rendered item
/// carries the content digest computed at write time.
fn feed_template(state: &ReactiveState) -> Template {
    let mut template = Template::new()
        .literal("<h2 ref=\"title\">")
        .value(state.get("title").cloned().unwrap_or(Value::Null))
        .literal("</h2><ul ref=\"items\">");
    if let Some(items) = state.get("items").and_then(Value::as_array) {
        for item in items {
            template = template
                .literal("<li data-hash=\"")
                .value(item["hash"].clone())
                .literal("\">")
                .value(item["name"].clone())
                .literal("</li>");
        }
    }
    template.literal("</ul>")
}

#[tokio::test]
async fn growing_list_preserves_rendered_items_and_appends_new_ones() {
    init_logs();
    let mut component = Component::new(feed_template);

    // First write: one record, digested at write time, its digest stamped
    // onto the rendered item node.
    component.set("items", json!([{ "name": "a" }])).await.unwrap();

    let list = component.map().get("items")[0];
    let tagged = component.tree().tagged_subtree(list);
    assert_eq!(tagged.len(), 1);
    let (first_node, first_digest) = tagged[0].clone();
    assert_eq!(first_digest.len(), 64);
    assert_eq!(
        component.tree().attribute(first_node, "data-hash"),
        Some(first_digest.as_str())
    );

    // Second write: the same record plus a new one. The already-rendered
    // item keeps its node; the new item is appended after it.
    component
        .set("items", json!([{ "name": "a" }, { "name": "b" }]))
        .await
        .unwrap();

    let items = component.get("items").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 2);
    let digest_a = items[0]["hash"].as_str().unwrap();
    let digest_b = items[1]["hash"].as_str().unwrap();
    assert_ne!(digest_a, digest_b);

    let tagged = component.tree().tagged_subtree(list);
    assert_eq!(tagged.len(), 2);
    assert_eq!(tagged[0].0, first_node);
    assert_eq!(tagged[0].1, digest_a);
    assert_eq!(tagged[1].1, digest_b);

    // Re-writing identical content is stable: digests match, nothing new
    // appears, and the first node still survives.
    component
        .set("items", json!([{ "name": "a" }, { "name": "b" }]))
        .await
        .unwrap();
    let tagged = component.tree().tagged_subtree(list);
    assert_eq!(tagged.len(), 2);
    assert_eq!(tagged[0].0, first_node);
}

#[tokio::test]
async fn unrelated_writes_leave_the_list_untouched() {
    init_logs();
    let mut component = Component::new(feed_template);
    component.set("items", json!([{ "name": "a" }])).await.unwrap();

    let list = component.map().get("items")[0];
    let item = component.tree().first_tagged(list).unwrap();

    // A write to another property reconciles only that property's elements.
    component.set("title", json!("Feed")).await.unwrap();

    assert_eq!(component.map().get("items")[0], list);
    assert_eq!(component.tree().first_tagged(list), Some(item));
    assert!(component.markup().contains("<h2 ref=\"title\">Feed</h2>"));
}

#[tokio::test]
async fn scalar_dependencies_replace_wholesale_across_writes() {
    init_logs();
    let mut component = Component::new(feed_template);
    component.set("title", json!("first")).await.unwrap();
    let heading = component.map().get("title")[0];

    component.set("title", json!("second")).await.unwrap();

    assert_ne!(component.map().get("title")[0], heading);
    assert!(!component.tree().is_attached(heading));
    assert!(component.markup().contains("<h2 ref=\"title\">second</h2>"));
}
