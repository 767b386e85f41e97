use fragment::{DependencyMap, FragmentTree};
use indextree::NodeId;
use reconcile::reconcile;
use template::{compile, Template};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compile a template and mount it under the live root, the way a component
/// does on first render.
fn mount(tree: &mut FragmentTree, markup: &str) -> DependencyMap {
    init_logs();
    let template = Template::new().literal(markup);
    let (container, map) = compile(tree, &template).expect("compile");
    let root = tree.root();
    tree.mount(root, container).expect("mount");
    map
}

/// Compile a template without attaching it, the way a re-render does.
fn recompile(tree: &mut FragmentTree, markup: &str) -> DependencyMap {
    let template = Template::new().literal(markup);
    let (_, map) = compile(tree, &template).expect("compile");
    map
}

#[test]
fn untagged_pairs_are_replaced_wholesale() {
    let mut tree = FragmentTree::new();
    let mut map = mount(&mut tree, "<h1 ref=\"title\">old</h1>");
    let old_element = map.get("title")[0];

    let new_map = recompile(&mut tree, "<h1 ref=\"title\">new</h1>");
    let replaced = reconcile(&mut tree, &mut map, &new_map, "title").expect("reconcile");

    assert!(replaced);
    assert_eq!(tree.to_markup(tree.root()), "<h1 ref=\"title\">new</h1>");
    assert!(!tree.is_attached(old_element));
    // The map entry now points at the live replacement.
    assert_eq!(map.get("title")[0], new_map.get("title")[0]);
}

#[test]
fn tagged_nodes_are_preserved_not_replaced() {
    let mut tree = FragmentTree::new();
    let mut map = mount(
        &mut tree,
        "<ul ref=\"items\"><li data-hash=\"x\">a</li></ul>",
    );
    let list = map.get("items")[0];
    let item = tree.first_tagged(list).expect("tagged item");

    let new_map = recompile(
        &mut tree,
        "<ul ref=\"items\"><li data-hash=\"x\">a</li></ul>",
    );
    let replaced = reconcile(&mut tree, &mut map, &new_map, "items").expect("reconcile");

    assert!(!replaced);
    // Same node handle: the rendered item survived untouched.
    assert_eq!(tree.first_tagged(list), Some(item));
    assert_eq!(map.get("items")[0], list);
    assert_eq!(tree.tagged_subtree(list).len(), 1);
}

#[test]
fn additive_merge_appends_unseen_tags_only() {
    let mut tree = FragmentTree::new();
    let mut map = mount(
        &mut tree,
        "<ul ref=\"items\"><li data-hash=\"x\">a</li></ul>",
    );
    let list = map.get("items")[0];
    let existing = tree.first_tagged(list).expect("tagged item");

    let new_map = recompile(
        &mut tree,
        "<ul ref=\"items\"><li data-hash=\"x\">a</li><li data-hash=\"y\">b</li></ul>",
    );
    let replaced = reconcile(&mut tree, &mut map, &new_map, "items").expect("reconcile");

    assert!(!replaced);
    let tags: Vec<(NodeId, String)> = tree.tagged_subtree(list);
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].0, existing);
    assert_eq!(tags[0].1, "x");
    assert_eq!(tags[1].1, "y");
    assert_eq!(
        tree.to_markup(tree.root()),
        "<ul ref=\"items\"><li data-hash=\"x\">a</li><li data-hash=\"y\">b</li></ul>"
    );
}

#[test]
fn vanished_tags_are_not_pruned() {
    let mut tree = FragmentTree::new();
    let mut map = mount(
        &mut tree,
        "<ul ref=\"items\"><li data-hash=\"x\">a</li><li data-hash=\"y\">b</li></ul>",
    );
    let list = map.get("items")[0];

    let new_map = recompile(&mut tree, "<ul ref=\"items\"><li data-hash=\"x\">a</li></ul>");
    reconcile(&mut tree, &mut map, &new_map, "items").expect("reconcile");

    // The additive merge never removes: both items remain live.
    assert_eq!(tree.tagged_subtree(list).len(), 2);
}

#[test]
fn replacement_repoints_nested_dependency_entries() {
    let mut tree = FragmentTree::new();
    let mut map = mount(
        &mut tree,
        "<div ref=\"card\"><span ref=\"label\">one</span></div>",
    );
    let stale_label = map.get("label")[0];

    let new_map = recompile(
        &mut tree,
        "<div ref=\"card\"><span ref=\"label\">two</span></div>",
    );
    let replaced = reconcile(&mut tree, &mut map, &new_map, "card").expect("reconcile");

    assert!(replaced);
    assert_ne!(map.get("label")[0], stale_label);
    assert_eq!(map.get("label")[0], new_map.get("label")[0]);
    assert!(tree.is_attached(map.get("label")[0]));
}

#[test]
fn detached_targets_are_skipped_without_failing_the_pass() {
    let mut tree = FragmentTree::new();
    let mut map = mount(&mut tree, "<h1 ref=\"title\">old</h1>");
    let element = map.get("title")[0];

    // Simulate external mutation: the element leaves the live tree behind
    // the reconciler's back.
    let intruder = tree.new_element("p");
    tree.replace(element, intruder).expect("replace");

    let new_map = recompile(&mut tree, "<h1 ref=\"title\">new</h1>");
    let replaced = reconcile(&mut tree, &mut map, &new_map, "title").expect("reconcile");

    assert!(!replaced);
    // The stale entry is left alone and the intruder stays live.
    assert_eq!(map.get("title")[0], element);
    assert!(tree.is_attached(intruder));
}

#[test]
fn unknown_dependency_names_reconcile_to_nothing() {
    let mut tree = FragmentTree::new();
    let mut map = mount(&mut tree, "<h1 ref=\"title\">old</h1>");
    let new_map = recompile(&mut tree, "<h1 ref=\"title\">new</h1>");

    let replaced = reconcile(&mut tree, &mut map, &new_map, "absent").expect("reconcile");
    assert!(!replaced);
    assert_eq!(tree.to_markup(tree.root()), "<h1 ref=\"title\">old</h1>");
}
