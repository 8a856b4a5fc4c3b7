//! Property tests for page composition and rendering.

use proptest::prelude::*;

use crate::{
    ContentBody, ContentError, ContentSource, ContentStore, ContentUnit, Element, LayoutComposer,
    MemorySink, PageMeta, PageRenderer, ViewportFeed, ViewportSize,
};

const TUTORIAL: &str = "---\ntitle: Fetching packages\ncap: 600\n---\n\
# Fetching packages\n\n\
Load the catalog with `fetch`, then [store it](store.md).\n\n\
![Catalog](catalog.png)\n\n\
```rust\nlet catalog = fetch().await?;\n```\n\n\
- fetch\n- store\n- display\n";

fn tutorial() -> ContentUnit {
    let mut store = ContentStore::new();
    store.register_markdown("tutorial/fetch", TUTORIAL);
    store.load("tutorial/fetch").unwrap()
}

fn arb_element() -> impl Strategy<Value = Element> {
    let leaf = prop_oneof![
        "[a-z ]{1,16}".prop_map(|text| Element::Label { text }),
        (1u32..2000, 1u32..2000).prop_map(|(width, height)| Element::Image {
            src: "image.png".to_string(),
            width,
            height,
            alt: String::new(),
        }),
        "[a-z]{1,8}".prop_map(|label| Element::Link {
            href: format!("/{label}.html"),
            label,
        }),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|children| Element::Stack { children })
    })
}

fn arb_example() -> impl Strategy<Value = ContentUnit> {
    (prop::collection::vec(arb_element(), 1..6), 1u32..2000).prop_map(|(elements, cap)| {
        ContentUnit::new(
            "examples/generated",
            PageMeta {
                title: Some("Generated".to_string()),
                cap: Some(cap),
            },
            ContentBody::Example(elements),
        )
    })
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn tutorial_page_clamps_to_cap() {
    let content = tutorial();
    let composer = LayoutComposer::new();

    assert_eq!(composer.compose(&content, 375).column_width, 375);
    assert_eq!(composer.compose(&content, 1200).column_width, 600);
}

#[test]
fn stacked_example_children_are_clamped_in_order() {
    let mut store = ContentStore::new();
    store.register_example(
        "examples/stack",
        r#"
cap = 150

[[element]]
kind = "label"
text = "Ferris"

[[element]]
kind = "image"
src = "square.png"
width = 200
height = 200

[[element]]
kind = "image"
src = "wide.png"
width = 472
height = 315
"#,
    );
    let content = store.load("examples/stack").unwrap();
    let tree = LayoutComposer::new().compose(&content, 1024);

    let widths: Vec<u32> = tree.content().iter().map(|node| node.width).collect();
    assert_eq!(widths, [150, 150, 150]);
    assert_eq!(tree.main().unwrap().width, 150);
}

#[test]
fn resize_round_trip_restores_the_tree() {
    let mut feed = ViewportFeed::new(ViewportSize::new(1200, 800));
    let mut renderer = PageRenderer::new(tutorial(), LayoutComposer::new(), MemorySink::new());
    renderer.activate(&mut feed).unwrap();
    let original = renderer.current().unwrap().clone();

    feed.publish(ViewportSize::new(375, 667));
    feed.publish(ViewportSize::new(1200, 800));
    renderer.pump().unwrap();

    let presented = renderer.sink().presented();
    assert_eq!(presented.len(), 3);
    assert_ne!(presented[1], original);
    assert_eq!(renderer.current().unwrap(), &original);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Property: column width is always min(cap, viewport width)
    #[test]
    fn prop_column_width_is_min_of_cap_and_width(
        content in arb_example(),
        width in 0u32..4000,
    ) {
        let composer = LayoutComposer::new();
        let cap = composer.cap_for(&content);
        let tree = composer.compose(&content, width);

        prop_assert_eq!(tree.column_width, cap.min(width));
        for child in tree.content() {
            prop_assert!(child.width <= tree.column_width);
        }
    }

    /// Property: composing twice yields identical trees
    #[test]
    fn prop_compose_is_deterministic(content in arb_example(), width in 0u32..4000) {
        let composer = LayoutComposer::new();
        prop_assert_eq!(composer.compose(&content, width), composer.compose(&content, width));
    }

    /// Property: w1 -> w2 -> w1 reproduces the first tree
    #[test]
    fn prop_resize_round_trip(
        content in arb_example(),
        first in 0u32..4000,
        second in 0u32..4000,
    ) {
        let mut feed = ViewportFeed::new(ViewportSize::new(first, 600));
        let mut renderer = PageRenderer::new(content, LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();
        let original = renderer.current().unwrap().clone();

        feed.publish(ViewportSize::new(second, 600));
        feed.publish(ViewportSize::new(first, 600));
        renderer.pump().unwrap();

        prop_assert_eq!(renderer.current().unwrap(), &original);
    }

    /// Property: unregistered ids always fail with NotFound
    #[test]
    fn prop_unregistered_id_is_not_found(id in "[a-z]{1,12}(/[a-z]{1,12})?") {
        let mut store = ContentStore::new();
        store.register_markdown("registered", "# Registered\n");
        prop_assume!(id != "registered");

        let result = store.load(&id);
        prop_assert!(matches!(result, Err(ContentError::NotFound(missing)) if missing == id));
    }

    /// Property: after teardown no published size causes a recomposition
    #[test]
    fn prop_no_renders_after_teardown(sizes in prop::collection::vec((0u32..4000, 0u32..4000), 1..8)) {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(tutorial(), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();
        renderer.teardown();

        for (width, height) in sizes {
            feed.publish(ViewportSize::new(width, height));
        }

        prop_assert_eq!(renderer.pump().unwrap(), 0);
        prop_assert_eq!(renderer.renders(), 1);
    }
}
