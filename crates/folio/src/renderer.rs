//! Viewport-driven page rendering.
//!
//! A [`PageRenderer`] owns one content unit, the composer that lays it out
//! and the sink that displays the result. While subscribed to a
//! [`ViewportFeed`] it recomposes the page for every distinct viewport size,
//! in arrival order, replacing the displayed tree as a whole.

use crate::content::ContentUnit;
use crate::error::SinkError;
use crate::layout::LayoutComposer;
use crate::tree::PageTree;
use crate::viewport::{Subscription, ViewportFeed, ViewportSize};

/// Display surface for composed pages.
pub trait RenderSink {
    /// Presents a complete page tree, replacing whatever was shown before.
    fn present(&mut self, tree: &PageTree) -> Result<(), SinkError>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn present(&mut self, tree: &PageTree) -> Result<(), SinkError> {
        (**self).present(tree)
    }
}

/// Sink that keeps every presented tree.
#[derive(Debug, Default)]
pub struct MemorySink {
    presented: Vec<PageTree>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> &[PageTree] {
        &self.presented
    }

    pub fn last(&self) -> Option<&PageTree> {
        self.presented.last()
    }
}

impl RenderSink for MemorySink {
    fn present(&mut self, tree: &PageTree) -> Result<(), SinkError> {
        self.presented.push(tree.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// No viewport subscription.
    Idle,
    /// Recomposing on viewport notifications.
    Subscribed,
}

/// Re-renders one page whenever its viewport changes.
///
/// # Example
///
/// ```
/// use folio::{
///     ContentSource, ContentStore, LayoutComposer, MemorySink, PageRenderer, ViewportFeed,
///     ViewportSize,
/// };
///
/// let mut store = ContentStore::new();
/// store.register_markdown("intro", "# Intro\n\nHello.");
/// let unit = store.load("intro").unwrap();
///
/// let mut feed = ViewportFeed::new(ViewportSize::new(1200, 800));
/// let mut renderer = PageRenderer::new(unit, LayoutComposer::new(), MemorySink::new());
/// renderer.activate(&mut feed).unwrap();
///
/// feed.publish(ViewportSize::new(375, 667));
/// renderer.pump().unwrap();
/// assert_eq!(renderer.current().unwrap().column_width, 375);
/// ```
#[derive(Debug)]
pub struct PageRenderer<S> {
    content: ContentUnit,
    composer: LayoutComposer,
    sink: S,
    subscription: Option<Subscription>,
    current: Option<PageTree>,
    last_viewport: Option<ViewportSize>,
    renders: u64,
}

impl<S: RenderSink> PageRenderer<S> {
    pub fn new(content: ContentUnit, composer: LayoutComposer, sink: S) -> Self {
        Self {
            content,
            composer,
            sink,
            subscription: None,
            current: None,
            last_viewport: None,
            renders: 0,
        }
    }

    pub fn state(&self) -> RendererState {
        if self.subscription.is_some() {
            RendererState::Subscribed
        } else {
            RendererState::Idle
        }
    }

    /// Subscribes to `feed` and renders at its current size.
    ///
    /// Activating a subscribed renderer does nothing.
    pub fn activate(&mut self, feed: &mut ViewportFeed) -> Result<(), SinkError> {
        if self.subscription.is_some() {
            tracing::debug!(page = self.content.id(), "renderer already subscribed");
            return Ok(());
        }

        let subscription = feed.subscribe();
        let initial = subscription.initial();
        self.subscription = Some(subscription);
        self.last_viewport = None;
        tracing::debug!(page = self.content.id(), %initial, "renderer subscribed");

        self.recompose(initial)
    }

    /// Processes pending viewport notifications in arrival order.
    ///
    /// Returns the number of recompositions that ran. Notifications equal to
    /// the last rendered size are skipped.
    pub fn pump(&mut self) -> Result<usize, SinkError> {
        let mut recomposed = 0;
        while let Some(size) = self.subscription.as_mut().and_then(Subscription::try_next) {
            if self.last_viewport == Some(size) {
                tracing::trace!(page = self.content.id(), %size, "viewport unchanged");
                continue;
            }
            self.recompose(size)?;
            recomposed += 1;
        }
        Ok(recomposed)
    }

    /// Drops the subscription. No further recompositions occur until the
    /// renderer is activated again.
    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!(page = self.content.id(), renders = self.renders, "renderer idle");
        }
    }

    /// The tree currently on display.
    pub fn current(&self) -> Option<&PageTree> {
        self.current.as_ref()
    }

    /// Number of recompositions since creation.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn content(&self) -> &ContentUnit {
        &self.content
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn recompose(&mut self, viewport: ViewportSize) -> Result<(), SinkError> {
        let tree = self.composer.compose(&self.content, viewport.width);
        self.last_viewport = Some(viewport);
        self.renders += 1;
        let tree = self.current.insert(tree);
        self.sink.present(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBody, Element, PageMeta};

    fn labelled(cap: u32) -> ContentUnit {
        ContentUnit::new(
            "label",
            PageMeta {
                title: None,
                cap: Some(cap),
            },
            ContentBody::Example(vec![Element::Label {
                text: "hello".to_string(),
            }]),
        )
    }

    struct FailingSink;

    impl RenderSink for FailingSink {
        fn present(&mut self, _tree: &PageTree) -> Result<(), SinkError> {
            Err(SinkError::Io {
                path: "unwritable.html".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn starts_idle_without_a_tree() {
        let renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        assert_eq!(renderer.state(), RendererState::Idle);
        assert!(renderer.current().is_none());
        assert_eq!(renderer.renders(), 0);
    }

    #[test]
    fn activation_renders_at_current_size() {
        let mut feed = ViewportFeed::new(ViewportSize::new(375, 667));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());

        renderer.activate(&mut feed).unwrap();

        assert_eq!(renderer.state(), RendererState::Subscribed);
        assert_eq!(renderer.current().unwrap().column_width, 375);
        assert_eq!(renderer.sink().presented().len(), 1);
    }

    #[test]
    fn second_activation_is_a_no_op() {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());

        renderer.activate(&mut feed).unwrap();
        renderer.activate(&mut feed).unwrap();

        assert_eq!(renderer.renders(), 1);
        assert_eq!(feed.subscriber_count(), 1);
    }

    #[test]
    fn resizes_are_processed_in_order() {
        let mut feed = ViewportFeed::new(ViewportSize::new(1200, 800));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();

        feed.publish(ViewportSize::new(375, 667));
        feed.publish(ViewportSize::new(500, 667));
        assert_eq!(renderer.pump().unwrap(), 2);

        let widths: Vec<u32> = renderer
            .sink()
            .presented()
            .iter()
            .map(|tree| tree.column_width)
            .collect();
        assert_eq!(widths, [600, 375, 500]);
        assert_eq!(renderer.current().unwrap().column_width, 500);
    }

    #[test]
    fn duplicate_sizes_render_once() {
        let mut feed = ViewportFeed::new(ViewportSize::new(1200, 800));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();

        feed.publish(ViewportSize::new(1200, 800));
        feed.publish(ViewportSize::new(375, 667));
        feed.publish(ViewportSize::new(375, 667));

        assert_eq!(renderer.pump().unwrap(), 1);
        assert_eq!(renderer.renders(), 2);
    }

    #[test]
    fn height_only_changes_still_recompose() {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();

        feed.publish(ViewportSize::new(800, 900));
        assert_eq!(renderer.pump().unwrap(), 1);
        assert_eq!(
            renderer.sink().presented()[0],
            renderer.sink().presented()[1]
        );
    }

    #[test]
    fn teardown_stops_recomposition() {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();

        renderer.teardown();
        feed.publish(ViewportSize::new(320, 480));

        assert_eq!(renderer.state(), RendererState::Idle);
        assert_eq!(renderer.pump().unwrap(), 0);
        assert_eq!(renderer.renders(), 1);
        assert_eq!(feed.subscriber_count(), 0);
        assert_eq!(renderer.current().unwrap().column_width, 600);
    }

    #[test]
    fn reactivation_renders_at_latest_size() {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), MemorySink::new());
        renderer.activate(&mut feed).unwrap();
        renderer.teardown();

        feed.publish(ViewportSize::new(320, 480));
        renderer.activate(&mut feed).unwrap();

        assert_eq!(renderer.current().unwrap().column_width, 320);
    }

    #[test]
    fn sink_errors_are_surfaced() {
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), FailingSink);

        let result = renderer.activate(&mut feed);
        assert!(matches!(result, Err(SinkError::Io { .. })));
        assert!(renderer.current().is_some());
    }

    #[test]
    fn borrowed_sinks_can_be_used() {
        let mut sink = MemorySink::new();
        let mut feed = ViewportFeed::new(ViewportSize::new(800, 600));
        {
            let mut renderer = PageRenderer::new(labelled(600), LayoutComposer::new(), &mut sink);
            renderer.activate(&mut feed).unwrap();
        }
        assert_eq!(sink.presented().len(), 1);
    }
}
