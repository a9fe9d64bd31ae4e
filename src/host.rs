use crate::geometry::{Rect, Viewport};
use crate::sections::SectionDescriptor;

/// Identifies an element registered with the entrance controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Layout queries the controllers need from the page.
///
/// The browser implementation reads `getBoundingClientRect` and the window
/// size. Every query may come back empty while a node is unmounted or not yet
/// laid out, and callers treat that as "nothing to do".
pub trait LayoutHost {
    fn viewport(&self) -> Option<Viewport>;

    fn element_bounds(&self, element: ElementId) -> Option<Rect>;

    /// Mounted sections in document order, top offsets relative to the
    /// viewport.
    fn sections(&self) -> Vec<SectionDescriptor>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    /// In-memory layout where scrolling shifts every element up.
    pub(crate) struct FakeLayout {
        pub viewport: Option<Viewport>,
        pub scroll_y: f64,
        pub elements: HashMap<ElementId, Rect>,
        pub sections: Vec<(String, f64)>,
    }

    impl FakeLayout {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                viewport: Some(Viewport::new(width, height)),
                scroll_y: 0.0,
                elements: HashMap::new(),
                sections: Vec::new(),
            }
        }

        /// Places an element at a document (not client) offset.
        pub fn place(&mut self, element: ElementId, document_top: f64, height: f64) {
            self.elements
                .insert(element, Rect::new(0.0, document_top, 400.0, height));
        }

        pub fn section(mut self, id: &str, document_top: f64) -> Self {
            self.sections.push((id.to_string(), document_top));
            self
        }
    }

    impl LayoutHost for FakeLayout {
        fn viewport(&self) -> Option<Viewport> {
            self.viewport
        }

        fn element_bounds(&self, element: ElementId) -> Option<Rect> {
            self.elements
                .get(&element)
                .map(|rect| Rect::new(rect.left, rect.top - self.scroll_y, rect.width, rect.height))
        }

        fn sections(&self) -> Vec<SectionDescriptor> {
            self.sections
                .iter()
                .map(|(id, top)| SectionDescriptor {
                    id: id.clone(),
                    top_offset_px: top - self.scroll_y,
                })
                .collect()
        }
    }
}
